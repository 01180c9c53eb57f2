//! Euler-tour forests: balanced sequence representations of the Euler tours of a forest.
//!
//! Every element of a sequence is one *directed* edge `(v,w)` of an Euler tour; a tree edge
//! `{v,w}` therefore appears twice, as `(v,w)` and `(w,v)`. The sequences are AVL-balanced,
//! so linking and cutting tree edges means rotating, splitting and joining sequences in
//! O(log n). Connectivity is root comparison.
//!
//! The forest is generic over the aggregate attached to each edge node ([EtData]); the
//! aggregate is recomputed from the children whenever the structure changes. Three flavours
//! are used by this crate:
//!
//! * [EmptyTracking]: no aggregate; sizes only ([QueryForestAVL](crate::query_forest)).
//! * [CutSetTracking]: per-edge optional "own" XOR sketch matrix plus the XOR of all own
//!	matrices in the subtree ([CutSet](crate::cutset)).
//! * [HdtTracking]: on-level tree edge markers and non-tree edge counters with subtree sums
//!	([Hdt](crate::hdt)).

use crate::{Edge, NodeIdx};

/// Enable or disable expensive invariant checking
const VERIFY : bool = cfg!( feature = "verify_structures" );


/// A handle to an edge node in a [EulerTourForest] arena.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct EtEdgeIdx {
	raw_idx : usize
}

impl EtEdgeIdx {
	fn new( idx : usize ) -> EtEdgeIdx {
		EtEdgeIdx { raw_idx : idx }
	}
}


/// The aggregate attached to every edge node of a [EulerTourForest].
pub trait EtData : Clone + Default {
	/// Recomputes the accumulated part of this aggregate from the node's own contribution and
	/// the aggregates of its children.
	fn refresh( &mut self, left : Option<&Self>, right : Option<&Self> );
}


struct Node<TData : EtData> {
	v : NodeIdx,
	w : NodeIdx,

	parent : Option<EtEdgeIdx>,
	left_child : Option<EtEdgeIdx>,
	right_child : Option<EtEdgeIdx>,

	height : usize,
	size : usize,

	data : TData
}


/// A disjoint collection of AVL-balanced Euler tour sequences. See the
/// [module documentation](self).
pub struct EulerTourForest<TData : EtData> {
	nodes : Vec<Node<TData>>,
	free : Vec<usize>
}

impl<TData : EtData> EulerTourForest<TData> {
	/// Creates an empty forest.
	pub fn new() -> EulerTourForest<TData> {
		EulerTourForest { nodes : vec![], free : vec![] }
	}

	fn node( &self, x : EtEdgeIdx ) -> &Node<TData> {
		&self.nodes[x.raw_idx]
	}

	fn node_mut( &mut self, x : EtEdgeIdx ) -> &mut Node<TData> {
		&mut self.nodes[x.raw_idx]
	}

	/// The directed edge an edge node represents.
	pub fn endpoints( &self, e : EtEdgeIdx ) -> (NodeIdx, NodeIdx) {
		( self.node( e ).v, self.node( e ).w )
	}

	/// The aggregate of edge node `e`. At a root this is the aggregate of the whole tour.
	pub fn data( &self, e : EtEdgeIdx ) -> &TData {
		&self.node( e ).data
	}

	/// The number of edge nodes in the tour containing `e`.
	pub fn tour_size( &self, e : EtEdgeIdx ) -> usize {
		self.node( self.get_root( e ) ).size
	}

	/// The root of the sequence tree containing `e`.
	pub fn get_root( &self, e : EtEdgeIdx ) -> EtEdgeIdx {
		let mut x = e;
		while let Some( p ) = self.node( x ).parent {
			x = p;
		}
		x
	}

	/// Inserts a tree edge `{v,w}`, joining the Euler tours of `v_edge` and `w_edge` (each
	/// `None` for a so-far isolated vertex, else any edge incident to `v` resp. `w`). The two
	/// tours must be distinct. Returns the handles of the new edge nodes `(v,w)` and `(w,v)`.
	pub fn insert_et_edge( &mut self, v : NodeIdx, w : NodeIdx,
			v_edge : Option<EtEdgeIdx>, w_edge : Option<EtEdgeIdx>,
			vw_data : TData, wv_data : TData ) -> (EtEdgeIdx, EtEdgeIdx)
	{
		if let ( Some( ve ), Some( we ) ) = ( v_edge, w_edge ) {
			debug_assert!( self.get_root( ve ) != self.get_root( we ) );
		}

		// Rotate the Euler tours to start at v resp. w
		let v_tree = v_edge.map( |e| self.make_front( e ) );
		let w_tree = w_edge.map( |e| self.make_front( e ) );

		let vw_edge = self.alloc( v, w, vw_data );
		let wv_edge = self.alloc( w, v, wv_data );

		// Join the tours with the new edge and append the back edge
		let t = self.join( v_tree, w_tree, vw_edge );
		self.trivial_insert( wv_edge, t, false );

		(vw_edge, wv_edge)
	}

	/// Deletes the tree edge with edge nodes `edge` and `back_edge`, splitting its tour.
	pub fn delete_et_edge( &mut self, edge : EtEdgeIdx, back_edge : EtEdgeIdx ) {
		// Rotate the edge to the front so the back edge is a clean cut
		self.make_front( edge );
		let (left, right) = self.split( back_edge );

		// Both halves now start with one of the doomed edge nodes
		let (removed, _) = self.trivial_delete( left.unwrap(), true );
		debug_assert!( removed == edge );
		self.free_node( edge );
		let (removed, _) = self.trivial_delete( right, true );
		debug_assert!( removed == back_edge );
		self.free_node( back_edge );
	}

	/// The Euler tour containing `e`, in order. For diagnostics and tests.
	pub fn tour( &self, e : EtEdgeIdx ) -> Vec<(NodeIdx, NodeIdx)> {
		let root = self.get_root( e );
		let mut stack = vec![];
		let mut ret = vec![];
		let mut cur = Some( root );

		while !stack.is_empty() || cur.is_some() {
			match cur {
				Some( x ) => {
					stack.push( x );
					cur = self.node( x ).left_child;
				},
				None => {
					let x = stack.pop().unwrap();
					ret.push( ( self.node( x ).v, self.node( x ).w ) );
					cur = self.node( x ).right_child;
				}
			}
		}

		ret
	}

	/// Recomputes the aggregates of `e` and all its ancestors.
	pub fn refresh_tracking_upwards( &mut self, e : EtEdgeIdx ) {
		let mut cur = Some( e );
		while let Some( x ) = cur {
			self.refresh_tracking( x );
			cur = self.node( x ).parent;
		}
	}


	fn alloc( &mut self, v : NodeIdx, w : NodeIdx, data : TData ) -> EtEdgeIdx {
		let node = Node {
			v, w,
			parent : None, left_child : None, right_child : None,
			height : 1, size : 1,
			data
		};
		let idx = if let Some( i ) = self.free.pop() {
			self.nodes[i] = node;
			EtEdgeIdx::new( i )
		}
		else {
			self.nodes.push( node );
			EtEdgeIdx::new( self.nodes.len() - 1 )
		};
		self.refresh_tracking( idx );
		idx
	}

	fn free_node( &mut self, x : EtEdgeIdx ) {
		self.free.push( x.raw_idx );
	}

	fn height( &self, x : Option<EtEdgeIdx> ) -> usize {
		x.map_or( 0, |i| self.node( i ).height )
	}

	fn size( &self, x : Option<EtEdgeIdx> ) -> usize {
		x.map_or( 0, |i| self.node( i ).size )
	}

	/// Recomputes the aggregate of `x` from its own contribution and its children.
	fn refresh_tracking( &mut self, x : EtEdgeIdx ) {
		let (l, r) = ( self.node( x ).left_child, self.node( x ).right_child );
		let mut data = std::mem::take( &mut self.node_mut( x ).data );
		data.refresh(
			l.map( |i| &self.node( i ).data ),
			r.map( |i| &self.node( i ).data ) );
		self.node_mut( x ).data = data;
	}

	/// Refreshes height, size and the aggregate of `x`.
	fn refresh_subtree_info( &mut self, x : EtEdgeIdx ) {
		let (l, r) = ( self.node( x ).left_child, self.node( x ).right_child );
		let height = 1 + self.height( l ).max( self.height( r ) );
		let size = 1 + self.size( l ) + self.size( r );
		let node = self.node_mut( x );
		node.height = height;
		node.size = size;
		self.refresh_tracking( x );
	}

	/// Turns `x` into a valid solitary node.
	fn clean_node( &mut self, x : EtEdgeIdx ) {
		let node = self.node_mut( x );
		node.parent = None;
		node.left_child = None;
		node.right_child = None;
		node.height = 1;
		node.size = 1;
		self.refresh_tracking( x );
	}

	/// Cleanly separates the `left` child of `x`, if any.
	fn separate_dir_child( &mut self, x : EtEdgeIdx, left : bool ) -> Option<EtEdgeIdx> {
		let kid = if left { self.node( x ).left_child } else { self.node( x ).right_child };
		let kid = kid?;
		self.node_mut( kid ).parent = None;
		if left {
			self.node_mut( x ).left_child = None;
		}
		else {
			self.node_mut( x ).right_child = None;
		}
		Some( kid )
	}

	/// Classic single AVL rotation; `left == true` rotates the right child up. Returns the new
	/// subtree root, reattached to `x`'s old parent.
	fn rotate( &mut self, x : EtEdgeIdx, left : bool ) -> EtEdgeIdx {
		let parent = self.node( x ).parent;

		let kid = self.separate_dir_child( x, !left ).unwrap();
		let inner_grandkid = self.separate_dir_child( kid, left );

		if left {
			self.node_mut( kid ).left_child = Some( x );
			self.node_mut( x ).parent = Some( kid );
			self.node_mut( x ).right_child = inner_grandkid;
		}
		else {
			self.node_mut( kid ).right_child = Some( x );
			self.node_mut( x ).parent = Some( kid );
			self.node_mut( x ).left_child = inner_grandkid;
		}
		if let Some( g ) = inner_grandkid {
			self.node_mut( g ).parent = Some( x );
		}

		self.refresh_subtree_info( x );
		self.refresh_subtree_info( kid );

		self.node_mut( kid ).parent = parent;
		if let Some( p ) = parent {
			if self.node( p ).left_child == Some( x ) {
				self.node_mut( p ).left_child = Some( kid );
			}
			else {
				self.node_mut( p ).right_child = Some( kid );
			}
		}

		kid
	}

	/// Walks from `start` to the root, refreshing aggregates and rotating unbalanced nodes.
	/// Returns the root.
	fn rebalance( &mut self, start : EtEdgeIdx ) -> EtEdgeIdx {
		let mut cur = Some( start );
		let mut prev = start;
		while let Some( x ) = cur {
			prev = x;
			cur = self.node( x ).parent;
			self.refresh_subtree_info( x );
			let (l, r) = ( self.node( x ).left_child, self.node( x ).right_child );
			if self.height( l ) > self.height( r ) + 1 {
				let l = l.unwrap();
				if self.height( self.node( l ).right_child ) > self.height( self.node( l ).left_child ) {
					self.rotate( l, true );
				}
				prev = self.rotate( x, false );
			}
			else if self.height( r ) > self.height( l ) + 1 {
				let r = r.unwrap();
				if self.height( self.node( r ).left_child ) > self.height( self.node( r ).right_child ) {
					self.rotate( r, false );
				}
				prev = self.rotate( x, true );
			}
		}

		if VERIFY { self.check_tree_validity( prev ); }

		prev
	}

	/// Inserts solitary `new_node` as the first or last element of the tree of `root`.
	fn trivial_insert( &mut self, new_node : EtEdgeIdx, root : EtEdgeIdx, first : bool ) -> EtEdgeIdx {
		self.clean_node( new_node );

		let mut pos = root;
		if first {
			while let Some( c ) = self.node( pos ).left_child {
				pos = c;
			}
			self.node_mut( pos ).left_child = Some( new_node );
		}
		else {
			while let Some( c ) = self.node( pos ).right_child {
				pos = c;
			}
			self.node_mut( pos ).right_child = Some( new_node );
		}
		self.node_mut( new_node ).parent = Some( pos );

		self.rebalance( pos )
	}

	/// Removes the first or last node of the tree of `root`. Returns the removed node and the
	/// root of the remaining tree.
	fn trivial_delete( &mut self, root : EtEdgeIdx, first : bool ) -> (EtEdgeIdx, Option<EtEdgeIdx>) {
		let mut u = root;
		if first {
			while let Some( c ) = self.node( u ).left_child {
				u = c;
			}
		}
		else {
			while let Some( c ) = self.node( u ).right_child {
				u = c;
			}
		}

		// u has at most one child
		let parent = self.node( u ).parent;
		let child = if first { self.node( u ).right_child } else { self.node( u ).left_child };

		let new_root = match parent {
			Some( p ) => {
				if self.node( p ).left_child == Some( u ) {
					self.node_mut( p ).left_child = child;
				}
				else {
					self.node_mut( p ).right_child = child;
				}
				if let Some( c ) = child {
					self.node_mut( c ).parent = Some( p );
				}
				Some( self.rebalance( p ) )
			},
			None => {
				if let Some( c ) = child {
					self.node_mut( c ).parent = None;
				}
				child
			}
		};

		self.clean_node( u );

		(u, new_root)
	}

	/// Joins two trees around `join_node` so that the in-order sequence is `left_tree`,
	/// `join_node`, `right_tree`.
	fn join( &mut self, left_tree : Option<EtEdgeIdx>, right_tree : Option<EtEdgeIdx>,
			join_node : EtEdgeIdx ) -> EtEdgeIdx
	{
		debug_assert!( left_tree != Some( join_node ) && right_tree != Some( join_node ) );
		self.clean_node( join_node );

		let (left_tree, right_tree) = match ( left_tree, right_tree ) {
			( None, None ) => return join_node,
			( None, Some( r ) ) => return self.trivial_insert( join_node, r, true ),
			( Some( l ), None ) => return self.trivial_insert( join_node, l, false ),
			( Some( l ), Some( r ) ) => (l, r)
		};

		let lh = self.node( left_tree ).height;
		let rh = self.node( right_tree ).height;

		// Trivial case of roughly equal heights
		if lh <= rh + 1 && rh <= lh + 1 {
			self.node_mut( join_node ).left_child = Some( left_tree );
			self.node_mut( join_node ).right_child = Some( right_tree );
			self.node_mut( left_tree ).parent = Some( join_node );
			self.node_mut( right_tree ).parent = Some( join_node );
			self.refresh_subtree_info( join_node );

			if VERIFY { self.check_tree_validity( join_node ); }

			return join_node;
		}

		if lh > rh {
			// Descend the right spine of the taller left tree
			let mut pos = left_tree;
			while self.height( self.node( pos ).right_child ) > rh {
				pos = self.node( pos ).right_child.unwrap();
			}
			let small_tree = self.separate_dir_child( pos, false );

			self.node_mut( join_node ).left_child = small_tree;
			if let Some( s ) = small_tree {
				self.node_mut( s ).parent = Some( join_node );
			}
			self.node_mut( join_node ).right_child = Some( right_tree );
			self.node_mut( right_tree ).parent = Some( join_node );
			self.refresh_subtree_info( join_node );
			self.node_mut( pos ).right_child = Some( join_node );
			self.node_mut( join_node ).parent = Some( pos );
			self.rebalance( pos )
		}
		else {
			let mut pos = right_tree;
			while self.height( self.node( pos ).left_child ) > lh {
				pos = self.node( pos ).left_child.unwrap();
			}
			let small_tree = self.separate_dir_child( pos, true );

			self.node_mut( join_node ).right_child = small_tree;
			if let Some( s ) = small_tree {
				self.node_mut( s ).parent = Some( join_node );
			}
			self.node_mut( join_node ).left_child = Some( left_tree );
			self.node_mut( left_tree ).parent = Some( join_node );
			self.refresh_subtree_info( join_node );
			self.node_mut( pos ).left_child = Some( join_node );
			self.node_mut( join_node ).parent = Some( pos );
			self.rebalance( pos )
		}
	}

	/// Splits the tree containing `x` into everything before `x` and `x` with everything
	/// after. The second tree is never empty.
	fn split( &mut self, x : EtEdgeIdx ) -> (Option<EtEdgeIdx>, EtEdgeIdx) {
		let mut left_tree = self.separate_dir_child( x, true );
		let right_tree = self.separate_dir_child( x, false );

		// Trivial case: x was the root
		if self.node( x ).parent.is_none() {
			let right = match right_tree {
				Some( r ) => self.trivial_insert( x, r, true ),
				None => {
					self.clean_node( x );
					x
				}
			};
			return (left_tree, right);
		}

		// Move up the tree, joining the left/right subtrees hanging off the root path
		let mut pos = self.node( x ).parent.unwrap();
		let mut left;

		// Cut off x from its parent
		if self.node( pos ).left_child == Some( x ) {
			self.node_mut( pos ).left_child = None;
			left = false;
		}
		else {
			self.node_mut( pos ).right_child = None;
			left = true;
		}
		self.node_mut( x ).parent = None;
		let mut right_tree = Some( self.join( None, right_tree, x ) );

		loop {
			let parent = self.node( pos ).parent;
			let mut next_left = left;
			if let Some( p ) = parent {
				if self.node( p ).left_child == Some( pos ) {
					self.node_mut( p ).left_child = None;
					next_left = false;
				}
				else {
					self.node_mut( p ).right_child = None;
					next_left = true;
				}
				self.node_mut( pos ).parent = None;
			}

			let join_tree = self.separate_dir_child( pos, left );

			if left {
				left_tree = Some( self.join( join_tree, left_tree, pos ) );
			}
			else {
				right_tree = Some( self.join( right_tree, join_tree, pos ) );
			}

			match parent {
				Some( p ) => {
					pos = p;
					left = next_left;
				},
				None => break
			}
		}

		(left_tree, right_tree.unwrap())
	}

	/// Rotates the Euler tour of `new_front` so that it becomes the very first edge. Returns
	/// the root of the rotated tree.
	fn make_front( &mut self, new_front : EtEdgeIdx ) -> EtEdgeIdx {
		let (left, right) = self.split( new_front );
		let left = match left {
			Some( l ) => l,
			None => return right
		};

		// Reattach the front part behind the back part, reusing its first node as join node
		let (first, rest) = self.trivial_delete( left, true );
		let new_tree = self.join( Some( right ), rest, first );

		if VERIFY { self.check_tree_validity( new_tree ); }

		new_tree
	}

	/// Checks balance, subtree counters and tour ordering.
	/// Only called with the `verify_structures` feature.
	fn check_tree_validity( &self, x : EtEdgeIdx ) {
		let (l, r) = ( self.node( x ).left_child, self.node( x ).right_child );
		assert_eq!( self.node( x ).height, 1 + self.height( l ).max( self.height( r ) ) );
		assert_eq!( self.node( x ).size, 1 + self.size( l ) + self.size( r ) );
		assert!( self.node( x ).height <= self.height( l ) + 2 );
		assert!( self.node( x ).height <= self.height( r ) + 2 );

		if let Some( l ) = l {
			assert_eq!( self.node( l ).parent, Some( x ) );
			// The tour must chain: predecessor ends where x starts
			let mut prev = l;
			while let Some( c ) = self.node( prev ).right_child {
				prev = c;
			}
			assert_eq!( self.node( prev ).w, self.node( x ).v );
			self.check_tree_validity( l );
		}
		if let Some( r ) = r {
			assert_eq!( self.node( r ).parent, Some( x ) );
			let mut next = r;
			while let Some( c ) = self.node( next ).left_child {
				next = c;
			}
			assert_eq!( self.node( x ).w, self.node( next ).v );
			self.check_tree_validity( r );
		}
	}
}

impl<TData : EtData> Default for EulerTourForest<TData> {
	fn default() -> Self {
		EulerTourForest::new()
	}
}


/// No aggregate at all; the forest maintains sizes only.
#[derive(Clone, Default)]
pub struct EmptyTracking {}

impl EtData for EmptyTracking {
	fn refresh( &mut self, _ : Option<&Self>, _ : Option<&Self> ) {}
}


/// A sketch matrix: one row of XORed edges per boost copy and sketch level.
pub type SketchMatrix = Vec<Vec<Edge>>;

/// The cut-set aggregate: an optional owned sketch matrix (present exactly on the *active*
/// edge of a vertex) and the XOR of all owned matrices in the subtree.
#[derive(Clone, Default)]
pub struct CutSetTracking {
	own : Option<SketchMatrix>,
	accumulated : SketchMatrix
}

impl CutSetTracking {
	/// An aggregate with no own sketch and zeroed accumulators of the given dimensions.
	pub fn new( boost : usize, rows : usize ) -> CutSetTracking {
		CutSetTracking { own : None, accumulated : vec![vec![Edge::ZERO; rows]; boost] }
	}

	/// The accumulated sketch matrix.
	pub fn accumulated( &self ) -> &SketchMatrix {
		&self.accumulated
	}
}

impl EtData for CutSetTracking {
	fn refresh( &mut self, left : Option<&Self>, right : Option<&Self> ) {
		for ( i, row ) in self.accumulated.iter_mut().enumerate() {
			for ( j, cell ) in row.iter_mut().enumerate() {
				let mut val = match &self.own {
					Some( own ) => own[i][j],
					None => Edge::ZERO
				};
				if let Some( l ) = left {
					val ^= l.accumulated[i][j];
				}
				if let Some( r ) = right {
					val ^= r.accumulated[i][j];
				}
				*cell = val;
			}
		}
	}
}

impl EulerTourForest<CutSetTracking> {
	/// Makes `e` the owner of the given per-vertex sketch and refreshes the aggregates above.
	pub fn set_tracking_data( &mut self, e : EtEdgeIdx, sketch : &SketchMatrix ) {
		self.node_mut( e ).data.own = Some( sketch.clone() );
		self.refresh_tracking_upwards( e );
	}

	/// XORs `new_edge` into rows `>= starting_levels[boost]` of the sketch owned by active
	/// edge `e` and of every accumulator on the path to the root.
	pub fn add_edge_to_data( &mut self, e : EtEdgeIdx, new_edge : Edge, starting_levels : &[u8] ) {
		{
			let own = self.node_mut( e ).data.own.as_mut().unwrap();
			for ( i, &start ) in starting_levels.iter().enumerate() {
				for j in start as usize..own[i].len() {
					own[i][j] ^= new_edge;
				}
			}
		}
		let mut cur = Some( e );
		while let Some( x ) = cur {
			let acc = &mut self.node_mut( x ).data.accumulated;
			for ( i, &start ) in starting_levels.iter().enumerate() {
				for j in start as usize..acc[i].len() {
					acc[i][j] ^= new_edge;
				}
			}
			cur = self.node( x ).parent;
		}
	}
}


/// The HDT aggregate: whether this tree edge is on its level, how many on-level non-tree
/// edges its vertex `v` currently carries, and the subtree sums of both.
#[derive(Clone, Default)]
pub struct HdtTracking {
	/// This tree edge is on the forest's level.
	pub own_on_level : bool,
	/// Number of on-level non-tree edges attached through this (active) edge.
	pub own_nontree_edges : usize,
	acc_tree_edges_on_level : usize,
	acc_nontree_edges : usize
}

impl HdtTracking {
	/// An aggregate for a fresh edge node.
	pub fn new( on_level : bool, nontree_edges : usize ) -> HdtTracking {
		HdtTracking {
			own_on_level : on_level,
			own_nontree_edges : nontree_edges,
			acc_tree_edges_on_level : 0,
			acc_nontree_edges : 0
		}
	}
}

impl EtData for HdtTracking {
	fn refresh( &mut self, left : Option<&Self>, right : Option<&Self> ) {
		self.acc_tree_edges_on_level = self.own_on_level as usize
			+ left.map_or( 0, |l| l.acc_tree_edges_on_level )
			+ right.map_or( 0, |r| r.acc_tree_edges_on_level );
		self.acc_nontree_edges = self.own_nontree_edges
			+ left.map_or( 0, |l| l.acc_nontree_edges )
			+ right.map_or( 0, |r| r.acc_nontree_edges );
	}
}

impl EulerTourForest<HdtTracking> {
	/// Marks tree edge `e` as on or off its level.
	pub fn set_edge_on_level( &mut self, e : EtEdgeIdx, on_level : bool ) {
		self.node_mut( e ).data.own_on_level = on_level;
		self.refresh_tracking_upwards( e );
	}

	/// Records how many on-level non-tree edges are attached to active edge `e`.
	pub fn set_edge_nontree_edges( &mut self, e : EtEdgeIdx, nontree_edges : usize ) {
		self.node_mut( e ).data.own_nontree_edges = nontree_edges;
		self.refresh_tracking_upwards( e );
	}

	/// Some tree edge in the tour of `e` that is on this level, if any.
	pub fn on_level_tree_edge( &self, e : EtEdgeIdx ) -> Option<(NodeIdx, NodeIdx)> {
		let mut x = self.get_root( e );
		if self.node( x ).data.acc_tree_edges_on_level == 0 {
			return None;
		}

		while !self.node( x ).data.own_on_level {
			let l = self.node( x ).left_child;
			x = match l {
				Some( l ) if self.node( l ).data.acc_tree_edges_on_level != 0 => l,
				_ => self.node( x ).right_child.unwrap()
			};
		}

		Some( ( self.node( x ).v, self.node( x ).w ) )
	}

	/// Some vertex in the tour of `e` that still carries an on-level non-tree edge, if any.
	pub fn node_with_on_level_nontree_edge( &self, e : EtEdgeIdx ) -> Option<NodeIdx> {
		let mut x = self.get_root( e );
		if self.node( x ).data.acc_nontree_edges == 0 {
			return None;
		}

		while self.node( x ).data.own_nontree_edges == 0 {
			let l = self.node( x ).left_child;
			x = match l {
				Some( l ) if self.node( l ).data.acc_nontree_edges != 0 => l,
				_ => self.node( x ).right_child.unwrap()
			};
		}

		Some( self.node( x ).v )
	}
}
