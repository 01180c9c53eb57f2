//! A spanning-tree connectivity structure with centroid re-rooting.
//!
//! Each component keeps an explicitly rooted spanning tree (`parent`, `children`, subtree
//! sizes) plus its non-tree edges with index-carrying back references. Deleting a tree edge
//! detaches the smaller subtree and probes its non-tree edges breadth-first for a
//! replacement. Roots drift towards centroids: whenever a lookup notices a child that
//! outweighs half its tree, the tree is re-rooted there, which keeps lookups around O(√n) on
//! typical workloads.
//!
//! Deterministic and simple, this serves both as an algorithm in its own right and as the
//! correctness oracle for the fancier ones.

use std::collections::VecDeque;

use crate::connectivity::{ContractViolation, DynConnectivity};
use crate::graph::Graph;
use crate::NodeIdx;

/// Invalid position marker for `child_idx`.
const NO_IDX : usize = usize::MAX;


/// The centroid-rooted spanning-tree connectivity structure. See the
/// [module documentation](self).
pub struct DTree {
	num_nodes : usize,

	/// Parent of every vertex in its spanning tree.
	parent : Vec<Option<NodeIdx>>,
	/// Where each vertex sits in its parent's `children` list.
	child_idx : Vec<usize>,
	/// Vertices in the subtree rooted here.
	size : Vec<usize>,
	children : Vec<Vec<NodeIdx>>,
	/// Non-tree neighbors as `(neighbor, index of the back entry in the neighbor's list)`.
	non_tree_neighbors : Vec<Vec<(NodeIdx, usize)>>,

	/// Component ID of every vertex; reliable at tree roots, repaired lazily elsewhere.
	comp_id : Vec<usize>,
	comp_num : usize,
	/// The spanning tree root of every live component.
	comp_rep : Vec<NodeIdx>,
	/// Components whose member IDs may be stale.
	dirty_comp : Vec<bool>,
	dirty_list : VecDeque<usize>,
	dirty_partition : bool,
	/// Set when the dirty list outgrew its cap and was dropped; the next read re-sweeps all
	/// components instead.
	full_sweep_needed : bool,

	/// Scratch marks for path extraction.
	marked : Vec<bool>
}

impl DTree {
	/// Creates a structure with `n` isolated vertices.
	pub fn new( n : usize ) -> DTree {
		let mut t = DTree {
			num_nodes : 0,
			parent : vec![],
			child_idx : vec![],
			size : vec![],
			children : vec![],
			non_tree_neighbors : vec![],
			comp_id : vec![],
			comp_num : 0,
			comp_rep : vec![],
			dirty_comp : vec![],
			dirty_list : VecDeque::new(),
			dirty_partition : false,
			full_sweep_needed : false,
			marked : vec![]
		};
		if n > 0 {
			t.init( NodeIdx::new( n - 1 ), NodeIdx::new( n - 1 ) );
		}
		t
	}

	/// Creates a structure holding the edges of `g`.
	pub fn from_graph( g : &Graph ) -> DTree {
		let mut t = DTree::new( g.num_nodes() );
		for (u, v) in g.edges() {
			t.add_edge( u, v ).unwrap();
		}
		t
	}

	/// The ID of the component of `v`, in `[0, number_of_components)`.
	pub fn component_of( &mut self, v : NodeIdx ) -> usize {
		self.ensure_clean_partition();
		self.comp_id[v.index()]
	}

	/// The sizes of all components, indexed by component ID.
	pub fn component_sizes( &self ) -> Vec<usize> {
		(0..self.comp_num).map( |i| self.size[self.comp_rep[i].index()] ).collect()
	}

	/// Every vertex in the component of `v`, in BFS order from the spanning tree root.
	pub fn component_members( &mut self, v : NodeIdx ) -> Vec<NodeIdx> {
		let root = self.find( v, true );
		self.members_below( root )
	}

	/// All components as vertex lists, indexed by component ID.
	pub fn components( &mut self ) -> Vec<Vec<NodeIdx>> {
		(0..self.comp_num).map( |i| self.members_below( self.comp_rep[i] ) ).collect()
	}

	/// A path of vertices from `u` to `v` along the spanning tree. The two must be connected.
	pub fn get_path( &mut self, u : NodeIdx, v : NodeIdx ) -> Vec<NodeIdx> {
		assert!( self.conn( u, v ) );
		if u == v {
			return vec![u];
		}

		// Walk up alternately from both endpoints, marking, until one walk steps onto a
		// vertex the other already marked: that vertex is the lowest common ancestor
		let mut u_move = Some( u );
		let mut v_move = Some( v );
		let mut move_u = true;
		while !self.is_marked( u_move ) && !self.is_marked( v_move ) {
			if move_u {
				if let Some( x ) = u_move {
					self.marked[x.index()] = true;
					u_move = self.parent[x.index()];
				}
			}
			else if let Some( x ) = v_move {
				self.marked[x.index()] = true;
				v_move = self.parent[x.index()];
			}
			move_u = !move_u;
		}

		let ancestor = match u_move {
			Some( x ) if self.marked[x.index()] => x,
			_ => v_move.unwrap()
		};

		// Restore the marks
		for mut walk in [Some( u ), Some( v )] {
			while let Some( x ) = walk {
				if !self.marked[x.index()] {
					break;
				}
				self.marked[x.index()] = false;
				walk = self.parent[x.index()];
			}
		}

		// Paths from both endpoints to the ancestor, the second one reversed
		let mut path = vec![];
		let mut x = u;
		while x != ancestor {
			path.push( x );
			x = self.parent[x.index()].unwrap();
		}
		path.push( ancestor );
		let mut tail = vec![];
		let mut x = v;
		while x != ancestor {
			tail.push( x );
			x = self.parent[x.index()].unwrap();
		}
		path.extend( tail.into_iter().rev() );

		path
	}


	fn is_marked( &self, v : Option<NodeIdx> ) -> bool {
		match v {
			Some( x ) => self.marked[x.index()],
			None => false
		}
	}

	fn members_below( &self, root : NodeIdx ) -> Vec<NodeIdx> {
		let mut result = vec![];
		let mut queue = VecDeque::from( [root] );
		while let Some( x ) = queue.pop_front() {
			result.push( x );
			for &c in &self.children[x.index()] {
				queue.push_back( c );
			}
		}
		result
	}

	/// Grows the structure when an edge names unseen vertices.
	fn init( &mut self, u : NodeIdx, v : NodeIdx ) {
		let top = u.index().max( v.index() );
		if top >= self.num_nodes {
			let new_nn = top + 1;
			self.parent.resize( new_nn, None );
			self.child_idx.resize( new_nn, NO_IDX );
			self.size.resize( new_nn, 1 );
			self.children.resize( new_nn, vec![] );
			self.non_tree_neighbors.resize( new_nn, vec![] );
			self.marked.resize( new_nn, false );

			// Every new vertex starts as its own component
			self.comp_id.resize( new_nn, 0 );
			for i in self.num_nodes..new_nn {
				self.comp_id[i] = self.comp_num + ( i - self.num_nodes );
				self.comp_rep.push( NodeIdx::new( i ) );
				self.dirty_comp.push( false );
			}
			self.comp_num += new_nn - self.num_nodes;

			self.num_nodes = new_nn;
		}
	}

	/// The root of the tree of `u`. With `allow_reroot`, re-roots at the root's last-visited
	/// child if that child dominates, restoring the centroid property on the way.
	fn find( &mut self, u : NodeIdx, allow_reroot : bool ) -> NodeIdx {
		let mut last_child = None;
		let mut u = u;
		while let Some( p ) = self.parent[u.index()] {
			last_child = Some( u );
			u = p;
		}
		if allow_reroot {
			if let Some( c ) = last_child {
				if self.size[c.index()] > self.size[u.index()] / 2 {
					self.reroot( c, true );
					return c;
				}
			}
		}
		u
	}

	fn find_no_reroot( &self, u : NodeIdx ) -> NodeIdx {
		let mut u = u;
		while let Some( p ) = self.parent[u.index()] {
			u = p;
		}
		u
	}

	/// Indicates whether `v` and `w` are connected.
	fn conn( &mut self, v : NodeIdx, w : NodeIdx ) -> bool {
		if v.index() >= self.num_nodes || w.index() >= self.num_nodes {
			return false;
		}
		if v == w {
			return true;
		}
		let v = self.find( v, true );
		let w = self.find( w, true );
		// find(w) may have re-rooted v's tree
		let v = self.find( v, true );
		v == w
	}

	fn is_tree_edge( &self, v : NodeIdx, w : NodeIdx ) -> bool {
		debug_assert!( v != w );
		self.parent[v.index()] == Some( w ) || self.parent[w.index()] == Some( v )
	}

	fn has_non_tree_edge( &self, v : NodeIdx, w : NodeIdx ) -> bool {
		self.non_tree_neighbors[v.index()].iter().any( |&(x, _)| x == w )
	}

	fn add_child( &mut self, c : NodeIdx, p : NodeIdx ) {
		self.parent[c.index()] = Some( p );
		self.child_idx[c.index()] = self.children[p.index()].len();
		self.children[p.index()].push( c );
	}

	/// Removes `c` from the children of `p`, keeping the back indices of the swapped-in
	/// sibling intact.
	fn cut_child( &mut self, c : NodeIdx, p : Option<NodeIdx> ) {
		let p = match p {
			Some( p ) => p,
			None => return
		};
		self.parent[c.index()] = None;
		let c_idx = self.child_idx[c.index()];
		let siblings = &mut self.children[p.index()];
		if siblings.len() > 1 && c_idx < siblings.len() - 1 {
			let last = *siblings.last().unwrap();
			siblings[c_idx] = last;
			self.child_idx[last.index()] = c_idx;
		}
		self.child_idx[c.index()] = NO_IDX;
		self.children[p.index()].pop();
	}

	/// Registers a non-tree edge with mutual back indices.
	fn add_nt_edge( &mut self, u : NodeIdx, v : NodeIdx ) {
		debug_assert!( !self.is_tree_edge( u, v ) );
		debug_assert!( !self.has_non_tree_edge( u, v ) && !self.has_non_tree_edge( v, u ) );
		let v_pos = self.non_tree_neighbors[v.index()].len();
		self.non_tree_neighbors[u.index()].push( (v, v_pos) );
		let u_pos = self.non_tree_neighbors[u.index()].len() - 1;
		self.non_tree_neighbors[v.index()].push( (u, u_pos) );
	}

	/// Removes a non-tree edge given one of its entries, fixing swapped-in back indices.
	fn cut_nt_edge( &mut self, e : (NodeIdx, usize) ) {
		let (mut u, mut u_idx) = e;
		let backedge = self.non_tree_neighbors[u.index()][u_idx];
		for _ in 0..2 {
			let len = self.non_tree_neighbors[u.index()].len();
			if len > 1 && u_idx < len - 1 {
				let moved = *self.non_tree_neighbors[u.index()].last().unwrap();
				self.non_tree_neighbors[u.index()][u_idx] = moved;
				self.non_tree_neighbors[moved.0.index()][moved.1].1 = u_idx;
			}
			self.non_tree_neighbors[u.index()].pop();
			( u, u_idx ) = backedge;
		}
	}

	fn delete_nt_edge( &mut self, u : NodeIdx, v : NodeIdx ) {
		let entry = self.non_tree_neighbors[u.index()].iter()
			.find( |&&(x, _)| x == v )
			.copied();
		if let Some( e ) = entry {
			self.cut_nt_edge( e );
		}
	}

	/// Makes `v` the root of its tree by flipping the parent chain and repairing sizes.
	/// With `true_root`, the component representative moves along.
	fn reroot( &mut self, v : NodeIdx, true_root : bool ) {
		let mut ch = v;
		let mut cur = self.parent[v.index()];
		self.cut_child( ch, cur );
		while let Some( c ) = cur {
			let g = self.parent[c.index()];
			self.cut_child( c, g );
			self.add_child( c, ch );
			ch = c;
			cur = g;
		}

		if true_root {
			let comp = self.comp_id[ch.index()];
			self.comp_id[v.index()] = comp;
			self.comp_rep[comp] = v;
		}

		let mut ch = ch;
		while let Some( p ) = self.parent[ch.index()] {
			self.size[ch.index()] -= self.size[p.index()];
			self.size[p.index()] += self.size[ch.index()];
			ch = p;
		}
	}

	/// Attaches the tree rooted at `w` below `v` (in the tree rooted at `rv`), then walks a
	/// centroid check up from `v`.
	fn link_trees( &mut self, v : NodeIdx, rv : NodeIdx, w : NodeIdx ) {
		self.add_child( w, v );
		let w_size = self.size[w.index()];
		let mut m = None;
		let mut i = Some( v );
		while let Some( x ) = i {
			self.size[x.index()] += w_size;
			if self.size[x.index()] > ( self.size[rv.index()] + w_size ) / 2 && m.is_none() {
				m = Some( x );
			}
			i = self.parent[x.index()];
		}
		if let Some( m ) = m {
			if m != rv {
				self.reroot( m, true );
			}
		}
	}

	/// Detaches the subtree of `v` from its parent; returns the root of the remaining tree.
	fn unlink( &mut self, v : NodeIdx ) -> NodeIdx {
		debug_assert!( self.parent[v.index()].is_some() );
		let v_size = self.size[v.index()];
		let mut ci = v;
		let mut i = self.parent[v.index()];
		while let Some( x ) = i {
			self.size[x.index()] -= v_size;
			ci = x;
			i = self.parent[x.index()];
		}
		self.cut_child( v, self.parent[v.index()] );
		ci
	}

	/// Links the components rooted at `rv` and `rw` via the new edge `{v,w}`; the smaller
	/// component is appended to the bigger one. Merges the component bookkeeping.
	fn insert_tree_edge( &mut self, v : NodeIdx, rv : NodeIdx, w : NodeIdx, rw : NodeIdx ) {
		let (v, rv, w, rw) = if self.size[rv.index()] < self.size[rw.index()] {
			( w, rw, v, rv )
		}
		else {
			( v, rv, w, rw )
		};

		let comp_w = self.comp_id[rw.index()];
		let comp_v = self.comp_id[rv.index()];

		self.reroot( w, true );
		self.link_trees( v, rv, w );

		// Recycle the highest component ID into the slot that just became free
		self.comp_rep[comp_w] = self.comp_rep[self.comp_num - 1];
		self.comp_id[self.comp_rep[comp_w].index()] = comp_w;
		self.dirty_partition = true;
		if !self.full_sweep_needed && !self.dirty_comp[comp_v] {
			self.dirty_list.push_back( comp_v );
		}
		if !self.full_sweep_needed && !self.dirty_comp[comp_w] {
			self.dirty_list.push_back( comp_w );
		}
		self.dirty_comp[comp_v] = true;
		self.dirty_comp[comp_w] = true;

		self.comp_num -= 1;
		self.comp_rep.truncate( self.comp_num );
		self.dirty_comp.truncate( self.comp_num );
	}

	/// Deletes the tree edge `{u,v}` and searches the smaller half for a replacement
	/// non-tree edge, promoting the first hit.
	fn delete_tree_edge( &mut self, u : NodeIdx, v : NodeIdx ) {
		debug_assert!( self.is_tree_edge( u, v ) );
		// Make u the child
		let (u, _v) = if self.parent[v.index()] == Some( u ) { ( v, u ) } else { ( u, v ) };

		let mut rs = self.unlink( u );
		let mut rl = u;
		let was_dirty_total = self.dirty_partition;
		let old_id = self.comp_id[rs.index()];
		let was_dirty_local = self.dirty_comp[old_id];

		if self.size[rs.index()] > self.size[rl.index()] {
			std::mem::swap( &mut rs, &mut rl );
		}

		// Tentatively declare the smaller tree its own component
		self.comp_num += 1;
		self.comp_rep.push( rs );
		self.dirty_comp.push( true );
		self.comp_id[rs.index()] = self.comp_num - 1;
		self.comp_rep[old_id] = rl;
		self.comp_id[rl.index()] = old_id;

		self.dirty_partition = true;
		self.dirty_comp[old_id] = true;

		if !self.full_sweep_needed {
			self.dirty_list.push_back( self.comp_id[rs.index()] );
		}
		if !self.full_sweep_needed && !was_dirty_local {
			self.dirty_list.push_back( old_id );
		}

		// BFS the smaller half, probing non-tree edges for a way back to the other side
		let mut queue = VecDeque::from( [rs] );
		let mut m = None;
		while let Some( a ) = queue.pop_front() {
			let replacement = self.non_tree_neighbors[a.index()].iter()
				.map( |&(b, _)| b )
				.find( |&b| self.find_no_reroot( b ) == rl );

			if let Some( b ) = replacement {
				self.delete_nt_edge( a, b );
				self.insert_tree_edge( b, rl, a, rs );

				// Reconnected: revert the tentative component split
				if !self.full_sweep_needed {
					self.dirty_list.pop_back();
				}
				if !self.full_sweep_needed && !was_dirty_local {
					self.dirty_list.pop_back();
				}
				self.dirty_partition = was_dirty_total;
				self.comp_id[rs.index()] = old_id;
				self.comp_id[a.index()] = old_id;
				self.dirty_comp[old_id] = was_dirty_local;

				return;
			}

			if self.size[a.index()] > self.size[rs.index()] / 2 {
				m = Some( a );
			}
			for i in 0..self.children[a.index()].len() {
				queue.push_back( self.children[a.index()][i] );
			}
		}

		if let Some( m ) = m {
			self.reroot( m, true );
		}
	}

	/// Adds a non-tree edge; if the endpoint depths differ by more than 2, rebalances by
	/// re-hanging the deeper side.
	fn insert_nt_edge( &mut self, u : NodeIdx, v : NodeIdx ) {
		let mut du = 0;
		let mut r = u;
		while let Some( p ) = self.parent[r.index()] {
			du += 1;
			r = p;
		}
		let mut dv = 0;
		let mut rv = v;
		while let Some( p ) = self.parent[rv.index()] {
			dv += 1;
			rv = p;
		}
		let r = rv;

		// Make u the deeper endpoint
		let (u, v, du, dv) = if du < dv { ( v, u, dv, du ) } else { ( u, v, du, dv ) };

		let delta = du - dv;
		if delta < 2 {
			self.add_nt_edge( u, v );
		}
		else {
			// Swap roles: the tree edge high above u becomes the non-tree edge
			let mut i = u;
			for _ in 0..delta - 2 {
				i = self.parent[i.index()].unwrap();
			}
			let t = self.parent[i.index()].unwrap();
			self.unlink( i );
			self.add_nt_edge( i, t );
			self.reroot( u, false );
			self.link_trees( v, r, u );
		}
	}

	fn check_dirty_list_overgrow( &mut self ) {
		if !self.full_sweep_needed && self.dirty_list.len() > self.num_nodes / 2 {
			self.full_sweep_needed = true;
			self.dirty_list.clear();
		}
	}

	/// Repairs all stale component IDs: drains the dirty list, or re-sweeps every component
	/// after an overgrow.
	fn ensure_clean_partition( &mut self ) {
		if !self.dirty_partition {
			return;
		}
		if self.full_sweep_needed {
			for id in 0..self.comp_num {
				self.clean_component( id );
			}
			for d in self.dirty_comp.iter_mut() {
				*d = false;
			}
			self.full_sweep_needed = false;
		}
		else {
			while let Some( id ) = self.dirty_list.pop_front() {
				if id < self.comp_num && self.dirty_comp[id] {
					self.clean_component( id );
					self.dirty_comp[id] = false;
				}
			}
		}
		self.dirty_partition = false;
	}

	fn clean_component( &mut self, comp : usize ) {
		for v in self.members_below( self.comp_rep[comp] ) {
			self.comp_id[v.index()] = comp;
		}
	}
}

impl DynConnectivity for DTree {
	fn query( &mut self, u : NodeIdx, v : NodeIdx ) -> bool {
		self.conn( u, v )
	}

	fn add_edge( &mut self, u : NodeIdx, v : NodeIdx ) -> Result<(), ContractViolation> {
		if u == v {
			return Err( ContractViolation::SelfLoop( u ) );
		}
		self.init( u, v );
		if self.is_tree_edge( u, v ) || self.has_non_tree_edge( u, v ) {
			return Err( ContractViolation::EdgeAlreadyExists( u, v ) );
		}
		self.check_dirty_list_overgrow();

		if self.conn( u, v ) {
			self.insert_nt_edge( u, v );
		}
		else {
			// The two finds cannot disturb each other here: different trees
			let ru = self.find( u, true );
			let rv = self.find( v, true );
			self.insert_tree_edge( u, ru, v, rv );
		}
		Ok( () )
	}

	fn delete_edge( &mut self, u : NodeIdx, v : NodeIdx ) -> Result<(), ContractViolation> {
		if u == v || u.index() >= self.num_nodes || v.index() >= self.num_nodes {
			return Err( ContractViolation::NoSuchEdge( u, v ) );
		}
		self.check_dirty_list_overgrow();

		if self.is_tree_edge( u, v ) {
			self.delete_tree_edge( u, v );
		}
		else if self.has_non_tree_edge( u, v ) {
			self.delete_nt_edge( u, v );
		}
		else {
			return Err( ContractViolation::NoSuchEdge( u, v ) );
		}
		Ok( () )
	}

	fn number_of_components( &mut self ) -> usize {
		self.comp_num
	}
}
