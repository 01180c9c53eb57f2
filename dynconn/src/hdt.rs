//! The deterministic fully dynamic connectivity algorithm of Holm, de Lichtenberg and Thorup.
//!
//! Every edge is assigned a *level*. A tree edge lives in the spanning forests of its top
//! level and of every level below; a non-tree edge lives on exactly one level. Deleting a
//! tree edge searches the levels top-down for a replacement: the smaller half of the broken
//! tree first pushes its on-level tree edges one level up (halving component sizes level by
//! level, which is the whole trick), then drains its on-level non-tree edges: each one
//! either reconnects the halves and wins, or is promoted a level. Amortized over all
//! operations this gives O(log² n) per update.
//!
//! All levels share one [Euler-tour forest](crate::euler) whose aggregates count on-level
//! tree edges and on-level non-tree edge carriers, so both searches are logarithmic descents.

use crate::avl::AvlTree;
use crate::connectivity::{ContractViolation, DynConnectivity};
use crate::euler::{EtEdgeIdx, EulerTourForest, HdtTracking};
use crate::graph::Graph;
use crate::NodeIdx;


/// The Holm–de Lichtenberg–Thorup connectivity algorithm. See the
/// [module documentation](self).
pub struct Hdt {
	n : usize,
	num_components : usize,

	/// Non-tree edges per vertex and level, keyed by the other endpoint.
	non_tree_edges_on_levels : Vec<Vec<AvlTree<NodeIdx, ()>>>,
	/// The level each non-tree edge currently lives on, stored at both endpoints.
	non_tree_edges_level_index : Vec<AvlTree<NodeIdx, usize>>,
	/// Tree edges per vertex and level, keyed by the other endpoint.
	tree_edges : Vec<Vec<AvlTree<NodeIdx, EtEdgeIdx>>>,
	/// The edge carrying each vertex's aggregate, per level.
	active_edge : Vec<Vec<Option<EtEdgeIdx>>>,

	/// One shared forest; every level's spanning trees are separate tours inside it.
	et_forest : EulerTourForest<HdtTracking>
}

impl Hdt {
	/// Creates an instance with `n` isolated vertices.
	pub fn new( n : usize ) -> Hdt {
		let mut hdt = Hdt {
			n : 0,
			num_components : 0,
			non_tree_edges_on_levels : vec![],
			non_tree_edges_level_index : vec![],
			tree_edges : vec![],
			active_edge : vec![],
			et_forest : EulerTourForest::new()
		};
		if n > 0 {
			hdt.init( NodeIdx::new( n - 1 ), NodeIdx::new( n - 1 ) );
		}
		hdt
	}

	/// Creates an instance holding the edges of `g`.
	pub fn from_graph( g : &Graph ) -> Hdt {
		let mut hdt = Hdt::new( g.num_nodes() );
		for (u, v) in g.edges() {
			hdt.add_edge( u, v ).unwrap();
		}
		hdt
	}

	fn connected( &self, u : NodeIdx, v : NodeIdx ) -> bool {
		if u.index() >= self.n || v.index() >= self.n {
			return false;
		}
		if u == v {
			return true;
		}
		match ( self.active_at( u, 0 ), self.active_at( v, 0 ) ) {
			( Some( ue ), Some( ve ) )
				=> self.et_forest.get_root( ue ) == self.et_forest.get_root( ve ),
			_ => false
		}
	}

	fn active_at( &self, v : NodeIdx, level : usize ) -> Option<EtEdgeIdx> {
		self.active_edge[v.index()].get( level ).copied().flatten()
	}

	fn has_edge( &self, u : NodeIdx, v : NodeIdx ) -> bool {
		self.non_tree_edges_level_index[u.index()].contains( v )
			|| self.tree_edges[u.index()][0].contains( v )
	}

	/// Grows the per-vertex structures when an edge names unseen vertices.
	fn init( &mut self, u : NodeIdx, v : NodeIdx ) {
		let top = u.index().max( v.index() );
		if top >= self.n {
			let new_n = top + 1;
			self.num_components += new_n - self.n;
			self.non_tree_edges_on_levels.resize( new_n, vec![AvlTree::new()] );
			self.non_tree_edges_level_index.resize( new_n, AvlTree::new() );
			self.tree_edges.resize( new_n, vec![AvlTree::new()] );
			self.active_edge.resize( new_n, vec![None] );
			self.n = new_n;
		}
	}

	fn add_tree_edge( &mut self, u : NodeIdx, v : NodeIdx, level : usize, on_level : bool ) {
		debug_assert!( u != v && u.index() < self.n && v.index() < self.n );

		for x in [u, v] {
			if self.active_edge[x.index()].len() <= level {
				self.active_edge[x.index()].resize( level + 1, None );
				self.tree_edges[x.index()].resize( level + 1, AvlTree::new() );
			}
		}

		// A fresh active edge must pick up the vertex's non-tree counter
		let u_has_nontree = self.active_edge[u.index()][level].is_none()
			&& self.non_tree_edges_on_levels[u.index()].len() > level
			&& !self.non_tree_edges_on_levels[u.index()][level].is_empty();
		let v_has_nontree = self.active_edge[v.index()][level].is_none()
			&& self.non_tree_edges_on_levels[v.index()].len() > level
			&& !self.non_tree_edges_on_levels[v.index()][level].is_empty();

		let u_edge = self.active_edge[u.index()][level];
		let v_edge = self.active_edge[v.index()][level];
		let (new_u, new_v) = self.et_forest.insert_et_edge( u, v, u_edge, v_edge,
			HdtTracking::new( on_level, u_has_nontree as usize ),
			HdtTracking::new( on_level, v_has_nontree as usize ) );

		self.tree_edges[u.index()][level].insert( v, new_u );
		if self.active_edge[u.index()][level].is_none() {
			self.active_edge[u.index()][level] = Some( new_u );
		}
		self.tree_edges[v.index()][level].insert( u, new_v );
		if self.active_edge[v.index()][level].is_none() {
			self.active_edge[v.index()][level] = Some( new_v );
		}
	}

	fn add_non_tree_edge( &mut self, u : NodeIdx, v : NodeIdx, level : usize ) {
		debug_assert!( u != v && u.index() < self.n && v.index() < self.n );

		for x in [u, v] {
			if self.non_tree_edges_on_levels[x.index()].len() <= level {
				self.non_tree_edges_on_levels[x.index()].resize( level + 1, AvlTree::new() );
			}
		}

		debug_assert!( !self.non_tree_edges_level_index[u.index()].contains( v ) );
		debug_assert!( !self.non_tree_edges_on_levels[u.index()][level].contains( v ) );

		// First on-level non-tree edge of a vertex flags its active edge
		if self.non_tree_edges_on_levels[u.index()][level].is_empty() {
			let active = self.active_at( u, level ).unwrap();
			self.et_forest.set_edge_nontree_edges( active, 1 );
		}
		if self.non_tree_edges_on_levels[v.index()][level].is_empty() {
			let active = self.active_at( v, level ).unwrap();
			self.et_forest.set_edge_nontree_edges( active, 1 );
		}

		self.non_tree_edges_level_index[u.index()].insert( v, level );
		self.non_tree_edges_level_index[v.index()].insert( u, level );
		self.non_tree_edges_on_levels[u.index()][level].insert( v, () );
		self.non_tree_edges_on_levels[v.index()][level].insert( u, () );
	}

	fn delete_non_tree_edge( &mut self, u : NodeIdx, v : NodeIdx, level : usize ) {
		debug_assert!( self.non_tree_edges_level_index[u.index()].find( v ) == Some( level ) );

		self.non_tree_edges_level_index[u.index()].remove( v );
		self.non_tree_edges_level_index[v.index()].remove( u );

		for (x, y) in [(u, v), (v, u)] {
			self.non_tree_edges_on_levels[x.index()][level].remove( y );
			if self.non_tree_edges_on_levels[x.index()][level].is_empty() {
				if let Some( active ) = self.active_at( x, level ) {
					self.et_forest.set_edge_nontree_edges( active, 0 );
				}
			}
		}
	}

	fn refresh_active_edge( &mut self, v : NodeIdx, level : usize ) {
		match self.tree_edges[v.index()][level].any_entry() {
			Some( (_, edge) ) => {
				self.active_edge[v.index()][level] = Some( edge );
				if self.non_tree_edges_on_levels[v.index()].len() > level
					&& !self.non_tree_edges_on_levels[v.index()][level].is_empty()
				{
					self.et_forest.set_edge_nontree_edges( edge, 1 );
				}
			},
			None => self.active_edge[v.index()][level] = None
		}
	}

	fn delete_tree_edge( &mut self, u : NodeIdx, v : NodeIdx ) {
		// Remove the edge from the contiguous run of levels it lives on
		let mut top = 0;
		while top < self.tree_edges[u.index()].len()
			&& self.tree_edges[u.index()][top].contains( v )
		{
			let u_edge = self.tree_edges[u.index()][top].remove( v ).unwrap();
			let v_edge = self.tree_edges[v.index()][top].remove( u ).unwrap();

			self.et_forest.delete_et_edge( u_edge, v_edge );

			if self.active_edge[u.index()][top] == Some( u_edge ) {
				self.refresh_active_edge( u, top );
			}
			if self.active_edge[v.index()][top] == Some( v_edge ) {
				self.refresh_active_edge( v, top );
			}
			top += 1;
		}

		let mut replacement : Option<(NodeIdx, NodeIdx)> = None;
		let mut found_level = 0;

		// Search the levels top-down for a replacement edge
		for i in (0..top).rev() {
			let u_tree = self.active_at( u, i ).map( |e| self.et_forest.get_root( e ) );
			let v_tree = self.active_at( v, i ).map( |e| self.et_forest.get_root( e ) );

			// Special case of size-1 trees
			let (u_root, v_root) = match ( u_tree, v_tree ) {
				( Some( ut ), Some( vt ) ) => ( ut, vt ),
				_ => {
					let small = if u_tree.is_none() { u } else { v };
					if self.non_tree_edges_on_levels[small.index()].len() > i
						&& !self.non_tree_edges_on_levels[small.index()][i].is_empty()
					{
						// Any edge leaving a single vertex is a replacement
						let (rep, _) = self.non_tree_edges_on_levels[small.index()][i]
							.any_entry().unwrap();
						self.delete_non_tree_edge( small, rep, i );
						replacement = Some( (small, rep) );
						found_level = i;
						break;
					}
					continue;
				}
			};
			let small_tree = if self.et_forest.tour_size( u_root ) < self.et_forest.tour_size( v_root ) {
				u_root
			}
			else {
				v_root
			};

			// Step 1: promote every on-level tree edge of the smaller half
			while let Some( (a, b) ) = self.et_forest.on_level_tree_edge( small_tree ) {
				let ab = self.tree_edges[a.index()][i].find( b ).unwrap();
				let ba = self.tree_edges[b.index()][i].find( a ).unwrap();
				self.et_forest.set_edge_on_level( ab, false );
				self.et_forest.set_edge_on_level( ba, false );

				self.add_tree_edge( a, b, i + 1, true );
			}

			// Step 2: drain on-level non-tree edges until one crosses to the other half
			'outer : while let Some( carrier ) = self.et_forest.node_with_on_level_nontree_edge( small_tree ) {
				while !self.non_tree_edges_on_levels[carrier.index()][i].is_empty() {
					let (rep, _) = self.non_tree_edges_on_levels[carrier.index()][i]
						.any_entry().unwrap();
					self.delete_non_tree_edge( carrier, rep, i );

					let rep_active = self.active_at( rep, i ).unwrap();
					if self.et_forest.get_root( rep_active ) != small_tree {
						replacement = Some( (carrier, rep) );
						found_level = i;
						break 'outer;
					}
					self.add_non_tree_edge( carrier, rep, i + 1 );
				}
			}

			if replacement.is_some() {
				break;
			}
		}

		if let Some( (a, b) ) = replacement {
			// Reinsert the replacement as a tree edge on every level up to where it was
			// found, on-level only at the top
			for j in 0..=found_level {
				self.add_tree_edge( a, b, j, j == found_level );
			}
			self.num_components -= 1;
		}
	}
}

impl DynConnectivity for Hdt {
	fn query( &mut self, u : NodeIdx, v : NodeIdx ) -> bool {
		self.connected( u, v )
	}

	fn add_edge( &mut self, u : NodeIdx, v : NodeIdx ) -> Result<(), ContractViolation> {
		if u == v {
			return Err( ContractViolation::SelfLoop( u ) );
		}
		self.init( u, v );
		if self.has_edge( u, v ) {
			return Err( ContractViolation::EdgeAlreadyExists( u, v ) );
		}

		if self.connected( u, v ) {
			self.add_non_tree_edge( u, v, 0 );
		}
		else {
			self.add_tree_edge( u, v, 0, true );
			self.num_components -= 1;
		}
		Ok( () )
	}

	fn delete_edge( &mut self, u : NodeIdx, v : NodeIdx ) -> Result<(), ContractViolation> {
		if u == v || u.index() >= self.n || v.index() >= self.n {
			return Err( ContractViolation::NoSuchEdge( u, v ) );
		}

		if let Some( level ) = self.non_tree_edges_level_index[u.index()].find( v ) {
			self.delete_non_tree_edge( u, v, level );
		}
		else if self.tree_edges[u.index()][0].contains( v ) {
			self.delete_tree_edge( u, v );
			self.num_components += 1;
		}
		else {
			return Err( ContractViolation::NoSuchEdge( u, v ) );
		}
		Ok( () )
	}

	fn number_of_components( &mut self ) -> usize {
		self.num_components
	}
}
