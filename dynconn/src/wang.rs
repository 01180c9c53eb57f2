//! The randomized fully dynamic connectivity algorithm in the Kapron–King–Mountjoy line,
//! with the levelling refinements of Gibb–Kapron–King–Thorn and Wang.
//!
//! A spanning forest is maintained in a [QueryForestAvl] (the query oracle) and mirrored in a
//! [LinkCutTrees] instance whose edge costs record insertion levels. Every graph edge is
//! XORed into the levelled [CutSet] sketches. When a tree edge dies, the sketches are asked
//! for replacement candidates level by level; a candidate that would close a cycle evicts the
//! highest-level edge on that cycle instead (found by a link-cut maximum query), so the
//! forest keeps drifting towards high-level edges and stays easy to repair.
//!
//! Queries may report *false negatives* with probability at most `n^-c` for the chosen
//! precision `c`; false positives are impossible, since the forest only ever contains real
//! edges.

use crate::avl::AvlTree;
use crate::connectivity::{ContractViolation, DynConnectivity};
use crate::cutset::CutSet;
use crate::graph::Graph;
use crate::link_cut::LinkCutTrees;
use crate::query_forest::QueryForestAvl;
use crate::{Cost, Edge, NodeIdx};

/// Success probability of a single sketch row lookup.
const PRECISION : f64 = 1.0 / 8.0;


/// Level-count strategies for [Wang].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WangMode {
	/// The analytically safe level count.
	Base,
	/// Assumes sketch success probability 1/2 per boost instead of 1/8.
	PHeu,
	/// Uses a flat `4·c·log2 n` levels.
	LvlHeu
}


/// The randomized cut-set connectivity algorithm. See the [module documentation](self).
pub struct Wang {
	n : usize,
	num_levels : usize,

	/// The current adjacency of every vertex, as AVL sets.
	adjacency_trees : Vec<AvlTree<NodeIdx, ()>>,

	query_forest : QueryForestAvl,
	cut_set : CutSet,
	link_cut_trees : LinkCutTrees
}

impl Wang {
	/// Creates an instance on `n` isolated vertices. Queries err (with false negatives only)
	/// with probability at most `n^-c`; `boost` copies of each sketch amplify the per-level
	/// success probability. Reproducible from `seed`.
	pub fn new( n : usize, c : f64, seed : u64, boost : usize, mode : WangMode ) -> Wang {
		let p = match mode {
			WangMode::PHeu => 1.0 - 0.5f64.powi( boost as i32 ),
			_ => 1.0 - ( 1.0 - PRECISION ).powi( boost as i32 )
		};

		let log_n = ( n.max( 2 ) as f64 ).log2();
		let num_levels = ( match mode {
			WangMode::LvlHeu => ( 4.0 * c * log_n ).ceil(),
			_ => f64::max(
				2.0 * ( log_n / ( 4.0 / ( 4.0 - p ) ).log2() ).ceil() * ( 1.0 - p / 2.0 ) / ( 1.0 - p ),
				8.0 * c * log_n * p * ( 1.0 - p / 2.0 ) / ( 1.0 - p )
			).ceil()
		} as usize ).max( 1 );

		Wang {
			n,
			num_levels,
			adjacency_trees : vec![AvlTree::new(); n],
			query_forest : QueryForestAvl::new( n ),
			cut_set : CutSet::new( n, boost, num_levels, seed ),
			link_cut_trees : LinkCutTrees::new( n )
		}
	}

	/// Creates an instance holding the edges of `g`.
	pub fn from_graph( g : &Graph, c : f64, seed : u64, boost : usize, mode : WangMode ) -> Wang {
		let mut wang = Wang::new( g.num_nodes(), c, seed, boost, mode );
		for (u, v) in g.edges() {
			wang.add_edge( u, v ).unwrap();
		}
		wang
	}

	/// The number of sketch levels this instance maintains.
	pub fn num_levels( &self ) -> usize {
		self.num_levels
	}

	/// After the deletion of the tree edge `{u,v}`, walks all levels bottom-up and lets the
	/// sketches try to reconnect the two halves wherever the split is visible.
	fn refresh_trees( &mut self, u : NodeIdx, v : NodeIdx ) {
		let mut separate = true;

		// All levels except the last compare against the next level up
		for i in 0..self.num_levels - 1 {
			if self.cut_set.comp_size( u, i ) == self.cut_set.comp_size( u, i + 1 ) {
				self.search_and_insert( u, i );
			}
			if separate && self.cut_set.comp_size( v, i ) == self.cut_set.comp_size( v, i + 1 ) {
				self.search_and_insert( v, i );
			}
			// Once the components merge, one search per level suffices
			if separate {
				separate = self.cut_set.comp_representative( u, i + 1 )
					!= self.cut_set.comp_representative( v, i + 1 );
			}
		}

		// The last level is measured against the query forest itself
		let last = self.num_levels - 1;
		if self.cut_set.comp_size( u, last ) == self.query_forest.comp_size( u ) {
			self.search_and_insert( u, last );
		}
		if separate && self.cut_set.comp_size( v, last ) == self.query_forest.comp_size( v ) {
			self.search_and_insert( v, last );
		}
	}

	/// Asks the sketches of level `level` for an edge leaving the component of `v` and, if
	/// one comes back, makes it a tree edge on all higher levels, evicting the heaviest
	/// edge of the cycle it would close, if any.
	fn search_and_insert( &mut self, v : NodeIdx, level : usize ) {
		let candidate = self.cut_set.search( v, level, &self.adjacency_trees );
		if let Some( e ) = candidate {
			let (ev, ew) = e.nodes();

			if self.query_forest.query( ev, ew ) {
				// The candidate closes a cycle higher up; evict the edge that was inserted
				// at the highest level
				self.link_cut_trees.reroot( ev );
				let ((a, b), _) = self.link_cut_trees.get_max_edge( ew ).unwrap();
				self.cut_set.make_non_tree_edge( Edge::new( a, b ) );
				self.link_cut_trees.cut( a );
				self.query_forest.delete_edge( a, b );
			}

			// Now actually insert the candidate on all levels above
			self.cut_set.make_tree_edge( e, level + 1 );
			self.query_forest.add_edge( ev, ew );
			self.link_cut_trees.link( ev, ew, ( level + 1 ) as Cost );
		}
	}
}

impl DynConnectivity for Wang {
	fn query( &mut self, u : NodeIdx, v : NodeIdx ) -> bool {
		self.query_forest.query( u, v )
	}

	fn add_edge( &mut self, u : NodeIdx, v : NodeIdx ) -> Result<(), ContractViolation> {
		if u == v {
			return Err( ContractViolation::SelfLoop( u ) );
		}
		assert!( u.index() < self.n && v.index() < self.n, "vertex out of range" );
		if self.adjacency_trees[u.index()].contains( v ) {
			return Err( ContractViolation::EdgeAlreadyExists( u, v ) );
		}

		self.adjacency_trees[u.index()].insert( v, () );
		self.adjacency_trees[v.index()].insert( u, () );

		self.cut_set.add_edge_to_set( Edge::new( u, v ) );

		if !self.query_forest.query( u, v ) {
			self.query_forest.add_edge( u, v );
			self.link_cut_trees.link( u, v, 0 );
			self.cut_set.make_tree_edge( Edge::new( u, v ), 0 );
		}
		Ok( () )
	}

	fn delete_edge( &mut self, u : NodeIdx, v : NodeIdx ) -> Result<(), ContractViolation> {
		if u == v || u.index() >= self.n || v.index() >= self.n
			|| !self.adjacency_trees[u.index()].contains( v )
		{
			return Err( ContractViolation::NoSuchEdge( u, v ) );
		}

		self.adjacency_trees[u.index()].remove( v );
		self.adjacency_trees[v.index()].remove( u );

		self.cut_set.delete_edge( Edge::new( u, v ) );

		if self.query_forest.is_tree_edge( u, v ) {
			self.query_forest.delete_edge( u, v );
			self.link_cut_trees.cut_edge( u, v );

			self.refresh_trees( u, v );
		}
		Ok( () )
	}

	fn number_of_components( &mut self ) -> usize {
		self.query_forest.number_of_components()
	}
}
