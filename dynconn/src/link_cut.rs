//! A dynamic tree implementation based on Sleator and Tarjan's *link-cut trees*, in the
//! worst-case O(log n) variant built on globally biased binary trees.
//!
//! Each tree of the represented rooted forest is partitioned into *solid paths* connected by
//! *dashed edges*. Every solid path is one tree of a [BiasedBinaryForest]: its leaves are the
//! path's vertices (ordered from the deep end towards the root), its internal nodes carry the
//! edge costs. Every vertex `v` additionally keeps the solid paths dashed below it in a
//! [BiasedBinaryTree] keyed by `(path weight, end vertex)`, and the weight of `v`'s leaf is
//! one plus the total weight of those dashed children. The solid/dashed partition is
//! rebalanced by `splice`/`slice`/`conceal` so that no dashed child outweighs half of its
//! parent's subtree, which bounds every operation by O(log n) in the worst case, with no
//! amortisation needed.

use crate::bbf::{BbfNodeIdx, BiasedBinaryForest};
use crate::bbt::BiasedBinaryTree;
use crate::{Cost, NodeIdx};

/// Enable or disable logging
const LOG_VERBOSE : bool = cfg!( feature = "verbose_lct" );

/// Enable or disable sanity testing
const VERIFY : bool = cfg!( feature = "verify_structures" );


/// The root handle of a solid path.
type Path = BbfNodeIdx;


/// A forest of link-cut trees with costed edges. See the [module documentation](self).
pub struct LinkCutTrees {
	n : usize,
	/// Holds all solid paths.
	forest : BiasedBinaryForest,
	/// For the last vertex of a solid path, its dashed parent; `None` for tree roots and
	/// vertices inside a path.
	parent : Vec<Option<NodeIdx>>,
	/// For the last vertex of a solid path, the cost of the dashed edge to its parent.
	p_cost : Vec<Cost>,
	/// Each vertex's leaf in its current solid path.
	path_nodes : Vec<BbfNodeIdx>,
	/// The solid paths hanging below each vertex by a dashed edge, keyed by
	/// `(path weight, end vertex)`.
	path_sets : Vec<BiasedBinaryTree<(usize, NodeIdx), Path>>
}

impl LinkCutTrees {
	/// Creates a forest of `n` isolated vertices.
	pub fn new( n : usize ) -> LinkCutTrees {
		let mut forest = BiasedBinaryForest::new();
		let path_nodes = (0..n).map( |i| forest.new_leaf( NodeIdx::new( i ), 1 ) ).collect();
		LinkCutTrees {
			n,
			forest,
			parent : vec![None; n],
			p_cost : vec![0; n],
			path_nodes,
			path_sets : (0..n).map( |_| BiasedBinaryTree::new() ).collect()
		}
	}

	/// The number of vertices.
	pub fn num_nodes( &self ) -> usize {
		self.n
	}

	/// Inserts the edge `(v,w)` with cost `x`, attaching the tree of `v` to the tree of `w`.
	/// Declares `v` the root of its tree before the join. The two trees must be distinct.
	pub fn link( &mut self, v : NodeIdx, w : NodeIdx, x : Cost ) {
		if LOG_VERBOSE { println!( "LINK({v}, {w}, {x})" ); }
		debug_assert!( self.get_root( v ) != self.get_root( w ) );

		self.reroot( v );
		let path_v = self.forest.get_root( self.path_nodes[v.index()] );
		let path_w = self.expose( w );
		let path = self.forest.global_join( path_v, path_w, x );
		self.conceal( path );

		if VERIFY { self.check_forest_validity(); }
	}

	/// Cuts the edge between `v` and its parent, returning its cost. `v` must not be a root.
	pub fn cut( &mut self, v : NodeIdx ) -> Cost {
		if LOG_VERBOSE { println!( "CUT({v})" ); }
		debug_assert!( v != self.get_root( v ), "attempting to cut a tree root" );

		self.expose( v );
		let split_res = self.forest.global_split( self.path_nodes[v.index()] );
		self.parent[v.index()] = None;

		self.conceal( split_res.right_tree.unwrap() );
		self.conceal( self.path_nodes[v.index()] );

		if VERIFY { self.check_forest_validity(); }

		split_res.r_cost
	}

	/// Cuts the specific edge `(v,w)`, returning its cost. The edge must exist.
	pub fn cut_edge( &mut self, v : NodeIdx, w : NodeIdx ) -> Cost {
		if LOG_VERBOSE { println!( "CUT_EDGE({v}, {w})" ); }
		debug_assert!( self.get_root( v ) == self.get_root( w ) );
		debug_assert!( self.get_parent( w ) == Some( v ) || self.get_parent( v ) == Some( w ) );

		let old_root = self.get_root( v );
		self.reroot( w );
		let ret = self.cut( v );
		self.reroot( old_root );

		if VERIFY { self.check_forest_validity(); }

		ret
	}

	/// Makes `v` the root of its tree (*evert* in the original paper).
	pub fn reroot( &mut self, v : NodeIdx ) {
		if LOG_VERBOSE { println!( "REROOT({v})" ); }
		let path_to_root = self.expose( v );
		self.forest.reverse( path_to_root );
		self.parent[v.index()] = None;
		self.conceal( path_to_root );

		if VERIFY { self.check_forest_validity(); }
	}

	/// The parent of `v` in the current rooted forest, or `None` if `v` is a root.
	pub fn get_parent( &mut self, v : NodeIdx ) -> Option<NodeIdx> {
		let path_v = self.forest.get_root( self.path_nodes[v.index()] );
		if v != self.forest.get_end( path_v ) {
			Some( self.forest.get_after( self.path_nodes[v.index()] ).unwrap().0 )
		}
		else {
			self.parent[v.index()]
		}
	}

	/// The root of the tree containing `v`.
	pub fn get_root( &mut self, v : NodeIdx ) -> NodeIdx {
		let path = self.expose( v );
		let ret = self.forest.get_end( path );
		self.conceal( path );

		if VERIFY { self.check_forest_validity(); }

		ret
	}

	/// The cost of the edge from `v` to its parent, or 0 if `v` is a root.
	pub fn get_cost( &mut self, v : NodeIdx ) -> Cost {
		let path = self.forest.get_root( self.path_nodes[v.index()] );
		if self.forest.get_end( path ) == v {
			if self.parent[v.index()].is_some() {
				self.p_cost[v.index()]
			}
			else {
				0
			}
		}
		else {
			self.forest.get_after( self.path_nodes[v.index()] ).unwrap().1
		}
	}

	/// The minimum cost edge on the path from `v` to its root, or `None` if `v` is the root.
	/// Of several minima the one closest to the root is returned.
	pub fn get_min_edge( &mut self, v : NodeIdx ) -> Option<((NodeIdx, NodeIdx), Cost)> {
		let path = self.expose( v );
		let ret = self.forest.get_min_edge_on_path( path );
		self.conceal( path );

		if VERIFY { self.check_forest_validity(); }

		ret
	}

	/// The maximum cost edge on the path from `v` to its root, or `None` if `v` is the root.
	/// Of several maxima the one closest to the root is returned.
	pub fn get_max_edge( &mut self, v : NodeIdx ) -> Option<((NodeIdx, NodeIdx), Cost)> {
		let path = self.expose( v );
		let ret = self.forest.get_max_edge_on_path( path );
		self.conceal( path );

		if VERIFY { self.check_forest_validity(); }

		ret
	}

	/// Adds `x` to the cost of every edge between `v` and its root.
	pub fn update( &mut self, v : NodeIdx, x : Cost ) {
		let path = self.expose( v );
		self.forest.update( path, x );
		self.conceal( path );

		if VERIFY { self.check_forest_validity(); }
	}


	/// Extends the solid path `path` by absorbing the solid path of the dashed parent of its
	/// end. The end of `path` must have a dashed parent.
	fn splice( &mut self, path : Path ) -> Path {
		debug_assert!( path == self.forest.get_root( path ) );

		let u = self.forest.get_end( path );
		let v = self.parent[u.index()].unwrap();
		if LOG_VERBOSE { println!( "SPLICE({u}) onto {v}" ); }

		let v_node = self.path_nodes[v.index()];
		let split_res = self.forest.global_split( v_node );

		// The promoted path stops being a dashed child of v
		let path_weight = self.forest.weight( path );
		let new_weight = self.forest.weight( v_node ) - path_weight;
		self.forest.set_weight( v_node, new_weight );
		self.path_sets[v.index()].remove( (path_weight, u) );

		// Whatever was below v on its solid path becomes a dashed child instead
		if let Some( lt ) = split_res.left_tree {
			let lt_end = self.forest.get_end( lt );
			let lt_weight = self.forest.weight( lt );
			self.parent[lt_end.index()] = Some( v );
			self.p_cost[lt_end.index()] = split_res.l_cost;
			let new_weight = self.forest.weight( v_node ) + lt_weight;
			self.forest.set_weight( v_node, new_weight );
			self.path_sets[v.index()].insert( (lt_weight, lt_end), lt, lt_weight );
		}

		let mut path = self.forest.global_join( path, v_node, self.p_cost[u.index()] );
		if let Some( rt ) = split_res.right_tree {
			path = self.forest.global_join( path, rt, split_res.r_cost );
		}

		path
	}

	/// Creates a solid path from `v` to the root of its tree and returns it.
	fn expose( &mut self, v : NodeIdx ) -> Path {
		if LOG_VERBOSE { println!( "EXPOSE({v})" ); }
		let v_node = self.path_nodes[v.index()];
		let split_res = self.forest.global_split( v_node );

		// The part of v's solid path below v becomes a dashed child of v
		if let Some( lt ) = split_res.left_tree {
			let lt_end = self.forest.get_end( lt );
			let lt_weight = self.forest.weight( lt );
			self.path_sets[v.index()].insert( (lt_weight, lt_end), lt, lt_weight );
			self.parent[lt_end.index()] = Some( v );
			self.p_cost[lt_end.index()] = split_res.l_cost;
			let new_weight = self.forest.weight( v_node ) + lt_weight;
			self.forest.set_weight( v_node, new_weight );
		}

		let mut path = v_node;
		if let Some( rt ) = split_res.right_tree {
			path = self.forest.global_join( path, rt, split_res.r_cost );
		}

		while self.parent[self.forest.get_end( path ).index()].is_some() {
			path = self.splice( path );
		}

		path
	}

	/// Demotes the rightmost tilted edge of `path` to dashed; returns the part of the path
	/// left of that edge. The solid path continuing upward may promote a heavier dashed child
	/// in exchange.
	fn slice( &mut self, path : Path ) -> Path {
		debug_assert!( path == self.forest.get_root( path ) );

		// v is the vertex the new dashed edge enters
		let ((_, v), _) = self.forest.get_tilted_edge_on_path( path ).unwrap();
		if LOG_VERBOSE { println!( "SLICE at {v}" ); }

		let v_node = self.path_nodes[v.index()];
		let split_res = self.forest.global_split( v_node );
		let path = split_res.left_tree.unwrap();
		let mut path_up = v_node;

		let path_weight = self.forest.weight( path );
		let new_weight = self.forest.weight( v_node ) + path_weight;
		self.forest.set_weight( v_node, new_weight );

		// Check if a dashed child of v deserves the freed solid slot
		let mut promoted = false;
		if let Some( ((hc_weight, hc_end), hc_path) ) = self.path_sets[v.index()].get_max() {
			if hc_weight * 2 > self.forest.weight( v_node ) {
				self.path_sets[v.index()].remove( (hc_weight, hc_end) );
				let new_weight = self.forest.weight( v_node ) - hc_weight;
				self.forest.set_weight( v_node, new_weight );
				if let Some( rt ) = split_res.right_tree {
					path_up = self.forest.global_join( path_up, rt, split_res.r_cost );
				}
				let hc_cost = self.p_cost[self.forest.get_end( hc_path ).index()];
				path_up = self.forest.global_join( hc_path, path_up, hc_cost );
				promoted = true;
			}
		}
		if !promoted {
			if let Some( rt ) = split_res.right_tree {
				path_up = self.forest.global_join( path_up, rt, split_res.r_cost );
			}
		}

		self.refresh_path_entry( path_up );

		self.path_sets[v.index()].insert( (path_weight, self.forest.get_end( path )), path, path_weight );
		let path_end = self.forest.get_end( path );
		self.parent[path_end.index()] = Some( v );
		self.p_cost[path_end.index()] = split_res.l_cost;

		path
	}

	/// Reestablishes the solid/dashed discipline on `path`: slices out every tilted edge,
	/// then possibly promotes a dashed child at the new start vertex.
	fn conceal( &mut self, path : Path ) {
		if LOG_VERBOSE { println!( "CONCEAL" ); }
		let mut path = path;
		while self.forest.get_tilted_edge_on_path( path ).is_some() {
			path = self.slice( path );
		}

		// The start vertex may now be light enough that a dashed child must turn solid
		let v = self.forest.get_start( path );
		if let Some( ((hc_weight, hc_end), hc_path) ) = self.path_sets[v.index()].get_max() {
			if hc_weight * 2 > self.forest.weight( self.path_nodes[v.index()] ) {
				self.path_sets[v.index()].remove( (hc_weight, hc_end) );
				let v_node = self.path_nodes[v.index()];
				let split_res = self.forest.global_split( v_node );
				let new_weight = self.forest.weight( v_node ) - hc_weight;
				self.forest.set_weight( v_node, new_weight );
				let mut path = match split_res.right_tree {
					Some( rt ) => self.forest.global_join( v_node, rt, split_res.r_cost ),
					None => v_node
				};
				let hc_cost = self.p_cost[self.forest.get_end( hc_path ).index()];
				path = self.forest.global_join( hc_path, path, hc_cost );

				self.refresh_path_entry( path );
			}
		}
	}

	/// Rewrites the stale root handle of `p` in its parent's path set.
	fn refresh_path_entry( &mut self, p : Path ) {
		let end = self.forest.get_end( p );
		if let Some( par ) = self.parent[end.index()] {
			let weight = self.forest.weight( p );
			self.path_sets[par.index()].change_val( (weight, end), p );
		}
	}

	/// Checks the solid/dashed weight discipline and path set consistency.
	/// Only called with the `verify_structures` feature.
	fn check_forest_validity( &mut self ) {
		for i in 0..self.n {
			let v = NodeIdx::new( i );
			let v_node = self.path_nodes[i];
			assert_eq!( self.forest.leaf_of( v_node ), v );
			assert_eq!( self.forest.weight( v_node ), self.path_sets[i].get_weight_sum() + 1 );

			let path = self.forest.get_root( v_node );
			if v == self.forest.get_end( path ) {
				// A finished path must have no tilted edge and be registered upstairs
				assert!( self.forest.get_tilted_edge_on_path( path ).is_none() );
				if let Some( p ) = self.parent[i] {
					let weight = self.forest.weight( path );
					assert!( self.path_sets[p.index()].contains( (weight, v) ) );
				}
			}
			if v == self.forest.get_start( path ) {
				if let Some( ((hc_weight, _), _) ) = self.path_sets[i].get_max() {
					assert!( hc_weight * 2 <= self.path_sets[i].get_weight_sum() + 1 );
				}
			}
		}
	}
}
