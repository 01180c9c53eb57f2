//! A trivial connectivity oracle over a dynamic forest: an Euler-tour forest stripped of all
//! aggregates, answering "which component is this vertex in right now".

use crate::avl::AvlTree;
use crate::euler::{EmptyTracking, EtEdgeIdx, EulerTourForest};
use crate::NodeIdx;


/// Connectivity queries on a dynamic *forest* (no cycles), with component representatives
/// and sizes. The authoritative component oracle of the [Wang](crate::wang) algorithm.
pub struct QueryForestAvl {
	n : usize,
	num_connected_components : usize,

	/// Tree edges per vertex, keyed by the other endpoint.
	tree_edges : Vec<AvlTree<NodeIdx, EtEdgeIdx>>,

	forest : EulerTourForest<EmptyTracking>
}

impl QueryForestAvl {
	/// Creates a forest of `n` isolated vertices.
	pub fn new( n : usize ) -> QueryForestAvl {
		QueryForestAvl {
			n,
			num_connected_components : n,
			tree_edges : vec![AvlTree::new(); n],
			forest : EulerTourForest::new()
		}
	}

	/// Indicates whether `u` and `v` are connected in the forest.
	pub fn query( &self, u : NodeIdx, v : NodeIdx ) -> bool {
		if u == v {
			return true;
		}
		if u.index() >= self.n || v.index() >= self.n {
			return false;
		}
		let u_entry = self.tree_edges[u.index()].any_entry();
		let v_entry = self.tree_edges[v.index()].any_entry();
		match ( u_entry, v_entry ) {
			( Some( (_, ue) ), Some( (_, ve) ) )
				=> self.forest.get_root( ue ) == self.forest.get_root( ve ),
			_ => false
		}
	}

	/// The number of vertices in the tree containing `v`.
	pub fn comp_size( &self, v : NodeIdx ) -> usize {
		if v.index() >= self.n {
			return 0;
		}
		match self.tree_edges[v.index()].any_entry() {
			None => 1,
			Some( (_, e) ) => self.forest.tour_size( e ) / 2 + 1
		}
	}

	/// A representative of the tree containing `v`: the same vertex for every member of the
	/// tree, stable until an edge of the tree changes.
	pub fn comp_representative( &self, v : NodeIdx ) -> Option<NodeIdx> {
		if v.index() >= self.n {
			return None;
		}
		match self.tree_edges[v.index()].any_entry() {
			None => Some( v ),
			Some( (_, e) ) => Some( self.forest.endpoints( self.forest.get_root( e ) ).0 )
		}
	}

	/// The number of connected components.
	pub fn number_of_components( &self ) -> usize {
		self.num_connected_components
	}

	/// Indicates whether `{u,v}` is an edge of the forest.
	pub fn is_tree_edge( &self, u : NodeIdx, v : NodeIdx ) -> bool {
		self.tree_edges[u.index()].contains( v )
	}

	/// Adds the edge `{u,v}` to the forest. The two must not be connected yet.
	pub fn add_edge( &mut self, u : NodeIdx, v : NodeIdx ) {
		debug_assert!( u.index() < self.n && v.index() < self.n );
		debug_assert!( !self.query( u, v ) );

		let u_edge = self.tree_edges[u.index()].any_entry().map( |(_, e)| e );
		let v_edge = self.tree_edges[v.index()].any_entry().map( |(_, e)| e );

		let (uv_edge, vu_edge) = self.forest.insert_et_edge( u, v, u_edge, v_edge,
			EmptyTracking {}, EmptyTracking {} );

		self.tree_edges[u.index()].insert( v, uv_edge );
		self.tree_edges[v.index()].insert( u, vu_edge );

		self.num_connected_components -= 1;
	}

	/// Removes the edge `{u,v}` from the forest. The edge must exist.
	pub fn delete_edge( &mut self, u : NodeIdx, v : NodeIdx ) {
		debug_assert!( u.index() < self.n && v.index() < self.n );

		let u_edge = self.tree_edges[u.index()].remove( v ).unwrap();
		let v_edge = self.tree_edges[v.index()].remove( u ).unwrap();
		self.forest.delete_et_edge( u_edge, v_edge );

		self.num_connected_components += 1;
	}
}
