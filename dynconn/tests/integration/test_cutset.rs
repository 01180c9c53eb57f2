use dynconn::avl::AvlTree;
use dynconn::cutset::CutSet;
use dynconn::{Edge, NodeIdx};

use crate::util::n;


fn adjacency( num_vertices : usize, edges : &[(usize, usize)] ) -> Vec<AvlTree<NodeIdx, ()>> {
	let mut adj = vec![AvlTree::new(); num_vertices];
	for &(u, v) in edges {
		adj[u].insert( n( v ), () );
		adj[v].insert( n( u ), () );
	}
	adj
}

fn e( u : usize, v : usize ) -> Edge {
	Edge { v : u, w : v }
}


#[test]
fn test_levelled_components() {
	// Tree promotions at increasing levels coarsen the partition level by level
	let mut cs = CutSet::new( 6, 2, 4, 7 );
	let edges = [(0, 1), (0, 2), (1, 3), (2, 3), (2, 4), (2, 5), (4, 5)];
	for &(u, v) in &edges {
		cs.add_edge_to_set( e( u, v ) );
	}

	cs.make_tree_edge( e( 0, 1 ), 1 );
	cs.make_tree_edge( e( 2, 3 ), 1 );
	cs.make_tree_edge( e( 4, 5 ), 1 );
	cs.make_tree_edge( e( 1, 3 ), 2 );
	cs.make_tree_edge( e( 2, 5 ), 3 );

	// Level 0: six singletons
	for v in 0..6 {
		assert_eq!( cs.comp_representative( n( v ), 0 ), n( v ) );
		assert_eq!( cs.comp_size( n( v ), 0 ), 1 );
	}

	// Level 1: {0,1}, {2,3}, {4,5}
	for &(a, b) in &[(0, 1), (2, 3), (4, 5)] {
		assert_eq!( cs.comp_representative( n( a ), 1 ), cs.comp_representative( n( b ), 1 ) );
		assert_eq!( cs.comp_size( n( a ), 1 ), 2 );
	}
	assert_ne!( cs.comp_representative( n( 0 ), 1 ), cs.comp_representative( n( 2 ), 1 ) );
	assert_ne!( cs.comp_representative( n( 2 ), 1 ), cs.comp_representative( n( 4 ), 1 ) );

	// Level 2: {0,1,2,3}, {4,5}
	assert_eq!( cs.comp_representative( n( 0 ), 2 ), cs.comp_representative( n( 3 ), 2 ) );
	assert_eq!( cs.comp_representative( n( 1 ), 2 ), cs.comp_representative( n( 2 ), 2 ) );
	assert_eq!( cs.comp_size( n( 0 ), 2 ), 4 );
	assert_eq!( cs.comp_size( n( 4 ), 2 ), 2 );
	assert_ne!( cs.comp_representative( n( 0 ), 2 ), cs.comp_representative( n( 4 ), 2 ) );

	// Level 3: everything connected
	for v in 1..6 {
		assert_eq!( cs.comp_representative( n( 0 ), 3 ), cs.comp_representative( n( v ), 3 ) );
	}
	assert_eq!( cs.comp_size( n( 0 ), 3 ), 6 );
}

#[test]
fn test_search_finds_unique_crossing_edge() {
	// With a single sketched edge there is no cancellation: search must return it
	let mut cs = CutSet::new( 4, 1, 2, 3 );
	let adj = adjacency( 4, &[(0, 1), (1, 2), (2, 3)] );

	// {0,1} and {2,3} are tree edges but deliberately not in the sketch set
	cs.make_tree_edge( e( 0, 1 ), 0 );
	cs.make_tree_edge( e( 2, 3 ), 0 );
	cs.add_edge_to_set( e( 1, 2 ) );

	for level in 0..2 {
		for start in 0..4 {
			assert_eq!( cs.search( n( start ), level, &adj ), Some( e( 1, 2 ) ) );
		}
	}

	// XOR is self-inverse: sketching the edge again erases it
	cs.add_edge_to_set( e( 1, 2 ) );
	for level in 0..2 {
		assert_eq!( cs.search( n( 0 ), level, &adj ), None );
	}
}

#[test]
fn test_search_from_singleton() {
	// A vertex with no tree edges answers from its own sketch
	let mut cs = CutSet::new( 4, 1, 1, 5 );
	let adj = adjacency( 4, &[(0, 1)] );

	cs.add_edge_to_set( e( 0, 1 ) );
	assert_eq!( cs.search( n( 0 ), 0, &adj ), Some( e( 0, 1 ) ) );
	assert_eq!( cs.search( n( 1 ), 0, &adj ), Some( e( 0, 1 ) ) );
	assert_eq!( cs.search( n( 2 ), 0, &adj ), None );
}

#[test]
fn test_make_non_tree_edge_round_trip() {
	let mut cs = CutSet::new( 4, 1, 3, 11 );

	cs.add_edge_to_set( e( 0, 1 ) );
	cs.make_tree_edge( e( 0, 1 ), 0 );
	cs.add_edge_to_set( e( 1, 2 ) );
	cs.make_tree_edge( e( 1, 2 ), 1 );

	assert_eq!( cs.comp_size( n( 0 ), 0 ), 2 );
	assert_eq!( cs.comp_size( n( 0 ), 1 ), 3 );
	assert_eq!( cs.comp_size( n( 0 ), 2 ), 3 );

	// Demoting {1,2} restores the partition of every level
	cs.make_non_tree_edge( e( 1, 2 ) );
	assert_eq!( cs.comp_size( n( 0 ), 1 ), 2 );
	assert_eq!( cs.comp_size( n( 2 ), 1 ), 1 );
	assert_eq!( cs.comp_representative( n( 2 ), 1 ), n( 2 ) );
	assert_eq!( cs.comp_size( n( 0 ), 0 ), 2 );

	// The sketches still know about the demoted edge
	let adj = adjacency( 4, &[(0, 1), (1, 2)] );
	assert_eq!( cs.search( n( 2 ), 0, &adj ), Some( e( 1, 2 ) ) );
}

#[test]
fn test_active_edge_migration() {
	// Deleting the tree edge that carries a vertex's sketch must re-attach the sketch to a
	// surviving neighbour edge
	let mut cs = CutSet::new( 5, 1, 1, 13 );
	let adj = adjacency( 5, &[(1, 4)] );

	// A path 0-1-2-3; vertex 1's active edge is the one towards 0
	cs.make_tree_edge( e( 0, 1 ), 0 );
	cs.make_tree_edge( e( 1, 2 ), 0 );
	cs.make_tree_edge( e( 2, 3 ), 0 );
	// A sketched edge out of vertex 1
	cs.add_edge_to_set( e( 1, 4 ) );

	assert_eq!( cs.search( n( 3 ), 0, &adj ), Some( e( 1, 4 ) ) );

	// Deleting {0,1} forces 1's sketch onto the edge towards 2
	cs.make_non_tree_edge( e( 0, 1 ) );
	assert_eq!( cs.comp_size( n( 1 ), 0 ), 3 );
	assert_eq!( cs.search( n( 3 ), 0, &adj ), Some( e( 1, 4 ) ) );
	assert_eq!( cs.search( n( 0 ), 0, &adj ), None );
}
