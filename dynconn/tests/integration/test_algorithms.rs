use rand::prelude::*;
use rand::rngs::StdRng;

use dynconn::connectivity::{ContractViolation, DynConnectivity};
use dynconn::dtree::DTree;
use dynconn::hdt::Hdt;
use dynconn::wang::{Wang, WangMode};

use crate::util::{n, GraphOracle};


fn two_triangles_scenario( c : &mut dyn DynConnectivity ) {
	for (u, v) in [(0, 1), (1, 2), (0, 2), (2, 3), (4, 5)] {
		c.add_edge( n( u ), n( v ) ).unwrap();
	}
	assert!( c.query( n( 0 ), n( 3 ) ) );
	assert!( !c.query( n( 0 ), n( 4 ) ) );
	assert_eq!( c.number_of_components(), 2 );
}

#[test]
fn test_two_triangles() {
	two_triangles_scenario( &mut DTree::new( 6 ) );
	two_triangles_scenario( &mut Hdt::new( 6 ) );
	// Insertions never fail, so even the randomized algorithm is exact here
	two_triangles_scenario( &mut Wang::new( 6, 1.0, 42, 2, WangMode::Base ) );
	two_triangles_scenario( &mut Wang::new( 6, 1.0, 42, 2, WangMode::PHeu ) );
	two_triangles_scenario( &mut Wang::new( 6, 1.0, 42, 2, WangMode::LvlHeu ) );
}

fn deletion_scenario( c : &mut dyn DynConnectivity ) {
	for (u, v) in [(0, 1), (0, 2), (1, 2), (2, 3), (4, 5), (3, 5)] {
		c.add_edge( n( u ), n( v ) ).unwrap();
	}
	c.delete_edge( n( 0 ), n( 2 ) ).unwrap();
	c.delete_edge( n( 0 ), n( 1 ) ).unwrap();

	assert!( !c.query( n( 0 ), n( 2 ) ) );
	assert!( !c.query( n( 0 ), n( 4 ) ) );
	assert!( c.query( n( 3 ), n( 5 ) ) );
	assert_eq!( c.number_of_components(), 2 );
}

#[test]
fn test_deletion_scenario() {
	deletion_scenario( &mut Hdt::new( 6 ) );
	deletion_scenario( &mut DTree::new( 6 ) );
}

fn boundary_checks( c : &mut dyn DynConnectivity ) {
	assert!( c.query( n( 2 ), n( 2 ) ) );
	assert!( !c.query( n( 0 ), n( 100 ) ) );
	assert!( !c.query( n( 100 ), n( 101 ) ) );

	assert_eq!( c.add_edge( n( 1 ), n( 1 ) ), Err( ContractViolation::SelfLoop( n( 1 ) ) ) );
	c.add_edge( n( 0 ), n( 1 ) ).unwrap();
	assert_eq!( c.add_edge( n( 0 ), n( 1 ) ),
		Err( ContractViolation::EdgeAlreadyExists( n( 0 ), n( 1 ) ) ) );
	assert_eq!( c.delete_edge( n( 1 ), n( 2 ) ),
		Err( ContractViolation::NoSuchEdge( n( 1 ), n( 2 ) ) ) );
	c.delete_edge( n( 0 ), n( 1 ) ).unwrap();
	assert_eq!( c.delete_edge( n( 0 ), n( 1 ) ),
		Err( ContractViolation::NoSuchEdge( n( 0 ), n( 1 ) ) ) );
}

#[test]
fn test_boundaries() {
	boundary_checks( &mut DTree::new( 6 ) );
	boundary_checks( &mut Hdt::new( 6 ) );
	boundary_checks( &mut Wang::new( 6, 1.0, 1, 1, WangMode::LvlHeu ) );
}

/// `add(e); del(e)` must leave connectivity untouched for the deterministic algorithms.
fn add_delete_round_trip( c : &mut dyn DynConnectivity, num_vertices : usize, seed : u64 ) {
	let mut rng = StdRng::seed_from_u64( seed );
	let mut oracle = GraphOracle::new( num_vertices );

	// A random base graph
	for _ in 0..3 * num_vertices {
		let u = rng.gen_range( 0..num_vertices );
		let v = rng.gen_range( 0..num_vertices );
		if u != v && !oracle.has_edge( u, v ) {
			c.add_edge( n( u ), n( v ) ).unwrap();
			oracle.add_edge( u, v );
		}
	}

	for _ in 0..20 {
		let u = rng.gen_range( 0..num_vertices );
		let v = rng.gen_range( 0..num_vertices );
		if u == v || oracle.has_edge( u, v ) {
			continue;
		}

		let before : Vec<bool> = (0..num_vertices)
			.map( |x| c.query( n( u ), n( x ) ) )
			.collect();
		let components = c.number_of_components();

		c.add_edge( n( u ), n( v ) ).unwrap();
		c.delete_edge( n( u ), n( v ) ).unwrap();

		let after : Vec<bool> = (0..num_vertices)
			.map( |x| c.query( n( u ), n( x ) ) )
			.collect();
		assert_eq!( before, after );
		assert_eq!( c.number_of_components(), components );
	}
}

#[test]
fn test_add_delete_round_trip() {
	add_delete_round_trip( &mut DTree::new( 25 ), 25, 17 );
	add_delete_round_trip( &mut Hdt::new( 25 ), 25, 17 );
}

/// Drives a random mixed workload through two structures in lockstep and compares exactly.
fn cross_check_exact( c : &mut dyn DynConnectivity, num_vertices : usize, steps : usize, seed : u64 ) {
	let mut rng = StdRng::seed_from_u64( seed );
	let mut oracle = GraphOracle::new( num_vertices );
	let mut dtree = DTree::new( num_vertices );
	let mut edges : Vec<(usize, usize)> = vec![];

	for _ in 0..steps {
		let u = rng.gen_range( 0..num_vertices );
		let v = rng.gen_range( 0..num_vertices );
		if u == v {
			continue;
		}

		if !oracle.has_edge( u, v ) && rng.gen_bool( 0.6 ) {
			c.add_edge( n( u ), n( v ) ).unwrap();
			dtree.add_edge( n( u ), n( v ) ).unwrap();
			oracle.add_edge( u, v );
			edges.push( (u, v) );
		}
		else if !edges.is_empty() {
			let (a, b) = edges.swap_remove( rng.gen_range( 0..edges.len() ) );
			c.delete_edge( n( a ), n( b ) ).unwrap();
			dtree.delete_edge( n( a ), n( b ) ).unwrap();
			oracle.remove_edge( a, b );
		}

		assert_eq!( c.number_of_components(), oracle.num_components() );
		assert_eq!( dtree.number_of_components(), oracle.num_components() );

		for _ in 0..8 {
			let a = rng.gen_range( 0..num_vertices );
			let b = rng.gen_range( 0..num_vertices );
			let expected = oracle.connected( a, b );
			assert_eq!( c.query( n( a ), n( b ) ), expected );
			assert_eq!( dtree.query( n( a ), n( b ) ), expected );
		}
	}
}

#[test]
fn test_hdt_cross_check() {
	cross_check_exact( &mut Hdt::new( 60 ), 60, 1_500, 23 );
	cross_check_exact( &mut Hdt::new( 97 ), 97, 1_500, 24 );
}

#[test]
fn test_dtree_cross_check() {
	// DTree against petgraph alone, on a denser instance
	cross_check_exact( &mut DTree::new( 40 ), 40, 2_000, 25 );
}

#[test]
fn test_wang_guarantees() {
	// The randomized algorithm may under-connect after deletions, never over-connect
	let num_vertices = 40;
	let mut rng = StdRng::seed_from_u64( 31 );
	let mut wang = Wang::new( num_vertices, 1.0, 77, 2, WangMode::Base );
	let mut oracle = GraphOracle::new( num_vertices );
	let mut edges : Vec<(usize, usize)> = vec![];

	for _ in 0..800 {
		let u = rng.gen_range( 0..num_vertices );
		let v = rng.gen_range( 0..num_vertices );
		if u == v {
			continue;
		}

		if !oracle.has_edge( u, v ) && rng.gen_bool( 0.55 ) {
			wang.add_edge( n( u ), n( v ) ).unwrap();
			oracle.add_edge( u, v );
			edges.push( (u, v) );
		}
		else if !edges.is_empty() {
			let (a, b) = edges.swap_remove( rng.gen_range( 0..edges.len() ) );
			wang.delete_edge( n( a ), n( b ) ).unwrap();
			oracle.remove_edge( a, b );
		}

		// No false positives, and components are never under-counted
		assert!( wang.number_of_components() >= oracle.num_components() );
		for _ in 0..6 {
			let a = rng.gen_range( 0..num_vertices );
			let b = rng.gen_range( 0..num_vertices );
			if wang.query( n( a ), n( b ) ) {
				assert!( oracle.connected( a, b ) );
			}
		}
	}
}

#[test]
fn test_wang_incremental_exact() {
	// Without deletions the spanning forest never loses an edge, so queries are exact
	let num_vertices = 50;
	let mut rng = StdRng::seed_from_u64( 53 );
	let mut wang = Wang::new( num_vertices, 1.0, 5, 1, WangMode::PHeu );
	let mut oracle = GraphOracle::new( num_vertices );

	for _ in 0..300 {
		let u = rng.gen_range( 0..num_vertices );
		let v = rng.gen_range( 0..num_vertices );
		if u == v || oracle.has_edge( u, v ) {
			continue;
		}
		wang.add_edge( n( u ), n( v ) ).unwrap();
		oracle.add_edge( u, v );

		assert_eq!( wang.number_of_components(), oracle.num_components() );
		for _ in 0..5 {
			let a = rng.gen_range( 0..num_vertices );
			let b = rng.gen_range( 0..num_vertices );
			assert_eq!( wang.query( n( a ), n( b ) ), oracle.connected( a, b ) );
		}
	}
}

#[test]
fn test_dtree_components() {
	let mut t = DTree::new( 7 );
	for (u, v) in [(0, 1), (1, 2), (3, 4), (5, 6)] {
		t.add_edge( n( u ), n( v ) ).unwrap();
	}
	assert_eq!( t.number_of_components(), 3 );

	// Component IDs are contiguous and consistent
	let id0 = t.component_of( n( 0 ) );
	assert_eq!( t.component_of( n( 2 ) ), id0 );
	assert!( id0 < 3 );
	assert_ne!( t.component_of( n( 3 ) ), t.component_of( n( 5 ) ) );

	let mut sizes = t.component_sizes();
	sizes.sort();
	assert_eq!( sizes, vec![2, 2, 3] );

	let mut members = t.component_members( n( 1 ) );
	members.sort();
	assert_eq!( members, vec![n( 0 ), n( 1 ), n( 2 )] );

	assert_eq!( t.components().len(), 3 );

	// A path along the spanning tree
	let path = t.get_path( n( 0 ), n( 2 ) );
	assert_eq!( path.first(), Some( &n( 0 ) ) );
	assert_eq!( path.last(), Some( &n( 2 ) ) );
	assert_eq!( path.len(), 3 );
}

#[test]
fn test_from_graph() {
	let mut g = dynconn::graph::Graph::new( 6 );
	for (u, v) in [(0, 1), (1, 2), (0, 2), (2, 3), (4, 5)] {
		g.add_edge( n( u ), n( v ) ).unwrap();
	}
	assert_eq!( g.num_edges(), 5 );

	let mut t = DTree::from_graph( &g );
	let mut h = Hdt::from_graph( &g );
	let mut w = Wang::from_graph( &g, 1.0, 9, 1, WangMode::LvlHeu );
	for c in [&mut t as &mut dyn DynConnectivity, &mut h, &mut w] {
		assert!( c.query( n( 0 ), n( 3 ) ) );
		assert!( !c.query( n( 0 ), n( 4 ) ) );
		assert_eq!( c.number_of_components(), 2 );
	}
}

#[test]
fn test_dtree_growth() {
	// DTree and HDT grow with the highest vertex an edge mentions
	let mut t = DTree::new( 2 );
	t.add_edge( n( 0 ), n( 9 ) ).unwrap();
	assert!( t.query( n( 0 ), n( 9 ) ) );
	assert_eq!( t.number_of_components(), 9 );

	let mut h = Hdt::new( 2 );
	h.add_edge( n( 0 ), n( 9 ) ).unwrap();
	assert!( h.query( n( 0 ), n( 9 ) ) );
	assert_eq!( h.number_of_components(), 9 );
}
