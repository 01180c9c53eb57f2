use std::collections::HashMap;

use itertools::Itertools;
use rand::prelude::*;
use rand::rngs::StdRng;

use dynconn::euler::{EmptyTracking, EtEdgeIdx, EulerTourForest, HdtTracking};

use crate::util::{n, GraphOracle};


/// Bookkeeping around a raw Euler-tour forest: per-vertex incident tree edges and the
/// handle pair of every edge.
struct Harness {
	forest : EulerTourForest<EmptyTracking>,
	handles : HashMap<(usize, usize), (EtEdgeIdx, EtEdgeIdx)>,
	incident : Vec<Vec<usize>>
}

impl Harness {
	fn new( num_vertices : usize ) -> Harness {
		Harness {
			forest : EulerTourForest::new(),
			handles : HashMap::new(),
			incident : vec![vec![]; num_vertices]
		}
	}

	fn any_edge( &self, v : usize ) -> Option<EtEdgeIdx> {
		self.incident[v].first().map( |&w| {
			let key = ( v.min( w ), v.max( w ) );
			let (vw, wv) = self.handles[&key];
			if v < w { vw } else { wv }
		} )
	}

	fn insert( &mut self, v : usize, w : usize ) {
		let (v_edge, w_edge) = ( self.any_edge( v ), self.any_edge( w ) );
		let (vw, wv) = self.forest.insert_et_edge( n( v ), n( w ), v_edge, w_edge,
			EmptyTracking {}, EmptyTracking {} );
		let key = ( v.min( w ), v.max( w ) );
		self.handles.insert( key, if v < w { (vw, wv) } else { (wv, vw) } );
		self.incident[v].push( w );
		self.incident[w].push( v );
	}

	fn delete( &mut self, v : usize, w : usize ) {
		let key = ( v.min( w ), v.max( w ) );
		let (vw, wv) = self.handles.remove( &key ).unwrap();
		let e = if v < w { vw } else { wv };
		let back = if v < w { wv } else { vw };
		self.forest.delete_et_edge( e, back );
		self.incident[v].retain( |&x| x != w );
		self.incident[w].retain( |&x| x != v );
	}

	fn connected( &self, v : usize, w : usize ) -> bool {
		match ( self.any_edge( v ), self.any_edge( w ) ) {
			( Some( ve ), Some( we ) )
				=> self.forest.get_root( ve ) == self.forest.get_root( we ),
			_ => v == w
		}
	}

	/// Checks that the tour of `v`'s tree is a valid circular Euler tour containing every
	/// incident tree edge exactly twice.
	fn check_tour( &self, v : usize ) {
		let e = match self.any_edge( v ) {
			Some( e ) => e,
			None => return
		};
		let tour = self.forest.tour( e );

		// Consecutive edges chain, wrapping around
		for (&(_, a), &(b, _)) in tour.iter().circular_tuple_windows::<(_, _)>() {
			assert_eq!( a, b );
		}

		// Every tree edge appears exactly once per direction
		let mut seen = HashMap::new();
		for &(a, b) in &tour {
			*seen.entry( (a, b) ).or_insert( 0 ) += 1;
		}
		for (&(a, b), &count) in &seen {
			assert_eq!( count, 1 );
			assert_eq!( seen[&(b, a)], 1 );
			let key = ( a.index().min( b.index() ), a.index().max( b.index() ) );
			assert!( self.handles.contains_key( &key ) );
		}

		assert_eq!( self.forest.tour_size( e ), tour.len() );
	}
}

#[test]
fn test_random_forest() {
	let num_vertices = 40;
	let mut rng = StdRng::seed_from_u64( 4 );

	let mut h = Harness::new( num_vertices );
	let mut oracle = GraphOracle::new( num_vertices );
	let mut edges : Vec<(usize, usize)> = vec![];

	for _ in 0..600 {
		let u = rng.gen_range( 0..num_vertices );
		let v = rng.gen_range( 0..num_vertices );
		if u == v {
			continue;
		}

		if !oracle.connected( u, v ) {
			h.insert( u, v );
			oracle.add_edge( u, v );
			edges.push( (u, v) );
		}
		else if oracle.has_edge( u, v ) {
			h.delete( u, v );
			oracle.remove_edge( u, v );
			edges.retain( |&e| e != (u, v) && e != (v, u) );
		}
		else if !edges.is_empty() {
			// Keep it a forest: delete a random edge instead
			let (a, b) = edges.swap_remove( rng.gen_range( 0..edges.len() ) );
			h.delete( a, b );
			oracle.remove_edge( a, b );
		}

		// Spot-check connectivity and tour validity
		for _ in 0..10 {
			let a = rng.gen_range( 0..num_vertices );
			let b = rng.gen_range( 0..num_vertices );
			assert_eq!( h.connected( a, b ), oracle.connected( a, b ) );
		}
		h.check_tour( rng.gen_range( 0..num_vertices ) );
	}
}

#[test]
fn test_hdt_tracking() {
	let mut f : EulerTourForest<HdtTracking> = EulerTourForest::new();

	// A path 0-1-2 with the first edge on-level
	let (e01, e10) = f.insert_et_edge( n( 0 ), n( 1 ), None, None,
		HdtTracking::new( true, 0 ), HdtTracking::new( true, 0 ) );
	let (e12, _) = f.insert_et_edge( n( 1 ), n( 2 ), Some( e10 ), None,
		HdtTracking::new( false, 0 ), HdtTracking::new( false, 0 ) );

	let found = f.on_level_tree_edge( e12 ).unwrap();
	assert!( found == ( n( 0 ), n( 1 ) ) || found == ( n( 1 ), n( 0 ) ) );

	// Clearing both directions leaves nothing to find
	f.set_edge_on_level( e01, false );
	f.set_edge_on_level( e10, false );
	assert_eq!( f.on_level_tree_edge( e12 ), None );

	// Non-tree edge counters mark carrying vertices
	assert_eq!( f.node_with_on_level_nontree_edge( e01 ), None );
	f.set_edge_nontree_edges( e12, 1 );
	assert_eq!( f.node_with_on_level_nontree_edge( e01 ), Some( n( 1 ) ) );
	f.set_edge_nontree_edges( e12, 0 );
	assert_eq!( f.node_with_on_level_nontree_edge( e01 ), None );
}
