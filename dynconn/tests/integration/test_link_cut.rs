use rand::prelude::*;
use rand::rngs::StdRng;

use dynconn::link_cut::LinkCutTrees;
use dynconn::{Cost, NodeIdx};

use crate::util::n;


#[test]
fn test_chain() {
	let mut lct = LinkCutTrees::new( 6 );
	for i in 0..5 {
		lct.link( n( i ), n( i + 1 ), ( i + 1 ) as Cost );
	}

	assert_eq!( lct.get_root( n( 0 ) ), n( 5 ) );
	assert_eq!( lct.get_parent( n( 0 ) ), Some( n( 1 ) ) );
	assert_eq!( lct.get_cost( n( 0 ) ), 1 );
	assert_eq!( lct.get_parent( n( 5 ) ), None );

	lct.cut_edge( n( 3 ), n( 4 ) );

	assert_eq!( lct.get_root( n( 0 ) ), lct.get_root( n( 3 ) ) );
	assert_ne!( lct.get_root( n( 0 ) ), lct.get_root( n( 4 ) ) );
	assert_eq!( lct.get_root( n( 4 ) ), lct.get_root( n( 5 ) ) );

	assert_eq!( lct.get_min_edge( n( 0 ) ), Some( ((n( 0 ), n( 1 )), 1) ) );
	assert_eq!( lct.get_max_edge( n( 0 ) ), Some( ((n( 2 ), n( 3 )), 3) ) );
}

#[test]
fn test_reroot_involution() {
	let mut lct = LinkCutTrees::new( 8 );
	// A small tree: 0 under 1, 1 and 2 under 3, 4 under 3
	lct.link( n( 0 ), n( 1 ), 5 );
	lct.link( n( 1 ), n( 3 ), 2 );
	lct.link( n( 2 ), n( 3 ), 7 );
	lct.link( n( 4 ), n( 3 ), 1 );

	lct.reroot( n( 0 ) );
	let parents : Vec<_> = (0..5).map( |v| lct.get_parent( n( v ) ) ).collect();
	let costs : Vec<_> = (0..5).map( |v| lct.get_cost( n( v ) ) ).collect();

	// Rerooting at the current root changes nothing observable
	lct.reroot( n( 0 ) );
	assert_eq!( parents, (0..5).map( |v| lct.get_parent( n( v ) ) ).collect::<Vec<_>>() );
	assert_eq!( costs, (0..5).map( |v| lct.get_cost( n( v ) ) ).collect::<Vec<_>>() );

	assert_eq!( lct.get_root( n( 3 ) ), n( 0 ) );
	assert_eq!( lct.get_parent( n( 0 ) ), None );
}

#[test]
fn test_update() {
	let mut lct = LinkCutTrees::new( 4 );
	lct.link( n( 0 ), n( 1 ), 10 );
	lct.link( n( 1 ), n( 2 ), 20 );
	lct.link( n( 2 ), n( 3 ), 30 );

	// Add 5 to every edge between 0 and the root
	lct.update( n( 0 ), 5 );
	assert_eq!( lct.get_cost( n( 0 ) ), 15 );
	assert_eq!( lct.get_cost( n( 1 ) ), 25 );
	assert_eq!( lct.get_cost( n( 2 ) ), 35 );

	// An update starting mid-path leaves the edges below untouched
	lct.update( n( 1 ), -5 );
	assert_eq!( lct.get_cost( n( 0 ) ), 15 );
	assert_eq!( lct.get_cost( n( 1 ) ), 20 );
	assert_eq!( lct.get_cost( n( 2 ) ), 30 );
}


/// A naive rooted forest with the same surface as the link-cut trees.
struct NaiveForest {
	parent : Vec<Option<usize>>,
	cost : Vec<Cost>
}

impl NaiveForest {
	fn new( num_vertices : usize ) -> NaiveForest {
		NaiveForest { parent : vec![None; num_vertices], cost : vec![0; num_vertices] }
	}

	fn get_root( &self, v : usize ) -> usize {
		let mut x = v;
		while let Some( p ) = self.parent[x] {
			x = p;
		}
		x
	}

	fn reroot( &mut self, v : usize ) {
		let mut prev = v;
		let mut carried_cost = self.cost[v];
		let mut cur = self.parent[v];
		self.parent[v] = None;
		while let Some( x ) = cur {
			let next = self.parent[x];
			let next_cost = self.cost[x];
			// The edge keeps its cost, only its direction flips
			self.parent[x] = Some( prev );
			self.cost[x] = carried_cost;
			carried_cost = next_cost;
			prev = x;
			cur = next;
		}
	}

	fn link( &mut self, v : usize, w : usize, x : Cost ) {
		self.reroot( v );
		self.parent[v] = Some( w );
		self.cost[v] = x;
	}

	fn cut( &mut self, v : usize ) -> Cost {
		let c = self.cost[v];
		self.parent[v] = None;
		c
	}

	fn cut_edge( &mut self, v : usize, w : usize ) -> Cost {
		let old_root = self.get_root( v );
		self.reroot( w );
		let c = self.cut( v );
		self.reroot( old_root );
		c
	}

	fn path_to_root( &self, v : usize ) -> Vec<(usize, usize, Cost)> {
		let mut edges = vec![];
		let mut x = v;
		while let Some( p ) = self.parent[x] {
			edges.push( (x, p, self.cost[x]) );
			x = p;
		}
		edges
	}

	/// Rightmost (closest to the root) extreme edge on the path from `v` to its root.
	fn extreme_edge( &self, v : usize, max : bool ) -> Option<((usize, usize), Cost)> {
		let mut best : Option<((usize, usize), Cost)> = None;
		for (a, b, c) in self.path_to_root( v ) {
			let better = match best {
				None => true,
				Some( (_, bc) ) => if max { c >= bc } else { c <= bc }
			};
			if better {
				best = Some( ((a, b), c) );
			}
		}
		best
	}

	fn update( &mut self, v : usize, x : Cost ) {
		let mut cur = v;
		while let Some( p ) = self.parent[cur] {
			self.cost[cur] += x;
			cur = p;
		}
	}
}

#[test]
fn test_random_against_naive() {
	let num_vertices = 30;
	let mut rng = StdRng::seed_from_u64( 21 );

	let mut lct = LinkCutTrees::new( num_vertices );
	let mut naive = NaiveForest::new( num_vertices );

	for _ in 0..800 {
		let v = rng.gen_range( 0..num_vertices );
		let w = rng.gen_range( 0..num_vertices );

		match rng.gen_range( 0..5 ) {
			0 | 1 => {
				// Link two random trees, if distinct
				if naive.get_root( v ) != naive.get_root( w ) {
					let x = rng.gen_range( -100..100 );
					lct.link( n( v ), n( w ), x );
					naive.link( v, w, x );
				}
			},
			2 => {
				// Cut a random non-root from its parent
				if naive.parent[v].is_some() {
					assert_eq!( lct.cut( n( v ) ), naive.cut( v ) );
				}
			},
			3 => {
				// Cut a specific edge
				if let Some( p ) = naive.parent[v] {
					if rng.gen_bool( 0.5 ) {
						assert_eq!( lct.cut_edge( n( v ), n( p ) ), naive.cut_edge( v, p ) );
					}
					else {
						assert_eq!( lct.cut_edge( n( p ), n( v ) ), naive.cut_edge( p, v ) );
					}
				}
			},
			_ => {
				lct.reroot( n( v ) );
				naive.reroot( v );
			}
		}

		if rng.gen_bool( 0.2 ) {
			let x = rng.gen_range( -50..50 );
			lct.update( n( v ), x );
			naive.update( v, x );
		}

		// Full structural comparison
		for u in 0..num_vertices {
			assert_eq!( lct.get_root( n( u ) ), n( naive.get_root( u ) ) );
			assert_eq!( lct.get_parent( n( u ) ), naive.parent[u].map( n ) );
			assert_eq!( lct.get_cost( n( u ) ), match naive.parent[u] {
				Some( _ ) => naive.cost[u],
				None => 0
			} );
		}

		// Path extrema for a few random vertices
		for _ in 0..4 {
			let u = rng.gen_range( 0..num_vertices );
			for max in [false, true] {
				let got = if max { lct.get_max_edge( n( u ) ) } else { lct.get_min_edge( n( u ) ) };
				let expected = naive.extreme_edge( u, max )
					.map( |((a, b), c)| ((n( a ), n( b )), c) );
				assert_eq!( got, expected );
			}
		}
	}
}
