use rand::prelude::*;
use rand::rngs::StdRng;

use dynconn::bbf::{BbfNodeIdx, BiasedBinaryForest};
use dynconn::Cost;

use crate::util::n;


#[test]
fn test_four_leaf_path() {
	let mut f = BiasedBinaryForest::new();
	let leaves : Vec<BbfNodeIdx> = [(0, 1), (1, 8), (2, 64), (3, 2)].iter()
		.map( |&(v, w)| f.new_leaf( n( v ), w ) )
		.collect();

	let mut t = f.global_join( leaves[0], leaves[1], 11 );
	t = f.global_join( t, leaves[2], 33 );
	t = f.global_join( t, leaves[3], 22 );

	assert_eq!( f.weight( t ), 75 );
	assert_eq!( f.get_start( t ), n( 0 ) );
	assert_eq!( f.get_end( t ), n( 3 ) );

	let mut path = vec![];
	f.write_path( t, &mut path );
	assert_eq!( path, vec![n( 0 ), n( 1 ), n( 2 ), n( 3 )] );

	assert_eq!( f.get_min_edge_on_path( t ), Some( ((n( 0 ), n( 1 )), 11) ) );
	assert_eq!( f.get_max_edge_on_path( t ), Some( ((n( 1 ), n( 2 )), 33) ) );

	assert_eq!( f.get_before( leaves[2] ), Some( (n( 1 ), 33) ) );
	assert_eq!( f.get_after( leaves[2] ), Some( (n( 3 ), 22) ) );
	assert_eq!( f.get_before( leaves[0] ), None );
	assert_eq!( f.get_after( leaves[3] ), None );

	// Reversal flips the whole sequence
	f.reverse( t );
	let mut path = vec![];
	f.write_path( t, &mut path );
	assert_eq!( path, vec![n( 3 ), n( 2 ), n( 1 ), n( 0 )] );
	assert_eq!( f.get_start( t ), n( 3 ) );
	assert_eq!( f.get_after( leaves[2] ), Some( (n( 1 ), 33) ) );

	// Reversing again restores the original order
	f.reverse( t );
	let mut path = vec![];
	f.write_path( t, &mut path );
	assert_eq!( path, vec![n( 0 ), n( 1 ), n( 2 ), n( 3 )] );
}

#[test]
fn test_split() {
	let mut f = BiasedBinaryForest::new();
	let leaves : Vec<BbfNodeIdx> = (0..6).map( |v| f.new_leaf( n( v ), 1 + v % 3 ) ).collect();

	let mut t = leaves[0];
	for i in 1..6 {
		t = f.global_join( t, leaves[i], 10 * i as Cost );
	}

	let res = f.global_split( leaves[3] );
	assert_eq!( res.l_cost, 30 );
	assert_eq!( res.r_cost, 40 );

	let mut left = vec![];
	f.write_path( res.left_tree.unwrap(), &mut left );
	assert_eq!( left, vec![n( 0 ), n( 1 ), n( 2 )] );

	let mut right = vec![];
	f.write_path( res.right_tree.unwrap(), &mut right );
	assert_eq!( right, vec![n( 4 ), n( 5 )] );

	// The split leaf is solitary now
	assert_eq!( f.get_root( leaves[3] ), leaves[3] );
	assert_eq!( f.weight( res.left_tree.unwrap() ), 1 + 2 + 3 );

	// Splitting at the first leaf of a path leaves no left part
	let res = f.global_split( leaves[0] );
	assert!( res.left_tree.is_none() );
	assert_eq!( res.r_cost, 10 );
}

#[test]
fn test_update() {
	let mut f = BiasedBinaryForest::new();
	let leaves : Vec<BbfNodeIdx> = (0..4).map( |v| f.new_leaf( n( v ), 1 ) ).collect();
	let mut t = leaves[0];
	for i in 1..4 {
		t = f.global_join( t, leaves[i], i as Cost );
	}

	f.update( t, 100 );
	assert_eq!( f.get_min_edge_on_path( t ), Some( ((n( 0 ), n( 1 )), 101) ) );
	assert_eq!( f.get_max_edge_on_path( t ), Some( ((n( 2 ), n( 3 )), 103) ) );
	assert_eq!( f.get_after( leaves[1] ), Some( (n( 2 ), 102) ) );
}

/// A model of the forest as plain vectors, keyed by path.
struct PathModel {
	/// For every path: the leaf names in order and the edge costs between them.
	paths : Vec<(Vec<usize>, Vec<Cost>)>,
	/// Which path each leaf name currently belongs to, and leaf weights.
	which : Vec<usize>,
	weights : Vec<usize>
}

impl PathModel {
	/// The expected result of `get_min_edge_on_path`/`get_max_edge_on_path`: the rightmost
	/// extreme edge.
	fn extreme_edge( &self, path : usize, max : bool ) -> Option<((usize, usize), Cost)> {
		let (nodes, costs) = &self.paths[path];
		let mut best : Option<(usize, Cost)> = None;
		for ( i, &c ) in costs.iter().enumerate() {
			let better = match best {
				None => true,
				Some( (_, bc) ) => if max { c >= bc } else { c <= bc }
			};
			if better {
				best = Some( (i, c) );
			}
		}
		best.map( |(i, c)| ((nodes[i], nodes[i + 1]), c) )
	}
}

#[test]
fn test_random_join_split() {
	let num_leaves = 60;
	let mut rng = StdRng::seed_from_u64( 12 );

	let mut f = BiasedBinaryForest::new();
	let mut model = PathModel { paths : vec![], which : vec![], weights : vec![] };
	let mut handles : Vec<BbfNodeIdx> = vec![];
	let mut roots : Vec<BbfNodeIdx> = vec![];

	for v in 0..num_leaves {
		let w = rng.gen_range( 1..50 );
		handles.push( f.new_leaf( n( v ), w ) );
		roots.push( handles[v] );
		model.paths.push( (vec![v], vec![]) );
		model.which.push( v );
		model.weights.push( w );
	}

	for step in 0..400 {
		let live : Vec<usize> = (0..model.paths.len())
			.filter( |&i| !model.paths[i].0.is_empty() )
			.collect();

		if step % 2 == 0 && live.len() >= 2 {
			// Join two random paths
			let a = live[rng.gen_range( 0..live.len() )];
			let b = loop {
				let b = live[rng.gen_range( 0..live.len() )];
				if b != a {
					break b;
				}
			};
			let cost = rng.gen_range( -1000..1000 );
			let joined = f.global_join( roots[a], roots[b], cost );

			let (b_nodes, b_costs) = std::mem::take( &mut model.paths[b] );
			for &x in &b_nodes {
				model.which[x] = a;
			}
			model.paths[a].1.push( cost );
			model.paths[a].1.extend( b_costs );
			model.paths[a].0.extend( b_nodes );
			roots[a] = joined;
		}
		else {
			// Split at a random leaf
			let x = rng.gen_range( 0..num_leaves );
			let p = model.which[x];
			let res = f.global_split( handles[x] );

			let (nodes, costs) = std::mem::take( &mut model.paths[p] );
			let pos = nodes.iter().position( |&y| y == x ).unwrap();

			if pos > 0 {
				assert_eq!( res.l_cost, costs[pos - 1] );
				let lt = res.left_tree.unwrap();
				let slot = model.paths.len();
				model.paths.push( (nodes[..pos].to_vec(), costs[..pos - 1].to_vec()) );
				for &y in &nodes[..pos] {
					model.which[y] = slot;
				}
				roots.push( lt );
				assert_eq!( roots.len(), model.paths.len() );
			}
			else {
				assert!( res.left_tree.is_none() );
			}

			if pos + 1 < nodes.len() {
				assert_eq!( res.r_cost, costs[pos] );
				let rt = res.right_tree.unwrap();
				let slot = model.paths.len();
				model.paths.push( (nodes[pos + 1..].to_vec(), costs[pos + 1..].to_vec()) );
				for &y in &nodes[pos + 1..] {
					model.which[y] = slot;
				}
				roots.push( rt );
			}
			else {
				assert!( res.right_tree.is_none() );
			}

			// The split leaf stays behind as its own path
			model.paths[p] = (vec![x], vec![]);
			model.which[x] = p;
			roots[p] = handles[x];
		}

		// Verify a random path against the model
		let live : Vec<usize> = (0..model.paths.len())
			.filter( |&i| !model.paths[i].0.is_empty() )
			.collect();
		let p = live[rng.gen_range( 0..live.len() )];
		let (nodes, _) = &model.paths[p];
		let root = f.get_root( handles[nodes[0]] );
		assert_eq!( root, roots[p] );

		let mut path = vec![];
		f.write_path( roots[p], &mut path );
		let expected : Vec<_> = nodes.iter().map( |&x| n( x ) ).collect();
		assert_eq!( path, expected );

		assert_eq!( f.weight( roots[p] ),
			nodes.iter().map( |&x| model.weights[x] ).sum::<usize>() );

		for max in [false, true] {
			let got = if max {
				f.get_max_edge_on_path( roots[p] )
			}
			else {
				f.get_min_edge_on_path( roots[p] )
			};
			let expected = model.extreme_edge( p, max )
				.map( |((a, b), c)| ((n( a ), n( b )), c) );
			assert_eq!( got, expected );
		}
	}
}
