//! Random test-instance generation: G(n,p) graphs and incremental / decremental / mixed
//! action workloads, all reproducible from a seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Poisson;

use crate::io::Action;


/// All edges of a G(n,p) random graph.
pub fn create_random_graph( n : usize, p : f64, seed : u64 ) -> Vec<(usize, usize)> {
	assert!( (0.0..=1.0).contains( &p ) );
	let mut rng = StdRng::seed_from_u64( seed );

	let mut edges = vec![];
	for i in 0..n {
		for j in i + 1..n {
			if rng.gen_bool( p ) {
				edges.push( (i, j) );
			}
		}
	}
	edges
}

/// Turns an edge list into plain insertion actions.
pub fn edge_list_to_actions( edges : &[(usize, usize)] ) -> Vec<Action> {
	edges.iter().map( |&(u, v)| Action::Add( u, v ) ).collect()
}

/// Appends queries at an expected rate of `query_frequency` per update, drawn from
/// `Poisson(query_frequency)` with uniform random endpoints.
fn push_queries( actions : &mut Vec<Action>, n : usize, query_frequency : f64, rng : &mut StdRng ) {
	if query_frequency <= 0.0 || n < 2 {
		return;
	}
	let dist = Poisson::new( query_frequency ).unwrap();
	let num_queries = rng.sample( dist ) as usize;
	for _ in 0..num_queries {
		let u = rng.gen_range( 0..n );
		let mut v = rng.gen_range( 0..n - 1 );
		if v >= u {
			v += 1;
		}
		actions.push( Action::Query( u, v ) );
	}
}

fn num_vertices_of_edges( edges : &[(usize, usize)] ) -> usize {
	edges.iter().map( |&(u, v)| u.max( v ) + 1 ).max().unwrap_or( 0 )
}

/// A workload inserting all edges in random order, with interspersed queries.
pub fn incremental_test( edges : &[(usize, usize)], seed : u64, query_frequency : f64 ) -> Vec<Action> {
	let n = num_vertices_of_edges( edges );
	let mut rng = StdRng::seed_from_u64( seed );
	let mut edges = edges.to_vec();
	edges.shuffle( &mut rng );

	let mut actions = vec![];
	for (u, v) in edges {
		actions.push( Action::Add( u, v ) );
		push_queries( &mut actions, n, query_frequency, &mut rng );
	}
	actions
}

/// A workload inserting all edges untimed, then deleting them in random order with
/// interspersed queries. A timer marker separates the two phases.
pub fn decremental_test( edges : &[(usize, usize)], seed : u64, query_frequency : f64 ) -> Vec<Action> {
	let n = num_vertices_of_edges( edges );
	let mut rng = StdRng::seed_from_u64( seed );
	let mut edges = edges.to_vec();

	let mut actions : Vec<Action> = edges.iter().map( |&(u, v)| Action::Add( u, v ) ).collect();
	actions.push( Action::Timer );

	edges.shuffle( &mut rng );
	for (u, v) in edges {
		actions.push( Action::Delete( u, v ) );
		push_queries( &mut actions, n, query_frequency, &mut rng );
	}
	actions
}

/// A mixed workload: a `p_start` fraction of the edges is inserted up front, then
/// `steps_to_final` steps each insert (with probability `p_add`) or delete a random edge,
/// followed by `Poisson(query_frequency)` random queries.
pub fn mixed_test( edges : &[(usize, usize)], p_start : f64, p_add : f64,
		steps_to_final : usize, seed : u64, query_frequency : f64 ) -> Vec<Action>
{
	assert!( (0.0..=0.5).contains( &p_start ) );
	assert!( (0.0..=1.0).contains( &p_add ) );
	assert!( query_frequency >= 0.0 );

	let n = num_vertices_of_edges( edges );
	let mut rng = StdRng::seed_from_u64( seed );
	let mut edges = edges.to_vec();
	edges.shuffle( &mut rng );

	let mut actions = vec![];

	// The first border_in_out edges are currently in the graph
	let mut border_in_out = ( p_start * edges.len() as f64 ) as usize;
	for &(u, v) in &edges[..border_in_out] {
		actions.push( Action::Add( u, v ) );
	}

	for _ in 0..steps_to_final {
		if rng.gen_bool( p_add ) {
			// Swap a random absent edge to the border and insert it
			if border_in_out + 1 < edges.len() {
				let pick = rng.gen_range( border_in_out..edges.len() );
				edges.swap( border_in_out, pick );
				let (u, v) = edges[border_in_out];
				actions.push( Action::Add( u, v ) );
				border_in_out += 1;
			}
		}
		else if border_in_out > 0 {
			// Swap a random present edge to the border and delete it
			let pick = rng.gen_range( 0..border_in_out );
			edges.swap( border_in_out - 1, pick );
			let (u, v) = edges[border_in_out - 1];
			actions.push( Action::Delete( u, v ) );
			border_in_out -= 1;
		}

		push_queries( &mut actions, n, query_frequency, &mut rng );
	}

	actions
}
