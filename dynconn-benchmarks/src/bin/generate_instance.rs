use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use dynconn_benchmarks::generate::{create_random_graph, decremental_test, incremental_test, mixed_test};
use dynconn_benchmarks::io::{read_edge_list, write_action_file};


/// Generates an action-stream instance file, either from a G(n,p) random graph or from an
/// edge-list file.
#[derive(Parser)]
#[command(name = "Dynamic connectivity instance generator")]
struct Cli {
	/// Number of vertices of the generated random graph
	#[arg(short, long, default_value_t = 1_000)]
	number : usize,

	/// Edge probability of the generated random graph
	#[arg(short, long, default_value_t = 0.01)]
	probability : f64,

	/// Read the base graph from this edge-list file instead of generating one
	#[arg(short, long)]
	edge_list : Option<PathBuf>,

	/// Workload shape: incremental, decremental or mixed
	#[arg(short, long, default_value = "mixed")]
	workload : String,

	/// Fraction of edges present before the mixed phase starts
	#[arg(long = "ps", default_value_t = 0.3)]
	p_start : f64,

	/// Number of mixed-phase steps; defaults to 100·n
	#[arg(long)]
	steps : Option<usize>,

	/// Expected number of queries per update
	#[arg(long = "qf", default_value_t = 0.0)]
	query_frequency : f64,

	/// Seed for all random choices
	#[arg(short, long, default_value_t = 1234)]
	seed : u64,

	/// Output instance file
	#[arg(short, long)]
	output : PathBuf
}

fn main() {
	let cli = Cli::parse();

	let edges = match &cli.edge_list {
		Some( path ) => match read_edge_list( path ) {
			Ok( e ) => e,
			Err( e ) => {
				eprintln!( "Could not read edge list '{}': {e}", path.display() );
				exit( 1 );
			}
		},
		None => create_random_graph( cli.number, cli.probability, cli.seed )
	};

	let steps = cli.steps.unwrap_or( 100 * cli.number );
	let actions = match cli.workload.as_str() {
		"incremental" => incremental_test( &edges, cli.seed, cli.query_frequency ),
		"decremental" => decremental_test( &edges, cli.seed, cli.query_frequency ),
		"mixed" => mixed_test( &edges, cli.p_start, 0.5, steps, cli.seed, cli.query_frequency ),
		other => {
			eprintln!( "Unknown workload '{other}'; expected incremental, decremental or mixed" );
			exit( 1 );
		}
	};

	let info = format!( "workload: {} seed: {} qf: {} edges: {}",
		cli.workload, cli.seed, cli.query_frequency, edges.len() );
	if let Err( e ) = write_action_file( &actions, &cli.output, &info ) {
		eprintln!( "Could not write '{}': {e}", cli.output.display() );
		exit( 1 );
	}

	println!( "Wrote {} actions to '{}'.", actions.len(), cli.output.display() );
}
