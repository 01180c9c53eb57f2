use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use dynconn_benchmarks::bench_util::{run_benchmark, AlgoDesc, Mode, PrintType};
use dynconn_benchmarks::generate::{create_random_graph, mixed_test};
use dynconn_benchmarks::io::{num_vertices_of, read_action_file, Action};
use dynconn_benchmarks::bench_util::PrintType::{Json, Print};

/// Seed of the base graph when generating an instance; the action order and queries vary
/// with `--seed` instead.
const GRAPH_SEED : u64 = 42;

/// Probability that a step of a generated mixed workload inserts rather than deletes.
const P_ADD_IN_STEP : f64 = 0.5;


/// Translates a density-ladder name into an edge probability.
fn density_edge_chance( density : &str, n : usize ) -> f64 {
	let nf = n as f64;
	match density {
		"4s" => 4.0 / nf,
		"20s" => 20.0 / nf,
		_ => {
			for i in [4, 6, 8, 10, 12, 14, 16, 18, 20] {
				if density == format!( "{i}logn" ) {
					return i as f64 * nf.log2() / nf;
				}
				if density == format!( "{i}sqrtn" ) {
					return i as f64 * nf.sqrt() / nf;
				}
			}
			0.0
		}
	}
}


#[derive(Parser)]
#[command(name = "Dynamic connectivity benchmark")]
struct Cli {
	/// Algorithm to run: DTree, HDT, or GKKT/Wang/Kaibel with [base], [pHeu] or [lvlHeu]
	#[arg(short, long)]
	algo : AlgoDesc,

	/// Number of vertices (when not implied by the instance)
	#[arg(short, long, default_value_t = 1)]
	number : usize,

	/// Density of a generated test: iX with i in {4..20} and X in {s,logn,sqrtn}
	#[arg(short, long, default_value = "0")]
	density : String,

	/// Instance file; paths ending in `test.txt` generate a random instance instead
	#[arg(short, long)]
	instance : PathBuf,

	/// Output CSV file (appended to)
	#[arg(short, long)]
	output : PathBuf,

	/// Fraction of edges present before the mixed phase starts
	#[arg(long = "ps", default_value_t = 0.0)]
	p_start : f64,

	/// Seed for workload generation and the randomized algorithms
	#[arg(short, long, default_value_t = 1234)]
	seed : u64,

	/// Expected number of queries per update
	#[arg(long = "qf", default_value_t = 0.0)]
	query_frequency : f64,

	/// What to measure
	#[arg(short, long, value_enum, default_value_t = Mode::Regular)]
	mode : Mode,

	/// Print the results in human-readable form
	#[arg(long, default_value_t = false)]
	print : bool,

	/// Print the results as json
	#[arg(long, default_value_t = false)]
	json : bool
}


fn main() {
	let cli = Cli::parse();
	let print = PrintType::from_args( cli.print, cli.json );

	let actions : Vec<Action>;
	let num_vertices : usize;

	if cli.instance.to_string_lossy().ends_with( "test.txt" ) {
		// Generate a random instance from (n, density, seed)
		let edge_chance = density_edge_chance( &cli.density, cli.number );
		let graph = create_random_graph( cli.number, edge_chance, GRAPH_SEED );
		actions = mixed_test( &graph, cli.p_start, P_ADD_IN_STEP, 100 * cli.number,
			cli.seed, cli.query_frequency );
		num_vertices = cli.number;

		if print == Print {
			println!( "Generated {} actions on {num_vertices} vertices (density {}).",
				actions.len(), cli.density );
		}
	}
	else {
		match read_action_file( &cli.instance ) {
			Ok( a ) => actions = a,
			Err( e ) => {
				eprintln!( "Could not read instance '{}': {e}", cli.instance.display() );
				exit( 1 );
			}
		}
		num_vertices = num_vertices_of( &actions );

		if print == Print {
			println!( "Read {} actions on {num_vertices} vertices from '{}'.",
				actions.len(), cli.instance.display() );
		}
	}

	let measurements = match run_benchmark( &actions, cli.algo, num_vertices, cli.mode, cli.seed ) {
		Ok( m ) => m,
		Err( e ) => {
			eprintln!( "Benchmark failed: {e}" );
			exit( 1 );
		}
	};

	let row = format!( "{},{},{},{},{},{},{}\n",
		cli.mode, cli.algo, num_vertices, cli.density, cli.query_frequency,
		cli.instance.display(), measurements );

	let write_res = OpenOptions::new()
		.create( true )
		.append( true )
		.open( &cli.output )
		.and_then( |mut f| f.write_all( row.as_bytes() ) );
	if let Err( e ) = write_res {
		eprintln!( "Could not write results to '{}': {e}", cli.output.display() );
		exit( 1 );
	}

	if print == Print {
		print!( "{row}" );
	}
	else if print == Json {
		println!( "{}", json::stringify( json::object! {
			mode : cli.mode.to_string(),
			algo : cli.algo.to_string(),
			num_vertices : num_vertices,
			density : cli.density.clone(),
			qf : cli.query_frequency,
			instance : cli.instance.display().to_string(),
			measurements : measurements
		} ) );
	}
}
