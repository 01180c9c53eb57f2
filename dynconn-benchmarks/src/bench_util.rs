//! Utilities for benchmarking: algorithm descriptors, measurement modes and the runners
//! behind the `benchmark` binary.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{Duration, Instant};

use clap::clap_derive::ValueEnum;
use itertools::iproduct;
use rand::prelude::*;
use rand::rngs::StdRng;

use dynconn::connectivity::DynConnectivity;
use dynconn::dtree::DTree;
use dynconn::hdt::Hdt;
use dynconn::wang::{Wang, WangMode};
use dynconn::NodeIdx;

use crate::io::Action;

/// Queries issued per `b` (query block) marker.
const QUERY_BLOCK_SIZE : usize = 10_000;

/// Random queries fired whenever the correctness check sees diverging component counts.
const ERROR_PROBE_QUERIES : usize = 1_000;


/// A selectable connectivity algorithm, as named on the command line.
///
/// The `GKKT`, `Wang` and `Kaibel` families all run the same randomized cut-set
/// implementation; the bracketed suffix selects its levelling mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AlgoDesc {
	/// The centroid spanning-tree reference structure.
	DTree,
	/// Holm–de Lichtenberg–Thorup.
	Hdt,
	/// The randomized cut-set algorithm in the given mode.
	Randomized( &'static str, WangMode )
}

impl AlgoDesc {
	/// Every accepted algorithm name.
	pub fn all_names() -> Vec<String> {
		let mut names = vec!["DTree".to_string(), "HDT".to_string()];
		names.extend( iproduct!( ["GKKT", "Wang", "Kaibel"], ["base", "pHeu", "lvlHeu"] )
			.map( |(family, mode)| format!( "{family}[{mode}]" ) ) );
		names
	}

	/// Builds an instance for `n` vertices. The seed only matters for the randomized
	/// algorithms.
	pub fn construct( &self, n : usize, seed : u64 ) -> Box<dyn DynConnectivity> {
		match self {
			AlgoDesc::DTree => Box::new( DTree::new( n ) ),
			AlgoDesc::Hdt => Box::new( Hdt::new( n ) ),
			AlgoDesc::Randomized( _, mode ) => Box::new( Wang::new( n, 1.0, seed, 1, *mode ) )
		}
	}
}

impl FromStr for AlgoDesc {
	type Err = String;

	fn from_str( s : &str ) -> Result<AlgoDesc, String> {
		match s {
			"DTree" => return Ok( AlgoDesc::DTree ),
			"HDT" => return Ok( AlgoDesc::Hdt ),
			_ => {}
		}
		for (family, (suffix, mode)) in iproduct!(
			["GKKT", "Wang", "Kaibel"],
			[("base", WangMode::Base), ("pHeu", WangMode::PHeu), ("lvlHeu", WangMode::LvlHeu)] )
		{
			if s == format!( "{family}[{suffix}]" ) {
				return Ok( AlgoDesc::Randomized( family, mode ) );
			}
		}
		Err( format!( "'{s}' is not a valid algorithm; expected one of {}",
			AlgoDesc::all_names().join( ", " ) ) )
	}
}

impl Display for AlgoDesc {
	fn fmt( &self, f : &mut Formatter<'_> ) -> std::fmt::Result {
		match self {
			AlgoDesc::DTree => write!( f, "DTree" ),
			AlgoDesc::Hdt => write!( f, "HDT" ),
			AlgoDesc::Randomized( family, mode ) => {
				let suffix = match mode {
					WangMode::Base => "base",
					WangMode::PHeu => "pHeu",
					WangMode::LvlHeu => "lvlHeu"
				};
				write!( f, "{family}[{suffix}]" )
			}
		}
	}
}


/// What the driver measures.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Mode {
	/// Wall-clock time of the whole action stream.
	#[value(name = "regular")]
	Regular,
	/// Maximum time of a single insertion and a single deletion.
	#[value(name = "maxTimeUpdate")]
	MaxTimeUpdate,
	/// Cross-check every update against a DTree oracle.
	#[value(name = "correctnessCheck")]
	CorrectnessCheck,
	/// Wall-clock time of the random query blocks only.
	#[value(name = "queryTime")]
	QueryTime
}

impl Display for Mode {
	fn fmt( &self, f : &mut Formatter<'_> ) -> std::fmt::Result {
		let s = match self {
			Mode::Regular => "regular",
			Mode::MaxTimeUpdate => "maxTimeUpdate",
			Mode::CorrectnessCheck => "correctnessCheck",
			Mode::QueryTime => "queryTime"
		};
		write!( f, "{s}" )
	}
}


/// How to echo results to stdout.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum PrintType {
	Silent,
	Print,
	Json
}

impl PrintType {
	pub fn from_args( print : bool, json : bool ) -> Self {
		if print {
			if json {
				eprintln!( "Cannot both print and print json" )
			}
			Self::Print
		}
		else if json {
			Self::Json
		}
		else {
			Self::Silent
		}
	}
}


fn apply_update( algo : &mut dyn DynConnectivity, u : usize, v : usize, add : bool )
		-> Result<(), String>
{
	let (u, v) = ( NodeIdx::new( u ), NodeIdx::new( v ) );
	let res = if add { algo.add_edge( u, v ) } else { algo.delete_edge( u, v ) };
	res.map_err( |e| format!( "invalid action stream: {e}" ) )
}

/// Total wall-clock time over the whole stream; `t` resets the clock.
pub fn run_all_updates_time( actions : &[Action], algo : &mut dyn DynConnectivity )
		-> Result<Duration, String>
{
	let mut t0 = Instant::now();

	for act in actions {
		match *act {
			Action::Add( u, v ) => apply_update( algo, u, v, true )?,
			Action::Delete( u, v ) => apply_update( algo, u, v, false )?,
			Action::Query( u, v ) => {
				algo.query( NodeIdx::new( u ), NodeIdx::new( v ) );
			},
			Action::QueryBlock =>
				return Err( "query blocks are not allowed in a regular run".to_string() ),
			Action::Timer => t0 = Instant::now()
		}
	}

	Ok( t0.elapsed() )
}

/// Maximum single-update times `(max add, max delete)`; `t` resets both maxima.
pub fn run_single_update_time( actions : &[Action], algo : &mut dyn DynConnectivity )
		-> Result<(Duration, Duration), String>
{
	let mut t_max_add = Duration::ZERO;
	let mut t_max_del = Duration::ZERO;

	for act in actions {
		match *act {
			Action::Add( u, v ) => {
				let t0 = Instant::now();
				apply_update( algo, u, v, true )?;
				t_max_add = t_max_add.max( t0.elapsed() );
			},
			Action::Delete( u, v ) => {
				let t0 = Instant::now();
				apply_update( algo, u, v, false )?;
				t_max_del = t_max_del.max( t0.elapsed() );
			},
			Action::Query( _, _ ) | Action::QueryBlock =>
				return Err( "queries are not allowed in a single-update-time run".to_string() ),
			Action::Timer => {
				t_max_add = Duration::ZERO;
				t_max_del = Duration::ZERO;
			}
		}
	}

	Ok( (t_max_add, t_max_del) )
}

/// Wall-clock time of the query blocks only: every `b` marker fires a block of random
/// queries; `t` resets the sum.
pub fn run_query_time( actions : &[Action], algo : &mut dyn DynConnectivity, n : usize )
		-> Result<Duration, String>
{
	let mut t_sum = Duration::ZERO;
	let mut rng = StdRng::seed_from_u64( 42 );

	for act in actions {
		match *act {
			Action::Add( u, v ) => apply_update( algo, u, v, true )?,
			Action::Delete( u, v ) => apply_update( algo, u, v, false )?,
			Action::Query( _, _ ) =>
				return Err( "query actions are not allowed in a query-time run".to_string() ),
			Action::QueryBlock => {
				let queries : Vec<(usize, usize)> = (0..QUERY_BLOCK_SIZE)
					.map( |_| ( rng.gen_range( 0..n ), rng.gen_range( 0..n ) ) )
					.collect();

				let t0 = Instant::now();
				for (u, v) in queries {
					algo.query( NodeIdx::new( u ), NodeIdx::new( v ) );
				}
				t_sum += t0.elapsed();
			},
			Action::Timer => t_sum = Duration::ZERO
		}
	}

	Ok( t_sum )
}

/// The counters of a correctness-check run.
pub struct AccuracyResult {
	/// Updates after which the component counts were compared.
	pub state_checks : usize,
	/// Updates after which the component counts diverged.
	pub error_states : usize,
	/// Individual probe queries issued on diverging states.
	pub query_checks : usize,
	/// Probe queries whose answers diverged.
	pub query_errors : usize
}

/// Runs the stream against `algo` and a [DTree] oracle in lockstep, comparing component
/// counts after every update and probing with random queries whenever they diverge.
pub fn run_accuracy_check( actions : &[Action], algo : &mut dyn DynConnectivity, n : usize )
		-> Result<AccuracyResult, String>
{
	let mut correct = DTree::new( n );
	let mut rng = StdRng::seed_from_u64( 42 );
	let mut res = AccuracyResult { state_checks : 0, error_states : 0, query_checks : 0, query_errors : 0 };

	for act in actions {
		match *act {
			Action::Add( u, v ) | Action::Delete( u, v ) => {
				let add = matches!( *act, Action::Add( _, _ ) );
				apply_update( algo, u, v, add )?;
				apply_update( &mut correct, u, v, add )?;

				res.state_checks += 1;
				if algo.number_of_components() != correct.number_of_components() {
					res.error_states += 1;

					for _ in 0..ERROR_PROBE_QUERIES {
						res.query_checks += 1;
						let u = NodeIdx::new( rng.gen_range( 0..n ) );
						let v = NodeIdx::new( rng.gen_range( 0..n ) );
						if algo.query( u, v ) != correct.query( u, v ) {
							res.query_errors += 1;
						}
					}
				}
			},
			Action::Query( u, v ) => {
				algo.query( NodeIdx::new( u ), NodeIdx::new( v ) );
			},
			Action::QueryBlock =>
				return Err( "query blocks are not allowed in a correctness check".to_string() ),
			Action::Timer => {
				res = AccuracyResult { state_checks : 0, error_states : 0, query_checks : 0, query_errors : 0 };
			}
		}
	}

	Ok( res )
}

/// Runs `actions` against a fresh instance of `algo_desc` in the given mode and returns the
/// measurement columns of the CSV row.
pub fn run_benchmark( actions : &[Action], algo_desc : AlgoDesc, n : usize, mode : Mode,
		seed : u64 ) -> Result<String, String>
{
	let mut algo = algo_desc.construct( n, seed );

	match mode {
		Mode::Regular => {
			let runtime = run_all_updates_time( actions, algo.as_mut() )?;
			Ok( format!( "{}", runtime.as_nanos() ) )
		},
		Mode::MaxTimeUpdate => {
			let (max_add, max_del) = run_single_update_time( actions, algo.as_mut() )?;
			Ok( format!( "{},{}", max_add.as_nanos(), max_del.as_nanos() ) )
		},
		Mode::QueryTime => {
			let runtime = run_query_time( actions, algo.as_mut(), n )?;
			Ok( format!( "{}", runtime.as_nanos() ) )
		},
		Mode::CorrectnessCheck => {
			let res = run_accuracy_check( actions, algo.as_mut(), n )?;
			Ok( format!( "{},{},{},{}",
				res.state_checks, res.error_states, res.query_checks, res.query_errors ) )
		}
	}
}
