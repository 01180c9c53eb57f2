//! The common interface of the fully dynamic connectivity algorithms.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::NodeIdx;


/// A caller-observable contract violation on the public mutation surface.
///
/// Internal structures assert their preconditions instead; only operations driven by outside
/// input (action streams, user code) report errors of this type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ContractViolation {
	/// Attempt to add an edge that is already present.
	EdgeAlreadyExists( NodeIdx, NodeIdx ),

	/// Attempt to delete (or otherwise use) an edge that is not present.
	NoSuchEdge( NodeIdx, NodeIdx ),

	/// Attempt to add a self-loop.
	SelfLoop( NodeIdx )
}

impl Display for ContractViolation {
	fn fmt( &self, f : &mut Formatter<'_> ) -> std::fmt::Result {
		match self {
			ContractViolation::EdgeAlreadyExists( u, v )
				=> write!( f, "edge {{{u},{v}}} already exists" ),
			ContractViolation::NoSuchEdge( u, v )
				=> write!( f, "no edge {{{u},{v}}}" ),
			ContractViolation::SelfLoop( v )
				=> write!( f, "self-loop at {v}" )
		}
	}
}

impl Error for ContractViolation {}


/// A fully dynamic connectivity algorithm.
///
/// Maintains an undirected graph under edge insertions and deletions and answers connectivity
/// queries. Queries take `&mut self`: several implementations reorganize their internal trees
/// while answering.
pub trait DynConnectivity {
	/// Indicates whether the current graph contains a path between `u` and `v`.
	///
	/// `query( v, v )` is true for any `v`; vertices outside the graph are connected to
	/// nothing. Randomized implementations may give false negatives with their documented
	/// probability, never false positives.
	fn query( &mut self, u : NodeIdx, v : NodeIdx ) -> bool;

	/// Insert the edge `{u,v}` into the graph.
	fn add_edge( &mut self, u : NodeIdx, v : NodeIdx ) -> Result<(), ContractViolation>;

	/// Delete the edge `{u,v}` from the graph.
	fn delete_edge( &mut self, u : NodeIdx, v : NodeIdx ) -> Result<(), ContractViolation>;

	/// The number of connected components.
	fn number_of_components( &mut self ) -> usize;
}
