/*!
Data structures and algorithms for fully dynamic connectivity on undirected graphs.

This crate maintains an undirected graph under an online sequence of edge insertions, edge
deletions and connectivity queries `connected(u,v)`, answering each query in polylogarithmic
time instead of the linear cost of a fresh breadth-first search. Three complete algorithms are
provided behind the common [DynConnectivity](connectivity::DynConnectivity) trait:

* [HDT](hdt::Hdt): the deterministic amortized O(log² n) algorithm of Holm, de Lichtenberg
	and Thorup, built on levelled Euler-tour forests.
* [Wang](wang::Wang): a randomized worst-case polylog algorithm sampling replacement edges
	from XOR cut-set sketches, built on Euler-tour forests, worst-case link-cut trees and
	tabular hashing.
* [DTree](dtree::DTree): a centroid-rooted spanning-tree heuristic with good practical
	behaviour, used as the deterministic correctness oracle for the other two.

The supporting structures are exposed as well: a generic AVL map ([avl::AvlTree]), globally
biased binary trees after Bent, Sleator and Tarjan ([bbf::BiasedBinaryForest],
[bbt::BiasedBinaryTree]), worst-case link-cut trees ([link_cut::LinkCutTrees]), aggregate-
carrying Euler-tour forests ([euler::EulerTourForest]) and the levelled XOR sketch structure
([cutset::CutSet]).


# Examples

```
use dynconn::NodeIdx;
use dynconn::connectivity::DynConnectivity;
use dynconn::hdt::Hdt;

let mut c = Hdt::new( 4 );
let [u, v, w, x] = [0, 1, 2, 3].map( NodeIdx::new );

c.add_edge( u, v ).unwrap();
c.add_edge( v, w ).unwrap();
assert!( c.query( u, w ) );
assert!( !c.query( u, x ) );
assert_eq!( c.number_of_components(), 2 );

c.delete_edge( u, v ).unwrap();
assert!( !c.query( u, w ) );
```

```
use dynconn::NodeIdx;
use dynconn::connectivity::DynConnectivity;
use dynconn::wang::{Wang, WangMode};

// The randomized algorithm; queries may err with probability <= n^-c.
let mut c = Wang::new( 4, 1.0, 42, 2, WangMode::Base );
c.add_edge( NodeIdx::new( 0 ), NodeIdx::new( 1 ) ).unwrap();
assert!( c.query( NodeIdx::new( 0 ), NodeIdx::new( 1 ) ) );
```

# Crate feature flags

The following crate feature flags are available. They are configured in your `Cargo.toml`.

* `space_efficient_nodes`
	* Optional, requires the `nonmax` crate.
	* Improve node space usage. Disallows the maximum node index 2^64-1 and incurs a small
		runtime cost to check that this node index is not used.
* `verbose_lct`
	* Optional. WARNING: very slow.
	* Print out detailed information about link-cut tree operations.
* `verify_structures`
	* Optional. WARNING: very slow.
	* Validate balance, bias and aggregate invariants after every mutating operation.

# Literature

\[ST83\] Daniel D. Sleator and Robert Endre Tarjan. A Data Structure for Dynamic Trees.
Journal of Computer and System Sciences, 26(3):362–391, 1983.

\[BST85\] Samuel W. Bent, Daniel D. Sleator and Robert Endre Tarjan. Biased search trees.
SIAM Journal on Computing, 14(3):545–568, 1985.

\[HK99\] Monika R. Henzinger and Valerie King. Randomized fully dynamic graph algorithms
with polylogarithmic time per operation. Journal of the ACM, 46(4):502–516, 1999.

\[HdLT01\] Jacob Holm, Kristian de Lichtenberg and Mikkel Thorup. Poly-logarithmic
deterministic fully-dynamic algorithms for connectivity, minimum spanning tree, 2-edge, and
biconnectivity. Journal of the ACM, 48(4):723–760, 2001.

\[KKM13\] Bruce M. Kapron, Valerie King and Ben Mountjoy. Dynamic graph connectivity in
polylogarithmic worst case time. Proceedings of SODA 2013, 1131–1142, 2013.
*/

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::private_doc_tests)]


use std::fmt::{Display, Formatter};
use std::ops;

#[cfg( feature = "space_efficient_nodes" )]
use nonmax::NonMaxUsize;

pub mod avl;
pub mod bbf;
pub mod bbt;
pub mod connectivity;
pub mod cutset;
pub mod dtree;
pub mod euler;
pub mod graph;
pub mod hashing;
pub mod hdt;
pub mod link_cut;
pub mod query_forest;
pub mod wang;


/// Represents a vertex of the underlying graph to the outside world.
#[cfg( not( feature = "space_efficient_nodes" ) )]
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeIdx {
	raw_idx : usize
}

#[cfg( not( feature = "space_efficient_nodes" ) )]
impl NodeIdx {
	/// Convert `usize` into `NodeIdx`.
	///
	/// Use with care, as this can circumvent bounds checking.
	pub fn new( idx : usize ) -> NodeIdx {
		NodeIdx { raw_idx: idx }
	}

	/// Convert this into `usize`.
	#[inline]
	pub fn index( &self ) -> usize {
		self.raw_idx
	}
}


/// Represents a vertex of the underlying graph to the outside world.
#[cfg( feature = "space_efficient_nodes" )]
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeIdx {
	raw_idx : NonMaxUsize
}

#[cfg( feature = "space_efficient_nodes" )]
impl NodeIdx {
	/// Convert `usize` into `NodeIdx`.
	///
	/// Use with care, as this can circumvent bounds checking.
	pub fn new( idx : usize ) -> NodeIdx {
		NodeIdx { raw_idx : NonMaxUsize::new( idx ).unwrap() }
	}

	/// Convert this into `usize`.
	#[inline]
	pub fn index( &self ) -> usize {
		self.raw_idx.get()
	}
}

impl Display for NodeIdx {
	fn fmt( &self, f: &mut Formatter<'_> ) -> std::fmt::Result {
		write!( f, "{}", self.index() )
	}
}


/// The cost of an edge. Path aggregates (minimum, maximum, sums of updates) stay within `i64`
/// for the supported workloads (|update| <= 10^9, paths of length <= 10^7).
pub type Cost = i64;


/// An undirected edge, stored as a pair of raw vertex indices.
///
/// Edges form a group under componentwise XOR with [Edge::ZERO] as identity; the XOR sketches
/// in [cutset](crate::cutset) rely on this. The raw representation deliberately bypasses
/// [NodeIdx], since intermediate XOR values are in general not valid vertices.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Edge {
	/// First endpoint (raw index).
	pub v : usize,
	/// Second endpoint (raw index).
	pub w : usize
}

impl Edge {
	/// The zero edge, identity of the XOR group. Also used as a "no edge" marker by the
	/// sketch structures.
	pub const ZERO : Edge = Edge { v : 0, w : 0 };

	/// The edge between `v` and `w`.
	pub fn new( v : NodeIdx, w : NodeIdx ) -> Edge {
		Edge { v : v.index(), w : w.index() }
	}

	/// This edge with the smaller endpoint first.
	pub fn canonical( self ) -> Edge {
		if self.v <= self.w {
			self
		}
		else {
			Edge { v : self.w, w : self.v }
		}
	}

	/// The two endpoints as vertices. Only meaningful on actual edges, not on XOR residues.
	pub fn nodes( self ) -> (NodeIdx, NodeIdx) {
		( NodeIdx::new( self.v ), NodeIdx::new( self.w ) )
	}
}

impl ops::BitXorAssign for Edge {
	fn bitxor_assign( &mut self, rhs : Edge ) {
		self.v ^= rhs.v;
		self.w ^= rhs.w;
	}
}

impl ops::BitXor for Edge {
	type Output = Edge;

	fn bitxor( mut self, rhs : Edge ) -> Edge {
		self ^= rhs;
		self
	}
}

impl Display for Edge {
	fn fmt( &self, f : &mut Formatter<'_> ) -> std::fmt::Result {
		write!( f, "{{{},{}}}", self.v, self.w )
	}
}
