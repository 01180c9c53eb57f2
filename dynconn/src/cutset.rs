//! Levelled XOR sketches supporting *cut-edge sampling*: draw an edge leaving the component
//! of a vertex, uniformly-ish, in polylog time.
//!
//! For every level, every vertex keeps `boost` independent sketch matrices of
//! `ceil(2 log2 n) + 1` rows; row `r` holds the XOR of all incident edges whose
//! [tabular hash](crate::hashing) has bit length at most `r`. Row 0 is the sparsest (only
//! hash value 0), the top row holds the whole incidence list. A row that happens to contain
//! exactly one edge yields that edge verbatim; since XOR aggregates, the same trick works for
//! whole components by keeping the per-vertex sketches in the aggregate of an
//! [Euler-tour forest](crate::euler) and reading the root. A single sketch succeeds with
//! constant probability; `boost` independent copies amplify that.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::avl::AvlTree;
use crate::euler::{CutSetTracking, EtEdgeIdx, EulerTourForest, SketchMatrix};
use crate::hashing::TabularHash;
use crate::{Edge, NodeIdx};

/// Block size of the tabular hashing.
const BLOCK_SIZE : u32 = 2;


/// The levelled cut-set sketch structure. See the [module documentation](self).
pub struct CutSet {
	num_levels : usize,
	boost : usize,
	n : usize,
	lognsqr : usize,

	/// Tree edges per level and vertex, keyed by the other endpoint.
	tree_edges : Vec<Vec<AvlTree<NodeIdx, EtEdgeIdx>>>,
	/// The active edge of every vertex per level.
	active_edges : Vec<Vec<Option<EtEdgeIdx>>>,

	/// One Euler-tour forest per level, carrying the sketch aggregates.
	forests : Vec<EulerTourForest<CutSetTracking>>,

	/// The authoritative per-vertex sketches, indexed `[level][vertex]`.
	xor_edge_vectors : Vec<Vec<SketchMatrix>>,

	/// The hash functions, indexed `[level][boost]`.
	hashes : Vec<Vec<TabularHash>>
}

impl CutSet {
	/// Creates a cut-set structure for `n` vertices with the given number of levels and
	/// `boost` sketch copies per level. A `search` succeeds with probability at least
	/// `1 - (7/8)^boost` when a crossing edge exists. Reproducible from `seed`.
	pub fn new( n : usize, boost : usize, num_levels : usize, seed : u64 ) -> CutSet {
		let lognsqr = lognsqr( n );
		let mut rng = StdRng::seed_from_u64( seed );

		let hashes = (0..num_levels)
			.map( |_| (0..boost).map( |_| TabularHash::new( n, rng.gen(), BLOCK_SIZE ) ).collect() )
			.collect();

		CutSet {
			num_levels,
			boost,
			n,
			lognsqr,
			tree_edges : (0..num_levels).map( |_| vec![AvlTree::new(); n] ).collect(),
			active_edges : vec![vec![None; n]; num_levels],
			forests : (0..num_levels).map( |_| EulerTourForest::new() ).collect(),
			xor_edge_vectors : (0..num_levels)
				.map( |_| (0..n).map( |_| vec![vec![Edge::ZERO; lognsqr]; boost] ).collect() )
				.collect(),
			hashes
		}
	}

	/// The number of levels.
	pub fn num_levels( &self ) -> usize {
		self.num_levels
	}

	/// XORs the edge `e = {v,w}` into the sketches of `v` and `w` on all levels.
	pub fn add_edge_to_set( &mut self, e : Edge ) {
		debug_assert!( e.v < self.n && e.w < self.n && e.v != e.w );
		let e = e.canonical();

		for i in 0..self.num_levels {
			let mut starting_level = vec![0u8; self.boost];

			for j in 0..self.boost {
				let hash_val = self.hashes[i][j].hash( e );
				// The number of rows the edge skips is the bit length of its hash
				let mut bin_pot = 1;
				while hash_val >= bin_pot {
					starting_level[j] += 1;
					bin_pot *= 2;
				}

				for k in starting_level[j] as usize..self.lognsqr {
					self.xor_edge_vectors[i][e.v][j][k] ^= e;
					self.xor_edge_vectors[i][e.w][j][k] ^= e;
				}
			}

			// Push the update into any active aggregates the endpoints own
			for x in [e.v, e.w] {
				if let Some( active ) = self.active_edges[i][x] {
					self.forests[i].add_edge_to_data( active, e, &starting_level );
				}
			}
		}
	}

	/// Inserts `e` as a tree edge on every level `>= level`. On each of those levels its
	/// endpoints must not yet be connected.
	pub fn make_tree_edge( &mut self, e : Edge, level : usize ) {
		let (v, w) = e.nodes();
		for i in level..self.num_levels {
			debug_assert!( self.comp_representative( v, i ) != self.comp_representative( w, i ) );

			let v_edge = self.active_edges[i][e.v];
			let w_edge = self.active_edges[i][e.w];
			let (new_v, new_w) = self.forests[i].insert_et_edge( v, w, v_edge, w_edge,
				CutSetTracking::new( self.boost, self.lognsqr ),
				CutSetTracking::new( self.boost, self.lognsqr ) );

			self.tree_edges[i][e.v].insert( w, new_v );
			self.tree_edges[i][e.w].insert( v, new_w );

			// A previously inactive endpoint hangs its sketch onto the new edge
			if v_edge.is_none() {
				self.active_edges[i][e.v] = Some( new_v );
				self.forests[i].set_tracking_data( new_v, &self.xor_edge_vectors[i][e.v] );
			}
			if w_edge.is_none() {
				self.active_edges[i][e.w] = Some( new_w );
				self.forests[i].set_tracking_data( new_w, &self.xor_edge_vectors[i][e.w] );
			}
		}
	}

	/// Turns `e` into a non-tree edge on every level on which it is a tree edge.
	pub fn make_non_tree_edge( &mut self, e : Edge ) {
		let (v, w) = e.nodes();
		debug_assert!( self.tree_edges[self.num_levels - 1][e.v].contains( w )
			&& self.tree_edges[self.num_levels - 1][e.w].contains( v ) );

		// Tree edges occupy a contiguous run of top levels
		for i in (0..self.num_levels).rev() {
			if !self.tree_edges[i][e.v].contains( w ) {
				break;
			}
			let edge = self.tree_edges[i][e.v].remove( w ).unwrap();
			let back_edge = self.tree_edges[i][e.w].remove( v ).unwrap();
			self.forests[i].delete_et_edge( edge, back_edge );

			// If either deleted edge was active, its vertex needs a new carrier
			if self.active_edges[i][e.v] == Some( edge ) {
				self.refresh_active_instance( i, e.v );
			}
			if self.active_edges[i][e.w] == Some( back_edge ) {
				self.refresh_active_instance( i, e.w );
			}
		}
	}

	/// Removes `e` from the sketches of its endpoints on all levels, demoting it from tree
	/// edge first if necessary.
	pub fn delete_edge( &mut self, e : Edge ) {
		if self.tree_edges[self.num_levels - 1][e.v].contains( NodeIdx::new( e.w ) ) {
			self.make_non_tree_edge( e );
		}

		// XOR is self-inverse, so adding again removes the edge from every sketch
		self.add_edge_to_set( e );
	}

	/// Looks for an edge leaving the component of `v` on the given level. Candidates are
	/// validated against `adjacency` (one AVL set of neighbors per vertex). If a crossing
	/// edge exists, one is found with probability at least `1 - (7/8)^boost`; `None` may
	/// be returned erroneously otherwise.
	pub fn search( &self, v : NodeIdx, level : usize,
			adjacency : &[AvlTree<NodeIdx, ()>] ) -> Option<Edge>
	{
		let accumulated = match self.active_edges[level][v.index()] {
			None => &self.xor_edge_vectors[level][v.index()],
			Some( active ) => {
				let root = self.forests[level].get_root( active );
				self.forests[level].data( root ).accumulated()
			}
		};

		let v_root = self.comp_representative( v, level );

		for i in 0..self.boost {
			// Scan the rows from sparse to dense
			for j in 0..self.lognsqr {
				let candidate = accumulated[i][j];
				if candidate == Edge::ZERO {
					continue;
				}
				// Trivial invalidity check
				if candidate.v >= self.n || candidate.w >= self.n {
					break;
				}
				let (cv, cw) = candidate.nodes();
				// The edge must be real, with exactly one endpoint in v's component
				if adjacency[candidate.v].contains( cw )
					&& ( ( self.comp_representative( cv, level ) == v_root )
						!= ( self.comp_representative( cw, level ) == v_root ) )
				{
					return Some( candidate );
				}
				break;
			}
		}

		None
	}

	/// A representative of the component of `v` on the given level; identical for all
	/// vertices of the component and stable until a tree edge changes on this level.
	pub fn comp_representative( &self, v : NodeIdx, level : usize ) -> NodeIdx {
		match self.active_edges[level][v.index()] {
			None => v,
			Some( active ) => {
				let root = self.forests[level].get_root( active );
				self.forests[level].endpoints( root ).0
			}
		}
	}

	/// The number of vertices in the component of `v` on the given level.
	pub fn comp_size( &self, v : NodeIdx, level : usize ) -> usize {
		match self.active_edges[level][v.index()] {
			None => 1,
			Some( active ) => self.forests[level].tour_size( active ) / 2 + 1
		}
	}

	/// Picks a new active edge for `v` on `level` after its old one was deleted.
	fn refresh_active_instance( &mut self, level : usize, v : usize ) {
		match self.tree_edges[level][v].any_entry() {
			None => self.active_edges[level][v] = None,
			Some( (_, edge) ) => {
				self.active_edges[level][v] = Some( edge );
				self.forests[level].set_tracking_data( edge, &self.xor_edge_vectors[level][v] );
			}
		}
	}
}


/// The number of sketch rows for `n` vertices: `ceil(2 log2 n) + 1`.
fn lognsqr( n : usize ) -> usize {
	if n == 0 {
		return 0;
	}
	let n2 = n * n;
	let mut n_up2 : usize = 1;
	let mut length = 0;
	while n2 > n_up2 {
		n_up2 *= 2;
		length += 1;
	}
	length + 1
}
