//! Tabular hashing of edges, 3-wise independent.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::Edge;


/// Hashes edges into `[0, n̂²)` where `n̂` is the smallest power of two >= n.
///
/// Each endpoint is cut into blocks of `block_size` bits; every block indexes its own table of
/// random values, and the hash is the XOR of all looked-up values. Lookup tables for the two
/// endpoints are disjoint, which makes the family 3-wise independent on the pair, which is the
/// property the cut-set sampling analysis requires. Fully reproducible from
/// `(n, seed, block_size)`.
pub struct TabularHash {
	block_size : u32,
	block_num : usize,
	one_block : usize,
	hash_blocks : Vec<Vec<usize>>
}

impl TabularHash {
	/// Creates a hash function for a graph with `n` vertices.
	pub fn new( n : usize, seed : u64, block_size : u32 ) -> TabularHash {
		// Smallest power of two with n_up2 >= n^2, and its bit length
		let n2 = n * n;
		let mut n_up2 : usize = 1;
		let mut length : u32 = 0;
		while n2 > n_up2 {
			n_up2 *= 2;
			length += 1;
		}

		let block_num = 2 * ( length as usize ).div_ceil( block_size as usize );
		let one_block = ( 1usize << block_size ) - 1;

		let mut rng = StdRng::seed_from_u64( seed );
		let block_internal_size = 1usize << block_size;
		let hash_blocks = (0..block_num)
			.map( |_| (0..block_internal_size).map( |_| rng.gen::<usize>() % n_up2 ).collect() )
			.collect();

		TabularHash { block_size, block_num, one_block, hash_blocks }
	}

	/// The hash value of `e`, uniform in `[0, n̂²)`.
	pub fn hash( &self, e : Edge ) -> usize {
		let mut res = 0;

		for (endpoint, table_off) in [(e.v, 0), (e.w, self.block_num / 2)] {
			for i in 0..self.block_num / 2 {
				let shift = self.block_size as usize * i;
				let block = ( endpoint >> shift ) & self.one_block;
				res ^= self.hash_blocks[table_off + i][block];
			}
		}

		res
	}
}
