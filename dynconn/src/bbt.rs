//! A globally biased binary *search* tree: the keyed sibling of [bbf](crate::bbf).
//!
//! Stores an ordered set of key-value pairs where every pair carries a positive weight; a pair
//! of weight `w` is found in O(log(W/w)) time in a tree of total weight `W`. Internal nodes
//! carry the minimum key of their right subtree, so descents are ordinary binary search.
//! [Link-cut trees](crate::link_cut) keep the dashed child paths of every vertex in one of
//! these, keyed by `(path weight, end vertex)`, which is what makes their worst-case O(log n)
//! bound go through.
//!
//! Mutations are built from keyed splits and the same join machinery as the unkeyed forest
//! (local joins inside splits, globally biased joins to reassemble).

/// An ordered map with weighted entries, stored as a globally biased binary tree.
pub struct BiasedBinaryTree<K : Ord + Copy, V : Copy> {
	root : Option<Box<Node<K, V>>>
}

struct Node<K : Ord + Copy, V : Copy> {
	/// For leaves the entry key, for internal nodes the minimum key of the right subtree.
	key : K,
	/// The minimum key in this subtree.
	min_key : K,
	/// `Some` exactly for leaves.
	val : Option<V>,

	weight : usize,
	rank : u32,

	left : Option<Box<Node<K, V>>>,
	right : Option<Box<Node<K, V>>>
}

type BoxNode<K, V> = Box<Node<K, V>>;

impl<K : Ord + Copy, V : Copy> Node<K, V> {
	fn new_leaf( k : K, v : V, weight : usize ) -> BoxNode<K, V> {
		debug_assert!( weight > 0 );
		Box::new( Node {
			key : k, min_key : k, val : Some( v ),
			weight, rank : weight.ilog2(),
			left : None, right : None
		} )
	}

	fn is_leaf( &self ) -> bool {
		self.val.is_some()
	}
}

/// Detaches both children of an internal node, returning `(left, right, shell)`. The shell
/// keeps its rank.
fn separate_children<K : Ord + Copy, V : Copy>( mut x : BoxNode<K, V> )
		-> (BoxNode<K, V>, BoxNode<K, V>, BoxNode<K, V>)
{
	debug_assert!( !x.is_leaf() );
	let l = x.left.take().unwrap();
	let r = x.right.take().unwrap();
	( l, r, x )
}

/// Attaches two trees to a recycled internal shell and refreshes its weight and keys. The
/// rank is the caller's business.
fn attach_children<K : Ord + Copy, V : Copy>( l : BoxNode<K, V>, mut x : BoxNode<K, V>, r : BoxNode<K, V> )
		-> BoxNode<K, V>
{
	x.val = None;
	x.weight = l.weight + r.weight;
	x.key = r.min_key;
	x.min_key = l.min_key;
	x.left = Some( l );
	x.right = Some( r );
	x
}

/// Tilts the root so that it and its `!left` child have different ranks; may promote the root.
fn tilt<K : Ord + Copy, V : Copy>( mut x : BoxNode<K, V>, left : bool ) -> BoxNode<K, V> {
	debug_assert!( !x.is_leaf() );
	let (inner, outer) = if left {
		( x.left.as_ref().unwrap(), x.right.as_ref().unwrap() )
	}
	else {
		( x.right.as_ref().unwrap(), x.left.as_ref().unwrap() )
	};

	if x.rank != outer.rank {
		x
	}
	else if x.rank == inner.rank {
		x.rank += 1;
		x
	}
	else {
		rotate( x, left )
	}
}

/// Classic single rotation; `left == true` rotates the right child up. Ranks travel with
/// their shells.
fn rotate<K : Ord + Copy, V : Copy>( x : BoxNode<K, V>, left : bool ) -> BoxNode<K, V> {
	if left {
		let (l, r, shell) = separate_children( x );
		let (rl, rr, r_shell) = separate_children( r );
		let lower = attach_children( l, shell, rl );
		attach_children( lower, r_shell, rr )
	}
	else {
		let (l, r, shell) = separate_children( x );
		let (ll, lr, l_shell) = separate_children( l );
		let lower = attach_children( lr, shell, r );
		attach_children( ll, l_shell, lower )
	}
}

/// Join without global-bias rank promotion; used to reassemble the fragments of a split.
fn local_join<K : Ord + Copy, V : Copy>( t1 : BoxNode<K, V>, t2 : BoxNode<K, V>, mut conn : BoxNode<K, V> )
		-> BoxNode<K, V>
{
	let (r1, r2) = ( t1.rank, t2.rank );
	if r1 == r2 || ( r1 >= r2 && t1.is_leaf() ) || ( r2 >= r1 && t2.is_leaf() ) {
		conn.rank = r1.max( r2 ) + 1;
		attach_children( t1, conn, t2 )
	}
	else if r1 > r2 {
		let t1 = tilt( t1, true );
		let (l, r, shell) = separate_children( t1 );
		let z = local_join( r, t2, conn );
		attach_children( l, shell, z )
	}
	else {
		let t2 = tilt( t2, false );
		let (l, r, shell) = separate_children( t2 );
		let z = local_join( t1, l, conn );
		attach_children( z, shell, r )
	}
}

/// Globally biased join of two trees, allocating connector shells as needed.
fn global_join<K : Ord + Copy, V : Copy>( t1 : BoxNode<K, V>, t2 : BoxNode<K, V> ) -> BoxNode<K, V> {
	let (r1, r2) = ( t1.rank, t2.rank );

	if ( t1.is_leaf() && r1 >= r2 ) || ( t2.is_leaf() && r2 >= r1 ) {
		// Case 1: the place where the seam truly belongs
		let shell = Box::new( Node {
			key : t1.min_key, min_key : t1.min_key, val : None,
			weight : 0, rank : r1.max( r2 ) + 1,
			left : None, right : None
		} );
		attach_children( t1, shell, t2 )
	}
	else if r1 > r2 {
		// Case 2
		let t1 = tilt( t1, true );
		let (l, r, shell) = separate_children( t1 );
		let z = global_join( r, t2 );
		attach_children( l, shell, z )
	}
	else if r2 > r1 {
		// Case 3
		let t2 = tilt( t2, false );
		let (l, r, shell) = separate_children( t2 );
		let z = global_join( t1, l );
		attach_children( z, shell, r )
	}
	else {
		global_join_case4( t1, t2 )
	}
}

fn global_join_case4<K : Ord + Copy, V : Copy>( t1 : BoxNode<K, V>, t2 : BoxNode<K, V> ) -> BoxNode<K, V> {
	let rank = t1.rank;
	debug_assert!( rank == t2.rank && !t1.is_leaf() && !t2.is_leaf() );

	let (t1_l, t1_r, t1_shell) = separate_children( t1 );
	let (t2_l, t2_r, t2_shell) = separate_children( t2 );

	// u is the rightmost node of rank `rank` in t1, v the leftmost in t2; both are at depth
	// at most 1. The shells keep their ranks, so position is tracked by (is u t1?) flags.
	let u_is_t1 = t1_r.rank != rank;
	let v_is_t2 = t2_l.rank != rank;

	if u_is_t1 && v_is_t2 {
		let z = global_join( t1_r, t2_l );
		if z.rank == rank {
			// Case 4 a) with u = t1, v = t2
			let (z_l, z_r, mut z_shell) = separate_children( z );
			let left = attach_children( t1_l, t1_shell, z_l );
			let right = attach_children( z_r, t2_shell, t2_r );
			z_shell.rank = rank + 1;
			attach_children( left, z_shell, right )
		}
		else if t1_l.rank == rank {
			// Case 4 b) iii
			let right = attach_children( z, t2_shell, t2_r );
			let mut t1_shell = t1_shell;
			t1_shell.rank = rank + 1;
			attach_children( t1_l, t1_shell, right )
		}
		else if t2_r.rank == rank {
			// Case 4 b) iv
			let left = attach_children( t1_l, t1_shell, z );
			let mut t2_shell = t2_shell;
			t2_shell.rank = rank + 1;
			attach_children( left, t2_shell, t2_r )
		}
		else {
			// Case 4 b) v
			let right = attach_children( z, t2_shell, t2_r );
			attach_children( t1_l, t1_shell, right )
		}
	}
	else if !u_is_t1 {
		// u = right child of t1
		let (u_l, u_r, u_shell) = separate_children( t1_r );
		if v_is_t2 {
			let z = global_join( u_r, t2_l );
			if z.rank == rank {
				// Case 4 a) with u below t1
				let (z_l, z_r, mut z_shell) = separate_children( z );
				let u = attach_children( u_l, u_shell, z_l );
				let left = attach_children( t1_l, t1_shell, u );
				let right = attach_children( z_r, t2_shell, t2_r );
				z_shell.rank = rank + 1;
				attach_children( left, z_shell, right )
			}
			else {
				// Case 4 b) i
				let left = attach_children( t1_l, t1_shell, u_l );
				let right = attach_children( z, t2_shell, t2_r );
				let mut u_shell = u_shell;
				u_shell.rank = rank + 1;
				attach_children( left, u_shell, right )
			}
		}
		else {
			let (v_l, v_r, v_shell) = separate_children( t2_l );
			let z = global_join( u_r, v_l );
			if z.rank == rank {
				// Case 4 a), both u and v one level down
				let (z_l, z_r, mut z_shell) = separate_children( z );
				let u = attach_children( u_l, u_shell, z_l );
				let v = attach_children( z_r, v_shell, v_r );
				let left = attach_children( t1_l, t1_shell, u );
				let right = attach_children( v, t2_shell, t2_r );
				z_shell.rank = rank + 1;
				attach_children( left, z_shell, right )
			}
			else {
				// Case 4 b) i
				let left = attach_children( t1_l, t1_shell, u_l );
				let v = attach_children( z, v_shell, v_r );
				let right = attach_children( v, t2_shell, t2_r );
				let mut u_shell = u_shell;
				u_shell.rank = rank + 1;
				attach_children( left, u_shell, right )
			}
		}
	}
	else {
		// u = t1, v = left child of t2
		let (v_l, v_r, v_shell) = separate_children( t2_l );
		let z = global_join( t1_r, v_l );
		if z.rank == rank {
			// Case 4 a) with v below t2
			let (z_l, z_r, mut z_shell) = separate_children( z );
			let left = attach_children( t1_l, t1_shell, z_l );
			let v = attach_children( z_r, v_shell, v_r );
			let right = attach_children( v, t2_shell, t2_r );
			z_shell.rank = rank + 1;
			attach_children( left, z_shell, right )
		}
		else {
			// Case 4 b) ii
			let right = attach_children( v_r, t2_shell, t2_r );
			let left = attach_children( t1_l, t1_shell, z );
			let mut v_shell = v_shell;
			v_shell.rank = rank + 1;
			attach_children( left, v_shell, right )
		}
	}
}

/// Splits at key `k`: everything strictly before, the entry with key `k` if present, and
/// everything strictly after. The fragments on each side are reassembled with local joins.
fn split_rec<K : Ord + Copy, V : Copy>( t : BoxNode<K, V>, k : K )
		-> (Option<BoxNode<K, V>>, Option<BoxNode<K, V>>, Option<BoxNode<K, V>>)
{
	if t.is_leaf() {
		use std::cmp::Ordering::*;
		return match k.cmp( &t.key ) {
			Equal => ( None, Some( t ), None ),
			Less => ( None, None, Some( t ) ),
			Greater => ( Some( t ), None, None )
		};
	}

	let (l, r, shell) = separate_children( t );
	if k < shell.key {
		let (a, f, b) = split_rec( l, k );
		let right = match b {
			Some( b ) => Some( local_join( b, r, shell ) ),
			None => Some( r )
		};
		( a, f, right )
	}
	else {
		let (a, f, b) = split_rec( r, k );
		let left = match a {
			Some( a ) => Some( local_join( l, a, shell ) ),
			None => Some( l )
		};
		( left, f, b )
	}
}


impl<K : Ord + Copy, V : Copy> BiasedBinaryTree<K, V> {
	/// Creates an empty tree.
	pub fn new() -> BiasedBinaryTree<K, V> {
		BiasedBinaryTree { root : None }
	}

	/// Indicates whether the tree is empty.
	pub fn is_empty( &self ) -> bool {
		self.root.is_none()
	}

	/// The sum of all entry weights.
	pub fn get_weight_sum( &self ) -> usize {
		self.root.as_ref().map_or( 0, |r| r.weight )
	}

	/// Inserts the entry `(k,v)` with the given positive weight. The key must not be present.
	pub fn insert( &mut self, k : K, v : V, weight : usize ) {
		match self.root.take() {
			None => self.root = Some( Node::new_leaf( k, v, weight ) ),
			Some( root ) => {
				let (l, found, r) = split_rec( root, k );
				debug_assert!( found.is_none(), "duplicate key" );
				let mut t = Node::new_leaf( k, v, weight );
				if let Some( l ) = l {
					t = global_join( l, t );
				}
				if let Some( r ) = r {
					t = global_join( t, r );
				}
				self.root = Some( t );
			}
		}
	}

	/// Removes the entry with key `k` and returns its value, if present.
	pub fn remove( &mut self, k : K ) -> Option<V> {
		let root = self.root.take()?;
		let (l, found, r) = split_rec( root, k );
		self.root = match ( l, r ) {
			( Some( l ), Some( r ) ) => Some( global_join( l, r ) ),
			( Some( t ), None ) | ( None, Some( t ) ) => Some( t ),
			( None, None ) => None
		};
		found.map( |leaf| leaf.val.unwrap() )
	}

	/// Indicates whether key `k` is present.
	pub fn contains( &self, k : K ) -> bool {
		self.find( k ).is_some()
	}

	/// The value stored under `k`, if present.
	pub fn find( &self, k : K ) -> Option<V> {
		let mut cur = self.root.as_ref()?;
		while !cur.is_leaf() {
			cur = if k < cur.key {
				cur.left.as_ref().unwrap()
			}
			else {
				cur.right.as_ref().unwrap()
			};
		}
		if cur.key == k {
			cur.val
		}
		else {
			None
		}
	}

	/// Replaces the value stored under `k`, returning the old value, if present.
	pub fn change_val( &mut self, k : K, v : V ) -> Option<V> {
		let mut cur = self.root.as_mut()?;
		while !cur.is_leaf() {
			cur = if k < cur.key {
				cur.left.as_mut().unwrap()
			}
			else {
				cur.right.as_mut().unwrap()
			};
		}
		if cur.key == k {
			cur.val.replace( v )
		}
		else {
			None
		}
	}

	/// The entry with the minimum key, if any.
	pub fn get_min( &self ) -> Option<(K, V)> {
		let mut cur = self.root.as_ref()?;
		while let Some( l ) = &cur.left {
			cur = l;
		}
		Some( ( cur.key, cur.val.unwrap() ) )
	}

	/// The entry with the maximum key, if any.
	pub fn get_max( &self ) -> Option<(K, V)> {
		let mut cur = self.root.as_ref()?;
		while let Some( r ) = &cur.right {
			cur = r;
		}
		Some( ( cur.key, cur.val.unwrap() ) )
	}

	/// All entries with their weights, in increasing key order.
	pub fn sorted( &self ) -> Vec<(K, V, usize)> {
		fn walk<K : Ord + Copy, V : Copy>( n : &BoxNode<K, V>, out : &mut Vec<(K, V, usize)> ) {
			if n.is_leaf() {
				out.push( ( n.key, n.val.unwrap(), n.weight ) );
			}
			else {
				walk( n.left.as_ref().unwrap(), out );
				walk( n.right.as_ref().unwrap(), out );
			}
		}
		let mut out = vec![];
		if let Some( r ) = &self.root {
			walk( r, &mut out );
		}
		out
	}
}

impl<K : Ord + Copy, V : Copy> Default for BiasedBinaryTree<K, V> {
	fn default() -> Self {
		BiasedBinaryTree::new()
	}
}
