//! A generic AVL-tree map, used throughout the crate as adjacency set and handle index.

/// An ordered map backed by an AVL tree.
///
/// Keys and values are `Copy` (the crate stores vertex indices, levels and node handles in
/// these maps). All operations run in O(log n). Nodes additionally carry subtree sizes, so the
/// map reports its length in O(1).
#[derive(Clone)]
pub struct AvlTree<K : Ord + Copy, V : Copy> {
	root : Option<Box<Node<K, V>>>
}

#[derive(Clone)]
struct Node<K : Ord + Copy, V : Copy> {
	k : K,
	v : V,

	height : u32,
	size : usize,

	left : Option<Box<Node<K, V>>>,
	right : Option<Box<Node<K, V>>>
}

impl<K : Ord + Copy, V : Copy> Node<K, V> {
	fn new( k : K, v : V ) -> Box<Node<K, V>> {
		Box::new( Node { k, v, height : 1, size : 1, left : None, right : None } )
	}

	/// Recomputes height and size from the children.
	fn refresh_subtree_info( &mut self ) {
		self.height = 1 + height( &self.left ).max( height( &self.right ) );
		self.size = 1 + size( &self.left ) + size( &self.right );
	}
}

fn height<K : Ord + Copy, V : Copy>( n : &Option<Box<Node<K, V>>> ) -> u32 {
	n.as_ref().map_or( 0, |x| x.height )
}

fn size<K : Ord + Copy, V : Copy>( n : &Option<Box<Node<K, V>>> ) -> usize {
	n.as_ref().map_or( 0, |x| x.size )
}

/// Single rotation; `left == true` rotates the right child up.
fn rotate<K : Ord + Copy, V : Copy>( mut head : Box<Node<K, V>>, left : bool ) -> Box<Node<K, V>> {
	if left {
		let mut kid = head.right.take().unwrap();
		head.right = kid.left.take();
		head.refresh_subtree_info();
		kid.left = Some( head );
		kid.refresh_subtree_info();
		kid
	}
	else {
		let mut kid = head.left.take().unwrap();
		head.left = kid.right.take();
		head.refresh_subtree_info();
		kid.right = Some( head );
		kid.refresh_subtree_info();
		kid
	}
}

/// Rebalances `head` after an insertion or removal in one of its subtrees.
fn rebalance<K : Ord + Copy, V : Copy>( mut head : Box<Node<K, V>> ) -> Box<Node<K, V>> {
	head.refresh_subtree_info();
	if height( &head.left ) > height( &head.right ) + 1 {
		let l = head.left.as_ref().unwrap();
		if height( &l.right ) > height( &l.left ) {
			head.left = Some( rotate( head.left.take().unwrap(), true ) );
		}
		rotate( head, false )
	}
	else if height( &head.right ) > height( &head.left ) + 1 {
		let r = head.right.as_ref().unwrap();
		if height( &r.left ) > height( &r.right ) {
			head.right = Some( rotate( head.right.take().unwrap(), false ) );
		}
		rotate( head, true )
	}
	else {
		head
	}
}

fn insert_rec<K : Ord + Copy, V : Copy>( n : Option<Box<Node<K, V>>>, k : K, v : V )
		-> (Box<Node<K, V>>, bool)
{
	match n {
		None => ( Node::new( k, v ), true ),
		Some( mut x ) => {
			use std::cmp::Ordering::*;
			let inserted = match k.cmp( &x.k ) {
				Equal => false,
				Less => {
					let (c, i) = insert_rec( x.left.take(), k, v );
					x.left = Some( c );
					i
				},
				Greater => {
					let (c, i) = insert_rec( x.right.take(), k, v );
					x.right = Some( c );
					i
				}
			};
			( rebalance( x ), inserted )
		}
	}
}

/// Detaches the minimum entry of the subtree rooted at `x`.
fn take_min<K : Ord + Copy, V : Copy>( mut x : Box<Node<K, V>> )
		-> (Option<Box<Node<K, V>>>, (K, V))
{
	match x.left.take() {
		None => ( x.right.take(), (x.k, x.v) ),
		Some( l ) => {
			let (rest, min) = take_min( l );
			x.left = rest;
			( Some( rebalance( x ) ), min )
		}
	}
}

fn remove_rec<K : Ord + Copy, V : Copy>( n : Option<Box<Node<K, V>>>, k : K )
		-> (Option<Box<Node<K, V>>>, Option<V>)
{
	match n {
		None => ( None, None ),
		Some( mut x ) => {
			use std::cmp::Ordering::*;
			match k.cmp( &x.k ) {
				Less => {
					let (c, removed) = remove_rec( x.left.take(), k );
					x.left = c;
					( Some( rebalance( x ) ), removed )
				},
				Greater => {
					let (c, removed) = remove_rec( x.right.take(), k );
					x.right = c;
					( Some( rebalance( x ) ), removed )
				},
				Equal => {
					let removed = Some( x.v );
					match ( x.left.take(), x.right.take() ) {
						( None, r ) => ( r, removed ),
						( l, None ) => ( l, removed ),
						( l, Some( r ) ) => {
							// Replace by the in-order successor
							let (rest, (sk, sv)) = take_min( r );
							x.k = sk;
							x.v = sv;
							x.left = l;
							x.right = rest;
							( Some( rebalance( x ) ), removed )
						}
					}
				}
			}
		}
	}
}

impl<K : Ord + Copy, V : Copy> AvlTree<K, V> {
	/// Creates an empty map.
	pub fn new() -> AvlTree<K, V> {
		AvlTree { root : None }
	}

	/// Inserts the pair `(k,v)`. Returns false (and changes nothing) if `k` is already present.
	pub fn insert( &mut self, k : K, v : V ) -> bool {
		let (root, inserted) = insert_rec( self.root.take(), k, v );
		self.root = Some( root );
		inserted
	}

	/// Indicates whether key `k` is present.
	pub fn contains( &self, k : K ) -> bool {
		self.find( k ).is_some()
	}

	/// The value stored under `k`, if any.
	pub fn find( &self, k : K ) -> Option<V> {
		let mut cur = &self.root;
		while let Some( x ) = cur {
			use std::cmp::Ordering::*;
			match k.cmp( &x.k ) {
				Equal => return Some( x.v ),
				Less => cur = &x.left,
				Greater => cur = &x.right
			}
		}
		None
	}

	/// Replaces the value stored under `k`, returning the old value, or `None` if `k` is not
	/// present.
	pub fn change_val( &mut self, k : K, v : V ) -> Option<V> {
		let mut cur = &mut self.root;
		while let Some( x ) = cur {
			use std::cmp::Ordering::*;
			match k.cmp( &x.k ) {
				Equal => {
					let old = x.v;
					x.v = v;
					return Some( old );
				},
				Less => cur = &mut x.left,
				Greater => cur = &mut x.right
			}
		}
		None
	}

	/// Removes the pair with key `k` and returns its value, or `None` if `k` is not present.
	pub fn remove( &mut self, k : K ) -> Option<V> {
		let (root, removed) = remove_rec( self.root.take(), k );
		self.root = root;
		removed
	}

	/// Some entry of the map, or `None` if it is empty. Which entry is unspecified but
	/// deterministic for a given tree shape.
	pub fn any_entry( &self ) -> Option<(K, V)> {
		self.root.as_ref().map( |x| (x.k, x.v) )
	}

	/// All entries in increasing key order.
	pub fn sorted( &self ) -> Vec<(K, V)> {
		fn walk<K : Ord + Copy, V : Copy>( n : &Option<Box<Node<K, V>>>, out : &mut Vec<(K, V)> ) {
			if let Some( x ) = n {
				walk( &x.left, out );
				out.push( (x.k, x.v) );
				walk( &x.right, out );
			}
		}
		let mut out = Vec::with_capacity( self.len() );
		walk( &self.root, &mut out );
		out
	}

	/// Indicates whether the map is empty.
	pub fn is_empty( &self ) -> bool {
		self.root.is_none()
	}

	/// The number of entries.
	pub fn len( &self ) -> usize {
		size( &self.root )
	}
}

impl<K : Ord + Copy, V : Copy> Default for AvlTree<K, V> {
	fn default() -> Self {
		AvlTree::new()
	}
}
