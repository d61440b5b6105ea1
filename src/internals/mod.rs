use std::fmt;

use self::Node::*;


pub mod rebalance;

/// Maximum number of children in a branch and of elements in a leaf.
///
/// Must be a power of two so that a radix digit of an index is a shift and
/// a mask. The default of 4 keeps even small trees more than one level
/// tall; the `wide` feature selects the production fanout.
#[cfg(not(feature = "wide"))]
pub const BRANCH_FACTOR: usize = 4;

#[cfg(feature = "wide")]
pub const BRANCH_FACTOR: usize = 32;

/// log₂ of `BRANCH_FACTOR`: the width of one radix digit.
#[cfg(not(feature = "wide"))]
pub const SHIFT_BITS: usize = 2;

#[cfg(feature = "wide")]
pub const SHIFT_BITS: usize = 5;

pub const SHIFT_MASK: usize = BRANCH_FACTOR - 1;

/// How much structural slack a sibling run may carry before concatenation
/// rebalances it: the average number of probe steps tolerated after the
/// radix shift. At 0 the tree degenerates into a strict radix trie and
/// every concatenation compacts.
pub const COMPACTNESS_BOUND: isize = 1;

/// Extract the radix digit of `index` for a branch at `height`.
#[inline]
pub fn shift_index(index: usize, height: usize) -> usize {
    (index >> (SHIFT_BITS * height)) & SHIFT_MASK
}

/// A `Node` in the `Tree`.
///
/// A `Node` is either a `Leaf` holding elements, or a `Branch` holding up
/// to `BRANCH_FACTOR` children of the height one below it. Nodes do not
/// record their own height; descents carry it as a parameter.
#[derive(Clone)]
pub enum Node<T> {
    /// A leaf node
    Leaf(LeafNode<T>)
  , /// An interior node
    Branch(BranchNode<T>)
}

/// A fixed-capacity buffer of elements at the bottom of the tree.
#[derive(Clone)]
pub struct LeafNode<T> {
    slots: Vec<T>
}

/// An interior node.
///
/// The size table makes relaxed radix indexing possible: entry `i` is the
/// number of elements stored at or before child `i`, so a descent can
/// correct the radix guess with a short linear probe instead of walking
/// every sibling.
#[derive(Clone)]
pub struct BranchNode<T> {
    /// Child nodes, uniformly one level below this branch
    slots: Vec<Node<T>>
  , /// Prefix sums of the elements under each child; strictly increasing
    size_table: Vec<usize>
}

impl<T> Node<T> {

    /// Returns a new empty node for the given height: a leaf at height 0,
    /// a branch above it.
    #[inline]
    pub fn new(height: usize) -> Self {
        if height == 0 { Leaf(LeafNode::new()) }
        else { Branch(BranchNode::new()) }
    }

    /// Returns the number of elements stored in this subtree.
    #[inline]
    pub fn len(&self) -> usize {
        match *self { Leaf(ref leaf) => leaf.len()
                    , Branch(ref branch) => branch.total() }
    }

    /// Returns the number of occupied slots in this node.
    ///
    /// For a leaf this is the element count; for a branch it is the child
    /// count, *not* the element count.
    #[inline]
    pub fn occupancy(&self) -> usize {
        match *self { Leaf(ref leaf) => leaf.len()
                    , Branch(ref branch) => branch.len() }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupancy() == BRANCH_FACTOR
    }

    /// Try to append `value` to the rightmost leaf under this node.
    ///
    /// # Returns
    /// - `Ok` if a slot was found for `value`
    /// - `Err` handing `value` back if every slot on the right spine is
    ///   occupied; the caller is expected to grow the tree and retry
    pub fn push(&mut self, height: usize, value: T) -> Result<(), T> {
        match *self { Leaf(ref mut leaf) => leaf.push(value)
                    , Branch(ref mut branch) => branch.push(height, value) }
    }

    /// Borrow the element at `index`, which must be in bounds.
    pub fn get(&self, height: usize, index: usize) -> &T {
        match *self { Leaf(ref leaf) => leaf.get(index)
                    , Branch(ref branch) => branch.get(height, index) }
    }

    /// Mutably borrow the element at `index`, which must be in bounds.
    pub fn get_mut(&mut self, height: usize, index: usize) -> &mut T {
        match *self { Leaf(ref mut leaf) => leaf.get_mut(index)
                    , Branch(ref mut branch) => branch.get_mut(height, index) }
    }
}

impl<T> LeafNode<T> {

    #[inline]
    pub fn new() -> Self {
        LeafNode { slots: Vec::with_capacity(BRANCH_FACTOR) }
    }

    #[inline] pub fn len(&self) -> usize { self.slots.len() }

    #[inline] pub fn is_full(&self) -> bool { self.slots.len() == BRANCH_FACTOR }

    /// Append `value` to the first free slot, or hand it back in the `Err`
    /// if the leaf is full.
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            Err(value)
        } else {
            self.slots.push(value);
            Ok(())
        }
    }

    #[inline] pub fn get(&self, index: usize) -> &T { &self.slots[index] }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        &mut self.slots[index]
    }

    /// Consume the leaf, yielding its elements in order.
    #[inline] pub fn into_slots(self) -> Vec<T> { self.slots }
}

impl<T> BranchNode<T> {

    #[inline]
    pub fn new() -> Self {
        BranchNode { slots: Vec::with_capacity(BRANCH_FACTOR)
                   , size_table: Vec::with_capacity(BRANCH_FACTOR) }
    }

    /// Returns the number of occupied child slots.
    #[inline] pub fn len(&self) -> usize { self.slots.len() }

    #[inline] pub fn is_full(&self) -> bool { self.slots.len() == BRANCH_FACTOR }

    /// Returns the number of elements at or below this branch.
    #[inline]
    pub fn total(&self) -> usize {
        self.size_table.last().cloned().unwrap_or(0)
    }

    /// Try to append `value` somewhere under the rightmost spine.
    ///
    /// Delegates to the last child first; when that child has no room and
    /// a slot is free here, a fresh subtree is grown to hold the value.
    ///
    /// # Returns
    /// - `Ok` if a slot was found; the size table entry for the accepting
    ///   child is bumped by one
    /// - `Err` handing `value` back if this branch and its last child are
    ///   both full
    pub fn push(&mut self, height: usize, value: T) -> Result<(), T> {
        let value = match self.slots.last_mut() {
            Some(last) => match last.push(height - 1, value) {
                Ok(()) => {
                    let last_size = self.size_table.last_mut()
                        .expect("a branch with children has size table entries");
                    *last_size += 1;
                    return Ok(());
                }
              , Err(value) => value
            }
          , None => value
        };

        if self.is_full() {
            return Err(value);
        }

        let mut child = Node::new(height - 1);
        match child.push(height - 1, value) {
            Ok(()) => {}
          , Err(_) => unreachable!("a fresh node always accepts one element")
        }
        let total = self.total();
        self.slots.push(child);
        self.size_table.push(total + 1);
        Ok(())
    }

    /// Append an already-built child, extending the size table by the
    /// child's element count.
    ///
    /// The child must have the height one below this branch.
    ///
    /// # Panics
    /// * If every child slot is already occupied
    pub fn push_child(&mut self, child: Node<T>) {
        assert!( self.slots.len() < BRANCH_FACTOR
               , "BranchNode::push_child: all {} slots occupied"
               , BRANCH_FACTOR);
        let total = self.total();
        self.size_table.push(total + child.len());
        self.slots.push(child);
    }

    /// Find the child slot holding `index`, and the index to hand down to
    /// that child.
    ///
    /// The radix guess is exact in a fully packed tree; when earlier
    /// siblings run short of full, the true slot lies to the right of the
    /// guess and the size table is probed forward to find it. An index
    /// equal to a prefix sum belongs to the *next* slot.
    #[inline]
    fn slot_for(&self, height: usize, index: usize) -> (usize, usize) {
        let mut slot = shift_index(index, height);
        while index >= self.size_table[slot] {
            slot += 1;
        }
        if slot == 0 { (slot, index) }
        else { (slot, index - self.size_table[slot - 1]) }
    }

    pub fn get(&self, height: usize, index: usize) -> &T {
        let (slot, index) = self.slot_for(height, index);
        self.slots[slot].get(height - 1, index)
    }

    pub fn get_mut(&mut self, height: usize, index: usize) -> &mut T {
        let (slot, index) = self.slot_for(height, index);
        self.slots[slot].get_mut(height - 1, index)
    }

    /// Consume the branch, yielding its children in order.
    #[inline] pub fn into_slots(self) -> Vec<Node<T>> { self.slots }
}

#[cfg(test)]
impl<T> Node<T> {
    /// Walk the subtree asserting every structural invariant, returning
    /// the number of elements found.
    pub fn check_structure(&self, height: usize) -> usize {
        match *self {
            Leaf(ref leaf) => {
                assert_eq!(height, 0, "leaf above the bottom level");
                assert!(leaf.len() <= BRANCH_FACTOR);
                leaf.len()
            }
          , Branch(ref branch) => {
                assert!(height > 0, "branch at the leaf level");
                assert!(branch.len() > 0, "empty branch in a rooted tree");
                assert_eq!(branch.slots.len(), branch.size_table.len());

                let mut prefix = 0;
                let mut occupancy = 0;
                for (i, child) in branch.slots.iter().enumerate() {
                    let len = child.check_structure(height - 1);
                    assert!(len > 0, "empty child in a rooted tree");
                    assert_eq!( branch.size_table[i], prefix + len
                              , "size table entry {} is not the prefix sum", i);
                    prefix += len;
                    occupancy += child.occupancy();
                }

                let slack = rebalance::compactness(branch.len(), occupancy);
                assert!( slack <= COMPACTNESS_BOUND
                       , "branch slack {} exceeds the compactness bound", slack);
                branch.total()
            }
        }
    }
}

impl<T> fmt::Debug for Node<T>
where T: fmt::Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self { Leaf(ref leaf) => leaf.fmt(f)
                    , Branch(ref branch) => branch.fmt(f) }
    }
}

impl<T> fmt::Debug for LeafNode<T>
where T: fmt::Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.slots.fmt(f)
    }
}

impl<T> fmt::Debug for BranchNode<T>
where T: fmt::Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}{:?}", self.size_table, self.slots)
    }
}
