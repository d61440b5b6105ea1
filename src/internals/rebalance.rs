//! Rebalancing for concatenation.
//!
//! Concatenating two trees lines the children of both roots up as one
//! sibling run. The run usually carries more slack than the compactness
//! bound allows, because the right edge of the left tree and the left edge
//! of the right tree (the *seam*) may both end in partially filled nodes.
//! The kernel here measures that slack ([`compactness`]), squashes the
//! smallest window of siblings that recovers it ([`merge`]), and leaves
//! everything away from the seam untouched.

use std::mem;

use super::{Node, BranchNode, LeafNode, BRANCH_FACTOR, COMPACTNESS_BOUND};
use super::Node::*;

/// Structural slack of a run of `nodes` siblings holding `slots` occupied
/// slots between them: how many more nodes the run spans than a fully
/// packed run holding the same slots would.
///
/// A slack of 0 is strict radix balance. Concatenation tolerates up to
/// `COMPACTNESS_BOUND` and rebalances anything past it.
#[inline]
pub fn compactness(nodes: usize, slots: usize) -> isize {
    debug_assert!(slots > 0);
    nodes as isize - ((slots - 1) / BRANCH_FACTOR) as isize - 1
}

/// Merge the children of two roots of equal `height`, producing the root
/// of the combined tree and the combined tree's height.
///
/// The children are rebalanced as one sibling run, then repacked into a
/// single branch when they fit, or split across two branches under a new
/// root level when they don't.
pub fn concat<T>(left: BranchNode<T>, right: BranchNode<T>, height: usize)
                 -> (Node<T>, usize) {
    let mut children = left.into_slots();
    children.extend(right.into_slots());
    let mut children = rebalance(children, height);

    if children.len() <= BRANCH_FACTOR {
        (Branch(pack(children)), height)
    } else {
        // the left branch takes a full complement; the remainder (at most
        // a full complement itself) goes right
        let tail = children.split_off(BRANCH_FACTOR);
        let mut root = BranchNode::new();
        root.push_child(Branch(pack(children)));
        root.push_child(Branch(pack(tail)));
        (Branch(root), height + 1)
    }
}

/// Build a branch over a run of children, one `push_child` at a time.
fn pack<T>(children: Vec<Node<T>>) -> BranchNode<T> {
    let mut branch = BranchNode::new();
    for child in children {
        branch.push_child(child);
    }
    branch
}

/// Bring a run of siblings (the children of a branch at `height`) within
/// the compactness bound, merging as many times as it takes.
///
/// One merge pass is the common case. Squashing a window of branches can
/// shrink occupancies below the window estimate, so the slack is measured
/// again after each pass.
pub fn rebalance<T>(mut children: Vec<Node<T>>, height: usize) -> Vec<Node<T>> {
    loop {
        let slots: usize = children.iter().map(Node::occupancy).sum();
        let excess = compactness(children.len(), slots) - COMPACTNESS_BOUND;
        if excess <= 0 {
            return children;
        }
        children = merge(children, excess as usize, height);
    }
}

/// Reduce a sibling run by `to_remove` nodes.
///
/// Fully packed children keep their identity. From the first child with
/// free slots, a window grows one sibling at a time until squashing it
/// yields the required reduction; the window is squashed and the tail is
/// carried over unchanged.
fn merge<T>(src: Vec<Node<T>>, to_remove: usize, height: usize) -> Vec<Node<T>> {
    let src_len = src.len();
    let mut merged = Vec::with_capacity(src_len - to_remove);
    let mut src = src.into_iter().peekable();

    while src.peek().map_or(false, |node| node.is_full()) {
        merged.push(src.next().expect("peeked a full node"));
    }

    let rest: Vec<Node<T>> = src.collect();
    debug_assert!(rest.len() >= 2, "excess slack requires two non-full nodes");

    // grow the window until its squashed form is small enough:
    //     ceil(selected slots / branch factor) <= selected - to_remove
    let mut selected = 2;
    let mut selected_slots = rest[0].occupancy();
    loop {
        debug_assert!(selected <= rest.len());
        selected_slots += rest[selected - 1].occupancy();
        let squashed = (selected_slots - 1) / BRANCH_FACTOR + 1;
        if squashed + to_remove <= selected {
            break;
        }
        selected += 1;
    }

    let mut rest = rest.into_iter();
    squash(rest.by_ref().take(selected).collect(), height, &mut merged);
    merged.extend(rest);

    debug_assert!(merged.len() <= src_len - to_remove);
    merged
}

/// Pack the contents of a sibling run into the minimum number of fresh
/// nodes, preserving order, and push them onto `dst`.
fn squash<T>(src: Vec<Node<T>>, height: usize, dst: &mut Vec<Node<T>>) {
    if height == 1 {
        squash_leafs(src, dst)
    } else {
        squash_branches(src, height, dst)
    }
}

/// Repack the elements of a run of leaves into fully packed fresh leaves,
/// except possibly the last.
fn squash_leafs<T>(src: Vec<Node<T>>, dst: &mut Vec<Node<T>>) {
    let mut leaf = LeafNode::new();
    for node in src {
        let slots = match node {
            Leaf(source) => source.into_slots()
          , Branch(_) => unreachable!("a branch at height 1 holds only leaves")
        };
        for value in slots {
            if let Err(value) = leaf.push(value) {
                dst.push(Leaf(mem::replace(&mut leaf, LeafNode::new())));
                match leaf.push(value) {
                    Ok(()) => {}
                  , Err(_) => unreachable!("a fresh leaf always accepts one element")
                }
            }
        }
    }
    if leaf.len() > 0 {
        dst.push(Leaf(leaf));
    }
}

/// The branch-kind mirror of [`squash_leafs`]: the children of the run's
/// branches are the things being repacked.
///
/// The pooled children straddle the seam between the two concatenated
/// trees, so the pool is rebalanced one level down before being repacked
/// into branches; `push_child` rebuilds the size tables as it goes.
fn squash_branches<T>(src: Vec<Node<T>>, height: usize, dst: &mut Vec<Node<T>>) {
    let mut pool = Vec::new();
    for node in src {
        match node {
            Branch(branch) => pool.extend(branch.into_slots())
          , Leaf(_) => unreachable!("a leaf cannot appear above height 1")
        }
    }
    let pool = rebalance(pool, height - 1);

    let mut branch = BranchNode::new();
    for child in pool {
        if branch.is_full() {
            dst.push(Branch(mem::replace(&mut branch, BranchNode::new())));
        }
        branch.push_child(child);
    }
    if branch.len() > 0 {
        dst.push(Branch(branch));
    }
}
