extern crate test;
use self::test::Bencher;

use super::Tree;

#[bench]
fn tree_push_10_000(b: &mut Bencher) {
    b.iter(|| {
        let n = test::black_box(10_000);
        let mut tree = Tree::new();
        for i in 0..n {
            tree.push(i);
        }
        tree
    })
}

#[bench]
fn vec_push_10_000(b: &mut Bencher) {
    b.iter(|| {
        let n = test::black_box(10_000);
        let mut vec = Vec::new();
        for i in 0..n {
            vec.push(i);
        }
        vec
    })
}

#[bench]
fn tree_get_10_000(b: &mut Bencher) {
    let tree: Tree<usize> = (0..10_000).collect();
    b.iter(|| {
        let n = test::black_box(10_000);
        (0..n).fold(0, |sum, i| sum + tree[i])
    })
}

#[bench]
fn vec_get_10_000(b: &mut Bencher) {
    let vec: Vec<usize> = (0..10_000).collect();
    b.iter(|| {
        let n = test::black_box(10_000);
        (0..n).fold(0, |sum, i| sum + vec[i])
    })
}

#[bench]
fn tree_concat_1000(b: &mut Bencher) {
    let left: Tree<usize> = (0..1_000).collect();
    let right: Tree<usize> = (1_000..2_000).collect();
    b.iter(|| {
        let tree = left.clone() + right.clone();
        tree.len()
    })
}

#[bench]
fn vec_concat_1000(b: &mut Bencher) {
    let left: Vec<usize> = (0..1_000).collect();
    let right: Vec<usize> = (1_000..2_000).collect();
    b.iter(|| {
        let mut vec = left.clone();
        vec.extend(right.clone());
        vec.len()
    })
}
