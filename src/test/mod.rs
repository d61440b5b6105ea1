use super::Tree;

/// The first hundred primes.
const PRIMES: [u32; 100] =
    [  2,   3,   5,   7,  11,  13,  17,  19,  23,  29,
      31,  37,  41,  43,  47,  53,  59,  61,  67,  71,
      73,  79,  83,  89,  97, 101, 103, 107, 109, 113,
     127, 131, 137, 139, 149, 151, 157, 163, 167, 173,
     179, 181, 191, 193, 197, 199, 211, 223, 227, 229,
     233, 239, 241, 251, 257, 263, 269, 271, 277, 281,
     283, 293, 307, 311, 313, 317, 331, 337, 347, 349,
     353, 359, 367, 373, 379, 383, 389, 397, 401, 409,
     419, 421, 431, 433, 439, 443, 449, 457, 461, 463,
     467, 479, 487, 491, 499, 503, 509, 521, 523, 541 ];

#[test]
fn push_test_1() {
    let mut tree = Tree::new();
    for &prime in PRIMES[..20].iter() {
        tree.push(prime);
    }
    assert_eq!(tree.len(), 20);
    for i in 0..20 {
        assert_eq!(tree[i], PRIMES[i]);
    }
    tree.check_structure();
}

#[cfg(not(feature = "wide"))]
#[test]
fn push_test_2() {
    // twenty elements over four-wide leaves stand two levels tall
    let tree: Tree<u32> = PRIMES[..20].iter().cloned().collect();
    assert_eq!(tree.height(), 2);
}

#[test]
fn push_test_3() {
    let mut tree: Tree<u32> = PRIMES.iter().cloned().collect();
    assert_eq!(tree.len(), 100);
    tree.push(547);
    assert_eq!(tree.len(), 101);
    assert_eq!(tree[100], 547);
    tree.check_structure();
}

#[test]
fn get_test_1() {
    let tree: Tree<u32> = PRIMES.iter().cloned().collect();
    assert_eq!(tree.get(0), Some(&2));
    assert_eq!(tree.get(99), Some(&541));
    assert_eq!(tree.get(100), None);
}

#[test]
fn get_test_2() {
    let tree: Tree<u32> = Tree::new();
    assert_eq!(tree.get(0), None);
}

#[test]
fn set_test_1() {
    let mut tree: Tree<u32> = PRIMES.iter().cloned().collect();
    assert_eq!(tree[77], PRIMES[77]);
    let previous = tree.set(77, 77);
    assert_eq!(previous, PRIMES[77]);
    assert_eq!(tree[77], 77);
    for i in (0..100).filter(|&i| i != 77) {
        assert_eq!(tree[i], PRIMES[i]);
    }
    tree.check_structure();
}

#[test]
#[should_panic(expected = "out of bounds")]
fn set_test_2() {
    let mut tree: Tree<u32> = (0..10).collect();
    tree.set(10, 0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn index_test_1() {
    let tree: Tree<u32> = Tree::new();
    let _ = &tree[0];
}

#[test]
fn index_mut_test_1() {
    let mut tree: Tree<u32> = (0..10).collect();
    tree[3] += 30;
    assert_eq!(tree[3], 33);
}

#[test]
fn concat_test_1() {
    // two empty trees make an empty tree
    let left: Tree<u32> = Tree::new();
    let right: Tree<u32> = Tree::new();
    let tree = left.concat(right);
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}

#[test]
fn concat_test_2() {
    // an empty tree on either side leaves the other unchanged
    let tree: Tree<u32> = (0..10).collect();
    let tree = tree.concat(Tree::new());
    assert_eq!(tree, (0..10).collect::<Vec<u32>>());
    let tree = Tree::new().concat(tree);
    assert_eq!(tree, (0..10).collect::<Vec<u32>>());
}

#[test]
fn concat_test_3() {
    let left: Tree<u32> = (1..7).collect();
    let right: Tree<u32> = (7..17).collect();
    let tree = left + right;
    assert_eq!(tree.len(), 16);
    assert_eq!(tree, (1..17).collect::<Vec<u32>>());
    tree.check_structure();
}

#[test]
fn concat_test_4() {
    // mismatched heights: the shorter tree grows to meet the taller one
    let left: Tree<u32> = (0..3).collect();
    let right: Tree<u32> = (3..300).collect();
    let tree = left + right;
    assert_eq!(tree, (0..300).collect::<Vec<u32>>());
    tree.check_structure();

    let left: Tree<u32> = (0..300).collect();
    let right: Tree<u32> = (300..303).collect();
    let tree = left + right;
    assert_eq!(tree, (0..303).collect::<Vec<u32>>());
    tree.check_structure();
}

#[test]
fn concat_test_5() {
    // single-leaf trees on both sides
    let left: Tree<u32> = (0..2).collect();
    let right: Tree<u32> = (2..4).collect();
    let tree = left + right;
    assert_eq!(tree, (0..4).collect::<Vec<u32>>());
    tree.check_structure();
}

#[test]
fn concat_test_6() {
    let left: Tree<u32> = (0..7_321).collect();
    let right: Tree<u32> = (7_321..11_888).collect();
    let tree = left + right;
    assert_eq!(tree.len(), 11_888);
    for i in 0..11_888 {
        assert_eq!(tree[i], i as u32);
    }
    tree.check_structure();
}

#[test]
fn add_assign_test_1() {
    let mut tree: Tree<u32> = (0..6).collect();
    tree += (6..12).collect();
    tree += Tree::new();
    assert_eq!(tree, (0..12).collect::<Vec<u32>>());
    tree.check_structure();
}

#[test]
fn from_test_1() {
    let tree = Tree::from(vec![1u32, 2, 3]);
    assert_eq!(tree.len(), 3);
    assert_eq!(tree, vec![1, 2, 3]);
}

#[test]
fn extend_test_1() {
    let mut tree: Tree<u32> = Tree::new();
    tree.extend(0..5);
    tree.extend(5..10);
    assert_eq!(tree, (0..10).collect::<Vec<u32>>());
}

#[test]
fn eq_test_1() {
    let pushed: Tree<u32> = (0..100).collect();
    let concatenated = (0..40).collect::<Tree<u32>>()
                     + (40..100).collect::<Tree<u32>>();
    // equality is element-wise; the two trees differ in shape
    assert_eq!(pushed, concatenated);
}

mod properties {
    use ::Tree;
    use ::BRANCH_FACTOR;
    use quickcheck::TestResult;

    quickcheck! {
        fn push_appends(xs: Vec<u32>, x: u32) -> bool {
            let mut tree: Tree<u32> = xs.iter().cloned().collect();
            tree.push(x);
            tree.len() == xs.len() + 1 && tree[xs.len()] == x
        }

        fn collected_trees_match_their_source(xs: Vec<u32>) -> bool {
            let tree: Tree<u32> = xs.iter().cloned().collect();
            tree.check_structure();
            tree == xs
        }

        fn set_changes_exactly_one_element(xs: Vec<u32>, i: usize, x: u32)
                                           -> TestResult {
            if xs.is_empty() {
                return TestResult::discard();
            }
            let i = i % xs.len();
            let mut tree: Tree<u32> = xs.iter().cloned().collect();
            let previous = tree.set(i, x);
            TestResult::from_bool(
                previous == xs[i] &&
                    tree[i] == x &&
                    (0..xs.len()).filter(|&j| j != i)
                                 .all(|j| tree[j] == xs[j]))
        }

        fn concat_is_sequence_concat(xs: Vec<u32>, ys: Vec<u32>) -> bool {
            let left: Tree<u32> = xs.iter().cloned().collect();
            let right: Tree<u32> = ys.iter().cloned().collect();
            let tree = left + right;
            tree.check_structure();
            tree.len() == xs.len() + ys.len() &&
                (0..xs.len()).all(|i| tree[i] == xs[i]) &&
                (0..ys.len()).all(|i| tree[xs.len() + i] == ys[i])
        }

        fn concat_is_associative(xs: Vec<u32>, ys: Vec<u32>, zs: Vec<u32>)
                                 -> bool {
            let a = || xs.iter().cloned().collect::<Tree<u32>>();
            let b = || ys.iter().cloned().collect::<Tree<u32>>();
            let c = || zs.iter().cloned().collect::<Tree<u32>>();
            let left_first = (a() + b()) + c();
            let right_first = a() + (b() + c());
            left_first.check_structure();
            right_first.check_structure();
            left_first == right_first
        }

        fn height_stays_logarithmic(xs: Vec<u32>) -> TestResult {
            if xs.is_empty() {
                return TestResult::discard();
            }
            let tree: Tree<u32> = xs.iter().cloned().collect();
            let bound = (xs.len() as f64).log(BRANCH_FACTOR as f64)
                                         .ceil() as usize;
            TestResult::from_bool(tree.height() <= bound)
        }
    }
}
