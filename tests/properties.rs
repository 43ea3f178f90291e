// 性質ベーステスト（proptest）

use proptest::prelude::*;

use revform::application::reverse_search::{backtrack, reverse};
use revform::domain::object::ReverseSearch;
use revform::domain::permutation::Permutation;

/// 長さ 1..=8 の任意の順列状態
fn arb_permutation() -> impl Strategy<Value = Permutation> {
    (1usize..=8)
        .prop_flat_map(|n| Just((1..=n as u32).collect::<Vec<u32>>()).prop_shuffle())
        .prop_map(|state| {
            let mut p = Permutation::new(state.len()).unwrap();
            p.set_state(state).unwrap();
            p
        })
}

proptest! {
    #[test]
    fn adjacent_is_an_involution(p in arb_permutation(), i in 0usize..8) {
        prop_assume!(p.max_degree() > 0);
        let i = i % p.max_degree();
        let mut q = p.clone();
        q.adjacent(i).unwrap();
        q.adjacent(i).unwrap();
        prop_assert!(q.equal(&p));
    }

    #[test]
    fn out_of_range_index_never_mutates(p in arb_permutation(), extra in 0usize..4) {
        let mut q = p.clone();
        prop_assert!(q.adjacent(p.max_degree() + extra).is_err());
        prop_assert!(q.adjacent(usize::MAX - extra).is_err());
        prop_assert_eq!(q, p);
    }

    #[test]
    fn local_search_reaches_root(p in arb_permutation()) {
        let n = p.state().len();
        let bound = n * (n - 1) / 2;
        let mut q = p.clone();
        let mut steps = 0;
        while !q.is_root() {
            q.local_search();
            steps += 1;
            prop_assert!(steps <= bound);
        }
        prop_assert_eq!(steps, p.inversions());
    }

    #[test]
    fn local_search_removes_one_inversion(p in arb_permutation()) {
        prop_assume!(!p.is_root());
        let mut q = p.clone();
        q.local_search();
        prop_assert_eq!(q.inversions() + 1, p.inversions());
    }

    #[test]
    fn backtrack_and_reverse_are_dual(p in arb_permutation()) {
        prop_assume!(!p.is_root());
        let mut parent = p.clone();
        let i = backtrack(&mut parent).unwrap();
        prop_assert!(reverse(&parent, i));
        parent.adjacent(i).unwrap();
        prop_assert!(parent.equal(&p));
    }

    #[test]
    fn reverse_leaves_object_untouched(p in arb_permutation(), i in 0usize..10) {
        let before = p.clone();
        let _ = reverse(&p, i);
        prop_assert_eq!(p, before);
    }
}
