// 隣接互換による順列オブジェクト

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::domain::object::{IndexError, ReverseSearch};

/// 長さ n の順列（隣接互換で移動）
///
/// 根は昇順の列。`local_search` は最初の逆順ペアを入れ替える
/// （バブルソートの1ステップ）ので、転倒数がちょうど1減る。
/// 読み込み時は `PermutationRepr` を経由して根・状態・次数を検証する。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PermutationRepr", into = "PermutationRepr")]
pub struct Permutation {
    root: Vec<u32>,
    state: Vec<u32>,
    max_degree: usize,
}

impl Permutation {
    /// `[1, 2, ..., n]` を根とする順列を作成
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(anyhow!("順列の長さは1以上である必要があります"));
        }
        let n32 = u32::try_from(n).map_err(|_| anyhow!("順列が長すぎます: {}", n))?;
        Self::with_root((1..=n32).collect())
    }

    /// 任意の根から作成（相異なる値の昇順列のみ）
    pub fn with_root(root: Vec<u32>) -> Result<Self> {
        if root.is_empty() {
            return Err(anyhow!("根が空です"));
        }
        if let Some(w) = root.windows(2).find(|w| w[0] >= w[1]) {
            return Err(anyhow!(
                "根は相異なる値の昇順列である必要があります: {} の後に {}",
                w[0],
                w[1]
            ));
        }
        Ok(Self {
            max_degree: root.len() - 1,
            state: root.clone(),
            root,
        })
    }

    /// 現在の状態を差し替える（根と同じ要素集合のみ）
    pub fn set_state(&mut self, state: Vec<u32>) -> Result<()> {
        let mut sorted = state.clone();
        sorted.sort_unstable();
        if sorted != self.root {
            return Err(anyhow!(
                "状態 {:?} は根 {:?} の並べ替えではありません",
                state,
                self.root
            ));
        }
        self.state = state;
        Ok(())
    }

    pub fn root(&self) -> &[u32] {
        &self.root
    }

    pub fn state(&self) -> &[u32] {
        &self.state
    }

    /// 転倒数（根までの local_search の歩数）
    pub fn inversions(&self) -> usize {
        let s = &self.state;
        (0..s.len())
            .map(|i| s[i + 1..].iter().filter(|&&b| b < s[i]).count())
            .sum()
    }
}

/// シリアライズ用の表現
#[derive(Serialize, Deserialize)]
struct PermutationRepr {
    root: Vec<u32>,
    state: Vec<u32>,
    max_degree: usize,
}

impl TryFrom<PermutationRepr> for Permutation {
    type Error = anyhow::Error;

    fn try_from(repr: PermutationRepr) -> Result<Self> {
        let mut permutation = Self::with_root(repr.root)?;
        if repr.max_degree != permutation.max_degree {
            return Err(anyhow!(
                "次数 {} は根の長さと合いません（期待値 {}）",
                repr.max_degree,
                permutation.max_degree
            ));
        }
        permutation.set_state(repr.state)?;
        Ok(permutation)
    }
}

impl From<Permutation> for PermutationRepr {
    fn from(p: Permutation) -> Self {
        Self {
            root: p.root,
            state: p.state,
            max_degree: p.max_degree,
        }
    }
}

impl ReverseSearch for Permutation {
    type Snapshot = Vec<u32>;

    fn adjacent(&mut self, i: usize) -> Result<(), IndexError> {
        IndexError::check(i, self.max_degree)?;
        self.state.swap(i, i + 1);
        Ok(())
    }

    fn local_search(&mut self) {
        if let Some(i) = self.state.windows(2).position(|w| w[0] > w[1]) {
            self.state.swap(i, i + 1);
        }
    }

    fn equal(&self, other: &Self) -> bool {
        if self.max_degree != other.max_degree {
            tracing::warn!(
                left = self.max_degree,
                right = other.max_degree,
                "次数の異なる順列を比較しました"
            );
            return false;
        }
        self.state == other.state
    }

    fn is_root(&self) -> bool {
        self.state == self.root
    }

    fn max_degree(&self) -> usize {
        self.max_degree
    }

    fn snapshot(&self) -> Vec<u32> {
        self.state.clone()
    }
}

/// 相異なる値の列の辞書順順位（Lehmer 符号）
///
/// 順位が u64 に収まらなければ None（長さ20までは必ず収まる）。
pub fn rank_of(values: &[u32]) -> Option<u64> {
    let n = values.len();
    let mut rank: u64 = 0;
    for i in 0..n {
        let smaller = values[i + 1..].iter().filter(|&&b| b < values[i]).count() as u64;
        rank = rank.checked_mul((n - i) as u64)?.checked_add(smaller)?;
    }
    Some(rank)
}

/// n! （u64 に収まらなければ None）
pub fn factorial(n: usize) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_at_root() {
        let p = Permutation::new(4).unwrap();
        assert_eq!(p.state(), &[1, 2, 3, 4]);
        assert_eq!(p.root(), &[1, 2, 3, 4]);
        assert_eq!(p.max_degree(), 3);
        assert!(p.is_root());
    }

    #[test]
    fn new_rejects_zero() {
        assert!(Permutation::new(0).is_err());
    }

    #[test]
    fn with_root_rejects_unsorted_or_duplicate() {
        assert!(Permutation::with_root(vec![2, 1]).is_err());
        assert!(Permutation::with_root(vec![1, 1]).is_err());
        assert!(Permutation::with_root(vec![]).is_err());
        assert!(Permutation::with_root(vec![3, 7, 10]).is_ok());
    }

    #[test]
    fn adjacent_swaps_neighbours() {
        let mut p = Permutation::new(3).unwrap();
        p.adjacent(1).unwrap();
        assert_eq!(p.state(), &[1, 3, 2]);
        assert!(!p.is_root());
    }

    #[test]
    fn adjacent_out_of_range_leaves_state() {
        let mut p = Permutation::new(3).unwrap();
        p.adjacent(0).unwrap();
        let before = p.snapshot();

        assert_eq!(p.adjacent(2), Err(IndexError::new(2, 2)));
        assert_eq!(p.adjacent(-1isize as usize), Err(IndexError::new(usize::MAX, 2)));
        assert_eq!(p.snapshot(), before);
    }

    #[test]
    fn single_element_has_no_moves() {
        let mut p = Permutation::new(1).unwrap();
        assert_eq!(p.max_degree(), 0);
        assert!(p.adjacent(0).is_err());
        assert_eq!(p.state(), &[1]);
    }

    #[test]
    fn local_search_swaps_first_descent() {
        let mut p = Permutation::new(4).unwrap();
        p.set_state(vec![1, 4, 3, 2]).unwrap();
        p.local_search();
        assert_eq!(p.state(), &[1, 3, 4, 2]);
    }

    #[test]
    fn local_search_is_noop_at_root() {
        let mut p = Permutation::new(5).unwrap();
        p.local_search();
        assert!(p.is_root());
    }

    #[test]
    fn local_search_reaches_root_in_inversion_steps() {
        let mut p = Permutation::new(4).unwrap();
        p.set_state(vec![4, 3, 2, 1]).unwrap();
        let steps = p.inversions();
        assert_eq!(steps, 6);
        for _ in 0..steps {
            assert!(!p.is_root());
            p.local_search();
        }
        assert!(p.is_root());
    }

    #[test]
    fn set_state_rejects_foreign_values() {
        let mut p = Permutation::new(3).unwrap();
        assert!(p.set_state(vec![1, 2, 4]).is_err());
        assert!(p.set_state(vec![1, 2]).is_err());
        assert!(p.set_state(vec![1, 1, 2]).is_err());
        assert!(p.is_root());
    }

    #[test]
    fn equal_rejects_degree_mismatch() {
        let a = Permutation::new(2).unwrap();
        let b = Permutation::new(3).unwrap();
        assert!(!a.equal(&b));
        assert!(a.equal(&a.clone()));
    }

    #[test]
    fn clone_is_independent() {
        let p = Permutation::new(3).unwrap();
        let mut q = p.clone();
        q.adjacent(0).unwrap();
        assert!(p.is_root());
        assert!(!q.is_root());
    }

    #[test]
    fn snapshot_does_not_alias() {
        let mut p = Permutation::new(3).unwrap();
        let mut snap = p.snapshot();
        snap[0] = 99;
        p.adjacent(0).unwrap();
        assert_eq!(snap, vec![99, 2, 3]);
        assert_eq!(p.state(), &[2, 1, 3]);
    }

    #[test]
    fn rank_is_lexicographic() {
        assert_eq!(rank_of(&[1, 2, 3]), Some(0));
        assert_eq!(rank_of(&[1, 3, 2]), Some(1));
        assert_eq!(rank_of(&[2, 1, 3]), Some(2));
        assert_eq!(rank_of(&[3, 2, 1]), Some(5));
    }

    #[test]
    fn rank_overflow_is_none() {
        let ascending: Vec<u32> = (1..=21).collect();
        let descending: Vec<u32> = (1..=21).rev().collect();
        let longest: Vec<u32> = (1..=20).rev().collect();
        assert_eq!(rank_of(&ascending), Some(0));
        assert_eq!(rank_of(&longest), Some(2_432_902_008_176_639_999));
        assert_eq!(rank_of(&descending), None);
    }

    #[test]
    fn deserialize_runs_validation() {
        let p: Permutation =
            serde_json::from_str(r#"{"root":[1,2,3],"state":[2,1,3],"max_degree":2}"#).unwrap();
        assert_eq!(p.state(), &[2, 1, 3]);
        assert_eq!(p.max_degree(), 2);
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"root":[1,2,3],"state":[2,1,3],"max_degree":2}"#
        );

        // 次数が長さと合わない・根が昇順でない・状態が根の並べ替えでない
        for json in [
            r#"{"root":[1],"state":[1],"max_degree":3}"#,
            r#"{"root":[3,1,2],"state":[9,9,9],"max_degree":2}"#,
            r#"{"root":[1,2,3],"state":[9,9,9],"max_degree":2}"#,
            r#"{"root":[],"state":[],"max_degree":0}"#,
        ] {
            assert!(serde_json::from_str::<Permutation>(json).is_err(), "{}", json);
        }
    }

    #[test]
    fn factorial_fits_up_to_twenty() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(3), Some(6));
        assert_eq!(factorial(20), Some(2_432_902_008_176_640_000));
        assert_eq!(factorial(21), None);
    }
}
