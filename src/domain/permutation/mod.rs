// 順列による参照実装

pub mod permutation;

pub use permutation::{factorial, rank_of, Permutation};
