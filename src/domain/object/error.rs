// 組合せオブジェクトのエラー定義

use thiserror::Error;

/// 隣接インデックスが `[0, max_degree)` の範囲外
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("インデックス {index} が範囲外です: 0 から {max_degree} 未満")]
pub struct IndexError {
    pub index: usize,
    pub max_degree: usize,
}

impl IndexError {
    pub fn new(index: usize, max_degree: usize) -> Self {
        Self { index, max_degree }
    }

    /// 範囲チェック（範囲内なら Ok）
    pub fn check(index: usize, max_degree: usize) -> Result<(), Self> {
        if index >= max_degree {
            return Err(Self::new(index, max_degree));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_accepts_in_range() {
        assert!(IndexError::check(0, 2).is_ok());
        assert!(IndexError::check(1, 2).is_ok());
    }

    #[test]
    fn check_rejects_upper_bound() {
        assert_eq!(IndexError::check(2, 2), Err(IndexError::new(2, 2)));
    }

    #[test]
    fn check_rejects_everything_at_zero_degree() {
        assert!(IndexError::check(0, 0).is_err());
    }

    #[test]
    fn message_names_index_and_bound() {
        let msg = IndexError::new(5, 3).to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('3'));
    }
}
