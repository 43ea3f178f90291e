// 列挙結果の定義

use serde::{Deserialize, Serialize};

/// 1回の走査で数えた統計
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationStats {
    /// 出力したノード数
    pub visited: u64,
    /// reverse を呼んだ回数
    pub reverse_tests: u64,
    /// backtrack で親へ戻った回数
    pub backtracks: u64,
    /// 中断フラグで打ち切られたか
    pub aborted: bool,
}

/// パイプライン全体のサマリー
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EnumerationSummary {
    pub stats: EnumerationStats,
    /// 受け取り側が受信した件数
    pub received: u64,
    /// 重複チェック時の異なる件数
    pub unique: Option<u64>,
    pub elapsed_seconds: f64,
}

impl EnumerationSummary {
    /// 1秒あたりのノード数
    pub fn nodes_per_second(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.stats.visited as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_zero_without_elapsed_time() {
        let summary = EnumerationSummary::default();
        assert_eq!(summary.nodes_per_second(), 0.0);
    }

    #[test]
    fn rate_divides_visited_by_elapsed() {
        let summary = EnumerationSummary {
            stats: EnumerationStats {
                visited: 100,
                ..Default::default()
            },
            received: 100,
            unique: None,
            elapsed_seconds: 2.0,
        };
        assert_eq!(summary.nodes_per_second(), 50.0);
    }
}
