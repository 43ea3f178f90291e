// 進捗管理

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 進捗統計
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressStats {
    /// 生産側が出力したノード数
    pub produced: u64,
    /// 消費側が受け取った件数
    pub consumed: u64,
}

/// 生産側・消費側のスレッドで共有する進捗マネージャー
pub struct ProgressManager {
    abort_flag: Arc<AtomicBool>,
    produced: AtomicU64,
    consumed: AtomicU64,
    start_time: Instant,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            abort_flag: Arc::new(AtomicBool::new(false)),
            produced: AtomicU64::new(0),
            consumed: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// 中断フラグを取得
    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort_flag)
    }

    /// 列挙を中断
    pub fn abort(&self) {
        self.abort_flag.store(true, Ordering::Relaxed);
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    pub fn add_produced(&self, count: u64) {
        self.produced.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_consumed(&self, count: u64) {
        self.consumed.fetch_add(count, Ordering::Relaxed);
    }

    /// 現在の統計を取得
    pub fn get_stats(&self) -> ProgressStats {
        ProgressStats {
            produced: self.produced.load(Ordering::Relaxed),
            consumed: self.consumed.load(Ordering::Relaxed),
        }
    }

    /// 経過時間を取得
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_manager_starts_clean() {
        let mgr = ProgressManager::new();
        assert!(!mgr.is_aborted());
        assert_eq!(mgr.get_stats(), ProgressStats::default());
    }

    #[test]
    fn abort_is_visible_through_shared_flag() {
        let mgr = ProgressManager::new();
        let flag = mgr.abort_flag();
        mgr.abort();
        assert!(mgr.is_aborted());
        assert!(flag.load(Ordering::Relaxed));
    }

    #[test]
    fn can_track_both_sides() {
        let mgr = ProgressManager::new();
        mgr.add_produced(10);
        mgr.add_produced(5);
        mgr.add_consumed(12);
        let stats = mgr.get_stats();
        assert_eq!(stats.produced, 15);
        assert_eq!(stats.consumed, 12);
    }
}
