// 列挙パイプラインサービス

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::bounded;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::application::progress::ProgressManager;
use crate::application::reverse_search::consumer::{spawn_consumer_thread, ConsumerReport};
use crate::application::reverse_search::producer::spawn_producer_thread;
use crate::domain::enumeration::{ChannelCapacity, EnumerationStats, EnumerationSummary};
use crate::domain::object::ReverseSearch;
use crate::infrastructure::storage::SnapshotWriter;

/// 実行中の列挙へのハンドル
pub struct EnumerationHandle {
    progress: Arc<ProgressManager>,
    producer: JoinHandle<Result<EnumerationStats>>,
    consumer: JoinHandle<Result<ConsumerReport>>,
}

impl EnumerationHandle {
    /// 列挙を中断（生産側が次の子探索で止まる）
    pub fn abort(&self) {
        self.progress.abort();
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.progress.is_aborted()
    }

    /// 両スレッドの終了を待ってサマリーを返す
    pub fn join(self) -> Result<EnumerationSummary> {
        let consumer = self
            .consumer
            .join()
            .map_err(|_| anyhow!("consumer join error"))?;
        let producer = self
            .producer
            .join()
            .map_err(|_| anyhow!("producer join error"))?;

        // 消費側の失敗が生産側の切断エラーの原因になるので先に見る
        let report = consumer.context("出力の書き込みに失敗しました")?;
        let stats = producer?;

        let progress = self.progress.get_stats();
        if progress.consumed != report.received {
            tracing::warn!(
                consumed = progress.consumed,
                received = report.received,
                "消費件数と書き込み件数が一致しません"
            );
        }

        let summary = EnumerationSummary {
            stats,
            received: report.received,
            unique: report.unique,
            elapsed_seconds: self.progress.elapsed().as_secs_f64(),
        };
        tracing::info!(
            visited = summary.stats.visited,
            received = summary.received,
            produced = progress.produced,
            aborted = summary.stats.aborted,
            elapsed = summary.elapsed_seconds,
            io_ms = report.io_time.as_millis() as u64,
            "列挙完了"
        );
        Ok(summary)
    }
}

/// 生産側1本・消費側1本で列挙を実行するサービス
pub struct EnumerationService {
    capacity: ChannelCapacity,
}

impl EnumerationService {
    pub fn new(capacity: ChannelCapacity) -> Self {
        Self { capacity }
    }

    /// 列挙を開始（メインユースケース）
    pub fn start<V, W>(&self, object: V, writer: W) -> EnumerationHandle
    where
        V: ReverseSearch + Send + 'static,
        V::Snapshot: Send + 'static,
        W: SnapshotWriter<V::Snapshot> + 'static,
    {
        let progress = Arc::new(ProgressManager::new());
        let (tx, rx) = bounded::<V::Snapshot>(self.capacity.get());

        tracing::info!(
            max_degree = object.max_degree(),
            capacity = self.capacity.get(),
            "列挙開始"
        );

        let consumer = spawn_consumer_thread(rx, writer, Arc::clone(&progress));
        let producer = spawn_producer_thread(object, tx, Arc::clone(&progress));

        EnumerationHandle {
            progress,
            producer,
            consumer,
        }
    }

    /// 列挙を開始して完了まで待つ
    pub fn run<V, W>(&self, object: V, writer: W) -> Result<EnumerationSummary>
    where
        V: ReverseSearch + Send + 'static,
        V::Snapshot: Send + 'static,
        W: SnapshotWriter<V::Snapshot> + 'static,
    {
        self.start(object, writer).join()
    }
}

impl Default for EnumerationService {
    fn default() -> Self {
        Self::new(ChannelCapacity::default())
    }
}
