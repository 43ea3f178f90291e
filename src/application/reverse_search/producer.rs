// 列挙（生産側）スレッド

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::progress::ProgressManager;
use crate::application::reverse_search::engine::enumerate_until;
use crate::domain::enumeration::EnumerationStats;
use crate::domain::object::{OutputSink, ReverseSearch, SinkClosed};

/// チャネルへ送る出力先
///
/// 容量付きチャネルなら満杯のとき `emit` がブロックする。
/// `close` で送信側を手放すと受信側のループが終わる。
pub struct ChannelSink<T> {
    tx: Option<Sender<T>>,
    progress: Option<Arc<ProgressManager>>,
}

impl<T> ChannelSink<T> {
    pub fn new(tx: Sender<T>) -> Self {
        Self {
            tx: Some(tx),
            progress: None,
        }
    }

    /// 送信件数を進捗マネージャーに記録する
    pub fn with_progress(mut self, progress: Arc<ProgressManager>) -> Self {
        self.progress = Some(progress);
        self
    }
}

impl<T> OutputSink<T> for ChannelSink<T> {
    fn emit(&mut self, item: T) -> Result<(), SinkClosed> {
        let tx = self.tx.as_ref().ok_or(SinkClosed)?;
        tx.send(item).map_err(|_| SinkClosed)?;
        if let Some(progress) = &self.progress {
            progress.add_produced(1);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.tx = None;
    }
}

/// 生産側スレッドを起動
///
/// `object` はスレッドに移され、走査カーソルとして排他的に使われる。
pub fn spawn_producer_thread<V>(
    object: V,
    tx: Sender<V::Snapshot>,
    progress: Arc<ProgressManager>,
) -> JoinHandle<Result<EnumerationStats>>
where
    V: ReverseSearch + Send + 'static,
    V::Snapshot: Send + 'static,
{
    thread::spawn(move || producer_thread_main(object, tx, progress))
}

/// 生産側スレッドのメイン処理
fn producer_thread_main<V>(
    mut object: V,
    tx: Sender<V::Snapshot>,
    progress: Arc<ProgressManager>,
) -> Result<EnumerationStats>
where
    V: ReverseSearch,
{
    let abort = progress.abort_flag();
    let mut sink = ChannelSink::new(tx).with_progress(progress);
    let stats = enumerate_until(&mut object, &mut sink, &abort).context("列挙に失敗しました")?;
    Ok(stats)
}
