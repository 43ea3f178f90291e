// 受信（消費側）スレッド

use anyhow::Result;
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::application::progress::ProgressManager;
use crate::infrastructure::storage::SnapshotWriter;

/// 消費側の集計
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsumerReport {
    pub received: u64,
    pub unique: Option<u64>,
    pub io_time: Duration,
}

/// 消費側スレッドを起動
pub fn spawn_consumer_thread<T, W>(
    rx: Receiver<T>,
    writer: W,
    progress: Arc<ProgressManager>,
) -> JoinHandle<Result<ConsumerReport>>
where
    T: Send + 'static,
    W: SnapshotWriter<T> + 'static,
{
    thread::spawn(move || consumer_thread_main(rx, writer, progress))
}

/// 消費側スレッドのメイン処理
///
/// 送信側がすべて閉じるまで受信を続ける。書き込みに失敗したら受信側を
/// 手放して終わるので、生産側は次の送信で切断を検知する。
fn consumer_thread_main<T, W>(
    rx: Receiver<T>,
    mut writer: W,
    progress: Arc<ProgressManager>,
) -> Result<ConsumerReport>
where
    W: SnapshotWriter<T>,
{
    let mut io_time = Duration::ZERO;

    while let Ok(snapshot) = rx.recv() {
        let t0 = Instant::now();
        writer.write_snapshot(&snapshot)?;
        io_time += t0.elapsed();
        progress.add_consumed(1);
    }

    let t0 = Instant::now();
    writer.flush()?;
    io_time += t0.elapsed();

    Ok(ConsumerReport {
        received: writer.count(),
        unique: writer.unique(),
        io_time,
    })
}
