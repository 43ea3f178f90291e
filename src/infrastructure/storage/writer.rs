// スナップショットの書き込み

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::constants::U64Set;
use crate::domain::enumeration::OutputFormat;

/// テキスト形式での1行表現
pub trait SnapshotLine {
    fn text_line(&self) -> String;
}

/// `[1 2 3]` 形式
impl<T: Display> SnapshotLine for Vec<T> {
    fn text_line(&self) -> String {
        let body: Vec<String> = self.iter().map(|x| x.to_string()).collect();
        format!("[{}]", body.join(" "))
    }
}

/// スナップショットを書き込むためのtrait
pub trait SnapshotWriter<T>: Send {
    /// 単一のスナップショットを書き込む
    fn write_snapshot(&mut self, snapshot: &T) -> Result<()>;

    /// 書き込みを完了（フラッシュ）
    fn flush(&mut self) -> Result<()>;

    /// 書き込んだ件数を取得
    fn count(&self) -> u64;

    /// 重複チェックをしている場合の異なる件数
    fn unique(&self) -> Option<u64> {
        None
    }
}

/// 任意の出力ストリームへの書き込み実装
pub struct StreamWriter<W: Write + Send> {
    writer: BufWriter<W>,
    count: u64,
    format: OutputFormat,
}

impl<W: Write + Send> StreamWriter<W> {
    pub fn new(inner: W, format: OutputFormat) -> Self {
        Self {
            writer: BufWriter::with_capacity(1024 * 1024, inner),
            count: 0,
            format,
        }
    }
}

impl StreamWriter<io::Stdout> {
    /// 標準出力へ書き込む
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl StreamWriter<File> {
    /// ファイルを作成して書き込む
    pub fn create(path: &Path, format: OutputFormat) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("出力を作成できません: {}", path.display()))?;
        Ok(Self::new(file, format))
    }
}

impl<T, W> SnapshotWriter<T> for StreamWriter<W>
where
    T: SnapshotLine + Serialize,
    W: Write + Send,
{
    fn write_snapshot(&mut self, snapshot: &T) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.writer, "{}", snapshot.text_line())?;
            }
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(snapshot)?;
                writeln!(self.writer, "{}", json)?;
            }
        }
        self.count += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// 件数だけ数える（出力なし）
#[derive(Default)]
pub struct CountingWriter {
    count: u64,
}

impl CountingWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> SnapshotWriter<T> for CountingWriter {
    fn write_snapshot(&mut self, _snapshot: &T) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// メモリ内書き込み実装（テスト用）
pub struct MemoryWriter<T> {
    snapshots: Vec<T>,
}

impl<T> MemoryWriter<T> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    pub fn snapshots(&self) -> &[T] {
        &self.snapshots
    }
}

impl<T> Default for MemoryWriter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send> SnapshotWriter<T> for MemoryWriter<T> {
    fn write_snapshot(&mut self, snapshot: &T) -> Result<()> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn count(&self) -> u64 {
        self.snapshots.len() as u64
    }
}

/// キー（u64）を集合に記録して重複を数えるラッパー
pub struct UniqueCheckWriter<W, F> {
    inner: W,
    key: F,
    seen: U64Set,
}

impl<W, F> UniqueCheckWriter<W, F> {
    pub fn new(inner: W, key: F) -> Self {
        Self {
            inner,
            key,
            seen: U64Set::default(),
        }
    }
}

impl<T, W, F> SnapshotWriter<T> for UniqueCheckWriter<W, F>
where
    W: SnapshotWriter<T>,
    F: Fn(&T) -> u64 + Send,
{
    fn write_snapshot(&mut self, snapshot: &T) -> Result<()> {
        let key = (self.key)(snapshot);
        if !self.seen.insert(key) {
            tracing::warn!(key, "重複したスナップショット");
        }
        self.inner.write_snapshot(snapshot)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    fn count(&self) -> u64 {
        self.inner.count()
    }

    fn unique(&self) -> Option<u64> {
        Some(self.seen.len() as u64)
    }
}

impl<T, W: SnapshotWriter<T> + ?Sized> SnapshotWriter<T> for Box<W> {
    fn write_snapshot(&mut self, snapshot: &T) -> Result<()> {
        (**self).write_snapshot(snapshot)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn count(&self) -> u64 {
        (**self).count()
    }

    fn unique(&self) -> Option<u64> {
        (**self).unique()
    }
}
