// 出力先（スナップショットの受け取り側）

use thiserror::Error;

/// 受け取り側が既に切断されている
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("出力先が切断されています")]
pub struct SinkClosed;

/// スナップショットを順番に受け取る出力先
///
/// `emit` の呼び出し順がそのまま走査順になる。
pub trait OutputSink<T> {
    /// スナップショットを1つ送る
    fn emit(&mut self, item: T) -> Result<(), SinkClosed>;

    /// ストリーム終端を通知（既定では何もしない）
    fn close(&mut self) {}
}

/// メモリ内に貯める出力先（テスト・小規模用）
impl<T> OutputSink<T> for Vec<T> {
    fn emit(&mut self, item: T) -> Result<(), SinkClosed> {
        self.push(item);
        Ok(())
    }
}

impl<T, S: OutputSink<T> + ?Sized> OutputSink<T> for &mut S {
    fn emit(&mut self, item: T) -> Result<(), SinkClosed> {
        (**self).emit(item)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
