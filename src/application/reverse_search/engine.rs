// 逆探索エンジン（Reverse / Backtrack / Enumerate）
//
// オブジェクトは ReverseSearch トレイト越しにだけ操作する。
// 走査で保持するのはカーソル1個と次に試すインデックスのみ。

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::domain::enumeration::EnumerationStats;
use crate::domain::object::{IndexError, OutputSink, ReverseSearch, SinkClosed};

/// 走査の失敗
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// local_search の結果からどの隣接移動でも子に戻れない（契約違反）
    #[error("親への辺が見つかりません（次数 {max_degree}）")]
    NoParentEdge { max_degree: usize },
    /// 範囲内のはずの隣接移動が失敗した（契約違反）
    #[error("隣接移動に失敗しました: {0}")]
    Index(#[from] IndexError),
    #[error(transparent)]
    SinkClosed(#[from] SinkClosed),
}

/// `i` が `v` から子への木の辺かどうか
///
/// `v` の複製に `adjacent(i)` と `local_search` を適用して `v` に戻れば木の辺。
/// 範囲外のインデックスは木の辺ではないとして扱う。`v` は変更しない。
pub fn reverse<V: ReverseSearch>(v: &V, i: usize) -> bool {
    let mut w = v.clone();
    if let Err(e) = w.adjacent(i) {
        tracing::trace!(error = %e, "木の辺ではありません");
        return false;
    }
    w.local_search();
    v.equal(&w)
}

/// 根以外の `v` を親へ移動し、親から `v` へ戻るインデックスを返す
///
/// 呼び出し後の `v` は親。見つからなければ契約違反としてエラーを返す
/// （このとき `v` は親の状態のまま）。
pub fn backtrack<V: ReverseSearch>(v: &mut V) -> Result<usize, EngineError> {
    let child = v.clone();
    let max_degree = v.max_degree();

    v.local_search();

    for i in 0..max_degree {
        v.adjacent(i)?;
        let found = v.equal(&child);
        v.adjacent(i)?;
        if found {
            return Ok(i);
        }
    }

    Err(EngineError::NoParentEdge { max_degree })
}

/// 全域木を前順で走査し、訪問したノードをすべて出力する
///
/// 終了時（エラー時も含む）に出力先を閉じる。
pub fn enumerate<V, S>(v: &mut V, sink: &mut S) -> Result<EnumerationStats, EngineError>
where
    V: ReverseSearch,
    S: OutputSink<V::Snapshot> + ?Sized,
{
    let never = AtomicBool::new(false);
    enumerate_until(v, sink, &never)
}

/// 中断フラグ付きの `enumerate`
///
/// フラグは子探索のループ1回ごとに確認する。中断時は `aborted = true` の統計を返す。
pub fn enumerate_until<V, S>(
    v: &mut V,
    sink: &mut S,
    abort: &AtomicBool,
) -> Result<EnumerationStats, EngineError>
where
    V: ReverseSearch,
    S: OutputSink<V::Snapshot> + ?Sized,
{
    let result = walk(v, sink, abort);
    sink.close();

    match &result {
        Ok(stats) => tracing::debug!(
            visited = stats.visited,
            backtracks = stats.backtracks,
            aborted = stats.aborted,
            "走査終了"
        ),
        Err(e) => tracing::error!(error = %e, "走査失敗"),
    }
    result
}

fn walk<V, S>(v: &mut V, sink: &mut S, abort: &AtomicBool) -> Result<EnumerationStats, EngineError>
where
    V: ReverseSearch,
    S: OutputSink<V::Snapshot> + ?Sized,
{
    let max_degree = v.max_degree();
    let mut stats = EnumerationStats::default();

    v.output(sink)?;
    stats.visited += 1;

    // 次に試すインデックス
    let mut next = 0usize;

    loop {
        if abort.load(Ordering::Relaxed) {
            stats.aborted = true;
            return Ok(stats);
        }

        // 未訪問の子を探す
        let mut child = None;
        while next < max_degree {
            if abort.load(Ordering::Relaxed) {
                stats.aborted = true;
                return Ok(stats);
            }
            stats.reverse_tests += 1;
            if reverse(v, next) {
                child = Some(next);
                break;
            }
            next += 1;
        }

        match child {
            Some(i) => {
                v.adjacent(i)?;
                v.output(sink)?;
                stats.visited += 1;
                next = 0;
            }
            None if v.is_root() => break,
            None => {
                let i = backtrack(v)?;
                stats.backtracks += 1;
                tracing::trace!(edge = i, "親へ戻る");
                // 上ってきた辺の次の兄弟から再開
                next = i + 1;
            }
        }
    }

    Ok(stats)
}
