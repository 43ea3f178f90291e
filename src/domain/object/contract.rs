// 逆探索が要求する組合せオブジェクトの契約

use super::error::IndexError;
use super::sink::{OutputSink, SinkClosed};

/// 逆探索（Avis–Fukuda）で列挙できる組合せオブジェクト
///
/// エンジンはこのトレイト越しにしか状態を触らない。
/// 全域木は `local_search` が親への辺を、`adjacent` が隣接グラフの辺を定める。
///
/// 実装が守るべき性質:
/// - `adjacent(i)` を同じ `i` で2回適用すると元の状態に戻る（対合）
/// - `adjacent` は失敗時に状態を変更しない
/// - `local_search` は状態のみの決定的関数で、根以外では根へ1歩近づき、根では何もしない
/// - 根以外の `v` について、`local_search` 後の状態からある `i` の `adjacent(i)` で `v` に戻れる
/// - `max_degree` はオブジェクトとその複製すべてで一定
/// - `clone` は内部バッファを共有しない深いコピー
pub trait ReverseSearch: Clone {
    /// `output` が送り出すスナップショットの型
    type Snapshot;

    /// i 番目の隣接移動をその場で適用する
    fn adjacent(&mut self, i: usize) -> Result<(), IndexError>;

    /// 根へ向かう正準化を1ステップ適用する
    fn local_search(&mut self);

    /// 状態の構造的な等価性
    fn equal(&self, other: &Self) -> bool;

    fn is_root(&self) -> bool;

    /// 有効な隣接インデックスの数
    fn max_degree(&self) -> usize;

    /// 現在の状態の独立したスナップショット
    fn snapshot(&self) -> Self::Snapshot;

    /// スナップショットを出力先へ送る
    fn output<S>(&self, sink: &mut S) -> Result<(), SinkClosed>
    where
        S: OutputSink<Self::Snapshot> + ?Sized,
    {
        sink.emit(self.snapshot())
    }
}
