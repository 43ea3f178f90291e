// 列挙の定数とユーティリティ型定義

use nohash_hasher::BuildNoHashHasher;

/// 順列の長さの上限（n! が u64 に収まる範囲）
pub const MAX_PERMUTATION_LENGTH: usize = 20;

/// 生産側と消費側の間のチャネル容量（既定値）
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// ログフィルタを上書きする環境変数
pub const LOG_ENV_VAR: &str = "REVFORM_LOG";

// u64 キー専用のノーハッシュ（高速化）
pub type U64Set = std::collections::HashSet<u64, BuildNoHashHasher<u64>>;
