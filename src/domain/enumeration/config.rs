// 列挙設定のValue Objects

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CHANNEL_CAPACITY, MAX_PERMUTATION_LENGTH};

/// 順列の長さを表すValue Object (1 ~ 20)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Degree(usize);

impl Degree {
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(anyhow!("順列の長さは1以上である必要があります"));
        }
        if n > MAX_PERMUTATION_LENGTH {
            return Err(anyhow!(
                "順列の長さが大きすぎます: {} (上限 {})",
                n,
                MAX_PERMUTATION_LENGTH
            ));
        }
        Ok(Self(n))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// 出力チャネルの容量を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCapacity(usize);

impl ChannelCapacity {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(anyhow!("チャネル容量は1以上"));
        }
        if capacity > 1_000_000 {
            return Err(anyhow!("チャネル容量が大きすぎます: {}", capacity));
        }
        Ok(Self(capacity))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for ChannelCapacity {
    fn default() -> Self {
        Self(DEFAULT_CHANNEL_CAPACITY)
    }
}

/// 出力フォーマット
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[1 2 3]` 形式
    #[default]
    Text,
    /// JSON Lines形式（1行1スナップショット）
    Jsonl,
}

/// 列挙設定のValue Object
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnumerationConfig {
    pub degree: Degree,
    pub capacity: ChannelCapacity,
    pub format: OutputFormat,
    /// スナップショットを出力せず件数だけ数える
    pub count_only: bool,
    /// 重複チェック（順位を集合に記録）
    pub check_unique: bool,
}

impl EnumerationConfig {
    pub fn new(degree: Degree) -> Self {
        Self {
            degree,
            capacity: ChannelCapacity::default(),
            format: OutputFormat::default(),
            count_only: false,
            check_unique: false,
        }
    }
}
