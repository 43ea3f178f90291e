// 列挙関連のドメインモデル

pub mod config;
pub mod result;

pub use config::{ChannelCapacity, Degree, EnumerationConfig, OutputFormat};
pub use result::{EnumerationStats, EnumerationSummary};
