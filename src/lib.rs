// 逆探索（Avis–Fukuda）列挙 - ライブラリモジュール

pub mod constants;
pub mod domain;         // ドメイン層
pub mod application;    // アプリケーション層
pub mod infrastructure; // インフラ層
pub mod logging;

// 外部クレートの再エクスポート
pub use anyhow::{anyhow, Context, Result};

// 主要な型を再エクスポート
pub use application::reverse_search::{backtrack, enumerate, enumerate_until, reverse, EngineError};
pub use application::{EnumerationHandle, EnumerationService, ProgressManager};
pub use domain::enumeration::{EnumerationConfig, EnumerationStats, EnumerationSummary};
pub use domain::object::{IndexError, OutputSink, ReverseSearch, SinkClosed};
pub use domain::permutation::Permutation;
