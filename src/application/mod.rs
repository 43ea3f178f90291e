// アプリケーション層 - 列挙エンジンとパイプライン

pub mod progress;
pub mod reverse_search;

pub use progress::{ProgressManager, ProgressStats};
pub use reverse_search::{EnumerationHandle, EnumerationService};
