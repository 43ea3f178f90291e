// 組合せオブジェクトの契約

pub mod contract;
pub mod error;
pub mod sink;

pub use contract::ReverseSearch;
pub use error::IndexError;
pub use sink::{OutputSink, SinkClosed};
