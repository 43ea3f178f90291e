// 逆探索の実装

pub mod consumer;
pub mod engine;
pub mod producer;
pub mod service;

pub use engine::{backtrack, enumerate, enumerate_until, reverse, EngineError};
pub use producer::ChannelSink;
pub use service::{EnumerationHandle, EnumerationService};
