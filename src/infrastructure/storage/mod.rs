// 出力の永続化

pub mod writer;

pub use writer::{
    CountingWriter, MemoryWriter, SnapshotLine, SnapshotWriter, StreamWriter, UniqueCheckWriter,
};
