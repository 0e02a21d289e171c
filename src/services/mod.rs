pub mod archive_writer;
pub mod classifier;
pub mod store;

pub use archive_writer::{ArchiveStats, ArchiveWriter};
pub use classifier::{classify, ClassifiedProblems};
pub use store::Store;
