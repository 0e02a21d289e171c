pub mod sync_engine;

pub use sync_engine::{BackfillOutcome, SyncEngine, SyncStats};
