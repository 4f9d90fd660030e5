pub mod queue;

pub use queue::{PlaybackItem, PlaybackQueue, QueueStatus};
