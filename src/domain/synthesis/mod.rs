pub mod cache;

pub use cache::{SynthesizerCache, SynthesizerHandle, WARM_UP_UTTERANCE};
