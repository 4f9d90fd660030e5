pub mod voice_mapping;

pub use voice_mapping::{has_explicit_voice, resolve_voice, VoiceProfileResolver};
