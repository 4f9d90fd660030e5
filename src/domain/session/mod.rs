pub mod controller;
pub mod error;
pub mod model;
pub mod transcript;

pub use controller::TranslationSessionController;
pub use error::SessionError;
pub use model::{SessionSettings, SessionState, SessionStatus, SettingsUpdate};
pub use transcript::{Transcript, TranscriptLine, TranscriptLineKind, TranscriptSnapshot};
