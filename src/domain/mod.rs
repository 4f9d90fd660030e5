pub mod language;
pub mod playback;
pub mod session;
pub mod synthesis;
pub mod voice;

#[cfg(test)]
pub(crate) mod testing;
