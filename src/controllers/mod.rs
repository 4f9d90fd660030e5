pub mod health;
pub mod languages;
pub mod playback;
pub mod session;
