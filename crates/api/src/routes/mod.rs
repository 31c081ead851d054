pub mod transcript;
pub mod transcription;
pub mod usage;
