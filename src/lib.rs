pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod server;
pub(crate) mod utils;

pub use client::{DeckKind, GenerationOptions, PitchSession, ResilientClient};
pub use error::PitchError;
