// Quietstorm - R&B chord progression generator and arranger
// Module declarations

pub mod arranger;
pub mod commands;
pub mod config;
pub mod groove;
pub mod library;
pub mod pipeline;
pub mod playback;
pub mod state;
pub mod theory;

pub use library::Catalog;
pub use state::Session;
