pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod logger;

pub use error::GameError;
