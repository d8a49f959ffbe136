pub mod assets;
pub mod compute;
pub mod display;
pub mod entities;
pub mod error;

pub use error::{GameError, Result};
