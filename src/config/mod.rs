//! Application configuration: environment settings plus the constants
//! (roles, landing paths, validation limits) shared across layers.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
