//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `create-admin` - Bootstrap an administrator account
//! - `products` - Catalog maintenance

pub mod args;

pub use args::{Cli, Commands};
