//! Order Desk - customer, product and order management.
//!
//! Administrators manage customers, products and orders from a dashboard;
//! customers sign up, see their own orders and edit their profile.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: command-line entry points
//! - **config**: application configuration and constants
//! - **domain**: core entities, the order filter, password hashing
//! - **forms**: form and formset validation
//! - **services**: use cases over a Unit of Work
//! - **infra**: database, migrations, repositories
//! - **api**: handlers, session middleware, role gate, routes
//! - **types**: page contexts returned by handlers
//! - **errors**: centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! order-desk migrate up
//! order-desk create-admin --username admin --email admin@example.com --password ...
//! order-desk serve
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use domain::{Customer, Order, OrderStatus, Product, Role, User};
pub use errors::{AppError, AppResult};
