//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::domain::Category;

/// Order Desk - customers, products and orders behind an admin dashboard
#[derive(Parser, Debug)]
#[command(name = "order-desk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Create an administrator account
    CreateAdmin(CreateAdminArgs),

    /// Manage the product catalog
    Products(ProductsArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to [default: SERVER_HOST or 0.0.0.0]
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on [default: SERVER_PORT or 3000]
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the create-admin command
#[derive(Args, Debug)]
pub struct CreateAdminArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    /// At least 8 characters
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the products command
#[derive(Parser, Debug)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub action: ProductsAction,
}

/// Product catalog actions
#[derive(Subcommand, Debug)]
pub enum ProductsAction {
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        /// "Indoor" or "Out Door"
        #[arg(long, value_parser = parse_category)]
        category: Category,
        #[arg(long)]
        description: Option<String>,
    },
    /// List all products
    List,
}

fn parse_category(raw: &str) -> Result<Category, String> {
    Category::parse(raw).ok_or_else(|| {
        let choices: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        format!("expected one of: {}", choices.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_add_parses_category_label() {
        let cli = Cli::try_parse_from([
            "order-desk",
            "products",
            "add",
            "--name",
            "Ball",
            "--price",
            "9.5",
            "--category",
            "Out Door",
        ])
        .unwrap();

        match cli.command {
            Commands::Products(ProductsArgs {
                action: ProductsAction::Add { category, price, .. },
            }) => {
                assert_eq!(category, Category::OutDoor);
                assert_eq!(price, 9.5);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = Cli::try_parse_from([
            "order-desk", "products", "add", "--name", "Ball", "--price", "1", "--category",
            "Garden",
        ]);
        assert!(result.is_err());
    }
}
