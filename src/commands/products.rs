//! Products command - catalog maintenance from the shell.

use crate::cli::args::{ProductsAction, ProductsArgs};
use crate::config::Config;
use crate::domain::NewProduct;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

pub async fn execute(args: ProductsArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let services = Services::from_connection(db.get_connection(), config);

    match args.action {
        ProductsAction::Add {
            name,
            price,
            category,
            description,
        } => {
            let product = services
                .products()
                .create_product(NewProduct {
                    name,
                    price,
                    category,
                    description,
                    image: None,
                })
                .await?;
            println!("Added {} ({})", product.name, product.id);
        }
        ProductsAction::List => {
            for product in services.products().list_products().await? {
                println!(
                    "{}\t{}\t{:.2}\t{}",
                    product.id, product.name, product.price, product.category
                );
            }
        }
    }

    Ok(())
}
