//! Create-admin command - bootstraps the first administrator.

use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let services = Services::from_connection(db.get_connection(), config);

    let user = services
        .auth()
        .create_admin(args.username, args.email, args.password)
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Administrator created");
    let summary = serde_json::to_string_pretty(&UserResponse::from(user))
        .map_err(|e| AppError::internal(e.to_string()))?;
    println!("{summary}");
    Ok(())
}
