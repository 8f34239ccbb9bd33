//! Customer record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Customer, optionally linked one-to-one with a login identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Linked login identity (self-registered customers only)
    pub user_id: Option<Uuid>,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[schema(example = "+1 555 0100")]
    pub phone: Option<String>,
    #[schema(example = "profile1.png")]
    pub profile_pic: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// Validated field values for creating or editing a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_pic: Option<String>,
}
