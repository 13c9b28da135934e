//! User domain entity

use chrono::{DateTime, Utc};
use moorage_shared::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: EntityId,
    pub tenant_id: EntityId,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
