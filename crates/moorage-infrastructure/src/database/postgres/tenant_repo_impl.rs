//! PostgreSQL tenant repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use moorage_core::domain::{BusinessType, Tenant};
use moorage_core::error::DomainError;
use moorage_core::repositories::TenantRepository;

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TenantRow {
    pub id: Uuid,
    pub name: String,
    pub business_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<TenantRow> for Tenant {
    type Error = DomainError;

    fn try_from(row: TenantRow) -> Result<Self, DomainError> {
        let business_type = BusinessType::from_str(&row.business_type).ok_or_else(|| {
            DomainError::UnsupportedBusinessType(row.business_type.clone())
        })?;
        Ok(Tenant {
            id: row.id,
            name: row.name,
            business_type,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(
            r#"
            SELECT id, name, business_type, is_active, created_at
            FROM tenants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding tenant by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(Tenant::try_from).transpose()
    }
}
