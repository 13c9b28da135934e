//! PostgreSQL place repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use moorage_core::domain::Place;
use moorage_core::error::DomainError;
use moorage_core::repositories::PlaceRepository;

pub struct PgPlaceRepository {
    pool: PgPool,
}

impl PgPlaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct PlaceRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub zone: Option<String>,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Place {
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            description: row.description,
            zone: row.zone,
            capacity: row.capacity,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PlaceRepository for PgPlaceRepository {
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Place>, DomainError> {
        let row: Option<PlaceRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, description, zone, capacity, is_active, created_at
            FROM places
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding place by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<Place>, DomainError> {
        let rows: Vec<PlaceRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, description, zone, capacity, is_active, created_at
            FROM places
            WHERE tenant_id = $1
            ORDER BY name
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing places: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, place: &Place) -> Result<Place, DomainError> {
        info!("Creating place: {}", place.name);

        let row: PlaceRow = sqlx::query_as(
            r#"
            INSERT INTO places (id, tenant_id, name, description, zone, capacity, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, tenant_id, name, description, zone, capacity, is_active, created_at
            "#,
        )
        .bind(place.id)
        .bind(place.tenant_id)
        .bind(&place.name)
        .bind(&place.description)
        .bind(&place.zone)
        .bind(place.capacity)
        .bind(place.is_active)
        .bind(place.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating place: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn update(&self, place: &Place) -> Result<Place, DomainError> {
        let row: PlaceRow = sqlx::query_as(
            r#"
            UPDATE places
            SET name = $3,
                description = $4,
                zone = $5,
                capacity = $6,
                is_active = $7
            WHERE id = $1 AND tenant_id = $2
            RETURNING id, tenant_id, name, description, zone, capacity, is_active, created_at
            "#,
        )
        .bind(place.id)
        .bind(place.tenant_id)
        .bind(&place.name)
        .bind(&place.description)
        .bind(&place.zone)
        .bind(place.capacity)
        .bind(place.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating place: {}", e);
            match e {
                sqlx::Error::RowNotFound => DomainError::PlaceNotFound,
                other => DomainError::DatabaseError(other.to_string()),
            }
        })?;

        Ok(row.into())
    }
}
