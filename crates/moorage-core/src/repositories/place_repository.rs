//! Place repository trait (port)

use async_trait::async_trait;
use moorage_shared::EntityId;

use crate::domain::Place;
use crate::error::DomainError;

/// Every lookup is tenant-scoped: a place id belonging to another tenant
/// behaves exactly like a missing id.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn find_by_id(
        &self,
        tenant_id: EntityId,
        id: EntityId,
    ) -> Result<Option<Place>, DomainError>;

    async fn list_by_tenant(&self, tenant_id: EntityId) -> Result<Vec<Place>, DomainError>;

    async fn create(&self, place: &Place) -> Result<Place, DomainError>;

    async fn update(&self, place: &Place) -> Result<Place, DomainError>;
}
