//! Tenant repository trait (port)

use async_trait::async_trait;
use moorage_shared::EntityId;

use crate::domain::Tenant;
use crate::error::DomainError;

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Tenant>, DomainError>;
}
