//! User repository trait (port)

use async_trait::async_trait;
use moorage_shared::EntityId;

use crate::domain::User;
use crate::error::DomainError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(
        &self,
        tenant_id: EntityId,
        id: EntityId,
    ) -> Result<Option<User>, DomainError>;
}
