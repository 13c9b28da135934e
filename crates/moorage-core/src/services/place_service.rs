//! Place management service

use std::sync::Arc;

use moorage_shared::EntityId;
use tracing::info;

use crate::domain::{NewPlace, Place, PlacePatch};
use crate::error::DomainError;
use crate::repositories::PlaceRepository;

/// Tenant-admin surface for bookable resources: create, partial edit,
/// soft-delete, list.
pub struct PlaceService<P: PlaceRepository> {
    place_repo: Arc<P>,
}

impl<P: PlaceRepository> PlaceService<P> {
    pub fn new(place_repo: Arc<P>) -> Self {
        Self { place_repo }
    }

    pub async fn create(&self, tenant_id: EntityId, new: NewPlace) -> Result<Place, DomainError> {
        let place = Place::new(tenant_id, new)?;
        let created = self.place_repo.create(&place).await?;
        info!(tenant_id = %tenant_id, place_id = %created.id, "Place created");
        Ok(created)
    }

    pub async fn edit(
        &self,
        tenant_id: EntityId,
        place_id: EntityId,
        patch: PlacePatch,
    ) -> Result<Place, DomainError> {
        if patch.is_empty() {
            return Err(DomainError::InvalidInput("no fields to update".into()));
        }

        let mut place = self
            .place_repo
            .find_by_id(tenant_id, place_id)
            .await?
            .ok_or(DomainError::PlaceNotFound)?;

        place.apply(patch)?;
        self.place_repo.update(&place).await
    }

    /// Soft delete: the place stays referenced by its reservation history.
    pub async fn deactivate(
        &self,
        tenant_id: EntityId,
        place_id: EntityId,
    ) -> Result<(), DomainError> {
        let mut place = self
            .place_repo
            .find_by_id(tenant_id, place_id)
            .await?
            .ok_or(DomainError::PlaceNotFound)?;

        place.deactivate();
        self.place_repo.update(&place).await?;
        info!(tenant_id = %tenant_id, place_id = %place_id, "Place deactivated");
        Ok(())
    }

    pub async fn list(&self, tenant_id: EntityId) -> Result<Vec<Place>, DomainError> {
        self.place_repo.list_by_tenant(tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{place, MockPlaces};
    use moorage_shared::new_id;

    #[tokio::test]
    async fn test_create_validates_capacity() {
        let svc = PlaceService::new(Arc::new(MockPlaces::new()));
        let err = svc
            .create(
                new_id(),
                NewPlace {
                    name: "South dock".to_string(),
                    description: None,
                    zone: None,
                    capacity: 0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_edit_foreign_place_is_place_not_found() {
        let mut places = MockPlaces::new();
        places.expect_find_by_id().returning(|_, _| Ok(None));

        let svc = PlaceService::new(Arc::new(places));
        let patch = PlacePatch {
            capacity: Some(5),
            ..Default::default()
        };
        let err = svc.edit(new_id(), new_id(), patch).await.unwrap_err();
        assert!(matches!(err, DomainError::PlaceNotFound));
    }

    #[tokio::test]
    async fn test_deactivate_persists_inactive_place() {
        let tenant_id = new_id();
        let existing = place(tenant_id, 3);
        let place_id = existing.id;

        let mut places = MockPlaces::new();
        places
            .expect_find_by_id()
            .returning(move |_, _| Ok(Some(existing.clone())));
        places
            .expect_update()
            .withf(|p| !p.is_active)
            .returning(|p| Ok(p.clone()));

        let svc = PlaceService::new(Arc::new(places));
        svc.deactivate(tenant_id, place_id).await.unwrap();
    }
}
