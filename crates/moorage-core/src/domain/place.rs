//! Place entity: a capacity-bounded bookable resource

use chrono::{DateTime, Utc};
use moorage_shared::EntityId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A bookable resource owned by exactly one tenant. `capacity` is the
/// maximum number of concurrent reservations per day.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Place {
    pub id: EntityId,
    pub tenant_id: EntityId,

    #[validate(length(min = 1, max = 100, message = "Place name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    #[validate(length(max = 100, message = "Zone too long"))]
    pub zone: Option<String>,

    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a place.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlace {
    pub name: String,
    pub description: Option<String>,
    pub zone: Option<String>,
    pub capacity: i32,
}

/// Partial update: only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub zone: Option<String>,
    pub capacity: Option<i32>,
}

impl PlacePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.zone.is_none()
            && self.capacity.is_none()
    }
}

impl Place {
    pub fn new(tenant_id: EntityId, new: NewPlace) -> Result<Self, validator::ValidationErrors> {
        let place = Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: new.name.trim().to_string(),
            description: new.description.map(|d| d.trim().to_string()),
            zone: new.zone.map(|z| z.trim().to_string()),
            capacity: new.capacity,
            is_active: true,
            created_at: Utc::now(),
        };

        place.validate()?;
        Ok(place)
    }

    /// Applies a partial update and re-validates the result.
    pub fn apply(&mut self, patch: PlacePatch) -> Result<(), validator::ValidationErrors> {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = Some(description.trim().to_string());
        }
        if let Some(zone) = patch.zone {
            self.zone = Some(zone.trim().to_string());
        }
        if let Some(capacity) = patch.capacity {
            self.capacity = capacity;
        }
        self.validate()
    }

    /// Soft delete. Reservations keep referencing the place, so places are
    /// never hard-deleted.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_place(capacity: i32) -> NewPlace {
        NewPlace {
            name: "North dock".to_string(),
            description: None,
            zone: Some("A".to_string()),
            capacity,
        }
    }

    #[test]
    fn test_create_place() {
        let place = Place::new(Uuid::new_v4(), new_place(4));
        assert!(place.is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(Place::new(Uuid::new_v4(), new_place(0)).is_err());
    }

    #[test]
    fn test_patch_cannot_drop_capacity_below_one() {
        let mut place = Place::new(Uuid::new_v4(), new_place(4)).unwrap();
        let patch = PlacePatch { capacity: Some(0), ..Default::default() };
        assert!(place.apply(patch).is_err());
    }

    #[test]
    fn test_deactivate_is_soft() {
        let mut place = Place::new(Uuid::new_v4(), new_place(4)).unwrap();
        place.deactivate();
        assert!(!place.is_active);
        assert_eq!(place.capacity, 4);
    }
}
