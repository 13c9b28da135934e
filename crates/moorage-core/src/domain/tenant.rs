//! Tenant entity with business-type dispatch

use chrono::{DateTime, Utc};
use moorage_shared::EntityId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Business type enumeration. Selects the reservation handler for a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Marina,
    Hotel,
    Restaurant,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Marina => "marina",
            BusinessType::Hotel => "hotel",
            BusinessType::Restaurant => "restaurant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "marina" => Some(BusinessType::Marina),
            "hotel" => Some(BusinessType::Hotel),
            "restaurant" => Some(BusinessType::Restaurant),
            _ => None,
        }
    }
}

/// Tenant entity: the isolation boundary for one business.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Tenant {
    pub id: EntityId,

    #[validate(length(min = 2, max = 100, message = "Tenant name must be between 2 and 100 characters"))]
    pub name: String,

    pub business_type: BusinessType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(name: String, business_type: BusinessType) -> Result<Self, validator::ValidationErrors> {
        let tenant = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            business_type,
            is_active: true,
            created_at: Utc::now(),
        };

        tenant.validate()?;
        Ok(tenant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tenant() {
        let tenant = Tenant::new("Main Marina".to_string(), BusinessType::Marina);
        assert!(tenant.is_ok());
    }

    #[test]
    fn test_short_name_rejected() {
        let tenant = Tenant::new("x".to_string(), BusinessType::Marina);
        assert!(tenant.is_err());
    }

    #[test]
    fn test_business_type_round_trip() {
        for ty in [BusinessType::Marina, BusinessType::Hotel, BusinessType::Restaurant] {
            assert_eq!(BusinessType::from_str(ty.as_str()), Some(ty));
        }
        assert_eq!(BusinessType::from_str("laundromat"), None);
    }
}
