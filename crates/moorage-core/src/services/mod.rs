//! Domain services (business logic)

pub mod availability_service;
pub mod booking_service;
pub mod handler;
pub mod place_service;

pub use availability_service::AvailabilityService;
pub use booking_service::{AdmissionPolicy, BookingService};
pub use handler::{HandlerFactory, ReservationHandler};
pub use place_service::PlaceService;

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared mockall doubles for the repository ports.

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use mockall::mock;
    use moorage_shared::{DateRange, EntityId};

    use crate::domain::{
        DayOccupancy, Place, Reservation, ReservationDetail, ReservationDraft, ReservationView,
        Tenant, User,
    };
    use crate::error::DomainError;
    use crate::repositories::{
        PlaceRepository, ReservationRepository, TenantRepository, UserRepository,
    };

    mock! {
        pub Tenants {}

        #[async_trait]
        impl TenantRepository for Tenants {
            async fn find_by_id(&self, id: EntityId) -> Result<Option<Tenant>, DomainError>;
        }
    }

    mock! {
        pub Places {}

        #[async_trait]
        impl PlaceRepository for Places {
            async fn find_by_id(
                &self,
                tenant_id: EntityId,
                id: EntityId,
            ) -> Result<Option<Place>, DomainError>;
            async fn list_by_tenant(&self, tenant_id: EntityId) -> Result<Vec<Place>, DomainError>;
            async fn create(&self, place: &Place) -> Result<Place, DomainError>;
            async fn update(&self, place: &Place) -> Result<Place, DomainError>;
        }
    }

    mock! {
        pub Users {}

        #[async_trait]
        impl UserRepository for Users {
            async fn find_by_id(
                &self,
                tenant_id: EntityId,
                id: EntityId,
            ) -> Result<Option<User>, DomainError>;
        }
    }

    mock! {
        pub Reservations {}

        #[async_trait]
        impl ReservationRepository for Reservations {
            async fn daily_occupancy(
                &self,
                tenant_id: EntityId,
                place_id: EntityId,
                range: DateRange,
            ) -> Result<Vec<DayOccupancy>, DomainError>;
            async fn admit(
                &self,
                tenant_id: EntityId,
                draft: &ReservationDraft,
                booked_on: NaiveDate,
            ) -> Result<EntityId, DomainError>;
            async fn reschedule(
                &self,
                envelope: &Reservation,
                detail: &ReservationDetail,
            ) -> Result<(), DomainError>;
            async fn find_by_id(
                &self,
                tenant_id: EntityId,
                id: EntityId,
            ) -> Result<Option<(Reservation, ReservationDetail)>, DomainError>;
            async fn delete(&self, tenant_id: EntityId, id: EntityId) -> Result<bool, DomainError>;
            async fn list(
                &self,
                tenant_id: EntityId,
                user_id: Option<EntityId>,
            ) -> Result<Vec<ReservationView>, DomainError>;
        }
    }

    pub fn place(tenant_id: EntityId, capacity: i32) -> Place {
        Place::new(
            tenant_id,
            crate::domain::NewPlace {
                name: "North dock".to_string(),
                description: None,
                zone: None,
                capacity,
            },
        )
        .unwrap()
    }

    pub fn user(tenant_id: EntityId) -> User {
        User {
            id: moorage_shared::new_id(),
            tenant_id,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            is_active: true,
            created_at: chrono::Utc::now(),
        }
    }
}
