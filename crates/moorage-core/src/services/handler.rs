//! Business-type dispatch: one reservation handler per business type

use std::sync::Arc;

use async_trait::async_trait;
use moorage_shared::{DateRange, EntityId};

use crate::domain::{
    BusinessType, DayOccupancy, PlaceAvailability, ReservationDraft, ReservationPatch,
    ReservationView, TailPolicy,
};
use crate::error::DomainError;
use crate::repositories::{
    PlaceRepository, ReservationRepository, TenantRepository, UserRepository,
};
use crate::services::{AdmissionPolicy, AvailabilityService, BookingService};

/// Capability interface implemented once per business type. A handler is
/// bound to one tenant; callers obtain it through [`HandlerFactory`].
#[async_trait]
pub trait ReservationHandler: Send + Sync {
    async fn occupancy(
        &self,
        place_id: EntityId,
        range: DateRange,
    ) -> Result<Vec<DayOccupancy>, DomainError>;

    async fn availability(&self, range: DateRange) -> Result<Vec<PlaceAvailability>, DomainError>;

    async fn create(
        &self,
        caller_id: EntityId,
        policy: AdmissionPolicy,
        draft: ReservationDraft,
    ) -> Result<EntityId, DomainError>;

    async fn edit(
        &self,
        reservation_id: EntityId,
        policy: AdmissionPolicy,
        patch: ReservationPatch,
    ) -> Result<(), DomainError>;

    async fn cancel(&self, reservation_id: EntityId) -> Result<(), DomainError>;

    async fn list(&self, user_id: Option<EntityId>) -> Result<Vec<ReservationView>, DomainError>;
}

impl std::fmt::Debug for dyn ReservationHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ReservationHandler")
    }
}

/// Date-ranged berth occupancy: the marina business type.
pub struct MarinaHandler<P, U, R>
where
    P: PlaceRepository,
    U: UserRepository,
    R: ReservationRepository,
{
    tenant_id: EntityId,
    booking: BookingService<P, U, R>,
    availability: AvailabilityService<P, R>,
}

#[async_trait]
impl<P, U, R> ReservationHandler for MarinaHandler<P, U, R>
where
    P: PlaceRepository + 'static,
    U: UserRepository + 'static,
    R: ReservationRepository + 'static,
{
    async fn occupancy(
        &self,
        place_id: EntityId,
        range: DateRange,
    ) -> Result<Vec<DayOccupancy>, DomainError> {
        self.availability.occupancy(self.tenant_id, place_id, range).await
    }

    async fn availability(&self, range: DateRange) -> Result<Vec<PlaceAvailability>, DomainError> {
        self.availability.availability(self.tenant_id, range).await
    }

    async fn create(
        &self,
        caller_id: EntityId,
        policy: AdmissionPolicy,
        draft: ReservationDraft,
    ) -> Result<EntityId, DomainError> {
        self.booking.create(self.tenant_id, caller_id, policy, draft).await
    }

    async fn edit(
        &self,
        reservation_id: EntityId,
        policy: AdmissionPolicy,
        patch: ReservationPatch,
    ) -> Result<(), DomainError> {
        self.booking.edit(self.tenant_id, reservation_id, policy, patch).await
    }

    async fn cancel(&self, reservation_id: EntityId) -> Result<(), DomainError> {
        self.booking.cancel(self.tenant_id, reservation_id).await
    }

    async fn list(&self, user_id: Option<EntityId>) -> Result<Vec<ReservationView>, DomainError> {
        self.booking.list(self.tenant_id, user_id).await
    }
}

/// Resolves a tenant's declared business type into its handler.
/// Unimplemented types fail fast with `UnsupportedBusinessType` instead of
/// a generic lookup failure.
pub struct HandlerFactory<T, P, U, R>
where
    T: TenantRepository,
    P: PlaceRepository,
    U: UserRepository,
    R: ReservationRepository,
{
    tenant_repo: Arc<T>,
    place_repo: Arc<P>,
    user_repo: Arc<U>,
    reservation_repo: Arc<R>,
    tail: TailPolicy,
}

impl<T, P, U, R> HandlerFactory<T, P, U, R>
where
    T: TenantRepository + 'static,
    P: PlaceRepository + 'static,
    U: UserRepository + 'static,
    R: ReservationRepository + 'static,
{
    pub fn new(
        tenant_repo: Arc<T>,
        place_repo: Arc<P>,
        user_repo: Arc<U>,
        reservation_repo: Arc<R>,
        tail: TailPolicy,
    ) -> Self {
        Self {
            tenant_repo,
            place_repo,
            user_repo,
            reservation_repo,
            tail,
        }
    }

    pub async fn handler_for(
        &self,
        tenant_id: EntityId,
    ) -> Result<Arc<dyn ReservationHandler>, DomainError> {
        let tenant = self
            .tenant_repo
            .find_by_id(tenant_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or(DomainError::NotFound)?;

        match tenant.business_type {
            BusinessType::Marina => Ok(Arc::new(MarinaHandler {
                tenant_id,
                booking: BookingService::new(
                    Arc::clone(&self.place_repo),
                    Arc::clone(&self.user_repo),
                    Arc::clone(&self.reservation_repo),
                ),
                availability: AvailabilityService::new(
                    Arc::clone(&self.place_repo),
                    Arc::clone(&self.reservation_repo),
                    self.tail,
                ),
            })),
            other => Err(DomainError::UnsupportedBusinessType(
                other.as_str().to_string(),
            )),
        }
    }
}
