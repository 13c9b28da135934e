//! Booking service: admission control and reservation lifecycle

use std::sync::Arc;

use chrono::Utc;
use moorage_shared::EntityId;
use tracing::{info, warn};

use crate::domain::{ReservationDraft, ReservationPatch, ReservationView};
use crate::error::DomainError;
use crate::repositories::{PlaceRepository, ReservationRepository, UserRepository};

/// Role-derived capabilities passed into the shared admission core. The
/// algorithm is identical for self-service and administrative callers;
/// only these flags differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionPolicy {
    /// Allows reservations starting before today (administrative backfill).
    pub allow_past_dates: bool,
    /// Allows booking and editing on behalf of another user.
    pub allow_on_behalf: bool,
}

impl AdmissionPolicy {
    pub const SELF_SERVICE: Self = Self {
        allow_past_dates: false,
        allow_on_behalf: false,
    };

    pub const ADMINISTRATIVE: Self = Self {
        allow_past_dates: true,
        allow_on_behalf: true,
    };
}

/// Admission controller plus lifecycle manager for the two-record
/// reservation structure. Validation is fail-fast and ordered; the final
/// capacity check and the write run inside one storage transaction in the
/// repository, so a rejection never leaves partial state.
pub struct BookingService<P, U, R>
where
    P: PlaceRepository,
    U: UserRepository,
    R: ReservationRepository,
{
    place_repo: Arc<P>,
    user_repo: Arc<U>,
    reservation_repo: Arc<R>,
}

impl<P, U, R> BookingService<P, U, R>
where
    P: PlaceRepository,
    U: UserRepository,
    R: ReservationRepository,
{
    pub fn new(place_repo: Arc<P>, user_repo: Arc<U>, reservation_repo: Arc<R>) -> Self {
        Self {
            place_repo,
            user_repo,
            reservation_repo,
        }
    }

    /// Admits or rejects a candidate reservation.
    pub async fn create(
        &self,
        tenant_id: EntityId,
        caller_id: EntityId,
        policy: AdmissionPolicy,
        draft: ReservationDraft,
    ) -> Result<EntityId, DomainError> {
        // 1. Required fields
        if draft.vessel_type.trim().is_empty() {
            return Err(DomainError::InvalidInput("vessel_type is required".into()));
        }
        if draft.user_id != caller_id && !policy.allow_on_behalf {
            warn!(tenant_id = %tenant_id, caller_id = %caller_id, "Booking on behalf denied");
            return Err(DomainError::Forbidden("book for another user".into()));
        }

        // 2. Temporal coherence
        if draft.exit_date < draft.entry_date {
            return Err(DomainError::InvalidRange);
        }

        // 3. No retroactive booking without the backfill capability
        let today = Utc::now().date_naive();
        if draft.entry_date < today && !policy.allow_past_dates {
            return Err(DomainError::PastDate);
        }

        // 4. Place exists, is the tenant's, and is active
        let place = self
            .place_repo
            .find_by_id(tenant_id, draft.place_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(DomainError::PlaceNotFound)?;

        // 5. User exists and is the tenant's
        self.user_repo
            .find_by_id(tenant_id, draft.user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        // 6+7. Capacity re-check and insert, one transaction in the store
        let id = self.reservation_repo.admit(tenant_id, &draft, today).await?;

        info!(
            tenant_id = %tenant_id,
            reservation_id = %id,
            place_id = %place.id,
            "Reservation admitted"
        );
        Ok(id)
    }

    /// Partial edit of an existing reservation. Span or place changes
    /// re-run the capacity check for the new span, excluding the
    /// reservation's own current row.
    pub async fn edit(
        &self,
        tenant_id: EntityId,
        reservation_id: EntityId,
        policy: AdmissionPolicy,
        patch: ReservationPatch,
    ) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Err(DomainError::InvalidInput("no fields to update".into()));
        }
        if let Some(vessel_type) = &patch.vessel_type {
            if vessel_type.trim().is_empty() {
                return Err(DomainError::InvalidInput("vessel_type is required".into()));
            }
        }

        let (mut envelope, mut detail) = self
            .reservation_repo
            .find_by_id(tenant_id, reservation_id)
            .await?
            .ok_or(DomainError::NotFound)?;

        let entry_changed = patch.entry_date.is_some();

        if let Some(place_id) = patch.place_id {
            // Destination place must be the tenant's and active.
            self.place_repo
                .find_by_id(tenant_id, place_id)
                .await?
                .filter(|p| p.is_active)
                .ok_or(DomainError::PlaceNotFound)?;
            envelope.place_id = place_id;
        }
        if let Some(user_id) = patch.user_id {
            if !policy.allow_on_behalf {
                return Err(DomainError::Forbidden("reassign a reservation".into()));
            }
            self.user_repo
                .find_by_id(tenant_id, user_id)
                .await?
                .ok_or(DomainError::UserNotFound)?;
            envelope.user_id = user_id;
        }
        if let Some(entry_date) = patch.entry_date {
            detail.entry_date = entry_date;
        }
        if let Some(exit_date) = patch.exit_date {
            detail.exit_date = exit_date;
        }
        if let Some(vessel_type) = patch.vessel_type {
            detail.vessel_type = vessel_type.trim().to_string();
        }
        if let Some(painting) = patch.painting {
            detail.flags.painting = painting;
        }
        if let Some(mechanic) = patch.mechanic {
            detail.flags.mechanic = mechanic;
        }
        if let Some(engine) = patch.engine {
            detail.flags.engine = engine;
        }

        if detail.exit_date < detail.entry_date {
            return Err(DomainError::InvalidRange);
        }
        if entry_changed
            && !policy.allow_past_dates
            && detail.entry_date < Utc::now().date_naive()
        {
            return Err(DomainError::PastDate);
        }

        self.reservation_repo.reschedule(&envelope, &detail).await?;

        info!(
            tenant_id = %tenant_id,
            reservation_id = %reservation_id,
            "Reservation updated"
        );
        Ok(())
    }

    /// Cancels a reservation: hard delete of envelope and detail together.
    pub async fn cancel(
        &self,
        tenant_id: EntityId,
        reservation_id: EntityId,
    ) -> Result<(), DomainError> {
        let deleted = self.reservation_repo.delete(tenant_id, reservation_id).await?;
        if !deleted {
            // Foreign-tenant ids must be indistinguishable from missing ones.
            return Err(DomainError::NotFound);
        }

        info!(
            tenant_id = %tenant_id,
            reservation_id = %reservation_id,
            "Reservation canceled"
        );
        Ok(())
    }

    /// Lists the tenant's reservations, newest entry date first.
    pub async fn list(
        &self,
        tenant_id: EntityId,
        user_id: Option<EntityId>,
    ) -> Result<Vec<ReservationView>, DomainError> {
        self.reservation_repo.list(tenant_id, user_id).await
    }
}
