//! Reservation entities: general envelope plus occupancy detail

use chrono::NaiveDate;
use moorage_shared::{DateRange, EntityId};
use serde::{Deserialize, Serialize};

/// Boolean service add-ons requested with a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFlags {
    pub painting: bool,
    pub mechanic: bool,
    pub engine: bool,
}

/// General envelope: the reservation's primary identity. Owns the linked
/// detail record; both live and die together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: EntityId,
    pub tenant_id: EntityId,
    pub place_id: EntityId,
    pub user_id: EntityId,
    /// Date the booking was made, not the occupancy span.
    pub booked_on: NaiveDate,
}

/// Occupancy detail, 1:1 with its envelope. `entry_date..=exit_date` is the
/// occupied span, inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationDetail {
    pub reservation_id: EntityId,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub vessel_type: String,
    pub flags: ServiceFlags,
}

impl ReservationDetail {
    pub fn span(&self) -> DateRange {
        // entry <= exit was checked at admission
        DateRange {
            start: self.entry_date,
            end: self.exit_date,
        }
    }
}

/// A candidate reservation, not yet admitted.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationDraft {
    pub place_id: EntityId,
    pub user_id: EntityId,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub vessel_type: String,
    pub flags: ServiceFlags,
}

/// Partial update for an existing reservation: only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationPatch {
    pub place_id: Option<EntityId>,
    pub user_id: Option<EntityId>,
    pub entry_date: Option<NaiveDate>,
    pub exit_date: Option<NaiveDate>,
    pub vessel_type: Option<String>,
    pub painting: Option<bool>,
    pub mechanic: Option<bool>,
    pub engine: Option<bool>,
}

impl ReservationPatch {
    pub fn is_empty(&self) -> bool {
        self.place_id.is_none()
            && self.user_id.is_none()
            && self.entry_date.is_none()
            && self.exit_date.is_none()
            && self.vessel_type.is_none()
            && self.painting.is_none()
            && self.mechanic.is_none()
            && self.engine.is_none()
    }

    pub fn changes_span(&self) -> bool {
        self.entry_date.is_some() || self.exit_date.is_some() || self.place_id.is_some()
    }
}

/// Listing row: envelope + detail joined with user and place names.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationView {
    pub id: EntityId,
    pub booked_on: NaiveDate,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub vessel_type: String,
    pub flags: ServiceFlags,
    pub user_id: EntityId,
    pub user_name: String,
    pub place_id: EntityId,
    pub place_name: String,
}
