//! Booking flow state.

use crate::catalog::{CatalogKind, CatalogSnapshot, RoomRatePolicy};
use crate::error::SubmissionError;
use crate::pricing::{compute_total, price_breakdown, PriceBreakdown};
use crate::selection::BookingSelection;
use crate::types::{CatererId, Generation, Money, PhotographerId, VenueId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the booking flow is
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowStatus {
    /// No booking in progress
    #[default]
    Closed,
    /// Form is open and accepting changes
    Open,
    /// Submission handed to the payment gateway
    Submitting,
    /// Payment session created; the user should be sent to `redirect_url`
    AwaitingPayment {
        /// Payment page
        redirect_url: String,
    },
}

impl FlowStatus {
    /// True while the form accepts changes
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Load state of one catalog
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogStatus {
    /// Not requested in this session
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Catalog available in the snapshot
    Loaded,
    /// Request failed; the form keeps working without this catalog
    Failed(String),
}

/// Load state of every catalog
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLoadStatus {
    /// Venue pricing
    pub venue: CatalogStatus,
    /// Photographer list
    pub photographers: CatalogStatus,
    /// Caterer list
    pub caterers: CatalogStatus,
    /// Room listing
    pub rooms: CatalogStatus,
}

impl CatalogLoadStatus {
    /// Every catalog marked as loading
    #[must_use]
    pub fn loading() -> Self {
        Self {
            venue: CatalogStatus::Loading,
            photographers: CatalogStatus::Loading,
            caterers: CatalogStatus::Loading,
            rooms: CatalogStatus::Loading,
        }
    }

    /// Status of one catalog
    #[must_use]
    pub const fn get(&self, kind: CatalogKind) -> &CatalogStatus {
        match kind {
            CatalogKind::Venue => &self.venue,
            CatalogKind::Photographers => &self.photographers,
            CatalogKind::Caterers => &self.caterers,
            CatalogKind::Rooms => &self.rooms,
        }
    }

    /// Updates one catalog's status
    pub fn set(&mut self, kind: CatalogKind, status: CatalogStatus) {
        let slot = match kind {
            CatalogKind::Venue => &mut self.venue,
            CatalogKind::Photographers => &mut self.photographers,
            CatalogKind::Caterers => &mut self.caterers,
            CatalogKind::Rooms => &mut self.rooms,
        };
        *slot = status;
    }

    /// True once no catalog is still loading
    #[must_use]
    pub fn is_settled(&self) -> bool {
        CatalogKind::ALL
            .into_iter()
            .all(|kind| *self.get(kind) != CatalogStatus::Loading)
    }
}

/// Photography as submitted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotographyChoice {
    /// Photographer id
    pub photographer_id: PhotographerId,
    /// Photographer display name
    pub photographer_name: String,
    /// Category label
    pub category: String,
    /// Category price
    pub price: Money,
}

/// Catering as submitted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CateringChoice {
    /// Caterer id
    pub caterer_id: CatererId,
    /// Caterer display name
    pub caterer_name: String,
    /// Plan name
    pub plan: String,
    /// Plan price
    pub price: Money,
}

/// Rooms as submitted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomChoice {
    /// AC rooms
    pub ac: u32,
    /// Non-AC rooms
    pub non_ac: u32,
}

/// Finalized booking handed to the payment gateway
///
/// Only add-ons that are switched on and resolve against the catalog are
/// included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSubmission {
    /// Venue being booked
    pub venue_id: VenueId,
    /// Event dates, ascending
    pub dates: Vec<NaiveDate>,
    /// Event address, trimmed
    pub address: String,
    /// Photography, if booked
    pub photography: Option<PhotographyChoice>,
    /// Catering, if booked
    pub catering: Option<CateringChoice>,
    /// Rooms, if booked
    pub rooms: Option<RoomChoice>,
    /// Itemised price
    pub breakdown: PriceBreakdown,
    /// Amount to charge
    pub total: Money,
    /// When the user submitted
    pub submitted_at: DateTime<Utc>,
}

impl BookingSubmission {
    /// Snapshots a selection
    #[must_use]
    pub fn snapshot(
        venue_id: VenueId,
        selection: &BookingSelection,
        catalog: &CatalogSnapshot,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let breakdown = price_breakdown(selection, catalog);

        let photography = selection
            .add_ons
            .photography
            .then_some(&selection.photography)
            .and_then(|chosen| {
                let photographer = catalog.photographer(chosen.photographer.as_ref()?)?;
                let category = photographer.category(chosen.category.as_deref()?)?;
                Some(PhotographyChoice {
                    photographer_id: photographer.id.clone(),
                    photographer_name: photographer.name.clone(),
                    category: category.label.clone(),
                    price: category.price_per_event,
                })
            });

        let catering = selection
            .add_ons
            .catering
            .then_some(&selection.catering)
            .and_then(|chosen| {
                let caterer = catalog.caterer(chosen.caterer.as_ref()?)?;
                let plan = caterer.plan(chosen.plan.as_deref()?)?;
                Some(CateringChoice {
                    caterer_id: caterer.id.clone(),
                    caterer_name: caterer.name.clone(),
                    plan: plan.name.clone(),
                    price: plan.price,
                })
            });

        let rooms = (selection.add_ons.rooms
            && catalog.rooms.is_some()
            && !selection.rooms.is_empty())
        .then_some(RoomChoice {
            ac: selection.rooms.ac,
            non_ac: selection.rooms.non_ac,
        });

        Self {
            venue_id,
            dates: selection.dates.iter().copied().collect(),
            address: selection.address.trim().to_string(),
            photography,
            catering,
            rooms,
            breakdown,
            total: breakdown.total,
            submitted_at,
        }
    }
}

/// State of the booking flow for one venue
#[derive(Clone, Debug, Default)]
pub struct BookingState {
    /// Flow position
    pub flow: FlowStatus,
    /// Current session generation
    pub generation: Generation,
    /// Venue being booked
    pub venue_id: Option<VenueId>,
    /// Dates the venue can be booked on
    pub availability: BTreeSet<NaiveDate>,
    /// User's choices
    pub selection: BookingSelection,
    /// Catalogs loaded for this session
    pub catalog: CatalogSnapshot,
    /// Per-catalog load state
    pub catalog_status: CatalogLoadStatus,
    /// Last error message (rejected selection or payment failure)
    pub last_error: Option<String>,
    /// Reasons the last submission attempt was blocked
    pub validation_errors: Vec<SubmissionError>,
    /// Last accepted submission
    pub last_submission: Option<BookingSubmission>,
}

impl BookingState {
    /// Creates a closed booking state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets everything for a new session, keeping nothing from the last one
    pub(crate) fn open(
        &mut self,
        venue_id: VenueId,
        available_dates: impl IntoIterator<Item = NaiveDate>,
        room_rates: RoomRatePolicy,
    ) -> Generation {
        *self = Self {
            flow: FlowStatus::Open,
            generation: self.generation.next(),
            venue_id: Some(venue_id),
            availability: available_dates.into_iter().collect(),
            catalog: CatalogSnapshot::new(room_rates),
            catalog_status: CatalogLoadStatus::loading(),
            ..Self::default()
        };
        self.generation
    }

    /// Discards the session
    pub(crate) fn close(&mut self) {
        *self = Self {
            generation: self.generation.next(),
            ..Self::default()
        };
    }

    /// True if an asynchronous result tagged with `generation` still applies
    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.flow != FlowStatus::Closed && self.generation == generation
    }

    /// Current total
    #[must_use]
    pub fn total(&self) -> Money {
        compute_total(&self.selection, &self.catalog)
    }

    /// Current itemised price
    #[must_use]
    pub fn breakdown(&self) -> PriceBreakdown {
        price_breakdown(&self.selection, &self.catalog)
    }

    /// Checks the selection can be submitted
    ///
    /// # Errors
    ///
    /// Returns every reason the submission is blocked.
    pub fn validate_submission(&self) -> Result<(), Vec<SubmissionError>> {
        let mut errors = Vec::new();

        if self.selection.address.trim().is_empty() {
            errors.push(SubmissionError::MissingAddress);
        }

        if self.selection.dates.is_empty() {
            errors.push(SubmissionError::NoDatesSelected);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PhotographerOption, PhotographyCategory, VenueCatalogEntry};
    use crate::selection::StaleSelectionPolicy;
    use crate::types::AddOn;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap_or_default()
    }

    #[test]
    fn test_open_bumps_generation_and_resets() {
        let mut state = BookingState::new();
        state.last_error = Some("old".to_string());

        let generation = state.open(VenueId::new("m-1"), [day(1)], RoomRatePolicy::default());

        assert_eq!(generation, Generation::default().next());
        assert!(state.flow.is_open());
        assert_eq!(state.last_error, None);
        assert!(!state.catalog_status.is_settled());
        assert!(state.is_current(generation));
    }

    #[test]
    fn test_close_invalidates_generation() {
        let mut state = BookingState::new();
        let generation = state.open(VenueId::new("m-1"), [day(1)], RoomRatePolicy::default());

        state.close();

        assert!(!state.is_current(generation));
        assert_eq!(state.flow, FlowStatus::Closed);
        assert!(state.availability.is_empty());
    }

    #[test]
    fn test_validation_lists_every_problem() {
        let mut state = BookingState::new();
        state.selection.set_address("   ");

        assert_eq!(
            state.validate_submission(),
            Err(vec![
                SubmissionError::MissingAddress,
                SubmissionError::NoDatesSelected
            ])
        );
    }

    #[test]
    fn test_snapshot_includes_only_valid_add_ons() {
        let mut selection = BookingSelection::new();
        let catalog = CatalogSnapshot {
            venue: Some(VenueCatalogEntry {
                id: VenueId::new("m-1"),
                name: "Lotus Mandap".to_string(),
                base_price: Money::from_rupees(50_000),
            }),
            photographers: Some(vec![PhotographerOption {
                id: PhotographerId::new("1"),
                name: "John Doe Photography".to_string(),
                categories: vec![PhotographyCategory::new("Candid", Money::from_rupees(25_000))],
            }]),
            ..CatalogSnapshot::default()
        };

        selection.set_address("  12 Temple Road ");
        selection.toggle_add_on(AddOn::Photography, true);
        selection.select_photographer(Some(PhotographerId::new("1")));
        let _ = selection.select_photography_category(
            "Candid",
            catalog.photographers.as_deref(),
            StaleSelectionPolicy::Degrade,
        );
        selection.toggle_add_on(AddOn::Catering, true);
        selection.select_caterer(Some(CatererId::new("missing")));

        let submission = BookingSubmission::snapshot(
            VenueId::new("m-1"),
            &selection,
            &catalog,
            DateTime::<Utc>::default(),
        );

        assert_eq!(submission.address, "12 Temple Road");
        assert_eq!(
            submission.photography.map(|p| p.photographer_name),
            Some("John Doe Photography".to_string())
        );
        assert_eq!(submission.catering, None);
        assert_eq!(submission.rooms, None);
        assert_eq!(submission.total, Money::from_rupees(75_000));
    }
}
