//! Actions accepted by the booking reducer.

use crate::catalog::{CatalogKind, CatererOption, PhotographerOption, RoomListing, VenueCatalogEntry};
use crate::error::SubmissionError;
use crate::types::{AddOn, CatererId, Generation, PhotographerId, RoomClass, VenueId};
use chrono::NaiveDate;
use mandap_macros::Action;
use serde::{Deserialize, Serialize};

/// Commands from the user and events from catalog and payment calls
///
/// Events that answer an asynchronous call carry the [`Generation`] of the
/// session that made it.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingAction {
    // ========== Commands ==========
    /// Command: Open the booking form for a venue
    #[command]
    OpenBooking {
        /// Venue to book
        venue_id: VenueId,
        /// Dates the venue can be booked on
        available_dates: Vec<NaiveDate>,
    },

    /// Command: Close the form and discard the selection
    #[command]
    CloseBooking,

    /// Command: Switch an add-on on or off
    #[command]
    ToggleAddOn {
        /// Add-on to switch
        add_on: AddOn,
        /// New state
        enabled: bool,
    },

    /// Command: Include or exclude an event date
    #[command]
    SelectDate {
        /// Calendar day
        date: NaiveDate,
        /// Include (true) or exclude (false)
        included: bool,
    },

    /// Command: Set the event address
    #[command]
    SetAddress {
        /// Free-text address
        address: String,
    },

    /// Command: Choose or clear the photographer
    #[command]
    SelectPhotographer {
        /// Photographer, or `None` to clear
        photographer_id: Option<PhotographerId>,
    },

    /// Command: Choose a photography category
    #[command]
    SelectPhotographyCategory {
        /// Category label
        label: String,
    },

    /// Command: Choose or clear the caterer
    #[command]
    SelectCaterer {
        /// Caterer, or `None` to clear
        caterer_id: Option<CatererId>,
    },

    /// Command: Choose a catering plan
    #[command]
    SelectCateringPlan {
        /// Plan name
        plan: String,
    },

    /// Command: Set the number of rooms of one class
    #[command]
    SetRoomCount {
        /// Room class
        class: RoomClass,
        /// Requested count; clamped to the configured bound
        count: i64,
    },

    /// Command: Validate and hand the booking to the payment gateway
    #[command]
    SubmitBooking,

    // ========== Events ==========
    /// Event: Venue pricing arrived
    #[event]
    VenueLoaded {
        /// Session that requested it
        generation: Generation,
        /// Venue entry
        venue: VenueCatalogEntry,
    },

    /// Event: Photographer list arrived
    #[event]
    PhotographersLoaded {
        /// Session that requested it
        generation: Generation,
        /// Photographers
        photographers: Vec<PhotographerOption>,
    },

    /// Event: Caterer list arrived
    #[event]
    CaterersLoaded {
        /// Session that requested it
        generation: Generation,
        /// Caterers
        caterers: Vec<CatererOption>,
    },

    /// Event: Room listing arrived
    #[event]
    RoomsLoaded {
        /// Session that requested it
        generation: Generation,
        /// Room listing
        rooms: RoomListing,
    },

    /// Event: A catalog request failed
    #[event]
    CatalogFetchFailed {
        /// Session that requested it
        generation: Generation,
        /// Catalog that failed
        catalog: CatalogKind,
        /// Error message
        reason: String,
    },

    /// Event: A selection was refused under the strict policy
    #[event]
    SelectionRejected {
        /// Error message
        reason: String,
    },

    /// Event: Submission blocked by validation
    #[event]
    SubmissionRejected {
        /// Every blocking problem
        errors: Vec<SubmissionError>,
    },

    /// Event: Payment session created
    #[event]
    PaymentInitiated {
        /// Session that submitted
        generation: Generation,
        /// Payment page
        redirect_url: String,
    },

    /// Event: Payment session could not be created
    #[event]
    PaymentFailed {
        /// Session that submitted
        generation: Generation,
        /// Error message
        reason: String,
    },
}
