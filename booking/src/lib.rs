//! # Mandap Booking
//!
//! Venue booking with optional photography, catering and room add-ons.
//!
//! The booking form is a reducer ([`BookingReducer`]) over [`BookingState`]:
//! - the user's choices live in a [`BookingSelection`]
//! - catalogs are fetched through a [`CatalogService`] into one [`CatalogSnapshot`]
//! - the total is derived on demand by [`compute_total`]
//! - a valid submission is handed to a [`PaymentGateway`]
//!
//! A second reducer, [`RoomDetailsReducer`], drives the room details view.
//!
//! ## Example
//!
//! ```
//! use mandap_booking::{
//!     compute_total, AddOn, BookingSelection, CatalogSnapshot, RoomClass, RoomListing,
//!     RoomRatePolicy,
//! };
//!
//! let mut catalog = CatalogSnapshot::new(RoomRatePolicy::default());
//! let mut selection = BookingSelection::new();
//! selection.toggle_add_on(AddOn::Rooms, true);
//! selection.set_room_count(RoomClass::Ac, 2, 10);
//!
//! // Nothing is charged while catalogs are still loading
//! assert_eq!(compute_total(&selection, &catalog).rupees(), 0);
//!
//! catalog.rooms = Some(RoomListing::default());
//! assert_eq!(compute_total(&selection, &catalog).rupees(), 10_000);
//! ```

pub mod actions;
pub mod catalog;
pub mod config;
pub mod error;
pub mod payment_gateway;
pub mod pricing;
pub mod reducer;
pub mod room_details;
pub mod selection;
pub mod services;
pub mod state;
pub mod types;

pub use actions::BookingAction;
pub use catalog::{
    CatalogKind, CatalogSnapshot, CateringPlan, CatererOption, PhotographerOption,
    PhotographyCategory, RoomClassListing, RoomListing, RoomRatePolicy, VenueCatalogEntry,
};
pub use config::BookingConfig;
pub use error::{CatalogError, PaymentError, SelectionError, SubmissionError};
pub use payment_gateway::{MockPaymentGateway, PaymentGateway, PaymentRedirect};
pub use pricing::{compute_total, price_breakdown, PriceBreakdown};
pub use reducer::{BookingEnvironment, BookingReducer};
pub use room_details::{
    RoomDetailsAction, RoomDetailsEnvironment, RoomDetailsReducer, RoomDetailsState,
    RoomDetailsStatus,
};
pub use selection::{BookingSelection, StaleSelectionPolicy};
pub use services::{CatalogService, HttpCatalogService, InMemoryCatalogService};
pub use state::{BookingState, BookingSubmission, CatalogStatus, FlowStatus};
pub use types::{AddOn, CatererId, Generation, Money, PhotographerId, RoomClass, VenueId};
