//! Catalog service abstraction.
//!
//! The booking reducer only sees [`CatalogService`]. Production wiring uses
//! [`HttpCatalogService`]; tests and the demo use [`InMemoryCatalogService`].

use crate::catalog::{CatererOption, PhotographerOption, RoomListing, VenueCatalogEntry};
use crate::error::CatalogError;
use crate::types::VenueId;
use std::future::Future;
use std::pin::Pin;

mod http;
mod in_memory;

pub use http::HttpCatalogService;
pub use in_memory::InMemoryCatalogService;

/// Catalog service result
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Boxed future returned by every catalog call
pub type CatalogFuture<T> = Pin<Box<dyn Future<Output = CatalogResult<T>> + Send>>;

/// Source of venue, photographer, caterer and room catalogs
///
/// Each call is independent; a failure in one must not affect the others.
/// The returned futures own everything they need, so they can be moved into
/// spawned effects.
pub trait CatalogService: Send + Sync {
    /// Venue pricing
    ///
    /// # Errors
    ///
    /// Returns error if the venue cannot be fetched or decoded
    fn fetch_venue(&self, venue_id: &VenueId) -> CatalogFuture<VenueCatalogEntry>;

    /// Photographers offered at the venue
    ///
    /// # Errors
    ///
    /// Returns error if the list cannot be fetched or decoded
    fn fetch_photographers(&self, venue_id: &VenueId) -> CatalogFuture<Vec<PhotographerOption>>;

    /// Caterers offered at the venue
    ///
    /// # Errors
    ///
    /// Returns error if the list cannot be fetched or decoded
    fn fetch_caterers(&self, venue_id: &VenueId) -> CatalogFuture<Vec<CatererOption>>;

    /// Room listing for the venue
    ///
    /// # Errors
    ///
    /// Returns error if the listing cannot be fetched or decoded
    fn fetch_rooms(&self, venue_id: &VenueId) -> CatalogFuture<RoomListing>;
}
