//! In-memory catalog service for development and testing.

use super::{CatalogFuture, CatalogService};
use crate::catalog::{
    CatalogKind, CateringPlan, CatererOption, PhotographerOption, PhotographyCategory,
    RoomClassListing, RoomListing, VenueCatalogEntry,
};
use crate::error::CatalogError;
use crate::types::{CatererId, Money, PhotographerId, VenueId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

/// Catalogs for one venue
#[derive(Clone, Debug, Default)]
struct VenueCatalogs {
    venue: Option<VenueCatalogEntry>,
    photographers: Vec<PhotographerOption>,
    caterers: Vec<CatererOption>,
    rooms: Option<RoomListing>,
}

/// Catalog service backed by fixed data
///
/// Built once with the `with_*` methods and then shared. Individual catalogs
/// can be made to fail, and every call can be delayed, to exercise the
/// loading paths of the booking flow.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalogService {
    venues: HashMap<VenueId, VenueCatalogs>,
    failures: HashSet<CatalogKind>,
    latency: Option<Duration>,
}

impl InMemoryCatalogService {
    /// Creates a service with no venues
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service seeded with a sample venue and its vendors
    #[must_use]
    pub fn with_sample_data(venue_id: &VenueId) -> Self {
        let photographers = vec![
            PhotographerOption {
                id: PhotographerId::new("1"),
                name: "John Doe Photography".to_string(),
                categories: ["Candid", "Cinematic", "Drone", "Traditional"]
                    .into_iter()
                    .map(|label| PhotographyCategory::new(label, Money::from_rupees(25_000)))
                    .collect(),
            },
            PhotographerOption {
                id: PhotographerId::new("2"),
                name: "Creative Shots".to_string(),
                categories: ["Pre-wedding", "Portrait", "Documentary"]
                    .into_iter()
                    .map(|label| PhotographyCategory::new(label, Money::from_rupees(35_000)))
                    .collect(),
            },
        ];

        let caterers = vec![CatererOption {
            id: CatererId::new("1"),
            name: "Royal Caterers".to_string(),
            plans: vec![
                sample_plan("Basic", 800, &["North Indian", "South Indian", "Chinese"]),
                sample_plan(
                    "Premium",
                    1_200,
                    &["North Indian", "South Indian", "Chinese", "Continental"],
                ),
                sample_plan(
                    "Luxury",
                    1_500,
                    &["All Cuisines", "Live Counters", "Dessert Station"],
                ),
            ],
        }];

        let rooms = RoomListing {
            ac: Some(RoomClassListing {
                available: 6,
                price_per_night: Money::from_rupees(5_000),
                amenities: vec!["Air conditioning".to_string(), "Wi-Fi".to_string()],
                images: vec![
                    "/images/rooms/ac-1.jpg".to_string(),
                    "/images/rooms/ac-2.jpg".to_string(),
                    "/images/rooms/ac-3.jpg".to_string(),
                ],
            }),
            non_ac: Some(RoomClassListing {
                available: 10,
                price_per_night: Money::from_rupees(3_000),
                amenities: vec!["Ceiling fan".to_string()],
                images: vec!["/images/rooms/non-ac-1.jpg".to_string()],
            }),
        };

        Self::new()
            .with_venue(VenueCatalogEntry {
                id: venue_id.clone(),
                name: "Lotus Mandap".to_string(),
                base_price: Money::from_rupees(50_000),
            })
            .with_photographers(venue_id, photographers)
            .with_caterers(venue_id, caterers)
            .with_rooms(venue_id, rooms)
    }

    /// Adds or replaces a venue entry
    #[must_use]
    pub fn with_venue(mut self, venue: VenueCatalogEntry) -> Self {
        let venue_id = venue.id.clone();
        self.venues.entry(venue_id).or_default().venue = Some(venue);
        self
    }

    /// Sets the photographers offered at a venue
    #[must_use]
    pub fn with_photographers(
        mut self,
        venue_id: &VenueId,
        photographers: Vec<PhotographerOption>,
    ) -> Self {
        self.venues.entry(venue_id.clone()).or_default().photographers = photographers;
        self
    }

    /// Sets the caterers offered at a venue
    #[must_use]
    pub fn with_caterers(mut self, venue_id: &VenueId, caterers: Vec<CatererOption>) -> Self {
        self.venues.entry(venue_id.clone()).or_default().caterers = caterers;
        self
    }

    /// Sets the room listing of a venue
    #[must_use]
    pub fn with_rooms(mut self, venue_id: &VenueId, rooms: RoomListing) -> Self {
        self.venues.entry(venue_id.clone()).or_default().rooms = Some(rooms);
        self
    }

    /// Makes every fetch of one catalog fail
    #[must_use]
    pub fn failing(mut self, kind: CatalogKind) -> Self {
        self.failures.insert(kind);
        self
    }

    /// Delays every call
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Wraps the service for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn CatalogService> {
        Arc::new(self)
    }

    fn respond<T>(
        &self,
        kind: CatalogKind,
        venue_id: &VenueId,
        lookup: impl FnOnce(Option<&VenueCatalogs>) -> Option<T>,
    ) -> CatalogFuture<T>
    where
        T: Send + 'static,
    {
        let result = if self.failures.contains(&kind) {
            Err(CatalogError::Transport(format!(
                "{kind} catalog unavailable"
            )))
        } else {
            lookup(self.venues.get(venue_id)).ok_or_else(|| CatalogError::NotFound {
                catalog: kind.name(),
                venue_id: venue_id.to_string(),
            })
        };
        let latency = self.latency;

        Box::pin(async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }

            tracing::debug!(catalog = %kind, ok = result.is_ok(), "In-memory catalog responded");
            result
        })
    }
}

fn sample_plan(name: &str, price: u64, items: &[&str]) -> CateringPlan {
    CateringPlan {
        name: name.to_string(),
        price: Money::from_rupees(price),
        items: items.iter().map(|item| (*item).to_string()).collect(),
    }
}

impl CatalogService for InMemoryCatalogService {
    fn fetch_venue(&self, venue_id: &VenueId) -> CatalogFuture<VenueCatalogEntry> {
        self.respond(CatalogKind::Venue, venue_id, |catalogs| {
            catalogs.and_then(|c| c.venue.clone())
        })
    }

    fn fetch_photographers(&self, venue_id: &VenueId) -> CatalogFuture<Vec<PhotographerOption>> {
        self.respond(CatalogKind::Photographers, venue_id, |catalogs| {
            Some(catalogs.map(|c| c.photographers.clone()).unwrap_or_default())
        })
    }

    fn fetch_caterers(&self, venue_id: &VenueId) -> CatalogFuture<Vec<CatererOption>> {
        self.respond(CatalogKind::Caterers, venue_id, |catalogs| {
            Some(catalogs.map(|c| c.caterers.clone()).unwrap_or_default())
        })
    }

    fn fetch_rooms(&self, venue_id: &VenueId) -> CatalogFuture<RoomListing> {
        self.respond(CatalogKind::Rooms, venue_id, |catalogs| {
            catalogs.and_then(|c| c.rooms.clone())
        })
    }
}
