//! Catalog data supplied by the catalog service for one booking session.
//!
//! All catalog types are immutable once loaded. The session holds them in a
//! single [`CatalogSnapshot`]; selections refer to entries by identifier and
//! pricing resolves those identifiers against the snapshot.

use crate::types::{CatererId, Money, PhotographerId, RoomClass, VenueId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Venue pricing entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueCatalogEntry {
    /// Venue identifier
    pub id: VenueId,
    /// Display name
    pub name: String,
    /// Base price for booking the venue
    pub base_price: Money,
}

/// One photography category offered by a photographer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotographyCategory {
    /// Category label, e.g. "Candid"
    pub label: String,
    /// Price per event
    pub price_per_event: Money,
}

impl PhotographyCategory {
    /// Creates a category
    #[must_use]
    pub fn new(label: impl Into<String>, price_per_event: Money) -> Self {
        Self {
            label: label.into(),
            price_per_event,
        }
    }
}

/// Photographer available at a venue
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotographerOption {
    /// Photographer identifier
    pub id: PhotographerId,
    /// Display name
    pub name: String,
    /// Offered categories, in display order
    pub categories: Vec<PhotographyCategory>,
}

impl PhotographerOption {
    /// Looks up a category by its exact label
    #[must_use]
    pub fn category(&self, label: &str) -> Option<&PhotographyCategory> {
        self.categories.iter().find(|category| category.label == label)
    }
}

/// Catering plan offered by a caterer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CateringPlan {
    /// Plan name, e.g. "Premium"
    pub name: String,
    /// Plan price (per plate or flat)
    pub price: Money,
    /// Included cuisines and counters
    pub items: Vec<String>,
}

/// Caterer available at a venue
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatererOption {
    /// Caterer identifier
    pub id: CatererId,
    /// Display name
    pub name: String,
    /// Offered plans, in display order
    pub plans: Vec<CateringPlan>,
}

impl CatererOption {
    /// Looks up a plan by its exact name
    #[must_use]
    pub fn plan(&self, name: &str) -> Option<&CateringPlan> {
        self.plans.iter().find(|plan| plan.name == name)
    }
}

/// Accommodation offered for one room class
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomClassListing {
    /// Number of rooms available
    pub available: u32,
    /// Advertised price per night
    pub price_per_night: Money,
    /// Amenity labels
    pub amenities: Vec<String>,
    /// Image URLs for the carousel
    pub images: Vec<String>,
}

/// Room accommodation listing for a venue
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomListing {
    /// Air-conditioned rooms, if offered
    pub ac: Option<RoomClassListing>,
    /// Non air-conditioned rooms, if offered
    pub non_ac: Option<RoomClassListing>,
}

impl RoomListing {
    /// Listing for one class
    #[must_use]
    pub const fn class(&self, class: RoomClass) -> Option<&RoomClassListing> {
        match class {
            RoomClass::Ac => self.ac.as_ref(),
            RoomClass::NonAc => self.non_ac.as_ref(),
        }
    }

    /// Classes with at least one room available
    #[must_use]
    pub fn visible_classes(&self) -> Vec<RoomClass> {
        RoomClass::ALL
            .into_iter()
            .filter(|class| self.class(*class).is_some_and(|listing| listing.available > 0))
            .collect()
    }

    /// True if any class has rooms available
    #[must_use]
    pub fn has_rooms(&self) -> bool {
        !self.visible_classes().is_empty()
    }
}

/// Nightly room rates used for pricing, plus the per-class count bound
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRatePolicy {
    /// Price per AC room
    pub ac_rate: Money,
    /// Price per non-AC room
    pub non_ac_rate: Money,
    /// Upper bound for rooms of one class in a booking
    pub max_per_class: u32,
}

impl RoomRatePolicy {
    /// Rate for one class
    #[must_use]
    pub const fn rate(&self, class: RoomClass) -> Money {
        match class {
            RoomClass::Ac => self.ac_rate,
            RoomClass::NonAc => self.non_ac_rate,
        }
    }
}

impl Default for RoomRatePolicy {
    fn default() -> Self {
        Self {
            ac_rate: Money::from_rupees(5_000),
            non_ac_rate: Money::from_rupees(3_000),
            max_per_class: 10,
        }
    }
}

/// Catalogs that are fetched independently when a booking opens
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// Venue pricing
    Venue,
    /// Photographer list
    Photographers,
    /// Caterer list
    Caterers,
    /// Room listing
    Rooms,
}

impl CatalogKind {
    /// Every catalog, in fetch order
    pub const ALL: [Self; 4] = [Self::Venue, Self::Photographers, Self::Caterers, Self::Rooms];

    /// Lowercase name used in logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Photographers => "photographers",
            Self::Caterers => "caterers",
            Self::Rooms => "rooms",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything pricing needs to know about one session's catalogs
///
/// `None` means the catalog has not loaded (yet, or at all).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Venue pricing
    pub venue: Option<VenueCatalogEntry>,
    /// Photographers offered at the venue
    pub photographers: Option<Vec<PhotographerOption>>,
    /// Caterers offered at the venue
    pub caterers: Option<Vec<CatererOption>>,
    /// Room listing for the details view
    pub rooms: Option<RoomListing>,
    /// Room rates used for pricing
    pub room_rates: RoomRatePolicy,
}

impl CatalogSnapshot {
    /// Empty snapshot with the given room rates
    #[must_use]
    pub fn new(room_rates: RoomRatePolicy) -> Self {
        Self {
            room_rates,
            ..Self::default()
        }
    }

    /// Looks up a photographer by id
    #[must_use]
    pub fn photographer(&self, id: &PhotographerId) -> Option<&PhotographerOption> {
        self.photographers.as_deref()?.iter().find(|p| &p.id == id)
    }

    /// Looks up a caterer by id
    #[must_use]
    pub fn caterer(&self, id: &CatererId) -> Option<&CatererOption> {
        self.caterers.as_deref()?.iter().find(|c| &c.id == id)
    }

    /// True once the given catalog has loaded
    #[must_use]
    pub const fn is_loaded(&self, kind: CatalogKind) -> bool {
        match kind {
            CatalogKind::Venue => self.venue.is_some(),
            CatalogKind::Photographers => self.photographers.is_some(),
            CatalogKind::Caterers => self.caterers.is_some(),
            CatalogKind::Rooms => self.rooms.is_some(),
        }
    }
}
