//! Room details view: listing load state and an image carousel per class.

use crate::catalog::{RoomClassListing, RoomListing};
use crate::services::CatalogService;
use crate::types::{Generation, RoomClass, VenueId};
use mandap_core::{async_effect, effect::Effect, reducer::Reducer, smallvec, SmallVec};
use mandap_macros::Action;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Message shown when the view is opened without a venue id
pub const INVALID_ROOM_ID: &str = "Invalid room ID";

/// Fallback message when a fetch error has no text
pub const FETCH_FAILED: &str = "Failed to fetch room details";

/// Load state of the room listing
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomDetailsStatus {
    /// Nothing requested
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Listing available
    Loaded,
    /// Request failed or was invalid
    Failed(String),
}

/// Carousel position per room class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCursor {
    /// AC carousel index
    pub ac: usize,
    /// Non-AC carousel index
    pub non_ac: usize,
}

impl ImageCursor {
    /// Index for one class
    #[must_use]
    pub const fn get(&self, class: RoomClass) -> usize {
        match class {
            RoomClass::Ac => self.ac,
            RoomClass::NonAc => self.non_ac,
        }
    }

    fn set(&mut self, class: RoomClass, index: usize) {
        match class {
            RoomClass::Ac => self.ac = index,
            RoomClass::NonAc => self.non_ac = index,
        }
    }
}

/// State of the room details view
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomDetailsState {
    /// Current request generation
    pub generation: Generation,
    /// Venue whose rooms are shown
    pub venue_id: Option<VenueId>,
    /// Load state
    pub status: RoomDetailsStatus,
    /// Loaded listing
    pub listing: Option<RoomListing>,
    /// Carousel positions
    pub images: ImageCursor,
}

impl RoomDetailsState {
    /// Creates an idle state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classes with rooms available
    #[must_use]
    pub fn visible_classes(&self) -> Vec<RoomClass> {
        self.listing
            .as_ref()
            .map(RoomListing::visible_classes)
            .unwrap_or_default()
    }

    /// True if the loaded listing offers any rooms
    #[must_use]
    pub fn has_rooms(&self) -> bool {
        self.listing.as_ref().is_some_and(RoomListing::has_rooms)
    }

    /// Image currently shown for a class
    #[must_use]
    pub fn current_image(&self, class: RoomClass) -> Option<&str> {
        self.class_listing(class)?
            .images
            .get(self.images.get(class))
            .map(String::as_str)
    }

    fn class_listing(&self, class: RoomClass) -> Option<&RoomClassListing> {
        self.listing.as_ref()?.class(class)
    }

    fn image_count(&self, class: RoomClass) -> usize {
        self.class_listing(class).map_or(0, |listing| listing.images.len())
    }
}

/// Actions for the room details view
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum RoomDetailsAction {
    /// Command: Load the listing for a venue
    #[command]
    LoadRooms {
        /// Venue id as received from the route
        venue_id: String,
    },

    /// Command: Advance the carousel, wrapping to the first image
    #[command]
    NextImage {
        /// Carousel to move
        class: RoomClass,
    },

    /// Command: Step the carousel back, wrapping to the last image
    #[command]
    PreviousImage {
        /// Carousel to move
        class: RoomClass,
    },

    /// Command: Jump to an image
    #[command]
    ShowImage {
        /// Carousel to move
        class: RoomClass,
        /// Target index
        index: usize,
    },

    /// Event: Listing arrived
    #[event]
    RoomsLoaded {
        /// Request generation
        generation: Generation,
        /// Listing
        listing: RoomListing,
    },

    /// Event: Listing request failed
    #[event]
    RoomsFailed {
        /// Request generation
        generation: Generation,
        /// Error message
        reason: String,
    },
}

/// Environment dependencies for the room details reducer
#[derive(Clone)]
pub struct RoomDetailsEnvironment {
    /// Catalog source
    pub catalog: Arc<dyn CatalogService>,
}

impl RoomDetailsEnvironment {
    /// Creates a new `RoomDetailsEnvironment`
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self { catalog }
    }
}

/// Reducer for the room details view
#[derive(Clone, Debug, Default)]
pub struct RoomDetailsReducer;

impl RoomDetailsReducer {
    /// Creates a new `RoomDetailsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn step(state: &mut RoomDetailsState, class: RoomClass, forward: bool) {
        let count = state.image_count(class);
        if count == 0 {
            return;
        }

        let current = state.images.get(class) % count;
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        state.images.set(class, next);
    }
}

impl Reducer for RoomDetailsReducer {
    type State = RoomDetailsState;
    type Action = RoomDetailsAction;
    type Environment = RoomDetailsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            RoomDetailsAction::LoadRooms { venue_id } => {
                state.generation = state.generation.next();
                state.listing = None;
                state.images = ImageCursor::default();

                let venue_id = venue_id.trim();
                if venue_id.is_empty() {
                    state.venue_id = None;
                    state.status = RoomDetailsStatus::Failed(INVALID_ROOM_ID.to_string());
                    return SmallVec::new();
                }

                let venue_id = VenueId::new(venue_id);
                let generation = state.generation;
                let request = env.catalog.fetch_rooms(&venue_id);
                state.venue_id = Some(venue_id);
                state.status = RoomDetailsStatus::Loading;

                smallvec![async_effect! {
                    Some(match request.await {
                        Ok(listing) => RoomDetailsAction::RoomsLoaded { generation, listing },
                        Err(error) => RoomDetailsAction::RoomsFailed {
                            generation,
                            reason: error.to_string(),
                        },
                    })
                }]
            },

            RoomDetailsAction::NextImage { class } => {
                Self::step(state, class, true);
                SmallVec::new()
            },

            RoomDetailsAction::PreviousImage { class } => {
                Self::step(state, class, false);
                SmallVec::new()
            },

            RoomDetailsAction::ShowImage { class, index } => {
                if index < state.image_count(class) {
                    state.images.set(class, index);
                }
                SmallVec::new()
            },

            RoomDetailsAction::RoomsLoaded {
                generation,
                listing,
            } => {
                if generation == state.generation {
                    state.listing = Some(listing);
                    state.status = RoomDetailsStatus::Loaded;
                } else {
                    tracing::debug!(%generation, "Dropping stale room listing");
                }
                SmallVec::new()
            },

            RoomDetailsAction::RoomsFailed { generation, reason } => {
                if generation == state.generation {
                    tracing::warn!(%reason, "Room details fetch failed");
                    let message = if reason.trim().is_empty() {
                        FETCH_FAILED.to_string()
                    } else {
                        reason
                    };
                    state.status = RoomDetailsStatus::Failed(message);
                }
                SmallVec::new()
            },
        }
    }
}
