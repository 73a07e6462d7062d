//! The user's in-progress booking selection.
//!
//! A [`BookingSelection`] is mutated one field at a time. The operations keep
//! the vendor/sub-selection pairs consistent: changing a vendor drops the
//! category or plan that belonged to the previous vendor.
//!
//! Toggling an add-on off keeps its sub-selection; toggling it back on
//! restores that sub-selection as-is. It only counts towards the total if it
//! still resolves against the catalog (see [`crate::pricing`]).

use crate::catalog::{CatalogSnapshot, CatererOption, PhotographerOption};
use crate::error::SelectionError;
use crate::types::{AddOn, CatererId, Money, PhotographerId, RoomClass};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// What to do when a category or plan does not resolve against the catalog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleSelectionPolicy {
    /// Accept the selection; it contributes nothing to the total
    #[default]
    Degrade,
    /// Refuse the selection and leave the previous one in place
    Reject,
}

impl FromStr for StaleSelectionPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown stale selection policy '{other}'")),
        }
    }
}

/// Add-on toggles
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOns {
    /// Photography requested
    pub photography: bool,
    /// Catering requested
    pub catering: bool,
    /// Rooms requested
    pub rooms: bool,
}

impl AddOns {
    /// Whether an add-on is switched on
    #[must_use]
    pub const fn is_enabled(&self, add_on: AddOn) -> bool {
        match add_on {
            AddOn::Photography => self.photography,
            AddOn::Catering => self.catering,
            AddOn::Rooms => self.rooms,
        }
    }

    fn set(&mut self, add_on: AddOn, enabled: bool) {
        match add_on {
            AddOn::Photography => self.photography = enabled,
            AddOn::Catering => self.catering = enabled,
            AddOn::Rooms => self.rooms = enabled,
        }
    }
}

/// Photographer and category choice
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotographySelection {
    /// Chosen photographer
    pub photographer: Option<PhotographerId>,
    /// Chosen category label
    pub category: Option<String>,
    /// Category price as last resolved against the catalog
    pub resolved_price: Money,
}

/// Caterer and plan choice
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CateringSelection {
    /// Chosen caterer
    pub caterer: Option<CatererId>,
    /// Chosen plan name
    pub plan: Option<String>,
    /// Plan price as last resolved against the catalog
    pub resolved_price: Money,
}

/// Room counts per class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSelection {
    /// AC rooms
    pub ac: u32,
    /// Non-AC rooms
    pub non_ac: u32,
}

impl RoomSelection {
    /// Count for one class
    #[must_use]
    pub const fn count(&self, class: RoomClass) -> u32 {
        match class {
            RoomClass::Ac => self.ac,
            RoomClass::NonAc => self.non_ac,
        }
    }

    /// True if no rooms are chosen
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ac == 0 && self.non_ac == 0
    }
}

/// Everything the user has chosen so far
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    /// Event dates, compared by calendar day
    pub dates: BTreeSet<NaiveDate>,
    /// Free-text event address
    pub address: String,
    /// Add-on toggles
    pub add_ons: AddOns,
    /// Photography choice
    pub photography: PhotographySelection,
    /// Catering choice
    pub catering: CateringSelection,
    /// Room counts
    pub rooms: RoomSelection,
}

impl BookingSelection {
    /// Creates an empty selection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches an add-on on or off; sub-selections are kept either way
    pub fn toggle_add_on(&mut self, add_on: AddOn, enabled: bool) {
        self.add_ons.set(add_on, enabled);
    }

    /// Adds or removes an event date
    ///
    /// Dates outside `available` are ignored. Returns true if the set changed.
    pub fn select_date(
        &mut self,
        date: NaiveDate,
        included: bool,
        available: &BTreeSet<NaiveDate>,
    ) -> bool {
        if !available.contains(&date) {
            return false;
        }

        if included {
            self.dates.insert(date)
        } else {
            self.dates.remove(&date)
        }
    }

    /// Replaces the event address; validated only at submission
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    /// Sets or clears the photographer
    ///
    /// Choosing a different photographer (or clearing) drops the category and
    /// its resolved price.
    pub fn select_photographer(&mut self, photographer: Option<PhotographerId>) {
        if self.photography.photographer == photographer {
            return;
        }

        self.photography = PhotographySelection {
            photographer,
            ..PhotographySelection::default()
        };
    }

    /// Chooses a category offered by the selected photographer
    ///
    /// # Errors
    ///
    /// Only under [`StaleSelectionPolicy::Reject`]: returns a [`SelectionError`]
    /// when no photographer is selected or the label does not resolve. The
    /// selection is left unchanged in that case.
    pub fn select_photography_category(
        &mut self,
        label: &str,
        photographers: Option<&[PhotographerOption]>,
        policy: StaleSelectionPolicy,
    ) -> Result<(), SelectionError> {
        let Some(photographer_id) = self.photography.photographer.clone() else {
            return match policy {
                StaleSelectionPolicy::Degrade => Ok(()),
                StaleSelectionPolicy::Reject => Err(SelectionError::NoPhotographerSelected),
            };
        };

        let photographer = photographers
            .unwrap_or_default()
            .iter()
            .find(|p| p.id == photographer_id);

        let price = match photographer.map(|p| p.category(label)) {
            Some(Some(category)) => category.price_per_event,
            resolved => match policy {
                StaleSelectionPolicy::Degrade => Money::ZERO,
                StaleSelectionPolicy::Reject if resolved.is_none() => {
                    return Err(SelectionError::UnknownPhotographer(photographer_id));
                },
                StaleSelectionPolicy::Reject => {
                    return Err(SelectionError::UnknownCategory {
                        photographer: photographer_id,
                        label: label.to_string(),
                    });
                },
            },
        };

        self.photography.category = Some(label.to_string());
        self.photography.resolved_price = price;
        Ok(())
    }

    /// Sets or clears the caterer; a change drops the plan
    pub fn select_caterer(&mut self, caterer: Option<CatererId>) {
        if self.catering.caterer == caterer {
            return;
        }

        self.catering = CateringSelection {
            caterer,
            ..CateringSelection::default()
        };
    }

    /// Chooses a plan offered by the selected caterer
    ///
    /// # Errors
    ///
    /// Only under [`StaleSelectionPolicy::Reject`]: returns a [`SelectionError`]
    /// when no caterer is selected or the plan does not resolve. The selection
    /// is left unchanged in that case.
    pub fn select_catering_plan(
        &mut self,
        plan: &str,
        caterers: Option<&[CatererOption]>,
        policy: StaleSelectionPolicy,
    ) -> Result<(), SelectionError> {
        let Some(caterer_id) = self.catering.caterer.clone() else {
            return match policy {
                StaleSelectionPolicy::Degrade => Ok(()),
                StaleSelectionPolicy::Reject => Err(SelectionError::NoCatererSelected),
            };
        };

        let caterer = caterers
            .unwrap_or_default()
            .iter()
            .find(|c| c.id == caterer_id);

        let price = match caterer.map(|c| c.plan(plan)) {
            Some(Some(found)) => found.price,
            resolved => match policy {
                StaleSelectionPolicy::Degrade => Money::ZERO,
                StaleSelectionPolicy::Reject if resolved.is_none() => {
                    return Err(SelectionError::UnknownCaterer(caterer_id));
                },
                StaleSelectionPolicy::Reject => {
                    return Err(SelectionError::UnknownPlan {
                        caterer: caterer_id,
                        plan: plan.to_string(),
                    });
                },
            },
        };

        self.catering.plan = Some(plan.to_string());
        self.catering.resolved_price = price;
        Ok(())
    }

    /// Re-resolves the displayed category and plan prices against `catalog`
    ///
    /// Called when a vendor catalog arrives, so a choice made while it was
    /// still loading shows the price it will be charged at.
    pub fn refresh_resolved_prices(&mut self, catalog: &CatalogSnapshot) {
        if let (Some(photographer), Some(label)) =
            (&self.photography.photographer, &self.photography.category)
        {
            self.photography.resolved_price = catalog
                .photographer(photographer)
                .and_then(|p| p.category(label))
                .map_or(Money::ZERO, |category| category.price_per_event);
        }

        if let (Some(caterer), Some(plan)) = (&self.catering.caterer, &self.catering.plan) {
            self.catering.resolved_price = catalog
                .caterer(caterer)
                .and_then(|c| c.plan(plan))
                .map_or(Money::ZERO, |found| found.price);
        }
    }

    /// Sets a room count, clamped to `0..=max`
    ///
    /// Returns the stored count.
    pub fn set_room_count(&mut self, class: RoomClass, count: i64, max: u32) -> u32 {
        let clamped = u32::try_from(count.clamp(0, i64::from(max))).unwrap_or(max);

        match class {
            RoomClass::Ac => self.rooms.ac = clamped,
            RoomClass::NonAc => self.rooms.non_ac = clamped,
        }

        clamped
    }
}
