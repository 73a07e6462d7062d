//! Price derivation.
//!
//! The total is recomputed from the selection and the catalog snapshot every
//! time it is needed. Nothing here fails: a missing catalog, a vendor that is
//! no longer listed, or a category the vendor does not offer all contribute
//! zero.

use crate::catalog::CatalogSnapshot;
use crate::selection::BookingSelection;
use crate::types::{Money, RoomClass};
use serde::{Deserialize, Serialize};

/// Per-component contributions to the total
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Venue base price, zero until the venue loads
    pub venue: Money,
    /// Selected photography category
    pub photography: Money,
    /// Selected catering plan
    pub catering: Money,
    /// Rooms at the configured nightly rates
    pub rooms: Money,
    /// Sum of the above
    pub total: Money,
}

/// Itemised price of a selection
#[must_use]
pub fn price_breakdown(selection: &BookingSelection, catalog: &CatalogSnapshot) -> PriceBreakdown {
    let venue = catalog
        .venue
        .as_ref()
        .map_or(Money::ZERO, |venue| venue.base_price);
    let photography = photography_contribution(selection, catalog);
    let catering = catering_contribution(selection, catalog);
    let rooms = room_contribution(selection, catalog);

    PriceBreakdown {
        venue,
        photography,
        catering,
        rooms,
        total: venue + photography + catering + rooms,
    }
}

/// Total price of a selection
#[must_use]
pub fn compute_total(selection: &BookingSelection, catalog: &CatalogSnapshot) -> Money {
    price_breakdown(selection, catalog).total
}

fn photography_contribution(selection: &BookingSelection, catalog: &CatalogSnapshot) -> Money {
    if !selection.add_ons.photography {
        return Money::ZERO;
    }

    let chosen = &selection.photography;
    let (Some(photographer_id), Some(label)) = (&chosen.photographer, &chosen.category) else {
        return Money::ZERO;
    };

    catalog
        .photographer(photographer_id)
        .and_then(|photographer| photographer.category(label))
        .map_or(Money::ZERO, |category| category.price_per_event)
}

fn catering_contribution(selection: &BookingSelection, catalog: &CatalogSnapshot) -> Money {
    if !selection.add_ons.catering {
        return Money::ZERO;
    }

    let chosen = &selection.catering;
    let (Some(caterer_id), Some(plan)) = (&chosen.caterer, &chosen.plan) else {
        return Money::ZERO;
    };

    catalog
        .caterer(caterer_id)
        .and_then(|caterer| caterer.plan(plan))
        .map_or(Money::ZERO, |plan| plan.price)
}

fn room_contribution(selection: &BookingSelection, catalog: &CatalogSnapshot) -> Money {
    // Rates are configured, but nothing is charged until the listing loads
    if !selection.add_ons.rooms || catalog.rooms.is_none() {
        return Money::ZERO;
    }

    RoomClass::ALL
        .into_iter()
        .map(|class| {
            catalog
                .room_rates
                .rate(class)
                .saturating_mul(selection.rooms.count(class))
        })
        .sum()
}
