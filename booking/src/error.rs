//! Error types for the booking domain.
//!
//! None of these are fatal: catalog failures leave the form usable, stale
//! selections degrade to zero (or are rejected under the strict policy), and
//! submission errors are shown to the user.

use crate::types::{CatererId, PhotographerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to fetch or decode a catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never produced a usable response
    #[error("catalog request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("could not decode catalog response: {0}")]
    Decode(String),

    /// The service has no such catalog for this venue
    #[error("{catalog} not found for venue {venue_id}")]
    NotFound {
        /// Catalog that was requested
        catalog: &'static str,
        /// Venue it was requested for
        venue_id: String,
    },

    /// The HTTP client could not be built
    #[error("catalog client configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// Failure to start a payment session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Nothing to charge
    #[error("cannot start a payment for a zero amount")]
    ZeroAmount,

    /// The gateway refused the session
    #[error("payment declined: {reason}")]
    Declined {
        /// Reason given by the gateway
        reason: String,
    },

    /// The gateway could not be reached
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Rejected selection under [`StaleSelectionPolicy::Reject`](crate::selection::StaleSelectionPolicy::Reject)
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionError {
    /// A category was chosen with no photographer selected
    #[error("select a photographer before choosing a category")]
    NoPhotographerSelected,

    /// A plan was chosen with no caterer selected
    #[error("select a caterer before choosing a plan")]
    NoCatererSelected,

    /// The selected photographer is not in the loaded catalog
    #[error("photographer {0} is not available")]
    UnknownPhotographer(PhotographerId),

    /// The photographer does not offer this category
    #[error("photographer {photographer} does not offer category '{label}'")]
    UnknownCategory {
        /// Selected photographer
        photographer: PhotographerId,
        /// Requested category label
        label: String,
    },

    /// The selected caterer is not in the loaded catalog
    #[error("caterer {0} is not available")]
    UnknownCaterer(CatererId),

    /// The caterer does not offer this plan
    #[error("caterer {caterer} does not offer plan '{plan}'")]
    UnknownPlan {
        /// Selected caterer
        caterer: CatererId,
        /// Requested plan name
        plan: String,
    },
}

/// Reason a submission was blocked
///
/// `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionError {
    /// Address is empty or whitespace
    #[error("Please enter the event address")]
    MissingAddress,

    /// No event date chosen
    #[error("Please select at least one event date")]
    NoDatesSelected,
}
