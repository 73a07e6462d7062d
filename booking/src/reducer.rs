//! Reducer for the booking flow.
//!
//! User commands mutate the selection directly. Opening the form starts four
//! independent catalog fetches; their results come back as events tagged with
//! the session generation, and results for a session that has since closed or
//! reopened are dropped. Submitting validates the selection and hands a
//! snapshot to the payment gateway.

use crate::actions::BookingAction;
use crate::catalog::CatalogKind;
use crate::config::BookingConfig;
use crate::error::{CatalogError, SelectionError, SubmissionError};
use crate::payment_gateway::PaymentGateway;
use crate::services::CatalogService;
use crate::state::{BookingState, BookingSubmission, CatalogStatus, FlowStatus};
use crate::types::{Generation, VenueId};
use mandap_core::{
    async_effect, effect::Effect, environment::Clock, reducer::Reducer, smallvec, SmallVec,
};
use std::future::Future;
use std::sync::Arc;

/// Environment dependencies for the booking reducer
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for submission timestamps
    pub clock: Arc<dyn Clock>,
    /// Catalog source
    pub catalog: Arc<dyn CatalogService>,
    /// Payment gateway
    pub payments: Arc<dyn PaymentGateway>,
    /// Pricing and policy configuration
    pub config: BookingConfig,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        catalog: Arc<dyn CatalogService>,
        payments: Arc<dyn PaymentGateway>,
        config: BookingConfig,
    ) -> Self {
        Self {
            clock,
            catalog,
            payments,
            config,
        }
    }
}

/// Reducer for the booking flow
#[derive(Clone, Debug, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Turns a catalog call into an effect that reports back with `generation`
    fn fetch<T, F>(
        request: F,
        generation: Generation,
        kind: CatalogKind,
        loaded: fn(Generation, T) -> BookingAction,
    ) -> Effect<BookingAction>
    where
        F: Future<Output = Result<T, CatalogError>> + Send + 'static,
        T: Send + 'static,
    {
        async_effect! {
            Some(match request.await {
                Ok(value) => loaded(generation, value),
                Err(error) => BookingAction::CatalogFetchFailed {
                    generation,
                    catalog: kind,
                    reason: error.to_string(),
                },
            })
        }
    }

    /// Starts all four catalog fetches in parallel
    fn load_catalogs(
        env: &BookingEnvironment,
        venue_id: &VenueId,
        generation: Generation,
    ) -> Effect<BookingAction> {
        Effect::merge(vec![
            Self::fetch(
                env.catalog.fetch_venue(venue_id),
                generation,
                CatalogKind::Venue,
                |generation, venue| BookingAction::VenueLoaded { generation, venue },
            ),
            Self::fetch(
                env.catalog.fetch_photographers(venue_id),
                generation,
                CatalogKind::Photographers,
                |generation, photographers| BookingAction::PhotographersLoaded {
                    generation,
                    photographers,
                },
            ),
            Self::fetch(
                env.catalog.fetch_caterers(venue_id),
                generation,
                CatalogKind::Caterers,
                |generation, caterers| BookingAction::CaterersLoaded {
                    generation,
                    caterers,
                },
            ),
            Self::fetch(
                env.catalog.fetch_rooms(venue_id),
                generation,
                CatalogKind::Rooms,
                |generation, rooms| BookingAction::RoomsLoaded { generation, rooms },
            ),
        ])
    }

    /// Hands a submission to the payment gateway
    fn start_payment(
        env: &BookingEnvironment,
        submission: &BookingSubmission,
        generation: Generation,
    ) -> Effect<BookingAction> {
        let request = env.payments.initiate_payment(submission);

        async_effect! {
            Some(match request.await {
                Ok(redirect) => BookingAction::PaymentInitiated {
                    generation,
                    redirect_url: redirect.url,
                },
                Err(error) => BookingAction::PaymentFailed {
                    generation,
                    reason: error.to_string(),
                },
            })
        }
    }

    /// Drops results from a session that is no longer current
    fn accept(state: &BookingState, generation: Generation, kind: CatalogKind) -> bool {
        let current = state.is_current(generation);
        if !current {
            tracing::debug!(
                catalog = %kind,
                result_generation = %generation,
                current_generation = %state.generation,
                "Dropping stale catalog result"
            );
        }
        current
    }

    /// Records a rejected selection, or clears the previous error
    fn record_selection(state: &mut BookingState, result: Result<(), SelectionError>) {
        match result {
            Ok(()) => state.last_error = None,
            Err(error) => Self::apply_event(
                state,
                &BookingAction::SelectionRejected {
                    reason: error.to_string(),
                },
            ),
        }
    }

    /// Applies a validation event to state
    fn apply_event(state: &mut BookingState, action: &BookingAction) {
        match action {
            BookingAction::SelectionRejected { reason } => {
                tracing::debug!(%reason, "Selection rejected");
                state.last_error = Some(reason.clone());
            },
            BookingAction::SubmissionRejected { errors } => {
                state.validation_errors.clone_from(errors);
            },
            _ => {},
        }
    }

    fn submit(state: &mut BookingState, env: &BookingEnvironment) -> Option<Effect<BookingAction>> {
        if let Err(errors) = state.validate_submission() {
            Self::apply_event(state, &BookingAction::SubmissionRejected { errors });
            return None;
        }

        let venue_id = state.venue_id.clone()?;
        let submission =
            BookingSubmission::snapshot(venue_id, &state.selection, &state.catalog, env.clock.now());

        tracing::info!(
            venue_id = %submission.venue_id,
            dates = submission.dates.len(),
            total = submission.total.rupees(),
            "Booking submitted"
        );

        let effect = Self::start_payment(env, &submission, state.generation);
        state.flow = FlowStatus::Submitting;
        state.validation_errors.clear();
        state.last_error = None;
        state.last_submission = Some(submission);
        Some(effect)
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let opens_or_closes = matches!(
            action,
            BookingAction::OpenBooking { .. } | BookingAction::CloseBooking
        );
        if action.is_command() && !opens_or_closes && !state.flow.is_open() {
            tracing::debug!(action = action.name(), flow = ?state.flow, "Ignoring command while booking is not open");
            return SmallVec::new();
        }

        let policy = env.config.pricing.stale_selection_policy;
        let max_rooms = env.config.pricing.room_rates.max_per_class;

        match action {
            // ========== Commands ==========
            BookingAction::OpenBooking {
                venue_id,
                available_dates,
            } => {
                let generation =
                    state.open(venue_id.clone(), available_dates, env.config.pricing.room_rates.clone());
                tracing::info!(%venue_id, %generation, "Booking opened");

                smallvec![Self::load_catalogs(env, &venue_id, generation)]
            },

            BookingAction::CloseBooking => {
                state.close();
                tracing::info!(generation = %state.generation, "Booking closed");
                SmallVec::new()
            },

            BookingAction::ToggleAddOn { add_on, enabled } => {
                state.selection.toggle_add_on(add_on, enabled);
                SmallVec::new()
            },

            BookingAction::SelectDate { date, included } => {
                if !state.selection.select_date(date, included, &state.availability) {
                    tracing::debug!(%date, included, "Date selection unchanged");
                }
                SmallVec::new()
            },

            BookingAction::SetAddress { address } => {
                state.selection.set_address(address);
                SmallVec::new()
            },

            BookingAction::SelectPhotographer { photographer_id } => {
                state.selection.select_photographer(photographer_id);
                SmallVec::new()
            },

            BookingAction::SelectPhotographyCategory { label } => {
                let result = state.selection.select_photography_category(
                    &label,
                    state.catalog.photographers.as_deref(),
                    policy,
                );
                Self::record_selection(state, result);
                SmallVec::new()
            },

            BookingAction::SelectCaterer { caterer_id } => {
                state.selection.select_caterer(caterer_id);
                SmallVec::new()
            },

            BookingAction::SelectCateringPlan { plan } => {
                let result = state.selection.select_catering_plan(
                    &plan,
                    state.catalog.caterers.as_deref(),
                    policy,
                );
                Self::record_selection(state, result);
                SmallVec::new()
            },

            BookingAction::SetRoomCount { class, count } => {
                let stored = state.selection.set_room_count(class, count, max_rooms);
                if i64::from(stored) != count {
                    tracing::debug!(%class, requested = count, stored, "Room count clamped");
                }
                SmallVec::new()
            },

            BookingAction::SubmitBooking => Self::submit(state, env)
                .map_or_else(SmallVec::new, |effect| smallvec![effect]),

            // ========== Events ==========
            BookingAction::VenueLoaded { generation, venue } => {
                if Self::accept(state, generation, CatalogKind::Venue) {
                    state.catalog.venue = Some(venue);
                    state
                        .catalog_status
                        .set(CatalogKind::Venue, CatalogStatus::Loaded);
                }
                SmallVec::new()
            },

            BookingAction::PhotographersLoaded {
                generation,
                photographers,
            } => {
                if Self::accept(state, generation, CatalogKind::Photographers) {
                    state.catalog.photographers = Some(photographers);
                    state.selection.refresh_resolved_prices(&state.catalog);
                    state
                        .catalog_status
                        .set(CatalogKind::Photographers, CatalogStatus::Loaded);
                }
                SmallVec::new()
            },

            BookingAction::CaterersLoaded {
                generation,
                caterers,
            } => {
                if Self::accept(state, generation, CatalogKind::Caterers) {
                    state.catalog.caterers = Some(caterers);
                    state.selection.refresh_resolved_prices(&state.catalog);
                    state
                        .catalog_status
                        .set(CatalogKind::Caterers, CatalogStatus::Loaded);
                }
                SmallVec::new()
            },

            BookingAction::RoomsLoaded { generation, rooms } => {
                if Self::accept(state, generation, CatalogKind::Rooms) {
                    state.catalog.rooms = Some(rooms);
                    state
                        .catalog_status
                        .set(CatalogKind::Rooms, CatalogStatus::Loaded);
                }
                SmallVec::new()
            },

            BookingAction::CatalogFetchFailed {
                generation,
                catalog,
                reason,
            } => {
                if Self::accept(state, generation, catalog) {
                    tracing::warn!(%catalog, %reason, "Catalog fetch failed");
                    state
                        .catalog_status
                        .set(catalog, CatalogStatus::Failed(reason));
                }
                SmallVec::new()
            },

            BookingAction::PaymentInitiated {
                generation,
                redirect_url,
            } => {
                if state.generation == generation && state.flow == FlowStatus::Submitting {
                    tracing::info!(%redirect_url, "Payment session ready");
                    state.flow = FlowStatus::AwaitingPayment { redirect_url };
                } else {
                    tracing::debug!(%generation, "Dropping stale payment result");
                }
                SmallVec::new()
            },

            BookingAction::PaymentFailed { generation, reason } => {
                if state.generation == generation && state.flow == FlowStatus::Submitting {
                    tracing::warn!(%reason, "Payment could not be started");
                    state.flow = FlowStatus::Open;
                    state.last_error = Some(format!("Payment could not be started: {reason}"));
                } else {
                    tracing::debug!(%generation, "Dropping stale payment result");
                }
                SmallVec::new()
            },

            event @ (BookingAction::SelectionRejected { .. }
            | BookingAction::SubmissionRejected { .. }) => {
                Self::apply_event(state, &event);
                SmallVec::new()
            },
        }
    }
}

/// Messages to show for the last blocked submission
#[must_use]
pub fn validation_messages(state: &BookingState) -> Vec<String> {
    state
        .validation_errors
        .iter()
        .map(SubmissionError::to_string)
        .collect()
}
