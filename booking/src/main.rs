//! Booking demo binary
//!
//! Walks one booking through the store: open, load catalogs, pick add-ons,
//! submit, and print the payment redirect.

use chrono::{Duration as DateOffset, Utc};
use mandap_booking::{
    AddOn, BookingAction, BookingConfig, BookingEnvironment, BookingReducer, BookingState,
    CatalogService, CatererId, FlowStatus, HttpCatalogService, InMemoryCatalogService,
    MockPaymentGateway, PhotographerId, RoomClass, VenueId,
};
use mandap_core::environment::SystemClock;
use mandap_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = BookingConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("mandap_booking={0},mandap_runtime={0}", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Mandap Booking Demo ===\n");

    let venue_id = VenueId::new("lotus-mandap");
    let catalog: Arc<dyn CatalogService> = match &config.catalog.base_url {
        Some(base_url) => Arc::new(HttpCatalogService::new(base_url.clone(), &config.catalog)?),
        None => InMemoryCatalogService::with_sample_data(&venue_id).shared(),
    };

    let env = BookingEnvironment::new(
        Arc::new(SystemClock),
        catalog,
        MockPaymentGateway::new(config.payment.setup_url.clone()).shared(),
        config,
    );
    let store = Store::new(BookingState::new(), BookingReducer::new(), env);

    let today = Utc::now().date_naive();
    let available_dates: Vec<_> = (7..14).map(|days| today + DateOffset::days(days)).collect();
    let first_date = today + DateOffset::days(7);

    println!(">>> Opening booking for {venue_id}");
    let mut handle = store
        .send(BookingAction::OpenBooking {
            venue_id: venue_id.clone(),
            available_dates,
        })
        .await?;
    handle.wait_with_timeout(Duration::from_secs(15)).await?;

    let status = store.state(|s| s.catalog_status.clone()).await;
    println!("Catalogs: {status:?}");
    println!("Total with venue only: {}", store.state(BookingState::total).await);

    let choices = [
        BookingAction::SelectDate {
            date: first_date,
            included: true,
        },
        BookingAction::SetAddress {
            address: "12 Temple Road, Chennai".to_string(),
        },
        BookingAction::ToggleAddOn {
            add_on: AddOn::Photography,
            enabled: true,
        },
        BookingAction::SelectPhotographer {
            photographer_id: Some(PhotographerId::new("1")),
        },
        BookingAction::SelectPhotographyCategory {
            label: "Candid".to_string(),
        },
        BookingAction::ToggleAddOn {
            add_on: AddOn::Catering,
            enabled: true,
        },
        BookingAction::SelectCaterer {
            caterer_id: Some(CatererId::new("1")),
        },
        BookingAction::SelectCateringPlan {
            plan: "Premium".to_string(),
        },
        BookingAction::ToggleAddOn {
            add_on: AddOn::Rooms,
            enabled: true,
        },
        BookingAction::SetRoomCount {
            class: RoomClass::Ac,
            count: 2,
        },
    ];

    for action in choices {
        println!(">>> {}", action.name());
        let _ = store.send(action).await?;
    }

    let breakdown = store.state(BookingState::breakdown).await;
    println!("\nVenue:       {}", breakdown.venue);
    println!("Photography: {}", breakdown.photography);
    println!("Catering:    {}", breakdown.catering);
    println!("Rooms:       {}", breakdown.rooms);
    println!("Total:       {}", breakdown.total);

    println!("\n>>> Submitting");
    let mut handle = store.send(BookingAction::SubmitBooking).await?;
    handle.wait_with_timeout(Duration::from_secs(15)).await?;

    match store.state(|s| s.flow.clone()).await {
        FlowStatus::AwaitingPayment { redirect_url } => {
            println!("Redirect to payment: {redirect_url}");
        },
        other => {
            let errors = store.state(mandap_booking::reducer::validation_messages).await;
            let last_error = store.state(|s| s.last_error.clone()).await;
            println!("Booking not submitted ({other:?}): {errors:?} {last_error:?}");
        },
    }

    store.shutdown(Duration::from_secs(5)).await?;
    println!("\n=== Demo Complete ===");
    Ok(())
}
