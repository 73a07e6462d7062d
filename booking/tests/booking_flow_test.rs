//! Integration tests for the booking flow running inside a Store

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use chrono::NaiveDate;
use mandap_booking::{
    AddOn, BookingAction, BookingConfig, BookingEnvironment, BookingReducer, BookingState,
    CatalogKind, CatalogService, CatalogStatus, FlowStatus, InMemoryCatalogService,
    MockPaymentGateway, PaymentGateway, PhotographerId, RoomClass, RoomDetailsAction,
    RoomDetailsEnvironment, RoomDetailsReducer, RoomDetailsState, RoomDetailsStatus, VenueId,
};
use mandap_runtime::Store;
use mandap_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

type BookingStore = Store<BookingState, BookingAction, BookingEnvironment, BookingReducer>;

const WAIT: Duration = Duration::from_secs(5);

fn venue() -> VenueId {
    VenueId::new("lotus-mandap")
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, day).expect("valid date")
}

fn store_with(catalog: Arc<dyn CatalogService>, payments: Arc<dyn PaymentGateway>) -> BookingStore {
    let env = BookingEnvironment::new(
        Arc::new(test_clock()),
        catalog,
        payments,
        BookingConfig::default(),
    );
    Store::new(BookingState::new(), BookingReducer::new(), env)
}

fn sample_store() -> BookingStore {
    store_with(
        InMemoryCatalogService::with_sample_data(&venue()).shared(),
        MockPaymentGateway::new("https://pay.local/setup").shared(),
    )
}

async fn open(store: &BookingStore) {
    let mut handle = store
        .send(BookingAction::OpenBooking {
            venue_id: venue(),
            available_dates: vec![date(10), date(11), date(12)],
        })
        .await
        .expect("open accepted");
    handle.wait_with_timeout(WAIT).await.expect("catalogs settle");
}

async fn send_all(store: &BookingStore, actions: impl IntoIterator<Item = BookingAction>) {
    for action in actions {
        let mut handle = store.send(action).await.expect("action accepted");
        handle.wait_with_timeout(WAIT).await.expect("effects settle");
    }
}

fn photography_and_rooms() -> Vec<BookingAction> {
    vec![
        BookingAction::SelectDate {
            date: date(10),
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
            add_on: AddOn::Rooms,
            enabled: true,
        },
        BookingAction::SetRoomCount {
            class: RoomClass::Ac,
            count: 2,
        },
    ]
}

#[tokio::test]
async fn test_open_loads_every_catalog() {
    let store = sample_store();

    open(&store).await;

    let (settled, venue_price) = store
        .state(|s| {
            (
                s.catalog_status.is_settled(),
                s.catalog.venue.as_ref().map(|v| v.base_price.rupees()),
            )
        })
        .await;
    assert!(settled);
    assert_eq!(venue_price, Some(50_000));

    for kind in CatalogKind::ALL {
        let status = store.state(|s| s.catalog_status.get(kind).clone()).await;
        assert_eq!(status, CatalogStatus::Loaded, "{kind} should be loaded");
    }

    assert_eq!(store.state(BookingState::total).await.rupees(), 50_000);
}

#[tokio::test]
async fn test_full_booking_reaches_payment() {
    let store = sample_store();
    open(&store).await;

    send_all(&store, photography_and_rooms()).await;
    assert_eq!(store.state(BookingState::total).await.rupees(), 85_000);

    let mut handle = store.send(BookingAction::SubmitBooking).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let flow = store.state(|s| s.flow.clone()).await;
    match flow {
        FlowStatus::AwaitingPayment { redirect_url } => {
            assert!(redirect_url.starts_with("https://pay.local/setup?session=mock_session_"));
        },
        other => panic!("expected payment redirect, got {other:?}"),
    }

    let submission = store
        .state(|s| s.last_submission.clone())
        .await
        .expect("submission recorded");
    assert_eq!(submission.total.rupees(), 85_000);
    assert_eq!(submission.dates, vec![date(10)]);
    assert!(submission.catering.is_none());
    assert_eq!(submission.rooms.map(|r| r.ac), Some(2));
}

#[tokio::test]
async fn test_effect_actions_are_observable() {
    let store = sample_store();

    let observed = store
        .send_and_wait_for(
            BookingAction::OpenBooking {
                venue_id: venue(),
                available_dates: vec![date(10)],
            },
            |action| matches!(action, BookingAction::CaterersLoaded { .. }),
            WAIT,
        )
        .await
        .expect("caterers arrive");

    match observed {
        BookingAction::CaterersLoaded { caterers, .. } => {
            assert_eq!(caterers.len(), 1);
            assert_eq!(caterers[0].name, "Royal Caterers");
        },
        other => panic!("unexpected action {other:?}"),
    }
}

#[tokio::test]
async fn test_results_after_close_are_dropped() {
    let catalog = InMemoryCatalogService::with_sample_data(&venue())
        .with_latency(Duration::from_millis(50))
        .shared();
    let store = store_with(
        catalog,
        MockPaymentGateway::new("https://pay.local/setup").shared(),
    );

    let mut loading = store
        .send(BookingAction::OpenBooking {
            venue_id: venue(),
            available_dates: vec![date(10)],
        })
        .await
        .unwrap();
    store.send(BookingAction::CloseBooking).await.unwrap();
    loading.wait_with_timeout(WAIT).await.unwrap();

    let (flow, venue_loaded, photographers_loaded) = store
        .state(|s| {
            (
                s.flow.clone(),
                s.catalog.venue.is_some(),
                s.catalog.photographers.is_some(),
            )
        })
        .await;
    assert_eq!(flow, FlowStatus::Closed);
    assert!(!venue_loaded);
    assert!(!photographers_loaded);
}

#[tokio::test]
async fn test_results_from_previous_session_are_dropped() {
    let catalog = InMemoryCatalogService::with_sample_data(&venue())
        .with_latency(Duration::from_millis(50))
        .shared();
    let store = store_with(
        catalog,
        MockPaymentGateway::new("https://pay.local/setup").shared(),
    );

    let mut first = store
        .send(BookingAction::OpenBooking {
            venue_id: venue(),
            available_dates: vec![date(10)],
        })
        .await
        .unwrap();
    store.send(BookingAction::CloseBooking).await.unwrap();
    let mut second = store
        .send(BookingAction::OpenBooking {
            venue_id: VenueId::new("unknown-venue"),
            available_dates: vec![date(11)],
        })
        .await
        .unwrap();

    first.wait_with_timeout(WAIT).await.unwrap();
    second.wait_with_timeout(WAIT).await.unwrap();

    let (venue_loaded, venue_status, photographers) = store
        .state(|s| {
            (
                s.catalog.venue.is_some(),
                s.catalog_status.venue.clone(),
                s.catalog.photographers.clone(),
            )
        })
        .await;
    assert!(!venue_loaded, "first session's venue must not leak in");
    assert!(matches!(venue_status, CatalogStatus::Failed(_)));
    assert_eq!(photographers, Some(Vec::new()));
}

#[tokio::test]
async fn test_failed_catalog_does_not_block_the_others() {
    let catalog = InMemoryCatalogService::with_sample_data(&venue())
        .failing(CatalogKind::Caterers)
        .shared();
    let store = store_with(
        catalog,
        MockPaymentGateway::new("https://pay.local/setup").shared(),
    );

    open(&store).await;

    let state = store.state(|s| s.clone()).await;
    assert!(matches!(state.catalog_status.caterers, CatalogStatus::Failed(_)));
    assert_eq!(state.catalog_status.venue, CatalogStatus::Loaded);
    assert_eq!(state.catalog_status.photographers, CatalogStatus::Loaded);
    assert_eq!(state.catalog_status.rooms, CatalogStatus::Loaded);
    assert!(state.catalog.caterers.is_none());

    send_all(&store, photography_and_rooms()).await;
    send_all(
        &store,
        [BookingAction::ToggleAddOn {
            add_on: AddOn::Catering,
            enabled: true,
        }],
    )
    .await;

    assert_eq!(store.state(BookingState::total).await.rupees(), 85_000);
}

#[tokio::test]
async fn test_declined_payment_returns_to_form() {
    let store = store_with(
        InMemoryCatalogService::with_sample_data(&venue()).shared(),
        MockPaymentGateway::declining("https://pay.local/setup", "card network down").shared(),
    );
    open(&store).await;
    send_all(&store, photography_and_rooms()).await;

    let mut handle = store.send(BookingAction::SubmitBooking).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let (flow, last_error) = store.state(|s| (s.flow.clone(), s.last_error.clone())).await;
    assert_eq!(flow, FlowStatus::Open);
    let last_error = last_error.expect("failure recorded");
    assert!(last_error.contains("card network down"), "{last_error}");

    // The selection survives so the user can retry
    assert_eq!(store.state(BookingState::total).await.rupees(), 85_000);
}

#[tokio::test]
async fn test_incomplete_submission_is_blocked() {
    let store = sample_store();
    open(&store).await;

    let mut handle = store.send(BookingAction::SubmitBooking).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let messages = store
        .state(mandap_booking::reducer::validation_messages)
        .await;
    assert_eq!(
        messages,
        vec![
            "Please enter the event address".to_string(),
            "Please select at least one event date".to_string(),
        ]
    );
    assert_eq!(store.state(|s| s.flow.clone()).await, FlowStatus::Open);
    assert!(store.state(|s| s.last_submission.is_none()).await);
}

#[tokio::test]
async fn test_shutdown_after_booking() {
    let store = sample_store();
    open(&store).await;

    store.shutdown(WAIT).await.expect("clean shutdown");
    assert!(store.send(BookingAction::CloseBooking).await.is_err());
}

// ============================================================================
// Room details
// ============================================================================

type RoomDetailsStore =
    Store<RoomDetailsState, RoomDetailsAction, RoomDetailsEnvironment, RoomDetailsReducer>;

fn room_details_store() -> RoomDetailsStore {
    Store::new(
        RoomDetailsState::new(),
        RoomDetailsReducer::new(),
        RoomDetailsEnvironment::new(InMemoryCatalogService::with_sample_data(&venue()).shared()),
    )
}

#[tokio::test]
async fn test_room_details_load_and_browse() {
    let store = room_details_store();

    let mut handle = store
        .send(RoomDetailsAction::LoadRooms {
            venue_id: "lotus-mandap".to_string(),
        })
        .await
        .unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let (status, classes) = store
        .state(|s| (s.status.clone(), s.visible_classes()))
        .await;
    assert_eq!(status, RoomDetailsStatus::Loaded);
    assert_eq!(classes, vec![RoomClass::Ac, RoomClass::NonAc]);

    let first = store
        .state(|s| s.current_image(RoomClass::Ac).map(str::to_string))
        .await;

    // Three AC images: three steps forward come back around
    for _ in 0..3 {
        store
            .send(RoomDetailsAction::NextImage {
                class: RoomClass::Ac,
            })
            .await
            .unwrap();
    }
    let after_cycle = store
        .state(|s| s.current_image(RoomClass::Ac).map(str::to_string))
        .await;
    assert_eq!(first, after_cycle);

    store
        .send(RoomDetailsAction::PreviousImage {
            class: RoomClass::Ac,
        })
        .await
        .unwrap();
    let index = store.state(|s| s.images.get(RoomClass::Ac)).await;
    assert_eq!(index, 2);
}

#[tokio::test]
async fn test_room_details_unknown_venue_fails() {
    let store = room_details_store();

    let mut handle = store
        .send(RoomDetailsAction::LoadRooms {
            venue_id: "nowhere".to_string(),
        })
        .await
        .unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let (status, has_rooms) = store.state(|s| (s.status.clone(), s.has_rooms())).await;
    assert!(matches!(status, RoomDetailsStatus::Failed(_)));
    assert!(!has_rooms);
}
