/*!
 * Listing session tests against the in-memory catalog
 */

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use mortydex::clients::mock::{ListingBehavior, MockCatalog, sample_character};
use mortydex::errors::ClientError;
use mortydex::listing::{CharacterPipeline, ListingSession, ListingState, PipelineOptions, RefreshOutcome};
use mortydex::models::{FilterState, Selector, SelectorKind};

const PILOT: &str = "https://catalog.test/api/episode/1";

fn catalog() -> MockCatalog {
    let mut ants = sample_character(4, "Ants in my Eyes Johnson", "unknown", PILOT);
    ants.kind = "Human with ants in his eyes".to_string();
    let mut alien = sample_character(5, "Squanchy", "Alive", PILOT);
    alien.species = "Alien".to_string();

    MockCatalog::new(vec![
        sample_character(1, "Rick Sanchez", "Alive", PILOT),
        sample_character(2, "Morty Smith", "Alive", PILOT),
        sample_character(3, "Birdperson", "Dead", PILOT),
        ants,
        alien,
    ])
    .with_episode(PILOT, "Pilot")
}

fn session(catalog: MockCatalog) -> ListingSession {
    ListingSession::new(CharacterPipeline::new(Arc::new(catalog), PipelineOptions::default()))
}

#[test]
fn test_refresh_should_work_from_blocking_context() {
    let session = session(catalog());
    let outcome = tokio_test::block_on(session.refresh());
    assert_eq!(outcome, RefreshOutcome::Applied);
    assert_eq!(session.characters().len(), 5);
    assert!(
        session
            .characters()
            .iter()
            .all(|c| c.first_episode_name.as_deref() == Some("Pilot"))
    );
}

#[tokio::test]
async fn test_filters_should_combine_with_and() {
    let session = session(catalog());
    session.set_filter(SelectorKind::Status, Selector::from("Alive"));
    session.set_filter(SelectorKind::Species, Selector::from("Alien"));
    session.refresh().await;

    let ids: Vec<u64> = session.characters().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![5]);
}

#[tokio::test]
async fn test_type_filter_should_reach_catalog_query() {
    let catalog = Arc::new(catalog());
    let session = ListingSession::new(CharacterPipeline::new(catalog.clone(), PipelineOptions::default()));
    session
        .update_filter(SelectorKind::Type, Selector::from("Human with ants in his eyes"))
        .await;

    let queries = catalog.recorded_queries();
    assert_eq!(
        queries.last().unwrap(),
        &vec![("type", "Human with ants in his eyes".to_string())]
    );
    assert_eq!(session.characters()[0].id, 4);
}

#[tokio::test]
async fn test_default_session_should_send_empty_query() {
    let catalog = Arc::new(catalog());
    let session = ListingSession::new(CharacterPipeline::new(catalog.clone(), PipelineOptions::default()));
    session.refresh().await;
    assert_eq!(catalog.recorded_queries(), vec![Vec::new()]);
}

#[tokio::test]
async fn test_failure_then_recovery_should_replace_state() {
    let failing = session(catalog().with_listing(ListingBehavior::Failing(ClientError::ConnectionError(
        "connection refused".into(),
    ))));
    failing.refresh().await;
    assert!(matches!(failing.state(), ListingState::Failed(ref m) if m.contains("connection refused")));

    let healthy = ListingSession::with_filters(
        CharacterPipeline::new(Arc::new(catalog()), PipelineOptions::default()),
        FilterState {
            status: Selector::from("Dead"),
            ..FilterState::default()
        },
    );
    healthy.refresh().await;
    assert_eq!(healthy.state(), ListingState::Loaded);
    assert_eq!(healthy.error(), None);
    assert_eq!(healthy.characters().len(), 1);
}

#[tokio::test]
async fn test_only_latest_of_many_refreshes_should_apply() {
    let slow = FilterState {
        status: Selector::from("Alive"),
        ..FilterState::default()
    };
    let slower = FilterState {
        status: Selector::from("unknown"),
        ..FilterState::default()
    };
    let catalog = Arc::new(
        catalog()
            .with_listing_delay(slow, Duration::from_millis(80))
            .with_listing_delay(slower, Duration::from_millis(60)),
    );
    let stats = catalog.stats();
    let session = ListingSession::new(CharacterPipeline::new(catalog, PipelineOptions::default()));

    session.set_filter(SelectorKind::Status, Selector::from("Alive"));
    let first = session.refresh();
    let second = async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        session.update_filter(SelectorKind::Status, Selector::from("unknown")).await
    };
    let third = async {
        tokio::time::sleep(Duration::from_millis(15)).await;
        session.update_filter(SelectorKind::Status, Selector::from("Dead")).await
    };
    let (first, second, third) = tokio::join!(first, second, third);

    assert_eq!(first, RefreshOutcome::Stale);
    assert_eq!(second, Some(RefreshOutcome::Stale));
    assert_eq!(third, Some(RefreshOutcome::Applied));
    assert_eq!(stats.listing_calls.load(Ordering::SeqCst), 3);
    let ids: Vec<u64> = session.characters().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3]);
}
