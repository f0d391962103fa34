/*!
 * From a config file on disk to a refreshed listing and an opened debt
 */

use mockito::{Matcher, Server};
use serde_json::json;
use tempfile::tempdir;

use mortydex::{Config, Controller, ListingState, RefreshOutcome, SelectorKind, Selector, apply_search};
use mortydex::models::FilterState;

use crate::common::{character_json, episode_json, init_logging, page_json};

#[tokio::test]
async fn test_config_file_should_drive_listing_and_debt_editing() {
    init_logging();
    let mut server = Server::new_async().await;
    let base = server.url();

    let listing = server
        .mock("GET", "/api/character")
        .match_query(Matcher::UrlEncoded("gender".into(), "Female".into()))
        .match_header("authorization", "Bearer file-token")
        .with_status(200)
        .with_body(page_json(vec![
            character_json(3, "Summer Smith", "Alive", &format!("{}/api/episode/6", base)),
            character_json(4, "Beth Smith", "Alive", &format!("{}/api/episode/6", base)),
            character_json(38, "Beth Smith", "Alive", &format!("{}/api/episode/6", base)),
        ]))
        .create_async()
        .await;
    server
        .mock("GET", "/api/episode/6")
        .with_status(200)
        .with_body(episode_json("Rick Potion #9"))
        .expect(3)
        .create_async()
        .await;
    server
        .mock("GET", "/finance/debt/1")
        .match_header("authorization", "Bearer file-token")
        .with_status(200)
        .with_body(
            json!({ "data": { "debtName": "Flurbos", "debtAmount": 100.0, "interestRate": 10.0, "installment": 2.0 } })
                .to_string(),
        )
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let token_path = dir.path().join("token");
    std::fs::write(&token_path, "file-token\n").unwrap();
    let config_path = dir.path().join("conf.json");
    std::fs::write(
        &config_path,
        json!({
            "catalog": { "endpoint": base },
            "backend": { "endpoint": base, "timeout_secs": 2 },
            "listing": { "max_concurrent_enrichments": 2 },
            "auth": { "token_file": token_path },
            "log_level": "debug"
        })
        .to_string(),
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.listing.max_concurrent_enrichments, Some(2));
    let controller = Controller::with_config(config).unwrap();

    let session = controller.listing_session(FilterState::default());
    let outcome = session
        .update_filter(SelectorKind::Gender, Selector::from("Female"))
        .await;
    assert_eq!(outcome, Some(RefreshOutcome::Applied));
    listing.assert_async().await;

    assert_eq!(session.state(), ListingState::Loaded);
    assert_eq!(session.characters().len(), 3);
    session.set_search("beth");
    let ids: Vec<u64> = session.displayed().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![4, 38]);
    assert_eq!(apply_search(&session.characters(), "summer").len(), 1);

    let editor = controller.open_debt("1").await;
    assert!(editor.is_loaded());
    assert_eq!(editor.projected_amount(), 121.0);
}

#[test]
fn test_missing_config_should_be_created_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested-conf.json");

    let config = Config::load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(Config::from_file(&path).unwrap(), config);
}
