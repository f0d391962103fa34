/*!
 * Debt client and editor against a local mock HTTP server
 */

use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

use mortydex::DebtEditor;
use mortydex::clients::{DebtApi, DebtClient};
use mortydex::errors::{ClientError, DebtError};
use mortydex::models::DebtField;

use crate::common::{TEST_TOKEN, http_client, init_logging};

fn debt_body() -> String {
    json!({
        "data": {
            "id": "42",
            "debtName": "Portal gun repairs",
            "lenderName": "Council of Ricks",
            "debtAmount": 1000.0,
            "interestRate": 5.0,
            "installment": 12.0,
            "description": "Fluid refill",
            "createdAt": "2024-03-01"
        }
    })
    .to_string()
}

fn client_for(base_url: &str) -> Arc<dyn DebtApi> {
    Arc::new(DebtClient::new(http_client(base_url, true)))
}

#[tokio::test]
async fn test_open_should_unwrap_envelope_and_project() {
    init_logging();
    let mut server = Server::new_async().await;
    let fetch = server
        .mock("GET", "/finance/debt/42")
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .with_status(200)
        .with_body(debt_body())
        .create_async()
        .await;

    let editor = DebtEditor::open(client_for(&server.url()), "42").await;

    fetch.assert_async().await;
    let record = editor.record().expect("record should load");
    assert_eq!(record.debt_name, "Portal gun repairs");
    assert_eq!(record.extra.get("createdAt"), Some(&json!("2024-03-01")));
    assert_eq!(editor.projected_amount(), 1795.86);
}

#[tokio::test]
async fn test_submit_should_put_edited_record_with_extra_fields() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/finance/debt/42")
        .with_status(200)
        .with_body(debt_body())
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/finance/debt/42")
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .match_body(Matcher::PartialJson(json!({
            "lenderName": "Unity",
            "installment": 24.0,
            "createdAt": "2024-03-01"
        })))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let mut editor = DebtEditor::open(client_for(&server.url()), "42").await;
    editor.set_field(DebtField::LenderName, "Unity").unwrap();
    editor.set_field(DebtField::Installment, "24").unwrap();
    let saved = editor.submit().await;

    update.assert_async().await;
    assert_eq!(saved.map(|r| r.lender_name), Some("Unity".to_string()));
}

#[tokio::test]
async fn test_failed_submit_should_return_none_and_keep_edits() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/finance/debt/7")
        .with_status(200)
        .with_body(debt_body())
        .create_async()
        .await;
    server
        .mock("PUT", "/finance/debt/7")
        .with_status(500)
        .with_body("ledger offline")
        .create_async()
        .await;

    let mut editor = DebtEditor::open(client_for(&server.url()), "7").await;
    editor.set_field(DebtField::DebtAmount, "2000").unwrap();

    assert!(editor.submit().await.is_none());
    assert_eq!(editor.record().map(|r| r.debt_amount), Some(2000.0));
    assert_eq!(editor.projected_amount(), 3591.71);
}

#[tokio::test]
async fn test_missing_debt_should_open_empty_editor() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/finance/debt/404")
        .with_status(404)
        .create_async()
        .await;

    let api = client_for(&server.url());
    assert!(matches!(api.get_debt("404").await, Err(ClientError::NotFound(_))));

    let mut editor = DebtEditor::open(api, "404").await;
    assert!(!editor.is_loaded());
    assert_eq!(editor.projected_amount(), 0.0);
    assert_eq!(editor.set_field(DebtField::DebtName, "x"), Err(DebtError::NotLoaded));
    assert!(editor.submit().await.is_none());
}

#[tokio::test]
async fn test_debt_id_should_stay_inside_debt_collection() {
    let mut server = Server::new_async().await;
    let escaped = server
        .mock("GET", "/admin/secret")
        .with_status(200)
        .with_body(debt_body())
        .expect(0)
        .create_async()
        .await;
    let inside = server
        .mock("GET", Matcher::Regex(r"^/finance/debt/.+".to_string()))
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let editor = DebtEditor::open(client_for(&server.url()), "../../admin/secret").await;

    escaped.assert_async().await;
    inside.assert_async().await;
    assert!(!editor.is_loaded());
}

#[tokio::test]
async fn test_dot_debt_ids_should_not_reach_backend() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body(debt_body())
        .expect(0)
        .create_async()
        .await;

    let api = client_for(&server.url());
    for id in ["..", ".", ""] {
        assert!(matches!(api.get_debt(id).await, Err(ClientError::InvalidUrl(_))));
    }
    any.assert_async().await;
}

#[tokio::test]
async fn test_null_description_should_still_open() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/finance/debt/9")
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "debtName": "Plumbus",
                    "lenderName": "Gazorpazorp Bank",
                    "debtAmount": 1000.0,
                    "interestRate": 5.0,
                    "installment": 12.0,
                    "description": null
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let editor = DebtEditor::open(client_for(&server.url()), "9").await;

    let record = editor.record().expect("record should load");
    assert_eq!(record.description, "");
    assert_eq!(editor.projected_amount(), 1795.86);
}
