/*!
 * Tests for error types and conversions
 */

use mortydex::errors::{AppError, ClientError, ConfigError, DebtError};

#[test]
fn test_client_error_api_error_should_display_status_and_message() {
    let error = ClientError::ApiError {
        status_code: 502,
        message: "Bad gateway".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("502"));
    assert!(display.contains("Bad gateway"));
}

#[test]
fn test_client_error_timeout_should_display_correctly() {
    let display = ClientError::Timeout("operation timed out".to_string()).to_string();
    assert!(display.starts_with("Request timed out"));
}

#[test]
fn test_debt_error_invalid_number_should_name_field() {
    let error = DebtError::InvalidNumber {
        field: "installment",
        value: "twelve".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("installment"));
    assert!(display.contains("twelve"));
}

#[test]
fn test_app_error_from_client_error_should_wrap() {
    let app_error: AppError = ClientError::NotFound("api/character".to_string()).into();
    assert!(matches!(app_error, AppError::Client(ClientError::NotFound(_))));
    assert!(app_error.to_string().contains("Resource not found"));
}

#[test]
fn test_app_error_from_config_error_should_wrap() {
    let app_error: AppError = ConfigError::ZeroTimeout.into();
    assert!(matches!(app_error, AppError::Config(ConfigError::ZeroTimeout)));
}

#[test]
fn test_app_error_from_anyhow_should_become_unknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    match app_error {
        AppError::Unknown(message) => assert_eq!(message, "something odd"),
        other => panic!("unexpected variant: {:?}", other),
    }
}
