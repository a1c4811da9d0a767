use axum::{http::StatusCode, response::IntoResponse};
use charityhub::error::AppError;
use http_body_util::BodyExt;
use sea_orm::DbErr;
use serde_json::Value;

#[test]
fn test_app_error_display() {
    let error = AppError::InvalidRequest("donation_amount must be zero or more".to_string());
    assert_eq!(error.to_string(), "Invalid request: donation_amount must be zero or more");

    let error = AppError::Config("unknown store backend 'x'".to_string());
    assert_eq!(error.to_string(), "Configuration error: unknown store backend 'x'");
}

#[test]
fn test_db_errors_convert() {
    let error: AppError = DbErr::RecordNotFound("donor 9".to_string()).into();
    assert!(matches!(error, AppError::Database(_)));

    let error: AppError = DbErr::Custom("Duplicate entry 'alice'".to_string()).into();
    match error {
        AppError::Database(msg) => assert!(msg.contains("Duplicate entry 'alice'")),
        other => panic!("unexpected error: {:?}", other),
    }
}

async fn body_json(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_app_error_into_response() {
    let (status, body) = body_json(AppError::InvalidRequest("bad id".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request: bad id");

    let (status, body) = body_json(AppError::Database("connection refused".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database error: connection refused");
}

#[test]
fn test_serde_error_conversion() {
    let err = serde_json::from_str::<Value>("{not json").unwrap_err();
    let app_err: AppError = err.into();
    assert!(matches!(app_err, AppError::SerializationError(_)));
}
