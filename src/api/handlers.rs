//! HTTP request handlers for the Daily Allowance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{generate, recompute_with_amendments};
use crate::models::{
    GenerationResult, IncomeRow, MonthPeriod, PayerRates, PaymentTotals, RecomputeResult,
};

use super::request::{GenerateRequest, RecomputeRequest};
use super::response::ApiError;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate_handler))
        .route("/recompute", post(recompute_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection to an API error.
fn rejection_to_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Validates the claimant's withholding rates.
fn validate_payer(payer: &PayerRates) -> Result<(), ApiError> {
    if payer.tax_rate < Decimal::ZERO || payer.tax_rate > Decimal::ONE {
        return Err(ApiError::validation_error(format!(
            "tax_rate must be between 0 and 1, got {}",
            payer.tax_rate
        )));
    }
    if payer.member_fee_rate < Decimal::ZERO || payer.member_fee_rate > Decimal::ONE {
        return Err(ApiError::validation_error(format!(
            "member_fee_rate must be between 0 and 1, got {}",
            payer.member_fee_rate
        )));
    }
    Ok(())
}

fn bad_request(error: ApiError) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Handler for POST /generate endpoint.
///
/// Accepts the months to generate for, the TOE window and the claimant's
/// rates, and returns the grouped payment rows with totals and an audit
/// trace.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing generation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_to_error(correlation_id, rejection)),
    };

    // Convert request types to domain types
    let periods: Vec<MonthPeriod> = request.periods.into_iter().map(Into::into).collect();
    let toe_periods: Vec<MonthPeriod> = request.toe_periods.into_iter().map(Into::into).collect();
    let payer: PayerRates = request.payer.into();

    if let Err(error) = validate_payer(&payer) {
        warn!(correlation_id = %correlation_id, error = %error.message, "Invalid payer rates");
        return bad_request(error);
    }

    let config = state.config().config();
    let outcome = generate(&periods, &toe_periods, &payer, config);

    info!(
        correlation_id = %correlation_id,
        periods_count = periods.len(),
        rows_count = outcome.rows.len(),
        warnings = outcome.audit.warnings.len(),
        duration_us = outcome.audit.duration_us,
        "Generation completed"
    );

    let totals = PaymentTotals::from_rows(&outcome.rows);
    let result = GenerationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        base_salary: outcome.base_salary.monthly_salary,
        rows: outcome.rows,
        totals,
        audit: outcome.audit,
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

/// Handler for POST /recompute endpoint.
///
/// Merges the amended income rows into the target period, regenerates the
/// payment rows and returns the before/after comparison. An unknown target
/// period is reported in the response body rather than as an HTTP error.
async fn recompute_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecomputeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing recomputation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_to_error(correlation_id, rejection)),
    };

    let periods: Vec<MonthPeriod> = request.periods.into_iter().map(Into::into).collect();
    let toe_periods: Vec<MonthPeriod> = request.toe_periods.into_iter().map(Into::into).collect();
    let payer: PayerRates = request.payer.into();
    let amended: Vec<IncomeRow> = request.amended_rows.into_iter().map(Into::into).collect();

    if let Err(error) = validate_payer(&payer) {
        warn!(correlation_id = %correlation_id, error = %error.message, "Invalid payer rates");
        return bad_request(error);
    }

    let config = state.config().config();

    // Fall back to a regenerated baseline when the caller did not supply the
    // originally issued rows.
    let original_rows = request
        .original_rows
        .unwrap_or_else(|| generate(&periods, &toe_periods, &payer, config).rows);

    let outcome = recompute_with_amendments(
        &original_rows,
        &periods,
        &toe_periods,
        &amended,
        &request.target_period_id,
        &payer,
        config,
    );

    info!(
        correlation_id = %correlation_id,
        target_period_id = %request.target_period_id,
        target_found = outcome.target_found,
        changed_periods = outcome.analysis.differences.len(),
        recovery_gross = %outcome.analysis.recovery_gross,
        "Recomputation completed"
    );

    let result = RecomputeResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        rows: outcome.rows,
        analysis: outcome.analysis,
        case: outcome.case,
        target_found: outcome.target_found,
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::{IncomeRowRequest, MonthPeriodRequest, PayerRatesRequest};
    use crate::config::ConfigLoader;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/ansioturva").expect("Failed to load config");
        AppState::new(config)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn income_request(id: &str, amount: &str) -> IncomeRowRequest {
        IncomeRowRequest {
            id: id.to_string(),
            pay_date: NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
            income_type: "Aikapalkka".to_string(),
            amount: dec(amount),
            status: Default::default(),
            annotation: None,
            subsidized_work: false,
            subsidy_rule: None,
            employer: "Acme Oy".to_string(),
            replaces: None,
        }
    }

    fn create_valid_request() -> GenerateRequest {
        GenerateRequest {
            periods: vec![MonthPeriodRequest {
                id: "2024-12".to_string(),
                label: "Joulukuu 2024".to_string(),
                toe: Decimal::ONE,
                divisor: Some(dec("21.5")),
                employers: vec!["Acme Oy".to_string()],
                rows: vec![income_request("tr_001", "2100.00")],
            }],
            toe_periods: vec![MonthPeriodRequest {
                id: "2024-01".to_string(),
                label: String::new(),
                toe: Decimal::ONE,
                divisor: None,
                employers: vec![],
                rows: vec![income_request("tr_toe", "3000.00")],
            }],
            payer: PayerRatesRequest {
                tax_rate: dec("0.25"),
                member_fee_rate: Decimal::ZERO,
                expense_compensation: Decimal::ZERO,
            },
        }
    }

    async fn post_json(router: Router, uri: &str, body: String) -> axum::response::Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_001_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let response = post_json(router, "/generate", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: GenerationResult = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.base_salary, dec("3000.00"));
        assert!(!result.rows.is_empty());
        assert!(result.totals.gross > Decimal::ZERO);
        assert_eq!(result.totals.paid_days, 22);
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = post_json(router, "/generate", "{invalid json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_payer_returns_400() {
        let router = create_router(create_test_state());

        let body = r#"{ "periods": [], "toe_periods": [] }"#;
        let response = post_json(router, "/generate", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert!(
            error.message.contains("missing field")
                || error.message.to_lowercase().contains("payer"),
            "Expected error message to mention the missing field, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_api_004_invalid_tax_rate_returns_400() {
        let router = create_router(create_test_state());

        let mut request = create_valid_request();
        request.payer.tax_rate = dec("1.5");
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/generate", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_api_005_recompute_returns_recovery() {
        let router = create_router(create_test_state());

        let generation = create_valid_request();
        let request = RecomputeRequest {
            periods: generation.periods,
            toe_periods: generation.toe_periods,
            payer: generation.payer,
            amended_rows: vec![income_request("tr_new", "2900.00")],
            target_period_id: "2024-12".to_string(),
            original_rows: None,
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/recompute", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: RecomputeResult = serde_json::from_slice(&body).unwrap();

        assert!(result.target_found);
        assert!(result.analysis.recovery_gross > Decimal::ZERO);
        assert_eq!(result.analysis.additional_gross, Decimal::ZERO);
        assert!(result.case.is_some());
    }

    #[tokio::test]
    async fn test_api_006_recompute_unknown_target_is_soft() {
        let router = create_router(create_test_state());

        let generation = create_valid_request();
        let request = RecomputeRequest {
            periods: generation.periods,
            toe_periods: generation.toe_periods,
            payer: generation.payer,
            amended_rows: vec![income_request("tr_new", "2900.00")],
            target_period_id: "2030-01".to_string(),
            original_rows: None,
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/recompute", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: RecomputeResult = serde_json::from_slice(&body).unwrap();

        assert!(!result.target_found);
        assert!(result.analysis.differences.is_empty());
        assert!(result.case.is_none());
    }
}
