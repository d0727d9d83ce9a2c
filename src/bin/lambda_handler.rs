//! AWS Lambda handler for wealth projections
//!
//! Accepts `{"user_class": ..., "monthly_investment": ..., "years": ...}` and
//! returns the scenario -> {p10, median, p90} mapping as JSON.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use std::sync::Arc;

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use aws_lambda_events::http::HeaderMap;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::Deserialize;

use wealth_projection::{EngineConfig, ProjectionEngine, ProjectionRequest, ScenarioCatalog};

/// Longest horizon a single invocation will project
const MAX_YEARS: i64 = 100;

/// Request body sent by the web backend
#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    /// Classification of the user; carried on the wire, unused by the engine
    #[serde(default)]
    pub user_class: Option<String>,

    /// Contribution made at the start of every month
    pub monthly_investment: f64,

    /// Horizon in years
    pub years: i64,
}

fn response(status: i64, body: Option<String>) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", "application/json".parse()?);
    headers.insert("access-control-allow-origin", "*".parse()?);
    headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    headers.insert("access-control-allow-headers", "Content-Type".parse()?);

    Ok(LambdaFunctionUrlResponse {
        status_code: status,
        headers,
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    })
}

fn error_response(status: i64, message: &str) -> Result<LambdaFunctionUrlResponse, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    response(status, Some(body))
}

/// Handle one function URL invocation
fn handle(
    engine: &ProjectionEngine,
    event: &LambdaFunctionUrlRequest,
) -> Result<LambdaFunctionUrlResponse, Error> {
    // CORS preflight
    if event.request_context.http.method.as_deref() == Some("OPTIONS") {
        return response(200, None);
    }

    if event.is_base64_encoded {
        return error_response(400, "Binary request bodies are not supported");
    }

    let body = event.body.as_deref().unwrap_or("{}");
    let payload: SimulationRequest = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    if payload.years > MAX_YEARS {
        return error_response(400, &format!("years must be at most {}", MAX_YEARS));
    }

    let request = ProjectionRequest::from_years(payload.monthly_investment, payload.years);
    match engine.project(&request) {
        Ok(result) => {
            info!(
                "projected {} scenarios for user class {:?}",
                result.len(),
                payload.user_class
            );
            response(200, Some(serde_json::to_string(&result)?))
        }
        Err(e) => {
            warn!("rejected request: {}", e);
            error_response(400, &e.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let engine = Arc::new(ProjectionEngine::new(
        ScenarioCatalog::default(),
        EngineConfig::from_env()?,
    )?);

    run(service_fn(move |event: LambdaEvent<LambdaFunctionUrlRequest>| {
        let engine = Arc::clone(&engine);
        async move { handle(&engine, &event.payload) }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ProjectionEngine {
        let config = EngineConfig {
            trial_count: 20,
            seed: Some(42),
            ..Default::default()
        };
        ProjectionEngine::new(ScenarioCatalog::default(), config).unwrap()
    }

    fn event(method: &str, body: Option<&str>) -> LambdaFunctionUrlRequest {
        serde_json::from_value(serde_json::json!({
            "version": "2.0",
            "rawPath": "/",
            "requestContext": {
                "timeEpoch": 0,
                "http": { "method": method, "path": "/" }
            },
            "body": body,
            "isBase64Encoded": false
        }))
        .unwrap()
    }

    fn post(body: &str) -> LambdaFunctionUrlRequest {
        event("POST", Some(body))
    }

    #[test]
    fn test_projection_response() {
        let event = post(r#"{"user_class": "Saver", "monthly_investment": 5000, "years": 10}"#);
        let response = handle(&engine(), &event).unwrap();

        assert_eq!(response.status_code, 200);
        let body: serde_json::Value = serde_json::from_str(response.body.as_deref().unwrap()).unwrap();
        for name in ["Conservative", "Balanced", "Aggressive"] {
            let summary = &body[name];
            assert!(summary["p10"].as_i64().unwrap() <= summary["median"].as_i64().unwrap());
            assert!(summary["median"].as_i64().unwrap() <= summary["p90"].as_i64().unwrap());
        }
    }

    #[test]
    fn test_user_class_optional() {
        let response = handle(&engine(), &post(r#"{"monthly_investment": 100, "years": 1}"#)).unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn test_invalid_json() {
        let response = handle(&engine(), &post("{not json")).unwrap();
        assert_eq!(response.status_code, 400);
        assert!(response.body.unwrap().contains("Invalid JSON"));
    }

    #[test]
    fn test_invalid_horizon() {
        let response = handle(&engine(), &post(r#"{"monthly_investment": 100, "years": 0}"#)).unwrap();
        assert_eq!(response.status_code, 400);
        assert!(response.body.unwrap().contains("invalid horizon"));
    }

    #[test]
    fn test_horizon_capped() {
        let response = handle(&engine(), &post(r#"{"monthly_investment": 100, "years": 5000}"#)).unwrap();
        assert_eq!(response.status_code, 400);
        assert!(response.body.unwrap().contains("at most 100"));

        let response = handle(&engine(), &post(r#"{"monthly_investment": 100, "years": 100}"#)).unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn test_base64_body_rejected() {
        let mut event = post("e30=");
        event.is_base64_encoded = true;

        let response = handle(&engine(), &event).unwrap();
        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn test_preflight() {
        let response = handle(&engine(), &event("OPTIONS", None)).unwrap();
        assert_eq!(response.status_code, 200);
        assert!(response.body.is_none());
        assert_eq!(response.headers["access-control-allow-origin"], "*");
    }
}
