//! HTTP request handlers for the OEE Monitoring Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{NaiveDateTime, Timelike};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_metrics;
use crate::error::{EngineError, EngineResult};
use crate::models::{MachineEvent, OeeMetrics, ProductionCycle};

use super::response::{ApiErrorResponse, HourlyProduction};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts", get(list_shifts_handler))
        .route("/shifts/:shift_id/metrics", get(shift_metrics_handler))
        .route("/shifts/:shift_id/events", get(shift_events_handler))
        .route(
            "/shifts/:shift_id/production/hourly",
            get(shift_production_handler),
        )
        .with_state(state)
}

/// Handler for GET /shifts.
///
/// Returns all known shifts, ordered by start time, for shift selection
/// in display clients.
async fn list_shifts_handler(State(state): State<AppState>) -> Response {
    match state.store().shifts() {
        Ok(shifts) => (StatusCode::OK, Json(shifts)).into_response(),
        Err(err) => {
            warn!(error = %err, "Failed to list shifts");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /shifts/:shift_id/metrics.
///
/// Returns the shift's OEE metrics, recomputed at most once per cache
/// freshness window.
async fn shift_metrics_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<i64>,
) -> Response {
    // Correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, shift_id, "Processing metrics request");

    let result = state
        .cache()
        .get_or_compute(shift_id, || compute_shift_metrics(&state, shift_id));

    match result {
        Ok(metrics) => {
            info!(
                correlation_id = %correlation_id,
                shift_id,
                oee = metrics.oee,
                total_pieces = metrics.total_pieces,
                "Metrics computed"
            );
            (StatusCode::OK, Json(metrics)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                shift_id,
                error = %err,
                "Metrics request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Fetches a shift snapshot from the store and runs the OEE computation
/// over it.
fn compute_shift_metrics(state: &AppState, shift_id: i64) -> EngineResult<OeeMetrics> {
    let snapshot = state
        .store()
        .snapshot(shift_id)?
        .ok_or(EngineError::ShiftNotFound { shift_id })?;

    Ok(compute_metrics(
        &snapshot.shift,
        &snapshot.events,
        &snapshot.cycles,
        &snapshot.products,
    ))
}

#[derive(Debug, Deserialize)]
struct EventListQuery {
    #[serde(default = "default_event_limit")]
    limit: usize,
}

fn default_event_limit() -> usize {
    50
}

/// Handler for GET /shifts/:shift_id/events.
///
/// Returns the shift's most recent events, newest first, bounded by the
/// `limit` query parameter (default 50).
async fn shift_events_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<i64>,
    Query(query): Query<EventListQuery>,
) -> Response {
    match list_shift_events(&state, shift_id, query.limit) {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(err) => {
            warn!(shift_id, error = %err, "Event listing failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn list_shift_events(
    state: &AppState,
    shift_id: i64,
    limit: usize,
) -> EngineResult<Vec<MachineEvent>> {
    state
        .store()
        .shift(shift_id)?
        .ok_or(EngineError::ShiftNotFound { shift_id })?;
    state.store().recent_events_for_shift(shift_id, limit)
}

/// Handler for GET /shifts/:shift_id/production/hourly.
///
/// Returns the shift's production bucketed by hour, for the dashboard's
/// throughput chart.
async fn shift_production_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<i64>,
) -> Response {
    match list_hourly_production(&state, shift_id) {
        Ok(buckets) => (StatusCode::OK, Json(buckets)).into_response(),
        Err(err) => {
            warn!(shift_id, error = %err, "Production listing failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn list_hourly_production(state: &AppState, shift_id: i64) -> EngineResult<Vec<HourlyProduction>> {
    state
        .store()
        .shift(shift_id)?
        .ok_or(EngineError::ShiftNotFound { shift_id })?;
    let cycles = state.store().cycles_for_shift(shift_id)?;
    Ok(bucket_by_hour(&cycles))
}

/// Counts production cycles per hour bucket, in chronological order.
fn bucket_by_hour(cycles: &[ProductionCycle]) -> Vec<HourlyProduction> {
    let mut buckets: BTreeMap<NaiveDateTime, u64> = BTreeMap::new();
    for cycle in cycles {
        *buckets.entry(hour_bucket(cycle.timestamp)).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(hour, pieces)| HourlyProduction { hour, pieces })
        .collect()
}

fn hour_bucket(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .date()
        .and_hms_opt(timestamp.hour(), 0, 0)
        .unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use crate::models::{EventKind, Product, Shift};
    use crate::store::LineStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::Duration;
    use tower::ServiceExt;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn event(shift_id: i64, timestamp: &str, kind: EventKind) -> MachineEvent {
        MachineEvent {
            shift_id,
            timestamp: make_datetime(timestamp),
            kind,
            details: None,
        }
    }

    /// Seeds the reference scenario: an 8-hour shift with one 10-minute
    /// failure and 500 pieces (480 good) of a product with a 50s ideal
    /// cycle.
    fn seeded_store() -> LineStore {
        let store = LineStore::in_memory().expect("Failed to open in-memory store");

        store
            .upsert_shift(&Shift {
                id: 1,
                name: "Morning".to_string(),
                start_time: make_datetime("2025-11-03 08:00:00"),
                end_time: make_datetime("2025-11-03 16:00:00"),
            })
            .unwrap();
        store
            .upsert_product(&Product {
                id: 1,
                name: "0.5L still water".to_string(),
                ideal_cycle_secs: 50.0,
            })
            .unwrap();

        store
            .insert_event(&event(1, "2025-11-03 09:00:00", EventKind::FailureStart))
            .unwrap();
        store
            .insert_event(&event(1, "2025-11-03 09:10:00", EventKind::FailureEnd))
            .unwrap();

        let first_cycle = make_datetime("2025-11-03 08:00:30");
        for i in 0..500 {
            store
                .insert_cycle(&ProductionCycle {
                    shift_id: 1,
                    timestamp: first_cycle + Duration::seconds(i * 55),
                    product_id: 1,
                    is_good: i < 480,
                    actual_cycle_secs: 55.0,
                })
                .unwrap();
        }

        store
    }

    fn create_test_state() -> AppState {
        AppState::new(seeded_store(), &CacheConfig::default())
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_api_001_list_shifts_returns_200() {
        let router = create_router(create_test_state());

        let (status, json) = get_json(router, "/shifts").await;

        assert_eq!(status, StatusCode::OK);
        let shifts = json.as_array().unwrap();
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0]["name"], "Morning");
    }

    #[tokio::test]
    async fn test_api_002_metrics_for_seeded_shift() {
        let router = create_router(create_test_state());

        let (status, json) = get_json(router, "/shifts/1/metrics").await;

        assert_eq!(status, StatusCode::OK);
        let metrics: OeeMetrics = serde_json::from_value(json).unwrap();

        assert_eq!(metrics.planned_time_secs, 28800.0);
        assert_eq!(metrics.downtime_secs, 600.0);
        assert_eq!(metrics.run_time_secs, 28200.0);
        assert_eq!(metrics.total_pieces, 500);
        assert_eq!(metrics.good_pieces, 480);
        assert!((metrics.availability - 0.9792).abs() < 1e-4);
        assert!((metrics.performance - 0.8865).abs() < 1e-4);
        assert!((metrics.quality - 0.96).abs() < 1e-9);
        assert!((metrics.oee - 0.8334).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_api_003_unknown_shift_returns_404() {
        let router = create_router(create_test_state());

        let (status, json) = get_json(router, "/shifts/99/metrics").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "SHIFT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_api_004_events_newest_first_with_limit() {
        let router = create_router(create_test_state());

        let (status, json) = get_json(router, "/shifts/1/events?limit=1").await;

        assert_eq!(status, StatusCode::OK);
        let events = json.as_array().unwrap();
        assert_eq!(events.len(), 1);
        // The 09:10 FAILURE_END is the newest event.
        assert_eq!(events[0]["kind"], "FAILURE_END");
    }

    #[tokio::test]
    async fn test_api_005_events_default_limit() {
        let router = create_router(create_test_state());

        let (status, json) = get_json(router, "/shifts/1/events").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_api_006_events_unknown_shift_returns_404() {
        let router = create_router(create_test_state());

        let (status, json) = get_json(router, "/shifts/99/events").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "SHIFT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_api_007_hourly_production_buckets() {
        let router = create_router(create_test_state());

        let (status, json) = get_json(router, "/shifts/1/production/hourly").await;

        assert_eq!(status, StatusCode::OK);
        let buckets: Vec<HourlyProduction> = serde_json::from_value(json).unwrap();

        // 500 cycles spaced 55s apart starting 08:00:30 span 8 hours.
        let total: u64 = buckets.iter().map(|b| b.pieces).sum();
        assert_eq!(total, 500);
        assert_eq!(buckets[0].hour, make_datetime("2025-11-03 08:00:00"));
        // Full hours fit 66 cycles at 55s spacing.
        assert!(buckets[1].pieces == 65 || buckets[1].pieces == 66);
    }

    #[test]
    fn test_bucket_by_hour_groups_and_sorts() {
        let cycles = vec![
            ProductionCycle {
                shift_id: 1,
                timestamp: make_datetime("2025-11-03 09:59:59"),
                product_id: 1,
                is_good: true,
                actual_cycle_secs: 5.0,
            },
            ProductionCycle {
                shift_id: 1,
                timestamp: make_datetime("2025-11-03 08:15:00"),
                product_id: 1,
                is_good: true,
                actual_cycle_secs: 5.0,
            },
            ProductionCycle {
                shift_id: 1,
                timestamp: make_datetime("2025-11-03 09:05:00"),
                product_id: 1,
                is_good: false,
                actual_cycle_secs: 5.0,
            },
        ];

        let buckets = bucket_by_hour(&cycles);

        assert_eq!(
            buckets,
            vec![
                HourlyProduction {
                    hour: make_datetime("2025-11-03 08:00:00"),
                    pieces: 1,
                },
                HourlyProduction {
                    hour: make_datetime("2025-11-03 09:00:00"),
                    pieces: 2,
                },
            ]
        );
    }

    #[test]
    fn test_bucket_by_hour_empty() {
        assert!(bucket_by_hour(&[]).is_empty());
    }
}
