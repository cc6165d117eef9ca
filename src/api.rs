// 🌐 HTTP API - thin adapters over loader + matcher
//
// Routes (aliases under /api mirror the public API paths):
//   GET  /lookup?bin=       GET  /api/bin?bin=
//   POST /lookup/bulk       POST /api/bulk-bin
//                           POST /api/bulk-bin/csv
//   GET  /stats             GET  /api/stats
//                           GET  /api/health

use crate::error::LookupError;
use crate::export::{results_to_csv, EXPORT_FILENAME};
use crate::loader::DatasetSource;
use crate::matcher::{find_many, find_one};
use crate::record::BinRecord;
use crate::stats::DatasetStats;
use crate::validation::Limits;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{
        header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
        Method, StatusCode,
    },
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    source: Arc<DatasetSource>,
    limits: Limits,
}

impl AppState {
    pub fn new(source: DatasetSource, limits: Limits) -> Self {
        AppState {
            source: Arc::new(source),
            limits,
        }
    }

    /// Current table; per-request reads go to the blocking pool
    async fn dataset(&self) -> Result<Arc<Vec<BinRecord>>, LookupError> {
        if let DatasetSource::Snapshot { .. } = self.source.as_ref() {
            return self.source.load();
        }

        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(|e| LookupError::DataUnavailable {
                path: self.source.path().to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e),
            })?
    }
}

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    bin: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    #[serde(default)]
    bins: Vec<String>,
}

#[derive(Serialize)]
struct BulkResponse<'a> {
    results: Vec<&'a BinRecord>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    mode: &'static str,
    timestamp: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        if self.is_data_error() {
            // path and cause stay in the log
            error!(error = %self, "BIN dataset load failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load BIN dataset");
        }

        let status = match self {
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        error_response(status, self.to_string())
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
        mode: state.source.mode(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /lookup?bin= - first record whose number starts with `bin`
async fn lookup_bin(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Response, LookupError> {
    let bin = state.limits.check_bin(params.bin.as_deref().unwrap_or(""))?;
    let records = state.dataset().await?;

    match find_one(&records, bin) {
        Some(record) => {
            debug!(bin, bank = %record.bank_name, "BIN found");
            Ok(Json(record).into_response())
        }
        None => {
            debug!(bin, "BIN not found");
            Err(LookupError::NotFound("BIN not found".to_string()))
        }
    }
}

/// Shared body handling for the bulk endpoints
fn bulk_bins(
    state: &AppState,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> Result<Vec<String>, LookupError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected bulk body");
        LookupError::InvalidInput("Valid BINs array is required".to_string())
    })?;

    // Oversized requests stop here, before any load or lookup
    state.limits.check_bulk(&request.bins)?;

    let bins = state.limits.usable_bins(&request.bins);
    if bins.len() < request.bins.len() {
        debug!(skipped = request.bins.len() - bins.len(), "skipped unusable BINs");
    }
    Ok(bins)
}

/// POST /lookup/bulk - matches only, in request order
async fn bulk_lookup(
    State(state): State<AppState>,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> Result<Response, LookupError> {
    let bins = bulk_bins(&state, payload)?;
    let records = state.dataset().await?;

    let results = find_many(&records, &bins);
    debug!(requested = bins.len(), found = results.len(), "bulk lookup");

    Ok(Json(BulkResponse { results }).into_response())
}

/// POST /api/bulk-bin/csv - bulk lookup rendered as a CSV download
async fn bulk_export(
    State(state): State<AppState>,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> Result<Response, LookupError> {
    let bins = bulk_bins(&state, payload)?;
    let records = state.dataset().await?;

    let results = find_many(&records, &bins);

    match results_to_csv(results) {
        Ok(csv) => Ok((
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
                ),
            ],
            csv,
        )
            .into_response()),
        Err(e) => {
            error!(error = %e, "CSV export failed");
            Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to export BIN results",
            ))
        }
    }
}

/// GET /stats - never fails; falls back to fixed numbers
async fn get_stats(State(state): State<AppState>) -> Json<DatasetStats> {
    match state.dataset().await {
        Ok(records) => Json(DatasetStats::compute(&records)),
        Err(e) => {
            warn!(error = %e, "stats falling back to fixed numbers");
            Json(DatasetStats::FALLBACK)
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/bin", get(lookup_bin))
        .route("/bulk-bin", post(bulk_lookup))
        .route("/bulk-bin/csv", post(bulk_export))
        .route("/stats", get(get_stats));

    Router::new()
        .route("/lookup", get(lookup_bin))
        .route("/lookup/bulk", post(bulk_lookup))
        .route("/stats", get(get_stats))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors_layer())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

// ============================================================================
// TESTS
// ============================================================================
