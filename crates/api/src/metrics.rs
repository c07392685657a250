//! Prometheus metrics for the HTTP surface and the business operations.
//!
//! The registry is owned by [`Metrics`] and lives in [`AppState`]; nothing is
//! registered globally, so every test app gets its own counters.

use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::state::AppState;

/// Request latency buckets, in seconds.
const DURATION_BUCKETS: &[f64] = &[0.1, 0.5, 1.0, 2.0, 5.0];

/// Path label for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

pub struct Metrics {
    registry: Registry,
    http_requests: IntCounterVec,
    http_duration: HistogramVec,
    pvz_created: IntCounter,
    receptions_created: IntCounter,
    products_added: IntCounter,
}

impl Metrics {
    /// Create every series and register it on a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;
        let http_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Duration of HTTP requests",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "path"],
        )?;
        let pvz_created = IntCounter::new(
            "business_pvz_created_total",
            "Total number of pickup points created",
        )?;
        let receptions_created = IntCounter::new(
            "business_receptions_created_total",
            "Total number of receptions opened",
        )?;
        let products_added = IntCounter::new(
            "business_products_added_total",
            "Total number of products added",
        )?;

        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(http_duration.clone()))?;
        registry.register(Box::new(pvz_created.clone()))?;
        registry.register(Box::new(receptions_created.clone()))?;
        registry.register(Box::new(products_added.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            http_duration,
            pvz_created,
            receptions_created,
            products_added,
        })
    }

    pub fn observe_request(&self, method: &str, path: &str, status: u16, elapsed_secs: f64) {
        self.http_requests
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
        self.http_duration
            .with_label_values(&[method, path])
            .observe(elapsed_secs);
    }

    pub fn record_pvz_created(&self) {
        self.pvz_created.inc();
    }

    pub fn record_reception_created(&self) {
        self.receptions_created.inc();
    }

    pub fn record_product_added(&self) {
        self.products_added.inc();
    }

    /// Render all series in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Middleware recording the request counter and latency histogram.
///
/// The `path` label is the route template (e.g. `/pvz/{pvz_id}/close_last_reception`)
/// so ids do not explode label cardinality.
pub async fn track_http_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().as_str().to_owned();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH.to_owned());

    let started = Instant::now();
    let response = next.run(request).await;

    state.metrics.observe_request(
        &method,
        &path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}
