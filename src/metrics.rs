//! Prometheus metrics for application observability.
//!
//! Metrics are recorded through the `metrics` facade. When `METRICS_PORT` is
//! set, a Prometheus exporter serves them over HTTP; otherwise the recording
//! calls below are no-ops.
//!
//! # Available Metrics
//!
//! ## Counters
//! - `catalog_products_created_total` - Products created
//! - `catalog_products_updated_total` - Products updated
//! - `catalog_products_deleted_total` - Products deleted
//! - `catalog_requests_rejected_total` - Requests rejected by middleware (label: reason)
//!
//! ## Gauges
//! - `catalog_products` - Current number of products in the store

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

/// Metric names as constants for consistency.
pub mod names {
    pub const PRODUCTS_CREATED_TOTAL: &str = "catalog_products_created_total";
    pub const PRODUCTS_UPDATED_TOTAL: &str = "catalog_products_updated_total";
    pub const PRODUCTS_DELETED_TOTAL: &str = "catalog_products_deleted_total";
    pub const REQUESTS_REJECTED_TOTAL: &str = "catalog_requests_rejected_total";
    pub const PRODUCTS: &str = "catalog_products";
}

/// Kind of store mutation, used to pick the right counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Created,
    Updated,
    Deleted,
}

/// Initialize the Prometheus metrics exporter on `metrics_addr`.
///
/// # Errors
///
/// Returns a message if the exporter cannot be installed (e.g., port in use
/// or a recorder is already registered).
pub fn init_metrics(metrics_addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(names::PRODUCTS_CREATED_TOTAL, "Total number of products created");
    describe_counter!(names::PRODUCTS_UPDATED_TOTAL, "Total number of products updated");
    describe_counter!(names::PRODUCTS_DELETED_TOTAL, "Total number of products deleted");
    describe_counter!(
        names::REQUESTS_REJECTED_TOTAL,
        "Requests rejected by authentication or validation"
    );
    describe_gauge!(names::PRODUCTS, "Number of products currently in the store");

    info!(%metrics_addr, "Prometheus metrics exporter started");
    Ok(())
}

/// Record a successful store mutation and the resulting store size.
pub fn record_mutation(mutation: Mutation, store_size: usize) {
    let name = match mutation {
        Mutation::Created => names::PRODUCTS_CREATED_TOTAL,
        Mutation::Updated => names::PRODUCTS_UPDATED_TOTAL,
        Mutation::Deleted => names::PRODUCTS_DELETED_TOTAL,
    };
    counter!(name).increment(1);
    gauge!(names::PRODUCTS).set(store_size as f64);
}

/// Record a request rejected by middleware.
pub fn record_rejection(reason: &'static str) {
    counter!(names::REQUESTS_REJECTED_TOTAL, "reason" => reason).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_exporter_is_noop() {
        // No recorder installed: these must not panic
        record_mutation(Mutation::Created, 4);
        record_mutation(Mutation::Deleted, 3);
        record_rejection("unauthorized");
    }
}
