//! Policy for suites that need the embedded PostgreSQL cluster.
//!
//! The cluster downloads PostgreSQL binaries and refuses to run as root
//! without a worker helper, so hosts without either report a skip marker
//! instead of failing. CI sets `REQUIRE_TEST_CLUSTER=1` to turn the skip into
//! a hard failure.

/// Returns true when `REQUIRE_TEST_CLUSTER` is set to a truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn test_cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles embedded cluster setup failures consistently across suites.
///
/// Prints a `SKIP-TEST-CLUSTER` marker and returns `None`, or panics when the
/// cluster is required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if test_cluster_required() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
