// Reference data
pub mod agents;
pub mod containers;
pub mod customers;
pub mod ports;
pub mod vessels;

// Scheduling and booking
pub mod freight_orders;
pub mod voyages;

// Shared rules
pub mod pricing;
pub mod validation;

/// Sorted, deduplicated ids for a batched `IN (...)` lookup.
pub(crate) fn distinct_ids(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
