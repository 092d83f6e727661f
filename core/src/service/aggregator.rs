use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::model::period::{Dimension, Metric, Period};
use crate::model::record_store::RecordStore;
use crate::model::series::{Series, SeriesPoint};
use crate::time::bucket_start;

/// Buckets the entries whose `dimension` equals `target` and reduces each bucket with `metric`.
///
/// Matching is exact. An unknown target yields an empty series, and so does a
/// target whose entries carry no usable value for the metric.
pub fn aggregate(
    store: &RecordStore,
    dimension: Dimension,
    target: &str,
    period: Period,
    metric: Metric,
) -> Series {
    // BTreeMap keeps labels sorted and unique regardless of input order.
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut matched = 0usize;

    for entry in store.entries() {
        if dimension.field(entry) != target {
            continue;
        }
        matched += 1;
        let Some(value) = metric.value_of(entry) else {
            continue;
        };
        let label = bucket_start(entry.date, period);
        buckets
            .entry(label)
            .and_modify(|acc| *acc = metric.combine(*acc, value))
            .or_insert(value);
    }

    debug!(
        %dimension,
        chart_target = target,
        %period,
        ?metric,
        matched,
        buckets = buckets.len(),
        "aggregated"
    );

    Series::from_sorted(
        buckets
            .into_iter()
            .map(|(label, value)| SeriesPoint { label, value })
            .collect(),
    )
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod aggregator_test;
