//! Navigation and resource timing snapshot.

use serde::{Deserialize, Serialize};

use crate::page::{NavigationTiming, Page, ResourceTiming};
use crate::url_utils;
use crate::Options;

/// A resource that took longer than the slow-resource threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlowResource {
    /// Last path segment of the resource URL.
    pub url: String,
    /// Initiator type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Duration in whole milliseconds.
    pub duration: u64,
}

/// Timings reported when navigation timing is available.
///
/// Deltas are milliseconds from navigation start; `None` when the event has
/// not fired yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceTimings {
    /// Navigation start to `load` end.
    pub load_time: Option<f64>,
    /// Navigation start to `DOMContentLoaded` end.
    pub dom_content_loaded: Option<f64>,
    /// Navigation start to the first response byte.
    pub time_to_first_byte: Option<f64>,
    /// Number of resource timing entries.
    pub resource_count: usize,
    /// Slow resources in retrieval order, capped.
    pub large_resources: Vec<SlowResource>,
}

/// Performance section of the report.
///
/// Serializes as `{"available": false}` alone when no navigation timing was
/// supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Navigation timing was supplied.
    pub available: bool,
    /// Timings, present iff `available`.
    #[serde(flatten)]
    pub timings: Option<PerformanceTimings>,
}

/// Summarize the page's timing data.
#[must_use]
pub fn analyze(page: &Page, options: &Options) -> PerformanceReport {
    let Some(timing) = page.navigation_timing() else {
        log::debug!("performance: navigation timing unavailable");
        return PerformanceReport::default();
    };

    let timings = PerformanceTimings {
        load_time: since_navigation_start(timing, timing.load_event_end),
        dom_content_loaded: since_navigation_start(timing, timing.dom_content_loaded_event_end),
        time_to_first_byte: since_navigation_start(timing, timing.response_start),
        resource_count: page.resources().len(),
        large_resources: slow_resources(page.resources(), options),
    };

    log::debug!(
        "performance: load {:?} ms, {} resources, {} slow",
        timings.load_time,
        timings.resource_count,
        timings.large_resources.len()
    );

    PerformanceReport {
        available: true,
        timings: Some(timings),
    }
}

fn since_navigation_start(timing: &NavigationTiming, event: f64) -> Option<f64> {
    (event > 0.0 && event >= timing.navigation_start).then(|| event - timing.navigation_start)
}

fn slow_resources(resources: &[ResourceTiming], options: &Options) -> Vec<SlowResource> {
    resources
        .iter()
        .filter(|r| r.duration > options.slow_resource_ms)
        .take(options.max_slow_resources)
        .map(|r| SlowResource {
            url: url_utils::last_path_segment(&r.name).to_string(),
            kind: r.initiator_type.clone(),
            duration: r.duration.round() as u64,
        })
        .collect()
}
