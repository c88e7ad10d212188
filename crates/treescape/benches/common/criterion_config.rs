use std::time::Duration;

use criterion::Criterion;

/// Baseline Criterion configuration for all benchmarks.
///
/// Partition extraction is fast, so short measurement windows are enough.
pub fn default_criterion() -> Criterion {
	Criterion::default()
		// Allows `--bench` command-line overrides.
		.configure_from_args()
		.warm_up_time(Duration::from_secs(1))
		.measurement_time(Duration::from_secs(5))
		.sample_size(20)
}
