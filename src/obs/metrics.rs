// self
use crate::{obs::Resolution, selector::LaunchTarget};

/// Records a selection decision via the global metrics recorder (when enabled).
pub fn record_selection(target: &LaunchTarget) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("auth_redirect_broker_selection_total", "target" => target.kind())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = target;
	}
}

/// Records how a pending login was resolved via the global metrics recorder (when enabled).
pub fn record_resolution(resolution: Resolution) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"auth_redirect_broker_resolution_total",
			"resolution" => resolution.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = resolution;
	}
}
