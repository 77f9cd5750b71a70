// self
use crate::{
	_prelude::*,
	auth::LoginId,
	capability::QueryError,
	launch::LaunchError,
	obs::{RedirectStage, Resolution},
	selector::LaunchTarget,
};

/// A span builder used around selection, launching, and correlation.
#[derive(Clone, Debug)]
pub struct RedirectSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RedirectSpan {
	/// Creates a new span tagged with the stage and, when known, the login identifier.
	pub fn new(stage: RedirectStage, login: Option<&LoginId>) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"auth_redirect_broker.flow",
				stage = stage.as_str(),
				login = login.map(|id| id.as_ref())
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, login);

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> RedirectSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RedirectSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RedirectSpanGuard {}
		}
	}
}

/// RAII guard returned by [`RedirectSpan::entered`].
pub struct RedirectSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for RedirectSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RedirectSpanGuard(..)")
	}
}

/// Logs a capability query that degraded to "capability absent".
pub fn query_failed(query: &'static str, error: &QueryError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(query, %error, "capability query failed; treating capability as absent");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (query, error);
	}
}

/// Logs a launch attempt that failed and will fall through to the next target.
pub fn launch_failed(target: &LaunchTarget, error: &LaunchError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(launch_target = %target, %error, "launch failed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (target, error);
	}
}

/// Logs a launch target that the host accepted.
pub fn launched(target: &LaunchTarget) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(launch_target = %target, "launch accepted");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = target;
	}
}

/// Logs how a pending login left the correlator slot.
pub fn login_resolved(login: &LoginId, resolution: Resolution) {
	#[cfg(feature = "tracing")]
	{
		let label = resolution.as_str();

		match resolution {
			Resolution::Replaced => {
				tracing::warn!(login = %login, resolution = label, "pending login dropped")
			},
			_ => tracing::debug!(login = %login, resolution = label, "pending login resolved"),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (login, resolution);
	}
}

/// Logs a resolving call that found the slot already empty.
pub fn slot_empty(resolution: Resolution) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(resolution = resolution.as_str(), "no pending login; ignoring");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = resolution;
	}
}

/// Logs the first foreground return after a launch, which never resolves the login.
pub fn foreground_suppressed() {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!("first foreground return after launch suppressed");
	}
}
