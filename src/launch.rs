//! Host launch primitives and the fallback chain used when a launch fails.
//!
//! A failed launch never aborts the login outright. The executor steps down one tier at a
//! time: a native app falls back to browser selection, a named isolated session to an
//! unspecified one, and that to the external browser. Only an external-browser failure is
//! terminal.

// self
use crate::{
	_prelude::*,
	capability::CapabilityQuery,
	obs::{self, RedirectStage},
	selector::{BrowserSelector, LaunchTarget},
};

/// Host-provided primitives that actually open a URL.
///
/// Implementors are required to be `Send + Sync`. A launch either starts (returning `Ok`)
/// or reports why it could not; it must not block waiting for the login to finish.
pub trait Launcher
where
	Self: Send + Sync,
{
	/// Opens `url` using the strategy described by `target`.
	fn launch(&self, target: &LaunchTarget, url: &Url) -> Result<(), LaunchError>;
}

/// Failure reported by a [`Launcher`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum LaunchError {
	/// No activity or service matched the target (e.g. the package was uninstalled).
	#[error("No handler found for {target}.")]
	NotFound {
		/// Rendered launch target.
		target: String,
	},
	/// The host refused or failed to start the launch.
	#[error("Host rejected the launch: {message}.")]
	Rejected {
		/// Human-readable error payload.
		message: String,
	},
}
impl LaunchError {
	/// Convenience constructor for a missing handler.
	pub fn not_found(target: &LaunchTarget) -> Self {
		Self::NotFound { target: target.to_string() }
	}
}

/// Next lower-priority target once `target` failed to launch.
///
/// Native apps have no fixed successor; their fallback is a fresh browser selection. A named
/// isolated session goes straight to the external browser when isolated sessions are not
/// preferred, since the unspecified tier is off in that mode.
pub fn fallback_for(
	target: &LaunchTarget,
	selector: &BrowserSelector,
	query: &dyn CapabilityQuery,
) -> Option<LaunchTarget> {
	match target {
		LaunchTarget::NativeApp(_) => Some(selector.select_browser(query)),
		LaunchTarget::IsolatedSession(_) if selector.config().prefer_isolated_sessions =>
			Some(LaunchTarget::IsolatedSessionUnspecified),
		LaunchTarget::IsolatedSession(_) => Some(LaunchTarget::ExternalBrowser),
		LaunchTarget::IsolatedSessionUnspecified => Some(LaunchTarget::ExternalBrowser),
		LaunchTarget::ExternalBrowser => None,
	}
}

/// Selects a target for `url` and launches it, stepping down the fallback chain on failure.
///
/// Returns the target that launched. The final [`LaunchError`] is returned once even the
/// external browser fails.
pub fn execute(
	url: &Url,
	selector: &BrowserSelector,
	query: &dyn CapabilityQuery,
	launcher: &dyn Launcher,
) -> Result<LaunchTarget, LaunchError> {
	let target = selector.select(url, query);

	execute_target(target, url, selector, query, launcher)
}

/// Launches a pre-selected target, stepping down the fallback chain on failure.
pub fn execute_target(
	mut target: LaunchTarget,
	url: &Url,
	selector: &BrowserSelector,
	query: &dyn CapabilityQuery,
	launcher: &dyn Launcher,
) -> Result<LaunchTarget, LaunchError> {
	let _guard = obs::RedirectSpan::new(RedirectStage::Launch, None).entered();

	loop {
		match launcher.launch(&target, url) {
			Ok(()) => {
				obs::launched(&target);

				return Ok(target);
			},
			Err(e) => {
				obs::launch_failed(&target, &e);

				match fallback_for(&target, selector, query) {
					Some(next) => target = next,
					None => return Err(e),
				}
			},
		}
	}
}
