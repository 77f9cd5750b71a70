//! Optional observability helpers for selection, launching, and correlation.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit spans named `auth_redirect_broker.flow` with the
//!   `stage` and `login` fields, plus warn/debug events for degraded queries, failed launches,
//!   and replaced logins.
//! - Enable `metrics` to increment `auth_redirect_broker_selection_total` (labeled by `target`)
//!   and `auth_redirect_broker_resolution_total` (labeled by `resolution`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Stages of a login redirect observed by the broker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RedirectStage {
	/// Choosing a launch target.
	Select,
	/// Executing a launch target through the host.
	Launch,
	/// Matching a callback to the pending login.
	Correlate,
}
impl RedirectStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RedirectStage::Select => "select",
			RedirectStage::Launch => "launch",
			RedirectStage::Correlate => "correlate",
		}
	}
}
impl Display for RedirectStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// How a pending login left the correlator slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
	/// A redirect was captured and delivered.
	Redirect,
	/// The caller was told no response arrived.
	NoResponse,
	/// The slot was cleared without notifying the caller.
	Teardown,
	/// A newer registration displaced the pending login.
	Replaced,
}
impl Resolution {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Resolution::Redirect => "redirect",
			Resolution::NoResponse => "no_response",
			Resolution::Teardown => "teardown",
			Resolution::Replaced => "replaced",
		}
	}
}
impl Display for Resolution {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
