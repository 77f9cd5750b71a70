//! High-level login orchestration powered by the broker facade.

pub mod foreground;
pub mod login;

pub use foreground::*;

// self
use crate::{
	_prelude::*,
	capability::CapabilityQuery,
	correlator::RedirectCorrelator,
	launch::Launcher,
	selector::{BrowserSelector, SelectorConfig},
};

/// Coordinates login redirects for a single host.
///
/// The broker owns the selector, the injected platform query and launch primitives, the
/// correlator slot, and the foreground gate, so host lifecycle callbacks only need to
/// forward events. Its lifetime bounds the pending login: dropping or tearing down the
/// broker discards whatever is in flight.
#[derive(Clone)]
pub struct RedirectBroker {
	/// Decision procedure and its static configuration.
	pub selector: BrowserSelector,
	/// Platform view over installed packages.
	pub capabilities: Arc<dyn CapabilityQuery>,
	/// Host primitives that open URLs.
	pub launcher: Arc<dyn Launcher>,
	/// Slot holding the login awaiting its redirect.
	pub correlator: Arc<RedirectCorrelator>,
	foreground: Arc<ForegroundGate>,
}
impl RedirectBroker {
	/// Creates a broker with a fresh correlator.
	pub fn new(
		config: SelectorConfig,
		capabilities: Arc<dyn CapabilityQuery>,
		launcher: Arc<dyn Launcher>,
	) -> Self {
		Self::with_correlator(config, capabilities, launcher, Arc::new(RedirectCorrelator::new()))
	}

	/// Creates a broker that shares a caller-provided correlator.
	pub fn with_correlator(
		config: SelectorConfig,
		capabilities: Arc<dyn CapabilityQuery>,
		launcher: Arc<dyn Launcher>,
		correlator: Arc<RedirectCorrelator>,
	) -> Self {
		Self {
			selector: BrowserSelector::new(config),
			capabilities,
			launcher,
			correlator,
			foreground: Default::default(),
		}
	}
}
impl Debug for RedirectBroker {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RedirectBroker")
			.field("selector", &self.selector)
			.field("correlator", &self.correlator)
			.field("foreground", &self.foreground)
			.finish()
	}
}
