//! Pick the right way to open an OAuth login URL (native app, isolated browser session, or
//! external browser) and hand the captured redirect back to the login attempt that started it.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod capability;
pub mod correlator;
pub mod error;
pub mod flows;
pub mod launch;
pub mod obs;
pub mod selector;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{LoginOutcome, PackageId},
		capability::StaticCapabilities,
		flows::RedirectBroker,
		launch::{LaunchError, Launcher},
		selector::{LaunchTarget, SelectorConfig},
	};

	/// Launcher double that records every attempt and fails the scripted targets.
	#[derive(Debug, Default)]
	pub struct RecordingLauncher {
		failing: Mutex<Vec<LaunchTarget>>,
		attempts: Mutex<Vec<LaunchTarget>>,
	}
	impl RecordingLauncher {
		/// Makes every launch of `target` fail with [`LaunchError::NotFound`].
		pub fn fail(&self, target: LaunchTarget) {
			self.failing.lock().push(target);
		}

		/// Targets attempted so far, in order.
		pub fn attempts(&self) -> Vec<LaunchTarget> {
			self.attempts.lock().clone()
		}
	}
	impl Launcher for RecordingLauncher {
		fn launch(&self, target: &LaunchTarget, _url: &Url) -> Result<(), LaunchError> {
			self.attempts.lock().push(target.clone());

			if self.failing.lock().contains(target) {
				Err(LaunchError::not_found(target))
			} else {
				Ok(())
			}
		}
	}

	/// Builds a package identifier fixture.
	pub fn package(value: &str) -> PackageId {
		PackageId::new(value).expect("Package fixture should be valid.")
	}

	/// Collects every outcome delivered to the returned sink.
	pub fn recording_sink()
	-> (Arc<Mutex<Vec<LoginOutcome>>>, impl 'static + Send + FnOnce(LoginOutcome)) {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink_seen = seen.clone();

		(seen, move |outcome: LoginOutcome| sink_seen.lock().push(outcome))
	}

	/// Constructs a [`RedirectBroker`] over a canned capability snapshot and a recording
	/// launcher.
	pub fn build_test_broker(
		config: SelectorConfig,
		capabilities: StaticCapabilities,
	) -> (RedirectBroker, Arc<RecordingLauncher>) {
		let launcher = Arc::new(RecordingLauncher::default());
		let broker = RedirectBroker::new(config, Arc::new(capabilities), launcher.clone());

		(broker, launcher)
	}
}

mod _prelude {
	pub use std::{
		collections::{HashMap, HashSet},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use color_eyre as _;
