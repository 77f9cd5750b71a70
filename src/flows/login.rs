//! Login lifecycle: register, launch, and translate host events into correlator calls.

// self
use crate::{
	_prelude::*,
	auth::{LoginId, LoginOutcome},
	correlator::LoginHandle,
	flows::RedirectBroker,
	launch,
	obs::{self, RedirectStage},
	selector::LaunchTarget,
};

impl RedirectBroker {
	/// Registers `on_complete` for `login` and opens `url`.
	///
	/// When nothing can open the URL, `on_complete` receives [`LoginOutcome::NoResponse`] and
	/// the error is also returned.
	pub fn start_login<F>(&self, login: LoginId, url: &Url, on_complete: F) -> Result<LaunchTarget>
	where
		F: 'static + Send + FnOnce(LoginOutcome),
	{
		let _guard = obs::RedirectSpan::new(RedirectStage::Launch, Some(&login)).entered();

		self.correlator.register(login, on_complete);
		self.launch_registered(url)
	}

	/// Registers `login`, opens `url`, and returns a future for the outcome.
	pub fn start_login_async(&self, login: LoginId, url: &Url) -> Result<LoginHandle> {
		let _guard = obs::RedirectSpan::new(RedirectStage::Launch, Some(&login)).entered();
		let handle = self.correlator.register_async(login);

		self.launch_registered(url)?;

		Ok(handle)
	}

	/// Selects a target for `url`, launches it, and arms the foreground gate.
	///
	/// The correlator is left alone: a failed standalone launch does not end a login that is
	/// already in flight. Use [`start_login`](Self::start_login) to tie a launch to a login.
	pub fn launch(&self, url: &Url) -> Result<LaunchTarget> {
		let (query, launcher) = (self.capabilities.as_ref(), self.launcher.as_ref());
		let target = launch::execute(url, &self.selector, query, launcher)
			.map_err(|source| Error::NoHandler { url: url.to_string(), source })?;

		self.foreground.arm();

		Ok(target)
	}

	// The login was registered just before this call, so a terminal failure ends it.
	fn launch_registered(&self, url: &Url) -> Result<LaunchTarget> {
		self.launch(url).inspect_err(|_| {
			self.correlator.resolve_no_response();
		})
	}

	/// Host regained the foreground.
	///
	/// The first return after a launch is suppressed; any later one means the user came back
	/// without a redirect. Returns true when a pending login was resolved.
	pub fn on_foreground_returned(&self) -> bool {
		if self.foreground.suppress_once() {
			obs::foreground_suppressed();

			return false;
		}

		self.correlator.resolve_no_response()
	}

	/// Host observed a redirect back into the app.
	///
	/// A redirect without data ends the login with "no response". Returns true when a
	/// pending login was resolved.
	pub fn on_redirect_observed(&self, response: Option<&str>) -> bool {
		self.foreground.disarm();

		match response {
			Some(response) => self.correlator.capture_redirect(response),
			None => self.correlator.resolve_no_response(),
		}
	}

	/// Discards the pending login without notifying it.
	pub fn teardown(&self) -> Option<LoginId> {
		self.foreground.disarm();

		self.correlator.teardown()
	}
}
