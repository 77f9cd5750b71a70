//! Single-slot exchange point matching a redirect callback to the login that started it.
//!
//! The slot moves `Empty -> Pending -> Empty`. Exactly one of
//! [`capture_redirect`](RedirectCorrelator::capture_redirect),
//! [`resolve_no_response`](RedirectCorrelator::resolve_no_response), or
//! [`teardown`](RedirectCorrelator::teardown) empties a pending slot; the others then find
//! nothing to do. The occupant is taken under the lock and its sink runs after the lock is
//! released, so a sink may register the next login from inside the callback.

pub mod handle;

pub use handle::LoginHandle;

// crates.io
use futures::channel::oneshot;
// self
use crate::{
	_prelude::*,
	auth::{LoginId, LoginOutcome, RedirectResponse},
	obs::{self, RedirectStage, Resolution},
};

/// One-shot completion callback stored with a pending login.
pub type CompletionSink = Box<dyn FnOnce(LoginOutcome) + Send>;

/// The single in-flight login attempt awaiting resolution.
pub struct PendingLogin {
	/// Identifier supplied at registration.
	pub login: LoginId,
	/// Instant the login was registered.
	pub registered_at: OffsetDateTime,
	sink: CompletionSink,
}
impl PendingLogin {
	fn new(login: LoginId, sink: CompletionSink) -> Self {
		Self { login, registered_at: OffsetDateTime::now_utc(), sink }
	}

	fn complete(self, outcome: LoginOutcome) {
		(self.sink)(outcome);
	}
}
impl Debug for PendingLogin {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PendingLogin")
			.field("login", &self.login)
			.field("registered_at", &self.registered_at)
			.finish_non_exhaustive()
	}
}

/// Thread-safe holder for at most one [`PendingLogin`].
///
/// Registering while a login is pending replaces it: the previous sink is dropped without
/// being invoked and its identifier is returned to the caller. Callers are expected never to
/// double-register.
#[derive(Debug, Default)]
pub struct RedirectCorrelator {
	slot: Mutex<Option<PendingLogin>>,
}
impl RedirectCorrelator {
	/// Creates an empty correlator.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `on_complete` as the sole pending login, returning any login it displaced.
	pub fn register<F>(&self, login: LoginId, on_complete: F) -> Option<LoginId>
	where
		F: 'static + Send + FnOnce(LoginOutcome),
	{
		self.register_sink(login, Box::new(on_complete))
	}

	/// Registers a login and returns a future that resolves with its outcome.
	///
	/// The future yields [`Error::LoginDiscarded`] if the login is torn down or replaced.
	pub fn register_async(&self, login: LoginId) -> LoginHandle {
		let (tx, rx) = oneshot::channel();
		let handle = LoginHandle::new(login.clone(), rx);

		self.register(login, move |outcome| {
			// The caller may have dropped the handle; nobody is left to notify.
			let _ = tx.send(outcome);
		});

		handle
	}

	/// Delivers a captured redirect to the pending login, if any.
	///
	/// Returns `true` when a login was resolved; late or duplicate callbacks return `false`.
	pub fn capture_redirect(&self, response: impl Into<RedirectResponse>) -> bool {
		self.resolve(LoginOutcome::Redirect(response.into()), Resolution::Redirect)
	}

	/// Tells the pending login, if any, that no response will arrive.
	pub fn resolve_no_response(&self) -> bool {
		self.resolve(LoginOutcome::NoResponse, Resolution::NoResponse)
	}

	/// Clears the slot without invoking the pending sink.
	pub fn teardown(&self) -> Option<LoginId> {
		let Some(pending) = self.take() else {
			obs::slot_empty(Resolution::Teardown);

			return None;
		};

		obs::login_resolved(&pending.login, Resolution::Teardown);
		obs::record_resolution(Resolution::Teardown);

		Some(pending.login)
	}

	/// Identifier of the pending login, if any.
	pub fn pending_login(&self) -> Option<LoginId> {
		self.slot.lock().as_ref().map(|pending| pending.login.clone())
	}

	/// Instant the pending login was registered, if any.
	///
	/// Hosts use this to expire logins the user walked away from; the correlator itself
	/// never times out.
	pub fn pending_since(&self) -> Option<OffsetDateTime> {
		self.slot.lock().as_ref().map(|pending| pending.registered_at)
	}

	/// Returns true while a login is waiting for resolution.
	pub fn is_pending(&self) -> bool {
		self.slot.lock().is_some()
	}

	fn register_sink(&self, login: LoginId, sink: CompletionSink) -> Option<LoginId> {
		let _guard = obs::RedirectSpan::new(RedirectStage::Correlate, Some(&login)).entered();
		let previous = self.slot.lock().replace(PendingLogin::new(login, sink));

		previous.map(|displaced| {
			obs::login_resolved(&displaced.login, Resolution::Replaced);
			obs::record_resolution(Resolution::Replaced);

			displaced.login
		})
	}

	fn resolve(&self, outcome: LoginOutcome, resolution: Resolution) -> bool {
		let Some(pending) = self.take() else {
			obs::slot_empty(resolution);

			return false;
		};
		let _guard =
			obs::RedirectSpan::new(RedirectStage::Correlate, Some(&pending.login)).entered();

		obs::login_resolved(&pending.login, resolution);
		obs::record_resolution(resolution);
		pending.complete(outcome);

		true
	}

	fn take(&self) -> Option<PendingLogin> {
		self.slot.lock().take()
	}
}
