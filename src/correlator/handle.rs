//! Future-based completion handle for logins registered through
//! [`RedirectCorrelator::register_async`](crate::correlator::RedirectCorrelator::register_async).

// std
use std::task::{Context, Poll};
// crates.io
use futures::channel::oneshot::{Canceled, Receiver};
// self
use crate::{
	_prelude::*,
	auth::{LoginId, LoginOutcome},
};

/// Resolves once the correlator delivers an outcome for the registered login.
///
/// Yields [`Error::LoginDiscarded`] when the registration is torn down or replaced, since
/// neither path ever invokes the sink.
#[derive(Debug)]
pub struct LoginHandle {
	login: LoginId,
	receiver: Receiver<LoginOutcome>,
}
impl LoginHandle {
	pub(crate) fn new(login: LoginId, receiver: Receiver<LoginOutcome>) -> Self {
		Self { login, receiver }
	}

	/// Identifier of the login this handle waits on.
	pub fn login(&self) -> &LoginId {
		&self.login
	}

	/// Checks for an outcome without waiting.
	///
	/// Returns `Ok(None)` while the login is still pending.
	pub fn try_outcome(&mut self) -> Result<Option<LoginOutcome>> {
		self.receiver.try_recv().map_err(|Canceled| self.discarded())
	}

	fn discarded(&self) -> Error {
		Error::LoginDiscarded { login: self.login.to_string() }
	}
}
impl Future for LoginHandle {
	type Output = Result<LoginOutcome>;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match Pin::new(&mut self.receiver).poll(cx) {
			Poll::Ready(Ok(outcome)) => Poll::Ready(Ok(outcome)),
			Poll::Ready(Err(Canceled)) => Poll::Ready(Err(self.discarded())),
			Poll::Pending => Poll::Pending,
		}
	}
}
