//! Captured redirect payloads handed back to login callers.

// self
use crate::_prelude::*;

/// Opaque redirect string captured from the identity provider.
///
/// The broker never interprets the payload; the helpers below only read query and
/// fragment parameters so callers can pick out `state`, `code`, or tokens before
/// handing the string to their own OAuth layer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectResponse(String);
impl RedirectResponse {
	/// Wraps the captured redirect string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw redirect string.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Parses the redirect as an absolute URL, if it is one.
	pub fn url(&self) -> Option<Url> {
		Url::parse(&self.0).ok()
	}

	/// Looks up a parameter in the query string first, then in the fragment.
	pub fn param(&self, name: &str) -> Option<String> {
		let url = self.url()?;

		if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == name) {
			return Some(value.into_owned());
		}

		url.fragment().and_then(|fragment| {
			url::form_urlencoded::parse(fragment.as_bytes())
				.find(|(key, _)| key == name)
				.map(|(_, value)| value.into_owned())
		})
	}

	/// Validates the returned `state` parameter against the value sent with the request.
	pub fn validate_state(&self, expected: &str) -> bool {
		self.param("state").is_some_and(|state| state == expected)
	}

	/// Consumes the wrapper and returns the raw string.
	pub fn into_inner(self) -> String {
		self.0
	}
}
impl AsRef<str> for RedirectResponse {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<String> for RedirectResponse {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for RedirectResponse {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for RedirectResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		// Query and fragment may carry codes or tokens.
		let redacted = match self.url() {
			Some(url) =>
				format!("{}://{}{}", url.scheme(), url.host_str().unwrap_or(""), url.path()),
			None => "<opaque>".into(),
		};

		f.debug_tuple("RedirectResponse").field(&redacted).finish()
	}
}

/// Final result delivered to a login caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
	/// The identity provider redirected back with a response.
	Redirect(RedirectResponse),
	/// The user returned without completing the login, or nothing could open the URL.
	NoResponse,
}
impl LoginOutcome {
	/// Returns the captured response, if any.
	pub fn response(&self) -> Option<&RedirectResponse> {
		match self {
			Self::Redirect(response) => Some(response),
			Self::NoResponse => None,
		}
	}

	/// Converts the outcome into the captured response, if any.
	pub fn into_response(self) -> Option<RedirectResponse> {
		match self {
			Self::Redirect(response) => Some(response),
			Self::NoResponse => None,
		}
	}

	/// Returns true when the login ended without a response.
	pub fn is_no_response(&self) -> bool {
		matches!(self, Self::NoResponse)
	}
}
