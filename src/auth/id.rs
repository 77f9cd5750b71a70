//! Strongly typed identifiers for installed packages and login attempts.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				check_id($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				check_id($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;
const GENERATED_LOGIN_LEN: usize = 32;

/// Rejection reasons for a package name or login id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// Hosts sometimes report a blank package for unresolved intents.
	#[error("{kind} id is blank.")]
	Empty {
		/// `"Package"` or `"Login"`.
		kind: &'static str,
	},
	/// Package names and login ids never contain spaces or line breaks.
	#[error("{kind} id contains whitespace.")]
	ContainsWhitespace {
		/// `"Package"` or `"Login"`.
		kind: &'static str,
	},
	/// The id is longer than any package name the platform accepts.
	#[error("{kind} id is longer than {max} bytes.")]
	TooLong {
		/// `"Package"` or `"Login"`.
		kind: &'static str,
		/// Byte limit.
		max: usize,
	},
}

def_id! { PackageId, "Installed application identifier (`com.android.chrome`).", "Package" }
def_id! { LoginId, "Identifier of a single login attempt tracked by the correlator.", "Login" }

impl LoginId {
	/// Generates a random alphanumeric login identifier.
	pub fn generate() -> Self {
		let value = rand::rng()
			.sample_iter(Alphanumeric)
			.take(GENERATED_LOGIN_LEN)
			.map(char::from)
			.collect();

		Self(value)
	}
}

fn check_id(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}
