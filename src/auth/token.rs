//! Token endpoint response parsing.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::Secret};

/// Access token extracted from a successful token endpoint reply.
///
/// Only `access_token` is read; `token_type`, `expires_in`, and any other fields the
/// provider returns are ignored because nothing here caches or refreshes tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenResponse {
	/// Bearer credential issued by the provider.
	pub access_token: Secret,
}
impl TokenResponse {
	/// Parses a token endpoint body.
	///
	/// Bodies that are neither a JSON object nor `null` fail with
	/// [`AuthError::MalformedTokenResponse`]. A `null` body, or an object whose `access_token`
	/// is absent or not a string, fails with [`AuthError::MissingAccessToken`]. An empty string
	/// is still a token.
	pub fn from_slice(body: &[u8]) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_slice(body);
		let object: Option<Map<String, Value>> = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| AuthError::MalformedTokenResponse { source })?;

		match object.and_then(|mut object| object.remove("access_token")) {
			Some(Value::String(token)) => Ok(Self { access_token: Secret::new(token) }),
			_ => Err(AuthError::MissingAccessToken),
		}
	}
}
