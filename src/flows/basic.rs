//! HTTP Basic authorization values.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::config::BasicCredentials;

/// Returns `Basic <base64(username:password)>` using the standard alphabet with padding.
///
/// Credentials are encoded as UTF-8.
pub fn basic_authorization(credentials: &BasicCredentials) -> String {
	let pair = format!("{}:{}", credentials.username, credentials.password.expose());

	format!("Basic {}", STANDARD.encode(pair))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::Secret;

	fn credentials(username: &str, password: &str) -> BasicCredentials {
		BasicCredentials { username: username.into(), password: Secret::new(password) }
	}

	#[test]
	fn encodes_username_and_password() {
		assert_eq!(basic_authorization(&credentials("u", "p")), "Basic dTpw");
		assert_eq!(
			basic_authorization(&credentials("username", "password")),
			"Basic dXNlcm5hbWU6cGFzc3dvcmQ="
		);
	}

	#[test]
	fn keeps_colons_in_passwords_and_domain_prefixes() {
		assert_eq!(basic_authorization(&credentials("DOM\\u", "a:b")), "Basic RE9NXHU6YTpi");
	}
}
