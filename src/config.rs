//! Immutable header configuration: authentication method, credentials, and base headers.
//!
//! A [`HeaderConfig`] is validated once, when it is built, so the header builder never has to
//! re-check credentials or URLs on the request path. Configurations come either from
//! [`HeaderConfigBuilder`] or from a JSON document whose keys mirror the variables of the
//! Keyfactor API scripts (`auth_method`, `username`, `client_id`, `global_headers`, ...).

mod builder;

pub use builder::*;

// std
use std::path::Path;
// self
use crate::{_prelude::*, auth::Secret, flows::HeaderMap};

/// Authentication strategy applied to every generated header set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthMethod {
	/// OAuth 2.0 client-credentials grant yielding a bearer token.
	OAuth,
	/// HTTP Basic authentication with a username and password.
	Basic,
}
impl AuthMethod {
	/// Returns a stable label suitable for configuration files, span fields, and metrics.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthMethod::OAuth => "oauth",
			AuthMethod::Basic => "basic",
		}
	}
}
impl Display for AuthMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for AuthMethod {
	type Err = AuthError;

	fn from_str(s: &str) -> Result<Self> {
		let trimmed = s.trim();

		if trimmed.eq_ignore_ascii_case("oauth") {
			Ok(AuthMethod::OAuth)
		} else if trimmed.eq_ignore_ascii_case("basic") {
			Ok(AuthMethod::Basic)
		} else {
			Err(AuthError::InvalidAuthMethod { method: s.to_owned() })
		}
	}
}

/// HTTP Basic credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicCredentials {
	/// Keyfactor username (may include a `DOMAIN\` prefix).
	pub username: String,
	/// Password paired with the username.
	pub password: Secret,
}

/// OAuth 2.0 client-credentials parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthSettings {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: Secret,
	/// Token endpoint receiving the client-credentials POST.
	pub token_url: Url,
	/// Optional scope; never empty once validated.
	pub scope: Option<String>,
	/// Optional audience; never empty once validated.
	pub audience: Option<String>,
}

/// Credentials for the selected authentication method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthConfig {
	/// OAuth client-credentials flow.
	OAuth(OAuthSettings),
	/// HTTP Basic authentication.
	Basic(BasicCredentials),
}
impl AuthConfig {
	/// Method selected by this configuration.
	pub const fn method(&self) -> AuthMethod {
		match self {
			AuthConfig::OAuth(_) => AuthMethod::OAuth,
			AuthConfig::Basic(_) => AuthMethod::Basic,
		}
	}
}

/// Validated, read-only configuration consumed by [`HeaderBuilder`](crate::HeaderBuilder).
///
/// Fields are only reachable through getters, so every instance has passed
/// [`HeaderConfigBuilder::build`]. To change a value, rebuild through the builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderConfig {
	auth: AuthConfig,
	global_headers: HeaderMap,
	timeout: Option<Duration>,
	proxy: Option<Url>,
}
impl HeaderConfig {
	/// Starts a builder for the provided method.
	pub fn builder(method: AuthMethod) -> HeaderConfigBuilder {
		HeaderConfigBuilder::new(method)
	}

	/// Parses and validates a JSON configuration document.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_str(json);
		let document: ConfigDocument = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::Parse { source })?;

		document.try_into()
	}

	/// Reads, parses, and validates a JSON configuration file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let json = std::fs::read_to_string(path)
			.map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

		Self::from_json_str(&json)
	}

	/// Method selected by this configuration.
	pub const fn method(&self) -> AuthMethod {
		self.auth.method()
	}

	/// Authentication method and its credentials.
	pub fn auth(&self) -> &AuthConfig {
		&self.auth
	}

	/// Base headers copied into every result.
	pub fn global_headers(&self) -> &HeaderMap {
		&self.global_headers
	}

	/// Deadline for the token request, if any.
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}

	/// Proxy for the token request, if any.
	pub fn proxy(&self) -> Option<&Url> {
		self.proxy.as_ref()
	}
}

/// Raw configuration document, shaped like the script variables it replaces.
#[derive(Debug, Deserialize)]
struct ConfigDocument {
	auth_method: String,
	#[serde(default)]
	username: Option<String>,
	#[serde(default)]
	password: Option<Secret>,
	#[serde(default)]
	client_id: Option<String>,
	#[serde(default)]
	client_secret: Option<Secret>,
	#[serde(default)]
	token_url: Option<String>,
	#[serde(default)]
	scope: Option<String>,
	#[serde(default)]
	audience: Option<String>,
	#[serde(default)]
	global_headers: Option<HeaderMap>,
	#[serde(default)]
	timeout_secs: Option<u64>,
	#[serde(default)]
	proxy: Option<String>,
}
impl TryFrom<ConfigDocument> for HeaderConfig {
	type Error = AuthError;

	fn try_from(doc: ConfigDocument) -> Result<Self> {
		let method = doc.auth_method.parse::<AuthMethod>()?;
		let mut builder = HeaderConfig::builder(method);

		if let Some(username) = doc.username {
			builder = builder.username(username);
		}
		if let Some(password) = doc.password {
			builder = builder.password(password);
		}
		if let Some(client_id) = doc.client_id {
			builder = builder.client_id(client_id);
		}
		if let Some(client_secret) = doc.client_secret {
			builder = builder.client_secret(client_secret);
		}
		if let Some(token_url) = doc.token_url {
			builder = builder.token_url(token_url);
		}
		if let Some(scope) = doc.scope {
			builder = builder.scope(scope);
		}
		if let Some(audience) = doc.audience {
			builder = builder.audience(audience);
		}
		if let Some(headers) = doc.global_headers {
			builder = builder.global_headers(headers);
		}
		if let Some(secs) = doc.timeout_secs {
			builder = builder.timeout(Duration::from_secs(secs));
		}
		if let Some(proxy) = doc.proxy {
			builder = builder.proxy(proxy);
		}

		Ok(builder.build()?)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn auth_method_parsing_is_case_insensitive() {
		assert_eq!("oauth".parse::<AuthMethod>().ok(), Some(AuthMethod::OAuth));
		assert_eq!(" OAuth ".parse::<AuthMethod>().ok(), Some(AuthMethod::OAuth));
		assert_eq!("Basic".parse::<AuthMethod>().ok(), Some(AuthMethod::Basic));
	}

	#[test]
	fn unknown_auth_method_is_rejected() {
		let err = "ldap".parse::<AuthMethod>().expect_err("`ldap` should not parse.");

		assert!(matches!(err, AuthError::InvalidAuthMethod { ref method } if method == "ldap"));
	}

	#[test]
	fn document_defaults_global_headers() {
		let config = HeaderConfig::from_json_str(
			r#"{"auth_method":"basic","username":"u","password":"p"}"#,
		)
		.expect("Basic document should parse.");

		assert_eq!(config.method(), AuthMethod::Basic);
		assert_eq!(
			config.global_headers().get("Content-Type").map(String::as_str),
			Some("application/json")
		);
		assert_eq!(
			config.global_headers().get("x-keyfactor-requested-with").map(String::as_str),
			Some("APIClient")
		);
	}

	#[test]
	fn document_ignores_fields_of_the_other_method() {
		let config = HeaderConfig::from_json_str(
			r#"{
				"auth_method": "oauth",
				"username": "ignored",
				"client_id": "cid",
				"client_secret": "secret",
				"token_url": "https://login.example.com/oauth2/token",
				"scope": "",
				"audience": "keyfactor",
				"timeout_secs": 5
			}"#,
		)
		.expect("OAuth document should parse.");
		let AuthConfig::OAuth(settings) = config.auth() else {
			panic!("Expected OAuth settings.");
		};

		assert_eq!(settings.client_id, "cid");
		assert_eq!(settings.scope, None);
		assert_eq!(settings.audience.as_deref(), Some("keyfactor"));
		assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
	}

	#[test]
	fn document_reports_field_path_on_type_errors() {
		let err = HeaderConfig::from_json_str(
			r#"{"auth_method":"basic","username":"u","password":"p","global_headers":{"a":1}}"#,
		)
		.expect_err("Non-string header values should fail.");
		let AuthError::Config(ConfigError::Parse { source }) = err else {
			panic!("Expected a parse error.");
		};

		assert_eq!(source.path().to_string(), "global_headers.a");
	}

	#[test]
	fn document_with_unknown_method_fails_before_validation() {
		let err = HeaderConfig::from_json_str(r#"{"auth_method":"ldap"}"#)
			.expect_err("Unknown methods should fail.");

		assert!(matches!(err, AuthError::InvalidAuthMethod { .. }));
	}

	#[test]
	fn missing_file_is_reported_with_its_path() {
		let err = HeaderConfig::from_path("/definitely/not/here.json")
			.expect_err("Missing files should fail.");

		assert!(matches!(
			err,
			AuthError::Config(ConfigError::Io { ref path, .. })
				if path.to_str() == Some("/definitely/not/here.json")
		));
	}
}
