// std
use std::collections::HashSet;
// crates.io
use http::header::{AUTHORIZATION, HeaderName, HeaderValue};
// self
use crate::{
	_prelude::*,
	auth::Secret,
	config::{AuthConfig, AuthMethod, BasicCredentials, HeaderConfig, OAuthSettings},
	flows::{API_VERSION_HEADER, HeaderMap},
};

/// Base headers applied when the configuration does not provide its own.
pub const DEFAULT_GLOBAL_HEADERS: [(&str, &str); 2] =
	[("Content-Type", "application/json"), ("x-keyfactor-requested-with", "APIClient")];

/// Builder for [`HeaderConfig`] values.
///
/// Fields that do not apply to the selected method are accepted and ignored, mirroring a
/// configuration file that carries both credential sets while only one is active.
#[derive(Debug)]
pub struct HeaderConfigBuilder {
	/// Method the built configuration will use.
	pub method: AuthMethod,
	/// Basic username.
	pub username: Option<String>,
	/// Basic password.
	pub password: Option<Secret>,
	/// OAuth client identifier.
	pub client_id: Option<String>,
	/// OAuth client secret.
	pub client_secret: Option<Secret>,
	/// OAuth token endpoint, parsed during [`build`](Self::build).
	pub token_url: Option<String>,
	/// OAuth scope.
	pub scope: Option<String>,
	/// OAuth audience.
	pub audience: Option<String>,
	/// Base headers.
	pub global_headers: HeaderMap,
	/// Token request deadline.
	pub timeout: Option<Duration>,
	/// Token request proxy, parsed during [`build`](Self::build).
	pub proxy: Option<String>,
}
impl HeaderConfigBuilder {
	/// Creates a builder for `method`, seeded with [`DEFAULT_GLOBAL_HEADERS`].
	pub fn new(method: AuthMethod) -> Self {
		Self {
			method,
			username: None,
			password: None,
			client_id: None,
			client_secret: None,
			token_url: None,
			scope: None,
			audience: None,
			global_headers: DEFAULT_GLOBAL_HEADERS
				.iter()
				.map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
				.collect(),
			timeout: None,
			proxy: None,
		}
	}

	/// Sets the Basic username.
	pub fn username(mut self, username: impl Into<String>) -> Self {
		self.username = Some(username.into());

		self
	}

	/// Sets the Basic password.
	pub fn password(mut self, password: impl Into<Secret>) -> Self {
		self.password = Some(password.into());

		self
	}

	/// Sets the OAuth client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the OAuth client secret.
	pub fn client_secret(mut self, client_secret: impl Into<Secret>) -> Self {
		self.client_secret = Some(client_secret.into());

		self
	}

	/// Sets the OAuth token endpoint.
	pub fn token_url(mut self, token_url: impl Into<String>) -> Self {
		self.token_url = Some(token_url.into());

		self
	}

	/// Sets the OAuth scope. Empty strings are treated as absent.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Sets the OAuth audience. Empty strings are treated as absent.
	pub fn audience(mut self, audience: impl Into<String>) -> Self {
		self.audience = Some(audience.into());

		self
	}

	/// Replaces every base header, including the defaults.
	pub fn global_headers(mut self, headers: HeaderMap) -> Self {
		self.global_headers = headers;

		self
	}

	/// Adds or replaces a single base header.
	pub fn global_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.global_headers.insert(name.into(), value.into());

		self
	}

	/// Bounds how long the token request may block.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Routes the token request through a proxy.
	pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
		self.proxy = Some(proxy.into());

		self
	}

	/// Validates the accumulated fields and produces a [`HeaderConfig`].
	pub fn build(self) -> Result<HeaderConfig, ConfigError> {
		validate_global_headers(&self.global_headers)?;

		let proxy = self
			.proxy
			.as_deref()
			.map(Url::parse)
			.transpose()
			.map_err(|source| ConfigError::InvalidProxy { source })?;
		let auth = match self.method {
			AuthMethod::Basic => {
				let username = self
					.username
					.ok_or(ConfigError::MissingField { method: "basic", field: "username" })?;

				if username.contains(':') {
					return Err(ConfigError::InvalidUsername);
				}

				let password = self
					.password
					.ok_or(ConfigError::MissingField { method: "basic", field: "password" })?;

				AuthConfig::Basic(BasicCredentials { username, password })
			},
			AuthMethod::OAuth => {
				let client_id = self
					.client_id
					.ok_or(ConfigError::MissingField { method: "oauth", field: "client_id" })?;
				let client_secret = self
					.client_secret
					.ok_or(ConfigError::MissingField { method: "oauth", field: "client_secret" })?;
				let raw_url = self
					.token_url
					.ok_or(ConfigError::MissingField { method: "oauth", field: "token_url" })?;
				let token_url = Url::parse(raw_url.trim())
					.map_err(|source| ConfigError::InvalidTokenUrl { source })?;

				if !matches!(token_url.scheme(), "http" | "https") {
					return Err(ConfigError::UnsupportedTokenUrlScheme { url: token_url.into() });
				}

				AuthConfig::OAuth(OAuthSettings {
					client_id,
					client_secret,
					token_url,
					scope: non_empty(self.scope),
					audience: non_empty(self.audience),
				})
			},
		};

		Ok(HeaderConfig { auth, global_headers: self.global_headers, timeout: self.timeout, proxy })
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.is_empty())
}

fn validate_global_headers(headers: &HeaderMap) -> Result<(), ConfigError> {
	let mut seen = HashSet::new();

	for (name, value) in headers {
		let invalid = || ConfigError::InvalidHeader { name: name.clone() };
		// `HeaderName` is lowercased on parse, so the comparisons below are case-insensitive.
		let parsed = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;

		HeaderValue::from_str(value).map_err(|_| invalid())?;

		if parsed == AUTHORIZATION || parsed.as_str() == API_VERSION_HEADER {
			return Err(ConfigError::ReservedHeader { name: name.clone() });
		}
		if !seen.insert(parsed) {
			return Err(ConfigError::DuplicateHeader { name: name.clone() });
		}
	}

	Ok(())
}
