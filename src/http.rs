//! Transport primitives for the OAuth token request.
//!
//! [`TokenHttpClient`] is the crate's only dependency on an HTTP stack. The default
//! [`ReqwestHttpClient`] wraps a blocking reqwest client; tests and embedders can supply their
//! own implementation to observe or fake the single POST issued per OAuth header request.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{header::CONTENT_TYPE, redirect::Policy};
// self
use crate::{_prelude::*, auth::Secret, config::OAuthSettings};
#[cfg(feature = "reqwest")] use crate::config::HeaderConfig;

/// Content type of the client-credentials request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Blocking HTTP transport able to POST a client-credentials form.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can back every
/// clone of a [`HeaderBuilder`](crate::HeaderBuilder) across threads.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `form` to `url` as `application/x-www-form-urlencoded` and returns the raw reply.
	///
	/// Non-2xx replies are not errors at this layer; only failures to obtain a response are.
	fn post_form(
		&self,
		url: &Url,
		form: &TokenRequestForm,
	) -> Result<TokenHttpResponse, Self::TransportError>;
}

/// Status and body captured from the token endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenHttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}

/// Client-credentials form fields.
///
/// `scope` and `audience` are only emitted when present and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRequestForm {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: Secret,
	/// Optional scope.
	pub scope: Option<String>,
	/// Optional audience.
	pub audience: Option<String>,
}
impl TokenRequestForm {
	/// Grant type sent with every request.
	pub const GRANT_TYPE: &'static str = "client_credentials";

	/// Key/value pairs in wire order. Contains the client secret; never log the result.
	pub fn pairs(&self) -> Vec<(&'static str, &str)> {
		let mut pairs = vec![
			("grant_type", Self::GRANT_TYPE),
			("client_id", self.client_id.as_str()),
			("client_secret", self.client_secret.expose()),
		];

		if let Some(scope) = self.scope.as_deref().filter(|s| !s.is_empty()) {
			pairs.push(("scope", scope));
		}
		if let Some(audience) = self.audience.as_deref().filter(|s| !s.is_empty()) {
			pairs.push(("audience", audience));
		}

		pairs
	}
}
impl From<&OAuthSettings> for TokenRequestForm {
	fn from(settings: &OAuthSettings) -> Self {
		Self {
			client_id: settings.client_id.clone(),
			client_secret: settings.client_secret.clone(),
			scope: settings.scope.clone(),
			audience: settings.audience.clone(),
		}
	}
}

/// Thin wrapper around the blocking [`ReqwestClient`].
///
/// Token requests should not follow redirects: token endpoints return results directly
/// instead of delegating to another URI. [`ReqwestHttpClient::from_config`] disables redirect
/// following; configure any custom client passed to [`ReqwestHttpClient::with_client`] the
/// same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing blocking reqwest client.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the configuration's timeout and proxy.
	pub fn from_config(config: &HeaderConfig) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder().redirect(Policy::none());

		if let Some(timeout) = config.timeout() {
			builder = builder.timeout(timeout);
		}
		if let Some(proxy) = config.proxy() {
			builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
		}

		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn post_form(
		&self,
		url: &Url,
		form: &TokenRequestForm,
	) -> Result<TokenHttpResponse, Self::TransportError> {
		let response = self
			.0
			.post(url.clone())
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.form(&form.pairs())
			.send()?;
		let status = response.status().as_u16();
		let body = response.bytes()?.to_vec();

		Ok(TokenHttpResponse { status, body })
	}
}
