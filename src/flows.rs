//! Header assembly for both authentication methods.

pub mod basic;
pub mod client_credentials;

pub use basic::*;
pub use client_credentials::*;

// self
use crate::{
	_prelude::*,
	config::{AuthConfig, HeaderConfig},
	http::TokenHttpClient,
	obs::{self, FlowOutcome, FlowSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Header name → value mapping returned to callers. Keys are unique.
pub type HeaderMap = BTreeMap<String, String>;

/// Header carrying the credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// Header carrying the requested Keyfactor API version.
pub const API_VERSION_HEADER: &str = "x-keyfactor-api-version";
/// Conventional API version for callers without a preference.
pub const DEFAULT_API_VERSION: &str = "1";

#[cfg(feature = "reqwest")]
/// Header builder specialized for the crate's default blocking reqwest transport.
pub type ReqwestHeaderBuilder = HeaderBuilder<ReqwestHttpClient>;

/// Produces Keyfactor API headers from an immutable [`HeaderConfig`].
///
/// Every call to [`get_headers`](Self::get_headers) is independent: nothing is cached and no
/// state is written, so one builder can be shared across threads and cloned cheaply. OAuth
/// calls perform exactly one token request each; Basic calls never touch the network.
pub struct HeaderBuilder<C>
where
	C: ?Sized + TokenHttpClient,
{
	config: Arc<HeaderConfig>,
	http_client: Arc<C>,
}
impl<C> HeaderBuilder<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a builder that reuses the caller-provided transport.
	pub fn with_http_client(
		config: impl Into<Arc<HeaderConfig>>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { config: config.into(), http_client: http_client.into() }
	}

	/// Configuration this builder was created with.
	pub fn config(&self) -> &HeaderConfig {
		&self.config
	}

	/// Transport used for the OAuth token request.
	pub fn http_client(&self) -> &C {
		&self.http_client
	}

	/// Builds the header map for `api_version`.
	///
	/// The result holds every configured global header plus `Authorization` and
	/// `x-keyfactor-api-version`. On failure no headers are returned.
	pub fn get_headers(&self, api_version: &str) -> Result<HeaderMap> {
		let method = self.config.method();
		let _span = FlowSpan::new(method, "get_headers").entered();

		obs::record_flow_outcome(method, FlowOutcome::Attempt);

		let result = match self.config.auth() {
			AuthConfig::OAuth(settings) =>
				fetch_access_token(&*self.http_client, settings).map(|token| {
					obs::token_received(method);

					bearer_authorization(&token)
				}),
			AuthConfig::Basic(credentials) => Ok(basic_authorization(credentials)),
		}
		.map(|authorization| assemble(self.config.global_headers(), authorization, api_version));

		match &result {
			Ok(_) => obs::record_flow_outcome(method, FlowOutcome::Success),
			Err(e) => {
				obs::flow_failed(method, e);
				obs::record_flow_outcome(method, FlowOutcome::Failure);
			},
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl HeaderBuilder<ReqwestHttpClient> {
	/// Creates a builder with its own blocking reqwest transport.
	///
	/// The transport honors the configuration's `timeout` and `proxy` and never follows
	/// redirects.
	pub fn new(config: HeaderConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::from_config(&config)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Clone for HeaderBuilder<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self { config: self.config.clone(), http_client: self.http_client.clone() }
	}
}
impl<C> Debug for HeaderBuilder<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HeaderBuilder").field("config", &self.config).finish()
	}
}

/// Copies `base` and adds the authorization and API version headers.
pub fn assemble(base: &HeaderMap, authorization: String, api_version: &str) -> HeaderMap {
	let mut headers = base.clone();

	headers.insert(AUTHORIZATION_HEADER.into(), authorization);
	headers.insert(API_VERSION_HEADER.into(), api_version.into());

	headers
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		config::AuthMethod,
		http::{TokenHttpResponse, TokenRequestForm},
	};

	#[derive(Debug, ThisError)]
	#[error("Transport must not be used.")]
	struct Unreachable;

	struct PanickingClient;
	impl TokenHttpClient for PanickingClient {
		type TransportError = Unreachable;

		fn post_form(
			&self,
			_url: &Url,
			_form: &TokenRequestForm,
		) -> Result<TokenHttpResponse, Self::TransportError> {
			panic!("Basic authentication must not issue network requests.");
		}
	}

	#[test]
	fn assemble_keeps_base_headers_and_adds_managed_ones() {
		let base = HeaderMap::from([("Accept".to_owned(), "application/json".to_owned())]);
		let headers = assemble(&base, "Basic abc".into(), "2");

		assert_eq!(headers.len(), 3);
		assert_eq!(headers["Accept"], "application/json");
		assert_eq!(headers[AUTHORIZATION_HEADER], "Basic abc");
		assert_eq!(headers[API_VERSION_HEADER], "2");
	}

	#[test]
	fn basic_branch_never_calls_the_transport() {
		let config = HeaderConfig::builder(AuthMethod::Basic)
			.username("u")
			.password("p")
			.build()
			.expect("Basic config should build.");
		let builder = HeaderBuilder::<PanickingClient>::with_http_client(config, PanickingClient);
		let headers = builder.get_headers(DEFAULT_API_VERSION).expect("Basic headers should build.");

		assert_eq!(headers[AUTHORIZATION_HEADER], "Basic dTpw");
		assert_eq!(headers[API_VERSION_HEADER], "1");
	}

	#[test]
	fn builder_is_shareable_across_threads() {
		fn assert_send_sync<T: Send + Sync>() {}

		assert_send_sync::<HeaderBuilder<PanickingClient>>();
	}

	#[test]
	fn debug_output_hides_credentials() {
		let config = HeaderConfig::builder(AuthMethod::Basic)
			.username("u")
			.password("top-secret")
			.build()
			.expect("Basic config should build.");
		let builder = HeaderBuilder::<PanickingClient>::with_http_client(config, PanickingClient);
		let rendered = format!("{builder:?}");

		assert!(!rendered.contains("top-secret"));
	}
}
