//! Error types shared by the configuration layer, the token transport, and the header builder.

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`AuthError`] by default.
pub type Result<T, E = AuthError> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error returned by [`HeaderBuilder::get_headers`](crate::HeaderBuilder::get_headers).
///
/// Every variant is terminal for the call; no partial header map is ever returned.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Local configuration problem detected at construction time.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Configuration names an authentication method other than `oauth` or `basic`.
	#[error("Authentication method `{method}` is not supported; expected `oauth` or `basic`.")]
	InvalidAuthMethod {
		/// The rejected method string as supplied.
		method: String,
	},
	/// Transport failure while reaching the token endpoint (DNS, TCP, TLS, timeout).
	#[error("Failed to reach the token endpoint.")]
	TokenRequestFailed {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// Token endpoint answered with a status other than 200.
	#[error("Token endpoint rejected the request with HTTP {status}.")]
	TokenRequestRejected {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Truncated preview of the response body.
		body_preview: String,
	},
	/// Token endpoint body is not a JSON object.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedTokenResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint body parsed but carries no usable `access_token` string.
	#[error("Token endpoint response is missing a string access_token field.")]
	MissingAccessToken,
}
impl AuthError {
	/// Wraps a transport failure raised while calling the token endpoint.
	pub fn token_request_failed(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::TokenRequestFailed { source: Box::new(src) }
	}
}

/// Configuration and validation failures raised while building a
/// [`HeaderConfig`](crate::HeaderConfig) or its transport.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration document could not be parsed.
	#[error("Configuration document could not be parsed.")]
	Parse {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Configuration file could not be read.
	#[error("Configuration file `{}` could not be read.", path.display())]
	Io {
		/// Path that failed to load.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// A field required by the selected method is absent.
	#[error("The {method} method requires `{field}`.")]
	MissingField {
		/// Method label.
		method: &'static str,
		/// Missing field name.
		field: &'static str,
	},
	/// Basic usernames cannot contain a colon.
	#[error("Basic username must not contain ':'.")]
	InvalidUsername,
	/// Token URL cannot be parsed.
	#[error("Token URL is invalid.")]
	InvalidTokenUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Token URL uses a scheme other than HTTP(S).
	#[error("Token URL must use http or https: {url}.")]
	UnsupportedTokenUrlScheme {
		/// Offending URL.
		url: String,
	},
	/// Proxy URL cannot be parsed.
	#[error("Proxy URL is invalid.")]
	InvalidProxy {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Header name or value is not valid HTTP.
	#[error("Header `{name}` is not a valid HTTP header.")]
	InvalidHeader {
		/// Offending header name.
		name: String,
	},
	/// Two global headers differ only by case.
	#[error("Header `{name}` is configured more than once.")]
	DuplicateHeader {
		/// Offending header name.
		name: String,
	},
	/// Global headers cannot set headers the builder always owns.
	#[error("Header `{name}` is managed by the header builder and cannot be configured.")]
	ReservedHeader {
		/// Offending header name.
		name: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
