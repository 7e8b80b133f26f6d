//! Request signing contracts that let downstream code attach generated headers to arbitrary
//! HTTP clients.

// self
#[cfg(feature = "reqwest")]
use crate::{
	_prelude::*,
	flows::{HeaderBuilder, HeaderMap},
	http::TokenHttpClient,
};
#[cfg(feature = "reqwest")]
use reqwest::{
	blocking::RequestBuilder,
	header::{HeaderMap as ReqwestHeaderMap, HeaderName, HeaderValue},
};

/// Describes how to attach freshly generated headers to an outbound request without
/// constraining the HTTP client type.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and injects the headers for `api_version`.
	fn sign(&self, request: Request, api_version: &str) -> Result<Request, Error>;
}

#[cfg(feature = "reqwest")]
impl<C> RequestSignerExt<RequestBuilder, AuthError> for HeaderBuilder<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn sign(&self, request: RequestBuilder, api_version: &str) -> Result<RequestBuilder> {
		let headers = self.get_headers(api_version)?;

		Ok(request.headers(to_reqwest_headers(&headers)?))
	}
}

/// Converts a [`HeaderMap`] into reqwest's typed header map.
#[cfg(feature = "reqwest")]
pub fn to_reqwest_headers(headers: &HeaderMap) -> Result<ReqwestHeaderMap, ConfigError> {
	let mut converted = ReqwestHeaderMap::with_capacity(headers.len());

	for (name, value) in headers {
		let invalid = || ConfigError::InvalidHeader { name: name.clone() };
		let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
		let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;

		converted.insert(header_name, header_value);
	}

	Ok(converted)
}
