//! OAuth 2.0 client-credentials token request.
//!
//! One POST per call, no caching and no retries: a non-200 reply, an unparsable body, or a
//! body without `access_token` ends the call with the matching [`AuthError`] variant.

// self
use crate::{
	_prelude::*,
	auth::{Secret, TokenResponse},
	config::OAuthSettings,
	http::{TokenHttpClient, TokenRequestForm},
};

const BODY_PREVIEW_LIMIT: usize = 256;

/// Builds the client-credentials form for `settings`.
pub fn token_request_form(settings: &OAuthSettings) -> TokenRequestForm {
	TokenRequestForm::from(settings)
}

/// Exchanges the configured client credentials for an access token.
pub fn fetch_access_token<C>(http_client: &C, settings: &OAuthSettings) -> Result<Secret>
where
	C: ?Sized + TokenHttpClient,
{
	let form = token_request_form(settings);
	let response = http_client
		.post_form(&settings.token_url, &form)
		.map_err(AuthError::token_request_failed)?;

	if response.status != 200 {
		return Err(AuthError::TokenRequestRejected {
			status: response.status,
			body_preview: body_preview(&response.body),
		});
	}

	Ok(TokenResponse::from_slice(&response.body)?.access_token)
}

/// Returns `Bearer <token>`.
pub fn bearer_authorization(token: &Secret) -> String {
	format!("Bearer {}", token.expose())
}

fn body_preview(body: &[u8]) -> String {
	let body = String::from_utf8_lossy(body);

	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body.into_owned();
	}

	let mut buf = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

#[cfg(test)]
mod tests {
	// crates.io
	use parking_lot::Mutex;
	// self
	use super::*;
	use crate::http::TokenHttpResponse;

	#[derive(Debug, ThisError)]
	#[error("Connection refused.")]
	struct Refused;

	/// Replays a canned reply (or a transport failure) and records each request.
	struct ScriptedClient {
		reply: Option<TokenHttpResponse>,
		requests: Mutex<Vec<(Url, TokenRequestForm)>>,
	}
	impl ScriptedClient {
		fn replying(status: u16, body: &str) -> Self {
			Self {
				reply: Some(TokenHttpResponse { status, body: body.as_bytes().to_vec() }),
				requests: Mutex::default(),
			}
		}

		fn refusing() -> Self {
			Self { reply: None, requests: Mutex::default() }
		}

		fn requests(&self) -> Vec<(Url, TokenRequestForm)> {
			self.requests.lock().clone()
		}
	}
	impl TokenHttpClient for ScriptedClient {
		type TransportError = Refused;

		fn post_form(
			&self,
			url: &Url,
			form: &TokenRequestForm,
		) -> Result<TokenHttpResponse, Self::TransportError> {
			self.requests.lock().push((url.clone(), form.clone()));

			self.reply.clone().ok_or(Refused)
		}
	}

	fn settings(scope: Option<&str>, audience: Option<&str>) -> OAuthSettings {
		OAuthSettings {
			client_id: "cid".into(),
			client_secret: Secret::new("secret"),
			token_url: Url::parse("https://login.example.com/oauth2/token")
				.expect("Token URL should parse."),
			scope: scope.map(Into::into),
			audience: audience.map(Into::into),
		}
	}

	#[test]
	fn returns_access_token_on_success() {
		let client = ScriptedClient::replying(200, r#"{"access_token":"abc123"}"#);
		let token = fetch_access_token(&client, &settings(Some("api"), Some("kf")))
			.expect("A 200 reply with access_token should succeed.");

		assert_eq!(bearer_authorization(&token), "Bearer abc123");

		let requests = client.requests();

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].0.as_str(), "https://login.example.com/oauth2/token");
		assert_eq!(requests[0].1.scope.as_deref(), Some("api"));
		assert_eq!(requests[0].1.audience.as_deref(), Some("kf"));
	}

	#[test]
	fn non_200_replies_are_rejected_with_a_preview() {
		let client = ScriptedClient::replying(500, "internal error");
		let err = fetch_access_token(&client, &settings(None, None))
			.expect_err("A 500 reply should fail.");

		assert!(matches!(
			err,
			AuthError::TokenRequestRejected { status: 500, ref body_preview }
				if body_preview == "internal error"
		));

		// 2xx other than 200 is still a rejection.
		let client = ScriptedClient::replying(201, r#"{"access_token":"abc123"}"#);
		let err = fetch_access_token(&client, &settings(None, None))
			.expect_err("A 201 reply should fail.");

		assert!(matches!(err, AuthError::TokenRequestRejected { status: 201, .. }));
	}

	#[test]
	fn transport_failures_map_to_token_request_failed() {
		let client = ScriptedClient::refusing();
		let err = fetch_access_token(&client, &settings(None, None))
			.expect_err("Transport failures should surface.");

		assert!(matches!(err, AuthError::TokenRequestFailed { .. }));
		assert_eq!(client.requests().len(), 1);
	}

	#[test]
	fn body_parsing_errors_are_classified() {
		let client = ScriptedClient::replying(200, r#"{"foo":"bar"}"#);

		assert!(matches!(
			fetch_access_token(&client, &settings(None, None)),
			Err(AuthError::MissingAccessToken)
		));

		let client = ScriptedClient::replying(200, "not json");

		assert!(matches!(
			fetch_access_token(&client, &settings(None, None)),
			Err(AuthError::MalformedTokenResponse { .. })
		));
	}

	#[test]
	fn empty_access_token_yields_a_bare_bearer_value() {
		let client = ScriptedClient::replying(200, r#"{"access_token":""}"#);
		let token = fetch_access_token(&client, &settings(None, None))
			.expect("An empty access_token string is accepted as-is.");

		assert_eq!(bearer_authorization(&token), "Bearer ");

		let client = ScriptedClient::replying(200, "null");

		assert!(matches!(
			fetch_access_token(&client, &settings(None, None)),
			Err(AuthError::MissingAccessToken)
		));
	}

	#[test]
	fn body_preview_truncates_long_bodies() {
		let long = "x".repeat(BODY_PREVIEW_LIMIT + 10);
		let preview = body_preview(long.as_bytes());

		assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 1);
		assert!(preview.ends_with('…'));
		assert_eq!(body_preview(b"short"), "short");
	}
}
