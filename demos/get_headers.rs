//! Builds Keyfactor API headers with both authentication methods: OAuth client credentials
//! against a mocked token endpoint, then HTTP Basic from a JSON configuration document.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use keyfactor_auth_headers::{AuthMethod, DEFAULT_API_VERSION, HeaderBuilder, HeaderConfig};

fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start();
	let token_mock = server.mock(|when, then| {
		when.method(POST).path("/oauth2/token");
		then.status(200).header("content-type", "application/json").body(
			"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":900}",
		);
	});
	let oauth = HeaderConfig::builder(AuthMethod::OAuth)
		.client_id("demo-client")
		.client_secret("super-secret")
		.token_url(server.url("/oauth2/token"))
		.audience("keyfactor")
		.build()?;
	let headers = HeaderBuilder::new(oauth)?.get_headers("2")?;

	println!("OAuth headers:");

	for (name, value) in &headers {
		println!("  {name}: {value}");
	}

	token_mock.assert();

	let basic = HeaderConfig::from_json_str(
		r#"{"auth_method":"basic","username":"DOMAIN\\svc-keyfactor","password":"password"}"#,
	)?;
	let headers = HeaderBuilder::new(basic)?.get_headers(DEFAULT_API_VERSION)?;

	println!("Basic headers:");

	for (name, value) in &headers {
		println!("  {name}: {value}");
	}

	Ok(())
}
