//! Keyfactor REST API header assembly: pick OAuth 2.0 client credentials or HTTP Basic
//! authentication from one immutable configuration and get back a ready-to-send header map.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod ext;
pub mod flows;
pub mod http;
pub mod obs;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Error as ReqwestError, blocking::Client as ReqwestClient};
	pub use serde::Deserialize;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{AuthError, ConfigError, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};

pub use config::{AuthConfig, AuthMethod, HeaderConfig};
pub use error::{AuthError, ConfigError, Result};
pub use flows::{API_VERSION_HEADER, DEFAULT_API_VERSION, HeaderBuilder, HeaderMap};
