//! Optional observability helpers for header assembly.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit spans named `keyfactor_auth.headers` with the
//!   `method` and `stage` fields, an info event when an access token arrives, and a debug event
//!   describing failures.
//! - Enable `metrics` to increment the `keyfactor_auth_headers_total` counter for every
//!   attempt/success/failure, labeled by `method` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to [`HeaderBuilder::get_headers`](crate::HeaderBuilder::get_headers).
	Attempt,
	/// Headers returned.
	Success,
	/// Error propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
