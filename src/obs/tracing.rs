// self
use crate::{_prelude::*, config::AuthMethod};

/// A span builder used around each header request.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided method + stage.
	pub fn new(method: AuthMethod, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("keyfactor_auth.headers", method = method.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, stage);

			Self {}
		}
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> FlowSpanGuard {
		#[cfg(feature = "tracing")]
		{
			FlowSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			FlowSpanGuard {}
		}
	}
}

/// RAII guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for FlowSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard(..)")
	}
}

/// Emits the informational diagnostic for a received access token.
pub fn token_received(method: AuthMethod) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(method = method.as_str(), "Access token received successfully.");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = method;
	}
}

/// Emits a debug event describing a failed header request.
pub fn flow_failed(method: AuthMethod, error: &AuthError) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(method = method.as_str(), error = %error, "Failed to build headers.");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, error);
	}
}
