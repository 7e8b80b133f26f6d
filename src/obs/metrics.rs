// self
use crate::{config::AuthMethod, obs::FlowOutcome};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(method: AuthMethod, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"keyfactor_auth_headers_total",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}
