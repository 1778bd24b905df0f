//! Errors surfaced by the graph data layer.

use thiserror::Error;

/// Failure while fetching or validating graph data.
///
/// The `Display` text is shown to the user verbatim in the error panel.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
	/// The request never produced a response.
	#[error("Network error: {0}")]
	Network(String),
	/// The backend answered with a non-2xx status.
	#[error("HTTP {status}: {status_text}")]
	Http {
		/// Response status code.
		status: u16,
		/// Reason phrase sent with the status.
		status_text: String,
	},
	/// The body was not the JSON shape we expect.
	#[error("Failed to decode graph data: {0}")]
	Decode(String),
	/// The body parsed but broke a graph invariant.
	#[error("Invalid graph data: {0}")]
	InvalidGraph(String),
	/// Operation only exists in the browser build.
	#[error("{0} is only available in the browser")]
	Unsupported(&'static str),
}

impl From<serde_json::Error> for GraphError {
	fn from(err: serde_json::Error) -> Self {
		GraphError::Decode(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn http_error_message_carries_status() {
		let err = GraphError::Http {
			status: 502,
			status_text: "Bad Gateway".into(),
		};
		assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
	}

	#[test]
	fn serde_errors_become_decode_errors() {
		let err: GraphError = serde_json::from_str::<u32>("nope").unwrap_err().into();
		assert!(matches!(err, GraphError::Decode(_)));
	}
}
