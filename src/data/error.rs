use thiserror::Error;

/// Failures at the boundary between the aggregation service and the charts.
#[derive(Debug, Error)]
pub enum DataError {
	/// The payload was not valid JSON for the expected shape.
	#[error("malformed payload: {0}")]
	Json(#[from] serde_json::Error),
	/// A hierarchy had no children to lay out.
	#[error("hierarchy `{0}` has no children")]
	EmptyHierarchy(String),
}
