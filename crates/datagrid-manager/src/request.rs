//! Inbound request snapshot
//!
//! The manager only ever reads query parameters from the request, plus the
//! session CSRF secret when one is available. [`RequestSnapshot`] captures
//! exactly that, decoupled from any HTTP server.

use crate::error::{ManagerError, ManagerResult};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Read-only view of a request's query parameters
///
/// Parameters are percent-decoded. When a name repeats, the last value wins.
///
/// # Examples
///
/// ```
/// use datagrid_manager::RequestSnapshot;
///
/// let request = RequestSnapshot::from_query_str("order=title~asc&page=2&q=caf%C3%A9").unwrap();
///
/// assert_eq!(request.query("order"), Some("title~asc"));
/// assert_eq!(request.query("q"), Some("café"));
/// assert_eq!(request.query_or("show_items", "20"), "20");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSnapshot {
	query: IndexMap<String, String>,
	csrf_secret: Option<String>,
}

impl RequestSnapshot {
	/// Creates a snapshot without parameters
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a query string, with or without the leading `?`
	pub fn from_query_str(query: &str) -> ManagerResult<Self> {
		let query = query.strip_prefix('?').unwrap_or(query);
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
			.map_err(|e| ManagerError::InvalidRequest(e.to_string()))?;
		Ok(Self::from_pairs(pairs))
	}

	/// Parses the query part of a URI
	pub fn from_uri(uri: &http::Uri) -> ManagerResult<Self> {
		Self::from_query_str(uri.query().unwrap_or_default())
	}

	/// Parses the query of an HTTP request
	pub fn from_request<B>(request: &http::Request<B>) -> ManagerResult<Self> {
		Self::from_uri(request.uri())
	}

	/// Builds a snapshot from decoded name/value pairs
	pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			query: pairs
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
			csrf_secret: None,
		}
	}

	/// Attaches the session CSRF secret
	pub fn with_csrf_secret(mut self, secret: impl Into<String>) -> Self {
		self.csrf_secret = Some(secret.into());
		self
	}

	/// Query parameter value
	pub fn query(&self, name: &str) -> Option<&str> {
		self.query.get(name).map(String::as_str)
	}

	/// Query parameter value, or `default` when absent
	pub fn query_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
		self.query(name).unwrap_or(default)
	}

	/// Query parameter parsed as a positive integer
	///
	/// Missing, non-numeric and zero values yield `None`.
	pub fn query_usize(&self, name: &str) -> Option<usize> {
		let raw = self.query(name)?;
		match raw.trim().parse::<usize>() {
			Ok(0) | Err(_) => {
				tracing::debug!(parameter = name, value = raw, "ignoring non-positive query parameter");
				None
			}
			Ok(value) => Some(value),
		}
	}

	/// All query parameters as JSON strings, for form data
	pub fn query_map(&self) -> Map<String, Value> {
		self.query
			.iter()
			.map(|(k, v)| (k.clone(), Value::String(v.clone())))
			.collect()
	}

	/// Query parameters except `excluded`, encoded and followed by `&`
	///
	/// Empty when nothing is left, so links can append their own parameter.
	pub fn query_prefix(&self, excluded: &[&str]) -> ManagerResult<String> {
		let kept: Vec<(&str, &str)> = self
			.query
			.iter()
			.filter(|(k, _)| !excluded.contains(&k.as_str()))
			.map(|(k, v)| (k.as_str(), v.as_str()))
			.collect();
		if kept.is_empty() {
			return Ok(String::new());
		}
		let encoded = serde_urlencoded::to_string(kept)
			.map_err(|e| ManagerError::InvalidRequest(e.to_string()))?;
		Ok(encoded + "&")
	}

	/// Session CSRF secret
	pub fn csrf_secret(&self) -> Option<&str> {
		self.csrf_secret.as_deref()
	}
}
