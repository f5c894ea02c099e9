//! Grid options
//!
//! Every recognised option is a field here; `DataGrid::apply_options` maps
//! each one onto the matching setter. Unrecognised keys are collected and
//! reported, never applied.

use crate::error::{GridError, GridResult};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Options applied to a grid at construction
///
/// # Examples
///
/// ```
/// use datagrid_core::GridOptions;
///
/// let options = GridOptions::from_toml_str(r#"
///     caption = "Articles"
///     items_per_page = 50
///     order = "published_at~desc"
///     hidden_columns = ["body"]
/// "#).unwrap();
///
/// assert_eq!(options.caption.as_deref(), Some("Articles"));
/// assert_eq!(options.items_per_page, Some(50));
/// assert_eq!(options.hidden_columns, vec!["body"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridOptions {
	/// Caption shown above the listing
	pub caption: Option<String>,
	/// Identifier column, propagated to the data source
	pub identifier_column_name: Option<String>,
	/// Initial page
	pub current_page: Option<usize>,
	/// Page size
	pub items_per_page: Option<usize>,
	/// Number of page links around the current page
	pub page_range: Option<usize>,
	/// Initial sort token (`"<column>~<direction>"`)
	pub order: Option<String>,
	/// Columns hidden from listings
	pub hidden_columns: Vec<String>,
	/// Columns hidden from the create/edit form
	pub hidden_in_form: Vec<String>,
	/// Keys that matched no option
	#[serde(flatten)]
	pub unrecognized: BTreeMap<String, Value>,
}

impl GridOptions {
	/// Parses options from TOML
	pub fn from_toml_str(source: &str) -> GridResult<Self> {
		toml::from_str(source).map_err(|e| GridError::InvalidOptions(e.to_string()))
	}

	/// Parses options from a JSON value
	pub fn from_json(value: Value) -> GridResult<Self> {
		serde_json::from_value(value).map_err(|e| GridError::InvalidOptions(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_unknown_keys_are_collected() {
		let options = GridOptions::from_json(json!({
			"caption": "Users",
			"colour": "blue",
		}))
		.unwrap();

		assert_eq!(options.caption.as_deref(), Some("Users"));
		assert_eq!(options.unrecognized.get("colour"), Some(&json!("blue")));
	}

	#[test]
	fn test_wrong_type_is_an_error() {
		let err = GridOptions::from_json(json!({"items_per_page": "lots"})).unwrap_err();
		assert!(matches!(err, GridError::InvalidOptions(_)));
	}

	#[test]
	fn test_empty_toml_gives_defaults() {
		assert_eq!(GridOptions::from_toml_str("").unwrap(), GridOptions::default());
	}
}
