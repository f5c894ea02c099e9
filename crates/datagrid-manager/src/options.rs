//! Manager options

use crate::error::{ManagerError, ManagerResult};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Options applied to a manager at construction
///
/// Actions are given as descriptors and validated when applied, so a bad
/// descriptor surfaces as [`ManagerError::InvalidAction`] naming the action.
///
/// # Examples
///
/// ```
/// use datagrid_manager::ManagerOptions;
///
/// let options = ManagerOptions::from_toml_str(r#"
///     allow_delete = false
///     removed_actions = ["delete"]
///
///     [actions.publish]
///     action = "publish"
///     label = "Publish"
///     in_row = true
/// "#).unwrap();
///
/// assert_eq!(options.allow_delete, Some(false));
/// assert!(options.actions.contains_key("publish"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ManagerOptions {
	/// Whether rows may be created
	pub allow_create: Option<bool>,
	/// Whether rows may be edited
	pub allow_edit: Option<bool>,
	/// Whether rows may be deleted
	pub allow_delete: Option<bool>,
	/// Action descriptors keyed by action name, added in order
	pub actions: IndexMap<String, Value>,
	/// Actions removed after `actions` are added
	pub removed_actions: Vec<String>,
	/// Keys that matched no option
	#[serde(flatten)]
	pub unrecognized: BTreeMap<String, Value>,
}

impl ManagerOptions {
	/// Parses options from TOML
	pub fn from_toml_str(source: &str) -> ManagerResult<Self> {
		toml::from_str(source).map_err(|e| ManagerError::InvalidOptions(e.to_string()))
	}

	/// Parses options from a JSON value
	pub fn from_json(value: Value) -> ManagerResult<Self> {
		serde_json::from_value(value).map_err(|e| ManagerError::InvalidOptions(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_from_json() {
		let options = ManagerOptions::from_json(json!({
			"allow_create": false,
			"actions": {"export": {"action": "export", "label": "Export"}},
			"skin": "dark",
		}))
		.unwrap();

		assert_eq!(options.allow_create, Some(false));
		assert_eq!(options.allow_edit, None);
		assert_eq!(options.actions.len(), 1);
		assert!(options.unrecognized.contains_key("skin"));
	}

	#[test]
	fn test_bad_flag_type() {
		assert!(matches!(
			ManagerOptions::from_json(json!({"allow_edit": "no"})),
			Err(ManagerError::InvalidOptions(_))
		));
	}
}
