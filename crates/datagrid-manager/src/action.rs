//! Row and bulk actions
//!
//! An action is a link or button a listing offers per row (`in_row`), for a
//! selection of rows (`bulk`), or both. Actions can be registered from JSON
//! descriptors such as
//!
//! ```json
//! {"action": "publish", "label": "Publish", "confirm-message": "Publish now?"}
//! ```
//!
//! where `action` and `label` are required, `bulk` defaults to `true` and
//! `in_row` defaults to `false`.

use crate::error::{ManagerError, ManagerResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A registered action
///
/// Descriptor keys beyond the known ones are kept and handed to renderers
/// as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
	#[serde(skip_deserializing)]
	name: String,
	action: String,
	label: String,
	#[serde(default = "default_bulk")]
	bulk: bool,
	#[serde(default)]
	in_row: bool,
	#[serde(
		rename = "confirm-message",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	confirm_message: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	class: Option<String>,
	#[serde(flatten)]
	extra: Map<String, Value>,
}

fn default_bulk() -> bool {
	true
}

impl Action {
	/// Creates a bulk action that is not shown per row
	pub fn new(
		name: impl Into<String>,
		action: impl Into<String>,
		label: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			action: action.into(),
			label: label.into(),
			bulk: true,
			in_row: false,
			confirm_message: None,
			class: None,
			extra: Map::new(),
		}
	}

	/// Builds an action from a JSON descriptor
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_manager::Action;
	/// use serde_json::json;
	///
	/// let action = Action::from_descriptor("archive", &json!({
	///     "action": "archive",
	///     "label": "Archive",
	///     "icon": "box",
	/// })).unwrap();
	///
	/// assert!(action.is_bulk());
	/// assert!(!action.is_in_row());
	/// assert_eq!(action.extra()["icon"], json!("box"));
	///
	/// assert!(Action::from_descriptor("broken", &json!({"action": "x"})).is_err());
	/// ```
	pub fn from_descriptor(name: &str, descriptor: &Value) -> ManagerResult<Self> {
		let mut action: Self =
			Self::deserialize(descriptor).map_err(|e| ManagerError::InvalidAction {
				name: name.to_string(),
				reason: e.to_string(),
			})?;
		action.name = name.to_string();
		action.extra.remove("name");
		Ok(action)
	}

	/// Sets whether the action applies to a selection of rows
	pub fn with_bulk(mut self, bulk: bool) -> Self {
		self.bulk = bulk;
		self
	}

	/// Sets whether the action is offered on each row
	pub fn with_in_row(mut self, in_row: bool) -> Self {
		self.in_row = in_row;
		self
	}

	/// Sets the confirmation prompt
	pub fn with_confirm_message(mut self, message: impl Into<String>) -> Self {
		self.confirm_message = Some(message.into());
		self
	}

	/// Sets the CSS class of the action link
	pub fn with_class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Registry key
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Target endpoint
	pub fn action(&self) -> &str {
		&self.action
	}

	/// Text shown to the user
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Applies to a selection of rows
	pub fn is_bulk(&self) -> bool {
		self.bulk
	}

	/// Offered on each row
	pub fn is_in_row(&self) -> bool {
		self.in_row
	}

	/// Confirmation prompt
	pub fn confirm_message(&self) -> Option<&str> {
		self.confirm_message.as_deref()
	}

	/// CSS class
	pub fn class(&self) -> Option<&str> {
		self.class.as_deref()
	}

	/// Descriptor keys without a dedicated field
	pub fn extra(&self) -> &Map<String, Value> {
		&self.extra
	}
}

/// Actions of a manager, in registration order
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRegistry {
	actions: IndexMap<String, Action>,
}

impl Default for ActionRegistry {
	/// The `edit` row action and the `delete` bulk action
	fn default() -> Self {
		let mut registry = Self::empty();
		registry.set(
			Action::new("edit", "edit", "View & Edit")
				.with_bulk(false)
				.with_in_row(true)
				.with_class("glyphicon glyphicon-pencil"),
		);
		registry.set(
			Action::new("delete", "delete", "Delete")
				.with_confirm_message("Are you sure?")
				.with_bulk(true)
				.with_in_row(false),
		);
		registry
	}
}

impl ActionRegistry {
	/// Creates a registry without any action
	pub fn empty() -> Self {
		Self {
			actions: IndexMap::new(),
		}
	}

	/// Registers an action, replacing one with the same name in place
	pub fn set(&mut self, action: Action) {
		self.actions.insert(action.name().to_string(), action);
	}

	/// Registers an action from a JSON descriptor
	pub fn add_descriptor(&mut self, name: &str, descriptor: &Value) -> ManagerResult<()> {
		let action = Action::from_descriptor(name, descriptor)?;
		self.set(action);
		Ok(())
	}

	/// Removes an action; unknown names are a no-op
	pub fn remove(&mut self, name: &str) -> Option<Action> {
		self.actions.shift_remove(name)
	}

	/// Looks up an action
	pub fn get(&self, name: &str) -> Option<&Action> {
		self.actions.get(name)
	}

	/// Whether an action is registered
	pub fn contains(&self, name: &str) -> bool {
		self.actions.contains_key(name)
	}

	/// All actions
	pub fn list(&self) -> impl Iterator<Item = &Action> {
		self.actions.values()
	}

	/// Actions offered per row
	pub fn in_row(&self) -> impl Iterator<Item = &Action> {
		self.list().filter(|a| a.is_in_row())
	}

	/// Actions applicable to a selection of rows
	pub fn bulk(&self) -> impl Iterator<Item = &Action> {
		self.list().filter(|a| a.is_bulk())
	}

	/// Number of actions
	pub fn len(&self) -> usize {
		self.actions.len()
	}

	/// Whether no action is registered
	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_defaults() {
		let registry = ActionRegistry::default();

		let edit = registry.get("edit").unwrap();
		assert_eq!(edit.label(), "View & Edit");
		assert!(edit.is_in_row());
		assert!(!edit.is_bulk());

		let delete = registry.get("delete").unwrap();
		assert_eq!(delete.confirm_message(), Some("Are you sure?"));
		assert!(delete.is_bulk());
		assert!(!delete.is_in_row());
	}

	#[test]
	fn test_mistyped_keys_are_rejected() {
		let err = Action::from_descriptor("x", &json!({"action": "x", "label": 3})).unwrap_err();
		assert!(matches!(err, ManagerError::InvalidAction { ref name, .. } if name == "x"));

		let err = Action::from_descriptor("x", &json!({"label": "X"})).unwrap_err();
		assert!(err.to_string().contains("missing field `action`"));

		let err = Action::from_descriptor("x", &json!({"action": "x", "label": "X", "bulk": "yes"}))
			.unwrap_err();
		assert!(matches!(err, ManagerError::InvalidAction { .. }));

		assert!(Action::from_descriptor("x", &json!(["x"])).is_err());
	}

	#[test]
	fn test_descriptor_defaults_and_extra_keys() {
		let action = Action::from_descriptor(
			"publish",
			&json!({
				"action": "publish",
				"label": "Publish",
				"confirm-message": "Publish now?",
				"icon": "send",
			}),
		)
		.unwrap();

		assert_eq!(action.name(), "publish");
		assert!(action.is_bulk());
		assert!(!action.is_in_row());
		assert_eq!(action.confirm_message(), Some("Publish now?"));
		assert_eq!(action.extra().len(), 1);

		let value = serde_json::to_value(&action).unwrap();
		assert_eq!(value["icon"], json!("send"));
		assert_eq!(value["name"], json!("publish"));
	}

	#[test]
	fn test_serializes_confirm_message_with_dash() {
		let value = serde_json::to_value(ActionRegistry::default().get("delete").unwrap()).unwrap();
		assert_eq!(value["confirm-message"], json!("Are you sure?"));
		assert!(value.get("class").is_none());
	}
}
