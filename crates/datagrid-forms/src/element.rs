//! Form element descriptors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single `<option>` of a select element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
	/// Submitted value
	pub value: String,
	/// Text shown to the user
	pub label: String,
}

impl SelectOption {
	/// Creates a new option
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
		}
	}
}

/// Kind of input an element renders as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
	/// Single line text input
	Text,
	/// Multi line text input
	Textarea,
	/// Numeric input
	Number,
	/// Email input
	Email,
	/// Date input
	Date,
	/// Checkbox
	Checkbox,
	/// Select box with a fixed list of options
	Select {
		/// Available options in display order
		options: Vec<SelectOption>,
	},
	/// Hidden input
	Hidden,
	/// Hidden CSRF token input
	Csrf,
	/// Submit button
	Submit,
}

impl ElementKind {
	/// Returns whether elements of this kind take their value from submitted data
	///
	/// Submit buttons and CSRF tokens keep the value they were built with.
	pub fn accepts_data(&self) -> bool {
		!matches!(self, Self::Submit | Self::Csrf)
	}
}

/// Descriptor of one form input
///
/// # Examples
///
/// ```
/// use datagrid_forms::{ElementKind, FormElement};
///
/// let element = FormElement::number("price")
///     .with_label("Price")
///     .with_attribute("step", "0.01");
///
/// assert_eq!(element.name(), "price");
/// assert_eq!(element.label(), Some("Price"));
/// assert_eq!(element.kind(), &ElementKind::Number);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormElement {
	name: String,
	#[serde(flatten)]
	kind: ElementKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	value: Option<Value>,
	#[serde(default)]
	required: bool,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	attributes: BTreeMap<String, String>,
}

impl FormElement {
	/// Creates an element of the given kind
	pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
		Self {
			name: name.into(),
			kind,
			label: None,
			value: None,
			required: false,
			attributes: BTreeMap::new(),
		}
	}

	/// Creates a text input
	pub fn text(name: impl Into<String>) -> Self {
		Self::new(name, ElementKind::Text)
	}

	/// Creates a textarea
	pub fn textarea(name: impl Into<String>) -> Self {
		Self::new(name, ElementKind::Textarea)
	}

	/// Creates a numeric input
	pub fn number(name: impl Into<String>) -> Self {
		Self::new(name, ElementKind::Number)
	}

	/// Creates a date input
	pub fn date(name: impl Into<String>) -> Self {
		Self::new(name, ElementKind::Date)
	}

	/// Creates a checkbox
	pub fn checkbox(name: impl Into<String>) -> Self {
		Self::new(name, ElementKind::Checkbox)
	}

	/// Creates a select box
	pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
		Self::new(name, ElementKind::Select { options })
	}

	/// Creates a hidden input
	pub fn hidden(name: impl Into<String>) -> Self {
		Self::new(name, ElementKind::Hidden)
	}

	/// Creates a CSRF token input carrying `token`
	pub fn csrf(name: impl Into<String>, token: impl Into<String>) -> Self {
		Self::new(name, ElementKind::Csrf).with_value(Value::String(token.into()))
	}

	/// Creates a submit button showing `value`
	pub fn submit(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self::new(name, ElementKind::Submit).with_value(Value::String(value.into()))
	}

	/// Sets the label
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets the current value
	pub fn with_value(mut self, value: Value) -> Self {
		self.value = Some(value);
		self
	}

	/// Marks the element as required
	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	/// Adds an HTML attribute
	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(key.into(), value.into());
		self
	}

	/// Element name, unique within a form
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Renames the element
	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = name.into();
	}

	/// Input kind
	pub fn kind(&self) -> &ElementKind {
		&self.kind
	}

	/// Label, if one was set
	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	/// Replaces the label
	pub fn set_label(&mut self, label: impl Into<String>) {
		self.label = Some(label.into());
	}

	/// Current value
	pub fn value(&self) -> Option<&Value> {
		self.value.as_ref()
	}

	/// Replaces the current value; `None` clears it
	pub fn set_value(&mut self, value: Option<Value>) {
		self.value = value;
	}

	/// Whether the element is required
	pub fn is_required(&self) -> bool {
		self.required
	}

	/// HTML attributes in key order
	pub fn attributes(&self) -> &BTreeMap<String, String> {
		&self.attributes
	}
}
