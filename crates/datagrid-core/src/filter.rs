//! Grid filters
//!
//! A filter narrows the rows a data source returns. Raw values arrive as
//! strings from the request (or as JSON from a form) and are converted into a
//! typed [`FilterValue`] according to the filter's [`ValueType`] before the
//! data source ever sees them.

use crate::error::{GridError, GridResult};
use datagrid_forms::FormElement;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How a filter value is compared against a row field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
	/// Field equals the value
	#[default]
	Equals,
	/// Field contains the value (case-insensitive)
	Contains,
	/// Field starts with the value (case-insensitive)
	StartsWith,
	/// Field is greater than or equal to the value
	GreaterOrEqual,
	/// Field is less than or equal to the value
	LessOrEqual,
}

/// Type raw filter values are converted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
	/// Free text
	#[default]
	Text,
	/// Signed integer
	Integer,
	/// Floating point number
	Float,
	/// `true`/`false` (also `1`/`0`, `yes`/`no`, `on`/`off`)
	Boolean,
}

impl ValueType {
	fn name(&self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Integer => "integer",
			Self::Float => "float",
			Self::Boolean => "boolean",
		}
	}

	fn parse_str(&self, raw: &str) -> Option<FilterValue> {
		let raw = raw.trim();
		match self {
			Self::Text => Some(FilterValue::Text(raw.to_string())),
			Self::Integer => raw.parse().ok().map(FilterValue::Integer),
			Self::Float => raw
				.parse::<f64>()
				.ok()
				.filter(|f| f.is_finite())
				.map(FilterValue::Float),
			Self::Boolean => match raw.to_ascii_lowercase().as_str() {
				"1" | "true" | "yes" | "on" => Some(FilterValue::Boolean(true)),
				"0" | "false" | "no" | "off" => Some(FilterValue::Boolean(false)),
				_ => None,
			},
		}
	}
}

/// A typed filter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
	/// Text value
	Text(String),
	/// Integer value
	Integer(i64),
	/// Float value
	Float(f64),
	/// Boolean value
	Boolean(bool),
}

impl FilterValue {
	/// JSON representation of the value
	pub fn to_json(&self) -> Value {
		match self {
			Self::Text(s) => Value::String(s.clone()),
			Self::Integer(i) => Value::from(*i),
			Self::Float(f) => Value::from(*f),
			Self::Boolean(b) => Value::Bool(*b),
		}
	}
}

impl fmt::Display for FilterValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(s) => f.write_str(s),
			Self::Integer(i) => write!(f, "{i}"),
			Self::Float(x) => write!(f, "{x}"),
			Self::Boolean(b) => write!(f, "{b}"),
		}
	}
}

/// A grid filter
///
/// Name, label and form element may be left unset; the grid fills them in
/// from the column the filter is bound to.
///
/// # Examples
///
/// ```
/// use datagrid_core::{Filter, FilterOperator, FilterValue, ValueType};
///
/// let mut filter = Filter::new()
///     .with_operator(FilterOperator::GreaterOrEqual)
///     .with_value_type(ValueType::Integer);
///
/// filter.set_raw_value(&serde_json::json!("10")).unwrap();
/// assert_eq!(filter.value(), Some(&FilterValue::Integer(10)));
///
/// assert!(filter.set_raw_value(&serde_json::json!("ten")).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Filter {
	name: Option<String>,
	column: Option<String>,
	label: Option<String>,
	operator: FilterOperator,
	value_type: ValueType,
	form_element: Option<FormElement>,
	value: Option<FilterValue>,
}

impl Filter {
	/// Creates an unbound equality filter on text values
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the name
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Sets the label
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets the comparison operator
	pub fn with_operator(mut self, operator: FilterOperator) -> Self {
		self.operator = operator;
		self
	}

	/// Sets the value type
	pub fn with_value_type(mut self, value_type: ValueType) -> Self {
		self.value_type = value_type;
		self
	}

	/// Sets the form element
	pub fn with_form_element(mut self, element: FormElement) -> Self {
		self.form_element = Some(element);
		self
	}

	/// Name, once set
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Sets the name
	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = Some(name.into());
	}

	/// Label, once set
	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	/// Column the filter applies to, once bound
	pub fn column(&self) -> Option<&str> {
		self.column.as_deref()
	}

	/// Binds the filter to a column
	pub fn set_column(&mut self, column: impl Into<String>) {
		self.column = Some(column.into());
	}

	/// Field compared against: the bound column, else the name
	pub fn field(&self) -> Option<&str> {
		self.column().or_else(|| self.name())
	}

	/// Sets the label
	pub fn set_label(&mut self, label: impl Into<String>) {
		self.label = Some(label.into());
	}

	/// Comparison operator
	pub fn operator(&self) -> FilterOperator {
		self.operator
	}

	/// Value type
	pub fn value_type(&self) -> ValueType {
		self.value_type
	}

	/// Form element, once set
	pub fn form_element(&self) -> Option<&FormElement> {
		self.form_element.as_ref()
	}

	/// Sets the form element
	pub fn set_form_element(&mut self, element: FormElement) {
		self.form_element = Some(element);
	}

	/// Current value
	pub fn value(&self) -> Option<&FilterValue> {
		self.value.as_ref()
	}

	/// Sets or clears the current value
	pub fn set_value(&mut self, value: Option<FilterValue>) {
		self.value = value;
	}

	/// Whether the filter currently restricts rows
	pub fn is_active(&self) -> bool {
		self.value.is_some()
	}

	/// Converts and stores a raw value
	///
	/// `null`, empty strings and whitespace clear the filter. Strings are
	/// parsed according to the value type; JSON numbers and booleans are
	/// accepted when they fit it. On failure the previous value is kept and
	/// [`GridError::InvalidFilterValue`] is returned.
	pub fn set_raw_value(&mut self, raw: &Value) -> GridResult<()> {
		let parsed = match raw {
			Value::Null => None,
			Value::String(s) if s.trim().is_empty() => None,
			Value::String(s) => Some(self.value_type.parse_str(s).ok_or_else(|| self.invalid(s))?),
			Value::Bool(b) => match self.value_type {
				ValueType::Boolean => Some(FilterValue::Boolean(*b)),
				ValueType::Text => Some(FilterValue::Text(b.to_string())),
				_ => return Err(self.invalid(&b.to_string())),
			},
			Value::Number(n) => match self.value_type {
				ValueType::Integer => Some(FilterValue::Integer(
					n.as_i64().ok_or_else(|| self.invalid(&n.to_string()))?,
				)),
				ValueType::Float => Some(FilterValue::Float(
					n.as_f64().ok_or_else(|| self.invalid(&n.to_string()))?,
				)),
				ValueType::Text => Some(FilterValue::Text(n.to_string())),
				ValueType::Boolean => return Err(self.invalid(&n.to_string())),
			},
			other => return Err(self.invalid(&other.to_string())),
		};
		self.value = parsed;
		Ok(())
	}

	fn invalid(&self, raw: &str) -> GridError {
		GridError::InvalidFilterValue {
			filter: self.name.clone().unwrap_or_default(),
			value: raw.to_string(),
			expected: self.value_type.name(),
		}
	}
}
