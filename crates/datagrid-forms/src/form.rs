use crate::csrf;
use crate::element::{ElementKind, FormElement};
use crate::{FormError, FormResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// An ordered, named collection of form elements
///
/// Element names are unique; adding an element whose name is already present
/// replaces the existing one in place.
///
/// # Examples
///
/// ```
/// use datagrid_forms::{Form, FormElement};
///
/// let mut form = Form::new("filters");
/// form.add(FormElement::text("name"));
/// form.add(FormElement::text("name").with_label("Name"));
///
/// assert_eq!(form.len(), 1);
/// assert_eq!(form.element("name").unwrap().label(), Some("Name"));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Form {
	name: String,
	elements: Vec<FormElement>,
	data: Map<String, Value>,
}

impl Form {
	/// Create a new empty form
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			elements: Vec::new(),
			data: Map::new(),
		}
	}

	/// Form name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Add an element, replacing any element with the same name
	pub fn add(&mut self, element: FormElement) -> &mut Self {
		match self.elements.iter_mut().find(|e| e.name() == element.name()) {
			Some(existing) => *existing = element,
			None => self.elements.push(element),
		}
		self
	}

	/// Remove an element by name
	pub fn remove(&mut self, name: &str) -> Option<FormElement> {
		let index = self.elements.iter().position(|e| e.name() == name)?;
		Some(self.elements.remove(index))
	}

	/// Whether an element with this name exists
	pub fn has(&self, name: &str) -> bool {
		self.elements.iter().any(|e| e.name() == name)
	}

	/// Look up an element by name
	pub fn element(&self, name: &str) -> Option<&FormElement> {
		self.elements.iter().find(|e| e.name() == name)
	}

	/// Look up an element by name for modification
	pub fn element_mut(&mut self, name: &str) -> Option<&mut FormElement> {
		self.elements.iter_mut().find(|e| e.name() == name)
	}

	/// Look up an element by name, failing when it is missing
	pub fn try_element(&self, name: &str) -> FormResult<&FormElement> {
		self.element(name)
			.ok_or_else(|| FormError::UnknownElement(name.to_string()))
	}

	/// All elements in insertion order
	pub fn elements(&self) -> &[FormElement] {
		&self.elements
	}

	/// Number of elements
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Whether the form has no elements
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Populate the form from submitted or stored values
	///
	/// Every data-accepting element takes the value stored under its name, or
	/// is cleared when the map has no such key. Submit and CSRF elements keep
	/// their own values. The whole map is retained and available through
	/// [`Form::data`].
	pub fn set_data(&mut self, data: Map<String, Value>) -> &mut Self {
		for element in self.elements.iter_mut() {
			if element.kind().accepts_data() {
				element.set_value(data.get(element.name()).cloned());
			}
		}
		self.data = data;
		self
	}

	/// Data last passed to [`Form::set_data`]
	pub fn data(&self) -> &Map<String, Value> {
		&self.data
	}

	/// Values of the data-accepting elements, keyed by element name
	///
	/// Elements without a value are skipped.
	pub fn values(&self) -> Map<String, Value> {
		self.elements
			.iter()
			.filter(|e| e.kind().accepts_data())
			.filter_map(|e| e.value().map(|v| (e.name().to_string(), v.clone())))
			.collect()
	}

	/// The CSRF element, if the form carries one
	pub fn csrf_element(&self) -> Option<&FormElement> {
		self.elements
			.iter()
			.find(|e| matches!(e.kind(), ElementKind::Csrf))
	}

	/// Check the CSRF token submitted in `submitted` against the session secret
	pub fn validate_csrf(&self, submitted: &Map<String, Value>, secret: &str) -> FormResult<()> {
		let Some(element) = self.csrf_element() else {
			return Ok(());
		};
		let result = match submitted.get(element.name()).and_then(Value::as_str) {
			Some(token) => csrf::check_token(token, secret),
			None => Err(FormError::CsrfValidationFailed("CSRF token missing.".to_string())),
		};
		if let Err(err) = &result {
			tracing::debug!(form = %self.name, error = %err, "rejected CSRF token");
		}
		result
	}
}
