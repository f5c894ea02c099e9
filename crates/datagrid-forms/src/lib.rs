//! Form building blocks for datagrid
//!
//! A grid never renders HTML inputs itself. Columns and filters carry a
//! [`FormElement`] descriptor, and the manager assembles those descriptors into
//! a [`Form`] that a renderer or template turns into markup.
//!
//! # Example
//!
//! ```
//! use datagrid_forms::{Form, FormElement};
//! use serde_json::{Map, json};
//!
//! let mut form = Form::new("article");
//! form.add(FormElement::text("title").with_label("Title"));
//! form.add(FormElement::submit("submit", "Save"));
//!
//! let mut data = Map::new();
//! data.insert("title".to_string(), json!("Hello"));
//! form.set_data(data);
//!
//! assert_eq!(form.element("title").unwrap().value(), Some(&json!("Hello")));
//! ```

#![warn(missing_docs)]

pub mod csrf;
pub mod element;
pub mod form;

pub use element::{ElementKind, FormElement, SelectOption};
pub use form::Form;

/// Errors raised while assembling or checking a form
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	/// The submitted CSRF token was rejected
	#[error("CSRF validation failed: {0}")]
	CsrfValidationFailed(String),
	/// No element with this name exists in the form
	#[error("Form element '{0}' does not exist")]
	UnknownElement(String),
}

/// Result alias for form operations
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_form_error_display() {
		let err = FormError::UnknownElement("title".to_string());
		assert_eq!(err.to_string(), "Form element 'title' does not exist");

		let err = FormError::CsrfValidationFailed("CSRF token missing.".to_string());
		assert_eq!(err.to_string(), "CSRF validation failed: CSRF token missing.");
	}
}
