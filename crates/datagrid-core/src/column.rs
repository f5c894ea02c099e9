//! Grid column definition

use crate::sorting::SortDirection;
use datagrid_forms::FormElement;
use serde::Serialize;

/// A grid column
///
/// A column is identified by its name, which is also the key of the row field
/// it displays. Besides display metadata it carries the form element used to
/// edit the field and, once the grid is sorted by it, the direction its header
/// link should request next.
///
/// # Examples
///
/// ```
/// use datagrid_core::Column;
/// use datagrid_forms::FormElement;
///
/// let column = Column::new("price")
///     .with_label("Price")
///     .with_form_element(FormElement::number("price"));
///
/// assert_eq!(column.name(), "price");
/// assert_eq!(column.label(), "Price");
/// assert!(column.is_visible());
/// assert!(column.is_visible_in_form());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
	name: String,
	label: Option<String>,
	visible: bool,
	visible_in_form: bool,
	sortable: bool,
	order_direction: SortDirection,
	form_element: FormElement,
}

impl Column {
	/// Creates a visible, sortable column edited through a text input
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		let form_element = FormElement::text(name.clone());
		Self {
			name,
			label: None,
			visible: true,
			visible_in_form: true,
			sortable: true,
			order_direction: SortDirection::default(),
			form_element,
		}
	}

	/// Sets the label
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets the form element
	pub fn with_form_element(mut self, element: FormElement) -> Self {
		self.form_element = element;
		self
	}

	/// Sets listing visibility
	pub fn visible(mut self, visible: bool) -> Self {
		self.visible = visible;
		self
	}

	/// Sets form visibility
	pub fn visible_in_form(mut self, visible: bool) -> Self {
		self.visible_in_form = visible;
		self
	}

	/// Sets whether the grid may be sorted by this column
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Column name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Label, falling back to the name
	pub fn label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.name)
	}

	/// Whether an explicit label was set
	pub fn has_label(&self) -> bool {
		self.label.is_some()
	}

	/// Replaces the label
	pub fn set_label(&mut self, label: impl Into<String>) {
		self.label = Some(label.into());
	}

	/// Whether the column shows in listings
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Shows or hides the column in listings
	pub fn set_visible(&mut self, visible: bool) {
		self.visible = visible;
	}

	/// Whether the column shows in the create/edit form
	pub fn is_visible_in_form(&self) -> bool {
		self.visible_in_form
	}

	/// Shows or hides the column in the create/edit form
	pub fn set_visible_in_form(&mut self, visible: bool) {
		self.visible_in_form = visible;
	}

	/// Whether the grid may be sorted by this column
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Direction the column header should request when clicked
	pub fn order_direction(&self) -> SortDirection {
		self.order_direction
	}

	/// Sets the direction the column header should request
	pub fn set_order_direction(&mut self, direction: SortDirection) {
		self.order_direction = direction;
	}

	/// Flips the header direction
	pub fn revert_order_direction(&mut self) {
		self.order_direction = self.order_direction.toggle();
	}

	/// Form element used to edit this column
	pub fn form_element(&self) -> &FormElement {
		&self.form_element
	}

	/// Form element for modification
	pub fn form_element_mut(&mut self) -> &mut FormElement {
		&mut self.form_element
	}

	/// Replaces the form element
	pub fn set_form_element(&mut self, element: FormElement) {
		self.form_element = element;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use datagrid_forms::ElementKind;

	#[test]
	fn test_defaults() {
		let column = Column::new("title");
		assert_eq!(column.label(), "title");
		assert!(!column.has_label());
		assert!(column.is_sortable());
		assert_eq!(column.order_direction(), SortDirection::Ascending);
		assert_eq!(column.form_element().name(), "title");
		assert_eq!(column.form_element().kind(), &ElementKind::Text);
	}

	#[test]
	fn test_revert_order_direction() {
		let mut column = Column::new("title");
		column.set_order_direction(SortDirection::Ascending);
		column.revert_order_direction();
		assert_eq!(column.order_direction(), SortDirection::Descending);
	}

	#[test]
	fn test_visibility_flags_are_independent() {
		let column = Column::new("secret").visible(false);
		assert!(!column.is_visible());
		assert!(column.is_visible_in_form());

		let column = Column::new("created_at").visible_in_form(false);
		assert!(column.is_visible());
		assert!(!column.is_visible_in_form());
	}
}
