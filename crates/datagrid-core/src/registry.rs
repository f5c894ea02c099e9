//! Ordered column registry

use crate::column::Column;
use crate::error::{GridError, GridResult};
use indexmap::IndexMap;

/// Columns of a grid in display order, keyed by name
///
/// Registering a column without a label gives it its name as label.
///
/// # Examples
///
/// ```
/// use datagrid_core::{Column, ColumnRegistry};
///
/// let mut columns = ColumnRegistry::new();
/// columns.add(Column::new("id"), false).unwrap();
/// columns.add(Column::new("title").with_label("Title"), false).unwrap();
///
/// assert!(columns.add(Column::new("id"), false).is_err());
/// assert_eq!(columns.names().collect::<Vec<_>>(), vec!["id", "title"]);
/// assert_eq!(columns.get("id").unwrap().label(), "id");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
	columns: IndexMap<String, Column>,
}

impl ColumnRegistry {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a column
	///
	/// Fails with [`GridError::DuplicateColumn`] when the name is taken and
	/// `overwrite` is false. An overwritten column keeps its position.
	pub fn add(&mut self, mut column: Column, overwrite: bool) -> GridResult<()> {
		if !overwrite && self.contains(column.name()) {
			return Err(GridError::DuplicateColumn(column.name().to_string()));
		}

		if !column.has_label() {
			let label = column.name().to_string();
			column.set_label(label);
		}

		self.columns.insert(column.name().to_string(), column);
		Ok(())
	}

	/// Registers a column, replacing any column with the same name
	pub fn set(&mut self, column: Column) {
		// overwrite never fails
		let _ = self.add(column, true);
	}

	/// Registers several columns, stopping at the first failure
	pub fn add_all(
		&mut self,
		columns: impl IntoIterator<Item = Column>,
		overwrite: bool,
	) -> GridResult<()> {
		for column in columns {
			self.add(column, overwrite)?;
		}
		Ok(())
	}

	/// Whether a column with this name is registered
	pub fn contains(&self, name: &str) -> bool {
		self.columns.contains_key(name)
	}

	/// Looks up a column, failing with [`GridError::UnknownColumn`]
	pub fn get(&self, name: &str) -> GridResult<&Column> {
		self.columns
			.get(name)
			.ok_or_else(|| GridError::UnknownColumn(name.to_string()))
	}

	/// Looks up a column for modification
	pub fn get_mut(&mut self, name: &str) -> GridResult<&mut Column> {
		self.columns
			.get_mut(name)
			.ok_or_else(|| GridError::UnknownColumn(name.to_string()))
	}

	/// Column at `index` in display order
	pub fn get_index(&self, index: usize) -> Option<&Column> {
		self.columns.get_index(index).map(|(_, column)| column)
	}

	/// Position of a column in display order
	pub fn position(&self, name: &str) -> Option<usize> {
		self.columns.get_index_of(name)
	}

	/// Removes a column; unknown names are a no-op
	pub fn remove(&mut self, name: &str) -> Option<Column> {
		self.columns.shift_remove(name)
	}

	/// Removes several columns
	pub fn remove_all<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
		for name in names {
			self.remove(name);
		}
	}

	/// All columns in display order
	pub fn list(&self) -> impl Iterator<Item = &Column> {
		self.columns.values()
	}

	/// Column names in display order
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.columns.keys().map(String::as_str)
	}

	/// Columns shown in listings
	pub fn visible(&self) -> impl Iterator<Item = &Column> {
		self.list().filter(|c| c.is_visible())
	}

	/// Columns shown in the create/edit form
	pub fn form_visible(&self) -> impl Iterator<Item = &Column> {
		self.list().filter(|c| c.is_visible_in_form())
	}

	/// Number of registered columns
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	/// Whether no column is registered
	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}
}

impl<'a> IntoIterator for &'a ColumnRegistry {
	type Item = &'a Column;
	type IntoIter = indexmap::map::Values<'a, String, Column>;

	fn into_iter(self) -> Self::IntoIter {
		self.columns.values()
	}
}
