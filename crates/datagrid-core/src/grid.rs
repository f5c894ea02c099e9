//! The data grid
//!
//! [`DataGrid`] holds the state of one listing: its columns, sort column,
//! filters and pagination. It fetches the current page from its
//! [`DataSource`] and forwards create/update/delete to it.

use crate::column::Column;
use crate::error::GridResult;
use crate::filter::Filter;
use crate::hooks::{GridHooks, Hook, PersistEvent};
use crate::options::GridOptions;
use crate::paginator::{Paginator, PaginatorState};
use crate::registry::ColumnRegistry;
use crate::sorting::{OrderClause, SortDirection, SortToken};
use crate::source::{DataSource, FilterSet, Row};
use serde_json::{Map, Value};

/// Identifier column used unless configured otherwise
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "id";
/// Page size used unless configured otherwise
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
/// Page range used unless configured otherwise
pub const DEFAULT_PAGE_RANGE: usize = 10;

/// State of one listing over a data source
///
/// # Examples
///
/// ```
/// use datagrid_core::{Column, DataGrid, GridOptions, MemoryDataSource, SortDirection};
/// use serde_json::json;
///
/// let source = MemoryDataSource::new(
///     vec![Column::new("id"), Column::new("price")],
///     vec![
///         json!({"id": 1, "price": 30}),
///         json!({"id": 2, "price": 10}),
///     ],
/// );
///
/// let mut grid = DataGrid::new(Box::new(source), GridOptions::default()).unwrap();
/// grid.set_order("price~asc");
///
/// let rows = grid.get_data().unwrap();
/// assert_eq!(rows[0]["id"], json!(2));
/// assert_eq!(grid.current_order_direction(), SortDirection::Ascending);
/// ```
pub struct DataGrid {
	caption: String,
	data_source: Box<dyn DataSource>,
	columns: ColumnRegistry,
	identifier_column_name: String,
	current_order_column_name: Option<String>,
	current_order_direction: SortDirection,
	current_page: usize,
	items_per_page: usize,
	page_range: usize,
	filters: FilterSet,
	data: Vec<Row>,
	paginator: Option<PaginatorState>,
	hooks: GridHooks,
}

impl std::fmt::Debug for DataGrid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DataGrid")
			.field("caption", &self.caption)
			.field("columns", &self.columns)
			.field("identifier_column_name", &self.identifier_column_name)
			.field("current_order_column_name", &self.current_order_column_name)
			.field("current_order_direction", &self.current_order_direction)
			.field("current_page", &self.current_page)
			.field("items_per_page", &self.items_per_page)
			.field("page_range", &self.page_range)
			.field("filters", &self.filters)
			.field("hooks", &self.hooks)
			.finish_non_exhaustive()
	}
}

impl DataGrid {
	/// Creates a grid over `data_source`
	///
	/// Columns are loaded from the data source, then `options` are applied and
	/// the identifier column is propagated to the data source.
	pub fn new(data_source: Box<dyn DataSource>, options: GridOptions) -> GridResult<Self> {
		Self::with_hooks(data_source, options, GridHooks::default())
	}

	/// Creates a grid with hooks connected up front, firing `init` once built
	pub fn with_hooks(
		data_source: Box<dyn DataSource>,
		options: GridOptions,
		hooks: GridHooks,
	) -> GridResult<Self> {
		let mut columns = ColumnRegistry::new();
		columns.add_all(data_source.load_columns(), true)?;

		let mut grid = Self {
			caption: String::new(),
			data_source,
			columns,
			identifier_column_name: DEFAULT_IDENTIFIER_COLUMN.to_string(),
			current_order_column_name: None,
			current_order_direction: SortDirection::Ascending,
			current_page: 1,
			items_per_page: DEFAULT_ITEMS_PER_PAGE,
			page_range: DEFAULT_PAGE_RANGE,
			filters: FilterSet::new(),
			data: Vec::new(),
			paginator: None,
			hooks,
		};

		if options.identifier_column_name.is_none() {
			grid.set_identifier_column_name(DEFAULT_IDENTIFIER_COLUMN);
		}
		grid.apply_options(options)?;

		let init = std::mem::replace(&mut grid.hooks.init, Hook::new("datagrid.grid.init"));
		init.send(&mut grid);
		// receivers connected during init run from the next init on, which never comes
		grid.hooks.init = init;

		tracing::debug!(
			columns = grid.columns.len(),
			identifier = %grid.identifier_column_name,
			"data grid initialized"
		);
		Ok(grid)
	}

	/// Applies options through their setters
	///
	/// Unrecognised keys are logged and skipped. Hiding an unknown column fails
	/// with [`GridError::UnknownColumn`](crate::GridError::UnknownColumn).
	pub fn apply_options(&mut self, options: GridOptions) -> GridResult<&mut Self> {
		for key in options.unrecognized.keys() {
			tracing::warn!(option = %key, "ignoring unrecognized grid option");
		}

		if let Some(caption) = options.caption {
			self.set_caption(caption);
		}
		if let Some(identifier) = options.identifier_column_name {
			self.set_identifier_column_name(identifier);
		}
		if let Some(page) = options.current_page {
			self.set_current_page(page);
		}
		if let Some(count) = options.items_per_page {
			self.set_items_per_page(count);
		}
		if let Some(range) = options.page_range {
			self.set_page_range(range);
		}
		if let Some(order) = options.order {
			self.set_order(&order);
		}
		self.hide_columns(options.hidden_columns.iter().map(String::as_str))?;
		self.hide_columns_in_form(options.hidden_in_form.iter().map(String::as_str))?;

		Ok(self)
	}

	/// Lifecycle hooks
	pub fn hooks_mut(&mut self) -> &mut GridHooks {
		&mut self.hooks
	}

	// Metadata

	/// Sets the caption
	pub fn set_caption(&mut self, caption: impl Into<String>) -> &mut Self {
		self.caption = caption.into();
		self
	}

	/// Caption
	pub fn caption(&self) -> &str {
		&self.caption
	}

	// Columns

	/// Sets the identifier column and propagates it to the data source
	pub fn set_identifier_column_name(&mut self, name: impl Into<String>) -> &mut Self {
		self.identifier_column_name = name.into();
		self.data_source
			.set_identifier_field_name(&self.identifier_column_name);
		self
	}

	/// Identifier column
	pub fn identifier_column_name(&self) -> &str {
		&self.identifier_column_name
	}

	/// Adds a column; see [`ColumnRegistry::add`]
	pub fn add_column(&mut self, column: Column, overwrite: bool) -> GridResult<&mut Self> {
		self.columns.add(column, overwrite)?;
		Ok(self)
	}

	/// Adds or replaces a column
	pub fn set_column(&mut self, column: Column) -> &mut Self {
		self.columns.set(column);
		self
	}

	/// Adds several columns
	pub fn add_columns(
		&mut self,
		columns: impl IntoIterator<Item = Column>,
		overwrite: bool,
	) -> GridResult<&mut Self> {
		self.columns.add_all(columns, overwrite)?;
		Ok(self)
	}

	/// Looks up a column
	pub fn column(&self, name: &str) -> GridResult<&Column> {
		self.columns.get(name)
	}

	/// Looks up a column for modification
	pub fn column_mut(&mut self, name: &str) -> GridResult<&mut Column> {
		self.columns.get_mut(name)
	}

	/// All columns
	pub fn columns(&self) -> &ColumnRegistry {
		&self.columns
	}

	/// All columns for modification
	pub fn columns_mut(&mut self) -> &mut ColumnRegistry {
		&mut self.columns
	}

	/// Removes a column; unknown names are a no-op
	pub fn remove_column(&mut self, name: &str) -> &mut Self {
		self.columns.remove(name);
		self
	}

	/// Removes several columns
	pub fn remove_columns<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> &mut Self {
		self.columns.remove_all(names);
		self
	}

	/// Hides a column from listings; it stays registered
	pub fn hide_column(&mut self, name: &str) -> GridResult<&mut Self> {
		self.columns.get_mut(name)?.set_visible(false);
		Ok(self)
	}

	/// Hides several columns from listings
	pub fn hide_columns<'a>(
		&mut self,
		names: impl IntoIterator<Item = &'a str>,
	) -> GridResult<&mut Self> {
		for name in names {
			self.hide_column(name)?;
		}
		Ok(self)
	}

	/// Hides a column from the create/edit form
	pub fn hide_column_in_form(&mut self, name: &str) -> GridResult<&mut Self> {
		self.columns.get_mut(name)?.set_visible_in_form(false);
		Ok(self)
	}

	/// Hides several columns from the create/edit form
	pub fn hide_columns_in_form<'a>(
		&mut self,
		names: impl IntoIterator<Item = &'a str>,
	) -> GridResult<&mut Self> {
		for name in names {
			self.hide_column_in_form(name)?;
		}
		Ok(self)
	}

	// Sorting

	/// Applies a `"<column>~<direction>"` sort token
	///
	/// Malformed tokens and tokens naming an unknown or unsortable column
	/// leave the current sort untouched.
	pub fn set_order(&mut self, token: &str) -> &mut Self {
		match SortToken::parse(token) {
			Some(SortToken { column, direction }) => {
				self.set_current_order_column(&column, direction);
			}
			None => tracing::debug!(token, "ignoring malformed sort token"),
		}
		self
	}

	/// Sorts by `column_name`; unknown or unsortable columns are ignored
	///
	/// The column's own order direction is set to the reverse of `direction`,
	/// which is what its header link should request next.
	pub fn set_current_order_column(
		&mut self,
		column_name: &str,
		direction: SortDirection,
	) -> &mut Self {
		let Ok(column) = self.columns.get_mut(column_name) else {
			tracing::debug!(column = column_name, "ignoring sort on unknown column");
			return self;
		};
		if !column.is_sortable() {
			tracing::debug!(column = column_name, "ignoring sort on unsortable column");
			return self;
		}

		column.set_order_direction(direction);
		column.revert_order_direction();
		self.current_order_column_name = Some(column.name().to_string());
		self.current_order_direction = direction;
		self
	}

	/// Column the grid is sorted by
	pub fn current_order_column_name(&self) -> Option<&str> {
		self.current_order_column_name.as_deref()
	}

	/// Current sort direction
	pub fn current_order_direction(&self) -> SortDirection {
		self.current_order_direction
	}

	/// Order clause for the data source, if sorted
	pub fn order_clause(&self) -> Option<OrderClause> {
		self.current_order_column_name
			.as_ref()
			.map(|column| OrderClause {
				column: column.clone(),
				direction: self.current_order_direction,
			})
	}

	// Data source

	/// The data source
	pub fn data_source(&self) -> &dyn DataSource {
		self.data_source.as_ref()
	}

	/// The data source for modification
	pub fn data_source_mut(&mut self) -> &mut dyn DataSource {
		self.data_source.as_mut()
	}

	/// Finds one row by identifier
	pub fn row(&self, key: &Value) -> GridResult<Option<Row>> {
		self.data_source.find(key)
	}

	/// Fetches the current page
	///
	/// The data source is prepared with the current order clause and filters,
	/// then read through its paginator adapter. The returned items are
	/// normalized into a row list; adapters returning an unsupported shape
	/// fail with [`GridError::UnsupportedPaginatorResult`](crate::GridError::UnsupportedPaginatorResult).
	pub fn get_data(&mut self) -> GridResult<&[Row]> {
		let order = self.order_clause();
		self.data_source.prepare(order.as_ref(), &self.filters)?;

		let mut paginator = Paginator::new(self.data_source.paginator_adapter()?);
		paginator
			.set_current_page_number(self.current_page)
			.set_item_count_per_page(self.items_per_page)
			.set_page_range(self.page_range);

		let rows = paginator.current_items()?.into_rows()?;
		self.paginator = Some(paginator.state(rows.len()));
		self.data = rows;

		tracing::debug!(
			rows = self.data.len(),
			page = self.current_page,
			order = order.as_ref().map(ToString::to_string),
			"fetched grid data"
		);
		Ok(&self.data)
	}

	/// Rows of the last fetch
	pub fn data(&self) -> &[Row] {
		&self.data
	}

	/// Pagination state of the last fetch
	pub fn paginator(&self) -> Option<&PaginatorState> {
		self.paginator.as_ref()
	}

	// CRUD

	/// Inserts a row without firing hooks
	pub fn insert(&mut self, data: Row) -> GridResult<Value> {
		self.data_source.insert(data)
	}

	/// Updates a row without firing hooks
	pub fn update(&mut self, data: Row, key: &Value) -> GridResult<Value> {
		self.data_source.update(data, key)
	}

	/// Inserts (`key` is `None`) or updates a row, firing the persist hooks
	///
	/// `persist_pre` receivers may modify the row before it is written;
	/// `persist_post` receivers see the row as written and its identifier.
	pub fn save(&mut self, mut data: Row, key: Option<&Value>) -> GridResult<Value> {
		self.hooks.persist_pre.send(&mut data);

		let created = key.is_none();
		let id = match key {
			Some(key) => self.update(data.clone(), key)?,
			None => self.insert(data.clone())?,
		};

		let mut event = PersistEvent {
			data,
			id,
			created,
		};
		self.hooks.persist_post.send(&mut event);
		Ok(event.id)
	}

	/// Deletes a row
	pub fn delete(&mut self, key: &Value) -> GridResult<()> {
		self.data_source.delete(key)
	}

	// Filters

	/// Adds a filter bound to `column_name`
	///
	/// The filter compares rows on that column. A filter without name, label
	/// or form element takes the column's name, label and a copy of its form
	/// element renamed after the filter.
	pub fn add_filter(&mut self, mut filter: Filter, column_name: &str) -> GridResult<&mut Self> {
		let column = self.columns.get(column_name)?;

		filter.set_column(column.name());
		if filter.name().is_none() {
			filter.set_name(column.name());
		}
		if filter.label().is_none() {
			filter.set_label(column.label());
		}
		let name = filter.name().unwrap_or(column_name).to_string();
		if filter.form_element().is_none() {
			let mut element = column.form_element().clone();
			element.set_name(name.as_str());
			element.set_label(filter.label().unwrap_or(column.label()).to_string());
			filter.set_form_element(element);
		}

		self.filters.insert(name, filter);
		Ok(self)
	}

	/// Whether a filter with this name exists
	pub fn has_filter(&self, name: &str) -> bool {
		self.filters.contains_key(name)
	}

	/// Looks up a filter
	pub fn filter(&self, name: &str) -> Option<&Filter> {
		self.filters.get(name)
	}

	/// Looks up a filter for modification
	pub fn filter_mut(&mut self, name: &str) -> Option<&mut Filter> {
		self.filters.get_mut(name)
	}

	/// All filters
	pub fn filters(&self) -> &FilterSet {
		&self.filters
	}

	/// Whether any filter is registered
	pub fn has_filters(&self) -> bool {
		!self.filters.is_empty()
	}

	/// Filters that currently carry a value
	pub fn active_filters(&self) -> impl Iterator<Item = &Filter> {
		self.filters.values().filter(|f| f.is_active())
	}

	/// Sets every filter's value from `values`, keyed by filter name
	///
	/// A filter missing from `values` is cleared. Values that cannot be
	/// converted to the filter's type clear the filter and are logged.
	pub fn set_filters_data(&mut self, values: &Map<String, Value>) -> &mut Self {
		for (name, filter) in self.filters.iter_mut() {
			let raw = values.get(name).unwrap_or(&Value::Null);
			if let Err(err) = filter.set_raw_value(raw) {
				tracing::warn!(filter = %name, error = %err, "dropping filter value");
				filter.set_value(None);
			}
		}
		self
	}

	// Pagination

	/// Sets the current page; 0 becomes 1
	pub fn set_current_page(&mut self, page: usize) -> &mut Self {
		self.current_page = page.max(1);
		self
	}

	/// Current page
	pub fn current_page(&self) -> usize {
		self.current_page
	}

	/// Sets the page size; 0 is ignored
	pub fn set_items_per_page(&mut self, count: usize) -> &mut Self {
		if count == 0 {
			tracing::debug!("ignoring zero items per page");
		} else {
			self.items_per_page = count;
		}
		self
	}

	/// Page size
	pub fn items_per_page(&self) -> usize {
		self.items_per_page
	}

	/// Sets the page range; 0 is ignored
	pub fn set_page_range(&mut self, range: usize) -> &mut Self {
		if range == 0 {
			tracing::debug!("ignoring zero page range");
		} else {
			self.page_range = range;
		}
		self
	}

	/// Page range
	pub fn page_range(&self) -> usize {
		self.page_range
	}
}

impl<'a> IntoIterator for &'a DataGrid {
	type Item = &'a Column;
	type IntoIter = indexmap::map::Values<'a, String, Column>;

	fn into_iter(self) -> Self::IntoIter {
		(&self.columns).into_iter()
	}
}
