//! Grid manager
//!
//! A [`Manager`] wraps one [`DataGrid`] for the duration of a request. It
//! binds sort and pagination parameters from the request, builds the
//! create/edit and filters forms on first use, keeps the action registry,
//! guards writes with permission flags and hands the assembled state to a
//! [`Renderer`].

use crate::action::{Action, ActionRegistry};
use crate::error::{ManagerError, ManagerResult, Permission};
use crate::options::ManagerOptions;
use crate::renderer::{GridView, ManagerView, RenderContext, Renderer};
use crate::request::RequestSnapshot;
use datagrid_core::{DataGrid, Hook, Row};
use datagrid_forms::{Form, FormElement, csrf};
use serde_json::{Map, Value};

/// Name of the create/edit form
pub const FORM_NAME: &str = "datagrid-form";
/// Name of the filters form
pub const FILTERS_FORM_NAME: &str = "datagrid-filters-form";
/// CSRF element of the create/edit form
pub const CSRF_ELEMENT: &str = "hash";
/// Submit element of the create/edit form
pub const SUBMIT_ELEMENT: &str = "submit";
/// Submit element of the filters form
pub const APPLY_ELEMENT: &str = "apply";

/// Query parameter holding the sort token
pub const ORDER_PARAM: &str = "order";
/// Query parameter holding the page number
pub const PAGE_PARAM: &str = "page";
/// Query parameter holding the page size
pub const SHOW_ITEMS_PARAM: &str = "show_items";

/// Binds a grid to a request
///
/// # Examples
///
/// ```
/// use datagrid_core::{Column, DataGrid, GridOptions, MemoryDataSource};
/// use datagrid_manager::{JsonRenderer, Manager, RequestSnapshot};
/// use serde_json::json;
///
/// let source = MemoryDataSource::new(
///     vec![Column::new("id"), Column::new("title")],
///     vec![json!({"id": 1, "title": "First"}), json!({"id": 2, "title": "Second"})],
/// );
/// let grid = DataGrid::new(Box::new(source), GridOptions::default()).unwrap();
/// let request = RequestSnapshot::from_query_str("page=1").unwrap();
///
/// let mut manager = Manager::new(grid, request);
/// assert_eq!(manager.grid().current_order_column_name(), Some("id"));
///
/// manager.set_renderer(JsonRenderer::new());
/// let output: serde_json::Value = serde_json::from_str(&manager.render().unwrap()).unwrap();
/// assert_eq!(output["data"][0]["title"], json!("Second"));
/// ```
pub struct Manager {
	grid: DataGrid,
	request: RequestSnapshot,
	allow_create: bool,
	allow_edit: bool,
	allow_delete: bool,
	actions: ActionRegistry,
	form: Option<Form>,
	filters_form: Option<Form>,
	form_built: Hook<Form>,
	filters_form_built: Hook<Form>,
	renderer: Option<Box<dyn Renderer>>,
}

impl std::fmt::Debug for Manager {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Manager")
			.field("grid", &self.grid)
			.field("request", &self.request)
			.field("allow_create", &self.allow_create)
			.field("allow_edit", &self.allow_edit)
			.field("allow_delete", &self.allow_delete)
			.field("actions", &self.actions)
			.field("form", &self.form)
			.field("filters_form", &self.filters_form)
			.field("renderer", &self.renderer.is_some())
			.finish()
	}
}

impl Manager {
	/// Creates a manager and binds the request to the grid
	///
	/// `order` defaults to `"<identifier>~desc"` and `page` to 1. A missing
	/// or invalid `show_items` keeps the grid's page size.
	pub fn new(mut grid: DataGrid, request: RequestSnapshot) -> Self {
		let default_order = format!("{}~desc", grid.identifier_column_name());
		grid.set_order(request.query_or(ORDER_PARAM, &default_order));
		grid.set_current_page(request.query_usize(PAGE_PARAM).unwrap_or(1));
		if let Some(count) = request.query_usize(SHOW_ITEMS_PARAM) {
			grid.set_items_per_page(count);
		}

		Self {
			grid,
			request,
			allow_create: true,
			allow_edit: true,
			allow_delete: true,
			actions: ActionRegistry::default(),
			form: None,
			filters_form: None,
			form_built: Hook::new("datagrid.manager.form.build.post"),
			filters_form_built: Hook::new("datagrid.manager.filters_form.build.post"),
			renderer: None,
		}
	}

	/// Creates a manager and applies `options`
	pub fn with_options(
		grid: DataGrid,
		request: RequestSnapshot,
		options: ManagerOptions,
	) -> ManagerResult<Self> {
		let mut manager = Self::new(grid, request);
		manager.apply_options(options)?;
		Ok(manager)
	}

	/// Applies options; unrecognised keys are logged and skipped
	pub fn apply_options(&mut self, options: ManagerOptions) -> ManagerResult<&mut Self> {
		for key in options.unrecognized.keys() {
			tracing::warn!(option = %key, "ignoring unrecognized manager option");
		}

		if let Some(flag) = options.allow_create {
			self.set_allow_create(flag);
		}
		if let Some(flag) = options.allow_edit {
			self.set_allow_edit(flag);
		}
		if let Some(flag) = options.allow_delete {
			self.set_allow_delete(flag);
		}
		self.add_actions(options.actions)?;
		for name in &options.removed_actions {
			self.remove_action(name);
		}

		Ok(self)
	}

	/// The managed grid
	pub fn grid(&self) -> &DataGrid {
		&self.grid
	}

	/// The managed grid for modification
	pub fn grid_mut(&mut self) -> &mut DataGrid {
		&mut self.grid
	}

	/// The bound request
	pub fn request(&self) -> &RequestSnapshot {
		&self.request
	}

	// Permissions

	/// Allows or forbids creating rows
	pub fn set_allow_create(&mut self, flag: bool) -> &mut Self {
		self.allow_create = flag;
		self
	}

	/// Whether rows may be created
	pub fn allow_create(&self) -> bool {
		self.allow_create
	}

	/// Allows or forbids editing rows
	pub fn set_allow_edit(&mut self, flag: bool) -> &mut Self {
		self.allow_edit = flag;
		self
	}

	/// Whether rows may be edited
	pub fn allow_edit(&self) -> bool {
		self.allow_edit
	}

	/// Allows or forbids deleting rows
	pub fn set_allow_delete(&mut self, flag: bool) -> &mut Self {
		self.allow_delete = flag;
		self
	}

	/// Whether rows may be deleted
	pub fn allow_delete(&self) -> bool {
		self.allow_delete
	}

	fn check(&self, permission: Permission) -> ManagerResult<()> {
		let allowed = match permission {
			Permission::Create => self.allow_create,
			Permission::Edit => self.allow_edit,
			Permission::Delete => self.allow_delete,
		};
		if allowed {
			Ok(())
		} else {
			Err(ManagerError::PermissionDenied(permission))
		}
	}

	// Forms

	/// Registers a receiver run once the create/edit form is built
	///
	/// Receivers registered after the form was built never run.
	pub fn on_form_built<F>(&mut self, receiver: F) -> &mut Self
	where
		F: Fn(&mut Form) + 'static,
	{
		self.form_built.connect(receiver);
		self
	}

	/// Registers a receiver run once the filters form is built
	pub fn on_filters_form_built<F>(&mut self, receiver: F) -> &mut Self
	where
		F: Fn(&mut Form) + 'static,
	{
		self.filters_form_built.connect(receiver);
		self
	}

	/// The create/edit form, built on first access
	pub fn form(&mut self) -> &mut Form {
		let form = match self.form.take() {
			Some(form) => form,
			None => self.build_form(),
		};
		self.form.insert(form)
	}

	/// Whether the create/edit form has been built
	pub fn is_form_built(&self) -> bool {
		self.form.is_some()
	}

	fn build_form(&self) -> Form {
		let mut form = Form::new(FORM_NAME);

		for column in self.grid.columns().form_visible() {
			let mut element = column.form_element().clone();
			element.set_label(column.label());
			form.add(element);
		}

		let secret = self
			.request
			.csrf_secret()
			.map(str::to_string)
			.unwrap_or_else(csrf::generate_secret);
		form.add(FormElement::csrf(CSRF_ELEMENT, csrf::mask_secret(&secret)));
		form.add(FormElement::submit(SUBMIT_ELEMENT, "Save"));

		self.form_built.send(&mut form);
		tracing::debug!(form = FORM_NAME, elements = form.len(), "built form");
		form
	}

	/// The filters form, built on first access and prefilled from the request
	pub fn filters_form(&mut self) -> &mut Form {
		let form = match self.filters_form.take() {
			Some(form) => form,
			None => self.build_filters_form(),
		};
		self.filters_form.insert(form)
	}

	/// Whether the filters form has been built
	pub fn is_filters_form_built(&self) -> bool {
		self.filters_form.is_some()
	}

	fn build_filters_form(&self) -> Form {
		let mut form = Form::new(FILTERS_FORM_NAME);

		for filter in self.grid.filters().values() {
			if let Some(element) = filter.form_element() {
				form.add(element.clone());
			}
		}
		form.add(FormElement::submit(APPLY_ELEMENT, "Search").with_label("Search"));
		form.set_data(self.request.query_map());

		self.filters_form_built.send(&mut form);
		tracing::debug!(form = FILTERS_FORM_NAME, elements = form.len(), "built form");
		form
	}

	/// Pushes the filters form values into the grid filters
	pub fn apply_filters(&mut self) -> &mut Self {
		let values = self.filters_form().values();
		self.grid.set_filters_data(&values);
		self
	}

	// CRUD

	/// The create/edit form prefilled with the row identified by `key`
	///
	/// Returns `None` when no such row exists.
	pub fn edit_form(&mut self, key: &Value) -> ManagerResult<Option<&Form>> {
		self.check(Permission::Edit)?;
		let Some(row) = self.grid.row(key)? else {
			return Ok(None);
		};
		let form = self.form();
		form.set_data(row);
		Ok(Some(&*form))
	}

	/// Inserts (`key` is `None`) or updates a row
	pub fn save(&mut self, data: Row, key: Option<&Value>) -> ManagerResult<Value> {
		self.check(if key.is_some() {
			Permission::Edit
		} else {
			Permission::Create
		})?;
		Ok(self.grid.save(data, key)?)
	}

	/// Saves a submitted create/edit form
	///
	/// The submitted CSRF token is checked against the request's secret; a
	/// request without a secret is an [`ManagerError::InvalidRequest`]. Only values of the form's data elements are saved, so the token and
	/// submit button never reach the data source.
	pub fn submit(&mut self, submitted: Map<String, Value>, key: Option<&Value>) -> ManagerResult<Value> {
		let secret = self
			.request
			.csrf_secret()
			.ok_or_else(|| ManagerError::InvalidRequest("CSRF secret not set".to_string()))?
			.to_string();

		let form = self.form();
		form.validate_csrf(&submitted, &secret)?;
		form.set_data(submitted);
		let values = form.values();

		self.save(values, key)
	}

	/// Deletes every row in `keys`, returning how many were deleted
	///
	/// Stops at the first failing key.
	pub fn delete(&mut self, keys: &[Value]) -> ManagerResult<usize> {
		self.check(Permission::Delete)?;
		for key in keys {
			self.grid.delete(key)?;
		}
		tracing::debug!(rows = keys.len(), "deleted rows");
		Ok(keys.len())
	}

	// Actions

	/// Registers an action from a descriptor
	///
	/// Fails with [`ManagerError::InvalidAction`] when `action` or `label` is
	/// missing; `bulk` defaults to `true` and `in_row` to `false`.
	pub fn add_action(&mut self, name: &str, descriptor: &Value) -> ManagerResult<&mut Self> {
		self.actions.add_descriptor(name, descriptor)?;
		Ok(self)
	}

	/// Registers several actions, stopping at the first invalid one
	pub fn add_actions(
		&mut self,
		actions: impl IntoIterator<Item = (String, Value)>,
	) -> ManagerResult<&mut Self> {
		for (name, descriptor) in actions {
			self.add_action(&name, &descriptor)?;
		}
		Ok(self)
	}

	/// Registers a built action
	pub fn set_action(&mut self, action: Action) -> &mut Self {
		self.actions.set(action);
		self
	}

	/// Removes an action; unknown names are a no-op
	pub fn remove_action(&mut self, name: &str) -> &mut Self {
		self.actions.remove(name);
		self
	}

	/// Looks up an action
	pub fn action(&self, name: &str) -> Option<&Action> {
		self.actions.get(name)
	}

	/// All actions
	pub fn actions(&self) -> &ActionRegistry {
		&self.actions
	}

	/// Actions offered per row
	pub fn in_row_actions(&self) -> Vec<&Action> {
		self.actions.in_row().collect()
	}

	/// Actions applicable to a selection of rows
	pub fn bulk_actions(&self) -> Vec<&Action> {
		self.actions.bulk().collect()
	}

	// Rendering

	/// Sets the renderer
	pub fn set_renderer(&mut self, renderer: impl Renderer + 'static) -> &mut Self {
		self.renderer = Some(Box::new(renderer));
		self
	}

	/// The renderer, once set
	pub fn renderer(&self) -> Option<&dyn Renderer> {
		self.renderer.as_deref()
	}

	/// Fetches the current page and renders it with the configured renderer
	pub fn render(&mut self) -> ManagerResult<String> {
		let renderer = self.renderer.take().ok_or(ManagerError::MissingRenderer)?;
		let output = self.render_with(renderer.as_ref());
		self.renderer = Some(renderer);
		output
	}

	/// Fetches the current page and renders it with `renderer`
	pub fn render_with(&mut self, renderer: &dyn Renderer) -> ManagerResult<String> {
		self.grid.get_data()?;

		let form = match self.form.take() {
			Some(form) => form,
			None => self.build_form(),
		};
		let filters_form = match self.filters_form.take() {
			Some(form) => form,
			None => self.build_filters_form(),
		};

		let output = self
			.context(&form, &filters_form)
			.and_then(|context| renderer.render(&context));

		self.form = Some(form);
		self.filters_form = Some(filters_form);
		output
	}

	fn context<'a>(
		&'a self,
		form: &'a Form,
		filters_form: &'a Form,
	) -> ManagerResult<RenderContext<'a>> {
		Ok(RenderContext {
			manager: ManagerView {
				allow_create: self.allow_create,
				allow_edit: self.allow_edit,
				allow_delete: self.allow_delete,
				actions: self.actions.list().collect(),
				in_row_actions: self.in_row_actions(),
				bulk_actions: self.bulk_actions(),
				form,
				filters_form,
				sort_query: self.request.query_prefix(&[ORDER_PARAM, PAGE_PARAM])?,
				page_query: self.request.query_prefix(&[PAGE_PARAM])?,
			},
			grid: GridView::new(&self.grid),
			columns: self.grid.columns().list().collect(),
			data: self.grid.data(),
			paginator: self.grid.paginator(),
		})
	}
}
