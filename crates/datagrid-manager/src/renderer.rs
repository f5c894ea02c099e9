//! Rendering of a managed grid
//!
//! The manager assembles a [`RenderContext`] and hands it to whichever
//! [`Renderer`] it was given. Two renderers ship with the crate:
//! [`JsonRenderer`] for API responses and, with the `tera` feature,
//! [`TeraRenderer`] for HTML pages.

use crate::action::Action;
use crate::error::{ManagerError, ManagerResult};
use datagrid_core::paginator::PaginatorState;
use datagrid_core::{Column, DataGrid, Filter, Row, SortDirection};
use datagrid_forms::Form;
use serde::Serialize;

/// Renders a grid listing
pub trait Renderer {
	/// Renders the context into a response body
	fn render(&self, context: &RenderContext<'_>) -> ManagerResult<String>;
}

/// Everything a renderer gets to see
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
	/// Permissions, actions and forms
	pub manager: ManagerView<'a>,
	/// Grid state
	pub grid: GridView<'a>,
	/// All columns in display order, hidden ones included
	pub columns: Vec<&'a Column>,
	/// Rows of the current page
	pub data: &'a [Row],
	/// Pagination state of the current page
	pub paginator: Option<&'a PaginatorState>,
}

/// Manager state exposed to renderers
#[derive(Debug, Serialize)]
pub struct ManagerView<'a> {
	/// Rows may be created
	pub allow_create: bool,
	/// Rows may be edited
	pub allow_edit: bool,
	/// Rows may be deleted
	pub allow_delete: bool,
	/// All actions
	pub actions: Vec<&'a Action>,
	/// Actions offered per row
	pub in_row_actions: Vec<&'a Action>,
	/// Actions applicable to a selection of rows
	pub bulk_actions: Vec<&'a Action>,
	/// Create/edit form
	pub form: &'a Form,
	/// Filters form
	pub filters_form: &'a Form,
	/// Request parameters to carry into sort links, encoded and ending in `&`
	pub sort_query: String,
	/// Request parameters to carry into page links, encoded and ending in `&`
	pub page_query: String,
}

/// Grid state exposed to renderers
#[derive(Debug, Serialize)]
pub struct GridView<'a> {
	/// Caption
	pub caption: &'a str,
	/// Identifier column
	pub identifier_column_name: &'a str,
	/// Column the listing is sorted by
	pub current_order_column_name: Option<&'a str>,
	/// Sort direction
	pub current_order_direction: SortDirection,
	/// Current page
	pub current_page: usize,
	/// Page size
	pub items_per_page: usize,
	/// Page range
	pub page_range: usize,
	/// Filters in registration order
	pub filters: Vec<&'a Filter>,
}

impl<'a> GridView<'a> {
	/// Captures the state of `grid`
	pub fn new(grid: &'a DataGrid) -> Self {
		Self {
			caption: grid.caption(),
			identifier_column_name: grid.identifier_column_name(),
			current_order_column_name: grid.current_order_column_name(),
			current_order_direction: grid.current_order_direction(),
			current_page: grid.current_page(),
			items_per_page: grid.items_per_page(),
			page_range: grid.page_range(),
			filters: grid.filters().values().collect(),
		}
	}
}

/// Renders the context as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
	pretty: bool,
}

impl JsonRenderer {
	/// Compact output
	pub fn new() -> Self {
		Self::default()
	}

	/// Indented output
	pub fn pretty() -> Self {
		Self { pretty: true }
	}
}

impl Renderer for JsonRenderer {
	fn render(&self, context: &RenderContext<'_>) -> ManagerResult<String> {
		let output = if self.pretty {
			serde_json::to_string_pretty(context)
		} else {
			serde_json::to_string(context)
		};
		output.map_err(|e| ManagerError::Render(e.to_string()))
	}
}

#[cfg(feature = "tera")]
pub use self::tera_renderer::{DEFAULT_TEMPLATE, TeraRenderer};

#[cfg(feature = "tera")]
mod tera_renderer {
	use super::{RenderContext, Renderer};
	use crate::error::{ManagerError, ManagerResult};
	use tera::{Context, Tera};

	/// Name of the built-in template
	pub const DEFAULT_TEMPLATE: &str = "datagrid.html";

	/// Renders the context through a Tera template
	///
	/// The built-in `datagrid.html` template draws a plain HTML table with
	/// sortable headers, filter inputs, row and bulk actions and page links.
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_manager::TeraRenderer;
	///
	/// let renderer = TeraRenderer::new().unwrap();
	/// assert_eq!(renderer.template_name(), "datagrid.html");
	///
	/// let custom = TeraRenderer::with_template(
	///     "count.txt",
	///     "{{ data | length }} rows",
	/// ).unwrap();
	/// assert_eq!(custom.template_name(), "count.txt");
	/// ```
	#[derive(Debug)]
	pub struct TeraRenderer {
		tera: Tera,
		template: String,
	}

	impl TeraRenderer {
		/// Renderer using the built-in template
		pub fn new() -> ManagerResult<Self> {
			Self::with_template(DEFAULT_TEMPLATE, include_str!("../templates/datagrid.html"))
		}

		/// Renderer using a template given as source
		pub fn with_template(name: &str, source: &str) -> ManagerResult<Self> {
			let mut tera = Tera::default();
			tera.add_raw_template(name, source)
				.map_err(|e| ManagerError::Render(format!("Failed to add template {name}: {e}")))?;
			Ok(Self::from_tera(tera, name))
		}

		/// Renderer using a template already registered in `tera`
		pub fn from_tera(tera: Tera, template: impl Into<String>) -> Self {
			Self {
				tera,
				template: template.into(),
			}
		}

		/// Template rendered by this renderer
		pub fn template_name(&self) -> &str {
			&self.template
		}
	}

	impl Renderer for TeraRenderer {
		fn render(&self, context: &RenderContext<'_>) -> ManagerResult<String> {
			let ctx = Context::from_serialize(context)
				.map_err(|e| ManagerError::Render(format!("Failed to create context: {e}")))?;

			self.tera
				.render(&self.template, &ctx)
				.map_err(|e| ManagerError::Render(format!("Tera rendering error: {e}")))
		}
	}
}
