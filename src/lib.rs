//! # Datagrid
//!
//! Data grids for web back-offices.
//!
//! A [`DataGrid`] describes a tabular listing over a pluggable [`DataSource`]:
//! which columns exist, how rows are sorted, which filters narrow them and
//! which page is shown. A [`Manager`] binds a grid to an inbound request,
//! builds its create/edit and filters forms, keeps the row and bulk actions,
//! guards writes with permission flags and hands everything to a
//! [`Renderer`].
//!
//! ## Crates
//!
//! - [`forms`] - form element descriptors, forms and CSRF tokens
//! - [`core`] - columns, sorting, filters, pagination and data sources
//! - [`manager`] - request binding, actions, permissions and rendering
//!
//! ## Feature Flags
//!
//! - `templates` (default) - HTML rendering through Tera ([`TeraRenderer`])
//!
//! ## Quick Example
//!
//! ```
//! use datagrid::prelude::*;
//! use serde_json::json;
//!
//! let source = MemoryDataSource::new(
//!     vec![Column::new("id"), Column::new("title").with_label("Title")],
//!     (1..=25).map(|i| json!({"id": i, "title": format!("Post {i}")})),
//! );
//! let grid = DataGrid::new(Box::new(source), GridOptions::default()).unwrap();
//!
//! let request = RequestSnapshot::from_query_str("page=2&show_items=10").unwrap();
//! let mut manager = Manager::new(grid, request);
//! manager.set_renderer(JsonRenderer::new());
//!
//! let body: serde_json::Value = serde_json::from_str(&manager.render().unwrap()).unwrap();
//! assert_eq!(body["data"][0]["id"], json!(15));
//! assert_eq!(body["paginator"]["page_count"], json!(3));
//! ```

pub use datagrid_core as core;
pub use datagrid_forms as forms;
pub use datagrid_manager as manager;

pub use datagrid_core::{
	Column, DataGrid, DataSource, Filter, FilterOperator, FilterValue, GridError, GridHooks,
	GridOptions, GridResult, MemoryAdapter, MemoryDataSource, PersistEvent, Row, SortDirection,
	ValueType,
};
pub use datagrid_forms::{Form, FormElement, FormError, FormResult};
#[cfg(feature = "templates")]
pub use datagrid_manager::TeraRenderer;
pub use datagrid_manager::{
	Action, ActionRegistry, JsonRenderer, Manager, ManagerError, ManagerOptions, ManagerResult,
	Permission, RenderContext, Renderer, RequestSnapshot,
};

/// Commonly used types
pub mod prelude {
	pub use crate::{
		Action, Column, DataGrid, DataSource, Filter, FilterOperator, Form, FormElement,
		GridOptions, JsonRenderer, Manager, ManagerOptions, MemoryDataSource, Renderer,
		RequestSnapshot, Row, SortDirection,
	};

	#[cfg(feature = "templates")]
	pub use crate::TeraRenderer;
}
