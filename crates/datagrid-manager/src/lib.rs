//! Grid manager
//!
//! Wires a [`DataGrid`](datagrid_core::DataGrid) to an inbound request:
//!
//! - binds `order`, `page` and `show_items` query parameters
//! - builds the create/edit form and the filters form on first use
//! - keeps the row/bulk [`Action`] registry
//! - guards create/edit/delete with permission flags
//! - renders through an injected [`Renderer`]
//!
//! # Example
//!
//! ```
//! use datagrid_core::{Column, DataGrid, Filter, GridOptions, MemoryDataSource};
//! use datagrid_manager::{Manager, RequestSnapshot};
//! use serde_json::json;
//!
//! let source = MemoryDataSource::new(
//!     vec![Column::new("id"), Column::new("city")],
//!     vec![
//!         json!({"id": 1, "city": "Lyon"}),
//!         json!({"id": 2, "city": "Oslo"}),
//!     ],
//! );
//! let mut grid = DataGrid::new(Box::new(source), GridOptions::default()).unwrap();
//! grid.add_filter(Filter::new(), "city").unwrap();
//!
//! let request = RequestSnapshot::from_query_str("city=Oslo").unwrap();
//! let mut manager = Manager::new(grid, request);
//! manager.apply_filters();
//!
//! let rows = manager.grid_mut().get_data().unwrap();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0]["id"], json!(2));
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod error;
pub mod manager;
pub mod options;
pub mod renderer;
pub mod request;

pub use action::{Action, ActionRegistry};
pub use error::{ManagerError, ManagerResult, Permission};
pub use manager::Manager;
pub use options::ManagerOptions;
pub use renderer::{GridView, JsonRenderer, ManagerView, RenderContext, Renderer};
#[cfg(feature = "tera")]
pub use renderer::TeraRenderer;
pub use request::RequestSnapshot;
