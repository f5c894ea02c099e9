//! Data grid core
//!
//! A [`DataGrid`] describes one tabular listing over a [`DataSource`]:
//!
//! - an ordered [`ColumnRegistry`] with per-column visibility and sort state
//! - the current sort column, set from `"<column>~<direction>"` tokens
//! - typed [`Filter`]s bound to columns
//! - pagination settings and the [`PaginatorState`](paginator::PaginatorState) of the last fetch
//! - lifecycle [`hooks`] around construction and persistence
//!
//! The grid never queries storage itself. It hands the data source an
//! [`OrderClause`] and the filter set, then reads the current page through the
//! source's [`PaginatorAdapter`](paginator::PaginatorAdapter).
//!
//! # Example
//!
//! ```
//! use datagrid_core::{Column, DataGrid, Filter, FilterOperator, GridOptions, MemoryDataSource};
//! use serde_json::{json, Map};
//!
//! let source = MemoryDataSource::new(
//!     vec![Column::new("id"), Column::new("title").with_label("Title")],
//!     (1..=45).map(|i| json!({"id": i, "title": format!("Article {i}")})),
//! );
//!
//! let options = GridOptions {
//!     items_per_page: Some(10),
//!     order: Some("id~desc".to_string()),
//!     ..Default::default()
//! };
//! let mut grid = DataGrid::new(Box::new(source), options).unwrap();
//! grid.add_filter(Filter::new().with_operator(FilterOperator::Contains), "title").unwrap();
//!
//! let mut query = Map::new();
//! query.insert("title".to_string(), json!("Article 4"));
//! grid.set_filters_data(&query);
//!
//! let rows = grid.get_data().unwrap();
//! assert_eq!(rows.len(), 7);
//! assert_eq!(rows[0]["id"], json!(45));
//! ```

#![warn(missing_docs)]

pub mod column;
pub mod error;
pub mod filter;
pub mod grid;
pub mod hooks;
pub mod memory;
pub mod options;
pub mod paginator;
pub mod registry;
pub mod sorting;
pub mod source;

pub use column::Column;
pub use error::{GridError, GridResult};
pub use filter::{Filter, FilterOperator, FilterValue, ValueType};
pub use grid::DataGrid;
pub use hooks::{GridHooks, Hook, PersistEvent};
pub use memory::{MemoryAdapter, MemoryDataSource};
pub use options::GridOptions;
pub use registry::ColumnRegistry;
pub use sorting::{OrderClause, SortDirection, SortToken};
pub use source::{DataSource, FilterSet, Row};
