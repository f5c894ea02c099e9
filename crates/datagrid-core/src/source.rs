//! Data source contract
//!
//! A data source wraps whatever actually stores the rows: an ORM model, a
//! query builder, a remote API. The grid never builds queries itself; it
//! hands the data source an order clause and the filter set, then reads the
//! current page through the adapter the source returns.

use crate::column::Column;
use crate::error::GridResult;
use crate::filter::Filter;
use crate::paginator::PaginatorAdapter;
use crate::sorting::OrderClause;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A row, keyed by column name
pub type Row = Map<String, Value>;

/// Filters keyed by filter name, in registration order
pub type FilterSet = IndexMap<String, Filter>;

/// Storage backend of a grid
pub trait DataSource {
	/// Columns derived from the underlying table or collection
	fn load_columns(&self) -> Vec<Column>;

	/// Field that identifies a row
	fn set_identifier_field_name(&mut self, name: &str);

	/// Finds one row by identifier
	fn find(&self, key: &Value) -> GridResult<Option<Row>>;

	/// Prepares the next fetch with an optional order and the current filters
	fn prepare(&mut self, order: Option<&OrderClause>, filters: &FilterSet) -> GridResult<()>;

	/// Adapter over the prepared result
	fn paginator_adapter(&self) -> GridResult<Box<dyn PaginatorAdapter>>;

	/// Inserts a row, returning its identifier
	fn insert(&mut self, data: Row) -> GridResult<Value>;

	/// Updates the row identified by `key`, returning its identifier
	fn update(&mut self, data: Row, key: &Value) -> GridResult<Value>;

	/// Deletes the row identified by `key`
	fn delete(&mut self, key: &Value) -> GridResult<()>;
}
