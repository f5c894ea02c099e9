//! In-memory data source
//!
//! Keeps rows in a `Vec` and applies filters and ordering itself. Useful for
//! small static lists and for tests; real applications implement
//! [`DataSource`] over their storage.

use crate::column::Column;
use crate::error::{GridError, GridResult};
use crate::filter::{Filter, FilterOperator, FilterValue};
use crate::paginator::{PageItems, PaginatorAdapter};
use crate::sorting::{OrderClause, SortDirection};
use crate::source::{DataSource, FilterSet, Row};
use serde_json::Value;
use std::cmp::Ordering;

/// Data source over a list of rows held in memory
///
/// Inserting a row without an identifier assigns the next integer
/// identifier.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
	columns: Vec<Column>,
	rows: Vec<Row>,
	identifier: String,
	prepared: Vec<Row>,
}

impl MemoryDataSource {
	/// Creates a data source; values that are not JSON objects are skipped
	pub fn new(columns: Vec<Column>, rows: impl IntoIterator<Item = Value>) -> Self {
		let rows: Vec<Row> = rows
			.into_iter()
			.filter_map(|value| match value {
				Value::Object(row) => Some(row),
				other => {
					tracing::warn!(value = %other, "skipping non-object row");
					None
				}
			})
			.collect();

		Self {
			columns,
			prepared: rows.clone(),
			rows,
			identifier: "id".to_string(),
		}
	}

	/// All stored rows, in insertion order
	pub fn rows(&self) -> &[Row] {
		&self.rows
	}

	fn position(&self, key: &Value) -> Option<usize> {
		self.rows
			.iter()
			.position(|row| row.get(&self.identifier).is_some_and(|id| same_key(id, key)))
	}

	fn next_identifier(&self) -> GridResult<Value> {
		let max = self
			.rows
			.iter()
			.filter_map(|row| row.get(&self.identifier).and_then(Value::as_i64))
			.max()
			.unwrap_or(0);
		let next = max.checked_add(1).ok_or_else(|| {
			GridError::DataSource(anyhow::anyhow!(
				"Identifier space of {} is exhausted",
				self.identifier
			))
		})?;
		Ok(Value::from(next))
	}

	fn not_found(&self, key: &Value) -> GridError {
		GridError::DataSource(anyhow::anyhow!(
			"No row with {} = {}",
			self.identifier,
			key
		))
	}
}

impl DataSource for MemoryDataSource {
	fn load_columns(&self) -> Vec<Column> {
		self.columns.clone()
	}

	fn set_identifier_field_name(&mut self, name: &str) {
		self.identifier = name.to_string();
	}

	fn find(&self, key: &Value) -> GridResult<Option<Row>> {
		Ok(self.position(key).map(|index| self.rows[index].clone()))
	}

	fn prepare(&mut self, order: Option<&OrderClause>, filters: &FilterSet) -> GridResult<()> {
		let active: Vec<&Filter> = filters.values().filter(|f| f.is_active()).collect();

		let mut prepared: Vec<Row> = self
			.rows
			.iter()
			.filter(|row| active.iter().all(|filter| matches(row, filter)))
			.cloned()
			.collect();

		if let Some(order) = order {
			prepared.sort_by(|a, b| {
				let ordering = compare(
					a.get(&order.column).unwrap_or(&Value::Null),
					b.get(&order.column).unwrap_or(&Value::Null),
				);
				match order.direction {
					SortDirection::Ascending => ordering,
					SortDirection::Descending => ordering.reverse(),
				}
			});
		}

		tracing::debug!(
			rows = self.rows.len(),
			matched = prepared.len(),
			filters = active.len(),
			"prepared in-memory rows"
		);
		self.prepared = prepared;
		Ok(())
	}

	fn paginator_adapter(&self) -> GridResult<Box<dyn PaginatorAdapter>> {
		Ok(Box::new(MemoryAdapter::new(self.prepared.clone())))
	}

	fn insert(&mut self, mut data: Row) -> GridResult<Value> {
		let existing = data
			.get(&self.identifier)
			.filter(|id| !id.is_null())
			.cloned();
		let id = match existing {
			Some(id) => {
				if self.position(&id).is_some() {
					return Err(GridError::DataSource(anyhow::anyhow!(
						"Duplicate {} = {}",
						self.identifier,
						id
					)));
				}
				id
			}
			None => {
				let id = self.next_identifier()?;
				data.insert(self.identifier.clone(), id.clone());
				id
			}
		};
		self.rows.push(data);
		Ok(id)
	}

	fn update(&mut self, data: Row, key: &Value) -> GridResult<Value> {
		let index = self.position(key).ok_or_else(|| self.not_found(key))?;
		let row = &mut self.rows[index];
		for (field, value) in data {
			row.insert(field, value);
		}
		Ok(row.get(&self.identifier).cloned().unwrap_or_else(|| key.clone()))
	}

	fn delete(&mut self, key: &Value) -> GridResult<()> {
		let index = self.position(key).ok_or_else(|| self.not_found(key))?;
		self.rows.remove(index);
		Ok(())
	}
}

/// Paginator adapter over an owned list of rows
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
	rows: Vec<Row>,
}

impl MemoryAdapter {
	/// Wraps a list of rows
	pub fn new(rows: Vec<Row>) -> Self {
		Self { rows }
	}
}

impl PaginatorAdapter for MemoryAdapter {
	fn count(&self) -> usize {
		self.rows.len()
	}

	fn items(&self, offset: usize, limit: usize) -> GridResult<PageItems> {
		Ok(PageItems::List(
			self.rows.iter().skip(offset).take(limit).cloned().collect(),
		))
	}
}

// Identifiers from requests arrive as strings
fn same_key(id: &Value, key: &Value) -> bool {
	id == key || text(id).is_some_and(|id| text(key).is_some_and(|key| id == key))
}

fn text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

fn rank(value: &Value) -> u8 {
	match value {
		Value::Null => 0,
		Value::Bool(_) => 1,
		Value::Number(_) => 2,
		Value::String(_) => 3,
		Value::Array(_) => 4,
		Value::Object(_) => 5,
	}
}

/// Total order over JSON scalars; nulls first, mixed types by kind
fn compare(a: &Value, b: &Value) -> Ordering {
	match (a, b) {
		(Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
			(Some(x), Some(y)) => x.cmp(&y),
			_ => x
				.as_f64()
				.unwrap_or(f64::NAN)
				.total_cmp(&y.as_f64().unwrap_or(f64::NAN)),
		},
		(Value::String(x), Value::String(y)) => x.cmp(y),
		(Value::Bool(x), Value::Bool(y)) => x.cmp(y),
		_ => rank(a).cmp(&rank(b)),
	}
}

fn matches(row: &Row, filter: &Filter) -> bool {
	let (Some(field), Some(value)) = (filter.field(), filter.value()) else {
		return true;
	};
	let Some(actual) = row.get(field) else {
		return false;
	};

	match filter.operator() {
		FilterOperator::Equals => match value {
			FilterValue::Text(expected) => text(actual).is_some_and(|t| &t == expected),
			other => compare(actual, &other.to_json()) == Ordering::Equal,
		},
		FilterOperator::Contains => text(actual).is_some_and(|t| {
			t.to_lowercase()
				.contains(&value.to_string().to_lowercase())
		}),
		FilterOperator::StartsWith => text(actual).is_some_and(|t| {
			t.to_lowercase()
				.starts_with(&value.to_string().to_lowercase())
		}),
		FilterOperator::GreaterOrEqual => comparable(actual, value)
			.is_some_and(|ordering| ordering != Ordering::Less),
		FilterOperator::LessOrEqual => comparable(actual, value)
			.is_some_and(|ordering| ordering != Ordering::Greater),
	}
}

// Ordering of `actual` against a filter value, when both are of the same kind
fn comparable(actual: &Value, value: &FilterValue) -> Option<Ordering> {
	let expected = value.to_json();
	(rank(actual) == rank(&expected)).then(|| compare(actual, &expected))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::filter::ValueType;
	use serde_json::json;

	fn source() -> MemoryDataSource {
		MemoryDataSource::new(
			vec![Column::new("id"), Column::new("name"), Column::new("age")],
			vec![
				json!({"id": 1, "name": "Alice", "age": 31}),
				json!({"id": 2, "name": "bob", "age": 25}),
				json!({"id": 3, "name": "Carol", "age": 40}),
				json!("not a row"),
			],
		)
	}

	fn filter(name: &str, operator: FilterOperator, value: FilterValue) -> Filter {
		let mut filter = Filter::new().with_name(name).with_operator(operator);
		filter.set_value(Some(value));
		filter
	}

	fn prepared_ids(source: &mut MemoryDataSource, order: Option<&OrderClause>, filters: &FilterSet) -> Vec<i64> {
		source.prepare(order, filters).unwrap();
		source
			.paginator_adapter()
			.unwrap()
			.items(0, 100)
			.unwrap()
			.into_rows()
			.unwrap()
			.iter()
			.map(|row| row["id"].as_i64().unwrap())
			.collect()
	}

	#[test]
	fn test_skips_non_object_rows() {
		assert_eq!(source().rows().len(), 3);
	}

	#[test]
	fn test_orders_rows() {
		let mut source = source();
		let order = OrderClause {
			column: "age".to_string(),
			direction: SortDirection::Descending,
		};
		assert_eq!(prepared_ids(&mut source, Some(&order), &FilterSet::new()), vec![3, 1, 2]);
	}

	#[test]
	fn test_filters_rows() {
		let mut source = source();
		let mut filters = FilterSet::new();
		filters.insert(
			"age".to_string(),
			filter("age", FilterOperator::GreaterOrEqual, FilterValue::Integer(31)),
		);
		filters.insert(
			"name".to_string(),
			filter("name", FilterOperator::Contains, FilterValue::Text("a".to_string())),
		);
		assert_eq!(prepared_ids(&mut source, None, &filters), vec![1, 3]);
	}

	#[test]
	fn test_inactive_filters_are_ignored() {
		let mut source = source();
		let mut filters = FilterSet::new();
		filters.insert(
			"age".to_string(),
			Filter::new().with_name("age").with_value_type(ValueType::Integer),
		);
		assert_eq!(prepared_ids(&mut source, None, &filters), vec![1, 2, 3]);
	}

	#[test]
	fn test_insert_assigns_next_identifier() {
		let mut source = source();
		let mut row = Row::new();
		row.insert("name".to_string(), json!("Dave"));

		assert_eq!(source.insert(row).unwrap(), json!(4));
		assert_eq!(source.find(&json!(4)).unwrap().unwrap()["name"], json!("Dave"));
	}

	#[test]
	fn test_insert_fails_when_identifiers_are_exhausted() {
		let mut source = MemoryDataSource::new(
			vec![Column::new("id")],
			vec![json!({"id": i64::MAX})],
		);

		assert!(matches!(source.insert(Row::new()), Err(GridError::DataSource(_))));
		assert_eq!(source.rows().len(), 1);
	}

	#[test]
	fn test_filter_matches_its_bound_column() {
		let mut source = source();
		let mut filter = filter("min_age", FilterOperator::GreaterOrEqual, FilterValue::Integer(31));
		filter.set_column("age");
		let mut filters = FilterSet::new();
		filters.insert("min_age".to_string(), filter);

		assert_eq!(prepared_ids(&mut source, None, &filters), vec![1, 3]);
	}

	#[test]
	fn test_string_keys_match_numeric_identifiers() {
		let source = source();
		assert!(source.find(&json!("2")).unwrap().is_some());
	}

	#[test]
	fn test_update_and_delete_unknown_key_fail() {
		let mut source = source();
		assert!(matches!(
			source.update(Row::new(), &json!(99)),
			Err(GridError::DataSource(_))
		));
		assert!(matches!(source.delete(&json!(99)), Err(GridError::DataSource(_))));
	}
}
