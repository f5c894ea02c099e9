use datagrid_core::paginator::{PageItems, PaginatorAdapter, ResultSet};
use datagrid_core::{
	Column, DataGrid, DataSource, FilterSet, GridError, GridHooks, GridOptions, GridResult,
	MemoryDataSource, OrderClause, Row,
};
use rstest::*;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::Rc;

/// Shape the adapter hands back for the current page
#[derive(Debug, Clone, Copy)]
enum Shape {
	List,
	ResultSet,
	Iter,
	JsonArray,
	JsonObject,
	JsonArrayOfNumbers,
}

struct Cursor(Vec<Row>);

impl ResultSet for Cursor {
	fn into_rows(self: Box<Self>) -> Vec<Row> {
		self.0
	}
}

struct ShapedAdapter {
	shape: Shape,
	rows: Vec<Row>,
}

impl PaginatorAdapter for ShapedAdapter {
	fn count(&self) -> usize {
		self.rows.len()
	}

	fn items(&self, offset: usize, limit: usize) -> GridResult<PageItems> {
		let rows: Vec<Row> = self.rows.iter().skip(offset).take(limit).cloned().collect();
		Ok(match self.shape {
			Shape::List => PageItems::List(rows),
			Shape::ResultSet => PageItems::ResultSet(Box::new(Cursor(rows))),
			Shape::Iter => PageItems::Iter(Box::new(rows.into_iter())),
			Shape::JsonArray => PageItems::Value(Value::Array(
				rows.into_iter().map(Value::Object).collect(),
			)),
			Shape::JsonObject => PageItems::Value(json!({"rows": rows})),
			Shape::JsonArrayOfNumbers => PageItems::Value(json!([1, 2, 3])),
		})
	}
}

/// Records every call the grid makes
#[derive(Default)]
struct Calls {
	prepared: Vec<(Option<String>, usize)>,
	inserted: Vec<Row>,
	updated: Vec<(Row, Value)>,
	identifier: Option<String>,
}

struct ShapedSource {
	shape: Shape,
	rows: Vec<Row>,
	calls: Rc<RefCell<Calls>>,
}

impl DataSource for ShapedSource {
	fn load_columns(&self) -> Vec<Column> {
		vec![Column::new("id"), Column::new("title")]
	}

	fn set_identifier_field_name(&mut self, name: &str) {
		self.calls.borrow_mut().identifier = Some(name.to_string());
	}

	fn find(&self, key: &Value) -> GridResult<Option<Row>> {
		Ok(self.rows.iter().find(|row| row.get("id") == Some(key)).cloned())
	}

	fn prepare(&mut self, order: Option<&OrderClause>, filters: &FilterSet) -> GridResult<()> {
		self.calls
			.borrow_mut()
			.prepared
			.push((order.map(ToString::to_string), filters.len()));
		Ok(())
	}

	fn paginator_adapter(&self) -> GridResult<Box<dyn PaginatorAdapter>> {
		Ok(Box::new(ShapedAdapter {
			shape: self.shape,
			rows: self.rows.clone(),
		}))
	}

	fn insert(&mut self, data: Row) -> GridResult<Value> {
		self.calls.borrow_mut().inserted.push(data);
		Ok(json!(100))
	}

	fn update(&mut self, data: Row, key: &Value) -> GridResult<Value> {
		self.calls.borrow_mut().updated.push((data, key.clone()));
		Ok(key.clone())
	}

	fn delete(&mut self, _key: &Value) -> GridResult<()> {
		Err(GridError::DataSource(anyhow::anyhow!("read-only source")))
	}
}

fn row(id: i64, title: &str) -> Row {
	let mut row = Row::new();
	row.insert("id".to_string(), json!(id));
	row.insert("title".to_string(), json!(title));
	row
}

#[fixture]
fn calls() -> Rc<RefCell<Calls>> {
	Rc::new(RefCell::new(Calls::default()))
}

fn shaped_grid(shape: Shape, calls: &Rc<RefCell<Calls>>) -> DataGrid {
	let source = ShapedSource {
		shape,
		rows: vec![row(1, "first"), row(2, "second"), row(3, "third")],
		calls: Rc::clone(calls),
	};
	DataGrid::new(Box::new(source), GridOptions::default()).unwrap()
}

#[rstest]
#[case::list(Shape::List)]
#[case::result_set(Shape::ResultSet)]
#[case::iterator(Shape::Iter)]
#[case::json_array(Shape::JsonArray)]
fn test_supported_shapes_are_normalized(calls: Rc<RefCell<Calls>>, #[case] shape: Shape) {
	let mut grid = shaped_grid(shape, &calls);

	let rows = grid.get_data().unwrap();

	assert_eq!(rows.to_vec(), vec![row(1, "first"), row(2, "second"), row(3, "third")]);
	assert_eq!(grid.data().len(), 3);
}

#[rstest]
#[case::object(Shape::JsonObject, "object")]
#[case::array_of_numbers(Shape::JsonArrayOfNumbers, "array of number")]
fn test_unsupported_shapes_fail(
	calls: Rc<RefCell<Calls>>,
	#[case] shape: Shape,
	#[case] expected: &str,
) {
	let mut grid = shaped_grid(shape, &calls);

	let err = grid.get_data().unwrap_err();

	assert!(
		matches!(err, GridError::UnsupportedPaginatorResult { ref type_name } if type_name == expected)
	);
	assert!(grid.paginator().is_none());
}

#[rstest]
fn test_prepare_receives_order_clause(calls: Rc<RefCell<Calls>>) {
	let mut grid = shaped_grid(Shape::List, &calls);
	grid.get_data().unwrap();
	grid.set_order("title~desc");
	grid.get_data().unwrap();

	assert_eq!(
		calls.borrow().prepared,
		vec![(None, 0), (Some("title desc".to_string()), 0)]
	);
}

#[rstest]
fn test_identifier_is_propagated(calls: Rc<RefCell<Calls>>) {
	let mut grid = shaped_grid(Shape::List, &calls);
	assert_eq!(calls.borrow().identifier.as_deref(), Some("id"));

	grid.set_identifier_column_name("uuid");
	assert_eq!(calls.borrow().identifier.as_deref(), Some("uuid"));
}

#[rstest]
fn test_save_without_key_inserts_hook_mutated_data(calls: Rc<RefCell<Calls>>) {
	let mut grid = shaped_grid(Shape::List, &calls);
	let seen = Rc::new(RefCell::new(Vec::new()));

	grid.hooks_mut().persist_pre.connect(|data: &mut Row| {
		data.insert("slug".to_string(), json!("new-title"));
	});
	let log = Rc::clone(&seen);
	grid.hooks_mut().persist_post.connect(move |event| {
		log.borrow_mut()
			.push((event.id.clone(), event.created, event.data.contains_key("slug")));
	});

	let id = grid.save(row(0, "New title"), None).unwrap();

	assert_eq!(id, json!(100));
	let calls = calls.borrow();
	assert_eq!(calls.inserted.len(), 1);
	assert_eq!(calls.inserted[0]["slug"], json!("new-title"));
	assert!(calls.updated.is_empty());
	assert_eq!(seen.borrow().as_slice(), &[(json!(100), true, true)]);
}

#[rstest]
fn test_save_with_key_updates(calls: Rc<RefCell<Calls>>) {
	let mut grid = shaped_grid(Shape::List, &calls);
	let created = Rc::new(RefCell::new(None));
	let flag = Rc::clone(&created);
	grid.hooks_mut()
		.persist_post
		.connect(move |event| *flag.borrow_mut() = Some(event.created));

	let id = grid.save(row(2, "Renamed"), Some(&json!(2))).unwrap();

	assert_eq!(id, json!(2));
	assert!(calls.borrow().inserted.is_empty());
	assert_eq!(calls.borrow().updated[0].1, json!(2));
	assert_eq!(*created.borrow(), Some(false));
}

#[rstest]
fn test_data_source_errors_propagate(calls: Rc<RefCell<Calls>>) {
	let mut grid = shaped_grid(Shape::List, &calls);
	let err = grid.delete(&json!(1)).unwrap_err();
	assert_eq!(err.to_string(), "Data source error: read-only source");
}

#[rstest]
fn test_init_hook_sees_constructed_grid() {
	let mut hooks = GridHooks::default();
	hooks.init.connect(|grid: &mut DataGrid| {
		grid.set_caption(format!("{} columns", grid.columns().len()));
	});
	let source = MemoryDataSource::new(
		vec![Column::new("id"), Column::new("title")],
		vec![json!({"id": 1, "title": "a"})],
	);

	let mut grid = DataGrid::with_hooks(Box::new(source), GridOptions::default(), hooks).unwrap();

	assert_eq!(grid.caption(), "2 columns");
	assert_eq!(grid.hooks_mut().init.len(), 1);
}
