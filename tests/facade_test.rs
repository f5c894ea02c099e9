use datagrid::prelude::*;
use rstest::*;
use serde_json::json;

#[fixture]
fn manager() -> Manager {
	let source = MemoryDataSource::new(
		vec![
			Column::new("id").with_label("#"),
			Column::new("city").with_label("City"),
		],
		vec![
			json!({"id": 1, "city": "Lyon"}),
			json!({"id": 2, "city": "Oslo"}),
			json!({"id": 3, "city": "Osaka"}),
		],
	);
	let mut grid = DataGrid::new(Box::new(source), GridOptions::default()).unwrap();
	grid.add_filter(Filter::new().with_operator(FilterOperator::Contains), "city")
		.unwrap();

	let request = RequestSnapshot::from_query_str("city=Os&order=city~asc").unwrap();
	Manager::new(grid, request)
}

#[rstest]
fn test_prelude_covers_a_filtered_listing(mut manager: Manager) {
	manager.apply_filters();
	manager.set_renderer(JsonRenderer::new());

	let body: serde_json::Value = serde_json::from_str(&manager.render().unwrap()).unwrap();

	let cities: Vec<&str> = body["data"]
		.as_array()
		.unwrap()
		.iter()
		.map(|row| row["city"].as_str().unwrap())
		.collect();
	assert_eq!(cities, vec!["Osaka", "Oslo"]);
	assert_eq!(body["grid"]["current_order_direction"], json!("asc"));
}

#[cfg(feature = "templates")]
#[rstest]
fn test_templates_feature_renders_html(mut manager: Manager) {
	manager.set_renderer(TeraRenderer::new().unwrap());

	let html = manager.render().unwrap();

	assert!(html.contains("<table"));
	assert!(html.contains("Lyon"));
}
