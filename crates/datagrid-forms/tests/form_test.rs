use datagrid_forms::csrf::{self, CSRF_TOKEN_LENGTH};
use datagrid_forms::{ElementKind, Form, FormElement, FormError, SelectOption};
use rstest::*;
use serde_json::{Map, Value, json};

const SECRET: &str = "abcdefghijklmnopqrstuvwxyzABCDEF";

#[fixture]
fn form() -> Form {
	let mut form = Form::new("datagrid-form");
	form.add(FormElement::text("title").with_label("Title").required(true));
	form.add(FormElement::number("year").with_label("Year"));
	form.add(FormElement::select(
		"state",
		vec![
			SelectOption::new("draft", "Draft"),
			SelectOption::new("live", "Live"),
		],
	));
	form.add(FormElement::csrf("hash", csrf::mask_secret(SECRET)));
	form.add(FormElement::submit("submit", "Save"));
	form
}

fn submitted(pairs: &[(&str, Value)]) -> Map<String, Value> {
	pairs
		.iter()
		.map(|(k, v)| (k.to_string(), v.clone()))
		.collect()
}

#[rstest]
fn test_elements_keep_insertion_order(form: Form) {
	let names: Vec<&str> = form.elements().iter().map(FormElement::name).collect();
	assert_eq!(names, vec!["title", "year", "state", "hash", "submit"]);
}

#[rstest]
fn test_add_replaces_in_place(mut form: Form) {
	form.add(FormElement::textarea("year"));

	assert_eq!(form.len(), 5);
	assert_eq!(form.elements()[1].kind(), &ElementKind::Textarea);
}

#[rstest]
fn test_values_after_set_data(mut form: Form) {
	form.set_data(submitted(&[
		("title", json!("Dune")),
		("state", json!("live")),
		("hash", json!("ignored")),
	]));

	let values = form.values();
	assert_eq!(values.len(), 2);
	assert_eq!(values["title"], json!("Dune"));
	assert_eq!(values["state"], json!("live"));
	assert!(!values.contains_key("hash"));
}

#[rstest]
fn test_csrf_accepts_rendered_token(form: Form) {
	let token = form.csrf_element().unwrap().value().unwrap().clone();
	let data = submitted(&[("hash", token), ("title", json!("Dune"))]);

	assert!(form.validate_csrf(&data, SECRET).is_ok());
}

#[rstest]
fn test_csrf_accepts_any_fresh_mask(form: Form) {
	let data = submitted(&[("hash", json!(csrf::mask_secret(SECRET)))]);

	assert!(form.validate_csrf(&data, SECRET).is_ok());
}

#[rstest]
#[case::missing(vec![], "CSRF token missing.")]
#[case::short(vec![("hash", json!("abc"))], "CSRF token has incorrect length.")]
#[case::bad_chars(vec![("hash", json!("-".repeat(CSRF_TOKEN_LENGTH)))], "CSRF token has invalid characters.")]
#[case::not_a_string(vec![("hash", json!(42))], "CSRF token missing.")]
fn test_csrf_rejections(form: Form, #[case] pairs: Vec<(&str, Value)>, #[case] reason: &str) {
	let result = form.validate_csrf(&submitted(&pairs), SECRET);

	assert!(matches!(result, Err(FormError::CsrfValidationFailed(r)) if r == reason));
}

#[rstest]
fn test_csrf_rejects_token_of_another_session(form: Form) {
	let data = submitted(&[("hash", json!(csrf::mask_secret(&csrf::generate_secret())))]);

	assert!(matches!(
		form.validate_csrf(&data, SECRET),
		Err(FormError::CsrfValidationFailed(r)) if r == "CSRF token mismatch."
	));
}

#[rstest]
fn test_form_without_csrf_element_skips_check() {
	let mut form = Form::new("plain");
	form.add(FormElement::text("q"));

	assert!(form.validate_csrf(&Map::new(), SECRET).is_ok());
}

#[rstest]
fn test_serialized_shape(form: Form) {
	let value = serde_json::to_value(&form).unwrap();

	assert_eq!(value["name"], json!("datagrid-form"));
	let title = &value["elements"][0];
	assert_eq!(title["type"], json!("text"));
	assert_eq!(title["label"], json!("Title"));
	assert_eq!(title["required"], json!(true));
	assert!(title.get("value").is_none());

	let state = &value["elements"][2];
	assert_eq!(state["type"], json!("select"));
	assert_eq!(state["options"][1]["value"], json!("live"));
}
