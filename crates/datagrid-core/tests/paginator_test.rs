use datagrid_core::paginator::{PageItems, Paginator, PaginatorAdapter};
use datagrid_core::{GridResult, MemoryAdapter, Row};
use proptest::prelude::*;
use rstest::*;
use serde_json::json;

fn numbered(total: usize) -> Vec<Row> {
	(0..total)
		.map(|n| {
			let mut row = Row::new();
			row.insert("n".to_string(), json!(n));
			row
		})
		.collect()
}

fn paginator(total: usize, per_page: usize, page: usize, range: usize) -> Paginator {
	let mut paginator = Paginator::new(Box::new(MemoryAdapter::new(numbered(total))));
	paginator
		.set_item_count_per_page(per_page)
		.set_current_page_number(page)
		.set_page_range(range);
	paginator
}

#[rstest]
#[case::first_page(1, vec![1, 2, 3, 4, 5])]
#[case::centred(6, vec![4, 5, 6, 7, 8])]
#[case::near_end(9, vec![6, 7, 8, 9, 10])]
#[case::last_page(10, vec![6, 7, 8, 9, 10])]
fn test_window_slides_with_current_page(#[case] page: usize, #[case] expected: Vec<usize>) {
	let paginator = paginator(100, 10, page, 5);
	assert_eq!(paginator.pages_in_range(), expected);
}

#[rstest]
fn test_adapter_can_return_iterators() {
	struct Counting;

	impl PaginatorAdapter for Counting {
		fn count(&self) -> usize {
			7
		}

		fn items(&self, offset: usize, limit: usize) -> GridResult<PageItems> {
			Ok(PageItems::Iter(Box::new(
				numbered(7).into_iter().skip(offset).take(limit),
			)))
		}
	}

	let mut paginator = Paginator::new(Box::new(Counting));
	paginator.set_item_count_per_page(5).set_current_page_number(2);

	let rows = paginator.current_items().unwrap().into_rows().unwrap();
	assert_eq!(rows.len(), 2);
	assert_eq!(rows[0]["n"], json!(5));
}

proptest! {
	#[test]
	fn prop_window_is_bounded_and_contains_current(
		total in 0usize..500,
		per_page in 1usize..50,
		page in 0usize..60,
		range in 1usize..20,
	) {
		let paginator = paginator(total, per_page, page, range);
		let page_count = paginator.page_count();
		let window = paginator.pages_in_range();

		if page_count == 0 {
			prop_assert!(window.is_empty());
		} else {
			let current = paginator.current_page_number();
			prop_assert!(window.contains(&current));
			prop_assert_eq!(window.len(), range.min(page_count));
			prop_assert!(window.iter().all(|p| (1..=page_count).contains(p)));
			prop_assert!(window.windows(2).all(|w| w[1] == w[0] + 1));
		}
	}

	#[test]
	fn prop_state_item_numbers_match_page(
		total in 0usize..300,
		per_page in 1usize..40,
		page in 1usize..20,
	) {
		let paginator = paginator(total, per_page, page, 10);
		let fetched = paginator.current_items().unwrap().into_rows().unwrap().len();
		let state = paginator.state(fetched);

		prop_assert!(fetched <= per_page);
		prop_assert_eq!(state.total_item_count, total);
		if fetched > 0 {
			prop_assert_eq!(state.last_item_number - state.first_item_number + 1, fetched);
			prop_assert!(state.last_item_number <= total);
		}
	}
}
