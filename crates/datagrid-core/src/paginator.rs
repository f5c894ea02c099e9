//! Pagination of data source results
//!
//! Data sources hand the grid a [`PaginatorAdapter`]; the [`Paginator`] asks
//! it for the total count and for the items of the current page, and works out
//! the page numbers a listing should link to.

use crate::error::{GridError, GridResult};
use crate::source::Row;
use serde::Serialize;
use serde_json::Value;

/// A result set that can be converted into rows
pub trait ResultSet {
	/// Consumes the result set, returning its rows in order
	fn into_rows(self: Box<Self>) -> Vec<Row>;
}

impl ResultSet for Vec<Row> {
	fn into_rows(self: Box<Self>) -> Vec<Row> {
		*self
	}
}

/// Items of one page as returned by an adapter
pub enum PageItems {
	/// A plain list of rows
	List(Vec<Row>),
	/// A result set convertible into rows
	ResultSet(Box<dyn ResultSet>),
	/// An iterator of rows
	Iter(Box<dyn Iterator<Item = Row>>),
	/// Any other value; only an array of objects is accepted
	Value(Value),
}

impl std::fmt::Debug for PageItems {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::List(rows) => f.debug_tuple("List").field(&rows.len()).finish(),
			Self::ResultSet(_) => f.write_str("ResultSet(..)"),
			Self::Iter(_) => f.write_str("Iter(..)"),
			Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
		}
	}
}

impl PageItems {
	/// Normalizes the items into a list of rows
	///
	/// Fails with [`GridError::UnsupportedPaginatorResult`] for any
	/// [`PageItems::Value`] that is not an array of objects.
	pub fn into_rows(self) -> GridResult<Vec<Row>> {
		match self {
			Self::List(rows) => Ok(rows),
			Self::ResultSet(set) => Ok(set.into_rows()),
			Self::Iter(iter) => Ok(iter.collect()),
			Self::Value(Value::Array(items)) => items
				.into_iter()
				.map(|item| match item {
					Value::Object(row) => Ok(row),
					other => Err(GridError::UnsupportedPaginatorResult {
						type_name: format!("array of {}", json_type_name(&other)),
					}),
				})
				.collect(),
			Self::Value(other) => Err(GridError::UnsupportedPaginatorResult {
				type_name: json_type_name(&other).to_string(),
			}),
		}
	}
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Source of paginated items
pub trait PaginatorAdapter {
	/// Total number of items across all pages
	fn count(&self) -> usize;

	/// Items starting at `offset`, at most `limit` of them
	fn items(&self, offset: usize, limit: usize) -> GridResult<PageItems>;
}

/// Snapshot of pagination state after a fetch, ready for templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginatorState {
	/// Current page (1-indexed)
	pub current: usize,
	/// Number of pages
	pub page_count: usize,
	/// First page
	pub first: usize,
	/// Last page
	pub last: usize,
	/// Previous page, if any
	pub previous: Option<usize>,
	/// Next page, if any
	pub next: Option<usize>,
	/// Page numbers to link to around the current page
	pub pages_in_range: Vec<usize>,
	/// First page number in range
	pub first_page_in_range: usize,
	/// Last page number in range
	pub last_page_in_range: usize,
	/// Items per page
	pub item_count_per_page: usize,
	/// Items on the current page
	pub current_item_count: usize,
	/// Items across all pages
	pub total_item_count: usize,
	/// 1-indexed number of the first item on this page (0 when empty)
	pub first_item_number: usize,
	/// 1-indexed number of the last item on this page (0 when empty)
	pub last_item_number: usize,
}

/// Paginator over an adapter
///
/// # Examples
///
/// ```
/// use datagrid_core::paginator::{PageItems, Paginator, PaginatorAdapter};
/// use datagrid_core::{GridResult, Row};
///
/// struct Numbers(usize);
///
/// impl PaginatorAdapter for Numbers {
///     fn count(&self) -> usize {
///         self.0
///     }
///
///     fn items(&self, offset: usize, limit: usize) -> GridResult<PageItems> {
///         let end = (offset + limit).min(self.0);
///         Ok(PageItems::List((offset..end).map(|_| Row::new()).collect()))
///     }
/// }
///
/// let mut paginator = Paginator::new(Box::new(Numbers(45)));
/// paginator.set_item_count_per_page(10);
/// paginator.set_current_page_number(3);
///
/// assert_eq!(paginator.page_count(), 5);
/// assert_eq!(paginator.current_items().unwrap().into_rows().unwrap().len(), 10);
/// ```
pub struct Paginator {
	adapter: Box<dyn PaginatorAdapter>,
	current_page: usize,
	item_count_per_page: usize,
	page_range: usize,
}

impl Paginator {
	/// Default items per page
	pub const DEFAULT_ITEM_COUNT_PER_PAGE: usize = 10;
	/// Default page range
	pub const DEFAULT_PAGE_RANGE: usize = 10;

	/// Creates a paginator on page 1
	pub fn new(adapter: Box<dyn PaginatorAdapter>) -> Self {
		Self {
			adapter,
			current_page: 1,
			item_count_per_page: Self::DEFAULT_ITEM_COUNT_PER_PAGE,
			page_range: Self::DEFAULT_PAGE_RANGE,
		}
	}

	/// Sets the requested page; 0 is treated as 1
	pub fn set_current_page_number(&mut self, page: usize) -> &mut Self {
		self.current_page = page.max(1);
		self
	}

	/// Sets items per page; 0 is treated as 1
	pub fn set_item_count_per_page(&mut self, count: usize) -> &mut Self {
		self.item_count_per_page = count.max(1);
		self
	}

	/// Sets how many page numbers to show around the current page; 0 is treated as 1
	pub fn set_page_range(&mut self, range: usize) -> &mut Self {
		self.page_range = range.max(1);
		self
	}

	/// Total item count reported by the adapter
	pub fn total_item_count(&self) -> usize {
		self.adapter.count()
	}

	/// Number of pages
	pub fn page_count(&self) -> usize {
		self.total_item_count().div_ceil(self.item_count_per_page)
	}

	/// Current page clamped into `1..=page_count`
	pub fn current_page_number(&self) -> usize {
		self.current_page.min(self.page_count().max(1))
	}

	/// Items of the current page as returned by the adapter
	pub fn current_items(&self) -> GridResult<PageItems> {
		let offset = (self.current_page_number() - 1) * self.item_count_per_page;
		self.adapter.items(offset, self.item_count_per_page)
	}

	/// Sliding window of page numbers centred on the current page
	pub fn pages_in_range(&self) -> Vec<usize> {
		sliding_range(self.current_page_number(), self.page_count(), self.page_range)
	}

	/// State snapshot; `current_item_count` is the number of rows actually fetched
	pub fn state(&self, current_item_count: usize) -> PaginatorState {
		let total = self.total_item_count();
		let page_count = self.page_count();
		let current = self.current_page_number();
		let pages_in_range = self.pages_in_range();
		let offset = (current - 1) * self.item_count_per_page;

		let (first_item_number, last_item_number) = if current_item_count == 0 {
			(0, 0)
		} else {
			(offset + 1, offset + current_item_count)
		};

		PaginatorState {
			current,
			page_count,
			first: 1,
			last: page_count.max(1),
			previous: (current > 1).then(|| current - 1),
			next: (current < page_count).then(|| current + 1),
			first_page_in_range: pages_in_range.first().copied().unwrap_or(1),
			last_page_in_range: pages_in_range.last().copied().unwrap_or(1),
			pages_in_range,
			item_count_per_page: self.item_count_per_page,
			current_item_count,
			total_item_count: total,
			first_item_number,
			last_item_number,
		}
	}
}

/// Sliding page window: `range` pages around `current`, kept inside `1..=page_count`
pub(crate) fn sliding_range(current: usize, page_count: usize, range: usize) -> Vec<usize> {
	if page_count == 0 {
		return Vec::new();
	}

	let range = range.clamp(1, page_count);
	let delta = range.div_ceil(2);

	let (lower, upper) = if current.saturating_sub(delta) > page_count - range {
		(page_count - range + 1, page_count)
	} else {
		let offset = current.saturating_sub(delta);
		(offset + 1, offset + range)
	};

	(lower..=upper).collect()
}
