//! Error types for grid operations

/// Errors raised by [`DataGrid`](crate::DataGrid) and its collaborators
///
/// All of these are programmer or collaborator errors. Bad user input, such as
/// a sort token naming a column that does not exist, is ignored instead of
/// being reported here.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
	/// A column with this name is already registered
	#[error("Column `{0}` already in a column list. Use another name.")]
	DuplicateColumn(String),

	/// No column with this name is registered
	#[error("Column '{0}' doesn't exist in column list.")]
	UnknownColumn(String),

	/// The paginator adapter returned items in a shape the grid cannot read
	#[error("The paginator returned a result of unsupported type: {type_name}. Should be a list, a result set or an iterator of rows")]
	UnsupportedPaginatorResult {
		/// Description of the returned shape
		type_name: String,
	},

	/// A raw filter value could not be converted to the filter's value type
	#[error("Invalid value `{value}` for filter '{filter}': expected {expected}")]
	InvalidFilterValue {
		/// Filter name
		filter: String,
		/// Raw value as received
		value: String,
		/// Expected value type
		expected: &'static str,
	},

	/// Grid options could not be parsed
	#[error("Invalid grid options: {0}")]
	InvalidOptions(String),

	/// The data source failed
	#[error("Data source error: {0}")]
	DataSource(#[from] anyhow::Error),
}

/// Result alias for grid operations
pub type GridResult<T> = Result<T, GridError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = GridError::DuplicateColumn("price".to_string());
		assert_eq!(
			err.to_string(),
			"Column `price` already in a column list. Use another name."
		);

		let err = GridError::UnknownColumn("bogus".to_string());
		assert_eq!(err.to_string(), "Column 'bogus' doesn't exist in column list.");

		let err = GridError::InvalidFilterValue {
			filter: "price".to_string(),
			value: "cheap".to_string(),
			expected: "integer",
		};
		assert_eq!(
			err.to_string(),
			"Invalid value `cheap` for filter 'price': expected integer"
		);
	}

	#[test]
	fn test_data_source_error_from_anyhow() {
		let err: GridError = anyhow::anyhow!("connection refused").into();
		assert!(matches!(err, GridError::DataSource(_)));
		assert_eq!(err.to_string(), "Data source error: connection refused");
	}
}
