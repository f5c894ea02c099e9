//! Sort directions, sort tokens and order clauses

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between column name and direction in a sort token
pub const SORT_TOKEN_SEPARATOR: char = '~';

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
	/// Ascending order
	#[default]
	#[serde(rename = "asc", alias = "ascending")]
	Ascending,
	/// Descending order
	#[serde(rename = "desc", alias = "descending")]
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Short form used in sort tokens and order clauses
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Ascending => "asc",
			Self::Descending => "desc",
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a direction is neither ascending nor descending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown sort direction `{}`", self.0)
	}
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for SortDirection {
	type Err = ParseDirectionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"asc" | "ascending" => Ok(Self::Ascending),
			"desc" | "descending" => Ok(Self::Descending),
			_ => Err(ParseDirectionError(s.to_string())),
		}
	}
}

/// A parsed `"<column>~<direction>"` sort token
///
/// # Examples
///
/// ```
/// use datagrid_core::{SortDirection, SortToken};
///
/// let token = SortToken::parse("price~asc").unwrap();
/// assert_eq!(token.column, "price");
/// assert_eq!(token.direction, SortDirection::Ascending);
///
/// assert!(SortToken::parse("price").is_none());
/// assert!(SortToken::parse("price~sideways").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortToken {
	/// Column name
	pub column: String,
	/// Requested direction
	pub direction: SortDirection,
}

impl SortToken {
	/// Parses a sort token, returning `None` when it is malformed
	pub fn parse(token: &str) -> Option<Self> {
		let (column, direction) = token.split_once(SORT_TOKEN_SEPARATOR)?;
		if column.is_empty() {
			return None;
		}
		let direction = direction.parse().ok()?;
		Some(Self {
			column: column.to_string(),
			direction,
		})
	}

	/// Builds a token for `column` and `direction`
	pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			column: column.into(),
			direction,
		}
	}
}

impl fmt::Display for SortToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}{}", self.column, SORT_TOKEN_SEPARATOR, self.direction)
	}
}

/// Order clause handed to the data source when preparing a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderClause {
	/// Column to order by
	pub column: String,
	/// Direction
	pub direction: SortDirection,
}

impl fmt::Display for OrderClause {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.column, self.direction)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_direction_parsing_is_case_insensitive() {
		assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Ascending));
		assert_eq!("Descending".parse::<SortDirection>(), Ok(SortDirection::Descending));
		assert!("up".parse::<SortDirection>().is_err());
	}

	#[test]
	fn test_token_rejects_extra_separator_and_empty_column() {
		assert!(SortToken::parse("price~asc~x").is_none());
		assert!(SortToken::parse("~asc").is_none());
		assert!(SortToken::parse("").is_none());
	}

	#[test]
	fn test_token_display_roundtrip() {
		let token = SortToken::new("id", SortDirection::Descending);
		assert_eq!(token.to_string(), "id~desc");
		assert_eq!(SortToken::parse(&token.to_string()), Some(token));
	}

	#[test]
	fn test_order_clause_display() {
		let clause = OrderClause {
			column: "price".to_string(),
			direction: SortDirection::Ascending,
		};
		assert_eq!(clause.to_string(), "price asc");
	}

	#[test]
	fn test_toggle() {
		assert_eq!(SortDirection::Ascending.toggle(), SortDirection::Descending);
		assert_eq!(SortDirection::Descending.toggle(), SortDirection::Ascending);
	}
}
