//! Error types for the grid manager

use datagrid_core::GridError;
use datagrid_forms::FormError;
use std::fmt;

/// Operations guarded by a manager permission flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
	/// Inserting rows
	Create,
	/// Updating rows
	Edit,
	/// Deleting rows
	Delete,
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Create => "create",
			Self::Edit => "edit",
			Self::Delete => "delete",
		})
	}
}

/// Errors raised by [`Manager`](crate::Manager)
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
	/// An action descriptor is missing a required key or has a mistyped one
	#[error("Invalid action '{name}': {reason}")]
	InvalidAction {
		/// Action name
		name: String,
		/// What is wrong with the descriptor
		reason: String,
	},

	/// The operation is disabled on this manager
	#[error("Permission denied: {0} is not allowed")]
	PermissionDenied(Permission),

	/// [`Manager::render`](crate::Manager::render) was called without a renderer
	#[error("No renderer set")]
	MissingRenderer,

	/// The renderer failed
	#[error("Render error: {0}")]
	Render(String),

	/// The request query string could not be parsed
	#[error("Invalid request query: {0}")]
	InvalidRequest(String),

	/// Manager options could not be parsed
	#[error("Invalid manager options: {0}")]
	InvalidOptions(String),

	/// Grid error
	#[error(transparent)]
	Grid(#[from] GridError),

	/// Form error
	#[error(transparent)]
	Form(#[from] FormError),
}

/// Result alias for manager operations
pub type ManagerResult<T> = Result<T, ManagerError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_messages() {
		assert_eq!(
			ManagerError::PermissionDenied(Permission::Delete).to_string(),
			"Permission denied: delete is not allowed"
		);
		assert_eq!(
			ManagerError::from(GridError::UnknownColumn("x".to_string())).to_string(),
			"Column 'x' doesn't exist in column list."
		);
	}
}
