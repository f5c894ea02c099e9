//! Lifecycle hooks
//!
//! Hooks are plain callback lists invoked synchronously at fixed points of the
//! grid lifecycle. Receivers with a higher priority run first; receivers with
//! equal priority run in connection order.

use crate::grid::DataGrid;
use crate::source::Row;
use serde_json::Value;

type Receiver<T> = Box<dyn Fn(&mut T)>;

/// A list of receivers for payloads of type `T`
pub struct Hook<T: ?Sized> {
	name: &'static str,
	receivers: Vec<(i32, Receiver<T>)>,
}

impl<T: ?Sized> Hook<T> {
	/// Creates a hook without receivers
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			receivers: Vec::new(),
		}
	}

	/// Hook name, used in logs
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Connects a receiver with priority 0
	pub fn connect<F>(&mut self, receiver: F) -> &mut Self
	where
		F: Fn(&mut T) + 'static,
	{
		self.connect_with_priority(0, receiver)
	}

	/// Connects a receiver; higher priorities run first
	pub fn connect_with_priority<F>(&mut self, priority: i32, receiver: F) -> &mut Self
	where
		F: Fn(&mut T) + 'static,
	{
		// stable insert after every receiver with priority >= this one
		let index = self
			.receivers
			.iter()
			.position(|(p, _)| *p < priority)
			.unwrap_or(self.receivers.len());
		self.receivers.insert(index, (priority, Box::new(receiver)));
		self
	}

	/// Number of connected receivers
	pub fn len(&self) -> usize {
		self.receivers.len()
	}

	/// Whether no receiver is connected
	pub fn is_empty(&self) -> bool {
		self.receivers.is_empty()
	}

	/// Invokes every receiver with the payload
	pub fn send(&self, payload: &mut T) {
		if self.receivers.is_empty() {
			return;
		}
		tracing::debug!(hook = self.name, receivers = self.receivers.len(), "dispatching hook");
		for (_, receiver) in &self.receivers {
			receiver(payload);
		}
	}
}

impl<T: ?Sized> std::fmt::Debug for Hook<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Hook")
			.field("name", &self.name)
			.field("receivers", &self.receivers.len())
			.finish()
	}
}

/// Payload of [`GridHooks::persist_post`]
#[derive(Debug, Clone, PartialEq)]
pub struct PersistEvent {
	/// Data that was written, after `persist_pre` receivers ran
	pub data: Row,
	/// Identifier returned by the data source
	pub id: Value,
	/// Whether the row was inserted rather than updated
	pub created: bool,
}

/// Hooks fired by [`DataGrid`]
#[derive(Debug)]
pub struct GridHooks {
	/// After the grid is constructed and its options applied
	pub init: Hook<DataGrid>,
	/// Before a row is inserted or updated; receivers may modify the row
	pub persist_pre: Hook<Row>,
	/// After a row was inserted or updated
	pub persist_post: Hook<PersistEvent>,
}

impl Default for GridHooks {
	fn default() -> Self {
		Self {
			init: Hook::new("datagrid.grid.init"),
			persist_pre: Hook::new("datagrid.grid.persist.pre"),
			persist_post: Hook::new("datagrid.grid.persist.post"),
		}
	}
}
