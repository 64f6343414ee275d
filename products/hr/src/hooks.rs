//! Callbacks run after an employee record has been written.
//!
//! Hooks are registered explicitly on a [`SaveHooks`] list and invoked in
//! registration order, once per successful insert or update. They observe the
//! saved row only; they cannot fail the write.

use std::{fmt, sync::Arc};

use entity::employee;
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SaveAction {
    Insert,
    Update,
}

#[derive(Clone, Copy, Debug)]
pub struct SaveEvent<'a> {
    pub employee: &'a employee::Model,
    pub action: SaveAction,
}

impl SaveEvent<'_> {
    pub fn created(&self) -> bool {
        self.action == SaveAction::Insert
    }
}

pub trait SaveHook: Send + Sync {
    fn after_save(&self, event: &SaveEvent<'_>);
}

impl<F> SaveHook for F
where
    F: Fn(&SaveEvent<'_>) + Send + Sync,
{
    fn after_save(&self, event: &SaveEvent<'_>) {
        self(event)
    }
}

/// Emits one debug line per saved employee.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSavedEmployee;

impl SaveHook for LogSavedEmployee {
    fn after_save(&self, event: &SaveEvent<'_>) {
        debug!(
            employee_id = event.employee.id,
            created = event.created(),
            "employee details saved through the save hook"
        );
    }
}

#[derive(Clone)]
pub struct SaveHooks {
    hooks: Vec<Arc<dyn SaveHook>>,
}

impl SaveHooks {
    /// A list with no hooks, not even the logger.
    pub fn empty() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn register<H>(&mut self, hook: H) -> &mut Self
    where
        H: SaveHook + 'static,
    {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub(crate) fn dispatch(&self, employee: &employee::Model, action: SaveAction) {
        let event = SaveEvent { employee, action };
        for hook in &self.hooks {
            hook.after_save(&event);
        }
    }
}

impl Default for SaveHooks {
    fn default() -> Self {
        let mut hooks = Self::empty();
        hooks.register(LogSavedEmployee);
        hooks
    }
}

impl fmt::Debug for SaveHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveHooks")
            .field("len", &self.hooks.len())
            .finish()
    }
}
