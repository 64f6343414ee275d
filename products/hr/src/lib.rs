//! HR vertical slice: role vocabulary, staff records and save hooks.

mod employees;
mod error;
mod hooks;
mod roles;
mod staff;
pub mod validate;

pub use employees::{EmployeeChanges, NewEmployee};
pub use error::{StaffError, StaffResult};
pub use hooks::{LogSavedEmployee, SaveAction, SaveEvent, SaveHook, SaveHooks};
pub use roles::RoleInput;
pub use staff::{EXECUTIVE_TITLE, StaffMember, StaffSummary, title_for};

use platform_db::DbPool;

/// Data-access entry point for roles and employees.
#[derive(Clone, Debug)]
pub struct StaffDirectory {
    db: DbPool,
    hooks: SaveHooks,
}

impl StaffDirectory {
    /// Directory with the default hooks (the debug logger).
    pub fn new(db: DbPool) -> Self {
        Self::with_hooks(db, SaveHooks::default())
    }

    pub fn with_hooks(db: DbPool, hooks: SaveHooks) -> Self {
        Self { db, hooks }
    }

    pub fn on_save<H>(&mut self, hook: H) -> &mut Self
    where
        H: SaveHook + 'static,
    {
        self.hooks.register(hook);
        self
    }
}
