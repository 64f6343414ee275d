use std::collections::HashSet;

use entity::{employee, employee_type, employee_type::Code};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, JoinType},
};
use tracing::{info, instrument, warn};

use crate::{
    StaffDirectory,
    error::{StaffError, StaffResult},
    hooks::SaveAction,
    staff::StaffMember,
    validate::{MAX_NAME_LEN, required_text},
};

#[derive(Clone, Debug)]
pub struct NewEmployee {
    pub firstname: String,
    pub surname: String,
    /// Defaults to the time of insertion.
    pub start_date: Option<DateTimeWithTimeZone>,
    pub role_id: Option<i32>,
    pub manager_id: Option<i32>,
}

impl NewEmployee {
    pub fn new(firstname: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            firstname: firstname.into(),
            surname: surname.into(),
            start_date: None,
            role_id: None,
            manager_id: None,
        }
    }

    pub fn with_role(mut self, role_id: i32) -> Self {
        self.role_id = Some(role_id);
        self
    }

    pub fn with_manager(mut self, manager_id: i32) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    pub fn started_at(mut self, start_date: DateTimeWithTimeZone) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// Partial update. `None` leaves a field alone; `Some(None)` clears a reference.
#[derive(Clone, Debug, Default)]
pub struct EmployeeChanges {
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub start_date: Option<DateTimeWithTimeZone>,
    pub role_id: Option<Option<i32>>,
    pub manager_id: Option<Option<i32>>,
}

impl StaffDirectory {
    #[instrument(name = "hr.employee.create", skip_all)]
    pub async fn create_employee(&self, input: NewEmployee) -> StaffResult<employee::Model> {
        let firstname = required_text("firstname", &input.firstname, MAX_NAME_LEN)?;
        let surname = required_text("surname", &input.surname, MAX_NAME_LEN)?;
        if let Some(role_id) = input.role_id {
            self.require_role(role_id).await?;
        }
        if let Some(manager_id) = input.manager_id {
            self.require_employee(manager_id).await?;
        }

        let saved = employee::ActiveModel {
            firstname: Set(firstname),
            surname: Set(surname),
            start_date: input.start_date.map_or(NotSet, Set),
            role_id: Set(input.role_id),
            manager_id: Set(input.manager_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        self.hooks.dispatch(&saved, SaveAction::Insert);
        Ok(saved)
    }

    /// Writes every column of the merged record, then runs the save hooks.
    #[instrument(name = "hr.employee.update", skip(self, changes))]
    pub async fn update_employee(
        &self,
        id: i32,
        changes: EmployeeChanges,
    ) -> StaffResult<employee::Model> {
        let existing = self.require_employee(id).await?;

        let firstname = match changes.firstname {
            Some(value) => required_text("firstname", &value, MAX_NAME_LEN)?,
            None => existing.firstname.clone(),
        };
        let surname = match changes.surname {
            Some(value) => required_text("surname", &value, MAX_NAME_LEN)?,
            None => existing.surname.clone(),
        };
        let role_id = changes.role_id.unwrap_or(existing.role_id);
        if let Some(role_id) = role_id {
            self.require_role(role_id).await?;
        }
        let manager_id = changes.manager_id.unwrap_or(existing.manager_id);
        if let Some(manager_id) = manager_id {
            if manager_id != id {
                self.require_employee(manager_id).await?;
            }
        }
        let start_date = changes.start_date.unwrap_or(existing.start_date);

        let mut active: employee::ActiveModel = existing.into();
        active.firstname = Set(firstname);
        active.surname = Set(surname);
        active.start_date = Set(start_date);
        active.role_id = Set(role_id);
        active.manager_id = Set(manager_id);
        let saved = active.update(&self.db).await?;

        self.hooks.dispatch(&saved, SaveAction::Update);
        Ok(saved)
    }

    /// Deletes an employee; direct reports are kept with their manager cleared.
    /// Returns the number of reports that lost their manager.
    #[instrument(name = "hr.employee.delete", skip(self))]
    pub async fn delete_employee(&self, id: i32) -> StaffResult<u64> {
        let txn = self.db.begin().await?;
        if employee::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(StaffError::NotFound {
                entity: "employee",
                id,
            });
        }

        let cleared = employee::Entity::update_many()
            .col_expr(employee::Column::ManagerId, Expr::value(Option::<i32>::None))
            .filter(employee::Column::ManagerId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        employee::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(employee_id = id, cleared, "employee deleted");
        Ok(cleared)
    }

    pub async fn employee(&self, id: i32) -> StaffResult<Option<employee::Model>> {
        Ok(employee::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn employees(&self) -> StaffResult<Vec<employee::Model>> {
        Ok(employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Employees whose role code is `MGR`.
    #[instrument(name = "hr.employee.managers", skip(self))]
    pub async fn get_managers(&self) -> StaffResult<Vec<employee::Model>> {
        Ok(employee::Entity::find()
            .join(JoinType::InnerJoin, employee::Relation::Role.def())
            .filter(employee_type::Column::Code.eq(Code::Manager))
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn direct_reports(&self, manager_id: i32) -> StaffResult<Vec<employee::Model>> {
        Ok(employee::Entity::find()
            .filter(employee::Column::ManagerId.eq(manager_id))
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Managers above `id`, nearest first. Stops when the chain loops back on itself.
    pub async fn manager_chain(&self, id: i32) -> StaffResult<Vec<employee::Model>> {
        let mut current = self.require_employee(id).await?;
        let mut seen = HashSet::from([current.id]);
        let mut chain = Vec::new();
        while let Some(manager_id) = current.manager_id {
            if !seen.insert(manager_id) {
                warn!(employee_id = id, manager_id, "manager chain contains a cycle");
                break;
            }
            let Some(manager) = self.employee(manager_id).await? else {
                break;
            };
            chain.push(manager.clone());
            current = manager;
        }
        Ok(chain)
    }

    pub async fn staff_member(&self, id: i32) -> StaffResult<Option<StaffMember>> {
        let row = employee::Entity::find_by_id(id)
            .find_also_related(employee_type::Entity)
            .one(&self.db)
            .await?;
        Ok(row.map(|(employee, role)| StaffMember::new(employee, role)))
    }

    pub async fn staff(&self) -> StaffResult<Vec<StaffMember>> {
        let rows = employee::Entity::find()
            .find_also_related(employee_type::Entity)
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(employee, role)| StaffMember::new(employee, role))
            .collect())
    }

    pub(crate) async fn require_employee(&self, id: i32) -> StaffResult<employee::Model> {
        self.employee(id).await?.ok_or(StaffError::NotFound {
            entity: "employee",
            id,
        })
    }
}
