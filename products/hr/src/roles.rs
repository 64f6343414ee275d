use entity::{employee, employee_type};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait, sea_query::Expr,
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    StaffDirectory,
    error::{StaffError, StaffResult},
    validate::{MAX_ROLE_TEXT_LEN, parse_code, required_text},
};

/// Raw role fields as received from a caller; validated before any write.
#[derive(Clone, Debug, Deserialize)]
pub struct RoleInput {
    pub code: String,
    pub text: String,
}

impl RoleInput {
    pub fn new(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
        }
    }

    fn validate(&self) -> StaffResult<(employee_type::Code, String)> {
        let code = parse_code(&self.code)?;
        let text = required_text("text", &self.text, MAX_ROLE_TEXT_LEN)?;
        Ok((code, text))
    }
}

impl StaffDirectory {
    #[instrument(name = "hr.role.create", skip_all, fields(code = %input.code))]
    pub async fn create_role(&self, input: RoleInput) -> StaffResult<employee_type::Model> {
        let (code, text) = input.validate()?;
        let model = employee_type::ActiveModel {
            code: Set(code),
            text: Set(text),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(model)
    }

    #[instrument(name = "hr.role.update", skip(self, input))]
    pub async fn update_role(
        &self,
        id: i32,
        input: RoleInput,
    ) -> StaffResult<employee_type::Model> {
        let (code, text) = input.validate()?;
        let existing = self.require_role(id).await?;
        let mut active: employee_type::ActiveModel = existing.into();
        active.code = Set(code);
        active.text = Set(text);
        Ok(active.update(&self.db).await?)
    }

    pub async fn role(&self, id: i32) -> StaffResult<Option<employee_type::Model>> {
        Ok(employee_type::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn roles(&self) -> StaffResult<Vec<employee_type::Model>> {
        Ok(employee_type::Entity::find()
            .order_by_asc(employee_type::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Deletes a role and clears it from every employee holding it.
    /// Returns the number of employees whose role was cleared.
    #[instrument(name = "hr.role.delete", skip(self))]
    pub async fn delete_role(&self, id: i32) -> StaffResult<u64> {
        let txn = self.db.begin().await?;
        if employee_type::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(StaffError::NotFound {
                entity: "employee_type",
                id,
            });
        }

        let cleared = employee::Entity::update_many()
            .col_expr(employee::Column::RoleId, Expr::value(Option::<i32>::None))
            .filter(employee::Column::RoleId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        employee_type::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(role_id = id, cleared, "role deleted");
        Ok(cleared)
    }

    pub(crate) async fn require_role(&self, id: i32) -> StaffResult<employee_type::Model> {
        self.role(id).await?.ok_or(StaffError::NotFound {
            entity: "employee_type",
            id,
        })
    }
}
