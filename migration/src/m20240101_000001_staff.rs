use sea_orm_migration::prelude::*;

const ROLE_CODES: [&str; 4] = ["STD", "MGR", "EXEC", "CHIEF"];

#[derive(DeriveIden)]
enum EmployeeType {
    Table,
    Id,
    Code,
    Text,
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    Firstname,
    Surname,
    StartDate,
    RoleId,
    ManagerId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmployeeType::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeType::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmployeeType::Code)
                            .string_len(5)
                            .not_null()
                            .check(Expr::col(EmployeeType::Code).is_in(ROLE_CODES)),
                    )
                    .col(ColumnDef::new(EmployeeType::Text).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employee::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employee::Firstname).string_len(100).not_null())
                    .col(ColumnDef::new(Employee::Surname).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Employee::StartDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Employee::RoleId).integer())
                    .col(ColumnDef::new(Employee::ManagerId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_role")
                            .from(Employee::Table, Employee::RoleId)
                            .to(EmployeeType::Table, EmployeeType::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_manager")
                            .from(Employee::Table, Employee::ManagerId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_role")
                    .table(Employee::Table)
                    .col(Employee::RoleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_manager")
                    .table(Employee::Table)
                    .col(Employee::ManagerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employee::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(EmployeeType::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
