use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of employment role, keyed by a short code.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "employee_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: Code,
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee::Entity")]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code.as_str())
    }
}

#[derive(
    Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Hash, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(5))")]
pub enum Code {
    #[sea_orm(string_value = "STD")]
    #[serde(rename = "STD")]
    Standard,
    #[sea_orm(string_value = "MGR")]
    #[serde(rename = "MGR")]
    Manager,
    #[sea_orm(string_value = "EXEC")]
    #[serde(rename = "EXEC")]
    Executive,
    #[sea_orm(string_value = "CHIEF")]
    #[serde(rename = "CHIEF")]
    Chief,
}

impl Code {
    pub const ALL: [Code; 4] = [Code::Standard, Code::Manager, Code::Executive, Code::Chief];

    pub fn as_str(self) -> &'static str {
        match self {
            Code::Standard => "STD",
            Code::Manager => "MGR",
            Code::Executive => "EXEC",
            Code::Chief => "CHIEF",
        }
    }

    /// Human readable name of the code itself, independent of any stored label.
    pub fn label(self) -> &'static str {
        match self {
            Code::Standard => "Standard",
            Code::Manager => "Manager",
            Code::Executive => "Executive",
            Code::Chief => "Chief Executive",
        }
    }

    /// Exact match on the stored form; codes are case sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == value)
    }
}
