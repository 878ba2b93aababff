use chrono::{DateTime, Utc};
use roster_schema::NurseRecord;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbNurse {
    pub id: String,
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub dob: Option<String>,
    pub age: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbNurse> for NurseRecord {
    fn from(row: DbNurse) -> Self {
        NurseRecord {
            id: row.id,
            name: row.name,
            license_number: row.license_number,
            dob: row.dob,
            age: row.age,
        }
    }
}
