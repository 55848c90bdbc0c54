use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::{Text, Varchar};
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Task workflow state, stored as `ToDo` / `Doing` / `Done`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Varchar)]
pub enum TaskStatus {
    #[default]
    ToDo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "ToDo",
            TaskStatus::Doing => "Doing",
            TaskStatus::Done => "Done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ToDo" => Some(TaskStatus::ToDo),
            "Doing" => Some(TaskStatus::Doing),
            "Done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl FromSql<Varchar, Pg> for TaskStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        TaskStatus::parse(&s).ok_or_else(|| "Unrecognized enum variant".into())
    }
}

impl ToSql<Varchar, Pg> for TaskStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

/// Sprint filter relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    /// `ended_at` has not passed yet.
    Active,
    /// `ended_at` is in the past.
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_round_trips_through_text() {
        for status in [TaskStatus::ToDo, TaskStatus::Doing, TaskStatus::Done] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("todo"), None);
    }

    #[test]
    fn task_status_serializes_as_stored() {
        assert_eq!(serde_json::to_string(&TaskStatus::ToDo).unwrap(), "\"ToDo\"");
        let parsed: TaskStatus = serde_json::from_str("\"Doing\"").unwrap();
        assert_eq!(parsed, TaskStatus::Doing);
        assert!(serde_json::from_str::<TaskStatus>("\"Blocked\"").is_err());
    }
}
