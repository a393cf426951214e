use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Status literal as the store persists it. Older records carry
/// "On-time" instead of "Present"; both read back as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "On-time")]
    #[strum(serialize = "On-time")]
    OnTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: u64,
    pub employee: u64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub check_in_time: Option<NaiveTime>,
    #[serde(default)]
    pub check_out_time: Option<NaiveTime>,
}

/// Create-attendance payload. `check_in_time` is sent as an explicit
/// null for absences; the store upserts on (employee, date).
#[derive(Debug, Clone, Serialize)]
pub struct NewAttendance {
    pub employee: u64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<NaiveTime>,
}

/// The two states an administrator can actually assign. Writes always
/// persist the canonical "Present" literal, never the "On-time" alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MarkStatus {
    Present,
    Absent,
}

impl MarkStatus {
    pub fn as_wire(self) -> AttendanceStatus {
        match self {
            MarkStatus::Present => AttendanceStatus::Present,
            MarkStatus::Absent => AttendanceStatus::Absent,
        }
    }
}
