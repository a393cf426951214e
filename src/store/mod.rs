pub mod http;
#[cfg(test)]
pub mod memory;

use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};

/// The external system of record for employees and attendance.
///
/// All writes are fire-and-confirm: the caller re-fetches after a
/// successful write instead of patching local copies.
#[allow(async_fn_in_trait)]
pub trait AttendanceStore {
    async fn fetch_employees(&self) -> Result<Vec<Employee>, StoreError>;

    async fn fetch_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Creates or replaces the record for (employee, date).
    async fn create_attendance(&self, row: &NewAttendance) -> Result<(), StoreError>;

    async fn create_employee(&self, emp: &NewEmployee) -> Result<Employee, StoreError>;

    async fn delete_employee(&self, id: u64) -> Result<(), StoreError>;
}
