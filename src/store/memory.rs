//! In-memory store double for engine tests. Mirrors the backend's
//! upsert-on-(employee, date) create semantics and can be told to fail
//! writes, either wholesale or for a single employee.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};

use super::AttendanceStore;

#[derive(Default)]
struct Inner {
    employees: Vec<Employee>,
    records: Vec<AttendanceRecord>,
    next_employee_id: u64,
    next_record_id: u64,
    fail_writes: bool,
    fail_employee: Option<u64>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    pub fn with_employees(names: &[(u64, &str)]) -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.borrow_mut();
            for (id, name) in names {
                inner.employees.push(Employee {
                    id: *id,
                    employee_id: format!("EMP{id:03}"),
                    full_name: (*name).to_string(),
                    email: format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
                    department: "Development".to_string(),
                    role: "Engineer".to_string(),
                    profile_image: None,
                });
            }
            inner.next_employee_id = names.iter().map(|(id, _)| *id).max().unwrap_or(0) + 1;
            inner.next_record_id = 1;
        }
        store
    }

    pub fn seed_record(&self, record: AttendanceRecord) {
        let mut inner = self.inner.borrow_mut();
        inner.next_record_id = inner.next_record_id.max(record.id + 1);
        inner.records.push(record);
    }

    pub fn fail_all_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    pub fn fail_writes_for(&self, employee: Option<u64>) {
        self.inner.borrow_mut().fail_employee = employee;
    }

    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.inner.borrow().records.clone()
    }

    pub fn record_for(&self, employee: u64, date: chrono::NaiveDate) -> Option<AttendanceRecord> {
        self.inner
            .borrow()
            .records
            .iter()
            .find(|r| r.employee == employee && r.date == date)
            .cloned()
    }
}

impl AttendanceStore for MemoryStore {
    async fn fetch_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.inner.borrow().employees.clone())
    }

    async fn fetch_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self.inner.borrow().records.clone())
    }

    async fn create_attendance(&self, row: &NewAttendance) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes || inner.fail_employee == Some(row.employee) {
            return Err(StoreError::Rejected("write refused by test switch".into()));
        }
        if let Some(existing) = inner
            .records
            .iter_mut()
            .find(|r| r.employee == row.employee && r.date == row.date)
        {
            existing.status = row.status;
            existing.check_in_time = row.check_in_time;
            return Ok(());
        }
        let id = inner.next_record_id;
        inner.next_record_id += 1;
        inner.records.push(AttendanceRecord {
            id,
            employee: row.employee,
            date: row.date,
            status: row.status,
            check_in_time: row.check_in_time,
            check_out_time: None,
        });
        Ok(())
    }

    async fn create_employee(&self, emp: &NewEmployee) -> Result<Employee, StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(StoreError::Rejected("write refused by test switch".into()));
        }
        let id = inner.next_employee_id;
        inner.next_employee_id += 1;
        let created = Employee {
            id,
            employee_id: emp.employee_id.clone(),
            full_name: emp.full_name.clone(),
            email: emp.email.clone(),
            department: emp.department.clone(),
            role: emp.role.clone(),
            profile_image: emp.profile_image.clone(),
        };
        inner.employees.push(created.clone());
        Ok(created)
    }

    async fn delete_employee(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(StoreError::Rejected("write refused by test switch".into()));
        }
        let before = inner.employees.len();
        inner.employees.retain(|e| e.id != id);
        if inner.employees.len() == before {
            return Err(StoreError::Rejected(format!("no employee with id {id}")));
        }
        inner.records.retain(|r| r.employee != id);
        Ok(())
    }
}
