//! Daily attendance board: reconciles store records against the selected
//! date and carries the mark / mark-all / finalize workflow on top of an
//! [`AttendanceStore`].

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::model::attendance::{AttendanceRecord, MarkStatus, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};
use crate::model::reconciled::{DayStatus, ReconciledStatus};
use crate::store::AttendanceStore;

/// How a mutation settled against the store. Reverted is not an error:
/// the board is back on the last known-good state and stays usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Committed,
    Reverted,
}

/// First phase of a bulk mark. Dropping it without calling
/// [`AttendanceBoard::confirm_bulk`] cancels the action entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkConfirmation {
    pub status: MarkStatus,
    pub headcount: usize,
    /// True when confirming would overwrite marks made individually.
    pub override_warning: bool,
}

/// Derives one status per employee for the given date.
///
/// Pure and total: every employee gets exactly one entry; unmatched
/// employees come out Pending and the bulk flag is always false here.
/// When the store holds several records for the same (employee, date)
/// pair, the highest record id wins, ids being assigned in creation
/// order.
pub fn reconcile(
    employees: &[Employee],
    records: &[AttendanceRecord],
    date: NaiveDate,
) -> HashMap<u64, ReconciledStatus> {
    employees
        .iter()
        .map(|emp| {
            let status = records
                .iter()
                .filter(|r| r.employee == emp.id && r.date == date)
                .max_by_key(|r| r.id)
                .map(|r| ReconciledStatus {
                    status: DayStatus::from(r.status),
                    bulk: false,
                })
                .unwrap_or(ReconciledStatus::PENDING);
            (emp.id, status)
        })
        .collect()
}

/// Finalized per-date headcount summary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total: usize,
    pub present: usize,
    pub absent: usize,
}

pub struct AttendanceBoard<S> {
    store: S,
    selected_date: NaiveDate,
    // last known-good server state; replaced only by successful fetches
    employees: Vec<Employee>,
    records: Vec<AttendanceRecord>,
    // the board's only mutable state, rebuilt wholesale on every trigger
    state: HashMap<u64, ReconciledStatus>,
}

impl<S: AttendanceStore> AttendanceBoard<S> {
    pub fn new(store: S, date: NaiveDate) -> Self {
        Self {
            store,
            selected_date: date,
            employees: Vec::new(),
            records: Vec::new(),
            state: HashMap::new(),
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn statuses(&self) -> &HashMap<u64, ReconciledStatus> {
        &self.state
    }

    pub fn status_of(&self, employee_id: u64) -> ReconciledStatus {
        self.state
            .get(&employee_id)
            .copied()
            .unwrap_or(ReconciledStatus::PENDING)
    }

    /// Reloads roster and records from the store, then reconciles.
    /// A fetch failure leaves the previous state untouched.
    pub async fn refresh(&mut self) -> Result<(), EngineError> {
        let (employees, records) = futures::try_join!(
            self.store.fetch_employees(),
            self.store.fetch_attendance()
        )?;
        self.employees = employees;
        self.records = records;
        self.rebuild();
        Ok(())
    }

    /// Changes the selected date and reconciles from the last known-good
    /// records; no network involved.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.rebuild();
    }

    /// Case-insensitive roster filter over name, code, and department.
    pub fn search(&self, term: &str) -> Vec<&Employee> {
        let term = term.to_lowercase();
        self.employees
            .iter()
            .filter(|emp| {
                emp.full_name.to_lowercase().contains(&term)
                    || emp.employee_id.to_lowercase().contains(&term)
                    || emp.department.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Marks one employee, optimistically first, then against the store.
    ///
    /// On a write (or re-fetch) failure the optimistic value is discarded
    /// and the board falls back to the last known-good reconciliation.
    /// One attempt only, no retry.
    pub async fn mark(
        &mut self,
        employee_id: u64,
        status: MarkStatus,
    ) -> Result<SyncOutcome, EngineError> {
        if !self.employees.iter().any(|e| e.id == employee_id) {
            return Err(EngineError::UnknownEmployee(employee_id));
        }

        let mut next = self.state.clone();
        next.insert(
            employee_id,
            ReconciledStatus {
                status: status.into(),
                bulk: false,
            },
        );
        self.state = next;

        let row = NewAttendance {
            employee: employee_id,
            date: self.selected_date,
            status: status.as_wire(),
            check_in_time: match status {
                MarkStatus::Present => Some(Local::now().time()),
                MarkStatus::Absent => None,
            },
        };

        match self.store.create_attendance(&row).await {
            Ok(()) => match self.store.fetch_attendance().await {
                Ok(records) => {
                    self.records = records;
                    self.rebuild();
                    info!(employee_id, %status, date = %self.selected_date, "attendance marked");
                    Ok(SyncOutcome::Committed)
                }
                Err(err) => {
                    warn!(error = %err, employee_id, "reload after mark failed, reverting view");
                    self.rebuild();
                    Ok(SyncOutcome::Reverted)
                }
            },
            Err(err) => {
                warn!(error = %err, employee_id, %status, "attendance write failed, reverting");
                self.rebuild();
                Ok(SyncOutcome::Reverted)
            }
        }
    }

    /// First phase of marking everyone at once: a pure query that tells
    /// the caller whether confirming would discard individual decisions.
    pub fn request_bulk(&self, status: MarkStatus) -> BulkConfirmation {
        let override_warning = self.state.values().any(|s| s.is_marked() && !s.bulk);
        BulkConfirmation {
            status,
            headcount: self.employees.len(),
            override_warning,
        }
    }

    /// Second phase: applies the bulk state and fans out one write per
    /// employee, all attempted regardless of individual outcomes, no
    /// ordering between them. Partial success is treated exactly like
    /// total failure: the whole batch reverts.
    pub async fn confirm_bulk(
        &mut self,
        confirmation: BulkConfirmation,
    ) -> Result<SyncOutcome, EngineError> {
        let status = confirmation.status;
        let batch = Uuid::new_v4();

        self.state = self
            .employees
            .iter()
            .map(|emp| {
                (
                    emp.id,
                    ReconciledStatus {
                        status: status.into(),
                        bulk: true,
                    },
                )
            })
            .collect();

        let check_in = match status {
            MarkStatus::Present => Some(Local::now().time()),
            MarkStatus::Absent => None,
        };
        let rows: Vec<NewAttendance> = self
            .employees
            .iter()
            .map(|emp| NewAttendance {
                employee: emp.id,
                date: self.selected_date,
                status: status.as_wire(),
                check_in_time: check_in,
            })
            .collect();

        let results = join_all(rows.iter().map(|row| self.store.create_attendance(row))).await;
        let failed = results.iter().filter(|r| r.is_err()).count();

        if failed > 0 {
            warn!(batch = %batch, failed, total = results.len(), "bulk mark incomplete, reverting batch");
            self.rebuild();
            return Ok(SyncOutcome::Reverted);
        }

        match self.store.fetch_attendance().await {
            Ok(records) => {
                self.records = records;
                self.rebuild();
                // the bulk action stays this session's provenance for
                // every employee until the next recompute trigger
                for entry in self.state.values_mut() {
                    entry.bulk = true;
                }
                info!(batch = %batch, %status, total = rows.len(), date = %self.selected_date, "bulk mark committed");
                Ok(SyncOutcome::Committed)
            }
            Err(err) => {
                warn!(batch = %batch, error = %err, "reload after bulk mark failed, reverting view");
                self.rebuild();
                Ok(SyncOutcome::Reverted)
            }
        }
    }

    /// Read-only gate: fails while anyone is still Pending, otherwise
    /// returns the finalized headcount for the selected date.
    pub fn finalize(&self) -> Result<DailySummary, EngineError> {
        let pending = self
            .state
            .values()
            .filter(|s| s.status == DayStatus::Pending)
            .count();
        if pending > 0 {
            return Err(EngineError::UnmarkedEmployees(pending));
        }
        let present = self
            .state
            .values()
            .filter(|s| s.status == DayStatus::Present)
            .count();
        let absent = self
            .state
            .values()
            .filter(|s| s.status == DayStatus::Absent)
            .count();
        Ok(DailySummary {
            date: self.selected_date,
            total: self.employees.len(),
            present,
            absent,
        })
    }

    /// Creates the employee in the store, then reloads the roster.
    pub async fn add_employee(&mut self, new: NewEmployee) -> Result<Employee, EngineError> {
        let created = self.store.create_employee(&new).await?;
        info!(id = created.id, code = %created.employee_id, "employee created");
        self.employees = self.store.fetch_employees().await?;
        self.rebuild();
        Ok(created)
    }

    /// Deletes the employee from the store, then reloads the roster.
    pub async fn remove_employee(&mut self, employee_id: u64) -> Result<(), EngineError> {
        if !self.employees.iter().any(|e| e.id == employee_id) {
            return Err(EngineError::UnknownEmployee(employee_id));
        }
        self.store.delete_employee(employee_id).await?;
        info!(id = employee_id, "employee deleted");
        self.employees = self.store.fetch_employees().await?;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        self.state = reconcile(&self.employees, &self.records, self.selected_date);
    }
}
