use strum_macros::Display;

use super::attendance::{AttendanceStatus, MarkStatus};

/// Derived day classification for one employee on the selected date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DayStatus {
    Pending,
    Present,
    Absent,
}

impl From<MarkStatus> for DayStatus {
    fn from(status: MarkStatus) -> Self {
        match status {
            MarkStatus::Present => DayStatus::Present,
            MarkStatus::Absent => DayStatus::Absent,
        }
    }
}

impl From<AttendanceStatus> for DayStatus {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Present | AttendanceStatus::OnTime => DayStatus::Present,
            AttendanceStatus::Absent => DayStatus::Absent,
        }
    }
}

/// UI-local reconciled state for one employee. `bulk` distinguishes a
/// value set by an all-present/all-absent action from an individual one;
/// a full recompute from store records always resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledStatus {
    pub status: DayStatus,
    pub bulk: bool,
}

impl ReconciledStatus {
    pub const PENDING: ReconciledStatus = ReconciledStatus {
        status: DayStatus::Pending,
        bulk: false,
    };

    pub fn is_marked(&self) -> bool {
        self.status != DayStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_time_reads_back_as_present() {
        assert_eq!(DayStatus::from(AttendanceStatus::OnTime), DayStatus::Present);
        assert_eq!(DayStatus::from(AttendanceStatus::Present), DayStatus::Present);
        assert_eq!(DayStatus::from(AttendanceStatus::Absent), DayStatus::Absent);
    }

    #[test]
    fn pending_is_unmarked() {
        assert!(!ReconciledStatus::PENDING.is_marked());
        let marked = ReconciledStatus { status: DayStatus::Absent, bulk: true };
        assert!(marked.is_marked());
    }
}
