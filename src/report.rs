use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;

const CSV_HEADER: &str = "Date,Status,Check-in,Check-out";

/// Per-employee attendance history as CSV, the same shape the dashboard
/// used to download: one row per record, oldest first, empty cells for
/// missing check times.
pub fn employee_csv(employee: &Employee, records: &[AttendanceRecord]) -> String {
    let mut rows: Vec<&AttendanceRecord> =
        records.iter().filter(|r| r.employee == employee.id).collect();
    rows.sort_by_key(|r| (r.date, r.id));

    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for rec in rows {
        let check_in = rec.check_in_time.map(|t| t.to_string()).unwrap_or_default();
        let check_out = rec.check_out_time.map(|t| t.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{}\n",
            rec.date, rec.status, check_in, check_out
        ));
    }
    out
}

/// File name for the exported history, e.g. `Jane Roe_Report.csv`.
pub fn report_file_name(employee: &Employee) -> String {
    format!("{}_Report.csv", employee.full_name)
}
