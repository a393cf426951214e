use std::time::Duration;

use awc::Client;
use tracing::debug;

use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};

use super::AttendanceStore;

/// REST client for the attendance backend. Collection endpoints keep
/// their trailing slash; the backend redirects without it.
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .finish(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}/", self.base_url, resource)
    }

    fn item_url(&self, resource: &str, id: u64) -> String {
        format!("{}/{}/{}/", self.base_url, resource, id)
    }
}

impl AttendanceStore for HttpStore {
    async fn fetch_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let url = self.collection_url("employees");
        let mut res = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        if !res.status().is_success() {
            return Err(StoreError::Rejected(format!(
                "GET {} -> {}",
                url,
                res.status()
            )));
        }
        let employees = res
            .json::<Vec<Employee>>()
            .await
            .map_err(|e| StoreError::Payload(e.to_string()))?;
        debug!(count = employees.len(), "fetched employees");
        Ok(employees)
    }

    async fn fetch_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let url = self.collection_url("attendance");
        let mut res = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        if !res.status().is_success() {
            return Err(StoreError::Rejected(format!(
                "GET {} -> {}",
                url,
                res.status()
            )));
        }
        let records = res
            .json::<Vec<AttendanceRecord>>()
            .await
            .map_err(|e| StoreError::Payload(e.to_string()))?;
        debug!(count = records.len(), "fetched attendance records");
        Ok(records)
    }

    async fn create_attendance(&self, row: &NewAttendance) -> Result<(), StoreError> {
        let url = self.collection_url("attendance");
        let res = self
            .client
            .post(url.as_str())
            .send_json(row)
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        if !res.status().is_success() {
            return Err(StoreError::Rejected(format!(
                "POST {} -> {}",
                url,
                res.status()
            )));
        }
        Ok(())
    }

    async fn create_employee(&self, emp: &NewEmployee) -> Result<Employee, StoreError> {
        let url = self.collection_url("employees");
        let mut res = self
            .client
            .post(url.as_str())
            .send_json(emp)
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        if !res.status().is_success() {
            return Err(StoreError::Rejected(format!(
                "POST {} -> {}",
                url,
                res.status()
            )));
        }
        res.json::<Employee>()
            .await
            .map_err(|e| StoreError::Payload(e.to_string()))
    }

    async fn delete_employee(&self, id: u64) -> Result<(), StoreError> {
        let url = self.item_url("employees", id);
        let res = self
            .client
            .delete(url.as_str())
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        if !res.status().is_success() {
            return Err(StoreError::Rejected(format!(
                "DELETE {} -> {}",
                url,
                res.status()
            )));
        }
        Ok(())
    }
}
