use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Create-employee payload. The store assigns `id`.
#[derive(Debug, Clone, Serialize)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}
