//! Shared REST DTOs for the portal/API boundary.
//!
//! DESIGN
//! ======
//! Field names mirror the API's camelCase JSON. Dashboard payloads default
//! every field so a partially populated response still renders instead of
//! failing to decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// Portal role. Selects the dashboard and the API scope a session may use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    #[default]
    Patient,
    /// Any role string the portal does not recognize. Never matches a route requirement.
    #[serde(other)]
    Unknown,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Patient => "patient",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable label for role toggles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Doctor => "Doctor",
            Self::Patient => "Patient",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Authenticated user record as returned by the API and persisted under the
/// `user` storage key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier. Accepts the API's `_id` spelling on input.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

// =============================================================================
// AUTH REQUESTS / RESPONSES
// =============================================================================

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Body of `POST /auth/signup`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupProfile {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Doctors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

/// Successful login/signup response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Successful `GET /auth/me` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MeResponse {
    pub user: User,
}

/// Error payload carried by non-2xx responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `{ "data": ... }` envelope used by the dashboard endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

// =============================================================================
// DASHBOARDS
// =============================================================================

/// Appointment summary shown on both dashboards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Appointment {
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    /// ISO-8601 date or timestamp.
    pub date: Option<String>,
    pub time: Option<String>,
    pub reason: Option<String>,
}

impl Appointment {
    #[must_use]
    pub fn patient_label(&self) -> &str {
        non_blank(self.patient_name.as_deref()).unwrap_or("Patient Name")
    }

    #[must_use]
    pub fn doctor_label(&self) -> &str {
        non_blank(self.doctor_name.as_deref()).unwrap_or("Dr. Name")
    }

    /// Calendar date portion of `date`, or `"Date TBD"`.
    #[must_use]
    pub fn date_label(&self) -> &str {
        calendar_date(self.date.as_deref()).unwrap_or("Date TBD")
    }

    #[must_use]
    pub fn time_label(&self) -> &str {
        non_blank(self.time.as_deref()).unwrap_or("Time TBD")
    }

    #[must_use]
    pub fn reason_label(&self) -> &str {
        non_blank(self.reason.as_deref()).unwrap_or("General Checkup")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoctorProfile {
    pub full_name: String,
    pub specialization: Option<String>,
}

impl DoctorProfile {
    /// Last word of the full name, used in the "Dr. ..." greeting.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.full_name.split_whitespace().next_back().unwrap_or_default()
    }

    #[must_use]
    pub fn specialization_label(&self) -> &str {
        non_blank(self.specialization.as_deref()).unwrap_or("General Physician")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoctorStats {
    pub total_patients: u32,
    pub upcoming_appointments: u32,
    pub total_appointments: u32,
    pub completed_appointments: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientSummary {
    pub full_name: String,
    pub email: String,
}

/// Payload of `GET /doctor/dashboard`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoctorDashboard {
    pub doctor: DoctorProfile,
    pub stats: DoctorStats,
    pub upcoming_appointments: Vec<Appointment>,
    pub recent_patients: Vec<PatientSummary>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientProfile {
    pub full_name: String,
}

impl PatientProfile {
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientStats {
    pub upcoming_appointments: u32,
    pub active_medical_conditions: u32,
    pub current_medications: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MedicalRecord {
    pub condition: String,
    pub diagnosed_date: Option<String>,
    pub status: Option<String>,
}

impl MedicalRecord {
    #[must_use]
    pub fn diagnosed_label(&self) -> &str {
        calendar_date(self.diagnosed_date.as_deref()).unwrap_or("N/A")
    }

    #[must_use]
    pub fn status_label(&self) -> &str {
        non_blank(self.status.as_deref()).unwrap_or("Active")
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.as_deref().map_or(true, |s| s.eq_ignore_ascii_case("active"))
    }
}

/// Payload of `GET /patient/dashboard`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientDashboard {
    pub patient: PatientProfile,
    pub stats: PatientStats,
    pub upcoming_appointments: Vec<Appointment>,
    pub recent_medical_history: Vec<MedicalRecord>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn calendar_date(value: Option<&str>) -> Option<&str> {
    non_blank(value).map(|v| v.split('T').next().unwrap_or(v))
}
