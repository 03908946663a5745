use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

/// Ticket workflow label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ProblemStatus {
    #[default]
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Resolved")]
    Resolved,
}

impl ProblemStatus {
    pub const ALL: [ProblemStatus; 3] = [
        ProblemStatus::Pending,
        ProblemStatus::InProgress,
        ProblemStatus::Resolved,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ProblemStatus::Pending => "Pending",
            ProblemStatus::InProgress => "In Progress",
            ProblemStatus::Resolved => "Resolved",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(ProblemStatus::Pending),
            "In Progress" => Some(ProblemStatus::InProgress),
            "Resolved" => Some(ProblemStatus::Resolved),
            _ => None,
        }
    }

    /// Parse user input: exact labels, or case-insensitive short forms
    /// (`pending`, `in-progress`, `in_progress`, `resolved`).
    pub fn parse(input: &str) -> AppResult<Self> {
        if let Some(s) = Self::from_db_str(input) {
            return Ok(s);
        }
        let normalized = input.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "pending" => Ok(ProblemStatus::Pending),
            "in progress" => Ok(ProblemStatus::InProgress),
            "resolved" => Ok(ProblemStatus::Resolved),
            _ => Err(AppError::ValidationFailed(format!(
                "invalid problem status '{}': expected one of Pending, In Progress, Resolved",
                input
            ))),
        }
    }
}

impl fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub id: i64,
    pub device_id: i64,
    pub user_id: i64,
    pub description: String,
    pub active: bool,
    pub status: ProblemStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct NewProblem {
    pub device_id: i64,
    pub user_id: i64,
    pub description: String,
    pub active: bool,
    pub status: ProblemStatus,
}

impl NewProblem {
    /// An active `Pending` ticket, the defaults for a freshly reported problem.
    pub fn reported(device_id: i64, user_id: i64, description: impl Into<String>) -> Self {
        Self {
            device_id,
            user_id,
            description: description.into(),
            active: true,
            status: ProblemStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: ProblemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProblemPatch {
    pub description: Option<String>,
    pub active: Option<bool>,
    pub status: Option<ProblemStatus>,
    pub device_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl ProblemPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.active.is_none()
            && self.status.is_none()
            && self.device_id.is_none()
            && self.user_id.is_none()
    }

    /// Apply the present fields onto a copy of `current`.
    pub fn apply(&self, current: &Problem) -> Problem {
        let mut next = current.clone();
        if let Some(d) = &self.description {
            next.description = d.clone();
        }
        if let Some(a) = self.active {
            next.active = a;
        }
        if let Some(s) = self.status {
            next.status = s;
        }
        if let Some(d) = self.device_id {
            next.device_id = d;
        }
        if let Some(u) = self.user_id {
            next.user_id = u;
        }
        next
    }
}
