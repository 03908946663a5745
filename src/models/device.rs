use serde::Serialize;

/// A device installed at a place.
///
/// `status` is a cached copy of the current problem's status and is only
/// ever written by `core::status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: i64,
    pub place_id: i64,
    pub status: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDevice {
    pub place_id: i64,
    pub description: Option<String>,
}

/// Caller-editable device fields; `status` is not one of them.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct DevicePatch {
    pub place_id: Option<i64>,
    pub description: Option<Option<String>>,
}

impl DevicePatch {
    pub fn is_empty(&self) -> bool {
        self.place_id.is_none() && self.description.is_none()
    }
}
