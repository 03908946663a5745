use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Campus {
    pub id: i64,
    pub number: i64,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct NewCampus {
    pub number: i64,
    pub address: String,
}

/// Partial update: `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CampusPatch {
    pub number: Option<i64>,
    pub address: Option<String>,
}

impl CampusPatch {
    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.address.is_none()
    }
}
