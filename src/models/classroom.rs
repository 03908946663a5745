use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classroom {
    pub id: i64,
    pub number: i64,
    pub campus_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewClassroom {
    pub number: i64,
    pub campus_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ClassroomPatch {
    pub number: Option<i64>,
    pub campus_id: Option<i64>,
}

impl ClassroomPatch {
    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.campus_id.is_none()
    }
}
