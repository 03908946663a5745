use serde::Serialize;

pub const DEFAULT_PLACE_TYPE: &str = "standard";

/// A seat position inside a classroom.
///
/// `(classroom_id, x, y)` is unique across all places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    pub id: i64,
    pub x: i64,
    pub y: i64,
    pub place_type: String,
    pub classroom_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewPlace {
    pub classroom_id: i64,
    pub x: i64,
    pub y: i64,
    pub place_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct PlacePatch {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub place_type: Option<String>,
}

impl PlacePatch {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.place_type.is_none()
    }

    pub fn touches_coordinates(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Coordinates the place ends up with once the patch is applied.
    pub fn effective_coordinates(&self, current: &Place) -> (i64, i64) {
        (self.x.unwrap_or(current.x), self.y.unwrap_or(current.y))
    }
}
