use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    pub password_hash: String,
    pub admin: bool,
}
