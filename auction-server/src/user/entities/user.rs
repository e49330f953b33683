use uuid::Uuid;

pub type UserId = Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id:   UserId,
    pub name: String,
}
