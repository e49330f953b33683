mod get_user_by_id;
mod models;

pub use models::*;

#[derive(Debug)]
pub struct Repository {
    pub db: Box<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self { db: Box::new(db) }
    }
}
