pub mod comment;
pub mod extract;
pub mod health;
pub mod user;
pub mod vacancy;
