pub mod extract;
pub mod health;
pub mod movies;
pub mod users;
