pub mod auth;
pub mod pickups;
pub mod users;
