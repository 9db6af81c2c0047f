pub mod db;
pub mod pickupdb;
pub mod userdb;
