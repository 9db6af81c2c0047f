pub mod pickupmodel;
pub mod usermodel;
