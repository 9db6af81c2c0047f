pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod rates;
pub mod settlement;
pub mod visibility;
