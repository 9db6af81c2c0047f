pub mod pickupdtos;
pub mod userdtos;
