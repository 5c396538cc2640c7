pub mod about;
pub mod dashboard;
pub mod interest;
pub mod login;
pub mod register;
