pub mod athlete;
pub mod category;
pub mod competition;
pub mod ranking;
pub mod registration;
