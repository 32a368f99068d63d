pub mod athlete;
pub mod competition;
