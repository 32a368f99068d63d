pub mod eligibility;
pub mod registration_window;
pub mod results;
pub mod roster;
