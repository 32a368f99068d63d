pub mod athletes;
pub mod categories;
pub mod competitions;
pub mod registrations;
pub mod results;
