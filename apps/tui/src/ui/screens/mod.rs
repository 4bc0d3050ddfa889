pub mod location;
pub mod main;
