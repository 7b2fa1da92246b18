pub mod api;
pub mod console;
pub mod roster;
pub mod workflow;
