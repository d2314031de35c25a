pub mod goals;
pub mod habits;
pub mod routine;
pub mod tasks;
