pub mod dashboard;
pub mod players;
