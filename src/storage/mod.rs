pub mod profiles;
pub mod roster;
