pub mod pinfo;
pub mod roster;
pub mod server_info;
