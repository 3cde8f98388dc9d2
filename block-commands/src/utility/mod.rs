pub mod help;
pub mod info;
pub mod ping;
pub mod server;
pub mod uptime;
pub mod user;
