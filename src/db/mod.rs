pub mod admins;
pub mod connection;
pub mod leads;

pub use connection::Database;
