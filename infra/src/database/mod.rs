//! Database implementations backed by MySQL via SQLx

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::MySqlSessionRepository;
