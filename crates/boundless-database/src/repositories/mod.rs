//! Repository implementations backed by PostgreSQL.

pub mod user;

pub use user::UserRepository;
