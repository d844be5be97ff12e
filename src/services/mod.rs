pub mod auth;
pub mod feedback;
pub mod job;
pub mod profile;
pub mod role;
pub mod session;
pub mod wizard;
