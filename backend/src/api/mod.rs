//! Backend functions behind the frontend server functions.

pub mod projects;
pub mod recommend;
