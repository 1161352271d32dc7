//! Composition layer: the submission pipeline (validate + persist + list)
//! and the admin session services (login, session guard).

pub mod auth;
pub mod submissions;
