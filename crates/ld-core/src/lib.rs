//! Pure leaf logic for the Lead Desk pipeline: submission validation,
//! password hashing, and the session token codec. No I/O lives here.

pub mod password;
pub mod token;
pub mod validate;
