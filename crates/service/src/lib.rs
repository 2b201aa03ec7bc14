//! Business rules between the HTTP handlers and the `models` entities.
//!
//! The sale workflow lives in [`sell`] behind a repository trait; the
//! simpler resources are plain function modules over a database
//! connection. [`auth`] owns login and token verification.

pub mod errors;

pub mod auth;
pub mod sell;

pub mod category_service;
pub mod client_service;
pub mod phone_service;
pub mod user_service;

#[cfg(test)]
pub mod test_support;
