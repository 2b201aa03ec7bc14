//! Login and token verification behind a repository seam.
//!
//! The web layer only ever handles [`domain::Claims`] and
//! [`domain::AuthUser`] values; storage details stay in [`repo`].

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::AuthService;
