//! Sale lifecycle module: three-layer architecture (domain, repository, service).
//!
//! Validation and persistence orchestration for sales lives here; the HTTP
//! layer stays a thin translation over `SellService`.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::SellService;
