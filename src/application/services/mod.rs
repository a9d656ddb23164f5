//! Analysis services for the application layer.

pub mod audit_service;
pub mod issue_service;
pub mod recommendation_service;
pub mod scoring_service;

pub use audit_service::AuditService;
