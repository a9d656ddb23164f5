//! Outbound link checking: the reqwest probe and the bounded worker pool
//! that drives it.

pub mod link_checker;
pub mod worker_pool;

pub use link_checker::HttpLinkChecker;
pub use worker_pool::validate_links;
