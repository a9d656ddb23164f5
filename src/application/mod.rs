//! Application layer: the audit pipeline and its analysis passes.

pub mod services;
