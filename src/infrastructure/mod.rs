//! Infrastructure layer: outbound HTTP adapters behind the domain seams.

pub mod ai;
pub mod http;
