//! Domain layer: the element snapshot model, everything derived from it
//! during a single audit run, and the outbound-probe seam.

pub mod entities;
pub mod link_probe;
pub mod recommendation_provider;
