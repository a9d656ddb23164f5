//! Shared helpers: CTA vocabularies and href classification.

pub mod lexicon;
pub mod url_classifier;
