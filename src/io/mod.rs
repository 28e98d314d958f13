//! File export of sizing artefacts.

pub mod export;
