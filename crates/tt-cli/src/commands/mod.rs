//! CLI command implementations

pub(crate) mod common;
pub(crate) mod dialects;
pub(crate) mod serve;
pub(crate) mod tables;
