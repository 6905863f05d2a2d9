//! Marker generation boundary: turns specs into files and every failure into a reported outcome.

pub(crate) mod batch;
pub(crate) mod generator;
