pub mod artifact;
pub mod schedule;
