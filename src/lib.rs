//! fieldpath - Coverage paths and pitch markings for robotic field mowers

pub mod config;
pub mod coverage;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod marking;
pub mod task;
