pub mod condition;
pub mod config;
pub mod describe;
pub mod generator;
pub mod pipeline;
pub mod provider;
pub mod rng;
pub mod version;
