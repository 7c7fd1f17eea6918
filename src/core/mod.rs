pub mod config;
pub mod context;
pub mod engine;
pub mod extract;
pub mod session;
pub mod shape;
pub mod store;
pub mod synth;
