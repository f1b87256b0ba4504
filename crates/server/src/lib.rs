pub mod auth;
pub mod errors;
pub mod metrics;
pub mod routes;
pub mod rpc;
pub mod startup;
pub mod state;

pub use startup::{run, run_with_config};
