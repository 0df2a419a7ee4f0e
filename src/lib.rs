pub mod configuration;
pub mod domain;
pub mod notes_client;
pub mod session;
pub mod telemetry;
pub mod verification;
