pub mod configuration;
pub mod domain;
pub mod email;
pub mod notifications;
pub mod startup;
pub mod telemetry;
