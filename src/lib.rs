// Infrastructure
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Collaborators
pub mod directory;
pub mod dispatch;

// Application layer
pub mod admin;
pub mod api;
pub mod server;
