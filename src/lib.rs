pub mod alerts;
pub mod bridge;
pub mod control;
pub mod error;
pub mod nav;
pub mod perception;
pub mod reasoning;
pub mod telemetry;

// Re-export specific items if needed for convenient access
pub use control::ControlLoop;
pub use error::ControlError;
