// Ostap shared type definitions
// Each submodule defines types used across the shell core and its transports.

pub mod errors;
pub mod geometry;
pub mod intent;
pub mod session;
pub mod settings;
pub mod tab;
