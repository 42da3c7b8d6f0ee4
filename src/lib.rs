// ABOUTME: Library root for podwrap - a client for the podman command line.
// ABOUTME: The podwrap binary is in main.rs.

pub mod config;
pub mod error;
pub mod log_level;
pub mod podman;
pub mod record;
pub mod version;
