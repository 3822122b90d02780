//! The dockwright CLI.
//!
//! Loads a `docker.yml` recipe and prints the tasks, command
//! lines, and tags a build orchestrator needs to build, tag,
//! and push the image.

pub mod commands;
