//! This module holds the drivers that turn a build configuration
//! into concrete command lines. Drivers never run the commands
//! they produce, the caller decides where and when that happens.

pub use docker_driver::DockerDriver;
pub use traits::*;

mod docker_driver;
pub mod opts;
mod traits;
