//! This module is responsible for turning a resolved docker
//! configuration into the tasks a build orchestrator schedules.
//! It contains the drivers that assemble the command lines for
//! building, tagging, and pushing images, and the task plan that
//! wires those command lines together.
//!
//! Nothing in here spawns a process or touches the file system.

pub mod drivers;
pub mod labels;
pub mod plan;

#[cfg(test)]
pub(crate) mod test {
    pub const TEST_IMAGE: &str = "id5";
    pub const TEST_TAG_1: &str = "latest";
    pub const TEST_TAG_2: &str = "withTaskName@2.0";
}
