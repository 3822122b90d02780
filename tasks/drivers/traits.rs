use dockwright_recipe::{BuildConfiguration, Result};

use super::opts::{PushOpts, TagOpts};

/// Produces the command lines for building, tagging, and pushing an image.
pub trait BuildDriver {
    /// The program every command line starts with.
    const PROGRAM: &'static str;

    /// Assembles the full argument vector of the image build,
    /// including the program itself.
    ///
    /// # Errors
    /// Will error if the configuration combines options the
    /// build tool rejects or carries an illegal label key.
    fn build_command_line(config: &BuildConfiguration) -> Result<Vec<String>>;

    /// Assembles the command line that applies one tag to the built image.
    fn tag_command_line(opts: &TagOpts) -> Vec<String>;

    /// Assembles the command line that pushes one tagged image.
    fn push_command_line(opts: &PushOpts) -> Vec<String>;
}
