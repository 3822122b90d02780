use dockwright_recipe::{BuildConfiguration, ConfigError, Result};
use dockwright_utils::{constants::DOCKER, string, string_vec};
use log::{debug, trace};

use crate::labels::validate_label_key;

use super::{
    opts::{PushOpts, TagOpts},
    BuildDriver,
};

#[derive(Debug)]
pub struct DockerDriver;

impl BuildDriver for DockerDriver {
    const PROGRAM: &'static str = DOCKER;

    fn build_command_line(config: &BuildConfiguration) -> Result<Vec<String>> {
        trace!("DockerDriver::build_command_line({})", config.name);

        let mut args = string_vec![Self::PROGRAM];

        if config.buildx {
            args.extend(string_vec!["buildx", "build"]);

            if !config.platforms.is_empty() {
                args.extend(string_vec![
                    "--platform",
                    config
                        .platforms
                        .iter()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(","),
                ]);
            }

            if config.load {
                args.push(string!("--load"));
            }

            if config.push {
                if config.load {
                    return Err(ConfigError::PushAndLoad);
                }
                args.push(string!("--push"));
            }

            if let Some(builder) = config.builder_name.as_deref() {
                args.extend(string_vec!["--builder", builder]);
            }
        } else {
            args.push(string!("build"));
        }

        if config.no_cache {
            args.push(string!("--no-cache"));
        }

        if let Some(network) = config.network.as_deref() {
            args.extend(string_vec!["--network", network]);
        }

        for (key, value) in &config.build_args {
            args.extend(string_vec!["--build-arg", format!("{key}={value}")]);
        }

        for (key, value) in &config.labels {
            validate_label_key(key)?;
            args.extend(string_vec!["--label", format!("{key}={value}")]);
        }

        if config.pull {
            args.push(string!("--pull"));
        }

        args.extend(string_vec!["-t", &config.name, "."]);

        debug!("Build command line: {}", args.join(" "));

        Ok(args)
    }

    fn tag_command_line(opts: &TagOpts) -> Vec<String> {
        trace!("DockerDriver::tag_command_line({opts:?})");

        string_vec![
            Self::PROGRAM,
            "tag",
            &*opts.src_image,
            &*opts.dest_image,
        ]
    }

    fn push_command_line(opts: &PushOpts) -> Vec<String> {
        trace!("DockerDriver::push_command_line({opts:?})");

        string_vec![Self::PROGRAM, "push", &*opts.image]
    }
}
