use clap::Parser;
use dockwright::commands::{CommandArgs, DockwrightArgs, DockwrightCommand};
use dockwright_utils::logging::Logger;

fn main() {
    let args = DockwrightArgs::parse();

    Logger::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    log::trace!("Parsed arguments: {args:#?}");

    match args.command {
        CommandArgs::Plan(mut command) => command.run(),

        CommandArgs::Command(mut command) => command.run(),

        CommandArgs::Tags(mut command) => command.run(),

        CommandArgs::Validate(mut command) => command.run(),

        CommandArgs::Completions(mut command) => command.run(),
    }
}
