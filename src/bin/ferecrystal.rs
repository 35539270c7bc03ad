#![allow(clippy::toplevel_ref_arg)]

use std::error::Error;
use ferecrystal::{
    Logger,
    cli::{App, Command, List, Count, Verify},
};

fn file_level(occurrences: u64) -> log::LevelFilter {
    match occurrences {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let ref cli_spec_str = include_str!("ferecrystal.cli");

    let cli_spec = clap::YamlLoader::load_from_str(cli_spec_str)?;
    let cli_matches = clap::App::from_yaml(&cli_spec[0]);
    let app = App::from_clap(cli_matches);

    let command: Box<dyn Command> = match app.subcommand_name() {
        Some("list") => List::new_command(&app),
        Some("count") => Count::new_command(&app),
        Some("verify") => Verify::new_command(&app),
        _ => unreachable!(),
    };

    let mut logger = Logger::new(app.get_bin_name().unwrap_or_else(|| app.get_name()));

    if let Some(name) = app.subcommand_name() {
        logger = logger.with_command(name);
    }

    if let Some(level) = command.console_level() {
        logger = logger.with_console(level);
    }

    if let Some(dirname) = app.value_of("LOG_DIR") {
        logger = logger.with_explicit_directory(dirname);
    }

    let file_level = file_level(app.occurrences_of("log"));

    if file_level != log::LevelFilter::Off {
        logger = logger.with_file(command.name_of_log_file(), file_level);
    }

    logger.apply();

    if let Err(err) = command.run() {
        eprintln!("[ERROR] {}.", err);
        std::process::exit(-1)
    } else {
        std::process::exit(0)
    }
}
