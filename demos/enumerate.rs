#[macro_use]
extern crate log;

use std::{fmt, error::Error};
use ferecrystal::{ContentSpec, BraceletGenerator, Logger, bracelet_count};

#[derive(Debug)]
struct EnError(String);

impl fmt::Display for EnError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Error for EnError {}

#[derive(Debug)]
struct App {
    name:      String,
    log_dir:   Option<String>,
    verbosity: u32,
    counts:    Vec<usize>,
}

impl App {
    fn new<S: AsRef<str>>(name: S) -> Result<Self, Box<dyn Error>> {
        let name = name.as_ref().into();
        let mut log_dir = None;
        let mut verbosity = 0;
        let mut counts = Vec::new();

        for (prev_arg, next_arg) in std::env::args().zip(std::env::args().skip(1)) {
            match next_arg.as_str() {
                "-v" => verbosity += 1,
                "-vv" => verbosity += 2,
                "-vvv" => verbosity += 3,
                "--log-dir" => {}
                arg => {
                    if arg.starts_with('-') {
                        return Err(Box::new(EnError(format!("Invalid CLI option \"{}\"", arg))))
                    } else if prev_arg == "--log-dir" {
                        log_dir = Some(arg.into());
                    } else {
                        counts.push(arg.parse()?);
                    }
                }
            }
        }

        if counts.is_empty() {
            counts = vec![1; 9];
        }

        Ok(App { name, log_dir, verbosity, counts })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let app = App::new("Enumerate")?;

    let log_level = match app.verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut logger = Logger::new(app.name).with_console(log_level);

    if let Some(log_dir) = app.log_dir {
        logger = logger.with_explicit_directory(log_dir);
    }

    if logger.get_directory().is_some() {
        logger = logger.with_file("enumerate.log", log_level);
    }

    logger.apply();

    let content = ContentSpec::from_counts(&app.counts)?;
    let mut count = 0_u64;
    let mut last = None;

    for bracelet in BraceletGenerator::new(&content).iter() {
        count += 1;
        last = Some(bracelet);
    }

    let expected = bracelet_count(&content)?;

    if u128::from(count) != expected {
        return Err(Box::new(EnError(format!("Enumerated {} bracelets, expected {}", count, expected))))
    }

    if let Some(last) = last {
        info!("Total {}, last one: {}", count, last);
    }

    Ok(())
}
