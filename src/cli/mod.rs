mod list;
mod count;
mod verify;

pub use list::List;
pub use count::Count;
pub use verify::Verify;

use std::{fmt, path::PathBuf, error::Error};
use crate::{Alphabet, ContentSpec, Job, Orientation, yaml_script::parse_interface};

pub trait Command {
    fn name_of_log_file(&self) -> String;

    fn console_level(&self) -> Option<log::LevelFilter> {
        None
    }

    fn run(&self) -> Result<(), Box<dyn Error>>;
}

pub struct App<'a> {
    app_name: String,
    bin_name: Option<String>,
    cli_args: clap::ArgMatches<'a>,
}

impl<'a> App<'a> {
    pub fn from_clap<'b>(clap_app: clap::App<'a, 'b>) -> Self {
        let cli_app = clap_app
            .name(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .author(env!("CARGO_PKG_AUTHORS"))
            .about(env!("CARGO_PKG_DESCRIPTION"));

        let app_name = cli_app.get_name().to_owned();
        let bin_name = cli_app.get_bin_name().map(|s| s.to_owned());
        let cli_args = cli_app.get_matches();

        Self { app_name, bin_name, cli_args }
    }

    pub fn get_name(&self) -> &str {
        self.app_name.as_str()
    }

    pub fn get_bin_name(&self) -> Option<&str> {
        self.bin_name.as_deref()
    }

    pub fn subcommand_name(&self) -> Option<&str> {
        self.cli_args.subcommand_name()
    }

    pub fn value_of<S: AsRef<str>>(&self, key: S) -> Option<&str> {
        self.cli_args.subcommand().1.unwrap_or(&self.cli_args).value_of(key)
    }

    pub fn values_of<S: AsRef<str>>(&self, key: S) -> Vec<&str> {
        self.cli_args
            .subcommand()
            .1
            .unwrap_or(&self.cli_args)
            .values_of(key)
            .map(|values| values.collect())
            .unwrap_or_default()
    }

    pub fn occurrences_of<S: AsRef<str>>(&self, key: S) -> u64 {
        self.cli_args.subcommand().1.unwrap_or(&self.cli_args).occurrences_of(key)
    }

    pub fn is_present<S: AsRef<str>>(&self, key: S) -> bool {
        self.cli_args.subcommand().1.unwrap_or(&self.cli_args).is_present(key)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CliError {
    JobMissing,
    JobConflict,
    NamesWithoutComposition,
    NecklacesWithFilter,
    CountInvalid(String),
    VerificationFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use CliError::*;

        match self {
            JobMissing => write!(f, "Neither a job file nor a composition was given"),
            JobConflict => write!(f, "A job file and a composition can't be given together"),
            NamesWithoutComposition => write!(f, "Component names require a composition"),
            NecklacesWithFilter => write!(f, "Necklaces can't be counted under a filter"),
            CountInvalid(count) => write!(f, "Invalid layer count \"{}\"", count),
            VerificationFailed(reason) => write!(f, "Verification failed: {}", reason),
        }
    }
}

impl Error for CliError {}

/// Job-related arguments shared by all commands: either a path to a
/// YAML job description, or a composition given inline, optionally
/// extended with interface constraints.
#[derive(Clone, Debug)]
pub(crate) struct JobArgs {
    main_path:   Option<String>,
    composition: Option<String>,
    names:       Option<String>,
    required:    Vec<String>,
    forbidden:   Vec<String>,
    directed:    bool,
}

impl JobArgs {
    pub(crate) fn from_app(app: &App) -> Self {
        let to_owned = |values: Vec<&str>| -> Vec<String> { values.into_iter().map(|s| s.to_owned()).collect() };

        JobArgs {
            main_path:   app.value_of("JOB").map(|s| s.to_owned()),
            composition: app.value_of("COMPOSITION").map(|s| s.to_owned()),
            names:       app.value_of("NAMES").map(|s| s.to_owned()),
            required:    to_owned(app.values_of("REQUIRE")),
            forbidden:   to_owned(app.values_of("FORBID")),
            directed:    app.is_present("directed"),
        }
    }

    pub(crate) fn name_of_log_file(&self, default_name: &str) -> String {
        if let Some(ref main_path) = self.main_path {
            let mut path = PathBuf::from(main_path);

            if path.set_extension("log") {
                if let Some(file_name) = path.file_name().and_then(|s| s.to_str()) {
                    return file_name.to_owned()
                }
            }
        }

        format!("{}.log", default_name)
    }

    pub(crate) fn load(&self) -> Result<Job, Box<dyn Error>> {
        if self.names.is_some() && self.composition.is_none() {
            return Err(Box::new(CliError::NamesWithoutComposition))
        }

        let job = match (&self.main_path, &self.composition) {
            (Some(path), None) => Job::from_file(path)?,
            (None, Some(composition)) => Job::new(self.parse_composition(composition)?),
            (Some(_), Some(_)) => return Err(Box::new(CliError::JobConflict)),
            (None, None) => return Err(Box::new(CliError::JobMissing)),
        };

        if self.required.is_empty() && self.forbidden.is_empty() && !self.directed {
            return Ok(job)
        }

        let alphabet = job.get_alphabet().clone();
        let mut filter = job.get_filter().clone();

        if self.directed {
            filter = filter.with_orientation(Orientation::Directed);
        }

        for description in self.required.iter() {
            filter = filter.require(parse_interface(&alphabet, description)?);
        }

        for description in self.forbidden.iter() {
            filter = filter.forbid(parse_interface(&alphabet, description)?);
        }

        Ok(job.with_filter(filter))
    }

    fn parse_composition(&self, composition: &str) -> Result<ContentSpec, Box<dyn Error>> {
        let counts: Result<Vec<usize>, _> = composition
            .split(',')
            .map(|s| s.trim().parse().map_err(|_| CliError::CountInvalid(s.trim().to_owned())))
            .collect();
        let counts = counts?;

        let alphabet = match self.names {
            Some(ref names) => Alphabet::from_names(names.split(','))?,
            None => Alphabet::latin(counts.len())?,
        };

        Ok(ContentSpec::new(&alphabet, alphabet.labels().zip(counts))?)
    }
}

pub(crate) fn console_level(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
