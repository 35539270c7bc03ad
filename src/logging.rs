use std::{fmt, path::PathBuf};
use fern::colors::{Color, ColoredLevelConfig};

macro_rules! error_pre_log {
    ($lgr:expr,$($arg:tt)*) => (eprintln!("{}{}{}",
                                          $lgr.console_prefix(log::Level::Error),
                                          format_args!($($arg)*),
                                          $lgr.console_suffix()));
}

/// Builder of the global logger: colored console output and an
/// optional log file, each with its own level.  Records written to
/// the file are tagged with the name of the running command, if
/// given.
///
/// Errors raised while setting up the logger can't be logged, so
/// they are printed to `stderr` instead, and the logger is built
/// without the failing part.
#[derive(Default)]
pub struct Logger {
    app_name:   String,
    command:    Option<String>,
    dispatcher: Option<fern::Dispatch>,
    colors:     ColoredLevelConfig,
    directory:  Option<PathBuf>,
}

impl Logger {
    pub fn new<S: AsRef<str>>(app_name: S) -> Self {
        let app_name = app_name.as_ref().to_owned();
        let dispatcher = Some(fern::Dispatch::new());

        let colors = ColoredLevelConfig::new()
            .trace(Color::Blue)
            .debug(Color::Yellow)
            .info(Color::Green)
            .warn(Color::Magenta)
            .error(Color::Red);

        Self { app_name, command: None, dispatcher, colors, directory: None }
    }

    fn chain(&mut self, output: fern::Dispatch) {
        if let Some(dispatcher) = self.dispatcher.take() {
            self.dispatcher = Some(dispatcher.chain(output));
        } else {
            error_pre_log!(self, "Logger can't be extended (probably it has already been applied).");
        }
    }

    /// Must precede [`with_file()`](Logger::with_file) to have an
    /// effect on file records.
    pub fn with_command<S: AsRef<str>>(mut self, command: S) -> Self {
        self.command = Some(command.as_ref().to_owned());
        self
    }

    pub fn with_console(mut self, level: log::LevelFilter) -> Self {
        let colors = self.colors;

        self.chain(
            fern::Dispatch::new()
                .format(move |out, message, record| match record.level() {
                    log::Level::Info => out.finish(format_args!("{}.", message)),
                    log::Level::Warn | log::Level::Debug => {
                        out.finish(format_args!("[{}]\t{}.", colors.color(record.level()), message))
                    }
                    _ => out.finish(format_args!(
                        "[{}]\t\x1B[{}m{}.\x1B[0m",
                        colors.color(record.level()),
                        colors.get_color(&record.level()).to_fg_str(),
                        message
                    )),
                })
                .level(level)
                .chain(std::io::stderr()),
        );

        self
    }

    pub fn with_explicit_directory<S: AsRef<str>>(mut self, dirname: S) -> Self {
        let path = PathBuf::from(dirname.as_ref());

        if path.is_dir() {
            self.directory = Some(path);
        } else if path.exists() {
            error_pre_log!(
                self,
                "Can't use \"{}\" as a logging directory, because it exists and isn't a directory.",
                path.display(),
            );
            self.directory = None;
        } else if let Err(err) = std::fs::create_dir(&path) {
            error_pre_log!(self, "Can't create \"{}\" directory: {}.", path.display(), err);
            self.directory = None;
        } else {
            self.directory = Some(path);
        }

        self
    }

    pub fn with_file<S: AsRef<str>>(mut self, filename: S, level: log::LevelFilter) -> Self {
        if self.directory.is_none() {
            let path = PathBuf::from("log");

            if path.is_dir() {
                self.directory = Some(path);
            } else {
                error_pre_log!(
                    self,
                    "Logging to file is disabled, because directory \"log\" doesn't \
                     exist...\n\tCreate this directory or run '{} --log-dir <LOG_DIR> ...'.",
                    self.app_name
                );
            }
        }

        if let Some(path) = self.directory.as_ref().map(|dir| dir.join(filename.as_ref())) {
            let log_file =
                std::fs::OpenOptions::new().write(true).create(true).truncate(true).append(false).open(path);

            let command = self.command.clone();

            match log_file {
                Ok(log_file) => self.chain(
                    fern::Dispatch::new()
                        .format(move |out, message, record| {
                            out.finish(format_args!(
                                "{}",
                                file_record(command.as_deref(), record.target(), record.level(), message)
                            ))
                        })
                        .level(level)
                        .chain(log_file),
                ),
                Err(err) => {
                    error_pre_log!(self, "{}.", err);
                }
            }
        }

        self
    }

    pub fn get_directory(&self) -> Option<&PathBuf> {
        self.directory.as_ref()
    }

    pub fn apply(&mut self) {
        if let Some(dispatcher) = self.dispatcher.take() {
            dispatcher.apply().unwrap_or_else(|err| error_pre_log!(self, "{}.", err));
        } else {
            error_pre_log!(self, "Logger can't be applied (probably it has already been applied).");
        }
    }

    fn console_prefix(&self, level: log::Level) -> String {
        format!("[{}]\t\x1B[{}m", self.colors.color(level), self.colors.get_color(&level).to_fg_str())
    }

    fn console_suffix(&self) -> &str {
        "\x1B[0m"
    }
}

fn file_record(command: Option<&str>, target: &str, level: log::Level, message: &fmt::Arguments) -> String {
    match command {
        Some(command) => format!("[{}][{}][{}] {}.", command, target, level, message),
        None => format!("[{}][{}] {}.", target, level, message),
    }
}
