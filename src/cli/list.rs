use std::error::Error;
use crate::Bracelet;
use super::{App, Command, JobArgs, console_level};

pub struct List {
    verbosity:  u64,
    job_args:   JobArgs,
    plain:      bool,
    unsorted:   bool,
    violations: bool,
}

impl List {
    pub fn new_command(app: &App) -> Box<dyn Command> {
        let verbosity = app.occurrences_of("verbose");
        let job_args = JobArgs::from_app(app);
        let plain = app.is_present("plain");
        let unsorted = app.is_present("unsorted");
        let violations = app.is_present("violations");

        Box::new(Self { verbosity, job_args, plain, unsorted, violations })
    }
}

impl Command for List {
    fn name_of_log_file(&self) -> String {
        self.job_args.name_of_log_file("list")
    }

    fn console_level(&self) -> Option<log::LevelFilter> {
        Some(console_level(self.verbosity))
    }

    fn run(&self) -> Result<(), Box<dyn Error>> {
        let job = self.job_args.load()?;
        let alphabet = job.get_alphabet();
        let filter = job.isomer_filter()?;

        info!("Listing isomers of {}", alphabet.with(job.get_content()));

        let show = |bracelet: &Bracelet| {
            if self.plain {
                println!("{}", bracelet)
            } else {
                println!("{}", alphabet.with(bracelet))
            }
        };

        if self.unsorted {
            let mut num_selected = 0;

            for bracelet in filter.select(&job.generator()) {
                show(&bracelet?);
                num_selected += 1;
            }

            info!("Found {} isomers", num_selected);

            return Ok(())
        }

        let mut selected = Vec::new();
        let mut num_all = 0;

        for bracelet in job.generator().iter() {
            num_all += 1;

            let verdict = filter.check(&bracelet)?;

            if verdict.is_accepted() {
                selected.push(bracelet);
            } else if self.violations {
                for violation in verdict.get_violations() {
                    debug!("{} rejected: {}", alphabet.with(&bracelet), alphabet.with(violation));
                }
            }
        }

        selected.sort();

        println!("{}", alphabet.with(job.get_content()));
        println!("{} isomers", selected.len());

        if selected.len() < num_all {
            info!("{} of {} isomers rejected", num_all - selected.len(), num_all);
        }

        for bracelet in selected.iter() {
            show(bracelet);
        }

        Ok(())
    }
}
