use std::error::Error;
use crate::{necklace_count, bracelet_count};
use super::{App, Command, CliError, JobArgs, console_level};

pub struct Count {
    verbosity: u64,
    job_args:  JobArgs,
    enumerate: bool,
    necklaces: bool,
}

impl Count {
    pub fn new_command(app: &App) -> Box<dyn Command> {
        let verbosity = app.occurrences_of("verbose");
        let job_args = JobArgs::from_app(app);
        let enumerate = app.is_present("enumerate");
        let necklaces = app.is_present("necklaces");

        Box::new(Self { verbosity, job_args, enumerate, necklaces })
    }
}

impl Command for Count {
    fn name_of_log_file(&self) -> String {
        self.job_args.name_of_log_file("count")
    }

    fn console_level(&self) -> Option<log::LevelFilter> {
        Some(console_level(self.verbosity))
    }

    fn run(&self) -> Result<(), Box<dyn Error>> {
        let job = self.job_args.load()?;
        let content = job.get_content();

        if self.necklaces {
            if !job.get_filter().is_empty() {
                return Err(Box::new(CliError::NecklacesWithFilter))
            }

            println!("{}", necklace_count(content)?);
        } else if !job.get_filter().is_empty() {
            // Filtered counts have no closed form.
            if !self.enumerate {
                info!("Counting filtered isomers by enumeration");
            }

            let filter = job.isomer_filter()?;
            let mut count = 0_u64;

            for bracelet in filter.select(&job.generator()) {
                bracelet?;
                count += 1;
            }

            println!("{}", count);
        } else if self.enumerate {
            println!("{}", job.generator().count());
        } else {
            println!("{}", bracelet_count(content)?);
        }

        Ok(())
    }
}
