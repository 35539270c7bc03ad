use std::{collections::HashSet, error::Error};
use crate::{Bracelet, Sequence, bracelet_count};
use super::{App, Command, CliError, JobArgs, console_level};

const DEFAULT_NUM_TRIALS: usize = 100;

/// Cross-checks the generator: every representative is canonical and
/// unique, their number matches the closed-form count, and random
/// arrangements of the content map onto generated representatives.
pub struct Verify {
    verbosity:  u64,
    job_args:   JobArgs,
    num_trials: Result<usize, String>,
}

impl Verify {
    pub fn new_command(app: &App) -> Box<dyn Command> {
        let verbosity = app.occurrences_of("verbose");
        let job_args = JobArgs::from_app(app);
        let num_trials = match app.value_of("TRIALS") {
            Some(v) => v.parse().map_err(|_| v.to_owned()),
            None => Ok(DEFAULT_NUM_TRIALS),
        };

        Box::new(Self { verbosity, job_args, num_trials })
    }
}

impl Command for Verify {
    fn name_of_log_file(&self) -> String {
        self.job_args.name_of_log_file("verify")
    }

    fn console_level(&self) -> Option<log::LevelFilter> {
        Some(console_level(self.verbosity))
    }

    fn run(&self) -> Result<(), Box<dyn Error>> {
        let num_trials = self.num_trials.clone().map_err(CliError::CountInvalid)?;
        let job = self.job_args.load()?;
        let content = job.get_content();
        let alphabet = job.get_alphabet();

        info!("Verifying isomers of {}", alphabet.with(content));

        let mut representatives: HashSet<Sequence> = HashSet::new();

        for bracelet in job.generator().iter() {
            let representative = bracelet.into_sequence();

            if !representative.is_canonical() {
                return Err(Box::new(CliError::VerificationFailed(format!(
                    "{} isn't a canonical representative",
                    representative
                ))))
            }

            if !representatives.insert(representative.clone()) {
                return Err(Box::new(CliError::VerificationFailed(format!(
                    "{} generated more than once",
                    representative
                ))))
            }
        }

        let expected = bracelet_count(content)?;

        if expected != representatives.len() as u128 {
            return Err(Box::new(CliError::VerificationFailed(format!(
                "generated {} isomers, expected {}",
                representatives.len(),
                expected
            ))))
        }

        info!("Generated {} canonical representatives", expected);

        let mut rng = rand::thread_rng();

        for _ in 0..num_trials {
            let arrangement = content.random_arrangement(&mut rng);
            let bracelet = Bracelet::of(&arrangement);

            trace!("{} -> {}", arrangement, bracelet);

            if !representatives.contains(bracelet.representative()) {
                return Err(Box::new(CliError::VerificationFailed(format!(
                    "{} isn't equivalent to any generated isomer",
                    arrangement
                ))))
            }
        }

        info!("Checked {} random arrangements", num_trials);
        println!("OK");

        Ok(())
    }
}
