mod args;
mod tally;

use clap::Parser;
use department_tally::CandidateVotePolicy;
use log::{debug, LevelFilter};

use crate::args::Args;
use crate::tally::{run_tally, TallyError, TallySettings, DATA_PATH};

fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .target(env_logger::Target::Stdout)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("args: {:?}", args);

    let settings = TallySettings {
        input: DATA_PATH.to_string(),
        policy: if args.strict_candidate_votes {
            CandidateVotePolicy::FailFast
        } else {
            CandidateVotePolicy::DefaultToZero
        },
        out: args.out,
        reference: args.reference,
    };

    match run_tally(&settings) {
        Ok(()) => {}
        // Nothing was read: report and stop there.
        Err(e @ TallyError::OpeningInput { .. }) => {
            eprintln!("{}", e);
        }
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            std::process::exit(1);
        }
    }
}
