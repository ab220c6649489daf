use clap::Parser;

/// Tallies the election results found in `data.txt`, by candidate and by department.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) A reference file containing the summary of the tally in JSON format. If provided, dtally will
    /// check that the tallied summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the tally will be written in JSON format to the given
    /// location, in addition to the text report.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// If passed as an argument, an unreadable candidate vote count stops the tally instead of counting as zero.
    #[clap(long, takes_value = false)]
    pub strict_candidate_votes: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
