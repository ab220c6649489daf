use log::{debug, info, warn};

use department_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs::{self, File};
use std::io::Write;

use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod io_semicolon;
pub mod summary;

use crate::tally::summary::*;

/// The results file, relative to the working directory.
pub const DATA_PATH: &str = "data.txt";

#[derive(Debug, Snafu)]
pub enum TallyError {
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading line {lineno}: {source}"))]
    ReadingLine { source: csv::Error, lineno: u64 },
    #[snafu(display("{source}"))]
    ParsingRow { source: RowError },
    #[snafu(display("Error writing the report: {source}"))]
    WritingReport { source: std::io::Error },
    #[snafu(display("Error writing the summary to {path}: {source}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error with the JSON summary: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},
}

pub type TallyResult<T> = Result<T, TallyError>;

/// Everything a run needs to know.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallySettings {
    pub input: String,
    pub policy: CandidateVotePolicy,
    /// Where to write the JSON summary ('stdout' or a file path), if anywhere.
    pub out: Option<String>,
    /// The reference JSON summary to compare against, if any.
    pub reference: Option<String>,
}

/// Runs a full tally and prints the report to the standard output.
pub fn run_tally(settings: &TallySettings) -> TallyResult<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    run_tally_to(settings, &mut handle)
}

/// Runs a full tally and writes the text report to `out`.
///
/// Nothing is written if the input cannot be opened or if one of its rows cannot be read.
pub fn run_tally_to<W: Write>(settings: &TallySettings, out: &mut W) -> TallyResult<()> {
    info!("Attempting to read results file {:?}", settings.input);
    let file = File::open(&settings.input).context(OpeningInputSnafu {
        path: settings.input.clone(),
    })?;
    // The file is closed when the reader is dropped at the end of the scan.
    let tally = io_semicolon::read_tally(file, settings.policy)?;
    debug!("tally: {:?}", tally);

    report::write_report(&tally, out).context(WritingReportSnafu {})?;

    if settings.out.is_none() && settings.reference.is_none() {
        return Ok(());
    }

    let summary_js = serde_json::to_value(build_summary(&tally)).context(ParsingJsonSnafu {})?;
    let pretty_js_summary =
        serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;

    if let Some(out_path) = &settings.out {
        write_summary(out_path, &pretty_js_summary)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &settings.reference {
        let summary_ref = read_summary(summary_p)?;
        if summary_ref != summary_js {
            let pretty_js_summary_ref =
                serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
            warn!("Found differences with the reference summary {}", summary_p);
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_summary.as_str(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
        info!("The summary matches the reference {}", summary_p);
    }

    Ok(())
}

fn write_summary(out_path: &str, pretty_js_summary: &str) -> TallyResult<()> {
    if out_path == "stdout" {
        println!("{}", pretty_js_summary);
        return Ok(());
    }
    info!("Writing summary to {:?}", out_path);
    fs::write(out_path, pretty_js_summary).context(WritingSummarySnafu {
        path: out_path.to_string(),
    })
}

pub fn read_summary(path: &str) -> TallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_file(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn settings(input: &str) -> TallySettings {
        TallySettings {
            input: test_file(input),
            policy: CandidateVotePolicy::DefaultToZero,
            out: None,
            reference: None,
        }
    }

    fn run_to_string(settings: &TallySettings) -> (TallyResult<()>, String) {
        let mut buf: Vec<u8> = Vec::new();
        let res = run_tally_to(settings, &mut buf);
        (res, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn sample_report() {
        let (res, output) = run_to_string(&settings("sample.txt"));
        assert!(res.is_ok());
        let expected = "\
Total votes: 300
Candidate: Alice Votes: 182
Candidate: Bob Votes: 115
Department: 75 Candidate: Alice Votes: 90
Department: 75 Candidate: Bob Votes: 60
Department: 13 Candidate: Alice Votes: 82
Department: 13 Candidate: Bob Votes: 50
Department: 69 Candidate: Alice Votes: 10
Department: 69 Candidate: Bob Votes: 5
# 1 : 75
# 2 : 13
# 3 : 69
";
        assert_eq!(output, expected);
    }

    #[test]
    fn missing_input() {
        let (res, output) = run_to_string(&settings("no_such_file.txt"));
        assert!(matches!(res, Err(TallyError::OpeningInput { .. })));
        assert!(output.is_empty());
    }

    #[test]
    fn strict_candidate_votes() {
        let mut s = settings("sample.txt");
        s.policy = CandidateVotePolicy::FailFast;
        let (res, output) = run_to_string(&s);
        match res {
            Err(TallyError::ParsingRow {
                source: RowError::InvalidCandidateVotes { lineno, candidate, .. },
            }) => {
                assert_eq!(lineno, 6);
                assert_eq!(candidate, "Bob");
            }
            x => panic!("unexpected result {:?}", x),
        }
        assert!(output.is_empty());
    }

    #[test]
    fn matching_reference() {
        let mut s = settings("sample.txt");
        s.reference = Some(test_file("sample_expected_summary.json"));
        let (res, _) = run_to_string(&s);
        assert!(res.is_ok(), "{:?}", res);
    }

    #[test]
    fn differing_reference() {
        let mut s = settings("sample.txt");
        s.reference = Some(test_file("sample_wrong_summary.json"));
        let (res, _) = run_to_string(&s);
        assert!(matches!(res, Err(TallyError::ReferenceMismatch {})));
    }

    #[test]
    fn summary_written_to_file() {
        let out_path =
            std::env::temp_dir().join(format!("dtally-summary-{}.json", std::process::id()));
        let out_str = out_path.display().to_string();
        let mut s = settings("sample.txt");
        s.out = Some(out_str.clone());
        let (res, _) = run_to_string(&s);
        assert!(res.is_ok(), "{:?}", res);

        let written = read_summary(&out_str).unwrap();
        let expected = read_summary(&test_file("sample_expected_summary.json")).unwrap();
        assert_eq!(written, expected);
        let _ = fs::remove_file(out_path);
    }
}
