// Primitives for reading the semicolon-delimited results file.

use std::borrow::Cow;
use std::io::Read;

use department_tally::{Aggregator, CandidateVotePolicy, RowLayout, Tally};
use log::debug;
use snafu::ResultExt;

use crate::tally::{ParsingRowSnafu, ReadingLineSnafu, TallyResult};

/// Reads a whole results file and tallies it. The first line is the header.
///
/// Fields are taken verbatim: the export does not quote its fields. Bytes that are not valid UTF-8
/// are replaced rather than rejected. Blank lines are skipped.
pub fn read_tally<R: Read>(input: R, policy: CandidateVotePolicy) -> TallyResult<Tally> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input);

    let mut agg = Aggregator::new(RowLayout::RESULTS_FILE, policy);
    let mut line = csv::ByteRecord::new();
    loop {
        match rdr.read_byte_record(&mut line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                // I/O errors carry no position: use the one of the reader.
                let lineno = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or_else(|| rdr.position().line());
                return Err(e).context(ReadingLineSnafu { lineno });
            }
        }
        let lineno = line
            .position()
            .map(|p| p.line())
            .unwrap_or_else(|| rdr.position().line());
        let decoded: Vec<Cow<str>> = line.iter().map(String::from_utf8_lossy).collect();
        let fields: Vec<&str> = decoded.iter().map(|f| f.as_ref()).collect();
        debug!("read_tally: line {}: {} fields", lineno, fields.len());
        agg.push_fields(lineno, &fields).context(ParsingRowSnafu {})?;
    }
    Ok(agg.finish())
}
