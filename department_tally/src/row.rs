use log::{debug, warn};

use crate::config::*;

/// The delimiter between the fields of a row.
pub const FIELD_DELIMITER: char = ';';

/// Parses one raw line of the results file.
pub fn parse_line(
    lineno: u64,
    line: &str,
    layout: &RowLayout,
    policy: CandidateVotePolicy,
) -> Result<Record, RowError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    parse_fields(lineno, &fields, layout, policy)
}

/// Parses a row that has already been split into fields.
///
/// The length of the row is checked against the layout before any field is read.
/// An unreadable total is logged and counted as zero; an unreadable candidate count
/// follows the given policy.
pub fn parse_fields(
    lineno: u64,
    fields: &[&str],
    layout: &RowLayout,
    policy: CandidateVotePolicy,
) -> Result<Record, RowError> {
    check_length(lineno, fields.len(), layout)?;

    let department = fields[layout.department].to_string();

    let total_content = fields[layout.total_votes];
    let total_votes = match total_content.parse::<i64>() {
        Ok(x) => x,
        Err(e) => {
            warn!(
                "line {}: could not read the total votes {:?}: {}",
                lineno, total_content, e
            );
            0
        }
    };

    let candidate_votes = parse_candidate_votes(lineno, fields, layout, policy)?;
    debug!(
        "parse_fields: line {}: department {:?} total {} candidates {:?}",
        lineno, department, total_votes, candidate_votes
    );

    Ok(Record {
        candidate_votes,
        department,
        total_votes,
    })
}

fn check_length(lineno: u64, found: usize, layout: &RowLayout) -> Result<(), RowError> {
    let expected = layout.min_fields();
    if found < expected {
        return Err(RowError::TooShort {
            lineno,
            expected,
            found,
        });
    }
    // The last block may be cut short, but not before the fields that are read.
    let last_block = (found - layout.first_candidate) % layout.candidate_block_len;
    if last_block != 0 && last_block < layout.min_candidate_fields() {
        return Err(RowError::TruncatedCandidateBlock { lineno, found });
    }
    Ok(())
}

fn parse_candidate_votes(
    lineno: u64,
    fields: &[&str],
    layout: &RowLayout,
    policy: CandidateVotePolicy,
) -> Result<Vec<(String, i64)>, RowError> {
    let mut res: Vec<(String, i64)> = Vec::new();
    for block in fields[layout.first_candidate..].chunks(layout.candidate_block_len) {
        let name = block[layout.candidate_name_offset];
        let content = block[layout.candidate_votes_offset];
        let votes = match (content.parse::<i64>(), policy) {
            (Ok(x), _) => x,
            (Err(_), CandidateVotePolicy::DefaultToZero) => 0,
            (Err(_), CandidateVotePolicy::FailFast) => {
                return Err(RowError::InvalidCandidateVotes {
                    lineno,
                    candidate: name.to_string(),
                    content: content.to_string(),
                });
            }
        };
        // A name repeated in the same row keeps the last count.
        match res.iter().position(|(n, _)| n == name) {
            Some(idx) => res[idx].1 = votes,
            None => res.push((name.to_string(), votes)),
        }
    }
    Ok(res)
}

/// Builds a row in the results layout, with the given candidate blocks.
#[cfg(test)]
pub(crate) fn make_row(department: &str, total: &str, candidates: &[(&str, &str)]) -> String {
    let mut fields: Vec<String> = (0..23).map(|i| format!("f{}", i)).collect();
    fields[1] = department.to_string();
    fields[10] = total.to_string();
    for (name, votes) in candidates {
        fields.extend([
            name.to_string(),
            "M".to_string(),
            votes.to_string(),
            "1.0".to_string(),
            "2.0".to_string(),
            "x".to_string(),
            "y".to_string(),
        ]);
    }
    fields.join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn reads_department_total_and_candidates() {
        init_logger();
        let line = make_row("75", "100", &[("Alice", "60"), ("Bob", "40")]);
        let record = parse_line(
            2,
            &line,
            &RowLayout::RESULTS_FILE,
            CandidateVotePolicy::DefaultToZero,
        )
        .unwrap();
        assert_eq!(record.department, "75");
        assert_eq!(record.total_votes, 100);
        assert_eq!(
            record.candidate_votes,
            vec![("Alice".to_string(), 60), ("Bob".to_string(), 40)]
        );
    }

    #[test]
    fn unreadable_total_counts_as_zero() {
        init_logger();
        let line = make_row("13", "abc", &[("Alice", "5")]);
        let record = parse_line(
            3,
            &line,
            &RowLayout::RESULTS_FILE,
            CandidateVotePolicy::DefaultToZero,
        )
        .unwrap();
        assert_eq!(record.total_votes, 0);
        assert_eq!(record.candidate_votes, vec![("Alice".to_string(), 5)]);
    }

    #[test]
    fn unreadable_candidate_votes_default_to_zero() {
        init_logger();
        let line = make_row("13", "10", &[("Alice", "n/a"), ("Bob", "7")]);
        let record = parse_line(
            2,
            &line,
            &RowLayout::RESULTS_FILE,
            CandidateVotePolicy::DefaultToZero,
        )
        .unwrap();
        assert_eq!(
            record.candidate_votes,
            vec![("Alice".to_string(), 0), ("Bob".to_string(), 7)]
        );
    }

    #[test]
    fn unreadable_candidate_votes_fail_fast() {
        init_logger();
        let line = make_row("13", "10", &[("Alice", "n/a")]);
        let res = parse_line(
            4,
            &line,
            &RowLayout::RESULTS_FILE,
            CandidateVotePolicy::FailFast,
        );
        assert_eq!(
            res,
            Err(RowError::InvalidCandidateVotes {
                lineno: 4,
                candidate: "Alice".to_string(),
                content: "n/a".to_string(),
            })
        );
    }

    #[test]
    fn short_row() {
        init_logger();
        let res = parse_line(
            7,
            "a;75;c",
            &RowLayout::RESULTS_FILE,
            CandidateVotePolicy::DefaultToZero,
        );
        assert_eq!(
            res,
            Err(RowError::TooShort {
                lineno: 7,
                expected: 23,
                found: 3
            })
        );
    }

    #[test]
    fn truncated_candidate_block() {
        init_logger();
        let mut line = make_row("75", "100", &[("Alice", "60")]);
        line.push_str(";Bob;M");
        let res = parse_line(
            2,
            &line,
            &RowLayout::RESULTS_FILE,
            CandidateVotePolicy::DefaultToZero,
        );
        assert_eq!(
            res,
            Err(RowError::TruncatedCandidateBlock {
                lineno: 2,
                found: 32
            })
        );
    }

    #[test]
    fn short_last_candidate_block() {
        init_logger();
        let mut line = make_row("75", "100", &[("Alice", "60")]);
        line.push_str(";Bob;M;6");
        let record = parse_line(
            2,
            &line,
            &RowLayout::RESULTS_FILE,
            CandidateVotePolicy::DefaultToZero,
        )
        .unwrap();
        assert_eq!(
            record.candidate_votes,
            vec![("Alice".to_string(), 60), ("Bob".to_string(), 6)]
        );
    }

    #[test]
    fn negative_counts() {
        init_logger();
        let line = make_row("75", "-5", &[("Alice", "-3"), ("Bob", "+2")]);
        let record = parse_line(
            2,
            &line,
            &RowLayout::RESULTS_FILE,
            CandidateVotePolicy::FailFast,
        )
        .unwrap();
        assert_eq!(record.total_votes, -5);
        assert_eq!(
            record.candidate_votes,
            vec![("Alice".to_string(), -3), ("Bob".to_string(), 2)]
        );
    }

    #[test]
    fn row_without_candidates() {
        init_logger();
        let line = make_row("2A", "12", &[]);
        let record = parse_line(
            2,
            &line,
            &RowLayout::RESULTS_FILE,
            CandidateVotePolicy::DefaultToZero,
        )
        .unwrap();
        assert!(record.candidate_votes.is_empty());
        assert_eq!(record.total_votes, 12);
    }

    #[test]
    fn repeated_candidate_keeps_last_count() {
        let line = make_row("75", "100", &[("Alice", "60"), ("Alice", "3")]);
        let record = parse_line(
            2,
            &line,
            &RowLayout::RESULTS_FILE,
            CandidateVotePolicy::DefaultToZero,
        )
        .unwrap();
        assert_eq!(record.candidate_votes, vec![("Alice".to_string(), 3)]);
    }
}
