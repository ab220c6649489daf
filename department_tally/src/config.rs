// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The position of the columns in a row of the results file.
///
/// The results are published as a rigid tabular export: a fixed prefix of
/// per-row columns, followed by one block of columns per candidate.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct RowLayout {
    pub(crate) department: usize,
    pub(crate) total_votes: usize,
    /// Index of the first column of the first candidate block.
    pub(crate) first_candidate: usize,
    /// Number of columns in each candidate block.
    pub(crate) candidate_block_len: usize,
    pub(crate) candidate_name_offset: usize,
    pub(crate) candidate_votes_offset: usize,
}

impl RowLayout {
    /// The layout of the published results file.
    pub const RESULTS_FILE: RowLayout = RowLayout {
        department: 1,
        total_votes: 10,
        first_candidate: 23,
        candidate_block_len: 7,
        candidate_name_offset: 0,
        candidate_votes_offset: 2,
    };

    /// The smallest number of fields a row can hold: everything up to the candidate blocks.
    pub fn min_fields(&self) -> usize {
        self.first_candidate
            .max(self.department + 1)
            .max(self.total_votes + 1)
    }

    /// The smallest number of fields the last candidate block can hold: the last block may
    /// stop right after the fields that are read.
    pub fn min_candidate_fields(&self) -> usize {
        self.candidate_name_offset.max(self.candidate_votes_offset) + 1
    }

    // Non-empty blocks, and both read offsets inside a block.
    pub(crate) fn is_consistent(&self) -> bool {
        self.candidate_block_len > 0 && self.min_candidate_fields() <= self.candidate_block_len
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        RowLayout::RESULTS_FILE
    }
}

/// What to do when the vote count of a candidate cannot be read.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum CandidateVotePolicy {
    /// The candidate is kept with zero votes for this row. Nothing is reported.
    DefaultToZero,
    /// The whole tally fails.
    FailFast,
}

impl Default for CandidateVotePolicy {
    fn default() -> Self {
        CandidateVotePolicy::DefaultToZero
    }
}

/// One row of the results file, after parsing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Record {
    /// The votes of each candidate, in the order of the candidate blocks.
    pub candidate_votes: Vec<(String, i64)>,
    pub department: String,
    pub total_votes: i64,
}

/// Errors that prevent a row from being read.
///
/// The line numbers start at 1 and include the header.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RowError {
    TooShort {
        lineno: u64,
        expected: usize,
        found: usize,
    },
    TruncatedCandidateBlock {
        lineno: u64,
        found: usize,
    },
    InvalidCandidateVotes {
        lineno: u64,
        candidate: String,
        content: String,
    },
    /// A running sum no longer fits in the vote counters.
    VoteOverflow {
        lineno: u64,
    },
}

impl Error for RowError {}

impl Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::TooShort {
                lineno,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected at least {} fields, found {}",
                lineno, expected, found
            ),
            RowError::TruncatedCandidateBlock { lineno, found } => write!(
                f,
                "line {}: the candidate columns end with an incomplete block ({} fields in the row)",
                lineno, found
            ),
            RowError::InvalidCandidateVotes {
                lineno,
                candidate,
                content,
            } => write!(
                f,
                "line {}: invalid vote count {:?} for candidate {}",
                lineno, content, candidate
            ),
            RowError::VoteOverflow { lineno } => {
                write!(f, "line {}: the vote counts overflow", lineno)
            }
        }
    }
}
