mod config;
pub mod manual;
pub mod report;
pub mod row;

use log::{debug, info};

use std::{collections::HashMap, hash::Hash};

pub use crate::config::*;
pub use crate::row::{parse_fields, parse_line};

// **** Aggregated structures ****

/// Vote counts that remember the order in which their keys were first seen.
///
/// Enumeration follows that order, so that the reports are the same from one run to the next.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct OrderedCounts<K: Eq + Hash + Clone> {
    entries: Vec<(K, i64)>,
    // Position of each key in `entries`.
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> OrderedCounts<K> {
    pub fn new() -> Self {
        OrderedCounts {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds `count` to the entry of `key`, creating it at the end if it is new.
    ///
    /// Returns the new count, or `None` if the sum does not fit. The entry is then left untouched.
    pub fn add(&mut self, key: K, count: i64) -> Option<i64> {
        match self.index.get(&key) {
            Some(&pos) => {
                let sum = self.entries[pos].1.checked_add(count)?;
                self.entries[pos].1 = sum;
                Some(sum)
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, count));
                Some(count)
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<i64> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for OrderedCounts<K> {
    fn default() -> Self {
        OrderedCounts::new()
    }
}

/// The result of a full pass over a results file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Tally {
    /// Sum of the row totals.
    pub total_votes: i64,
    pub votes_by_candidate: OrderedCounts<String>,
    /// Keyed by (candidate, department).
    pub votes_by_candidate_department: OrderedCounts<(String, String)>,
    /// Sum of the row totals, by department.
    pub department_totals: OrderedCounts<String>,
}

impl Tally {
    /// Folds one row into the tally.
    ///
    /// Fails if one of the sums no longer fits; the tally is then only partially updated.
    pub fn add_record(&mut self, lineno: u64, record: Record) -> Result<(), RowError> {
        let overflow = RowError::VoteOverflow { lineno };
        for (candidate, votes) in record.candidate_votes {
            self.votes_by_candidate_department
                .add((candidate.clone(), record.department.clone()), votes)
                .ok_or_else(|| overflow.clone())?;
            self.votes_by_candidate
                .add(candidate, votes)
                .ok_or_else(|| overflow.clone())?;
        }
        self.department_totals
            .add(record.department, record.total_votes)
            .ok_or_else(|| overflow.clone())?;
        self.total_votes = self
            .total_votes
            .checked_add(record.total_votes)
            .ok_or(overflow)?;
        Ok(())
    }

    /// The departments sorted by decreasing total votes.
    ///
    /// Departments with the same total keep the order in which they were first seen.
    pub fn department_ranking(&self) -> Vec<(String, i64)> {
        let mut ranking: Vec<(String, i64)> = self
            .department_totals
            .iter()
            .map(|(d, c)| (d.clone(), c))
            .collect();
        // sort_by is stable.
        ranking.sort_by(|a, b| b.1.cmp(&a.1));
        ranking
    }
}

/// Folds the rows of a results file, one at a time.
///
/// The first row given to the aggregator is the header: it is dropped without being looked at.
///
/// ```
/// use department_tally::{Aggregator, CandidateVotePolicy, RowLayout};
///
/// let mut agg = Aggregator::new(RowLayout::RESULTS_FILE, CandidateVotePolicy::DefaultToZero);
/// agg.push_line(1, "this;is;the;header")?;
/// let tally = agg.finish();
/// assert_eq!(tally.total_votes, 0);
///
/// # Ok::<(), department_tally::RowError>(())
/// ```
pub struct Aggregator {
    layout: RowLayout,
    policy: CandidateVotePolicy,
    header_skipped: bool,
    num_rows: usize,
    tally: Tally,
}

impl Aggregator {
    pub fn new(layout: RowLayout, policy: CandidateVotePolicy) -> Aggregator {
        debug_assert!(layout.is_consistent());
        Aggregator {
            layout,
            policy,
            header_skipped: false,
            num_rows: 0,
            tally: Tally::default(),
        }
    }

    /// Adds a row that has already been split into fields.
    pub fn push_fields(&mut self, lineno: u64, fields: &[&str]) -> Result<(), RowError> {
        if !self.header_skipped {
            debug!("push_fields: line {}: skipping header", lineno);
            self.header_skipped = true;
            return Ok(());
        }
        let record = parse_fields(lineno, fields, &self.layout, self.policy)?;
        self.tally.add_record(lineno, record)?;
        self.num_rows += 1;
        Ok(())
    }

    /// Adds a raw line.
    pub fn push_line(&mut self, lineno: u64, line: &str) -> Result<(), RowError> {
        let fields: Vec<&str> = line.split(row::FIELD_DELIMITER).collect();
        self.push_fields(lineno, &fields)
    }

    pub fn finish(self) -> Tally {
        info!(
            "Processed {} rows: {} candidates, {} departments, {} votes",
            self.num_rows,
            self.tally.votes_by_candidate.len(),
            self.tally.department_totals.len(),
            self.tally.total_votes
        );
        self.tally
    }
}

/// Runs a full pass over the lines of a results file, header included.
///
/// Arguments:
/// * `lines` the lines of the file, in order. The first one is the header.
/// * `layout` the position of the columns
/// * `policy` what to do with unreadable candidate counts
pub fn tally_lines<I, S>(
    lines: I,
    layout: &RowLayout,
    policy: CandidateVotePolicy,
) -> Result<Tally, RowError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut agg = Aggregator::new(*layout, policy);
    for (idx, line) in lines.into_iter().enumerate() {
        agg.push_line((idx + 1) as u64, line.as_ref())?;
    }
    Ok(agg.finish())
}
