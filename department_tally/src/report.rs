//! Text rendering of a tally.

use std::io::{Result, Write};

use crate::Tally;

/// Writes the complete report: the grand total, then the three sections.
pub fn write_report<W: Write>(tally: &Tally, out: &mut W) -> Result<()> {
    writeln!(out, "Total votes: {}", tally.total_votes)?;
    write_candidates(tally, out)?;
    write_candidate_departments(tally, out)?;
    write_department_ranking(tally, out)
}

pub fn write_candidates<W: Write>(tally: &Tally, out: &mut W) -> Result<()> {
    for (candidate, votes) in tally.votes_by_candidate.iter() {
        writeln!(out, "Candidate: {} Votes: {}", candidate, votes)?;
    }
    Ok(())
}

pub fn write_candidate_departments<W: Write>(tally: &Tally, out: &mut W) -> Result<()> {
    for ((candidate, department), votes) in tally.votes_by_candidate_department.iter() {
        writeln!(
            out,
            "Department: {} Candidate: {} Votes: {}",
            department, candidate, votes
        )?;
    }
    Ok(())
}

pub fn write_department_ranking<W: Write>(tally: &Tally, out: &mut W) -> Result<()> {
    for (idx, (department, _)) in tally.department_ranking().iter().enumerate() {
        writeln!(out, "# {} : {}", idx + 1, department)?;
    }
    Ok(())
}
