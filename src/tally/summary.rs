use department_tally::Tally;
use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub name: String,
    pub votes: i64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDepartmentSummary {
    pub department: String,
    pub candidate: String,
    pub votes: i64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub department: String,
    #[serde(rename = "totalVotes")]
    pub total_votes: i64,
}

/// The machine-readable version of the text report.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TallySummary {
    #[serde(rename = "totalVotes")]
    pub total_votes: i64,
    pub candidates: Vec<CandidateSummary>,
    pub departments: Vec<CandidateDepartmentSummary>,
    pub ranking: Vec<RankingEntry>,
}

pub fn build_summary(tally: &Tally) -> TallySummary {
    let candidates = tally
        .votes_by_candidate
        .iter()
        .map(|(name, votes)| CandidateSummary {
            name: name.clone(),
            votes,
        })
        .collect();

    let departments = tally
        .votes_by_candidate_department
        .iter()
        .map(|((candidate, department), votes)| CandidateDepartmentSummary {
            department: department.clone(),
            candidate: candidate.clone(),
            votes,
        })
        .collect();

    let ranking = tally
        .department_ranking()
        .into_iter()
        .enumerate()
        .map(|(idx, (department, total_votes))| RankingEntry {
            rank: idx + 1,
            department,
            total_votes,
        })
        .collect();

    TallySummary {
        total_votes: tally.total_votes,
        candidates,
        departments,
        ranking,
    }
}
