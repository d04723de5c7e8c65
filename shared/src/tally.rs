use std::fmt;

use crate::models::Candidate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Standing {
    NoVotes,
    Leader { name: String, votes: i64 },
    Tie { names: Vec<String>, votes: i64 },
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standing::NoVotes => f.write_str("No votes cast"),
            Standing::Leader { name, votes } => write!(f, "Leading: {} with {} votes", name, votes),
            Standing::Tie { names, votes } => write!(f, "Tied at {} votes: {}", votes, names.join(", ")),
        }
    }
}

/// Summary of the candidate table at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    rows: Vec<(String, i64)>,
}

impl Tally {
    pub fn new(candidates: &[Candidate]) -> Self {
        Self {
            rows: candidates.iter().map(|c| (c.name.clone(), c.votes)).collect(),
        }
    }

    pub fn total_votes(&self) -> i64 {
        self.rows.iter().map(|(_, votes)| votes).sum()
    }

    /// Share of the total in percent, rounded down. Zero when no votes were cast.
    pub fn share(&self, name: &str) -> Option<u8> {
        let total = self.total_votes();
        self.rows.iter()
            .find(|(n, _)| n == name)
            .map(|(_, votes)| if total == 0 { 0 } else { (votes * 100 / total) as u8 })
    }

    pub fn standing(&self) -> Standing {
        let Some(top) = self.rows.iter().map(|(_, votes)| *votes).max() else {
            return Standing::NoVotes;
        };
        if top == 0 {
            return Standing::NoVotes;
        }

        let mut names: Vec<String> = self.rows.iter()
            .filter(|(_, votes)| *votes == top)
            .map(|(name, _)| name.clone())
            .collect();

        match names.len() {
            1 => Standing::Leader { name: names.remove(0), votes: top },
            _ => Standing::Tie { names, votes: top },
        }
    }

    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return "No results".into();
        }
        let mut lines: Vec<String> = self.rows.iter()
            .map(|(name, votes)| format!("{}: {} votes ({}%)", name, votes, self.share(name).unwrap_or(0)))
            .collect();
        lines.push(format!("Total votes: {}", self.total_votes()));
        lines.push(self.standing().to_string());
        lines.join("\n")
    }
}
