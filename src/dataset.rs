use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub titles: u32,
}

impl TeamRecord {
    pub fn new(name: &str, matches_played: u32, wins: u32, losses: u32, titles: u32) -> Self {
        Self {
            name: name.to_string(),
            matches_played,
            wins,
            losses,
            titles,
        }
    }

    /// Wins and losses fit inside matches played. No-results make up the remainder.
    pub fn is_consistent(&self) -> bool {
        u64::from(self.wins) + u64::from(self.losses) <= u64::from(self.matches_played)
    }
}

/// Ordered, immutable team table. Order is the display order for every view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<TeamRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TeamRecord>) -> Result<Self, ConfigurationError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for record in &records {
            if !seen.insert(record.name.as_str()) {
                return Err(ConfigurationError::DuplicateTeam(record.name.clone()));
            }
        }
        Ok(Self { records })
    }

    /// IPL seed table: matches, wins, losses and titles per franchise.
    pub fn ipl() -> Self {
        Self {
            records: vec![
                TeamRecord::new("Chennai Super Kings", 265, 148, 112, 5),
                TeamRecord::new("Delhi Capitals", 255, 117, 133, 0),
                TeamRecord::new("Gujarat Titans", 76, 45, 31, 1),
                TeamRecord::new("Kolkata Knight Riders", 275, 137, 132, 2),
                TeamRecord::new("Lucknow Super Giants", 76, 38, 36, 0),
                TeamRecord::new("Mumbai Indians", 285, 158, 122, 6),
                TeamRecord::new("Punjab Kings", 260, 116, 137, 0),
                TeamRecord::new("Rajasthan Royals", 255, 121, 126, 1),
                TeamRecord::new("Royal Challengers Bangalore", 275, 127, 136, 0),
                TeamRecord::new("Sunrisers Hyderabad", 215, 97, 112, 2),
            ],
        }
    }

    pub fn records(&self) -> &[TeamRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn team_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&TeamRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Human-readable notes for records whose wins + losses exceed matches played.
    /// The data is reported as-is; nothing is corrected.
    pub fn consistency_warnings(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.is_consistent())
            .map(|r| {
                format!(
                    "{}: wins {} + losses {} exceed matches played {}",
                    r.name, r.wins, r.losses, r.matches_played
                )
            })
            .collect()
    }
}
