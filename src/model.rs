use serde::{Deserialize, Serialize};

/// Fixed roster size; the simulation pairs every player exactly once.
pub const TEAM_SIZE: usize = 5;

/// Ability points shared by a team's roster. The budget is enforced while the
/// roster is collected: each assignment lowers the remaining budget and the
/// final player absorbs whatever is left.
pub const POINT_BUDGET: u32 = 100;

/// One persisted match: two fixed rosters plus every result ever played
/// against them (the initial contest and each rematch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: u64,
    pub name: String,
    pub teams: TeamPair,
    #[serde(default)]
    pub result: Vec<ContestResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamPair {
    #[serde(default)]
    pub team_a: Team,
    #[serde(default)]
    pub team_b: Team,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub point: u32,
}

/// Outcome of one contest. Appended, never mutated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestResult {
    pub winner: Winner,
    /// Formatted as `<score_a>-<score_b>`.
    pub score: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    TeamA,
    TeamB,
    Draw,
}

impl Winner {
    pub fn as_str(self) -> &'static str {
        match self {
            Winner::TeamA => "team_a",
            Winner::TeamB => "team_b",
            Winner::Draw => "draw",
        }
    }
}

/// Win/loss/draw counts aggregated from a match's result log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub team_a: u32,
    pub team_b: u32,
    pub draws: u32,
}

impl Tally {
    pub fn from_results(results: &[ContestResult]) -> Self {
        let mut tally = Tally::default();
        for result in results {
            match result.winner {
                Winner::TeamA => tally.team_a += 1,
                Winner::TeamB => tally.team_b += 1,
                Winner::Draw => tally.draws += 1,
            }
        }
        tally
    }
}

/// Appends a new match with a placeholder name and empty teams, returning its
/// 1-based id. Ids are sequential over the stored match list and never reused.
pub fn create_match(matches: &mut Vec<MatchRecord>) -> u64 {
    let id = matches.len() as u64 + 1;
    matches.push(MatchRecord {
        id,
        name: format!("Match {id}"),
        teams: TeamPair::default(),
        result: Vec::new(),
    });
    id
}

impl MatchRecord {
    /// Records both team names and the composed match name. Name validation
    /// (non-empty, mutually distinct) happens at the prompt boundary.
    pub fn set_team_names(&mut self, name_a: &str, name_b: &str) {
        self.teams.team_a.name = name_a.to_string();
        self.teams.team_b.name = name_b.to_string();
        self.name = format!("---- {name_a} vs. {name_b} ----");
    }

    pub fn record_result(&mut self, winner: Winner, score_a: u8, score_b: u8) {
        self.result.push(ContestResult {
            winner,
            score: format!("{score_a}-{score_b}"),
        });
    }

    pub fn tally(&self) -> Tally {
        Tally::from_results(&self.result)
    }

    /// Display name of the winning team, or `None` for a draw.
    pub fn winner_name(&self, winner: Winner) -> Option<&str> {
        match winner {
            Winner::TeamA => Some(&self.teams.team_a.name),
            Winner::TeamB => Some(&self.teams.team_b.name),
            Winner::Draw => None,
        }
    }
}

impl Team {
    pub fn add_player(&mut self, name: &str, point: u32) {
        self.players.push(Player {
            name: name.to_string(),
            point,
        });
    }

    pub fn spent_points(&self) -> u32 {
        self.players.iter().map(|p| p.point).sum()
    }

    pub fn remaining_budget(&self) -> u32 {
        POINT_BUDGET.saturating_sub(self.spent_points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winner: Winner, score: &str) -> ContestResult {
        ContestResult {
            winner,
            score: score.to_string(),
        }
    }

    #[test]
    fn match_ids_are_sequential_and_one_based() {
        let mut matches = Vec::new();
        assert_eq!(create_match(&mut matches), 1);
        assert_eq!(create_match(&mut matches), 2);
        assert_eq!(matches[0].name, "Match 1");
        assert_eq!(matches[1].id, 2);
    }

    #[test]
    fn setting_team_names_composes_match_name() {
        let mut matches = Vec::new();
        create_match(&mut matches);
        matches[0].set_team_names("Red", "Blue");
        assert_eq!(matches[0].name, "---- Red vs. Blue ----");
        assert_eq!(matches[0].teams.team_a.name, "Red");
        assert_eq!(matches[0].teams.team_b.name, "Blue");
    }

    #[test]
    fn remaining_budget_tracks_assigned_points() {
        let mut team = Team::default();
        assert_eq!(team.remaining_budget(), 100);
        team.add_player("A", 30);
        team.add_player("B", 30);
        team.add_player("C", 30);
        team.add_player("D", 10);
        assert_eq!(team.remaining_budget(), 0);
        team.add_player("E", team.remaining_budget());
        assert_eq!(team.spent_points(), POINT_BUDGET);
        assert_eq!(team.players[4].point, 0);
    }

    #[test]
    fn tally_counts_each_outcome_kind() {
        let results = vec![
            result(Winner::TeamA, "3-2"),
            result(Winner::Draw, "2-2"),
            result(Winner::TeamB, "1-3"),
        ];
        let tally = Tally::from_results(&results);
        assert_eq!(tally.team_a, 1);
        assert_eq!(tally.team_b, 1);
        assert_eq!(tally.draws, 1);
    }

    #[test]
    fn winner_serializes_to_wire_tags() {
        let json = serde_json::to_string(&Winner::TeamA).unwrap();
        assert_eq!(json, "\"team_a\"");
        let back: Winner = serde_json::from_str("\"draw\"").unwrap();
        assert_eq!(back, Winner::Draw);
    }

    #[test]
    fn match_without_result_key_deserializes_empty() {
        let json = r#"{
            "id": 1,
            "name": "Match 1",
            "teams": {
                "team_a": {"name": "Red", "players": []},
                "team_b": {"name": "Blue", "players": []}
            }
        }"#;
        let record: MatchRecord = serde_json::from_str(json).unwrap();
        assert!(record.result.is_empty());
    }
}
