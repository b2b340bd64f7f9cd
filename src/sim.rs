use rand::Rng;

use crate::model::{Team, Winner, TEAM_SIZE};

/// How one round fell, from team A's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    SideA,
    SideB,
    Draw,
}

/// One pairing of the contest, kept for round-by-round display.
#[derive(Debug, Clone)]
pub struct RoundLog {
    pub name_a: String,
    pub point_a: u32,
    pub name_b: String,
    pub point_b: u32,
    pub outcome: RoundOutcome,
    /// Running score after this round.
    pub score_a: u8,
    pub score_b: u8,
}

/// Result of a full five-round contest.
#[derive(Debug, Clone)]
pub struct Contest {
    pub score_a: u8,
    pub score_b: u8,
    pub rounds: Vec<RoundLog>,
}

impl Contest {
    pub fn winner(&self) -> Winner {
        if self.score_a > self.score_b {
            Winner::TeamA
        } else if self.score_a < self.score_b {
            Winner::TeamB
        } else {
            Winner::Draw
        }
    }

    pub fn score_string(&self) -> String {
        format!("{}-{}", self.score_a, self.score_b)
    }

    pub fn draw_rounds(&self) -> u8 {
        TEAM_SIZE as u8 - self.score_a - self.score_b
    }
}

/// Runs one contest between two full rosters.
///
/// Each side keeps a pool of roster indices. Every round draws one index
/// uniformly from each pool without replacement and compares the two players'
/// points: the strictly higher side scores, equal points score neither. After
/// five rounds every player has been paired exactly once.
pub fn simulate(team_a: &Team, team_b: &Team, rng: &mut impl Rng) -> Contest {
    debug_assert_eq!(team_a.players.len(), TEAM_SIZE);
    debug_assert_eq!(team_b.players.len(), TEAM_SIZE);

    let mut pool_a: Vec<usize> = (0..TEAM_SIZE).collect();
    let mut pool_b: Vec<usize> = (0..TEAM_SIZE).collect();
    let mut score_a = 0u8;
    let mut score_b = 0u8;
    let mut rounds = Vec::with_capacity(TEAM_SIZE);

    for _ in 0..TEAM_SIZE {
        let pick_a = pool_a.remove(rng.gen_range(0..pool_a.len()));
        let pick_b = pool_b.remove(rng.gen_range(0..pool_b.len()));
        let player_a = &team_a.players[pick_a];
        let player_b = &team_b.players[pick_b];

        let outcome = if player_a.point > player_b.point {
            score_a += 1;
            RoundOutcome::SideA
        } else if player_a.point < player_b.point {
            score_b += 1;
            RoundOutcome::SideB
        } else {
            RoundOutcome::Draw
        };

        rounds.push(RoundLog {
            name_a: player_a.name.clone(),
            point_a: player_a.point,
            name_b: player_b.name.clone(),
            point_b: player_b.point,
            outcome,
            score_a,
            score_b,
        });
    }

    Contest {
        score_a,
        score_b,
        rounds,
    }
}
