use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rand::SeedableRng;
use rand::rngs::StdRng;

use champion_terminal::model::{MatchRecord, Tally, Team, TeamPair, Winner};
use champion_terminal::sim::simulate;

fn sample_team(name: &str, points: [u32; 5]) -> Team {
    let mut team = Team {
        name: name.to_string(),
        players: Vec::new(),
    };
    for (i, point) in points.into_iter().enumerate() {
        team.add_player(&format!("{name}-{i}"), point);
    }
    team
}

fn bench_simulate(c: &mut Criterion) {
    let team_a = sample_team("Red", [30, 25, 20, 15, 10]);
    let team_b = sample_team("Blue", [40, 30, 20, 5, 5]);

    c.bench_function("simulate_contest", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let contest = simulate(black_box(&team_a), black_box(&team_b), &mut rng);
            black_box(contest.score_a);
        })
    });
}

fn bench_tally(c: &mut Criterion) {
    let mut record = MatchRecord {
        id: 1,
        name: "---- Red vs. Blue ----".to_string(),
        teams: TeamPair {
            team_a: sample_team("Red", [30, 25, 20, 15, 10]),
            team_b: sample_team("Blue", [40, 30, 20, 5, 5]),
        },
        result: Vec::new(),
    };
    for i in 0..1_000u32 {
        let winner = match i % 3 {
            0 => Winner::TeamA,
            1 => Winner::TeamB,
            _ => Winner::Draw,
        };
        record.record_result(winner, (i % 5) as u8, ((i + 1) % 5) as u8);
    }

    c.bench_function("history_tally_1000_results", |b| {
        b.iter(|| {
            let tally: Tally = black_box(&record).tally();
            black_box(tally.team_a);
        })
    });
}

criterion_group!(benches, bench_simulate, bench_tally);
criterion_main!(benches);
