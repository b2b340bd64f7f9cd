use rand::Rng;
use thiserror::Error;

use crate::console::{
    choose, prompt_nonempty, prompt_points, Console, InputError, ValidationError,
};
use crate::model::{self, MatchRecord, Team, TEAM_SIZE};
use crate::sim::{self, RoundOutcome};
use crate::store::{Store, StoreError};

const ORDINALS: [&str; TEAM_SIZE] = ["first", "second", "third", "fourth", "fifth"];

/// Next-state value returned by every handler. `Rematch` carries its target
/// so the driver can resolve (or refuse) the jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Menu,
    NewMatch,
    Rematch { match_id: u64 },
    History,
    Exit,
}

/// Faults that end the session. Validation never reaches this level; it is
/// recovered inside the prompt loops that produced it.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("interrupted while waiting for input")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<InputError> for SessionError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Interrupted => SessionError::Interrupted,
            InputError::Io(err) => SessionError::Io(err),
        }
    }
}

/// Everything one interactive session owns: the store, the console surface,
/// and the contest RNG. Created once at startup and passed into every
/// handler; there is no process-wide state.
pub struct Session<'a, R: Rng> {
    pub store: &'a mut Store,
    pub console: &'a mut dyn Console,
    pub rng: R,
}

impl<'a, R: Rng> Session<'a, R> {
    pub fn new(store: &'a mut Store, console: &'a mut dyn Console, rng: R) -> Self {
        Session {
            store,
            console,
            rng,
        }
    }
}

/// Drives the state machine until `Exit`, persisting the document exactly
/// once on the way out. Interrupts and store faults stop the loop; nothing
/// else does.
pub fn run<R: Rng>(session: &mut Session<'_, R>) -> Result<(), SessionError> {
    let mut state = State::Menu;
    loop {
        if state == State::Exit {
            session.store.persist()?;
            return Ok(());
        }
        state = dispatch(session, state)?;
    }
}

fn dispatch<R: Rng>(session: &mut Session<'_, R>, state: State) -> Result<State, SessionError> {
    match state {
        State::Menu => menu(session),
        State::NewMatch => new_match(session),
        State::Rematch { match_id } => {
            // The one transition target that can fail to resolve: recover to
            // the menu instead of crashing.
            if match_id == 0 || match_id as usize > session.store.matches().len() {
                session.console.error(&format!(
                    "Unknown state target: rematch {match_id}. Returning to the main menu."
                ));
                return Ok(State::Menu);
            }
            rematch(session, match_id)
        }
        State::History => history(session),
        State::Exit => Ok(State::Exit),
    }
}

fn menu<R: Rng>(s: &mut Session<'_, R>) -> Result<State, SessionError> {
    let choice = choose(
        s.console,
        "Main Menu",
        &["Play a New Match", "View Match History", "Save and Exit"],
    )?;
    Ok(match choice {
        1 => State::NewMatch,
        2 => State::History,
        _ => State::Exit,
    })
}

fn new_match<R: Rng>(s: &mut Session<'_, R>) -> Result<State, SessionError> {
    s.console.heading("New Match");
    let match_id = model::create_match(s.store.matches_mut());
    let idx = (match_id - 1) as usize;

    let name_a = prompt_team_name(&mut *s.console, "first", None)?;
    let name_b = prompt_team_name(&mut *s.console, "second", Some(&name_a))?;
    s.store.matches_mut()[idx].set_team_names(&name_a, &name_b);

    for team_idx in 0..2 {
        let record = &mut s.store.matches_mut()[idx];
        let team = if team_idx == 0 {
            &mut record.teams.team_a
        } else {
            &mut record.teams.team_b
        };
        build_roster(&mut *s.console, team)?;
    }

    play_contest(s, match_id)?;

    let again = s.console.prompt("Would you like a rematch? (y/n)\n> ")?;
    if again.trim().eq_ignore_ascii_case("y") {
        return Ok(State::Rematch { match_id });
    }
    s.console
        .prompt("Press Enter to return to the main menu. ")?;
    Ok(State::Menu)
}

fn rematch<R: Rng>(s: &mut Session<'_, R>, match_id: u64) -> Result<State, SessionError> {
    play_contest(s, match_id)?;

    let again = s
        .console
        .prompt("Would you like another rematch? (y/n)\n> ")?;
    if again.trim().eq_ignore_ascii_case("y") {
        return Ok(State::Rematch { match_id });
    }
    s.console
        .prompt("Press Enter to return to the main menu. ")?;
    Ok(State::Menu)
}

fn history<R: Rng>(s: &mut Session<'_, R>) -> Result<State, SessionError> {
    s.console.heading("Match History");
    if s.store.matches().is_empty() {
        s.console
            .prompt("No match data found.\n\nPress Enter to return to the main menu. ")?;
        return Ok(State::Menu);
    }

    for record in s.store.matches() {
        let tally = record.tally();
        s.console.panel(&format!(
            "Match ID: {}\n{}\nOverall score: {}-{} (draws: {})",
            record.id, record.name, tally.team_a, tally.team_b, tally.draws
        ));
    }

    let count = s.store.matches().len();
    let mut raw = s.console.prompt(
        "\nEnter the ID of a match to view details.\n\
         To rematch, enter the ID followed by 'r' (e.g., 2r).\n\
         Enter 'm' to return to the main menu.\n> ",
    )?;
    let choice = loop {
        match parse_history_choice(raw.trim(), count) {
            Ok(choice) => break choice,
            Err(err) => {
                s.console.error(&err.0);
                raw = s.console.prompt("> ")?;
            }
        }
    };

    match choice {
        HistoryChoice::Menu => Ok(State::Menu),
        HistoryChoice::Rematch(match_id) => Ok(State::Rematch { match_id }),
        HistoryChoice::Detail(match_id) => {
            let record = &s.store.matches()[(match_id - 1) as usize];
            s.console.panel(&match_detail_text(record));
            s.console
                .prompt("\nPress Enter to return to the main menu. ")?;
            Ok(State::Menu)
        }
    }
}

/// Simulates one contest for the stored match, narrating each round and
/// appending the result. Rosters are read-only here; only the result log
/// grows.
fn play_contest<R: Rng>(s: &mut Session<'_, R>, match_id: u64) -> Result<(), SessionError> {
    let idx = (match_id - 1) as usize;
    let contest = {
        let record = &s.store.matches()[idx];
        s.console.line(&record.name);
        sim::simulate(&record.teams.team_a, &record.teams.team_b, &mut s.rng)
    };

    for round in &contest.rounds {
        s.console.line(&format!(
            "{} ({}) vs {} ({})",
            round.name_a, round.point_a, round.name_b, round.point_b
        ));
        let line = match round.outcome {
            RoundOutcome::SideA => format!(
                "{} wins! Current score: {}-{}",
                round.name_a, round.score_a, round.score_b
            ),
            RoundOutcome::SideB => format!(
                "{} wins! Current score: {}-{}",
                round.name_b, round.score_a, round.score_b
            ),
            RoundOutcome::Draw => format!(
                "It's a draw. Current score: {}-{}",
                round.score_a, round.score_b
            ),
        };
        s.console.line(&line);
        s.console.line("");
        s.console.pause();
    }

    let winner = contest.winner();
    let record = &mut s.store.matches_mut()[idx];
    record.record_result(winner, contest.score_a, contest.score_b);
    s.console.line("");
    match record.winner_name(winner) {
        Some(name) => s.console.line(&format!("[Result] Winner: {name}")),
        None => s.console.line("[Result] The match is a draw!"),
    }
    Ok(())
}

fn prompt_team_name(
    console: &mut dyn Console,
    ordinal: &str,
    taken: Option<&str>,
) -> Result<String, InputError> {
    let text = format!("Enter the name of the {ordinal} team:\n> ");
    loop {
        let raw = console.prompt(&text)?;
        match validate_team_name(&raw, taken) {
            Ok(name) => return Ok(name),
            Err(err) => console.error(&err.0),
        }
    }
}

fn validate_team_name(raw: &str, taken: Option<&str>) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() || taken.is_some_and(|other| other == name) {
        return Err(ValidationError::new(
            "Team names cannot be empty or identical.",
        ));
    }
    Ok(name.to_string())
}

/// Collects five named players against the shared 100-point budget. The
/// fifth player absorbs whatever budget remains, announced rather than
/// prompted.
fn build_roster(console: &mut dyn Console, team: &mut Team) -> Result<(), InputError> {
    console.line(&format!("--- Team: {} ---", team.name));
    for (slot, ordinal) in ORDINALS.iter().enumerate() {
        let name = prompt_nonempty(
            console,
            &format!("Enter the {ordinal} player's name: "),
            "Player name cannot be empty.",
        )?;

        let remaining = team.remaining_budget();
        let point = if slot == TEAM_SIZE - 1 {
            console.notice(&format!(
                "The fifth player's ability points are automatically set to {remaining}."
            ));
            remaining
        } else {
            prompt_points(
                console,
                &format!("Enter the {ordinal} player's ability points (0-{remaining}): "),
                remaining,
            )?
        };
        team.add_player(&name, point);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryChoice {
    Menu,
    Detail(u64),
    Rematch(u64),
}

/// History input grammar: `m`, a bare match id, or an id with an `r` suffix.
/// Ids must fall within the stored range.
pub fn parse_history_choice(raw: &str, match_count: usize) -> Result<HistoryChoice, ValidationError> {
    if raw == "m" {
        return Ok(HistoryChoice::Menu);
    }
    let (digits, is_rematch) = match raw.strip_suffix('r') {
        Some(rest) => (rest, true),
        None => (raw, false),
    };
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(id) = digits.parse::<u64>() {
            if id >= 1 && id as usize <= match_count {
                return Ok(if is_rematch {
                    HistoryChoice::Rematch(id)
                } else {
                    HistoryChoice::Detail(id)
                });
            }
        }
    }
    Err(ValidationError::new("Invalid input. Please try again."))
}

fn match_detail_text(record: &MatchRecord) -> String {
    let tally = record.tally();
    let mut body = format!(
        "Match ID: {}\n{}\nOverall score: {}-{} (draws: {})\n",
        record.id, record.name, tally.team_a, tally.team_b, tally.draws
    );
    for team in [&record.teams.team_a, &record.teams.team_b] {
        body.push_str(&format!("-- Team {} --\nPlayer Name | Ability Points\n", team.name));
        for player in &team.players {
            body.push_str(&format!("{} | {}\n", player.name, player.point));
        }
    }
    body.push_str("-- Results --\n");
    for result in &record.result {
        body.push_str(&format!("{} | {}\n", result.winner.as_str(), result.score));
    }
    body.trim_end().to_string()
}
