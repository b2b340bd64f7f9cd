use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;

use champion_terminal::config::Config;
use champion_terminal::console::{Console, InputError, TerminalConsole};
use champion_terminal::render;
use champion_terminal::session::{self, Session, SessionError};
use champion_terminal::store::{Store, StoreError};

const INTERRUPT_NOTICE: &str = "Interrupt detected. The program will now exit.";

const CONSENT_PROMPT: &str = "Do you allow this program to save a .json file to your computer?\n\
     1. Yes\n\
     2. No (data will not be saved after exit)\n> ";

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = Config::from_env();
    let mut console = TerminalConsole::new(render::build(config.renderer), config.round_delay);

    let mut store = match open_store(&config, &mut console) {
        Ok(Some(store)) => store,
        Ok(None) => {
            // Interrupted before the session started; nothing to save.
            console.error(INTERRUPT_NOTICE);
            return ExitCode::SUCCESS;
        }
        Err(err) => return report_failure(&mut console, err),
    };

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = {
        let mut session = Session::new(&mut store, &mut console, rng);
        session::run(&mut session)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(SessionError::Interrupted) => {
            // Preserves the historical behavior: an interrupt discards any
            // progress made since the last Save and Exit.
            console.error(INTERRUPT_NOTICE);
            ExitCode::SUCCESS
        }
        Err(err) => {
            console.error(&format!(
                "Unexpected error while running the program: {err}\nThe program will now exit."
            ));
            ExitCode::FAILURE
        }
    }
}

/// Opens the configured data file, asking for save consent on first run.
/// `Ok(None)` means the user interrupted one of the consent prompts.
fn open_store(config: &Config, console: &mut dyn Console) -> anyhow::Result<Option<Store>> {
    use anyhow::Context;

    if config.data_file.exists() {
        let store = Store::open(&config.data_file)
            .with_context(|| format!("failed to load {}", config.data_file.display()))?;
        return Ok(Some(store));
    }

    let Some(mut raw) = prompt_or_interrupt(console, CONSENT_PROMPT)? else {
        return Ok(None);
    };
    loop {
        match raw.trim() {
            "1" => {
                let store = Store::open(&config.data_file)
                    .with_context(|| format!("failed to create {}", config.data_file.display()))?;
                return Ok(Some(store));
            }
            "2" => {
                let pause = prompt_or_interrupt(
                    console,
                    "[Warning] Data will be lost when the program stops. Press Enter to continue. ",
                )?;
                if pause.is_none() {
                    return Ok(None);
                }
                return Ok(Some(Store::in_memory()));
            }
            _ => {
                console.error("Invalid choice. Please enter 1 or 2.");
                let Some(next) = prompt_or_interrupt(console, "> ")? else {
                    return Ok(None);
                };
                raw = next;
            }
        }
    }
}

fn prompt_or_interrupt(
    console: &mut dyn Console,
    text: &str,
) -> anyhow::Result<Option<String>> {
    match console.prompt(text) {
        Ok(value) => Ok(Some(value)),
        Err(InputError::Interrupted) => Ok(None),
        Err(InputError::Io(err)) => Err(err.into()),
    }
}

fn report_failure(console: &mut dyn Console, err: anyhow::Error) -> ExitCode {
    console.error(&format!("{err:#}"));
    if let Some(StoreError::Corrupt { path, .. } | StoreError::NotAnObject { path }) =
        err.downcast_ref::<StoreError>()
    {
        console.line(&format!(
            "Delete '{}' and start again to begin with an empty history.",
            path.display()
        ));
    }
    ExitCode::FAILURE
}
