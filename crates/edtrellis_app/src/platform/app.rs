use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::Utc;
use edtrellis_core::{update, AppState, FetchStatus, Msg, CATEGORIES, JOB_TYPES};
use edtrellis_engine::{EngineHandle, MemoryHistory};
use edtrellis_logging::{trellis_info, trellis_warn};

use super::config::{config_path, load_config};
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render::render;

/// How long the loop waits for input before polling engine events again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// How long a fetch still in flight may take once input has ended.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub fn run_app() -> anyhow::Result<()> {
    let path = config_path();
    let config = load_config(&path)?;
    config.validate()?;
    logging::initialize(&config)?;
    trellis_info!("Starting edtrellis_app with API {}", config.api_base_url);

    let engine = EngineHandle::new(config.api_settings()).context("starting API engine")?;
    let history = MemoryHistory::new(&config.initial_url)
        .with_context(|| format!("invalid initial_url {:?}", config.initial_url))?;

    let mut app = App::new(EffectRunner::new(engine, history));
    let commands = spawn_stdin_reader();

    print_help();
    app.mount();

    loop {
        match commands.recv_timeout(POLL_INTERVAL) {
            Ok(Command::Quit) => break,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                app.settle(SHUTDOWN_GRACE);
                break;
            }
            Ok(Command::Help) => print_help(),
            Ok(command) => app.handle_command(command),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        app.pump_engine();
        app.render_if_dirty();
    }

    trellis_info!("edtrellis_app exiting");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Seeds the filters from the starting URL and resolves the session.
    fn mount(&mut self) {
        let query = self.runner.current_query();
        self.dispatch(Msg::LocationChanged(query));
        self.runner.load_session();
        self.render_if_dirty();
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Dispatch(msg) => {
                if let Msg::CategoricalSelected { field, value } = &msg {
                    if !value.is_empty() && !field.is_known_option(value) {
                        println!("(note: {value:?} is not one of the listed options)");
                    }
                }
                self.dispatch(msg);
            }
            Command::Back => match self.runner.back() {
                Some(query) => self.dispatch(Msg::LocationChanged(query)),
                None => println!("(no earlier page)"),
            },
            Command::Forward => match self.runner.forward() {
                Some(query) => self.dispatch(Msg::LocationChanged(query)),
                None => println!("(no later page)"),
            },
            Command::Help | Command::Quit => {}
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn pump_engine(&mut self) {
        for msg in self.runner.poll_events() {
            self.dispatch(msg);
        }
    }

    /// Keeps applying engine events until the latest fetch has answered or
    /// `grace` runs out.
    fn settle(&mut self, grace: Duration) {
        let deadline = Instant::now() + grace;
        while self.state.status() == FetchStatus::Loading {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                trellis_warn!("Giving up on in-flight jobs fetch at shutdown");
                break;
            };
            for msg in self.runner.wait_events(remaining) {
                self.dispatch(msg);
            }
            self.render_if_dirty();
        }
    }

    fn render_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            let view = self.state.view();
            println!("\n{}", render(&view, &self.runner.current_url(), Utc::now()));
        }
    }
}

fn print_help() {
    println!("{HELP}");
    println!("categories: {}", CATEGORIES.join(", "));
    println!("job types: {}\n", JOB_TYPES.join(", "));
}

fn spawn_stdin_reader() -> mpsc::Receiver<Command> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    trellis_warn!("Rejected input {:?}: {}", line, err);
                    println!("{err}");
                }
            }
        }
        // Dropping `tx` tells the loop that input ended.
    });
    rx
}
