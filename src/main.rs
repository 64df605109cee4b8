use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use skyflap::constants::{DEFAULT_SERVER_PORT, TICK_INTERVAL_MS};
use skyflap::game::{self, RunInput, RunPhase, RunState};
use skyflap::leaderboard::{server, LeaderboardClient, ScoreRecord, ScoreStore};
use skyflap::ui::game_scene::{render_game, SubmitStatus};
use skyflap::ui::home_scene::{HomeScreen, LeaderboardState};
use skyflap::ui::name_entry::NameEntryScreen;
use skyflap::{build_info, persistence, profile};
use std::io;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

enum Screen {
    NameEntry,
    Home,
    Game,
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--serve" => {
                return run_server(DEFAULT_SERVER_PORT);
            }
            arg if arg.starts_with("--serve=") => {
                let port = arg
                    .trim_start_matches("--serve=")
                    .parse()
                    .unwrap_or(DEFAULT_SERVER_PORT);
                return run_server(port);
            }
            "--version" | "-v" => {
                println!(
                    "skyflap {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Skyflap - Terminal Flappy-Bird Arcade Game\n");
                println!("Usage: skyflap [command]\n");
                println!("Commands:");
                println!("  --serve[=PORT]  Run the leaderboard server (default port 3000)");
                println!("  --version       Show version information");
                println!("  --help          Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'skyflap --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let client = LeaderboardClient::from_env();
    let mut player = profile::load();

    let mut current_screen = if player.is_some() {
        Screen::Home
    } else {
        Screen::NameEntry
    };

    let mut name_screen = NameEntryScreen::new();
    let mut home_screen = HomeScreen::new();
    let mut fetch_handle: Option<JoinHandle<Result<Vec<ScoreRecord>, String>>> = None;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    // Main loop
    loop {
        match current_screen {
            Screen::NameEntry => {
                terminal.draw(|f| {
                    let area = f.size();
                    name_screen.draw(f, area);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Char(c) => {
                                name_screen.handle_char_input(c);
                            }
                            KeyCode::Backspace => {
                                name_screen.handle_backspace();
                            }
                            KeyCode::Enter => {
                                if name_screen.is_valid() {
                                    match client.add_player(&name_screen.get_name()) {
                                        Ok(record) => {
                                            let new_profile = profile::PlayerProfile {
                                                id: record.id,
                                                name: record.name,
                                            };
                                            if let Err(e) = profile::save(&new_profile) {
                                                name_screen.validation_error =
                                                    Some(format!("Save failed: {}", e));
                                            } else {
                                                player = Some(new_profile);
                                                name_screen = NameEntryScreen::new();
                                                home_screen = HomeScreen::new();
                                                fetch_handle = None;
                                                current_screen = Screen::Home;
                                            }
                                        }
                                        Err(e) => {
                                            name_screen.validation_error =
                                                Some(format!("Registration failed: {}", e));
                                        }
                                    }
                                }
                            }
                            KeyCode::Esc => {
                                // Guest mode: playable, but scores stay local
                                player = None;
                                name_screen = NameEntryScreen::new();
                                home_screen = HomeScreen::new();
                                fetch_handle = None;
                                current_screen = Screen::Home;
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::Home => {
                // Kick off / poll the background leaderboard fetch
                if matches!(home_screen.leaderboard, LeaderboardState::Loading)
                    && fetch_handle.is_none()
                {
                    let fetch_client = client.clone();
                    fetch_handle = Some(std::thread::spawn(move || {
                        fetch_client.fetch_scores().map_err(|e| e.to_string())
                    }));
                }
                if let Some(handle) = fetch_handle.take() {
                    if handle.is_finished() {
                        home_screen.leaderboard = match handle.join() {
                            Ok(Ok(scores)) => LeaderboardState::Loaded(scores),
                            Ok(Err(e)) => LeaderboardState::Failed(e),
                            Err(_) => LeaderboardState::Failed("fetch thread panicked".to_string()),
                        };
                    } else {
                        fetch_handle = Some(handle);
                    }
                }

                terminal.draw(|f| {
                    let area = f.size();
                    home_screen.draw(f, area, player.as_ref().map(|p| p.name.as_str()));
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Enter => {
                                current_screen = Screen::Game;
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                home_screen.leaderboard = LeaderboardState::Loading;
                            }
                            KeyCode::Char('l') | KeyCode::Char('L') => {
                                profile::clear()?;
                                player = None;
                                name_screen = NameEntryScreen::new();
                                current_screen = Screen::NameEntry;
                            }
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                break;
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::Game => {
                let quit = run_game_screen(&mut terminal, &client, player.as_ref())?;
                if quit {
                    break;
                }
                // Back to home with a fresh leaderboard, so a just-submitted
                // score shows up
                home_screen = HomeScreen::new();
                fetch_handle = None;
                current_screen = Screen::Home;
            }
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    Ok(())
}

/// The game screen loop. Returns true if the player asked to quit the app.
fn run_game_screen(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
    client: &LeaderboardClient,
    player: Option<&profile::PlayerProfile>,
) -> io::Result<bool> {
    let mut run = RunState::new();
    let mut rng = rand::thread_rng();
    let mut last_tick = Instant::now();

    let mut submit_status = SubmitStatus::Guest;
    let mut submit_handle: Option<JoinHandle<Result<ScoreRecord, String>>> = None;

    loop {
        // Poll the submission thread kicked off at game over
        if let Some(handle) = submit_handle.take() {
            if handle.is_finished() {
                submit_status = match handle.join() {
                    Ok(Ok(record)) => SubmitStatus::Accepted(record.score),
                    Ok(Err(e)) => SubmitStatus::Failed(e),
                    Err(_) => SubmitStatus::Failed("submit thread panicked".to_string()),
                };
            } else {
                submit_handle = Some(handle);
            }
        }

        terminal.draw(|f| {
            let area = f.size();
            render_game(f, area, &run, &submit_status);
        })?;

        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(key_event) = event::read()? {
                match key_event.code {
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => match run.phase {
                        RunPhase::NotStarted => game::apply_input(&mut run, RunInput::Start),
                        RunPhase::Running => game::apply_input(&mut run, RunInput::Flap),
                        RunPhase::Over => {
                            game::apply_input(&mut run, RunInput::Restart);
                            submit_status = SubmitStatus::Guest;
                            submit_handle = None;
                        }
                    },
                    KeyCode::Esc => {
                        // Leaving tears down the run; an in-flight submission
                        // thread finishes detached
                        return Ok(false);
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        return Ok(true);
                    }
                    _ => {}
                }
            }
        }

        // Physics tick
        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            let was_running = run.phase == RunPhase::Running;
            game::tick(&mut run, &mut rng);
            last_tick = Instant::now();

            // Run just ended: submit the final score exactly once
            if was_running && run.phase == RunPhase::Over {
                match player {
                    Some(p) => {
                        let submit_client = client.clone();
                        let id = p.id.clone();
                        let score = run.score;
                        submit_status = SubmitStatus::Pending;
                        submit_handle = Some(std::thread::spawn(move || {
                            submit_client
                                .submit_score(&id, score)
                                .map_err(|e| e.to_string())
                        }));
                    }
                    None => {
                        submit_status = SubmitStatus::Guest;
                    }
                }
            }
        }
    }
}

fn run_server(port: u16) -> io::Result<()> {
    let store = ScoreStore::open(persistence::data_path("scores.json")?)?;
    server::run(port, store)
}
