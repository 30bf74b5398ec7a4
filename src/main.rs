use std::io::{self, stdout};
use std::time::Instant;

use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;

mod app;
mod cli;
mod content;
mod export;
mod input;
mod models;
mod reveal;
mod theme;
mod ui;

use app::App;
use models::StoryInputs;

fn main() -> io::Result<()> {
    let config = cli::parse_args()?;

    // Load the preset before touching the terminal so errors land on stderr
    let preset: Option<StoryInputs> = match &config.preset {
        Some(path) => match models::load_preset(path) {
            Ok(inputs) => Some(inputs),
            Err(e) => {
                eprintln!("Error loading preset {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    // The generation task needs a runtime; the UI loop itself stays sync
    let runtime = tokio::runtime::Runtime::new()?;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(&config, preset, runtime.handle().clone());

    // Run the app
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Block no longer than the next reveal timer needs
        if event::poll(app.poll_timeout(now))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = input::action_for(app.screen, app.form.focus, key);
                    app.apply(action);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
