//! Terminal lifecycle and the main event loop.
//!
//! [`App::start`] owns the terminal; everything it does between setup and
//! teardown is delegated to [`Browser`], which holds no terminal handles
//! and is driven the same way in tests.

mod browser;
mod modals;

pub use browser::Browser;

use crate::api::Jats;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::{Event, Handler};
use crate::ui;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use tracing::error;

pub struct App;

impl App {
    /// Run the interactive browser until the user quits.
    ///
    pub async fn start(config: Config) -> AppResult<()> {
        let api = Jats::new(&config)?;
        let events = Handler::new();
        let mut browser = Browser::new(api, events.sender());

        enable_raw_mode().map_err(|err| AppError::Terminal(err.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|err| AppError::Terminal(err.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal =
            Terminal::new(backend).map_err(|err| AppError::Terminal(err.to_string()))?;

        let outcome = App::run(&mut terminal, &mut browser, &events).await;

        disable_raw_mode().map_err(|err| AppError::Terminal(err.to_string()))?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|err| AppError::Terminal(err.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|err| AppError::Terminal(err.to_string()))?;

        outcome
    }

    async fn run(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        browser: &mut Browser,
        events: &Handler,
    ) -> AppResult<()> {
        if let Err(err) = browser.init().await {
            error!("initial load failed: {}", err);
            browser.note_error(&err);
        }

        loop {
            let size = terminal
                .size()
                .map_err(|err| AppError::Terminal(err.to_string()))?;
            browser.state_mut().set_terminal_size(size);
            terminal
                .draw(|frame| ui::render(frame, browser.state_mut()))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            match events.next().map_err(|err| AppError::Terminal(err.to_string()))? {
                Event::Input(key) => {
                    if !browser.handle_key(key).await {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) | Event::Tick => {}
                Event::StatusExpired(generation) => browser.on_status_expired(generation),
            }
        }
    }
}
