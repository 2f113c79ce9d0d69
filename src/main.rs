use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use expense_tracker::{
    ApiClient, App, CategoryService, Config, ExpenseService, YearMonth, logging, ui::render,
};

const TICK_RATE: Duration = Duration::from_millis(100);

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    app.init().await;

    while !app.should_quit {
        terminal.draw(|f| render::draw(f, &app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.begin_key(key.code).is_some() {
                        terminal.draw(|f| render::draw(f, &app))?;
                    }
                    app.handle_key(key.code).await;
                }
            }
        }

        let now = Instant::now();
        if app.begin_tick(now).is_some() {
            terminal.draw(|f| render::draw(f, &app))?;
        }
        app.tick(now).await;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(&config.log_file)?;
    tracing::info!(api_url = %config.api_url, "starting expense tracker");

    let client = ApiClient::with_timeout(config.api_url.clone(), config.request_timeout())?;
    let app = App::new(
        Arc::new(CategoryService::new(client.clone())),
        Arc::new(ExpenseService::new(client)),
        YearMonth::current(),
        config.page_size,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "expense tracker stopped with an error");
        println!("{err:?}");
    }

    Ok(())
}
