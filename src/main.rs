use clap::Parser;
use crossbeam_channel::Receiver;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::time::{Duration, Instant};

use flashmind::api::HttpBackend;
use flashmind::api_worker::spawn_api_worker;
use flashmind::app::App;
use flashmind::config::{Cli, Config};
use flashmind::error::FlashmindError;
use flashmind::models::ApiResponse;
use flashmind::{db, logger};

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

fn main() -> Result<(), FlashmindError> {
    let config = Config::from_cli(Cli::parse());
    logger::init(&config.log_path())?;
    tracing::info!("Starting FlashMind against {}", config.endpoints.base_url);

    let conn = db::init_db(&config.db_path())?;
    let backend = HttpBackend::new(config.endpoints.clone())?;

    let (request_tx, request_rx) = crossbeam_channel::unbounded();
    let (response_tx, response_rx) = crossbeam_channel::unbounded();
    // The worker is never joined; an upload still in flight must not hold up quitting.
    let _worker = spawn_api_worker(backend, request_rx, move |response| {
        if response_tx.send(response).is_err() {
            tracing::debug!("UI gone, dropping API response");
        }
    })?;

    let mut app = App::new(config, conn, request_tx)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &response_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("Exiting with error: {}", e);
    } else {
        tracing::info!("Exiting");
    }
    result
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    responses: &Receiver<ApiResponse>,
) -> Result<(), FlashmindError> {
    while !app.should_quit {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now())
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, height) => app.set_viewport(Rect::new(0, 0, width, height)),
                _ => {}
            }
        }

        for response in responses.try_iter() {
            app.handle_api_response(response);
        }
        app.tick(Instant::now());
    }
    Ok(())
}
