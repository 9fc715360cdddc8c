use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::sync::mpsc;
use tokio::time::{self, Duration};
use tracing::debug;

use crate::app::state::{App, LookupMessage, View};
use crate::ui::views::{draw_prevalence, draw_report, draw_search};

pub async fn run_app(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // channel for finished lookups
    let (tx, rx) = mpsc::unbounded_channel();
    app.set_outcome_sender(tx);

    let res = run_loop(app, &mut terminal, rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut rx: mpsc::UnboundedReceiver<LookupMessage>,
) -> io::Result<()> {
    let mut tick = time::interval(Duration::from_millis(60));

    loop {
        terminal.draw(|f| match app.view {
            View::Search => draw_search(f, app),
            View::Prevalence => draw_prevalence(f, app),
            View::Report => draw_report(f, app),
        })?;

        tokio::select! {
            _ = tick.tick() => {}
            Some((barcode, outcome)) = rx.recv() => {
                debug!(%barcode, "lookup finished");
                app.on_lookup(barcode, outcome);
            }
            Ok(should_quit) = handle_event(app) => {
                if should_quit { break; }
            }
        }
    }
    Ok(())
}

async fn handle_event(app: &mut App) -> io::Result<bool> {
    if event::poll(std::time::Duration::from_millis(16))?
        && let Event::Key(key) = event::read()?
        && key.kind == KeyEventKind::Press
    {
        // Global quit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }
        if key.code == KeyCode::Tab {
            app.switch_view();
            return Ok(false);
        }

        return Ok(match app.view {
            View::Search => handle_search_input(app, key),
            View::Prevalence => handle_prevalence_input(app, key),
            View::Report => handle_report_input(app, key),
        });
    }
    Ok(false)
}

fn handle_search_input(app: &mut App, key: event::KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            if app.search.input.is_empty() {
                return true; // quit
            }
            app.on_delete();
        }
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => app.on_backspace(),
        KeyCode::Delete => app.on_delete(),
        KeyCode::Char(ch) => app.on_input(ch),
        _ => {}
    }
    false
}

fn handle_prevalence_input(app: &mut App, key: event::KeyEvent) -> bool {
    match key.code {
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') => app.prevalence.move_selection(-1),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') => app.prevalence.move_selection(1),
        KeyCode::Home => app.prevalence.select_first(),
        KeyCode::End => app.prevalence.select_last(),
        KeyCode::Esc => {
            if app.prevalence.selected.is_some() {
                app.prevalence.clear();
            } else {
                app.view = View::Search;
            }
        }
        _ => {}
    }
    false
}

fn handle_report_input(app: &mut App, key: event::KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => app.view = View::Search,
        KeyCode::Enter => app.submit_report(),
        KeyCode::Backspace => app.on_backspace(),
        KeyCode::Delete => app.on_delete(),
        KeyCode::Char(ch) => app.on_input(ch),
        _ => {}
    }
    false
}
