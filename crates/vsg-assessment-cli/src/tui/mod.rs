//! Interactive terminal session.

mod app;
mod clipboard;
mod view;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

use vsg_assessment_core::{Config, DocumentRenderer, WizardController};

use app::{action_for, App};

const TICK: Duration = Duration::from_millis(100);

/// Run the assessment until the user quits.
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = App::new(
        WizardController::default(),
        DocumentRenderer::new(config.document_options()),
        config.export.directory.clone(),
        runtime.handle().clone(),
    );

    tracing::info!("session started");
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    tracing::info!(submitted = app.wizard().is_submitted(), "session ended");
    result.map_err(Into::into)
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> std::io::Result<()> {
    while !app.should_quit() {
        app.poll_export();
        if let Some(text) = app.take_clipboard() {
            clipboard::copy(&text);
        }
        terminal.draw(|frame| view::draw(frame, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = action_for(key, app.screen()) {
                        app.dispatch(action);
                    }
                }
            }
        }
        app.tick();
    }
    Ok(())
}
