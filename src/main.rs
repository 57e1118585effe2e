use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use ratatui::DefaultTerminal;
use tokio::sync::oneshot;
use tracing::{error, info};

mod cli;
mod controller;
mod domain;
mod filter;
mod html;
mod inputter;
mod loader;
mod logging;
mod model;
mod page;
mod record;
mod table;
mod ui;

use cli::Args;
use controller::Controller;
use domain::{ErrorPolicy, Message, StvError, ViewerConfig};
use loader::Loader;
use model::{Model, Status};
use ui::TableUI;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Err(e) => {
            error!("Exiting with error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run(args: Args) -> Result<(), StvError> {
    let log_path = logging::init_logging(&args.log_file)?;
    info!("Starting stv, logging to {}", log_path.display());

    let cfg = args.config();
    let loader = Loader::new(&cfg)?;
    info!("Fetching records from {}", loader.url());
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    if args.print {
        return print_table(&runtime, &loader, &cfg, args.query.as_deref().unwrap_or(""));
    }

    // The single fetch runs on the runtime, the UI loop picks up its result.
    let (tx, mut rx) = oneshot::channel();
    runtime.spawn(async move {
        let start_time = Instant::now();
        let result = loader.fetch().await;
        let _ = tx.send(Message::Loaded(result, start_time.elapsed().as_millis()));
    });

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut rx, &cfg);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    rx: &mut oneshot::Receiver<Message>,
    cfg: &ViewerConfig,
) -> Result<(), StvError> {
    let size = terminal.size()?;
    let mut model = Model::init(cfg, size.width as usize, size.height as usize);
    let mut ui = TableUI::new();
    let controller = Controller::new(cfg);

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        if let Ok(loaded) = rx.try_recv() {
            model.update(Some(loaded))?;
        }

        // Handle events and map to a Message
        let message = controller.handle_event()?;
        model.update(message)?;
    }
    Ok(())
}

/// Headless variant: fetch, render, filter once and write the HTML table to
/// stdout.
fn print_table(
    runtime: &tokio::runtime::Runtime,
    loader: &Loader,
    cfg: &ViewerConfig,
    query: &str,
) -> Result<(), StvError> {
    let start_time = Instant::now();
    let result = runtime.block_on(loader.fetch());

    let mut model = Model::init(cfg, 0, 0);
    model.loaded(result, start_time.elapsed().as_millis());
    model.set_query(query)?;

    if let Some(table) = model.table() {
        print!("{}", html::render_table(table));
    }
    if model.status == Status::FAILED && cfg.error_policy == ErrorPolicy::Report {
        eprintln!("{}", model.status_message());
    }
    Ok(())
}
