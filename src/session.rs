//! The interactive loop: user input in, screen actions out.
//!
//! Stdin is read on a plain OS thread and forwarded over a channel. A blocking
//! read parked on tokio's blocking pool cannot be cancelled and would keep the
//! runtime from shutting down after Ctrl-C; a detached thread does not.

use crate::api::NewsSource;
use crate::commands::Command;
use crate::links::{LinkOpener, open_link};
use crate::render::{render_categories, render_countries, render_help};
use crate::screen::NewsScreen;
use std::future::Future;
use std::io::BufRead;
use std::ops::ControlFlow;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Lines buffered between the reader thread and the loop.
const INPUT_BUFFER: usize = 16;

/// Forward lines from `reader` to the returned channel on a dedicated thread.
///
/// # Arguments
///
/// * `reader` - Any line source; the binary passes locked stdin
///
/// # Returns
///
/// A receiver yielding one `String` per line. It closes once `reader` hits end
/// of input or a read error, or when the receiver itself is dropped.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(INPUT_BUFFER);
    std::thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Reading input failed");
                    break;
                }
            }
        }
        debug!("Input reader finished");
    });
    rx
}

/// Run commands from `lines` against `screen` until `quit`, end of input or
/// `shutdown` resolves.
///
/// `shutdown` is polled for the whole session, including while a fetch is in
/// flight, so an interrupt never waits for the network.
#[instrument(level = "info", skip_all)]
pub async fn run<S, O, F>(
    screen: &mut NewsScreen<S>,
    opener: &O,
    mut lines: mpsc::Receiver<String>,
    shutdown: F,
) where
    S: NewsSource,
    O: LinkOpener,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            line = lines.recv() => line,
            _ = &mut shutdown => {
                info!("Interrupted");
                return;
            }
        };
        let Some(line) = line else {
            debug!("Input closed");
            return;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        debug!(?command, "Handling command");

        let flow = tokio::select! {
            flow = handle(screen, opener, command) => flow,
            _ = &mut shutdown => {
                info!("Interrupted during a command");
                return;
            }
        };
        if flow.is_break() {
            return;
        }
    }
}

async fn handle<S: NewsSource, O: LinkOpener>(
    screen: &mut NewsScreen<S>,
    opener: &O,
    command: Command,
) -> ControlFlow<()> {
    match command {
        Command::Country(country) => {
            if !screen.set_country(country).await {
                println!("Country unchanged; type 'search' to reload.");
            }
        }
        Command::Category(category) => {
            if !screen.set_category(category).await {
                println!("Category unchanged; type 'search' to reload.");
            }
        }
        Command::Search => screen.search().await,
        Command::Open(position) => {
            let opened = match screen.state().item(position) {
                Ok(item) => open_link(opener, &item.url).await,
                Err(e) => Err(e),
            };
            match opened {
                Ok(url) => println!("Opened {}", url),
                Err(e) => {
                    warn!(position, error = %e, "Link handoff failed");
                    println!("{}", e.user_message());
                }
            }
        }
        Command::Countries => println!("{}", render_countries()),
        Command::Categories => println!("{}", render_categories()),
        Command::Help => println!("{}", render_help()),
        Command::Quit => return ControlFlow::Break(()),
        Command::Nothing => {}
    }
    ControlFlow::Continue(())
}
