use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;

use dockscope_docker::{DEFAULT_ENDPOINT, Endpoints, WsLogSource};
use dockscope_logs::{
    ConnectionManager, DEFAULT_CAPACITY, LineParser, LogBuffer, RECORD_DELIMITER, StreamEvent,
};
use dockscope_types::TargetIdentity;
use dockscope_tui::{
    Action, AppState, Event, EventHandler, HelpOverlay, JumpDirection, KeyBindings, KeyContext,
    LogViewerScreen, Tui,
};

mod config;

use config::FileConfig;

/// Dockscope - a terminal UI for tailing Docker container logs
#[derive(Parser, Debug)]
#[command(name = "dockscope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server whose containers are being followed
    #[arg(value_name = "SERVER")]
    server: String,

    /// Container ids to follow (Tab cycles between them)
    #[arg(value_name = "CONTAINER", required = true, num_args = 1..)]
    containers: Vec<String>,

    /// Agent websocket endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Buffer size for log entries
    #[arg(long)]
    buffer_size: Option<usize>,

    /// Delimiter between a record's timestamp and content
    #[arg(long)]
    delimiter: Option<char>,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Effective settings after merging CLI, config file, and defaults
struct Settings {
    endpoint: String,
    buffer_size: usize,
    delimiter: char,
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    Ok(Settings {
        endpoint: args
            .endpoint
            .clone()
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        buffer_size: args
            .buffer_size
            .or(file.buffer_size)
            .unwrap_or(DEFAULT_CAPACITY)
            .max(1),
        delimiter: args.delimiter.or(file.delimiter).unwrap_or(RECORD_DELIMITER),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing for debugging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run the application
    let result = run_app(args).await;

    // Handle any errors
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

/// Async stream-control operations, decoupled from input handling
enum InternalAction {
    OpenTarget(TargetIdentity),
    Reconnect,
    CloseConnection,
}

async fn run_app(args: Args) -> Result<()> {
    let settings = resolve_settings(&args)?;

    // Create action channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (internal_tx, mut internal_rx) = mpsc::unbounded_channel::<InternalAction>();
    let (stream_tx, mut stream_rx) = mpsc::unbounded_channel::<StreamEvent>();

    // Initialize state
    let mut state = AppState::new(args.server.clone(), args.containers.clone(), action_tx.clone());

    // Log buffer and connection manager
    let buffer = LogBuffer::new(settings.buffer_size);
    let source = WsLogSource::new(Endpoints::new(&settings.endpoint));
    let mut manager = ConnectionManager::new(
        source,
        LineParser::new(settings.delimiter),
        buffer.clone(),
        stream_tx,
    );

    // Follow the first container right away
    if let Some(target) = state.current_target() {
        manager.open(target).await;
    }

    // Initialize TUI
    let mut tui = Tui::new()?;

    // Initialize event handler
    let mut events = EventHandler::new(Duration::from_millis(100));

    // Initialize keybindings
    let keybindings = KeyBindings::new();

    // Initial render
    render(&mut tui, &mut state, &buffer, &manager)?;

    // Main event loop
    loop {
        tokio::select! {
            // Handle terminal events
            Some(event) = events.next() => {
                match event {
                    Event::Key(key) => {
                        let action = if state.ui_state.filter.editing {
                            keybindings.get_filter_input_action(&key)
                        } else {
                            keybindings.get_action(KeyContext::LogViewer, &key)
                        };
                        if let Some(action) = action {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::WheelUp => {
                        let _ = action_tx.send(Action::ScrollUp(3));
                    }
                    Event::WheelDown => {
                        let _ = action_tx.send(Action::ScrollDown(3));
                    }
                    Event::Tick => {
                        // Re-render below to pick up new state
                    }
                    Event::Resize(_, _) => {
                        let _ = action_tx.send(Action::Render);
                    }
                    Event::Error(e) => {
                        state.show_error(e);
                    }
                }
            }

            // Stream notifications: re-render on buffer growth and
            // status changes alike
            Some(event) = stream_rx.recv() => {
                if let StreamEvent::StatusChanged(status) = event {
                    tracing::debug!("connection status: {}", status);
                }
            }

            // Handle user actions
            Some(action) = action_rx.recv() => {
                handle_action(&mut state, &internal_tx, &buffer, action);
            }

            // Handle internal async actions
            Some(internal) = internal_rx.recv() => {
                match internal {
                    InternalAction::OpenTarget(target) => {
                        state.ui_state.scroll = 0;
                        state.ui_state.follow = true;
                        manager.open(target).await;
                    }
                    InternalAction::Reconnect => {
                        if let Some(target) = state.current_target() {
                            state.ui_state.scroll = 0;
                            state.ui_state.follow = true;
                            manager.open(target).await;
                        }
                    }
                    InternalAction::CloseConnection => {
                        manager.close().await;
                    }
                }
            }
        }

        if state.should_quit {
            break;
        }

        render(&mut tui, &mut state, &buffer, &manager)?;
    }

    // Cleanup
    manager.close().await;
    events.shutdown();
    tui.restore()?;

    Ok(())
}

fn handle_action(
    state: &mut AppState,
    internal_tx: &mpsc::UnboundedSender<InternalAction>,
    buffer: &LogBuffer,
    action: Action,
) {
    match action {
        Action::Quit => {
            let _ = internal_tx.send(InternalAction::CloseConnection);
            state.should_quit = true;
        }
        Action::GoBack => {
            // Peel back overlays first; quitting is the last resort
            if state.ui_state.help_visible {
                state.ui_state.help_visible = false;
            } else if state.ui_state.error_message.is_some() {
                state.dismiss_error();
            } else if state.ui_state.filter.is_visible() {
                state.ui_state.filter.cancel();
            } else {
                let _ = internal_tx.send(InternalAction::CloseConnection);
                state.should_quit = true;
            }
        }

        // Log viewer scrolling
        Action::ScrollUp(n) => {
            state.ui_state.follow = false;
            state.ui_state.scroll = state.ui_state.scroll.saturating_sub(n);
        }
        Action::ScrollDown(n) => {
            state.ui_state.follow = false;
            // Don't cap here - render clamps to the actual entry count
            state.ui_state.scroll = state.ui_state.scroll.saturating_add(n);
        }
        Action::PageUp => {
            state.ui_state.follow = false;
            state.ui_state.scroll = state.ui_state.scroll.saturating_sub(20);
        }
        Action::PageDown => {
            state.ui_state.follow = false;
            state.ui_state.scroll = state.ui_state.scroll.saturating_add(20);
        }
        Action::ScrollToTop => {
            state.ui_state.follow = false;
            state.ui_state.scroll = 0;
        }
        Action::ScrollToBottom => {
            state.ui_state.follow = false;
            // Set to max value - render clamps to the actual bottom
            state.ui_state.scroll = usize::MAX;
        }
        Action::ToggleAutoScroll => {
            state.ui_state.follow = !state.ui_state.follow;
        }
        Action::JumpToAnchor => match state.ui_state.scroll_anchor.direction() {
            JumpDirection::Up => {
                state.ui_state.follow = false;
                state.ui_state.scroll = 0;
            }
            JumpDirection::Down => {
                state.ui_state.follow = true;
                state.ui_state.scroll = usize::MAX;
            }
        },

        // Display toggles
        Action::ToggleTimestamps => {
            state.ui_state.show_timestamps = !state.ui_state.show_timestamps;
        }
        Action::ToggleHelp => {
            state.ui_state.help_visible = !state.ui_state.help_visible;
        }

        // Stream control
        Action::NextContainer => {
            if state.select_next_container() {
                state.ui_state.filter.clear();
                if let Some(target) = state.current_target() {
                    let _ = internal_tx.send(InternalAction::OpenTarget(target));
                }
            }
        }
        Action::PrevContainer => {
            if state.select_prev_container() {
                state.ui_state.filter.clear();
                if let Some(target) = state.current_target() {
                    let _ = internal_tx.send(InternalAction::OpenTarget(target));
                }
            }
        }
        Action::Reconnect => {
            let _ = internal_tx.send(InternalAction::Reconnect);
        }
        Action::ClearLogs => {
            buffer.clear();
            state.ui_state.scroll = 0;
        }

        // Filter actions
        Action::OpenSearch => {
            state.ui_state.filter.begin();
        }
        Action::CloseSearch => {
            state.ui_state.filter.cancel();
        }
        Action::SearchInput(c) => {
            state.ui_state.filter.push(c);
        }
        Action::SearchBackspace => {
            state.ui_state.filter.pop();
        }
        Action::ApplyFilter => {
            state.ui_state.filter.apply();
            state.ui_state.scroll = 0;
        }
        Action::ClearFilter => {
            state.ui_state.filter.clear();
        }
        Action::ToggleCaseSensitive => {
            state.ui_state.filter.toggle_case();
        }

        // Error handling
        Action::ShowError(msg) => {
            state.show_error(msg);
        }
        Action::DismissError => {
            state.dismiss_error();
        }

        Action::Render => {}
    }
}

fn render<S: dockscope_docker::LogSource>(
    tui: &mut Tui,
    state: &mut AppState,
    buffer: &LogBuffer,
    manager: &ConnectionManager<S>,
) -> Result<()> {
    let status = manager.status();
    tui.terminal().draw(|frame| {
        LogViewerScreen::render(frame, state, buffer, status);

        // Render help overlay if visible
        if state.ui_state.help_visible {
            HelpOverlay::render(frame);
        }
    })?;

    Ok(())
}
