//! ted entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{DispatchResult, handle_key};
use core_actions::io_ops::{OpenFileResult, open_file};
use core_config::{Config, load_from};
use core_input::{ByteSource, ChannelSource, KeyDecoder, spawn_stdin_reader};
use core_render::RenderEngine;
use core_search::SearchState;
use core_state::EditorState;
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalGuard};
use core_text::Document;
use std::io::{BufWriter, Stdout, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// Upper bound on how long the loop blocks for a key before it re-checks
/// the terminal size and status message expiry.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

const LOG_FILE: &str = "ted.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "ted", version, about = "A small modal text editor")]
struct Args {
    /// File to open; created on first save if it does not exist.
    pub path: Option<PathBuf>,
    /// Configuration file (overrides discovery of `ted.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime", %info, "panic");
            default_panic(info);
        }));
    });
}

/// Build the initial editor state. An unreadable file is not fatal: the
/// editor starts empty and reports the failure on the message row.
fn load_editor_state(args: &Args, config: &Config) -> EditorState {
    let mut open_error = None;
    let doc = match args.path.as_deref() {
        Some(path) => match open_file(path) {
            OpenFileResult::Success(doc) => doc,
            OpenFileResult::Error(e) => {
                open_error = Some(format!("Open failed: {e}"));
                Document::new()
            }
        },
        None => Document::new(),
    };
    let lines = doc.line_count();
    let mut state = EditorState::new(doc, config.options());
    state.search = SearchState::new(config.case_sensitive_search());
    match open_error {
        Some(msg) => state.set_status(msg),
        None => state.set_status("HELP: Ctrl+S = save | Ctrl+Q = quit | Ctrl+F = find | :help"),
    }
    info!(
        target: "runtime",
        path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        lines,
        language = state.document.language().name(),
        config = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
        "bootstrap_complete"
    );
    state
}

/// Decode the next key from `src` and apply it. `None` when no key arrived
/// within `wait`.
fn pump_key<S: ByteSource + ?Sized>(
    state: &mut EditorState,
    decoder: &mut KeyDecoder,
    src: &mut S,
    wait: Option<Duration>,
) -> Option<DispatchResult> {
    let key = decoder.next_key(src, wait)?;
    Some(handle_key(state, &key))
}

struct EditorRuntime {
    state: EditorState,
    engine: RenderEngine,
    terminal: TerminalGuard<CrosstermBackend>,
    input: ChannelSource,
    decoder: KeyDecoder,
    out: BufWriter<Stdout>,
    size: (u16, u16),
}

impl EditorRuntime {
    fn new(state: EditorState, config: &Config) -> Result<Self> {
        let mut terminal = TerminalGuard::enter(CrosstermBackend::new())?;
        terminal
            .backend()
            .set_title(&format!("ted - {}", state.document.display_name()))?;
        let input = spawn_stdin_reader()?;
        Ok(Self {
            state,
            engine: RenderEngine::new(),
            terminal,
            input,
            decoder: KeyDecoder::new(config.escape_timeout()),
            out: BufWriter::new(stdout()),
            size: (0, 0),
        })
    }

    /// Pick up terminal size changes; returns true when the size changed.
    fn poll_resize(&mut self) -> Result<bool> {
        let size = self.terminal.size()?;
        if size == self.size {
            return Ok(false);
        }
        self.size = size;
        self.state.resize(usize::from(size.0), usize::from(size.1));
        Ok(true)
    }

    fn render(&mut self, full: bool) -> Result<()> {
        self.state.refresh_visible_highlights();
        self.engine.render(&self.state, &mut self.out, full)
    }

    fn run(&mut self) -> Result<()> {
        self.poll_resize()?;
        self.render(true)?;
        loop {
            let mut repaint = false;
            let mut full = false;
            match pump_key(
                &mut self.state,
                &mut self.decoder,
                &mut self.input,
                Some(POLL_INTERVAL),
            ) {
                Some(result) => {
                    if result.quit {
                        info!(target: "runtime", "quit");
                        return Ok(());
                    }
                    repaint |= result.dirty;
                    full |= result.full_redraw;
                }
                None if self.input.is_closed() => {
                    warn!(target: "runtime", "input_closed");
                    return Ok(());
                }
                None => {}
            }
            if self.poll_resize()? {
                repaint = true;
            }
            if self.state.tick_ephemeral() {
                repaint = true;
            }
            if repaint {
                self.render(full)?;
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", version = env!("CARGO_PKG_VERSION"), "startup");

    let config = load_from(args.config.clone())?;
    let state = load_editor_state(&args, &config);
    let mut runtime = EditorRuntime::new(state, &config)?;
    runtime.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_input::SliceSource;

    #[test]
    fn args_accept_path_and_config() {
        let args = Args::try_parse_from(["ted", "notes.md", "--config", "my.toml"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("notes.md")));
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
        let bare = Args::try_parse_from(["ted"]).unwrap();
        assert!(bare.path.is_none());
    }

    #[test]
    fn startup_opens_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.c");
        std::fs::write(&path, "int main;\n").unwrap();
        let args = Args {
            path: Some(path.clone()),
            config: None,
        };
        let state = load_editor_state(&args, &Config::default());
        assert_eq!(state.document.line_count(), 1);
        assert_eq!(state.document.language().name(), "c");
        assert_eq!(state.document.filename(), Some(path.as_path()));
    }

    #[test]
    fn missing_file_starts_empty_with_its_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.py");
        let args = Args {
            path: Some(path.clone()),
            config: None,
        };
        let state = load_editor_state(&args, &Config::default());
        assert_eq!(state.document.line_count(), 1);
        assert_eq!(state.document.filename(), Some(path.as_path()));
        assert!(!state.document.is_modified());
    }

    #[test]
    fn case_sensitivity_comes_from_config() {
        let mut config = Config::default();
        config.file.search.case_sensitive = true;
        let args = Args {
            path: None,
            config: None,
        };
        let mut state = load_editor_state(&args, &config);
        state.document = Document::from_bytes(b"Foo foo");
        assert_eq!(state.search.update_query("foo", &state.document), 1);
    }

    #[test]
    fn decoded_keys_drive_the_editor_until_quit() {
        let args = Args {
            path: None,
            config: None,
        };
        let mut state = load_editor_state(&args, &Config::default());
        state.resize(24, 80);
        let mut decoder = KeyDecoder::new(Duration::ZERO);
        let mut src = SliceSource::new(b"ihi\x1b");
        let mut results = Vec::new();
        while let Some(result) = pump_key(&mut state, &mut decoder, &mut src, None) {
            results.push(result);
        }
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.dirty && !r.quit));
        assert_eq!(state.document.line(0).map(|l| l.text()), Some(&b"hi"[..]));
        assert_eq!(state.mode, core_state::Mode::Normal);

        let mut src = SliceSource::new(b"qq");
        let first = pump_key(&mut state, &mut decoder, &mut src, None).unwrap();
        assert!(!first.quit);
        let second = pump_key(&mut state, &mut decoder, &mut src, None).unwrap();
        assert!(second.quit);
        assert!(pump_key(&mut state, &mut decoder, &mut src, None).is_none());
    }
}
