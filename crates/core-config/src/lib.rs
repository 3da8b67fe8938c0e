//! Configuration loading and runtime editor options.
//!
//! `ted.toml` is looked up in the working directory first, then in the
//! platform config dir (`<config>/ted/ted.toml`); the binary may pass an
//! explicit path instead. Every field has a default, unknown fields are
//! ignored, and a missing or unparsable file yields the defaults. The
//! subset of settings that `:set` can toggle at runtime lives in `Options`.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const MIN_TAB_WIDTH: usize = 1;
pub const MAX_TAB_WIDTH: usize = 16;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_width")]
    pub tab_width: usize,
    #[serde(default = "default_true")]
    pub line_numbers: bool,
    #[serde(default = "default_true")]
    pub syntax: bool,
    #[serde(default)]
    pub wrap: bool,
    #[serde(default)]
    pub show_whitespace: bool,
    /// Require a second quit (or `:q!`) when the document is modified.
    #[serde(default = "default_true")]
    pub confirm_quit: bool,
    /// Shift+motion extends a selection; when false it moves like the plain key.
    #[serde(default = "default_true")]
    pub shift_selection: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: Self::default_tab_width(),
            line_numbers: true,
            syntax: true,
            wrap: false,
            show_whitespace: false,
            confirm_quit: true,
            shift_selection: true,
        }
    }
}

impl EditorConfig {
    const fn default_tab_width() -> usize {
        4
    }
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    /// How long to wait for the rest of an escape sequence after ESC.
    #[serde(default = "InputConfig::default_escape_timeout_ms")]
    pub escape_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: Self::default_escape_timeout_ms(),
        }
    }
}

impl InputConfig {
    const fn default_escape_timeout_ms() -> u64 {
        25
    }

    pub fn escape_timeout(&self) -> Duration {
        Duration::from_millis(self.escape_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Editor display and behavior toggles, mutable at runtime through `:set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub show_line_numbers: bool,
    pub syntax_enabled: bool,
    pub auto_wrap: bool,
    pub show_whitespace: bool,
    pub tab_width: usize,
    pub confirm_quit: bool,
    pub shift_selection: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for Options {
    fn from(cfg: &EditorConfig) -> Self {
        Self {
            show_line_numbers: cfg.line_numbers,
            syntax_enabled: cfg.syntax,
            auto_wrap: cfg.wrap,
            show_whitespace: cfg.show_whitespace,
            tab_width: cfg.tab_width.clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH),
            confirm_quit: cfg.confirm_quit,
            shift_selection: cfg.shift_selection,
        }
    }
}

/// Outcome of `Options::apply_set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    /// Option changed; carries the status message to show.
    Changed(&'static str),
    /// Tab width changed to the carried (clamped) value.
    TabWidth(usize),
    Unknown(String),
}

impl Options {
    /// Apply one `:set` argument (`nu`, `nonumber`, `syntax`, `wrap`, `list`,
    /// `tabstop=N`, ...).
    pub fn apply_set(&mut self, arg: &str) -> SetOutcome {
        let arg = arg.trim();
        if let Some(value) = arg
            .strip_prefix("tabstop=")
            .or_else(|| arg.strip_prefix("ts="))
        {
            return match value.parse::<usize>() {
                Ok(n) => {
                    self.tab_width = n.clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);
                    SetOutcome::TabWidth(self.tab_width)
                }
                Err(_) => SetOutcome::Unknown(arg.to_string()),
            };
        }
        let (flag, value, msg): (&mut bool, bool, &'static str) = match arg {
            "nu" | "number" => (&mut self.show_line_numbers, true, "Line numbers enabled"),
            "nonu" | "nonumber" => (&mut self.show_line_numbers, false, "Line numbers disabled"),
            "syntax" => (&mut self.syntax_enabled, true, "Syntax highlighting enabled"),
            "nosyntax" => (&mut self.syntax_enabled, false, "Syntax highlighting disabled"),
            "wrap" => (&mut self.auto_wrap, true, "Line wrapping enabled"),
            "nowrap" => (&mut self.auto_wrap, false, "Line wrapping disabled"),
            "list" => (&mut self.show_whitespace, true, "Whitespace shown"),
            "nolist" => (&mut self.show_whitespace, false, "Whitespace hidden"),
            _ => return SetOutcome::Unknown(arg.to_string()),
        };
        *flag = value;
        SetOutcome::Changed(msg)
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("ted.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ted").join("ted.toml");
    }
    PathBuf::from("ted.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            if !(MIN_TAB_WIDTH..=MAX_TAB_WIDTH).contains(&file.editor.tab_width) {
                info!(target: "config", raw = file.editor.tab_width, min = MIN_TAB_WIDTH, max = MAX_TAB_WIDTH, "tab_width_clamped");
            }
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            // Parse errors fall back to defaults rather than aborting startup.
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Runtime options seeded from the `[editor]` section.
    pub fn options(&self) -> Options {
        Options::from(&self.file.editor)
    }

    pub fn escape_timeout(&self) -> Duration {
        self.file.input.escape_timeout()
    }

    pub fn case_sensitive_search(&self) -> bool {
        self.file.search.case_sensitive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn load_str(content: &str) -> Config {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), content).unwrap();
        load_from(Some(tmp.path().to_path_buf())).unwrap()
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
        assert!(cfg.source.is_none());
        let opts = cfg.options();
        assert_eq!(opts.tab_width, 4);
        assert!(opts.show_line_numbers && opts.syntax_enabled && opts.confirm_quit);
        assert!(!opts.auto_wrap && !opts.show_whitespace);
        assert_eq!(cfg.escape_timeout(), Duration::from_millis(25));
        assert!(!cfg.case_sensitive_search());
    }

    #[test]
    fn parses_sections_and_keeps_defaults_for_missing_fields() {
        let cfg = load_str(
            "[editor]\ntab_width = 8\nline_numbers = false\n[search]\ncase_sensitive = true\n[input]\nescape_timeout_ms = 50\n",
        );
        let opts = cfg.options();
        assert_eq!(opts.tab_width, 8);
        assert!(!opts.show_line_numbers);
        assert!(opts.syntax_enabled);
        assert!(cfg.case_sensitive_search());
        assert_eq!(cfg.escape_timeout(), Duration::from_millis(50));
        assert!(cfg.raw.is_some());
    }

    #[test]
    fn tab_width_is_clamped() {
        assert_eq!(load_str("[editor]\ntab_width = 0\n").options().tab_width, 1);
        assert_eq!(load_str("[editor]\ntab_width = 99\n").options().tab_width, 16);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let cfg = load_str("[editor]\nfancy = 3\n[other]\nx = 1\n");
        assert_eq!(cfg.file.editor, EditorConfig::default());
    }

    #[test]
    fn parse_error_falls_back_and_logs() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor\ntab_width = ").unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || {
            load_from(Some(tmp.path().to_path_buf())).unwrap()
        });

        assert_eq!(cfg.file, ConfigFile::default());
        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed"));
    }

    #[test]
    fn set_toggles_options() {
        let mut opts = Options::default();
        assert_eq!(opts.apply_set("nonu"), SetOutcome::Changed("Line numbers disabled"));
        assert!(!opts.show_line_numbers);
        assert_eq!(opts.apply_set("number"), SetOutcome::Changed("Line numbers enabled"));
        assert!(opts.show_line_numbers);
        opts.apply_set("nosyntax");
        assert!(!opts.syntax_enabled);
        opts.apply_set("wrap");
        assert!(opts.auto_wrap);
        opts.apply_set("list");
        assert!(opts.show_whitespace);
        assert_eq!(opts.apply_set("ts=2"), SetOutcome::TabWidth(2));
        assert_eq!(opts.apply_set("tabstop=40"), SetOutcome::TabWidth(16));
        assert_eq!(opts.apply_set("bogus"), SetOutcome::Unknown("bogus".into()));
        assert_eq!(opts.apply_set("ts=x"), SetOutcome::Unknown("ts=x".into()));
    }
}
