//! Language detection and per-language highlighting profiles.

use std::collections::{HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    C,
    Python,
    JavaScript,
    Shell,
    Markdown,
    #[default]
    Text,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::C,
        Language::Python,
        Language::JavaScript,
        Language::Shell,
        Language::Markdown,
        Language::Text,
    ];

    /// Short tag shown in the status bar.
    pub fn name(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Shell => "shell",
            Language::Markdown => "markdown",
            Language::Text => "text",
        }
    }

    /// Map a bare extension (no leading dot) to a language.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "c" | "h" | "cpp" | "hpp" | "cc" | "cxx" => Language::C,
            "py" => Language::Python,
            "js" | "mjs" => Language::JavaScript,
            "sh" | "bash" | "zsh" => Language::Shell,
            "md" => Language::Markdown,
            _ => Language::Text,
        }
    }

    /// Detect from the file name suffix; anything unrecognised is plain text.
    pub fn detect(path: &Path) -> Self {
        let lang = path
            .extension()
            .and_then(|e| e.to_str())
            .map(Language::from_extension)
            .unwrap_or_default();
        tracing::debug!(target: "syntax", path = %path.display(), language = lang.name(), "language_detected");
        lang
    }
}

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof", "_Atomic", "_Bool",
    "_Complex", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert", "_Thread_local",
    "class", "public", "private", "protected", "virtual", "override", "template", "typename",
    "namespace", "using", "new", "delete", "try", "catch", "throw", "nullptr", "true", "false",
    "bool", "const_cast", "dynamic_cast", "reinterpret_cast", "static_cast", "explicit",
    "friend", "mutable", "operator", "this", "typeid", "decltype", "constexpr", "noexcept",
    "static_assert", "alignas", "alignof", "char8_t", "char16_t", "char32_t", "concept",
    "co_await", "co_return", "co_yield", "consteval", "constinit", "export", "import", "module",
    "requires",
];

const C_TYPES: &[&str] = &[
    "int", "char", "bool", "float", "double", "void", "long", "short", "signed", "unsigned",
    "size_t", "ssize_t", "off_t", "time_t",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

const JS_KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
    "instanceof", "new", "return", "super", "switch", "this", "throw", "try", "typeof", "var",
    "void", "while", "with", "yield", "let", "static", "await", "async", "of", "null", "true",
    "false", "undefined", "NaN", "Infinity",
];

const SHELL_KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "case", "esac", "for", "select", "while", "until", "do",
    "done", "in", "function", "time",
];

/// Keyword sets, comment markers and string delimiter for one language.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    pub language: Language,
    keywords: HashSet<&'static [u8]>,
    types: HashSet<&'static [u8]>,
    pub single_comment: Option<&'static str>,
    pub block_comment: Option<(&'static str, &'static str)>,
    pub string_delim: Option<u8>,
}

fn word_set(words: &[&'static str]) -> HashSet<&'static [u8]> {
    words.iter().map(|w| w.as_bytes()).collect()
}

impl LanguageProfile {
    pub fn plain(language: Language) -> Self {
        Self {
            language,
            keywords: HashSet::new(),
            types: HashSet::new(),
            single_comment: None,
            block_comment: None,
            string_delim: None,
        }
    }

    pub fn for_language(language: Language) -> Self {
        match language {
            Language::C => Self {
                language,
                keywords: word_set(C_KEYWORDS),
                types: word_set(C_TYPES),
                single_comment: Some("//"),
                block_comment: Some(("/*", "*/")),
                string_delim: Some(b'"'),
            },
            Language::Python => Self {
                language,
                keywords: word_set(PYTHON_KEYWORDS),
                types: HashSet::new(),
                single_comment: Some("#"),
                block_comment: None,
                string_delim: Some(b'"'),
            },
            Language::JavaScript => Self {
                language,
                keywords: word_set(JS_KEYWORDS),
                types: HashSet::new(),
                single_comment: Some("//"),
                block_comment: Some(("/*", "*/")),
                string_delim: Some(b'"'),
            },
            Language::Shell => Self {
                language,
                keywords: word_set(SHELL_KEYWORDS),
                types: HashSet::new(),
                single_comment: Some("#"),
                block_comment: None,
                string_delim: Some(b'"'),
            },
            Language::Markdown | Language::Text => Self::plain(language),
        }
    }

    /// Plain profiles leave every byte `Normal`.
    pub fn is_plain(&self) -> bool {
        self.string_delim.is_none()
            && self.single_comment.is_none()
            && self.block_comment.is_none()
            && self.keywords.is_empty()
    }

    pub fn is_keyword(&self, word: &[u8]) -> bool {
        self.keywords.contains(word)
    }

    pub fn is_type(&self, word: &[u8]) -> bool {
        self.types.contains(word)
    }

    pub(crate) fn opens_string(&self, b: u8) -> bool {
        b == b'"' || b == b'\'' || Some(b) == self.string_delim
    }
}

/// Owns one profile per language; built once and shared by reference.
#[derive(Debug, Clone)]
pub struct SyntaxRegistry {
    profiles: HashMap<Language, LanguageProfile>,
    fallback: LanguageProfile,
}

impl Default for SyntaxRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxRegistry {
    pub fn new() -> Self {
        let profiles = Language::ALL
            .iter()
            .map(|&lang| (lang, LanguageProfile::for_language(lang)))
            .collect();
        Self {
            profiles,
            fallback: LanguageProfile::plain(Language::Text),
        }
    }

    pub fn profile(&self, language: Language) -> &LanguageProfile {
        self.profiles.get(&language).unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_by_extension() {
        assert_eq!(Language::detect(&PathBuf::from("a/b/main.c")), Language::C);
        assert_eq!(Language::detect(&PathBuf::from("x.hpp")), Language::C);
        assert_eq!(Language::detect(&PathBuf::from("tool.py")), Language::Python);
        assert_eq!(Language::detect(&PathBuf::from("app.mjs")), Language::JavaScript);
        assert_eq!(Language::detect(&PathBuf::from("run.zsh")), Language::Shell);
        assert_eq!(Language::detect(&PathBuf::from("README.md")), Language::Markdown);
        assert_eq!(Language::detect(&PathBuf::from("notes")), Language::Text);
        assert_eq!(Language::detect(&PathBuf::from("weird.xyz")), Language::Text);
    }

    #[test]
    fn keyword_lookup_is_exact_equality() {
        let reg = SyntaxRegistry::new();
        let c = reg.profile(Language::C);
        assert!(c.is_keyword(b"while"));
        assert!(!c.is_keyword(b"whil"));
        assert!(!c.is_keyword(b"whiles"));
        assert!(c.is_type(b"size_t"));
    }

    #[test]
    fn markdown_and_text_are_plain() {
        let reg = SyntaxRegistry::new();
        assert!(reg.profile(Language::Markdown).is_plain());
        assert!(reg.profile(Language::Text).is_plain());
        assert!(!reg.profile(Language::Shell).is_plain());
    }
}
