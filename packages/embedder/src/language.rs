use std::fmt;

use serde::Deserialize;

/// Source language the byte literal is rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Language {
  /// `package <pkg>` followed by a `[]byte{...}` variable.
  #[default]
  Go,
  /// `pub mod <pkg>` wrapping a `&[u8]` static.
  Rust,
}

impl Language {
  /// File extension of generated sources, without the leading dot.
  pub fn extension(&self) -> &'static str {
    match self {
      Self::Go => "go",
      Self::Rust => "rs",
    }
  }

  /// Guesses the language from a generated file's extension.
  pub fn from_extension(ext: &str) -> Option<Self> {
    match ext {
      "go" => Some(Self::Go),
      "rs" => Some(Self::Rust),
      _ => None,
    }
  }

  /// Text that directly precedes the first byte token.
  pub(crate) fn literal_open(&self) -> &'static str {
    match self {
      Self::Go => "[]byte{",
      Self::Rust => "= &[",
    }
  }

  /// Character that terminates the byte tokens.
  pub(crate) fn literal_close(&self) -> char {
    match self {
      Self::Go => '}',
      Self::Rust => ']',
    }
  }

  /// Predeclared types the generated declaration refers to. Naming the
  /// variable after one shadows it inside its own initializer.
  pub(crate) fn declaration_types(&self) -> &'static [&'static str] {
    match self {
      Self::Go => &["byte"],
      // Types and values live in separate namespaces.
      Self::Rust => &[],
    }
  }

  /// Reserved words that cannot name a package or variable.
  pub(crate) fn keywords(&self) -> &'static [&'static str] {
    match self {
      Self::Go => &[
        "break", "case", "chan", "const", "continue", "default", "defer",
        "else", "fallthrough", "for", "func", "go", "goto", "if",
        "import", "interface", "map", "package", "range", "return",
        "select", "struct", "switch", "type", "var",
      ],
      Self::Rust => &[
        "abstract", "as", "async", "await", "become", "box", "break",
        "const", "continue", "crate", "do", "dyn", "else", "enum",
        "extern", "false", "final", "fn", "for", "gen", "if", "impl",
        "in", "let", "loop", "macro", "match", "mod", "move", "mut",
        "override", "priv", "pub", "ref", "return", "self", "Self",
        "static", "struct", "super", "trait", "true", "try", "type",
        "typeof", "unsafe", "unsized", "use", "virtual", "where",
        "while", "yield",
      ],
    }
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Go => write!(f, "go"),
      Self::Rust => write!(f, "rust"),
    }
  }
}
