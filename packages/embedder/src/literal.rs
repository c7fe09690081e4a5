//! Rendering bytes as a source literal and reading them back.

use anyhow::{bail, Context};

use crate::Language;

/// Separator emitted after every byte token, including the last one.
pub const DELIMITER: &str = ", ";

/// Renders a complete source file declaring `name` as the given bytes
/// inside the `package` namespace.
///
/// Identifiers are emitted as-is; callers validate them beforehand.
pub fn render_source(
  language: Language,
  package: &str,
  name: &str,
  bytes: &[u8],
) -> String {
  let tokens = render_tokens(bytes);

  match language {
    Language::Go => {
      format!("package {package}\nvar {name} = []byte{{\n\t{tokens}}}\n")
    }
    Language::Rust => format!(
      "pub mod {package} {{\n    \
       #[allow(non_upper_case_globals)]\n    \
       pub static {name}: &[u8] = &[\n        {tokens}];\n}}\n"
    ),
  }
}

/// Decimal byte values in input order, each followed by the delimiter.
fn render_tokens(bytes: &[u8]) -> String {
  // Widest token is "255, ".
  let mut tokens = String::with_capacity(bytes.len() * 5);

  for byte in bytes {
    tokens.push_str(&byte.to_string());
    tokens.push_str(DELIMITER);
  }

  tokens
}

/// Extracts the byte values from source previously produced by
/// [`render_source`].
///
/// Tokens must be decimal integers in `0..=255` without leading zeros,
/// separated by commas. A trailing comma and any whitespace between
/// tokens are accepted.
pub fn parse_literal(
  source: &str,
  language: Language,
) -> anyhow::Result<Vec<u8>> {
  let open = language.literal_open();
  let start = source
    .find(open)
    .map(|index| index + open.len())
    .with_context(|| format!("No `{open}` byte literal found."))?;

  let body = &source[start..];
  let end = body
    .find(language.literal_close())
    .context("Byte literal is not terminated.")?;

  let mut bytes = Vec::new();
  let mut tokens = body[..end].split(',').map(str::trim).peekable();

  while let Some(token) = tokens.next() {
    if token.is_empty() {
      // Only the slot after a trailing delimiter may be empty.
      if tokens.peek().is_none() {
        break;
      }

      bail!("Empty token at index {}.", bytes.len());
    }

    let index = bytes.len();

    if !token.bytes().all(|c| c.is_ascii_digit()) {
      bail!("Invalid byte token `{token}` at index {index}.");
    }

    if token.len() > 1 && token.starts_with('0') {
      bail!("Byte token `{token}` at index {index} has a leading zero.");
    }

    let byte = token.parse::<u8>().with_context(|| {
      format!("Byte token `{token}` at index {index} is out of range.")
    })?;

    bytes.push(byte);
  }

  Ok(bytes)
}
