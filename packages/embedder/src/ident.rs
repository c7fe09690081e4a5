use anyhow::bail;

use crate::Language;

/// Checks that `ident` can be used verbatim as a package label or
/// variable name in the given language.
///
/// Only ASCII identifiers are accepted. Names also become output file
/// stems, so this rules out path separators as well.
pub fn validate_identifier(
  ident: &str,
  language: Language,
) -> anyhow::Result<()> {
  let mut chars = ident.chars();

  let Some(first) = chars.next() else {
    bail!("Identifier must not be empty.");
  };

  if !(first.is_ascii_alphabetic() || first == '_') {
    bail!(
      "Identifier `{ident}` must start with an ASCII letter or `_`."
    );
  }

  if let Some(invalid) =
    chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
  {
    bail!("Identifier `{ident}` contains invalid character {invalid:?}.");
  }

  if ident == "_" {
    bail!("Identifier `_` is a placeholder and cannot be named.");
  }

  if language.keywords().contains(&ident) {
    bail!("Identifier `{ident}` is a reserved {language} keyword.");
  }

  if language.declaration_types().contains(&ident) {
    bail!(
      "Identifier `{ident}` would shadow the {language} `{ident}` type \
       used by the generated declaration."
    );
  }

  Ok(())
}
