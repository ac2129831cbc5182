//! Identifier normalization and qualified table names

use std::borrow::Cow;
use std::fmt;

/// Delimiter characters stripped from identifiers.
///
/// Bracket-delimited identifiers (`[foo]`) and double-quoted identifiers
/// (`"foo"`) must compare equal to the bare token `foo`.
const QUOTE_CHARS: [char; 3] = ['"', '[', ']'];

/// Strip dialect quoting artifacts from an identifier.
///
/// Removes every `"`, `[` and `]`. Case is preserved and the operation is
/// idempotent.
pub fn normalize_identifier(ident: &str) -> Cow<'_, str> {
    if ident.contains(QUOTE_CHARS) {
        Cow::Owned(ident.replace(QUOTE_CHARS, ""))
    } else {
        Cow::Borrowed(ident)
    }
}

/// A normalized, optionally qualified table name.
///
/// Renders as `name` when unqualified and `qualifier.name` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    qualifier: Option<String>,
    name: String,
}

impl QualifiedName {
    /// Build a qualified name from raw components, normalizing each.
    ///
    /// An empty qualifier (before or after normalization) is the same as no
    /// qualifier at all.
    pub fn new(qualifier: Option<&str>, name: &str) -> Self {
        let qualifier = qualifier
            .map(normalize_identifier)
            .filter(|q| !q.is_empty())
            .map(Cow::into_owned);
        Self {
            qualifier,
            name: normalize_identifier(name).into_owned(),
        }
    }

    /// The bare table name, without qualifier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema/database qualifier, if any
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{}.{}", qualifier, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
#[path = "ident_test.rs"]
mod tests;
