use std::fmt;

use serde::{Deserialize, Serialize};

const SEPARATOR: char = ':';
const ESCAPE: char = '\\';

/// Flat cache key derived from a [`KeyParts`] pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    raw: String,
}

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Identifiers of a single asset: the icon set (`variant`) and the icon within it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyParts {
    pub variant: String,
    pub name: String,
}

impl KeyParts {
    pub fn new(variant: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            name: name.into(),
        }
    }

    pub fn key(&self) -> CacheKey {
        build_key(self)
    }
}

impl fmt::Display for KeyParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.variant, self.name)
    }
}

/// Joins the parts with `:` after escaping `\` and `:` in each of them, so
/// distinct pairs can never produce the same key.
pub fn build_key(parts: &KeyParts) -> CacheKey {
    let mut raw = String::with_capacity(parts.variant.len() + parts.name.len() + 1);
    push_escaped(&mut raw, &parts.variant);
    raw.push(SEPARATOR);
    push_escaped(&mut raw, &parts.name);
    CacheKey { raw }
}

fn push_escaped(out: &mut String, part: &str) {
    for ch in part.chars() {
        if ch == SEPARATOR || ch == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
}
