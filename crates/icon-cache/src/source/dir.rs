//! Source backed by a local directory of bundled assets laid out as
//! `<root>/<variant>/<name>.<ext>`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::AssetSource;
use crate::errors::IconError;
use crate::key::KeyParts;

pub const DEFAULT_EXTENSION: &str = "svg";

#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
    extension: String,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `None` when either identifier could resolve outside `root`.
    pub fn path_for(&self, parts: &KeyParts) -> Option<PathBuf> {
        if !is_plain_segment(&parts.variant) || !is_plain_segment(&parts.name) {
            return None;
        }
        let file = if self.extension.is_empty() {
            parts.name.clone()
        } else {
            format!("{}.{}", parts.name, self.extension)
        };
        Some(self.root.join(&parts.variant).join(file))
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
}

#[async_trait]
impl AssetSource for DirSource {
    async fn retrieve(&self, parts: &KeyParts) -> Result<String, IconError> {
        let Some(path) = self.path_for(parts) else {
            return Err(IconError::not_found(parts.key()));
        };
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(body),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(IconError::not_found(parts.key())),
            Err(err) => Err(IconError::transport(format!(
                "read {}: {err}",
                path.display()
            ))),
        }
    }
}
