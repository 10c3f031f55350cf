use std::{ffi::OsStr, path::Path};

use anyhow::Context as _;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use serde::de::DeserializeOwned;

use crate::{document::ApiDocument, generator::config::ModuleConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext.to_ascii_lowercase().as_str() {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

/// Memory-mapped JSON or YAML file, format chosen by extension.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
  display: String,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self {
      file,
      format: SpecFormat::from_path(path),
      display: path.display().to_string(),
    })
  }

  pub fn format(&self) -> SpecFormat {
    self.format
  }

  pub fn parse(&self) -> anyhow::Result<ApiDocument> {
    self.parse_as()
  }

  pub fn parse_as<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
    let parsed = match self.format {
      SpecFormat::Json => serde_json::from_slice(self.file.as_slice()).map_err(anyhow::Error::from),
      SpecFormat::Yaml => serde_yaml::from_slice(self.file.as_slice()).map_err(anyhow::Error::from),
    };
    parsed.with_context(|| format!("failed to parse {}", self.display))
  }
}

/// Loads an API description from disk.
pub async fn load_document(path: &Path) -> anyhow::Result<ApiDocument> {
  SpecLoader::open(path).await?.parse()
}

/// Loads the module configuration, or the default configuration when no path is given.
pub async fn load_config(path: Option<&Path>) -> anyhow::Result<ModuleConfig> {
  match path {
    Some(path) => SpecLoader::open(path).await?.parse_as(),
    None => Ok(ModuleConfig::default()),
  }
}
