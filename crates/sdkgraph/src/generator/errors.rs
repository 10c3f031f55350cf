use thiserror::Error;

/// Conditions that abort a build. No partial module map is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
  #[error("{location}: unresolved reference '{reference}'")]
  UnresolvedReference { reference: String, location: String },
  #[error("{location}: array schema has no item schema")]
  MissingElementType { location: String },
  #[error("schema alias '{name}' refers back to itself")]
  CircularAlias { name: String },
}

impl BuildError {
  pub(crate) fn unresolved(reference: impl Into<String>, location: impl Into<String>) -> Self {
    Self::UnresolvedReference {
      reference: reference.into(),
      location: location.into(),
    }
  }
}

pub type BuildResult<T> = Result<T, BuildError>;
