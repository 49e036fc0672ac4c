//! Source of truth for repairs.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The three names a script resource carries.
#[derive(Debug, Clone, Copy)]
pub struct ObservedNames<'a> {
    /// Stem of the content file
    pub filesystem: &'a str,
    pub metadata: Option<&'a str>,
    /// Name of the manifest entry at the metadata path
    pub manifest: Option<&'a str>,
}

/// Which of the three names a repair aligns the others to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceOfTruth {
    #[default]
    Filesystem,
    Metadata,
    Manifest,
}

impl SourceOfTruth {
    /// Target name. Metadata and manifest fall back to the file stem when
    /// they carry no name.
    pub fn desired_name<'a>(&self, names: &ObservedNames<'a>) -> &'a str {
        match self {
            Self::Filesystem => names.filesystem,
            Self::Metadata => names.metadata.unwrap_or(names.filesystem),
            Self::Manifest => names.manifest.unwrap_or(names.filesystem),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filesystem => "fs",
            Self::Metadata => "metadata",
            Self::Manifest => "manifest",
        }
    }
}

impl fmt::Display for SourceOfTruth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceOfTruth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fs" | "filesystem" => Ok(Self::Filesystem),
            "metadata" | "yy" => Ok(Self::Metadata),
            "manifest" | "yyp" => Ok(Self::Manifest),
            other => Err(Error::InvalidTruth {
                value: other.to_string(),
            }),
        }
    }
}
