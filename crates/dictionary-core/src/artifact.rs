//! # Generated Artifacts
//!
//! The fixed set of files a rebuild produces.
//!
//! ```text
//! ┌──────────────────────────┬───────────────────────────────────────────┐
//! │ Artifact                 │ Default path (relative to the project)    │
//! ├──────────────────────────┼───────────────────────────────────────────┤
//! │ culture-model            │ /Models/Dictionary/UmbracoCulture.cs      │
//! │ dictionary-model         │ /Models/Dictionary/Dictionary.cs          │
//! │ dictionary-key-model     │ /Models/Dictionary/DictionaryKey.cs       │
//! │ service                  │ /Services/Implement/DictionaryService.cs  │
//! │ service-interface        │ /Services/IDictionaryService.cs           │
//! │ service-extensions       │ /Extensions/DictionaryExtensions.cs       │
//! └──────────────────────────┴───────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Namespace template with both placeholders.
pub const DEFAULT_NAMESPACE_TEMPLATE: &str = "{project}.{path}";

/// One generated source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Artifact {
    CultureModel,
    DictionaryModel,
    DictionaryKeyModel,
    Service,
    ServiceInterface,
    ServiceExtensions,
}

impl Artifact {
    /// Every artifact, in rebuild order.
    pub const ALL: [Artifact; 6] = [
        Artifact::CultureModel,
        Artifact::DictionaryModel,
        Artifact::DictionaryKeyModel,
        Artifact::Service,
        Artifact::ServiceInterface,
        Artifact::ServiceExtensions,
    ];

    /// Stable identifier used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Artifact::CultureModel => "culture-model",
            Artifact::DictionaryModel => "dictionary-model",
            Artifact::DictionaryKeyModel => "dictionary-key-model",
            Artifact::Service => "service",
            Artifact::ServiceInterface => "service-interface",
            Artifact::ServiceExtensions => "service-extensions",
        }
    }

    /// Human-readable label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Artifact::CultureModel => "culture model",
            Artifact::DictionaryModel => "dictionary model",
            Artifact::DictionaryKeyModel => "dictionary key model",
            Artifact::Service => "dictionary service",
            Artifact::ServiceInterface => "dictionary service interface",
            Artifact::ServiceExtensions => "dictionary service extensions",
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            Artifact::CultureModel => "/Models/Dictionary/UmbracoCulture.cs",
            Artifact::DictionaryModel => "/Models/Dictionary/Dictionary.cs",
            Artifact::DictionaryKeyModel => "/Models/Dictionary/DictionaryKey.cs",
            Artifact::Service => "/Services/Implement/DictionaryService.cs",
            Artifact::ServiceInterface => "/Services/IDictionaryService.cs",
            Artifact::ServiceExtensions => "/Extensions/DictionaryExtensions.cs",
        }
    }

    pub fn default_namespace(&self) -> &'static str {
        match self {
            Artifact::CultureModel => "Umbraco.Core.Models.Language",
            Artifact::DictionaryModel | Artifact::DictionaryKeyModel => {
                "Umbraco.Core.Models.Dictionary"
            }
            Artifact::Service => "Umbraco.Core.Services.Implement",
            Artifact::ServiceInterface | Artifact::ServiceExtensions => "Umbraco.Core.Services",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Artifact {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Artifact::ALL
            .into_iter()
            .find(|artifact| artifact.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownArtifact(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_artifact_names() {
        for artifact in Artifact::ALL {
            assert_eq!(artifact.name().parse::<Artifact>().unwrap(), artifact);
        }
        assert_eq!("SERVICE".parse::<Artifact>().unwrap(), Artifact::Service);
        assert!("controller".parse::<Artifact>().is_err());
    }

    #[test]
    fn test_default_paths_are_distinct() {
        let mut paths: Vec<&str> = Artifact::ALL.iter().map(|a| a.default_path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), Artifact::ALL.len());
    }
}
