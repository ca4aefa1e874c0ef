use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::{BUILTIN_WARRANTY_TABLE, ModelCode, WarrantyMonths};

/// Immutable mapping from model code to warranty duration.
///
/// Built once, then shared by reference with every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WarrantyTable {
    entries: BTreeMap<ModelCode, WarrantyMonths>,
}

/// Error type for warranty table construction.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Model code is not exactly four normalized characters.
    #[error("Invalid model code: {0:?} (expected 4 characters, no lowercase or whitespace)")]
    InvalidModelCode(String),

    /// Warranty duration is zero or unreasonably long.
    #[error("Invalid warranty duration: {0} months (must be 1-{max})", max = crate::MAX_WARRANTY_MONTHS)]
    InvalidMonths(u32),

    /// Same model listed twice.
    #[error("Duplicate model code: {0}")]
    DuplicateModel(ModelCode),

    /// Table source is not a JSON object of code to months.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Table file could not be read.
    #[error("Cannot read warranty table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl WarrantyTable {
    /// Creates a table from raw entries, validating every key and value.
    ///
    /// # Errors
    /// Returns `TableError` for a malformed code, out-of-range months or a
    /// code listed more than once.
    pub fn new<'a, I>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut table = BTreeMap::new();
        for (code, months) in entries {
            let code = ModelCode::new(code)?;
            let months = WarrantyMonths::new(months)?;
            if table.contains_key(&code) {
                return Err(TableError::DuplicateModel(code));
            }
            table.insert(code, months);
        }
        Ok(Self { entries: table })
    }

    /// The table shipped with the product line
    pub fn builtin() -> Self {
        let entries = BUILTIN_WARRANTY_TABLE
            .iter()
            .filter_map(|&(code, months)| Some((ModelCode::new(code).ok()?, WarrantyMonths::new(months).ok()?)))
            .collect();
        Self { entries }
    }

    /// Parses a JSON object such as `{"E004": 12, "E005": 24}`.
    ///
    /// # Errors
    /// Returns `TableError::Json` for invalid JSON, or the validation error
    /// of the first bad entry.
    pub fn from_json(source: &str) -> Result<Self, TableError> {
        let raw: RawEntries = serde_json::from_str(source)?;
        raw.into_table()
    }

    /// Reads and parses a JSON table file.
    ///
    /// # Errors
    /// Returns `TableError::Io` if the file cannot be read, otherwise the
    /// errors of [`WarrantyTable::from_json`].
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let source = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&source)?;
        info!(path = %path.display(), models = table.len(), "loaded warranty table");
        Ok(table)
    }

    /// The table at `path`, or the built-in table when no path is configured.
    ///
    /// # Errors
    /// Returns the errors of [`WarrantyTable::from_path`].
    pub fn load(path: Option<&Path>) -> Result<Self, TableError> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                info!("using built-in warranty table");
                Ok(Self::builtin())
            }
        }
    }

    /// Warranty duration for a model code, if the model is known
    pub fn warranty_months(&self, code: &str) -> Option<WarrantyMonths> {
        self.entries.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in model-code order
    pub fn iter(&self) -> impl Iterator<Item = (&ModelCode, WarrantyMonths)> {
        self.entries.iter().map(|(code, months)| (code, *months))
    }
}

impl Default for WarrantyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Table entries in source order, repeats included
struct RawEntries(Vec<(String, u32)>);

impl RawEntries {
    fn into_table(self) -> Result<WarrantyTable, TableError> {
        WarrantyTable::new(self.0.iter().map(|(code, months)| (code.as_str(), *months)))
    }
}

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of model code to warranty months")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, u32>()? {
                    entries.push(entry);
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl<'de> Deserialize<'de> for WarrantyTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawEntries::deserialize(deserializer)?
            .into_table()
            .map_err(serde::de::Error::custom)
    }
}
