mod layout;
pub mod records;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use indexmap::IndexMap;
use log::{info, warn};
use serde::Deserialize;
use tablesort::{ColumnSpec, Row, SortStateStore};
use thiserror::Error;

pub use layout::{ColumnLayout, TableLayout};

const BUILTIN_TABLES: &str = include_str!("../tables.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown table `{0}`")]
    UnknownTable(String),
    #[error("{0}")]
    Payload(String),
    #[error("record {index} is not an object")]
    Record { index: usize }
}

/// Every table the dashboard knows about, keyed by table id.
#[derive(Deserialize, Clone, Debug)]
#[serde(transparent)]
pub struct Catalog {
    tables: IndexMap<String, TableLayout>
}

impl Catalog {
    pub fn builtin() -> Result<Catalog, CatalogError> {
        Catalog::from_json(BUILTIN_TABLES)
    }

    pub fn from_json(json: &str) -> Result<Catalog, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Catalog, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io { path: path.to_owned(), source })?;
        Catalog::from_json(&json)
    }

    /// Location of the user's `tables.json` override.
    pub fn user_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "Ledger Desk").map(|dirs| dirs.config_dir().join("tables.json"))
    }

    /// The user's catalog if there is a readable one, the built-in catalog otherwise.
    pub fn load() -> Result<Catalog, CatalogError> {
        if let Some(path) = Catalog::user_path().filter(|path| path.exists()) {
            match Catalog::from_file(&path) {
                Ok(catalog) => {
                    info!("loaded table catalog from {}", path.display());
                    return Ok(catalog);
                }
                Err(e) => warn!("ignoring table catalog {}: {}", path.display(), e)
            }
        }
        info!("using built-in table catalog");
        Catalog::builtin()
    }

    pub fn get(&self, table_id: &str) -> Option<&TableLayout> {
        self.tables.get(table_id)
    }

    pub fn tables(&self) -> impl Iterator<Item = (&str, &TableLayout)> {
        self.tables.iter().map(|(id, layout)| (id.as_str(), layout))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn load_records(&self, table_id: &str, json: &str) -> Result<Vec<Row>, CatalogError> {
        let layout = self.get(table_id).ok_or_else(|| CatalogError::UnknownTable(table_id.to_owned()))?;
        records::rows_from_json(json, layout)
    }

    /// Registers `rows` as the new content of `table_id`, using the table's
    /// layout for its sortable columns and row ids. Call after every
    /// change to the row set.
    pub fn refresh(&self, store: &mut SortStateStore, table_id: &str, rows: Vec<Row>) {
        match self.get(table_id) {
            Some(layout) => store.register(table_id, rows, layout.column_specs(), layout.row_id_extractor()),
            None => {
                warn!("table `{table_id}` is not in the catalog, registering without sortable columns");
                store.register(table_id, rows, Vec::<ColumnSpec>::new(), None);
            }
        }
    }
}
