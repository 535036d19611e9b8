//! Versioned rate-table cache (C2): loads embedded JSON rate tables,
//! validates them against the structural invariants in spec §4.2, and
//! caches the result by `(year, edition)` for the life of the process.
//!
//! The shipped tables are compiled into the binary via `include_str!`
//! rather than read from the filesystem at startup. A deployment that
//! needs a future edition's rates without waiting on a new build can
//! hand the repository raw JSON directly through the `_from_bytes`
//! entry points, which run it through the identical parse/validate
//! path and publish it into the same cache.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

use crate::edition::TaxEdition;
use crate::jurisdiction::Jurisdiction;

use super::schema::{invalid_table, CppEiTable, FederalTable, FederalTableRaw, ProvincialTable, ProvincialTableRaw};

fn federal_json(year: i32, edition: TaxEdition) -> Option<&'static str> {
    match (year, edition) {
        (2025, TaxEdition::Edition120) => Some(include_str!("data/federal_2025_120.json")),
        (2025, TaxEdition::Edition121) => Some(include_str!("data/federal_2025_121.json")),
        _ => None,
    }
}

fn cpp_ei_json(year: i32) -> Option<&'static str> {
    match year {
        2025 => Some(include_str!("data/cpp_ei_2025.json")),
        _ => None,
    }
}

fn provinces_json(year: i32, edition: TaxEdition) -> Option<&'static str> {
    match (year, edition) {
        (2025, TaxEdition::Edition120) => Some(include_str!("data/provinces_2025_120.json")),
        (2025, TaxEdition::Edition121) => Some(include_str!("data/provinces_2025_121.json")),
        _ => None,
    }
}

/// Read-mostly, process-wide cache of rate tables. Safe to share behind
/// an `Arc` across threads: entries, once inserted, are never mutated,
/// and `dashmap` guarantees a reader never observes a partially built
/// value (spec §5 shared-resource policy).
#[derive(Debug, Default)]
pub struct TableRepository {
    federal: DashMap<(i32, TaxEdition), Arc<FederalTable>>,
    cpp_ei: DashMap<i32, Arc<CppEiTable>>,
    provincial: DashMap<(i32, TaxEdition), Arc<HashMap<Jurisdiction, ProvincialTable>>>,
}

impl TableRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_federal(&self, year: i32, edition: TaxEdition) -> Result<Arc<FederalTable>, crate::error::PayrollError> {
        if let Some(existing) = self.federal.get(&(year, edition)) {
            return Ok(Arc::clone(&existing));
        }

        let raw_json = federal_json(year, edition).ok_or(crate::error::PayrollError::MissingTaxTable {
            year,
            edition,
            jurisdiction: None,
        })?;
        self.load_federal_from_bytes(year, edition, raw_json.as_bytes())
    }

    /// Parses and validates an externally supplied federal table through
    /// the same `FederalTableRaw` schema and `from_raw` invariant checks
    /// as the embedded tables (SPEC_FULL §10.3): lets a deployment ship a
    /// future edition's rates without a new build. Publishes the result
    /// into the same cache the embedded path uses, overwriting whatever
    /// was there for `(year, edition)`.
    pub fn load_federal_from_bytes(
        &self,
        year: i32,
        edition: TaxEdition,
        bytes: &[u8],
    ) -> Result<Arc<FederalTable>, crate::error::PayrollError> {
        let raw: FederalTableRaw =
            serde_json::from_slice(bytes).map_err(|e| invalid_table(year, edition, format!("federal table parse error: {e}")))?;
        let table = FederalTable::from_raw(raw).map_err(|reason| invalid_table(year, edition, reason))?;

        tracing::info!(year, ?edition, "loaded federal tax table");
        let table = Arc::new(table);
        self.federal.insert((year, edition), Arc::clone(&table));
        Ok(table)
    }

    pub fn load_cpp_ei(&self, year: i32) -> Result<Arc<CppEiTable>, crate::error::PayrollError> {
        if let Some(existing) = self.cpp_ei.get(&year) {
            return Ok(Arc::clone(&existing));
        }

        let raw_json = cpp_ei_json(year).ok_or(crate::error::PayrollError::MissingTaxTable {
            year,
            edition: TaxEdition::Edition121,
            jurisdiction: None,
        })?;
        self.load_cpp_ei_from_bytes(year, raw_json.as_bytes())
    }

    /// Parses an externally supplied CPP/EI table through the same
    /// schema the embedded tables use (SPEC_FULL §10.3).
    pub fn load_cpp_ei_from_bytes(&self, year: i32, bytes: &[u8]) -> Result<Arc<CppEiTable>, crate::error::PayrollError> {
        let table: CppEiTable = serde_json::from_slice(bytes).map_err(|e| crate::error::PayrollError::InvalidTaxTable {
            year,
            edition: TaxEdition::Edition121,
            reason: format!("cpp/ei table parse error: {e}"),
        })?;

        tracing::info!(year, "loaded CPP/EI table");
        let table = Arc::new(table);
        self.cpp_ei.insert(year, Arc::clone(&table));
        Ok(table)
    }

    pub fn load_provincial(
        &self,
        year: i32,
        edition: TaxEdition,
        jurisdiction: Jurisdiction,
    ) -> Result<Arc<ProvincialTable>, crate::error::PayrollError> {
        let all = self.load_all_provincial(year, edition)?;
        all.get(&jurisdiction)
            .cloned()
            .map(Arc::new)
            .ok_or(crate::error::PayrollError::MissingTaxTable {
                year,
                edition,
                jurisdiction: Some(jurisdiction),
            })
    }

    fn load_all_provincial(
        &self,
        year: i32,
        edition: TaxEdition,
    ) -> Result<Arc<HashMap<Jurisdiction, ProvincialTable>>, crate::error::PayrollError> {
        if let Some(existing) = self.provincial.get(&(year, edition)) {
            return Ok(Arc::clone(&existing));
        }

        let raw_json = provinces_json(year, edition).ok_or(crate::error::PayrollError::MissingTaxTable {
            year,
            edition,
            jurisdiction: None,
        })?;
        self.load_provincial_from_bytes(year, edition, raw_json.as_bytes())
    }

    /// Parses and validates an externally supplied per-jurisdiction
    /// provincial table bundle (the same `{ "ON": {...}, "AB": {...}, ...
    /// }` shape as the embedded `provinces_<year>_<edition>.json` files)
    /// through the same schema (SPEC_FULL §10.3).
    pub fn load_provincial_from_bytes(
        &self,
        year: i32,
        edition: TaxEdition,
        bytes: &[u8],
    ) -> Result<Arc<HashMap<Jurisdiction, ProvincialTable>>, crate::error::PayrollError> {
        let raw: HashMap<String, ProvincialTableRaw> =
            serde_json::from_slice(bytes).map_err(|e| invalid_table(year, edition, format!("provincial table parse error: {e}")))?;

        if raw.len() != Jurisdiction::ALL.len() {
            return Err(invalid_table(
                year,
                edition,
                format!("expected exactly {} jurisdictions, found {}", Jurisdiction::ALL.len(), raw.len()),
            ));
        }

        let mut tables = HashMap::with_capacity(raw.len());
        for jurisdiction in Jurisdiction::ALL {
            let raw_table = raw
                .get(jurisdiction.code())
                .ok_or_else(|| invalid_table(year, edition, format!("missing jurisdiction {}", jurisdiction.code())))?
                .clone();
            let table = ProvincialTable::from_raw(raw_table)
                .map_err(|reason| invalid_table(year, edition, format!("{}: {reason}", jurisdiction.code())))?;
            tables.insert(jurisdiction, table);
        }

        tracing::info!(year, ?edition, "loaded provincial tax tables");
        let tables = Arc::new(tables);
        self.provincial.insert((year, edition), Arc::clone(&tables));
        Ok(tables)
    }
}
