//! Tax-table repository (C2): schema, embedded rate-table JSON, and the
//! process-wide cache.

mod repository;
mod schema;

pub use repository::TableRepository;
pub use schema::{
    bracket_for, derive_brackets, AlbertaK5p, BcTaxReduction, Bpa, Bracket, CppEiTable, DynamicBpaParams, EiRates, FederalTable,
    HealthPremiumBand, OntarioHealthPremium, OntarioSurtax, ProvincialTable, RawBracket,
};
