//! Application layer module
//!
//! This module contains the extraction use cases that orchestrate the
//! domain types and the infrastructure adapters.

pub mod export;
pub mod extraction_session;
pub mod identifier_resolver;
pub mod record_assembler;
pub mod review_collector;

pub use export::{ExportRow, export_to_path, to_table_row, write_csv};
pub use extraction_session::{ExtractionRequest, ExtractionService};
pub use identifier_resolver::IdentifierResolver;
pub use record_assembler::RecordAssembler;
pub use review_collector::{ReviewCollection, ReviewCollector, TierOutcome};
