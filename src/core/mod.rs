//! Core generation engine.
//!
//! ## Pipeline
//!
//! 1. **Decoding**: structure exports are read into raw nodes (`parsers::structure`)
//!    and decoded into one [`DeclarationTree`] per source unit (`declarations`).
//! 2. **Extraction**: trees are walked for types conforming to the marker
//!    protocol, producing [`LocalizableEntry`] values (`entries`).
//! 3. **Generation**: conformance source is synthesized for every qualifying
//!    type (`generate`) and the translation table is merged (`table`).
//!
//! ## Module Structure
//!
//! - `context`: Orchestrates config, scanning and parallel decoding
//! - `declarations`: Declaration tree, decoder and case-element reconstruction
//! - `entries`: Localizable entry extraction and identifier shortening
//! - `file_scanner`: Source root enumeration
//! - `generate`: Generated source builder, conformances and protocol source
//! - `parsers`: Structure export and `.strings` table parsers
//! - `table`: Localisation table merge and persistence

pub mod context;
pub mod declarations;
pub mod entries;
pub mod file_scanner;
pub mod generate;
pub mod parsers;
pub mod table;

pub use context::{GenerationContext, SourceUnit};
pub use declarations::{
    Accessibility, CaseElement, DeclId, Declaration, DeclarationTree, DecodeError, TypeKind,
};
pub use entries::{
    Conformance, EntryParameter, Extractor, LocalizableEntry, PlaceholderKind, ShorteningRules,
};
pub use generate::{GeneratedConformance, GeneratedSource};
pub use table::{LocalisationTable, TableError};
