//! Key derivation and placeholder engine.
//!
//! ## Extraction
//!
//! - `walker`: visits every node of a document and records dictionary entries
//!   and the mirrored template
//! - `key`: turns a raw path into a locale key (identifiers, renames, buckets)
//! - `list`: splits conjunctive lists into independent entries
//! - `variables`: lifts numbers out of values into restoring filters
//!
//! ## Population
//!
//! - `resolve`: evaluates placeholders against one locale dictionary
//! - `merge`: combines per-locale documents into one multi-locale document
//!
//! `pipeline` runs both over whole directories found by `sources`.

pub mod key;
pub mod list;
pub mod locale;
pub mod merge;
pub mod path;
pub mod pipeline;
pub mod placeholder;
pub mod resolve;
pub mod rules;
pub mod sources;
pub mod text;
pub mod variables;
pub mod walker;

pub use locale::{LocaleData, WriteOutcome};
pub use path::{DocPath, Segment};
pub use pipeline::{DocumentStats, ExtractOutput, PopulateOutput, extract, populate};
pub use placeholder::{Filter, FilterChain, Placeholder};
pub use rules::RuleTable;
pub use walker::{Extraction, LocaleEntry, TreeWalker};
