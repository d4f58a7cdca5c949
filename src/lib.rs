//! quotesmith: a paginated flow-layout PDF engine for purchase-order
//! review documents.
//!
//! The library takes a lenient JSON content model ([`Quote`]) and renders
//! an A4 document: logo and title header, two-column addresses, info
//! pills, an itemized table with a repeating header, titled key/value
//! sections and a notes box that may continue across pages. All blocks
//! flow against a single [`cursor::LayoutCursor`]; page breaks happen
//! wherever a block's space request cannot be met.

pub mod assets;
pub mod blocks;
pub mod canvas;
pub mod cursor;
pub mod document;
pub mod error;
pub mod fonts;
pub mod model;
pub mod style;
pub mod wrap;

pub use document::{render, Rendered};
pub use error::RenderError;
pub use model::Quote;
