pub mod apa;
pub mod index;

pub use apa::{format_bibliography, format_reference};
pub use index::{ReferenceIndex, authors_match};
