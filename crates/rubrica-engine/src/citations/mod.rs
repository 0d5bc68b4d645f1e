pub mod apa;
pub mod parser;

pub use apa::{render_citation, render_citations};
pub use parser::{contains_marker, parse, parse_body, parse_marker};
