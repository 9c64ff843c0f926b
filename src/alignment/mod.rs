pub mod parser;
pub mod symbols;

pub use parser::parse_alignment;
