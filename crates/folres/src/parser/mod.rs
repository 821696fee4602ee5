//! Knowledge base readers

pub mod cnf;

pub use cnf::{parse_cnf, parse_cnf_file, ParsedProblem};
