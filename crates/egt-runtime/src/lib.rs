//! Runtime engine for precompiled EGT grammar tables.
//!
//! The engine is grammar-agnostic: it deserializes a binary table set
//! (symbols, character sets, productions, a tokenizer DFA, LALR(1) states
//! and lexical groups), tokenizes source text with the DFA — including
//! nested comment/string groups — and drives a shift-reduce state machine
//! over the token stream, yielding a parse tree or precise diagnostics.
//!
//! ```no_run
//! use egt_runtime::{ParseEvent, Parser};
//!
//! # fn main() -> Result<(), egt_runtime::LoadError> {
//! let mut parser = Parser::new();
//! parser.load_tables(&std::fs::read("grammar.egt").unwrap())?;
//! parser.open("2 + 3 * 4");
//!
//! loop {
//!     match parser.next_event() {
//!         ParseEvent::TokenRead | ParseEvent::Reduction => continue,
//!         ParseEvent::Accept => {
//!             let _root = parser.take_current_reduction();
//!             break;
//!         }
//!         error => panic!("parse failed: {:?} at {}", error, parser.current_position()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod egt;
pub mod grammar;
pub mod parser;
pub mod token;

mod lexer;
mod util;

pub use crate::egt::LoadError;
pub use crate::grammar::Grammar;
pub use crate::parser::{ParseEvent, Parser};
pub use crate::token::{Position, Reduction, Token};
