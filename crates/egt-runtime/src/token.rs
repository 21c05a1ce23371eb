//! Tokens, reductions and source positions.

use crate::grammar::{Grammar, GroupId, LrStateId, ProductionId, SymbolId, SymbolKind};
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

/// Zero-based line/column position in the source text.
///
/// A line feed advances the line and resets the column; carriage returns are
/// ignored so CRLF input counts like LF input.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A lexed terminal or a reduced nonterminal.
///
/// Tokens move from the input queue onto the parse stack and from there into
/// reduction branches; the parse tree owns its tokens outright.
#[derive(Debug)]
pub struct Token {
    pub symbol: SymbolId,
    pub text: String,
    pub pos: Position,
    /// Present iff `symbol` is a nonterminal produced by a reduce.
    pub reduction: Option<Reduction>,
    /// LR state this token was shifted in; only meaningful on the stack.
    pub(crate) state: LrStateId,
}

impl Token {
    pub fn new(symbol: SymbolId, text: impl Into<String>, pos: Position) -> Self {
        Self {
            symbol,
            text: text.into(),
            pos,
            reduction: None,
            state: LrStateId::new(0),
        }
    }

    pub fn kind(&self, grammar: &Grammar) -> SymbolKind {
        grammar.symbol(self.symbol).kind()
    }

    pub fn group(&self, grammar: &Grammar) -> Option<GroupId> {
        grammar.symbol(self.symbol).group()
    }
}

/// A parse-tree node: the tokens that matched a production's handle.
pub struct Reduction {
    production: ProductionId,
    branches: Vec<Token>,
    /// Opaque consumer payload, untouched by the engine.
    pub data: Option<Box<dyn Any>>,
}

impl Reduction {
    pub fn new(production: ProductionId, branches: Vec<Token>) -> Self {
        Self {
            production,
            branches,
            data: None,
        }
    }

    pub fn production(&self) -> ProductionId {
        self.production
    }

    /// Branch tokens in handle order (left to right).
    pub fn branches(&self) -> &[Token] {
        &self.branches
    }

    pub fn branches_mut(&mut self) -> &mut [Token] {
        &mut self.branches
    }

    pub fn into_branches(self) -> Vec<Token> {
        self.branches
    }
}

impl fmt::Debug for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reduction")
            .field("production", &self.production)
            .field("branches", &self.branches)
            .field("data", &self.data.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Hybrid stack/queue holding tokens waiting to be analyzed.
///
/// The driver enqueues freshly lexed tokens at the back and re-examines the
/// front; error recovery can push a replacement token onto the front. Both
/// ends are O(1).
#[derive(Debug, Default)]
pub struct TokenQueue {
    items: VecDeque<Token>,
}

impl TokenQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push_back(&mut self, token: Token) {
        self.items.push_back(token);
    }

    pub fn push_front(&mut self, token: Token) {
        self.items.push_front(token);
    }

    pub fn pop_front(&mut self) -> Option<Token> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<&Token> {
        self.items.front()
    }
}
