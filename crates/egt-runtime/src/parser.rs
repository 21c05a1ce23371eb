//! The LALR(1) parse driver.
//!
//! [`Parser`] is one parse session: it owns the lookahead buffer, the input
//! queue, the parse stack and the group stack, while the [`Grammar`] behind
//! it stays immutable and shareable. Drive the session by calling
//! [`Parser::next_event`] in a loop and reacting to each event; every error
//! condition is an event value, never a panic.

use crate::egt::LoadError;
use crate::grammar::{Grammar, LrInstruction, LrStateId, ProductionId, SymbolId, SymbolKind};
use crate::lexer::Scanner;
use crate::token::{Position, Reduction, Token, TokenQueue};
use std::sync::Arc;

/// What a single parse step observed.
///
/// `TokenRead` and silent noise discarding are the only non-terminal
/// outcomes; every other variant except `Reduction` halts the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// A token was produced from the source; inspect it with
    /// [`Parser::current_token`].
    TokenRead,
    /// A production was reduced; the node is available through
    /// [`Parser::current_reduction`] and may be rewritten before the next
    /// step.
    Reduction,
    /// The input matched the grammar; the stack top holds the tree root.
    Accept,
    /// [`Parser::load_tables`] has not succeeded yet.
    NotLoadedError,
    /// The tokenizer could not recognize a symbol.
    LexicalError,
    /// No action exists for the current state and token; see
    /// [`Parser::expected_symbols`].
    SyntaxError,
    /// End of input with an unterminated lexical group.
    GroupError,
    /// The tables are corrupt (a goto entry is missing); not an input error.
    InternalError,
}

// Outcome of one LALR transition. Shifts and trimmed reduces keep looping
// without surfacing an event.
enum LrResult {
    Accepted,
    Shifted,
    Reduced,
    ReduceTrimmed,
    SyntaxError,
    InternalError,
}

/// A parse session over a loaded grammar.
pub struct Parser {
    grammar: Option<Arc<Grammar>>,
    scanner: Scanner,
    stack: Vec<Token>,
    input: TokenQueue,
    current_lr: LrStateId,
    expected: Vec<SymbolId>,
    have_reduction: bool,
    current_pos: Position,
    /// When set before parsing, productions whose handle is a single
    /// nonterminal are folded away without allocating a tree node.
    pub trim_reductions: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// A parser with no tables loaded; [`Parser::next_event`] reports
    /// [`ParseEvent::NotLoadedError`] until [`Parser::load_tables`] succeeds.
    pub fn new() -> Self {
        Self {
            grammar: None,
            scanner: Scanner::new(),
            stack: Vec::new(),
            input: TokenQueue::new(),
            current_lr: LrStateId::new(0),
            expected: Vec::new(),
            have_reduction: false,
            current_pos: Position::default(),
            trim_reductions: false,
        }
    }

    /// A parser over an already loaded grammar. Cloning the `Arc` into
    /// several parsers runs independent sessions off one table set.
    pub fn with_grammar(grammar: Arc<Grammar>) -> Self {
        let mut parser = Self::new();
        parser.current_lr = grammar.lr_initial();
        parser.grammar = Some(grammar);
        parser
    }

    /// Deserialize grammar tables from an EGT byte stream. On failure the
    /// parser keeps no partially loaded tables.
    pub fn load_tables(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        self.grammar = None;
        self.restart();
        let grammar = Grammar::from_egt(bytes)?;
        self.current_lr = grammar.lr_initial();
        self.grammar = Some(Arc::new(grammar));
        Ok(())
    }

    pub fn tables_loaded(&self) -> bool {
        self.grammar.is_some()
    }

    pub fn grammar(&self) -> Option<&Grammar> {
        self.grammar.as_deref()
    }

    /// Specify the text to be parsed, resetting all session state.
    pub fn open(&mut self, source: &str) {
        self.restart();
        self.scanner.open(source);

        if let Some(grammar) = &self.grammar {
            // Bottom-of-stack sentinel; only its state is ever consulted.
            let mut start = Token::new(grammar.end_symbol(), "", Position::default());
            start.state = grammar.lr_initial();
            self.stack.push(start);
        }
    }

    /// Reset the session. Loaded tables and the trim flag are retained;
    /// [`Parser::open`] calls this internally.
    pub fn restart(&mut self) {
        self.scanner = Scanner::new();
        self.stack.clear();
        self.input.clear();
        self.expected.clear();
        self.have_reduction = false;
        self.current_pos = Position::default();
        self.current_lr = match &self.grammar {
            Some(grammar) => grammar.lr_initial(),
            None => LrStateId::new(0),
        };
    }

    /// When the last event was [`ParseEvent::Reduction`] (or
    /// [`ParseEvent::Accept`]), the reduction currently on top of the stack.
    pub fn current_reduction(&self) -> Option<&Reduction> {
        if !self.have_reduction {
            return None;
        }
        self.stack.last().and_then(|token| token.reduction.as_ref())
    }

    /// Mutable access to the current reduction, for in-place rewriting
    /// before the next step.
    pub fn current_reduction_mut(&mut self) -> Option<&mut Reduction> {
        if !self.have_reduction {
            return None;
        }
        self.stack
            .last_mut()
            .and_then(|token| token.reduction.as_mut())
    }

    /// Replace the current reduction, returning the previous one. The
    /// reduce-time rewrite hook.
    pub fn set_current_reduction(&mut self, reduction: Reduction) -> Option<Reduction> {
        if !self.have_reduction {
            return None;
        }
        self.stack
            .last_mut()
            .and_then(|token| token.reduction.replace(reduction))
    }

    /// Detach the current reduction; after [`ParseEvent::Accept`] this is
    /// the root of the parse tree.
    pub fn take_current_reduction(&mut self) -> Option<Reduction> {
        if !self.have_reduction {
            return None;
        }
        self.stack.last_mut().and_then(|token| token.reduction.take())
    }

    /// Line and column of the last token handed to the LALR driver.
    pub fn current_position(&self) -> Position {
        self.current_pos
    }

    /// The token at the front of the input queue: the one just read after
    /// [`ParseEvent::TokenRead`], or the offending one after a lexical or
    /// syntax error.
    pub fn current_token(&self) -> Option<&Token> {
        self.input.front()
    }

    /// Remove the front token from the input queue. Error recovery can
    /// discard the offender and resume stepping.
    pub fn discard_current_token(&mut self) -> Option<Token> {
        self.input.pop_front()
    }

    /// Append a token to the end of the input queue.
    pub fn enqueue_input(&mut self, token: Token) {
        self.input.push_back(token);
    }

    /// Push a token onto the front of the input queue; it is analyzed next.
    pub fn push_input(&mut self, token: Token) {
        self.input.push_front(token);
    }

    /// After [`ParseEvent::SyntaxError`], the symbols the grammar would have
    /// accepted in the failing state.
    pub fn expected_symbols(&self) -> &[SymbolId] {
        &self.expected
    }

    /// `"'a', (EOF)"` — the expected-symbol set formatted for diagnostics.
    pub fn expected_symbols_text(&self) -> Option<String> {
        let grammar = self.grammar.as_deref()?;
        Some(grammar.display_symbols(&self.expected).to_string())
    }

    /// Perform parse actions until an event must be reported. Call in a
    /// loop; all terminal conditions come back as event values.
    pub fn next_event(&mut self) -> ParseEvent {
        let grammar = match self.grammar.clone() {
            Some(grammar) => grammar,
            None => return ParseEvent::NotLoadedError,
        };

        loop {
            if self.input.is_empty() {
                let token = self.scanner.next_token(&grammar);
                tracing::trace!(
                    symbol = %grammar.symbol(token.symbol),
                    text = %token.text,
                    pos = %token.pos,
                    "token read"
                );
                self.input.push_front(token);
                return ParseEvent::TokenRead;
            }

            let (kind, pos) = match self.input.front() {
                Some(token) => (grammar.symbol(token.symbol).kind(), token.pos),
                None => return ParseEvent::InternalError,
            };
            self.current_pos = pos;

            if self.scanner.has_open_group() {
                // The tokenizer hit end of input with a group still open.
                return ParseEvent::GroupError;
            }

            match kind {
                SymbolKind::Noise => {
                    // Already reported through TokenRead; drop it silently.
                    self.input.pop_front();
                }
                SymbolKind::Error => return ParseEvent::LexicalError,
                _ => match self.step_lalr(&grammar) {
                    LrResult::Shifted | LrResult::ReduceTrimmed => {}
                    LrResult::Reduced => return ParseEvent::Reduction,
                    LrResult::Accepted => return ParseEvent::Accept,
                    LrResult::SyntaxError => return ParseEvent::SyntaxError,
                    LrResult::InternalError => return ParseEvent::InternalError,
                },
            }
        }
    }

    // One LALR transition on the front token: shift, reduce, accept, or
    // flag a syntax error and collect the expected-symbol set.
    fn step_lalr(&mut self, grammar: &Grammar) -> LrResult {
        let next_symbol = match self.input.front() {
            Some(token) => token.symbol,
            None => return LrResult::InternalError,
        };

        let action = match grammar.lr_state(self.current_lr).action_for(next_symbol) {
            Some(action) => *action,
            None => {
                // Everything the failing state could have handled, minus
                // symbols a user can never write.
                self.expected.clear();
                for action in grammar.lr_state(self.current_lr).actions() {
                    match grammar.symbol(action.symbol()).kind() {
                        SymbolKind::Content
                        | SymbolKind::End
                        | SymbolKind::GroupStart
                        | SymbolKind::GroupEnd => self.expected.push(action.symbol()),
                        _ => {}
                    }
                }
                return LrResult::SyntaxError;
            }
        };

        self.have_reduction = false;
        match action.instruction() {
            LrInstruction::Accept => {
                self.have_reduction = true;
                LrResult::Accepted
            }
            LrInstruction::Shift(next) => {
                let mut token = match self.input.pop_front() {
                    Some(token) => token,
                    None => return LrResult::InternalError,
                };
                tracing::trace!(state = next.index(), "shift");
                self.current_lr = next;
                token.state = next;
                self.stack.push(token);
                LrResult::Shifted
            }
            LrInstruction::Reduce(production) => self.reduce(grammar, production),
            // A goto keyed by a terminal can only come from corrupt tables.
            LrInstruction::Goto(_) => LrResult::InternalError,
        }
    }

    fn reduce(&mut self, grammar: &Grammar, production: ProductionId) -> LrResult {
        let head = grammar.production(production).head();
        let count = grammar.production(production).handle().len();

        let mut head_token;
        let result;
        if self.trim_reductions && grammar.is_unit_production(production) {
            // Fold the single nonterminal into its head without allocating
            // a tree node; nothing is reported for this reduce.
            head_token = match self.stack.pop() {
                Some(token) => token,
                None => return LrResult::InternalError,
            };
            head_token.symbol = head;
            result = LrResult::ReduceTrimmed;
        } else {
            if self.stack.len() < count {
                return LrResult::InternalError;
            }
            // The stack top is the right-most handle symbol, so splitting
            // restores left-to-right order.
            let branches = self.stack.split_off(self.stack.len() - count);
            head_token = Token::new(head, "", Position::default());
            head_token.reduction = Some(Reduction::new(production, branches));
            self.have_reduction = true;
            result = LrResult::Reduced;
        }
        tracing::trace!(
            production = %grammar.production(production).display(grammar),
            trimmed = matches!(result, LrResult::ReduceTrimmed),
            "reduce"
        );

        // Goto on the exposed stack top.
        let top_state = match self.stack.last() {
            Some(token) => token.state,
            None => return LrResult::InternalError,
        };
        match grammar
            .lr_state(top_state)
            .action_for(head)
            .map(|action| action.instruction())
        {
            Some(LrInstruction::Goto(next)) => {
                self.current_lr = next;
                head_token.state = next;
                self.stack.push(head_token);
                result
            }
            // A missing goto entry means the tables are corrupt, not that
            // the input is wrong.
            _ => LrResult::InternalError,
        }
    }
}
