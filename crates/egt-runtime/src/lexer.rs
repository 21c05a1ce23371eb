//! DFA tokenizer and lexical-group handling.
//!
//! [`Scanner::next_token`] produces one logical token per call: it runs the
//! DFA over the lookahead buffer and layers the group stack on top so that
//! nested regions (comments, strings) come back as a single token carrying
//! the whole region's text. Buffer consumption, and with it line/column
//! accounting, happens only here, once a raw token is actually accepted.

use crate::grammar::{AdvanceMode, EndingMode, Grammar, GroupId, SymbolKind};
use crate::token::{Position, Token};
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub(crate) struct Scanner {
    buffer: VecDeque<char>,
    pos: Position,
    group_stack: Vec<(GroupId, Token)>,
}

impl Scanner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn open(&mut self, source: &str) {
        self.buffer = source.chars().collect();
        self.pos = Position::default();
        self.group_stack.clear();
    }

    /// True while a lexical group is still unterminated.
    pub(crate) fn has_open_group(&self) -> bool {
        !self.group_stack.is_empty()
    }

    fn lookahead(&self, index: usize) -> Option<char> {
        self.buffer.get(index).copied()
    }

    // The text of the first `count` buffered characters, unconsumed.
    fn buffer_text(&self, count: usize) -> String {
        self.buffer.iter().take(count).collect()
    }

    /// Remove characters from the front of the buffer, updating the source
    /// position. LF advances the line; CR is ignored.
    fn consume(&mut self, count: usize) {
        for _ in 0..count {
            match self.buffer.pop_front() {
                Some('\n') => {
                    self.pos.line += 1;
                    self.pos.column = 0;
                }
                Some('\r') => {}
                Some(_) => self.pos.column += 1,
                None => break,
            }
        }
    }

    /// Match one raw token with the grammar's DFA, longest match wins.
    ///
    /// Does not consume the buffer. When no accepting state was ever
    /// reached, a one-character error token guarantees forward progress.
    fn dfa_token(&self, grammar: &Grammar) -> Token {
        if self.lookahead(0).is_none() {
            return Token::new(grammar.end_symbol(), "", self.pos);
        }

        let mut current = grammar.dfa_initial();
        let mut length = 0;
        let mut last_accept = None;

        loop {
            let ch = match self.lookahead(length) {
                Some(ch) => ch,
                None => break, // end of input stops the scan
            };

            // Scan the edges in table order; the first matching set wins.
            let target = grammar
                .dfa_state(current)
                .edges()
                .iter()
                .find(|edge| grammar.charset(edge.chars).contains(ch))
                .map(|edge| edge.target);

            let next = match target {
                Some(next) => next,
                None => break,
            };
            if let Some(symbol) = grammar.dfa_state(next).accept() {
                last_accept = Some((symbol, length + 1));
            }
            current = next;
            length += 1;
        }

        match last_accept {
            Some((symbol, length)) => Token::new(symbol, self.buffer_text(length), self.pos),
            None => Token::new(grammar.error_symbol(), self.buffer_text(1), self.pos),
        }
    }

    /// Produce the next logical token, running the group logic on top of the
    /// DFA. The returned token's text covers the entire group region when a
    /// group closes.
    pub(crate) fn next_token(&mut self, grammar: &Grammar) -> Token {
        loop {
            let read = self.dfa_token(grammar);
            let read_symbol = grammar.symbol(read.symbol);

            // Decide whether this token opens a (possibly nested) group. An
            // empty stack always permits; otherwise the open group's nesting
            // set is consulted.
            let nest = match (read_symbol.kind(), read_symbol.group()) {
                (SymbolKind::GroupStart, Some(group)) => match self.group_stack.last() {
                    None => Some(group),
                    Some((top, _)) if grammar.group(*top).nesting_permits(group) => Some(group),
                    Some(_) => None,
                },
                _ => None,
            };

            if let Some(group) = nest {
                tracing::trace!(group = %grammar.group(group).name(), "open group");
                self.consume(read.text.chars().count());
                self.group_stack.push((group, read));
                continue;
            }

            let top_group = match self.group_stack.last() {
                Some((id, _)) => *id,
                None => {
                    // No group open: the token is ready for the parser.
                    self.consume(read.text.chars().count());
                    return read;
                }
            };
            let top = grammar.group(top_group);

            if top.end() == read.symbol {
                // Close the current group.
                tracing::trace!(group = %top.name(), "close group");
                if let Some((_, mut popped)) = self.group_stack.pop() {
                    if top.ending() == EndingMode::Closed {
                        popped.text.push_str(&read.text);
                        self.consume(read.text.chars().count());
                    }
                    match self.group_stack.last_mut() {
                        None => {
                            // The token now stands for the whole region.
                            popped.symbol = top.container();
                            return popped;
                        }
                        Some((_, parent)) => parent.text.push_str(&popped.text),
                    }
                }
            } else if read_symbol.kind() == SymbolKind::End {
                // EOF with a group still open; the driver reports the
                // runaway group.
                return read;
            } else {
                // Ordinary content inside the group.
                match top.advance() {
                    AdvanceMode::Token => {
                        let length = read.text.chars().count();
                        if let Some((_, token)) = self.group_stack.last_mut() {
                            token.text.push_str(&read.text);
                        }
                        self.consume(length);
                    }
                    AdvanceMode::Character => {
                        if let Some(ch) = read.text.chars().next() {
                            if let Some((_, token)) = self.group_stack.last_mut() {
                                token.text.push(ch);
                            }
                        }
                        self.consume(1);
                    }
                }
            }
        }
    }
}
