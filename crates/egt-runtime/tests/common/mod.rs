//! Shared test support: a writer for EGT byte streams and a few small
//! hand-assembled grammars.

#![allow(dead_code)]

use egt_runtime::parser::{ParseEvent, Parser};

pub const HEADER: &str = "EGT Test Tables/v1.0";

// Symbol type discriminants as stored in the tables.
pub const NONTERMINAL: u16 = 0;
pub const CONTENT: u16 = 1;
pub const NOISE: u16 = 2;
pub const END: u16 = 3;
pub const GROUP_START: u16 = 4;
pub const GROUP_END: u16 = 5;
pub const ERROR: u16 = 7;

// LR action discriminants.
pub const SHIFT: u16 = 1;
pub const REDUCE: u16 = 2;
pub const GOTO: u16 = 3;
pub const ACCEPT: u16 = 4;

// Group modes.
pub const ADVANCE_TOKEN: u16 = 0;
pub const ADVANCE_CHARACTER: u16 = 1;
pub const ENDING_OPEN: u16 = 0;
pub const ENDING_CLOSED: u16 = 1;

#[derive(Clone)]
pub enum Entry<'a> {
    Empty,
    U16(u16),
    Str(&'a str),
    Bool(bool),
    Byte(u8),
}

use Entry::*;

/// Serializes records in the EGT wire format.
pub struct EgtWriter {
    buf: Vec<u8>,
}

impl EgtWriter {
    pub fn new(header: &str) -> Self {
        let mut buf = Vec::new();
        write_utf16(&mut buf, header);
        Self { buf }
    }

    pub fn record(&mut self, entries: &[Entry<'_>]) {
        self.buf.push(b'M');
        self.buf
            .extend_from_slice(&(entries.len() as u16).to_le_bytes());
        for entry in entries {
            match entry {
                Empty => self.buf.push(b'E'),
                U16(value) => {
                    self.buf.push(b'I');
                    self.buf.extend_from_slice(&value.to_le_bytes());
                }
                Str(value) => {
                    self.buf.push(b'S');
                    write_utf16(&mut self.buf, value);
                }
                Bool(value) => {
                    self.buf.push(b'B');
                    self.buf.push(*value as u8);
                }
                Byte(value) => {
                    self.buf.push(b'b');
                    self.buf.push(*value);
                }
            }
        }
    }

    pub fn property(&mut self, index: u16, name: &str, value: &str) {
        self.record(&[Byte(b'p'), U16(index), Str(name), Str(value)]);
    }

    pub fn table_counts(
        &mut self,
        symbols: u16,
        charsets: u16,
        productions: u16,
        dfa_states: u16,
        lr_states: u16,
        groups: u16,
    ) {
        self.record(&[
            Byte(b't'),
            U16(symbols),
            U16(charsets),
            U16(productions),
            U16(dfa_states),
            U16(lr_states),
            U16(groups),
        ]);
    }

    pub fn initial_states(&mut self, dfa: u16, lr: u16) {
        self.record(&[Byte(b'I'), U16(dfa), U16(lr)]);
    }

    pub fn symbol(&mut self, index: u16, name: &str, kind: u16) {
        self.record(&[Byte(b'S'), U16(index), Str(name), U16(kind)]);
    }

    pub fn charset(&mut self, index: u16, ranges: &[(u16, u16)]) {
        let mut entries = vec![
            Byte(b'c'),
            U16(index),
            U16(0), // codepage
            U16(ranges.len() as u16),
            Empty,
        ];
        for (start, end) in ranges {
            entries.push(U16(*start));
            entries.push(U16(*end));
        }
        self.record(&entries);
    }

    pub fn production(&mut self, index: u16, head: u16, handle: &[u16]) {
        let mut entries = vec![Byte(b'R'), U16(index), U16(head), Empty];
        entries.extend(handle.iter().map(|symbol| U16(*symbol)));
        self.record(&entries);
    }

    pub fn dfa_state(&mut self, index: u16, accept: Option<u16>, edges: &[(u16, u16)]) {
        let mut entries = vec![
            Byte(b'D'),
            U16(index),
            Bool(accept.is_some()),
            U16(accept.unwrap_or(0)),
            Empty,
        ];
        for (charset, target) in edges {
            entries.push(U16(*charset));
            entries.push(U16(*target));
            entries.push(Empty);
        }
        self.record(&entries);
    }

    pub fn lr_state(&mut self, index: u16, actions: &[(u16, u16, u16)]) {
        let mut entries = vec![Byte(b'L'), U16(index), Empty];
        for (symbol, action, target) in actions {
            entries.push(U16(*symbol));
            entries.push(U16(*action));
            entries.push(U16(*target));
            entries.push(Empty);
        }
        self.record(&entries);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn group(
        &mut self,
        index: u16,
        name: &str,
        container: u16,
        start: u16,
        end: u16,
        advance: u16,
        ending: u16,
        nesting: &[u16],
    ) {
        let mut entries = vec![
            Byte(b'g'),
            U16(index),
            Str(name),
            U16(container),
            U16(start),
            U16(end),
            U16(advance),
            U16(ending),
            Empty,
            U16(nesting.len() as u16),
        ];
        entries.extend(nesting.iter().map(|group| U16(*group)));
        self.record(&entries);
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

fn write_utf16(buf: &mut Vec<u8>, s: &str) {
    for unit in s.encode_utf16() {
        buf.extend_from_slice(&unit.to_le_bytes());
    }
    buf.extend_from_slice(&[0, 0]);
}

/// `<S> ::= 'a'`, with whitespace noise. State 0 deliberately carries
/// actions keyed by the whitespace and error symbols so tests can verify
/// they never show up in an expected-symbol set.
///
/// Symbols: 0 EOF, 1 Error, 2 'a', 3 Whitespace, 4 <S>.
pub fn simple_grammar() -> Vec<u8> {
    let mut w = EgtWriter::new(HEADER);
    w.property(0, "Name", "Simple");
    w.property(1, "Version", "1.0");
    w.table_counts(5, 2, 1, 3, 3, 0);
    w.initial_states(0, 0);

    w.symbol(0, "EOF", END);
    w.symbol(1, "Error", ERROR);
    w.symbol(2, "a", CONTENT);
    w.symbol(3, "Whitespace", NOISE);
    w.symbol(4, "S", NONTERMINAL);

    w.charset(0, &[(97, 97)]); // a
    w.charset(1, &[(9, 10), (32, 32)]); // tab, LF, space

    w.dfa_state(0, None, &[(0, 1), (1, 2)]);
    w.dfa_state(1, Some(2), &[]);
    w.dfa_state(2, Some(3), &[(1, 2)]);

    w.production(0, 4, &[2]);

    w.lr_state(
        0,
        &[
            (2, SHIFT, 1),
            (4, GOTO, 2),
            (3, SHIFT, 1), // noise, unreachable
            (1, SHIFT, 1), // error, unreachable
        ],
    );
    w.lr_state(1, &[(0, REDUCE, 0)]);
    w.lr_state(2, &[(0, ACCEPT, 0)]);

    w.finish()
}

/// `<S> ::= <A>` / `<A> ::= 'a'` — the unit production exercises trimming.
///
/// Symbols: 0 EOF, 1 Error, 2 'a', 3 <S>, 4 <A>.
pub fn trim_grammar() -> Vec<u8> {
    let mut w = EgtWriter::new(HEADER);
    w.table_counts(5, 1, 2, 2, 4, 0);
    w.initial_states(0, 0);

    w.symbol(0, "EOF", END);
    w.symbol(1, "Error", ERROR);
    w.symbol(2, "a", CONTENT);
    w.symbol(3, "S", NONTERMINAL);
    w.symbol(4, "A", NONTERMINAL);

    w.charset(0, &[(97, 97)]);

    w.dfa_state(0, None, &[(0, 1)]);
    w.dfa_state(1, Some(2), &[]);

    w.production(0, 3, &[4]); // <S> ::= <A>
    w.production(1, 4, &[2]); // <A> ::= 'a'

    w.lr_state(0, &[(2, SHIFT, 1), (4, GOTO, 2), (3, GOTO, 3)]);
    w.lr_state(1, &[(0, REDUCE, 1)]);
    w.lr_state(2, &[(0, REDUCE, 0)]);
    w.lr_state(3, &[(0, ACCEPT, 0)]);

    w.finish()
}

/// `<S> ::= 'if' Identifier` with overlapping `if`/identifier lexemes; the
/// DFA passes through the keyword accept state on its way to a longer
/// identifier match.
///
/// Symbols: 0 EOF, 1 Error, 2 Identifier, 3 'if', 4 Whitespace, 5 <S>.
pub fn keyword_grammar() -> Vec<u8> {
    let mut w = EgtWriter::new(HEADER);
    w.table_counts(6, 4, 1, 5, 4, 0);
    w.initial_states(0, 0);

    w.symbol(0, "EOF", END);
    w.symbol(1, "Error", ERROR);
    w.symbol(2, "Identifier", CONTENT);
    w.symbol(3, "if", CONTENT);
    w.symbol(4, "Whitespace", NOISE);
    w.symbol(5, "S", NONTERMINAL);

    w.charset(0, &[(97, 122)]); // a-z
    w.charset(1, &[(105, 105)]); // i
    w.charset(2, &[(102, 102)]); // f
    w.charset(3, &[(32, 32)]); // space

    // The 'i' edge is listed first; first match wins within a state, while
    // accept bookkeeping keeps the longest match overall.
    w.dfa_state(0, None, &[(1, 1), (0, 3), (3, 4)]);
    w.dfa_state(1, Some(2), &[(2, 2), (0, 3)]);
    w.dfa_state(2, Some(3), &[(0, 3)]);
    w.dfa_state(3, Some(2), &[(0, 3)]);
    w.dfa_state(4, Some(4), &[(3, 4)]);

    w.production(0, 5, &[3, 2]);

    w.lr_state(0, &[(3, SHIFT, 1), (5, GOTO, 3)]);
    w.lr_state(1, &[(2, SHIFT, 2)]);
    w.lr_state(2, &[(0, REDUCE, 0)]);
    w.lr_state(3, &[(0, ACCEPT, 0)]);

    w.finish()
}

/// `<S> ::= 'a'` plus a nestable block comment group `/* ... */` with
/// character advance and closed ending.
///
/// Symbols: 0 EOF, 1 Error, 2 'a', 3 Whitespace, 4 CommentStart,
/// 5 CommentEnd, 6 Comment, 7 <S>.
pub fn comment_grammar() -> Vec<u8> {
    let mut w = EgtWriter::new(HEADER);
    w.table_counts(8, 4, 1, 7, 3, 1);
    w.initial_states(0, 0);

    w.symbol(0, "EOF", END);
    w.symbol(1, "Error", ERROR);
    w.symbol(2, "a", CONTENT);
    w.symbol(3, "Whitespace", NOISE);
    w.symbol(4, "CommentStart", GROUP_START);
    w.symbol(5, "CommentEnd", GROUP_END);
    w.symbol(6, "Comment", NOISE);
    w.symbol(7, "S", NONTERMINAL);

    w.charset(0, &[(97, 97)]); // a
    w.charset(1, &[(9, 10), (32, 32)]); // whitespace
    w.charset(2, &[(47, 47)]); // slash
    w.charset(3, &[(42, 42)]); // star

    w.dfa_state(0, None, &[(0, 1), (1, 2), (2, 3), (3, 5)]);
    w.dfa_state(1, Some(2), &[]);
    w.dfa_state(2, Some(3), &[(1, 2)]);
    w.dfa_state(3, None, &[(3, 4)]); // saw '/'
    w.dfa_state(4, Some(4), &[]); // "/*"
    w.dfa_state(5, None, &[(2, 6)]); // saw '*'
    w.dfa_state(6, Some(5), &[]); // "*/"

    w.production(0, 7, &[2]);

    w.lr_state(0, &[(2, SHIFT, 1), (7, GOTO, 2)]);
    w.lr_state(1, &[(0, REDUCE, 0)]);
    w.lr_state(2, &[(0, ACCEPT, 0)]);

    // The comment may nest inside itself.
    w.group(
        0,
        "Comment",
        6,
        4,
        5,
        ADVANCE_CHARACTER,
        ENDING_CLOSED,
        &[0],
    );

    w.finish()
}

/// `<S> ::= 'a'` plus a `//`-to-newline comment group with token advance
/// and open ending: the terminating newline stays in the stream.
///
/// Symbols: 0 EOF, 1 Error, 2 'a', 3 Whitespace, 4 CommentStart,
/// 5 NewLine, 6 LineComment, 7 <S>.
pub fn line_comment_grammar() -> Vec<u8> {
    let mut w = EgtWriter::new(HEADER);
    w.table_counts(8, 4, 1, 6, 3, 1);
    w.initial_states(0, 0);

    w.symbol(0, "EOF", END);
    w.symbol(1, "Error", ERROR);
    w.symbol(2, "a", CONTENT);
    w.symbol(3, "Whitespace", NOISE);
    w.symbol(4, "CommentStart", GROUP_START);
    w.symbol(5, "NewLine", NOISE);
    w.symbol(6, "LineComment", NOISE);
    w.symbol(7, "S", NONTERMINAL);

    w.charset(0, &[(97, 97)]); // a
    w.charset(1, &[(32, 32)]); // space
    w.charset(2, &[(47, 47)]); // slash
    w.charset(3, &[(10, 10)]); // LF

    w.dfa_state(0, None, &[(0, 1), (1, 2), (2, 3), (3, 5)]);
    w.dfa_state(1, Some(2), &[]);
    w.dfa_state(2, Some(3), &[(1, 2)]);
    w.dfa_state(3, None, &[(2, 4)]); // saw '/'
    w.dfa_state(4, Some(4), &[]); // "//"
    w.dfa_state(5, Some(5), &[]); // newline

    w.production(0, 7, &[2]);

    w.lr_state(0, &[(2, SHIFT, 1), (7, GOTO, 2)]);
    w.lr_state(1, &[(0, REDUCE, 0)]);
    w.lr_state(2, &[(0, ACCEPT, 0)]);

    // Line comments do not nest.
    w.group(0, "LineComment", 6, 4, 5, ADVANCE_TOKEN, ENDING_OPEN, &[]);

    w.finish()
}

/// Step the parser until a terminal event (anything other than `TokenRead`
/// or `Reduction`), collecting every event on the way. Bounded so broken
/// drivers fail instead of hanging.
pub fn collect_events(parser: &mut Parser) -> Vec<ParseEvent> {
    let mut events = Vec::new();
    for _ in 0..1000 {
        let event = parser.next_event();
        events.push(event);
        match event {
            ParseEvent::TokenRead | ParseEvent::Reduction => continue,
            _ => return events,
        }
    }
    panic!("parser did not reach a terminal event: {:?}", events);
}

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
