//! Grammar model and table loading.
//!
//! All cross-references between grammar entities are stable `u16` indices
//! into the owning tables, so a loaded [`Grammar`] is immutable and can be
//! shared read-only between any number of parse sessions.

use crate::egt::EgtReader;
pub use crate::egt::LoadError;
use crate::util::display_fn;
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SymbolId {
    raw: u16,
}

impl SymbolId {
    pub(crate) const fn new(raw: u16) -> Self {
        Self { raw }
    }

    pub const fn index(self) -> usize {
        self.raw as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct CharSetId {
    raw: u16,
}

impl CharSetId {
    pub(crate) const fn new(raw: u16) -> Self {
        Self { raw }
    }

    pub const fn index(self) -> usize {
        self.raw as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ProductionId {
    raw: u16,
}

impl ProductionId {
    pub(crate) const fn new(raw: u16) -> Self {
        Self { raw }
    }

    pub const fn index(self) -> usize {
        self.raw as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct DfaStateId {
    raw: u16,
}

impl DfaStateId {
    pub(crate) const fn new(raw: u16) -> Self {
        Self { raw }
    }

    pub const fn index(self) -> usize {
        self.raw as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct LrStateId {
    raw: u16,
}

impl LrStateId {
    pub(crate) const fn new(raw: u16) -> Self {
        Self { raw }
    }

    pub const fn index(self) -> usize {
        self.raw as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct GroupId {
    raw: u16,
}

impl GroupId {
    pub(crate) const fn new(raw: u16) -> Self {
        Self { raw }
    }

    pub const fn index(self) -> usize {
        self.raw as usize
    }
}

/// Classification of a grammar symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Nonterminal,
    Content,
    Noise,
    End,
    GroupStart,
    GroupEnd,
    Error,
}

impl SymbolKind {
    fn from_u16(raw: u16) -> Result<Self, LoadError> {
        match raw {
            0 => Ok(Self::Nonterminal),
            1 => Ok(Self::Content),
            2 => Ok(Self::Noise),
            3 => Ok(Self::End),
            4 => Ok(Self::GroupStart),
            5 => Ok(Self::GroupEnd),
            7 => Ok(Self::Error),
            other => Err(LoadError::InvalidSymbolKind(other)),
        }
    }
}

#[derive(Debug)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
    id: SymbolId,
    group: Option<GroupId>,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    /// The lexical group this symbol belongs to, if it is the container,
    /// start or end symbol of one.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: SymbolKind::Nonterminal,
            id: SymbolId::new(0),
            group: None,
        }
    }
}

// `<Nonterm>`, a quoted terminal literal, or `(Special)`.
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SymbolKind::Nonterminal => write!(f, "<{}>", self.name),
            SymbolKind::Content => f.write_str(&literal_format(&self.name)),
            _ => write!(f, "({})", self.name),
        }
    }
}

// Terminals are quoted unless they read like an identifier. An empty name
// stays empty rather than rendering as a pair of quotes.
fn literal_format(source: &str) -> String {
    if source == "'" {
        return "''".to_owned();
    }
    let plain = source
        .chars()
        .all(|ch| ch.is_alphabetic() || ch == '.' || ch == '_' || ch == '-');
    if plain {
        source.to_owned()
    } else {
        format!("'{}'", source)
    }
}

/// An inclusive range of Unicode codepoints.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CharacterRange {
    pub start: u32,
    pub end: u32,
}

/// An ordered list of codepoint ranges.
#[derive(Debug, Default)]
pub struct CharacterSet {
    ranges: Vec<CharacterRange>,
}

impl CharacterSet {
    pub fn ranges(&self) -> &[CharacterRange] {
        &self.ranges
    }

    /// Sets rarely hold more than a handful of ranges; a linear scan is fine.
    pub fn contains(&self, ch: char) -> bool {
        let code = ch as u32;
        self.ranges
            .iter()
            .any(|range| code >= range.start && code <= range.end)
    }
}

#[derive(Debug)]
pub struct Production {
    head: SymbolId,
    handle: Vec<SymbolId>,
    id: ProductionId,
}

impl Production {
    pub fn head(&self) -> SymbolId {
        self.head
    }

    pub fn handle(&self) -> &[SymbolId] {
        &self.handle
    }

    pub fn id(&self) -> ProductionId {
        self.id
    }

    // `"<H> ::= a <B>"`
    pub fn display<'g>(&'g self, grammar: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(|f| {
            write!(f, "{} ::= ", grammar.symbol(self.head))?;
            for (i, symbol) in self.handle.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", grammar.symbol(*symbol))?;
            }
            Ok(())
        })
    }
}

impl Default for Production {
    fn default() -> Self {
        Self {
            head: SymbolId::new(0),
            handle: Vec::new(),
            id: ProductionId::new(0),
        }
    }
}

/// How the group stack consumes tokens lexed inside an open group.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdvanceMode {
    /// Append the whole raw token.
    Token,
    /// Append exactly one character.
    Character,
}

impl AdvanceMode {
    fn from_u16(raw: u16) -> Result<Self, LoadError> {
        match raw {
            0 => Ok(Self::Token),
            1 => Ok(Self::Character),
            other => Err(LoadError::InvalidAdvanceMode(other)),
        }
    }
}

/// Whether the end token is part of the group's text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndingMode {
    /// The end token is left in the stream (line comments).
    Open,
    /// The end token is consumed into the group (block comments).
    Closed,
}

impl EndingMode {
    fn from_u16(raw: u16) -> Result<Self, LoadError> {
        match raw {
            0 => Ok(Self::Open),
            1 => Ok(Self::Closed),
            other => Err(LoadError::InvalidEndingMode(other)),
        }
    }
}

/// A lexical group: a delimited, possibly nested sub-language such as a
/// comment or a string literal.
#[derive(Debug)]
pub struct Group {
    name: String,
    container: SymbolId,
    start: SymbolId,
    end: SymbolId,
    advance: AdvanceMode,
    ending: EndingMode,
    nesting: Vec<GroupId>,
}

impl Group {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn container(&self) -> SymbolId {
        self.container
    }

    pub fn start(&self) -> SymbolId {
        self.start
    }

    pub fn end(&self) -> SymbolId {
        self.end
    }

    pub fn advance(&self) -> AdvanceMode {
        self.advance
    }

    pub fn ending(&self) -> EndingMode {
        self.ending
    }

    pub fn nesting(&self) -> &[GroupId] {
        &self.nesting
    }

    pub fn nesting_permits(&self, group: GroupId) -> bool {
        self.nesting.contains(&group)
    }
}

impl Default for Group {
    fn default() -> Self {
        Self {
            name: String::new(),
            container: SymbolId::new(0),
            start: SymbolId::new(0),
            end: SymbolId::new(0),
            advance: AdvanceMode::Character,
            ending: EndingMode::Closed,
            nesting: Vec::new(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DfaEdge {
    pub chars: CharSetId,
    pub target: DfaStateId,
}

#[derive(Debug, Default)]
pub struct DfaState {
    accept: Option<SymbolId>,
    edges: Vec<DfaEdge>,
}

impl DfaState {
    pub fn accept(&self) -> Option<SymbolId> {
        self.accept
    }

    /// Edges in table order; the first whose character set matches wins.
    pub fn edges(&self) -> &[DfaEdge] {
        &self.edges
    }
}

/// What the LALR automaton does on a given (state, symbol) pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LrInstruction {
    Shift(LrStateId),
    Reduce(ProductionId),
    Goto(LrStateId),
    Accept,
}

impl LrInstruction {
    fn from_raw(action: u16, target: u16) -> Result<Self, LoadError> {
        match action {
            1 => Ok(Self::Shift(LrStateId::new(target))),
            2 => Ok(Self::Reduce(ProductionId::new(target))),
            3 => Ok(Self::Goto(LrStateId::new(target))),
            4 => Ok(Self::Accept),
            other => Err(LoadError::InvalidLrAction(other)),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LrAction {
    symbol: SymbolId,
    instruction: LrInstruction,
}

impl LrAction {
    pub fn symbol(&self) -> SymbolId {
        self.symbol
    }

    pub fn instruction(&self) -> LrInstruction {
        self.instruction
    }
}

#[derive(Debug, Default)]
pub struct LrState {
    actions: Vec<LrAction>,
}

impl LrState {
    pub fn actions(&self) -> &[LrAction] {
        &self.actions
    }

    /// At most one action exists per symbol per state.
    pub fn action_for(&self, symbol: SymbolId) -> Option<&LrAction> {
        self.actions.iter().find(|action| action.symbol == symbol)
    }
}

/// A metadata entry from the grammar's property records (name, version,
/// author and so on).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarProperty {
    pub name: String,
    pub value: String,
}

/// Well-known property record indices.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u16)]
pub enum PropertyIndex {
    Name = 0,
    Version = 1,
    Author = 2,
    About = 3,
    CharacterSet = 4,
    CharacterMapping = 5,
    GeneratedBy = 6,
    GeneratedDate = 7,
}

/// The read-only grammar model: every table the tokenizer and the LALR
/// driver consult at parse time.
#[derive(Debug)]
pub struct Grammar {
    header: String,
    properties: IndexMap<u16, GrammarProperty>,
    symbols: Vec<Symbol>,
    charsets: Vec<CharacterSet>,
    productions: Vec<Production>,
    dfa_states: Vec<DfaState>,
    lr_states: Vec<LrState>,
    groups: Vec<Group>,
    dfa_initial: DfaStateId,
    lr_initial: LrStateId,
    end_symbol: SymbolId,
    error_symbol: SymbolId,
}

impl Grammar {
    /// Deserialize a grammar from an EGT byte stream.
    pub fn from_egt(bytes: &[u8]) -> Result<Self, LoadError> {
        let mut reader = EgtReader::new(bytes)?;
        let mut builder = GrammarBuilder::new(reader.header().to_owned());

        while !reader.eof() {
            reader.next_record()?;
            match reader.byte()? {
                b'p' => builder.load_property(&mut reader)?,
                b't' => builder.load_table_counts(&mut reader)?,
                b'I' => builder.load_initial_states(&mut reader)?,
                b'S' => builder.load_symbol(&mut reader)?,
                b'g' => builder.load_group(&mut reader)?,
                b'c' => builder.load_char_ranges(&mut reader)?,
                b'R' => builder.load_production(&mut reader)?,
                b'D' => builder.load_dfa_state(&mut reader)?,
                b'L' => builder.load_lr_state(&mut reader)?,
                other => return Err(LoadError::UnknownRecord(other)),
            }
        }

        builder.finish()
    }

    /// The file header string (format/version identifier).
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn properties(&self) -> &IndexMap<u16, GrammarProperty> {
        &self.properties
    }

    /// Value of a well-known property, if the tables carry it.
    pub fn property(&self, index: PropertyIndex) -> Option<&str> {
        self.properties
            .get(&(index as u16))
            .map(|property| property.value.as_str())
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn charsets(&self) -> &[CharacterSet] {
        &self.charsets
    }

    pub fn charset(&self, id: CharSetId) -> &CharacterSet {
        &self.charsets[id.index()]
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id.index()]
    }

    pub fn dfa_states(&self) -> &[DfaState] {
        &self.dfa_states
    }

    pub fn dfa_state(&self, id: DfaStateId) -> &DfaState {
        &self.dfa_states[id.index()]
    }

    pub fn lr_states(&self) -> &[LrState] {
        &self.lr_states
    }

    pub fn lr_state(&self, id: LrStateId) -> &LrState {
        &self.lr_states[id.index()]
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.index()]
    }

    pub fn dfa_initial(&self) -> DfaStateId {
        self.dfa_initial
    }

    pub fn lr_initial(&self) -> LrStateId {
        self.lr_initial
    }

    /// The end-of-input symbol (first symbol of type `End` in table order).
    pub fn end_symbol(&self) -> SymbolId {
        self.end_symbol
    }

    /// The error symbol emitted when the tokenizer cannot match anything.
    pub fn error_symbol(&self) -> SymbolId {
        self.error_symbol
    }

    /// Whether a production's handle is a single nonterminal, making it
    /// eligible for reduction trimming.
    pub fn is_unit_production(&self, id: ProductionId) -> bool {
        let production = self.production(id);
        match production.handle() {
            [symbol] => self.symbol(*symbol).kind() == SymbolKind::Nonterminal,
            _ => false,
        }
    }

    // `"'a', '+', (EOF)"` — used for "Expecting: ..." diagnostics.
    pub fn display_symbols<'g>(&'g self, ids: &'g [SymbolId]) -> impl fmt::Display + 'g {
        display_fn(|f| {
            for (i, id) in ids.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", self.symbol(*id))?;
            }
            Ok(())
        })
    }
}

/// Accumulates tables while records stream in. Dropped on any error, so a
/// failed load never yields a partially initialized grammar.
struct GrammarBuilder {
    header: String,
    properties: IndexMap<u16, GrammarProperty>,
    symbols: Vec<Symbol>,
    charsets: Vec<CharacterSet>,
    productions: Vec<Production>,
    dfa_states: Vec<DfaState>,
    lr_states: Vec<LrState>,
    groups: Vec<Group>,
    sized: bool,
    dfa_initial: u16,
    lr_initial: u16,
}

impl GrammarBuilder {
    fn new(header: String) -> Self {
        Self {
            header,
            properties: IndexMap::new(),
            symbols: Vec::new(),
            charsets: Vec::new(),
            productions: Vec::new(),
            dfa_states: Vec::new(),
            lr_states: Vec::new(),
            groups: Vec::new(),
            sized: false,
            dfa_initial: 0,
            lr_initial: 0,
        }
    }

    fn require_sized(&self) -> Result<(), LoadError> {
        if self.sized {
            Ok(())
        } else {
            Err(LoadError::TablesNotSized)
        }
    }

    fn check_symbol(&self, raw: u16) -> Result<SymbolId, LoadError> {
        check_index("symbol", raw, self.symbols.len()).map(SymbolId::new)
    }

    fn check_charset(&self, raw: u16) -> Result<CharSetId, LoadError> {
        check_index("character set", raw, self.charsets.len()).map(CharSetId::new)
    }

    fn check_production(&self, raw: u16) -> Result<ProductionId, LoadError> {
        check_index("production", raw, self.productions.len()).map(ProductionId::new)
    }

    fn check_dfa_state(&self, raw: u16) -> Result<DfaStateId, LoadError> {
        check_index("DFA state", raw, self.dfa_states.len()).map(DfaStateId::new)
    }

    fn check_lr_state(&self, raw: u16) -> Result<LrStateId, LoadError> {
        check_index("LR state", raw, self.lr_states.len()).map(LrStateId::new)
    }

    fn check_group(&self, raw: u16) -> Result<GroupId, LoadError> {
        check_index("group", raw, self.groups.len()).map(GroupId::new)
    }

    fn load_property(&mut self, reader: &mut EgtReader<'_>) -> Result<(), LoadError> {
        let index = reader.u16()?;
        let name = reader.string()?;
        let value = reader.string()?;
        self.properties.insert(index, GrammarProperty { name, value });
        Ok(())
    }

    // Pre-sizes every table. Must arrive before any indexed record so that
    // cross-references can be bounds-checked against the final sizes and the
    // tables are never resized after references exist.
    fn load_table_counts(&mut self, reader: &mut EgtReader<'_>) -> Result<(), LoadError> {
        let symbols = reader.u16()? as usize;
        let charsets = reader.u16()? as usize;
        let productions = reader.u16()? as usize;
        let dfa_states = reader.u16()? as usize;
        let lr_states = reader.u16()? as usize;
        let groups = reader.u16()? as usize;

        self.symbols = resized(symbols);
        self.charsets = resized(charsets);
        self.productions = resized(productions);
        self.dfa_states = resized(dfa_states);
        self.lr_states = resized(lr_states);
        self.groups = resized(groups);
        self.sized = true;

        tracing::debug!(
            symbols,
            charsets,
            productions,
            dfa_states,
            lr_states,
            groups,
            "sized grammar tables"
        );
        Ok(())
    }

    fn load_initial_states(&mut self, reader: &mut EgtReader<'_>) -> Result<(), LoadError> {
        self.dfa_initial = reader.u16()?;
        self.lr_initial = reader.u16()?;
        Ok(())
    }

    fn load_symbol(&mut self, reader: &mut EgtReader<'_>) -> Result<(), LoadError> {
        self.require_sized()?;
        let id = self.check_symbol(reader.u16()?)?;
        let name = reader.string()?;
        let kind = SymbolKind::from_u16(reader.u16()?)?;
        self.symbols[id.index()] = Symbol {
            name,
            kind,
            id,
            group: None,
        };
        Ok(())
    }

    fn load_group(&mut self, reader: &mut EgtReader<'_>) -> Result<(), LoadError> {
        self.require_sized()?;
        let id = self.check_group(reader.u16()?)?;
        let name = reader.string()?;
        let container = self.check_symbol(reader.u16()?)?;
        let start = self.check_symbol(reader.u16()?)?;
        let end = self.check_symbol(reader.u16()?)?;
        let advance = AdvanceMode::from_u16(reader.u16()?)?;
        let ending = EndingMode::from_u16(reader.u16()?)?;
        reader.skip()?; // reserved

        let count = reader.u16()?;
        let mut nesting = Vec::with_capacity(count as usize);
        for _ in 0..count {
            nesting.push(self.check_group(reader.u16()?)?);
        }

        self.groups[id.index()] = Group {
            name,
            container,
            start,
            end,
            advance,
            ending,
            nesting,
        };

        // Wire the symbol-to-group back references.
        self.symbols[container.index()].group = Some(id);
        self.symbols[start.index()].group = Some(id);
        self.symbols[end.index()].group = Some(id);
        Ok(())
    }

    fn load_char_ranges(&mut self, reader: &mut EgtReader<'_>) -> Result<(), LoadError> {
        self.require_sized()?;
        let id = self.check_charset(reader.u16()?)?;
        reader.u16()?; // codepage
        let declared = reader.u16()?;
        reader.skip()?; // reserved

        let mut ranges = Vec::with_capacity(declared as usize);
        while !reader.record_complete() {
            let start = reader.u16()? as u32;
            let end = reader.u16()? as u32;
            ranges.push(CharacterRange { start, end });
        }
        if ranges.len() != declared as usize {
            return Err(LoadError::RangeCountMismatch {
                declared,
                found: ranges.len() as u16,
            });
        }

        self.charsets[id.index()] = CharacterSet { ranges };
        Ok(())
    }

    fn load_production(&mut self, reader: &mut EgtReader<'_>) -> Result<(), LoadError> {
        self.require_sized()?;
        let id = self.check_production(reader.u16()?)?;
        let head = self.check_symbol(reader.u16()?)?;
        reader.skip()?; // reserved

        let mut handle = Vec::new();
        while !reader.record_complete() {
            handle.push(self.check_symbol(reader.u16()?)?);
        }

        self.productions[id.index()] = Production { head, handle, id };
        Ok(())
    }

    fn load_dfa_state(&mut self, reader: &mut EgtReader<'_>) -> Result<(), LoadError> {
        self.require_sized()?;
        let id = self.check_dfa_state(reader.u16()?)?;
        let accepting = reader.boolean()?;
        let accept_index = reader.u16()?;
        reader.skip()?; // reserved

        // The accept index carries garbage when the state does not accept.
        let accept = if accepting {
            Some(self.check_symbol(accept_index)?)
        } else {
            None
        };

        let mut edges = Vec::new();
        while !reader.record_complete() {
            let chars = self.check_charset(reader.u16()?)?;
            let target = self.check_dfa_state(reader.u16()?)?;
            reader.skip()?; // reserved
            edges.push(DfaEdge { chars, target });
        }

        self.dfa_states[id.index()] = DfaState { accept, edges };
        Ok(())
    }

    fn load_lr_state(&mut self, reader: &mut EgtReader<'_>) -> Result<(), LoadError> {
        self.require_sized()?;
        let id = self.check_lr_state(reader.u16()?)?;
        reader.skip()?; // reserved

        let mut actions = Vec::new();
        while !reader.record_complete() {
            let symbol = self.check_symbol(reader.u16()?)?;
            let action = reader.u16()?;
            let target = reader.u16()?;
            reader.skip()?; // reserved

            let instruction = LrInstruction::from_raw(action, target)?;
            match instruction {
                LrInstruction::Shift(state) | LrInstruction::Goto(state) => {
                    self.check_lr_state(state.index() as u16)?;
                }
                LrInstruction::Reduce(production) => {
                    self.check_production(production.index() as u16)?;
                }
                LrInstruction::Accept => {}
            }
            actions.push(LrAction {
                symbol,
                instruction,
            });
        }

        self.lr_states[id.index()] = LrState { actions };
        Ok(())
    }

    fn finish(self) -> Result<Grammar, LoadError> {
        self.require_sized()?;
        let dfa_initial = self.check_dfa_state(self.dfa_initial)?;
        let lr_initial = self.check_lr_state(self.lr_initial)?;
        let end_symbol = first_of_kind(&self.symbols, SymbolKind::End)
            .ok_or(LoadError::MissingSymbol("end-of-input"))?;
        let error_symbol = first_of_kind(&self.symbols, SymbolKind::Error)
            .ok_or(LoadError::MissingSymbol("error"))?;

        tracing::debug!(header = %self.header, "loaded grammar tables");
        Ok(Grammar {
            header: self.header,
            properties: self.properties,
            symbols: self.symbols,
            charsets: self.charsets,
            productions: self.productions,
            dfa_states: self.dfa_states,
            lr_states: self.lr_states,
            groups: self.groups,
            dfa_initial,
            lr_initial,
            end_symbol,
            error_symbol,
        })
    }
}

fn check_index(table: &'static str, index: u16, count: usize) -> Result<u16, LoadError> {
    if (index as usize) < count {
        Ok(index)
    } else {
        Err(LoadError::IndexOutOfBounds {
            table,
            index,
            count,
        })
    }
}

fn resized<T: Default>(count: usize) -> Vec<T> {
    let mut table = Vec::new();
    table.resize_with(count, T::default);
    table
}

fn first_of_kind(symbols: &[Symbol], kind: SymbolKind) -> Option<SymbolId> {
    symbols
        .iter()
        .find(|symbol| symbol.kind() == kind)
        .map(|symbol| symbol.id())
}
