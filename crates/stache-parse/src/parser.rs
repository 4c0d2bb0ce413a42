use drop_bomb::DropBomb;
use stache_errors::Diagnostic;
use stache_syntax::{Builder, SyntaxKind, SyntaxSet};

use crate::input::Input;
use crate::{Parse, ParseOptions};

/// Token cursor plus a transactional record of the tree being built.
///
/// Nothing touches the tree until [`Parser::finish`]; until then a [`Marker`]
/// can throw away everything recorded after it.
pub(crate) struct Parser<'i> {
    input: &'i Input,
    pos: usize,
    events: Vec<Event>,
    recovery: SyntaxSet,
}

impl<'i> Parser<'i> {
    pub(crate) fn new(input: &'i Input, options: &ParseOptions) -> Self {
        Self { input, pos: 0, events: Vec::new(), recovery: options.recovery }
    }

    pub(crate) fn current(&self) -> SyntaxKind {
        self.input.kind(self.pos)
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.input.kind(self.pos + n)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.input.significant_len()
    }

    /// Number of significant tokens consumed so far.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn recovery(&self) -> SyntaxSet {
        self.recovery
    }

    pub(crate) fn bump(&mut self) {
        if self.at_end() {
            return;
        }

        self.events.push(Event::Token { n: self.pos as u32 });
        self.pos += 1;
    }

    pub(crate) fn start(&mut self) -> Marker {
        let event = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(event, self.pos as u32)
    }

    /// Records a zero-width error at the current position.
    pub(crate) fn report_error(&mut self, message: impl Into<String>) {
        self.events.push(Event::Start { kind: SyntaxKind::ERROR, message: Some(message.into()) });
        self.events.push(Event::Finish);
    }

    /// Runs `rule` and always rolls back whatever it did.
    pub(crate) fn lookahead(&mut self, rule: impl FnOnce(&mut Self) -> bool) -> bool {
        let m = self.start();
        let matched = rule(self);
        m.rollback(self);
        matched
    }

    /// Runs `rule`, keeping its output on success and rolling it back on failure.
    pub(crate) fn attempt(&mut self, rule: impl FnOnce(&mut Self) -> bool) -> bool {
        let m = self.start();
        if rule(self) {
            m.abandon(self);
            true
        } else {
            m.rollback(self);
            false
        }
    }

    pub(crate) fn finish(self) -> Parse {
        let Parser { input, pos: _, mut events, recovery: _ } = self;
        let mut sink = TreeSink { input, builder: Builder::new(input.text()), raw: 0, depth: 0 };

        for index in 0..events.len() {
            let covers_tokens = match &events[index] {
                Event::Start { kind: SyntaxKind::TOMBSTONE, .. } => false,
                Event::Start { .. } => covers_tokens(&events[index..]),
                Event::Token { .. } | Event::Finish => false,
            };
            match &mut events[index] {
                Event::Start { kind: SyntaxKind::TOMBSTONE, .. } => {}
                Event::Start { kind, message } => sink.start(*kind, message.take(), covers_tokens),
                Event::Finish => sink.finish_node(),
                Event::Token { n } => sink.token(*n as usize),
            }
        }

        let tree = sink.builder.finish();
        let errors = tree
            .errors()
            .map(|node| {
                Diagnostic::error(node.error_message().unwrap_or_default(), node.text_range())
            })
            .collect();

        Parse { tree, errors }
    }
}

#[derive(Debug)]
enum Event {
    Start { kind: SyntaxKind, message: Option<String> },
    Token { n: u32 },
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Self::Start { kind: SyntaxKind::TOMBSTONE, message: None };
}

/// Whether the node opened by `events[0]`, a non-tombstone start, contains
/// at least one token.
fn covers_tokens(events: &[Event]) -> bool {
    let mut depth = 0usize;
    for event in events {
        match event {
            Event::Start { kind: SyntaxKind::TOMBSTONE, .. } => {}
            Event::Start { .. } => depth += 1,
            Event::Token { .. } => return true,
            Event::Finish => {
                depth -= 1;
                if depth == 0 {
                    return false;
                }
            }
        }
    }
    false
}

/// Replays parser events into a [`Builder`], threading trivia back in.
///
/// Trivia in front of a node is placed before the node, trivia at the end
/// of the input goes into the root. A node without tokens sits right after
/// the preceding token, so the trivia after it goes to whatever follows.
struct TreeSink<'i> {
    input: &'i Input,
    builder: Builder,
    raw: usize,
    depth: usize,
}

impl TreeSink<'_> {
    fn start(&mut self, kind: SyntaxKind, message: Option<String>, covers_tokens: bool) {
        if self.depth > 0 && covers_tokens {
            self.eat_trivia();
        }

        match message {
            Some(message) => self.builder.start_error(message),
            None => self.builder.start_node(kind),
        }
        self.depth += 1;
    }

    fn finish_node(&mut self) {
        if self.depth == 1 {
            self.eat_until(self.input.tokens().len());
        }

        self.builder.finish_node();
        self.depth -= 1;
    }

    fn token(&mut self, n: usize) {
        self.eat_until(self.input.raw_index(n) + 1);
    }

    fn eat_trivia(&mut self) {
        let tokens = self.input.tokens();
        while self.raw < tokens.len() && tokens[self.raw].kind.is_trivia() {
            self.builder.token(tokens[self.raw].kind, tokens[self.raw].len);
            self.raw += 1;
        }
    }

    fn eat_until(&mut self, end: usize) {
        let tokens = self.input.tokens();
        while self.raw < end {
            self.builder.token(tokens[self.raw].kind, tokens[self.raw].len);
            self.raw += 1;
        }
    }
}

/// An open checkpoint. It must be closed with exactly one of
/// [`complete`](Marker::complete), [`error`](Marker::error),
/// [`abandon`](Marker::abandon) or [`rollback`](Marker::rollback),
/// and checkpoints close in the reverse order they were opened.
pub(crate) struct Marker {
    event: u32,
    pos: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(event: u32, pos: u32) -> Self {
        Self { event, pos, bomb: DropBomb::new("Marker must be completed, abandoned or rolled back") }
    }

    /// Whether the cursor moved since this marker was opened.
    pub(crate) fn advanced(&self, p: &Parser<'_>) -> bool {
        p.pos > self.pos as usize
    }

    /// Wraps everything recorded since the marker into a node of `kind`.
    pub(crate) fn complete(self, p: &mut Parser<'_>, kind: SyntaxKind) {
        self.close(p, kind, None);
    }

    /// Like `complete`, but the node is an `ERROR` carrying `message`.
    pub(crate) fn error(self, p: &mut Parser<'_>, message: impl Into<String>) {
        self.close(p, SyntaxKind::ERROR, Some(message.into()));
    }

    fn close(mut self, p: &mut Parser<'_>, kind: SyntaxKind, message: Option<String>) {
        self.bomb.defuse();

        match &mut p.events[self.event as usize] {
            Event::Start { kind: slot, message: slot_message } => {
                *slot = kind;
                *slot_message = message;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
    }

    /// Keeps everything recorded since the marker without wrapping it.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();

        if self.event as usize == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Start { kind: SyntaxKind::TOMBSTONE, .. }) => {}
                _ => unreachable!(),
            }
        }
    }

    /// Undoes everything recorded since the marker and restores the cursor.
    pub(crate) fn rollback(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();

        p.events.truncate(self.event as usize);
        p.pos = self.pos as usize;
    }
}
