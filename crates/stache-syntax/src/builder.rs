//! Incremental builder for the immutable syntax tree.

use text_size::{TextLen as _, TextRange, TextSize};

use crate::SyntaxKind;
use crate::tree::{Child, NodeData, SyntaxTree, TokenData};

/// Builds a [`SyntaxTree`] from a well-nested sequence of start/token/finish calls.
pub struct Builder {
    text: Box<str>,
    nodes: Vec<NodeData>,
    tokens: Vec<TokenData>,
    children: Vec<Child>,

    /// Children of the currently opened nodes, innermost last.
    pending: Vec<Child>,
    opened: Vec<Opened>,
    offset: TextSize,
}

#[derive(Debug, Clone, Copy)]
struct Opened {
    node: u32,
    first_pending: usize,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 32;

impl Builder {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            nodes: Vec::new(),
            tokens: Vec::new(),
            children: Vec::new(),
            pending: Vec::new(),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            offset: TextSize::new(0),
        }
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.open(kind, None);
    }

    /// Starts an `ERROR` node carrying `message`.
    pub fn start_error(&mut self, message: impl Into<Box<str>>) {
        self.open(SyntaxKind::ERROR, Some(message.into()));
    }

    fn open(&mut self, kind: SyntaxKind, message: Option<Box<str>>) {
        assert!(
            !self.opened.is_empty() || self.nodes.is_empty(),
            "a syntax tree has exactly one root node"
        );

        let index = self.nodes.len() as u32;
        self.nodes.push(NodeData {
            kind,
            parent: self.opened.last().map(|opened| opened.node),
            children: 0..0,
            range: TextRange::empty(self.offset),
            message,
        });
        self.opened.push(Opened { node: index, first_pending: self.pending.len() });
    }

    pub fn token(&mut self, kind: SyntaxKind, len: TextSize) {
        let parent = match self.opened.last() {
            Some(opened) => opened.node,
            None => panic!("token `{kind:?}` is outside of any node"),
        };

        let range = TextRange::at(self.offset, len);
        assert!(range.end() <= self.text.text_len(), "token `{kind:?}` is out of bounds");

        let index = self.tokens.len() as u32;
        self.tokens.push(TokenData { kind, range, parent });
        self.pending.push(Child::Token(index));
        self.offset = range.end();
    }

    pub fn finish_node(&mut self) {
        let Some(Opened { node, first_pending }) = self.opened.pop() else {
            panic!("`finish_node` called without a matching `start_node`");
        };

        let start = self.children.len() as u32;
        self.children.extend(self.pending.drain(first_pending..));
        let end = self.children.len() as u32;

        let data = &mut self.nodes[node as usize];
        data.children = start..end;
        data.range = TextRange::new(data.range.start(), self.offset);

        if !self.opened.is_empty() {
            self.pending.push(Child::Node(node));
        }
    }

    pub fn finish(mut self) -> SyntaxTree {
        assert!(self.opened.is_empty(), "unfinished nodes: {}", self.opened.len());
        assert!(!self.nodes.is_empty(), "a syntax tree needs a root node");
        debug_assert_eq!(self.offset, self.text.text_len(), "tokens do not cover the text");

        SyntaxTree {
            text: std::mem::take(&mut self.text),
            nodes: std::mem::take(&mut self.nodes),
            tokens: std::mem::take(&mut self.tokens),
            children: std::mem::take(&mut self.children),
        }
    }
}
