//! Public syntax tree API built on an index-addressed, immutable arena.

use std::fmt;
use std::ops::Range;

use text_size::TextRange;

use crate::SyntaxKind;

/// Owned syntax tree for a single template text.
///
/// Nodes are stored in preorder, so the root is always node `0` and the
/// nodes of a subtree follow their parent.
pub struct SyntaxTree {
    pub(crate) text: Box<str>,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) tokens: Vec<TokenData>,
    pub(crate) children: Vec<Child>,
}

pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) parent: Option<u32>,
    pub(crate) children: Range<u32>,
    pub(crate) range: TextRange,
    pub(crate) message: Option<Box<str>>,
}

pub(crate) struct TokenData {
    pub(crate) kind: SyntaxKind,
    pub(crate) range: TextRange,
    pub(crate) parent: u32,
}

#[derive(Clone, Copy)]
pub(crate) enum Child {
    Node(u32),
    Token(u32),
}

impl SyntaxTree {
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, index: 0 }
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterates over every token of the tree in source order.
    pub fn tokens(&self) -> impl DoubleEndedIterator<Item = SyntaxToken<'_>> + '_ {
        (0..self.tokens.len() as u32).map(|index| SyntaxToken { tree: self, index })
    }

    /// Iterates over `ERROR` nodes in document order.
    pub fn errors(&self) -> impl Iterator<Item = SyntaxNode<'_>> + '_ {
        (0..self.nodes.len() as u32)
            .map(|index| SyntaxNode { tree: self, index })
            .filter(|node| node.is_error())
    }

    /// Renders the tree one element per line, indented by depth.
    pub fn debug_tree(&self) -> String {
        let mut lines = Vec::new();
        let mut indent = 0usize;

        for event in self.root().preorder_with_tokens() {
            match event {
                WalkEvent::Enter(NodeOrToken::Node(node)) => {
                    let line = match node.error_message() {
                        Some(message) => format!("{:indent$}{node:?} {message:?}", ""),
                        None => format!("{:indent$}{node:?}", ""),
                    };
                    lines.push(line);
                    indent += 2;
                }
                WalkEvent::Enter(NodeOrToken::Token(token)) => {
                    lines.push(format!("{:indent$}{token:?} {:?}", "", token.text()));
                }
                WalkEvent::Leave(NodeOrToken::Node(_)) => indent -= 2,
                WalkEvent::Leave(NodeOrToken::Token(_)) => {}
            }
        }

        lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("text_len", &self.text.len())
            .field("nodes", &self.nodes.len())
            .field("tokens", &self.tokens.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn into_node(self) -> Option<N> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<T> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }
}

pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

impl SyntaxElement<'_> {
    pub fn kind(self) -> SyntaxKind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind(),
        }
    }

    pub fn text_range(self) -> TextRange {
        match self {
            Self::Node(node) => node.text_range(),
            Self::Token(token) => token.text_range(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent<T> {
    Enter(T),
    Leave(T),
}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    index: u32,
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxNode<'_> {}

impl<'a> SyntaxNode<'a> {
    #[inline]
    fn data(self) -> &'a NodeData {
        &self.tree.nodes[self.index as usize]
    }

    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn text_range(self) -> TextRange {
        self.data().range
    }

    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    #[inline]
    pub fn is_error(self) -> bool {
        self.kind() == SyntaxKind::ERROR
    }

    /// Diagnostic attached to an `ERROR` node.
    #[inline]
    pub fn error_message(self) -> Option<&'a str> {
        self.data().message.as_deref()
    }

    pub fn parent(self) -> Option<Self> {
        let index = self.data().parent?;
        Some(Self { tree: self.tree, index })
    }

    /// Iterates over this node and its ancestors, innermost first.
    pub fn ancestors(self) -> impl Iterator<Item = Self> + 'a {
        std::iter::successors(Some(self), |node| node.parent())
    }

    pub fn children_with_tokens(self) -> impl DoubleEndedIterator<Item = SyntaxElement<'a>> + 'a {
        let tree = self.tree;
        let range = self.data().children.clone();
        tree.children[range.start as usize..range.end as usize].iter().map(move |child| {
            match *child {
                Child::Node(index) => NodeOrToken::Node(SyntaxNode { tree, index }),
                Child::Token(index) => NodeOrToken::Token(SyntaxToken { tree, index }),
            }
        })
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = Self> + 'a {
        self.children_with_tokens().filter_map(NodeOrToken::into_node)
    }

    pub fn first_child(self) -> Option<Self> {
        self.children().next()
    }

    pub fn preorder_with_tokens(self) -> Preorder<'a> {
        Preorder { stack: vec![WalkEvent::Enter(NodeOrToken::Node(self))] }
    }

    /// Iterates over this node and all nodes below it in preorder.
    pub fn descendants(self) -> impl Iterator<Item = Self> + 'a {
        self.preorder_with_tokens().filter_map(|event| match event {
            WalkEvent::Enter(NodeOrToken::Node(node)) => Some(node),
            _ => None,
        })
    }

    /// Iterates over all tokens below this node in source order.
    pub fn tokens(self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        self.preorder_with_tokens().filter_map(|event| match event {
            WalkEvent::Enter(NodeOrToken::Token(token)) => Some(token),
            _ => None,
        })
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl fmt::Display for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Token handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a SyntaxTree,
    index: u32,
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxToken<'_> {}

impl<'a> SyntaxToken<'a> {
    #[inline]
    fn data(self) -> &'a TokenData {
        &self.tree.tokens[self.index as usize]
    }

    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn text_range(self) -> TextRange {
        self.data().range
    }

    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    #[inline]
    pub fn parent(self) -> SyntaxNode<'a> {
        SyntaxNode { tree: self.tree, index: self.data().parent }
    }
}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

/// Depth-first walk yielding enter/leave events for nodes and tokens.
pub struct Preorder<'a> {
    stack: Vec<WalkEvent<SyntaxElement<'a>>>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<SyntaxElement<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.stack.pop()?;

        if let WalkEvent::Enter(element) = event {
            self.stack.push(WalkEvent::Leave(element));
            if let NodeOrToken::Node(node) = element {
                self.stack.extend(node.children_with_tokens().rev().map(WalkEvent::Enter));
            }
        }

        Some(event)
    }
}
