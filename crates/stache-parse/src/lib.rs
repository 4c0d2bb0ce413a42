//! Error-tolerant parser for Handlebars-style templates.
//!
//! The parser consumes a token stream produced by an external tokenizer and
//! always returns a tree that covers every token. Malformed input shows up as
//! `ERROR` nodes inside the tree rather than as a failed parse.

use stache_syntax::SyntaxKind::{self, *};
use stache_syntax::{SyntaxNode, SyntaxSet, SyntaxTree};

mod grammar;
mod input;
mod parser;

pub use input::{Input, InputError, Token};
pub use stache_errors::{Diagnostic, Renderer};

/// Tokens the parser may resynchronize on while skipping garbage.
pub const RECOVERY_SET: SyntaxSet = SyntaxSet::new([
    OPEN,
    OPEN_BLOCK,
    OPEN_ENDBLOCK,
    OPEN_INVERSE,
    OPEN_PARTIAL,
    OPEN_UNESCAPED,
    CONTENT,
]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Where greedy recovery stops skipping tokens.
    pub recovery: SyntaxSet,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { recovery: RECOVERY_SET }
    }
}

/// Result of parsing one input: the tree and the errors found in it.
#[derive(Debug)]
pub struct Parse {
    tree: SyntaxTree,
    errors: Vec<Diagnostic>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn syntax(&self) -> SyntaxNode<'_> {
        self.tree.root()
    }

    /// Diagnostics of every `ERROR` node, in document order.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn into_parts(self) -> (SyntaxTree, Vec<Diagnostic>) {
        (self.tree, self.errors)
    }

    /// Renders every diagnostic as an annotated snippet of the template.
    pub fn render_errors(&self, renderer: &Renderer, path: &str) -> String {
        self.errors
            .iter()
            .map(|error| format!("{}\n", error.render(renderer, path, self.tree.text())))
            .collect()
    }

    pub fn debug_tree(&self) -> String {
        let errors = self
            .errors
            .iter()
            .map(|error| format!("  {:?}: {}\n", error.range(), error.message()))
            .collect::<String>();
        format!("{}Errors:\n{errors}", self.tree.debug_tree())
    }
}

/// Rejected root label: only composite node kinds can label a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("`{0:?}` cannot label the root of a tree")]
pub struct InvalidRoot(pub SyntaxKind);

/// Parses a whole template into a `TEMPLATE` rooted tree.
pub fn template(input: &Input) -> Parse {
    run(input, TEMPLATE, &ParseOptions::default())
}

pub fn parse(input: &Input, root: SyntaxKind) -> Result<Parse, InvalidRoot> {
    parse_with(input, root, &ParseOptions::default())
}

pub fn parse_with(
    input: &Input,
    root: SyntaxKind,
    options: &ParseOptions,
) -> Result<Parse, InvalidRoot> {
    if root.is_terminal() || matches!(root, EOF | ERROR | TOMBSTONE) {
        return Err(InvalidRoot(root));
    }
    Ok(run(input, root, options))
}

fn run(input: &Input, root: SyntaxKind, options: &ParseOptions) -> Parse {
    let mut parser = parser::Parser::new(input, options);
    grammar::template(&mut parser, root);
    parser.finish()
}
