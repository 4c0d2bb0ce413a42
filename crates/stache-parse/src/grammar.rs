use stache_syntax::SyntaxKind::{self, *};

use crate::parser::Parser;

pub(crate) mod expressions;
mod statements;

/// Parses the whole input into one `root` node.
///
/// Whenever the program rule gives up before the end of the input, one step
/// of recovery consumes at least one token and parsing resumes, so the loop
/// terminates and nothing is left unconsumed.
pub(crate) fn template(p: &mut Parser<'_>, root: SyntaxKind) {
    let m = p.start();
    statements::program(p);

    while !p.at_end() {
        let problem = p.position();

        if p.at(OPEN_ENDBLOCK) {
            let orphan = p.start();
            statements::close_block(p);
            orphan.error(p, "no corresponding open block");
        }

        if p.position() == problem {
            let invalid = p.start();
            p.bump();
            invalid.error(p, "invalid token");
        }

        statements::program(p);
    }

    m.complete(p, root);
}

fn expected(kind: SyntaxKind) -> String {
    format!("expected {}", kind.describe())
}

/// Consumes a `kind` token wrapped in a node of the same kind.
///
/// A run of lexer-rejected tokens is swallowed into one error node; any other
/// mismatch leaves a zero-width error and consumes nothing.
pub(crate) fn leaf(p: &mut Parser<'_>, kind: SyntaxKind) -> bool {
    let m = p.start();

    if p.at(kind) {
        p.bump();
        m.complete(p, kind);
        return true;
    }

    while p.at(INVALID) {
        p.bump();
    }

    m.error(p, expected(kind));
    false
}

/// Like [`leaf`], but on a mismatch skips ahead to `kind`, stopping early at
/// a recovery token or the end of input.
pub(crate) fn leaf_greedy(p: &mut Parser<'_>, kind: SyntaxKind) -> bool {
    if leaf(p, kind) {
        return true;
    }

    if !p.at(kind) {
        p.report_error(expected(kind));

        let skipped = p.start();
        while !p.at_end() && !p.at(kind) && !p.recovery().contains(p.current()) {
            p.bump();
        }

        if skipped.advanced(p) {
            skipped.error(p, expected(kind));
        } else {
            skipped.abandon(p);
        }
    }

    leaf(p, kind)
}
