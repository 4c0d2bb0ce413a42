use stache_syntax::SyntaxKind::{self, *};

use super::expressions::{in_mustache, path};
use super::{leaf, leaf_greedy};
use crate::parser::Parser;

/// program
///   : statements (simpleInverse statements)?
///   | ""
///
/// A statement sequence that fails without consuming anything is the empty
/// program and leaves no error behind. `{{else}}` is only taken after a
/// statement sequence.
pub(crate) fn program(p: &mut Parser<'_>) {
    if p.at_end() {
        return;
    }

    let m = p.start();
    if statements(p) {
        m.abandon(p);
        if simple_inverse(p) {
            statements(p);
        }
    } else if m.advanced(p) {
        m.abandon(p);
    } else {
        m.rollback(p);
    }
}

/// statements
///   : statement+
pub(crate) fn statements(p: &mut Parser<'_>) -> bool {
    let m = p.start();

    if !statement(p) {
        m.error(p, "expected a statement");
        return false;
    }

    while p.attempt(statement) {}

    m.complete(p, STATEMENTS);
    true
}

/// statement
///   : openInverse program closeBlock
///   | openBlock program closeBlock
///   | mustache
///   | partial
///   | CONTENT
///   | COMMENT
fn statement(p: &mut Parser<'_>) -> bool {
    match p.current() {
        OPEN_INVERSE => {
            // `{{else}}` belongs to the enclosing program.
            if p.lookahead(simple_inverse) {
                return false;
            }

            block(p, open_inverse, "malformed inverse block")
        }
        OPEN_BLOCK => block(p, open_block, "malformed block"),
        OPEN | OPEN_UNESCAPED => mustache(p),
        OPEN_PARTIAL => partial(p),
        CONTENT => {
            p.bump();
            true
        }
        COMMENT => {
            let m = p.start();
            p.bump();
            m.complete(p, COMMENT);
            true
        }
        _ => false,
    }
}

fn block(p: &mut Parser<'_>, open: fn(&mut Parser<'_>) -> bool, malformed: &str) -> bool {
    let m = p.start();

    if !open(p) {
        m.error(p, malformed);
        return false;
    }

    program(p);
    close_block(p);
    m.abandon(p);
    true
}

/// Shared shape of every `{{...}}` production: the opening delimiter, an
/// inner rule, then everything up to the closing delimiter.
///
/// A failed inner rule does not stop the search for `}}`, so one broken
/// expression cannot desynchronize the rest of the template.
fn stache(
    p: &mut Parser<'_>,
    open: SyntaxKind,
    node: SyntaxKind,
    inner: impl FnOnce(&mut Parser<'_>) -> bool,
) -> bool {
    let m = p.start();

    if !leaf(p, open) {
        m.error(p, format!("expected {}", node.describe()));
        return false;
    }

    inner(p);
    leaf_greedy(p, CLOSE);
    m.complete(p, node);
    true
}

/// openBlock
///   : OPEN_BLOCK inMustache CLOSE
fn open_block(p: &mut Parser<'_>) -> bool {
    stache(p, OPEN_BLOCK, BLOCK_STACHE, in_mustache)
}

/// openInverse
///   : OPEN_INVERSE inMustache CLOSE
fn open_inverse(p: &mut Parser<'_>) -> bool {
    stache(p, OPEN_INVERSE, INVERSE_STACHE, in_mustache)
}

/// closeBlock
///   : OPEN_ENDBLOCK path CLOSE
pub(crate) fn close_block(p: &mut Parser<'_>) -> bool {
    stache(p, OPEN_ENDBLOCK, CLOSEBLOCK_STACHE, path)
}

/// partial
///   : OPEN_PARTIAL path path? CLOSE
fn partial(p: &mut Parser<'_>) -> bool {
    stache(p, OPEN_PARTIAL, PARTIAL_STACHE, |p| {
        if !path(p) {
            return false;
        }
        p.attempt(path);
        true
    })
}

/// mustache
///   : OPEN inMustache CLOSE
///   | OPEN_UNESCAPED inMustache CLOSE
///
/// Without an opening delimiter the expression and `}}` are still parsed.
fn mustache(p: &mut Parser<'_>) -> bool {
    let m = p.start();

    match p.current() {
        kind @ (OPEN | OPEN_UNESCAPED) => _ = leaf(p, kind),
        _ => p.report_error("expected `{{` or `{{{`"),
    }

    in_mustache(p);
    leaf_greedy(p, CLOSE);
    m.complete(p, MUSTACHE);
    true
}

/// simpleInverse
///   : OPEN_INVERSE CLOSE
///
/// All or nothing: a partial match leaves no trace.
fn simple_inverse(p: &mut Parser<'_>) -> bool {
    let m = p.start();

    if leaf(p, OPEN_INVERSE) && leaf(p, CLOSE) {
        m.complete(p, SIMPLE_INVERSE);
        true
    } else {
        m.rollback(p);
        false
    }
}
