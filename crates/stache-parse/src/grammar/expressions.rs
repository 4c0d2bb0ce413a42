use stache_syntax::SyntaxKind::*;

use super::leaf;
use crate::parser::Parser;

/// inMustache
///   : path hash
///   | path params hash?
///   | path
///
/// The tail is found by ordered attempts. A hash that breaks after consuming
/// something is kept, so its errors stay in the tree instead of the tokens
/// being skipped as garbage later on.
pub(crate) fn in_mustache(p: &mut Parser<'_>) -> bool {
    let m = p.start();

    if !path(p) {
        m.error(p, "expected a path");
        return false;
    }

    let at_hash_key = p.at(ID) && p.nth(1) == EQUALS;
    let hash_m = p.start();
    if hash(p) || (at_hash_key && hash_m.advanced(p)) {
        hash_m.abandon(p);
    } else {
        hash_m.rollback(p);

        let params_m = p.start();
        if params(p) {
            let tail = p.start();
            if hash(p) || tail.advanced(p) {
                tail.abandon(p);
            } else {
                tail.rollback(p);
            }
            params_m.abandon(p);
        } else {
            params_m.rollback(p);
        }
    }

    m.complete(p, IN_MUSTACHE);
    true
}

/// params
///   : param+
fn params(p: &mut Parser<'_>) -> bool {
    let m = p.start();

    if !param(p) {
        m.error(p, "expected a parameter");
        return false;
    }

    while p.attempt(param) {}

    m.complete(p, PARAMS);
    true
}

/// param
///   : path
///   | STRING
///   | INTEGER
///   | BOOLEAN
fn param(p: &mut Parser<'_>) -> bool {
    let m = p.start();

    let matched = p.attempt(path)
        || p.attempt(|p| leaf(p, STRING))
        || p.attempt(|p| leaf(p, INTEGER))
        || p.attempt(|p| leaf(p, BOOLEAN));

    if matched {
        m.complete(p, PARAM);
    } else {
        m.error(p, "expected a parameter");
    }
    matched
}

/// hash
///   : hashSegment+
///
/// When a segment breaks after consuming tokens it is kept, the segments so
/// far are still wrapped as `HASH_SEGMENTS`, and the rule reports failure.
fn hash(p: &mut Parser<'_>) -> bool {
    let m = p.start();

    if !hash_segment(p) {
        if m.advanced(p) {
            m.complete(p, HASH_SEGMENTS);
        } else {
            m.error(p, "expected a hash");
        }
        return false;
    }

    loop {
        let next = p.start();
        if hash_segment(p) {
            next.abandon(p);
            continue;
        }

        if next.advanced(p) {
            next.abandon(p);
            m.complete(p, HASH_SEGMENTS);
            return false;
        }

        next.rollback(p);
        break;
    }

    m.complete(p, HASH_SEGMENTS);
    true
}

/// hashSegment
///   : ID EQUALS param
pub(crate) fn hash_segment(p: &mut Parser<'_>) -> bool {
    let m = p.start();

    if !leaf(p, ID) {
        m.error(p, "expected an ID");
        return false;
    }

    if !leaf(p, EQUALS) {
        m.error(p, "expected =");
        return false;
    }

    if !param(p) {
        m.error(p, "expected a parameter");
        return false;
    }

    m.complete(p, HASH_SEGMENT);
    true
}

/// path
///   : ID (SEP ID)*
///
/// An `ID` that starts a complete `key=value` is left for the hash rule.
pub(crate) fn path(p: &mut Parser<'_>) -> bool {
    if is_hash_next(p) {
        return false;
    }

    let m = p.start();
    if !leaf(p, ID) {
        m.error(p, "expected an ID");
        return false;
    }

    loop {
        let segment = p.start();

        if !leaf(p, SEP) || is_hash_next(p) {
            segment.rollback(p);
            break;
        }

        let complete = leaf(p, ID);
        segment.abandon(p);
        if !complete {
            break;
        }
    }

    m.complete(p, PATH_SEGMENTS);
    true
}

/// Whether a complete `ID = param` segment starts at the cursor.
///
/// A segment value is a path only when it does not start a segment itself,
/// so along a run of `ID =` pairs the answer flips with every pair. The run
/// is scanned in a loop rather than by nested `hash_segment` lookaheads,
/// which would recurse once per pair. Never moves the cursor.
pub(crate) fn is_hash_next(p: &Parser<'_>) -> bool {
    let mut pairs = 0;
    while p.nth(2 * pairs) == ID && p.nth(2 * pairs + 1) == EQUALS {
        pairs += 1;
    }

    if pairs == 0 {
        return false;
    }

    let value_is_param = matches!(p.nth(2 * pairs), ID | STRING | INTEGER | BOOLEAN);
    value_is_param == (pairs % 2 == 1)
}
