/// Kinds of tokens and nodes in a template syntax tree.
///
/// Terminals come first and end with `EOF`; everything after is a node kind.
/// A terminal is also used as the kind of the leaf node wrapping it.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    CONTENT,
    COMMENT,
    OPEN,
    OPEN_UNESCAPED,
    OPEN_BLOCK,
    OPEN_INVERSE,
    OPEN_ENDBLOCK,
    OPEN_PARTIAL,
    CLOSE,
    ID,
    SEP,
    EQUALS,
    STRING,
    INTEGER,
    BOOLEAN,
    WHITESPACE,
    INVALID,
    EOF,

    TEMPLATE,
    STATEMENTS,
    BLOCK_STACHE,
    INVERSE_STACHE,
    CLOSEBLOCK_STACHE,
    MUSTACHE,
    PARTIAL_STACHE,
    SIMPLE_INVERSE,
    IN_MUSTACHE,
    PARAMS,
    PARAM,
    HASH_SEGMENTS,
    HASH_SEGMENT,
    PATH_SEGMENTS,
    ERROR,
    TOMBSTONE,
}

use SyntaxKind::*;

impl SyntaxKind {
    pub const ALL: [Self; 34] = [
        CONTENT,
        COMMENT,
        OPEN,
        OPEN_UNESCAPED,
        OPEN_BLOCK,
        OPEN_INVERSE,
        OPEN_ENDBLOCK,
        OPEN_PARTIAL,
        CLOSE,
        ID,
        SEP,
        EQUALS,
        STRING,
        INTEGER,
        BOOLEAN,
        WHITESPACE,
        INVALID,
        EOF,
        TEMPLATE,
        STATEMENTS,
        BLOCK_STACHE,
        INVERSE_STACHE,
        CLOSEBLOCK_STACHE,
        MUSTACHE,
        PARTIAL_STACHE,
        SIMPLE_INVERSE,
        IN_MUSTACHE,
        PARAMS,
        PARAM,
        HASH_SEGMENTS,
        HASH_SEGMENT,
        PATH_SEGMENTS,
        ERROR,
        TOMBSTONE,
    ];

    /// Returns `true` for kinds a tokenizer may produce.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        (self as u8) < (EOF as u8)
    }

    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE)
    }

    /// Human readable name used in "expected ..." diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            CONTENT => "content",
            COMMENT => "a comment",
            OPEN => "`{{`",
            OPEN_UNESCAPED => "`{{{`",
            OPEN_BLOCK => "`{{#`",
            OPEN_INVERSE => "`{{^`",
            OPEN_ENDBLOCK => "`{{/`",
            OPEN_PARTIAL => "`{{>`",
            CLOSE => "`}}`",
            ID => "an ID",
            SEP => "a path separator",
            EQUALS => "`=`",
            STRING => "a string",
            INTEGER => "an integer",
            BOOLEAN => "a boolean",
            WHITESPACE => "whitespace",
            INVALID => "an invalid token",
            EOF => "end of input",
            TEMPLATE => "a template",
            STATEMENTS => "a statement",
            BLOCK_STACHE => "a block",
            INVERSE_STACHE => "an inverse block",
            CLOSEBLOCK_STACHE => "a close block",
            MUSTACHE => "a mustache",
            PARTIAL_STACHE => "a partial",
            SIMPLE_INVERSE => "`{{else}}`",
            IN_MUSTACHE => "a mustache expression",
            PARAMS | PARAM => "a parameter",
            HASH_SEGMENTS | HASH_SEGMENT => "a hash",
            PATH_SEGMENTS => "a path",
            ERROR => "an error",
            TOMBSTONE => "nothing",
        }
    }
}
