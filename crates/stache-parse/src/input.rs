//! Token stream handed to the parser by an external tokenizer.

use stache_syntax::SyntaxKind;
use text_size::{TextLen as _, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub len: TextSize,
}

impl Token {
    pub fn new(kind: SyntaxKind, len: TextSize) -> Self {
        Self { kind, len }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("token {index} has kind `{kind:?}`, which a tokenizer cannot produce")]
    NotATerminal { index: usize, kind: SyntaxKind },
    #[error("token {index} ends at {end:?}, which is not a char boundary")]
    NotACharBoundary { index: usize, end: TextSize },
    #[error("tokens cover {covered:?} bytes but the text is {len:?} bytes long")]
    LengthMismatch { covered: TextSize, len: TextSize },
}

/// A template text together with the tokens that tile it.
///
/// Trivia tokens are kept, but the parser only ever sees the significant ones.
#[derive(Debug, Clone)]
pub struct Input {
    text: Box<str>,
    tokens: Vec<Token>,
    significant: Vec<u32>,
}

impl Input {
    pub fn new(text: impl Into<Box<str>>, tokens: Vec<Token>) -> Result<Self, InputError> {
        let text = text.into();
        let len = text.text_len();
        let mut end = TextSize::new(0);

        for (index, token) in tokens.iter().enumerate() {
            if !token.kind.is_terminal() {
                return Err(InputError::NotATerminal { index, kind: token.kind });
            }

            end += token.len;
            if end > len {
                return Err(InputError::LengthMismatch { covered: end, len });
            }
            if !text.is_char_boundary(end.into()) {
                return Err(InputError::NotACharBoundary { index, end });
            }
        }

        if end != len {
            return Err(InputError::LengthMismatch { covered: end, len });
        }

        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !token.kind.is_trivia())
            .map(|(index, _)| index as u32)
            .collect();

        Ok(Self { text, tokens, significant })
    }

    /// Builds an input from `(kind, text)` pairs, concatenating the texts.
    pub fn from_pieces<'a>(
        pieces: impl IntoIterator<Item = (SyntaxKind, &'a str)>,
    ) -> Result<Self, InputError> {
        let mut text = String::new();
        let mut tokens = Vec::new();

        for (kind, piece) in pieces {
            text.push_str(piece);
            tokens.push(Token::new(kind, piece.text_len()));
        }

        Self::new(text, tokens)
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All tokens, trivia included.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Kind of the `n`-th significant token, `EOF` past the end.
    #[inline]
    pub(crate) fn kind(&self, n: usize) -> SyntaxKind {
        self.significant.get(n).map_or(SyntaxKind::EOF, |&raw| self.tokens[raw as usize].kind)
    }

    #[inline]
    pub(crate) fn significant_len(&self) -> usize {
        self.significant.len()
    }

    /// Index into [`Input::tokens`] of the `n`-th significant token.
    #[inline]
    pub(crate) fn raw_index(&self, n: usize) -> usize {
        self.significant[n] as usize
    }
}
