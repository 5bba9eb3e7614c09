//! Whitespace tokenizer with byte offsets.

/// A whitespace-delimited token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    fn new(source: &'a str, start: usize, end: usize) -> Self {
        Self {
            text: &source[start..end],
            start,
            end,
        }
    }
}

/// Tokenize all of `text`.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    tokens_after(text, 0, usize::MAX)
}

/// Up to `n` tokens ending at or before byte `end`, in text order.
///
/// A token straddling `end` is cut at `end`, so text glued to an occurrence
/// counts as its neighbouring token.
pub fn tokens_before(text: &str, end: usize, n: usize) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    if n == 0 {
        return tokens;
    }
    let mut tok_end: Option<usize> = None;
    for (i, c) in text[..end].char_indices().rev() {
        if c.is_whitespace() {
            if let Some(e) = tok_end.take() {
                tokens.push(Token::new(text, i + c.len_utf8(), e));
                if tokens.len() == n {
                    break;
                }
            }
        } else if tok_end.is_none() {
            tok_end = Some(i + c.len_utf8());
        }
    }
    if let Some(e) = tok_end {
        tokens.push(Token::new(text, 0, e));
    }
    tokens.reverse();
    tokens
}

/// Up to `n` tokens starting at or after byte `start`, in text order.
pub fn tokens_after(text: &str, start: usize, n: usize) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    if n == 0 {
        return tokens;
    }
    let mut tok_start: Option<usize> = None;
    for (i, c) in text[start..].char_indices() {
        let i = start + i;
        if c.is_whitespace() {
            if let Some(s) = tok_start.take() {
                tokens.push(Token::new(text, s, i));
                if tokens.len() == n {
                    break;
                }
            }
        } else if tok_start.is_none() {
            tok_start = Some(i);
        }
    }
    if let Some(s) = tok_start {
        tokens.push(Token::new(text, s, text.len()));
    }
    tokens
}
