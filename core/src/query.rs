use crate::tokenizer::tokenize;
use std::fmt;
use thiserror::Error;

/// A query token: a normalized search term, a boolean operator, or a
/// grouping parenthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Term(String),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Term(t) => f.write_str(t),
            Token::And => f.write_str("AND"),
            Token::Or => f.write_str("OR"),
            Token::Not => f.write_str("NOT"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

/// Rejection of a syntactically invalid query. Queries are all-or-nothing:
/// a malformed query produces one of these and no partial result set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("malformed query: `{operator}` is missing an operand")]
    MissingOperand { operator: &'static str },
    #[error("malformed query: `)` without a matching `(`")]
    UnmatchedParen,
    #[error("malformed query: unmatched `(` in expression")]
    UnbalancedParens,
    #[error("malformed query: expression left {operands} operands instead of one")]
    UnbalancedExpression { operands: usize },
}

/// Split a raw query string into tokens. `(` and `)` are standalone tokens
/// regardless of adjacent spacing. A word whose uppercase form is a reserved
/// operator is classified before any normalization runs, so operator words
/// are never stemmed or stopword-filtered. Every other word goes through the
/// document normalization pipeline and contributes zero or more terms.
pub fn tokenize_query(query: &str) -> Vec<Token> {
    let spaced = query.replace('(', " ( ").replace(')', " ) ");
    let mut tokens = Vec::new();
    for part in spaced.split_whitespace() {
        match part.to_uppercase().as_str() {
            "AND" => tokens.push(Token::And),
            "OR" => tokens.push(Token::Or),
            "NOT" => tokens.push(Token::Not),
            "(" => tokens.push(Token::LParen),
            ")" => tokens.push(Token::RParen),
            _ => tokens.extend(tokenize(part).into_iter().map(Token::Term)),
        }
    }
    tokens
}

// NOT binds tightest, then AND, then OR.
fn precedence(tok: &Token) -> Option<u8> {
    match tok {
        Token::Not => Some(3),
        Token::And => Some(2),
        Token::Or => Some(1),
        _ => None,
    }
}

/// Shunting-yard conversion of an infix token stream to postfix. All
/// operators are treated as left-associative, NOT included: on a precedence
/// tie the stacked operator pops first. That makes an unparenthesized
/// `NOT NOT x` unevaluable, which the evaluator then rejects; parenthesized
/// double negation works as expected.
///
/// No arity or balance validation happens here beyond `)` needing a `(` to
/// pop to. An unclosed `(` drains into the output at end of input and is
/// rejected by the evaluator.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, QueryError> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();
    for tok in tokens {
        match tok {
            Token::Term(_) => out.push(tok),
            Token::LParen => stack.push(tok),
            Token::RParen => loop {
                match stack.pop() {
                    Some(Token::LParen) => break,
                    Some(op) => out.push(op),
                    None => return Err(QueryError::UnmatchedParen),
                }
            },
            Token::And | Token::Or | Token::Not => {
                let prec = precedence(&tok).unwrap_or(0);
                while stack
                    .last()
                    .and_then(precedence)
                    .map_or(false, |top| top >= prec)
                {
                    if let Some(op) = stack.pop() {
                        out.push(op);
                    }
                }
                stack.push(tok);
            }
        }
    }
    while let Some(op) = stack.pop() {
        out.push(op);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(t: &str) -> Token {
        Token::Term(t.to_string())
    }

    #[test]
    fn parens_split_without_spacing() {
        let toks = tokenize_query("(cat OR dog)");
        assert_eq!(
            toks,
            vec![Token::LParen, term("cat"), Token::Or, term("dog"), Token::RParen]
        );
    }

    #[test]
    fn operators_are_case_insensitive() {
        let toks = tokenize_query("cat and dog or not fish");
        assert_eq!(
            toks,
            vec![term("cat"), Token::And, term("dog"), Token::Or, Token::Not, term("fish")]
        );
    }

    #[test]
    fn stopword_query_words_vanish() {
        // "the" normalizes away entirely; it is not an operator.
        assert_eq!(tokenize_query("the cat"), vec![term("cat")]);
    }

    #[test]
    fn and_pops_before_or_pushes() {
        let postfix = to_postfix(tokenize_query("cat AND dog OR fish")).unwrap();
        assert_eq!(
            postfix,
            vec![term("cat"), term("dog"), Token::And, term("fish"), Token::Or]
        );
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let postfix = to_postfix(tokenize_query("cat OR dog AND fish")).unwrap();
        assert_eq!(
            postfix,
            vec![term("cat"), term("dog"), term("fish"), Token::And, Token::Or]
        );
    }

    #[test]
    fn not_applies_to_following_term() {
        let postfix = to_postfix(tokenize_query("NOT cat AND dog")).unwrap();
        assert_eq!(
            postfix,
            vec![term("cat"), Token::Not, term("dog"), Token::And]
        );
    }

    #[test]
    fn stray_close_paren_is_rejected() {
        assert_eq!(
            to_postfix(tokenize_query("cat )")),
            Err(QueryError::UnmatchedParen)
        );
    }

    #[test]
    fn unclosed_open_paren_drains_into_output() {
        let postfix = to_postfix(tokenize_query("( cat")).unwrap();
        assert_eq!(postfix, vec![term("cat"), Token::LParen]);
    }
}
