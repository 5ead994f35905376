pub mod eval;
pub mod index;
pub mod query;
pub mod tokenizer;

pub use eval::eval_postfix;
pub use index::{DocName, InvertedIndex};
pub use query::{to_postfix, tokenize_query, QueryError, Token};

/// The three stages a boolean query exposes: the final sorted matches plus
/// the intermediate token and postfix streams, for debugging and test
/// assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutput {
    pub matches: Vec<DocName>,
    pub tokens: Vec<Token>,
    pub postfix: Vec<Token>,
}

/// Run a raw boolean query string against the index: tokenize, compile to
/// postfix, evaluate. All malformed-query detection happens at evaluation;
/// a rejected query yields an error and no partial results.
pub fn boolean_query(query: &str, index: &InvertedIndex) -> Result<QueryOutput, QueryError> {
    let tokens = tokenize_query(query);
    let postfix = to_postfix(tokens.clone())?;
    let matches = eval_postfix(&postfix, index)?.into_iter().collect();
    Ok(QueryOutput { matches, tokens, postfix })
}
