use crate::index::{DocName, InvertedIndex};
use crate::query::{QueryError, Token};
use std::collections::BTreeSet;

/// Evaluate a postfix token stream against the index with a stack of
/// document-name sets.
///
/// Terms push their posting set (empty when unindexed). `NOT` complements
/// against the full document universe: `NOT x` means every document not
/// containing x. `AND` intersects and `OR` unions the top two sets. A
/// well-formed query leaves exactly one set on the stack; anything else,
/// including a grouping token that survived compilation, is a malformed
/// query and yields no partial result.
pub fn eval_postfix(
    postfix: &[Token],
    index: &InvertedIndex,
) -> Result<BTreeSet<DocName>, QueryError> {
    let mut stack: Vec<BTreeSet<DocName>> = Vec::new();
    for tok in postfix {
        match tok {
            Token::Term(term) => {
                stack.push(index.postings(term).cloned().unwrap_or_default());
            }
            Token::Not => {
                let a = stack
                    .pop()
                    .ok_or(QueryError::MissingOperand { operator: "NOT" })?;
                stack.push(index.universe().difference(&a).cloned().collect());
            }
            Token::And => {
                let b = stack
                    .pop()
                    .ok_or(QueryError::MissingOperand { operator: "AND" })?;
                let a = stack
                    .pop()
                    .ok_or(QueryError::MissingOperand { operator: "AND" })?;
                stack.push(a.intersection(&b).cloned().collect());
            }
            Token::Or => {
                let b = stack
                    .pop()
                    .ok_or(QueryError::MissingOperand { operator: "OR" })?;
                let a = stack
                    .pop()
                    .ok_or(QueryError::MissingOperand { operator: "OR" })?;
                stack.push(a.union(&b).cloned().collect());
            }
            Token::LParen | Token::RParen => return Err(QueryError::UnbalancedParens),
        }
    }
    match stack.len() {
        1 => Ok(stack.remove(0)),
        n => Err(QueryError::UnbalancedExpression { operands: n }),
    }
}
