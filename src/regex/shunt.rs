use super::symbol::{OpKind, Symbol};
use crate::error::CompileError;

/// Dijkstra's shunting-yard conversion of the infix operator stream to
/// postfix (reverse Polish) notation, using [OpKind::precedence]'s
/// precedence table. A token pops the operator stack only while it is
/// left-associative and no higher in precedence than the stack top.
pub fn to_postfix(pattern_name: &str, expr: Vec<Symbol>) -> Result<Vec<Symbol>, CompileError> {
    let mut stack: Vec<Symbol> = Vec::new();
    let mut queue: Vec<Symbol> = Vec::new();

    for token in expr {
        match token {
            Symbol::Literal(_) | Symbol::Epsilon => queue.push(token),
            Symbol::Op(OpKind::LParen) => stack.push(token),
            Symbol::Op(OpKind::RParen) => loop {
                match stack.pop() {
                    Some(Symbol::Op(OpKind::LParen)) => break,
                    Some(top) => queue.push(top),
                    None => {
                        return Err(CompileError::UnbalancedParen {
                            pattern: pattern_name.to_string(),
                        })
                    }
                }
            },
            Symbol::Op(op) => {
                let (prec, left_assoc) = op
                    .precedence()
                    .expect("operator reaching the shunter always carries a precedence");
                while let Some(top) = stack.last().copied() {
                    if matches!(top, Symbol::Op(OpKind::LParen)) {
                        break;
                    }
                    let top_prec = match top {
                        Symbol::Op(top_op) => top_op.precedence().map(|p| p.0),
                        _ => None,
                    };
                    match top_prec {
                        Some(tp) if left_assoc && prec <= tp => {
                            queue.push(stack.pop().unwrap());
                        }
                        _ => break,
                    }
                }
                stack.push(token);
            }
        }
    }

    while let Some(top) = stack.pop() {
        if matches!(top, Symbol::Op(OpKind::LParen) | Symbol::Op(OpKind::RParen)) {
            return Err(CompileError::UnbalancedParen {
                pattern: pattern_name.to_string(),
            });
        }
        queue.push(top);
    }

    Ok(queue)
}
