use super::symbol::{OpKind, Symbol};

fn concat_left(sym: Symbol) -> bool {
    sym.is_literal_like()
        || matches!(
            sym,
            Symbol::Op(OpKind::RParen | OpKind::Star | OpKind::Plus | OpKind::Question)
        )
}

fn concat_right(sym: Symbol) -> bool {
    sym.is_literal_like() || matches!(sym, Symbol::Op(OpKind::LParen))
}

/// Inserts an explicit [Concat](OpKind::Concat) operator between every
/// adjacent `(x, y)` pair where `x` closes an atom and `y` opens one. A
/// pure, infallible linear pass.
pub fn insert(expr: Vec<Symbol>) -> Vec<Symbol> {
    if expr.is_empty() {
        return expr;
    }
    let mut output = Vec::with_capacity(expr.len() * 2);
    for idx in 1..expr.len() {
        let prev = expr[idx - 1];
        output.push(prev);
        if concat_left(prev) && concat_right(expr[idx]) {
            output.push(Symbol::Op(OpKind::Concat));
        }
    }
    output.push(*expr.last().unwrap());
    output
}

#[cfg(test)]
mod __tests__ {
    use super::*;

    #[test]
    fn inserts_between_adjacent_literals() {
        let out = insert(vec![Symbol::Literal('a'), Symbol::Literal('b')]);
        assert_eq!(
            out,
            vec![
                Symbol::Literal('a'),
                Symbol::Op(OpKind::Concat),
                Symbol::Literal('b'),
            ]
        );
    }

    #[test]
    fn no_insert_before_union() {
        let out = insert(vec![
            Symbol::Literal('a'),
            Symbol::Op(OpKind::Union),
            Symbol::Literal('b'),
        ]);
        assert_eq!(
            out,
            vec![
                Symbol::Literal('a'),
                Symbol::Op(OpKind::Union),
                Symbol::Literal('b'),
            ]
        );
    }

    #[test]
    fn inserts_after_closing_group_and_star() {
        let out = insert(vec![
            Symbol::Op(OpKind::LParen),
            Symbol::Literal('a'),
            Symbol::Op(OpKind::RParen),
            Symbol::Op(OpKind::Star),
            Symbol::Literal('b'),
        ]);
        assert_eq!(
            out,
            vec![
                Symbol::Op(OpKind::LParen),
                Symbol::Literal('a'),
                Symbol::Op(OpKind::RParen),
                Symbol::Op(OpKind::Star),
                Symbol::Op(OpKind::Concat),
                Symbol::Literal('b'),
            ]
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(insert(vec![]), vec![]);
    }
}
