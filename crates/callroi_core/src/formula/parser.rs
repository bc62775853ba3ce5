//! Recursive-descent parser producing the formula AST
//!
//! Precedence, lowest first:
//! comparison chain, `+ -`, `* / // %`, unary `+ -`, `**`, atoms.
//! `**` is right-associative and binds tighter than a unary minus on its
//! left, so `-2 ** 2` is `-(2 ** 2)`.

use super::functions::is_function;
use super::lexer::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Parsed formula expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    List(Vec<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// `first op1 e1 op2 e2 ...`, true only when every link holds
    Compare(Box<Expr>, Vec<(CompareOp, Expr)>),
    /// Call to an allow-listed function
    Call(String, Vec<Expr>),
}

impl Expr {
    /// Visit every variable name referenced by this expression
    pub fn for_each_variable<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(name) => f(name),
            Expr::List(items) | Expr::Call(_, items) => {
                for item in items {
                    item.for_each_variable(f);
                }
            }
            Expr::Unary(_, inner) => inner.for_each_variable(f),
            Expr::Binary(_, left, right) => {
                left.for_each_variable(f);
                right.for_each_variable(f);
            }
            Expr::Compare(first, rest) => {
                first.for_each_variable(f);
                for (_, expr) in rest {
                    expr.for_each_variable(f);
                }
            }
        }
    }
}

/// Parse a token stream, rejecting nesting deeper than `max_depth`
pub fn parse(tokens: &[Token], max_depth: usize) -> Result<Expr, String> {
    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        max_depth,
    };
    let expr = parser.comparison()?;

    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(format!("unexpected {}", token.describe())),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), String> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(format!(
                "expected {}, found {}",
                expected.describe(),
                token.describe()
            )),
            None => Err(format!(
                "expected {}, found end of expression",
                expected.describe()
            )),
        }
    }

    fn enter(&mut self) -> Result<(), String> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(format!(
                "expression nesting exceeds the limit of {}",
                self.max_depth
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn comparison(&mut self) -> Result<Expr, String> {
        self.enter()?;
        let first = self.additive()?;
        let mut rest = Vec::new();

        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => CompareOp::Eq,
                Some(Token::NotEq) => CompareOp::NotEq,
                Some(Token::Lt) => CompareOp::Lt,
                Some(Token::Le) => CompareOp::Le,
                Some(Token::Gt) => CompareOp::Gt,
                Some(Token::Ge) => CompareOp::Ge,
                _ => break,
            };
            self.pos += 1;
            rest.push((op, self.additive()?));
        }

        self.leave();
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Compare(Box::new(first), rest))
        }
    }

    /// Each folded operator deepens the left-leaning tree by one level
    fn additive(&mut self) -> Result<Expr, String> {
        let mut left = self.term()?;
        let mut folded = 0;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            self.enter()?;
            folded += 1;
            let right = self.term()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        self.depth -= folded;
        Ok(left)
    }

    fn term(&mut self) -> Result<Expr, String> {
        let mut left = self.unary()?;
        let mut folded = 0;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::SlashSlash) => BinaryOp::FloorDiv,
                Some(Token::Percent) => BinaryOp::Mod,
                _ => break,
            };
            self.pos += 1;
            self.enter()?;
            folded += 1;
            let right = self.unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        self.depth -= folded;
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, String> {
        let op = match self.peek() {
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Minus) => UnaryOp::Neg,
            _ => return self.power(),
        };
        self.pos += 1;

        self.enter()?;
        let operand = self.unary()?;
        self.leave();
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    fn power(&mut self) -> Result<Expr, String> {
        let base = self.atom()?;
        if !self.eat(&Token::StarStar) {
            return Ok(base);
        }

        // Right operand may itself carry a unary sign: 2 ** -1
        self.enter()?;
        let exponent = self.unary()?;
        self.leave();
        Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)))
    }

    fn atom(&mut self) -> Result<Expr, String> {
        let token = match self.advance() {
            Some(token) => token.clone(),
            None => return Err("unexpected end of expression".to_string()),
        };

        match token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Ident(name) => {
                if self.eat(&Token::LParen) {
                    if !is_function(&name) {
                        return Err(format!("function '{name}' is not allowed"));
                    }
                    let args = self.sequence(&Token::RParen)?;
                    Ok(Expr::Call(name, args))
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            Token::LParen => {
                let inner = self.comparison()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::LBracket => Ok(Expr::List(self.sequence(&Token::RBracket)?)),
            other => Err(format!("unexpected {}", other.describe())),
        }
    }

    /// Comma-separated expressions up to `close`; a trailing comma is allowed
    fn sequence(&mut self, close: &Token) -> Result<Vec<Expr>, String> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.comparison()?);
            if !self.eat(&Token::Comma) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }
}
