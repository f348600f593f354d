use crate::error::TableError;
use crate::position::Position;

use super::Category;

const OR: &str = "或";
const NOT: &str = "非";

/// A boolean combination of categories.
///
/// Grammar (whitespace separates terms, parentheses may touch them):
///
/// ```text
/// expr := conj ('或' conj)*
/// conj := term+
/// term := '非' term | '(' expr ')' | category
/// ```
///
/// The empty expression matches every position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Always,
    Is(Category),
    Not(Box<Predicate>),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Or,
    Not,
    Name(&'a str),
}

fn tokenize(expr: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for word in expr.split_whitespace() {
        let mut rest = word;
        while !rest.is_empty() {
            if let Some(r) = rest.strip_prefix('(') {
                tokens.push(Token::Open);
                rest = r;
                continue;
            }
            let end = rest.find(['(', ')']).unwrap_or(rest.len());
            if end == 0 {
                tokens.push(Token::Close);
                rest = &rest[1..];
                continue;
            }
            tokens.push(match &rest[..end] {
                OR => Token::Or,
                NOT => Token::Not,
                name => Token::Name(name),
            });
            rest = &rest[end..];
        }
    }
    tokens
}

struct Parser<'a> {
    expr: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let tok = self.peek();
        self.pos += 1;
        tok
    }

    fn malformed(&self, reason: &str) -> TableError {
        TableError::MalformedExpression {
            expr: self.expr.to_string(),
            reason: reason.to_string(),
        }
    }

    fn disjunction(&mut self) -> Result<Predicate, TableError> {
        let mut terms = vec![self.conjunction()?];
        while self.peek() == Some(Token::Or) {
            self.bump();
            terms.push(self.conjunction()?);
        }
        Ok(collapse(terms, Predicate::Any))
    }

    fn conjunction(&mut self) -> Result<Predicate, TableError> {
        let mut terms = Vec::new();
        while let Some(tok) = self.peek() {
            if matches!(tok, Token::Or | Token::Close) {
                break;
            }
            terms.push(self.term()?);
        }
        if terms.is_empty() {
            return Err(self.malformed("missing operand"));
        }
        Ok(collapse(terms, Predicate::All))
    }

    fn term(&mut self) -> Result<Predicate, TableError> {
        match self.bump() {
            Some(Token::Not) => {
                if matches!(self.peek(), None | Some(Token::Or | Token::Close)) {
                    return Err(self.malformed("`非` without operand"));
                }
                Ok(Predicate::Not(Box::new(self.term()?)))
            }
            Some(Token::Open) => {
                let inner = self.disjunction()?;
                match self.bump() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(self.malformed("unclosed `(`")),
                }
            }
            Some(Token::Name(name)) => Category::parse(name).map(Predicate::Is).ok_or_else(|| {
                TableError::InvalidCategory {
                    name: name.to_string(),
                    expr: self.expr.to_string(),
                }
            }),
            Some(Token::Close) => Err(self.malformed("unexpected `)`")),
            Some(Token::Or) | None => Err(self.malformed("missing operand")),
        }
    }
}

fn collapse(mut terms: Vec<Predicate>, combine: fn(Vec<Predicate>) -> Predicate) -> Predicate {
    if terms.len() == 1 {
        terms.remove(0)
    } else {
        combine(terms)
    }
}

impl Predicate {
    pub fn parse(expr: &str) -> Result<Predicate, TableError> {
        let tokens = tokenize(expr);
        if tokens.is_empty() {
            return Ok(Predicate::Always);
        }
        let mut parser = Parser {
            expr,
            tokens,
            pos: 0,
        };
        let predicate = parser.disjunction()?;
        if parser.peek().is_some() {
            return Err(parser.malformed("unexpected `)`"));
        }
        Ok(predicate)
    }

    pub fn matches(&self, pos: &Position) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Is(c) => c.matches(pos),
            Predicate::Not(p) => !p.matches(pos),
            Predicate::All(ps) => ps.iter().all(|p| p.matches(pos)),
            Predicate::Any(ps) => ps.iter().any(|p| p.matches(pos)),
        }
    }
}
