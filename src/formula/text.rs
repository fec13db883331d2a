//! Infix text notation for formulas.
//!
//! Variables are `a`..`z`, then `a1`..`z1`, `a2`..`z2` and so on; constants are
//! `T` and `F`. Operators from loosest to tightest binding: `<->` and `^`,
//! `->` and `<-`, `|`, `&`, prefix `~`. Every operator also has a function form
//! such as `NAND(a, b)` or `TRANSFER(a)`, so any tree prints and parses back to
//! a structurally equal tree.

use anyhow::{Context, Result, bail};

use super::{BinaryOp, Formula, UnaryOp, VarId};

const LETTERS: u32 = 26;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Comma,
    Not,
    Var(VarId),
    Const(bool),
    Infix(BinaryOp),
    Func(String),
}

pub fn parse_formula(src: &str) -> Result<Formula> {
    let tokens = tokenize(src).with_context(|| format!("failed to tokenize '{}'", src))?;
    let mut parser = Parser { tokens, pos: 0 };
    let formula = parser.expr(1)?;
    if let Some(tok) = parser.peek() {
        bail!("unexpected {:?} after end of formula", tok);
    }
    Ok(formula)
}

pub fn to_text(formula: &Formula) -> String {
    let mut out = String::new();
    write_formula(formula, &mut out, false);
    out
}

pub fn var_name(id: VarId) -> String {
    let letter = char::from(b'a' + (id % LETTERS) as u8);
    match id / LETTERS {
        0 => letter.to_string(),
        n => format!("{}{}", letter, n),
    }
}

pub fn var_id(name: &str) -> Option<VarId> {
    let mut chars = name.chars();
    let letter = chars.next().filter(|c| c.is_ascii_lowercase())?;
    let suffix = chars.as_str();
    let round = if suffix.is_empty() {
        0
    } else {
        if suffix.starts_with('0') || !suffix.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        suffix.parse::<VarId>().ok()?
    };
    round
        .checked_mul(LETTERS)?
        .checked_add(letter as u32 - 'a' as u32)
}

fn infix_symbol(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::And => Some("&"),
        BinaryOp::Or => Some("|"),
        BinaryOp::Imp => Some("->"),
        BinaryOp::Rimp => Some("<-"),
        BinaryOp::Xnor => Some("<->"),
        BinaryOp::Xor => Some("^"),
        _ => None,
    }
}

fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Xnor | BinaryOp::Xor => 1,
        BinaryOp::Imp | BinaryOp::Rimp => 2,
        BinaryOp::Or => 3,
        _ => 4,
    }
}

fn write_formula(formula: &Formula, out: &mut String, nested: bool) {
    match formula {
        Formula::Variable(id) => out.push_str(&var_name(*id)),
        Formula::Constant(value) => out.push(if *value { 'T' } else { 'F' }),
        Formula::Unary {
            op: UnaryOp::Not,
            operand,
        } => {
            out.push('~');
            write_formula(operand, out, true);
        }
        Formula::Unary { op, operand } => {
            out.push_str(op.name());
            out.push('(');
            write_formula(operand, out, false);
            out.push(')');
        }
        Formula::Binary { op, left, right } => match infix_symbol(*op) {
            Some(symbol) => {
                if nested {
                    out.push('(');
                }
                write_formula(left, out, true);
                out.push(' ');
                out.push_str(symbol);
                out.push(' ');
                write_formula(right, out, true);
                if nested {
                    out.push(')');
                }
            }
            None => {
                out.push_str(op.name());
                out.push('(');
                write_formula(left, out, false);
                out.push_str(", ");
                write_formula(right, out, false);
                out.push(')');
            }
        },
    }
}

fn tokenize(src: &str) -> Result<Vec<Token>> {
    let chars = src.chars().collect::<Vec<_>>();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        let rest = chars[i..].iter().collect::<String>();
        let (token, width) = match c {
            '(' => (Token::Open, 1),
            ')' => (Token::Close, 1),
            ',' => (Token::Comma, 1),
            '~' => (Token::Not, 1),
            '&' => (Token::Infix(BinaryOp::And), 1),
            '|' => (Token::Infix(BinaryOp::Or), 1),
            '^' => (Token::Infix(BinaryOp::Xor), 1),
            '-' if rest.starts_with("->") => (Token::Infix(BinaryOp::Imp), 2),
            '<' if rest.starts_with("<->") => (Token::Infix(BinaryOp::Xnor), 3),
            '<' if rest.starts_with("<-") => (Token::Infix(BinaryOp::Rimp), 2),
            'a'..='z' => {
                let len = 1 + chars[i + 1..]
                    .iter()
                    .take_while(|c| c.is_ascii_digit())
                    .count();
                let name = chars[i..i + len].iter().collect::<String>();
                let id = var_id(&name)
                    .with_context(|| format!("column {}: invalid variable '{}'", i + 1, name))?;
                (Token::Var(id), len)
            }
            'A'..='Z' => {
                let len = chars[i..]
                    .iter()
                    .take_while(|c| c.is_ascii_uppercase())
                    .count();
                let word = chars[i..i + len].iter().collect::<String>();
                let is_call = chars[i + len..]
                    .iter()
                    .find(|c| !c.is_whitespace())
                    .is_some_and(|&c| c == '(');
                let token = if is_call {
                    Token::Func(word)
                } else {
                    match word.as_str() {
                        "T" | "TRUE" => Token::Const(true),
                        "F" | "FALSE" => Token::Const(false),
                        _ => bail!("column {}: unknown symbol '{}'", i + 1, word),
                    }
                };
                (token, len)
            }
            _ => bail!("column {}: unexpected character '{}'", i + 1, c),
        };
        tokens.push(token);
        i += width;
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, want: &Token) -> Result<()> {
        match self.next() {
            Some(tok) if &tok == want => Ok(()),
            Some(tok) => bail!("token {}: expected {:?}, found {:?}", self.pos, want, tok),
            None => bail!("expected {:?}, found end of formula", want),
        }
    }

    // precedence climbing, equal levels associate to the left
    fn expr(&mut self, min_prec: u8) -> Result<Formula> {
        let mut left = self.prefix()?;
        while let Some(&Token::Infix(op)) = self.peek() {
            let prec = precedence(op);
            if prec < min_prec {
                break;
            }
            self.pos += 1;
            let right = self.expr(prec + 1)?;
            left = Formula::binary(left, op, right);
        }
        Ok(left)
    }

    fn prefix(&mut self) -> Result<Formula> {
        match self.next() {
            Some(Token::Var(id)) => Ok(Formula::var(id)),
            Some(Token::Const(value)) => Ok(Formula::constant(value)),
            Some(Token::Not) => Ok(Formula::not(self.prefix()?)),
            Some(Token::Open) => {
                let inner = self.expr(1)?;
                self.expect(&Token::Close)?;
                Ok(inner)
            }
            Some(Token::Func(name)) => self.call(&name),
            Some(tok) => bail!("token {}: unexpected {:?}", self.pos, tok),
            None => bail!("unexpected end of formula"),
        }
    }

    fn call(&mut self, name: &str) -> Result<Formula> {
        self.expect(&Token::Open)?;
        let first = self.expr(1)?;
        if self.peek() == Some(&Token::Comma) {
            self.pos += 1;
            let second = self.expr(1)?;
            self.expect(&Token::Close)?;
            let op = BinaryOp::from_name(name)
                .with_context(|| format!("unknown binary operator '{}'", name))?;
            return Ok(Formula::binary(first, op, second));
        }
        self.expect(&Token::Close)?;
        let op = UnaryOp::ALL
            .iter()
            .copied()
            .find(|op| op.name() == name)
            .with_context(|| format!("unknown unary operator '{}'", name))?;
        Ok(Formula::unary(op, first))
    }
}
