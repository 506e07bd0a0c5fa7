//! Parsing and interpretation of the guard/action dialect.
//!
//! Texts are parsed with the grammar in `dialect.pest` into a small AST,
//! then interpreted against an [`Environment`]. A text that does not parse
//! is simply not recognized; the handlers built on top of this module use
//! that to decline it.

use crate::core::{Environment, Value};
use crate::eval::EvalError;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::fmt;

#[derive(Parser)]
#[grammar = "eval/dialect.pest"]
struct DialectParser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "||" => Self::Or,
            "&&" => Self::And,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            _ => return None,
        })
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parsed expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Value),
    Var(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

/// One statement of an action sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Skip,
    Assign { target: String, value: Expr },
}

/// One side of a rendezvous.
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelOp {
    Send { channel: String, value: Expr },
    Receive { channel: String, target: String },
}

impl ChannelOp {
    pub fn channel(&self) -> &str {
        match self {
            Self::Send { channel, .. } | Self::Receive { channel, .. } => channel,
        }
    }
}

pub fn parse_condition(text: &str) -> Option<Expr> {
    let condition = DialectParser::parse(Rule::condition, text).ok()?.next()?;
    let expr = condition.into_inner().next()?;
    build_expr(expr)
}

pub fn parse_action(text: &str) -> Option<Vec<Statement>> {
    let action = DialectParser::parse(Rule::action, text).ok()?.next()?;
    let mut statements = Vec::new();
    for pair in action.into_inner() {
        match pair.as_rule() {
            Rule::skip_stmt => statements.push(Statement::Skip),
            Rule::assignment => {
                let mut inner = pair.into_inner();
                let target = inner.next()?.as_str().to_string();
                let value = build_expr(inner.next()?)?;
                statements.push(Statement::Assign { target, value });
            }
            Rule::EOI => {}
            _ => return None,
        }
    }
    Some(statements)
}

pub fn parse_one_sided(text: &str) -> Option<ChannelOp> {
    let one_sided = DialectParser::parse(Rule::one_sided, text).ok()?.next()?;
    build_channel_op(one_sided.into_inner().next()?)
}

pub fn parse_sync(text: &str) -> Option<(ChannelOp, ChannelOp)> {
    let sync = DialectParser::parse(Rule::sync, text).ok()?.next()?;
    let mut inner = sync.into_inner();
    let first = build_channel_op(inner.next()?)?;
    let second = build_channel_op(inner.next()?)?;
    Some((first, second))
}

fn build_channel_op(pair: Pair<'_, Rule>) -> Option<ChannelOp> {
    let rule = pair.as_rule();
    let mut inner = pair.into_inner();
    let channel = inner.next()?.as_str().to_string();
    match rule {
        Rule::send => Some(ChannelOp::Send {
            channel,
            value: build_expr(inner.next()?)?,
        }),
        Rule::receive => Some(ChannelOp::Receive {
            channel,
            target: inner.next()?.as_str().to_string(),
        }),
        _ => None,
    }
}

fn build_expr(pair: Pair<'_, Rule>) -> Option<Expr> {
    match pair.as_rule() {
        Rule::expr | Rule::and_expr | Rule::cmp_expr | Rule::sum | Rule::product => {
            let mut inner = pair.into_inner();
            let mut lhs = build_expr(inner.next()?)?;
            while let Some(op) = inner.next() {
                let op = BinaryOp::from_symbol(op.as_str())?;
                let rhs = build_expr(inner.next()?)?;
                lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
            }
            Some(lhs)
        }
        Rule::unary => {
            let mut ops = Vec::new();
            let mut operand = None;
            for part in pair.into_inner() {
                if part.as_rule() == Rule::unary_op {
                    ops.push(if part.as_str() == "!" {
                        UnaryOp::Not
                    } else {
                        UnaryOp::Neg
                    });
                } else {
                    operand = Some(build_expr(part)?);
                }
            }
            let mut expr = operand?;
            for op in ops.into_iter().rev() {
                expr = Expr::Unary(op, Box::new(expr));
            }
            Some(expr)
        }
        Rule::boolean => Some(Expr::Literal(Value::Bool(pair.as_str() == "true"))),
        // Literals outside i64 are not part of the dialect.
        Rule::int => pair.as_str().parse().ok().map(|n| Expr::Literal(Value::Int(n))),
        Rule::ident => Some(Expr::Var(pair.as_str().to_string())),
        _ => None,
    }
}

impl Expr {
    pub fn eval(&self, env: &Environment) -> Result<Value, EvalError> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Var(name) => env
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::UnboundVariable { name: name.clone() }),
            Self::Unary(UnaryOp::Not, operand) => {
                let value = operand.eval(env)?;
                Ok(Value::Bool(!expect_bool("!", &value)?))
            }
            Self::Unary(UnaryOp::Neg, operand) => {
                let value = operand.eval(env)?;
                expect_int("-", &value)?
                    .checked_neg()
                    .map(Value::Int)
                    .ok_or(EvalError::IntegerOverflow)
            }
            Self::Binary(op, lhs, rhs) => eval_binary(*op, lhs, rhs, env),
        }
    }

    /// Evaluate as a guard.
    pub fn holds(&self, env: &Environment) -> Result<bool, EvalError> {
        let value = self.eval(env)?;
        expect_bool("guard", &value)
    }
}

fn eval_binary(op: BinaryOp, lhs: &Expr, rhs: &Expr, env: &Environment) -> Result<Value, EvalError> {
    let symbol = op.symbol();
    let left = lhs.eval(env)?;

    // Short-circuit before touching the right operand.
    match op {
        BinaryOp::Or => {
            if expect_bool(symbol, &left)? {
                return Ok(Value::Bool(true));
            }
            return Ok(Value::Bool(expect_bool(symbol, &rhs.eval(env)?)?));
        }
        BinaryOp::And => {
            if !expect_bool(symbol, &left)? {
                return Ok(Value::Bool(false));
            }
            return Ok(Value::Bool(expect_bool(symbol, &rhs.eval(env)?)?));
        }
        _ => {}
    }

    let right = rhs.eval(env)?;
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::Ne => Ok(Value::Bool(left != right)),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let (a, b) = (expect_int(symbol, &left)?, expect_int(symbol, &right)?);
            Ok(Value::Bool(match op {
                BinaryOp::Lt => a < b,
                BinaryOp::Le => a <= b,
                BinaryOp::Gt => a > b,
                _ => a >= b,
            }))
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => {
            let (a, b) = (expect_int(symbol, &left)?, expect_int(symbol, &right)?);
            let result = match op {
                BinaryOp::Add => a.checked_add(b),
                BinaryOp::Sub => a.checked_sub(b),
                _ => a.checked_mul(b),
            };
            result.map(Value::Int).ok_or(EvalError::IntegerOverflow)
        }
        BinaryOp::Div | BinaryOp::Rem => {
            let (a, b) = (expect_int(symbol, &left)?, expect_int(symbol, &right)?);
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            let result = if op == BinaryOp::Div {
                a.checked_div(b)
            } else {
                a.checked_rem(b)
            };
            result.map(Value::Int).ok_or(EvalError::IntegerOverflow)
        }
        BinaryOp::Or => Ok(Value::Bool(
            expect_bool(symbol, &left)? || expect_bool(symbol, &right)?,
        )),
        BinaryOp::And => Ok(Value::Bool(
            expect_bool(symbol, &left)? && expect_bool(symbol, &right)?,
        )),
    }
}

fn expect_int(op: &str, value: &Value) -> Result<i64, EvalError> {
    value.as_int().ok_or_else(|| EvalError::TypeMismatch {
        op: op.to_string(),
        expected: "int",
        found: value.type_name(),
    })
}

fn expect_bool(op: &str, value: &Value) -> Result<bool, EvalError> {
    value.as_bool().ok_or_else(|| EvalError::TypeMismatch {
        op: op.to_string(),
        expected: "bool",
        found: value.type_name(),
    })
}

/// Run a statement sequence, each statement seeing the previous ones.
pub fn execute(statements: &[Statement], env: &Environment) -> Result<Environment, EvalError> {
    let mut next = env.clone();
    for statement in statements {
        if let Statement::Assign { target, value } = statement {
            let value = value.eval(&next)?;
            next.set(target.clone(), value);
        }
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str, env: &Environment) -> Result<Value, EvalError> {
        parse_condition(text).expect("should parse").eval(env)
    }

    #[test]
    fn arithmetic_respects_precedence() {
        let env = Environment::new().with("x", 4);
        assert_eq!(eval("1 + 2 * 3", &env), Ok(Value::Int(7)));
        assert_eq!(eval("(1 + 2) * 3", &env), Ok(Value::Int(9)));
        assert_eq!(eval("x - 1 - 1", &env), Ok(Value::Int(2)));
        assert_eq!(eval("-x % 3", &env), Ok(Value::Int(-1)));
        assert_eq!(eval("x / 2 + --1", &env), Ok(Value::Int(3)));
    }

    #[test]
    fn boolean_operators() {
        let env = Environment::new().with("x", 1).with("ok", true);
        assert_eq!(eval("x == 1 && ok", &env), Ok(Value::Bool(true)));
        assert_eq!(eval("x > 1 || !ok", &env), Ok(Value::Bool(false)));
        assert_eq!(eval("x <= 1 && x >= 1 && x != 2", &env), Ok(Value::Bool(true)));
        assert_eq!(eval("true || false && false", &env), Ok(Value::Bool(true)));
    }

    #[test]
    fn short_circuit_skips_unbound_operand() {
        let env = Environment::new();
        assert_eq!(eval("false && missing > 0", &env), Ok(Value::Bool(false)));
        assert_eq!(eval("true || missing > 0", &env), Ok(Value::Bool(true)));
    }

    #[test]
    fn evaluation_errors() {
        let env = Environment::new().with("b", true);
        assert_eq!(
            eval("y + 1", &env),
            Err(EvalError::UnboundVariable {
                name: "y".to_string()
            })
        );
        assert_eq!(eval("1 / 0", &env), Err(EvalError::DivisionByZero));
        assert!(matches!(
            eval("b + 1", &env),
            Err(EvalError::TypeMismatch { expected: "int", found: "bool", .. })
        ));
        assert_eq!(
            eval("9223372036854775807 + 1", &env),
            Err(EvalError::IntegerOverflow)
        );
    }

    #[test]
    fn malformed_text_is_not_recognized() {
        assert!(parse_condition("x +").is_none());
        assert!(parse_condition("").is_none());
        assert!(parse_condition("x := 1").is_none());
        assert!(parse_condition("99999999999999999999").is_none());
    }

    #[test]
    fn actions_parse_sequences() {
        let statements = parse_action("x := x + 1; skip; y := x * 2;").unwrap();
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[1], Statement::Skip);

        let env = Environment::new().with("x", 1);
        let next = execute(&statements, &env).unwrap();
        assert_eq!(next.get("x"), Some(&Value::Int(2)));
        assert_eq!(next.get("y"), Some(&Value::Int(4)));
        assert_eq!(env.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn empty_action_is_identity() {
        let statements = parse_action("").unwrap();
        assert!(statements.is_empty());
        assert!(parse_action("x = 1").is_none());
        assert!(parse_action("c!1").is_none());
    }

    #[test]
    fn keywords_are_not_variables() {
        assert!(parse_action("true := 1").is_none());
        assert!(parse_action("false := x").is_none());
        assert!(parse_action("skip := 1").is_none());
        assert!(parse_one_sided("c?true").is_none());

        let statements = parse_action("skipped := 1; trueish := skipped").unwrap();
        let env = execute(&statements, &Environment::new()).unwrap();
        assert_eq!(env.get("trueish"), Some(&Value::Int(1)));
        assert_eq!(
            eval("falsehood", &Environment::new().with("falsehood", true)),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn channel_ops_parse() {
        assert_eq!(
            parse_one_sided("c?v"),
            Some(ChannelOp::Receive {
                channel: "c".to_string(),
                target: "v".to_string()
            })
        );
        let send = parse_one_sided("out ! x + 1").unwrap();
        assert_eq!(send.channel(), "out");
        assert!(matches!(send, ChannelOp::Send { .. }));

        assert!(parse_one_sided("x := 1").is_none());
        assert!(parse_one_sided("x != 1").is_none());

        let (a, b) = parse_sync("c!1|c?v").unwrap();
        assert!(matches!(a, ChannelOp::Send { .. }));
        assert!(matches!(b, ChannelOp::Receive { .. }));
        assert!(parse_sync("c!1").is_none());
    }
}
