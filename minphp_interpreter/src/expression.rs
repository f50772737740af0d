use std::io::Write;

use crate::ast::{Environment, Token, Value};
use crate::errors::{InterpreterError, Result};
use crate::interpreter::Interpreter;

#[derive(Debug, Clone, PartialEq)]
enum Term {
    Value(Value),
    Variable { name: String, position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    /// `++` takes no right-hand term.
    Increment,
    Binary(BinaryOperator),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOperator {
    Assign,
    LessEqual,
    StrictEqual,
    Modulo,
}

impl Operator {
    fn of(token: &Token) -> Option<Self> {
        match token {
            Token::Increment => Some(Operator::Increment),
            Token::Assign => Some(Operator::Binary(BinaryOperator::Assign)),
            Token::LessEqual => Some(Operator::Binary(BinaryOperator::LessEqual)),
            Token::StrictEqual => Some(Operator::Binary(BinaryOperator::StrictEqual)),
            Token::Modulo => Some(Operator::Binary(BinaryOperator::Modulo)),
            _ => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Operator::Increment => "++",
            Operator::Binary(BinaryOperator::Assign) => "=",
            Operator::Binary(BinaryOperator::LessEqual) => "<=",
            Operator::Binary(BinaryOperator::StrictEqual) => "===",
            Operator::Binary(BinaryOperator::Modulo) => "%",
        }
    }
}

impl<'t, W: Write> Interpreter<'t, W> {
    // No precedence: each operator folds the running term left to right.
    // Inactive expressions only consume tokens and yield Null.
    pub fn calculate_expression(&mut self, env: &mut Environment, active: bool) -> Result<Value> {
        let mut running = self.next_term()?;

        loop {
            let position = self.position;
            let Some(operator) = self.peek().and_then(Operator::of) else {
                return if active {
                    resolve(running, env)
                } else {
                    Ok(Value::Null)
                };
            };
            self.position += 1;

            match operator {
                Operator::Increment => {
                    if active {
                        running = Term::Value(increment(running, env, position)?);
                    }
                }
                Operator::Binary(binary) => {
                    let right = self.next_term()?;
                    if active {
                        running = Term::Value(apply(binary, running, right, env, position)?);
                    }
                }
            }
        }
    }

    fn next_term(&mut self) -> Result<Term> {
        let position = self.position;
        let term = match self.peek() {
            Some(Token::Int(n)) => Term::Value(Value::Int(*n)),
            Some(Token::Str(s)) => Term::Value(Value::Str(s.clone())),
            Some(Token::Variable(name)) => Term::Variable {
                name: name.clone(),
                position,
            },
            _ => return Err(self.syntax_error("a literal or variable")),
        };
        self.position += 1;
        Ok(term)
    }
}

fn apply(
    operator: BinaryOperator,
    left: Term,
    right: Term,
    env: &mut Environment,
    position: usize,
) -> Result<Value> {
    match operator {
        BinaryOperator::Assign => {
            let name = assignment_target(left, Operator::Binary(operator), position)?;
            let value = resolve(right, env)?;
            env.set(name, value.clone());
            Ok(value)
        }
        BinaryOperator::LessEqual => {
            let (left, right) = (resolve(left, env)?, resolve(right, env)?);
            Ok(Value::Bool(left.less_or_equal(&right)))
        }
        BinaryOperator::StrictEqual => {
            let (left, right) = (resolve(left, env)?, resolve(right, env)?);
            Ok(Value::Bool(left.strictly_equals(&right)))
        }
        BinaryOperator::Modulo => {
            let (left, right) = (resolve(left, env)?, resolve(right, env)?);
            modulo(&left, &right, position)
        }
    }
}

fn resolve(term: Term, env: &Environment) -> Result<Value> {
    match term {
        Term::Value(value) => Ok(value),
        Term::Variable { name, position } => env
            .get(&name)
            .cloned()
            .map_err(|err| err.at_token(position)),
    }
}

/// `=` and `++` write back, so their left side must still be a variable.
fn assignment_target(term: Term, operator: Operator, position: usize) -> Result<String> {
    match term {
        Term::Variable { name, .. } => Ok(name),
        Term::Value(value) => Err(InterpreterError::type_error(
            format!(
                "`{}` needs a variable on its left, found {}",
                operator.symbol(),
                value.type_name()
            ),
            position,
        )),
    }
}

fn increment(term: Term, env: &mut Environment, position: usize) -> Result<Value> {
    let variable_position = match &term {
        Term::Variable { position, .. } => *position,
        Term::Value(_) => position,
    };
    let name = assignment_target(term, Operator::Increment, position)?;
    let current = match env.get(&name).map_err(|err| err.at_token(variable_position))? {
        Value::Int(n) => *n,
        other => {
            return Err(InterpreterError::type_error(
                format!("cannot increment a {} value", other.type_name()),
                position,
            ))
        }
    };
    let next = current
        .checked_add(1)
        .ok_or_else(|| InterpreterError::arithmetic("integer overflow in `++`", position))?;
    env.set(name, Value::Int(next));
    Ok(Value::Int(next))
}

fn modulo(left: &Value, right: &Value, position: usize) -> Result<Value> {
    match (left, right) {
        (Value::Int(_), Value::Int(0)) => {
            Err(InterpreterError::arithmetic("modulo by zero", position))
        }
        // The remainder takes the sign of the dividend; i64::MIN % -1 is 0.
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_rem(*b))),
        _ => Err(unsupported_operands(
            Operator::Binary(BinaryOperator::Modulo),
            left,
            right,
            position,
        )),
    }
}

fn unsupported_operands(
    operator: Operator,
    left: &Value,
    right: &Value,
    position: usize,
) -> InterpreterError {
    InterpreterError::type_error(
        format!(
            "unsupported operand types for `{}`: {} and {}",
            operator.symbol(),
            left.type_name(),
            right.type_name()
        ),
        position,
    )
}
