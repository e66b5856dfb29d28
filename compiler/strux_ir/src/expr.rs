//! Expression nodes.
//!
//! Shapes produced by the parser:
//!
//! | Text          | Node                                               |
//! |---------------|----------------------------------------------------|
//! | `"s"`, `1.5`  | `Literal`                                          |
//! | `name`        | `EnvRef(Literal("name"))`                          |
//! | `$t`          | `EnvRef(t)` (value of `t` is the variable name)    |
//! | `(e)`         | `Indirect(e)`                                      |
//! | `f(a, b)`     | `FuncCall { callee: EnvRef(Literal("f")), args }`  |
//! | `b.k.0.$t`    | `Dot { base, selectors: [Literal, Literal, Indirect] }` |
//! | `b.m(a)`      | `Dot { base, selectors: [MethCall { name: "m", .. }] }` |
//! | `!e`          | `Not(e)`                                           |
//! | `a ? b : c`   | `BoolChain { first: a, rest: [(And, b), (Or, c)] }` |

/// Literal leaf.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
}

/// Operator joining two alternatives in a boolean chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoolOp {
    /// `?`: continue with the right operand when the current value is truthy.
    And,
    /// `:`: continue with the right operand when the current value is falsy.
    Or,
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// String or number literal.
    Literal(Literal),
    /// Environment lookup; the inner expression yields the variable name.
    EnvRef(Box<Expr>),
    /// Base value followed by selectors applied left to right.
    Dot { base: Box<Expr>, selectors: Vec<Expr> },
    /// Call of a callable value.
    FuncCall { callee: Box<Expr>, args: Vec<Expr> },
    /// Method call by literal name; only meaningful as a `Dot` selector.
    MethCall { name: String, args: Vec<Expr> },
    /// Boolean negation.
    Not(Box<Expr>),
    /// Left-folded `?` / `:` chain.
    BoolChain {
        first: Box<Expr>,
        rest: Vec<(BoolOp, Expr)>,
    },
    /// Nested expression whose value is used as-is.
    Indirect(Box<Expr>),
}

impl Expr {
    /// String literal.
    pub fn string(s: impl Into<String>) -> Self {
        Expr::Literal(Literal::Str(s.into()))
    }

    /// Variable lookup by a literal name.
    pub fn var(name: impl Into<String>) -> Self {
        Expr::EnvRef(Box::new(Expr::string(name)))
    }
}
