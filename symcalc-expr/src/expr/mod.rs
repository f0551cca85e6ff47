//! The expression tree.
//!
//! An [`Expression`] is a cheap, immutable handle to a [`Node`]. Cloning an expression shares the
//! node instead of copying it, and a node is dropped when the last expression referring to it is
//! dropped. Since nodes are never mutated after construction, the same subtree can be shared by
//! any number of parents (differentiation does this a lot), and expressions can be sent to and
//! shared between threads.
//!
//! Compound expressions are only built through the methods and operators of [`Expression`],
//! which pass through the [simplifying constructor](crate::simplify). There is no way to
//! allocate a compound node that skips it.
//!
//! # Equality
//!
//! The [`PartialEq`] implementation compares trees **structurally**: two expressions are equal
//! if they have the same shape, the same operators, the same variable names, and equal
//! constants. `x + y` and `y + x` are not equal.

mod ops;

use crate::domain::Domain;
use std::{collections::BTreeSet, fmt::{self, Display, Formatter}, sync::Arc};

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOpKind {
    /// Returns the symbol used to write the operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    /// Returns the precedence of the operator. Operators with a higher precedence bind tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 3,
        }
    }
}

impl Display for BinOpKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A function of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Ln,
    Exp,
}

impl Func {
    /// All functions, in the order they are documented.
    pub const ALL: [Func; 4] = [Func::Sin, Func::Cos, Func::Ln, Func::Exp];

    /// Returns the name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Ln => "ln",
            Self::Exp => "exp",
        }
    }

    /// Looks up a function by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|func| func.name() == name)
    }

    /// Applies the function to a value, with no domain checks.
    pub fn apply<D: Domain>(self, value: D) -> D {
        match self {
            Self::Sin => value.sin(),
            Self::Cos => value.cos(),
            Self::Ln => value.ln(),
            Self::Exp => value.exp(),
        }
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single node of an expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<D: Domain> {
    /// A constant value, such as `2` or `3.5`.
    Constant(D),

    /// A named variable, such as `x`.
    Variable(String),

    /// A binary operation, such as `x + 1`.
    Binary {
        op: BinOpKind,
        lhs: Expression<D>,
        rhs: Expression<D>,
    },

    /// A function applied to an argument, such as `sin(x)`.
    Unary {
        func: Func,
        arg: Expression<D>,
    },
}

/// An immutable, shared handle to an expression tree over the domain `D`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
pub struct Expression<D: Domain> {
    node: Arc<Node<D>>,
}

impl<D: Domain> Expression<D> {
    /// Wraps a node. Only the simplifying constructor and the differentiator may create compound
    /// nodes directly.
    pub(crate) fn from_node(node: Node<D>) -> Self {
        Self { node: Arc::new(node) }
    }

    /// Creates a constant expression.
    pub fn constant(value: D) -> Self {
        Self::from_node(Node::Constant(value))
    }

    /// Creates a variable expression.
    pub fn var(name: impl Into<String>) -> Self {
        Self::from_node(Node::Variable(name.into()))
    }

    /// Returns the node at the root of this expression.
    pub fn node(&self) -> &Node<D> {
        &self.node
    }

    /// If the expression is a constant, returns its value.
    pub fn as_constant(&self) -> Option<D> {
        match &*self.node {
            Node::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if the expression is a constant.
    pub fn is_constant(&self) -> bool {
        matches!(&*self.node, Node::Constant(_))
    }

    /// Returns true if the expression is a constant equal to the given value.
    pub(crate) fn is_constant_eq(&self, value: D) -> bool {
        self.as_constant().is_some_and(|c| c == value)
    }

    /// If the expression is a variable, returns its name.
    pub fn as_variable(&self) -> Option<&str> {
        match &*self.node {
            Node::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the names of all variables used in the expression, in sorted order.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr.node() {
                Node::Constant(_) => (),
                Node::Variable(name) => {
                    names.insert(name.as_str());
                },
                Node::Binary { lhs, rhs, .. } => {
                    stack.push(lhs);
                    stack.push(rhs);
                },
                Node::Unary { arg, .. } => stack.push(arg),
            }
        }
        names
    }

    /// Returns true if both expressions share the same root node in memory.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Renders the expression as fully parenthesized infix text.
    ///
    /// Every binary operation is written as `(lhs op rhs)`, and every function application as
    /// `name(arg)`. This is the same text produced by the [`Display`] implementation.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl<D: Domain> PartialEq for Expression<D> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.node == other.node
    }
}

impl<D: Domain> From<D> for Expression<D> {
    fn from(value: D) -> Self {
        Self::constant(value)
    }
}

impl<D: Domain> Display for Expression<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Constant(value) => value.fmt_value(f),
            Node::Variable(name) => write!(f, "{}", name),
            Node::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
            Node::Unary { func, arg } => write!(f, "{}({})", func, arg),
        }
    }
}
