#![doc = include_str!("../README.md")]

pub mod derivative;
pub mod domain;
pub mod error;
pub mod eval;
pub mod expr;
pub mod simplify;

pub use domain::Domain;
pub use eval::{Bindings, IMAGINARY_UNIT};
pub use expr::{BinOpKind, Expression, Func, Node};
pub use num_complex::Complex64;
pub use simplify::step::{Step, StepCollector};
