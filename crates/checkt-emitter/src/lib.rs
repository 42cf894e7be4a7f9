//! Declaration IR and printer.
//!
//! The cast and container engines build [`ir::CompilationUnit`] trees; the
//! [`printer::JavaPrinter`] is the only place that knows about layout,
//! indentation and line endings.

pub mod ir;
pub mod printer;

pub use ir::{
    BinaryOp, ClassDecl, CompilationUnit, Expr, Member, MethodDecl, Modifier, Param, Stmt,
};
pub use printer::{JavaPrinter, NewLineKind, PrinterOptions};
