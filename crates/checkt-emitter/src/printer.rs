//! Java source printer.
//!
//! Walks an IR tree and writes Java text. Output depends only on the tree
//! and the [`PrinterOptions`], so equal trees always print to equal bytes.

use crate::ir::{ClassDecl, CompilationUnit, Expr, Member, MethodDecl, Modifier, Param, Stmt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLineKind {
    #[default]
    #[serde(alias = "lineFeed")]
    Lf,
    #[serde(alias = "carriageReturnLineFeed")]
    Crlf,
}

impl NewLineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterOptions {
    pub new_line: NewLineKind,
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            new_line: NewLineKind::Lf,
            indent_width: 4,
        }
    }
}

pub struct JavaPrinter {
    out: String,
    indent_level: usize,
    options: PrinterOptions,
}

impl JavaPrinter {
    #[must_use]
    pub fn new(options: PrinterOptions) -> Self {
        Self {
            out: String::with_capacity(4096),
            indent_level: 0,
            options,
        }
    }

    /// Print a whole compilation unit.
    #[must_use]
    pub fn print_unit(unit: &CompilationUnit, options: PrinterOptions) -> String {
        let mut printer = Self::new(options);
        printer.emit_unit(unit);
        printer.out
    }

    /// Print a single expression with default options (mainly for tests).
    #[must_use]
    pub fn emit_to_string(expr: &Expr) -> String {
        let mut printer = Self::new(PrinterOptions::default());
        printer.emit_expr(expr, 0);
        printer.out
    }

    fn emit_unit(&mut self, unit: &CompilationUnit) {
        if let Some(package) = &unit.package {
            self.write("package ");
            self.write(package);
            self.write(";");
            self.write_line();
            self.write_line();
        }

        let mut imports: Vec<&str> = unit.imports.iter().map(String::as_str).collect();
        imports.sort_unstable();
        imports.dedup();
        if !imports.is_empty() {
            for import in imports {
                self.write("import ");
                self.write(import);
                self.write(";");
                self.write_line();
            }
            self.write_line();
        }

        for (i, class) in unit.classes.iter().enumerate() {
            if i > 0 {
                self.write_line();
            }
            self.emit_class(class);
        }
    }

    fn emit_class(&mut self, class: &ClassDecl) {
        self.write_indent();
        self.emit_modifiers(&class.modifiers);
        self.write("class ");
        self.write(&class.name);
        self.write(" {");
        self.write_line();
        self.increase_indent();

        for (i, member) in class.members.iter().enumerate() {
            if i > 0 {
                self.write_line();
            }
            self.emit_member(&class.name, member);
        }

        self.decrease_indent();
        self.write_indent();
        self.write("}");
        self.write_line();
    }

    fn emit_member(&mut self, class_name: &str, member: &Member) {
        match member {
            Member::Field {
                modifiers,
                ty,
                name,
                initializer,
            } => {
                self.write_indent();
                self.emit_modifiers(modifiers);
                self.write(ty);
                self.write(" ");
                self.write(name);
                if let Some(init) = initializer {
                    self.write(" = ");
                    self.emit_expr(init, 0);
                }
                self.write(";");
                self.write_line();
            }
            Member::Constructor {
                modifiers,
                params,
                body,
            } => {
                self.write_indent();
                self.emit_modifiers(modifiers);
                self.write(class_name);
                self.emit_params(params);
                self.write(" ");
                self.emit_body(body);
            }
            Member::Method(method) => self.emit_method(method),
        }
    }

    fn emit_method(&mut self, method: &MethodDecl) {
        for annotation in &method.annotations {
            self.write_indent();
            self.write("@");
            self.write(annotation);
            self.write_line();
        }
        self.write_indent();
        self.emit_modifiers(&method.modifiers);
        if !method.type_params.is_empty() {
            self.write("<");
            self.write(&method.type_params.join(", "));
            self.write("> ");
        }
        self.write(&method.return_type);
        self.write(" ");
        self.write(&method.name);
        self.emit_params(&method.params);
        self.write(" ");
        self.emit_body(&method.body);
    }

    fn emit_params(&mut self, params: &[Param]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&param.ty);
            self.write(" ");
            self.write(&param.name);
        }
        self.write(")");
    }

    /// `{}` for an empty body, otherwise an indented block. Ends the line.
    fn emit_body(&mut self, body: &[Stmt]) {
        if body.is_empty() {
            self.write("{}");
            self.write_line();
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for stmt in body {
            self.emit_stmt(stmt);
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
        self.write_line();
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        self.write_indent();
        match stmt {
            Stmt::If {
                condition,
                then_branch,
            } => {
                self.write("if (");
                self.emit_expr(condition, 0);
                self.write(") ");
                self.emit_body(then_branch);
                return;
            }
            Stmt::Throw(expr) => {
                self.write("throw ");
                self.emit_expr(expr, 0);
            }
            Stmt::Return(expr) => {
                self.write("return ");
                self.emit_expr(expr, 0);
            }
        }
        self.write(";");
        self.write_line();
    }

    /// `parent_precedence` is the binding strength of the enclosing binary
    /// operator; a looser child gets parenthesized.
    fn emit_expr(&mut self, expr: &Expr, parent_precedence: u8) {
        match expr {
            Expr::Name(name) => self.write(name),
            Expr::Null => self.write("null"),
            Expr::Call {
                receiver,
                method,
                args,
            } => {
                self.emit_expr(receiver, u8::MAX);
                self.write(".");
                self.write(method);
                self.emit_args(args);
            }
            Expr::Binary { left, op, right } => {
                let precedence = op.precedence();
                let needs_parens = precedence < parent_precedence;
                if needs_parens {
                    self.write("(");
                }
                self.emit_expr(left, precedence);
                self.write(" ");
                self.write(op.token());
                self.write(" ");
                // Left-associative: an equal-precedence right operand needs parens.
                self.emit_expr(right, precedence + 1);
                if needs_parens {
                    self.write(")");
                }
            }
            Expr::Cast { ty, expr } => {
                if parent_precedence > 0 {
                    self.write("(");
                }
                self.write("(");
                self.write(ty);
                self.write(") ");
                self.emit_expr(expr, u8::MAX);
                if parent_precedence > 0 {
                    self.write(")");
                }
            }
            Expr::New { ty, args } => {
                self.write("new ");
                self.write(ty);
                self.emit_args(args);
            }
        }
    }

    fn emit_args(&mut self, args: &[Expr]) {
        self.write("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expr(arg, 0);
        }
        self.write(")");
    }

    fn emit_modifiers(&mut self, modifiers: &[Modifier]) {
        let mut sorted = modifiers.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for modifier in sorted {
            self.write(modifier.keyword());
            self.write(" ");
        }
    }

    fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn write_line(&mut self) {
        self.out.push_str(self.options.new_line.as_str());
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level * self.options.indent_width {
            self.out.push(' ');
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

#[cfg(test)]
#[path = "tests/printer_tests.rs"]
mod printer_tests;
