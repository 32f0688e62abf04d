//! Compact S-expression rendering used in diagnostics and tests.
//!
//! `a + b * c` renders as `(ADD a (MUL b c))`, `int* p = 0;` as
//! `(decl int* p 0)`. Missing optional parts render as `_`.

use std::fmt::{self, Display};

use super::{
    declarations::Decl,
    expressions::Expr,
    node::Node,
    statements::Stmt,
    types::TypeExpr,
};

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for item in items {
        write!(f, " {}", item)?;
    }
    Ok(())
}

fn write_optional<T: Display>(f: &mut fmt::Formatter<'_>, item: &Option<T>) -> fmt::Result {
    match item {
        Some(item) => write!(f, " {}", item),
        None => write!(f, " _"),
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Expr(expr) => expr.fmt(f),
            Node::Decl(decl) => decl.fmt(f),
            Node::Type(ty) => ty.fmt(f),
            Node::Stmt(stmt) => stmt.fmt(f),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Op(op) => {
                write!(f, "({}", op.op)?;
                if let Some(lhs) = &op.lhs {
                    write!(f, " {}", lhs)?;
                }
                if let Some(rhs) = &op.rhs {
                    write!(f, " {}", rhs)?;
                }
                write!(f, ")")
            }
            Expr::Value(value) => write!(f, "{}", value.constant.borrow()),
            Expr::Id(id) => write!(f, "{}", id.name),
            Expr::Call(call) => {
                write!(f, "(call")?;
                write_optional(f, &call.callee)?;
                write_list(f, &call.args)?;
                write!(f, ")")
            }
            Expr::List(list) => {
                write!(f, "(list")?;
                write_list(f, &list.members)?;
                write!(f, ")")
            }
        }
    }
}

impl Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decl::Var(var) => {
                write!(f, "(decl {} {}", var.ty, var.name)?;
                if let Some(init) = &var.initializer {
                    write!(f, " {}", init)?;
                }
                write!(f, ")")
            }
            Decl::Function(function) => {
                write!(f, "(fn {} (", function.name)?;
                for (i, param) in function.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    match &param.name {
                        Some(name) => write!(f, "{}: {}", name, param.ty)?,
                        None => write!(f, ": {}", param.ty)?,
                    }
                }
                write!(f, ") {}", function.return_type)?;
                if let Some(body) = &function.body {
                    write!(f, " {}", body)?;
                }
                write!(f, ")")
            }
            Decl::Class(class) => {
                write!(f, "(class {}", class.name)?;
                write_list(f, &class.members)?;
                write_list(f, &class.methods)?;
                write!(f, ")")
            }
        }
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(ty) => write!(f, "{}", ty.borrow()),
            TypeExpr::Pointer(inner) => write!(f, "{}*", inner),
            TypeExpr::Array {
                element,
                size: Some(size),
            } => write!(f, "{}[{}]", element, size),
            TypeExpr::Array {
                element,
                size: None,
            } => write!(f, "{}[]", element),
            TypeExpr::Class(name) => write!(f, "{}", name),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Block(block) => {
                write!(f, "(block")?;
                write_list(f, &block.items)?;
                write!(f, ")")
            }
            Stmt::If(stmt) => {
                write!(f, "(if {} {}", stmt.condition, stmt.then_body)?;
                if let Some(else_body) = &stmt.else_body {
                    write!(f, " {}", else_body)?;
                }
                write!(f, ")")
            }
            Stmt::While(stmt) => write!(f, "(while {} {})", stmt.condition, stmt.body),
            Stmt::For(stmt) => {
                write!(f, "(for")?;
                write_optional(f, &stmt.init)?;
                write_optional(f, &stmt.condition)?;
                write_optional(f, &stmt.step)?;
                write!(f, " {})", stmt.body)
            }
            Stmt::Continue => write!(f, "(continue)"),
            Stmt::Break => write!(f, "(break)"),
            Stmt::Return(stmt) => match &stmt.value {
                Some(value) => write!(f, "(return {})", value),
                None => write!(f, "(return)"),
            },
        }
    }
}
