use crate::arena::strings::Name;

use super::node::{DeclRef, ExprRef, StmtRef, TypeExprRef};

/// Declaration Nodes
#[derive(Debug)]
pub enum Decl {
    Var(VarDecl),
    Function(FunctionDecl),
    Class(ClassDecl),
}

/// One declared variable. `int* a, b;` produces two of these.
#[derive(Debug)]
pub struct VarDecl {
    pub ty: TypeExprRef,
    pub name: Name,
    pub initializer: Option<ExprRef>,
}

/// Function parameter. The name may be omitted (`fn f(: int)`).
#[derive(Debug, Clone)]
pub struct Param {
    pub name: Option<Name>,
    pub ty: TypeExprRef,
}

/// Function declaration, with a body unless it is declaration-only.
#[derive(Debug)]
pub struct FunctionDecl {
    pub name: Name,
    pub params: Vec<Param>,
    pub return_type: TypeExprRef,
    pub body: Option<StmtRef>,
}

#[derive(Debug)]
pub struct ClassDecl {
    pub name: Name,
    pub members: Vec<DeclRef>,
    pub methods: Vec<DeclRef>,
}

impl Decl {
    pub fn name(&self) -> &Name {
        match self {
            Decl::Var(var) => &var.name,
            Decl::Function(function) => &function.name,
            Decl::Class(class) => &class.name,
        }
    }

    pub fn as_var(&self) -> Option<&VarDecl> {
        match self {
            Decl::Var(var) => Some(var),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match self {
            Decl::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDecl> {
        match self {
            Decl::Class(class) => Some(class),
            _ => None,
        }
    }
}
