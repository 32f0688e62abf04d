use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    /// Source spelling -> operator. Word operators are matched by the identifier pattern.
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, Operator> = {
        let mut map = HashMap::new();
        map.insert("+", Operator::Add);
        map.insert("-", Operator::Sub);
        map.insert("*", Operator::Mul);
        map.insert("/", Operator::Div);
        map.insert("%", Operator::Mod);
        map.insert("^", Operator::Pow);
        map.insert("++", Operator::Inc);
        map.insert("--", Operator::Dec);
        map.insert("&", Operator::Addr);
        map.insert("==", Operator::Eq);
        map.insert("!=", Operator::Ne);
        map.insert("<", Operator::Lt);
        map.insert("<=", Operator::Le);
        map.insert(">", Operator::Gt);
        map.insert(">=", Operator::Ge);
        map.insert("and", Operator::And);
        map.insert("or", Operator::Or);
        map.insert("xor", Operator::Xor);
        map.insert("not", Operator::Not);
        map.insert("!", Operator::Not);
        map.insert("=", Operator::Asn);
        map.insert("+=", Operator::AddAsn);
        map.insert("-=", Operator::SubAsn);
        map.insert("*=", Operator::MulAsn);
        map.insert("/=", Operator::DivAsn);
        map.insert("%=", Operator::ModAsn);
        map.insert("^=", Operator::PowAsn);
        map.insert(".", Operator::Mber);
        map.insert("->", Operator::Arrow);
        map.insert("[", Operator::Index);
        map.insert("]", Operator::RIndex);
        map.insert("(", Operator::Brac);
        map.insert(")", Operator::RBrac);
        map.insert(",", Operator::Comma);
        map.insert(":", Operator::Colon);
        map.insert(";", Operator::Semicolon);
        map.insert("{", Operator::Comp);
        map.insert("}", Operator::RComp);
        map
    };

    /// Binding strength of binary and unary operators; lower binds tighter.
    pub static ref PRECEDENCE_LOOKUP: HashMap<Operator, u32> = {
        let mut map = HashMap::new();
        map.insert(Operator::PostInc, 1);
        map.insert(Operator::PostDec, 1);
        map.insert(Operator::Plus, 2);
        map.insert(Operator::Minus, 2);
        map.insert(Operator::Inc, 2);
        map.insert(Operator::Dec, 2);
        map.insert(Operator::Pow, 3);
        map.insert(Operator::Mul, 4);
        map.insert(Operator::Div, 4);
        map.insert(Operator::Mod, 4);
        map.insert(Operator::Add, 5);
        map.insert(Operator::Sub, 5);
        map.insert(Operator::Lt, 6);
        map.insert(Operator::Le, 6);
        map.insert(Operator::Gt, 6);
        map.insert(Operator::Ge, 6);
        map.insert(Operator::Eq, 7);
        map.insert(Operator::Ne, 7);
        map.insert(Operator::And, 8);
        map.insert(Operator::Xor, 9);
        map.insert(Operator::Or, 10);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Arity {
    Prefix,
    Postfix,
    Binary,
    None,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Operator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Unary
    Plus,
    Minus,
    Inc,
    Dec,
    PostInc,
    PostDec,

    // Access
    Mber,
    Arrow,
    Addr,
    Deref,
    Index,

    // Comparison and logic
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Xor,
    Not,

    // Assignment
    Asn,
    AddAsn,
    SubAsn,
    MulAsn,
    DivAsn,
    ModAsn,
    PowAsn,

    // Punctuation
    RIndex,
    Brac,
    RBrac,
    Comma,
    Colon,
    Semicolon,
    Comp,
    RComp,
}

impl Operator {
    /// `+ - * / % ^`
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Operator::Add
                | Operator::Sub
                | Operator::Mul
                | Operator::Div
                | Operator::Mod
                | Operator::Pow
        )
    }

    /// Comparisons and `and or xor not`.
    pub fn is_logic(self) -> bool {
        self.is_binary_logic() || self == Operator::Not
    }

    /// Comparisons and `and or xor`.
    pub fn is_binary_logic(self) -> bool {
        matches!(
            self,
            Operator::Eq
                | Operator::Ne
                | Operator::Lt
                | Operator::Le
                | Operator::Gt
                | Operator::Ge
                | Operator::And
                | Operator::Or
                | Operator::Xor
        )
    }

    /// `=` and the compound `[+-*/%^]=` forms.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Operator::Asn
                | Operator::AddAsn
                | Operator::SubAsn
                | Operator::MulAsn
                | Operator::DivAsn
                | Operator::ModAsn
                | Operator::PowAsn
        )
    }

    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            Operator::RIndex
                | Operator::Brac
                | Operator::RBrac
                | Operator::Comma
                | Operator::Colon
                | Operator::Semicolon
                | Operator::Comp
                | Operator::RComp
        )
    }

    /// Operators that may appear between two operands in an expression.
    pub fn is_binary(self) -> bool {
        self.arity() == Arity::Binary
    }

    pub fn arity(self) -> Arity {
        match self {
            Operator::Plus
            | Operator::Minus
            | Operator::Inc
            | Operator::Dec
            | Operator::Addr
            | Operator::Deref
            | Operator::Not => Arity::Prefix,
            Operator::PostInc | Operator::PostDec => Arity::Postfix,
            op if op.is_punctuation() => Arity::None,
            _ => Arity::Binary,
        }
    }

    /// Precedence of the operator, `None` for operators the precedence
    /// loop never folds (assignment, access, punctuation).
    pub fn precedence(self) -> Option<u32> {
        PRECEDENCE_LOOKUP.get(&self).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "ADD",
            Operator::Sub => "SUB",
            Operator::Mul => "MUL",
            Operator::Div => "DIV",
            Operator::Mod => "MOD",
            Operator::Pow => "POW",
            Operator::Plus => "PLUS",
            Operator::Minus => "MINUS",
            Operator::Inc => "INC",
            Operator::Dec => "DEC",
            Operator::PostInc => "POSTINC",
            Operator::PostDec => "POSTDEC",
            Operator::Mber => "MBER",
            Operator::Arrow => "ARROW",
            Operator::Addr => "ADDR",
            Operator::Deref => "DEREF",
            Operator::Index => "INDEX",
            Operator::Eq => "EQ",
            Operator::Ne => "NE",
            Operator::Lt => "LT",
            Operator::Le => "LE",
            Operator::Gt => "GT",
            Operator::Ge => "GE",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Not => "NOT",
            Operator::Asn => "ASN",
            Operator::AddAsn => "ADDASN",
            Operator::SubAsn => "SUBASN",
            Operator::MulAsn => "MULASN",
            Operator::DivAsn => "DIVASN",
            Operator::ModAsn => "MODASN",
            Operator::PowAsn => "POWASN",
            Operator::RIndex => "]",
            Operator::Brac => "(",
            Operator::RBrac => ")",
            Operator::Comma => ",",
            Operator::Colon => ":",
            Operator::Semicolon => ";",
            Operator::Comp => "{",
            Operator::RComp => "}",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
