use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Owned storage of a value variable.
pub type Slot<T> = Rc<RefCell<T>>;
/// Non-owning link of a reference variable; `None` until bound.
pub type Alias<T> = Option<Weak<RefCell<T>>>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Symbol(char),
    Bool(bool),
    Line(String),
}

impl Value {
    pub fn kind(&self) -> VarKind {
        match self {
            Self::Number(_) => VarKind::Number,
            Self::Symbol(_) => VarKind::Symbol,
            Self::Bool(_) => VarKind::Bool,
            Self::Line(_) => VarKind::Line,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Symbol(c) => write!(f, "{}", c),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Line(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Number,
    Symbol,
    Bool,
    Line,
    NumberRef,
    SymbolRef,
    BoolRef,
    LineRef,
}

impl VarKind {
    pub fn all() -> [Self; 8] {
        [
            Self::Number,
            Self::Symbol,
            Self::Bool,
            Self::Line,
            Self::NumberRef,
            Self::SymbolRef,
            Self::BoolRef,
            Self::LineRef,
        ]
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::all().into_iter().find(|kind| kind.keyword() == keyword)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Symbol => "symbol",
            Self::Bool => "bool",
            Self::Line => "line",
            Self::NumberRef => "->number",
            Self::SymbolRef => "->symbol",
            Self::BoolRef => "->bool",
            Self::LineRef => "->line",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Number => "decimal number, starts at 0",
            Self::Symbol => "single character, starts as the null character",
            Self::Bool => "true or false, starts as false",
            Self::Line => "text, starts empty",
            Self::NumberRef => "reference to a number variable",
            Self::SymbolRef => "reference to a symbol variable",
            Self::BoolRef => "reference to a bool variable",
            Self::LineRef => "reference to a line variable",
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::NumberRef | Self::SymbolRef | Self::BoolRef | Self::LineRef
        )
    }

    /// Kind of the value actually read or written: references map to their
    /// target kind, value kinds to themselves.
    pub fn referent(&self) -> Self {
        match self {
            Self::Number | Self::NumberRef => Self::Number,
            Self::Symbol | Self::SymbolRef => Self::Symbol,
            Self::Bool | Self::BoolRef => Self::Bool,
            Self::Line | Self::LineRef => Self::Line,
        }
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    Unbound,
    KindMismatch { expected: VarKind, found: VarKind },
}

#[derive(Debug)]
pub enum Storage {
    Number(Slot<f64>),
    Symbol(Slot<char>),
    Bool(Slot<bool>),
    Line(Slot<String>),
    NumberRef(Alias<f64>),
    SymbolRef(Alias<char>),
    BoolRef(Alias<bool>),
    LineRef(Alias<String>),
}

impl Storage {
    pub fn zeroed(kind: VarKind) -> Self {
        match kind {
            VarKind::Number => Self::Number(slot(0.0)),
            VarKind::Symbol => Self::Symbol(slot('\0')),
            VarKind::Bool => Self::Bool(slot(false)),
            VarKind::Line => Self::Line(slot(String::new())),
            VarKind::NumberRef => Self::NumberRef(None),
            VarKind::SymbolRef => Self::SymbolRef(None),
            VarKind::BoolRef => Self::BoolRef(None),
            VarKind::LineRef => Self::LineRef(None),
        }
    }

    pub fn kind(&self) -> VarKind {
        match self {
            Self::Number(_) => VarKind::Number,
            Self::Symbol(_) => VarKind::Symbol,
            Self::Bool(_) => VarKind::Bool,
            Self::Line(_) => VarKind::Line,
            Self::NumberRef(_) => VarKind::NumberRef,
            Self::SymbolRef(_) => VarKind::SymbolRef,
            Self::BoolRef(_) => VarKind::BoolRef,
            Self::LineRef(_) => VarKind::LineRef,
        }
    }

    pub fn load(&self) -> Result<Value, AccessError> {
        let value = match self {
            Self::Number(cell) => Value::Number(*cell.borrow()),
            Self::Symbol(cell) => Value::Symbol(*cell.borrow()),
            Self::Bool(cell) => Value::Bool(*cell.borrow()),
            Self::Line(cell) => Value::Line(cell.borrow().clone()),
            Self::NumberRef(alias) => Value::Number(*resolve(alias)?.borrow()),
            Self::SymbolRef(alias) => Value::Symbol(*resolve(alias)?.borrow()),
            Self::BoolRef(alias) => Value::Bool(*resolve(alias)?.borrow()),
            Self::LineRef(alias) => Value::Line(resolve(alias)?.borrow().clone()),
        };
        Ok(value)
    }

    /// Overwrites the stored value, writing through a bound reference.
    pub fn store(&self, value: Value) -> Result<(), AccessError> {
        match (self, value) {
            (Self::Number(cell), Value::Number(n)) => *cell.borrow_mut() = n,
            (Self::Symbol(cell), Value::Symbol(c)) => *cell.borrow_mut() = c,
            (Self::Bool(cell), Value::Bool(b)) => *cell.borrow_mut() = b,
            (Self::Line(cell), Value::Line(s)) => *cell.borrow_mut() = s,
            (Self::NumberRef(alias), Value::Number(n)) => *resolve(alias)?.borrow_mut() = n,
            (Self::SymbolRef(alias), Value::Symbol(c)) => *resolve(alias)?.borrow_mut() = c,
            (Self::BoolRef(alias), Value::Bool(b)) => *resolve(alias)?.borrow_mut() = b,
            (Self::LineRef(alias), Value::Line(s)) => *resolve(alias)?.borrow_mut() = s,
            (storage, value) => {
                return Err(AccessError::KindMismatch {
                    expected: storage.kind().referent(),
                    found: value.kind(),
                });
            }
        }
        Ok(())
    }

    /// Points a reference at owned storage of its referent kind.
    pub fn bind(&mut self, target: &Storage) -> Result<(), AccessError> {
        match (&mut *self, target) {
            (Self::NumberRef(alias), Self::Number(cell)) => *alias = Some(Rc::downgrade(cell)),
            (Self::SymbolRef(alias), Self::Symbol(cell)) => *alias = Some(Rc::downgrade(cell)),
            (Self::BoolRef(alias), Self::Bool(cell)) => *alias = Some(Rc::downgrade(cell)),
            (Self::LineRef(alias), Self::Line(cell)) => *alias = Some(Rc::downgrade(cell)),
            (storage, target) => {
                return Err(AccessError::KindMismatch {
                    expected: storage.kind().referent(),
                    found: target.kind(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Variable {
    pub name: String,
    pub storage: Storage,
}

impl Variable {
    pub fn kind(&self) -> VarKind {
        self.storage.kind()
    }
}

fn slot<T>(value: T) -> Slot<T> {
    Rc::new(RefCell::new(value))
}

fn resolve<T>(alias: &Alias<T>) -> Result<Slot<T>, AccessError> {
    alias
        .as_ref()
        .and_then(Weak::upgrade)
        .ok_or(AccessError::Unbound)
}
