use std::collections::HashMap;

use crate::error::UpError;

use super::value::{AccessError, Storage, Value, VarKind, Variable};

/// Flat, process-lifetime variable store. Names are unique across all kinds
/// and variables are kept in declaration order.
#[derive(Debug, Default)]
pub struct Environment {
    variables: Vec<Variable>,
    index: HashMap<String, usize>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&i| &self.variables[i])
    }

    pub fn kind_of(&self, name: &str) -> Option<VarKind> {
        self.get(name).map(Variable::kind)
    }

    /// Adds a zero-initialized variable; references start unbound.
    pub fn declare(&mut self, name: &str, kind: VarKind, line: usize) -> Result<(), UpError> {
        if self.is_declared(name) {
            return Err(UpError::DuplicateName { line, name: name.to_string() });
        }
        self.index.insert(name.to_string(), self.variables.len());
        self.variables.push(Variable {
            name: name.to_string(),
            storage: Storage::zeroed(kind),
        });
        Ok(())
    }

    pub fn load(&self, name: &str, line: usize) -> Result<Value, UpError> {
        let variable = self.lookup(name, line)?;
        variable
            .storage
            .load()
            .map_err(|e| access_error(e, name, line))
    }

    pub fn store(&self, name: &str, value: Value, line: usize) -> Result<(), UpError> {
        let variable = self.lookup(name, line)?;
        variable
            .storage
            .store(value)
            .map_err(|e| access_error(e, name, line))
    }

    /// Makes `reference` name the storage owned by `target`. The reference
    /// never takes ownership; it can be rebound later.
    pub fn bind(&mut self, reference: &str, target: &str, line: usize) -> Result<(), UpError> {
        let target_index = self.position(target, line)?;
        let reference_index = self.position(reference, line)?;

        let reference_kind = self.variables[reference_index].kind();
        let target_kind = self.variables[target_index].kind();
        if !reference_kind.is_reference() {
            return Err(UpError::type_error(
                line,
                format!("'{}' is a {} and cannot be bound", reference, reference_kind),
            ));
        }
        if target_kind.is_reference() {
            return Err(UpError::type_error(
                line,
                format!("'{}' must name owned storage, found {}", target, target_kind),
            ));
        }

        // both indices are valid and distinct: one is a reference, the other is not
        let (reference_var, target_var) = if reference_index < target_index {
            let (head, tail) = self.variables.split_at_mut(target_index);
            (&mut head[reference_index], &tail[0])
        } else {
            let (head, tail) = self.variables.split_at_mut(reference_index);
            (&mut tail[0], &head[target_index])
        };
        reference_var
            .storage
            .bind(&target_var.storage)
            .map_err(|e| access_error(e, reference, line))
    }

    fn lookup(&self, name: &str, line: usize) -> Result<&Variable, UpError> {
        self.get(name).ok_or_else(|| UpError::UndeclaredName {
            line,
            name: name.to_string(),
        })
    }

    fn position(&self, name: &str, line: usize) -> Result<usize, UpError> {
        self.index.get(name).copied().ok_or_else(|| UpError::UndeclaredName {
            line,
            name: name.to_string(),
        })
    }
}

fn access_error(error: AccessError, name: &str, line: usize) -> UpError {
    match error {
        AccessError::Unbound => UpError::UnboundReference { line, name: name.to_string() },
        AccessError::KindMismatch { expected, found } => UpError::type_error(
            line,
            format!("'{}' holds {} but got {}", name, expected, found),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_name_reports_its_kind() {
        let mut env = Environment::new();
        for (i, kind) in VarKind::all().into_iter().enumerate() {
            let name = format!("v{}", i);
            env.declare(&name, kind, 1).unwrap();
            assert_eq!(env.kind_of(&name), Some(kind));
        }
        assert_eq!(env.len(), 8);
    }

    #[test]
    fn names_are_unique_across_kinds() {
        let mut env = Environment::new();
        env.declare("x", VarKind::Number, 1).unwrap();
        for kind in VarKind::all() {
            let err = env.declare("x", kind, 2).unwrap_err();
            assert!(matches!(err, UpError::DuplicateName { line: 2, .. }));
        }
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn iteration_keeps_declaration_order() {
        let mut env = Environment::new();
        env.declare("b", VarKind::Bool, 1).unwrap();
        env.declare("a", VarKind::Line, 2).unwrap();
        env.declare("c", VarKind::SymbolRef, 3).unwrap();
        let names: Vec<&str> = env.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn undeclared_access_fails() {
        let env = Environment::new();
        assert!(matches!(
            env.load("ghost", 4),
            Err(UpError::UndeclaredName { line: 4, .. })
        ));
    }

    #[test]
    fn unbound_reference_fails_fast() {
        let mut env = Environment::new();
        env.declare("p", VarKind::NumberRef, 1).unwrap();
        assert!(matches!(
            env.load("p", 2),
            Err(UpError::UnboundReference { line: 2, .. })
        ));
        assert!(matches!(
            env.store("p", Value::Number(1.0), 3),
            Err(UpError::UnboundReference { line: 3, .. })
        ));
    }

    #[test]
    fn bind_links_reference_to_target() {
        let mut env = Environment::new();
        env.declare("p", VarKind::LineRef, 1).unwrap();
        env.declare("text", VarKind::Line, 2).unwrap();
        env.bind("p", "text", 3).unwrap();

        env.store("p", Value::Line("hi".to_string()), 4).unwrap();
        assert_eq!(env.load("text", 5).unwrap(), Value::Line("hi".to_string()));
    }

    #[test]
    fn bind_checks_kinds() {
        let mut env = Environment::new();
        env.declare("p", VarKind::NumberRef, 1).unwrap();
        env.declare("q", VarKind::NumberRef, 1).unwrap();
        env.declare("c", VarKind::Symbol, 1).unwrap();
        env.declare("n", VarKind::Number, 1).unwrap();

        assert!(matches!(env.bind("p", "c", 2), Err(UpError::Type { .. })));
        assert!(matches!(env.bind("p", "q", 2), Err(UpError::Type { .. })));
        assert!(matches!(env.bind("n", "n", 2), Err(UpError::Type { .. })));
        assert!(matches!(env.bind("p", "zz", 2), Err(UpError::UndeclaredName { .. })));
    }
}
