use std::collections::HashMap;

use thiserror::Error;

use crate::util::federigo_log::{self, LogTypes, LogSources};

// Raised when an update cannot be applied
#[derive (Debug, Clone, PartialEq, Error)]
pub enum SymbolError {
    #[error ("Cannot assign to undeclared variable: {0}")]
    Undeclared(String),
    #[error ("Cannot assign to immutable variable: {0}")]
    Immutable(String)
}

// The value currently stored for a symbol
#[derive (Debug, Clone, PartialEq)]
pub enum SymbolValue {
    Unset,
    Number(f64),
    Text(String),
    Bool(bool)
}

#[derive (Debug, Clone, PartialEq)]
pub struct Symbol {
    name: String,
    type_name: String,
    value: SymbolValue,
    // Fixed at insertion
    is_mutable: bool
}

impl Symbol {
    pub fn name(&self) -> &str {
        return &self.name;
    }

    pub fn type_name(&self) -> &str {
        return &self.type_name;
    }

    pub fn value(&self) -> &SymbolValue {
        return &self.value;
    }

    pub fn is_mutable(&self) -> bool {
        return self.is_mutable;
    }
}

// A single flat scope of declared names
#[derive (Debug, Default)]
pub struct SymbolTable {
    table: HashMap<String, Symbol>
}

impl SymbolTable {
    // Constructor for a new symbol table
    pub fn new() -> Self {
        return SymbolTable {
            table: HashMap::new()
        };
    }

    // Inserts the symbol, replacing any existing symbol with the same name
    pub fn add(&mut self, name: &str, type_name: &str, value: SymbolValue, is_mutable: bool) {
        federigo_log::log(LogTypes::Debug, LogSources::SymbolTable, format!("Adding symbol {} of type {} (mutable: {})", name, type_name, is_mutable));
        self.table.insert(String::from(name), Symbol {
            name: String::from(name),
            type_name: String::from(type_name),
            value,
            is_mutable
        });
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        return self.table.get(name);
    }

    // Replaces the value of a declared, mutable symbol
    pub fn update(&mut self, name: &str, new_value: SymbolValue) -> Result<(), SymbolError> {
        match self.table.get_mut(name) {
            Some(symbol) if symbol.is_mutable => {
                federigo_log::log(LogTypes::Debug, LogSources::SymbolTable, format!("Updating symbol {} to {:?}", name, new_value));
                symbol.value = new_value;
                Ok(())
            },
            Some(_) => Err(SymbolTable::report(SymbolError::Immutable(String::from(name)))),
            None => Err(SymbolTable::report(SymbolError::Undeclared(String::from(name))))
        }
    }

    fn report(err: SymbolError) -> SymbolError {
        federigo_log::log(LogTypes::Error, LogSources::SymbolTable, err.to_string());
        return err;
    }

    pub fn len(&self) -> usize {
        return self.table.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.table.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::federigo_log::capture;

    #[test]
    fn test_update_immutable_fails() {
        let mut symbol_table: SymbolTable = SymbolTable::new();
        symbol_table.add("x", "Int", SymbolValue::Number(1.0), false);

        assert_eq!(symbol_table.update("x", SymbolValue::Number(2.0)), Err(SymbolError::Immutable(String::from("x"))));
        assert_eq!(symbol_table.lookup("x").unwrap().value(), &SymbolValue::Number(1.0));
    }

    #[test]
    fn test_update_mutable_succeeds() {
        let mut symbol_table: SymbolTable = SymbolTable::new();
        symbol_table.add("y", "Int", SymbolValue::Number(1.0), true);

        assert!(symbol_table.update("y", SymbolValue::Number(2.0)).is_ok());

        let symbol: &Symbol = symbol_table.lookup("y").unwrap();
        assert_eq!(symbol.value(), &SymbolValue::Number(2.0));
        assert_eq!(symbol.type_name(), "Int");
        assert!(symbol.is_mutable());
    }

    #[test]
    fn test_update_undeclared_fails() {
        let mut symbol_table: SymbolTable = SymbolTable::new();
        assert_eq!(symbol_table.update("z", SymbolValue::Bool(true)), Err(SymbolError::Undeclared(String::from("z"))));
        assert!(symbol_table.lookup("z").is_none());
    }

    #[test]
    fn test_mutations_are_logged() {
        capture::start();
        let mut symbol_table: SymbolTable = SymbolTable::new();
        symbol_table.add("x", "Int", SymbolValue::Unset, false);
        let _ = symbol_table.update("x", SymbolValue::Number(3.0));
        let _ = symbol_table.update("w", SymbolValue::Number(3.0));

        assert_eq!(capture::take(), vec![
            String::from("[DEBUG - SYMBOLTABLE]: Adding symbol x of type Int (mutable: false)"),
            String::from("[ERROR - SYMBOLTABLE]: Cannot assign to immutable variable: x"),
            String::from("[ERROR - SYMBOLTABLE]: Cannot assign to undeclared variable: w")
        ]);
    }

    #[test]
    fn test_add_overwrites() {
        let mut symbol_table: SymbolTable = SymbolTable::new();
        symbol_table.add("s", "String", SymbolValue::Text(String::from("a")), true);
        symbol_table.add("s", "Bool", SymbolValue::Unset, false);

        assert_eq!(symbol_table.len(), 1);
        let symbol: &Symbol = symbol_table.lookup("s").unwrap();
        assert_eq!(symbol.name(), "s");
        assert_eq!(symbol.type_name(), "Bool");
        assert!(!symbol.is_mutable());
        assert!(symbol_table.update("s", SymbolValue::Bool(false)).is_err());
    }
}
