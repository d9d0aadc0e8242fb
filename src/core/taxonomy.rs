// File: src/core/taxonomy.rs
//! The static catalog of variable types.
//!
//! A variable type is a semantic decoration (a prefix and/or suffix) layered
//! on top of a casing style, e.g. `g_` for globals or `Count` for counters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::NamingError;

/// Groups variable types for the drill-down grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Basic,
    Scope,
    Purpose,
    DataType,
    Semantic,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Basic,
        Category::Scope,
        Category::Purpose,
        Category::DataType,
        Category::Semantic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Basic => "basic",
            Category::Scope => "scope",
            Category::Purpose => "purpose",
            Category::DataType => "data-type",
            Category::Semantic => "semantic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Normal,
    Global,
    Static,
    Member,
    Const,
    Array,
    Pointer,
    Function,
    Invalid,
    Handle,
    Int,
    Long,
    Short,
    Byte,
    Word,
    Unsigned,
    Float,
    Double,
    Real,
    Bool,
    String,
    Char,
    Dword,
    Count,
}

/// Static description of one variable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub description: &'static str,
    pub category: Category,
}

const fn desc(
    id: &'static str,
    name: &'static str,
    prefix: &'static str,
    suffix: &'static str,
    description: &'static str,
    category: Category,
) -> TypeDescriptor {
    TypeDescriptor { id, name, prefix, suffix, description, category }
}

impl VariableType {
    /// Catalog order, grouped by category.
    pub const ALL: [VariableType; 24] = [
        VariableType::Normal,
        VariableType::Global,
        VariableType::Static,
        VariableType::Member,
        VariableType::Const,
        VariableType::Array,
        VariableType::Pointer,
        VariableType::Function,
        VariableType::Invalid,
        VariableType::Handle,
        VariableType::Int,
        VariableType::Long,
        VariableType::Short,
        VariableType::Byte,
        VariableType::Word,
        VariableType::Unsigned,
        VariableType::Float,
        VariableType::Double,
        VariableType::Real,
        VariableType::Bool,
        VariableType::String,
        VariableType::Char,
        VariableType::Dword,
        VariableType::Count,
    ];

    pub fn descriptor(self) -> TypeDescriptor {
        use Category::*;
        match self {
            VariableType::Normal => desc("normal", "Plain variable", "", "", "general variable", Basic),
            VariableType::Global => desc("global", "Global variable", "g_", "", "global scope variable", Scope),
            VariableType::Static => desc("static", "Static variable", "s_", "", "static variable", Scope),
            VariableType::Member => desc("member", "Class member", "m_", "", "C++ class member", Scope),
            VariableType::Const => desc("const", "Constant", "", "", "constant value", Purpose),
            VariableType::Array => desc("array", "Array", "", "Array", "array variable", Purpose),
            VariableType::Pointer => desc("pointer", "Pointer", "p", "", "pointer variable", Purpose),
            VariableType::Function => desc("function", "Function", "", "", "function name", Purpose),
            VariableType::Invalid => desc("invalid", "Invalid value", "invalid", "", "invalid sentinel", Purpose),
            VariableType::Handle => desc("handle", "Handle", "h", "", "handle variable", Purpose),
            VariableType::Int => desc("int", "Integer", "n", "", "integer variable", DataType),
            VariableType::Long => desc("long", "Long integer", "l", "", "long integer variable", DataType),
            VariableType::Short => desc("short", "Short integer", "s", "", "short integer variable", DataType),
            VariableType::Byte => desc("byte", "Byte", "by", "", "byte variable", DataType),
            VariableType::Word => desc("word", "Word", "w", "", "word variable", DataType),
            VariableType::Unsigned => desc("unsigned", "Unsigned", "u", "", "unsigned variable", DataType),
            VariableType::Float => desc("float", "Float", "f", "", "floating point variable", DataType),
            VariableType::Double => desc("double", "Double", "d", "", "double precision variable", DataType),
            VariableType::Real => desc("real", "Real", "r", "", "real number variable", DataType),
            VariableType::Bool => desc("bool", "Boolean", "b", "", "boolean variable", DataType),
            VariableType::String => desc("string", "String", "str", "", "string variable", DataType),
            VariableType::Char => desc("char", "Character", "c", "", "character variable", DataType),
            VariableType::Dword => desc("dword", "Double word", "dw", "", "double word variable", DataType),
            VariableType::Count => desc("count", "Counter", "", "Count", "counter variable", Semantic),
        }
    }

    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    pub fn category(self) -> Category {
        self.descriptor().category
    }

    /// Types whose result is forced into constant shape regardless of style.
    pub fn forces_constant_shape(self) -> bool {
        self == VariableType::Const
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for VariableType {
    type Err = NamingError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        VariableType::ALL
            .into_iter()
            .find(|ty| ty.id() == id)
            .ok_or_else(|| NamingError::unknown_type(id))
    }
}
