//! Textual rendering of AST nodes.
//!
//! Rendering produces source the parser accepts again. Scope keywords of
//! `target_sources` are not kept in the AST, so every item is rendered under
//! `PRIVATE`.

use std::fmt;

use super::{
    AddExecutable, AddLibrary, CMakeStringList, ListItem, ListItemString, SetNormalVariable,
    Statement, TargetSources, VariableUse,
};

impl fmt::Display for VariableUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}}}", self.name)
    }
}

impl fmt::Display for ListItemString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListItem::VariableUse(variable) => variable.fmt(f),
            ListItem::String(string) => string.fmt(f),
        }
    }
}

impl fmt::Display for CMakeStringList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            item.fmt(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for SetNormalVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set({} {})", self.var_name, self.list)
    }
}

impl fmt::Display for AddLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "add_library({} {})", self.library_name, self.list)
    }
}

impl fmt::Display for AddExecutable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "add_executable({} {})", self.executable_name, self.list)
    }
}

impl fmt::Display for TargetSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target_sources({} PRIVATE {})", self.target_name, self.list)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::SetNormalVariable(node) => node.fmt(f),
            Statement::AddLibrary(node) => node.fmt(f),
            Statement::AddExecutable(node) => node.fmt(f),
            Statement::TargetSources(node) => node.fmt(f),
        }
    }
}
