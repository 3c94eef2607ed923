use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use thiserror::Error;

use crate::interpreter::value::Value;

/// Index of a scope inside an [`Environment`].
///
/// Scopes nest strictly, so the index is also the nesting level: the global
/// scope is always `ScopeId(0)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The outermost scope, which is never removed.
    pub const GLOBAL: Self = Self(0);

    /// Nesting level of the scope; `0` for the global scope.
    #[must_use]
    pub const fn level(self) -> usize {
        self.0
    }
}

/// A single lexical scope: its own bindings and a link to the scope around it.
#[derive(Debug, Clone, Default)]
struct Scope {
    values:    HashMap<String, Value>,
    enclosing: Option<ScopeId>,
}

/// Assignment to a name that has no binding in any reachable scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("undefined variable '{0}'")]
pub struct Unbound(pub String);

/// Chain of scopes mapping variable names to values.
///
/// Scopes live in an arena owned by the environment. Entering a block pushes
/// a child of the current scope; leaving it pops the child again and makes
/// its parent current. Lookups start at the current scope and walk the
/// enclosing links outward.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes:  Vec<Scope>,
    current: ScopeId,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only an empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes:  vec![Scope::default()],
               current: ScopeId::GLOBAL, }
    }

    /// The scope new bindings are written to.
    #[must_use]
    pub const fn current(&self) -> ScopeId {
        self.current
    }

    /// Binds `name` in the current scope, replacing any binding of the same
    /// name in that scope. Outer bindings of `name` are shadowed, not touched.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.get_mut(self.current.0) {
            scope.values.insert(name.to_string(), value);
        }
    }

    /// Looks `name` up in the current scope, then outward.
    ///
    /// # Example
    /// ```
    /// use minijs::interpreter::{environment::Environment, value::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define("x", Value::Number(1.0));
    /// env.push_scope();
    /// env.define("x", Value::from("inner"));
    ///
    /// assert_eq!(env.get("x"), Some(&Value::from("inner")));
    /// env.pop_scope();
    /// assert_eq!(env.get("x"), Some(&Value::Number(1.0)));
    /// assert_eq!(env.get("y"), None);
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.resolve(name)
            .and_then(|id| self.scopes.get(id.0))
            .and_then(|scope| scope.values.get(name))
    }

    /// Overwrites the nearest existing binding of `name`.
    ///
    /// # Errors
    /// [`Unbound`] if no scope in the chain binds `name`. Nothing is created
    /// in that case.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), Unbound> {
        let id = self.resolve(name)
                     .ok_or_else(|| Unbound(name.to_string()))?;
        if let Some(scope) = self.scopes.get_mut(id.0) {
            scope.values.insert(name.to_string(), value);
        }
        Ok(())
    }

    /// Enters a new child of the current scope and makes it current.
    pub fn push_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope { values:    HashMap::new(),
                                 enclosing: Some(self.current), });
        self.current = id;
        id
    }

    /// Leaves the current scope, discarding its bindings. The global scope is
    /// never removed.
    pub fn pop_scope(&mut self) {
        if self.current == ScopeId::GLOBAL {
            return;
        }
        if let Some(scope) = self.scopes.pop() {
            self.current = scope.enclosing.unwrap_or(ScopeId::GLOBAL);
        }
    }

    /// Captures the current scope chain for display.
    #[must_use]
    pub fn snapshot(&self) -> EnvironmentSnapshot {
        self.snapshot_from(self.current, 0)
    }

    fn snapshot_from(&self, id: ScopeId, depth: usize) -> EnvironmentSnapshot {
        let scope = self.scopes.get(id.0);
        let variables = scope.into_iter()
                             .flat_map(|s| &s.values)
                             .map(|(name, value)| (name.clone(), value.render()))
                             .collect();
        let enclosing = scope.and_then(|s| s.enclosing)
                             .map(|parent| Box::new(self.snapshot_from(parent, depth + 1)));

        EnvironmentSnapshot { depth,
                              name: if id == ScopeId::GLOBAL {
                                  "Global Scope".to_string()
                              } else {
                                  format!("Scope {}", id.level())
                              },
                              variables,
                              enclosing }
    }

    fn resolve(&self, name: &str) -> Option<ScopeId> {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            let scope = self.scopes.get(id.0)?;
            if scope.values.contains_key(name) {
                return Some(id);
            }
            cursor = scope.enclosing;
        }
        None
    }
}

/// A read-only picture of a scope chain, innermost scope first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentSnapshot {
    /// Distance from the scope the snapshot was taken in; `0` for that scope.
    pub depth:     usize,
    /// `"Global Scope"` for the outermost scope, `"Scope N"` for a scope
    /// nested `N` levels deep.
    pub name:      String,
    /// Each binding's rendered value, sorted by name.
    pub variables: BTreeMap<String, String>,
    /// The next scope outward, if any.
    pub enclosing: Option<Box<Self>>,
}

impl EnvironmentSnapshot {
    /// Returns the rendered value of `name` in this scope only.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    fn write_indented(&self, f: &mut std::fmt::Formatter<'_>, level: usize) -> std::fmt::Result {
        let indent = "  ".repeat(level);
        writeln!(f, "{indent}{}:", self.name)?;
        for (name, value) in &self.variables {
            writeln!(f, "{indent}  {name}: {value}")?;
        }
        if let Some(enclosing) = &self.enclosing {
            writeln!(f)?;
            enclosing.write_indented(f, level + 1)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for EnvironmentSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_indented(f, 0)
    }
}
