//! Validator registry: kind name to validator, plus named mappers.

use crate::error::{Result, RuleSetError};
use crate::mapper::{builtin_mappers, Mapper};
use crate::options::{Options, MAPPER_KEY};
use crate::rule::FieldRule;
use crate::validator::{FieldCheck, Validator};
use crate::validators::builtin_validators;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Registry of validator kinds and value mappers.
///
/// A registry is an ordinary value: build one at startup, register any custom
/// kinds, then pass it by reference to every validation call. Registering an
/// existing name replaces the previous entry, which is how built-ins are
/// overridden.
///
/// ```
/// use rulebook::{validators::Pattern, Registry};
///
/// let mut registry = Registry::default();
/// registry.register("postcode", Pattern::with_default(r"^\d{6}$"));
/// assert!(registry.contains("postcode"));
/// assert!(registry.contains("email"));
/// ```
#[derive(Clone)]
pub struct Registry {
    validators: HashMap<String, Arc<dyn Validator>>,
    mappers: HashMap<String, Mapper>,
}

impl Registry {
    /// Create an empty registry with no kinds or mappers.
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
            mappers: HashMap::new(),
        }
    }

    /// Create a registry with every built-in kind and mapper.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    fn register_builtins(&mut self) {
        for (kind, validator) in builtin_validators() {
            self.validators.insert(kind.to_string(), validator);
        }
        for (name, mapper) in builtin_mappers() {
            self.mappers.insert(name.to_string(), mapper);
        }
        debug!(
            kinds = self.validators.len(),
            mappers = self.mappers.len(),
            "registered built-in validators"
        );
    }

    /// Register a validator under a kind name.
    pub fn register(&mut self, kind: impl Into<String>, validator: impl Validator + 'static) -> &mut Self {
        self.register_shared(kind, Arc::new(validator))
    }

    /// Register an already shared validator under a kind name.
    pub fn register_shared(&mut self, kind: impl Into<String>, validator: Arc<dyn Validator>) -> &mut Self {
        let kind = kind.into();
        debug!(kind = %kind, validator = ?validator, "registering validator");
        self.validators.insert(kind, validator);
        self
    }

    /// Register a mapper that `filter` rules can name in their `mapper` option.
    pub fn register_mapper<F>(&mut self, name: impl Into<String>, mapper: F) -> &mut Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(mapper = %name, "registering mapper");
        self.mappers.insert(name, Arc::new(mapper));
        self
    }

    /// Get a validator by kind.
    pub fn get(&self, kind: &str) -> Option<Arc<dyn Validator>> {
        self.validators.get(kind).cloned()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.validators.contains_key(kind)
    }

    /// Get a mapper by name.
    pub fn mapper(&self, name: &str) -> Option<Mapper> {
        self.mappers.get(name).cloned()
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.validators.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Registered mapper names, sorted.
    pub fn mapper_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.mappers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate the validator of `kind` bound to a field and its value.
    pub fn create(&self, kind: &str, field: &str, value: Value) -> Result<FieldCheck> {
        if field.is_empty() {
            return Err(RuleSetError::config("field name is empty"));
        }
        let validator = self
            .get(kind)
            .ok_or_else(|| RuleSetError::UnknownValidatorKind(kind.to_string()))?;
        Ok(FieldCheck::new(kind, field, value, validator))
    }

    /// Resolve a rule's options against this registry: check the kind exists
    /// and replace a named `mapper` with the registered function.
    pub(crate) fn resolve(&self, rule: &FieldRule) -> Result<Options> {
        if !self.contains(&rule.kind) {
            return Err(RuleSetError::UnknownValidatorKind(rule.kind.clone()));
        }

        let mut options = rule.options.clone();
        match options.remove(MAPPER_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::String(name)) => {
                let mapper = self.mapper(&name).ok_or_else(|| {
                    RuleSetError::config(format!("unknown mapper '{name}' in '{}' rule", rule.kind))
                })?;
                options.set_mapper(mapper);
            }
            Some(other) => {
                return Err(RuleSetError::config(format!(
                    "mapper must be a registered name, got {other}"
                )));
            }
        }
        Ok(options)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("validators", &self.kinds())
            .field("mappers", &self.mapper_names())
            .finish()
    }
}
