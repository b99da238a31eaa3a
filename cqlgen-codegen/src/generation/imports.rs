//! Import collection.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Tracks imports and deduplicates them.
///
/// Modules keep insertion order; symbols within a module are sorted.
///
/// ```
/// use cqlgen_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("scylla", "Session");
/// imports.add("scylla::query", "Query");
/// imports.add_path("crate::models::User");
///
/// let modules: Vec<&str> = imports.iter().map(|(m, _)| m).collect();
/// assert_eq!(modules, vec!["scylla", "scylla::query", "crate::models"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    /// Module path -> set of symbols
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Add a module import without specific symbols (`use tracing;`).
    pub fn add_module(&mut self, module: &str) {
        self.imports.entry(module.to_string()).or_default();
    }

    /// Add a full `a::b::C` path, splitting the last segment off as the symbol.
    ///
    /// A path without `::` is imported as a module.
    pub fn add_path(&mut self, path: &str) {
        let path = path.trim().trim_end_matches(';');
        match path.rsplit_once("::") {
            Some((module, symbol)) if !module.is_empty() && !symbol.is_empty() => {
                self.add(module, symbol)
            }
            _ => self.add_module(path),
        }
    }

    pub fn has_module(&self, module: &str) -> bool {
        self.imports.contains_key(module)
    }

    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}
