//! registry.rs
//!
//! The function registry (component C5): stores named single-date
//! producers and date iterators, and flattens them into a
//! [`NamedDateTable`] for a given year. Grounded in the teacher's
//! `scripting.rs` registry shape (a name-keyed map of boxed callables),
//! but scoped to an owned [`FunctionRegistry`] value rather than a
//! process-global `static` — the spec calls for one registry per caller
//! (`create_registry` returns a fresh value), not a shared table.
//!
//! Producer identity is an explicit tagged enum ([`Producer`]) rather
//! than a runtime attribute probed off an arbitrary callable, replacing
//! the marker-attribute duck typing of the original's decorator-based
//! discovery.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::date::MaybeDate;
use crate::easter::{easter, easter_julian, easter_orthodox};
use crate::error::RegistrationError;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]([-_.]?[A-Za-z0-9])*$").unwrap());

/// A mapping from name to `MaybeDate`, built once per year evaluation and
/// then treated as immutable for the lifetime of a derived parser
/// (`spec` §3 "NamedDateTable", §5 "Resource lifetimes").
#[derive(Debug, Clone, Default)]
pub struct NamedDateTable(HashMap<String, MaybeDate>);

impl NamedDateTable {
    pub fn new() -> Self {
        NamedDateTable(HashMap::new())
    }

    /// Inserts `name -> value`, rejecting names that do not match
    /// `[A-Za-z]([-_.]?[A-Za-z0-9])*`. Later writes win on collision; no
    /// error is raised for a repeated, validly-shaped name.
    pub fn insert(&mut self, name: String, value: MaybeDate) -> Result<(), RegistrationError> {
        if !NAME_PATTERN.is_match(&name) {
            return Err(RegistrationError::InvalidName { name });
        }
        self.0.insert(name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<MaybeDate> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MaybeDate)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// A named date-producing unit, installed into a [`FunctionRegistry`].
///
/// This is the explicit tagged variant the design calls for in place of
/// a runtime-probed marker attribute: a producer is either a single-date
/// function (`year -> MaybeDate`) or a date iterator (`year -> sequence
/// of (name, MaybeDate)`), never an arbitrary object inspected for a
/// decoration at registration time.
pub enum Producer {
    SingleDate {
        name: String,
        func: Box<dyn Fn(i32) -> MaybeDate>,
    },
    Iterator {
        func: Box<dyn Fn(i32) -> Box<dyn Iterator<Item = (String, MaybeDate)>>>,
    },
}

impl Producer {
    pub fn single_date(name: impl Into<String>, func: impl Fn(i32) -> MaybeDate + 'static) -> Self {
        Producer::SingleDate {
            name: name.into(),
            func: Box::new(func),
        }
    }

    pub fn iterator(
        func: impl Fn(i32) -> Box<dyn Iterator<Item = (String, MaybeDate)>> + 'static,
    ) -> Self {
        Producer::Iterator { func: Box::new(func) }
    }
}

/// A compile-time-built declaration, the Rust-idiomatic replacement for
/// scanning an external namespace's attributes at runtime
/// (`add_from_module` in `spec` §4.5). Callers assemble a `&[ProducerDecl]`
/// from whatever module-level table they control.
pub struct ProducerDecl {
    pub producer: Producer,
}

/// A source of plugin entries published under the group identifier
/// `annual`. Host-platform entry-point discovery (the original's
/// `importlib.metadata.entry_points(group="annual")`) has no portable
/// Rust equivalent without a dedicated plugin-loading dependency that no
/// retrieved example depends on; callers that need real discovery supply
/// their own implementation. The default used by `create_registry`
/// yields nothing, matching "plugin discovery is out of scope" (`spec`
/// §1).
pub trait PluginSource {
    /// Returns `(entry_name, declarations)` pairs for every discovered
    /// plugin entry.
    fn entries(&self) -> Vec<(String, Vec<ProducerDecl>)>;
}

/// The default, empty plugin source.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPlugins;

impl PluginSource for NoPlugins {
    fn entries(&self) -> Vec<(String, Vec<ProducerDecl>)> {
        Vec::new()
    }
}

/// Stores single-date functions and date iterators keyed by name, and
/// flattens them into a [`NamedDateTable`] for a requested year
/// (`spec` §4.5).
#[derive(Default)]
pub struct FunctionRegistry {
    single_date: HashMap<String, Box<dyn Fn(i32) -> MaybeDate>>,
    iterators: Vec<Box<dyn Fn(i32) -> Box<dyn Iterator<Item = (String, MaybeDate)>>>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        FunctionRegistry {
            single_date: HashMap::new(),
            iterators: Vec::new(),
        }
    }

    /// A registry pre-populated with the three built-in Easter producers
    /// (`spec` §4.2: "All Easter functions are members of the public
    /// registry").
    pub fn with_builtins() -> Self {
        let mut registry = FunctionRegistry::new();
        registry.add_date_function("easter", easter);
        registry.add_date_function("easter_orthodox", easter_orthodox);
        registry.add_date_function("easter_julian", easter_julian);
        registry
    }

    pub fn add_date_function(&mut self, name: impl Into<String>, func: impl Fn(i32) -> MaybeDate + 'static) {
        self.single_date.insert(name.into(), Box::new(func));
    }

    pub fn add_date_iterator(
        &mut self,
        iter: impl Fn(i32) -> Box<dyn Iterator<Item = (String, MaybeDate)>> + 'static,
    ) {
        self.iterators.push(Box::new(iter));
    }

    fn add_producer(&mut self, producer: Producer) {
        match producer {
            Producer::SingleDate { name, func } => {
                self.single_date.insert(name, func);
            }
            Producer::Iterator { func } => {
                self.iterators.push(func);
            }
        }
    }

    /// Installs every declaration from a compile-time-built table.
    pub fn add_from_module(&mut self, decls: Vec<ProducerDecl>) {
        for decl in decls {
            self.add_producer(decl.producer);
        }
    }

    /// Enumerates plugin entries from `source`, filtering entry names by
    /// `include` (if non-empty, only listed entries are considered) and
    /// then `exclude` (drops matches), and installs the survivors'
    /// declarations.
    pub fn add_from_plugins(
        &mut self,
        source: &dyn PluginSource,
        include: &[&str],
        exclude: &[&str],
    ) -> Result<(), RegistrationError> {
        for (name, decls) in source.entries() {
            if !include.is_empty() && !include.contains(&name.as_str()) {
                continue;
            }
            if exclude.contains(&name.as_str()) {
                continue;
            }
            self.add_from_module(decls);
        }
        Ok(())
    }

    /// Runs every single-date function and flattens every iterator for
    /// `year`, producing the resulting table. Execution order is
    /// unspecified; name collisions resolve with later writes winning.
    pub fn evaluate(&self, year: i32) -> NamedDateTable {
        let mut table = NamedDateTable::new();
        for (name, func) in &self.single_date {
            let _ = table.insert(name.clone(), func(year));
        }
        for iter_fn in &self.iterators {
            for (name, value) in iter_fn(year) {
                let _ = table.insert(name, value);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;
    use crate::model::Month;

    #[test]
    fn named_date_table_rejects_malformed_names() {
        let mut table = NamedDateTable::new();
        assert!(table.insert("ok-name_1".to_string(), None).is_ok());
        assert!(table.insert("-bad".to_string(), None).is_err());
        assert!(table.insert("".to_string(), None).is_err());
    }

    #[test]
    fn later_write_wins_on_collision() {
        let mut table = NamedDateTable::new();
        table.insert("d".to_string(), None).unwrap();
        table
            .insert("d".to_string(), Date::new(2024, Month::January, 1))
            .unwrap();
        assert!(table.get("d").unwrap().is_some());
    }

    #[test]
    fn with_builtins_registers_easter_family() {
        let registry = FunctionRegistry::with_builtins();
        let table = registry.evaluate(2024);
        assert_eq!(table.get("easter").unwrap().unwrap().day(), 31);
        assert!(table.get("easter_orthodox").is_some());
        assert!(table.get("easter_julian").is_some());
    }

    #[test]
    fn add_date_function_overrides_by_name() {
        let mut registry = FunctionRegistry::with_builtins();
        registry.add_date_function("easter", |_year| Date::new(1999, Month::January, 1));
        let table = registry.evaluate(2024);
        assert_eq!(table.get("easter").unwrap().unwrap().year(), 1999);
    }

    #[test]
    fn add_date_iterator_flattens_multiple_pairs() {
        let mut registry = FunctionRegistry::new();
        registry.add_date_iterator(|year| {
            Box::new(
                vec![
                    ("a".to_string(), Date::new(year, Month::January, 1)),
                    ("b".to_string(), None),
                ]
                .into_iter(),
            )
        });
        let table = registry.evaluate(2024);
        assert_eq!(table.len(), 2);
        assert!(table.get("a").unwrap().is_some());
        assert!(table.get("b").unwrap().is_none());
    }

    #[test]
    fn add_from_module_installs_an_iterator_producer() {
        let mut registry = FunctionRegistry::new();
        let decls = vec![ProducerDecl {
            producer: Producer::iterator(|year| {
                Box::new(
                    vec![
                        ("c".to_string(), Date::new(year, Month::January, 4)),
                        ("d".to_string(), None),
                    ]
                    .into_iter(),
                )
            }),
        }];
        registry.add_from_module(decls);
        let table = registry.evaluate(2024);
        assert!(table.get("c").unwrap().is_some());
        assert!(table.get("d").unwrap().is_none());
    }

    struct FakePlugins;
    impl PluginSource for FakePlugins {
        fn entries(&self) -> Vec<(String, Vec<ProducerDecl>)> {
            vec![
                (
                    "alpha".to_string(),
                    vec![ProducerDecl {
                        producer: Producer::single_date("alpha_date", |year| {
                            Date::new(year, Month::January, 2)
                        }),
                    }],
                ),
                (
                    "beta".to_string(),
                    vec![ProducerDecl {
                        producer: Producer::single_date("beta_date", |year| {
                            Date::new(year, Month::January, 3)
                        }),
                    }],
                ),
            ]
        }
    }

    #[test]
    fn add_from_plugins_applies_include_then_exclude() {
        let mut registry = FunctionRegistry::new();
        registry
            .add_from_plugins(&FakePlugins, &["alpha", "beta"], &["beta"])
            .unwrap();
        let table = registry.evaluate(2024);
        assert!(table.get("alpha_date").is_some());
        assert!(table.get("beta_date").is_none());
    }

    #[test]
    fn add_from_plugins_with_empty_include_considers_everything() {
        let mut registry = FunctionRegistry::new();
        registry.add_from_plugins(&FakePlugins, &[], &[]).unwrap();
        let table = registry.evaluate(2024);
        assert!(table.get("alpha_date").is_some());
        assert!(table.get("beta_date").is_some());
    }

    #[test]
    fn no_plugins_source_yields_nothing() {
        let mut registry = FunctionRegistry::new();
        registry.add_from_plugins(&NoPlugins, &[], &[]).unwrap();
        assert!(registry.evaluate(2024).is_empty());
    }
}
