use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use quell_model::{JoinQuery, Query, QueryId, Value};

use super::constants::PARAM_PREFIX;
use crate::schema::ValueOverride;
use crate::sql::{ColumnsSelection, ParamSink};

/// Per-compilation mutable state: the parameter counter, the alias ledger,
/// the seen-set used to resolve join direction, and the record of selected
/// columns. A scope is owned by exactly one compilation pass and is never
/// shared across concurrent compilations.
pub(crate) struct Scope<'a> {
    overrides: &'a dyn ValueOverride,
    params: IndexMap<String, Value>,
    arg_index: usize,
    /// How many auto-aliased query instances share each table name. Tables
    /// appearing more than once get deterministic `tablename0`, `tablename1`
    /// aliases in participation order.
    table_counts: HashMap<String, usize>,
    next_suffix: HashMap<String, usize>,
    assigned: HashMap<QueryId, String>,
    used_aliases: HashSet<String>,
    /// Queries introduced into the FROM clause, with their aliases, in
    /// introduction order.
    introduced: Vec<(Query, String)>,
    seen: HashMap<QueryId, String>,
    selections: Vec<ColumnsSelection>,
}

impl<'a> Scope<'a> {
    pub fn new(overrides: &'a dyn ValueOverride, source: &JoinQuery) -> Self {
        let mut counted = HashSet::new();
        let mut table_counts = HashMap::<String, usize>::new();
        let mut count = |query: &Query| {
            if counted.insert(query.id()) && query.alias().is_none() {
                *table_counts.entry(query.table_name().to_owned()).or_default() += 1;
            }
        };
        count(source.primary());
        for element in source.joins() {
            count(&element.referer);
            count(&element.referred);
        }
        for check in source.exists_checks() {
            count(&check.referer);
            count(&check.referred);
        }
        Self {
            overrides,
            params: IndexMap::new(),
            arg_index: 0,
            table_counts,
            next_suffix: HashMap::new(),
            assigned: HashMap::new(),
            used_aliases: HashSet::new(),
            introduced: Vec::new(),
            seen: HashMap::new(),
            selections: Vec::new(),
        }
    }

    /// Bind a field value to the next generated parameter and return its
    /// placeholder (`:argN`). The counter is monotonic across the whole
    /// compilation pass, so a field appearing many times (or across nested
    /// disjunctions) still gets unique names.
    pub fn next_param(&mut self, table: &str, field: &str, value: Value) -> String {
        let value = self.overrides.rewrite(table, field, value);
        let name = format!("{PARAM_PREFIX}{}", self.arg_index);
        self.arg_index += 1;
        let placeholder = format!(":{name}");
        self.params.insert(name, value);
        placeholder
    }

    /// Assign (or recall) the alias of a query, without marking it part of
    /// the FROM clause. Used for existence-check subqueries, which need an
    /// unambiguous name but never join the outer query.
    pub fn assign_alias(&mut self, query: &Query) -> String {
        if let Some(alias) = self.assigned.get(&query.id()) {
            return alias.clone();
        }
        let table = query.table_name();
        let alias = match query.alias() {
            Some(explicit) => explicit.to_owned(),
            None => {
                let collides = self.table_counts.get(table).copied().unwrap_or(0) > 1
                    || self.used_aliases.contains(table);
                if collides {
                    self.suffixed(table)
                } else {
                    table.to_owned()
                }
            }
        };
        self.used_aliases.insert(alias.clone());
        self.assigned.insert(query.id(), alias.clone());
        alias
    }

    fn suffixed(&mut self, table: &str) -> String {
        loop {
            let index = self.next_suffix.entry(table.to_owned()).or_default();
            let candidate = format!("{table}{index}");
            *index += 1;
            if !self.used_aliases.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Assign an alias and mark the query as introduced into the FROM clause.
    pub fn introduce(&mut self, query: &Query) -> String {
        let alias = self.assign_alias(query);
        self.seen.insert(query.id(), alias.clone());
        self.introduced.push((query.clone(), alias.clone()));
        alias
    }

    /// The alias of a query already introduced into the FROM clause.
    pub fn seen_alias(&self, query: &Query) -> Option<&str> {
        self.seen.get(&query.id()).map(String::as_str)
    }

    pub fn introduced_queries(&self) -> Vec<(Query, String)> {
        self.introduced.clone()
    }

    pub fn push_selection(&mut self, selection: ColumnsSelection) {
        self.selections.push(selection);
    }

    /// The projection label under which `column_name` of the query aliased
    /// `alias` was explicitly selected, if it was.
    pub fn label_for(&self, alias: &str, column_name: &str) -> Option<&str> {
        self.selections
            .iter()
            .filter(|s| s.alias == alias && !s.wildcard)
            .find_map(|s| s.label_of(column_name))
    }

    pub fn into_output(self) -> (IndexMap<String, Value>, Vec<ColumnsSelection>) {
        (self.params, self.selections)
    }
}

impl ParamSink for Scope<'_> {
    fn bind(&mut self, name: &str, value: Value) {
        self.params.insert(name.to_owned(), value);
    }
}
