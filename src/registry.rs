//! Formula registry module.
//!
//! Provides the `FormulaRegistry` type, which owns the domain →
//! category → formula hierarchy and answers selector queries over it.

use crate::domains;
use crate::error::{CalcError, LookupKind, Result};
use crate::formula::{Category, Domain, FormulaSpec};
use serde::Serialize;
use tracing::{debug, warn};

/// The hierarchical formula table.
///
/// Domains keep their registration order, which is also the order the
/// listing calls report.
///
/// # Examples
///
/// ```rust
/// use calckit::FormulaRegistry;
///
/// let registry = FormulaRegistry::builtin();
/// let spec = registry
///     .select_formula("chemistry", "solutions", "molarity")
///     .unwrap();
/// assert_eq!(spec.name, "Molarity");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormulaRegistry {
    domains: Vec<Domain>,
}

impl FormulaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the six built-in domains.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for domain in domains::builtin() {
            if let Err(err) = registry.register_domain(domain) {
                warn!(error = %err, "skipping malformed built-in domain");
            }
        }
        registry
    }

    /// Register a domain after validating it.
    ///
    /// A domain with the same key replaces the existing one in place.
    ///
    /// # Arguments
    ///
    /// * `domain` - The domain to add
    ///
    /// # Returns
    ///
    /// * `Err(CalcError::Config)` - If a key or id is duplicated inside the domain
    pub fn register_domain(&mut self, domain: Domain) -> Result<()> {
        domain.validate()?;
        debug!(
            domain = domain.key,
            categories = domain.categories.len(),
            formulas = domain.formula_count(),
            "registering domain"
        );
        match self.domains.iter_mut().find(|d| d.key == domain.key) {
            Some(existing) => *existing = domain,
            None => self.domains.push(domain),
        }
        Ok(())
    }

    /// Domain keys and titles in registration order.
    pub fn list_domains(&self) -> Vec<(&'static str, &'static str)> {
        self.domains.iter().map(|d| (d.key, d.title)).collect()
    }

    /// Category keys and titles of a domain, in display order.
    pub fn list_categories(&self, domain: &str) -> Result<Vec<(&'static str, &'static str)>> {
        let domain = self.domain(domain)?;
        Ok(domain.categories.iter().map(|c| (c.key, c.title)).collect())
    }

    /// Formula ids and names of a category, in display order.
    pub fn list_formulas(
        &self,
        domain: &str,
        category: &str,
    ) -> Result<Vec<(&'static str, &'static str)>> {
        let category = self.category(domain, category)?;
        Ok(category.formulas.iter().map(|f| (f.id, f.name)).collect())
    }

    /// Look up a formula.
    ///
    /// Fails with `NotFound` naming the first missing key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use calckit::{CalcError, FormulaRegistry, LookupKind};
    ///
    /// let registry = FormulaRegistry::builtin();
    /// let err = registry.select_formula("alchemy", "x", "y").unwrap_err();
    /// assert_eq!(err, CalcError::not_found(LookupKind::Domain, "alchemy"));
    /// ```
    pub fn select_formula(
        &self,
        domain: &str,
        category: &str,
        formula_id: &str,
    ) -> Result<&FormulaSpec> {
        let found = self.category(domain, category)?;
        found
            .formula(formula_id)
            .inspect_err(|err| warn!(domain, category, formula_id, error = %err, "lookup rejected"))
    }

    /// Look up a domain by key.
    pub fn domain(&self, key: &str) -> Result<&Domain> {
        self.domains.iter().find(|d| d.key == key).ok_or_else(|| {
            warn!(domain = key, "unknown domain");
            CalcError::not_found(LookupKind::Domain, key)
        })
    }

    /// Look up a category within a domain.
    pub fn category(&self, domain: &str, category: &str) -> Result<&Category> {
        let found = self.domain(domain)?;
        found
            .category(category)
            .inspect_err(|err| warn!(domain, category, error = %err, "lookup rejected"))
    }

    /// Iterate over every formula with its domain and category keys.
    pub fn iter_formulas(&self) -> impl Iterator<Item = (&str, &str, &FormulaSpec)> + '_ {
        self.domains.iter().flat_map(|domain| {
            domain.categories.iter().flat_map(move |category| {
                category
                    .formulas
                    .iter()
                    .map(move |spec| (domain.key, category.key, spec))
            })
        })
    }

    /// Serializable view of the whole table, without compute functions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use calckit::FormulaRegistry;
    ///
    /// let registry = FormulaRegistry::builtin();
    /// let json = serde_json::to_value(registry.catalog()).unwrap();
    /// assert_eq!(json["domains"][0]["key"], "chemistry");
    /// ```
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog {
            domains: &self.domains,
        }
    }
}

/// Borrowed, serializable view of a registry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Catalog<'a> {
    pub domains: &'a [Domain],
}

impl Catalog<'_> {
    /// Render the catalog as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| CalcError::Config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSpec;

    fn tiny_domain(key: &'static str, title: &'static str) -> Domain {
        Domain::new(
            key,
            title,
            vec![Category::new(
                "basic",
                "Basic",
                vec![FormulaSpec {
                    id: "identity",
                    name: "Identity",
                    formula: "y = x",
                    inputs: vec![InputSpec::numeric("x", "X", "x", "")],
                    compute: |i| Ok(i.number("x")?.into()),
                    result_unit: "",
                    explanation: "",
                }],
            )],
        )
    }

    #[test]
    fn test_builtin_domain_order() {
        let registry = FormulaRegistry::builtin();
        let keys: Vec<_> = registry.list_domains().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "chemistry",
                "physics",
                "finance",
                "electricity",
                "computer-science",
                "date-time"
            ]
        );
    }

    #[test]
    fn test_not_found_names_first_missing_key() {
        let registry = FormulaRegistry::builtin();
        assert_eq!(
            registry.select_formula("chemistry", "nope", "molarity").unwrap_err(),
            CalcError::not_found(LookupKind::Category, "nope")
        );
        assert_eq!(
            registry.select_formula("chemistry", "solutions", "nope").unwrap_err(),
            CalcError::not_found(LookupKind::Formula, "nope")
        );
        assert!(registry.list_categories("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_register_replaces_same_key() {
        let mut registry = FormulaRegistry::new();
        registry.register_domain(tiny_domain("math", "Math")).unwrap();
        registry.register_domain(tiny_domain("math", "Maths")).unwrap();
        assert_eq!(registry.list_domains(), vec![("math", "Maths")]);
    }

    #[test]
    fn test_iter_formulas_covers_all() {
        let mut registry = FormulaRegistry::new();
        registry.register_domain(tiny_domain("a", "A")).unwrap();
        registry.register_domain(tiny_domain("b", "B")).unwrap();
        let paths: Vec<_> = registry
            .iter_formulas()
            .map(|(d, c, f)| format!("{}/{}/{}", d, c, f.id))
            .collect();
        assert_eq!(paths, vec!["a/basic/identity", "b/basic/identity"]);
    }

    #[test]
    fn test_catalog_json() {
        let mut registry = FormulaRegistry::new();
        registry.register_domain(tiny_domain("math", "Math")).unwrap();
        let json = registry.catalog().to_json().unwrap();
        assert!(json.contains("\"identity\""));
        assert!(!json.contains("compute"));
    }
}
