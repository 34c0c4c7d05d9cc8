//! Dependency-order validation.
//!
//! Advisory only: the dependency table is maintained by hand next to the
//! module list and may drift, so misordering is reported, never fatal.

use gsbundle_diagnostics::{messages, Diagnostic};
use indexmap::IndexMap;
use std::fmt;

/// A declared dependency that is not satisfied by the load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyWarning {
    /// The dependency is not in the module list at all.
    NotInBuildList { unit: String, dependency: String },
    /// The dependency loads at or after the unit that needs it.
    LoadedLater {
        unit: String,
        unit_index: usize,
        dependency: String,
        dependency_index: usize,
    },
}

impl DependencyWarning {
    pub fn unit(&self) -> &str {
        match self {
            DependencyWarning::NotInBuildList { unit, .. } => unit,
            DependencyWarning::LoadedLater { unit, .. } => unit,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DependencyWarning::NotInBuildList { unit, dependency } => Diagnostic::with_file(
                unit.clone(),
                &messages::_0_DEPENDS_ON_1_WHICH_IS_NOT_IN_BUILD_LIST,
                &[unit.as_str(), dependency.as_str()],
            ),
            DependencyWarning::LoadedLater {
                unit,
                unit_index,
                dependency,
                dependency_index,
            } => {
                let unit_index = unit_index.to_string();
                let dependency_index = dependency_index.to_string();
                Diagnostic::with_file(
                    unit.clone(),
                    &messages::_0_INDEX_1_DEPENDS_ON_2_INDEX_3_WHICH_IS_LOADED_LATER,
                    &[unit.as_str(), unit_index.as_str(), dependency.as_str(), dependency_index.as_str()],
                )
            }
        }
    }
}

impl fmt::Display for DependencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_diagnostic().message_text)
    }
}

/// Check every declared edge `unit -> dependency` against the module order.
///
/// Warnings come out in module-list order, then in the order the
/// dependencies are declared. Table entries for units that are not in the
/// list are ignored.
pub fn validate_dependency_order(
    modules: &[&str],
    dependencies: &IndexMap<String, Vec<String>>,
) -> Vec<DependencyWarning> {
    let index_of = |name: &str| modules.iter().position(|m| *m == name);
    let mut warnings = Vec::new();

    for (unit_index, unit) in modules.iter().enumerate() {
        let Some(deps) = dependencies.get(*unit) else {
            continue;
        };
        for dependency in deps {
            match index_of(dependency.as_str()) {
                None => warnings.push(DependencyWarning::NotInBuildList {
                    unit: unit.to_string(),
                    dependency: dependency.clone(),
                }),
                Some(dependency_index) if dependency_index >= unit_index => {
                    warnings.push(DependencyWarning::LoadedLater {
                        unit: unit.to_string(),
                        unit_index,
                        dependency: dependency.clone(),
                        dependency_index,
                    })
                }
                Some(_) => {}
            }
        }
    }

    tracing::debug!(warnings = warnings.len(), "validated dependency order");
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(edges: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        edges
            .iter()
            .map(|(unit, deps)| (unit.to_string(), deps.iter().map(|d| d.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_correct_order_has_no_warnings() {
        let deps = table(&[("B.gs", &["A.gs"]), ("C.gs", &["A.gs", "B.gs"])]);
        assert!(validate_dependency_order(&["A.gs", "B.gs", "C.gs"], &deps).is_empty());
    }

    #[test]
    fn test_dependency_loaded_later() {
        let deps = table(&[("A.gs", &["B.gs"])]);
        let warnings = validate_dependency_order(&["A.gs", "B.gs"], &deps);
        assert_eq!(
            warnings,
            vec![DependencyWarning::LoadedLater {
                unit: "A.gs".to_string(),
                unit_index: 0,
                dependency: "B.gs".to_string(),
                dependency_index: 1,
            }]
        );
        assert_eq!(
            warnings[0].to_string(),
            "A.gs (index 0) depends on B.gs (index 1), but B.gs is loaded later"
        );
    }

    #[test]
    fn test_self_dependency_is_flagged() {
        let deps = table(&[("A.gs", &["A.gs"])]);
        let warnings = validate_dependency_order(&["A.gs"], &deps);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], DependencyWarning::LoadedLater { dependency_index: 0, .. }));
    }

    #[test]
    fn test_dependency_not_in_build_list() {
        let deps = table(&[("B.gs", &["Gone.gs"])]);
        let warnings = validate_dependency_order(&["A.gs", "B.gs"], &deps);
        assert_eq!(
            warnings[0].to_string(),
            "B.gs depends on Gone.gs, but Gone.gs is not in build list"
        );
        assert_eq!(warnings[0].unit(), "B.gs");
    }

    #[test]
    fn test_entries_for_unlisted_units_are_ignored() {
        let deps = table(&[("Nowhere.gs", &["Also.gs"])]);
        assert!(validate_dependency_order(&["A.gs"], &deps).is_empty());
    }

    #[test]
    fn test_warnings_follow_module_order() {
        let deps = table(&[("C.gs", &["X.gs"]), ("A.gs", &["Y.gs"])]);
        let warnings = validate_dependency_order(&["A.gs", "B.gs", "C.gs"], &deps);
        let units: Vec<_> = warnings.iter().map(DependencyWarning::unit).collect();
        assert_eq!(units, vec!["A.gs", "C.gs"]);
    }
}
