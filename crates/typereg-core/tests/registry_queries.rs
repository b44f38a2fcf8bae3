use std::collections::HashSet;
use std::sync::Arc;

use typereg_core::prelude::*;

#[derive(Debug)]
struct NodeType {
    identifier: String,
    version: Version,
    label: &'static str,
}

impl TypeDefinition for NodeType {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn version(&self) -> Version {
        self.version
    }
}

fn node(identifier: &str, major: u32, minor: u32) -> Arc<NodeType> {
    Arc::new(NodeType {
        identifier: identifier.to_string(),
        version: Version::new(major, minor),
        label: "",
    })
}

fn scenario_registry() -> TypeRegistry<NodeType> {
    let mut registry = TypeRegistry::new();
    registry.register(node("a.B", 1, 0)).unwrap();
    registry.register(node("a.B", 2, 0)).unwrap();
    registry.register(node("a.C", 1, 0)).unwrap();
    registry
}

#[test]
fn end_to_end_scenario() {
    let registry = scenario_registry();

    assert_eq!(registry.latest("a.B").unwrap().version(), Version::new(2, 0));
    assert_eq!(
        registry.exact("a.B", Version::new(1, 0)).unwrap().version(),
        Version::new(1, 0)
    );

    let spec = VersionSpecifier::parse("=1.5").unwrap();
    assert!(registry.matching("a.B", &spec).unwrap_err().is_not_found());

    let listed: HashSet<(String, Version)> = registry
        .latest_per_identifier()
        .iter()
        .map(|t| (t.identifier().to_string(), t.version()))
        .collect();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&("a.B".to_string(), Version::new(2, 0))));
    assert!(listed.contains(&("a.C".to_string(), Version::new(1, 0))));
}

#[test]
fn family_stays_sorted_newest_first_for_any_insertion_order() {
    let orders: [&[(u32, u32)]; 4] = [
        &[(1, 0), (2, 0), (3, 0), (1, 5)],
        &[(3, 0), (2, 0), (1, 5), (1, 0)],
        &[(1, 5), (3, 0), (1, 0), (2, 0)],
        &[(2, 0), (1, 0), (1, 5), (3, 0)],
    ];

    for order in orders {
        let mut registry = TypeRegistry::new();
        for &(major, minor) in order {
            registry.register(node("x.Y", major, minor)).unwrap();
        }

        let versions = registry.family("x.Y").unwrap().versions();
        assert!(
            versions.windows(2).all(|w| w[0] >= w[1]),
            "not sorted for {order:?}: {versions:?}"
        );
        assert_eq!(versions.len(), 4);
    }
}

#[test]
fn exact_lookup_returns_the_registered_definition() {
    let mut registry = TypeRegistry::new();
    let defs: Vec<Arc<NodeType>> = [(1, 0), (1, 1), (2, 0), (0, 9)]
        .iter()
        .map(|&(major, minor)| {
            Arc::new(NodeType {
                identifier: "x.Y".to_string(),
                version: Version::new(major, minor),
                label: "original",
            })
        })
        .collect();

    for def in &defs {
        registry.register(Arc::clone(def)).unwrap();
    }

    for def in &defs {
        let found = registry.exact("x.Y", def.version()).unwrap();
        assert!(Arc::ptr_eq(&found, def));
        assert_eq!(found.label, "original");
    }
}

#[test]
fn latest_is_maximal() {
    let mut registry = TypeRegistry::new();
    for (major, minor) in [(1, 3), (4, 0), (2, 7), (4, 1), (0, 0)] {
        registry.register(node("x.Y", major, minor)).unwrap();
    }

    let latest = registry.latest("x.Y").unwrap().version();
    for other in registry.family("x.Y").unwrap().versions() {
        assert!(latest >= other);
    }
    assert_eq!(latest, Version::new(4, 1));
}

#[test]
fn newest_satisfying_version_wins() {
    let mut registry = TypeRegistry::new();
    for major in [1, 3, 2] {
        registry.register(node("id", major, 0)).unwrap();
    }

    let at_least_one = VersionSpecifier::parse(">=1.0").unwrap();
    assert_eq!(
        registry.matching("id", &at_least_one).unwrap().version(),
        Version::new(3, 0)
    );

    let exactly_two = VersionSpecifier::parse("=2.0").unwrap();
    assert_eq!(
        registry.matching("id", &exactly_two).unwrap().version(),
        Version::new(2, 0)
    );

    let too_new = VersionSpecifier::parse(">=3.1").unwrap();
    assert!(registry.matching("id", &too_new).unwrap_err().is_not_found());
}

#[test]
fn unknown_identifier_is_not_found_for_every_query() {
    let registry = scenario_registry();
    let spec = VersionSpecifier::parse(">=0.0").unwrap();

    assert!(registry.latest("no.such.id").unwrap_err().is_not_found());
    assert!(
        registry
            .exact("no.such.id", Version::new(1, 0))
            .unwrap_err()
            .is_not_found()
    );
    assert!(registry.matching("no.such.id", &spec).unwrap_err().is_not_found());
    assert!(
        registry
            .resolve("no.such.id", &VersionSelector::Latest)
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn identifiers_are_case_sensitive() {
    let registry = scenario_registry();
    assert!(registry.latest("a.b").unwrap_err().is_not_found());
}

#[test]
fn not_found_carries_identifier_and_request() {
    let registry = scenario_registry();

    match registry.exact("a.B", Version::new(9, 9)).unwrap_err() {
        RegistryError::NotFound {
            identifier,
            requested,
        } => {
            assert_eq!(identifier, "a.B");
            assert_eq!(requested.as_deref(), Some("9.9"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn enumeration_matches_latest_per_identifier() {
    let mut registry = scenario_registry();
    registry.register(node("a.D", 0, 1)).unwrap();
    registry.register(node("a.C", 1, 2)).unwrap();

    let listed = registry.latest_per_identifier();
    assert_eq!(listed.len(), registry.len());
    assert_eq!(listed.len(), 3);

    for def in &listed {
        let latest = registry.latest(def.identifier()).unwrap();
        assert!(Arc::ptr_eq(def, &latest));
    }
}

#[test]
fn resolve_dispatches_on_selector() {
    let registry = scenario_registry();

    let latest = registry.resolve("a.B", &VersionSelector::Latest).unwrap();
    assert_eq!(latest.version(), Version::new(2, 0));

    let exact = registry
        .resolve("a.B", &VersionSelector::parse(Some("1.0")).unwrap())
        .unwrap();
    assert_eq!(exact.version(), Version::new(1, 0));

    let matching = registry
        .resolve("a.B", &VersionSelector::parse(Some(">=1.0")).unwrap())
        .unwrap();
    assert_eq!(matching.version(), Version::new(2, 0));
}

#[test]
fn registries_are_isolated() {
    let first = scenario_registry();
    let second: TypeRegistry<NodeType> = TypeRegistry::new();

    assert!(first.contains("a.B"));
    assert!(!second.contains("a.B"));
}
