//! Feature flags and the code-fragment resolver.
//!
//! An inserter declares which fragment each feature contributes to each of
//! its markers. Resolution is a pure function so its ordering can be checked
//! without touching a filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::entities::resource::Resource;
use crate::domain::marker::Marker;

/// A capability a `create api` run can wire into the project.
///
/// Variant order is the declaration order every resolver output follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Resource,
    Controller,
}

impl Feature {
    pub const ALL: [Feature; 2] = [Feature::Resource, Feature::Controller];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Controller => "controller",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enabled features. Iterates in declaration order whatever the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet(BTreeSet<Feature>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, feature: Feature) -> Self {
        self.0.insert(feature);
        self
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        if enabled {
            self.0.insert(feature);
        } else {
            self.0.remove(&feature);
        }
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One fragment a feature contributes under one marker.
#[derive(Clone)]
pub struct FragmentRule {
    pub marker: Marker,
    pub feature: Feature,
    pub render: fn(&Resource) -> String,
}

impl FragmentRule {
    pub fn new(marker: Marker, feature: Feature, render: fn(&Resource) -> String) -> Self {
        Self {
            marker,
            feature,
            render,
        }
    }
}

impl fmt::Debug for FragmentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentRule")
            .field("marker", &self.marker.to_string())
            .field("feature", &self.feature)
            .finish_non_exhaustive()
    }
}

/// Fragments to splice in, keyed by the marker they go above.
pub type CodeFragments = BTreeMap<Marker, Vec<String>>;

/// Resolve the fragments for a set of markers.
///
/// With no resource the file is being created rather than updated, so the
/// map is empty. A `(feature, marker)` pair contributes at most one fragment
/// and markers that receive nothing are left out of the map.
pub fn resolve_fragments(
    features: &FeatureSet,
    markers: &[Marker],
    rules: &[FragmentRule],
    resource: Option<&Resource>,
) -> CodeFragments {
    let mut fragments = CodeFragments::new();
    let Some(resource) = resource else {
        return fragments;
    };

    for marker in markers {
        let mut block = Vec::new();
        for feature in features.iter() {
            let rule = rules
                .iter()
                .find(|rule| rule.feature == feature && &rule.marker == marker);
            if let Some(rule) = rule {
                block.push((rule.render)(resource));
            }
        }
        if !block.is_empty() {
            fragments.insert(marker.clone(), block);
        }
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::marker::CommentSyntaxRegistry;

    fn marker(value: &str) -> Marker {
        Marker::new(&CommentSyntaxRegistry::default(), "src/main.rs", value).unwrap()
    }

    fn resource_import(r: &Resource) -> String {
        format!("use crate::api::{}_types::{};", r.kind_lower(), r.kind)
    }

    fn controller_import(r: &Resource) -> String {
        format!(
            "use crate::controller::{}_controller::{}Reconciler;",
            r.kind_lower(),
            r.kind
        )
    }

    fn rules() -> Vec<FragmentRule> {
        vec![
            // Controller declared first on purpose: output must follow Feature order.
            FragmentRule::new(marker("imports"), Feature::Controller, controller_import),
            FragmentRule::new(marker("imports"), Feature::Resource, resource_import),
        ]
    }

    fn frigate() -> Resource {
        Resource::new("ship", "v1", "Frigate")
    }

    #[test]
    fn no_resource_means_no_fragments() {
        let features = FeatureSet::new()
            .with(Feature::Resource)
            .with(Feature::Controller);
        let result = resolve_fragments(&features, &[marker("imports")], &rules(), None);
        assert!(result.is_empty());
    }

    #[test]
    fn ordering_follows_feature_declaration() {
        let resource = frigate();
        let a = FeatureSet::new()
            .with(Feature::Controller)
            .with(Feature::Resource);
        let b: FeatureSet = [Feature::Resource, Feature::Controller]
            .into_iter()
            .collect();

        let from_a = resolve_fragments(&a, &[marker("imports")], &rules(), Some(&resource));
        let from_b = resolve_fragments(&b, &[marker("imports")], &rules(), Some(&resource));

        assert_eq!(from_a, from_b);
        assert_eq!(
            from_a[&marker("imports")],
            vec![
                "use crate::api::frigate_types::Frigate;".to_string(),
                "use crate::controller::frigate_controller::FrigateReconciler;".to_string(),
            ]
        );
    }

    #[test]
    fn disabled_features_contribute_nothing() {
        let resource = frigate();
        let features = FeatureSet::new().with(Feature::Controller);
        let result = resolve_fragments(&features, &[marker("imports")], &rules(), Some(&resource));

        assert_eq!(result[&marker("imports")].len(), 1);
        assert!(result[&marker("imports")][0].contains("Reconciler"));
    }

    #[test]
    fn markers_without_fragments_are_omitted() {
        let resource = frigate();
        let features = FeatureSet::new().with(Feature::Resource);
        let result = resolve_fragments(
            &features,
            &[marker("imports"), marker("runners")],
            &rules(),
            Some(&resource),
        );

        assert_eq!(result.len(), 1);
        assert!(!result.contains_key(&marker("runners")));
    }

    #[test]
    fn one_fragment_per_feature_and_marker() {
        let resource = frigate();
        let mut doubled = rules();
        doubled.push(FragmentRule::new(
            marker("imports"),
            Feature::Resource,
            |_| "use extra;".to_string(),
        ));
        let features = FeatureSet::new().with(Feature::Resource);
        let result = resolve_fragments(&features, &[marker("imports")], &doubled, Some(&resource));

        assert_eq!(result[&marker("imports")].len(), 1);
    }

    #[test]
    fn feature_set_toggles() {
        let mut set = FeatureSet::new();
        assert!(set.is_empty());
        set.set(Feature::Controller, true);
        set.set(Feature::Resource, true);
        set.set(Feature::Resource, false);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Feature::Controller]);
    }
}
