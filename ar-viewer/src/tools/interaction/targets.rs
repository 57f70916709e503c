use bevy::prelude::*;

/// A named scene object that can be picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionTarget {
    pub name: String,
    pub entity: Entity,
}

/// Ordered, frozen set of pickable objects inside the placed scene.
///
/// Resolved once after the scene graph is instanced. Order follows the
/// configured name list, which breaks ties between equally distant hits.
#[derive(Resource, Debug, Default, Clone)]
pub struct InteractionTargets {
    targets: Vec<InteractionTarget>,
    cached: bool,
}

impl InteractionTargets {
    /// Looks each configured name up among `candidates` (named scene
    /// descendants). Returns the set plus the names that were not found.
    /// Duplicate configured names resolve once.
    pub fn resolve<'a>(
        names: &[String],
        candidates: impl IntoIterator<Item = (&'a str, Entity)> + Clone,
    ) -> (Self, Vec<String>) {
        let mut targets: Vec<InteractionTarget> = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for name in names {
            if targets.iter().any(|t| &t.name == name) || missing.contains(name) {
                continue;
            }
            let found = candidates
                .clone()
                .into_iter()
                .find(|(candidate, _)| *candidate == name.as_str());
            match found {
                Some((_, entity)) => targets.push(InteractionTarget {
                    name: name.clone(),
                    entity,
                }),
                None => missing.push(name.clone()),
            }
        }

        (
            Self {
                targets,
                cached: true,
            },
            missing,
        )
    }

    /// True once [`Self::resolve`] has populated the set.
    pub fn is_cached(&self) -> bool {
        self.cached
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractionTarget> {
        self.targets.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&InteractionTarget> {
        self.targets.iter().find(|t| t.name == name)
    }
}
