#![forbid(unsafe_code)]

//! Floor registry and label-to-floor assignment.
//!
//! The routing service knows nothing about floors. The only floor signal in a
//! step is its textual label, so each [`FloorSpec`] carries a `token` that is
//! looked up inside labels.
//!
//! # Matching
//!
//! Floors are tried in registry order and the **first** hit wins; there is no
//! longest-match rule. With [`MatchPolicy::Substring`] a token `"1"` also
//! matches `"Hall 10"`, so registries should avoid tokens that contain one
//! another. [`FloorRegistry::ambiguous_tokens`] lists such pairs and the
//! registry logs them when it is built. [`MatchPolicy::Delimited`] requires the
//! token to stand on its own between non-alphanumeric characters; it changes
//! results for labels like `"Stairs 0-1"` only when tokens are glued to other
//! alphanumerics, and is therefore opt-in.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Vertical rank of a floor. Higher means further up.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorIndex(pub i32);

impl fmt::Debug for FloorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

impl fmt::Display for FloorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the floor registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorSpec {
    pub index: FloorIndex,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FloorSpec {
    #[must_use]
    pub fn new(index: i32, token: impl Into<String>) -> Self {
        Self {
            index: FloorIndex(index),
            token: token.into(),
            name: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, falling back to the token.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.token)
    }
}

/// How a floor token is located inside a step label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Token may appear anywhere in the label.
    #[default]
    Substring,
    /// Token must be bounded by non-alphanumeric characters or label edges.
    Delimited,
}

impl MatchPolicy {
    #[must_use]
    pub fn matches(self, label: &str, token: &str) -> bool {
        match self {
            Self::Substring => label.contains(token),
            Self::Delimited => label.match_indices(token).any(|(start, _)| {
                let end = start + token.len();
                let before_ok = label[..start]
                    .chars()
                    .next_back()
                    .is_none_or(|c| !c.is_alphanumeric());
                let after_ok = label[end..]
                    .chars()
                    .next()
                    .is_none_or(|c| !c.is_alphanumeric());
                before_ok && after_ok
            }),
        }
    }
}

/// Ordered, validated list of floors. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorRegistry {
    floors: Vec<FloorSpec>,
    policy: MatchPolicy,
}

impl FloorRegistry {
    /// Validate and build a registry using [`MatchPolicy::Substring`].
    pub fn new(floors: Vec<FloorSpec>) -> Result<Self> {
        Self::with_policy(floors, MatchPolicy::default())
    }

    pub fn with_policy(floors: Vec<FloorSpec>, policy: MatchPolicy) -> Result<Self> {
        let mut indices = HashSet::with_capacity(floors.len());
        let mut tokens = HashSet::with_capacity(floors.len());
        for floor in &floors {
            if floor.token.is_empty() {
                return Err(Error::EmptyFloorToken { index: floor.index });
            }
            if !indices.insert(floor.index) {
                return Err(Error::DuplicateFloorIndex { index: floor.index });
            }
            if !tokens.insert(floor.token.as_str()) {
                return Err(Error::DuplicateFloorToken {
                    token: floor.token.clone(),
                });
            }
        }

        let registry = Self { floors, policy };
        if policy == MatchPolicy::Substring {
            for (inner, outer) in registry.ambiguous_tokens() {
                tracing::warn!(
                    target: "floorpath.registry",
                    inner = %inner.token,
                    outer = %outer.token,
                    inner_floor = %inner.index,
                    outer_floor = %outer.index,
                    "floor token is a substring of another token; first registry match wins"
                );
            }
        }
        tracing::debug!(
            target: "floorpath.registry",
            floors = registry.floors.len(),
            policy = ?policy,
            "floor registry built"
        );
        Ok(registry)
    }

    /// Resolve a step label to a floor. `None` means the step is unmatched.
    #[must_use]
    pub fn assign(&self, label: &str) -> Option<FloorIndex> {
        self.floors
            .iter()
            .find(|f| self.policy.matches(label, &f.token))
            .map(|f| f.index)
    }

    /// Pairs `(inner, outer)` where `inner.token` occurs inside `outer.token`.
    #[must_use]
    pub fn ambiguous_tokens(&self) -> Vec<(&FloorSpec, &FloorSpec)> {
        let mut pairs = Vec::new();
        for inner in &self.floors {
            for outer in &self.floors {
                if inner.index != outer.index && outer.token.contains(inner.token.as_str()) {
                    pairs.push((inner, outer));
                }
            }
        }
        pairs
    }

    #[must_use]
    pub fn get(&self, index: FloorIndex) -> Option<&FloorSpec> {
        self.floors.iter().find(|f| f.index == index)
    }

    #[must_use]
    pub fn contains(&self, index: FloorIndex) -> bool {
        self.get(index).is_some()
    }

    /// Registry position of a floor (used for colour ramps).
    #[must_use]
    pub fn position(&self, index: FloorIndex) -> Option<usize> {
        self.floors.iter().position(|f| f.index == index)
    }

    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloorSpec> {
        self.floors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}
