/// Version controller — append-only catalog history folded on demand.
///
/// Each version is a set of per-category deltas. Resolving version `n` folds
/// deltas `0..=n` from scratch, so adding version `n + 1` can never change
/// what an earlier version resolves to.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::condition::Condition;
use crate::core::generator::Lazy;
use crate::core::provider::{FeatureProvider, ProviderElement};
use crate::schema::feature::FeatureId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("version {requested} is out of range (latest is {latest})")]
    OutOfRange { requested: String, latest: usize },
    #[error("version history is empty")]
    EmptyHistory,
}

/// A single field of a patch.
///
/// `Clear` is distinct from `Keep`: it resets the field (to `None` for
/// optional fields, to the type's default otherwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field<T> {
    Keep,
    Set(T),
    Clear,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Keep
    }
}

impl<T: Clone> Field<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Field::Keep)
    }

    pub fn apply(&self, target: &mut T)
    where
        T: Default,
    {
        match self {
            Field::Keep => {}
            Field::Set(v) => *target = v.clone(),
            Field::Clear => *target = T::default(),
        }
    }

    pub fn apply_opt(&self, target: &mut Option<T>) {
        match self {
            Field::Keep => {}
            Field::Set(v) => *target = Some(v.clone()),
            Field::Clear => *target = None,
        }
    }
}

/// Payloads that `modify` deltas can patch.
pub trait Patchable: Clone + Send + Sync + 'static {
    type Patch: Clone + Send + Sync + 'static;

    fn patch(&mut self, patch: &Self::Patch);
}

impl Patchable for String {
    type Patch = String;

    fn patch(&mut self, patch: &String) {
        self.clone_from(patch);
    }
}

/// A `modify` entry: payload patch plus optional replacement condition/weight.
pub struct Modification<T: Patchable> {
    pub payload: Option<T::Patch>,
    pub condition: Option<Condition>,
    pub weight: Option<u32>,
}

impl<T: Patchable> Modification<T> {
    pub fn payload(patch: T::Patch) -> Self {
        Self {
            payload: Some(patch),
            ..Self::default()
        }
    }

    pub fn condition(condition: Condition) -> Self {
        Self {
            condition: Some(condition),
            ..Self::default()
        }
    }

    pub fn and_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn and_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }
}

impl<T: Patchable> Default for Modification<T> {
    fn default() -> Self {
        Self {
            payload: None,
            condition: None,
            weight: None,
        }
    }
}

impl<T: Patchable> Clone for Modification<T> {
    fn clone(&self) -> Self {
        Self {
            payload: self.payload.clone(),
            condition: self.condition.clone(),
            weight: self.weight,
        }
    }
}

impl<T: Patchable> fmt::Debug for Modification<T>
where
    T::Patch: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modification")
            .field("payload", &self.payload)
            .field("condition", &self.condition)
            .field("weight", &self.weight)
            .finish()
    }
}

/// One version's changes to one category.
pub struct Delta<T: Patchable, C: ?Sized> {
    pub add: Vec<ProviderElement<T, C>>,
    pub remove: FxHashSet<FeatureId>,
    pub modify: FxHashMap<FeatureId, Modification<T>>,
}

impl<T: Patchable, C: ?Sized + 'static> Delta<T, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, element: ProviderElement<T, C>) -> Self {
        self.add.push(element);
        self
    }

    pub fn remove(mut self, id: impl Into<FeatureId>) -> Self {
        self.remove.insert(id.into());
        self
    }

    pub fn modify(mut self, id: impl Into<FeatureId>, modification: Modification<T>) -> Self {
        self.modify.insert(id.into(), modification);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.modify.is_empty()
    }

    /// Fold this delta into `provider`: add, then remove, then modify.
    pub fn apply_to(&self, provider: &mut FeatureProvider<T, C>) {
        let category = provider.name().to_string();
        let elements = provider.elements_mut();

        elements.extend(self.add.iter().cloned());

        for id in &self.remove {
            if !elements.iter().any(|e| &e.id == id) {
                tracing::debug!("{}: remove of unknown id '{}' ignored", category, id);
            }
        }
        elements.retain(|e| !self.remove.contains(&e.id));

        for id in self.modify.keys() {
            if !elements.iter().any(|e| &e.id == id) {
                tracing::debug!("{}: modify of unknown id '{}' ignored", category, id);
            }
        }
        for element in elements.iter_mut() {
            if let Some(modification) = self.modify.get(&element.id) {
                apply_modification(element, modification);
            }
        }
    }
}

fn apply_modification<T: Patchable, C: ?Sized + 'static>(
    element: &mut ProviderElement<T, C>,
    modification: &Modification<T>,
) {
    if let Some(patch) = &modification.payload {
        element.payload = match &element.payload {
            Lazy::Value(v) => {
                let mut v = v.clone();
                v.patch(patch);
                Lazy::Value(v)
            }
            Lazy::Deferred(g) => {
                let patch = patch.clone();
                Lazy::Deferred(g.clone().map(move |mut v: T| {
                    v.patch(&patch);
                    v
                }))
            }
        };
    }
    if let Some(condition) = &modification.condition {
        element.condition = condition.clone();
    }
    if let Some(weight) = modification.weight {
        element.weight = weight;
    }
}

impl<T: Patchable, C: ?Sized> Default for Delta<T, C> {
    fn default() -> Self {
        Self {
            add: Vec::new(),
            remove: FxHashSet::default(),
            modify: FxHashMap::default(),
        }
    }
}

impl<T: Patchable, C: ?Sized> Clone for Delta<T, C> {
    fn clone(&self) -> Self {
        Self {
            add: self.add.clone(),
            remove: self.remove.clone(),
            modify: self.modify.clone(),
        }
    }
}

/// Fold one category through a sequence of deltas, starting empty.
pub fn fold_category<'a, T, C>(
    name: &str,
    unique: bool,
    deltas: impl IntoIterator<Item = &'a Delta<T, C>>,
) -> FeatureProvider<T, C>
where
    T: Patchable,
    C: ?Sized + 'static,
{
    let mut provider = FeatureProvider::new(name);
    if unique {
        provider = provider.unique();
    }
    for delta in deltas {
        delta.apply_to(&mut provider);
    }
    provider
}

/// A version's worth of deltas that can be folded into a resolved value.
pub trait DeltaSet: Sized {
    type Resolved;

    /// Resolve `history[0..]` in order. `history` is never empty.
    fn resolve(history: &[Self]) -> Self::Resolved;
}

/// Anything a caller might pass as a version number.
///
/// Conversion is strict: negative, fractional, NaN and infinite values have
/// no index.
pub trait VersionIndex: Copy + fmt::Display {
    fn to_index(self) -> Option<usize>;
}

macro_rules! int_version_index {
    ($($t:ty),*) => {
        $(impl VersionIndex for $t {
            fn to_index(self) -> Option<usize> {
                usize::try_from(self).ok()
            }
        })*
    };
}

int_version_index!(usize, u32, u64, i32, i64);

impl VersionIndex for f64 {
    fn to_index(self) -> Option<usize> {
        if !self.is_finite() || self < 0.0 || self.fract() != 0.0 || self > usize::MAX as f64 {
            return None;
        }
        Some(self as usize)
    }
}

impl VersionIndex for f32 {
    fn to_index(self) -> Option<usize> {
        f64::from(self).to_index()
    }
}

/// The append-only delta history.
#[derive(Debug, Clone)]
pub struct VersionController<D> {
    history: Vec<D>,
}

impl<D: DeltaSet> VersionController<D> {
    pub fn new(history: Vec<D>) -> Result<Self, VersionError> {
        if history.is_empty() {
            return Err(VersionError::EmptyHistory);
        }
        Ok(Self { history })
    }

    pub fn latest_version_num(&self) -> usize {
        self.history.len() - 1
    }

    pub fn version_count(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[D] {
        &self.history
    }

    /// Append a new version. Returns its number.
    pub fn push(&mut self, delta: D) -> usize {
        self.history.push(delta);
        self.latest_version_num()
    }

    /// Validate a requested version number against the recorded history.
    pub fn index_of<N: VersionIndex>(&self, n: N) -> Result<usize, VersionError> {
        n.to_index()
            .filter(|i| *i < self.history.len())
            .ok_or_else(|| VersionError::OutOfRange {
                requested: n.to_string(),
                latest: self.latest_version_num(),
            })
    }

    /// Fold deltas `0..=n` into a fresh resolved value.
    pub fn get_version<N: VersionIndex>(&self, n: N) -> Result<D::Resolved, VersionError> {
        let index = self.index_of(n)?;
        tracing::debug!("resolving version {} of {}", index, self.latest_version_num());
        Ok(D::resolve(&self.history[..=index]))
    }

    /// Every historical version, indexed by version number.
    pub fn all_versions(&self) -> Vec<D::Resolved> {
        (1..=self.history.len())
            .map(|end| D::resolve(&self.history[..end]))
            .collect()
    }
}
