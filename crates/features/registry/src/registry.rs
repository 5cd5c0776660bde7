use crate::error::FeatureError;
use crate::resolver::{DefaultLookup, FeatureResolver};
use entitle_domain::features::{Feature, FeatureSpec, Module};
use entitle_domain::license::LicenseFeature;
use fxhash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reference to a registered feature, returned by registration and used for resolution.
///
/// A handle is just the feature's name. Resolving a handle against a registry that does not
/// know the name yields the zero-value descriptor, the same as a feature without a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureHandle(Arc<str>);

impl FeatureHandle {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FeatureHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a feature's live status is computed.
#[derive(Debug, Clone, Default)]
pub enum Resolution {
    /// Only the static descriptor is known; resolving yields "status unknown".
    #[default]
    Static,
    /// The attached resolver computes the status.
    Custom(Arc<dyn FeatureResolver>),
}

impl Resolution {
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// A registered feature: its static descriptor plus how to resolve it.
#[derive(Debug, Clone)]
pub struct FeatureEntry {
    name: Arc<str>,
    feature: Feature,
    resolution: Resolution,
}

impl FeatureEntry {
    #[must_use]
    pub fn handle(&self) -> FeatureHandle {
        FeatureHandle(Arc::clone(&self.name))
    }

    /// The descriptor exactly as registered.
    #[must_use]
    pub const fn feature(&self) -> &Feature {
        &self.feature
    }

    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }
}

/// Name-indexed storage shared by the builder and the frozen registry.
///
/// Entries keep registration order; the index maps each unique name to its slot.
#[derive(Debug, Default)]
pub(crate) struct Table {
    entries: Vec<FeatureEntry>,
    index: FxHashMap<Arc<str>, usize>,
}

impl Table {
    pub(crate) fn get(&self, name: &str) -> Option<&FeatureEntry> {
        self.index.get(name).and_then(|&slot| self.entries.get(slot))
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut FeatureEntry> {
        self.index.get(name).and_then(|&slot| self.entries.get_mut(slot))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Collects feature registrations during startup.
///
/// Registration is single-threaded by construction (`&mut self`); [`Self::build`] is the
/// one-time barrier after which the table can only be read.
#[derive(Debug, Default)]
pub struct FeatureRegistryBuilder {
    table: Table,
}

impl FeatureRegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a feature with its static spec and returns its handle.
    ///
    /// Registering a name twice keeps a single entry: the last registration wins, takes over
    /// the original slot in iteration order, and drops any resolver attached to the old entry.
    pub fn register(&mut self, name: impl Into<String>, spec: FeatureSpec) -> FeatureHandle {
        let name = name.into();
        let key: Arc<str> = Arc::from(name.as_str());
        let entry = FeatureEntry {
            name: Arc::clone(&key),
            feature: Feature::new(name, spec),
            resolution: Resolution::Static,
        };

        if let Some(existing) = self.table.get_mut(&key) {
            let previous = std::mem::replace(existing, entry);
            warn!(
                feature = %key,
                dropped_resolver = previous.resolution.is_custom(),
                "Feature registered twice, replacing the previous descriptor"
            );
        } else {
            debug!(feature = %key, "Registering feature");
            self.table.index.insert(Arc::clone(&key), self.table.entries.len());
            self.table.entries.push(entry);
        }

        FeatureHandle(key)
    }

    /// Attaches `resolver` to an already-registered feature, replacing any previous one.
    ///
    /// An unknown handle leaves the table untouched. The handle is returned either way so
    /// calls can be chained onto a registration.
    pub fn with_resolver<R>(&mut self, handle: FeatureHandle, resolver: R) -> FeatureHandle
    where
        R: FeatureResolver + 'static,
    {
        self.with_shared_resolver(handle, Arc::new(resolver))
    }

    /// Like [`Self::with_resolver`], for a resolver shared between several features.
    pub fn with_shared_resolver(
        &mut self,
        handle: FeatureHandle,
        resolver: Arc<dyn FeatureResolver>,
    ) -> FeatureHandle {
        match self.table.get_mut(handle.name()) {
            Some(entry) => {
                if entry.resolution.is_custom() {
                    debug!(feature = %handle, "Replacing feature resolver");
                }
                entry.resolution = Resolution::Custom(resolver);
            },
            None => warn!(feature = %handle, "Cannot attach resolver to unregistered feature"),
        }
        handle
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.table.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.entries.is_empty()
    }

    /// Freezes the table. No registrations are possible afterwards.
    #[must_use]
    pub fn build(self) -> FeatureRegistry {
        let resolvers = self.table.entries.iter().filter(|e| e.resolution.is_custom()).count();
        info!(features = self.table.len(), resolvers, "Feature registry built");
        FeatureRegistry { table: Arc::new(self.table) }
    }
}

/// The immutable feature table.
///
/// Cloning shares the same table. Reads never fail: absence of a feature is `None`, and the
/// only errors are those returned by custom resolvers.
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    table: Arc<Table>,
}

impl FeatureRegistry {
    #[must_use]
    pub fn builder() -> FeatureRegistryBuilder {
        FeatureRegistryBuilder::default()
    }

    /// The descriptor registered under `name` (case-sensitive, exact match).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Feature> {
        self.table.get(name).map(FeatureEntry::feature)
    }

    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&FeatureEntry> {
        self.table.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.table.index.contains_key(name)
    }

    /// Handle for a registered name.
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<FeatureHandle> {
        self.table.get(name).map(FeatureEntry::handle)
    }

    #[must_use]
    pub fn has_resolver(&self, handle: &FeatureHandle) -> bool {
        self.table.get(handle.name()).is_some_and(|e| e.resolution.is_custom())
    }

    /// Computes the live status of a feature.
    ///
    /// With a resolver attached, its result is returned as is. Otherwise, and for handles this
    /// registry does not know, the zero-value descriptor is returned.
    ///
    /// # Errors
    /// Whatever the attached [`FeatureResolver`] returns, unchanged.
    pub fn resolve(&self, handle: &FeatureHandle) -> Result<Feature, FeatureError> {
        match self.table.get(handle.name()) {
            Some(entry) => self.resolve_entry(entry),
            None => Ok(Feature::default()),
        }
    }

    fn resolve_entry(&self, entry: &FeatureEntry) -> Result<Feature, FeatureError> {
        match &entry.resolution {
            Resolution::Custom(resolver) => resolver.resolve(&entry.name, &self.default_lookup()),
            Resolution::Static => Ok(Feature::default()),
        }
    }

    /// Read access to the static table, as handed to resolvers.
    #[must_use]
    pub fn default_lookup(&self) -> DefaultLookup<'_> {
        DefaultLookup::new(&self.table)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.entries.is_empty()
    }

    /// Registered descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.table.entries.iter().map(FeatureEntry::feature)
    }

    /// Distinct modules in the order they first appear.
    #[must_use]
    pub fn modules(&self) -> Vec<&Module> {
        let mut seen = FxHashSet::default();
        self.iter().filter_map(|f| f.spec.module.as_ref()).filter(|m| seen.insert(*m)).collect()
    }

    /// Descriptors grouped under `module`, in registration order.
    pub fn in_module<'a>(&'a self, module: &'a Module) -> impl Iterator<Item = &'a Feature> {
        self.iter().filter(move |f| f.spec.module.as_ref() == Some(module))
    }

    /// Resolves every feature into its license representation, in registration order.
    ///
    /// Name and spec come from the static descriptor, the status from resolution. Features
    /// without a resolver therefore report `entitled: false, enabled: false`.
    ///
    /// # Errors
    /// The first resolver error, unchanged.
    pub fn license_features(&self) -> Result<Vec<LicenseFeature>, FeatureError> {
        self.table
            .entries
            .iter()
            .map(|entry| {
                let status = self.resolve_entry(entry)?.status;
                Ok(LicenseFeature {
                    name: entry.feature.name().to_owned(),
                    spec: entry.feature.spec.clone(),
                    status,
                })
            })
            .collect()
    }
}
