//! Change detection between pipeline passes.
//!
//! The cache remembers, per declaration and category, the last request and
//! the unit emitted for it. A new observation whose request is equal to the
//! remembered one reuses the stored unit instead of emitting again.

use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};

use crate::declaration::DeclarationId;
use crate::emit::GeneratedUnit;
use crate::extract::ExtractOptions;
use crate::request::{Category, GenerationRequest};
use crate::scan::{MarkedDeclaration, Marker};

/// Outcome of one observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// The request was new or changed; holds the emitted unit name.
    Emitted(String),
    /// The request equals the cached one; nothing was emitted.
    Unchanged(String),
    /// Extraction produced nothing. Holds the unit name of a stale entry
    /// dropped for this declaration, if there was one.
    Filtered(Option<String>),
}

/// Unit names touched by one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub emitted: Vec<String>,
    pub unchanged: Vec<String>,
    pub removed: Vec<String>,
}

impl PassReport {
    pub fn has_changes(&self) -> bool {
        !self.emitted.is_empty() || !self.removed.is_empty()
    }
}

type EntryKey = (DeclarationId, Category);

#[derive(Debug, Clone)]
struct CacheEntry {
    request: GenerationRequest,
    unit: GeneratedUnit,
}

#[derive(Debug, Default)]
pub struct ChangeDetectionCache {
    entries: HashMap<EntryKey, CacheEntry>,
    emissions: usize,
}

impl ChangeDetectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the request extracted for `id` in `category`, emitting only
    /// when it differs from the previous observation.
    pub fn observe<F>(
        &mut self,
        id: &DeclarationId,
        category: Category,
        request: Option<GenerationRequest>,
        emit: F,
    ) -> Observation
    where
        F: FnOnce(&GenerationRequest) -> GeneratedUnit,
    {
        let key = (id.clone(), category);
        let Some(request) = request else {
            let stale = self
                .entries
                .remove(&key)
                .map(|entry| entry.unit.name().to_string());
            trace!("Filtered {id} ({category})");
            return Observation::Filtered(stale);
        };

        if let Some(entry) = self.entries.get(&key)
            && entry.request == request
        {
            trace!("Unchanged {} for {id}", entry.unit.name());
            return Observation::Unchanged(entry.unit.name().to_string());
        }

        let unit = emit(&request);
        let name = unit.name().to_string();
        debug!("Emitted {name} for {id}");
        self.emissions += 1;
        self.entries.insert(key, CacheEntry { request, unit });
        Observation::Emitted(name)
    }

    /// Observes every marked declaration, ID markers first, then forgets
    /// declarations that are no longer present.
    pub fn run_pass<F>(
        &mut self,
        declarations: &[MarkedDeclaration],
        options: &ExtractOptions,
        mut emit: F,
    ) -> PassReport
    where
        F: FnMut(&GenerationRequest) -> GeneratedUnit,
    {
        let ids = declarations
            .iter()
            .filter(|marked| marked.marker == Marker::Ids);
        let keys = declarations
            .iter()
            .filter(|marked| matches!(marked.marker, Marker::Keys(_)));

        let mut report = PassReport::default();
        let mut seen: HashSet<EntryKey> = HashSet::new();
        let mut owners: HashMap<String, &DeclarationId> = HashMap::new();
        let mut stale_files: Vec<(String, String)> = Vec::new();

        for marked in ids.chain(keys) {
            let id = &marked.declaration.id;
            let category = match marked.marker {
                Marker::Ids => Category::StrongIds,
                Marker::Keys(_) => Category::StrongKeys,
            };
            let key = (id.clone(), category);
            let previous = self.entries.get(&key).map(|entry| entry.unit.file_name());

            match self.observe(id, category, marked.request(options), &mut emit) {
                Observation::Emitted(name) => report.emitted.push(name),
                Observation::Unchanged(name) => report.unchanged.push(name),
                Observation::Filtered(stale) => {
                    if let (Some(name), Some(file)) = (stale, previous) {
                        stale_files.push((file, name));
                    }
                    continue;
                }
            }
            let Some(entry) = self.entries.get(&key) else {
                continue;
            };
            let file = entry.unit.file_name();
            if let Some(previous) = previous
                && previous != file
            {
                stale_files.push((previous, entry.unit.name().to_string()));
            }
            seen.insert(key);

            let owner = owners.entry(file.clone()).or_insert(id);
            if *owner != id {
                let (kept, dropped) = if *owner < id { (*owner, id) } else { (id, *owner) };
                warn!("{kept} and {dropped} both generate {file}; keeping {kept}");
                *owner = kept;
            }
        }

        let gone: Vec<EntryKey> = self
            .entries
            .keys()
            .filter(|key| !seen.contains(*key))
            .cloned()
            .collect();
        for key in gone {
            if let Some(entry) = self.entries.remove(&key) {
                debug!("Forgot {} ({})", key.0, entry.unit.name());
                stale_files.push((entry.unit.file_name(), entry.unit.name().to_string()));
            }
        }

        // A file still produced by another declaration is not removed.
        report.removed = stale_files
            .into_iter()
            .filter(|(file, _)| !owners.contains_key(file))
            .map(|(_, name)| name)
            .collect();
        report.removed.sort();
        report.removed.dedup();
        report
    }

    /// Current outputs ordered by unit name, then namespace. When several
    /// declarations produce the same file, only the one with the smallest
    /// [`DeclarationId`] is kept.
    pub fn units(&self) -> Vec<&GeneratedUnit> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|&(key, entry)| (entry.unit.name(), entry.unit.namespace(), &key.0));
        entries.dedup_by(|(_, later), (_, earlier)| {
            later.unit.file_name() == earlier.unit.file_name()
        });
        entries.into_iter().map(|(_, entry)| &entry.unit).collect()
    }

    pub fn request(&self, id: &DeclarationId, category: Category) -> Option<&GenerationRequest> {
        self.entries.get(&(id.clone(), category)).map(|entry| &entry.request)
    }

    pub fn unit(&self, id: &DeclarationId, category: Category) -> Option<&GeneratedUnit> {
        self.entries.get(&(id.clone(), category)).map(|entry| &entry.unit)
    }

    /// Drops every entry of `id`; its next observation emits again.
    pub fn forget(&mut self, id: &DeclarationId) {
        self.entries.retain(|(entry_id, _), _| entry_id != id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times an emitter has been invoked over the cache's lifetime.
    pub fn emissions(&self) -> usize {
        self.emissions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{EmitOptions, emit};
    use crate::request::{IdRequest, KeyRequest, KeySpec};
    use crate::scan::{Markers, scan_source};

    fn emitter() -> impl FnMut(&GenerationRequest) -> GeneratedUnit {
        let options = EmitOptions::default();
        move |request: &GenerationRequest| emit(request, &options)
    }

    fn ids(names: &[&str]) -> Option<GenerationRequest> {
        Some(IdRequest::new("", "SampleIDs", "i32", names.iter().copied()).into())
    }

    #[test]
    fn test_equal_request_is_not_emitted_twice() {
        let mut cache = ChangeDetectionCache::new();
        let id = DeclarationId::inline("SampleIDs");

        let first = cache.observe(&id, Category::StrongIds, ids(&["EntityID"]), emitter());
        let second = cache.observe(&id, Category::StrongIds, ids(&["EntityID"]), |_| {
            panic!("unchanged request must not be emitted")
        });

        assert_eq!(first, Observation::Emitted("StrongIDs.SampleIDs.g".into()));
        assert_eq!(second, Observation::Unchanged("StrongIDs.SampleIDs.g".into()));
        assert_eq!(cache.emissions(), 1);
    }

    #[test]
    fn test_changed_request_replaces_unit() {
        let mut cache = ChangeDetectionCache::new();
        let id = DeclarationId::inline("SampleIDs");

        cache.observe(&id, Category::StrongIds, ids(&["EntityID"]), emitter());
        let changed = cache.observe(
            &id,
            Category::StrongIds,
            ids(&["EntityID", "ReferenceID"]),
            emitter(),
        );

        assert!(matches!(changed, Observation::Emitted(_)));
        assert_eq!(cache.emissions(), 2);
        assert_eq!(cache.len(), 1);
        let Some(GenerationRequest::Ids(request)) = cache.request(&id, Category::StrongIds) else {
            panic!("missing cached request");
        };
        assert_eq!(request.id_names.count(), 2);
    }

    #[test]
    fn test_filtered_drops_stale_entry() {
        let mut cache = ChangeDetectionCache::new();
        let id = DeclarationId::inline("SampleIDs");

        cache.observe(&id, Category::StrongIds, ids(&[]), emitter());
        let filtered = cache.observe(&id, Category::StrongIds, None, emitter());

        assert_eq!(filtered, Observation::Filtered(Some("StrongIDs.SampleIDs.g".into())));
        assert!(cache.is_empty());
        assert_eq!(
            cache.observe(&id, Category::StrongIds, None, emitter()),
            Observation::Filtered(None)
        );
    }

    #[test]
    fn test_identical_requests_from_distinct_declarations_are_independent() {
        let mut cache = ChangeDetectionCache::new();
        let request = Some(GenerationRequest::from(KeyRequest::new(
            "",
            "Keys",
            false,
            false,
            [KeySpec::new("Code", 4)],
        )));

        let (a, b) = (DeclarationId::inline("a"), DeclarationId::inline("b"));
        cache.observe(&a, Category::StrongKeys, request.clone(), emitter());
        cache.observe(&b, Category::StrongKeys, request, emitter());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.emissions(), 2);
    }

    #[test]
    fn test_run_pass_tracks_changes_and_removals() {
        let markers = Markers::default();
        let options = ExtractOptions::default();
        let mut cache = ChangeDetectionCache::new();

        let v1 = "#[strong_ids] enum SampleIDs { EntityID } \
                  #[strong_keys] impl SampleKeys { const NAME: usize = 8; }";
        let declarations = scan_source("lib.rs", "", v1, &markers).unwrap();
        let report = cache.run_pass(&declarations, &options, emitter());
        assert_eq!(report.emitted, ["StrongIDs.SampleIDs.g", "StrongKeys.SampleKeys.g"]);
        assert!(report.unchanged.is_empty());

        let declarations = scan_source("lib.rs", "", v1, &markers).unwrap();
        let report = cache.run_pass(&declarations, &options, emitter());
        assert!(!report.has_changes());
        assert_eq!(report.unchanged.len(), 2);

        let v2 = "#[strong_ids] enum SampleIDs { EntityID, ReferenceID }";
        let declarations = scan_source("lib.rs", "", v2, &markers).unwrap();
        let report = cache.run_pass(&declarations, &options, emitter());
        assert_eq!(report.emitted, ["StrongIDs.SampleIDs.g"]);
        assert_eq!(report.removed, ["StrongKeys.SampleKeys.g"]);

        let names: Vec<_> = cache
            .units()
            .iter()
            .map(|unit| unit.name().to_string())
            .collect();
        assert_eq!(names, ["StrongIDs.SampleIDs.g"]);
        assert_eq!(cache.emissions(), 3);
    }

    #[test]
    fn test_units_are_kept_apart_by_namespace() {
        let markers = Markers::default();
        let options = ExtractOptions::default();
        let mut cache = ChangeDetectionCache::new();

        let a = "#[strong_ids] enum SampleIDs { AlphaID }";
        let b = "#[strong_ids] enum SampleIDs { BetaID }";
        let mut declarations = scan_source("a.rs", "a", a, &markers).unwrap();
        declarations.extend(scan_source("b.rs", "b", b, &markers).unwrap());
        cache.run_pass(&declarations, &options, emitter());

        let files: Vec<_> = cache.units().iter().map(|unit| unit.file_name()).collect();
        assert_eq!(files, ["a.StrongIDs.SampleIDs.g.rs", "b.StrongIDs.SampleIDs.g.rs"]);
    }

    #[test]
    fn test_same_file_keeps_smallest_declaration() {
        let markers = Markers::default();
        let options = ExtractOptions::default();
        let mut cache = ChangeDetectionCache::new();
        let source = "fn first() { #[strong_ids] enum LocalIDs { FirstID } } \
                      fn second() { #[strong_ids] enum LocalIDs { SecondID } }";

        let declarations = scan_source("lib.rs", "", source, &markers).unwrap();
        cache.run_pass(&declarations, &options, emitter());

        let units = cache.units();
        assert_eq!(cache.len(), 2);
        assert_eq!(units.len(), 1);
        assert!(units[0].items().to_string().contains("FirstID"));
    }

    #[test]
    fn test_forget_forces_reemission() {
        let mut cache = ChangeDetectionCache::new();
        let id = DeclarationId::inline("SampleIDs");
        cache.observe(&id, Category::StrongIds, ids(&["EntityID"]), emitter());

        cache.forget(&id);
        let again = cache.observe(&id, Category::StrongIds, ids(&["EntityID"]), emitter());

        assert!(matches!(again, Observation::Emitted(_)));
        assert!(cache.unit(&id, Category::StrongIds).is_some());
    }
}
