use std::collections::BTreeMap;

use crate::types::{ConfigSource, ConfigValue};

/// A value in the merged mapping together with the layer that set it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    pub value: ConfigValue,
    pub source: ConfigSource,
}

/// The merged mapping. `BTreeMap` keeps iteration and snapshots deterministic.
pub(crate) type Entries = BTreeMap<String, Entry>;

/// The keys one source explicitly sets. Keys it does not mention are absent.
pub(crate) type Layer = BTreeMap<String, ConfigValue>;

/// Overlay `layer` on top of `base`.
///
/// Only keys present in `layer` are touched. An entry already set by a
/// higher-priority source is kept, so priority holds even if layers are
/// applied out of order.
pub(crate) fn overlay(base: &mut Entries, layer: Layer, source: ConfigSource) {
    for (key, value) in layer {
        match base.get_mut(&key) {
            Some(entry) if entry.source > source => {}
            Some(entry) => {
                entry.value = value;
                entry.source = source;
            }
            None => {
                base.insert(key, Entry { value, source });
            }
        }
    }
}
