use std::collections::HashMap;
use std::sync::Arc;

use crate::clip::{Clip, ValidatedClip};
use crate::enrich::{Enricher, WebmDimensionTagger};

/// Registry of enrichers keyed by MIME type
///
/// Lookup is exact on the clip's declared type. Types without an enricher are
/// left as they are.
#[derive(Clone)]
pub struct EnricherRegistry {
    enrichers: HashMap<String, Arc<dyn Enricher>>,
}

impl EnricherRegistry {
    /// Create a new registry with all built-in enrichers
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(WebmDimensionTagger::new());
        registry
    }

    /// Create a registry that passes every clip through unchanged
    pub fn empty() -> Self {
        Self {
            enrichers: HashMap::new(),
        }
    }

    /// Register an enricher under its MIME type, replacing any previous one
    pub fn register<E>(&mut self, enricher: E)
    where
        E: Enricher + 'static,
    {
        self.enrichers
            .insert(enricher.mime_type().to_string(), Arc::new(enricher));
    }

    /// Get the enricher for a MIME type
    pub fn get(&self, mime_type: &str) -> Option<Arc<dyn Enricher>> {
        self.enrichers.get(mime_type).cloned()
    }

    /// Check if a MIME type has an enricher
    pub fn has_enricher(&self, mime_type: &str) -> bool {
        self.enrichers.contains_key(mime_type)
    }

    /// Get all MIME types with an enricher
    pub fn mime_types(&self) -> Vec<String> {
        self.enrichers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.enrichers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enrichers.is_empty()
    }

    /// Apply the matching enricher, or return the clip unchanged
    pub fn enrich(&self, validated: ValidatedClip) -> Clip {
        match self.enrichers.get(validated.clip.mime_type()) {
            Some(enricher) => enricher.enrich(&validated.clip, &validated.metadata),
            None => validated.into_clip(),
        }
    }
}

impl Default for EnricherRegistry {
    fn default() -> Self {
        Self::new()
    }
}
