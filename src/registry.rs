use crate::error::{ExtractError, Result};
use crate::extractor::TextExtractor;
use crate::models::ContentType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// What `register` does when a content type is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationPolicy {
    /// Last registration wins
    #[default]
    Replace,
    /// Refuse the new registration with `DuplicateContentType`
    Reject,
}

/// Registry mapping content types to extractors.
///
/// Registration takes `&mut self`, so it can only happen while the registry
/// is exclusively owned during startup. Once shared behind an `Arc` it is
/// read-only and lookups need no locking.
pub struct ExtractorRegistry {
    extractors: HashMap<ContentType, Arc<dyn TextExtractor>>,
    policy: RegistrationPolicy,
}

impl ExtractorRegistry {
    /// Create a new empty registry
    pub fn new(policy: RegistrationPolicy) -> Self {
        Self {
            extractors: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Register an extractor under every content type it declares.
    ///
    /// Under `Reject` every declared type is checked before anything is
    /// inserted, so a refused registration leaves the registry untouched.
    pub fn register(&mut self, extractor: Arc<dyn TextExtractor>) -> Result<()> {
        if self.policy == RegistrationPolicy::Reject {
            if let Some(taken) = extractor
                .content_types()
                .iter()
                .find(|ct| self.extractors.contains_key(**ct))
            {
                return Err(ExtractError::DuplicateContentType(taken.to_string()));
            }
        }

        for content_type in extractor.content_types() {
            if let Some(previous) = self
                .extractors
                .insert(ContentType::from(*content_type), extractor.clone())
            {
                warn!(
                    "Extractor '{}' replaces '{}' for {}",
                    extractor.name(),
                    previous.name(),
                    content_type
                );
            }
        }

        debug!(
            "Registered extractor '{}' for {} content type(s)",
            extractor.name(),
            extractor.content_types().len()
        );
        Ok(())
    }

    /// Find the extractor registered for an exact content type
    pub fn lookup(&self, content_type: &str) -> Result<Arc<dyn TextExtractor>> {
        self.extractors
            .get(content_type)
            .cloned()
            .ok_or_else(|| ExtractError::UnsupportedFormat(content_type.to_string()))
    }

    pub fn contains(&self, content_type: &str) -> bool {
        self.extractors.contains_key(content_type)
    }

    /// Registered content types, sorted
    pub fn content_types(&self) -> Vec<ContentType> {
        let mut types: Vec<ContentType> = self.extractors.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new(RegistrationPolicy::default())
    }
}
