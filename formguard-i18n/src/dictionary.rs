//! Translation dictionary
//!
//! Messages are keyed by their English source text. A lookup tries the full
//! language tag, then the language alone, and falls back to the source text.

use crate::locale::normalize_tag;
use crate::{I18nError, Locale, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

static BUILTIN_RU: Lazy<MessageBundle> = Lazy::new(|| {
    MessageBundle::from_json(include_str!("../locales/ru.json")).unwrap_or_else(|e| {
        formguard_log::error!("Built-in ru translations are invalid: {}", e);
        MessageBundle::new()
    })
});

/// Translations for one language, keyed by source text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageBundle {
    messages: IndexMap<String, String>,
}

impl MessageBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a flat JSON object of `source -> translation`.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: IndexMap<String, Value> = serde_json::from_str(json)?;
        let mut bundle = Self::new();

        for (source, value) in data {
            match value {
                Value::String(translated) => bundle.add(source, translated),
                _ => return Err(I18nError::InvalidTranslation(source)),
            }
        }

        Ok(bundle)
    }

    /// Load from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn add(&mut self, source: impl Into<String>, translated: impl Into<String>) {
        self.messages.insert(source.into(), translated.into());
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.messages.get(source).map(String::as_str)
    }

    pub fn has(&self, source: &str) -> bool {
        self.messages.contains_key(source)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Merge another bundle in; its entries win.
    pub fn extend(&mut self, other: MessageBundle) {
        self.messages.extend(other.messages);
    }
}

impl<S, T> FromIterator<(S, T)> for MessageBundle
where
    S: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for (source, translated) in iter {
            bundle.add(source, translated);
        }
        bundle
    }
}

/// Thread-safe set of bundles keyed by normalized language tag.
///
/// Cloning is cheap and clones share the same bundles.
#[derive(Debug, Clone)]
pub struct Dictionary {
    bundles: Arc<RwLock<HashMap<String, MessageBundle>>>,
}

impl Dictionary {
    /// Dictionary with the built-in bundles.
    pub fn new() -> Self {
        let dictionary = Self::empty();
        dictionary.add_bundle("ru", BUILTIN_RU.clone());
        dictionary
    }

    /// Dictionary without any bundle.
    pub fn empty() -> Self {
        Self {
            bundles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Built-in bundles overlaid with `language -> source -> translation`.
    pub fn from_translations<I, L, M, S, T>(translations: I) -> Self
    where
        I: IntoIterator<Item = (L, M)>,
        L: AsRef<str>,
        M: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let dictionary = Self::new();
        for (language, messages) in translations {
            dictionary.add_bundle(language.as_ref(), messages.into_iter().collect());
        }
        dictionary
    }

    /// Merge a bundle into a language; its entries win over existing ones.
    pub fn add_bundle(&self, language: &str, bundle: MessageBundle) {
        let tag = normalize_tag(language);
        let mut bundles = self.bundles.write();
        bundles.entry(tag).or_default().extend(bundle);
    }

    /// Load every `<language>.json` file of a directory.
    pub fn load_from_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| I18nError::InvalidLocale(path.display().to_string()))?;

                let locale = Locale::parse(stem)?;
                self.add_bundle(&locale.tag(), MessageBundle::from_file(&path)?);
                formguard_log::debug!("Loaded translations for {} from {}", locale, path.display());
            }
        }

        Ok(())
    }

    /// Add one translation.
    pub fn add_translation(&self, source: &str, translated: &str, language: &str) {
        let mut bundle = MessageBundle::new();
        bundle.add(source, translated);
        self.add_bundle(language, bundle);
    }

    /// Translate `text` into `language`, or return it unchanged.
    pub fn translate(&self, text: &str, language: &str) -> String {
        self.lookup(text, language).unwrap_or_else(|| text.to_string())
    }

    /// Translation of `text`, if any bundle for `language` has one.
    pub fn lookup(&self, text: &str, language: &str) -> Option<String> {
        let bundles = self.bundles.read();

        let mut candidates = vec![normalize_tag(language)];
        if let Ok(locale) = Locale::parse(language)
            && locale.region.is_some()
        {
            candidates.push(locale.language_only().tag());
        }

        candidates
            .iter()
            .find_map(|tag| bundles.get(tag).and_then(|bundle| bundle.get(text)))
            .map(str::to_string)
    }

    pub fn has(&self, text: &str, language: &str) -> bool {
        self.lookup(text, language).is_some()
    }

    /// Languages with at least one bundle, sorted.
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<_> = self.bundles.read().keys().cloned().collect();
        languages.sort();
        languages
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
