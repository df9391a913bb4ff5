//! Tweet providers.
//!
//! The provider contract is deliberately narrow: an id resolves to a tweet,
//! nothing, or an error. Widgets decide how each of those renders.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use walkdir::WalkDir;

use crate::model::Tweet;

/// Errors produced while resolving a tweet id.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("failed to read tweet {id}: {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tweet JSON for {id}: {source}")]
    Json {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolves tweet ids to tweet data.
pub trait TweetProvider: Send + Sync {
    /// Resolve an id. `Ok(None)` means the tweet does not exist.
    fn tweet(&self, id: &str) -> Result<Option<Tweet>, ProviderError>;
}

/// In-memory provider, mainly for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    tweets: HashMap<String, Tweet>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tweet: Tweet) {
        self.tweets.insert(tweet.id_str.clone(), tweet);
    }
}

impl TweetProvider for MemoryProvider {
    fn tweet(&self, id: &str) -> Result<Option<Tweet>, ProviderError> {
        Ok(self.tweets.get(id).cloned())
    }
}

impl FromIterator<Tweet> for MemoryProvider {
    fn from_iter<I: IntoIterator<Item = Tweet>>(iter: I) -> Self {
        let mut provider = Self::new();
        for tweet in iter {
            provider.insert(tweet);
        }
        provider
    }
}

/// Provider backed by a directory of `<id>.json` fixtures.
///
/// Parsed tweets are cached; [`invalidate`](Self::invalidate) drops the cache
/// so edited fixtures are re-read (the dev server calls this on file
/// changes).
pub struct FixtureProvider {
    dir: PathBuf,
    cache: Mutex<HashMap<String, Tweet>>,
}

impl FixtureProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The fixture directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every fixture id available in the directory, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = WalkDir::new(&self.dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
            .filter_map(|entry| {
                entry
                    .path()
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(|stem| stem.to_string())
            })
            .collect();
        ids.sort();
        ids
    }

    /// Drop every cached tweet.
    pub fn invalidate(&self) {
        self.cache.lock().expect("cache lock poisoned").clear();
    }

    fn is_safe_id(id: &str) -> bool {
        !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl TweetProvider for FixtureProvider {
    fn tweet(&self, id: &str) -> Result<Option<Tweet>, ProviderError> {
        // Ids become file names; anything else is treated as not found.
        if !Self::is_safe_id(id) {
            return Ok(None);
        }

        if let Some(tweet) = self.cache.lock().expect("cache lock poisoned").get(id) {
            return Ok(Some(tweet.clone()));
        }

        let path = self.dir.join(format!("{id}.json"));
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| ProviderError::Io {
            id: id.to_string(),
            source,
        })?;
        let tweet: Tweet = serde_json::from_str(&raw).map_err(|source| ProviderError::Json {
            id: id.to_string(),
            source,
        })?;

        self.cache
            .lock()
            .expect("cache lock poisoned")
            .insert(id.to_string(), tweet.clone());
        Ok(Some(tweet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const TWEET_JSON: &str = r#"{
        "id_str": "standard",
        "text": "hello",
        "user": { "name": "Test", "screen_name": "test" }
    }"#;

    #[test]
    fn memory_provider_resolves_inserted_tweets() {
        let tweet: Tweet = serde_json::from_str(TWEET_JSON).unwrap();
        let provider: MemoryProvider = [tweet].into_iter().collect();

        assert!(provider.tweet("standard").unwrap().is_some());
        assert!(provider.tweet("missing").unwrap().is_none());
    }

    #[test]
    fn fixture_provider_loads_and_caches() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("standard.json"), TWEET_JSON).unwrap();

        let provider = FixtureProvider::new(temp.path());
        let first = provider.tweet("standard").unwrap().unwrap();
        assert_eq!(first.user.screen_name, "test");

        // A second resolve is served from cache even after the file is gone.
        fs::remove_file(temp.path().join("standard.json")).unwrap();
        assert!(provider.tweet("standard").unwrap().is_some());

        provider.invalidate();
        assert!(provider.tweet("standard").unwrap().is_none());
    }

    #[test]
    fn fixture_provider_reports_missing_ids_as_none() {
        let temp = tempdir().unwrap();
        let provider = FixtureProvider::new(temp.path());

        assert!(provider.tweet("nope").unwrap().is_none());
    }

    #[test]
    fn fixture_provider_rejects_path_like_ids() {
        let temp = tempdir().unwrap();
        let provider = FixtureProvider::new(temp.path());

        assert!(provider.tweet("../etc/passwd").unwrap().is_none());
        assert!(provider.tweet("").unwrap().is_none());
    }

    #[test]
    fn fixture_provider_surfaces_invalid_json() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("bad.json"), "{ not json").unwrap();

        let provider = FixtureProvider::new(temp.path());
        assert!(matches!(
            provider.tweet("bad"),
            Err(ProviderError::Json { .. })
        ));
    }

    #[test]
    fn lists_fixture_ids_sorted() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("b.json"), TWEET_JSON).unwrap();
        fs::write(temp.path().join("a.json"), TWEET_JSON).unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let provider = FixtureProvider::new(temp.path());
        assert_eq!(provider.ids(), vec!["a".to_string(), "b".to_string()]);
    }
}
