use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;
use tracing::debug;

use crate::paths;
use crate::translation::{TranslationRequest, TranslationResult};

/// SQLite-backed store of finished translations.
///
/// Keyed by [`TranslationRequest::cache_key`], so the same text translated
/// against another endpoint or language pair is a separate entry.
pub struct CacheManager {
    db_path: PathBuf,
}

impl CacheManager {
    pub fn new() -> Result<Self> {
        let cache_dir = paths::cache_dir()?;

        std::fs::create_dir_all(&cache_dir).with_context(|| {
            format!("Failed to create cache directory: {}", cache_dir.display())
        })?;

        Self::open(cache_dir.join("translations.db"))
    }

    /// Opens (and if needed creates) the cache database at `db_path`.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let manager = Self {
            db_path: db_path.into(),
        };
        manager.init_db()?;
        Ok(manager)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS translations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cache_key TEXT UNIQUE NOT NULL,
                source_text TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                source_lang TEXT NOT NULL,
                target_lang TEXT NOT NULL,
                detected_lang TEXT,
                endpoint TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                accessed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create translations table")?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_cache_key ON translations(cache_key)",
            [],
        )
        .context("Failed to create index")?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open cache database: {}", self.db_path.display()))
    }

    pub fn get(
        &self,
        request: &TranslationRequest,
        endpoint: &str,
    ) -> Result<Option<TranslationResult>> {
        let cache_key = request.cache_key(endpoint);
        let conn = self.connect()?;

        let result = conn
            .query_row(
                "SELECT translated_text, detected_lang FROM translations WHERE cache_key = ?1",
                [&cache_key],
                |row| {
                    Ok(TranslationResult {
                        translated_text: row.get(0)?,
                        detected_lang: row.get(1)?,
                    })
                },
            )
            .optional()
            .context("Failed to read translation from cache")?;

        if result.is_some() {
            debug!(%cache_key, "cache hit");
            conn.execute(
                "UPDATE translations SET accessed_at = CURRENT_TIMESTAMP WHERE cache_key = ?1",
                [&cache_key],
            )?;
        }

        Ok(result)
    }

    pub fn put(
        &self,
        request: &TranslationRequest,
        endpoint: &str,
        result: &TranslationResult,
    ) -> Result<()> {
        let cache_key = request.cache_key(endpoint);
        let conn = self.connect()?;

        conn.execute(
            "INSERT OR REPLACE INTO translations
             (cache_key, source_text, translated_text, source_lang, target_lang, detected_lang, endpoint)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                cache_key,
                request.source_text(),
                result.translated_text,
                request.source_lang(),
                request.target_lang(),
                result.detected_lang,
                endpoint,
            ],
        )
        .context("Failed to insert translation into cache")?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ENDPOINT: &str = "http://localhost:8080/translate";

    fn create_test_manager(temp_dir: &TempDir) -> CacheManager {
        CacheManager::open(temp_dir.path().join("translations.db")).unwrap()
    }

    fn create_test_request() -> TranslationRequest {
        TranslationRequest::new("Hello, World!", "en", "ru").unwrap()
    }

    fn result(text: &str) -> TranslationResult {
        TranslationResult {
            translated_text: text.to_string(),
            detected_lang: None,
        }
    }

    #[test]
    fn test_cache_miss() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.get(&create_test_request(), ENDPOINT).unwrap().is_none());
    }

    #[test]
    fn test_cache_hit() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        let request = create_test_request();

        manager.put(&request, ENDPOINT, &result("Привет, мир!")).unwrap();

        assert_eq!(
            manager.get(&request, ENDPOINT).unwrap(),
            Some(result("Привет, мир!"))
        );
    }

    #[test]
    fn test_cache_keeps_detected_language() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        let request = TranslationRequest::new("Hallo", "auto", "en").unwrap();
        let detected = TranslationResult {
            translated_text: "Hello".to_string(),
            detected_lang: Some("de".to_string()),
        };

        manager.put(&request, ENDPOINT, &detected).unwrap();

        assert_eq!(manager.get(&request, ENDPOINT).unwrap(), Some(detected));
    }

    #[test]
    fn test_different_target_languages_different_entries() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let to_ru = TranslationRequest::new("Hello", "en", "ru").unwrap();
        let to_de = TranslationRequest::new("Hello", "en", "de").unwrap();

        manager.put(&to_ru, ENDPOINT, &result("Привет")).unwrap();
        manager.put(&to_de, ENDPOINT, &result("Hallo")).unwrap();

        assert_eq!(manager.get(&to_ru, ENDPOINT).unwrap(), Some(result("Привет")));
        assert_eq!(manager.get(&to_de, ENDPOINT).unwrap(), Some(result("Hallo")));
    }

    #[test]
    fn test_cache_key_includes_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        let request = create_test_request();

        manager.put(&request, ENDPOINT, &result("local")).unwrap();

        assert!(
            manager
                .get(&request, "https://translate.yandex.net/api/v1.5/tr.json/translate")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_put_replaces_existing_entry() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        let request = create_test_request();

        manager.put(&request, ENDPOINT, &result("first")).unwrap();
        manager.put(&request, ENDPOINT, &result("second")).unwrap();

        assert_eq!(manager.get(&request, ENDPOINT).unwrap(), Some(result("second")));
    }
}
