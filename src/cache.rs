use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Cached per-page fetch results, shown in the page list before a thread
/// has been opened this session
#[derive(Default, serde::Serialize, serde::Deserialize)]
pub struct CommentCache {
    #[serde(default)]
    pub pages: HashMap<String, PageCacheEntry>,
}

#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct PageCacheEntry {
    /// Total comments (including replies) at last fetch
    pub count: usize,

    /// RFC 3339 timestamp of the last successful fetch
    pub fetched_at: String,
}

impl CommentCache {
    pub fn entry(&self, page_id: &str) -> Option<&PageCacheEntry> {
        self.pages.get(page_id)
    }

    pub fn record(&mut self, page_id: &str, count: usize) {
        self.pages.insert(
            page_id.to_string(),
            PageCacheEntry {
                count,
                fetched_at: chrono::Utc::now().to_rfc3339(),
            },
        );
    }
}

/// Get the cache file path (~/.config/kaiwa/cache.json)
fn cache_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("kaiwa").join("cache.json"))
}

/// Save the cache to disk, best-effort
pub fn save_cache(cache: &CommentCache) {
    let Some(file_path) = cache_file_path() else {
        return;
    };

    // Create parent directory if needed
    if let Some(parent) = file_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    if let Ok(json) = serde_json::to_string(cache) {
        let _ = fs::write(&file_path, json);
    }
}

/// Load the cache from disk (empty if missing or unreadable)
pub fn load_cache() -> CommentCache {
    let Some(file_path) = cache_file_path() else {
        return CommentCache::default();
    };

    if !file_path.exists() {
        return CommentCache::default();
    }

    fs::read_to_string(&file_path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}
