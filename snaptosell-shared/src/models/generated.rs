/// Generated-content history records and their in-memory store
///
/// Each successful generation a caller chooses to save becomes a
/// [`GeneratedContent`] record scoped to the API key that produced it.
/// Persistence is process-local: like the cache, history lives only as long
/// as the process (the original's database-backed history is out of scope).
///
/// # Example
///
/// ```
/// use snaptosell_shared::models::generated::{CreateGeneratedContent, HistoryStore};
/// use snaptosell_shared::models::options::{ContentType, Tone};
///
/// let store = HistoryStore::new();
/// let record = store.append(CreateGeneratedContent {
///     owner: "acme".to_string(),
///     product_name: None,
///     content_type: ContentType::Website,
///     platform: None,
///     tone: Tone::Professional,
///     content: "A fine desk organizer.".to_string(),
///     prompt: None,
///     image: None,
///     keywords: vec![],
/// });
///
/// assert_eq!(store.list("acme").len(), 1);
/// assert_eq!(store.list("acme")[0].id, record.id);
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::options::{ContentType, Platform, Tone};

/// Product name recorded when the caller does not supply one
const UNNAMED_PRODUCT: &str = "Unnamed Product";

/// A saved generation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Record ID
    pub id: Uuid,

    /// Name of the API key that owns the record
    pub owner: String,

    /// Product the copy was generated for
    pub product_name: String,

    /// Kind of copy
    pub content_type: ContentType,

    /// Target platform, where one was selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Tone the copy was generated with
    pub tone: Tone,

    /// The generated copy itself
    pub content: String,

    /// Source text prompt, for text-driven generations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Source image (base64), for image-driven generations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Keywords requested for the copy
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub keywords: Vec<String>,

    /// When the record was saved
    pub created_at: DateTime<Utc>,
}

/// Fields for saving a new history record
#[derive(Debug, Clone)]
pub struct CreateGeneratedContent {
    pub owner: String,
    pub product_name: Option<String>,
    pub content_type: ContentType,
    pub platform: Option<Platform>,
    pub tone: Tone,
    pub content: String,
    pub prompt: Option<String>,
    pub image: Option<String>,
    pub keywords: Vec<String>,
}

/// In-memory, per-owner history of saved generations
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: RwLock<HashMap<String, Vec<GeneratedContent>>>,
}

impl HistoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        HistoryStore {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Saves a record and returns it
    pub fn append(&self, create: CreateGeneratedContent) -> GeneratedContent {
        let record = GeneratedContent {
            id: Uuid::new_v4(),
            owner: create.owner.clone(),
            product_name: create
                .product_name
                .unwrap_or_else(|| UNNAMED_PRODUCT.to_string()),
            content_type: create.content_type,
            platform: create.platform,
            tone: create.tone,
            content: create.content,
            prompt: create.prompt,
            image: create.image,
            keywords: create.keywords,
            created_at: Utc::now(),
        };

        self.entries
            .write()
            .unwrap()
            .entry(create.owner)
            .or_default()
            .push(record.clone());

        record
    }

    /// Returns the owner's records, newest first
    pub fn list(&self, owner: &str) -> Vec<GeneratedContent> {
        let entries = self.entries.read().unwrap();
        let mut records = entries.get(owner).cloned().unwrap_or_default();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Number of records stored for an owner
    pub fn count(&self, owner: &str) -> usize {
        self.entries
            .read()
            .unwrap()
            .get(owner)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(owner: &str, content: &str) -> CreateGeneratedContent {
        CreateGeneratedContent {
            owner: owner.to_string(),
            product_name: Some("Desk Organizer".to_string()),
            content_type: ContentType::Website,
            platform: None,
            tone: Tone::Professional,
            content: content.to_string(),
            prompt: Some("Describe the organizer".to_string()),
            image: None,
            keywords: vec!["walnut".to_string()],
        }
    }

    #[test]
    fn test_append_and_list() {
        let store = HistoryStore::new();
        let record = store.append(create("acme", "First copy"));

        let listed = store.list("acme");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
        assert_eq!(listed[0].product_name, "Desk Organizer");
    }

    #[test]
    fn test_missing_product_name_defaults() {
        let store = HistoryStore::new();
        let mut req = create("acme", "copy");
        req.product_name = None;

        let record = store.append(req);
        assert_eq!(record.product_name, UNNAMED_PRODUCT);
    }

    #[test]
    fn test_list_newest_first() {
        let store = HistoryStore::new();
        store.append(create("acme", "first"));
        store.append(create("acme", "second"));
        store.append(create("acme", "third"));

        let listed = store.list("acme");
        assert_eq!(listed.len(), 3);
        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_owners_are_isolated() {
        let store = HistoryStore::new();
        store.append(create("acme", "acme copy"));
        store.append(create("globex", "globex copy"));

        assert_eq!(store.count("acme"), 1);
        assert_eq!(store.count("globex"), 1);
        assert_eq!(store.list("acme")[0].content, "acme copy");
        assert!(store.list("initech").is_empty());
    }

    #[test]
    fn test_record_serialization_skips_empty_fields() {
        let store = HistoryStore::new();
        let mut req = create("acme", "copy");
        req.platform = None;
        req.image = None;
        req.keywords = Vec::new();

        let record = store.append(req);
        let json = serde_json::to_string(&record).unwrap();

        assert!(!json.contains("\"platform\""));
        assert!(!json.contains("\"image\""));
        assert!(!json.contains("\"keywords\""));
        assert!(json.contains("\"content_type\":\"website\""));
    }
}
