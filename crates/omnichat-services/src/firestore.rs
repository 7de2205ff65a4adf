//! Saved layout persistence over the Firestore REST API

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{json, Value};

use omnichat_core::prelude::*;
use omnichat_core::SavedLayout;

use crate::auth::Session;
use crate::http::{build_client, read_body, transport_error};

pub const DEFAULT_FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_COLLECTION: &str = "layouts";

/// Path-segment encoding: RFC 3986 unreserved characters pass through
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// CRUD for saved layouts, scoped to the session's identity on listing
#[trait_variant::make(LayoutStore: Send)]
pub trait LocalLayoutStore {
    /// Persist a new record, returning its id
    async fn save_layout(&self, session: &Session, name: &str, html: &str) -> Result<String>;

    /// The session owner's layouts, newest first. Failures yield an empty list.
    async fn list_layouts(&self, session: &Session) -> Vec<SavedLayout>;

    /// Delete by id. No ownership check is made here.
    async fn delete_layout(&self, session: &Session, id: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub project_id: String,
    pub endpoint: String,
    pub collection: String,
    pub origin: String,
}

impl StoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            endpoint: DEFAULT_FIRESTORE_ENDPOINT.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            origin: crate::auth::DEFAULT_ORIGIN.to_string(),
        }
    }

    fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.endpoint.trim_end_matches('/'),
            utf8_percent_encode(&self.project_id, SEGMENT)
        )
    }
}

/// Firestore REST client
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl FirestoreClient {
    pub fn new(config: StoreConfig) -> Result<Self> {
        Ok(Self {
            http: build_client()?,
            config,
        })
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: &str,
        session: &Session,
    ) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&session.id_token)
            .header(reqwest::header::REFERER, &self.config.origin)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<String> {
        let response = builder.send().await.map_err(transport_error)?;
        read_body(response)
            .await
            .map_err(|e| Error::store(e.to_string()))
    }

    async fn query_layouts(&self, session: &Session) -> Result<Vec<SavedLayout>> {
        let url = format!("{}:runQuery", self.config.documents_root());
        let body = self
            .send(
                self.request(reqwest::Method::POST, &url, session)
                    .json(&owner_query(&self.config.collection, &session.identity.uid)),
            )
            .await?;
        let rows: Vec<Value> = serde_json::from_str(&body)?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get("document"))
            .filter_map(layout_from_document)
            .collect())
    }
}

impl LayoutStore for FirestoreClient {
    async fn save_layout(&self, session: &Session, name: &str, html: &str) -> Result<String> {
        let url = format!(
            "{}/{}",
            self.config.documents_root(),
            utf8_percent_encode(&self.config.collection, SEGMENT)
        );
        let created_at = chrono::Utc::now().timestamp_millis();
        let document = layout_document(&session.identity.uid, name, html, created_at);
        let body = self
            .send(self.request(reqwest::Method::POST, &url, session).json(&document))
            .await
            .context("Error saving layout")?;

        let created: Value = serde_json::from_str(&body)?;
        let id = created
            .get("name")
            .and_then(Value::as_str)
            .and_then(document_id)
            .ok_or_else(|| Error::store("create response has no document name"))?;
        info!("Saved layout {} ({} bytes)", id, html.len());
        Ok(id.to_string())
    }

    async fn list_layouts(&self, session: &Session) -> Vec<SavedLayout> {
        match self.query_layouts(session).await {
            Ok(layouts) => {
                debug!("Listed {} layouts", layouts.len());
                layouts
            }
            Err(e) => {
                error!("Error getting layouts: {}", e);
                Vec::new()
            }
        }
    }

    async fn delete_layout(&self, session: &Session, id: &str) -> Result<()> {
        let url = format!(
            "{}/{}/{}",
            self.config.documents_root(),
            utf8_percent_encode(&self.config.collection, SEGMENT),
            utf8_percent_encode(id, SEGMENT)
        );
        self.send(self.request(reqwest::Method::DELETE, &url, session))
            .await
            .context("Error deleting layout")?;
        info!("Deleted layout {}", id);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// Document mapping
// ─────────────────────────────────────────────────────────────────

/// Firestore document body for a new layout record
pub fn layout_document(user_id: &str, name: &str, html: &str, created_at: i64) -> Value {
    json!({
        "fields": {
            "userId": { "stringValue": user_id },
            "name": { "stringValue": name },
            "html": { "stringValue": html },
            "createdAt": { "integerValue": created_at.to_string() },
        }
    })
}

/// Structured query: records owned by `uid`, newest first
pub fn owner_query(collection: &str, uid: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": "userId" },
                    "op": "EQUAL",
                    "value": { "stringValue": uid },
                }
            },
            "orderBy": [{
                "field": { "fieldPath": "createdAt" },
                "direction": "DESCENDING",
            }],
        }
    })
}

/// Last path segment of a document resource name
pub fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|s| !s.is_empty())
}

fn string_field(fields: &Value, key: &str) -> Option<String> {
    fields
        .get(key)?
        .get("stringValue")?
        .as_str()
        .map(str::to_string)
}

fn integer_field(fields: &Value, key: &str) -> Option<i64> {
    let value = fields.get(key)?;
    if let Some(s) = value.get("integerValue").and_then(Value::as_str) {
        return s.parse().ok();
    }
    if let Some(n) = value.get("integerValue").and_then(Value::as_i64) {
        return Some(n);
    }
    value
        .get("doubleValue")
        .and_then(Value::as_f64)
        .map(|f| f as i64)
}

/// Map a Firestore document to a record. Documents missing `userId` or
/// `html` are skipped.
pub fn layout_from_document(doc: &Value) -> Option<SavedLayout> {
    let id = document_id(doc.get("name")?.as_str()?)?.to_string();
    let fields = doc.get("fields")?;
    Some(SavedLayout {
        id,
        user_id: string_field(fields, "userId")?,
        name: string_field(fields, "name").unwrap_or_default(),
        html: string_field(fields, "html")?,
        created_at: integer_field(fields, "createdAt").unwrap_or_default(),
    })
}
