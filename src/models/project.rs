use std::collections::BTreeMap;

use bson::{oid::ObjectId, Bson, DateTime, Document};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Field names as stored in the `projects` collection
pub mod fields {
    pub const ID: &str = "_id";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const TECHNOLOGIES: &str = "technologies";
    pub const CREATED_AT: &str = "createdAt";
}

/// A project document as read back from the store.
///
/// The named fields are only populated when the stored value has the expected
/// shape. Updates are not re-validated, so a document may carry e.g. a numeric
/// `title`; such values stay in `extra` under their original key.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ObjectId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub created_at: Option<DateTime>,
    pub extra: Document,
}

impl Project {
    /// Split a stored document into the named fields and the remainder
    pub fn from_document(doc: Document) -> StoreResult<Self> {
        let mut id = None;
        let mut title = None;
        let mut description = None;
        let mut technologies = None;
        let mut created_at = None;
        let mut extra = Document::new();

        for (key, value) in doc {
            let unclaimed = match key.as_str() {
                fields::ID => claim(&mut id, value, as_object_id),
                fields::TITLE => claim(&mut title, value, as_string),
                fields::DESCRIPTION => claim(&mut description, value, as_string),
                fields::TECHNOLOGIES => claim(&mut technologies, value, as_string_list),
                fields::CREATED_AT => claim(&mut created_at, value, as_datetime),
                _ => Some(value),
            };

            if let Some(value) = unclaimed {
                extra.insert(key, value);
            }
        }

        let id = id.ok_or_else(|| {
            StoreError::Malformed(format!("project without an ObjectId _id: {}", extra))
        })?;

        Ok(Self {
            id,
            title,
            description,
            technologies,
            created_at,
            extra,
        })
    }
}

fn claim<T>(
    slot: &mut Option<T>,
    value: Bson,
    convert: impl FnOnce(Bson) -> Result<T, Bson>,
) -> Option<Bson> {
    match convert(value) {
        Ok(converted) => {
            *slot = Some(converted);
            None
        }
        Err(value) => Some(value),
    }
}

fn as_object_id(value: Bson) -> Result<ObjectId, Bson> {
    match value {
        Bson::ObjectId(id) => Ok(id),
        other => Err(other),
    }
}

fn as_string(value: Bson) -> Result<String, Bson> {
    match value {
        Bson::String(s) => Ok(s),
        other => Err(other),
    }
}

fn as_string_list(value: Bson) -> Result<Vec<String>, Bson> {
    match value {
        Bson::Array(items) if items.iter().all(|item| matches!(item, Bson::String(_))) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Bson::String(s) => Some(s),
                _ => None,
            })
            .collect()),
        other => Err(other),
    }
}

fn as_datetime(value: Bson) -> Result<DateTime, Bson> {
    match value {
        Bson::DateTime(dt) => Ok(dt),
        other => Err(other),
    }
}

/// Technologies as submitted by a client: a JSON list or a comma-separated string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Technologies {
    List(Vec<Value>),
    Csv(String),
}

impl Technologies {
    /// Canonical list form. Lists are kept as given, items included; strings are
    /// split on commas, trimmed, and empty tokens dropped.
    pub fn normalize(self) -> Vec<Value> {
        match self {
            Technologies::List(items) => items,
            Technologies::Csv(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(Value::from)
                .collect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectInputError {
    #[error("Title, description, and technologies are required.")]
    MissingRequired,

    #[error("Performing an update on the path '_id' would modify the immutable field '_id'")]
    ImmutableId,

    #[error("Invalid value for field '{field}': {source}")]
    InvalidValue {
        field: String,
        source: bson::ser::Error,
    },
}

/// A checked project ready for insertion. Required values are kept as submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProject {
    pub title: Bson,
    pub description: Bson,
    pub technologies: Bson,
    pub extra: Document,
}

impl CreateProject {
    /// Check that the required fields are present and collect every other field.
    ///
    /// `title` and `description` count as missing when absent, `null`, `false`,
    /// `0` or `""`. `technologies` must be a list or a string and is normalized
    /// before the emptiness check. Client-supplied `_id` and `createdAt` are
    /// dropped since the store and the service own them.
    pub fn new(
        title: Option<Value>,
        description: Option<Value>,
        technologies: Option<Value>,
        extra: BTreeMap<String, Value>,
    ) -> Result<Self, ProjectInputError> {
        let title = present(title).ok_or(ProjectInputError::MissingRequired)?;
        let description = present(description).ok_or(ProjectInputError::MissingRequired)?;
        let technologies = technologies
            .and_then(|value| serde_json::from_value::<Technologies>(value).ok())
            .map(Technologies::normalize)
            .filter(|list| !list.is_empty())
            .ok_or(ProjectInputError::MissingRequired)?;

        let extra = to_document(
            extra
                .into_iter()
                .filter(|(key, _)| key != fields::ID && key != fields::CREATED_AT),
        )?;

        Ok(Self {
            title: to_bson(fields::TITLE, &title)?,
            description: to_bson(fields::DESCRIPTION, &description)?,
            technologies: to_bson(fields::TECHNOLOGIES, &technologies)?,
            extra,
        })
    }

    /// Build the document to insert, stamped with `created_at`
    pub fn into_document(self, created_at: DateTime) -> Document {
        let mut doc = self.extra;
        doc.insert(fields::TITLE, self.title);
        doc.insert(fields::DESCRIPTION, self.description);
        doc.insert(fields::TECHNOLOGIES, self.technologies);
        doc.insert(fields::CREATED_AT, created_at);
        doc
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|value| match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

fn to_bson<T: serde::Serialize>(field: &str, value: &T) -> Result<Bson, ProjectInputError> {
    bson::to_bson(value).map_err(|source| ProjectInputError::InvalidValue {
        field: field.to_string(),
        source,
    })
}

fn to_document(
    entries: impl Iterator<Item = (String, Value)>,
) -> Result<Document, ProjectInputError> {
    let mut doc = Document::new();
    for (field, value) in entries {
        let value = to_bson(&field, &value)?;
        doc.insert(field, value);
    }
    Ok(doc)
}

/// Field-level replacement applied by an update (`$set` semantics)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectPatch {
    pub set: Document,
}

impl ProjectPatch {
    /// `_id` cannot be changed. `createdAt` belongs to the service and is ignored.
    pub fn from_fields(input: BTreeMap<String, Value>) -> Result<Self, ProjectInputError> {
        if input.contains_key(fields::ID) {
            return Err(ProjectInputError::ImmutableId);
        }

        let set = to_document(
            input
                .into_iter()
                .filter(|(key, _)| key != fields::CREATED_AT),
        )?;

        Ok(Self { set })
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
