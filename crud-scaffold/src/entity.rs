//! Entity contracts shared by the handler and repository layers
//!
//! Every persisted record type embeds an [`EntityBase`] (identifier and
//! timestamps) and describes its remaining fields with a static
//! [`EntityShape`]. The generic repository builds all of its statements from
//! that shape, so adding an entity never requires new persistence code.
//!
//! # Example
//!
//! ```rust
//! use crud_scaffold::entity::{Entity, EntityBase, EntityShape, FieldMapping, SqlValue};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
//! struct Team {
//!     #[sqlx(flatten)]
//!     #[serde(flatten)]
//!     base: EntityBase,
//!     name: String,
//! }
//!
//! impl Entity for Team {
//!     const NAME: &'static str = "Team";
//!     const SHAPE: EntityShape =
//!         EntityShape::new("teams", "id", &[FieldMapping::same("name")]);
//!
//!     fn base(&self) -> &EntityBase {
//!         &self.base
//!     }
//!
//!     fn base_mut(&mut self) -> &mut EntityBase {
//!         &mut self.base
//!     }
//!
//!     fn values(&self) -> Vec<SqlValue> {
//!         vec![SqlValue::from(self.name.clone())]
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow};

/// Store-assigned entity identifier
pub type EntityId = i32;

/// Column holding the creation timestamp of every entity table
pub const CREATED_AT_COLUMN: &str = "created_at";

/// Column holding the last-update timestamp of every entity table
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// Fields common to every entity
///
/// `id` and `created_at` are `None` until the store has inserted the row;
/// `updated_at` stays `None` until the first update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityBase {
    /// Primary key assigned by the store
    pub id: Option<EntityId>,
    /// Set once at insertion
    pub created_at: Option<DateTime<Utc>>,
    /// Set on every update
    pub updated_at: Option<DateTime<Utc>>,
}

impl EntityBase {
    /// Base for an entity that has not been stored yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Base addressing an already stored entity
    ///
    /// # Example
    ///
    /// ```rust
    /// use crud_scaffold::entity::EntityBase;
    ///
    /// let base = EntityBase::with_id(7);
    /// assert_eq!(base.id, Some(7));
    /// assert!(base.created_at.is_none());
    /// ```
    pub fn with_id(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

/// Maps one entity field to its persisted column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field name as known to `FromRow`
    pub field: &'static str,
    /// Column name in the table
    pub column: &'static str,
}

impl FieldMapping {
    /// Field stored under a different column name
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        Self { field, column }
    }

    /// Field stored under its own name
    pub const fn same(name: &'static str) -> Self {
        Self {
            field: name,
            column: name,
        }
    }
}

/// Static description of how an entity is persisted
///
/// `fields` lists the entity-specific fields only, in the same order as
/// [`Entity::values`] returns their values. The identifier and the two
/// timestamps are handled by the repository itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityShape {
    /// Table name, optionally schema-qualified (`schema.table`)
    pub table: &'static str,
    /// Primary key column
    pub primary_key: &'static str,
    /// Entity-specific field to column mapping
    pub fields: &'static [FieldMapping],
}

impl EntityShape {
    /// Create a shape descriptor
    pub const fn new(
        table: &'static str,
        primary_key: &'static str,
        fields: &'static [FieldMapping],
    ) -> Self {
        Self {
            table,
            primary_key,
            fields,
        }
    }

    /// Column backing the given field, if the field is mapped
    pub fn column_for(&self, field: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|mapping| mapping.field == field)
            .map(|mapping| mapping.column)
    }

    /// Entity-specific columns in value order
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|mapping| mapping.column)
    }
}

/// A value bound to a statement parameter
///
/// Each variant carries an `Option` so that `NULL` keeps its column type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Bool(Option<bool>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Double(Option<f64>),
    Text(Option<String>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlValue {
    /// Whether the value is SQL `NULL`
    pub fn is_null(&self) -> bool {
        match self {
            Self::Bool(v) => v.is_none(),
            Self::Int(v) => v.is_none(),
            Self::BigInt(v) => v.is_none(),
            Self::Double(v) => v.is_none(),
            Self::Text(v) => v.is_none(),
            Self::Timestamp(v) => v.is_none(),
        }
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(Some(value))
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Int(Some(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::BigInt(Some(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Double(Some(value))
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(Some(value))
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(Some(value.to_string()))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(Some(value))
    }
}

/// A record type that can be handled and persisted generically
///
/// Rows are decoded with `FromRow`; the repository aliases every selected
/// column to its field name, so the derive needs no renames even when the
/// shape maps fields to differently named columns.
pub trait Entity:
    for<'r> FromRow<'r, PgRow> + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    /// Display name used in logs and error context
    const NAME: &'static str;

    /// Persistence shape
    const SHAPE: EntityShape;

    /// Common identifier and timestamps
    fn base(&self) -> &EntityBase;

    /// Mutable access to the common fields
    fn base_mut(&mut self) -> &mut EntityBase;

    /// Entity-specific values, ordered as `SHAPE.fields`
    fn values(&self) -> Vec<SqlValue>;

    /// Store-assigned identifier, if the entity has been stored
    fn id(&self) -> Option<EntityId> {
        self.base().id
    }
}
