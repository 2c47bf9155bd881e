//! Tournament registrant entity

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, EntityBase, EntityShape, FieldMapping, SqlValue};

/// A player registered for a tournament, linked to both accounts
///
/// # Example
///
/// ```rust
/// use crud_scaffold::registrant::Registrant;
///
/// let registrant = Registrant::new(100, "alice", 200, "alice#1");
/// let json = serde_json::to_value(&registrant).unwrap();
/// assert_eq!(json["osuName"], "alice");
/// assert!(json["id"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub base: EntityBase,
    pub osu_id: i64,
    pub osu_name: String,
    pub discord_id: i64,
    pub discord_name: String,
}

impl Registrant {
    /// Registrant that has not been stored yet
    pub fn new(
        osu_id: i64,
        osu_name: impl Into<String>,
        discord_id: i64,
        discord_name: impl Into<String>,
    ) -> Self {
        Self {
            base: EntityBase::new(),
            osu_id,
            osu_name: osu_name.into(),
            discord_id,
            discord_name: discord_name.into(),
        }
    }
}

impl Entity for Registrant {
    const NAME: &'static str = "Registrant";
    const SHAPE: EntityShape = EntityShape::new(
        "registrants",
        "id",
        &[
            FieldMapping::same("osu_id"),
            FieldMapping::same("osu_name"),
            FieldMapping::same("discord_id"),
            FieldMapping::same("discord_name"),
        ],
    );

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::from(self.osu_id),
            SqlValue::from(self.osu_name.as_str()),
            SqlValue::from(self.discord_id),
            SqlValue::from(self.discord_name.as_str()),
        ]
    }
}
