//! Statement generation from an entity shape
//!
//! All identifiers are double-quoted; all values travel as `$n` parameters.
//! Selected columns are aliased to field names so `FromRow` decodes rows
//! without knowing the physical column names.

use crate::entity::{EntityShape, CREATED_AT_COLUMN, UPDATED_AT_COLUMN};

/// Field name the primary key is decoded into
const ID_FIELD: &str = "id";

/// Every statement the PostgreSQL repository issues for one entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    /// Insert mapped fields and `created_at` (`$n+1`), returning the key
    pub insert: String,
    /// Primary-key lookup (`$1`)
    pub select_by_id: String,
    /// Whole table, store order
    pub select_all: String,
    /// Row count of the table
    pub count: String,
    /// Row count for one key (`$1`)
    pub count_by_id: String,
    /// Full-row replace of mapped fields plus `updated_at` (`$n+1`), keyed by `$n+2`
    pub update: String,
    /// Hard delete by key (`$1`)
    pub delete: String,
}

impl Statements {
    /// Build every statement for a shape
    ///
    /// # Example
    ///
    /// ```rust
    /// use crud_scaffold::entity::{EntityShape, FieldMapping};
    /// use crud_scaffold::repository::Statements;
    ///
    /// const SHAPE: EntityShape = EntityShape::new("teams", "id", &[FieldMapping::same("name")]);
    ///
    /// let statements = Statements::for_shape(&SHAPE);
    /// assert_eq!(statements.delete, r#"DELETE FROM "teams" WHERE "id" = $1"#);
    /// ```
    pub fn for_shape(shape: &EntityShape) -> Self {
        let table = quote_table(shape.table);
        let key = quote_ident(shape.primary_key);
        let projection = projection(shape);
        let field_count = shape.fields.len();

        let mut insert_columns: Vec<String> = shape.columns().map(quote_ident).collect();
        insert_columns.push(quote_ident(CREATED_AT_COLUMN));
        insert_columns.push(quote_ident(UPDATED_AT_COLUMN));
        let mut insert_values: Vec<String> = (1..=field_count + 1).map(placeholder).collect();
        insert_values.push("NULL".to_string());

        let mut assignments: Vec<String> = shape
            .columns()
            .enumerate()
            .map(|(index, column)| format!("{} = {}", quote_ident(column), placeholder(index + 1)))
            .collect();
        assignments.push(format!(
            "{} = {}",
            quote_ident(UPDATED_AT_COLUMN),
            placeholder(field_count + 1)
        ));

        Self {
            insert: format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
                table,
                insert_columns.join(", "),
                insert_values.join(", "),
                key
            ),
            select_by_id: format!("SELECT {} FROM {} WHERE {} = $1", projection, table, key),
            select_all: format!("SELECT {} FROM {}", projection, table),
            count: format!("SELECT COUNT(*) FROM {}", table),
            count_by_id: format!("SELECT COUNT(*) FROM {} WHERE {} = $1", table, key),
            update: format!(
                "UPDATE {} SET {} WHERE {} = {}",
                table,
                assignments.join(", "),
                key,
                placeholder(field_count + 2)
            ),
            delete: format!("DELETE FROM {} WHERE {} = $1", table, key),
        }
    }
}

fn projection(shape: &EntityShape) -> String {
    let mut columns = vec![
        aliased(shape.primary_key, ID_FIELD),
        aliased(CREATED_AT_COLUMN, CREATED_AT_COLUMN),
        aliased(UPDATED_AT_COLUMN, UPDATED_AT_COLUMN),
    ];
    columns.extend(
        shape
            .fields
            .iter()
            .map(|mapping| aliased(mapping.column, mapping.field)),
    );
    columns.join(", ")
}

fn aliased(column: &str, field: &str) -> String {
    if column == field {
        quote_ident(column)
    } else {
        format!("{} AS {}", quote_ident(column), quote_ident(field))
    }
}

fn placeholder(index: usize) -> String {
    format!("${}", index)
}

/// Quote one identifier, doubling embedded quotes
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a possibly schema-qualified table name
pub(crate) fn quote_table(name: &str) -> String {
    name.split('.').map(quote_ident).collect::<Vec<_>>().join(".")
}
