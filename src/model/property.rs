use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rich_text::RichText;
use super::tagged::{Empty, RawTagged, SchemaError, TaggedUnion};

/// Value of one property on a page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTagged<PropertyValueMeta>")]
pub struct PropertyValue {
    #[serde(flatten)]
    pub meta: PropertyValueMeta,
    #[serde(flatten)]
    pub kind: PropertyValueKind,
}

impl PropertyValue {
    pub fn new(kind: PropertyValueKind) -> Self {
        Self {
            meta: PropertyValueMeta::default(),
            kind,
        }
    }

    /// A title value made of a single plain text run.
    pub fn title(content: impl Into<String>) -> Self {
        Self::new(PropertyValueKind::Title(vec![RichText::text(content)]))
    }
}

impl From<PropertyValueKind> for PropertyValue {
    fn from(kind: PropertyValueKind) -> Self {
        Self::new(kind)
    }
}

impl TryFrom<RawTagged<PropertyValueMeta>> for PropertyValue {
    type Error = SchemaError;

    fn try_from(raw: RawTagged<PropertyValueMeta>) -> Result<Self, Self::Error> {
        let (meta, kind) = raw.resolve()?;
        Ok(Self { meta, kind })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValueMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValueKind {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Number(Option<f64>),
    Select(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Status(Option<SelectOption>),
    Date(Option<DateRange>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    Relation(Vec<Relation>),
    People(Vec<User>),
    Files(Vec<Value>),
    Formula(Value),
    Rollup(Value),
    CreatedTime(String),
    CreatedBy(User),
    LastEditedTime(String),
    LastEditedBy(User),
    UniqueId(Value),
}

impl TaggedUnion for PropertyValueKind {
    const KIND: &'static str = "property value";
    const TAGS: &'static [&'static str] = &[
        "title",
        "rich_text",
        "number",
        "select",
        "multi_select",
        "status",
        "date",
        "checkbox",
        "url",
        "email",
        "phone_number",
        "relation",
        "people",
        "files",
        "formula",
        "rollup",
        "created_time",
        "created_by",
        "last_edited_time",
        "last_edited_by",
        "unique_id",
    ];
}

/// Column definition of a database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTagged<PropertySchemaMeta>")]
pub struct PropertySchema {
    #[serde(flatten)]
    pub meta: PropertySchemaMeta,
    #[serde(flatten)]
    pub kind: PropertySchemaKind,
}

impl TryFrom<RawTagged<PropertySchemaMeta>> for PropertySchema {
    type Error = SchemaError;

    fn try_from(raw: RawTagged<PropertySchemaMeta>) -> Result<Self, Self::Error> {
        let (meta, kind) = raw.resolve()?;
        Ok(Self { meta, kind })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchemaMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertySchemaKind {
    Title(Empty),
    RichText(Empty),
    Number(NumberFormat),
    Select(SelectOptions),
    MultiSelect(SelectOptions),
    Status(Value),
    Date(Empty),
    People(Empty),
    Files(Empty),
    Checkbox(Empty),
    Url(Empty),
    Email(Empty),
    PhoneNumber(Empty),
    Formula(Value),
    Relation(Value),
    Rollup(Value),
    CreatedTime(Empty),
    CreatedBy(Empty),
    LastEditedTime(Empty),
    LastEditedBy(Empty),
    UniqueId(Value),
}

impl TaggedUnion for PropertySchemaKind {
    const KIND: &'static str = "property schema";
    const TAGS: &'static [&'static str] = &[
        "title",
        "rich_text",
        "number",
        "select",
        "multi_select",
        "status",
        "date",
        "people",
        "files",
        "checkbox",
        "url",
        "email",
        "phone_number",
        "formula",
        "relation",
        "rollup",
        "created_time",
        "created_by",
        "last_edited_time",
        "last_edited_by",
        "unique_id",
    ];
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    #[serde(default)]
    pub format: String,
}

/// Options offered by a select or multi-select column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOptions {
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SelectOption {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// ISO 8601 date or date-time, optionally a range.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: String,
}

/// Partial user reference; the API only guarantees the id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub object: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{PropertySchema, PropertySchemaKind, PropertyValue, PropertyValueKind, SelectOption};

    #[test]
    fn parses_page_property_values() {
        let number: PropertyValue =
            serde_json::from_value(json!({"id": "a%3Ab", "type": "number", "number": 3.5}))
                .expect("parses");
        assert_eq!(number.meta.id, "a%3Ab");
        assert_eq!(number.kind, PropertyValueKind::Number(Some(3.5)));

        let select: PropertyValue =
            serde_json::from_value(json!({"id": "x", "type": "select", "select": null}))
                .expect("parses");
        assert_eq!(select.kind, PropertyValueKind::Select(None));

        let tags: PropertyValue = serde_json::from_value(json!({
            "id": "y",
            "type": "multi_select",
            "multi_select": [{"id": "1", "name": "rust", "color": "orange"}]
        }))
        .expect("parses");
        match tags.kind {
            PropertyValueKind::MultiSelect(options) => assert_eq!(options[0].name, "rust"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn request_shape_omits_type_and_id() {
        let value = PropertyValue::new(PropertyValueKind::Select(Some(SelectOption::named("Done"))));
        assert_eq!(
            serde_json::to_value(&value).expect("serializes"),
            json!({"select": {"name": "Done"}})
        );

        let checkbox = PropertyValue::new(PropertyValueKind::Checkbox(false));
        assert_eq!(
            serde_json::to_value(&checkbox).expect("serializes"),
            json!({"checkbox": false})
        );
    }

    #[test]
    fn parses_database_column_schema() {
        let schema: PropertySchema = serde_json::from_value(json!({
            "id": "flsb",
            "name": "Food group",
            "type": "select",
            "select": {"options": [{"id": "e28f", "name": "Vegetable", "color": "green"}]}
        }))
        .expect("parses");

        assert_eq!(schema.meta.name, "Food group");
        match schema.kind {
            PropertySchemaKind::Select(select) => assert_eq!(select.options.len(), 1),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn unknown_property_type_is_rejected() {
        let error = serde_json::from_value::<PropertyValue>(json!({
            "id": "z", "type": "verification", "verification": {}
        }))
        .expect_err("rejected");
        assert!(error.to_string().contains("unsupported property value type 'verification'"));
    }
}
