//! Database query bodies: filters, sorts and paging.

use serde::{Deserialize, Serialize};

use super::tagged::Empty;

/// Body of `POST v1/databases/{id}/query`.
///
/// `start_cursor` is overwritten on every page by the client; callers leave
/// it unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Items per page; the API caps this at 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

impl DatabaseQuery {
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    Or { or: Vec<Filter> },
    And { and: Vec<Filter> },
    Property(PropertyFilter),
}

impl Filter {
    pub fn property(name: impl Into<String>, condition: FilterCondition) -> Self {
        Self::Property(PropertyFilter {
            property: name.into(),
            condition,
        })
    }

    /// Filters on a page timestamp rather than a column.
    pub fn timestamp(condition: FilterCondition) -> Self {
        Self::Property(PropertyFilter {
            property: String::new(),
            condition,
        })
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Self::Or { or: filters }
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Self::And { and: filters }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub property: String,
    #[serde(flatten)]
    pub condition: FilterCondition,
}

/// Condition keyed by the type of the filtered property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    Title(TextCondition),
    RichText(TextCondition),
    Url(TextCondition),
    Email(TextCondition),
    PhoneNumber(TextCondition),
    Number(NumberCondition),
    Checkbox(CheckboxCondition),
    Select(SelectCondition),
    MultiSelect(MultiSelectCondition),
    Status(SelectCondition),
    Date(DateCondition),
    CreatedTime(DateCondition),
    LastEditedTime(DateCondition),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCondition {
    Equals(String),
    DoesNotEqual(String),
    Contains(String),
    DoesNotContain(String),
    StartsWith(String),
    EndsWith(String),
    IsEmpty(bool),
    IsNotEmpty(bool),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberCondition {
    Equals(f64),
    DoesNotEqual(f64),
    GreaterThan(f64),
    LessThan(f64),
    GreaterThanOrEqualTo(f64),
    LessThanOrEqualTo(f64),
    IsEmpty(bool),
    IsNotEmpty(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckboxCondition {
    Equals(bool),
    DoesNotEqual(bool),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectCondition {
    Equals(String),
    DoesNotEqual(String),
    IsEmpty(bool),
    IsNotEmpty(bool),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiSelectCondition {
    Contains(String),
    DoesNotContain(String),
    IsEmpty(bool),
    IsNotEmpty(bool),
}

/// Dates are ISO 8601 strings; relative windows take an empty object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateCondition {
    Equals(String),
    Before(String),
    After(String),
    OnOrBefore(String),
    OnOrAfter(String),
    IsEmpty(bool),
    IsNotEmpty(bool),
    PastWeek(Empty),
    PastMonth(Empty),
    PastYear(Empty),
    NextWeek(Empty),
    NextMonth(Empty),
    NextYear(Empty),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sort {
    Property {
        property: String,
        direction: SortDirection,
    },
    Timestamp {
        timestamp: SortTimestamp,
        direction: SortDirection,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortTimestamp {
    CreatedTime,
    LastEditedTime,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{
        CheckboxCondition, DatabaseQuery, DateCondition, Filter, FilterCondition, Sort,
        SortDirection, SortTimestamp, TextCondition,
    };
    use crate::model::Empty;

    #[test]
    fn empty_query_serializes_to_empty_object() {
        let value = serde_json::to_value(DatabaseQuery::default()).expect("serializes");
        assert_eq!(value, json!({}));
    }

    #[test]
    fn compound_filter_and_sorts_serialize_to_wire_shape() {
        let query = DatabaseQuery::default()
            .filter(Filter::and(vec![
                Filter::property("In stock", FilterCondition::Checkbox(CheckboxCondition::Equals(true))),
                Filter::or(vec![
                    Filter::property("Name", FilterCondition::Title(TextCondition::Contains("kale".to_owned()))),
                    Filter::timestamp(FilterCondition::CreatedTime(DateCondition::PastWeek(Empty {}))),
                ]),
            ]))
            .sort(Sort::Property {
                property: "Name".to_owned(),
                direction: SortDirection::Ascending,
            })
            .sort(Sort::Timestamp {
                timestamp: SortTimestamp::LastEditedTime,
                direction: SortDirection::Descending,
            })
            .page_size(50);

        assert_eq!(
            serde_json::to_value(&query).expect("serializes"),
            json!({
                "filter": {"and": [
                    {"property": "In stock", "checkbox": {"equals": true}},
                    {"or": [
                        {"property": "Name", "title": {"contains": "kale"}},
                        {"created_time": {"past_week": {}}}
                    ]}
                ]},
                "sorts": [
                    {"property": "Name", "direction": "ascending"},
                    {"timestamp": "last_edited_time", "direction": "descending"}
                ],
                "page_size": 50
            })
        );
    }

    #[test]
    fn query_parses_from_user_supplied_json() {
        let query: DatabaseQuery = serde_json::from_value(json!({
            "filter": {"property": "Status", "select": {"equals": "Done"}},
            "sorts": [{"timestamp": "created_time", "direction": "ascending"}]
        }))
        .expect("parses");

        assert!(matches!(query.filter, Some(Filter::Property(ref f)) if f.property == "Status"));
        assert_eq!(query.sorts.len(), 1);
        assert_eq!(query.start_cursor, None);
    }
}
