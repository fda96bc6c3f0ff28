use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

/// Pre-rendered HTML fragment. Constructed only by the markup layer, which
/// escapes any entity text it interpolates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    pub fn from_trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Display string paired with the key the client table sorts by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortableField {
    pub display: String,
    pub sortkey: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Flag(bool),
    Empty,
    Sortable(SortableField),
    Markup(Markup),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn sortable(display: impl Into<String>, sortkey: impl Into<String>) -> Self {
        Cell::Sortable(SortableField {
            display: display.into(),
            sortkey: sortkey.into(),
        })
    }

    pub fn as_markup(&self) -> Option<&Markup> {
        match self {
            Cell::Markup(markup) => Some(markup),
            _ => None,
        }
    }

    pub fn as_sortable(&self) -> Option<&SortableField> {
        match self {
            Cell::Sortable(field) => Some(field),
            _ => None,
        }
    }
}

impl From<Markup> for Cell {
    fn from(value: Markup) -> Self {
        Cell::Markup(value)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(value) => serializer.serialize_str(value),
            Cell::Integer(value) => serializer.serialize_i64(*value),
            Cell::Flag(value) => serializer.serialize_bool(*value),
            Cell::Empty => serializer.serialize_unit(),
            Cell::Sortable(field) => field.serialize(serializer),
            Cell::Markup(markup) => serializer.serialize_str(markup.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Buildings,
    Rooms,
    TagGroups,
    Tags,
    Faculty,
    Projects,
    Assessors,
}

impl TableKind {
    /// Field names the client table binds its columns to.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Buildings => &["name", "colour", "active", "menu"],
            TableKind::Rooms => &[
                "name",
                "building",
                "capacity",
                "lecture_capture",
                "active",
                "menu",
            ],
            TableKind::TagGroups => &["name", "include_name", "active", "menu"],
            TableKind::Tags => &["name", "group", "colour", "active", "menu"],
            TableKind::Faculty => &["name", "user", "roles", "active", "last_active", "menu"],
            TableKind::Projects => &["name", "owner", "group", "tags", "active", "menu"],
            TableKind::Assessors => &[
                "name",
                "confirmed",
                "available",
                "ifneeded",
                "unavailable",
                "comment",
                "menu",
            ],
        }
    }
}

/// One data-table row, serialized as a JSON object keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    kind: TableKind,
    fields: Vec<(&'static str, Cell)>,
}

impl RowRecord {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            fields: Vec::with_capacity(kind.columns().len()),
        }
    }

    pub fn with(mut self, name: &'static str, cell: impl Into<Cell>) -> Self {
        self.fields.push((name, cell.into()));
        self
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, cell)| cell)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, cell) in &self.fields {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}
