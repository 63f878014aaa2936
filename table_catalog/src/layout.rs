use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use tablesort::{column_id_extractor, ColumnSpec, ColumnType, RowIdExtractor};

/// How one dashboard table is built from records and which of its
/// columns can be sorted. Column order is the order of `columns`.
#[derive(Deserialize, Clone, Debug)]
pub struct TableLayout {
    pub title: String,
    /// Column whose value is the row's stable id.
    #[serde(default)]
    pub row_id: Option<usize>,
    pub columns: IndexMap<String, ColumnLayout>
}

#[derive(Deserialize, Clone, Debug)]
pub struct ColumnLayout {
    /// Record key shown in the cell.
    pub field: String,
    #[serde(rename = "type", default, deserialize_with = "column_type")]
    pub ty: ColumnType,
    #[serde(default = "sortable")]
    pub sortable: bool,
    /// Record key holding the value to sort by, when it differs from what is shown.
    #[serde(default)]
    pub sort_field: Option<String>,
    /// Text shown when the record has no value for `field`.
    #[serde(default)]
    pub fallback: Option<String>,
    /// Appended to the displayed value, e.g. a unit.
    #[serde(default)]
    pub suffix: Option<String>,
    /// Display text for `true` and `false`.
    #[serde(default)]
    pub labels: Option<(String, String)>
}

fn sortable() -> bool {
    true
}

fn column_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ColumnType, D::Error> {
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl TableLayout {
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, idx: usize) -> Option<(&str, &ColumnLayout)> {
        self.columns.get_index(idx).map(|(title, column)| (title.as_str(), column))
    }

    pub fn column_specs(&self) -> Vec<ColumnSpec> {
        self.columns.values()
            .enumerate()
            .filter(|(_, column)| column.sortable)
            .map(|(idx, column)| ColumnSpec::new(idx, column.ty))
            .collect()
    }

    pub fn row_id_extractor(&self) -> Option<RowIdExtractor> {
        self.row_id.map(column_id_extractor)
    }
}

impl ColumnLayout {
    pub fn bool_label(&self, value: bool) -> &str {
        match (&self.labels, value) {
            (Some((yes, _)), true) => yes,
            (Some((_, no)), false) => no,
            (None, true) => "Да",
            (None, false) => "Нет"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOREMEN: &str = r#"{
        "title": "Бригадиры",
        "row_id": 0,
        "columns": {
            "ID": { "field": "id", "type": "number" },
            "ФИО": { "field": "full_name", "type": "string" },
            "Дата регистрации": { "field": "registration_date", "type": "date" },
            "Статус": { "field": "is_active", "type": "boolean", "labels": ["✅ Доступен", "❌ Заблокирован"] },
            "Действия": { "field": "", "sortable": false }
        }
    }"#;

    #[test]
    fn parses_layout() {
        let layout: TableLayout = serde_json::from_str(FOREMEN).unwrap();
        assert_eq!(layout.title, "Бригадиры");
        assert_eq!(layout.headers().collect::<Vec<_>>(), ["ID", "ФИО", "Дата регистрации", "Статус", "Действия"]);

        let (title, status) = layout.column(3).unwrap();
        assert_eq!(title, "Статус");
        assert_eq!(status.ty, ColumnType::Boolean);
        assert_eq!(status.bool_label(false), "❌ Заблокирован");

        let (_, actions) = layout.column(4).unwrap();
        assert!(!actions.sortable);
        assert_eq!(actions.ty, ColumnType::Text);
        assert_eq!(actions.bool_label(true), "Да");
    }

    #[test]
    fn specs_skip_unsortable_columns() {
        let layout: TableLayout = serde_json::from_str(FOREMEN).unwrap();
        let specs = layout.column_specs();
        assert_eq!(specs.iter().map(|spec| spec.index).collect::<Vec<_>>(), [0, 1, 2, 3]);
        assert_eq!(specs[2].ty, ColumnType::Date);
        assert!(layout.row_id_extractor().is_some());
    }

    #[test]
    fn rejects_unknown_type() {
        let err = serde_json::from_str::<TableLayout>(r#"{
            "title": "t",
            "columns": { "a": { "field": "a", "type": "money" } }
        }"#).unwrap_err();
        assert!(err.to_string().contains("money"));
    }
}
