//! Display rows for the searchable photo table.

use crate::model::PhotoRecord;

/// Column headers, in display order.
pub const COLUMNS: [&str; 8] = [
    "Date", "ISO", "Height", "Width", "Color", "Make", "Key", "Author",
];

const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const MISSING: &str = "-";

/// One table row with every cell already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRow {
    pub id: String,
    pub cells: [String; 8],
}

impl From<&PhotoRecord> for PhotoRow {
    fn from(record: &PhotoRecord) -> Self {
        let date = match (record.taken_at(), record.date_time.as_deref()) {
            (Some(taken), _) => taken.format(DISPLAY_DATE_FORMAT).to_string(),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => MISSING.to_string(),
        };
        let color = if record.color { "Color" } else { "B&W" };

        Self {
            id: record.id.to_string(),
            cells: [
                date,
                record.iso.map_or_else(|| MISSING.to_string(), |iso| iso.to_string()),
                record.height.to_string(),
                record.width.to_string(),
                color.to_string(),
                record.make.clone().unwrap_or_else(|| MISSING.to_string()),
                record.key.clone(),
                record.author.clone(),
            ],
        }
    }
}

/// Formats `photos` as table rows, preserving server order.
pub fn rows(photos: &[PhotoRecord]) -> Vec<PhotoRow> {
    photos.iter().map(PhotoRow::from).collect()
}
