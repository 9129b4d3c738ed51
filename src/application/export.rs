//! Single-row tabular export of a product record

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::domain::product::ProductRecord;

/// Separator between items inside one cell
pub const CELL_SEPARATOR: &str = " | ";

/// Flattened record with one string per column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Features")]
    pub features: String,
    #[serde(rename = "TechnicalDetails")]
    pub technical_details: String,
    #[serde(rename = "Reviews")]
    pub reviews: String,
}

pub fn to_table_row(record: &ProductRecord) -> ExportRow {
    ExportRow {
        title: record.title.clone(),
        features: record.features.join(CELL_SEPARATOR),
        technical_details: record
            .technical_details
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(CELL_SEPARATOR),
        reviews: record.flat_reviews().join(CELL_SEPARATOR),
    }
}

/// Header line followed by one line per row
pub fn write_csv<W: Write>(writer: W, rows: &[ExportRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row).context("Failed to write CSV row")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn export_to_path(record: &ProductRecord, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {path:?}"))?;
    write_csv(file, &[to_table_row(record)])?;
    info!("💾 Exported {} to {:?}", record.identifier, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{ProductFields, ProductIdentifier, Review, TechnicalDetails};
    use crate::domain::review_quota::RatingTier;

    fn record() -> ProductRecord {
        let fields = ProductFields {
            title: "Lampe".to_string(),
            features: vec!["LED".to_string(), "USB-C".to_string()],
            technical_details: [("Poids", "300 g"), ("Couleur", "Noir")].into_iter().collect::<TechnicalDetails>(),
        };
        ProductRecord::from_fields(ProductIdentifier::new("fr", "B0EXAMPLE1"), fields).with_reviews(vec![
            Review::new(RatingTier::try_from(5).unwrap(), "Top"),
            Review::new(RatingTier::try_from(1).unwrap(), "Cassée"),
        ])
    }

    #[test]
    fn test_row_columns() {
        let row = to_table_row(&record());
        assert_eq!(row.title, "Lampe");
        assert_eq!(row.features, "LED | USB-C");
        assert_eq!(row.technical_details, "Poids: 300 g | Couleur: Noir");
        assert_eq!(row.reviews, "5★: Top | 1★: Cassée");
    }

    #[test]
    fn test_csv_has_header_and_row() {
        let mut out = Vec::new();
        write_csv(&mut out, &[to_table_row(&record())]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Title,Features,TechnicalDetails,Reviews"));
        assert_eq!(
            lines.next(),
            Some("Lampe,LED | USB-C,Poids: 300 g | Couleur: Noir,5★: Top | 1★: Cassée")
        );
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.csv");
        export_to_path(&record(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Title,Features"));
    }
}
