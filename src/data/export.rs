use std::path::Path;

use anyhow::{Context, Result};

use super::model::SalesRecord;

/// Default file name offered by the download action.
pub const FILE_NAME: &str = "filtered_sales_data.csv";

/// Serialize rows as UTF-8 CSV with a header row of the canonical column
/// names. An empty input still produces the header.
pub fn encode<'a>(rows: impl IntoIterator<Item = &'a SalesRecord>) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(super::model::COLUMNS)
        .context("writing CSV header")?;
    for (i, record) in rows.into_iter().enumerate() {
        writer
            .serialize(record)
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))
}

/// Encode `rows` and write them to `path`.
pub fn write_csv<'a>(path: &Path, rows: impl IntoIterator<Item = &'a SalesRecord>) -> Result<usize> {
    let bytes = encode(rows)?;
    std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{self, FilterSelection, ALL};
    use crate::data::model::tests::record;
    use crate::data::model::{Dataset, Month};

    fn decode(bytes: &[u8]) -> Vec<SalesRecord> {
        csv::Reader::from_reader(bytes)
            .deserialize::<SalesRecord>()
            .collect::<Result<_, _>>()
            .expect("decode CSV")
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record("East", "Tech", "Phones", "Pixel, 128GB", 2023, Month::January, 100.0, 20.0),
            record("West", "Tech", "Phones", "Quote \"Pro\"", 2023, Month::February, 50.5, -5.25),
            record("East", "Office", "Paper", "Ream", 2022, Month::December, 12.0, 3.0),
        ])
    }

    #[test]
    fn header_uses_canonical_column_names() {
        let bytes = encode(std::iter::empty::<&SalesRecord>()).expect("encode");
        let text = String::from_utf8(bytes).expect("utf-8");
        assert_eq!(
            text.trim_end(),
            "Region,Category,Sub-Category,Product Name,Year,Month,Sales,Profit,Profit Margin (%)"
        );
    }

    #[test]
    fn subset_round_trips() {
        let ds = dataset();
        let selection = FilterSelection::from_labels("East", ALL, ALL).expect("labels");
        let subset = filter::apply(&ds, &selection);

        let decoded = decode(&encode(&subset).expect("encode"));
        assert_eq!(decoded.len(), subset.len());
        for (got, want) in decoded.iter().zip(subset.iter()) {
            assert_eq!(got.region, want.region);
            assert_eq!(got.product_name, want.product_name);
            assert_eq!(got.month, want.month);
            assert_eq!(got.year, want.year);
            assert!((got.sales - want.sales).abs() < 1e-9);
            assert!((got.profit_margin - want.profit_margin).abs() < 1e-9);
        }
    }

    #[test]
    fn quoting_survives_round_trip() {
        let ds = dataset();
        let decoded = decode(&encode(&ds).expect("encode"));
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].product_name, "Pixel, 128GB");
        assert_eq!(decoded[1].product_name, "Quote \"Pro\"");
        assert_eq!(decoded[1].profit, -5.25);
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(FILE_NAME);
        let n = write_csv(&path, &dataset()).expect("write");
        let on_disk = std::fs::read(&path).expect("read back");
        assert_eq!(on_disk.len(), n);
        assert_eq!(decode(&on_disk).len(), 3);
    }
}
