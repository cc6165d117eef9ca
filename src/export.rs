// 📤 CSV export of lookup results (bin_results.csv)

use crate::record::BinRecord;
use anyhow::{Context, Result};

pub const EXPORT_FILENAME: &str = "bin_results.csv";

const EXPORT_HEADER: [&str; 7] = [
    "BIN",
    "Country",
    "Flag",
    "Vendor",
    "Type",
    "Level",
    "Bank Name",
];

/// Render records as CSV with the human-readable export header
pub fn results_to_csv<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a BinRecord>,
{
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(EXPORT_HEADER)
        .context("Failed to write export header")?;

    for record in records {
        wtr.write_record([
            &record.number,
            &record.country,
            &record.flag,
            &record.vendor,
            &record.card_type,
            &record.level,
            &record.bank_name,
        ])
        .with_context(|| format!("Failed to write export row for {}", record.number))?;
    }

    let bytes = wtr.into_inner().context("Failed to flush CSV export")?;
    String::from_utf8(bytes).context("CSV export is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_header_and_quoting() {
        let records = vec![
            BinRecord::new(
                "411111",
                "United States",
                "🇺🇸",
                "Visa",
                "Credit",
                "Classic",
                "JPMorgan Chase Bank, N.A.",
            ),
            BinRecord::new("511111", "United Kingdom", "🇬🇧", "Mastercard", "Debit", "Gold", "Barclays"),
        ];

        let csv = results_to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "BIN,Country,Flag,Vendor,Type,Level,Bank Name");
        assert_eq!(
            lines[1],
            "411111,United States,🇺🇸,Visa,Credit,Classic,\"JPMorgan Chase Bank, N.A.\""
        );
        assert_eq!(lines[2], "511111,United Kingdom,🇬🇧,Mastercard,Debit,Gold,Barclays");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_empty_has_header_only() {
        let csv = results_to_csv(std::iter::empty()).unwrap();

        assert_eq!(csv, "BIN,Country,Flag,Vendor,Type,Level,Bank Name\n");
    }
}
