// 💳 BIN Record - one row of the BIN dataset
//
// Field names match the CSV header and the JSON wire format exactly,
// so the same struct is used for both.

use serde::{Deserialize, Serialize};

/// Header every dataset file must carry, in this order
pub const CSV_HEADER: [&str; 7] = [
    "number",
    "country",
    "flag",
    "vendor",
    "type",
    "level",
    "bank_name",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinRecord {
    /// BIN/IIN prefix (leading digits of a card number)
    pub number: String,

    /// Issuing country name
    pub country: String,

    /// Emoji flag or short code for the country
    pub flag: String,

    /// Card network (Visa, Mastercard, ...)
    pub vendor: String,

    /// Credit / debit / prepaid
    #[serde(rename = "type")]
    pub card_type: String,

    /// Classic / gold / platinum / business / ...
    pub level: String,

    /// Issuing institution
    pub bank_name: String,
}

impl BinRecord {
    pub fn new(
        number: &str,
        country: &str,
        flag: &str,
        vendor: &str,
        card_type: &str,
        level: &str,
        bank_name: &str,
    ) -> Self {
        BinRecord {
            number: number.to_string(),
            country: country.to_string(),
            flag: flag.to_string(),
            vendor: vendor.to_string(),
            card_type: card_type.to_string(),
            level: level.to_string(),
            bank_name: bank_name.to_string(),
        }
    }

    /// Query is a prefix of the stored BIN (not the reverse)
    pub fn matches_prefix(&self, query: &str) -> bool {
        self.number.starts_with(query)
    }
}
