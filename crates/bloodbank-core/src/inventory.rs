//! Blood stock inventory: one unit count per blood type.

use thiserror::Error;
use tracing::info;

use crate::models::{BloodStock, BloodType};

/// Inventory errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Duplicate stock record for {0}")]
    DuplicateType(BloodType),

    #[error("Missing stock record for {0}")]
    MissingType(BloodType),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Coerce form input to a unit count.
///
/// Reads the leading decimal digits after optional whitespace and `+`, so
/// `"12.5"` and `"12abc"` give 12. Input with no leading digits, or a
/// negative count, becomes 0. Counts past `u32::MAX` saturate.
pub fn coerce_units(input: &str) -> u32 {
    let trimmed = input.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// The session's stock counts.
#[derive(Debug, Clone)]
pub struct Inventory {
    stocks: Vec<BloodStock>,
}

impl Inventory {
    /// Build from records, requiring exactly one per blood type.
    pub fn from_stocks(stocks: Vec<BloodStock>) -> InventoryResult<Self> {
        for (i, stock) in stocks.iter().enumerate() {
            if stocks[..i].iter().any(|s| s.blood_type == stock.blood_type) {
                return Err(InventoryError::DuplicateType(stock.blood_type));
            }
        }
        if let Some(missing) = BloodType::ALL
            .into_iter()
            .find(|bt| !stocks.iter().any(|s| s.blood_type == *bt))
        {
            return Err(InventoryError::MissingType(missing));
        }
        Ok(Self { stocks })
    }

    /// The mock stock levels.
    pub fn seeded() -> Self {
        Self {
            stocks: crate::fixtures::blood_stocks(),
        }
    }

    pub fn stocks(&self) -> &[BloodStock] {
        &self.stocks
    }

    pub fn get(&self, blood_type: BloodType) -> BloodStock {
        self.stocks
            .iter()
            .copied()
            .find(|s| s.blood_type == blood_type)
            .unwrap_or(BloodStock::new(blood_type, 0))
    }

    /// Records whose type contains `query`, ignoring case and whitespace.
    pub fn list(&self, query: &str) -> Vec<BloodStock> {
        let needle: String = query
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        self.stocks
            .iter()
            .copied()
            .filter(|s| s.blood_type.as_str().to_lowercase().contains(&needle))
            .collect()
    }

    /// Overwrite the unit count for one type. Returns the updated record.
    pub fn set_units(&mut self, blood_type: BloodType, units: u32) -> BloodStock {
        let mut updated = BloodStock::new(blood_type, units);
        for stock in self.stocks.iter_mut().filter(|s| s.blood_type == blood_type) {
            info!(%blood_type, previous = stock.units, units, "Stock level set");
            stock.units = units;
            updated = *stock;
        }
        updated
    }

    /// Overwrite from raw form input (see [`coerce_units`]).
    pub fn set_units_from_input(&mut self, blood_type: BloodType, input: &str) -> BloodStock {
        self.set_units(blood_type, coerce_units(input))
    }

    pub fn total_units(&self) -> u64 {
        self.stocks.iter().map(|s| u64::from(s.units)).sum()
    }

    /// Records with fewer than `threshold` units.
    pub fn below(&self, threshold: u32) -> Vec<BloodStock> {
        self.stocks
            .iter()
            .copied()
            .filter(|s| s.units < threshold)
            .collect()
    }
}
