//! Record type and related structures.
//!
//! A record is one row of the dataset. Each record has:
//! - A position index (stable for one dataset snapshot)
//! - Display fields (name, role, company, country)
//! - Numeric metrics that are either known or explicitly unknown

use std::fmt;

use serde::Serialize;

/// Record identifier.
///
/// The index of the record within the loaded dataset. Managed objects,
/// layout targets and transitions all share this index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordId(pub u32);

impl RecordId {
    /// Create a new RecordId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Get the id as a slot index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({})", self.0)
    }
}

impl From<u32> for RecordId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<RecordId> for u32 {
    #[inline]
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// A non-negative integer metric that may have failed to parse.
///
/// Serializes as the number, or `null` when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(untagged)]
pub enum Metric {
    /// A parsed value.
    Known(u64),
    /// The source field was missing or malformed.
    #[default]
    Unknown,
}

impl Metric {
    /// Parse a spreadsheet cell.
    ///
    /// Accepts plain digits, thousands grouping with one kind of separator
    /// (`1,200,000` or `1 200 000`), and a leading currency marker (`RM`,
    /// `$`). Anything else, including misplaced separators, negative numbers
    /// and decimals, is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let stripped = trimmed
            .strip_prefix("RM")
            .or_else(|| trimmed.strip_prefix('$'))
            .unwrap_or(trimmed)
            .trim_start();

        ungroup(stripped)
            .and_then(|digits| digits.parse().ok())
            .map_or(Self::Unknown, Self::Known)
    }

    /// Get the value if known.
    #[inline]
    pub fn value(self) -> Option<u64> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown => None,
        }
    }

    /// Check if the metric is known.
    #[inline]
    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => write!(f, "{v}"),
            Self::Unknown => f.write_str("?"),
        }
    }
}

/// Strip well-formed thousands grouping: 1 to 3 leading digits, then groups
/// of exactly 3, all split by the same separator.
fn ungroup(text: &str) -> Option<String> {
    let digits = match text.chars().find(|c| matches!(c, ',' | ' ')) {
        None => text.to_owned(),
        Some(separator) => {
            let mut groups = text.split(separator);
            let head = groups.next().filter(|h| (1..=3).contains(&h.len()))?;
            let mut digits = head.to_owned();
            for group in groups {
                if group.len() != 3 {
                    return None;
                }
                digits.push_str(group);
            }
            digits
        }
    };

    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

/// Which metric a summary or colouring rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricField {
    #[default]
    NetWorth,
    Revenue,
    Employees,
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    /// Role, title or category label.
    pub role: String,
    pub company: Option<String>,
    pub country: Option<String>,
    pub net_worth: Metric,
    /// `None` when the dataset has no revenue column.
    pub revenue: Option<Metric>,
    /// `None` when the dataset has no employee column.
    pub employees: Option<Metric>,
}

impl Record {
    /// Create a record with only the required fields set.
    pub fn new(id: RecordId, name: impl Into<String>, role: impl Into<String>, net_worth: Metric) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
            company: None,
            country: None,
            net_worth,
            revenue: None,
            employees: None,
        }
    }

    /// Set the company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set the country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Read a metric. Absent columns read as `Unknown`.
    pub fn metric(&self, field: MetricField) -> Metric {
        match field {
            MetricField::NetWorth => self.net_worth,
            MetricField::Revenue => self.revenue.unwrap_or_default(),
            MetricField::Employees => self.employees.unwrap_or_default(),
        }
    }
}
