//! Panel payloads: what a card shows, independent of how it is drawn.

use serde::Serialize;

use crate::records::{Metric, Record};

/// Colour band for a net-worth value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WealthTier {
    /// Below 100000.
    Low,
    /// 100000 up to 200000.
    Mid,
    /// 200000 and above.
    High,
    /// Metric failed to parse.
    Unknown,
}

impl WealthTier {
    pub const MID_FLOOR: u64 = 100_000;
    pub const HIGH_FLOOR: u64 = 200_000;

    /// Classify a metric.
    pub fn classify(metric: Metric) -> Self {
        match metric {
            Metric::Known(v) if v < Self::MID_FLOOR => Self::Low,
            Metric::Known(v) if v < Self::HIGH_FLOOR => Self::Mid,
            Metric::Known(_) => Self::High,
            Metric::Unknown => Self::Unknown,
        }
    }

    /// Card background colour.
    pub fn css_background(self) -> &'static str {
        match self {
            Self::Low => "rgba(255,0,0,0.6)",
            Self::Mid => "rgba(255,165,0,0.6)",
            Self::High => "rgba(0,255,0,0.6)",
            Self::Unknown => "rgba(128,128,128,0.6)",
        }
    }
}

/// Content of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelPayload {
    /// Large heading line.
    pub title: String,
    /// Smaller lines under the heading.
    pub details: Vec<String>,
    pub tier: WealthTier,
}

impl PanelPayload {
    /// Build the card for `record`.
    ///
    /// Details are the role, company and country when present, then the net
    /// worth in ringgit (`RM ?` when unknown).
    pub fn from_record(record: &Record) -> Self {
        let mut details = Vec::with_capacity(4);
        if !record.role.is_empty() {
            details.push(record.role.clone());
        }
        details.extend(record.company.iter().cloned());
        details.extend(record.country.iter().cloned());
        details.push(format!("RM {}", record.net_worth));

        Self {
            title: record.name.clone(),
            details,
            tier: WealthTier::classify(record.net_worth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordId;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(WealthTier::classify(Metric::Known(0)), WealthTier::Low);
        assert_eq!(WealthTier::classify(Metric::Known(99_999)), WealthTier::Low);
        assert_eq!(WealthTier::classify(Metric::Known(100_000)), WealthTier::Mid);
        assert_eq!(WealthTier::classify(Metric::Known(199_999)), WealthTier::Mid);
        assert_eq!(WealthTier::classify(Metric::Known(200_000)), WealthTier::High);
        assert_eq!(WealthTier::classify(Metric::Unknown), WealthTier::Unknown);
    }

    #[test]
    fn test_unknown_is_not_coloured_as_poor() {
        assert_ne!(
            WealthTier::Unknown.css_background(),
            WealthTier::Low.css_background()
        );
    }

    #[test]
    fn test_payload_from_record() {
        let record = Record::new(RecordId(3), "Aisyah", "CEO", Metric::Known(150_000))
            .with_company("Petronas");
        let payload = PanelPayload::from_record(&record);
        assert_eq!(payload.title, "Aisyah");
        assert_eq!(payload.details, vec!["CEO", "Petronas", "RM 150000"]);
        assert_eq!(payload.tier, WealthTier::Mid);
    }

    #[test]
    fn test_payload_unknown_metric() {
        let record = Record::new(RecordId(0), "Zed", "", Metric::Unknown).with_country("Malaysia");
        let payload = PanelPayload::from_record(&record);
        assert_eq!(payload.details, vec!["Malaysia", "RM ?"]);
        assert_eq!(payload.tier, WealthTier::Unknown);
    }
}
