//! Synthetic stand-in dataset.
//!
//! Used when the remote spreadsheet cannot be loaded, so the scene always
//! has cards to show. Rows have the same shape as the company export.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::record::{Metric, Record, RecordId};

const GIVEN_NAMES: [&str; 12] = [
    "Aisyah", "Ben", "Chen", "Dinesh", "Elena", "Farid", "Grace", "Hafiz", "Irene", "Jun", "Kavya",
    "Liam",
];
const FAMILY_NAMES: [&str; 8] = ["Tan", "Lim", "Rahman", "Wong", "Singh", "Lee", "Ong", "Abdullah"];
const ROLES: [&str; 6] = ["CEO", "CTO", "CFO", "Founder", "Director", "Investor"];
const COMPANIES: [&str; 6] = ["Northwind", "Kestrel", "Bluewater", "Meridian", "Orchid", "Summit"];

/// Net worth range, chosen to cover every colour tier.
const NET_WORTH_MIN: u64 = 20_000;
const NET_WORTH_MAX: u64 = 400_000;

/// Generate `count` deterministic synthetic records.
pub fn synthetic_records(count: usize, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let given = GIVEN_NAMES[i % GIVEN_NAMES.len()];
            let family = FAMILY_NAMES[(i / GIVEN_NAMES.len()) % FAMILY_NAMES.len()];
            let role = ROLES[rng.random_range(0..ROLES.len())];
            let company = COMPANIES[rng.random_range(0..COMPANIES.len())];
            let net_worth = rng.random_range(NET_WORTH_MIN..=NET_WORTH_MAX);

            Record::new(
                RecordId(i as u32),
                format!("{given} {family}"),
                role,
                Metric::Known(net_worth),
            )
            .with_company(company)
        })
        .collect()
}
