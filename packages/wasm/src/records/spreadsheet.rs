//! Spreadsheet (CSV) import.
//!
//! The first row is always a header. Columns are bound by header name so the
//! same parser reads both known exports:
//!
//! - `name, role, company, networth`
//! - `name, title, networth, country`
//!
//! When either the name or the net-worth header is not recognisable the
//! parser falls back to the positional order `name, role, company, networth`.
//! Quoted fields with embedded commas are handled by the `csv` crate.

use csv::{ReaderBuilder, StringRecord, Trim};

use super::DataError;
use super::record::{Metric, Record, RecordId};

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    name: usize,
    role: Option<usize>,
    company: Option<usize>,
    country: Option<usize>,
    net_worth: Option<usize>,
    revenue: Option<usize>,
    employees: Option<usize>,
}

impl ColumnMap {
    /// The column order of the company export.
    fn positional() -> Self {
        Self {
            name: 0,
            role: Some(1),
            company: Some(2),
            country: None,
            net_worth: Some(3),
            revenue: None,
            employees: None,
        }
    }

    fn from_headers(headers: &StringRecord) -> Self {
        let keys: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |pred: fn(&str) -> bool| keys.iter().position(|k| pred(k));

        let name = find(|k| matches!(k, "name" | "fullname" | "person"));
        let net_worth = find(|k| k.starts_with("networth") || k == "wealth");

        let (Some(name), Some(net_worth)) = (name, net_worth) else {
            return Self::positional();
        };

        Self {
            name,
            role: find(|k| matches!(k, "role" | "title" | "category" | "position")),
            company: find(|k| matches!(k, "company" | "organization" | "organisation")),
            country: find(|k| k == "country"),
            net_worth: Some(net_worth),
            revenue: find(|k| k.starts_with("revenue")),
            employees: find(|k| matches!(k, "employees" | "employeecount" | "headcount")),
        }
    }
}

/// Lowercase and keep only ASCII alphanumerics, so `Net Worth (RM)` becomes `networthrm`.
fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn cell(row: &StringRecord, column: Option<usize>) -> Option<&str> {
    column.and_then(|i| row.get(i)).filter(|s| !s.is_empty())
}

/// Parse CSV text into records.
///
/// Blank rows are skipped. Record ids are assigned in row order over the kept
/// rows. Malformed numeric cells become [`Metric::Unknown`].
pub fn parse_csv(text: &str) -> Result<Vec<Record>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let columns = ColumnMap::from_headers(reader.headers()?);
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }

        let id = RecordId(records.len() as u32);
        let name = row.get(columns.name).unwrap_or_default();
        let role = cell(&row, columns.role).unwrap_or_default();
        let net_worth = cell(&row, columns.net_worth).map_or(Metric::Unknown, Metric::parse);

        let mut record = Record::new(id, name, role, net_worth);
        record.company = cell(&row, columns.company).map(str::to_owned);
        record.country = cell(&row, columns.country).map(str::to_owned);
        record.revenue = columns
            .revenue
            .map(|_| cell(&row, columns.revenue).map_or(Metric::Unknown, Metric::parse));
        record.employees = columns
            .employees
            .map(|_| cell(&row, columns.employees).map_or(Metric::Unknown, Metric::parse));

        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let records = parse_csv("").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_header_only() {
        let records = parse_csv("name,role,company,networth\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_company_export() {
        let text = "Name,Role,Company,Networth\n\
                    Aisyah,CEO,Petronas,150000\n\
                    Ben,CTO,Grab,90000\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].id, RecordId(0));
        assert_eq!(records[0].name, "Aisyah");
        assert_eq!(records[0].role, "CEO");
        assert_eq!(records[0].company.as_deref(), Some("Petronas"));
        assert_eq!(records[0].net_worth, Metric::Known(150_000));
        assert_eq!(records[0].country, None);
        assert_eq!(records[0].revenue, None);

        assert_eq!(records[1].id, RecordId(1));
        assert_eq!(records[1].net_worth, Metric::Known(90_000));
    }

    #[test]
    fn test_country_export_binds_by_header() {
        let text = "name,title,netWorth,country\nChen,Founder,300000,Malaysia\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].role, "Founder");
        assert_eq!(records[0].net_worth, Metric::Known(300_000));
        assert_eq!(records[0].country.as_deref(), Some("Malaysia"));
        assert_eq!(records[0].company, None);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let text = "name,role,company,net worth (RM)\n\
                    \"Lim, Daniel\",Director,\"Acme, Inc.\",\"1,250,000\"\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records[0].name, "Lim, Daniel");
        assert_eq!(records[0].company.as_deref(), Some("Acme, Inc."));
        assert_eq!(records[0].net_worth, Metric::Known(1_250_000));
    }

    #[test]
    fn test_malformed_metric_is_unknown() {
        let text = "name,role,company,networth\nEve,Analyst,Shell,lots\nZed,Intern,Shell,\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records[0].net_worth, Metric::Unknown);
        assert_eq!(records[1].net_worth, Metric::Unknown);
    }

    #[test]
    fn test_unrecognised_header_is_positional() {
        let text = "a,b,c,d\nKim,Lead,Maxis,120000\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records[0].name, "Kim");
        assert_eq!(records[0].role, "Lead");
        assert_eq!(records[0].company.as_deref(), Some("Maxis"));
        assert_eq!(records[0].net_worth, Metric::Known(120_000));
    }

    #[test]
    fn test_unrecognised_net_worth_header_is_positional() {
        let text = "name,role,company,value\nKim,Lead,Maxis,120000\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records[0].name, "Kim");
        assert_eq!(records[0].company.as_deref(), Some("Maxis"));
        assert_eq!(records[0].net_worth, Metric::Known(120_000));
    }

    #[test]
    fn test_blank_rows_skipped_and_ids_dense() {
        let text = "name,role,company,networth\nA,r,c,1\n\n,,,\nB,r,c,2\r\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "B");
        assert_eq!(records[1].id, RecordId(1));
        assert_eq!(records[1].net_worth, Metric::Known(2));
    }

    #[test]
    fn test_short_rows_tolerated() {
        let text = "name,role,company,networth\nSolo\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records[0].name, "Solo");
        assert_eq!(records[0].role, "");
        assert_eq!(records[0].net_worth, Metric::Unknown);
    }

    #[test]
    fn test_optional_metric_columns() {
        let text = "name,category,revenue,employees,networth\nOrbit,Tech,5000000,,800000\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records[0].role, "Tech");
        assert_eq!(records[0].revenue, Some(Metric::Known(5_000_000)));
        assert_eq!(records[0].employees, Some(Metric::Unknown));
        assert_eq!(records[0].net_worth, Metric::Known(800_000));
    }
}
