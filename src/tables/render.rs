//! HTML rendering for the BID tables.
//!
//! Produces two fragments embedded verbatim by the map page: the Brooklyn
//! table (BIDs near Gowanus first, the rest collapsed) and the citywide
//! borough overview. Markup is plain inline-styled tables.

use hashbrown::HashMap;

use bidmap::models::BidRecord;

const EM_DASH: &str = "—";

/// Marker colors for Brooklyn BID rows, cycled by sequence number.
/// Matches the palette used by the existing map.
const COLORS: [&str; 23] = [
    "#e6194B", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6",
    "#bfef45", "#fabed4", "#469990", "#dcbeff", "#9A6324", "#fffac8", "#800000", "#aaffc3",
    "#808000", "#ffd8b1", "#000075", "#a9a9a9", "#e6beff", "#aa6e28", "#808080",
];

/// BIDs geographically close to Gowanus, in desired display order.
const GOWANUS_NEARBY_BIDS: [&str; 11] = [
    "DUMBO",
    "Montague Street",
    "Court-Livingston-Schermerhorn",
    "Fulton Mall Improvement Association",
    "MetroTech",
    "Atlantic Avenue",
    "Myrtle Avenue Brooklyn Partnership",
    "Fulton Area Business (FAB) Alliance",
    "Bed-Stuy Gateway",
    "North Flatbush",
    "Park Slope 5th Avenue",
];

/// Borough display order for the overview table.
const BOROUGH_ORDER: [&str; 5] = ["Manhattan", "Brooklyn", "Bronx", "Queens", "Staten Island"];

fn borough_color(borough: &str) -> &'static str {
    match borough {
        "Manhattan" => "#3388ff",
        "Brooklyn" => "#28a745",
        "Bronx" => "#e67e22",
        "Queens" => "#9b59b6",
        "Staten Island" => "#1abc9c",
        _ => "#808080",
    }
}

/// Compact currency: `$1.5M`, `$3K`, `$950`, or an em dash for absent/zero.
///
/// The thousands branch rounds half away from zero, so `$2,500` renders as
/// `$3K`.
pub fn format_currency(val: Option<f64>) -> String {
    compact_currency(val, false)
}

/// Overview variant: like [`format_currency`] but keeps one decimal in the
/// thousands branch (`$2.5K`), since borough sums warrant the precision.
pub fn format_currency_large(val: Option<f64>) -> String {
    compact_currency(val, true)
}

fn compact_currency(val: Option<f64>, decimal_thousands: bool) -> String {
    let v = match val {
        Some(v) if v != 0.0 => v,
        _ => return EM_DASH.to_string(),
    };
    if v >= 1_000_000.0 {
        format!("${:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        if decimal_thousands {
            format!("${:.1}K", v / 1_000.0)
        } else {
            format!("${}K", (v / 1_000.0).round() as i64)
        }
    } else {
        format!("${}", v.round() as i64)
    }
}

/// Thousands-separated count, em dash for absent/zero.
pub fn format_number(val: Option<f64>) -> String {
    let v = match val {
        Some(v) if v != 0.0 => v,
        _ => return EM_DASH.to_string(),
    };
    group_thousands(v as i64)
}

pub fn format_year(val: Option<f64>) -> String {
    match val {
        Some(y) => (y as i64).to_string(),
        None => EM_DASH.to_string(),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// One `<tr>` for a BID. `indent` deepens the markup for rows inside the
/// collapsed `<details>` section.
fn bid_row_html(record: &BidRecord, color: &str, seq: usize, indent: bool) -> String {
    let p = if indent { "            " } else { "        " };
    let properties = match record.properties {
        Some(v) if v > 0.0 => (v as i64).to_string(),
        _ => EM_DASH.to_string(),
    };

    format!(
        "{p}<tr>\n\
         {p}    <td style=\"text-align: center; padding: 4px 3px;\"><span style=\"color: {color}; font-size: 14px;\">■</span> {seq}</td>\n\
         {p}    <td style=\"padding: 4px 3px;\">{name}</td>\n\
         {p}    <td style=\"text-align: center; padding: 4px 3px;\">{year}</td>\n\
         {p}    <td style=\"text-align: right; padding: 4px 3px;\">{properties}</td>\n\
         {p}    <td style=\"text-align: right; padding: 4px 3px;\">{assessment}</td>\n\
         {p}    <td style=\"text-align: right; padding: 4px 3px;\">{budget}</td>\n\
         {p}</tr>\n",
        p = p,
        color = color,
        seq = seq,
        name = record.name,
        year = format_year(record.year),
        properties = properties,
        assessment = format_currency(record.assessment),
        budget = format_currency(record.budget),
    )
}

const TABLE_HEADER: &str = r#"    <p style="margin: 0 0 8px 0; font-size: 9px; color: #666;"><b>BIDs Near Gowanus:</b></p>
    <table style="border-collapse: collapse; font-size: 10px; width: 100%;">
        <tr style="border-bottom: 2px solid #333; background-color: #f5f5f5;">
            <th style="text-align: center; padding: 5px 3px;">#</th>
            <th style="text-align: left; padding: 5px 3px;">BID Name</th>
            <th style="text-align: center; padding: 5px 3px;">Year</th>
            <th style="text-align: right; padding: 5px 3px;">Properties ▼</th>
            <th style="text-align: right; padding: 5px 3px;">Assessment</th>
            <th style="text-align: right; padding: 5px 3px;">Budget</th>
        </tr>

"#;

const GOWANUS_ROW: &str = r#"
        <tr style="background-color: #d4edda; border-top: 1px solid #28a745;">
            <td style="text-align: center; padding: 4px 3px;"><span style="color: #1e7e34; font-size: 14px; border: 2px solid #cc0000;">■</span></td>
            <td style="padding: 4px 3px; font-weight: bold; color: #1e7e34;">Gowanus BID (Proposed)</td>
            <td style="text-align: center; padding: 4px 3px;">—</td>
            <td style="text-align: right; padding: 4px 3px;">—</td>
            <td style="text-align: right; padding: 4px 3px;">—</td>
            <td style="text-align: right; padding: 4px 3px;">—</td>
        </tr>
    </table>
"#;

/// Render the Brooklyn BIDs table fragment.
///
/// The 11 BIDs near Gowanus lead in fixed order, numbered sequentially and
/// colored from the palette; a highlighted row for the proposed Gowanus BID
/// follows; the remaining Brooklyn BIDs go inside a collapsible section,
/// sorted by property count descending, numbering continuing throughout.
pub fn brooklyn_table(records: &[BidRecord]) -> String {
    let mut brooklyn: Vec<&BidRecord> = records
        .iter()
        .filter(|r| r.borough == "Brooklyn")
        .collect();
    brooklyn.sort_by(|a, b| {
        b.properties
            .unwrap_or(0.0)
            .total_cmp(&a.properties.unwrap_or(0.0))
    });

    let by_name: HashMap<&str, &BidRecord> =
        brooklyn.iter().map(|r| (r.name.as_str(), *r)).collect();

    let mut seq = 1usize;
    let mut main_rows: Vec<String> = Vec::new();
    for name in GOWANUS_NEARBY_BIDS {
        if let Some(record) = by_name.get(name).copied() {
            let color = COLORS[(seq - 1) % COLORS.len()];
            main_rows.push(bid_row_html(record, color, seq, false));
            seq += 1;
        }
    }

    let mut other_rows: Vec<String> = Vec::new();
    for record in brooklyn
        .iter()
        .copied()
        .filter(|r| !GOWANUS_NEARBY_BIDS.contains(&r.name.as_str()))
    {
        let color = COLORS[(seq - 1) % COLORS.len()];
        other_rows.push(bid_row_html(record, color, seq, true));
        seq += 1;
    }

    let mut html = String::from(TABLE_HEADER);
    html.push_str(&main_rows.join("\n"));
    html.push_str(GOWANUS_ROW);

    if !other_rows.is_empty() {
        html.push_str(&format!(
            "\n    <details style=\"margin-top: 8px;\">\n        \
             <summary style=\"cursor: pointer; font-size: 10px; color: #666; padding: 4px 0;\">Show all other Brooklyn BIDs ({} more)...</summary>\n        \
             <table style=\"border-collapse: collapse; font-size: 10px; width: 100%; margin-top: 6px;\">\n\n",
            other_rows.len()
        ));
        html.push_str(&other_rows.join("\n"));
        html.push_str("        </table>\n    </details>\n");
    }

    html
}

/// Per-borough aggregates for the overview table.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoroughStats {
    pub bid_count: usize,
    pub properties: f64,
    pub assessment: f64,
    pub budget: f64,
}

fn aggregate_by_borough(records: &[BidRecord]) -> HashMap<&str, BoroughStats> {
    let mut stats: HashMap<&str, BoroughStats> = HashMap::new();
    for record in records {
        let entry = stats.entry(record.borough.as_str()).or_default();
        entry.bid_count += 1;
        entry.properties += record.properties.unwrap_or(0.0);
        entry.assessment += record.assessment.unwrap_or(0.0);
        entry.budget += record.budget.unwrap_or(0.0);
    }
    stats
}

/// Render the citywide borough overview fragment with a totals row.
pub fn overview_table(records: &[BidRecord]) -> String {
    let stats = aggregate_by_borough(records);

    let totals = stats.values().fold(BoroughStats::default(), |mut acc, s| {
        acc.bid_count += s.bid_count;
        acc.properties += s.properties;
        acc.assessment += s.assessment;
        acc.budget += s.budget;
        acc
    });

    let mut rows = String::new();
    for (i, &borough) in BOROUGH_ORDER.iter().enumerate() {
        let Some(s) = stats.get(borough) else {
            continue;
        };
        let bg_style = if i % 2 == 1 {
            " style=\"background-color: #f9f9f9;\""
        } else {
            ""
        };
        rows.push_str(&format!(
            "        <tr{bg}>\n            \
             <td style=\"padding: 5px 4px;\"><span style=\"color: {color}; font-size: 14px;\">■</span></td>\n            \
             <td style=\"padding: 5px 4px;\">{borough}</td>\n            \
             <td style=\"text-align: right; padding: 5px 4px; font-weight: bold;\">{count}</td>\n            \
             <td style=\"text-align: right; padding: 5px 4px;\">{properties}</td>\n            \
             <td style=\"text-align: right; padding: 5px 4px;\">{assessment}</td>\n            \
             <td style=\"text-align: right; padding: 5px 4px;\">{budget}</td>\n        </tr>\n",
            bg = bg_style,
            color = borough_color(borough),
            borough = borough,
            count = s.bid_count,
            properties = format_number(Some(s.properties)),
            assessment = format_currency_large(Some(s.assessment)),
            budget = format_currency_large(Some(s.budget)),
        ));
    }

    format!(
        "    <h3 style=\"margin: 0 0 10px 0;\">NYC BIDs by Borough (Ex. Proposed Gowanus BID)</h3>\n    \
         <table style=\"border-collapse: collapse; font-size: 11px; width: 100%;\">\n        \
         <tr style=\"border-bottom: 2px solid #333; background-color: #f5f5f5;\">\n            \
         <th style=\"text-align: left; padding: 6px 4px;\"></th>\n            \
         <th style=\"text-align: left; padding: 6px 4px;\">Borough</th>\n            \
         <th style=\"text-align: right; padding: 6px 4px;\"># BIDs</th>\n            \
         <th style=\"text-align: right; padding: 6px 4px;\">Properties</th>\n            \
         <th style=\"text-align: right; padding: 6px 4px;\">Assessment</th>\n            \
         <th style=\"text-align: right; padding: 6px 4px;\">Budget</th>\n        </tr>\n\n{rows}        \
         <tr style=\"border-top: 2px solid #333; background-color: #eee; font-weight: bold;\">\n            \
         <td style=\"padding: 6px 4px;\"></td>\n            \
         <td style=\"padding: 6px 4px;\">Total</td>\n            \
         <td style=\"text-align: right; padding: 6px 4px;\">{total_bids}</td>\n            \
         <td style=\"text-align: right; padding: 6px 4px;\">{total_properties}</td>\n            \
         <td style=\"text-align: right; padding: 6px 4px;\">{total_assessment}</td>\n            \
         <td style=\"text-align: right; padding: 6px 4px;\">{total_budget}</td>\n        </tr>\n    </table>\n    \
         <p style=\"margin: 8px 0 4px 0; font-size: 9px; color: #888;\">\n        \
         Source: NYC Small Business Services (via NYC Open Data API)<br>\n        \
         *Data quality notes: Some BIDs may have incomplete assessment/budget data\n    </p>\n",
        rows = rows,
        total_bids = totals.bid_count,
        total_properties = format_number(Some(totals.properties)),
        total_assessment = format_currency_large(Some(totals.assessment)),
        total_budget = format_currency_large(Some(totals.budget)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(borough: &str, name: &str, properties: f64) -> BidRecord {
        BidRecord {
            borough: borough.to_string(),
            name: name.to_string(),
            properties: Some(properties),
            assessment: Some(properties * 10_000.0),
            budget: Some(properties * 1_000.0),
            year: Some(1990.0),
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(None), "—");
        assert_eq!(format_currency(Some(0.0)), "—");
        assert_eq!(format_currency(Some(1_500_000.0)), "$1.5M");
        assert_eq!(format_currency(Some(2_500.0)), "$3K");
        assert_eq!(format_currency(Some(950.0)), "$950");
    }

    #[test]
    fn test_format_currency_large() {
        assert_eq!(format_currency_large(Some(2_500.0)), "$2.5K");
        assert_eq!(format_currency_large(Some(12_300_000.0)), "$12.3M");
        assert_eq!(format_currency_large(None), "—");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(None), "—");
        assert_eq!(format_number(Some(0.0)), "—");
        assert_eq!(format_number(Some(999.0)), "999");
        assert_eq!(format_number(Some(1_234_567.0)), "1,234,567");
    }

    #[test]
    fn test_brooklyn_table_ordering() {
        let records = vec![
            record("Brooklyn", "DUMBO", 91.0),
            record("Brooklyn", "MetroTech", 300.0),
            record("Brooklyn", "Sunset Park", 500.0),
            record("Manhattan", "Times Square", 1000.0),
        ];
        let html = brooklyn_table(&records);

        // Nearby BIDs keep the fixed display order, not property order.
        let dumbo = html.find("DUMBO").unwrap();
        let metrotech = html.find("MetroTech").unwrap();
        assert!(dumbo < metrotech);

        // Sunset Park is not near Gowanus: collapsed section, numbering continues.
        assert!(html.contains("Show all other Brooklyn BIDs (1 more)..."));
        let sunset = html.find("Sunset Park").unwrap();
        assert!(metrotech < sunset);

        // Manhattan BIDs never appear; the proposed Gowanus row always does.
        assert!(!html.contains("Times Square"));
        assert!(html.contains("Gowanus BID (Proposed)"));
    }

    #[test]
    fn test_brooklyn_table_without_others() {
        let records = vec![record("Brooklyn", "DUMBO", 91.0)];
        let html = brooklyn_table(&records);
        assert!(!html.contains("<details"));
    }

    #[test]
    fn test_overview_totals() {
        let records = vec![
            record("Brooklyn", "A", 100.0),
            record("Brooklyn", "B", 200.0),
            record("Queens", "C", 50.0),
        ];
        let html = overview_table(&records);

        assert!(html.contains("Total"));
        // 350 properties across all boroughs.
        assert!(html.contains("350"));
        // Brooklyn row shows 2 BIDs.
        let brooklyn = html.find("Brooklyn").unwrap();
        let queens = html.find("Queens").unwrap();
        assert!(brooklyn < queens);
    }
}
