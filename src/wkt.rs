//! WKT `MULTIPOLYGON` parsing.
//!
//! Extracts one exterior ring per polygon part; interior (hole) rings are
//! dropped deliberately since the map only needs the outer outlines.
//! Malformed coordinate pairs and empty rings are skipped silently, so a
//! damaged geometry degrades to fewer rings rather than an error.

use geo_types::Coord;

/// An ordered sequence of lon/lat vertices, implicitly closed.
pub type Ring = Vec<Coord<f64>>;

/// Parse a WKT `MULTIPOLYGON(...)` string into its exterior rings.
///
/// For a well-formed multipolygon with N polygon parts this returns
/// exactly N rings, coordinates in textual order.
pub fn parse_multipolygon(wkt: &str) -> Vec<Ring> {
    let trimmed = wkt.trim();

    // Strip the keyword and the outermost paren pair.
    let mut inner = match trimmed.get(.."MULTIPOLYGON".len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case("MULTIPOLYGON") => {
            trimmed["MULTIPOLYGON".len()..].trim_start()
        }
        _ => trimmed,
    };
    if inner.starts_with('(') && inner.ends_with(')') {
        inner = inner[1..inner.len() - 1].trim();
    }

    top_level_groups(inner)
        .into_iter()
        .filter_map(exterior_ring)
        .collect()
}

/// Find top-level balanced `(...)` groups by bracket-depth scanning.
fn top_level_groups(text: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, ch) in text.char_indices() {
        match ch {
            '(' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(s) = start.take() {
                        groups.push(&text[s..=i]);
                    }
                }
            }
            _ => {}
        }
    }

    groups
}

/// Pull the first (exterior) ring out of a polygon block, ignoring holes.
fn exterior_ring(block: &str) -> Option<Ring> {
    let mut body = block.trim();
    body = body.strip_prefix('(').unwrap_or(body);
    body = body.strip_suffix(')').unwrap_or(body);

    let first = top_level_groups(body).into_iter().next()?;
    let mut inner = first.trim();
    inner = inner.strip_prefix('(').unwrap_or(inner);
    inner = inner.strip_suffix(')').unwrap_or(inner);

    let ring = parse_ring(inner);
    if ring.is_empty() {
        None
    } else {
        Some(ring)
    }
}

/// Parse `lon lat, lon lat, ...` coordinate text, skipping bad pairs.
fn parse_ring(text: &str) -> Ring {
    text.split(',')
        .filter_map(|pair| {
            let mut parts = pair.split_whitespace();
            let lon: f64 = parts.next()?.parse().ok()?;
            let lat: f64 = parts.next()?.parse().ok()?;
            Some(Coord { x: lon, y: lat })
        })
        .collect()
}
