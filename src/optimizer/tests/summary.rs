use crate::optimizer::*;
use anyhow::Result;
use polars::prelude::*;

fn summarize(df: &DataFrame) -> Result<String> {
    let names: Vec<String> = df
        .get_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    generate_summary_stats(df, "trips", &ColumnRoles::classify(&names))
}

/// Percentages listed under `heading`, up to the next blank line.
fn section_percentages(md: &str, heading: &str) -> Vec<f64> {
    md.split("\n\n")
        .find(|block| block.starts_with(heading))
        .map(|block| {
            block
                .lines()
                .filter_map(|line| {
                    let start = line.rfind('(')?;
                    let end = line.rfind("%)")?;
                    line.get(start + 1..end)?.parse::<f64>().ok()
                })
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_header_and_status_distribution() -> Result<()> {
    let df = df!(
        "trip_id" => &[1i64, 2, 3, 4],
        "trip_status" => &[Some("Delivered"), Some("Delivered"), Some("In Transit"), None]
    )?;
    let md = summarize(&df)?;

    assert!(md.starts_with("# trips - Summary Statistics\n\n**Total Records:** 4\n\n"));
    assert!(md.contains("## trip_status Distribution\n"));
    assert!(md.contains("- Delivered: 2 (50.0%)\n"));
    assert!(md.contains("- In Transit: 1 (25.0%)\n"));
    Ok(())
}

#[test]
fn test_status_section_limited_to_top_ten() -> Result<()> {
    let statuses: Vec<String> = (0..15).map(|i| format!("S{i:02}")).collect();
    let df = df!("status" => statuses)?;
    let md = summarize(&df)?;

    let listed = md.lines().filter(|l| l.starts_with("- S")).count();
    assert_eq!(listed, 10);
    Ok(())
}

#[test]
fn test_sla_sections_for_flag_like_columns_only() -> Result<()> {
    let df = df!(
        "sla_breach" => &[false, false, false, true],
        "sla_hours" => &[1i64, 2, 3, 4],
        "breach_reason" => &["late", "late", "late", "damaged"]
    )?;
    let md = summarize(&df)?;

    assert!(md.contains("## sla_breach\n- False: 3 (75.0%)\n- True: 1 (25.0%)\n"));
    // sla_hours has only 4 distinct values, so it is reported too.
    assert!(md.contains("## sla_hours\n"));
    // Only the first two SLA/breach columns are considered.
    assert!(!md.contains("## breach_reason"));
    Ok(())
}

#[test]
fn test_high_cardinality_sla_column_omitted() -> Result<()> {
    let hours: Vec<i64> = (0..25).collect();
    let df = df!("sla_hours" => hours)?;
    let md = summarize(&df)?;
    assert!(!md.contains("## sla_hours"));
    Ok(())
}

#[test]
fn test_transporter_and_route_sections() -> Result<()> {
    let df = df!(
        "transporter_name" => &["Acme", "Acme", "Zeta", "Acme"],
        "route_code" => &["BLR-DEL", "BLR-DEL", "MUM-PUN", "MUM-PUN"],
        "route_name" => &["x", "y", "z", "w"]
    )?;
    let md = summarize(&df)?;

    assert!(md.contains("## Top 10 Transporters\n- Acme: 3 trips (75.0%)\n- Zeta: 1 trips (25.0%)\n"));
    assert!(md.contains("## Top 10 Routes\n- BLR-DEL: 2 trips (50.0%)\n- MUM-PUN: 2 trips (50.0%)\n"));
    Ok(())
}

#[test]
fn test_sections_appear_in_fixed_order() -> Result<()> {
    let df = df!(
        "route_name" => &["r1"],
        "transporter_name" => &["t1"],
        "sla_breach" => &[true],
        "status" => &["ok"]
    )?;
    let md = summarize(&df)?;

    let pos = |needle: &str| md.find(needle).expect("section present");
    assert!(pos("## status Distribution") < pos("## sla_breach"));
    assert!(pos("## sla_breach") < pos("## Top 10 Transporters"));
    assert!(pos("## Top 10 Transporters") < pos("## Top 10 Routes"));
    Ok(())
}

#[test]
fn test_missing_columns_leave_header_only() -> Result<()> {
    let df = df!("a" => &[1i64, 2], "b" => &["x", "y"])?;
    let md = summarize(&df)?;
    assert_eq!(md, "# trips - Summary Statistics\n\n**Total Records:** 2\n\n");
    Ok(())
}

#[test]
fn test_percentages_never_exceed_total() -> Result<()> {
    let df = df!(
        "status" => &[Some("A"), Some("B"), None, Some("A"), Some("C"), None],
        "sla_breach" => &[Some(true), None, Some(false), Some(false), None, Some(true)]
    )?;
    let md = summarize(&df)?;

    for heading in ["## status Distribution", "## sla_breach"] {
        let pcts = section_percentages(&md, heading);
        assert!(!pcts.is_empty(), "{heading} should list values");
        let sum: f64 = pcts.iter().sum();
        assert!(sum <= 100.0 + 0.05 * pcts.len() as f64, "{heading} sums to {sum}");
    }
    Ok(())
}

#[test]
fn test_large_counts_use_thousands_separator() -> Result<()> {
    let statuses = vec!["Delivered"; 1500];
    let df = df!("status" => statuses)?;
    let md = summarize(&df)?;
    assert!(md.contains("**Total Records:** 1,500"));
    assert!(md.contains("- Delivered: 1,500 (100.0%)"));
    Ok(())
}
