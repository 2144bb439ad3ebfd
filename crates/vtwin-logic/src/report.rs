//! Delimited-text rendering of a timeline, for download or inspection.

use std::fmt::Write;

use crate::simulation::{SimulationRecord, Timeline};

/// Column order of the exported table.
pub const TIMELINE_COLUMNS: [&str; 11] = [
    "day",
    "viral_load",
    "symptom_severity",
    "drug_effect_total",
    "drug_toxicity",
    "immune_strength",
    "heart",
    "liver",
    "kidney",
    "lungs",
    "avg_organ_health",
];

fn write_row(out: &mut String, r: &SimulationRecord) {
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{},{},{},{},{},{},{},{},{},{},{}",
        r.day,
        r.viral_load,
        r.symptom_severity,
        r.drug_effect_total,
        r.drug_toxicity,
        r.immune_strength,
        r.heart,
        r.liver,
        r.kidney,
        r.lungs,
        r.avg_organ_health
    );
}

/// Header line plus one comma-separated line per record.
pub fn timeline_to_csv(timeline: &Timeline) -> String {
    let mut out = TIMELINE_COLUMNS.join(",");
    out.push('\n');
    for record in &timeline.records {
        write_row(&mut out, record);
    }
    out
}
