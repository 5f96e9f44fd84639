// LeadDesk - core/export.rs
//
// CSV and JSON export of the current lead-table view.
// Core layer: writes to any Write trait object; the caller owns the file.

use crate::core::model::Lead;
use crate::util::error::ExportError;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;

/// Column header row, in output order.
pub const CSV_COLUMNS: [&str; 12] = [
    "id",
    "name",
    "phone",
    "email",
    "source",
    "stage",
    "score",
    "score_value",
    "assigned_to",
    "created_at",
    "last_contacted_at",
    "next_follow_up",
];

fn rfc3339(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339()).unwrap_or_default()
}

/// Export leads to CSV. Stage and score are written as their machine ids.
///
/// Returns the number of data rows written.
pub fn export_csv<W: Write>(
    leads: &[&Lead],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(CSV_COLUMNS).map_err(csv_err)?;

    let mut count = 0;
    for lead in leads {
        let score = lead.score.label().to_lowercase();
        let score_value = lead.score_value.to_string();
        let created_at = lead.created_at.to_rfc3339();
        let last_contacted = rfc3339(lead.last_contacted_at);
        let next_follow_up = rfc3339(lead.next_follow_up);
        csv_writer
            .write_record([
                lead.id.as_str(),
                lead.name.as_str(),
                lead.phone.as_str(),
                lead.email.as_deref().unwrap_or(""),
                lead.source.as_str(),
                lead.stage.id(),
                score.as_str(),
                score_value.as_str(),
                lead.assigned_to.as_str(),
                created_at.as_str(),
                last_contacted.as_str(),
                next_follow_up.as_str(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(rows = count, path = %export_path.display(), "CSV export written");
    Ok(count)
}

/// Export leads to pretty-printed JSON (array of full lead objects).
pub fn export_json<W: Write>(
    leads: &[&Lead],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, leads).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(rows = leads.len(), path = %export_path.display(), "JSON export written");
    Ok(leads.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LeadScore, PipelineStage};
    use crate::core::repository::fixtures::{make_lead, reference_now};
    use std::path::PathBuf;

    fn sample() -> Vec<Lead> {
        let mut ali = make_lead(
            "L1",
            "Ali Rahman",
            PipelineStage::VisitScheduled,
            LeadScore::Hot,
        );
        ali.email = Some("ali@example.com".to_string());
        ali.last_contacted_at = Some(reference_now());
        let karim = make_lead(
            "L2",
            "Karim, Jr.",
            PipelineStage::NewProspect,
            LeadScore::Cold,
        );
        vec![ali, karim]
    }

    #[test]
    fn test_csv_export() {
        let leads = sample();
        let rows: Vec<&Lead> = leads.iter().collect();
        let mut buf = Vec::new();
        let count = export_csv(&rows, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,phone,email,source,stage,score,score_value,assigned_to,created_at,last_contacted_at,next_follow_up")
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("L1,Ali Rahman,"));
        assert!(first.contains(",visit_scheduled,hot,50,a1,"));
        assert!(first.contains("2026-10-18T10:00:00+00:00"));
        // Embedded comma is quoted; empty optionals stay empty.
        let second = lines.next().unwrap();
        assert!(second.contains("\"Karim, Jr.\""));
        assert!(second.ends_with(",,"));
    }

    #[test]
    fn test_json_export() {
        let leads = sample();
        let rows: Vec<&Lead> = leads.iter().take(1).collect();
        let mut buf = Vec::new();
        let count = export_json(&rows, &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 1);

        let parsed: Vec<Lead> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0], leads[0]);
        assert!(String::from_utf8(buf).unwrap().contains("\n  "));
    }
}
