//! Export of the currently filtered set — TXT endpoint lines and CSV.
//!
//! Both documents are built over the filtered records in their current
//! sort order, all pages. Filenames are timestamped in local time:
//! `proxies_YYYY-MM-DD_HH-MM.<ext>`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::model::ProxyRecord;

/// CSV column order. One header line + one line per record.
pub const CSV_HEADER: &str = "No,IP,Protocol,Country,Latency(ms),Status,Speed Category";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Newline-delimited `protocol://ip[:port]` lines.
pub fn txt_document(records: &[ProxyRecord]) -> String {
    let mut out = String::new();
    for rec in records {
        out.push_str(&rec.endpoint_url());
        out.push('\n');
    }
    out
}

/// CSV with the fixed header; `No` is the record's 1-based position in
/// the filtered set.
pub fn csv_document(records: &[ProxyRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for (i, rec) in records.iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{:.0},{},{}\n",
            i + 1,
            rec.ip,
            rec.protocol,
            rec.country,
            rec.display_latency(),
            rec.status,
            rec.effective_speed(),
        ));
    }
    out
}

/// `proxies_YYYY-MM-DD_HH-MM.<ext>` for the given instant.
pub fn export_filename(ext: &str, now: DateTime<Local>) -> String {
    format!("proxies_{}.{ext}", now.format("%Y-%m-%d_%H-%M"))
}

fn write_document(dir: &Path, ext: &str, body: &str) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_filename(ext, Local::now()));
    fs::write(&path, body)?;
    Ok(path)
}

/// Write the TXT export into `dir`, returning the file path.
pub fn write_txt(records: &[ProxyRecord], dir: &Path) -> Result<PathBuf, ExportError> {
    write_document(dir, "txt", &txt_document(records))
}

/// Write the CSV export into `dir`, returning the file path.
pub fn write_csv(records: &[ProxyRecord], dir: &Path) -> Result<PathBuf, ExportError> {
    write_document(dir, "csv", &csv_document(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rec(ip: &str, port: Option<u16>, protocol: &str, latency: Option<f64>) -> ProxyRecord {
        ProxyRecord {
            ip: ip.into(),
            port,
            protocol: protocol.into(),
            country: "US".into(),
            latency_ms: latency,
            status: "Active".into(),
            anonymity: None,
            speed_category: None,
        }
    }

    #[test]
    fn txt_lines_are_endpoint_urls() {
        let records = vec![
            rec("1.1.1.1", Some(8080), "HTTP", Some(50.0)),
            rec("2.2.2.2", None, "SOCKS5", None),
        ];
        let doc = txt_document(&records);
        assert_eq!(doc, "http://1.1.1.1:8080\nsocks5://2.2.2.2\n");
    }

    #[test]
    fn csv_has_header_plus_one_line_per_record() {
        let records = vec![
            rec("1.1.1.1", None, "HTTP", Some(150.0)),
            rec("2.2.2.2", None, "HTTP", None),
            rec("3.3.3.3", None, "SOCKS5", Some(700.0)),
        ];
        let doc = csv_document(&records);
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines.len(), records.len() + 1);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "1,1.1.1.1,HTTP,US,150,Active,Good");
        // Missing latency coerced to 0 for display.
        assert_eq!(lines[2], "2,2.2.2.2,HTTP,US,0,Active,Unknown");
        assert_eq!(lines[3], "3,3.3.3.3,SOCKS5,US,700,Active,Unusable");
    }

    #[test]
    fn empty_export_is_just_the_header() {
        let doc = csv_document(&[]);
        assert_eq!(doc.lines().count(), 1);
    }

    #[test]
    fn filename_is_timestamped() {
        let at = Local.with_ymd_and_hms(2025, 3, 9, 14, 5, 33).unwrap();
        assert_eq!(export_filename("csv", at), "proxies_2025-03-09_14-05.csv");
        assert_eq!(export_filename("txt", at), "proxies_2025-03-09_14-05.txt");
    }

    #[test]
    fn writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![rec("1.1.1.1", Some(80), "HTTP", Some(10.0))];
        let path = write_csv(&records, dir.path()).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with(CSV_HEADER));
        assert!(path.file_name().unwrap().to_str().unwrap().ends_with(".csv"));
    }
}
