use dupefinder::duplicates::{DuplicateFinder, DuplicateGroup, ScanSummary};
use dupefinder::error::ExitCode;
use dupefinder::output::{CsvOutput, JsonOutput, TextOutput};
use std::fs;
use tempfile::{tempdir, TempDir};

fn scan_fixture() -> (TempDir, Vec<DuplicateGroup>, ScanSummary) {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"hello world").unwrap();
    fs::write(dir.path().join("b.txt"), b"hello world").unwrap();
    fs::write(dir.path().join("c.txt"), b"different").unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    (dir, groups, summary)
}

#[test]
fn test_text_report_for_real_scan() {
    yansi::disable();
    let (dir, groups, summary) = scan_fixture();

    let out = TextOutput::new(&groups, &summary).render();
    let expected = format!(
        "\nDuplicates (MD5: 5eb63bbbe01eeed093cb22bb8f5acdc3):\n- {}\n- {}\n",
        dir.path().join("a.txt").display(),
        dir.path().join("b.txt").display()
    );

    assert_eq!(out, expected);
}

#[test]
fn test_text_report_no_duplicates() {
    yansi::disable();
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), b"alone").unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    let out = TextOutput::new(&groups, &summary).with_summary(true).render();
    assert_eq!(out.trim_end(), "No duplicates found");
}

#[test]
fn test_json_report_for_real_scan() {
    let (dir, groups, summary) = scan_fixture();
    let exit_code = ExitCode::for_scan(groups.len(), summary.skipped.len());

    let mut buffer = Vec::new();
    JsonOutput::new(&groups, &summary, exit_code)
        .write_to(&mut buffer, true)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    let group = &value["duplicates"][0];
    assert_eq!(group["fingerprint"], "5eb63bbbe01eeed093cb22bb8f5acdc3");
    assert_eq!(group["size"], 11);
    assert_eq!(
        group["files"][0],
        &*dir.path().join("a.txt").to_string_lossy()
    );
    assert_eq!(value["skipped"].as_array().unwrap().len(), 0);
    assert_eq!(value["summary"]["total_files"], 3);
    assert_eq!(value["summary"]["exit_code"], 0);
    assert_eq!(value["summary"]["exit_code_name"], "DF000");
}

#[test]
fn test_csv_report_for_real_scan() {
    let (dir, groups, _summary) = scan_fixture();

    let csv = CsvOutput::new(&groups).to_string().unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][1], "5eb63bbbe01eeed093cb22bb8f5acdc3");
    assert_eq!(&rows[1][2], &*dir.path().join("b.txt").to_string_lossy());
    assert_eq!(&rows[1][3], "11");
    assert!(chrono::DateTime::parse_from_rfc3339(&rows[1][4]).is_ok());
}
