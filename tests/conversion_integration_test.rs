//! End-to-end conversion tests over a temporary CTS data root

use atf2cts::config::Atf2CtsConfig;
use atf2cts::core::export::ConversionCoordinator;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn config(root: &Path, workers: usize) -> Atf2CtsConfig {
    let mut config = Atf2CtsConfig::default();
    config.output.data_root = root.to_path_buf();
    config.application.workers = workers;
    config
}

/// `good` convertible records, then one parse failure and one record whose
/// edition markup is ill-formed
fn sample_atf(good: usize) -> String {
    let mut atf = String::from("garbage before the first record\n");
    for i in 1..=good {
        atf.push_str(&format!(
            "&P{:06} = Tablet {}\n#atf: lang akk\n@tablet\n@obverse\n1. a-na _{{d}}utu_\n#tr.en: to Shamash\n",
            i, i
        ));
    }
    atf.push_str("&P900001 has no equals sign\n1. a\n");
    atf.push_str("&P900002 = Broken logogram\n1. lugal_\n");
    atf
}

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_convert_counts_and_layout() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("data");
    let input = write_input(&dir, "cdli.atf", &sample_atf(12));

    let summary = ConversionCoordinator::new(config(&root, 4))
        .execute(&[input])
        .await
        .unwrap();

    assert_eq!(summary.successful, 12);
    assert_eq!(summary.parse_failed, 1);
    assert_eq!(summary.export_failed, 1);
    assert_eq!(summary.total_records(), 14);
    assert!(!summary.is_successful());
    assert_eq!(summary.failed_records[0].header, "&P900001 has no equals sign");
    assert_eq!(summary.failed_documents[0].header, "&P900002 = Broken logogram");

    assert!(root.join("__cts__.xml").exists());
    for i in 1..=12 {
        let code = format!("P{:06}", i);
        let work = root.join(&code);
        assert!(work.join("__cts__.xml").exists());
        let tei = fs::read_to_string(work.join(format!("test.{}.akk.xml", code))).unwrap();
        assert!(tei.contains(&format!(r#"<text n="urn:cts:cdli:test.{}" xml:lang="akk">"#, code)));
        assert!(tei.contains("to Shamash"));
    }
    assert!(!root.join("P900001").exists());
    assert!(!root.join("P900002").join("test.P900002.und.xml").exists());
}

#[tokio::test]
async fn test_counts_do_not_depend_on_worker_count() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "cdli.atf", &sample_atf(20));

    let mut totals = Vec::new();
    for workers in [1, 3, 8] {
        let root = dir.path().join(format!("data-{workers}"));
        let summary = ConversionCoordinator::new(config(&root, workers))
            .execute(&[input.clone()])
            .await
            .unwrap();
        totals.push((summary.successful, summary.parse_failed, summary.export_failed));
    }

    assert!(totals.iter().all(|t| *t == (20, 1, 1)));
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("data");
    let input = write_input(&dir, "cdli.atf", &sample_atf(3));
    let document = root.join("P000002").join("test.P000002.akk.xml");
    let descriptor = root.join("P000002").join("__cts__.xml");

    ConversionCoordinator::new(config(&root, 2))
        .execute(&[input.clone()])
        .await
        .unwrap();
    let first = (
        fs::read_to_string(&document).unwrap(),
        fs::read_to_string(&descriptor).unwrap(),
    );

    let summary = ConversionCoordinator::new(config(&root, 2))
        .execute(&[input])
        .await
        .unwrap();
    let second = (
        fs::read_to_string(&document).unwrap(),
        fs::read_to_string(&descriptor).unwrap(),
    );

    assert_eq!(summary.successful, 3);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_multiple_files_are_summarized_per_file() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("data");
    let a = write_input(&dir, "a.atf", "&P1 = One\n1. a\n&P2 = Two\n1. b\n");
    let b = write_input(&dir, "b.atf", "no records here\n");

    let summary = ConversionCoordinator::new(config(&root, 2))
        .execute(&[a, b])
        .await
        .unwrap();

    assert_eq!(summary.files.len(), 2);
    assert_eq!(summary.files[0].records, 2);
    assert_eq!(summary.files[1].records, 0);
    assert!(summary.is_successful());
}

#[tokio::test]
async fn test_unreadable_input_aborts_run() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("data");

    let result = ConversionCoordinator::new(config(&root, 2))
        .execute(&[dir.path().join("missing.atf")])
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_report_carries_failed_text() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("data");
    let input = write_input(
        &dir,
        "bad.atf",
        "&P1 broken header\nstray text\n&P2 = Two\n1. lugal_\n",
    );

    let summary = ConversionCoordinator::new(config(&root, 2))
        .execute(&[input])
        .await
        .unwrap();
    let report = dir.path().join("report.json");
    summary.write_report(&report).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();

    assert_eq!(
        json["failed_records"][0]["record"],
        "&P1 broken header\nstray text\n"
    );
    let content = json["failed_documents"][0]["content"].as_str().unwrap();
    assert!(content.contains(r#"<text n="urn:cts:cdli:test.P2">"#));
    assert!(content.contains("lugal</c>"));
}
