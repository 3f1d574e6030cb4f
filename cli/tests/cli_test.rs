use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_page(dir: &Path, name: &str, links: &[&str]) {
    let anchors: String = links
        .iter()
        .map(|l| format!("<a href=\"{}\">{}</a>\n", l, l))
        .collect();
    fs::write(dir.join(name), format!("<html><body>{}</body></html>", anchors)).unwrap();
}

fn cycle_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), "1.html", &["2.html"]);
    write_page(dir.path(), "2.html", &["1.html", "3.html"]);
    write_page(dir.path(), "3.html", &["2.html", "4.html"]);
    write_page(dir.path(), "4.html", &["2.html"]);
    dir
}

fn linkrank() -> Command {
    let mut cmd = Command::cargo_bin("linkrank").unwrap();
    cmd.env_remove("LINKRANK_CONFIG")
        .env_remove("LINKRANK_DAMPING")
        .env_remove("LINKRANK_SAMPLES")
        .env_remove("LINKRANK_TOLERANCE")
        .env_remove("LINKRANK_MAX_PASSES")
        .env_remove("LINKRANK_SEED");
    cmd
}

#[test]
fn test_cli_rank_text() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = cycle_corpus();

    linkrank()
        .args(["--format", "text", "--seed", "1", "rank"])
        .arg(corpus.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PageRank Results from Sampling (n = 10000)"))
        .stdout(predicate::str::contains("PageRank Results from Iteration"))
        .stdout(predicate::str::contains("  2.html: 0.42"));
    Ok(())
}

#[test]
fn test_cli_iterate_json() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = cycle_corpus();

    let output = linkrank()
        .args(["--format", "json", "iterate"])
        .arg(corpus.path())
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let total: f64 = report["ranks"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_f64().unwrap())
        .sum();
    assert!((total - 1.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_cli_transition_csv() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = cycle_corpus();

    linkrank()
        .args(["--format", "csv", "transition"])
        .arg(corpus.path())
        .arg("1.html")
        .assert()
        .success()
        .stdout(predicate::str::contains("page,value"))
        .stdout(predicate::str::contains("2.html,0.8875"))
        .stdout(predicate::str::contains("4.html,0.0375"));
    Ok(())
}

#[test]
fn test_cli_links_table() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = cycle_corpus();

    linkrank()
        .arg("links")
        .arg(corpus.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("4 page(s), 6 link(s), 0 without outgoing links"));
    Ok(())
}

#[test]
fn test_cli_config_file_and_override() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = cycle_corpus();
    let config = corpus.path().join("rank.yaml");
    fs::write(&config, "sample_count: 1\nseed: 3\n")?;

    linkrank()
        .args(["--format", "text", "--config"])
        .arg(&config)
        .arg("sample")
        .arg(corpus.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(n = 1)"))
        .stdout(predicate::str::contains(": 1.0000"));

    linkrank()
        .args(["--damping", "1.5", "iterate"])
        .arg(corpus.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("damping factor must be in [0,1]"));
    Ok(())
}

#[test]
fn test_cli_unknown_page_fails() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = cycle_corpus();

    linkrank()
        .arg("transition")
        .arg(corpus.path())
        .arg("9.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page \"9.html\" not found"));
    Ok(())
}

#[test]
fn test_cli_max_passes_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = cycle_corpus();

    linkrank()
        .env("LINKRANK_MAX_PASSES", "1")
        .arg("iterate")
        .arg(corpus.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not converge after 1 passes"));

    linkrank()
        .env("LINKRANK_MAX_PASSES", "1")
        .args(["--max-passes", "100", "iterate"])
        .arg(corpus.path())
        .assert()
        .success();
    Ok(())
}
