use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_config(dir: &Path, api_url: &str) -> PathBuf {
    let path = dir.join("config.json");
    let contents = format!(
        "{{\"api_url\": \"{}\", \"token\": \"test-token\", \"project\": \"TestProject\", \
         \"preferences\": {{\"max_attempts\": 1, \"base_delay_ms\": 0, \"timeout_secs\": 10}}}}",
        api_url
    );
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn write_sample_asset(dir: &Path) {
    fs::create_dir_all(dir.join("scripts")).unwrap();
    fs::write(
        dir.join("asset.properties"),
        "name=Sample Asset\ndescription=Installs the sample service\nassetType=software\ninstallScript=install.sh\n",
    )
    .unwrap();
    fs::write(dir.join("scripts/install.sh"), "#!/bin/bash\nexit 0\n").unwrap();
}

fn cons3rt() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cons3rt"));
    cmd.env_remove("CONS3RT_CONFIG")
        .env_remove("CONS3RT_ENDPOINT")
        .env_remove("CONS3RT_PROJECT")
        .env_remove("CONS3RT_FORMAT");
    cmd
}

#[test]
fn version_prints_package_version() {
    cons3rt()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn status_uses_custom_config_path() {
    let temp = tempdir().unwrap();
    let config_path = write_config(temp.path(), "https://api.cons3rt.com/rest/api/");

    let assert = cons3rt()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("https://api.cons3rt.com/rest/api/"));
    assert!(stdout.contains("TestProject"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
}

#[test]
fn missing_config_exits_with_config_code() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("nope.json");

    cons3rt()
        .arg("cloud")
        .arg("list")
        .arg("--config")
        .arg(&missing)
        .assert()
        .failure()
        .code(78)
        .stderr(predicate::str::contains("cons3rt init"));
}

#[test]
fn asset_validate_succeeds_on_complete_asset() {
    let temp = tempdir().unwrap();
    write_sample_asset(temp.path());

    cons3rt()
        .arg("asset")
        .arg("validate")
        .arg("--asset-dir")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample Asset"));
}

#[test]
fn asset_validate_missing_manifest_exits_with_validation_code() {
    let temp = tempdir().unwrap();

    cons3rt()
        .arg("asset")
        .arg("validate")
        .arg("--asset-dir")
        .arg(temp.path())
        .assert()
        .failure()
        .code(65)
        .stderr(predicate::str::contains("asset.properties"));
}

#[test]
fn asset_create_missing_manifest_produces_no_zip() {
    let temp = tempdir().unwrap();
    let asset_dir = temp.path().join("asset");
    let dest_dir = temp.path().join("out");
    fs::create_dir_all(&asset_dir).unwrap();

    cons3rt()
        .arg("asset")
        .arg("create")
        .arg("--asset-dir")
        .arg(&asset_dir)
        .arg("--dest-dir")
        .arg(&dest_dir)
        .assert()
        .failure()
        .code(65);

    let zips: Vec<_> = match fs::read_dir(&dest_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "zip"))
            .collect(),
        Err(_) => Vec::new(),
    };
    assert!(zips.is_empty(), "no zip should be produced on failure");
}

#[test]
fn asset_create_is_reproducible() {
    let temp = tempdir().unwrap();
    let asset_dir = temp.path().join("asset");
    fs::create_dir_all(&asset_dir).unwrap();
    write_sample_asset(&asset_dir);

    for out in ["out1", "out2"] {
        cons3rt()
            .arg("asset")
            .arg("create")
            .arg("--asset-dir")
            .arg(&asset_dir)
            .arg("--dest-dir")
            .arg(temp.path().join(out))
            .assert()
            .success()
            .stdout(predicate::str::contains("asset-SampleAsset.zip"));
    }

    let first = fs::read(temp.path().join("out1/asset-SampleAsset.zip")).unwrap();
    let second = fs::read(temp.path().join("out2/asset-SampleAsset.zip")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn invalid_ids_are_usage_errors() {
    // clap rejects non-numeric ids before any command logic runs
    cons3rt()
        .arg("run")
        .arg("release")
        .arg("--ids")
        .arg("1,abc")
        .assert()
        .failure();
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn cloud_list_renders_table_from_api() {
    let mut server = mockito::Server::new();
    let _clouds = server
        .mock("GET", "/clouds")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"id": 1, "name": "AWS GovCloud", "cloudType": "AWS"}]"#)
        .create();

    let temp = tempdir().unwrap();
    let config_path = write_config(temp.path(), &format!("{}/", server.url()));

    cons3rt()
        .arg("cloud")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("AWS GovCloud"));
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn not_found_exits_with_not_found_code() {
    let mut server = mockito::Server::new();
    let _cloud = server
        .mock("GET", "/clouds/99")
        .with_status(404)
        .with_body("no cloud 99")
        .create();

    let temp = tempdir().unwrap();
    let config_path = write_config(temp.path(), &format!("{}/", server.url()));

    cons3rt()
        .arg("cloud")
        .arg("get")
        .arg("--id")
        .arg("99")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .code(67);
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn auth_rejection_exits_with_auth_code() {
    let mut server = mockito::Server::new();
    let _teams = server
        .mock("GET", "/teams")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .create();

    let temp = tempdir().unwrap();
    let config_path = write_config(temp.path(), &format!("{}/", server.url()));

    cons3rt()
        .arg("team")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .code(100);
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn run_release_reports_batch_summary() {
    let mut server = mockito::Server::new();
    let _ok = server
        .mock("PUT", "/drs/1/release")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .create();
    let _missing = server
        .mock("PUT", "/drs/2/release")
        .match_query(mockito::Matcher::Any)
        .with_status(404)
        .with_body("no such run")
        .create();

    let temp = tempdir().unwrap();
    let config_path = write_config(temp.path(), &format!("{}/", server.url()));

    let assert = cons3rt()
        .arg("run")
        .arg("release")
        .arg("--ids")
        .arg("1,2")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("OK"));
    assert!(stdout.contains("FAIL"));
}
