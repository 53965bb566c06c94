use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;

fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("assets")
        .join(name)
}

fn launch_descriptor() -> Command {
    let mut cmd = Command::cargo_bin("launch-descriptor").unwrap();
    cmd.env_clear()
        .env("HOME", "/home/alice")
        .env("PATH", "/usr/bin")
        .env("LANG", "C.UTF-8");
    cmd
}

#[cfg(unix)]
#[test]
fn render_direct_binary_descriptor() -> Result<(), Box<dyn std::error::Error>> {
    let output = launch_descriptor()
        .arg("--config")
        .arg(asset("direct.yaml"))
        .arg("--output")
        .arg("json")
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let app = &value["apps"][0];
    assert_eq!(app["name"], "rnaseq-backend");
    assert_eq!(app["command"], "/home/alice/RNAseq_web/.venv/bin/gunicorn");
    assert_eq!(app["working_directory"], "/home/alice/RNAseq_web");
    assert_eq!(app["interpreter"], "none");
    assert_eq!(app["environment"]["FLASK_ENV"], "production");
    assert_eq!(app["environment"]["PATH"], "/usr/bin");
    assert_eq!(app["environment"]["LANG"], "C.UTF-8");

    Ok(())
}

#[cfg(unix)]
#[test]
fn render_interpreter_descriptor() -> Result<(), Box<dyn std::error::Error>> {
    let output = launch_descriptor()
        .arg("-c")
        .arg(asset("interpreter.yaml"))
        .arg("-o")
        .arg("json")
        .arg("--app")
        .arg("rnaseq-backend")
        .output()?;
    assert!(output.status.success());

    let app: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(app["command"], "gunicorn");
    assert_eq!(app["interpreter"], "python3");
    assert_eq!(
        app["environment"]["PATH"],
        "/home/alice/RNAseq_web/.venv/bin:/usr/bin"
    );

    Ok(())
}

#[cfg(unix)]
#[test]
fn print_launch_commands() -> Result<(), Box<dyn std::error::Error>> {
    launch_descriptor()
        .arg("--config")
        .arg(asset("direct.yaml"))
        .arg("--commands")
        .assert()
        .success()
        .stdout(predicate::eq(
            "rnaseq-backend: /home/alice/RNAseq_web/.venv/bin/gunicorn -c gunicorn.conf.py app:app\n",
        ));

    Ok(())
}

#[test]
fn yaml_is_the_default_output() -> Result<(), Box<dyn std::error::Error>> {
    launch_descriptor()
        .arg("--config")
        .arg(asset("direct.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("apps:"))
        .stdout(predicate::str::contains("name: rnaseq-backend"));

    Ok(())
}

#[test]
fn missing_home_fails_the_load() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("launch-descriptor")?;
    cmd.env_clear()
        .env("PATH", "/usr/bin")
        .arg("--config")
        .arg(asset("direct.yaml"));
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("is not set or empty"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn errors_are_reported_with_their_message() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("launch-descriptor")?;
    cmd.env_clear()
        .arg("--config")
        .arg(asset("direct.yaml"));
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Could not resolve descriptor: `could not evaluate descriptor: `environment variable `HOME` is not set or empty``",
        ))
        .stderr(predicate::str::contains("MissingEnvironment").not());

    Ok(())
}

#[test]
fn unknown_app_fails() -> Result<(), Box<dyn std::error::Error>> {
    launch_descriptor()
        .arg("--config")
        .arg(asset("direct.yaml"))
        .arg("--app")
        .arg("frontend")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "app `frontend` is not declared in the descriptor",
        ));

    Ok(())
}

#[test]
fn duplicated_names_fail() -> Result<(), Box<dyn std::error::Error>> {
    launch_descriptor()
        .arg("--config")
        .arg(asset("duplicated.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "app name `rnaseq-backend` is declared more than once",
        ));

    Ok(())
}

#[test]
fn missing_descriptor_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    launch_descriptor()
        .arg("--config")
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not read descriptor from"));

    Ok(())
}

#[test]
fn descriptor_with_unknown_keys_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let file = dir.child("ecosystem.yaml");
    file.write_str(
        r#"
apps:
  - name: api
    script: gunicorn
    watch: true
"#,
    )?;

    launch_descriptor()
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field `watch`"));

    Ok(())
}

#[test]
fn print_version() -> Result<(), Box<dyn std::error::Error>> {
    launch_descriptor()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Launch Descriptor Version:"));

    Ok(())
}

#[test]
fn print_debug_info() -> Result<(), Box<dyn std::error::Error>> {
    launch_descriptor()
        .arg("--config")
        .arg(asset("direct.yaml"))
        .arg("--print-debug-info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Printing debug info"));

    Ok(())
}
