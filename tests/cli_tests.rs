#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::path::Path;

    fn macbundle() -> Command {
        Command::cargo_bin("macbundle").expect("binary builds")
    }

    fn fixture_sources() -> String {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/ViewerApp/Sources")
            .display()
            .to_string()
    }

    #[test]
    fn test_rejects_malformed_deployment_target_before_any_side_effect() {
        let dir = tempfile::tempdir().expect("tempdir");
        let build_path = dir.path().join("bundle-out");
        let sources = fixture_sources();

        macbundle()
            .args([
                "--name",
                "Viewer",
                "--identifier",
                "com.example.viewer",
                "--copyright",
                "© 2026 Example",
                "--deployment-target",
                "10.13.2",
                "--sources",
                sources.as_str(),
                "--build-path",
            ])
            .arg(&build_path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid configuration"));

        assert!(!build_path.exists(), "validation must precede any write");
    }

    #[test]
    fn test_rejects_missing_source_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let build_path = dir.path().join("bundle-out");

        macbundle()
            .args([
                "--name",
                "Viewer",
                "--identifier",
                "com.example.viewer",
                "--copyright",
                "© 2026 Example",
                "--deployment-target",
                "10.13",
                "--sources",
                "no/such/sources",
                "--build-path",
            ])
            .arg(&build_path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("does not exist"));

        assert!(!build_path.exists());
    }

    #[test]
    fn test_reports_the_first_missing_argument() {
        macbundle()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Missing required argument"))
            .stderr(predicate::str::contains("name"));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        macbundle()
            .args(["--verbose", "--quiet"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Conflicting arguments"));
    }

    #[test]
    fn test_help_describes_the_tool() {
        macbundle()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("bundle"));
    }

    #[test]
    fn test_config_file_values_reach_validation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("bundle.toml");
        std::fs::write(
            &config_path,
            format!(
                "identifier = \"com.example.viewer\"\n\
                 copyright = \"© 2026 Example\"\n\
                 deployment-target = \"10.13.2\"\n\
                 sources = [\"{}\"]\n",
                fixture_sources()
            ),
        )
        .expect("write config");

        // The bad deployment target comes from the file, so reaching the
        // validation error proves the merge happened.
        macbundle()
            .args(["--name", "Viewer", "--config"])
            .arg(&config_path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid configuration"))
            .stderr(predicate::str::contains("Missing required argument").not());
    }
}
