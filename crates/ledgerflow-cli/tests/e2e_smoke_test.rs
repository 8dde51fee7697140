use std::fs;

use tempfile::tempdir;

use ledgerflow::config::OutputFormat;
use ledgerflow_cli::{Args, error_adapter::to_reportables};

fn args(output_dir: &std::path::Path, format: Option<OutputFormat>) -> Args {
    Args {
        output_dir: Some(output_dir.to_path_buf()),
        format,
        name: None,
        config: None,
        no_preview: true,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_default_run() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("output");

    let written = ledgerflow_cli::run(&args(&output_dir, None)).expect("Run failed");

    assert_eq!(
        written,
        [
            output_dir.join("sankey_chart.html"),
            output_dir.join("sankey_chart.png"),
        ]
    );
    for path in &written {
        let size = fs::metadata(path).unwrap().len();
        assert!(size > 0, "{} is empty", path.display());
    }

    let page = fs::read_to_string(&written[0]).unwrap();
    assert!(page.contains("Net Profit"));
    assert!(page.contains("$72.28M"));
}

#[test]
fn e2e_smoke_test_html_only_rerun() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let run_args = args(temp_dir.path(), Some(OutputFormat::Html));

    ledgerflow_cli::run(&run_args).expect("First run failed");
    let written = ledgerflow_cli::run(&run_args).expect("Second run failed");

    assert_eq!(written.len(), 1);
    assert!(!temp_dir.path().join("sankey_chart.png").exists());
}

#[test]
fn e2e_smoke_test_deny_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[validation]\nbalance = \"deny\"\n").unwrap();

    let mut run_args = args(&temp_dir.path().join("output"), None);
    run_args.config = Some(config_path);

    let err = ledgerflow_cli::run(&run_args).expect_err("Unbalanced figures should fail");
    assert_eq!(to_reportables(&err).len(), 2);
    assert!(!temp_dir.path().join("output").exists());
}
