use setup_check::{
    default_checks, load_table_shape, CheckOutcome, CheckRunner, RunSummary, Settings, TableShape,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_datasets(dir: &Path) {
    fs::write(
        dir.join("Fraud_Data.csv"),
        "user_id,signup_time,purchase_time,purchase_value,device_id,source,browser,sex,age,ip_address,class\n\
         22058,2015-02-24 22:55:49,2015-04-18 02:47:11,34,QVPSPJUOCKZAR,SEO,Chrome,M,39,732758368.8,0\n\
         333320,2015-06-07 20:39:50,2015-06-08 01:38:54,16,EOGFQPIZPYXFZ,Ads,Chrome,F,53,350311387.9,0\n",
    )
    .unwrap();
    fs::write(
        dir.join("IpAddress_to_Country.csv"),
        "lower_bound_ip_address,upper_bound_ip_address,country\n\
         16777216.0,16777471,Australia\n\
         16777472.0,16777727,China\n\
         16777728.0,16778239,China\n",
    )
    .unwrap();
    fs::write(
        dir.join("creditcard.csv"),
        "\"Time\",\"V1\",\"V2\",\"Amount\",\"Class\"\n\
         0,-1.3598071336738,-0.0727811733098497,149.62,\"0\"\n",
    )
    .unwrap();
}

fn run_with(settings: &Settings) -> (RunSummary, String) {
    let mut out = Vec::new();
    let summary = CheckRunner::new(default_checks(settings))
        .run(&mut out)
        .unwrap();
    (summary, String::from_utf8(out).unwrap())
}

fn settings_for(dir: &Path) -> Settings {
    Settings {
        data_dir: dir.to_path_buf(),
        ..Settings::default()
    }
}

#[test]
fn test_end_to_end_all_checks_pass() {
    let temp_dir = TempDir::new().unwrap();
    write_datasets(temp_dir.path());

    let (summary, output) = run_with(&settings_for(temp_dir.path()));

    assert!(summary.all_passed);
    let names: Vec<&str> = summary.reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Import Test", "Data Loading Test", "Basic Modeling Test"]
    );

    assert!(output.starts_with("🧪 Testing setup...\n"));
    assert!(output.contains("🔍 Running Import Test...\n✅ All imports successful!\n"));
    assert!(output.contains(
        "✅ Data loading successful!\n   - Fraud Data: (2, 11)\n   - IP Country Data: (3, 3)\n   - Credit Card Data: (1, 5)\n"
    ));
    assert!(output.contains("✅ Basic modeling test successful! Accuracy: "));
    assert!(output.ends_with("🎉 All tests passed! Ready to proceed with modeling.\n"));
}

#[test]
fn test_missing_data_dir_fails_only_data_check() {
    let temp_dir = TempDir::new().unwrap();
    let settings = settings_for(&temp_dir.path().join("no-such-dir"));

    let (summary, output) = run_with(&settings);

    assert!(!summary.all_passed);
    let outcomes: Vec<bool> = summary.reports.iter().map(|r| r.passed()).collect();
    assert_eq!(outcomes, vec![true, false, true]);
    assert!(output.contains("❌ Data loading error: "));
    assert!(!output.contains("✅ Data loading successful!"));
    assert!(output.ends_with("⚠️  Some tests failed. Please check the errors above.\n"));
}

#[test]
fn test_malformed_file_reported_as_failure() {
    let temp_dir = TempDir::new().unwrap();
    write_datasets(temp_dir.path());
    fs::write(
        temp_dir.path().join("IpAddress_to_Country.csv"),
        "lower,upper,country\n1,2,X\n3,4,Y,extra\n",
    )
    .unwrap();

    let (summary, _) = run_with(&settings_for(temp_dir.path()));

    match &summary.reports[1].outcome {
        CheckOutcome::Failed(message) => assert!(message.contains("expected 3 fields")),
        CheckOutcome::Passed => panic!("malformed file should fail the data check"),
    }
}

#[test]
fn test_reported_shapes_match_files() {
    let temp_dir = TempDir::new().unwrap();
    write_datasets(temp_dir.path());

    assert_eq!(
        load_table_shape(&temp_dir.path().join("Fraud_Data.csv")).unwrap(),
        TableShape {
            rows: 2,
            columns: 11
        }
    );
    assert_eq!(
        load_table_shape(&temp_dir.path().join("creditcard.csv")).unwrap(),
        TableShape {
            rows: 1,
            columns: 5
        }
    );
}

#[test]
fn test_modeling_output_stable_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let settings = settings_for(temp_dir.path());

    let (first, _) = run_with(&settings);
    let (second, _) = run_with(&settings);

    assert_eq!(first.reports[2].lines, second.reports[2].lines);
}

#[test]
fn test_summary_json_shape() {
    let temp_dir = TempDir::new().unwrap();
    write_datasets(temp_dir.path());

    let (summary, _) = run_with(&settings_for(temp_dir.path()));
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["all_passed"], true);
    assert_eq!(json["reports"].as_array().unwrap().len(), 3);
    assert_eq!(json["reports"][0]["outcome"]["status"], "passed");
    assert_eq!(json["reports"][1]["lines"][1], "   - Fraud Data: (2, 11)");
    assert!(json["started_at"].is_string());
}
