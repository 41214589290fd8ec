use assert_cmd::Command;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("ddi-predictor").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn predict_requires_both_drugs() {
    let mut cmd = Command::cargo_bin("ddi-predictor").expect("binary exists");
    cmd.args(["predict", "--drug1", "Warfarin"]).assert().failure();
}
