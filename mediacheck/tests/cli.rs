use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("mediacheck").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG").env_remove("DEPLOY_URL");
    cmd
}

async fn fixture_server() -> MockServer {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    let html = format!(
        r#"<html><body>
            <video><source src="a.mp4" type="video/mp4"></video>
            <video><source src="//127.0.0.1:{}/b.mp4" type="video/mp4"></video>
        </body></html>"#,
        port
    );

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(html),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/a.mp4"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    mock_server
}

#[test]
fn unreachable_deploy_url_exits_with_one() {
    cmd()
        .env("DEPLOY_URL", "http://127.0.0.1:1")
        .args(["--timeout", "2"])
        .assert()
        .code(1)
        .stderr(contains("Failed to fetch http://127.0.0.1:1"))
        .stdout(contains("Checked").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn reports_each_source() {
    let server = fixture_server().await;

    cmd()
        .env("DEPLOY_URL", server.uri())
        .args(["--quiet", "--timeout", "5"])
        .assert()
        .success()
        .stdout(contains(format!("{}/a.mp4", server.uri())))
        .stdout(contains(format!(
            "https://127.0.0.1:{}/b.mp4",
            server.address().port()
        )))
        .stdout(contains("Checked 2 media URL(s): 1 passed, 1 failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn strict_mode_exits_with_two_on_failed_link() {
    let server = fixture_server().await;
    let uri = server.uri();

    cmd()
        .args(["--quiet", "--strict", "--timeout", "5", "--url", uri.as_str()])
        .assert()
        .code(2);
}

#[tokio::test(flavor = "multi_thread")]
async fn json_report_written_to_file() {
    let server = fixture_server().await;
    let dir = tempfile::TempDir::new().unwrap();
    let report_path = dir.path().join("report.json");

    cmd()
        .args(["--timeout", "5", "--format", "json", "-o"])
        .arg(&report_path)
        .env("DEPLOY_URL", server.uri())
        .assert()
        .success()
        .stdout(contains("Report saved to"));

    let written = std::fs::read_to_string(&report_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["checks"].as_array().unwrap().len(), 2);
    assert_eq!(value["checks"][0]["status_code"], 200);
}

#[tokio::test(flavor = "multi_thread")]
async fn json_report_on_stdout_is_the_only_stdout_content() {
    let server = fixture_server().await;

    let assert = cmd()
        .env("DEPLOY_URL", server.uri())
        .args(["--timeout", "5", "--format", "json"])
        .assert()
        .success()
        .stderr(contains("mediacheck v"))
        .stderr(contains("Checked 2 media URL(s): 1 passed, 1 failed"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["base_url"], server.uri());
    assert_eq!(value["checks"].as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn unwritable_report_path_exits_with_one() {
    let server = fixture_server().await;
    let dir = tempfile::TempDir::new().unwrap();
    let report_path = dir.path().join("missing").join("report.txt");

    cmd()
        .args(["--quiet", "--timeout", "5", "-o"])
        .arg(&report_path)
        .env("DEPLOY_URL", server.uri())
        .assert()
        .code(1)
        .stderr(contains("Failed to write report"));
}
