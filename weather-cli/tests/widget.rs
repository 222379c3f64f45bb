//! End-to-end tests for `show` and `watch` against a mock OpenWeather server.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
    time::Duration,
};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body(city: &str, temp: f64, icon: &str) -> serde_json::Value {
    serde_json::json!({
        "list": [ {
            "main": { "temp": temp, "humidity": 60 },
            "weather": [ { "icon": icon } ],
            "wind": { "speed": 12.3 }
        } ],
        "city": { "name": city, "timezone": 3600 }
    })
}

async fn mount_city(server: &MockServer, city: &str, temp: f64, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", city))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body(city, temp, "01d"))
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

async fn mount_not_found(server: &MockServer, city: &str, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", city))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" }))
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

/// Fresh home directory holding a config file that points at `server`.
fn isolated_home(name: &str, server: &MockServer) -> PathBuf {
    let home = Path::new(env!("CARGO_TARGET_TMPDIR")).join(name);
    let _ = fs::remove_dir_all(&home);

    let config = format!(
        "api_key = \"TEST_KEY\"\ndefault_city = \"Sousse\"\nbase_url = \"{}\"\n",
        server.uri()
    );
    // XDG layout on Linux, Application Support on macOS.
    for dir in [
        home.join("weather-widget"),
        home.join("Library/Application Support/dev.weather-widget.weather-widget"),
    ] {
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("config.toml"), &config).expect("write config");
    }

    home
}

async fn run_widget(home: PathBuf, args: &[&str], stdin: &str) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let stdin = stdin.to_string();

    tokio::task::spawn_blocking(move || {
        let mut child = Command::new(env!("CARGO_BIN_EXE_weather-widget"))
            .args(&args)
            .current_dir(&home)
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", &home)
            .env_remove("OPENWEATHER_API_KEY")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute weather-widget");

        // Dropping the handle closes stdin.
        let mut input = child.stdin.take().expect("stdin is piped");
        input.write_all(stdin.as_bytes()).expect("write stdin");
        drop(input);

        child.wait_with_output().expect("wait for weather-widget")
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test]
async fn test_show_prints_card_for_city() {
    let server = MockServer::start().await;
    mount_city(&server, "Sousse", 21.9, 0).await;
    let home = isolated_home("show_card", &server);

    let output = run_widget(home, &["show", "Sousse"], "").await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("[clear] 21°c"), "stdout: {stdout}");
    assert!(stdout.contains("\nSousse\n"), "stdout: {stdout}");
    assert!(stdout.contains("Humidity: 60%"), "stdout: {stdout}");
    assert!(stdout.contains("Wind Speed: 12.3 Km/h"), "stdout: {stdout}");
    assert!(stdout.contains("linear-gradient("), "stdout: {stdout}");
}

#[tokio::test]
async fn test_show_defaults_to_configured_city_and_prints_json() {
    let server = MockServer::start().await;
    mount_city(&server, "Sousse", -2.5, 0).await;
    let home = isolated_home("show_json", &server);

    let output = run_widget(home, &["show", "--json"], "").await;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["location"], "Sousse");
    assert_eq!(value["temperature"], -2);
    assert_eq!(value["icon"], "clear");
    assert!(value["gradient_css"].as_str().unwrap().starts_with("linear-gradient("));
}

#[tokio::test]
async fn test_show_reports_api_error() {
    let server = MockServer::start().await;
    mount_not_found(&server, "Atlantis", 0).await;
    let home = isolated_home("show_not_found", &server);

    let output = run_widget(home, &["show", "Atlantis"], "").await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("city not found"), "stderr: {stderr}");
}

#[tokio::test]
async fn test_watch_prompts_alerts_and_keeps_previous_card() {
    let server = MockServer::start().await;
    mount_city(&server, "Sousse", 21.9, 0).await;
    mount_not_found(&server, "Atlantis", 400).await;
    let home = isolated_home("watch_alert", &server);

    let output = run_widget(home, &["watch"], "\nAtlantis\n").await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    // The default city is searched before any input is read.
    assert_eq!(stdout.lines().next(), Some("Searching..."), "stdout: {stdout}");
    assert!(stdout.contains("Enter City Name"), "stdout: {stdout}");
    assert!(!stdout.contains("Please enter a city name"), "stdout: {stdout}");

    let alert = stdout.find("Alert: city not found").expect("alert line");
    let first_card = stdout.find("[clear] 21°c").expect("Sousse card");
    assert!(first_card < alert, "stdout: {stdout}");

    // The failure re-renders the last good card after the alert.
    let after_alert = &stdout[alert..];
    assert!(after_alert.contains("[clear] 21°c"), "stdout: {stdout}");
    assert!(after_alert.contains("\nSousse\n"), "stdout: {stdout}");
    assert_eq!(stdout.matches("[clear] 21°c").count(), 2, "stdout: {stdout}");
}

#[tokio::test]
async fn test_watch_renders_results_as_they_land() {
    let server = MockServer::start().await;
    mount_city(&server, "Sousse", 21.9, 0).await;
    mount_city(&server, "Paris", 15.4, 400).await;
    mount_city(&server, "London", 9.8, 0).await;
    let home = isolated_home("watch_order", &server);

    let output = run_widget(home, &["watch"], "Paris\nLondon\n").await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(stdout.matches("Searching...").count(), 3, "stdout: {stdout}");

    // Paris was requested first but lands last, so it is the final card.
    let london = stdout.rfind("\nLondon\n").expect("London card");
    let paris = stdout.rfind("\nParis\n").expect("Paris card");
    assert!(london < paris, "stdout: {stdout}");
    let last_card = stdout.rfind("[clear] ").expect("a card");
    assert!(stdout[last_card..].starts_with("[clear] 15°c"), "stdout: {stdout}");
}
