use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use tempfile::TempDir;

fn i18n_table() -> Command {
    let mut cmd = Command::cargo_bin("i18n-table").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("DEEPL_API_URL")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy");
    cmd
}

fn write_locales(dir: &std::path::Path) {
    fs::write(
        dir.join("locale-de.json"),
        r#"{"menu": {"open": "Öffnen", "close": "Schließen"}}"#,
    )
    .unwrap();
    fs::write(dir.join("locale-en.json"), r#"{"menu": {"open": "Open"}}"#).unwrap();
}

#[test]
fn test_to_csv_in_current_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());

    let output = i18n_table()
        .current_dir(temp_dir.path())
        .arg("to-csv")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Languages: de, en"));
    assert!(stdout.contains("Records: 2"));

    let csv = fs::read_to_string(temp_dir.path().join("i18n.csv")).unwrap();
    assert_eq!(
        csv,
        indoc! {r#"
            "key";"de";"en"
            "menu.close";"Schließen";""
            "menu.open";"Öffnen";"Open"
        "#}
    );
}

#[test]
fn test_to_csv_with_dir_and_output() {
    let temp_dir = TempDir::new().unwrap();
    let locales = temp_dir.path().join("locales");
    fs::create_dir(&locales).unwrap();
    write_locales(&locales);

    i18n_table()
        .current_dir(temp_dir.path())
        .args(["to-csv", "--dir", "locales", "--output", "table.csv"])
        .assert()
        .success();

    assert!(locales.join("table.csv").exists());
    assert!(!temp_dir.path().join("table.csv").exists());
}

#[test]
fn test_to_json_writes_one_file_per_column() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("i18n.csv"), "key;de;en\na.b;Hallo;\n").unwrap();

    i18n_table()
        .args(["to-json", "--dir"])
        .arg(temp_dir.path())
        .assert()
        .success();

    let en = fs::read_to_string(temp_dir.path().join("locale-en.json")).unwrap();
    assert_eq!(
        en,
        indoc! {r#"
            {
              "a": {
                "b": ""
              }
            }
        "#}
    );
    let de: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("locale-de.json")).unwrap())
            .unwrap();
    assert_eq!(de["a"]["b"], "Hallo");
}

#[test]
fn test_to_json_with_custom_prefix_and_input() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("strings.csv"), "key;fr\ntitle;Titre\n").unwrap();

    i18n_table()
        .args(["to-json", "--input", "strings.csv", "--prefix", "messages_", "--dir"])
        .arg(temp_dir.path())
        .assert()
        .success();

    assert!(temp_dir.path().join("messages_fr.json").exists());
}

#[test]
fn test_json_summary_output() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());

    let output = i18n_table()
        .args(["to-csv", "--json", "--dir"])
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["languages"], serde_json::json!(["de", "en"]));
    assert_eq!(v["records"], 2);
    assert_eq!(v["failures"].as_array().unwrap().len(), 0);
    assert!(v.get("fill").is_none());
}

#[test]
fn test_broken_json_file_sets_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());
    fs::write(temp_dir.path().join("locale-fr.json"), "{ not json").unwrap();

    let output = i18n_table()
        .args(["to-csv", "--dir"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Failed: 1"));
    assert!(stdout.contains("locale-fr.json"));
    // the remaining languages are still written
    assert!(temp_dir.path().join("i18n.csv").exists());
}

#[test]
fn test_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = i18n_table()
        .args(["to-csv", "--dir"])
        .arg(temp_dir.path().join("does-not-exist"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist"));
}

#[test]
fn test_missing_csv_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = i18n_table()
        .args(["to-json", "--dir"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("i18n.csv"));
}

#[test]
fn test_key_conflict_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("i18n.csv"), "key;en\na;x\na.b;y\n").unwrap();

    let output = i18n_table()
        .args(["to-json", "--dir"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("`a`"));
    assert!(!temp_dir.path().join("locale-en.json").exists());
}

#[test]
fn test_translate_requires_api_key() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());

    let output = i18n_table()
        .env_remove("DEEPL_API_KEY")
        .args(["to-csv", "--translate", "--dir"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("DEEPL_API_KEY"));
    assert!(!temp_dir.path().join("i18n.csv").exists());
}

#[test]
fn test_translate_fills_from_deepl_endpoint() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
        }
        let body = r#"{"translations":[{"text":"Close"}]}"#;
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
        .unwrap();
        request_line
    });

    let output = i18n_table()
        .env("DEEPL_API_KEY", "test-key")
        .args(["to-csv", "--translate", "--timeout", "5", "--deepl-url", &base_url, "--dir"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let request_line = server.join().unwrap();
    assert!(request_line.contains("target_lang=EN"));
    assert!(request_line.contains("text=Schlie%C3%9Fen"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Translated: 1"));
    let csv = fs::read_to_string(temp_dir.path().join("i18n.csv")).unwrap();
    assert!(csv.contains("\"menu.close\";\"Schließen\";\"Close\"\n"));
}

#[test]
fn test_help_lists_subcommands() {
    let output = i18n_table().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("to-csv"));
    assert!(stdout.contains("to-json"));
}
