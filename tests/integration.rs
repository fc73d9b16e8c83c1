use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn ragchat_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("ragchat");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let config_dir = tmp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();

    // No simulated latency so the suite stays fast
    let config_content = r#"[retrieval]
top_k = 6
score_threshold = 0.2

[chat]
retrieval_delay_ms = 0
generation_delay_ms = 0

[logging]
level = "error"
"#;

    let config_path = config_dir.join("ragchat.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_ragchat(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    run_ragchat_with_stdin(config_path, args, "")
}

fn run_ragchat_with_stdin(
    config_path: &Path,
    args: &[&str],
    stdin: &str,
) -> (String, String, bool) {
    let binary = ragchat_binary();
    let mut child = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to run ragchat binary at {:?}: {}", binary, e));

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_ask_use_memo() {
    let (_tmp, config_path) = setup_test_env();

    let args = ["ask", "o que é useMemo?", "--progress", "off"];
    let (stdout, stderr, success) = run_ragchat(&config_path, &args);
    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("# Como usar useMemo no React 18"));
}

#[test]
fn test_ask_button_template() {
    let (_tmp, config_path) = setup_test_env();

    let args = ["ask", "como criar um Button?", "--progress", "off"];
    let (stdout, _, success) = run_ragchat(&config_path, &args);
    assert!(success);
    assert!(stdout.contains("# Criando um Componente Button Reutilizável"));
    // The rule template wins over the generic context answer
    assert!(!stdout.contains("[Documento"));
}

#[test]
fn test_ask_generic_answer_quotes_context() {
    let (_tmp, config_path) = setup_test_env();

    let args = ["ask", "qual a capital da França?", "--progress", "off"];
    let (stdout, _, success) = run_ragchat(&config_path, &args);
    assert!(success);
    assert!(stdout.contains("[Documento 1]: React 18 - useMemo Hook"));
    assert!(stdout.contains("[Documento 3]: React Hooks - useState e useEffect"));
}

#[test]
fn test_ask_json_progress_sequence() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_ragchat(&config_path, &["ask", "hooks", "--progress", "json"]);
    assert!(success, "ask failed: stderr={}", stderr);
    assert!(stdout.contains("# Hooks Fundamentais do React"));

    let states: Vec<String> = stderr
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .filter(|v| v["event"] == "state")
        .map(|v| v["state"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(states, vec!["loading", "streaming", "idle"]);
}

#[test]
fn test_ask_blank_question_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_ragchat(&config_path, &["ask", "   ", "--progress", "off"]);
    assert!(!success);
    assert!(stderr.contains("empty"));
}

#[test]
fn test_search_json_order() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_ragchat(&config_path, &["search", "hooks", "--json"]);
    assert!(success);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let ids: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
}

#[test]
fn test_search_threshold_no_results() {
    let (_tmp, config_path) = setup_test_env();

    let args = ["search", "qual a capital da França?", "--threshold", "0.5"];
    let (stdout, _, success) = run_ragchat(&config_path, &args);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_search_explain() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_ragchat(&config_path, &["search", "button", "--explain"]);
    assert!(success);
    assert!(stdout.contains("explain:"));
    assert!(stdout.contains("Componente Button"));
}

#[test]
fn test_search_deterministic() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout1, _, _) = run_ragchat(&config_path, &["search", "react", "--json"]);
    let (stdout2, _, _) = run_ragchat(&config_path, &["search", "react", "--json"]);
    assert_eq!(stdout1, stdout2, "Search results should be deterministic");
}

#[test]
fn test_docs_lists_knowledge_base() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_ragchat(&config_path, &["docs"]);
    assert!(success);
    assert!(stdout.contains("react-docs"));
    assert!(stdout.contains("components-guide"));
    assert!(stdout.contains("react-fundamentals"));

    let (stdout, _, success) = run_ragchat(&config_path, &["docs", "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
    assert_eq!(parsed[0]["metadata"]["type"], "md");
}

#[test]
fn test_eval_json() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_ragchat(&config_path, &["eval", "--json"]);
    assert!(success, "eval failed: stderr={}", stderr);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["results"].as_array().unwrap().len(), 5);
    assert!(parsed["avg_overall"].as_f64().is_some());
}

#[test]
fn test_eval_custom_samples() {
    let (tmp, config_path) = setup_test_env();

    let samples = tmp.path().join("samples.json");
    fs::write(
        &samples,
        r#"{"evaluation_samples":[{"question":"Como usar useMemo?","expected_answer":"useMemo memoriza valores","category":"hooks"}]}"#,
    )
    .unwrap();

    let args = ["eval", "--samples", samples.to_str().unwrap(), "--json"];
    let (stdout, _, success) = run_ragchat(&config_path, &args);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["results"].as_array().unwrap().len(), 1);
}

#[test]
fn test_chat_piped_session() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_ragchat_with_stdin(
        &config_path,
        &["chat", "--progress", "off"],
        "o que é useMemo?\n/clear\n/quit\nhooks\n",
    );
    assert!(success, "chat failed: stderr={}", stderr);
    assert!(stdout.contains("# Como usar useMemo no React 18"));
    assert!(stdout.contains("Conversation cleared."));
    // Input after /quit is never answered
    assert!(!stdout.contains("# Hooks Fundamentais do React"));
}

#[test]
fn test_invalid_config_rejected() {
    let (tmp, _) = setup_test_env();

    let bad = tmp.path().join("bad.toml");
    fs::write(&bad, "[retrieval]\ntop_k = 0\n").unwrap();

    let (_, stderr, success) = run_ragchat(&bad, &["docs"]);
    assert!(!success);
    assert!(stderr.contains("top_k"));
}

#[test]
fn test_completions() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_ragchat(&config_path, &["completions", "bash"]);
    assert!(success);
    assert!(stdout.contains("ragchat"));
}
