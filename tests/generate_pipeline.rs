//! End-to-end pipeline tests against a mock synthesis server.

use hanzi_audio::{run, Config, Manifest};
use mockito::Matcher;
use std::path::Path;

const FAKE_MP3: &[u8] = b"ID3\x04fake-mp3-bytes";

fn write_inputs(root: &Path) {
    let data_dir = root.join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(
        data_dir.join("deck-data.json"),
        r#"{
  "vocab": [{"hanzi": "一", "pinyin": "yī"}, {"hanzi": "二", "pinyin": "èr"}],
  "radicals": [{"hanzi": "一"}],
  "numbers": []
}"#,
    )
    .unwrap();
    std::fs::write(
        data_dir.join("sentence-data.json"),
        r#"{"sentences": [{"hanzi": "一二三", "translation": "one two three"}]}"#,
    )
    .unwrap();
}

fn config_for(root: &Path, base_url: &str) -> Config {
    Config::builder()
        .project_root(root)
        .base_url(base_url)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_full_run_generates_clips_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/audio/speech")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "voice": "zh-CN-XiaoxiaoNeural",
            "rate": "-15%",
        })))
        .with_status(200)
        .with_body(FAKE_MP3)
        .expect(3)
        .create_async()
        .await;

    let config = config_for(dir.path(), &server.url());
    let summary = run(&config).await.unwrap();

    assert_eq!(summary.entry_count, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.generated.len(), 3);
    assert!(summary.all_succeeded());
    mock.assert_async().await;

    let audio_dir = dir.path().join("data/audio");
    assert_eq!(
        std::fs::read(audio_dir.join("e4b880.mp3")).unwrap(),
        FAKE_MP3
    );

    let manifest = Manifest::load(&summary.manifest_path).unwrap();
    assert_eq!(manifest.len(), 3);
    assert_eq!(manifest.get("一"), Some("e4b880.mp3"));
    assert_eq!(manifest.get("二"), Some("e4ba8c.mp3"));
    assert_eq!(manifest.get("一二三"), Some("e4b880e4ba8ce4b889.mp3"));
    assert_eq!(summary.total_audio_bytes, (FAKE_MP3.len() * 3) as u64);
}

#[tokio::test]
async fn test_second_run_is_idempotent_and_issues_no_calls() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let mut server = mockito::Server::new_async().await;
    // Exactly three calls across both runs: the second run must be all
    // cache hits.
    let mock = server
        .mock("POST", "/v1/audio/speech")
        .with_status(200)
        .with_body(FAKE_MP3)
        .expect(3)
        .create_async()
        .await;

    let config = config_for(dir.path(), &server.url());
    let first = run(&config).await.unwrap();
    assert_eq!(first.generated.len(), 3);
    let first_manifest = std::fs::read_to_string(&first.manifest_path).unwrap();

    let second = run(&config).await.unwrap();
    assert_eq!(second.attempted, 0);
    assert_eq!(second.skipped, 3);
    assert!(second.all_succeeded());
    let second_manifest = std::fs::read_to_string(&second.manifest_path).unwrap();
    assert_eq!(first_manifest, second_manifest);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cached_entry_gets_no_network_call() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let audio_dir = dir.path().join("data/audio");
    std::fs::create_dir_all(&audio_dir).unwrap();
    // "一" already generated on a previous run.
    std::fs::write(audio_dir.join("e4b880.mp3"), FAKE_MP3).unwrap();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/audio/speech")
        .with_status(200)
        .with_body(FAKE_MP3)
        .expect(2)
        .create_async()
        .await;

    let config = config_for(dir.path(), &server.url());
    let summary = run(&config).await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.attempted, 2);
    assert!(summary.all_succeeded());
    mock.assert_async().await;

    // Cached entry still appears in the manifest.
    let manifest = Manifest::load(&summary.manifest_path).unwrap();
    assert_eq!(manifest.get("一"), Some("e4b880.mp3"));
}

#[tokio::test]
async fn test_failed_entry_is_reported_and_manifest_still_written() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("POST", "/v1/audio/speech")
        .match_body(Matcher::PartialJson(serde_json::json!({"input": "一"})))
        .with_status(500)
        .with_body("synthesis backend exploded")
        .create_async()
        .await;
    let ok_two = server
        .mock("POST", "/v1/audio/speech")
        .match_body(Matcher::PartialJson(serde_json::json!({"input": "二"})))
        .with_status(200)
        .with_body(FAKE_MP3)
        .create_async()
        .await;
    let ok_sentence = server
        .mock("POST", "/v1/audio/speech")
        .match_body(Matcher::PartialJson(serde_json::json!({"input": "一二三"})))
        .with_status(200)
        .with_body(FAKE_MP3)
        .create_async()
        .await;

    let config = config_for(dir.path(), &server.url());
    let summary = run(&config).await.unwrap();

    assert!(!summary.all_succeeded());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.generated.len(), 2);
    let (entry, msg) = &summary.failures[0];
    assert_eq!(entry, "一");
    assert!(msg.contains("500"), "message should carry the status: {}", msg);
    assert!(msg.contains("synthesis backend exploded"));
    failing.assert_async().await;
    ok_two.assert_async().await;
    ok_sentence.assert_async().await;

    // Failed entry is still mapped; its file does not exist.
    let manifest = Manifest::load(&summary.manifest_path).unwrap();
    assert_eq!(manifest.len(), 3);
    assert_eq!(manifest.get("一"), Some("e4b880.mp3"));
    assert!(!dir.path().join("data/audio/e4b880.mp3").exists());

    // A retry run only re-attempts the failed entry.
    let retry_mock = server
        .mock("POST", "/v1/audio/speech")
        .match_body(Matcher::PartialJson(serde_json::json!({"input": "一"})))
        .with_status(200)
        .with_body(FAKE_MP3)
        .create_async()
        .await;
    let retry = run(&config).await.unwrap();
    assert_eq!(retry.skipped, 2);
    assert_eq!(retry.attempted, 1);
    assert!(retry.all_succeeded());
    retry_mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_input_document_aborts_before_generation() {
    let dir = tempfile::tempdir().unwrap();
    // No data/ directory at all.
    let config = Config::builder()
        .project_root(dir.path())
        .base_url("http://localhost:1")
        .build()
        .unwrap();
    let err = run(&config).await.unwrap_err();
    assert!(matches!(err, hanzi_audio::Error::Input { .. }));
    assert!(!dir.path().join("data/audio/manifest.json").exists());
}
