use langdex::mcp::{LangdexMcpServer, types::ProjectParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json, fixture_bot_languages};

fn project(fixture: &McpTestFixture) -> Parameters<ProjectParams> {
    Parameters(ProjectParams {
        project_root_path: fixture.root(),
    })
}

// ============================================================================
// get_stats tests
// ============================================================================

#[tokio::test]
async fn test_get_stats_counts() {
    let fixture = fixture_bot_languages().unwrap();
    let server = LangdexMcpServer::new();

    let result = server.get_stats(project(&fixture)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["generation"], 1);
    assert_eq!(json_result["defaultLanguage"], "en");
    assert_eq!(json_result["fallbackLanguage"], "en");
    assert_eq!(json_result["stats"]["fileCount"], 2);
    assert_eq!(json_result["stats"]["loadedFileCount"], 2);
    assert_eq!(json_result["stats"]["languageCount"], 2);
    assert_eq!(json_result["stats"]["uniqueKeyCount"], 4);
    assert_eq!(json_result["stats"]["totalEntryCount"], 6);
    assert_eq!(json_result["stats"]["strictParseCount"], 2);
    assert_eq!(json_result["stats"]["failedParseCount"], 0);

    let files = json_result["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["language"], "de");
    assert_eq!(files[0]["outcome"], "strict");
    assert_eq!(files[0]["tagged"], true);
    assert_eq!(
        files[0]["filePath"],
        fixture
            .root_path()
            .join("bot/lang/de.yml")
            .to_string_lossy()
            .to_string()
    );
    assert!(json_result["diagnostics"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_stats_reports_diagnostics() {
    let fixture = fixture_bot_languages().unwrap();
    fixture.write_language_file("fr.yml", "{{{\n").unwrap();
    let server = LangdexMcpServer::new();

    let result = server.get_stats(project(&fixture)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["stats"]["failedParseCount"], 1);
    let kinds: Vec<&str> = json_result["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["tolerantFallback", "empty"]);
    assert!(
        json_result["diagnostics"][0]["filePath"]
            .as_str()
            .unwrap()
            .ends_with("fr.yml")
    );
}

#[tokio::test]
async fn test_get_stats_does_not_reload_unchanged_project() {
    let fixture = fixture_bot_languages().unwrap();
    let server = LangdexMcpServer::new();

    server.get_stats(project(&fixture)).await.unwrap();
    let result = server.get_stats(project(&fixture)).await.unwrap();

    assert_eq!(extract_tool_result_json(&result)["generation"], 1);
}

#[tokio::test]
async fn test_config_change_triggers_reload() {
    let fixture = fixture_bot_languages().unwrap();
    let server = LangdexMcpServer::new();
    server.get_stats(project(&fixture)).await.unwrap();

    fixture
        .write_config(&json!({ "defaultLanguage": "de" }))
        .unwrap();
    let result = server.get_stats(project(&fixture)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["generation"], 2);
    assert_eq!(json_result["defaultLanguage"], "de");
}

#[tokio::test]
async fn test_missing_language_folder_is_error() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "languageFolderPath": "nowhere" }))
        .unwrap();
    let server = LangdexMcpServer::new();

    let result = server.get_stats(project(&fixture)).await;
    assert!(result.is_err());
}

// ============================================================================
// reload_index tests
// ============================================================================

#[tokio::test]
async fn test_reload_index_picks_up_changes() {
    let fixture = fixture_bot_languages().unwrap();
    let server = LangdexMcpServer::new();
    server.get_stats(project(&fixture)).await.unwrap();

    fixture
        .write_language_file("en.yml", "general:\n  ok: OK\n  new: New\n")
        .unwrap();
    let result = server.reload_index(project(&fixture)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["generation"], 2);
    assert_eq!(json_result["stats"]["uniqueKeyCount"], 4);
    assert_eq!(json_result["files"][1]["entryCount"], 2);
}

// ============================================================================
// get_languages tests
// ============================================================================

#[tokio::test]
async fn test_get_languages() {
    let fixture = fixture_bot_languages().unwrap();
    let server = LangdexMcpServer::new();

    let result = server.get_languages(project(&fixture)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["defaultLanguage"], "en");
    assert_eq!(
        json_result["languages"],
        json!([
            { "language": "de", "keyCount": 3, "fileCount": 1 },
            { "language": "en", "keyCount": 3, "fileCount": 1 }
        ])
    );
}

#[tokio::test]
async fn test_get_languages_merges_files_of_one_language() {
    let fixture = McpTestFixture::with_languages(vec![
        ("messages_en.yml", "a: A\n"),
        ("en/commands.yml", "b: B\n"),
    ])
    .unwrap();
    let server = LangdexMcpServer::new();

    let result = server.get_languages(project(&fixture)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result["languages"],
        json!([{ "language": "en", "keyCount": 2, "fileCount": 2 }])
    );
}
