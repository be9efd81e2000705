use std::{path::Path, sync::Arc};

use anyhow::Result;
use parking_lot::Mutex;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use tracing::info;

use crate::{
    config::{ConfigOverrides, Workspace},
    core::{KeyLocation, LanguageIndex, ScopeContext, candidate_keys},
};

use super::types::{
    CompletionsResult, GetCompletionsParams, KeysResult, LanguageInfo, LanguageValue,
    LanguagesResult, ListKeysParams, LocateKeyParams, LocateResult, Pagination, ProjectParams,
    ResolveInContextParams, ResolveKeyParams, ResolveResult, StatsResult,
};

const DEFAULT_PAGE_LIMIT: usize = 20;
const MAX_PAGE_LIMIT: usize = 100;

/// MCP server over one shared index.
///
/// The index is loaded for a project on first use and reloaded whenever a
/// tool names another project root or the project's config changed.
#[derive(Clone)]
pub struct LangdexMcpServer {
    tool_router: ToolRouter<Self>,
    index: Arc<LanguageIndex>,
    workspace: Arc<Mutex<Option<Workspace>>>,
}

impl Default for LangdexMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LangdexMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            index: Arc::new(LanguageIndex::new()),
            workspace: Arc::new(Mutex::new(None)),
        }
    }

    /// Get index statistics and per-file parse outcomes
    #[tool(
        description = "Get index statistics: file, language, key and entry counts, per-file parse outcome (strict, tolerant, failed) and load diagnostics. Use this first."
    )]
    pub async fn get_stats(
        &self,
        params: Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let workspace = self.ensure_loaded(&params.0.project_root_path, false)?;
        json_result(&self.stats_result(&workspace))
    }

    /// Force a reload of every language file
    #[tool(
        description = "Reload all language files from disk and return the new statistics. Use after editing YAML files."
    )]
    pub async fn reload_index(
        &self,
        params: Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let workspace = self.ensure_loaded(&params.0.project_root_path, true)?;
        json_result(&self.stats_result(&workspace))
    }

    /// List loaded languages
    #[tool(description = "Get loaded languages with their key and file counts.")]
    pub async fn get_languages(
        &self,
        params: Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let workspace = self.ensure_loaded(&params.0.project_root_path, false)?;
        let snapshot = self.index.snapshot();

        let languages = snapshot
            .languages()
            .into_iter()
            .map(|language| LanguageInfo {
                key_count: snapshot
                    .table(language.as_str())
                    .map_or(0, |table| table.len()),
                file_count: snapshot
                    .files()
                    .iter()
                    .filter(|file| file.language == language)
                    .count(),
                language,
            })
            .collect();

        json_result(&LanguagesResult {
            default_language: workspace.settings.default_language.clone(),
            fallback_language: workspace.settings.fallback_language.clone(),
            languages,
        })
    }

    /// Resolve a fully qualified key
    #[tool(
        description = "Resolve a dotted key through the default language, then the fallback language, then any language. Set allLanguages to get the value in every language."
    )]
    pub async fn resolve_key(
        &self,
        params: Parameters<ResolveKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let workspace = self.ensure_loaded(&params.project_root_path, false)?;
        let key = params.key.trim();

        let translation = self.index.resolve(key, &workspace.settings);
        let all_languages = params.all_languages.then(|| {
            self.index
                .resolve_all_languages(key)
                .into_iter()
                .map(|(language, value)| LanguageValue { language, value })
                .collect()
        });

        json_result(&ResolveResult {
            key: key.to_string(),
            candidates: vec![key.to_string()],
            found: translation.is_some(),
            translation,
            all_languages,
        })
    }

    /// Resolve a short key as written at a call site
    #[tool(
        description = "Resolve a key reference from a source file. Short keys are expanded with the file stem, class and function (e.g. 'success' in moderation.py, class Moderation, def ban tries moderation.Moderation.ban.success first). Returns the candidates tried and the first match."
    )]
    pub async fn resolve_in_context(
        &self,
        params: Parameters<ResolveInContextParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let workspace = self.ensure_loaded(&params.project_root_path, false)?;
        let scope = ScopeContext::new(
            params.file_stem.as_deref(),
            params.class_name.as_deref(),
            params.function_name.as_deref(),
        );

        let candidates = candidate_keys(&params.key, &scope);
        let translation = self
            .index
            .resolve_in_context(&params.key, &scope, &workspace.settings);

        json_result(&ResolveResult {
            key: params.key,
            candidates,
            found: translation.is_some(),
            translation,
            all_languages: None,
        })
    }

    /// Find where a key is defined
    #[tool(
        description = "Find the file and 0-based line/column where a key is defined, preferring the given language, then the default and fallback languages."
    )]
    pub async fn locate_key(
        &self,
        params: Parameters<LocateKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let workspace = self.ensure_loaded(&params.project_root_path, false)?;
        let key = params.key.trim().to_string();

        let location =
            self.index
                .locate_preferred(params.language.as_deref(), &key, &workspace.settings);

        json_result(&LocateResult {
            key,
            found: location.is_some(),
            end_col: location.as_ref().map(KeyLocation::end_col),
            location,
        })
    }

    /// List keys, paginated
    #[tool(description = "List all translation keys in sorted order. Returns paginated list.")]
    pub async fn list_keys(
        &self,
        params: Parameters<ListKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        self.ensure_loaded(&params.project_root_path, false)?;
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .min(MAX_PAGE_LIMIT);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);
        let prefix = params.prefix.as_deref().unwrap_or("");

        let all_keys: Vec<String> = self
            .index
            .all_keys()
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect();
        let total_count = all_keys.len();

        let items: Vec<String> = all_keys.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + items.len() < total_count;

        json_result(&KeysResult {
            total_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Completion proposals for a partially typed key
    #[tool(
        description = "Suggest keys for a partially typed key reference in a source file. Without a dot, only keys of that file and general.* keys are offered."
    )]
    pub async fn get_completions(
        &self,
        params: Parameters<GetCompletionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let workspace = self.ensure_loaded(&params.project_root_path, false)?;
        let items = self.index.completions(
            &params.prefix,
            params.file_stem.as_deref(),
            &workspace.settings,
        );
        json_result(&CompletionsResult { items })
    }
}

impl LangdexMcpServer {
    /// Load the index for `project_root_path` unless it is already loaded
    /// with the same configuration.
    fn ensure_loaded(&self, project_root_path: &str, force: bool) -> Result<Workspace, McpError> {
        let workspace = Workspace::load(Path::new(project_root_path), &ConfigOverrides::default())
            .map_err(|e| {
                McpError::internal_error(format!("Failed to load config: {:#}", e), None)
            })?;

        let mut current = self.workspace.lock();
        let unchanged = current.as_ref().is_some_and(|loaded| {
            loaded.root_dir == workspace.root_dir && loaded.config == workspace.config
        });
        if unchanged && !force {
            return Ok(workspace);
        }

        let report = self
            .index
            .reload_from_disk(&workspace.settings, &workspace.config.ignores)
            .map_err(|e| McpError::internal_error(format!("Failed to load index: {:#}", e), None))?;
        info!(
            root = %workspace.root_dir.display(),
            generation = report.generation,
            "index loaded"
        );

        *current = Some(workspace.clone());
        Ok(workspace)
    }

    fn stats_result(&self, workspace: &Workspace) -> StatsResult {
        let snapshot = self.index.snapshot();
        StatsResult {
            language_folder: workspace.settings.root.to_string_lossy().replace('\\', "/"),
            default_language: workspace.settings.default_language.clone(),
            fallback_language: workspace.settings.fallback_language.clone(),
            generation: snapshot.generation(),
            stats: snapshot.stats(),
            files: snapshot.files().to_vec(),
            diagnostics: snapshot.diagnostics().to_vec(),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("JSON serialization failed: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for LangdexMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Langdex MCP gives AI agents read access to a project's YAML localization files.\n\n\
                 Available tools:\n\
                 1. get_stats - Index statistics, parse outcomes and load diagnostics\n\
                 2. get_languages - Loaded languages with key and file counts\n\
                 3. list_keys - All keys in sorted order (paginated)\n\
                 4. resolve_key - Value of a dotted key via default and fallback languages\n\
                 5. resolve_in_context - Value of a short key as written in a source file\n\
                 6. locate_key - File and position where a key is defined\n\
                 7. get_completions - Keys matching a partially typed reference\n\
                 8. reload_index - Reload after editing language files\n\n\
                 Every tool takes projectRootPath. Positions are 0-based."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LangdexMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
