//! Script generation orchestration
//!
//! validation -> cache lookup -> LLM call -> cache store -> response

use std::sync::Arc;

use serde_json::json;

use crate::application::error::ApplicationError;
use crate::application::ports::ScriptGeneratorPort;
use crate::domain::script::GeneratedScript;
use crate::infrastructure::cache::{derive_cache_key_from_value, CacheService};

/// Prompt length limits (characters, after trimming)
const PROMPT_MIN_CHARS: usize = 10;
const PROMPT_MAX_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct GenerateScriptCommand {
    pub prompt: String,
}

/// GenerateScript Handler
pub struct GenerateScriptHandler {
    script_generator: Option<Arc<dyn ScriptGeneratorPort>>,
    cache: Arc<CacheService>,
}

impl GenerateScriptHandler {
    pub fn new(
        script_generator: Option<Arc<dyn ScriptGeneratorPort>>,
        cache: Arc<CacheService>,
    ) -> Self {
        Self {
            script_generator,
            cache,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateScriptCommand,
    ) -> Result<GeneratedScript, ApplicationError> {
        let prompt = cmd.prompt.trim();
        validate_prompt(prompt)?;

        let cache_key = derive_cache_key_from_value("script", &json!({ "prompt": prompt }));
        if let Some(script) = self.cache.script.get(&cache_key) {
            tracing::info!(cache_key = %cache_key, "Script cache hit");
            return Ok(script);
        }

        let generator = self.script_generator.as_ref().ok_or_else(|| {
            ApplicationError::upstream_unavailable("Script generation API key not configured")
        })?;

        let started = std::time::Instant::now();
        let script = generator.generate(prompt).await.map_err(|e| {
            tracing::error!(error = %e, "Script generation failed");
            ApplicationError::upstream_unavailable(e.to_string())
        })?;
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            segments = script.segments.len(),
            "Script generated"
        );

        self.cache.script.set(cache_key, script.clone(), None);
        Ok(script)
    }
}

fn validate_prompt(prompt: &str) -> Result<(), ApplicationError> {
    if prompt.is_empty() {
        return Err(ApplicationError::validation("prompt", "Prompt is required"));
    }
    let chars = prompt.chars().count();
    if chars < PROMPT_MIN_CHARS || chars > PROMPT_MAX_CHARS {
        return Err(ApplicationError::validation(
            "prompt",
            format!(
                "Prompt must be between {} and {} characters",
                PROMPT_MIN_CHARS, PROMPT_MAX_CHARS
            ),
        ));
    }
    Ok(())
}
