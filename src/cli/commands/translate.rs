use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::cache::CacheManager;
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::input::InputReader;
use crate::translation::TranslationRequest;
use crate::ui::Spinner;

pub struct TranslateOptions {
    pub file: Option<PathBuf>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub no_cache: bool,
    pub show_spinner: bool,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    let resolve_options = ResolveOptions {
        from: options.from,
        to: options.to,
        endpoint: options.endpoint,
        timeout_secs: options.timeout_secs,
        max_retries: options.max_retries,
    };
    let config = resolve_config(&resolve_options, &config_file)?;

    let source_text = InputReader::read(options.file.as_deref())?;

    let request = TranslationRequest::new(source_text, &config.from, &config.to)?;
    // Fail on malformed language codes before touching the cache
    request.wire_lang()?;

    let cache = if options.no_cache {
        None
    } else {
        Some(CacheManager::new()?)
    };

    if let Some(cache) = &cache
        && let Some(cached) = cache.get(&request, &config.endpoint)?
    {
        debug!("serving translation from cache");
        print_translation(&cached.translated_text)?;
        return Ok(());
    }

    let client = config.client()?;

    let spinner = if options.show_spinner {
        Spinner::new("Translating...")
    } else {
        Spinner::hidden()
    };
    let outcome = client.execute(&request).await;
    spinner.stop();
    let result = outcome.context("Translation failed")?;

    if let Some(lang) = &result.detected_lang {
        debug!(detected = %lang, "provider detected source language");
    }

    print_translation(&result.translated_text)?;

    if let Some(cache) = &cache
        && let Err(e) = cache.put(&request, &config.endpoint, &result)
    {
        let message = format!("{e:#}");
        warn!(error = %message, "failed to store translation in cache");
    }

    Ok(())
}

fn print_translation(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}
