//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::{Settings, OPENAI_API_KEY_VAR, TMDB_API_KEY_VAR};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Moviewhiz Doctor");
    println!();
    println!("Checking credentials and configuration...\n");

    let lookup = |name: &str| std::env::var(name).ok();
    let mut checks = Vec::new();

    println!("{}", style("API Keys").bold());
    for check in [
        check_api_key(TMDB_API_KEY_VAR, &lookup),
        check_api_key(OPENAI_API_KEY_VAR, &lookup),
    ] {
        check.print();
        checks.push(check);
    }

    println!();

    println!("{}", style("Configuration").bold());
    for check in [check_config_file(), check_catalog_url(settings)] {
        check.print();
        checks.push(check);
    }
    Output::kv("Chat model", &settings.chain.model);
    Output::kv("Embedding model", &settings.embedding.model);
    Output::kv("Index seed query", &settings.catalog.bootstrap_query);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Moviewhiz.",
            errors
        ));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Moviewhiz is ready to use.");
    }

    Ok(())
}

/// Check that an API key is present, showing only its last characters.
fn check_api_key<F>(name: &str, lookup: &F) -> CheckResult
where
    F: Fn(&str) -> Option<String>,
{
    let hint = format!("Set with: export {}='...'", name);
    match lookup(name) {
        Some(key) if key.trim().is_empty() => CheckResult::error(name, "empty", &hint),
        Some(key) if key.chars().count() > 8 => {
            let chars: Vec<char> = key.chars().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            CheckResult::ok(name, &format!("configured (...{})", tail))
        }
        Some(_) => CheckResult::warning(name, "set but unusually short", &hint),
        None => CheckResult::error(name, "not set", &hint),
    }
}

/// Check if the config file exists and parses.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if !config_path.exists() {
        return CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: moviewhiz config edit",
        );
    }
    match Settings::load_from(Some(&config_path)) {
        Ok(_) => CheckResult::ok("Config file", &format!("{}", config_path.display())),
        Err(e) => CheckResult::error(
            "Config file",
            &format!("{} does not parse", config_path.display()),
            &e.to_string(),
        ),
    }
}

fn check_catalog_url(settings: &Settings) -> CheckResult {
    match url::Url::parse(&settings.catalog.base_url) {
        Ok(_) => CheckResult::ok("Catalog URL", &settings.catalog.base_url),
        Err(e) => CheckResult::error(
            "Catalog URL",
            &format!("'{}' is not a valid URL", settings.catalog.base_url),
            &e.to_string(),
        ),
    }
}
