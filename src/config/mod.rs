use crate::utils::error::Result;
use crate::utils::prompt::Prompt;
use crate::utils::validation::{validate_non_empty, validate_org_url};
use clap::Parser;
use std::fmt;
use std::path::PathBuf;

pub const ENV_ORG_URL: &str = "OKTA_ORG_URL";
pub const ENV_API_TOKEN: &str = "OKTA_API_TOKEN";
pub const ENV_GROUP: &str = "OKTA_GROUP";
pub const ENV_OUTPUT: &str = "OKTA_EXPORT_OUTPUT";

#[derive(Debug, Clone, Parser)]
#[command(name = "okta-group-export")]
#[command(about = "Export Okta group membership to a CSV file")]
pub struct CliArgs {
    /// Okta org base URL, e.g. https://acme.okta.com
    #[arg(long)]
    pub org_url: Option<String>,

    /// API token (prefer OKTA_API_TOKEN or the interactive prompt)
    #[arg(long)]
    pub token: Option<String>,

    /// Group ID (00g...) or a free-text group name
    #[arg(long)]
    pub group: Option<String>,

    /// Output CSV path
    #[arg(long)]
    pub output: Option<String>,

    /// Skip interactive column selection and use the default columns
    #[arg(long)]
    pub quick: bool,

    /// Extra attribute names to append as columns
    #[arg(long, value_delimiter = ',')]
    pub attrs: Vec<String>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

/// Fully resolved run configuration. Each required input falls back from
/// CLI flag to environment variable to interactive prompt; the token prompt
/// does not echo.
#[derive(Clone)]
pub struct ExportConfig {
    pub org_url: String,
    pub token: String,
    pub group_query: String,
    pub output: PathBuf,
    pub quick: bool,
    pub extra_attrs: Vec<String>,
    pub verbose: bool,
}

// The token stays out of Debug output and logs.
impl fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field("org_url", &self.org_url)
            .field("token", &"<redacted>")
            .field("group_query", &self.group_query)
            .field("output", &self.output)
            .field("quick", &self.quick)
            .field("extra_attrs", &self.extra_attrs)
            .field("verbose", &self.verbose)
            .finish()
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn resolve_input<F>(flag: Option<String>, env_name: &str, mut ask: F) -> Result<String>
where
    F: FnMut() -> Result<String>,
{
    if let Some(value) = flag.filter(|v| !v.trim().is_empty()) {
        return Ok(value);
    }
    if let Some(value) = env_value(env_name) {
        return Ok(value);
    }
    ask()
}

impl CliArgs {
    /// Resolve every input, prompting for whatever is still missing, and
    /// validate before any network call is made.
    pub fn resolve(self, prompt: &mut dyn Prompt) -> Result<ExportConfig> {
        let org_url = resolve_input(self.org_url, ENV_ORG_URL, || {
            prompt.line("Okta org URL (e.g. https://acme.okta.com)")
        })?;
        let token = resolve_input(self.token, ENV_API_TOKEN, || prompt.secret("API token"))?;
        let group_query = resolve_input(self.group, ENV_GROUP, || {
            prompt.line("Group ID or name")
        })?;
        let output = resolve_input(self.output, ENV_OUTPUT, || {
            prompt.line("Output CSV path")
        })?;

        validate_org_url(&org_url)?;
        validate_non_empty("API token", &token)?;
        validate_non_empty("group", &group_query)?;
        validate_non_empty("output path", &output)?;

        Ok(ExportConfig {
            org_url,
            token,
            group_query,
            output: PathBuf::from(output),
            quick: self.quick,
            extra_attrs: self.attrs,
            verbose: self.verbose,
        })
    }
}
