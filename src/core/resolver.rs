use crate::domain::model::{Group, GroupResource};
use crate::domain::ports::DirectoryApi;
use crate::utils::error::{ExportError, Result};
use crate::utils::prompt::Prompt;
use regex::Regex;
use std::sync::OnceLock;

const SEARCH_LIMIT: usize = 20;

/// Canonical Okta group IDs start with `00g` followed by an alphanumeric
/// suffix. Anything else is treated as a free-text name.
pub fn looks_like_group_id(input: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"^00g[A-Za-z0-9]{8,}$").unwrap());
    pattern.is_match(input)
}

/// Resolve a 1-based numeric choice against the candidate list. Pure so the
/// disambiguation step can be tested without a terminal.
pub fn choose_candidate(candidates: &[GroupResource], input: &str) -> Result<GroupResource> {
    let index: usize = input
        .trim()
        .parse()
        .map_err(|_| ExportError::InvalidChoice {
            input: input.to_string(),
        })?;

    if index == 0 || index > candidates.len() {
        return Err(ExportError::InvalidChoice {
            input: input.to_string(),
        });
    }

    Ok(candidates[index - 1].clone())
}

/// Turn a user-supplied group identifier (ID or name) into the canonical
/// group ID and display name.
pub async fn resolve_group(
    api: &dyn DirectoryApi,
    prompt: &mut dyn Prompt,
    query: &str,
) -> Result<Group> {
    if looks_like_group_id(query) {
        let resource = api.get_group(query).await.map_err(|e| match e {
            ExportError::ApiError { status: 404, .. } => ExportError::GroupNotFound {
                query: query.to_string(),
            },
            other => other,
        })?;
        return Ok(Group::from(resource));
    }

    let mut candidates = api.search_groups(query, SEARCH_LIMIT).await?;

    match candidates.len() {
        0 => Err(ExportError::GroupNotFound {
            query: query.to_string(),
        }),
        1 => Ok(Group::from(candidates.remove(0))),
        n => {
            tracing::info!("🔍 {} groups match '{}'", n, query);
            println!("Multiple groups match '{}':", query);
            for (i, candidate) in candidates.iter().enumerate() {
                println!("  {}. {} ({})", i + 1, candidate.profile.name, candidate.id);
            }

            let input = prompt.line("Select group number")?;
            choose_candidate(&candidates, &input).map(Group::from)
        }
    }
}
