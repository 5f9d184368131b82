use crate::config::ExportConfig;
use crate::core::export::export_to_file;
use crate::core::{attributes, resolver, selector};
use crate::domain::model::Group;
use crate::domain::ports::DirectoryApi;
use crate::utils::error::Result;
use crate::utils::prompt::Prompt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub group: Group,
    pub rows: usize,
    pub output: PathBuf,
}

/// Run the full export: resolve the group, discover and select columns,
/// then stream the membership into the output file.
pub async fn run(
    config: &ExportConfig,
    api: &dyn DirectoryApi,
    prompt: &mut dyn Prompt,
) -> Result<ExportSummary> {
    tracing::info!("🔍 Resolving group '{}'", config.group_query);
    let group = resolver::resolve_group(api, prompt, &config.group_query).await?;
    tracing::info!("✅ Group: {} ({})", group.name, group.id);

    let attributes = attributes::discover_attributes(api, &group.id).await?;
    tracing::debug!("{} attributes available", attributes.len());

    let selection = if config.quick {
        selector::quick_select(&attributes)
    } else {
        selector::interactive_select(prompt, &attributes)?
    };
    let selection = selector::finalize_selection(selection, &config.extra_attrs)?;
    tracing::info!("📋 Exporting {} columns", selection.len());

    let rows = export_to_file(api, &group, &selection, &config.output).await?;

    Ok(ExportSummary {
        group,
        rows,
        output: config.output.clone(),
    })
}
