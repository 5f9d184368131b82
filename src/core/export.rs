use crate::core::attributes::display_name;
use crate::core::flatten::flatten_row;
use crate::domain::model::Group;
use crate::domain::ports::DirectoryApi;
use crate::utils::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Page size requested from the members endpoint.
pub const PAGE_LIMIT: usize = 200;

/// Stream every member of the group into `writer` as CSV: one header row of
/// display names, then one row per member in encounter order across pages.
///
/// The pagination loop follows the next-page cursor returned with each page
/// and stops on an empty page or a missing cursor. The total is unknown until
/// the last page, so progress is reported as a running count only.
pub async fn export_group_members<W: Write>(
    api: &dyn DirectoryApi,
    group: &Group,
    selection: &[String],
    writer: W,
) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(selection.iter().map(|a| display_name(a)))?;

    let mut total = 0usize;
    let mut page_number = 0usize;
    let mut next = Some(api.members_url(&group.id, PAGE_LIMIT));

    while let Some(url) = next {
        let page = api.fetch_members_page(&url).await?;
        if page.members.is_empty() {
            break;
        }

        page_number += 1;
        for member in &page.members {
            csv_writer.write_record(flatten_row(member, selection))?;
        }
        total += page.members.len();
        tracing::info!(
            "📥 page {}: {} members ({} exported so far)",
            page_number,
            page.members.len(),
            total
        );

        next = page.next_page;
    }

    csv_writer.flush()?;

    if total == 0 {
        tracing::warn!(
            "🔶 group '{}' has no members; output contains the header row only",
            group.name
        );
    }

    Ok(total)
}

/// Export to a file on disk. The writer is flushed before success is
/// reported so a completed run never leaves buffered rows behind.
pub async fn export_to_file(
    api: &dyn DirectoryApi,
    group: &Group,
    selection: &[String],
    output_path: &Path,
) -> Result<usize> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    export_group_members(api, group, selection, file).await
}
