use crate::core::attributes::{apply_preferred_order, categorize, dedupe, DEFAULT_COLUMNS};
use crate::utils::error::{ExportError, Result};
use crate::utils::prompt::Prompt;

/// Apply one toggle command to the current selection. `listed` is the
/// numbered attribute list as rendered; indices in commands are 1-based.
/// Out-of-range numbers and unparseable tokens are ignored.
pub fn apply_toggle(current: &[String], command: &str, listed: &[String]) -> Vec<String> {
    let command = command.trim();

    if command.eq_ignore_ascii_case("all") {
        return listed.to_vec();
    }
    if command.eq_ignore_ascii_case("none") {
        return Vec::new();
    }

    let mut selection = current.to_vec();
    for token in command.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let indices: Vec<usize> = if let Some((a, b)) = token.split_once('-') {
            match (a.trim().parse::<usize>(), b.trim().parse::<usize>()) {
                (Ok(start), Ok(end)) if start <= end => (start..=end).collect(),
                _ => continue,
            }
        } else {
            match token.parse::<usize>() {
                Ok(n) => vec![n],
                Err(_) => continue,
            }
        };

        for index in indices {
            if index == 0 || index > listed.len() {
                continue;
            }
            let attribute = &listed[index - 1];
            if let Some(pos) = selection.iter().position(|s| s == attribute) {
                selection.remove(pos);
            } else {
                selection.push(attribute.clone());
            }
        }
    }

    selection
}

/// Flatten the categorized checklist into the numbered display order.
fn listed_order(attributes: &[String]) -> Vec<String> {
    categorize(attributes)
        .into_iter()
        .flat_map(|(_, members)| members)
        .collect()
}

fn render_checklist(attributes: &[String], selection: &[String]) {
    let mut number = 0;
    println!();
    for (category, members) in categorize(attributes) {
        println!("{}:", category);
        for member in members {
            number += 1;
            let mark = if selection.contains(&member) { "x" } else { " " };
            println!("  {:>3}. [{}] {}", number, mark, member);
        }
    }
    println!();
}

/// Interactive checklist selection: toggle until an empty command, then one
/// optional free-text prompt for extra attribute names.
pub fn interactive_select(
    prompt: &mut dyn Prompt,
    attributes: &[String],
) -> Result<Vec<String>> {
    let listed = listed_order(attributes);
    let mut selection: Vec<String> = DEFAULT_COLUMNS
        .iter()
        .filter(|d| listed.iter().any(|l| l == *d))
        .map(|d| d.to_string())
        .collect();

    loop {
        render_checklist(attributes, &selection);
        let command = prompt.line("Toggle columns (numbers/ranges, ALL, NONE; empty to finish)")?;
        if command.trim().is_empty() {
            break;
        }
        selection = apply_toggle(&selection, &command, &listed);
    }

    let extra = prompt.line("Additional attribute names (comma-separated, empty to skip)")?;
    for name in extra.split(',') {
        let name = name.trim();
        if !name.is_empty() && !selection.iter().any(|s| s == name) {
            selection.push(name.to_string());
        }
    }

    Ok(selection)
}

/// Quick mode: the fixed default columns, no interaction.
pub fn quick_select(attributes: &[String]) -> Vec<String> {
    DEFAULT_COLUMNS
        .iter()
        .filter(|d| attributes.iter().any(|a| a == *d))
        .map(|d| d.to_string())
        .collect()
}

/// Dedupe, reject an empty selection, and apply the fixed column ordering.
pub fn finalize_selection(selection: Vec<String>, extra: &[String]) -> Result<Vec<String>> {
    let mut selection = selection;
    for name in extra {
        let name = name.trim();
        if !name.is_empty() {
            selection.push(name.to_string());
        }
    }

    let selection = dedupe(selection);
    if selection.is_empty() {
        return Err(ExportError::ValidationError {
            message: "no attributes selected".to_string(),
        });
    }

    Ok(apply_preferred_order(&selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::prompt::ScriptedPrompt;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_all_then_none_then_picks() {
        let listed = strings(&["id", "status", "email", "login"]);

        let s = apply_toggle(&strings(&["email"]), "ALL", &listed);
        assert_eq!(s, listed);

        let s = apply_toggle(&s, "NONE", &listed);
        assert!(s.is_empty());

        let s = apply_toggle(&s, "1,3-4", &listed);
        assert_eq!(s, strings(&["id", "email", "login"]));
    }

    #[test]
    fn test_toggle_flips_membership() {
        let listed = strings(&["id", "status", "email"]);
        let s = apply_toggle(&strings(&["id", "email"]), "1,2", &listed);
        assert_eq!(s, strings(&["email", "status"]));
    }

    #[test]
    fn test_toggle_ignores_out_of_range_and_garbage() {
        let listed = strings(&["id", "status"]);
        let s = apply_toggle(&[], "0,7,abc,2", &listed);
        assert_eq!(s, strings(&["status"]));
    }

    #[test]
    fn test_toggle_inverted_range_is_ignored() {
        let listed = strings(&["id", "status", "email"]);
        let s = apply_toggle(&[], "3-1", &listed);
        assert!(s.is_empty());
    }

    #[test]
    fn test_interactive_select_scripted_session() {
        let attributes = strings(&["id", "status", "firstName", "email"]);
        // listed order: System(id,status), Name(firstName), Contact(email)
        let mut prompt = ScriptedPrompt::new(["NONE", "1,4", "", "department"]);

        let selection = interactive_select(&mut prompt, &attributes).unwrap();
        assert_eq!(selection, strings(&["id", "email", "department"]));
    }

    #[test]
    fn test_finalize_rejects_empty() {
        assert!(matches!(
            finalize_selection(Vec::new(), &[]),
            Err(ExportError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_finalize_orders_and_appends_extra() {
        let selection = strings(&["lastName", "id", "email"]);
        let finalized = finalize_selection(selection, &strings(&["badgeColor"])).unwrap();
        assert_eq!(finalized, strings(&["id", "lastName", "email", "badgeColor"]));
    }

    #[test]
    fn test_quick_select_uses_defaults() {
        let attributes = strings(&[
            "id", "status", "created", "lastLogin", "firstName", "lastName", "email", "login",
            "department",
        ]);
        let selection = quick_select(&attributes);
        assert_eq!(
            selection,
            strings(&[
                "id",
                "firstName",
                "lastName",
                "email",
                "login",
                "status",
                "created",
                "lastLogin"
            ])
        );
    }
}
