use crate::domain::model::{is_baseline, BASELINE_ATTRIBUTES};
use crate::domain::ports::DirectoryApi;
use crate::utils::error::Result;
use std::collections::HashSet;

const SAMPLE_LIMIT: usize = 10;

/// Columns used by quick mode when the user skips interactive selection.
pub const DEFAULT_COLUMNS: &[&str] = &[
    "id",
    "firstName",
    "lastName",
    "email",
    "login",
    "status",
    "created",
    "lastLogin",
];

/// Fixed column ordering applied to whatever the user selected. Selected
/// attributes not listed here are appended after, in selection order.
pub const PRIORITY_ORDER: &[&str] = &[
    "id",
    "firstName",
    "lastName",
    "displayName",
    "email",
    "login",
    "secondEmail",
    "status",
    "userType",
    "title",
    "department",
    "division",
    "organization",
    "managerId",
    "manager",
    "employeeNumber",
    "costCenter",
    "mobilePhone",
    "primaryPhone",
    "streetAddress",
    "city",
    "state",
    "zipCode",
    "countryCode",
    "postalAddress",
    "preferredLanguage",
    "locale",
    "timezone",
    "created",
    "activated",
    "statusChanged",
    "lastLogin",
    "lastUpdated",
    "passwordChanged",
];

/// Checklist categories shown during interactive selection. Attributes not
/// named here land in the overflow "Custom" category.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "System",
        &[
            "id",
            "status",
            "userType",
            "created",
            "activated",
            "statusChanged",
            "lastLogin",
            "lastUpdated",
            "passwordChanged",
        ],
    ),
    (
        "Name",
        &[
            "firstName",
            "lastName",
            "middleName",
            "displayName",
            "nickName",
            "honorificPrefix",
            "honorificSuffix",
        ],
    ),
    (
        "Contact",
        &["email", "login", "secondEmail", "mobilePhone", "primaryPhone"],
    ),
    (
        "Organization",
        &[
            "organization",
            "department",
            "division",
            "title",
            "managerId",
            "manager",
            "employeeNumber",
            "costCenter",
        ],
    ),
    (
        "Address",
        &[
            "streetAddress",
            "city",
            "state",
            "zipCode",
            "countryCode",
            "postalAddress",
        ],
    ),
    ("Locale", &["preferredLanguage", "locale", "timezone"]),
];

/// Human-readable column label, falling back to the raw attribute name for
/// anything without a mapping.
pub fn display_name(attribute: &str) -> String {
    let label = match attribute {
        "id" => "User ID",
        "status" => "Status",
        "userType" => "User Type",
        "created" => "Created",
        "activated" => "Activated",
        "statusChanged" => "Status Changed",
        "lastLogin" => "Last Login",
        "lastUpdated" => "Last Updated",
        "passwordChanged" => "Password Changed",
        "firstName" => "First Name",
        "lastName" => "Last Name",
        "middleName" => "Middle Name",
        "displayName" => "Display Name",
        "nickName" => "Nickname",
        "honorificPrefix" => "Honorific Prefix",
        "honorificSuffix" => "Honorific Suffix",
        "email" => "Email",
        "login" => "Login",
        "secondEmail" => "Secondary Email",
        "mobilePhone" => "Mobile Phone",
        "primaryPhone" => "Primary Phone",
        "organization" => "Organization",
        "department" => "Department",
        "division" => "Division",
        "title" => "Title",
        "managerId" => "Manager ID",
        "manager" => "Manager",
        "employeeNumber" => "Employee Number",
        "costCenter" => "Cost Center",
        "streetAddress" => "Street Address",
        "city" => "City",
        "state" => "State",
        "zipCode" => "Zip Code",
        "countryCode" => "Country Code",
        "postalAddress" => "Postal Address",
        "preferredLanguage" => "Preferred Language",
        "locale" => "Locale",
        "timezone" => "Time Zone",
        other => return other.to_string(),
    };
    label.to_string()
}

/// Enumerate available attributes for a group: the fixed baseline set plus
/// every profile key observed in a small member sample. An empty group still
/// yields the baseline set.
pub async fn discover_attributes(api: &dyn DirectoryApi, group_id: &str) -> Result<Vec<String>> {
    let url = api.members_url(group_id, SAMPLE_LIMIT);
    let page = api.fetch_members_page(&url).await?;

    let mut extras: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for member in &page.members {
        for key in member.profile_keys() {
            if !is_baseline(key) && seen.insert(key.to_string()) {
                extras.push(key.to_string());
            }
        }
    }
    extras.sort();

    tracing::debug!(
        "🔍 discovered {} profile attributes from a sample of {}",
        extras.len(),
        page.members.len()
    );

    let mut attributes: Vec<String> =
        BASELINE_ATTRIBUTES.iter().map(|s| s.to_string()).collect();
    attributes.extend(extras);
    Ok(attributes)
}

/// Group the discovered attributes into the fixed checklist categories,
/// preserving category order, with unmatched attributes under "Custom".
pub fn categorize(attributes: &[String]) -> Vec<(String, Vec<String>)> {
    let mut result = Vec::new();
    let mut placed: HashSet<&'static str> = HashSet::new();

    for (category, names) in CATEGORIES {
        placed.extend(names.iter().copied());
        let members: Vec<String> = names
            .iter()
            .filter(|n| attributes.iter().any(|a| a == *n))
            .map(|n| n.to_string())
            .collect();
        if !members.is_empty() {
            result.push((category.to_string(), members));
        }
    }

    let custom: Vec<String> = attributes
        .iter()
        .filter(|a| !placed.contains(a.as_str()))
        .cloned()
        .collect();
    if !custom.is_empty() {
        result.push(("Custom".to_string(), custom));
    }

    result
}

/// Deduplicate while preserving first occurrence.
pub fn dedupe(attributes: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    attributes
        .into_iter()
        .filter(|a| seen.insert(a.clone()))
        .collect()
}

/// Reorder a selection: priority-listed attributes first in priority order,
/// then everything else in original selection order. Deterministic for a
/// fixed input; never depends on set iteration order.
pub fn apply_preferred_order(selection: &[String]) -> Vec<String> {
    let mut ordered: Vec<String> = PRIORITY_ORDER
        .iter()
        .filter(|p| selection.iter().any(|s| s == *p))
        .map(|p| p.to_string())
        .collect();

    for attr in selection {
        if !PRIORITY_ORDER.contains(&attr.as_str()) {
            ordered.push(attr.clone());
        }
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_preferred_order_is_priority_then_leftovers() {
        let selection = strings(&["lastName", "id", "email"]);
        assert_eq!(
            apply_preferred_order(&selection),
            strings(&["id", "lastName", "email"])
        );
    }

    #[test]
    fn test_preferred_order_appends_unknown_in_selection_order() {
        let selection = strings(&["customB", "email", "customA", "id"]);
        assert_eq!(
            apply_preferred_order(&selection),
            strings(&["id", "email", "customB", "customA"])
        );
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let deduped = dedupe(strings(&["email", "id", "email", "login", "id"]));
        assert_eq!(deduped, strings(&["email", "id", "login"]));
    }

    #[test]
    fn test_categorize_places_overflow_in_custom() {
        let attrs = strings(&["id", "email", "favoriteColor", "firstName"]);
        let categories = categorize(&attrs);

        let names: Vec<&str> = categories.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["System", "Name", "Contact", "Custom"]);

        let custom = &categories.last().unwrap().1;
        assert_eq!(custom, &strings(&["favoriteColor"]));
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name("firstName"), "First Name");
        assert_eq!(display_name("favoriteColor"), "favoriteColor");
    }
}
