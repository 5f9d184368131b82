use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level user fields that exist outside the profile bag. Everything else
/// is resolved against the profile.
pub const BASELINE_ATTRIBUTES: &[&str] = &[
    "id",
    "status",
    "created",
    "activated",
    "statusChanged",
    "lastLogin",
    "lastUpdated",
    "passwordChanged",
];

/// Baseline fields carrying RFC-3339 timestamps.
pub const TIMESTAMP_ATTRIBUTES: &[&str] = &[
    "created",
    "activated",
    "statusChanged",
    "lastLogin",
    "lastUpdated",
    "passwordChanged",
];

pub fn is_baseline(name: &str) -> bool {
    BASELINE_ATTRIBUTES.contains(&name)
}

pub fn is_timestamp(name: &str) -> bool {
    TIMESTAMP_ATTRIBUTES.contains(&name)
}

/// A group as returned by the Okta API. The display name lives in the
/// group's own profile bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResource {
    pub id: String,
    #[serde(default)]
    pub profile: GroupProfile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The resolved export target, immutable after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
}

impl From<GroupResource> for Group {
    fn from(resource: GroupResource) -> Self {
        Self {
            id: resource.id,
            name: resource.profile.name,
        }
    }
}

/// A group member: fixed system fields at the top level plus the
/// schema-flexible profile bag. Both are kept as loose JSON maps since
/// profile attributes vary per org.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub profile: serde_json::Map<String, Value>,
    #[serde(flatten)]
    pub system: serde_json::Map<String, Value>,
}

impl Member {
    /// Look up an attribute by name: baseline names resolve against the
    /// top-level fields, everything else against the profile bag. `None`
    /// is the absent marker; lookup never fails.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        if is_baseline(name) {
            self.system.get(name)
        } else {
            self.profile.get(name)
        }
    }

    pub fn profile_keys(&self) -> impl Iterator<Item = &str> {
        self.profile.keys().map(String::as_str)
    }
}

/// One page of members plus the explicit cursor to the next page. The cursor
/// is threaded through the pagination loop as a value, never held as client
/// state.
#[derive(Debug, Clone)]
pub struct MemberPage {
    pub members: Vec<Member>,
    pub next_page: Option<String>,
}
