use serde::{Deserialize, Serialize};

/// WhatsApp coordination group registered on the hub.
///
/// Groups are submitted by field staff and held for moderation; only
/// approved, non-deleted groups appear on the public groups screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppGroup {
    pub id: i64,
    pub name: String,
    /// Humanitarian sector the group coordinates (e.g. "WASH", "Shelter")
    pub sector: String,
    pub description: String,
    /// Invite link (chat.whatsapp.com URL)
    pub link: String,
    /// Person who registered the group
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub approved: bool,
    /// Soft-delete flag; deleted groups stay restorable from the admin queue
    #[serde(default)]
    pub deleted: bool,
    /// RFC 3339 timestamp
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Request to register a new WhatsApp group (goes to the moderation queue)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSubmission {
    pub name: String,
    pub sector: String,
    pub description: String,
    pub link: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
}

/// User-submitted resource or reference link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    /// e.g. "guideline", "tool", "template", "reference"
    pub category: Option<String>,
    pub sector: Option<String>,
    pub submitted_by: Option<String>,
    pub email: Option<String>,
    pub approved: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Request to submit a new resource for moderation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSubmission {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub category: Option<String>,
    pub sector: Option<String>,
    pub submitted_by: Option<String>,
    pub email: Option<String>,
}

/// Contact information submitted through the registration form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: i64,
    pub organization: String,
    pub focal_point_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub sector: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub additional_info: Option<String>,
    pub approved: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Request to register contact information (goes to the moderation queue)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmissionRequest {
    pub organization: String,
    pub focal_point_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub sector: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub additional_info: Option<String>,
}

/// Entry in the approved contact directory, with optional geolocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub organization: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sector: Option<String>,
    /// Administrative level 1
    pub parish: Option<String>,
    /// Administrative level 2 or locality
    pub community: Option<String>,
    /// Stored as strings to preserve the submitted precision
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    /// "field", "remote", "office" or "mobile"
    pub location_type: Option<String>,
    /// "active", "inactive" or "deployed"
    pub status: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default = "default_true")]
    pub approved: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Contact {
    /// Parsed coordinates, if both latitude and longitude are present and numeric
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.as_deref()?.trim().parse::<f64>().ok()?;
        let lon = self.longitude.as_deref()?.trim().parse::<f64>().ok()?;
        Some((lat, lon))
    }
}

/// Priority band for an announcement.
///
/// Unknown values fail the decode rather than being coerced, so a malformed
/// payload surfaces as a parse failure at the loader boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Normal,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl Priority {
    /// Sort rank, most urgent first
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Normal => 2,
            Priority::Low => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Normal => "Normal",
            Priority::Low => "Low",
        }
    }

    /// CSS class suffix used by the announcement components
    pub fn css_class(&self) -> &'static str {
        match self {
            Priority::High => "priority-high",
            Priority::Medium => "priority-medium",
            Priority::Normal => "priority-normal",
            Priority::Low => "priority-low",
        }
    }
}

/// Hub announcement (content is pre-rendered HTML from the backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// RFC 3339 timestamp the announcement is dated
    pub date: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub approved: bool,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Response wrapper for the announcements endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementsResponse {
    pub announcements: Vec<Announcement>,
}

/// Shortened URL managed through the links screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: i64,
    pub title: String,
    /// Short URL identifier, unique, `[A-Za-z0-9_-]+`
    pub slug: String,
    /// Destination URL
    pub url: String,
    pub description: Option<String>,
    /// Username of the creator
    pub created_by: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ShortLink {
    /// Path of the shortened URL relative to the hub origin
    pub fn short_path(&self) -> String {
        format!("/link/{}", self.slug)
    }
}

/// Create/update payload for a short link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveLinkRequest {
    pub title: String,
    pub slug: String,
    pub url: String,
    pub description: Option<String>,
}

/// Checks the slug character set accepted by the shortener: letters,
/// digits, hyphens and underscores, at least one character.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// One map product from the external map feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntry {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Landing page for the map product
    pub link: String,
    pub updated: Option<String>,
    pub published: Option<String>,
    /// Bounding box in "minlat minlon maxlat maxlon" form, when georeferenced
    pub georss_box: Option<String>,
    pub package_url: Option<String>,
    pub package_type: Option<String>,
}

impl MapEntry {
    /// Extracts a map code such as "MA030" from the product title
    pub fn map_code(&self) -> Option<String> {
        let bytes = self.title.as_bytes();
        let mut i = 0;
        while i + 1 < bytes.len() {
            if bytes[i].eq_ignore_ascii_case(&b'm') && bytes[i + 1].eq_ignore_ascii_case(&b'a') {
                let digits: String = bytes[i + 2..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .map(|b| *b as char)
                    .collect();
                if !digits.is_empty() {
                    return Some(format!("MA{}", digits));
                }
            }
            i += 1;
        }
        None
    }
}

/// Map feed document returned by the backend aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeed {
    pub feed_title: String,
    pub feed_updated: Option<String>,
    pub maps: Vec<MapEntry>,
}

/// Credentials submitted by the login form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token issued on successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Response from the token verification endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub username: String,
}

/// Error body returned by the backend on rejected requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_decodes_with_optional_contact_fields_absent() {
        let json = r#"{
            "id": 3,
            "name": "WASH Data Collection",
            "sector": "WASH",
            "description": "WASH sector data collection coordination",
            "link": "https://chat.whatsapp.com/example3",
            "contact_name": null,
            "contact_email": null,
            "approved": true
        }"#;

        let group: WhatsAppGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.sector, "WASH");
        assert_eq!(group.contact_name, None);
        assert!(!group.deleted);
        assert_eq!(group.created_at, None);
    }

    #[test]
    fn test_contact_coordinates_parse() {
        let mut contact = Contact {
            id: 1,
            name: "Jane Focal".to_string(),
            organization: "NGO".to_string(),
            position: None,
            email: None,
            phone: None,
            sector: Some("WASH".to_string()),
            parish: Some("St. Andrew".to_string()),
            community: Some("Kingston 6".to_string()),
            latitude: Some("18.0179".to_string()),
            longitude: Some("-76.8099".to_string()),
            location_type: Some("field".to_string()),
            status: Some("active".to_string()),
            notes: None,
            deleted: false,
            approved: true,
            created_at: None,
            updated_at: None,
        };

        assert_eq!(contact.coordinates(), Some((18.0179, -76.8099)));

        contact.longitude = None;
        assert_eq!(contact.coordinates(), None);

        contact.longitude = Some("not-a-number".to_string());
        assert_eq!(contact.coordinates(), None);
    }

    #[test]
    fn test_priority_decode_and_rank() {
        let a: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(a, Priority::High);
        assert!(a.rank() < Priority::Normal.rank());

        // Unknown priority values fail closed instead of defaulting
        assert!(serde_json::from_str::<Priority>("\"urgent\"").is_err());
    }

    #[test]
    fn test_announcement_defaults() {
        let json = r#"{
            "id": 7,
            "title": "Road access update",
            "content": "<p>Main road reopened.</p>"
        }"#;

        let a: Announcement = serde_json::from_str(json).unwrap();
        assert_eq!(a.priority, Priority::Normal);
        assert!(a.tags.is_empty());
        assert!(a.approved);
        assert!(!a.deleted);
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("damage-form"));
        assert!(is_valid_slug("damage_form_2"));
        assert!(is_valid_slug("MA030"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("damage form"));
        assert!(!is_valid_slug("damage/form"));
        assert!(!is_valid_slug("caf\u{e9}"));
    }

    #[test]
    fn test_short_link_path() {
        let link = ShortLink {
            id: 1,
            title: "Damage Assessment Form".to_string(),
            slug: "damage-form".to_string(),
            url: "https://example.org/forms/damage".to_string(),
            description: None,
            created_by: Some("admin".to_string()),
            deleted: false,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(link.short_path(), "/link/damage-form");
    }

    #[test]
    fn test_map_code_extraction() {
        let mut entry = MapEntry {
            id: "tag:example,2024:ma030".to_string(),
            title: "Jamaica - Hurricane Response - MA030 Affected Parishes".to_string(),
            summary: "Overview map".to_string(),
            link: "https://maps.example.org/ma030".to_string(),
            updated: None,
            published: None,
            georss_box: None,
            package_url: None,
            package_type: None,
        };
        assert_eq!(entry.map_code(), Some("MA030".to_string()));

        entry.title = "Reference map without a code".to_string();
        assert_eq!(entry.map_code(), None);

        entry.title = "ma12 field sites".to_string();
        assert_eq!(entry.map_code(), Some("MA12".to_string()));
    }
}
