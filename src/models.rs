use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ListingStatus {
    Active,
    Pending,
    Sold,
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingStatus::Active => write!(f, "Active"),
            ListingStatus::Pending => write!(f, "Pending"),
            ListingStatus::Sold => write!(f, "Sold"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PropertyKind {
    Apartment,
    House,
    Villa,
    Commercial,
    Land,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Apartment => write!(f, "Apartment"),
            PropertyKind::House => write!(f, "House"),
            PropertyKind::Villa => write!(f, "Villa"),
            PropertyKind::Commercial => write!(f, "Commercial"),
            PropertyKind::Land => write!(f, "Land"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    pub price: i64,
    pub status: ListingStatus,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqft: Option<u32>,
    /// Cover image URL. Always a member of `images` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Listing {
    /// City for filtering: explicit field, else the last comma-separated
    /// segment of the address.
    pub fn city_label(&self) -> Option<&str> {
        if let Some(city) = &self.city {
            return Some(city.as_str());
        }
        let mut parts = self.address.rsplit(',');
        let last = parts.next()?.trim();
        // An address without a comma has no city segment
        parts.next()?;
        if last.is_empty() { None } else { Some(last) }
    }
}

impl Entity for Listing {
    const KEY: &'static str = "listings";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Closed,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadStatus::New => write!(f, "New"),
            LeadStatus::Contacted => write!(f, "Contacted"),
            LeadStatus::Qualified => write!(f, "Qualified"),
            LeadStatus::Closed => write!(f, "Closed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LeadSource {
    Website,
    Zillow,
    Referral,
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadSource::Website => write!(f, "Website"),
            LeadSource::Zillow => write!(f, "Zillow"),
            LeadSource::Referral => write!(f, "Referral"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    User,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: NoteKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub property_interest: String,
    pub property_price: i64,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub created_at: DateTime<Utc>,
    pub avatar_color: String,
    pub avatar_text: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Entity for Lead {
    const KEY: &'static str = "leads";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Listing,
    Lead,
    Review,
    Update,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub icon: String,
    pub color: String,
}

impl Entity for Activity {
    const KEY: &'static str = "activity";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl Entity for Notification {
    const KEY: &'static str = "notifications";

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

const AVATAR_PALETTE: [&str; 6] = ["indigo", "amber", "emerald", "pink", "blue", "slate"];

/// Initials shown in the lead avatar: first letter of the first two words.
pub fn avatar_text(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|w| w.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Deterministic palette pick so the same lead always renders the same color.
pub fn avatar_color(name: &str) -> String {
    let sum: usize = name.bytes().map(usize::from).sum();
    AVATAR_PALETTE[sum % AVATAR_PALETTE.len()].to_string()
}

/// Short display date, e.g. "Oct 24, 2023".
pub fn short_date(at: DateTime<Utc>) -> String {
    at.format("%b %d, %Y").to_string()
}

/// Coarse relative time for activity feeds, e.g. "2 hours ago".
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds();
    if secs < 60 {
        "Just now".to_string()
    } else if secs < 3600 {
        let m = secs / 60;
        format!("{} minute{} ago", m, if m == 1 { "" } else { "s" })
    } else if secs < 86_400 {
        let h = secs / 3600;
        format!("{} hour{} ago", h, if h == 1 { "" } else { "s" })
    } else if secs < 7 * 86_400 {
        let d = secs / 86_400;
        format!("{} day{} ago", d, if d == 1 { "" } else { "s" })
    } else {
        short_date(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn avatar_text_takes_initials() {
        assert_eq!(avatar_text("Jane Doe"), "JD");
        assert_eq!(avatar_text("alice"), "A");
        assert_eq!(avatar_text("Mike van Kogan"), "MV");
        assert_eq!(avatar_text(""), "");
    }

    #[test]
    fn avatar_color_is_deterministic() {
        assert_eq!(avatar_color("Jane Doe"), avatar_color("Jane Doe"));
        assert!(AVATAR_PALETTE.contains(&avatar_color("Robert Smith").as_str()));
    }

    #[test]
    fn city_label_falls_back_to_address() {
        let mut listing = crate::seed::listings().remove(0);
        listing.city = None;
        listing.address = "123 Palm Ave, Beverly Hills".to_string();
        assert_eq!(listing.city_label(), Some("Beverly Hills"));

        listing.address = "No comma here".to_string();
        assert_eq!(listing.city_label(), None);

        listing.city = Some("Malibu".to_string());
        assert_eq!(listing.city_label(), Some("Malibu"));
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(relative_time(now, now), "Just now");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(relative_time(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2 days ago");
        let old = now - Duration::days(30);
        assert_eq!(relative_time(old, now), short_date(old));
    }
}
