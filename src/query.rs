//! Derived view computations: pure functions over store snapshots,
//! recomputed on every call.

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;

use crate::models::{Lead, LeadSource, LeadStatus, Listing, ListingStatus, PropertyKind};

/// Flat commission assumed on closed sales for the revenue stat.
pub const COMMISSION_RATE: f64 = 0.05;

#[derive(Debug, Default, Clone)]
pub struct ListingFilter {
    pub search: Option<String>,
    pub status: Option<ListingStatus>,
    pub kind: Option<PropertyKind>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

/// Conjunction of all set predicates. Substring matching is case-insensitive
/// over title, address, and city.
pub fn filter_listings<'a>(listings: &'a [Listing], filter: &ListingFilter) -> Vec<&'a Listing> {
    let query = filter.search.as_deref().map(str::to_lowercase);
    listings
        .iter()
        .filter(|l| match &query {
            Some(q) => {
                l.title.to_lowercase().contains(q)
                    || l.address.to_lowercase().contains(q)
                    || l.city
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(q))
            }
            None => true,
        })
        .filter(|l| filter.status.is_none_or(|s| l.status == s))
        .filter(|l| filter.kind.is_none_or(|k| l.kind == k))
        .filter(|l| {
            filter
                .city
                .as_deref()
                .is_none_or(|c| l.city_label().is_some_and(|label| label.eq_ignore_ascii_case(c)))
        })
        .filter(|l| filter.min_price.is_none_or(|min| l.price >= min))
        .filter(|l| filter.max_price.is_none_or(|max| l.price <= max))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
}

/// Stable sort: ties keep their input order.
pub fn sort_listings(listings: &mut Vec<&Listing>, order: SortOrder) {
    match order {
        SortOrder::Newest => listings.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => listings.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::PriceAsc => listings.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceDesc => listings.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}

#[derive(Debug, Default, Clone)]
pub struct LeadFilter {
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
}

pub fn filter_leads<'a>(leads: &'a [Lead], filter: &LeadFilter) -> Vec<&'a Lead> {
    let query = filter.search.as_deref().map(str::to_lowercase);
    leads
        .iter()
        .filter(|l| match &query {
            Some(q) => {
                l.name.to_lowercase().contains(q)
                    || l.email.to_lowercase().contains(q)
                    || l.property_interest.to_lowercase().contains(q)
            }
            None => true,
        })
        .filter(|l| filter.status.is_none_or(|s| l.status == s))
        .filter(|l| filter.source.is_none_or(|s| l.source == s))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingStats {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub sold: usize,
    /// Commission on the sold subset: sum of sold prices times COMMISSION_RATE.
    pub revenue: f64,
}

pub fn listing_stats(listings: &[Listing]) -> ListingStats {
    let count = |status| listings.iter().filter(|l| l.status == status).count();
    let sold_volume: i64 = listings
        .iter()
        .filter(|l| l.status == ListingStatus::Sold)
        .map(|l| l.price)
        .sum();
    ListingStats {
        total: listings.len(),
        active: count(ListingStatus::Active),
        pending: count(ListingStatus::Pending),
        sold: count(ListingStatus::Sold),
        revenue: sold_volume as f64 * COMMISSION_RATE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Leads bucketed per calendar day over the trailing `days`-day window ending
/// at `now`. The series is dense: every day appears, zero-valued when empty,
/// so a chart x-axis always has exactly `days` increasing entries.
pub fn lead_volume(leads: &[Lead], days: u32, now: DateTime<Utc>) -> Vec<DayCount> {
    // Cap at ten years; keeps the date arithmetic inside NaiveDate's range.
    let days = days.min(3650);
    let today = now.date_naive();
    (0..days)
        .rev()
        .map(|back| {
            let day = today - chrono::Duration::days(i64::from(back));
            let count = leads
                .iter()
                .filter(|l| l.created_at.date_naive() == day)
                .count();
            DayCount { day, count }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn listing(id: &str, title: &str, price: i64, status: ListingStatus, age_days: i64) -> Listing {
        Listing {
            id: id.to_string(),
            title: title.to_string(),
            address: format!("{title} St, Springfield"),
            city: None,
            state: None,
            zip: None,
            price,
            status,
            kind: PropertyKind::House,
            bedrooms: None,
            bathrooms: None,
            sqft: None,
            image: None,
            images: Vec::new(),
            created_at: Utc::now() - Duration::days(age_days),
            description: None,
            amenities: Vec::new(),
        }
    }

    fn lead(name: &str, status: LeadStatus, age_days: i64) -> Lead {
        Lead {
            id: crate::models::new_id(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+1 (555) 000-0000".to_string(),
            location: "Springfield".to_string(),
            property_interest: "Sunset Villa".to_string(),
            property_price: 500_000,
            status,
            source: LeadSource::Website,
            created_at: Utc::now() - Duration::days(age_days),
            avatar_color: "blue".to_string(),
            avatar_text: "XX".to_string(),
            notes: Vec::new(),
        }
    }

    #[test]
    fn stats_example_scenario() {
        let listings = vec![
            listing("1", "A", 100, ListingStatus::Active, 0),
            listing("2", "B", 200, ListingStatus::Sold, 1),
        ];
        let stats = listing_stats(&listings);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.sold, 1);
        assert!((stats.revenue - 10.0).abs() < 1e-9);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let listings = vec![
            listing("1", "Modern Sunset Villa", 100, ListingStatus::Active, 0),
            listing("2", "Downtown Apt", 200, ListingStatus::Active, 1),
        ];
        let hits = filter_listings(
            &listings,
            &ListingFilter {
                search: Some("sunset".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn filters_conjoin() {
        let listings = vec![
            listing("1", "Villa", 100, ListingStatus::Active, 0),
            listing("2", "Villa", 200, ListingStatus::Sold, 1),
        ];
        let hits = filter_listings(
            &listings,
            &ListingFilter {
                search: Some("villa".to_string()),
                status: Some(ListingStatus::Sold),
                ..Default::default()
            },
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn empty_match_is_empty_not_an_error() {
        let leads = vec![lead("Jane Doe", LeadStatus::Contacted, 0)];
        let hits = filter_leads(
            &leads,
            &LeadFilter {
                search: Some("no such lead".to_string()),
                status: Some(LeadStatus::New),
                source: None,
            },
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn price_bounds_apply() {
        let listings = vec![
            listing("1", "Cheap", 100, ListingStatus::Active, 0),
            listing("2", "Mid", 500, ListingStatus::Active, 0),
            listing("3", "Dear", 900, ListingStatus::Active, 0),
        ];
        let hits = filter_listings(
            &listings,
            &ListingFilter {
                min_price: Some(200),
                max_price: Some(800),
                ..Default::default()
            },
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn sort_orders() {
        let listings = vec![
            listing("old-cheap", "A", 100, ListingStatus::Active, 9),
            listing("new-dear", "B", 300, ListingStatus::Active, 1),
            listing("mid", "C", 200, ListingStatus::Active, 5),
        ];
        let mut refs: Vec<&Listing> = listings.iter().collect();

        sort_listings(&mut refs, SortOrder::Newest);
        assert_eq!(refs[0].id, "new-dear");
        sort_listings(&mut refs, SortOrder::Oldest);
        assert_eq!(refs[0].id, "old-cheap");
        sort_listings(&mut refs, SortOrder::PriceAsc);
        assert_eq!(refs[0].id, "old-cheap");
        sort_listings(&mut refs, SortOrder::PriceDesc);
        assert_eq!(refs[0].id, "new-dear");
    }

    #[test]
    fn sort_ties_keep_input_order() {
        let listings = vec![
            listing("first", "A", 100, ListingStatus::Active, 3),
            listing("second", "B", 100, ListingStatus::Active, 3),
        ];
        // Same timestamp resolution guard: force identical keys.
        let mut a = listings[0].clone();
        let b_at = listings[1].created_at;
        a.created_at = b_at;
        let tied = vec![a, listings[1].clone()];
        let mut refs: Vec<&Listing> = tied.iter().collect();
        sort_listings(&mut refs, SortOrder::PriceAsc);
        assert_eq!(refs[0].id, "first");
        assert_eq!(refs[1].id, "second");
    }

    #[test]
    fn empty_window_is_dense_zeroes() {
        let series = lead_volume(&[], 7, Utc::now());
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|b| b.count == 0));
        for pair in series.windows(2) {
            assert!(pair[0].day < pair[1].day);
        }
    }

    #[test]
    fn oversized_window_is_clamped() {
        let series = lead_volume(&[], u32::MAX, Utc::now());
        assert_eq!(series.len(), 3650);
        for pair in series.windows(2) {
            assert!(pair[0].day < pair[1].day);
        }
    }

    #[test]
    fn buckets_count_by_calendar_day() {
        let now = Utc::now();
        let leads = vec![
            lead("Today One", LeadStatus::New, 0),
            lead("Today Two", LeadStatus::New, 0),
            lead("Two Days Back", LeadStatus::New, 2),
            lead("Outside Window", LeadStatus::New, 30),
        ];
        let series = lead_volume(&leads, 7, now);
        assert_eq!(series.len(), 7);
        assert_eq!(series.last().unwrap().count, 2);
        assert_eq!(series[4].count, 1);
        let total: usize = series.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }
}
