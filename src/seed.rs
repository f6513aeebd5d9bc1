//! Built-in fixture data used to initialize a store when no persisted
//! collection exists.

use chrono::{Duration, Utc};

use crate::models::{
    Activity, ActivityKind, Lead, LeadSource, LeadStatus, Listing, ListingStatus, Note, NoteKind,
    Notification, NotificationKind, PropertyKind, avatar_color, avatar_text,
};

pub fn listings() -> Vec<Listing> {
    let now = Utc::now();
    vec![
        Listing {
            id: "4920".to_string(),
            title: "Modern Sunset Villa".to_string(),
            address: "123 Palm Ave, Beverly Hills".to_string(),
            city: Some("Beverly Hills".to_string()),
            state: Some("CA".to_string()),
            zip: None,
            price: 4_250_000,
            status: ListingStatus::Active,
            kind: PropertyKind::Villa,
            bedrooms: Some(4),
            bathrooms: Some(3),
            sqft: Some(2500),
            image: Some("https://images.example.com/sunset-villa.jpg".to_string()),
            images: vec!["https://images.example.com/sunset-villa.jpg".to_string()],
            created_at: now - Duration::days(2),
            description: Some("Bright hillside villa with an infinity pool.".to_string()),
            amenities: vec![
                "Swimming Pool".to_string(),
                "Air Conditioning".to_string(),
                "Gym".to_string(),
            ],
        },
        Listing {
            id: "4918".to_string(),
            title: "Luxury Downtown Apt".to_string(),
            address: "450 Main St, Apt 4B, New York".to_string(),
            city: Some("New York".to_string()),
            state: Some("NY".to_string()),
            zip: None,
            price: 850_000,
            status: ListingStatus::Pending,
            kind: PropertyKind::Apartment,
            bedrooms: Some(2),
            bathrooms: Some(2),
            sqft: Some(1200),
            image: Some("https://images.example.com/downtown-apt.jpg".to_string()),
            images: vec!["https://images.example.com/downtown-apt.jpg".to_string()],
            created_at: now - Duration::days(6),
            description: None,
            amenities: vec!["WiFi".to_string(), "Laundry Room".to_string()],
        },
        Listing {
            id: "4915".to_string(),
            title: "Cozy Seaside Cottage".to_string(),
            address: "88 Ocean Drive, Malibu".to_string(),
            city: Some("Malibu".to_string()),
            state: Some("CA".to_string()),
            zip: None,
            price: 3_200_000,
            status: ListingStatus::Sold,
            kind: PropertyKind::House,
            bedrooms: Some(3),
            bathrooms: Some(2),
            sqft: Some(1800),
            image: Some("https://images.example.com/seaside-cottage.jpg".to_string()),
            images: vec!["https://images.example.com/seaside-cottage.jpg".to_string()],
            created_at: now - Duration::days(41),
            description: None,
            amenities: vec!["Outdoor Shower".to_string()],
        },
        Listing {
            id: "4912".to_string(),
            title: "Commercial Office Space".to_string(),
            address: "500 Tech Park, San Francisco".to_string(),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            zip: None,
            price: 12_000,
            status: ListingStatus::Active,
            kind: PropertyKind::Commercial,
            bedrooms: None,
            bathrooms: None,
            sqft: Some(5000),
            image: None,
            images: Vec::new(),
            created_at: now - Duration::days(85),
            description: None,
            amenities: Vec::new(),
        },
    ]
}

fn lead(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    location: &str,
    interest: &str,
    price: i64,
    status: LeadStatus,
    source: LeadSource,
    age: Duration,
    notes: Vec<Note>,
) -> Lead {
    Lead {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        location: location.to_string(),
        property_interest: interest.to_string(),
        property_price: price,
        status,
        source,
        created_at: Utc::now() - age,
        avatar_color: avatar_color(name),
        avatar_text: avatar_text(name),
        notes,
    }
}

pub fn leads() -> Vec<Lead> {
    let now = Utc::now();
    vec![
        lead(
            "1",
            "Jane Doe",
            "jane.doe@example.com",
            "+1 (555) 987-6543",
            "Los Angeles, CA",
            "Modern Sunset Villa",
            1_250_000,
            LeadStatus::New,
            LeadSource::Website,
            Duration::minutes(2),
            vec![
                Note {
                    id: "n1".to_string(),
                    text: "Inquired about Modern Sunset Villa via Website form.".to_string(),
                    created_at: now - Duration::minutes(2),
                    kind: NoteKind::User,
                },
                Note {
                    id: "n2".to_string(),
                    text: "Lead created automatically from web inquiry.".to_string(),
                    created_at: now - Duration::minutes(2),
                    kind: NoteKind::System,
                },
            ],
        ),
        lead(
            "2",
            "Robert Smith",
            "robert.smith@example.com",
            "+1 (555) 123-4567",
            "New York, NY",
            "Downtown Loft",
            850_000,
            LeadStatus::Contacted,
            LeadSource::Zillow,
            Duration::days(1),
            Vec::new(),
        ),
        lead(
            "3",
            "Alice Lee",
            "alice.lee@techcorp.com",
            "+1 (555) 333-2222",
            "Miami, FL",
            "Seaside Condo Unit 4B",
            550_000,
            LeadStatus::Qualified,
            LeadSource::Website,
            Duration::days(3),
            Vec::new(),
        ),
        lead(
            "4",
            "Mike Kogan",
            "mkogan@gmail.com",
            "+1 (555) 777-8888",
            "Chicago, IL",
            "Highland Estate",
            3_200_000,
            LeadStatus::Closed,
            LeadSource::Referral,
            Duration::days(6),
            Vec::new(),
        ),
        lead(
            "5",
            "Sarah Brown",
            "sarah.b@example.com",
            "+1 (415) 555-0922",
            "San Francisco, CA",
            "Modern Sunset Villa",
            1_250_000,
            LeadStatus::New,
            LeadSource::Zillow,
            Duration::days(8),
            Vec::new(),
        ),
    ]
}

pub fn activities() -> Vec<Activity> {
    let now = Utc::now();
    vec![
        Activity {
            id: "a1".to_string(),
            kind: ActivityKind::Listing,
            title: "New Listing Added".to_string(),
            description: "\"Modern Sunset Villa\" was published by Alex.".to_string(),
            created_at: now - Duration::hours(2),
            icon: "add_home".to_string(),
            color: "green".to_string(),
        },
        Activity {
            id: "a2".to_string(),
            kind: ActivityKind::Lead,
            title: "New Lead Received".to_string(),
            description: "Sarah J. inquired about \"Downtown Apt\".".to_string(),
            created_at: now - Duration::hours(5),
            icon: "person_add".to_string(),
            color: "blue".to_string(),
        },
        Activity {
            id: "a3".to_string(),
            kind: ActivityKind::Review,
            title: "New Review".to_string(),
            description: "5-star rating received for your service.".to_string(),
            created_at: now - Duration::days(1),
            icon: "comment".to_string(),
            color: "amber".to_string(),
        },
        Activity {
            id: "a4".to_string(),
            kind: ActivityKind::Update,
            title: "Listing Updated".to_string(),
            description: "Price change on \"Luxury Penthouse\".".to_string(),
            created_at: now - Duration::days(2),
            icon: "edit".to_string(),
            color: "purple".to_string(),
        },
    ]
}

pub fn notifications() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification {
            id: "w1".to_string(),
            title: "Welcome".to_string(),
            message: "Welcome to your new dashboard!".to_string(),
            created_at: now,
            read: false,
            kind: NotificationKind::Info,
        },
        Notification {
            id: "w2".to_string(),
            title: "System Update".to_string(),
            message: "Platform updated to v2.4".to_string(),
            created_at: now - Duration::days(1),
            read: false,
            kind: NotificationKind::Success,
        },
    ]
}
