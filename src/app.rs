use anyhow::{Result, anyhow};
use chrono::Utc;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::activity::{ActivityLog, DomainEvent};
use crate::models::{
    Lead, LeadSource, LeadStatus, Listing, ListingStatus, Note, NoteKind, PropertyKind,
    avatar_color, avatar_text, new_id,
};
use crate::seed;
use crate::storage::Storage;
use crate::store::EntityStore;

/// Fields the caller supplies when publishing a listing. The store assigns
/// the id and creation time.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub price: i64,
    pub status: ListingStatus,
    pub kind: PropertyKind,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub sqft: Option<u32>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub amenities: Vec<String>,
}

/// Partial-field patch; unset fields leave the record untouched.
#[derive(Debug, Clone, Default)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub price: Option<i64>,
    pub status: Option<ListingStatus>,
    pub kind: Option<PropertyKind>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub sqft: Option<u32>,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl ListingPatch {
    fn apply(self, listing: &mut Listing) {
        if let Some(title) = self.title {
            listing.title = title;
        }
        if let Some(address) = self.address {
            listing.address = address;
        }
        if let Some(city) = self.city {
            listing.city = Some(city);
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(status) = self.status {
            listing.status = status;
        }
        if let Some(kind) = self.kind {
            listing.kind = kind;
        }
        if let Some(bedrooms) = self.bedrooms {
            listing.bedrooms = Some(bedrooms);
        }
        if let Some(bathrooms) = self.bathrooms {
            listing.bathrooms = Some(bathrooms);
        }
        if let Some(sqft) = self.sqft {
            listing.sqft = Some(sqft);
        }
        if let Some(image) = self.image {
            if !listing.images.contains(&image) {
                listing.images.insert(0, image.clone());
            }
            listing.image = Some(image);
        }
        if let Some(description) = self.description {
            listing.description = Some(description);
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub property_interest: String,
    pub property_price: i64,
    pub source: LeadSource,
}

/// Composition root: owns the three entity stores and routes domain events
/// from primary mutations into the activity log.
pub struct App {
    pub listings: EntityStore<Listing>,
    pub leads: EntityStore<Lead>,
    pub log: ActivityLog,
}

impl App {
    pub fn open(storage: Storage) -> Self {
        Self {
            listings: EntityStore::open(storage.clone(), seed::listings),
            leads: EntityStore::open(storage.clone(), seed::leads),
            log: ActivityLog::open(storage),
        }
    }

    pub fn add_listing(&mut self, new: NewListing) -> String {
        let mut images = new.images;
        if let Some(cover) = &new.image {
            // Invariant: a set cover is always a member of the gallery.
            if !images.contains(cover) {
                images.insert(0, cover.clone());
            }
        }
        let listing = Listing {
            id: new_id(),
            title: new.title,
            address: new.address,
            city: new.city,
            state: new.state,
            zip: new.zip,
            price: new.price,
            status: new.status,
            kind: new.kind,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            sqft: new.sqft,
            image: new.image,
            images,
            created_at: Utc::now(),
            description: new.description,
            amenities: new.amenities,
        };
        let id = listing.id.clone();
        let event = DomainEvent::ListingCreated {
            title: listing.title.clone(),
        };
        self.listings.insert(listing);
        self.log.record(&event);
        id
    }

    pub fn update_listing(&mut self, id: &str, patch: ListingPatch) -> Result<()> {
        if !self.listings.update(id, |l| patch.apply(l)) {
            return Err(anyhow!("Listing '{id}' not found"));
        }
        let title = self
            .listings
            .get(id)
            .map(|l| l.title.clone())
            .unwrap_or_default();
        self.log.record(&DomainEvent::ListingUpdated { title });
        Ok(())
    }

    pub fn delete_listing(&mut self, id: &str) -> Result<Listing> {
        let removed = self
            .listings
            .remove(id)
            .ok_or_else(|| anyhow!("Listing '{id}' not found"))?;
        self.log.record(&DomainEvent::ListingDeleted {
            title: removed.title.clone(),
        });
        Ok(removed)
    }

    pub fn add_lead(&mut self, new: NewLead) -> String {
        let lead = Lead {
            id: new_id(),
            avatar_color: avatar_color(&new.name),
            avatar_text: avatar_text(&new.name),
            name: new.name,
            email: new.email,
            phone: new.phone,
            location: new.location,
            property_interest: new.property_interest,
            property_price: new.property_price,
            status: LeadStatus::New,
            source: new.source,
            created_at: Utc::now(),
            notes: Vec::new(),
        };
        let id = lead.id.clone();
        let event = DomainEvent::LeadCreated {
            name: lead.name.clone(),
        };
        self.leads.insert(lead);
        self.log.record(&event);
        id
    }

    /// Status moves independently of the lead lifecycle; no derived records.
    pub fn set_lead_status(&mut self, id: &str, status: LeadStatus) -> Result<()> {
        if !self.leads.update(id, |l| l.status = status) {
            return Err(anyhow!("Lead '{id}' not found"));
        }
        Ok(())
    }

    /// Notes are append-only, newest first; they are never edited or removed.
    pub fn add_lead_note(&mut self, id: &str, text: &str, kind: NoteKind) -> Result<()> {
        let note = Note {
            id: new_id(),
            text: text.to_string(),
            created_at: Utc::now(),
            kind,
        };
        if !self.leads.update(id, |l| l.notes.insert(0, note)) {
            return Err(anyhow!("Lead '{id}' not found"));
        }
        Ok(())
    }

    pub fn delete_lead(&mut self, id: &str) -> Result<Lead> {
        let removed = self
            .leads
            .remove(id)
            .ok_or_else(|| anyhow!("Lead '{id}' not found"))?;
        self.log.record(&DomainEvent::LeadDeleted {
            name: removed.name.clone(),
        });
        Ok(removed)
    }

    /// Generates one inbound web inquiry the way the public site would:
    /// a fresh lead against a random listing, tagged with a system note.
    pub fn simulate_inquiry(&mut self) -> String {
        let mut rng = rand::thread_rng();
        let name = *INQUIRY_NAMES.choose(&mut rng).unwrap_or(&"Web Visitor");
        let (interest, price) = match self.listings.all().choose(&mut rng) {
            Some(listing) => (listing.title.clone(), listing.price),
            None => ("Downtown Loft".to_string(), 450_000),
        };
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        let phone = format!(
            "+1 (555) {:03}-{:04}",
            rng.gen_range(100..1000),
            rng.gen_range(0..10_000)
        );
        let id = self.add_lead(NewLead {
            name: name.to_string(),
            email,
            phone,
            location: "Unknown".to_string(),
            property_interest: interest,
            property_price: price,
            source: LeadSource::Website,
        });
        // Best effort; the lead itself is already in.
        let _ = self.add_lead_note(&id, "Lead created automatically from web inquiry.", NoteKind::System);
        id
    }
}

const INQUIRY_NAMES: [&str; 6] = [
    "Emma Wilson",
    "Liam Carter",
    "Olivia Price",
    "Noah Bennett",
    "Ava Morgan",
    "Ethan Brooks",
];
