use rand::Rng;
use std::time::Duration;

use crate::models::{
    Activity, ActivityKind, Notification, NotificationKind, new_id,
};
use crate::seed;
use crate::storage::Storage;
use crate::store::EntityStore;

/// A mutation in a primary store, announced to subscriber stores. The
/// activity log consumes these; a failed write on this side never rolls
/// back or blocks the primary entity write.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    ListingCreated { title: String },
    ListingUpdated { title: String },
    ListingDeleted { title: String },
    LeadCreated { name: String },
    LeadDeleted { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    AlreadyRunning,
    NoNews,
    NewActivity,
}

/// Owns the append-only activity feed and the notification list.
pub struct ActivityLog {
    activities: EntityStore<Activity>,
    notifications: EntityStore<Notification>,
    refreshing: bool,
}

impl ActivityLog {
    pub fn open(storage: Storage) -> Self {
        Self {
            activities: EntityStore::open(storage.clone(), seed::activities),
            notifications: EntityStore::open(storage, seed::notifications),
            refreshing: false,
        }
    }

    /// Newest first, insertion order.
    pub fn activities(&self) -> &[Activity] {
        self.activities.all()
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.all()
    }

    /// Consumes one domain event, appending the derived records. Runs
    /// synchronously after the primary mutation completes.
    pub fn record(&mut self, event: &DomainEvent) {
        match event {
            DomainEvent::ListingCreated { title } => {
                self.push_activity(
                    ActivityKind::Listing,
                    "New Listing Added",
                    format!("\"{title}\" was published."),
                    "add_home",
                    "green",
                );
                self.push_notification(
                    "Listing Published",
                    format!("\"{title}\" is now live."),
                    NotificationKind::Success,
                );
            }
            DomainEvent::ListingUpdated { title } => {
                self.push_activity(
                    ActivityKind::Update,
                    "Listing Updated",
                    format!("\"{title}\" was modified."),
                    "edit",
                    "purple",
                );
            }
            DomainEvent::ListingDeleted { title } => {
                self.push_activity(
                    ActivityKind::Update,
                    "Listing Removed",
                    format!("\"{title}\" was removed from the portfolio."),
                    "delete",
                    "red",
                );
                self.push_notification(
                    "Listing Removed",
                    format!("\"{title}\" is no longer listed."),
                    NotificationKind::Warning,
                );
            }
            DomainEvent::LeadCreated { name } => {
                self.push_activity(
                    ActivityKind::Lead,
                    "New Lead Received",
                    format!("{name} inquired about property."),
                    "person_add",
                    "blue",
                );
            }
            DomainEvent::LeadDeleted { name } => {
                self.push_activity(
                    ActivityKind::Update,
                    "Lead Removed",
                    format!("{name} was removed from leads."),
                    "delete",
                    "red",
                );
            }
        }
    }

    pub fn push_activity(
        &mut self,
        kind: ActivityKind,
        title: &str,
        description: String,
        icon: &str,
        color: &str,
    ) {
        self.activities.insert(Activity {
            id: new_id(),
            kind,
            title: title.to_string(),
            description,
            created_at: chrono::Utc::now(),
            icon: icon.to_string(),
            color: color.to_string(),
        });
    }

    pub fn push_notification(&mut self, title: &str, message: String, kind: NotificationKind) {
        self.notifications.insert(Notification {
            id: new_id(),
            title: title.to_string(),
            message,
            created_at: chrono::Utc::now(),
            read: false,
            kind,
        });
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.all().iter().filter(|n| !n.read).count()
    }

    /// Flips every notification to read. Returns how many were unread.
    pub fn mark_all_read(&mut self) -> usize {
        let unread = self.unread_count();
        if unread > 0 {
            self.notifications.update_all(|n| n.read = true);
        }
        unread
    }

    /// Simulated "live" refresh: waits out an artificial delay, then has a
    /// 30% chance of surfacing one synthetic activity plus a notification
    /// about it. The in-flight flag keeps a second invocation from stacking
    /// side effects while one is underway.
    pub fn refresh(&mut self, delay: Duration) -> RefreshOutcome {
        if self.refreshing {
            return RefreshOutcome::AlreadyRunning;
        }
        self.refreshing = true;
        std::thread::sleep(delay);

        let mut rng = rand::thread_rng();
        let outcome = if rng.gen_bool(0.3) {
            let pick = rng.gen_range(0..REFRESH_TEMPLATES.len());
            self.synthesize(pick);
            RefreshOutcome::NewActivity
        } else {
            RefreshOutcome::NoNews
        };

        self.refreshing = false;
        outcome
    }

    fn synthesize(&mut self, pick: usize) {
        let (kind, title, description, icon, color) = REFRESH_TEMPLATES[pick];
        self.push_activity(kind, title, description.to_string(), icon, color);
        self.push_notification(title, description.to_string(), NotificationKind::Info);
    }
}

const REFRESH_TEMPLATES: [(ActivityKind, &str, &str, &str, &str); 3] = [
    (
        ActivityKind::Review,
        "New Review",
        "Received a 5-star rating on Zillow.",
        "star",
        "amber",
    ),
    (
        ActivityKind::Lead,
        "Lead Callback",
        "Follow up required for downtown property.",
        "phone_callback",
        "blue",
    ),
    (
        ActivityKind::Update,
        "System Sync",
        "Listings synchronized with external MLS.",
        "sync",
        "slate",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_log() -> ActivityLog {
        let dir = std::env::temp_dir().join(format!("estate-test-{}", uuid::Uuid::new_v4()));
        let storage = Storage::open_at(dir).unwrap();
        storage.save::<Activity>("activity", &[]).unwrap();
        storage.save::<Notification>("notifications", &[]).unwrap();
        ActivityLog::open(storage)
    }

    #[test]
    fn lead_created_appends_activity_only() {
        let mut log = empty_log();
        log.record(&DomainEvent::LeadCreated {
            name: "Jane Doe".to_string(),
        });
        assert_eq!(log.activities().len(), 1);
        assert_eq!(log.notifications().len(), 0);
        let activity = &log.activities()[0];
        assert_eq!(activity.kind, ActivityKind::Lead);
        assert!(activity.description.contains("Jane Doe"));
    }

    #[test]
    fn listing_created_appends_activity_and_success_notification() {
        let mut log = empty_log();
        log.record(&DomainEvent::ListingCreated {
            title: "Sunset Villa".to_string(),
        });
        assert_eq!(log.activities().len(), 1);
        assert_eq!(log.notifications().len(), 1);
        assert_eq!(log.notifications()[0].kind, NotificationKind::Success);
    }

    #[test]
    fn listing_deleted_appends_warning_notification() {
        let mut log = empty_log();
        log.record(&DomainEvent::ListingDeleted {
            title: "Sunset Villa".to_string(),
        });
        assert_eq!(log.activities().len(), 1);
        assert_eq!(log.notifications().len(), 1);
        assert_eq!(log.notifications()[0].kind, NotificationKind::Warning);
    }

    #[test]
    fn feed_is_newest_first() {
        let mut log = empty_log();
        log.record(&DomainEvent::LeadCreated {
            name: "First".to_string(),
        });
        log.record(&DomainEvent::LeadCreated {
            name: "Second".to_string(),
        });
        assert!(log.activities()[0].description.contains("Second"));
        assert!(log.activities()[1].description.contains("First"));
    }

    #[test]
    fn mark_all_read_flips_in_bulk() {
        let mut log = empty_log();
        log.push_notification("One", "first".to_string(), NotificationKind::Info);
        log.push_notification("Two", "second".to_string(), NotificationKind::Info);
        assert_eq!(log.unread_count(), 2);
        assert_eq!(log.mark_all_read(), 2);
        assert_eq!(log.unread_count(), 0);
        assert_eq!(log.mark_all_read(), 0);
    }

    #[test]
    fn refresh_guard_blocks_overlapping_runs() {
        let mut log = empty_log();
        log.refreshing = true;
        assert_eq!(
            log.refresh(Duration::ZERO),
            RefreshOutcome::AlreadyRunning
        );
        log.refreshing = false;
        let outcome = log.refresh(Duration::ZERO);
        assert_ne!(outcome, RefreshOutcome::AlreadyRunning);
    }

    #[test]
    fn synthesized_activity_carries_info_notification() {
        let mut log = empty_log();
        log.synthesize(0);
        assert_eq!(log.activities().len(), 1);
        assert_eq!(log.notifications().len(), 1);
        assert_eq!(log.notifications()[0].kind, NotificationKind::Info);
    }
}
