//! Notification feed.
//!
//! Holds the transient success / error messages raised by reschedules and
//! the reminders for upcoming media plans. Which notifications the user has
//! read is persisted through the preference store: loaded once when the
//! service is created and saved on every change.

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use log::{info, warn};
use shared::{DatedItem, ItemKind, Notification, NotificationLevel, NotificationListResponse, PipelineStage};
use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use super::date_parser::{self, format_indonesian};
use super::pipeline::classify;
use super::preference_service::{load_value, save_value, READ_NOTIFICATIONS_KEY};
use crate::storage::PreferenceStorage;

/// Oldest entries are dropped past this size
pub const FEED_CAPACITY: usize = 50;

/// Receiver of user-facing notifications
pub trait NotificationSink: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: String);
}

struct FeedState {
    /// Newest at the front
    feed: VecDeque<Notification>,
    read_ids: BTreeSet<String>,
}

#[derive(Clone)]
pub struct NotificationService {
    state: Arc<Mutex<FeedState>>,
    preferences: Arc<dyn PreferenceStorage>,
}

impl NotificationService {
    pub fn new(preferences: Arc<dyn PreferenceStorage>) -> Self {
        let read_ids = match load_value::<BTreeSet<String>>(preferences.as_ref(), READ_NOTIFICATIONS_KEY) {
            Ok(ids) => ids.unwrap_or_default(),
            Err(e) => {
                warn!("Could not load read notifications, starting with none read: {}", e);
                BTreeSet::new()
            }
        };

        Self {
            state: Arc::new(Mutex::new(FeedState {
                feed: VecDeque::new(),
                read_ids,
            })),
            preferences,
        }
    }

    fn push(&self, notification: Notification) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.feed.iter().any(|existing| existing.id == notification.id) {
            return;
        }
        state.feed.push_front(notification);
        state.feed.truncate(FEED_CAPACITY);
    }

    /// Feed with read flags applied, newest first
    pub fn list(&self) -> NotificationListResponse {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let notifications: Vec<Notification> = state
            .feed
            .iter()
            .map(|notification| Notification {
                read: state.read_ids.contains(&notification.id),
                ..notification.clone()
            })
            .collect();
        let unread_count = notifications.iter().filter(|n| !n.read).count();
        NotificationListResponse {
            notifications,
            unread_count,
        }
    }

    /// Returns false if no notification has this id
    pub fn mark_read(&self, id: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.feed.iter().any(|notification| notification.id == id) {
            return Ok(false);
        }
        if state.read_ids.contains(id) {
            return Ok(true);
        }

        let mut read_ids = state.read_ids.clone();
        read_ids.insert(id.to_string());
        self.save_read_ids(&mut state, read_ids)?;
        Ok(true)
    }

    pub fn mark_all_read(&self) -> Result<usize> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut read_ids = state.read_ids.clone();
        let newly_read = state
            .feed
            .iter()
            .filter(|notification| read_ids.insert(notification.id.clone()))
            .count();
        if newly_read > 0 {
            self.save_read_ids(&mut state, read_ids)?;
        }
        Ok(newly_read)
    }

    /// Persist `read_ids` minus ids that can no longer appear in the feed,
    /// then adopt the pruned set. Memory is left untouched if the write fails.
    fn save_read_ids(&self, state: &mut FeedState, read_ids: BTreeSet<String>) -> Result<()> {
        let today = Local::now().date_naive();
        let read_ids: BTreeSet<String> = read_ids
            .into_iter()
            .filter(|id| state.feed.iter().any(|n| &n.id == id) || reminder_still_due(id, today))
            .collect();
        save_value(self.preferences.as_ref(), READ_NOTIFICATIONS_KEY, &read_ids)?;
        state.read_ids = read_ids;
        Ok(())
    }

    /// Add reminders for unpublished media plans dated within the next
    /// `days` days (today included). Reminder ids are derived from the plan
    /// and its date so a read reminder stays read across restarts.
    pub fn refresh_plan_reminders(&self, plans: &[DatedItem], today: NaiveDate, days: u32) -> usize {
        let reminders = upcoming_plan_reminders(plans, today, days);
        let count = reminders.len();
        for reminder in reminders {
            self.push(reminder);
        }
        if count > 0 {
            info!("{} upcoming media plan reminders", count);
        }
        count
    }
}

impl NotificationSink for NotificationService {
    fn notify(&self, level: NotificationLevel, message: String) {
        self.push(Notification {
            id: uuid::Uuid::new_v4().to_string(),
            level,
            message,
            created_at: Utc::now().to_rfc3339(),
            read: false,
        });
    }
}

/// A reminder can be raised again while its plan date is not past
fn reminder_still_due(id: &str, today: NaiveDate) -> bool {
    id.strip_prefix("reminder:")
        .and_then(|rest| rest.rsplit_once(':'))
        .and_then(|(_, date)| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .is_some_and(|date| date >= today)
}

pub fn upcoming_plan_reminders(plans: &[DatedItem], today: NaiveDate, days: u32) -> Vec<Notification> {
    plans
        .iter()
        .filter(|item| item.kind == ItemKind::Plan)
        .filter(|item| classify(&item.process) != PipelineStage::Published)
        .filter_map(|item| {
            let date = date_parser::parse(&item.raw_date)?.to_naive_date()?;
            let days_left = (date - today).num_days();
            if days_left < 0 || days_left >= i64::from(days) {
                return None;
            }
            let when = match days_left {
                0 => "hari ini".to_string(),
                1 => "besok".to_string(),
                n => format!("dalam {} hari", n),
            };
            let pic = item
                .pic
                .as_deref()
                .map(|pic| format!(" (PIC: {})", pic))
                .unwrap_or_default();
            Some(Notification {
                id: format!("reminder:{}:{}", item.id, date_parser::format_iso(date)),
                level: NotificationLevel::Info,
                message: format!(
                    "Rencana \"{}\" dijadwalkan {} ({}){}",
                    item.title,
                    when,
                    format_indonesian(date),
                    pic
                ),
                created_at: Utc::now().to_rfc3339(),
                read: false,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{sample_item, TestEnvironment};
    use crate::storage::{CsvConnection, PreferenceRepository};

    fn service(env: &TestEnvironment) -> NotificationService {
        NotificationService::new(Arc::new(PreferenceRepository::new(env.connection.clone())))
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_notify_and_list_newest_first() {
        let env = TestEnvironment::new().unwrap();
        let service = service(&env);

        service.notify(NotificationLevel::Success, "pertama".to_string());
        service.notify(NotificationLevel::Error, "kedua".to_string());

        let list = service.list();
        assert_eq!(list.unread_count, 2);
        assert_eq!(list.notifications[0].message, "kedua");
        assert_eq!(list.notifications[1].level, NotificationLevel::Success);
    }

    #[test]
    fn test_feed_is_bounded() {
        let env = TestEnvironment::new().unwrap();
        let service = service(&env);
        for i in 0..(FEED_CAPACITY + 5) {
            service.notify(NotificationLevel::Info, format!("n{}", i));
        }
        let list = service.list();
        assert_eq!(list.notifications.len(), FEED_CAPACITY);
        assert_eq!(list.notifications[0].message, format!("n{}", FEED_CAPACITY + 4));
    }

    #[test]
    fn test_mark_read() {
        let env = TestEnvironment::new().unwrap();
        let service = service(&env);
        service.notify(NotificationLevel::Success, "ok".to_string());
        let id = service.list().notifications[0].id.clone();

        assert!(service.mark_read(&id).unwrap());
        assert!(service.mark_read(&id).unwrap());
        assert!(!service.mark_read("unknown").unwrap());
        assert_eq!(service.list().unread_count, 0);
    }

    #[test]
    fn test_persisted_read_ids_follow_the_feed() {
        let env = TestEnvironment::new().unwrap();
        let store = PreferenceRepository::new(env.connection.clone());
        let service = service(&env);

        for i in 0..200 {
            service.notify(NotificationLevel::Success, format!("n{}", i));
            service.mark_all_read().unwrap();
        }

        let stored: BTreeSet<String> = load_value(&store, READ_NOTIFICATIONS_KEY).unwrap().unwrap();
        assert_eq!(service.list().notifications.len(), FEED_CAPACITY);
        assert!(stored.len() <= FEED_CAPACITY);
        assert_eq!(service.list().unread_count, 0);
    }

    #[test]
    fn test_past_reminders_are_forgotten() {
        let today = Local::now().date_naive();
        assert!(reminder_still_due(&format!("reminder:p:1:{}", date_parser::format_iso(today)), today));
        assert!(!reminder_still_due("reminder:p1:2000-01-01", today));
        assert!(!reminder_still_due("3f2c9a40-uuid", today));
    }

    /// Reads succeed, every write fails
    struct ReadOnlyPreferences;

    impl PreferenceStorage for ReadOnlyPreferences {
        fn get(&self, _key: &str) -> Result<Option<serde_json::Value>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: serde_json::Value) -> Result<()> {
            Err(anyhow::anyhow!("disk full"))
        }

        fn remove(&self, _key: &str) -> Result<bool> {
            Err(anyhow::anyhow!("disk full"))
        }
    }

    #[test]
    fn test_failed_save_leaves_notification_unread() {
        let service = NotificationService::new(Arc::new(ReadOnlyPreferences));
        service.notify(NotificationLevel::Error, "gagal".to_string());
        let id = service.list().notifications[0].id.clone();

        assert!(service.mark_read(&id).is_err());
        assert_eq!(service.list().unread_count, 1);

        assert!(service.mark_all_read().is_err());
        assert_eq!(service.list().unread_count, 1);
    }

    #[test]
    fn test_reminder_read_state_survives_restart() {
        let env = TestEnvironment::new().unwrap();
        let today = ymd(2025, 3, 10);
        let plans = vec![sample_item("p1", ItemKind::Plan, "11 Maret 2025")];

        let first = service(&env);
        assert_eq!(first.refresh_plan_reminders(&plans, today, 3), 1);
        assert_eq!(first.mark_all_read().unwrap(), 1);

        let restarted = NotificationService::new(Arc::new(PreferenceRepository::new(
            CsvConnection::new(&env.base_path).unwrap(),
        )));
        restarted.refresh_plan_reminders(&plans, today, 3);
        let list = restarted.list();
        assert_eq!(list.notifications.len(), 1);
        assert!(list.notifications[0].read);
        assert_eq!(list.unread_count, 0);
    }

    #[test]
    fn test_reminders_are_not_duplicated() {
        let env = TestEnvironment::new().unwrap();
        let service = service(&env);
        let plans = vec![sample_item("p1", ItemKind::Plan, "10 Maret 2025")];

        service.refresh_plan_reminders(&plans, ymd(2025, 3, 10), 3);
        service.refresh_plan_reminders(&plans, ymd(2025, 3, 10), 3);
        assert_eq!(service.list().notifications.len(), 1);
    }

    #[test]
    fn test_upcoming_plan_window() {
        let today = ymd(2025, 3, 10);
        let mut published = sample_item("done", ItemKind::Plan, "11 Maret 2025");
        published.process = "Published".to_string();
        let mut with_pic = sample_item("tomorrow", ItemKind::Plan, "11 Maret 2025");
        with_pic.pic = Some("Rina".to_string());
        let plans = vec![
            sample_item("past", ItemKind::Plan, "9 Maret 2025"),
            sample_item("today", ItemKind::Plan, "10 Maret 2025"),
            with_pic,
            sample_item("edge", ItemKind::Plan, "13 Maret 2025"),
            sample_item("undated", ItemKind::Plan, "segera"),
            sample_item("press", ItemKind::Press, "10 Maret 2025"),
            published,
        ];

        let reminders = upcoming_plan_reminders(&plans, today, 3);
        let ids: Vec<&str> = reminders.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["reminder:today:2025-03-10", "reminder:tomorrow:2025-03-11"]);
        assert!(reminders[0].message.contains("hari ini"));
        assert!(reminders[1].message.contains("besok"));
        assert!(reminders[1].message.contains("PIC: Rina"));
    }
}
