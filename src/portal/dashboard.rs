//! Dashboard data for residents and administrators
//!
//! Everything here is demo content held in memory. Admin edits last until the
//! application exits.

use chrono::Utc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Maintenance,
    Amenity,
    Security,
}

impl UpdateKind {
    pub const ALL: [UpdateKind; 3] = [Self::Maintenance, Self::Amenity, Self::Security];

    pub fn label(self) -> &'static str {
        match self {
            Self::Maintenance => "Maintenance",
            Self::Amenity => "Amenity",
            Self::Security => "Security",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Completed,
    New,
    Published,
}

impl UpdateStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::New => "new",
            Self::Published => "published",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub description: String,
    pub kind: UpdateKind,
    pub status: UpdateStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub content: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tenure {
    Owner,
    Renter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Current,
    Overdue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resident {
    pub id: String,
    pub name: String,
    pub email: String,
    pub apartment_number: String,
    pub floor: u32,
    pub tenure: Tenure,
    pub purchase_date: String,
    pub payment: PaymentStatus,
}

/// A static headline figure on the analytics tab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub title: &'static str,
    pub value: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("A title is required.")]
    EmptyTitle,
}

fn update(
    id: i64,
    date: &str,
    title: &str,
    description: &str,
    kind: UpdateKind,
    status: UpdateStatus,
) -> Update {
    Update {
        id,
        date: date.into(),
        title: title.into(),
        description: description.into(),
        kind,
        status,
    }
}

fn announcement(id: i64, date: &str, title: &str, content: &str, priority: Priority) -> Announcement {
    Announcement {
        id,
        date: date.into(),
        title: title.into(),
        content: content.into(),
        priority,
    }
}

/// Read-only feed shown to residents
pub struct ResidentFeed {
    pub updates: Vec<Update>,
    pub announcements: Vec<Announcement>,
}

impl Default for ResidentFeed {
    fn default() -> Self {
        Self::demo()
    }
}

impl ResidentFeed {
    pub fn demo() -> Self {
        Self {
            updates: vec![
                update(
                    1,
                    "2024-12-15",
                    "Elevator Maintenance Completed",
                    "All elevators have been serviced and are operating normally.",
                    UpdateKind::Maintenance,
                    UpdateStatus::Completed,
                ),
                update(
                    2,
                    "2024-12-10",
                    "New Gym Equipment Installed",
                    "State-of-the-art fitness equipment has been added to the rooftop gym.",
                    UpdateKind::Amenity,
                    UpdateStatus::New,
                ),
                update(
                    3,
                    "2024-12-05",
                    "Security System Upgrade",
                    "Enhanced facial recognition system installed at main entrance.",
                    UpdateKind::Security,
                    UpdateStatus::Completed,
                ),
            ],
            announcements: vec![
                announcement(
                    1,
                    "2024-12-18",
                    "Holiday Building Hours",
                    "Please note that concierge services will have modified hours during the holiday season.",
                    Priority::High,
                ),
                announcement(
                    2,
                    "2024-12-12",
                    "Rooftop Garden Opening",
                    "The new rooftop garden is now open for all residents to enjoy. Access via elevator to floor 60.",
                    Priority::Medium,
                ),
                announcement(
                    3,
                    "2024-12-08",
                    "Parking Garage Cleaning",
                    "Monthly deep cleaning of parking garage scheduled for this weekend.",
                    Priority::Low,
                ),
            ],
        }
    }

    /// Announcements flagged high or medium priority
    pub fn important_count(&self) -> usize {
        self.announcements
            .iter()
            .filter(|a| a.priority != Priority::Low)
            .count()
    }
}

/// Editable data behind the admin dashboard
pub struct AdminBoard {
    pub residents: Vec<Resident>,
    pub updates: Vec<Update>,
    pub announcements: Vec<Announcement>,
}

impl Default for AdminBoard {
    fn default() -> Self {
        Self::demo()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStats {
    pub residents: usize,
    pub updates: usize,
    pub announcements: usize,
}

pub const REVENUE: &str = "$2.4M";

pub const RECENT_ACTIVITY: [&str; 3] = [
    "New update published: Elevator Maintenance",
    "New resident registered: Sarah Johnson",
    "Holiday announcement published",
];

pub const ANALYTICS: [Metric; 4] = [
    Metric {
        title: "Occupancy Rate",
        value: "95%",
        detail: "180 of 189 units occupied",
    },
    Metric {
        title: "Monthly Revenue",
        value: REVENUE,
        detail: "+12% from last month",
    },
    Metric {
        title: "Maintenance Requests",
        value: "23",
        detail: "5 pending, 18 completed",
    },
    Metric {
        title: "Satisfaction Score",
        value: "4.8/5",
        detail: "Based on 156 reviews",
    },
];

impl AdminBoard {
    pub fn demo() -> Self {
        let resident = |id: &str, name: &str, email: &str, apt: &str, floor, tenure, since: &str, payment| {
            Resident {
                id: id.into(),
                name: name.into(),
                email: email.into(),
                apartment_number: apt.into(),
                floor,
                tenure,
                purchase_date: since.into(),
                payment,
            }
        };

        Self {
            residents: vec![
                resident("1", "John Smith", "john@example.com", "A-2501", 25, Tenure::Owner, "2024-01-15", PaymentStatus::Current),
                resident("2", "Sarah Johnson", "sarah@example.com", "B-1203", 12, Tenure::Owner, "2024-03-20", PaymentStatus::Current),
                resident("3", "Mike Wilson", "mike@example.com", "C-3401", 34, Tenure::Renter, "2024-06-10", PaymentStatus::Overdue),
            ],
            updates: vec![
                update(
                    1,
                    "2024-12-15",
                    "Elevator Maintenance Completed",
                    "All elevators have been serviced and are operating normally.",
                    UpdateKind::Maintenance,
                    UpdateStatus::Published,
                ),
                update(
                    2,
                    "2024-12-10",
                    "New Gym Equipment Installed",
                    "State-of-the-art fitness equipment has been added to the rooftop gym.",
                    UpdateKind::Amenity,
                    UpdateStatus::Published,
                ),
            ],
            announcements: vec![
                announcement(
                    1,
                    "2024-12-18",
                    "Holiday Building Hours",
                    "Please note that concierge services will have modified hours during the holiday season.",
                    Priority::High,
                ),
                announcement(
                    2,
                    "2024-12-12",
                    "Rooftop Garden Opening",
                    "The new rooftop garden is now open for all residents to enjoy.",
                    Priority::Medium,
                ),
            ],
        }
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats {
            residents: self.residents.len(),
            updates: self.updates.len(),
            announcements: self.announcements.len(),
        }
    }

    /// Publishes an update at the top of the list and returns its id
    pub fn publish_update(
        &mut self,
        title: &str,
        description: &str,
        kind: UpdateKind,
    ) -> Result<i64, DashboardError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DashboardError::EmptyTitle);
        }
        let id = self.next_id();
        self.updates.insert(
            0,
            update(id, &today(), title, description.trim(), kind, UpdateStatus::Published),
        );
        log::info!("Update published: {}", title);
        Ok(id)
    }

    /// Publishes an announcement at the top of the list and returns its id
    pub fn publish_announcement(
        &mut self,
        title: &str,
        content: &str,
        priority: Priority,
    ) -> Result<i64, DashboardError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DashboardError::EmptyTitle);
        }
        let id = self.next_id();
        self.announcements
            .insert(0, announcement(id, &today(), title, content.trim(), priority));
        log::info!("Announcement published: {}", title);
        Ok(id)
    }

    /// Returns true if an update with `id` existed
    pub fn delete_update(&mut self, id: i64) -> bool {
        let before = self.updates.len();
        self.updates.retain(|u| u.id != id);
        before != self.updates.len()
    }

    /// Returns true if an announcement with `id` existed
    pub fn delete_announcement(&mut self, id: i64) -> bool {
        let before = self.announcements.len();
        self.announcements.retain(|a| a.id != id);
        before != self.announcements.len()
    }

    /// Current epoch millis, bumped past existing ids when publishing twice in one millisecond
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let newest = self
            .updates
            .iter()
            .map(|u| u.id)
            .chain(self.announcements.iter().map(|a| a.id))
            .max()
            .unwrap_or(0);
        now.max(newest + 1)
    }
}

/// Today's UTC date as `YYYY-MM-DD`
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_board_counts() {
        let board = AdminBoard::demo();
        assert_eq!(
            board.stats(),
            BoardStats {
                residents: 3,
                updates: 2,
                announcements: 2
            }
        );
        assert_eq!(ResidentFeed::demo().important_count(), 2);
    }

    #[test]
    fn dates_use_the_utc_calendar_day() {
        let before = Utc::now().date_naive().to_string();
        let date = today();
        let after = Utc::now().date_naive().to_string();
        assert!(date == before || date == after, "{date} is not {before}");
        assert_eq!(date.len(), 10);
    }

    #[test]
    fn published_items_are_prepended_with_today() {
        let mut board = AdminBoard::demo();
        let id = board
            .publish_update("  Lobby repaint ", "Fresh colours", UpdateKind::Amenity)
            .unwrap();

        let first = &board.updates[0];
        assert_eq!(first.id, id);
        assert_eq!(first.title, "Lobby repaint");
        assert_eq!(first.date, today());
        assert_eq!(first.status, UpdateStatus::Published);
        assert!(id > 1_600_000_000_000);

        let second = board
            .publish_announcement("Pool closed", "Cleaning", Priority::Low)
            .unwrap();
        assert!(second > id);
        assert_eq!(board.announcements[0].id, second);
        assert_eq!(board.stats().announcements, 3);
    }

    #[test]
    fn empty_titles_are_rejected() {
        let mut board = AdminBoard::demo();
        assert_eq!(
            board.publish_update("   ", "text", UpdateKind::Security),
            Err(DashboardError::EmptyTitle)
        );
        assert_eq!(
            board.publish_announcement("", "text", Priority::High),
            Err(DashboardError::EmptyTitle)
        );
        assert_eq!(board.stats().updates, 2);
    }

    #[test]
    fn delete_removes_only_the_matching_item() {
        let mut board = AdminBoard::demo();
        assert!(board.delete_update(1));
        assert!(!board.delete_update(1));
        assert_eq!(board.updates.len(), 1);
        assert_eq!(board.updates[0].id, 2);

        assert!(board.delete_announcement(2));
        assert_eq!(board.announcements.len(), 1);
    }
}
