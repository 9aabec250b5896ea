//! # Domain Models
//!
//! These structs represent the entities shown across the campus hub modules:
//! social posts, carpool routes, conversations, notifications and courses.
//! Every record travels as a [`DomainRecord`], a tagged union whose `kind`
//! tag is fixed at construction.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// A user as embedded in posts, routes and conversations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    /// Missing avatars are generated from the name at display time.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar(name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar_url: Some(avatar_url.into()),
        }
    }
}

/// A comment attached to a detail view.
///
/// Server-provided comments arrive with their post; locally authored ones
/// live in the comment log of the active selection and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author_name: String,
    pub author_avatar_url: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// An entry of the social feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: Person,
    pub body: String,
    #[serde(default)]
    pub media_url: Option<String>,
    pub reaction_count: u32,
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
    /// Comments delivered by the server, in server order.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A pickup point along a carpool route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub order: u32,
    pub location: String,
}

/// A recurring carpool offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub driver: Person,
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveTime,
    pub days_of_week: Vec<Weekday>,
    pub capacity: u32,
    pub occupied: u32,
    #[serde(default)]
    pub stops: Vec<Stop>,
    /// Date the route was published; the history tab keys on it.
    pub created_on: NaiveDate,
}

impl Route {
    pub fn has_free_seats(&self) -> bool {
        self.occupied < self.capacity
    }
}

/// A private (1:1) or group chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub is_group: bool,
    /// Display name of a group chat. Unused for 1:1 conversations.
    #[serde(default)]
    pub name: Option<String>,
    pub participants: Vec<Person>,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: u32,
}

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    #[serde(rename = "comentario")]
    Comment,
    #[serde(rename = "reaccion")]
    Reaction,
    #[serde(rename = "solicitud_amistad")]
    FriendRequest,
    #[serde(rename = "solicitud_ruta")]
    RouteRequest,
    #[serde(rename = "mensaje")]
    Message,
    #[serde(rename = "nota_nueva")]
    NewGrade,
    #[serde(rename = "otro")]
    Other,
}

impl NotificationKind {
    /// Academic notifications are the ones shown under the "academicas" tab.
    pub fn is_academic(self) -> bool {
        matches!(self, NotificationKind::NewGrade)
    }
}

/// The entity a notification points at (a post, a route, a grade...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub kind: String,
    pub id: String,
    /// Short quote of the referenced content, when there is one.
    #[serde(default)]
    pub excerpt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub body: String,
    /// `None` for system-generated notifications.
    #[serde(default)]
    pub actor: Option<Person>,
    pub sent_at: DateTime<Utc>,
    pub read: bool,
    #[serde(default)]
    pub reference: Option<Reference>,
}

/// One weekly class meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSlot {
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub instructor: String,
    #[serde(default)]
    pub schedule: Vec<ClassSlot>,
    pub average: f64,
}

/// Any record a module can list and hand to the detail panel.
///
/// Serialized adjacently tagged (`{"kind": "route", "data": {...}}`) since
/// notifications carry a `kind` field of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum DomainRecord {
    Post(Post),
    Route(Route),
    Conversation(Conversation),
    Notification(Notification),
    Course(Course),
}

impl DomainRecord {
    pub fn id(&self) -> &str {
        match self {
            DomainRecord::Post(p) => &p.id,
            DomainRecord::Route(r) => &r.id,
            DomainRecord::Conversation(c) => &c.id,
            DomainRecord::Notification(n) => &n.id,
            DomainRecord::Course(c) => &c.id,
        }
    }

    pub fn kind(&self) -> DetailKind {
        match self {
            DomainRecord::Post(_) => DetailKind::Post,
            DomainRecord::Route(_) => DetailKind::Route,
            DomainRecord::Conversation(_) => DetailKind::Conversation,
            DomainRecord::Notification(_) => DetailKind::Notification,
            DomainRecord::Course(_) => DetailKind::Course,
        }
    }
}

/// Kind tag of a [`NormalizedDetail`]. `Default` marks the placeholder shown
/// when nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    Post,
    Route,
    Conversation,
    Notification,
    Course,
    Default,
}

/// The single shape the detail panel renders, whatever the source record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDetail {
    pub id: String,
    pub kind: DetailKind,
    pub title: String,
    pub author_name: String,
    pub author_handle: String,
    pub author_avatar_url: String,
    pub primary_image_url: Option<String>,
    /// Kind-dependent display value (reactions, seats, unread count, date, average).
    pub metric: String,
    pub comments: Vec<Comment>,
}

/// Kind-specific content of the detail panel body, preformatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetailExtras {
    /// Placeholder panel.
    Empty,
    Post {
        body: String,
    },
    Route {
        departure: String,
        days: String,
        free_seats: u32,
        /// "1. Avenida Central #205", in stop order.
        stops: Vec<String>,
    },
    Conversation {
        participants: Vec<String>,
        last_message: String,
        last_message_at: String,
    },
    Notification {
        body: String,
        sent_at: String,
        excerpt: Option<String>,
        actions: Vec<String>,
    },
    Course {
        code: String,
        /// "Lun 08:00 - 10:00 · A101", one line per weekly slot.
        schedule: Vec<String>,
    },
}

/// Builds the generated avatar URL used whenever a person has no picture.
pub fn generated_avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        urlencoding::encode(name)
    )
}

/// Display handle derived from a name: lowercased, whitespace removed.
pub fn handle_for(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// The list screens of the application. Each one owns a record kind and a
/// set of tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Social,
    Carpooling,
    Messages,
    Notifications,
    Academic,
}

impl Module {
    pub const ALL: [Module; 5] = [
        Module::Social,
        Module::Carpooling,
        Module::Messages,
        Module::Notifications,
        Module::Academic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Module::Social => "social",
            Module::Carpooling => "carpooling",
            Module::Messages => "messages",
            Module::Notifications => "notifications",
            Module::Academic => "academic",
        }
    }

    /// Whether `record` belongs on this module's list.
    pub fn owns(self, record: &DomainRecord) -> bool {
        matches!(
            (self, record),
            (Module::Social, DomainRecord::Post(_))
                | (Module::Carpooling, DomainRecord::Route(_))
                | (Module::Messages, DomainRecord::Conversation(_))
                | (Module::Notifications, DomainRecord::Notification(_))
                | (Module::Academic, DomainRecord::Course(_))
        )
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Module {
    type Err = crate::error::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "social" | "publicaciones" => Ok(Module::Social),
            "carpooling" | "rutas" => Ok(Module::Carpooling),
            "messages" | "mensajes" => Ok(Module::Messages),
            "notifications" | "notificaciones" => Ok(Module::Notifications),
            "academic" | "academico" => Ok(Module::Academic),
            other => Err(crate::error::AppError::NotFound(
                "Module".to_string(),
                other.to_string(),
            )),
        }
    }
}
