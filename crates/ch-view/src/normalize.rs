//! # Item Normalizer
//!
//! Maps every [`DomainRecord`] variant onto the one [`NormalizedDetail`] shape
//! the detail panel knows how to draw. Normalization is total: optional fields
//! fall back to generated values and it never fails.

use chrono::{DateTime, Utc, Weekday};

use ch_core::models::{
    generated_avatar_url, handle_for, ClassSlot, Conversation, Course, DetailExtras, DetailKind,
    DomainRecord, NormalizedDetail, Notification, NotificationKind, Person, Post, Route, Stop,
};
use ch_core::session::Session;

/// Post titles keep at most this many characters of the body.
pub const TITLE_MAX_CHARS: usize = 30;
pub const ELLIPSIS: char = '…';

pub const NO_IMAGE_URL: &str = "https://via.placeholder.com/400x300?text=Sin+imagen";
pub const MESSAGING_IMAGE_URL: &str =
    "https://via.placeholder.com/400x300/9C27B0/FFFFFF?text=Mensajer%C3%ADa";
pub const NOTIFICATION_IMAGE_URL: &str =
    "https://via.placeholder.com/400x300/673AB7/FFFFFF?text=Notificaci%C3%B3n";
pub const NEW_GRADE_IMAGE_URL: &str =
    "https://via.placeholder.com/400x300/FF9800/FFFFFF?text=Nueva+Nota";
pub const WELCOME_IMAGE_URL: &str = "https://via.placeholder.com/300x400/333/fff?text=Bienvenido";

pub const NOTIFICATION_TITLE: &str = "Notificación";
pub const SYSTEM_AUTHOR: &str = "Sistema";
pub const GROUP_AUTHOR: &str = "Grupo";
pub const GROUP_HANDLE: &str = "grupo";

/// Rendering pattern for notification timestamps (DD/MM HH:MM).
const SENT_AT_FORMAT: &str = "%d/%m %H:%M";
const CLOCK_FORMAT: &str = "%H:%M";

/// Short Spanish day name used in route days and class schedules.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Lun",
        Weekday::Tue => "Mar",
        Weekday::Wed => "Mié",
        Weekday::Thu => "Jue",
        Weekday::Fri => "Vie",
        Weekday::Sat => "Sáb",
        Weekday::Sun => "Dom",
    }
}

fn days_label(days: &[Weekday]) -> String {
    days.iter()
        .map(|d| weekday_label(*d))
        .collect::<Vec<_>>()
        .join(", ")
}

fn stop_line(stop: &Stop) -> String {
    format!("{}. {}", stop.order, stop.location)
}

fn slot_line(slot: &ClassSlot) -> String {
    format!(
        "{} {} - {} · {}",
        weekday_label(slot.day),
        slot.start.format(CLOCK_FORMAT),
        slot.end.format(CLOCK_FORMAT),
        slot.room
    )
}

/// The detail shown while nothing is selected.
pub fn default_detail() -> NormalizedDetail {
    NormalizedDetail {
        id: "141".to_string(),
        kind: DetailKind::Default,
        title: "Red Social Universitaria".to_string(),
        author_name: "Bienvenido".to_string(),
        author_handle: "bienvenido".to_string(),
        author_avatar_url: generated_avatar_url("Bienvenido"),
        primary_image_url: Some(WELCOME_IMAGE_URL.to_string()),
        metric: "0".to_string(),
        comments: Vec::new(),
    }
}

/// Cuts `body` to [`TITLE_MAX_CHARS`] characters, appending an ellipsis when
/// anything was dropped. Counts chars, not bytes.
pub fn truncate_title(body: &str) -> String {
    match body.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => {
            let mut title = body[..cut].to_string();
            title.push(ELLIPSIS);
            title
        }
        None => body.to_string(),
    }
}

fn avatar_of(person: &Person) -> String {
    person
        .avatar_url
        .clone()
        .unwrap_or_else(|| generated_avatar_url(&person.name))
}

/// Normalizes records for one viewer.
///
/// The session only matters for notification timestamps, which are shown in
/// the viewer's local time.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    session: &'a Session,
}

impl<'a> Normalizer<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn normalize(&self, record: &DomainRecord) -> NormalizedDetail {
        match record {
            DomainRecord::Post(post) => self.post(post),
            DomainRecord::Route(route) => self.route(route),
            DomainRecord::Conversation(conversation) => self.conversation(conversation),
            DomainRecord::Notification(notification) => self.notification(notification),
            DomainRecord::Course(course) => self.course(course),
        }
    }

    /// Panel body content for `record`: route stops, class schedule,
    /// notification text and follow-up actions, and so on.
    pub fn extras(&self, record: &DomainRecord) -> DetailExtras {
        match record {
            DomainRecord::Post(post) => DetailExtras::Post {
                body: post.body.clone(),
            },
            DomainRecord::Route(route) => {
                let mut stops: Vec<&Stop> = route.stops.iter().collect();
                stops.sort_by_key(|s| s.order);
                DetailExtras::Route {
                    departure: route.departure_time.format(CLOCK_FORMAT).to_string(),
                    days: days_label(&route.days_of_week),
                    free_seats: route.capacity.saturating_sub(route.occupied),
                    stops: stops.into_iter().map(stop_line).collect(),
                }
            }
            DomainRecord::Conversation(conversation) => DetailExtras::Conversation {
                participants: conversation
                    .participants
                    .iter()
                    .map(|p| p.name.clone())
                    .collect(),
                last_message: conversation.last_message.clone(),
                last_message_at: self.local_time(conversation.last_message_at),
            },
            DomainRecord::Notification(notification) => DetailExtras::Notification {
                body: notification.body.clone(),
                sent_at: self.local_time(notification.sent_at),
                excerpt: notification
                    .reference
                    .as_ref()
                    .and_then(|r| r.excerpt.clone()),
                actions: notification_actions(notification.kind)
                    .iter()
                    .map(|a| a.to_string())
                    .collect(),
            },
            DomainRecord::Course(course) => DetailExtras::Course {
                code: course.code.clone(),
                schedule: course.schedule.iter().map(slot_line).collect(),
            },
        }
    }

    /// Second line of a list row.
    pub fn subtitle(&self, record: &DomainRecord) -> String {
        match record {
            DomainRecord::Post(post) => format!("{} comentarios", post.comment_count),
            DomainRecord::Route(route) => format!(
                "{} · {}",
                route.departure_time.format(CLOCK_FORMAT),
                days_label(&route.days_of_week)
            ),
            DomainRecord::Conversation(conversation) => conversation.last_message.clone(),
            DomainRecord::Notification(notification) => notification.body.clone(),
            DomainRecord::Course(course) => course.code.clone(),
        }
    }

    fn local_time(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.session.offset())
            .format(SENT_AT_FORMAT)
            .to_string()
    }

    fn post(&self, post: &Post) -> NormalizedDetail {
        NormalizedDetail {
            id: post.id.clone(),
            kind: DetailKind::Post,
            title: truncate_title(&post.body),
            author_name: post.author.name.clone(),
            author_handle: handle_for(&post.author.name),
            author_avatar_url: avatar_of(&post.author),
            primary_image_url: Some(
                post.media_url
                    .clone()
                    .unwrap_or_else(|| NO_IMAGE_URL.to_string()),
            ),
            metric: post.reaction_count.to_string(),
            comments: post.comments.clone(),
        }
    }

    fn route(&self, route: &Route) -> NormalizedDetail {
        let map = format!(
            "https://via.placeholder.com/800x300/333333/FFFFFF?text=Ruta+{}+a+{}",
            urlencoding::encode(&route.origin),
            urlencoding::encode(&route.destination),
        );
        NormalizedDetail {
            id: route.id.clone(),
            kind: DetailKind::Route,
            title: format!("{} → {}", route.origin, route.destination),
            author_name: route.driver.name.clone(),
            author_handle: handle_for(&route.driver.name),
            author_avatar_url: avatar_of(&route.driver),
            primary_image_url: Some(map),
            metric: format!("{}/{}", route.occupied, route.capacity),
            comments: Vec::new(),
        }
    }

    fn conversation(&self, conversation: &Conversation) -> NormalizedDetail {
        let (title, handle, avatar) = if conversation.is_group {
            let name = conversation
                .name
                .clone()
                .unwrap_or_else(|| group_fallback_name(conversation));
            (
                name,
                GROUP_HANDLE.to_string(),
                generated_avatar_url(GROUP_AUTHOR),
            )
        } else {
            match conversation.participants.first() {
                Some(peer) => (peer.name.clone(), handle_for(&peer.name), avatar_of(peer)),
                None => (
                    "Conversación".to_string(),
                    "conversacion".to_string(),
                    generated_avatar_url("Conversación"),
                ),
            }
        };

        NormalizedDetail {
            id: conversation.id.clone(),
            kind: DetailKind::Conversation,
            author_name: title.clone(),
            title,
            author_handle: handle,
            author_avatar_url: avatar,
            primary_image_url: Some(MESSAGING_IMAGE_URL.to_string()),
            metric: conversation.unread_count.to_string(),
            comments: Vec::new(),
        }
    }

    fn notification(&self, notification: &Notification) -> NormalizedDetail {
        let (author_name, author_handle, author_avatar_url) = match &notification.actor {
            Some(actor) => (actor.name.clone(), handle_for(&actor.name), avatar_of(actor)),
            None => (
                SYSTEM_AUTHOR.to_string(),
                handle_for(SYSTEM_AUTHOR),
                generated_avatar_url(SYSTEM_AUTHOR),
            ),
        };
        let image = match notification.kind {
            NotificationKind::NewGrade => NEW_GRADE_IMAGE_URL,
            _ => NOTIFICATION_IMAGE_URL,
        };
        let sent_at = self.local_time(notification.sent_at);

        NormalizedDetail {
            id: notification.id.clone(),
            kind: DetailKind::Notification,
            title: NOTIFICATION_TITLE.to_string(),
            author_name,
            author_handle,
            author_avatar_url,
            primary_image_url: Some(image.to_string()),
            metric: sent_at,
            comments: Vec::new(),
        }
    }

    fn course(&self, course: &Course) -> NormalizedDetail {
        NormalizedDetail {
            id: course.id.clone(),
            kind: DetailKind::Course,
            title: course.name.clone(),
            author_name: course.instructor.clone(),
            author_handle: handle_for(&course.instructor),
            author_avatar_url: generated_avatar_url(&course.instructor),
            primary_image_url: Some(format!(
                "https://via.placeholder.com/400x300/8B1E41/FFFFFF?text={}",
                urlencoding::encode(&course.code)
            )),
            metric: format!("{:.1}", course.average),
            comments: Vec::new(),
        }
    }
}

fn group_fallback_name(conversation: &Conversation) -> String {
    if conversation.participants.is_empty() {
        return GROUP_AUTHOR.to_string();
    }
    conversation
        .participants
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

const REQUEST_ACTIONS: &[&str] = &["Aceptar", "Rechazar"];
const COMMENT_ACTIONS: &[&str] = &["Ver comentario"];
const REACTION_ACTIONS: &[&str] = &["Ver publicación"];
const MESSAGE_ACTIONS: &[&str] = &["Responder"];
const GRADE_ACTIONS: &[&str] = &["Ver calificación"];

/// Follow-up buttons the panel offers for a notification kind.
pub fn notification_actions(kind: NotificationKind) -> &'static [&'static str] {
    match kind {
        NotificationKind::FriendRequest | NotificationKind::RouteRequest => REQUEST_ACTIONS,
        NotificationKind::Comment => COMMENT_ACTIONS,
        NotificationKind::Reaction => REACTION_ACTIONS,
        NotificationKind::Message => MESSAGE_ACTIONS,
        NotificationKind::NewGrade => GRADE_ACTIONS,
        NotificationKind::Other => &[],
    }
}
