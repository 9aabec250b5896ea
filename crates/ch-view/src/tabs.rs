//! # Tab Filter
//!
//! Every list screen offers a few named presets ("tabs"). A tab is a pure
//! predicate over one record; filtering keeps input order and never touches
//! the input collection.

use chrono::NaiveDate;
use tracing::warn;

use ch_core::models::{DomainRecord, Module};
use ch_core::session::Session;

/// Predicate behind a tab id. Several ids may share one predicate
/// (`recientes` and `eventos` both show everything).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    ShowAll,
    Popular,
    Friends,
    Available,
    MyRoutes,
    History,
    Unread,
    Groups,
    Academic,
}

const SOCIAL_TABS: &[(&str, Tab)] = &[
    ("recientes", Tab::ShowAll),
    ("populares", Tab::Popular),
    ("amigos", Tab::Friends),
    ("eventos", Tab::ShowAll),
];

const CARPOOLING_TABS: &[(&str, Tab)] = &[
    ("disponibles", Tab::Available),
    ("mis-rutas", Tab::MyRoutes),
    ("historial", Tab::History),
];

const MESSAGES_TABS: &[(&str, Tab)] = &[
    ("recientes", Tab::ShowAll),
    ("no-leidos", Tab::Unread),
    ("grupos", Tab::Groups),
];

const NOTIFICATIONS_TABS: &[(&str, Tab)] = &[
    ("todas", Tab::ShowAll),
    ("no-leidas", Tab::Unread),
    ("academicas", Tab::Academic),
];

const ACADEMIC_TABS: &[(&str, Tab)] = &[("materias", Tab::ShowAll)];

/// Tab ids offered by `module`, in display order. The first one is the
/// module's initial tab.
pub fn tabs_for(module: Module) -> &'static [(&'static str, Tab)] {
    match module {
        Module::Social => SOCIAL_TABS,
        Module::Carpooling => CARPOOLING_TABS,
        Module::Messages => MESSAGES_TABS,
        Module::Notifications => NOTIFICATIONS_TABS,
        Module::Academic => ACADEMIC_TABS,
    }
}

pub fn default_tab(module: Module) -> &'static str {
    tabs_for(module)[0].0
}

/// Looks `tab_id` up among the module's tabs.
pub fn lookup(module: Module, tab_id: &str) -> Option<Tab> {
    tabs_for(module)
        .iter()
        .find(|(id, _)| *id == tab_id)
        .map(|(_, tab)| *tab)
}

/// Like [`lookup`], but an unknown id fails open to [`Tab::ShowAll`].
pub fn resolve(module: Module, tab_id: &str) -> Tab {
    lookup(module, tab_id).unwrap_or_else(|| {
        warn!(module = %module, tab = tab_id, "unknown tab id, showing all records");
        Tab::ShowAll
    })
}

/// Viewer-dependent inputs of the tab predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContext {
    /// Display name matched against route drivers for "mis-rutas".
    pub current_user: String,
    pub friends: Vec<String>,
    pub popular_threshold: u32,
    /// Routes created strictly before this date are history.
    pub history_cutoff: NaiveDate,
}

impl FilterContext {
    pub fn for_session(session: &Session) -> Self {
        Self {
            current_user: session.display_name.clone(),
            ..Self::default()
        }
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self {
            current_user: "Laura Gómez".to_string(),
            friends: vec!["Ana García".to_string(), "Carlos Mendoza".to_string()],
            popular_threshold: 20,
            history_cutoff: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap_or_default(),
        }
    }
}

impl Tab {
    /// Whether `record` is listed under this tab. Records a predicate does
    /// not apply to are excluded, except under [`Tab::ShowAll`].
    pub fn matches(self, record: &DomainRecord, ctx: &FilterContext) -> bool {
        match (self, record) {
            (Tab::ShowAll, _) => true,
            (Tab::Popular, DomainRecord::Post(post)) => {
                post.reaction_count >= ctx.popular_threshold
            }
            (Tab::Friends, DomainRecord::Post(post)) => ctx.friends.contains(&post.author.name),
            (Tab::Available, DomainRecord::Route(route)) => route.has_free_seats(),
            (Tab::MyRoutes, DomainRecord::Route(route)) => route.driver.name == ctx.current_user,
            (Tab::History, DomainRecord::Route(route)) => route.created_on < ctx.history_cutoff,
            (Tab::Unread, DomainRecord::Conversation(conversation)) => {
                conversation.unread_count > 0
            }
            (Tab::Unread, DomainRecord::Notification(notification)) => !notification.read,
            (Tab::Groups, DomainRecord::Conversation(conversation)) => conversation.is_group,
            (Tab::Academic, DomainRecord::Notification(notification)) => {
                notification.kind.is_academic()
            }
            _ => false,
        }
    }
}

/// Returns the records of `records` listed under `tab_id`, in input order.
pub fn filter<'r>(
    records: &'r [DomainRecord],
    module: Module,
    tab_id: &str,
    ctx: &FilterContext,
) -> Vec<&'r DomainRecord> {
    let tab = resolve(module, tab_id);
    records.iter().filter(|record| tab.matches(record, ctx)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ch_core::models::{Conversation, Notification, NotificationKind, Person, Post, Route};
    use chrono::{NaiveTime, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    fn post(id: &str, author: &str, reactions: u32) -> DomainRecord {
        DomainRecord::Post(Post {
            id: id.to_string(),
            author: Person::new(author),
            body: "Contenido".to_string(),
            media_url: None,
            reaction_count: reactions,
            comment_count: 0,
            created_at: Utc.with_ymd_and_hms(2025, 10, 16, 10, 0, 0).unwrap(),
            comments: Vec::new(),
        })
    }

    fn route(
        id: &str,
        driver: &str,
        capacity: u32,
        occupied: u32,
        created: (i32, u32, u32),
    ) -> DomainRecord {
        DomainRecord::Route(Route {
            id: id.to_string(),
            driver: Person::new(driver),
            origin: "Campus Norte".to_string(),
            destination: "Zona Sur".to_string(),
            departure_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            days_of_week: Vec::new(),
            capacity,
            occupied,
            stops: Vec::new(),
            created_on: NaiveDate::from_ymd_opt(created.0, created.1, created.2).unwrap(),
        })
    }

    fn ids<'a>(records: &[&'a DomainRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_recientes_keeps_everything_in_order() {
        let posts = vec![post("3", "A", 1), post("1", "B", 50), post("2", "C", 0)];
        let shown = filter(&posts, Module::Social, "recientes", &FilterContext::default());
        assert_eq!(ids(&shown), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_populares_threshold_is_inclusive() {
        let posts = vec![post("a", "A", 24), post("b", "B", 15), post("c", "C", 20)];
        let shown = filter(&posts, Module::Social, "populares", &FilterContext::default());
        assert_eq!(ids(&shown), vec!["a", "c"]);
    }

    #[test]
    fn test_amigos_uses_allow_list() {
        let posts = vec![
            post("1", "Ana García", 1),
            post("2", "Patricia Fuentes", 1),
            post("3", "Carlos Mendoza", 1),
        ];
        let shown = filter(&posts, Module::Social, "amigos", &FilterContext::default());
        assert_eq!(ids(&shown), vec!["1", "3"]);
    }

    #[test]
    fn test_route_tabs() {
        let routes = vec![
            route("1", "Juan Méndez", 4, 2, (2025, 10, 1)),
            route("2", "Andrea López", 3, 3, (2025, 10, 5)),
            route("3", "Laura Gómez", 2, 0, (2025, 10, 15)),
        ];
        let ctx = FilterContext::for_session(&Session::new("Laura Gómez", 0));
        assert_eq!(ids(&filter(&routes, Module::Carpooling, "disponibles", &ctx)), vec!["1", "3"]);
        assert_eq!(ids(&filter(&routes, Module::Carpooling, "mis-rutas", &ctx)), vec!["3"]);
        assert_eq!(ids(&filter(&routes, Module::Carpooling, "historial", &ctx)), vec!["1", "2"]);
    }

    #[test]
    fn test_conversation_and_notification_tabs() {
        let at = Utc.with_ymd_and_hms(2025, 10, 16, 18, 15, 0).unwrap();
        let conversations = vec![
            DomainRecord::Conversation(Conversation {
                id: "1".to_string(),
                is_group: false,
                name: None,
                participants: vec![Person::new("Elena Rodríguez")],
                last_message: "Hola".to_string(),
                last_message_at: at,
                unread_count: 3,
            }),
            DomainRecord::Conversation(Conversation {
                id: "2".to_string(),
                is_group: true,
                name: Some("Estudio Cálculo II".to_string()),
                participants: Vec::new(),
                last_message: "Hola".to_string(),
                last_message_at: at,
                unread_count: 0,
            }),
        ];
        let ctx = FilterContext::default();
        assert_eq!(ids(&filter(&conversations, Module::Messages, "no-leidos", &ctx)), vec!["1"]);
        assert_eq!(ids(&filter(&conversations, Module::Messages, "grupos", &ctx)), vec!["2"]);

        let notification = |id: &str, kind, read| {
            DomainRecord::Notification(Notification {
                id: id.to_string(),
                kind,
                body: "Aviso".to_string(),
                actor: None,
                sent_at: at,
                read,
                reference: None,
            })
        };
        let notifications = vec![
            notification("1", NotificationKind::Comment, false),
            notification("2", NotificationKind::NewGrade, true),
            notification("3", NotificationKind::NewGrade, false),
        ];
        assert_eq!(
            ids(&filter(&notifications, Module::Notifications, "no-leidas", &ctx)),
            vec!["1", "3"]
        );
        assert_eq!(
            ids(&filter(&notifications, Module::Notifications, "academicas", &ctx)),
            vec!["2", "3"]
        );
        assert_eq!(filter(&notifications, Module::Notifications, "todas", &ctx).len(), 3);
    }

    #[test]
    fn test_unknown_tab_fails_open() {
        let posts = vec![post("1", "A", 0), post("2", "B", 99)];
        assert_eq!(lookup(Module::Social, "popualres"), None);
        let shown = filter(&posts, Module::Social, "popualres", &FilterContext::default());
        assert_eq!(ids(&shown), vec!["1", "2"]);
    }

    /// Collects formatted log output.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_tab_logs_a_warning() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let (known, unknown) = tracing::subscriber::with_default(subscriber, || {
            (
                resolve(Module::Carpooling, "historial"),
                resolve(Module::Carpooling, "favoritas"),
            )
        });
        assert_eq!(known, Tab::History);
        assert_eq!(unknown, Tab::ShowAll);

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logs.matches("unknown tab id").count(), 1, "{logs}");
        assert!(logs.contains("WARN"));
        assert!(logs.contains("favoritas"));
    }

    #[test]
    fn test_tab_ids_are_scoped_per_module() {
        assert_eq!(lookup(Module::Messages, "no-leidos"), Some(Tab::Unread));
        assert_eq!(lookup(Module::Notifications, "no-leidos"), None);
        assert_eq!(default_tab(Module::Carpooling), "disponibles");
        assert_eq!(default_tab(Module::Notifications), "todas");
    }

    #[test]
    fn test_predicates_exclude_foreign_records() {
        let record = post("1", "Ana García", 99);
        let ctx = FilterContext::default();
        assert!(!Tab::Available.matches(&record, &ctx));
        assert!(!Tab::Unread.matches(&record, &ctx));
        assert!(Tab::ShowAll.matches(&record, &ctx));
    }
}
