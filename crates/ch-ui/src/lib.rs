//! # ch-ui
//!
//! askama views of the list screens and the detail panel. Templates receive
//! fully prepared rows; the theme palette is passed in, never looked up.

use askama::Template;
use ch_core::models::{DetailExtras, DetailKind, DomainRecord, Module, NormalizedDetail};
use ch_core::session::{Palette, Session, Theme};
use ch_view::comments::CommentLog;
use ch_view::normalize::Normalizer;
use ch_view::selection::SelectionState;
use ch_view::tabs::tabs_for;

/// Comment dates are shown day-first.
const COMMENT_DATE_FORMAT: &str = "%d/%m/%Y";

pub struct CommentRow<'a> {
    pub id: &'a str,
    pub author_name: &'a str,
    pub avatar_url: &'a str,
    pub date: String,
    pub body: &'a str,
}

/// A labelled line of the panel body ("Salida: 17:30").
pub struct Fact {
    pub label: &'static str,
    pub value: String,
}

#[derive(Template)]
#[template(path = "detail_panel.html")]
pub struct DetailPanelTemplate<'a> {
    pub detail: &'a NormalizedDetail,
    pub palette: Palette,
    pub metric_label: &'static str,
    pub actions: &'static [&'static str],
    pub has_image: bool,
    pub image_url: &'a str,
    pub body: &'a str,
    pub facts: Vec<Fact>,
    pub list_heading: &'static str,
    pub list_items: &'a [String],
    pub excerpt: &'a str,
    pub item_actions: &'a [String],
    pub show_comments: bool,
    pub comments: Vec<CommentRow<'a>>,
    pub total_comments: usize,
    pub hidden_comments: usize,
    pub preview: usize,
    pub expanded: bool,
}

/// Caption printed next to the metric value.
pub fn metric_label(kind: DetailKind) -> &'static str {
    match kind {
        DetailKind::Post => "Reacciones:",
        DetailKind::Route => "Capacidad:",
        DetailKind::Conversation => "No leídos:",
        DetailKind::Notification => "Recibida:",
        DetailKind::Course => "Promedio:",
        DetailKind::Default => "",
    }
}

const COURSE_ACTIONS: &[&str] = &["Descargar material", "Favoritos"];
const ROUTE_ACTIONS: &[&str] = &["Compartir ruta", "Favoritos"];
const CONVERSATION_ACTIONS: &[&str] = &["Información", "Favoritos"];
const BASIC_ACTIONS: &[&str] = &["Favoritos"];

/// Header buttons per kind; every panel ends with "Favoritos".
pub fn header_actions(kind: DetailKind) -> &'static [&'static str] {
    match kind {
        DetailKind::Course => COURSE_ACTIONS,
        DetailKind::Route => ROUTE_ACTIONS,
        DetailKind::Conversation => CONVERSATION_ACTIONS,
        DetailKind::Post | DetailKind::Notification | DetailKind::Default => BASIC_ACTIONS,
    }
}

impl<'a> DetailPanelTemplate<'a> {
    /// Panel for `detail`. Comments come from `log` when the selection has one,
    /// otherwise from the detail's own (server) list. Comment dates are shown
    /// in the session's UTC offset.
    pub fn new(
        detail: &'a NormalizedDetail,
        extras: &'a DetailExtras,
        log: Option<&'a CommentLog>,
        session: &Session,
        theme: &Theme,
    ) -> Self {
        let (comments, total, hidden, preview, expanded) = match log {
            Some(log) => (
                log.visible(),
                log.len(),
                log.hidden_count(),
                log.preview(),
                log.is_expanded(),
            ),
            None => (
                detail.comments.iter().collect(),
                detail.comments.len(),
                0,
                detail.comments.len(),
                true,
            ),
        };
        let offset = session.offset();

        let mut panel = Self {
            detail,
            palette: theme.palette(),
            metric_label: metric_label(detail.kind),
            actions: header_actions(detail.kind),
            has_image: detail.primary_image_url.is_some(),
            image_url: detail.primary_image_url.as_deref().unwrap_or_default(),
            body: "",
            facts: Vec::new(),
            list_heading: "",
            list_items: &[],
            excerpt: "",
            item_actions: &[],
            show_comments: matches!(detail.kind, DetailKind::Post | DetailKind::Default),
            comments: comments
                .into_iter()
                .map(|c| CommentRow {
                    id: &c.id,
                    author_name: &c.author_name,
                    avatar_url: &c.author_avatar_url,
                    date: c
                        .created_at
                        .with_timezone(&offset)
                        .format(COMMENT_DATE_FORMAT)
                        .to_string(),
                    body: &c.body,
                })
                .collect(),
            total_comments: total,
            hidden_comments: hidden,
            preview,
            expanded,
        };
        panel.fill_extras(extras);
        panel
    }

    fn fill_extras(&mut self, extras: &'a DetailExtras) {
        match extras {
            DetailExtras::Empty => {}
            DetailExtras::Post { body } => self.body = body.as_str(),
            DetailExtras::Route {
                departure,
                days,
                free_seats,
                stops,
            } => {
                self.facts = vec![
                    fact("Salida:", departure.clone()),
                    fact("Días:", days.clone()),
                    fact("Asientos libres:", free_seats.to_string()),
                ];
                self.list_heading = "Paradas";
                self.list_items = stops.as_slice();
            }
            DetailExtras::Conversation {
                participants,
                last_message,
                last_message_at,
            } => {
                self.body = last_message.as_str();
                self.facts = vec![
                    fact("Participantes:", participants.join(", ")),
                    fact("Último mensaje:", last_message_at.clone()),
                ];
            }
            DetailExtras::Notification {
                body,
                sent_at,
                excerpt,
                actions,
            } => {
                self.body = body.as_str();
                self.facts = vec![fact("Enviada:", sent_at.clone())];
                self.excerpt = excerpt.as_deref().unwrap_or_default();
                self.item_actions = actions.as_slice();
            }
            DetailExtras::Course { code, schedule } => {
                self.facts = vec![fact("Código:", code.clone())];
                self.list_heading = "Horarios";
                self.list_items = schedule.as_slice();
            }
        }
    }

    /// Panel for whatever `state` currently shows, placeholder included.
    pub fn for_selection(state: &'a SelectionState, theme: &Theme) -> Self {
        Self::new(
            state.current_or_default(),
            state.current_extras(),
            state.comments(),
            state.session(),
            theme,
        )
    }
}

fn fact(label: &'static str, value: String) -> Fact {
    Fact { label, value }
}

pub struct TabLink {
    pub id: &'static str,
    pub label: String,
    pub active: bool,
}

pub struct ListRow {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub avatar_url: String,
    pub subtitle: String,
    pub metric: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate<'a> {
    pub title: &'a str,
    pub palette: Palette,
    pub tabs: Vec<TabLink>,
    pub rows: Vec<ListRow>,
}

pub fn module_title(module: Module) -> &'static str {
    match module {
        Module::Social => "Red Social Universitaria",
        Module::Carpooling => "Carpooling",
        Module::Messages => "Mensajes",
        Module::Notifications => "Notificaciones",
        Module::Academic => "Gestión Académica",
    }
}

/// "no-leidos" → "No leidos".
fn tab_label(id: &str) -> String {
    let spaced = id.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl<'a> ListTemplate<'a> {
    /// A module screen showing `records` (already filtered) under `active_tab`.
    pub fn new(
        module: Module,
        active_tab: &str,
        records: &[&DomainRecord],
        normalizer: &Normalizer<'_>,
        selection: &SelectionState,
        theme: &Theme,
    ) -> Self {
        let tabs = tabs_for(module)
            .iter()
            .map(|&(id, _)| TabLink {
                id,
                label: tab_label(id),
                active: id == active_tab,
            })
            .collect();
        let rows = records
            .iter()
            .map(|record| {
                let detail = normalizer.normalize(record);
                ListRow {
                    subtitle: normalizer.subtitle(record),
                    selected: selection.is_selected(&detail.id),
                    id: detail.id,
                    title: detail.title,
                    author_name: detail.author_name,
                    avatar_url: detail.author_avatar_url,
                    metric: detail.metric,
                }
            })
            .collect();

        Self {
            title: module_title(module),
            palette: theme.palette(),
            tabs,
            rows,
        }
    }
}
