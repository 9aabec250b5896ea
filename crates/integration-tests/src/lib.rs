//! Shared builders for the cross-crate tests.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

use ch_core::models::{Comment, DomainRecord, Person, Post, Route};
use ch_core::session::Session;
use ch_core::traits::FixedClock;

/// Viewer used throughout the sample data.
pub fn session() -> Session {
    Session::new("Laura Gómez", 0)
}

pub fn instant(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

pub fn clock() -> FixedClock {
    FixedClock(instant(17, 12, 30))
}

pub fn post(id: &str, author: &str, body: &str, reactions: u32, comments: u32) -> DomainRecord {
    let created_at = instant(16, 14, 30);
    DomainRecord::Post(Post {
        id: id.to_string(),
        author: Person::new(author),
        body: body.to_string(),
        media_url: None,
        reaction_count: reactions,
        comment_count: comments,
        created_at,
        comments: (0..comments)
            .map(|i| Comment {
                id: format!("comment-{i}-{id}"),
                author_name: format!("Usuario {}", i + 1),
                author_avatar_url: String::new(),
                body: format!("Comentario #{}", i + 1),
                created_at,
            })
            .collect(),
    })
}

pub fn route(id: &str, driver: &str, capacity: u32, occupied: u32) -> DomainRecord {
    DomainRecord::Route(Route {
        id: id.to_string(),
        driver: Person::new(driver),
        origin: "Campus Central".to_string(),
        destination: "Residencial Las Palmas".to_string(),
        departure_time: NaiveTime::from_hms_opt(7, 30, 0).unwrap_or_default(),
        days_of_week: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
        capacity,
        occupied,
        stops: Vec::new(),
        created_on: NaiveDate::from_ymd_opt(2025, 10, 10).unwrap_or_default(),
    })
}
