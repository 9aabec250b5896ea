//! # ch-mock-data
//! campus-hub/crates/ch-plugins/ch-mock-data/src/lib.rs
//! In-memory implementation of `RecordSource` serving the sample campus data.
//! Features: embedded JSON fixtures per module and reproducible sample comments.

use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use ch_core::models::{generated_avatar_url, Comment, DomainRecord, Module, Post};
use ch_core::traits::RecordSource;

const POSTS: &str = include_str!("../data/posts.json");
const ROUTES: &str = include_str!("../data/routes.json");
const CONVERSATIONS: &str = include_str!("../data/conversations.json");
const NOTIFICATIONS: &str = include_str!("../data/notifications.json");
const COURSES: &str = include_str!("../data/courses.json");

const COMMENTERS: [&str; 5] = ["Usuario 1", "Usuario 2", "Usuario 3", "Usuario 4", "Usuario 5"];

fn fixture(module: Module) -> &'static str {
    match module {
        Module::Social => POSTS,
        Module::Carpooling => ROUTES,
        Module::Messages => CONVERSATIONS,
        Module::Notifications => NOTIFICATIONS,
        Module::Academic => COURSES,
    }
}

/// Builds `post.comment_count` sample comments, one hour apart going back
/// from `now`. Commenter names are drawn from `rng`.
pub fn sample_comments(post: &Post, rng: &mut StdRng, now: DateTime<Utc>) -> Vec<Comment> {
    (0..post.comment_count)
        .map(|i| {
            let author = COMMENTERS.choose(rng).copied().unwrap_or(COMMENTERS[0]);
            Comment {
                id: format!("comment-{i}-{}", post.id),
                author_name: author.to_string(),
                author_avatar_url: generated_avatar_url(author),
                body: format!("Este es un comentario de ejemplo #{} para la publicación.", i + 1),
                created_at: now - Duration::hours(i64::from(i)),
            }
        })
        .collect()
}

pub struct SampleRecordSource {
    records: HashMap<Module, Vec<DomainRecord>>,
}

impl SampleRecordSource {
    /// Parses the embedded fixtures. Sample comments are generated from
    /// `comment_seed`, so equal seeds give equal data.
    pub fn new(comment_seed: u64) -> anyhow::Result<Self> {
        let now = Utc
            .with_ymd_and_hms(2025, 10, 17, 12, 0, 0)
            .single()
            .context("invalid sample clock")?;
        Self::with_reference_time(comment_seed, now)
    }

    /// Like [`SampleRecordSource::new`] with sample comments dated back from `now`.
    pub fn with_reference_time(comment_seed: u64, now: DateTime<Utc>) -> anyhow::Result<Self> {
        let mut rng = StdRng::seed_from_u64(comment_seed);
        let mut records = HashMap::new();

        for module in Module::ALL {
            let mut parsed: Vec<DomainRecord> = serde_json::from_str(fixture(module))
                .with_context(|| format!("parsing {module} fixture"))?;

            if let Some(stray) = parsed.iter().find(|r| !module.owns(r)) {
                anyhow::bail!(
                    "{module} fixture contains a {:?} record ({})",
                    stray.kind(),
                    stray.id()
                );
            }

            for record in parsed.iter_mut() {
                if let DomainRecord::Post(post) = record {
                    post.comments = sample_comments(post, &mut rng, now);
                }
            }
            debug!(module = %module, count = parsed.len(), "loaded fixture");
            records.insert(module, parsed);
        }

        Ok(Self { records })
    }

    /// Synchronous access for callers that don't run an executor.
    pub fn records(&self, module: Module) -> &[DomainRecord] {
        self.records.get(&module).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[async_trait]
impl RecordSource for SampleRecordSource {
    async fn fetch(&self, module: Module) -> anyhow::Result<Vec<DomainRecord>> {
        Ok(self.records(module).to_vec())
    }

    async fn find(&self, module: Module, id: &str) -> anyhow::Result<Option<DomainRecord>> {
        Ok(self.records(module).iter().find(|r| r.id() == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_module_has_records() {
        let source = SampleRecordSource::new(42).unwrap();
        for module in Module::ALL {
            let records = source.fetch(module).await.unwrap();
            assert!(!records.is_empty(), "{module}");
            assert!(records.iter().all(|r| module.owns(r)));
        }
    }

    #[tokio::test]
    async fn test_route_fixture_capacities() {
        let source = SampleRecordSource::new(42).unwrap();
        let seats: Vec<(u32, u32)> = source
            .fetch(Module::Carpooling)
            .await
            .unwrap()
            .iter()
            .filter_map(|r| match r {
                DomainRecord::Route(route) => Some((route.capacity, route.occupied)),
                _ => None,
            })
            .collect();
        assert_eq!(seats, vec![(4, 2), (3, 3), (4, 1), (2, 0)]);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let source = SampleRecordSource::new(42).unwrap();
        let found = source.find(Module::Academic, "INF110").await.unwrap();
        assert_eq!(found.map(|r| r.id().to_string()), Some("INF110".to_string()));
        assert!(source.find(Module::Academic, "XYZ999").await.unwrap().is_none());
    }

    #[test]
    fn test_sample_comments_follow_comment_count_and_seed() {
        let a = SampleRecordSource::new(7).unwrap();
        let b = SampleRecordSource::new(7).unwrap();
        assert_eq!(a.records(Module::Social), b.records(Module::Social));

        let DomainRecord::Post(post) = &a.records(Module::Social)[1] else {
            panic!("expected a post");
        };
        assert_eq!(post.comments.len(), post.comment_count as usize);
        assert_eq!(post.comments[0].id, "comment-0-002");
        assert!(post.comments.windows(2).all(|w| w[0].created_at > w[1].created_at));
        assert!(post
            .comments
            .iter()
            .all(|c| COMMENTERS.contains(&c.author_name.as_str())));
    }
}
