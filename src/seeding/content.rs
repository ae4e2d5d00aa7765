// ABOUTME: Sample content chapters with lessons, summaries, exercise sets and tests
// ABOUTME: Appends per subject; chapter numbering continues from existing chapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use rand::Rng;
use tracing::{info, warn};

use super::pools::{
    CONTENT_BODIES, CONTENT_DESCRIPTIONS, EXERCISES_BODY, EXERCISES_TITLES, LESSON_TAG_SETS,
    LESSON_TITLES, SUMMARY_TITLES, TEST_BODY, TEST_DESCRIPTION, TEST_TITLES,
};
use super::random::{between, days_ago, percent, pick};
use super::{SeedContext, SeedOutcome, SeedStep, Seeder};
use crate::database::Table;
use crate::errors::AppResult;
use crate::models::{ContentKind, Difficulty, NewContent, NewContentChapter, Subject};

/// Counter ranges and flags per content kind
struct KindProfile {
    per_chapter: (u32, u32),
    minutes: (u32, u32),
    published_percent: u32,
    premium_percent: u32,
    views: (u32, u32),
    downloads: (u32, u32),
}

const fn profile(kind: ContentKind) -> KindProfile {
    match kind {
        ContentKind::Lesson => KindProfile {
            per_chapter: (3, 5),
            minutes: (20, 60),
            published_percent: 90,
            premium_percent: 30,
            views: (50, 500),
            downloads: (10, 200),
        },
        ContentKind::Summary => KindProfile {
            per_chapter: (1, 1),
            minutes: (15, 30),
            published_percent: 100,
            premium_percent: 0,
            views: (100, 800),
            downloads: (50, 400),
        },
        ContentKind::Exercises => KindProfile {
            per_chapter: (2, 3),
            minutes: (30, 90),
            published_percent: 100,
            premium_percent: 40,
            views: (80, 600),
            downloads: (30, 300),
        },
        ContentKind::Test => KindProfile {
            per_chapter: (1, 1),
            minutes: (60, 120),
            published_percent: 80,
            premium_percent: 50,
            views: (60, 400),
            downloads: (20, 250),
        },
    }
}

/// Per-chapter facts shared by every item
struct ChapterRef<'a> {
    subject: &'a Subject,
    chapter_id: i64,
}

fn content_item<R: Rng + ?Sized>(
    rng: &mut R,
    kind: ContentKind,
    content_type_id: i64,
    chapter: &ChapterRef<'_>,
    index: usize,
    sort_order: i64,
    now: chrono::DateTime<chrono::Utc>,
) -> AppResult<NewContent> {
    let subject = chapter.subject;
    let base = format!("{}-{}", subject.slug, chapter.chapter_id);
    let subject_tag = subject.name_ar.clone();

    let (title, slug, description, body, difficulty, tags) = match kind {
        ContentKind::Lesson => (
            LESSON_TITLES[index % LESSON_TITLES.len()],
            format!("{base}-lesson-{}", index + 1),
            *pick(rng, &CONTENT_DESCRIPTIONS)?,
            *pick(rng, &CONTENT_BODIES)?,
            *pick(rng, &Difficulty::ALL)?,
            pick(rng, &LESSON_TAG_SETS)?
                .iter()
                .map(|t| (*t).to_owned())
                .collect(),
        ),
        ContentKind::Summary => (
            *pick(rng, &SUMMARY_TITLES)?,
            format!("{base}-summary"),
            *pick(rng, &CONTENT_DESCRIPTIONS)?,
            *pick(rng, &CONTENT_BODIES)?,
            Difficulty::Easy,
            vec!["ملخص".to_owned(), "مراجعة".to_owned(), subject_tag],
        ),
        ContentKind::Exercises => (
            EXERCISES_TITLES[index % EXERCISES_TITLES.len()],
            format!("{base}-exercises-{}", index + 1),
            *pick(rng, &CONTENT_DESCRIPTIONS)?,
            EXERCISES_BODY,
            *pick(rng, &Difficulty::ALL)?,
            vec!["تمارين".to_owned(), "حلول".to_owned(), subject_tag],
        ),
        ContentKind::Test => (
            *pick(rng, &TEST_TITLES)?,
            format!("{base}-test"),
            TEST_DESCRIPTION,
            TEST_BODY,
            *pick(rng, &Difficulty::ALL)?,
            vec!["اختبار".to_owned(), "تقييم".to_owned(), subject_tag],
        ),
    };

    let profile = profile(kind);
    Ok(NewContent {
        subject_id: subject.id,
        chapter_id: chapter.chapter_id,
        content_type_id,
        title_ar: title.to_owned(),
        slug,
        description_ar: description.to_owned(),
        body_ar: body.to_owned(),
        difficulty,
        estimated_duration_minutes: between(rng, profile.minutes.0, profile.minutes.1),
        sort_order,
        is_published: percent(rng, profile.published_percent),
        published_at: Some(days_ago(rng, now, 1, 30)),
        is_premium: percent(rng, profile.premium_percent),
        tags,
        views_count: between(rng, profile.views.0, profile.views.1),
        downloads_count: between(rng, profile.downloads.0, profile.downloads.1),
    })
}

/// Two or three sample chapters per subject
pub struct FakeContentSeeder;

#[async_trait]
impl Seeder for FakeContentSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::FakeContent
    }

    fn requires(&self) -> &'static [Table] {
        &[Table::Subjects, Table::ContentTypes]
    }

    fn provides(&self) -> &'static [Table] {
        &[Table::ContentChapters, Table::Contents]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        let now = ctx.now;
        let subjects = db.list_subjects().await?;

        let mut kinds = Vec::with_capacity(ContentKind::ALL.len());
        for kind in ContentKind::ALL {
            match db.get_content_type_id(kind.slug()).await? {
                Some(id) => kinds.push((kind, id)),
                None => warn!(kind = kind.slug(), "Content type missing, skipping its items"),
            }
        }
        if kinds.is_empty() {
            return Ok(SeedOutcome::skipped("no content types found"));
        }

        let rng = &mut ctx.rng;
        let (mut chapters, mut items) = (0_u64, 0_u64);

        for subject in &subjects {
            let existing = db.count_chapters_for_subject(subject.id).await?;
            for offset in 1..=i64::from(between(rng, 2, 3)) {
                let number = existing + offset;
                let chapter_id = db
                    .insert_content_chapter(&NewContentChapter {
                        subject_id: subject.id,
                        title_ar: format!("الوحدة {number} - {}", subject.name_ar),
                        slug: format!("{}-chapter-{number}", subject.slug),
                        description_ar: format!("وحدة تعليمية تغطي موضوعات {}", subject.name_ar),
                        sort_order: number,
                    })
                    .await?;
                chapters += 1;

                let chapter = ChapterRef {
                    subject,
                    chapter_id,
                };
                let mut sort_order = 1;
                for (kind, content_type_id) in &kinds {
                    let profile = profile(*kind);
                    let count = between(rng, profile.per_chapter.0, profile.per_chapter.1) as usize;
                    for index in 0..count {
                        let item = content_item(
                            rng,
                            *kind,
                            *content_type_id,
                            &chapter,
                            index,
                            sort_order,
                            now,
                        )?;
                        db.insert_content(&item).await?;
                        sort_order += 1;
                        items += 1;
                    }
                }
            }
        }

        info!(chapters, items, subjects = subjects.len(), "Sample content seeded");
        Ok(SeedOutcome::completed(chapters + items))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use chrono::Utc;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn subject() -> Subject {
        Subject {
            id: 4,
            academic_stream_id: Some(1),
            academic_year_id: 12,
            name_ar: "الفيزياء".to_owned(),
            slug: "sciences-exp-physics".to_owned(),
            description_ar: None,
            coefficient: 6,
            icon: None,
            color: None,
            sort_order: 2,
        }
    }

    #[test]
    fn test_summary_is_free_easy_and_published() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let subject = subject();
        let chapter = ChapterRef {
            subject: &subject,
            chapter_id: 9,
        };
        for _ in 0..20 {
            let item = content_item(&mut rng, ContentKind::Summary, 2, &chapter, 0, 1, Utc::now())
                .expect("summary item");
            assert_eq!(item.difficulty, Difficulty::Easy);
            assert!(item.is_published);
            assert!(!item.is_premium);
            assert_eq!(item.slug, "sciences-exp-physics-9-summary");
            assert!(item.tags.contains(&"الفيزياء".to_owned()));
        }
    }

    #[test]
    fn test_lesson_counters_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let subject = subject();
        let chapter = ChapterRef {
            subject: &subject,
            chapter_id: 3,
        };
        for index in 0..5 {
            let item =
                content_item(&mut rng, ContentKind::Lesson, 1, &chapter, index, 1, Utc::now())
                    .expect("lesson item");
            assert!((20..=60).contains(&item.estimated_duration_minutes));
            assert!((50..=500).contains(&item.views_count));
            assert_eq!(item.title_ar, LESSON_TITLES[index]);
        }
    }
}
