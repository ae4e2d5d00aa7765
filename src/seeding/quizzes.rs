// ABOUTME: Sample quizzes with typed questions for the BAC subjects of one stream
// ABOUTME: Question payloads come from per-family pools and are validated on insert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, info};

use super::pools::{self, SubjectFamily};
use super::random::{between, percent, pick};
use super::{SeedContext, SeedOutcome, SeedStep, Seeder};
use crate::database::Table;
use crate::errors::AppResult;
use crate::models::{
    Difficulty, NewQuiz, NewQuizQuestion, QuestionPayload, QuestionType, QuizType, Subject,
    UserRole,
};

const PASSING_SCORES: [u32; 3] = [50, 60, 70];
const BASE_TAGS: [&str; 2] = ["بكالوريا", "3AS"];

fn fallback_title(position: u32) -> String {
    match position {
        1 => format!("اختبار {position}"),
        2 => format!("تمرين {position}"),
        3 => format!("كويز {position}"),
        _ => "اختبار شامل".to_owned(),
    }
}

/// Quiz title for the n-th quiz (1-based) of a subject
fn quiz_title(family: Option<SubjectFamily>, position: u32) -> String {
    pools::quiz_titles(family).map_or_else(
        || fallback_title(position),
        |titles| {
            let index = (position.saturating_sub(1) as usize).min(titles.len() - 1);
            titles[index].to_owned()
        },
    )
}

fn quiz_for<R: Rng + ?Sized>(
    rng: &mut R,
    subject: &Subject,
    position: i64,
    created_by: Option<i64>,
) -> AppResult<NewQuiz> {
    let family = SubjectFamily::from_slug(&subject.slug);
    let quiz_type = *pick(rng, &QuizType::ALL)?;
    let difficulty = *pick(rng, &Difficulty::ALL)?;
    let time_limit_minutes = match quiz_type.time_limit_choices() {
        [] => None,
        choices => Some(*pick(rng, choices)?),
    };
    let title_position = u32::try_from(position).unwrap_or(u32::MAX);

    let mut tags: Vec<String> = BASE_TAGS.iter().map(|t| (*t).to_owned()).collect();
    tags.push(subject.name_ar.clone());
    tags.push((*pick(rng, pools::difficulty_tags(difficulty))?).to_owned());

    Ok(NewQuiz {
        subject_id: subject.id,
        chapter_id: None,
        title_ar: quiz_title(family, title_position),
        slug: format!("{}-quiz-{position}", subject.slug),
        description_ar: format!(
            "اختبار {} في مادة {} - المستوى: {}. يحتوي على أسئلة متنوعة لتقييم مستواك.",
            quiz_type.label_ar(),
            subject.name_ar,
            difficulty.label_ar()
        ),
        quiz_type,
        time_limit_minutes,
        passing_score: *pick(rng, &PASSING_SCORES)?,
        difficulty,
        estimated_duration_minutes: between(rng, 10, 45),
        shuffle_questions: rng.gen_bool(0.5),
        shuffle_answers: rng.gen_bool(0.5),
        show_correct_answers: quiz_type.reveals_answers(),
        allow_review: quiz_type.reveals_answers(),
        tags,
        is_published: true,
        is_premium: percent(rng, 30),
        created_by,
    })
}

/// Question text, payload and explanation drawn from the family pools
fn sample_question<R: Rng + ?Sized>(
    rng: &mut R,
    family: Option<SubjectFamily>,
    question_type: QuestionType,
) -> AppResult<(String, QuestionPayload, String)> {
    let owned = |options: &[&str]| options.iter().map(|o| (*o).to_owned()).collect::<Vec<_>>();
    Ok(match question_type {
        QuestionType::McqSingle => {
            let sample = pick(rng, pools::mcq_single(family))?;
            let correct_text = sample.options.get(sample.correct).copied().unwrap_or_default();
            (
                sample.text.to_owned(),
                QuestionPayload::McqSingle {
                    options: owned(sample.options),
                    answer: sample.correct,
                },
                sample.explanation.map_or_else(
                    || format!("الإجابة الصحيحة هي: {correct_text}"),
                    str::to_owned,
                ),
            )
        }
        QuestionType::McqMultiple => {
            let sample = pick(rng, pools::mcq_multiple(family))?;
            (
                sample.text.to_owned(),
                QuestionPayload::McqMultiple {
                    options: owned(sample.options),
                    answers: sample.correct.to_vec(),
                },
                "الإجابات الصحيحة متعددة.".to_owned(),
            )
        }
        QuestionType::TrueFalse => {
            let sample = pick(rng, pools::true_false(family))?;
            let fallback = if sample.correct {
                "العبارة صحيحة."
            } else {
                "العبارة خاطئة."
            };
            (
                sample.text.to_owned(),
                QuestionPayload::TrueFalse {
                    answer: sample.correct,
                },
                sample.explanation.unwrap_or(fallback).to_owned(),
            )
        }
        QuestionType::FillBlank => {
            let sample = pick(rng, pools::fill_blank(family))?;
            (
                sample.text.to_owned(),
                QuestionPayload::FillBlank {
                    answer: sample.answer.to_owned(),
                },
                sample.explanation.map_or_else(
                    || format!("الإجابة الصحيحة هي: {}", sample.answer),
                    str::to_owned,
                ),
            )
        }
    })
}

fn question_for<R: Rng + ?Sized>(
    rng: &mut R,
    subject: &Subject,
    quiz_id: i64,
    question_order: i64,
) -> AppResult<NewQuizQuestion> {
    let family = SubjectFamily::from_slug(&subject.slug);
    let question_type = *pick(rng, &QuestionType::ALL)?;
    let difficulty = *pick(rng, &Difficulty::ALL)?;
    let (question_text_ar, payload, explanation_ar) = sample_question(rng, family, question_type)?;

    Ok(NewQuizQuestion {
        quiz_id,
        question_text_ar,
        payload,
        points: *pick(rng, question_type.point_choices())?,
        question_order,
        explanation_ar,
        difficulty,
        tags: vec![subject.name_ar.clone(), question_type.tag_ar().to_owned()],
    })
}

/// Two to four quizzes per BAC subject of the configured stream
pub struct FakeQuizzesSeeder;

impl FakeQuizzesSeeder {
    async fn seed_subject(
        ctx: &mut SeedContext<'_>,
        subject: &Subject,
        created_by: Option<i64>,
    ) -> AppResult<(u64, u64)> {
        let db = ctx.db;
        let rng = &mut ctx.rng;
        let existing = db.count_quizzes_for_subject(subject.id).await?;
        let (mut quizzes, mut questions) = (0_u64, 0_u64);

        for offset in 1..=i64::from(between(rng, 2, 4)) {
            let quiz = quiz_for(rng, subject, existing + offset, created_by)?;
            let quiz_id = db.insert_quiz(&quiz).await?;
            quizzes += 1;

            let count = between(rng, 5, 10);
            for order in 1..=i64::from(count) {
                let question = question_for(rng, subject, quiz_id, order)?;
                db.insert_quiz_question(&question).await?;
                questions += 1;
            }
            db.sync_quiz_total_questions(quiz_id).await?;
            debug!(quiz_id, slug = %quiz.slug, count, "Inserted sample quiz");
        }
        Ok((quizzes, questions))
    }
}

#[async_trait]
impl Seeder for FakeQuizzesSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::FakeQuizzes
    }

    fn requires(&self) -> &'static [Table] {
        &[Table::Subjects, Table::AcademicStreams]
    }

    fn provides(&self) -> &'static [Table] {
        &[Table::Quizzes, Table::QuizQuestions]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        let config = ctx.config;
        let stream_slug = config.quiz_stream.as_str();
        let Some(stream) = db.get_stream_by_slug(stream_slug).await? else {
            return Ok(SeedOutcome::skipped(format!("stream '{stream_slug}' not found")));
        };
        let subjects = db
            .list_subjects_for_year(stream.academic_year_id, Some(stream.id))
            .await?;
        if subjects.is_empty() {
            return Ok(SeedOutcome::skipped(format!(
                "stream '{stream_slug}' has no subjects"
            )));
        }
        let created_by = db
            .find_first_user_with_roles(&[UserRole::Admin, UserRole::Teacher])
            .await?
            .map(|user| user.id);

        let (mut quizzes, mut questions) = (0_u64, 0_u64);
        for subject in &subjects {
            let (q, n) = Self::seed_subject(ctx, subject, created_by).await?;
            quizzes += q;
            questions += n;
        }

        info!(stream = stream_slug, quizzes, questions, "Sample quizzes seeded");
        Ok(SeedOutcome::completed(quizzes + questions))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn subject(slug: &str) -> Subject {
        Subject {
            id: 1,
            academic_stream_id: Some(1),
            academic_year_id: 12,
            name_ar: "الرياضيات".to_owned(),
            slug: slug.to_owned(),
            description_ar: None,
            coefficient: 5,
            icon: None,
            color: None,
            sort_order: 1,
        }
    }

    #[test]
    fn test_title_uses_family_pool_and_clamps_position() {
        let math = SubjectFamily::from_slug("sciences-exp-mathematics");
        assert_eq!(quiz_title(math, 1), "اختبار في الدوال");
        assert_eq!(quiz_title(math, 9), "اختبار شامل في الرياضيات");
        assert_eq!(quiz_title(None, 2), "تمرين 2");
        assert_eq!(quiz_title(None, 7), "اختبار شامل");
    }

    #[test]
    fn test_practice_quizzes_have_no_time_limit() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let subject = subject("sciences-exp-mathematics");
        for position in 1..40 {
            let quiz = quiz_for(&mut rng, &subject, position, None).expect("quiz");
            assert_eq!(quiz.time_limit_minutes.is_none(), quiz_type_is_practice(quiz.quiz_type));
            assert_eq!(quiz.show_correct_answers, quiz.quiz_type.reveals_answers());
            assert_eq!(quiz.tags.len(), 4);
        }
    }

    fn quiz_type_is_practice(quiz_type: QuizType) -> bool {
        quiz_type.time_limit_choices().is_empty()
    }

    #[test]
    fn test_generated_questions_validate() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for slug in ["sciences-exp-physics", "letters-philosophy-arabic", "unknown"] {
            let subject = subject(slug);
            for order in 1..30 {
                let question = question_for(&mut rng, &subject, 1, order).expect("question");
                question.payload.validate().expect("valid payload");
                assert!(question
                    .payload
                    .question_type()
                    .point_choices()
                    .contains(&question.points));
                assert!(!question.explanation_ar.is_empty());
            }
        }
    }
}
