// ABOUTME: Hand-written chapters and quizzes for the core BAC subjects of one stream
// ABOUTME: Quizzes come with simulated student attempts and per-student performance aggregates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Curated Bank
//!
//! Unlike the sample generators, the curated chapters and quizzes have fixed texts and
//! fixed slugs derived from the subject they belong to. A rerun deletes the previous
//! curated rows by slug first, so the bank never duplicates. Deleting a quiz cascades
//! to its questions, attempts and performance rows.
//!
//! Only the four stored question types appear in the bank.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use super::pools::SubjectFamily;
use super::random::{between, percent, pick, pick_distinct};
use super::{SeedContext, SeedOutcome, SeedStep, Seeder};
use crate::constants::fixtures;
use crate::database::{Database, Table};
use crate::errors::AppResult;
use crate::models::{
    AttemptResult, AttemptStatus, ContentKind, Difficulty, NewContent, NewContentChapter, NewQuiz,
    NewQuizAttempt, NewQuizPerformance, NewQuizQuestion, NewUser, QuestionPayload, QuizType,
    Subject, UserRole, WeakConcept,
};

/// Students whose attempts are simulated
const ATTEMPT_STUDENTS: u32 = 5;
/// Students created when the database has none
const SAMPLE_STUDENTS: u32 = 3;
/// Text submitted for a wrong fill-in-the-blank answer
const WRONG_BLANK_ANSWER: &str = "إجابة خاطئة";

struct CuratedItem {
    kind: ContentKind,
    slug: &'static str,
    title_ar: &'static str,
    description_ar: &'static str,
    body_ar: &'static str,
    difficulty: Difficulty,
    minutes: u32,
    tags: &'static [&'static str],
}

struct CuratedChapter {
    family: SubjectFamily,
    slug: &'static str,
    title_ar: &'static str,
    description_ar: &'static str,
    items: &'static [CuratedItem],
}

const CURATED_CHAPTERS: [CuratedChapter; 4] = [
    CuratedChapter {
        family: SubjectFamily::Mathematics,
        slug: "numerical-functions",
        title_ar: "الدوال العددية",
        description_ar: "دراسة الدوال العددية وخصائصها",
        items: &[
            CuratedItem {
                kind: ContentKind::Lesson,
                slug: "definition-of-numerical-function",
                title_ar: "تعريف الدالة العددية",
                description_ar: "درس تمهيدي حول مفهوم الدالة العددية ومجموعة التعريف",
                body_ar: "<h2>تعريف الدالة</h2><p>الدالة العددية هي علاقة تربط كل عنصر من مجموعة الانطلاق بعنصر وحيد من مجموعة الوصول.</p>",
                difficulty: Difficulty::Easy,
                minutes: 30,
                tags: &["الدوال", "التعريف", "الأساسيات"],
            },
            CuratedItem {
                kind: ContentKind::Lesson,
                slug: "operations-on-functions",
                title_ar: "العمليات على الدوال",
                description_ar: "الجمع والطرح والضرب والقسمة للدوال العددية",
                body_ar: "<h2>العمليات على الدوال</h2><p>يمكن إجراء عمليات حسابية على الدوال العددية مثل الجمع والطرح والضرب.</p>",
                difficulty: Difficulty::Medium,
                minutes: 45,
                tags: &["الدوال", "العمليات الحسابية"],
            },
            CuratedItem {
                kind: ContentKind::Summary,
                slug: "summary-numerical-functions",
                title_ar: "ملخص الدوال العددية",
                description_ar: "ملخص شامل لدروس الدوال العددية",
                body_ar: "<h2>ملخص</h2><ul><li>تعريف الدالة</li><li>مجموعة التعريف</li><li>العمليات</li></ul>",
                difficulty: Difficulty::Easy,
                minutes: 20,
                tags: &["ملخص", "الدوال", "مراجعة"],
            },
            CuratedItem {
                kind: ContentKind::Exercises,
                slug: "exercises-numerical-functions",
                title_ar: "سلسلة تمارين حول الدوال",
                description_ar: "تمارين محلولة حول الدوال العددية",
                body_ar: "<h2>تمارين</h2><p>تمرين 1: احسب مجموعة تعريف الدالة...</p>",
                difficulty: Difficulty::Medium,
                minutes: 60,
                tags: &["تمارين", "الدوال", "حلول"],
            },
        ],
    },
    CuratedChapter {
        family: SubjectFamily::Mathematics,
        slug: "sequences",
        title_ar: "المتتاليات العددية",
        description_ar: "دراسة المتتاليات العددية والنهايات",
        items: &[
            CuratedItem {
                kind: ContentKind::Lesson,
                slug: "definition-of-sequence",
                title_ar: "تعريف المتتالية العددية",
                description_ar: "المتتاليات العددية وطرق تعريفها",
                body_ar: "<h2>المتتالية العددية</h2><p>المتتالية هي دالة معرفة على مجموعة الأعداد الطبيعية.</p>",
                difficulty: Difficulty::Easy,
                minutes: 35,
                tags: &["المتتاليات", "التعريف"],
            },
            CuratedItem {
                kind: ContentKind::Lesson,
                slug: "limit-of-sequence",
                title_ar: "نهاية متتالية",
                description_ar: "دراسة نهاية المتتاليات العددية",
                body_ar: "<h2>نهاية المتتالية</h2><p>دراسة سلوك المتتالية عندما تؤول n إلى ما لا نهاية.</p>",
                difficulty: Difficulty::Hard,
                minutes: 50,
                tags: &["المتتاليات", "النهايات"],
            },
        ],
    },
    CuratedChapter {
        family: SubjectFamily::Physics,
        slug: "chemical-kinetics",
        title_ar: "المتابعة الزمنية لتحول كيميائي",
        description_ar: "دراسة سرعة التفاعلات الكيميائية",
        items: &[
            CuratedItem {
                kind: ContentKind::Lesson,
                slug: "reaction-rate",
                title_ar: "سرعة التفاعل الكيميائي",
                description_ar: "تعريف وحساب سرعة التفاعل الكيميائي",
                body_ar: "<h2>سرعة التفاعل</h2><p>السرعة اللحظية للتفاعل الكيميائي هي...</p>",
                difficulty: Difficulty::Medium,
                minutes: 40,
                tags: &["الفيزياء", "الكيمياء", "السرعة"],
            },
            CuratedItem {
                kind: ContentKind::Exercises,
                slug: "exercises-reaction-rate",
                title_ar: "تمارين حول سرعة التفاعل",
                description_ar: "تمارين محلولة ومقترحة",
                body_ar: "<h2>تمارين</h2><p>تمرين 1: احسب السرعة اللحظية...</p>",
                difficulty: Difficulty::Medium,
                minutes: 55,
                tags: &["تمارين", "الفيزياء"],
            },
        ],
    },
    CuratedChapter {
        family: SubjectFamily::Arabic,
        slug: "pre-islamic-literature",
        title_ar: "الأدب العربي في العصر الجاهلي",
        description_ar: "دراسة خصائص الأدب الجاهلي",
        items: &[
            CuratedItem {
                kind: ContentKind::Lesson,
                slug: "pre-islamic-poetry",
                title_ar: "الشعر الجاهلي",
                description_ar: "خصائص ومميزات الشعر الجاهلي",
                body_ar: "<h2>الشعر الجاهلي</h2><p>امتاز الشعر الجاهلي بالصدق في التعبير...</p>",
                difficulty: Difficulty::Easy,
                minutes: 35,
                tags: &["أدب", "شعر", "جاهلي"],
            },
            CuratedItem {
                kind: ContentKind::Summary,
                slug: "summary-pre-islamic-literature",
                title_ar: "ملخص الأدب الجاهلي",
                description_ar: "ملخص شامل للأدب الجاهلي",
                body_ar: "<h2>ملخص</h2><ul><li>الشعر</li><li>النثر</li><li>الخطابة</li></ul>",
                difficulty: Difficulty::Easy,
                minutes: 25,
                tags: &["ملخص", "أدب", "مراجعة"],
            },
        ],
    },
];

/// Answer key of a curated question
enum CuratedAnswer {
    Single {
        options: &'static [&'static str],
        correct: usize,
    },
    Multiple {
        options: &'static [&'static str],
        correct: &'static [usize],
    },
    TrueFalse(bool),
    Blank(&'static str),
}

impl CuratedAnswer {
    fn payload(&self) -> QuestionPayload {
        let owned = |options: &[&str]| options.iter().map(|o| (*o).to_owned()).collect::<Vec<_>>();
        match self {
            Self::Single { options, correct } => QuestionPayload::McqSingle {
                options: owned(options),
                answer: *correct,
            },
            Self::Multiple { options, correct } => QuestionPayload::McqMultiple {
                options: owned(options),
                answers: correct.to_vec(),
            },
            Self::TrueFalse(answer) => QuestionPayload::TrueFalse { answer: *answer },
            Self::Blank(answer) => QuestionPayload::FillBlank {
                answer: (*answer).to_owned(),
            },
        }
    }

    fn default_explanation(&self) -> String {
        match self {
            Self::Single { options, correct } => format!(
                "الإجابة الصحيحة هي: {}",
                options.get(*correct).copied().unwrap_or_default()
            ),
            Self::Multiple { options, correct } => {
                let texts: Vec<&str> = correct
                    .iter()
                    .filter_map(|index| options.get(*index).copied())
                    .collect();
                format!("الإجابات الصحيحة: {}", texts.join("، "))
            }
            Self::TrueFalse(true) => "العبارة صحيحة.".to_owned(),
            Self::TrueFalse(false) => "العبارة خاطئة.".to_owned(),
            Self::Blank(answer) => format!("الإجابة الصحيحة هي: {answer}"),
        }
    }
}

struct CuratedQuestion {
    text_ar: &'static str,
    answer: CuratedAnswer,
    points: u32,
    difficulty: Difficulty,
    explanation_ar: Option<&'static str>,
    tags: &'static [&'static str],
}

impl CuratedQuestion {
    fn to_new(&self, quiz_id: i64, question_order: i64) -> NewQuizQuestion {
        NewQuizQuestion {
            quiz_id,
            question_text_ar: self.text_ar.to_owned(),
            payload: self.answer.payload(),
            points: self.points,
            question_order,
            explanation_ar: self
                .explanation_ar
                .map_or_else(|| self.answer.default_explanation(), str::to_owned),
            difficulty: self.difficulty,
            tags: self.tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }
}

struct CuratedQuiz {
    slug: &'static str,
    title_ar: &'static str,
    description_ar: &'static str,
    family: SubjectFamily,
    quiz_type: QuizType,
    time_limit_minutes: Option<u32>,
    passing_score: u32,
    difficulty: Difficulty,
    estimated_duration_minutes: u32,
    shuffle: bool,
    is_premium: bool,
    tags: &'static [&'static str],
    questions: &'static [CuratedQuestion],
}

impl CuratedQuiz {
    fn to_new(&self, subject_id: i64, created_by: Option<i64>) -> NewQuiz {
        NewQuiz {
            subject_id,
            chapter_id: None,
            title_ar: self.title_ar.to_owned(),
            slug: self.slug.to_owned(),
            description_ar: self.description_ar.to_owned(),
            quiz_type: self.quiz_type,
            time_limit_minutes: self.time_limit_minutes,
            passing_score: self.passing_score,
            difficulty: self.difficulty,
            estimated_duration_minutes: self.estimated_duration_minutes,
            shuffle_questions: self.shuffle,
            shuffle_answers: self.shuffle,
            show_correct_answers: self.quiz_type.reveals_answers(),
            allow_review: self.quiz_type.reveals_answers(),
            tags: self.tags.iter().map(|t| (*t).to_owned()).collect(),
            is_published: true,
            is_premium: self.is_premium,
            created_by,
        }
    }
}

const CURATED_QUIZZES: [CuratedQuiz; 4] = [
    CuratedQuiz {
        slug: "comprehensive-quiz-all-types",
        title_ar: "اختبار شامل - جميع أنواع الأسئلة",
        description_ar: "اختبار تدريبي يحتوي على الأنواع الأربعة من الأسئلة",
        family: SubjectFamily::Mathematics,
        quiz_type: QuizType::Practice,
        time_limit_minutes: None,
        passing_score: 60,
        difficulty: Difficulty::Medium,
        estimated_duration_minutes: 20,
        shuffle: true,
        is_premium: false,
        tags: &["شامل", "تدريبي", "متنوع"],
        questions: &[
            CuratedQuestion {
                text_ar: "ما هي عاصمة مصر؟",
                answer: CuratedAnswer::Single {
                    options: &["الإسكندرية", "القاهرة", "الجيزة", "طنطا"],
                    correct: 1,
                },
                points: 5,
                difficulty: Difficulty::Easy,
                explanation_ar: Some("القاهرة هي عاصمة جمهورية مصر العربية."),
                tags: &["جغرافيا", "عواصم"],
            },
            CuratedQuestion {
                text_ar: "اختر الأرقام الزوجية من القائمة التالية:",
                answer: CuratedAnswer::Multiple {
                    options: &["2", "3", "4", "5", "6"],
                    correct: &[0, 2, 4],
                },
                points: 6,
                difficulty: Difficulty::Easy,
                explanation_ar: Some("الأرقام الزوجية هي التي تقبل القسمة على 2: (2، 4، 6)"),
                tags: &["رياضيات", "أرقام"],
            },
            CuratedQuestion {
                text_ar: "الشمس تشرق من الغرب",
                answer: CuratedAnswer::TrueFalse(false),
                points: 3,
                difficulty: Difficulty::Easy,
                explanation_ar: Some("الشمس تشرق من الشرق وتغرب في الغرب."),
                tags: &["علوم", "جغرافيا"],
            },
            CuratedQuestion {
                text_ar: "عاصمة فرنسا هي _____",
                answer: CuratedAnswer::Blank("باريس"),
                points: 4,
                difficulty: Difficulty::Easy,
                explanation_ar: Some("باريس هي عاصمة فرنسا وأكبر مدنها."),
                tags: &["جغرافيا", "عواصم"],
            },
            CuratedQuestion {
                text_ar: "ناتج 15 × 8 هو _____",
                answer: CuratedAnswer::Blank("120"),
                points: 5,
                difficulty: Difficulty::Easy,
                explanation_ar: Some("15 × 8 = 120"),
                tags: &["رياضيات", "ضرب"],
            },
        ],
    },
    CuratedQuiz {
        slug: "mathematics-timed-quiz",
        title_ar: "اختبار الرياضيات - موقوت",
        description_ar: "اختبار موقوت في الرياضيات الأساسية",
        family: SubjectFamily::Mathematics,
        quiz_type: QuizType::Timed,
        time_limit_minutes: Some(10),
        passing_score: 70,
        difficulty: Difficulty::Easy,
        estimated_duration_minutes: 10,
        shuffle: true,
        is_premium: false,
        tags: &["رياضيات", "حساب", "موقوت"],
        questions: &[
            CuratedQuestion {
                text_ar: "ما هو ناتج 25 + 17؟",
                answer: CuratedAnswer::Single {
                    options: &["40", "42", "43", "45"],
                    correct: 1,
                },
                points: 5,
                difficulty: Difficulty::Easy,
                explanation_ar: None,
                tags: &["جمع"],
            },
            CuratedQuestion {
                text_ar: "احسب: 100 - 37 = _____",
                answer: CuratedAnswer::Blank("63"),
                points: 5,
                difficulty: Difficulty::Easy,
                explanation_ar: None,
                tags: &["طرح"],
            },
            CuratedQuestion {
                text_ar: "5 × 5 = 25",
                answer: CuratedAnswer::TrueFalse(true),
                points: 3,
                difficulty: Difficulty::Easy,
                explanation_ar: None,
                tags: &["ضرب"],
            },
            CuratedQuestion {
                text_ar: "اختر الأعداد الأولية من القائمة:",
                answer: CuratedAnswer::Multiple {
                    options: &["2", "4", "5", "6", "7"],
                    correct: &[0, 2, 4],
                },
                points: 7,
                difficulty: Difficulty::Medium,
                explanation_ar: Some("الأعداد الأولية هي: 2، 5، 7"),
                tags: &["أعداد أولية"],
            },
            CuratedQuestion {
                text_ar: "مربع العدد 9 يساوي _____",
                answer: CuratedAnswer::Blank("81"),
                points: 5,
                difficulty: Difficulty::Easy,
                explanation_ar: None,
                tags: &["مربعات"],
            },
        ],
    },
    CuratedQuiz {
        slug: "science-final-exam",
        title_ar: "اختبار العلوم النهائي",
        description_ar: "اختبار نهائي في العلوم العامة - لا يمكن المراجعة",
        family: SubjectFamily::Physics,
        quiz_type: QuizType::Exam,
        time_limit_minutes: Some(30),
        passing_score: 75,
        difficulty: Difficulty::Hard,
        estimated_duration_minutes: 30,
        shuffle: true,
        is_premium: true,
        tags: &["علوم", "اختبار نهائي", "صعب"],
        questions: &[
            CuratedQuestion {
                text_ar: "ما هو العنصر الأكثر وفرة في الكون؟",
                answer: CuratedAnswer::Single {
                    options: &["الأكسجين", "الهيدروجين", "الكربون", "النيتروجين"],
                    correct: 1,
                },
                points: 5,
                difficulty: Difficulty::Medium,
                explanation_ar: Some("الهيدروجين هو العنصر الأكثر وفرة في الكون."),
                tags: &["كيمياء", "عناصر"],
            },
            CuratedQuestion {
                text_ar: "اختر مصادر الطاقة المتجددة:",
                answer: CuratedAnswer::Multiple {
                    options: &[
                        "الطاقة الشمسية",
                        "النفط",
                        "طاقة الرياح",
                        "الفحم",
                        "الطاقة المائية",
                    ],
                    correct: &[0, 2, 4],
                },
                points: 7,
                difficulty: Difficulty::Medium,
                explanation_ar: Some("مصادر الطاقة المتجددة هي: الشمسية، الرياح، المائية"),
                tags: &["طاقة", "بيئة"],
            },
            CuratedQuestion {
                text_ar: "الماء يتكون من ذرتي هيدروجين وذرة أكسجين",
                answer: CuratedAnswer::TrueFalse(true),
                points: 4,
                difficulty: Difficulty::Easy,
                explanation_ar: Some("صيغة الماء الكيميائية هي H₂O"),
                tags: &["كيمياء", "جزيئات"],
            },
            CuratedQuestion {
                text_ar: "عدد الكروموسومات في الخلية البشرية هو _____",
                answer: CuratedAnswer::Blank("46"),
                points: 5,
                difficulty: Difficulty::Medium,
                explanation_ar: Some("يحتوي جسم الإنسان على 46 كروموسوم (23 زوجاً)"),
                tags: &["أحياء", "وراثة"],
            },
        ],
    },
    CuratedQuiz {
        slug: "quick-easy-quiz",
        title_ar: "كويز سريع - أسئلة سهلة",
        description_ar: "اختبار سريع للمراجعة - 5 دقائق",
        family: SubjectFamily::Mathematics,
        quiz_type: QuizType::Practice,
        time_limit_minutes: None,
        passing_score: 50,
        difficulty: Difficulty::Easy,
        estimated_duration_minutes: 5,
        shuffle: false,
        is_premium: false,
        tags: &["سريع", "سهل", "مراجعة"],
        questions: &[
            CuratedQuestion {
                text_ar: "السماء زرقاء",
                answer: CuratedAnswer::TrueFalse(true),
                points: 2,
                difficulty: Difficulty::Easy,
                explanation_ar: None,
                tags: &[],
            },
            CuratedQuestion {
                text_ar: "كم عدد أيام الأسبوع؟",
                answer: CuratedAnswer::Single {
                    options: &["5", "6", "7", "8"],
                    correct: 2,
                },
                points: 2,
                difficulty: Difficulty::Easy,
                explanation_ar: None,
                tags: &[],
            },
            CuratedQuestion {
                text_ar: "أكمل: 1، 2، 3، _____",
                answer: CuratedAnswer::Blank("4"),
                points: 3,
                difficulty: Difficulty::Easy,
                explanation_ar: None,
                tags: &[],
            },
        ],
    },
];

/// Subjects of the stream named `stream_slug`, `None` when the stream is missing
async fn stream_subjects(db: &Database, stream_slug: &str) -> AppResult<Option<Vec<Subject>>> {
    let Some(stream) = db.get_stream_by_slug(stream_slug).await? else {
        return Ok(None);
    };
    let subjects = db
        .list_subjects_for_year(stream.academic_year_id, Some(stream.id))
        .await?;
    Ok(Some(subjects))
}

fn family_subject(subjects: &[Subject], family: SubjectFamily) -> Option<&Subject> {
    subjects
        .iter()
        .find(|s| SubjectFamily::from_slug(&s.slug) == Some(family))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Chance in percent that a simulated student answers correctly
const fn correct_chance(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 85,
        Difficulty::Medium => 65,
        Difficulty::Hard => 45,
    }
}

fn correct_response(payload: &QuestionPayload) -> Value {
    match payload {
        QuestionPayload::McqSingle { answer, .. } => json!(answer),
        QuestionPayload::McqMultiple { answers, .. } => json!(answers),
        QuestionPayload::TrueFalse { answer } => json!(answer),
        QuestionPayload::FillBlank { answer } => json!(answer),
    }
}

fn wrong_response<R: Rng + ?Sized>(rng: &mut R, payload: &QuestionPayload) -> AppResult<Value> {
    Ok(match payload {
        QuestionPayload::McqSingle { options, answer } => {
            let wrong: Vec<usize> = (0..options.len()).filter(|i| i != answer).collect();
            let index = *pick(rng, &wrong)?;
            json!(index)
        }
        QuestionPayload::McqMultiple { options, answers } => {
            let wrong: Vec<usize> = (0..options.len())
                .filter(|i| !answers.contains(i))
                .collect();
            if wrong.is_empty() {
                json!([])
            } else {
                let index = *pick(rng, &wrong)?;
                json!([index])
            }
        }
        QuestionPayload::TrueFalse { answer } => json!(!answer),
        QuestionPayload::FillBlank { .. } => json!(WRONG_BLANK_ANSWER),
    })
}

/// Stored question as the attempt simulator sees it
struct AskedQuestion {
    id: i64,
    payload: QuestionPayload,
    points: u32,
    difficulty: Difficulty,
    tags: Vec<String>,
}

/// Inserted quiz with everything needed to simulate attempts on it
struct SeededQuiz {
    id: i64,
    subject_id: i64,
    passing_score: u32,
    time_limit_minutes: Option<u32>,
    tags: &'static [&'static str],
    questions: Vec<AskedQuestion>,
}

fn simulate_attempt<R: Rng + ?Sized>(
    rng: &mut R,
    quiz: &SeededQuiz,
    user_id: i64,
    now: DateTime<Utc>,
) -> AppResult<NewQuizAttempt> {
    let status = match between(rng, 1, 100) {
        1..=80 => AttemptStatus::Completed,
        81..=90 => AttemptStatus::InProgress,
        _ => AttemptStatus::Abandoned,
    };
    let seed = rng.gen_range(1..=999_999_999);
    let started_at = now
        - Duration::days(i64::from(between(rng, 0, 30)))
        - Duration::hours(i64::from(between(rng, 0, 23)))
        - Duration::minutes(i64::from(between(rng, 0, 59)));

    let mut answers = Map::new();
    let (mut correct, mut incorrect, mut skipped, mut points) = (0_u32, 0_u32, 0_u32, 0_u32);
    for question in &quiz.questions {
        if percent(rng, 10) {
            skipped += 1;
            continue;
        }
        let answered_at = started_at + Duration::minutes(i64::from(between(rng, 1, 15)));
        let (answer, time_spent) = if percent(rng, correct_chance(question.difficulty)) {
            correct += 1;
            points += question.points;
            (correct_response(&question.payload), between(rng, 10, 120))
        } else {
            incorrect += 1;
            (wrong_response(rng, &question.payload)?, between(rng, 10, 180))
        };
        answers.insert(
            question.id.to_string(),
            json!({
                "answer": answer,
                "time_spent": time_spent,
                "answered_at": answered_at.to_rfc3339(),
            }),
        );
    }

    let max_score: u32 = quiz.questions.iter().map(|q| q.points).sum();
    let score_percentage = if max_score > 0 {
        round2(f64::from(points) / f64::from(max_score) * 100.0)
    } else {
        0.0
    };
    let result = (status == AttemptStatus::Completed).then(|| {
        let limit_seconds = quiz.time_limit_minutes.unwrap_or(30) * 60;
        let time_spent_seconds = between(rng, 60, limit_seconds);
        AttemptResult {
            completed_at: started_at + Duration::seconds(i64::from(time_spent_seconds)),
            time_spent_seconds,
            correct_answers: correct,
            incorrect_answers: incorrect,
            skipped_answers: skipped,
            score_percentage,
            total_points: points,
            passed: score_percentage >= f64::from(quiz.passing_score),
        }
    });

    Ok(NewQuizAttempt {
        quiz_id: quiz.id,
        user_id,
        started_at,
        status,
        total_questions: quiz.questions.len() as u32,
        max_score,
        result,
        answers: Value::Object(answers),
        seed,
    })
}

/// One to three question tags, falling back to the quiz tags when questions carry none
fn weak_concepts<R: Rng + ?Sized>(
    rng: &mut R,
    quiz: &SeededQuiz,
    now: DateTime<Utc>,
) -> BTreeMap<String, WeakConcept> {
    let mut tags: Vec<String> = Vec::new();
    for tag in quiz.questions.iter().flat_map(|q| q.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    if tags.is_empty() {
        tags = quiz.tags.iter().map(|t| (*t).to_owned()).collect();
    }

    let count = between(rng, 1, 3) as usize;
    let selected: Vec<String> = pick_distinct(rng, &tags, count)
        .into_iter()
        .cloned()
        .collect();
    selected
        .into_iter()
        .map(|tag| {
            let concept = WeakConcept {
                error_rate: f64::from(between(rng, 50, 80)) / 100.0,
                last_updated: now,
            };
            (tag, concept)
        })
        .collect()
}

/// Aggregate of completed attempts, `None` when there are none
fn performance<R: Rng + ?Sized>(
    rng: &mut R,
    quiz: &SeededQuiz,
    user_id: i64,
    completed: &[AttemptResult],
    now: DateTime<Utc>,
) -> Option<NewQuizPerformance> {
    if completed.is_empty() {
        return None;
    }
    let total_attempts = completed.len() as u32;
    let best_score = completed
        .iter()
        .map(|r| r.score_percentage)
        .fold(0.0, f64::max);
    let average_score = round2(
        completed.iter().map(|r| r.score_percentage).sum::<f64>() / f64::from(total_attempts),
    );
    let seconds: u32 = completed.iter().map(|r| r.time_spent_seconds).sum();

    Some(NewQuizPerformance {
        user_id,
        quiz_id: quiz.id,
        subject_id: quiz.subject_id,
        total_attempts,
        best_score,
        average_score,
        total_time_spent_minutes: round2(f64::from(seconds) / 60.0),
        last_attempt_at: completed.iter().map(|r| r.completed_at).max(),
        weak_concepts: weak_concepts(rng, quiz, now),
    })
}

/// Fixed chapters on the mathematics, physics and Arabic subjects of the quiz stream
pub struct CuratedContentSeeder;

#[async_trait]
impl Seeder for CuratedContentSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::CuratedContent
    }

    fn requires(&self) -> &'static [Table] {
        &[Table::Subjects, Table::AcademicStreams, Table::ContentTypes]
    }

    fn provides(&self) -> &'static [Table] {
        &[Table::ContentChapters, Table::Contents]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        let config = ctx.config;
        let stream_slug = config.quiz_stream.as_str();
        let Some(subjects) = stream_subjects(db, stream_slug).await? else {
            return Ok(SeedOutcome::skipped(format!("stream '{stream_slug}' not found")));
        };
        if family_subject(&subjects, SubjectFamily::Mathematics).is_none() {
            return Ok(SeedOutcome::skipped(format!(
                "stream '{stream_slug}' has no mathematics subject"
            )));
        }

        let mut kinds = Vec::new();
        for kind in [ContentKind::Lesson, ContentKind::Summary, ContentKind::Exercises] {
            let Some(id) = db.get_content_type_id(kind.slug()).await? else {
                return Ok(SeedOutcome::skipped(format!(
                    "content type '{}' not found",
                    kind.slug()
                )));
            };
            kinds.push((kind, id));
        }

        let mut placed = Vec::new();
        for chapter in &CURATED_CHAPTERS {
            match family_subject(&subjects, chapter.family) {
                Some(subject) => placed.push((chapter, subject)),
                None => warn!(
                    stream = stream_slug,
                    chapter = chapter.slug,
                    "Stream lacks the chapter's subject, skipping it"
                ),
            }
        }
        // Remove every curated chapter first so renumbering sees only the other chapters
        for (chapter, subject) in &placed {
            let slug = format!("{}-{}", subject.slug, chapter.slug);
            db.delete_content_chapter_by_slug(&slug).await?;
        }

        let (mut chapters, mut items) = (0_u64, 0_u64);
        for (chapter, subject) in &placed {
            let sort_order = db.count_chapters_for_subject(subject.id).await? + 1;
            let chapter_id = db
                .insert_content_chapter(&NewContentChapter {
                    subject_id: subject.id,
                    title_ar: chapter.title_ar.to_owned(),
                    slug: format!("{}-{}", subject.slug, chapter.slug),
                    description_ar: chapter.description_ar.to_owned(),
                    sort_order,
                })
                .await?;
            chapters += 1;

            for (index, item) in chapter.items.iter().enumerate() {
                let Some(&(_, content_type_id)) = kinds.iter().find(|(k, _)| *k == item.kind)
                else {
                    continue;
                };
                db.insert_content(&NewContent {
                    subject_id: subject.id,
                    chapter_id,
                    content_type_id,
                    title_ar: item.title_ar.to_owned(),
                    slug: format!("{}-{}", subject.slug, item.slug),
                    description_ar: item.description_ar.to_owned(),
                    body_ar: item.body_ar.to_owned(),
                    difficulty: item.difficulty,
                    estimated_duration_minutes: item.minutes,
                    sort_order: index as i64 + 1,
                    is_published: true,
                    published_at: Some(ctx.now),
                    is_premium: false,
                    tags: item.tags.iter().map(|t| (*t).to_owned()).collect(),
                    views_count: 0,
                    downloads_count: 0,
                })
                .await?;
                items += 1;
            }
            debug!(subject = %subject.slug, chapter = chapter.slug, "Inserted curated chapter");
        }

        info!(stream = stream_slug, chapters, items, "Curated content seeded");
        Ok(SeedOutcome::completed(chapters + items))
    }
}

/// Fixed quizzes with simulated attempts and performance aggregates
pub struct CuratedQuizzesSeeder;

#[derive(Default)]
struct QuizTally {
    quizzes: u64,
    questions: u64,
    users: u64,
    attempts: u64,
    performances: u64,
}

impl CuratedQuizzesSeeder {
    /// Existing students, or a few fresh fixture students when there are none
    async fn students(ctx: &mut SeedContext<'_>, tally: &mut QuizTally) -> AppResult<Vec<i64>> {
        let db = ctx.db;
        let existing = db
            .list_users_with_role(UserRole::Student, ATTEMPT_STUDENTS)
            .await?;
        if !existing.is_empty() {
            return Ok(existing.into_iter().map(|user| user.id).collect());
        }

        let mut students = Vec::new();
        for index in 1..=SAMPLE_STUDENTS {
            let email = fixtures::test_student_email(index);
            if let Some(user) = db.get_user_by_email(&email).await? {
                students.push(user.id);
                continue;
            }
            let password_hash = ctx.fixture_password_hash()?;
            let id = db
                .create_user(&NewUser {
                    name: format!("طالب اختباري {index}"),
                    email,
                    password_hash,
                    role: UserRole::Student,
                    is_active: true,
                    email_verified_at: Some(ctx.now),
                    created_at: ctx.now,
                })
                .await?;
            tally.users += 1;
            students.push(id);
        }
        info!(count = students.len(), "Created sample students for quiz attempts");
        Ok(students)
    }

    async fn insert_quizzes(
        db: &Database,
        subjects: &[Subject],
        primary: &Subject,
        created_by: Option<i64>,
        tally: &mut QuizTally,
    ) -> AppResult<Vec<SeededQuiz>> {
        let mut seeded = Vec::with_capacity(CURATED_QUIZZES.len());
        for quiz in &CURATED_QUIZZES {
            let subject = family_subject(subjects, quiz.family).unwrap_or(primary);
            db.delete_quiz_by_slug(quiz.slug).await?;
            let quiz_id = db.insert_quiz(&quiz.to_new(subject.id, created_by)).await?;
            tally.quizzes += 1;

            let mut questions = Vec::with_capacity(quiz.questions.len());
            for (index, question) in quiz.questions.iter().enumerate() {
                let new = question.to_new(quiz_id, index as i64 + 1);
                let id = db.insert_quiz_question(&new).await?;
                tally.questions += 1;
                questions.push(AskedQuestion {
                    id,
                    payload: new.payload,
                    points: new.points,
                    difficulty: new.difficulty,
                    tags: new.tags,
                });
            }
            db.sync_quiz_total_questions(quiz_id).await?;
            debug!(quiz_id, slug = quiz.slug, subject = %subject.slug, "Inserted curated quiz");

            seeded.push(SeededQuiz {
                id: quiz_id,
                subject_id: subject.id,
                passing_score: quiz.passing_score,
                time_limit_minutes: quiz.time_limit_minutes,
                tags: quiz.tags,
                questions,
            });
        }
        Ok(seeded)
    }
}

#[async_trait]
impl Seeder for CuratedQuizzesSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::CuratedQuizzes
    }

    fn requires(&self) -> &'static [Table] {
        &[Table::Subjects, Table::AcademicStreams]
    }

    fn provides(&self) -> &'static [Table] {
        &[
            Table::Quizzes,
            Table::QuizQuestions,
            Table::QuizAttempts,
            Table::UserQuizPerformances,
        ]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        let now = ctx.now;
        let config = ctx.config;
        let stream_slug = config.quiz_stream.as_str();
        let Some(subjects) = stream_subjects(db, stream_slug).await? else {
            return Ok(SeedOutcome::skipped(format!("stream '{stream_slug}' not found")));
        };
        let Some(primary) =
            family_subject(&subjects, SubjectFamily::Mathematics).or_else(|| subjects.first())
        else {
            return Ok(SeedOutcome::skipped(format!(
                "stream '{stream_slug}' has no subjects"
            )));
        };
        let created_by = db
            .find_first_user_with_roles(&[UserRole::Admin, UserRole::Teacher])
            .await?
            .map(|user| user.id);

        let mut tally = QuizTally::default();
        let quizzes = Self::insert_quizzes(db, &subjects, primary, created_by, &mut tally).await?;
        let students = Self::students(ctx, &mut tally).await?;

        let rng = &mut ctx.rng;
        for user_id in &students {
            for quiz in &quizzes {
                let mut completed = Vec::new();
                for _ in 0..between(rng, 1, 3) {
                    let attempt = simulate_attempt(rng, quiz, *user_id, now)?;
                    db.insert_quiz_attempt(&attempt).await?;
                    tally.attempts += 1;
                    if let Some(result) = attempt.result {
                        completed.push(result);
                    }
                }
                if let Some(aggregate) = performance(rng, quiz, *user_id, &completed, now) {
                    db.upsert_quiz_performance(&aggregate).await?;
                    tally.performances += 1;
                }
            }
        }
        for quiz in &quizzes {
            db.sync_quiz_attempt_stats(quiz.id).await?;
        }

        info!(
            stream = stream_slug,
            quizzes = tally.quizzes,
            questions = tally.questions,
            attempts = tally.attempts,
            performances = tally.performances,
            "Curated quizzes seeded"
        );
        Ok(SeedOutcome::completed(
            tally.quizzes + tally.questions + tally.users + tally.attempts + tally.performances,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn seeded_quiz(definition: &CuratedQuiz) -> SeededQuiz {
        SeededQuiz {
            id: 1,
            subject_id: 7,
            passing_score: definition.passing_score,
            time_limit_minutes: definition.time_limit_minutes,
            tags: definition.tags,
            questions: definition
                .questions
                .iter()
                .enumerate()
                .map(|(index, question)| {
                    let new = question.to_new(1, index as i64 + 1);
                    AskedQuestion {
                        id: index as i64 + 100,
                        payload: new.payload,
                        points: new.points,
                        difficulty: new.difficulty,
                        tags: new.tags,
                    }
                })
                .collect(),
        }
    }

    #[test]
    fn test_curated_questions_validate_and_explain() {
        for quiz in &CURATED_QUIZZES {
            assert!(!quiz.questions.is_empty(), "{}", quiz.slug);
            assert_eq!(quiz.time_limit_minutes.is_none(), quiz.quiz_type == QuizType::Practice);
            for (index, question) in quiz.questions.iter().enumerate() {
                let new = question.to_new(1, index as i64 + 1);
                new.payload.validate().expect("valid curated payload");
                assert!(!new.explanation_ar.is_empty());
            }
        }
    }

    #[test]
    fn test_wrong_responses_never_match_the_key() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for quiz in &CURATED_QUIZZES {
            for question in quiz.questions {
                let payload = question.answer.payload();
                for _ in 0..20 {
                    let wrong = wrong_response(&mut rng, &payload).expect("wrong answer");
                    assert_ne!(wrong, correct_response(&payload), "{}", question.text_ar);
                }
            }
        }
    }

    #[test]
    fn test_simulated_attempts_are_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let now = Utc::now();
        for definition in &CURATED_QUIZZES {
            let quiz = seeded_quiz(definition);
            let max: u32 = quiz.questions.iter().map(|q| q.points).sum();
            for _ in 0..50 {
                let attempt = simulate_attempt(&mut rng, &quiz, 3, now).expect("attempt");
                attempt.validate().expect("consistent attempt");
                assert_eq!(attempt.max_score, max);
                assert!(attempt.started_at <= now);
                assert!(now - attempt.started_at <= Duration::days(31));
                if let Some(result) = &attempt.result {
                    assert!(result.time_spent_seconds >= 60);
                    let limit = definition.time_limit_minutes.unwrap_or(30) * 60;
                    assert!(result.time_spent_seconds <= limit);
                    assert_eq!(
                        result.passed,
                        result.score_percentage >= f64::from(definition.passing_score)
                    );
                    let answered = attempt.answers.as_object().map_or(0, Map::len);
                    let expected = result.correct_answers + result.incorrect_answers;
                    assert_eq!(answered as u32, expected);
                }
            }
        }
    }

    #[test]
    fn test_performance_aggregates_completed_attempts() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let now = Utc::now();
        let quiz = seeded_quiz(&CURATED_QUIZZES[3]);
        assert!(performance(&mut rng, &quiz, 3, &[], now).is_none());

        let result = |score: f64, seconds: u32, hours_ago: i64| AttemptResult {
            completed_at: now - Duration::hours(hours_ago),
            time_spent_seconds: seconds,
            correct_answers: 2,
            incorrect_answers: 1,
            skipped_answers: 0,
            score_percentage: score,
            total_points: 4,
            passed: score >= 50.0,
        };
        let completed = [result(40.0, 90, 5), result(85.0, 150, 1)];
        let aggregate = performance(&mut rng, &quiz, 3, &completed, now).expect("aggregate");

        assert_eq!(aggregate.total_attempts, 2);
        assert!((aggregate.best_score - 85.0).abs() < f64::EPSILON);
        assert!((aggregate.average_score - 62.5).abs() < f64::EPSILON);
        assert!((aggregate.total_time_spent_minutes - 4.0).abs() < f64::EPSILON);
        assert_eq!(aggregate.last_attempt_at, Some(now - Duration::hours(1)));
        assert!((1..=3).contains(&aggregate.weak_concepts.len()));
        for (tag, concept) in &aggregate.weak_concepts {
            assert!(CURATED_QUIZZES[3].tags.contains(&tag.as_str()));
            assert!((0.5..=0.8).contains(&concept.error_rate));
        }
    }
}
