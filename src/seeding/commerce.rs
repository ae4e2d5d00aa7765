// ABOUTME: Paid-course fixtures: students, courses with modules and lessons, packages,
// ABOUTME: subscription codes, payment receipts and the subscriptions they activate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::pools::{COURSE_LESSON_TOPICS, COURSE_MODULE_TOPICS};
use super::random::{alphanumeric_code, between, days_ago, percent, pick, pick_distinct};
use super::{SeedContext, SeedOutcome, SeedStep, Seeder};
use crate::constants::fixtures;
use crate::database::{Database, Table, UserRecord};
use crate::errors::AppResult;
use crate::models::{
    ActivationSource, CodeTarget, CourseLevel, NewCourse, NewCourseLesson, NewPaymentReceipt,
    NewSubscriptionCode, NewUser, NewUserSubscription, PaymentMethod, ReceiptStatus, Subject,
    UserRole,
};

/// Fixture course definition
struct CourseSpec {
    title_ar: &'static str,
    slug: &'static str,
    price_dzd: u32,
    level: CourseLevel,
    color: &'static str,
}

const fn course(
    title_ar: &'static str,
    slug: &'static str,
    price_dzd: u32,
    level: CourseLevel,
    color: &'static str,
) -> CourseSpec {
    CourseSpec {
        title_ar,
        slug,
        price_dzd,
        level,
        color,
    }
}

const COURSES: [CourseSpec; 15] = [
    course(
        "دورة الرياضيات المتقدمة",
        "dor-advanced-mathematics",
        15_000,
        CourseLevel::Advanced,
        "blue",
    ),
    course(
        "دورة الفيزياء الشاملة",
        "dor-complete-physics",
        12_000,
        CourseLevel::Intermediate,
        "purple",
    ),
    course(
        "دورة الكيمياء العضوية",
        "dor-organic-chemistry",
        10_000,
        CourseLevel::Intermediate,
        "green",
    ),
    course("دورة اللغة العربية", "dor-arabic-language", 8_000, CourseLevel::Beginner, "red"),
    course("دورة اللغة الإنجليزية", "dor-english-language", 9_000, CourseLevel::Beginner, "yellow"),
    course("دورة علوم الطبيعة", "dor-natural-sciences", 11_000, CourseLevel::Intermediate, "cyan"),
    course(
        "دورة التاريخ والجغرافيا",
        "dor-history-geography",
        7_000,
        CourseLevel::Beginner,
        "orange",
    ),
    course(
        "دورة الفلسفة المعمقة",
        "dor-philosophy-in-depth",
        13_000,
        CourseLevel::Advanced,
        "indigo",
    ),
    course("دورة الإعلام الآلي", "dor-computer-science", 0, CourseLevel::Beginner, "pink"),
    course(
        "دورة المحاسبة المالية",
        "dor-financial-accounting",
        14_000,
        CourseLevel::Advanced,
        "teal",
    ),
    course("دورة القانون الجزائري", "dor-algerian-law", 12_500, CourseLevel::Intermediate, "lime"),
    course(
        "دورة الاقتصاد والتسيير",
        "dor-economics-management",
        0,
        CourseLevel::Intermediate,
        "amber",
    ),
    course(
        "دورة الأحياء الجزيئية",
        "dor-molecular-biology",
        16_000,
        CourseLevel::Advanced,
        "emerald",
    ),
    course("دورة الهندسة المدنية", "dor-civil-engineering", 18_000, CourseLevel::Advanced, "slate"),
    course("دورة الأدب العربي", "dor-arabic-literature", 9_500, CourseLevel::Intermediate, "rose"),
];

/// Courses before this index are published, the rest stay drafts
const PUBLISHED_COURSES: usize = 12;

/// (name, description, price, duration in days, courses included)
const PACKAGES: [(&str, &str, u32, u32, usize); 6] = [
    ("الباقة الأساسية", "باقة تحتوي على 3 دورات أساسية للمبتدئين", 25_000, 90, 3),
    ("الباقة المتوسطة", "باقة شاملة تحتوي على 5 دورات متنوعة", 40_000, 120, 5),
    ("الباقة الذهبية", "باقة متميزة تحتوي على 7 دورات مع مزايا إضافية", 55_000, 180, 7),
    (
        "باقة البكالوريا",
        "باقة خاصة بطلاب البكالوريا تحتوي على جميع المواد الأساسية",
        70_000,
        270,
        10,
    ),
    ("الباقة الشاملة", "الوصول الكامل لجميع الدورات المتاحة", 100_000, 365, 12),
    ("باقة التجريبية", "باقة تجريبية لمدة شهر مع دورتين", 15_000, 30, 2),
];

const COURSE_DESCRIPTION: &str = "هذه دورة تعليمية شاملة ومتكاملة تغطي جميع جوانب المادة بشكل عميق ومفصل. تتضمن الدورة شرح نظري وتطبيقات عملية متنوعة لضمان استيعاب الطالب للمفاهيم الأساسية والمتقدمة.";
const MODULE_DESCRIPTION: &str = "وصف تفصيلي للوحدة الدراسية";
const LESSON_DESCRIPTION: &str = "شرح مفصل للدرس مع أمثلة توضيحية";
const LESSON_VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
const LESSON_PDF_PATH: &str = "courses/pdfs/sample.pdf";
const REVIEW_TEXT: &str = "دورة ممتازة وشرح واضح ومفيد جداً. أنصح بها بشدة لكل الطلاب.";
const REJECTION_NOTE: &str = "الإيصال غير واضح، يرجى رفع صورة أوضح";
const SUBSCRIPTION_CODE_LENGTH: usize = 8;
const SUBJECTS_FOR_COURSES: usize = 10;
const DEFAULT_COURSE_DAYS: u32 = 60;

/// Course row kept for the receipt and subscription passes
struct SeededCourse {
    id: i64,
    price_dzd: u32,
    duration_days: u32,
}

/// Running row counts for the completion log
#[derive(Default)]
struct CommerceTally {
    users: u64,
    courses: u64,
    modules: u64,
    lessons: u64,
    reviews: u64,
    packages: u64,
    codes: u64,
    receipts: u64,
    subscriptions: u64,
}

impl CommerceTally {
    const fn rows(&self) -> u64 {
        self.users
            + self.courses
            + self.modules
            + self.lessons
            + self.reviews
            + self.packages
            + self.codes
            + self.receipts
            + self.subscriptions
    }
}

/// Test data for the paid course system
pub struct PaidCoursesSeeder;

impl PaidCoursesSeeder {
    async fn clear_previous(db: &Database) -> AppResult<()> {
        let courses = db.delete_courses_matching(fixtures::COURSE_SLUG_PATTERN).await?;
        let mut packages = 0;
        for (name, ..) in &PACKAGES {
            packages += db.delete_package_named(name).await?;
        }
        if courses + packages > 0 {
            info!(courses, packages, "Removed previous commerce fixtures");
        }
        Ok(())
    }

    async fn ensure_students(
        ctx: &mut SeedContext<'_>,
        tally: &mut CommerceTally,
    ) -> AppResult<Vec<UserRecord>> {
        let db = ctx.db;
        let total = ctx.config.test_students;
        let mut students = Vec::with_capacity(total as usize);
        for index in 1..=total {
            let email = fixtures::test_student_email(index);
            if let Some(existing) = db.get_user_by_email(&email).await? {
                students.push(existing);
                continue;
            }
            let password_hash = ctx.fixture_password_hash()?;
            let user = NewUser {
                name: format!("طالب رقم {index}"),
                email,
                password_hash,
                role: UserRole::Student,
                is_active: true,
                email_verified_at: None,
                created_at: ctx.now,
            };
            let id = db.create_user(&user).await?;
            tally.users += 1;
            students.push(UserRecord {
                id,
                name: user.name,
                email: user.email,
                role: user.role,
                is_active: user.is_active,
            });
        }
        Ok(students)
    }

    async fn ensure_admin(ctx: &mut SeedContext<'_>, tally: &mut CommerceTally) -> AppResult<i64> {
        let db = ctx.db;
        if let Some(admin) = db
            .find_first_user_with_roles(&[UserRole::Admin, UserRole::Teacher])
            .await?
        {
            return Ok(admin.id);
        }
        if let Some(existing) = db.get_user_by_email(fixtures::ADMIN_EMAIL).await? {
            return Ok(existing.id);
        }
        let password_hash = ctx.fixture_password_hash()?;
        let id = db
            .create_user(&NewUser {
                name: fixtures::ADMIN_NAME.to_owned(),
                email: fixtures::ADMIN_EMAIL.to_owned(),
                password_hash,
                role: UserRole::Admin,
                is_active: true,
                email_verified_at: None,
                created_at: ctx.now,
            })
            .await?;
        tally.users += 1;
        info!(email = fixtures::ADMIN_EMAIL, "Created fixture administrator");
        Ok(id)
    }

    async fn seed_courses(
        ctx: &mut SeedContext<'_>,
        subjects: &[Subject],
        students: &[UserRecord],
        admin_id: i64,
        tally: &mut CommerceTally,
    ) -> AppResult<Vec<SeededCourse>> {
        let db = ctx.db;
        let now = ctx.now;
        let rng = &mut ctx.rng;
        let mut courses = Vec::with_capacity(COURSES.len());

        for (index, spec) in COURSES.iter().enumerate() {
            let is_published = index < PUBLISHED_COURSES;
            let duration_days = between(rng, 30, 90);
            let course_id = db
                .insert_course(&NewCourse {
                    subject_id: subjects.choose(rng).map(|s| s.id),
                    title_ar: spec.title_ar.to_owned(),
                    slug: spec.slug.to_owned(),
                    description_ar: COURSE_DESCRIPTION.to_owned(),
                    thumbnail_url: format!("courses/thumbnails/course_{}.jpg", index + 1),
                    price_dzd: spec.price_dzd,
                    duration_days,
                    level: spec.level,
                    color: spec.color.to_owned(),
                    is_published,
                    published_at: is_published.then(|| days_ago(rng, now, 1, 30)),
                    created_by: admin_id,
                })
                .await?;
            tally.courses += 1;

            for module_order in 1..=i64::from(between(rng, 3, 6)) {
                let topic = pick(rng, &COURSE_MODULE_TOPICS)?;
                let module_id = db
                    .insert_course_module(
                        course_id,
                        &format!("الوحدة {module_order}: {topic}"),
                        MODULE_DESCRIPTION,
                        module_order,
                    )
                    .await?;
                tally.modules += 1;

                for lesson_order in 1..=i64::from(between(rng, 4, 8)) {
                    let topic = pick(rng, &COURSE_LESSON_TOPICS)?;
                    db.insert_course_lesson(&NewCourseLesson {
                        course_module_id: module_id,
                        title_ar: format!("الدرس {lesson_order}: {topic}"),
                        description_ar: LESSON_DESCRIPTION.to_owned(),
                        video_url: LESSON_VIDEO_URL.to_owned(),
                        video_duration_seconds: between(rng, 600, 2700),
                        has_pdf: rng.gen_bool(0.5),
                        pdf_path: rng.gen_bool(0.5).then(|| LESSON_PDF_PATH.to_owned()),
                        sort_order: lesson_order,
                        is_preview: lesson_order == 1,
                    })
                    .await?;
                    tally.lessons += 1;
                }
            }

            if is_published {
                let count = between(rng, 5, 15) as usize;
                for reviewer in pick_distinct(rng, students, count) {
                    let rating = u8::try_from(between(rng, 3, 5)).unwrap_or(5);
                    db.insert_course_review(
                        course_id,
                        reviewer.id,
                        rating,
                        REVIEW_TEXT,
                        percent(rng, 80),
                    )
                    .await?;
                    tally.reviews += 1;
                }
            }

            debug!(course_id, slug = spec.slug, "Inserted fixture course");
            courses.push(SeededCourse {
                id: course_id,
                price_dzd: spec.price_dzd,
                duration_days,
            });
        }
        Ok(courses)
    }

    async fn seed_packages(
        ctx: &mut SeedContext<'_>,
        courses: &[SeededCourse],
        tally: &mut CommerceTally,
    ) -> AppResult<Vec<i64>> {
        let db = ctx.db;
        let rng = &mut ctx.rng;
        let mut packages = Vec::with_capacity(PACKAGES.len());
        for (name, description, price, days, included) in PACKAGES {
            let package_id = db.insert_package(name, description, price, days).await?;
            for course in pick_distinct(rng, courses, included) {
                db.attach_package_course(package_id, course.id).await?;
            }
            tally.packages += 1;
            packages.push(package_id);
        }
        Ok(packages)
    }

    async fn seed_codes(
        ctx: &mut SeedContext<'_>,
        courses: &[SeededCourse],
        packages: &[i64],
        admin_id: i64,
        tally: &mut CommerceTally,
    ) -> AppResult<Vec<i64>> {
        let db = ctx.db;
        let now = ctx.now;
        let total = ctx.config.subscription_codes;
        let rng = &mut ctx.rng;
        let mut issued = HashSet::with_capacity(total as usize);
        let mut codes = Vec::with_capacity(total as usize);

        for _ in 0..total {
            let target = if rng.gen_bool(0.5) {
                courses.choose(rng).map(|c| CodeTarget::Course(c.id))
            } else {
                packages.choose(rng).map(|p| CodeTarget::Package(*p))
            };
            let Some(target) = target else {
                continue;
            };
            let mut code = alphanumeric_code(rng, SUBSCRIPTION_CODE_LENGTH);
            while !issued.insert(code.clone()) {
                code = alphanumeric_code(rng, SUBSCRIPTION_CODE_LENGTH);
            }
            let expires_at = rng
                .gen_bool(0.5)
                .then(|| now + Duration::days(i64::from(between(rng, 30, 180))));
            let id = db
                .insert_subscription_code(&NewSubscriptionCode {
                    code,
                    target,
                    max_uses: between(rng, 1, 10),
                    current_uses: between(rng, 0, 5),
                    expires_at,
                    is_active: percent(rng, 90),
                    created_by: admin_id,
                })
                .await?;
            tally.codes += 1;
            codes.push(id);
        }
        Ok(codes)
    }

    async fn seed_purchases(
        ctx: &mut SeedContext<'_>,
        students: &[UserRecord],
        courses: &[SeededCourse],
        codes: &[i64],
        admin_id: i64,
        tally: &mut CommerceTally,
    ) -> AppResult<()> {
        let db = ctx.db;
        let now = ctx.now;
        let rng = &mut ctx.rng;

        for student in students {
            for _ in 0..between(rng, 1, 2) {
                let Some(course) = courses.choose(rng) else {
                    continue;
                };
                if course.price_dzd == 0 {
                    continue;
                }

                if percent(rng, 70) {
                    let status = *pick(rng, &ReceiptStatus::ALL)?;
                    let reviewed = status.is_reviewed();
                    let receipt_id = db
                        .insert_payment_receipt(&NewPaymentReceipt {
                            user_id: student.id,
                            course_id: course.id,
                            receipt_image_url: format!(
                                "receipts/dummy_receipt_{}.jpg",
                                between(rng, 1000, 9999)
                            ),
                            amount_dzd: course.price_dzd,
                            payment_method: *pick(rng, &PaymentMethod::ALL)?,
                            status,
                            admin_note: (status == ReceiptStatus::Rejected)
                                .then(|| REJECTION_NOTE.to_owned()),
                            reviewed_at: reviewed.then(|| days_ago(rng, now, 0, 10)),
                            reviewed_by: reviewed.then_some(admin_id),
                            submitted_at: days_ago(rng, now, 10, 20),
                        })
                        .await?;
                    tally.receipts += 1;

                    if status == ReceiptStatus::Approved {
                        let days = if course.duration_days == 0 {
                            DEFAULT_COURSE_DAYS
                        } else {
                            course.duration_days
                        };
                        let subscription = NewUserSubscription::new(
                            student.id,
                            course.id,
                            ActivationSource::Receipt,
                            days_ago(rng, now, 1, 60),
                            now + Duration::days(i64::from(days)),
                            now,
                        )
                        .with_receipt(receipt_id);
                        db.insert_user_subscription(&subscription, now).await?;
                        tally.subscriptions += 1;
                    }
                } else if let Some(code_id) = codes.choose(rng) {
                    let offset_days = rng.gen_range(-30_i64..=120);
                    let subscription = NewUserSubscription::new(
                        student.id,
                        course.id,
                        ActivationSource::Code,
                        days_ago(rng, now, 1, 90),
                        now + Duration::days(offset_days),
                        now,
                    )
                    .with_code(*code_id);
                    db.insert_user_subscription(&subscription, now).await?;
                    tally.subscriptions += 1;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Seeder for PaidCoursesSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::PaidCourses
    }

    fn requires(&self) -> &'static [Table] {
        &[Table::Subjects]
    }

    fn provides(&self) -> &'static [Table] {
        &[
            Table::Users,
            Table::Courses,
            Table::CourseModules,
            Table::CourseLessons,
            Table::CourseReviews,
            Table::SubscriptionPackages,
            Table::PackageCourses,
            Table::SubscriptionCodes,
            Table::PaymentReceipts,
            Table::UserSubscriptions,
        ]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        Self::clear_previous(db).await?;

        let mut subjects = db.list_subjects().await?;
        subjects.truncate(SUBJECTS_FOR_COURSES);

        let mut tally = CommerceTally::default();
        let students = Self::ensure_students(ctx, &mut tally).await?;
        let admin_id = Self::ensure_admin(ctx, &mut tally).await?;
        let courses = Self::seed_courses(ctx, &subjects, &students, admin_id, &mut tally).await?;
        let packages = Self::seed_packages(ctx, &courses, &mut tally).await?;
        let codes = Self::seed_codes(ctx, &courses, &packages, admin_id, &mut tally).await?;
        Self::seed_purchases(ctx, &students, &courses, &codes, admin_id, &mut tally).await?;

        info!(
            students = students.len(),
            courses = tally.courses,
            packages = tally.packages,
            codes = tally.codes,
            receipts = tally.receipts,
            subscriptions = tally.subscriptions,
            "Commerce fixtures seeded"
        );
        Ok(SeedOutcome::completed(tally.rows()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_slugs_match_cleanup_pattern() {
        let prefix = fixtures::COURSE_SLUG_PATTERN.trim_end_matches('%');
        assert!(COURSES.iter().all(|c| c.slug.starts_with(prefix)));
        let unique: HashSet<_> = COURSES.iter().map(|c| c.slug).collect();
        assert_eq!(unique.len(), COURSES.len());
    }

    #[test]
    fn test_packages_fit_within_course_catalogue() {
        assert!(PACKAGES.iter().all(|(.., included)| *included <= COURSES.len()));
        assert_eq!(COURSES.iter().filter(|c| c.price_dzd == 0).count(), 2);
    }
}
