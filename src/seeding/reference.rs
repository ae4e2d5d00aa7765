// ABOUTME: Reference data loaders: content types, achievements, promo slides, BAC sessions and years
// ABOUTME: Content types, achievements and BAC rows are insert-or-ignore; promos are replaced wholesale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use tracing::{debug, info};

use super::{SeedContext, SeedOutcome, SeedStep, Seeder};
use crate::constants::settings;
use crate::database::Table;
use crate::errors::AppResult;
use crate::models::{
    AchievementCriteria, BacSessionType, ContentKind, NewAchievement, NewPromo, PromoActionType,
};

/// First and last archived exam year
const BAC_YEARS: std::ops::RangeInclusive<i32> = 2015..=2024;
/// Years from this one on are open to students
const FIRST_ACTIVE_BAC_YEAR: i32 = 2020;

/// Lesson, summary, exercises and test lookup rows
pub struct ContentTypesSeeder;

#[async_trait]
impl Seeder for ContentTypesSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::ContentTypes
    }

    fn requires(&self) -> &'static [Table] {
        &[]
    }

    fn provides(&self) -> &'static [Table] {
        &[Table::ContentTypes]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let mut inserted = 0;
        for kind in ContentKind::ALL {
            if ctx.db.insert_content_type_if_missing(kind).await? {
                inserted += 1;
            }
        }
        info!(inserted, "Content types seeded");
        Ok(SeedOutcome::completed(inserted))
    }
}

/// Global "normal" session and the archived exam years
pub struct BacSessionsSeeder;

#[async_trait]
impl Seeder for BacSessionsSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::BacSessions
    }

    fn requires(&self) -> &'static [Table] {
        &[]
    }

    fn provides(&self) -> &'static [Table] {
        &[Table::BacSessions, Table::BacYears]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        db.first_or_create_bac_session("normal", "الدورة العادية", BacSessionType::Main)
            .await?;
        let mut rows = 1;
        for year in BAC_YEARS {
            db.first_or_create_bac_year(year, year >= FIRST_ACTIVE_BAC_YEAR)
                .await?;
            rows += 1;
        }
        info!(rows, "BAC sessions and years seeded");
        Ok(SeedOutcome::completed(rows))
    }
}

fn achievement(
    name_ar: &str,
    description_ar: &str,
    icon: &str,
    badge_color: &str,
    points: u32,
    criteria: AchievementCriteria,
) -> NewAchievement {
    NewAchievement {
        name_ar: name_ar.to_owned(),
        description_ar: description_ar.to_owned(),
        icon: icon.to_owned(),
        badge_color: badge_color.to_owned(),
        criteria,
        points,
    }
}

fn content_count(content_type: &str, count: u32) -> AchievementCriteria {
    AchievementCriteria::ContentCount {
        content_type: content_type.to_owned(),
        count,
    }
}

fn subject_mastery(subject: &str, count: u32) -> AchievementCriteria {
    AchievementCriteria::SubjectMastery {
        subject: subject.to_owned(),
        count,
    }
}

/// Every achievement definition
#[must_use]
pub fn achievements() -> Vec<NewAchievement> {
    use AchievementCriteria as C;

    vec![
        // Study sessions
        achievement(
            "الجلسة الأولى",
            "أكمل أول جلسة دراسية",
            "star",
            "#10B981",
            10,
            C::FirstSession { sessions: 1 },
        ),
        achievement(
            "المتعلم المبتدئ",
            "أكمل 5 جلسات دراسية",
            "book",
            "#3B82F6",
            25,
            C::SessionCount { sessions: 5 },
        ),
        achievement(
            "المثابر",
            "ادرس لمدة 3 أيام متتالية",
            "calendar",
            "#F59E0B",
            50,
            C::ConsecutiveDays { days: 3 },
        ),
        achievement(
            "ساعة التركيز",
            "ادرس لمدة ساعة متواصلة",
            "clock",
            "#8B5CF6",
            30,
            C::StudyMinutes { minutes: 60 },
        ),
        achievement(
            "الماراثوني",
            "ادرس لمدة 3 ساعات في يوم واحد",
            "zap",
            "#EF4444",
            100,
            C::DailyStudyMinutes { minutes: 180 },
        ),
        achievement(
            "المتفاني",
            "ادرس 10 ساعات في الأسبوع",
            "award",
            "#EC4899",
            150,
            C::WeeklyStudyMinutes { minutes: 600 },
        ),
        achievement(
            "البطل الأسطوري",
            "ادرس 40 ساعة في الشهر",
            "trophy",
            "#FCD34D",
            500,
            C::MonthlyStudyMinutes { minutes: 2400 },
        ),
        // Content
        achievement(
            "قارئ نهم",
            "أكمل 10 دروس",
            "book-open",
            "#06B6D4",
            50,
            content_count("lesson", 10),
        ),
        achievement(
            "محب الملخصات",
            "أكمل 20 ملخصا",
            "file-text",
            "#14B8A6",
            75,
            content_count("summary", 20),
        ),
        achievement(
            "متحدي التمارين",
            "أكمل 15 سلسلة تمارين",
            "edit",
            "#F59E0B",
            100,
            content_count("exercises", 15),
        ),
        // Quizzes and simulations
        achievement(
            "المتقن",
            "احصل على 100% في اختبار",
            "check-circle",
            "#10B981",
            75,
            C::PerfectQuiz { score: 100 },
        ),
        achievement(
            "النجم الساطع",
            "احصل على 100% في 5 اختبارات",
            "star",
            "#FCD34D",
            200,
            C::PerfectQuizStreak { count: 5 },
        ),
        achievement(
            "متحدي الاختبارات",
            "أكمل 20 اختبارا",
            "file-check",
            "#EF4444",
            100,
            C::QuizCount { count: 20 },
        ),
        achievement(
            "محطم الأرقام",
            "أكمل 50 اختبارا",
            "trending-up",
            "#8B5CF6",
            250,
            C::QuizCount { count: 50 },
        ),
        achievement(
            "محاكي البكالوريا",
            "أكمل أول محاكاة بكالوريا",
            "file-text",
            "#3B82F6",
            50,
            C::BacSimulation { count: 1 },
        ),
        achievement(
            "مستعد للبكالوريا",
            "أكمل 5 محاكيات بكالوريا",
            "briefcase",
            "#10B981",
            150,
            C::BacSimulation { count: 5 },
        ),
        achievement(
            "بطل البكالوريا",
            "احصل على أكثر من 15/20 في محاكاة",
            "award",
            "#FCD34D",
            200,
            C::BacHighScore { score: 15 },
        ),
        // Subjects
        achievement(
            "عبقري الرياضيات",
            "أكمل 20 محتوى في الرياضيات",
            "calculator",
            "#3B82F6",
            100,
            subject_mastery("mathematics", 20),
        ),
        achievement(
            "عالم الفيزياء",
            "أكمل 20 محتوى في الفيزياء",
            "atom",
            "#8B5CF6",
            100,
            subject_mastery("physics", 20),
        ),
        achievement(
            "مستكشف الطبيعة",
            "أكمل 20 محتوى في علوم الطبيعة والحياة",
            "leaf",
            "#10B981",
            100,
            subject_mastery("biology", 20),
        ),
        achievement(
            "أديب اللغة",
            "أكمل 20 محتوى في اللغة العربية",
            "book",
            "#EF4444",
            100,
            subject_mastery("arabic", 20),
        ),
        achievement(
            "فيلسوف الفكر",
            "أكمل 15 محتوى في الفلسفة",
            "brain",
            "#6366F1",
            75,
            subject_mastery("philosophy", 15),
        ),
        achievement(
            "المراجع الدؤوب",
            "راجع نفس المحتوى 3 مرات",
            "refresh-cw",
            "#06B6D4",
            50,
            C::ContentRevision { revisions: 3 },
        ),
        achievement(
            "المحترف",
            "أكمل 100 محتوى في أي مادة",
            "shield",
            "#FCD34D",
            300,
            C::TotalContent { count: 100 },
        ),
        // Subject progress
        achievement(
            "المبتدئ المتميز",
            "أكمل 25% من محتوى مادة",
            "pie-chart",
            "#84CC16",
            50,
            C::SubjectProgress { percentage: 25 },
        ),
        achievement(
            "في منتصف الطريق",
            "أكمل 50% من محتوى مادة",
            "bar-chart",
            "#F59E0B",
            100,
            C::SubjectProgress { percentage: 50 },
        ),
        achievement(
            "على وشك الإتمام",
            "أكمل 75% من محتوى مادة",
            "trending-up",
            "#EC4899",
            150,
            C::SubjectProgress { percentage: 75 },
        ),
        achievement(
            "متقن المادة",
            "أكمل 100% من محتوى مادة",
            "award",
            "#FCD34D",
            250,
            C::SubjectProgress { percentage: 100 },
        ),
        // Pace and habits
        achievement(
            "السريع",
            "أكمل 5 دروس في يوم واحد",
            "zap",
            "#FCD34D",
            75,
            C::DailyContentCount { count: 5 },
        ),
        achievement(
            "العاصفة",
            "أكمل 10 دروس في يوم واحد",
            "wind",
            "#06B6D4",
            150,
            C::DailyContentCount { count: 10 },
        ),
        achievement(
            "الطائر المبكر",
            "أكمل جلسة دراسية قبل الساعة 7 صباحا",
            "sunrise",
            "#FCD34D",
            50,
            C::EarlyBird { hour: 7 },
        ),
        achievement(
            "البومة الليلية",
            "أكمل جلسة دراسية بعد الساعة 10 مساء",
            "moon",
            "#6366F1",
            50,
            C::NightOwl { hour: 22 },
        ),
        achievement(
            "المتحدي",
            "ادرس 7 أيام متتالية",
            "flame",
            "#EF4444",
            100,
            C::ConsecutiveDays { days: 7 },
        ),
        achievement(
            "المثابرة الأسطورية",
            "ادرس 30 يوما متتاليا",
            "fire",
            "#FCD34D",
            500,
            C::ConsecutiveDays { days: 30 },
        ),
        // Excellence
        achievement(
            "المتفوق",
            "احصل على معدل أكثر من 90% في 10 اختبارات",
            "star",
            "#FCD34D",
            200,
            C::HighAverageScore { score: 90, count: 10 },
        ),
        achievement(
            "الأول في الفصل",
            "احصل على أعلى درجة في 5 اختبارات متتالية",
            "medal",
            "#FCD34D",
            300,
            C::TopScore { count: 5 },
        ),
        achievement(
            "المستكشف",
            "جرب 5 أنواع مختلفة من المحتوى",
            "compass",
            "#84CC16",
            50,
            C::ContentTypeVariety { types: 5 },
        ),
        achievement(
            "المتنوع",
            "ادرس في 3 مواد مختلفة في يوم واحد",
            "grid",
            "#14B8A6",
            75,
            C::SubjectVariety { subjects: 3 },
        ),
        // Membership
        achievement(
            "عضو مؤسس",
            "انضم إلى المنصة في الشهر الأول",
            "users",
            "#6366F1",
            100,
            C::FoundingMember {},
        ),
        achievement(
            "مستخدم نشط",
            "استخدم المنصة لمدة 90 يوما",
            "activity",
            "#8B5CF6",
            200,
            C::ActiveUser { days: 90 },
        ),
        achievement(
            "المخضرم",
            "استخدم المنصة لمدة 180 يوما",
            "shield",
            "#FCD34D",
            400,
            C::ActiveUser { days: 180 },
        ),
        achievement(
            "أسطورة الدراسة",
            "اجمع 5000 نقطة",
            "crown",
            "#FCD34D",
            1000,
            C::TotalPoints { points: 5000 },
        ),
        achievement(
            "المتفوق الأكاديمي",
            "أتقن جميع المواد الأساسية",
            "graduation-cap",
            "#FCD34D",
            1000,
            C::AllCoreSubjects {},
        ),
        achievement(
            "ملك البكالوريا",
            "أكمل 50 محاكاة بكالوريا بمعدل فوق 15",
            "crown",
            "#FCD34D",
            2000,
            C::BacKing { count: 50, score: 15 },
        ),
    ]
}

/// Achievement definitions, keyed by Arabic name
pub struct AchievementsSeeder;

#[async_trait]
impl Seeder for AchievementsSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::Achievements
    }

    fn requires(&self) -> &'static [Table] {
        &[]
    }

    fn provides(&self) -> &'static [Table] {
        &[Table::Achievements]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let definitions = achievements();
        let mut inserted = 0;
        for definition in &definitions {
            if ctx.db.insert_achievement_if_missing(definition).await? {
                inserted += 1;
            } else {
                debug!(name = %definition.name_ar, "Achievement already exists");
            }
        }
        info!(inserted, total = definitions.len(), "Achievements seeded");
        Ok(SeedOutcome::completed(inserted))
    }
}

#[allow(clippy::too_many_arguments)]
fn promo(
    display_order: i64,
    title: &str,
    subtitle: &str,
    badge: Option<&str>,
    action_text: &str,
    icon_name: &str,
    gradient: [&str; 2],
    action: (PromoActionType, &str),
) -> NewPromo {
    NewPromo {
        title: title.to_owned(),
        subtitle: subtitle.to_owned(),
        badge: badge.map(str::to_owned),
        action_text: action_text.to_owned(),
        icon_name: icon_name.to_owned(),
        image_url: None,
        gradient_colors: gradient.iter().map(|c| (*c).to_owned()).collect(),
        action_type: action.0,
        action_value: action.1.to_owned(),
        display_order,
        is_active: true,
    }
}

/// Home page slides in display order
#[must_use]
pub fn promos() -> Vec<NewPromo> {
    use PromoActionType::{Route, Url};

    let mut slides = vec![
        promo(
            1,
            "دورات جديدة متاحة!",
            "اكتشف دوراتنا المتخصصة للبكالوريا",
            Some("جديد"),
            "اكتشف الآن",
            "school",
            ["#2196F3", "#1565C0"],
            (Route, "/courses"),
        ),
        promo(
            2,
            "تحدي الأسبوع",
            "أكمل 5 اختبارات واربح 100 نقطة إضافية",
            Some("تحدي"),
            "ابدأ التحدي",
            "emoji_events",
            ["#FF9800", "#E65100"],
            (Route, "/quiz"),
        ),
        promo(
            3,
            "محاكاة البكالوريا",
            "جرب نفسك في ظروف امتحان حقيقية",
            None,
            "ابدأ المحاكاة",
            "assignment",
            ["#4CAF50", "#2E7D32"],
            (Route, "/bac"),
        ),
        promo(
            4,
            "ادعُ أصدقاءك",
            "اربح 50 نقطة عن كل صديق يسجل",
            Some("مكافأة"),
            "دعوة صديق",
            "people",
            ["#9C27B0", "#6A1B9A"],
            (Url, "https://tahsil.app/invite"),
        ),
        promo(
            5,
            "خطط دراستك بذكاء",
            "استخدم البلانر الذكي لتنظيم وقتك",
            None,
            "افتح البلانر",
            "calendar_month",
            ["#00BCD4", "#0097A7"],
            (Route, "/planner"),
        ),
        promo(
            6,
            "عروض رمضان",
            "خصم 50% على جميع الدورات",
            Some("عرض محدود"),
            "استفد الآن",
            "celebration",
            ["#E91E63", "#AD1457"],
            (Route, "/subscriptions"),
        ),
    ];
    // Seasonal offer, enabled by admins when it applies
    if let Some(seasonal) = slides.last_mut() {
        seasonal.is_active = false;
    }
    slides
}

/// Home page slider and its feature flag
pub struct PromosSeeder;

#[async_trait]
impl Seeder for PromosSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::Promos
    }

    fn requires(&self) -> &'static [Table] {
        &[]
    }

    fn provides(&self) -> &'static [Table] {
        &[Table::Promos, Table::AppSettings]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        db.set_app_setting(settings::PROMOS_SECTION_ENABLED, "1").await?;

        let removed = db.delete_all_promos().await?;
        let slides = promos();
        for slide in &slides {
            db.insert_promo(slide).await?;
        }

        info!(removed, inserted = slides.len(), "Promos seeded");
        Ok(SeedOutcome::completed(slides.len() as u64 + 1))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_achievement_names_are_unique() {
        let definitions = achievements();
        let names: HashSet<_> = definitions.iter().map(|a| a.name_ar.as_str()).collect();
        assert_eq!(names.len(), definitions.len());
        assert!(definitions.iter().all(|a| a.points > 0));
    }

    #[test]
    fn test_only_the_seasonal_promo_is_inactive() {
        let slides = promos();
        assert_eq!(slides.len(), 6);
        assert_eq!(slides.iter().filter(|s| !s.is_active).count(), 1);
        assert!(slides.iter().all(|s| s.gradient_colors.len() == 2));
    }
}
