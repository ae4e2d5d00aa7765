// ABOUTME: Planner curriculum trees for the sciences stream BAC subjects
// ABOUTME: Each subject's tree is deleted and rebuilt parent-first on every run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use rand::Rng;
use tracing::{info, warn};

use super::taxonomy::{NodeSink, Taxonomy};
use super::{SeedContext, SeedOutcome, SeedStep, Seeder};
use crate::database::{Database, Table};
use crate::errors::AppResult;
use crate::models::{CurriculumLevel, Difficulty, NewCurriculumNode, PlannerContentType, Subject};

type Node = NewCurriculumNode;

const MATH_SUBJECTS: &[&str] = &["sciences-exp-mathematics", "mathematics-mathematics"];
const PHYSICS_SUBJECTS: &[&str] = &["sciences-exp-physics"];
const BIOLOGY_SUBJECTS: &[&str] = &["sciences-exp-biology"];
const ISLAMIC_SUBJECTS: &[&str] = &["sciences-exp-islamic"];
const HISTORY_SUBJECTS: &[&str] = &["sciences-exp-history-geo"];

const MATH_AXES: [&str; 5] = [
    "المحور الأول: الدوال العددية",
    "المحور الثاني: المتتاليات",
    "المحور الثالث: الدوال الأصلية",
    "المحور الرابع: الاحتماليات",
    "المحور الخامس: الأعداد المركبة",
];

const PHYSICS_MECHANICS_TOPICS: [&str; 7] = [
    "المناعة الرزمية",
    "قياس التقلقلية",
    "حجم و ضغط غاز",
    "الكواكب و الأقمار",
    "دراسة تطور جملة ميكانيكية",
    "السقوط الشاقولي",
    "الحركة",
];

/// Units following the first two, numbered from U3
const PHYSICS_UNITS: [&str; 16] = [
    "المناعة الرزمية لتحول كيميائي وسط مائي",
    "قياس التقلقلية",
    "حجم و ضغط غاز",
    "الكواكب و الأقمار",
    "دراسة تطور جملة ميكانيكية",
    "السقوط الشاقولي",
    "الحركة",
    "المستوى المائل و الأفقي",
    "دراسة ظواهر كهربائية",
    "الدارة RC",
    "الدارة RL",
    "تطور و كيميائية نحو حالة التوازن",
    "التحولات النووية",
    "مراقبة تطور ج كيميائية",
    "التطورات المهتزة",
    "مفهوم الموجة",
];

/// Axis title, unit titles, difficulty and minutes per unit
const BIOLOGY_AXES: [(&str, &[&str], Difficulty, u32); 3] = [
    (
        "المجال التعلمي الأول: التخصص الوظيفي للبروتين",
        &[
            "الوحدة الأولى: آليات تركيب البروتين",
            "الوحدة الثانية: العلاقة بين بنية ووظيفة البروتين",
            "الوحدة الثالثة: دور البروتينات في التخبر الانزيمي",
            "الوحدة الرابعة: دور البروتينات في الدفاع عن الذات",
            "الوحدة الخامسة: دور البروتينات في الإتصال العصبي",
        ],
        Difficulty::Hard,
        90,
    ),
    (
        "المجال التعلمي الثاني: التخصص الوظيفي للبروتين",
        &[
            "الوحدة الأولى: آليات تحويل الطاقة الضوئية إلى طاقة كيميائية كامنة",
            "الوحدة الثانية: آليات تحويل الطاقة الكيميائية الكامنة في الجزيئات العضوية إلى طاقة قابلة للإستعمال ATP",
            "الوحدة الثالثة: حوصلة التحولات الطاقوية على المستوى الخلوي",
        ],
        Difficulty::Hard,
        90,
    ),
    (
        "المجال التعلمي الثالث: الذكتونية العامة",
        &[
            "الوحدة الأولى: بنية الكرة الأرضية",
            "الوحدة الثانية: النشاط التكتوني والظواهر الجيولوجية المرتبطة به",
        ],
        Difficulty::Medium,
        75,
    ),
];

/// Topics of the first biology axis, attached to its first two units
const BIOLOGY_SUBTOPICS: [(usize, &str); 5] = [
    (0, "الإستنساخ"),
    (0, "الترجمة"),
    (1, "الأحماض الأمنية"),
    (1, "سلوك الأحماض الأمينية"),
    (1, "مستويات البنية الفراغية"),
];

const ISLAMIC_TOPICS: [&str; 18] = [
    "العقيدة الإسلامية و أثرها على الفرد و المجتمع",
    "وسائل القرآن في تثبيت العقيدة الإسلامية",
    "الإسلام و الرسالات السماوية",
    "العقل في القرآن الكريم",
    "مقاصد الشريعة الإسلامية",
    "منهج الإسلام في محاربة الإنحراف و الجريمة",
    "المساواة أمام أحكام الشريعة الإسلامية في العقوبات",
    "الصحة النفسية و الجسمية في القرآن الكريم",
    "من مصادر التشريع الإسلامي: الإجماع، القياس، المصلحة المرسلة",
    "القيم في القرآن الكريم",
    "الوقف في الإسلام",
    "من أحكام الأسرة في الإسلام: مدخل إلى علم الميراث",
    "الربا و أحكامه",
    "من المعاملات المالية الجائزة: بيع العرف، المراببحة، التقسيط",
    "الحرية الشخصية و مدى ارتباطها بحرية الأخرين",
    "من أحكام الأسرة في الإسلام: النسب، التبني، الكفالة",
    "العلاقات الاجتماعية بين المسلمين و غيرهم",
    "خطبة الرسول ﷺ في حجة الوداع",
];

const HISTORY_TOPICS: [&str; 15] = [
    "بروز الصراع و تشكل العالم",
    "مساعي الإنفراج الدولي",
    "من الثنائية إلى الأحادية القطبية",
    "العمل المسلح و رد فعل الاستعمار",
    "استعادة السيادة الوطنية و بناء الدولة الجزائرية",
    "ظروف قيام الدولة الجزائرية",
    "العالم الثالث بين تراجع الاستعمار التقليدي و استمرار حركات التحرر",
    "فلسطين و من تصفية الاستعمار التقليدي و استمرارية التحرر",
    "إشكالية التقدم و التخلف",
    "الميادين و الثقافات في العالم",
    "مصادر القوة الأمريكية و تأثيرها على الإقتصاد العالمي",
    "ظاهرة التكتل و أثرها في قوة الإتحاد الأوروبي",
    "العلاقة بين السكان و التنمية في شرق و جنوب شرق آسيا",
    "الإقتصاد الجزائري في العالم",
    "التنمية في البرازيل",
];

fn mathematics_tree() -> Taxonomy<Node> {
    let mut tree = Taxonomy::new();
    for (index, title) in MATH_AXES.iter().enumerate() {
        let code = format!("LA{}", index + 1);
        tree.root(Node::new(CurriculumLevel::LearningAxis, *title).code(code));
    }
    tree
}

fn physics_tree<R: Rng + ?Sized>(rng: &mut R) -> AppResult<Taxonomy<Node>> {
    let mut tree = Taxonomy::new();
    tree.root(
        Node::new(CurriculumLevel::Unit, "الوحدة الأولى: المتابعة الزمنية لتحول كيميائي")
            .code("U1")
            .with_practice()
            .bac_priority(5),
    );
    let mechanics = tree.root(
        Node::new(CurriculumLevel::Unit, "الوحدة الثانية: تطور جملة ميكانيكية")
            .code("U2")
            .with_practice()
            .bac_priority(7),
    );
    for title in PHYSICS_MECHANICS_TOPICS {
        tree.child(
            mechanics,
            Node::new(CurriculumLevel::Topic, title)
                .effort(Difficulty::Hard, Some(60))
                .with_practice(),
        )?;
    }
    for (offset, title) in PHYSICS_UNITS.iter().enumerate() {
        tree.root(
            Node::new(CurriculumLevel::Unit, *title)
                .code(format!("U{}", offset + 3))
                .effort(Difficulty::Hard, None)
                .with_practice()
                .bac_priority(rng.gen_range(3..=8)),
        );
    }
    Ok(tree)
}

fn biology_tree() -> AppResult<Taxonomy<Node>> {
    let mut tree = Taxonomy::new();
    let mut first_axis_units = Vec::new();
    for (axis_index, (title, units, difficulty, minutes)) in BIOLOGY_AXES.iter().enumerate() {
        let axis_code = format!("LA{}", axis_index + 1);
        let axis =
            tree.root(Node::new(CurriculumLevel::LearningAxis, *title).code(axis_code.clone()));
        for (unit_index, unit_title) in units.iter().enumerate() {
            let unit = tree.child(
                axis,
                Node::new(CurriculumLevel::Unit, *unit_title)
                    .code(format!("{axis_code}.U{}", unit_index + 1))
                    .effort(*difficulty, Some(*minutes)),
            )?;
            if axis_index == 0 {
                first_axis_units.push(unit);
            }
        }
    }
    for (unit_index, title) in BIOLOGY_SUBTOPICS {
        if let Some(unit) = first_axis_units.get(unit_index) {
            tree.child(
                *unit,
                Node::new(CurriculumLevel::Topic, title).effort(Difficulty::Hard, Some(60)),
            )?;
        }
    }
    Ok(tree)
}

fn flat_topics(titles: &[&str], prefix: &str, content_type: PlannerContentType) -> Taxonomy<Node> {
    let mut tree = Taxonomy::new();
    for (index, title) in titles.iter().enumerate() {
        tree.root(
            Node::new(CurriculumLevel::Topic, *title)
                .code(format!("{prefix}{}", index + 1))
                .content_type(content_type)
                .effort(Difficulty::Medium, Some(45)),
        );
    }
    tree
}

/// Writes nodes of one subject
struct CurriculumSink<'a> {
    db: &'a Database,
    subject_id: i64,
}

#[async_trait]
impl NodeSink<Node> for CurriculumSink<'_> {
    async fn create(
        &mut self,
        node: &Node,
        parent_id: Option<i64>,
        sort_order: i64,
    ) -> AppResult<Option<i64>> {
        let id = self
            .db
            .insert_curriculum_node(self.subject_id, parent_id, sort_order, node)
            .await?;
        Ok(Some(id))
    }
}

/// First subject found among `slugs`
async fn first_subject(db: &Database, slugs: &[&str]) -> AppResult<Option<Subject>> {
    for slug in slugs {
        if let Some(subject) = db.get_subject_by_slug(slug).await? {
            return Ok(Some(subject));
        }
    }
    Ok(None)
}

/// Planner trees for mathematics, physics, biology, Islamic sciences and history
pub struct CurriculumSeeder;

#[async_trait]
impl Seeder for CurriculumSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::Curriculum
    }

    fn requires(&self) -> &'static [Table] {
        &[Table::AcademicPhases, Table::AcademicYears, Table::Subjects]
    }

    fn provides(&self) -> &'static [Table] {
        &[Table::CurriculumNodes]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        if db.find_bac_year().await?.is_none() {
            return Ok(SeedOutcome::skipped(
                "secondary phase BAC year not found, run academic-structure first",
            ));
        }

        let trees = [
            (MATH_SUBJECTS, mathematics_tree()),
            (PHYSICS_SUBJECTS, physics_tree(&mut ctx.rng)?),
            (BIOLOGY_SUBJECTS, biology_tree()?),
            (
                ISLAMIC_SUBJECTS,
                flat_topics(&ISLAMIC_TOPICS, "T", PlannerContentType::Memorization),
            ),
            (
                HISTORY_SUBJECTS,
                flat_topics(&HISTORY_TOPICS, "H", PlannerContentType::Theory),
            ),
        ];

        let mut rows = 0;
        for (slugs, tree) in &trees {
            let Some(subject) = first_subject(db, slugs).await? else {
                warn!(subject = %slugs.join(" | "), "Subject not found, skipping its curriculum");
                continue;
            };

            let removed = db.delete_curriculum_for_subject(subject.id).await?;
            let mut sink = CurriculumSink {
                db,
                subject_id: subject.id,
            };
            let report = tree.build(&mut sink).await?;
            info!(
                subject = %subject.slug,
                removed,
                created = report.created_count(),
                "Curriculum rebuilt"
            );
            rows += report.created_count() as u64;
        }

        Ok(SeedOutcome::completed(rows))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_physics_priorities_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let tree = physics_tree(&mut rng).expect("physics tree");
        assert_eq!(tree.len(), 2 + PHYSICS_MECHANICS_TOPICS.len() + PHYSICS_UNITS.len());
        assert!(tree
            .nodes()
            .iter()
            .filter(|n| n.payload.is_bac_priority)
            .all(|n| (3..=8).contains(&n.payload.bac_frequency)));
    }

    #[test]
    fn test_biology_topics_hang_under_first_axis_units() {
        let tree = biology_tree().expect("biology tree");
        let topics: Vec<_> = tree
            .nodes()
            .iter()
            .filter(|n| n.payload.level == CurriculumLevel::Topic)
            .collect();
        assert_eq!(topics.len(), BIOLOGY_SUBTOPICS.len());
        for topic in topics {
            let parent = topic.parent.expect("topic has a parent");
            assert_eq!(tree.nodes()[parent].payload.level, CurriculumLevel::Unit);
        }
    }
}
