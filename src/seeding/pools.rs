// ABOUTME: Sample pools shared by the fixture generators: names, titles, bodies and questions
// ABOUTME: Subject-specific pools are keyed by subject family, derived from the subject slug
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Every generator draws sample text from this module, so a title or question
//! exists in exactly one place.
//!
//! Subject slugs carry a stream prefix (`sciences-exp-physics`,
//! `literature-philosophy-main`); [`SubjectFamily::from_slug`] strips it so pools
//! can be shared across streams.

use crate::models::SubjectCategory;

/// Subject identity shared across streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectFamily {
    /// الرياضيات
    Mathematics,
    /// الفيزياء
    Physics,
    /// علوم الطبيعة والحياة
    Biology,
    /// اللغة العربية
    Arabic,
    /// اللغة الفرنسية
    French,
    /// اللغة الإنجليزية
    English,
    /// الفلسفة
    Philosophy,
    /// التاريخ والجغرافيا
    HistoryGeo,
    /// العلوم الإسلامية
    Islamic,
    /// الهندسة الكهربائية
    Engineering,
    /// الاقتصاد والمانجمنت
    Economics,
    /// القانون
    Law,
    /// المحاسبة والمالية
    Accounting,
    /// اللغة الأجنبية الثالثة
    ThirdLanguage,
}

/// Slug suffixes, longest first where one is a suffix of another
const FAMILY_SUFFIXES: [(&str, SubjectFamily); 15] = [
    ("-third-language", SubjectFamily::ThirdLanguage),
    ("-economics-main", SubjectFamily::Economics),
    ("-philosophy-main", SubjectFamily::Philosophy),
    ("-mathematics", SubjectFamily::Mathematics),
    ("-physics", SubjectFamily::Physics),
    ("-biology", SubjectFamily::Biology),
    ("-arabic", SubjectFamily::Arabic),
    ("-french", SubjectFamily::French),
    ("-english", SubjectFamily::English),
    ("-philosophy", SubjectFamily::Philosophy),
    ("-history-geo", SubjectFamily::HistoryGeo),
    ("-islamic", SubjectFamily::Islamic),
    ("-engineering", SubjectFamily::Engineering),
    ("-law", SubjectFamily::Law),
    ("-accounting", SubjectFamily::Accounting),
];

impl SubjectFamily {
    /// Family of a stream-prefixed subject slug
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        FAMILY_SUFFIXES
            .iter()
            .find(|(suffix, _)| slug.ends_with(suffix))
            .map(|(_, family)| *family)
    }

    /// Arabic subject name
    #[must_use]
    pub const fn name_ar(&self) -> &'static str {
        match self {
            Self::Mathematics => "الرياضيات",
            Self::Physics => "الفيزياء",
            Self::Biology => "علوم الطبيعة والحياة",
            Self::Arabic => "اللغة العربية",
            Self::French => "اللغة الفرنسية",
            Self::English => "اللغة الإنجليزية",
            Self::Philosophy => "الفلسفة",
            Self::HistoryGeo => "التاريخ والجغرافيا",
            Self::Islamic => "العلوم الإسلامية",
            Self::Engineering => "الهندسة الكهربائية",
            Self::Economics => "الاقتصاد والمانجمنت",
            Self::Law => "القانون",
            Self::Accounting => "المحاسبة والمالية",
            Self::ThirdLanguage => "اللغة الأجنبية الثالثة",
        }
    }

    /// Arabic subject description
    #[must_use]
    pub fn description_ar(&self) -> String {
        match self {
            Self::Engineering => "مادة الهندسة (كهربائية، ميكانيكية، مدنية، أو طرائق)".to_owned(),
            Self::ThirdLanguage => {
                "مادة اللغة الأجنبية الثالثة (إسبانية، ألمانية، أو إيطالية)".to_owned()
            }
            other => format!("مادة {}", other.name_ar()),
        }
    }

    /// Icon name
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Mathematics => "calculator",
            Self::Physics => "atom",
            Self::Biology => "leaf",
            Self::Arabic => "book",
            Self::French | Self::ThirdLanguage => "language",
            Self::English => "globe",
            Self::Philosophy => "brain",
            Self::HistoryGeo => "map",
            Self::Islamic => "mosque",
            Self::Engineering => "cog",
            Self::Economics => "briefcase",
            Self::Law => "scale",
            Self::Accounting => "chart",
        }
    }

    /// Hex display color
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Mathematics => "#3B82F6",
            Self::Physics => "#8B5CF6",
            Self::Biology => "#10B981",
            Self::Arabic => "#EF4444",
            Self::French => "#06B6D4",
            Self::English => "#F59E0B",
            Self::Philosophy => "#6366F1",
            Self::HistoryGeo => "#84CC16",
            Self::Islamic => "#14B8A6",
            Self::Engineering => "#F97316",
            Self::Economics => "#22C55E",
            Self::Law => "#DC2626",
            Self::Accounting => "#059669",
            Self::ThirdLanguage => "#EAB308",
        }
    }

    /// Study category of the stream coefficient
    #[must_use]
    pub const fn category(&self) -> SubjectCategory {
        match self {
            Self::Arabic | Self::French | Self::English | Self::ThirdLanguage => {
                SubjectCategory::Language
            }
            Self::Islamic | Self::HistoryGeo | Self::Philosophy | Self::Law => {
                SubjectCategory::Memorization
            }
            Self::Mathematics
            | Self::Physics
            | Self::Biology
            | Self::Engineering
            | Self::Economics
            | Self::Accounting => SubjectCategory::HardCore,
        }
    }
}

// Names

/// Given names for synthetic users
pub const FIRST_NAMES: [&str; 40] = [
    "محمد", "أحمد", "علي", "حسن", "حسين", "عبد الله", "عمر", "خالد", "يوسف", "إبراهيم",
    "فاطمة", "عائشة", "خديجة", "مريم", "زينب", "سارة", "نور", "ياسمين", "هدى", "أمل",
    "كريم", "رضا", "سعيد", "طارق", "وليد", "سمير", "نبيل", "رشيد", "فريد", "عادل",
    "ليلى", "سلمى", "نادية", "هالة", "سميرة", "لبنى", "رانيا", "دينا", "منى", "سهام",
];

/// Family names for synthetic users
pub const LAST_NAMES: [&str; 30] = [
    "بن علي", "بن محمد", "بن عبد الله", "العربي", "المغربي", "التونسي", "الجزائري",
    "بوعلام", "بوزيد", "بن عيسى", "الحسني", "السعيدي", "الأمين", "الكريم", "المبارك",
    "الشريف", "الطاهر", "البشير", "المنصور", "العزيز", "الرحمن", "الحكيم", "العليم",
    "بن عمر", "بن يوسف", "بن إبراهيم", "الفاضل", "النجار", "الصالح", "الحميد",
];

// Content catalog

/// Lesson titles, used in order within a chapter
pub const LESSON_TITLES: [&str; 10] = [
    "الدرس التمهيدي",
    "الدرس الأول - المفاهيم الأساسية",
    "الدرس الثاني - التطبيقات العملية",
    "الدرس الثالث - الحالات الخاصة",
    "الدرس الرابع - التحليل المعمق",
    "مقدمة في الموضوع",
    "المبادئ الأساسية",
    "التقنيات المتقدمة",
    "دراسة الحالات",
    "التطبيقات النظرية",
];

/// Summary titles
pub const SUMMARY_TITLES: [&str; 5] = [
    "ملخص شامل للوحدة",
    "ملخص المفاهيم الأساسية",
    "ملخص التطبيقات",
    "ملخص القوانين والنظريات",
    "مراجعة عامة",
];

/// Exercise set titles, used in order within a chapter
pub const EXERCISES_TITLES: [&str; 5] = [
    "سلسلة تمارين محلولة",
    "تمارين تطبيقية",
    "تمارين متنوعة",
    "تمارين للمراجعة",
    "تمارين الامتحانات",
];

/// Test titles
pub const TEST_TITLES: [&str; 5] = [
    "اختبار تقييمي",
    "اختبار الوحدة",
    "امتحان تجريبي",
    "اختبار شامل",
    "تقييم نهائي",
];

/// Content descriptions
pub const CONTENT_DESCRIPTIONS: [&str; 10] = [
    "شرح مفصل للموضوع مع أمثلة توضيحية",
    "دراسة معمقة للمفاهيم الأساسية",
    "تطبيقات عملية ونماذج محلولة",
    "تحليل شامل للموضوع بطريقة مبسطة",
    "مراجعة كاملة مع التركيز على النقاط المهمة",
    "شرح تفصيلي مع رسومات توضيحية",
    "دروس مبسطة للفهم السريع",
    "محتوى تعليمي متكامل",
    "شرح بالأمثلة والتطبيقات",
    "دراسة شاملة للموضوع",
];

/// HTML bodies for lessons and summaries
pub const CONTENT_BODIES: [&str; 5] = [
    "<h2>المقدمة</h2><p>في هذا الدرس سنتعرف على المفاهيم الأساسية والمبادئ الرئيسية.</p><h3>العناصر الأساسية</h3><ul><li>النقطة الأولى</li><li>النقطة الثانية</li><li>النقطة الثالثة</li></ul><h3>التطبيقات</h3><p>سنقوم بدراسة عدة تطبيقات عملية توضح هذه المفاهيم.</p>",
    "<h2>الموضوع</h2><p>يعتبر هذا الموضوع من المواضيع الهامة التي يجب على الطالب إتقانها.</p><h3>الشرح</h3><p>نبدأ بالتعريفات الأساسية ثم ننتقل إلى الأمثلة التوضيحية.</p><h3>الخلاصة</h3><p>في النهاية، يجب التركيز على فهم المبادئ الأساسية.</p>",
    "<h2>الدرس</h2><p>هذا درس شامل يغطي جميع جوانب الموضوع.</p><h3>القوانين الأساسية</h3><ol><li>القانون الأول</li><li>القانون الثاني</li><li>القانون الثالث</li></ol><h3>أمثلة محلولة</h3><p>مثال 1: ...<br>الحل: ...</p>",
    "<h2>المحتوى التعليمي</h2><p>سنتناول في هذا الدرس مختلف جوانب الموضوع بطريقة منهجية.</p><h3>النقاط الرئيسية</h3><p>يجب التركيز على فهم النقاط التالية بشكل جيد.</p>",
    "<h2>ملخص</h2><p>هذا ملخص شامل لجميع المفاهيم المدروسة.</p><ul><li>المفهوم الأول</li><li>المفهوم الثاني</li><li>المفهوم الثالث</li></ul><p>للمراجعة النهائية، يجب التركيز على هذه النقاط.</p>",
];

/// Body of every exercise set
pub const EXERCISES_BODY: &str = "<h2>التمارين</h2><p>تمرين 1: ...</p><p>تمرين 2: ...</p><p>تمرين 3: ...</p><h3>الحلول</h3><p>حل التمرين 1: ...</p>";

/// Body of every test
pub const TEST_BODY: &str =
    "<h2>الاختبار</h2><p>السؤال 1: ...</p><p>السؤال 2: ...</p><p>السؤال 3: ...</p>";

/// Description of every test
pub const TEST_DESCRIPTION: &str = "اختبار تقييمي شامل للوحدة";

/// Lesson tag sets
pub const LESSON_TAG_SETS: [[&str; 3]; 6] = [
    ["دروس", "شرح", "تعليم"],
    ["مراجعة", "ملخصات", "امتحانات"],
    ["تمارين", "حلول", "تطبيقات"],
    ["اختبارات", "تقييم", "امتحان"],
    ["مفاهيم", "أساسيات", "نظريات"],
    ["تطبيق", "عملي", "أمثلة"],
];

// BAC archive

/// Chapters a past paper may cover
pub const BAC_CHAPTER_TITLES: [&str; 10] = [
    "الأعداد المركبة",
    "الدوال الأسية",
    "الدوال اللوغاريتمية",
    "المتتاليات",
    "الهندسة الفضائية",
    "الاحتمالات",
    "التكامل",
    "المعادلات التفاضلية",
    "الميكانيك",
    "الكهرباء",
];

// Paid courses

/// Course module topics
pub const COURSE_MODULE_TOPICS: [&str; 6] = [
    "مقدمة",
    "المفاهيم الأساسية",
    "التطبيقات",
    "التمارين",
    "المراجعة",
    "الاختبارات",
];

/// Course lesson topics
pub const COURSE_LESSON_TOPICS: [&str; 4] =
    ["مقدمة", "شرح نظري", "أمثلة تطبيقية", "تمارين محلولة"];

// Quizzes

/// Single-answer multiple-choice question
#[derive(Debug, Clone, Copy)]
pub struct McqSingleSample {
    /// Question text
    pub text: &'static str,
    /// Options in display order
    pub options: &'static [&'static str],
    /// Correct option index
    pub correct: usize,
    /// Explanation, derived from the answer when absent
    pub explanation: Option<&'static str>,
}

/// Multiple-answer multiple-choice question
#[derive(Debug, Clone, Copy)]
pub struct McqMultipleSample {
    /// Question text
    pub text: &'static str,
    /// Options in display order
    pub options: &'static [&'static str],
    /// Correct option indices
    pub correct: &'static [usize],
}

/// True/false statement
#[derive(Debug, Clone, Copy)]
pub struct TrueFalseSample {
    /// Statement
    pub text: &'static str,
    /// Truth value
    pub correct: bool,
    /// Explanation, derived from the answer when absent
    pub explanation: Option<&'static str>,
}

/// Fill-in-the-blank question
#[derive(Debug, Clone, Copy)]
pub struct FillBlankSample {
    /// Question text with a blank
    pub text: &'static str,
    /// Expected answer
    pub answer: &'static str,
    /// Explanation, derived from the answer when absent
    pub explanation: Option<&'static str>,
}

const fn single(
    text: &'static str,
    options: &'static [&'static str],
    explanation: Option<&'static str>,
) -> McqSingleSample {
    McqSingleSample {
        text,
        options,
        correct: 0,
        explanation,
    }
}

const MATH_SINGLE: [McqSingleSample; 5] = [
    single(
        "ما هي مشتقة الدالة f(x) = x²؟",
        &["2x", "x", "2", "x²"],
        Some("مشتقة x² هي 2x حسب قاعدة الأس."),
    ),
    single(
        "ما هو نهاية (sin x)/x عندما x→0؟",
        &["1", "0", "∞", "غير موجودة"],
        Some("هذه نهاية شهيرة تساوي 1."),
    ),
    single("ما هو تكامل ∫cos(x)dx؟", &["sin(x)+C", "-sin(x)+C", "cos(x)+C", "-cos(x)+C"], None),
    single(
        "إذا كان det(A) = 0، فإن المصفوفة A:",
        &["غير قابلة للقلب", "قابلة للقلب", "متماثلة", "وحدوية"],
        None,
    ),
    single(
        "ما هو الحد العام للمتتالية الحسابية؟",
        &["Un = U1 + (n-1)r", "Un = U1 × r^n", "Un = n!", "Un = 2n"],
        None,
    ),
];

const PHYSICS_SINGLE: [McqSingleSample; 5] = [
    single(
        "ما هي وحدة قياس القوة في النظام الدولي؟",
        &["نيوتن", "جول", "واط", "باسكال"],
        Some("النيوتن هو وحدة القوة."),
    ),
    single("ما هو قانون نيوتن الثاني؟", &["F = ma", "F = mv", "F = mg", "F = mgh"], None),
    single(
        "ما هي سرعة الضوء في الفراغ؟",
        &["3×10⁸ m/s", "3×10⁶ m/s", "3×10¹⁰ m/s", "3×10⁴ m/s"],
        None,
    ),
    single("ما هو قانون أوم؟", &["U = R×I", "P = U×I", "E = mc²", "F = qE"], None),
    single("ما هي وحدة الطاقة؟", &["جول", "نيوتن", "واط", "أمبير"], None),
];

const BIOLOGY_SINGLE: [McqSingleSample; 5] = [
    single(
        "أين يتم التركيب الضوئي في النبات؟",
        &["البلاستيدات الخضراء", "الميتوكوندريا", "النواة", "الريبوسومات"],
        None,
    ),
    single(
        "ما هو الحمض النووي المسؤول عن نقل المعلومات الوراثية؟",
        &["DNA", "RNA", "ATP", "ADP"],
        None,
    ),
    single("كم عدد الكروموسومات في الخلية البشرية؟", &["46", "23", "48", "44"], None),
    single("ما هو العضو المسؤول عن تنقية الدم؟", &["الكلية", "القلب", "الرئة", "الكبد"], None),
    single(
        "ما هي المرحلة الأولى من الانقسام المنصف؟",
        &["الطور التمهيدي I", "الطور الاستوائي I", "الطور الانفصالي I", "الطور النهائي I"],
        None,
    ),
];

const ARABIC_SINGLE: [McqSingleSample; 5] = [
    single(
        "ما إعراب كلمة \"محمد\" في جملة: جاء محمدٌ؟",
        &["فاعل مرفوع", "مفعول به منصوب", "مبتدأ مرفوع", "خبر مرفوع"],
        None,
    ),
    single("ما هو جمع كلمة \"كتاب\"؟", &["كتب", "كتابات", "كتبة", "كاتبون"], None),
    single(
        "ما نوع الاستعارة في \"البحر يبتسم\"؟",
        &["مكنية", "تصريحية", "تمثيلية", "عنادية"],
        None,
    ),
    single(
        "ما هو البحر الشعري لـ \"مستفعلن مستفعلن مستفعلن\"؟",
        &["الرجز", "الكامل", "الوافر", "البسيط"],
        None,
    ),
    single("ما علامة نصب جمع المؤنث السالم؟", &["الكسرة", "الفتحة", "الياء", "الألف"], None),
];

const FRENCH_SINGLE: [McqSingleSample; 5] = [
    single(
        "Quel est le pluriel de \"cheval\"?",
        &["chevaux", "chevals", "chevales", "chevauxs"],
        None,
    ),
    single(
        "Quelle est la forme passive de \"Le chat mange la souris\"?",
        &[
            "La souris est mangée par le chat",
            "La souris mange le chat",
            "Le chat est mangé",
            "La souris a mangé",
        ],
        None,
    ),
    single(
        "Quel temps utilise-t-on pour une action passée achevée?",
        &["Passé composé", "Imparfait", "Présent", "Futur"],
        None,
    ),
    single("Le contraire de \"grand\" est:", &["petit", "gros", "large", "haut"], None),
    single(
        "Complétez: \"Il ___ à Paris depuis 5 ans\"",
        &["habite", "habitait", "a habité", "habitera"],
        None,
    ),
];

const ENGLISH_SINGLE: [McqSingleSample; 5] = [
    single("What is the past tense of \"go\"?", &["went", "goed", "gone", "going"], None),
    single(
        "Which sentence is correct?",
        &[
            "She has been working",
            "She have been working",
            "She has be working",
            "She have be working",
        ],
        None,
    ),
    single("The opposite of \"ancient\" is:", &["modern", "old", "antique", "historical"], None),
    single(
        "Choose the correct sentence:",
        &[
            "If I were you, I would study",
            "If I was you, I will study",
            "If I am you, I would study",
            "If I be you, I will study",
        ],
        None,
    ),
    single(
        "\"Despite\" is followed by:",
        &["a noun/gerund", "a verb", "an adjective", "a clause with subject"],
        None,
    ),
];

const PHILOSOPHY_SINGLE: [McqSingleSample; 5] = [
    single("من هو مؤسس الفلسفة الوضعية؟", &["أوغست كونت", "ديكارت", "كانط", "هيغل"], None),
    single(
        "ما هو مبدأ السببية؟",
        &["لكل علة معلول", "كل شيء نسبي", "الإنسان حر", "المعرفة فطرية"],
        None,
    ),
    single("من قال \"أنا أفكر إذن أنا موجود\"؟", &["ديكارت", "أرسطو", "أفلاطون", "سقراط"], None),
    single("ما هو موضوع الأخلاق؟", &["السلوك الإنساني", "الطبيعة", "المنطق", "الجمال"], None),
    single("من أسس المدرسة التجريبية؟", &["جون لوك", "ديكارت", "كانط", "هيغل"], None),
];

const HISTORY_SINGLE: [McqSingleSample; 5] = [
    single("متى اندلعت الحرب العالمية الأولى؟", &["1914", "1918", "1939", "1945"], None),
    single("ما هي عاصمة الجزائر؟", &["الجزائر", "وهران", "قسنطينة", "عنابة"], None),
    single("متى استقلت الجزائر؟", &["1962", "1954", "1958", "1960"], None),
    single("ما هو أطول نهر في العالم؟", &["النيل", "الأمازون", "المسيسيبي", "اليانغتسي"], None),
    single(
        "ما هي أكبر قارة من حيث المساحة؟",
        &["آسيا", "أفريقيا", "أوروبا", "أمريكا الشمالية"],
        None,
    ),
];

const ISLAMIC_SINGLE: [McqSingleSample; 5] = [
    single("كم عدد أركان الإسلام؟", &["5", "4", "6", "3"], None),
    single(
        "ما هو الركن الأول من أركان الإسلام؟",
        &["الشهادتان", "الصلاة", "الصوم", "الزكاة"],
        None,
    ),
    single("كم عدد السور في القرآن الكريم؟", &["114", "100", "120", "110"], None),
    single("في أي سنة هجرية فتحت مكة؟", &["8 هـ", "6 هـ", "10 هـ", "5 هـ"], None),
    single("ما هي الصلاة الوسطى؟", &["العصر", "الظهر", "المغرب", "العشاء"], None),
];

const MATH_MULTIPLE: [McqMultipleSample; 2] = [
    McqMultipleSample {
        text: "اختر الدوال المستمرة:",
        options: &[
            "كثيرات الحدود",
            "الدوال الجذرية",
            "الدوال المثلثية",
            "دالة الجزء الصحيح",
            "الدوال الأسية",
        ],
        correct: &[0, 2, 4],
    },
    McqMultipleSample {
        text: "اختر الأعداد الأولية:",
        options: &["2", "4", "7", "9", "11"],
        correct: &[0, 2, 4],
    },
];

const PHYSICS_MULTIPLE: [McqMultipleSample; 2] = [
    McqMultipleSample {
        text: "اختر الكميات المتجهة:",
        options: &["السرعة", "الكتلة", "القوة", "الطاقة", "التسارع"],
        correct: &[0, 2, 4],
    },
    McqMultipleSample {
        text: "اختر مصادر الطاقة المتجددة:",
        options: &["الشمسية", "النفط", "الرياح", "الفحم", "المائية"],
        correct: &[0, 2, 4],
    },
];

const BIOLOGY_MULTIPLE: [McqMultipleSample; 2] = [
    McqMultipleSample {
        text: "اختر العضيات الموجودة في الخلية الحيوانية:",
        options: &[
            "الميتوكوندريا",
            "البلاستيدات الخضراء",
            "النواة",
            "الجدار الخلوي",
            "الريبوسومات",
        ],
        correct: &[0, 2, 4],
    },
    McqMultipleSample {
        text: "اختر أنواع الأحماض النووية:",
        options: &["DNA", "ATP", "RNA", "ADP", "mRNA"],
        correct: &[0, 2, 4],
    },
];

const GENERIC_MULTIPLE: [McqMultipleSample; 1] = [McqMultipleSample {
    text: "اختر الإجابات الصحيحة:",
    options: &["إجابة 1", "إجابة 2", "إجابة 3", "إجابة 4", "إجابة 5"],
    correct: &[0, 2],
}];

const fn statement(
    text: &'static str,
    correct: bool,
    explanation: &'static str,
) -> TrueFalseSample {
    TrueFalseSample {
        text,
        correct,
        explanation: Some(explanation),
    }
}

const MATH_TRUE_FALSE: [TrueFalseSample; 3] = [
    statement("مشتقة دالة ثابتة تساوي صفر", true, "نعم، مشتقة أي ثابت تساوي صفر."),
    statement("كل عدد زوجي يقبل القسمة على 4", false, "خطأ، مثلا 2 زوجي لكن لا يقبل القسمة على 4."),
    statement("تكامل دالة موجبة دائماً موجب", false, "خطأ، يعتمد على حدود التكامل."),
];

const PHYSICS_TRUE_FALSE: [TrueFalseSample; 3] = [
    statement("الطاقة لا تفنى ولا تستحدث", true, "صحيح، هذا هو قانون حفظ الطاقة."),
    statement("سرعة الصوت أكبر من سرعة الضوء", false, "خطأ، سرعة الضوء أكبر بكثير."),
    statement(
        "الضغط يتناسب عكسياً مع الحجم عند ثبات درجة الحرارة",
        true,
        "صحيح، هذا هو قانون بويل.",
    ),
];

const BIOLOGY_TRUE_FALSE: [TrueFalseSample; 3] = [
    statement("الخلية النباتية تحتوي على جدار خلوي", true, "صحيح."),
    statement("الميتوكوندريا هي محطة توليد الطاقة في الخلية", true, "صحيح، تنتج ATP."),
    statement("DNA موجود فقط في النواة", false, "خطأ، يوجد أيضاً في الميتوكوندريا والبلاستيدات."),
];

const ARABIC_TRUE_FALSE: [TrueFalseSample; 3] = [
    statement("الفاعل دائماً مرفوع", true, "صحيح."),
    statement("المفعول به دائماً منصوب", true, "صحيح."),
    statement("الحال دائماً جملة", false, "خطأ، يمكن أن يكون مفرداً أو شبه جملة."),
];

const GENERIC_TRUE_FALSE: [TrueFalseSample; 2] = [
    TrueFalseSample {
        text: "هذه عبارة صحيحة",
        correct: true,
        explanation: None,
    },
    TrueFalseSample {
        text: "هذه عبارة خاطئة",
        correct: false,
        explanation: None,
    },
];

const fn blank(
    text: &'static str,
    answer: &'static str,
    explanation: &'static str,
) -> FillBlankSample {
    FillBlankSample {
        text,
        answer,
        explanation: Some(explanation),
    }
}

const MATH_FILL_BLANK: [FillBlankSample; 3] = [
    blank("مشتقة sin(x) هي _____", "cos(x)", "مشتقة الجيب هي جيب التمام."),
    blank("تكامل 1/x هو _____", "ln|x|+C", "تكامل 1/x يساوي اللوغاريتم الطبيعي."),
    blank("مساحة الدائرة = _____ × r²", "π", "مساحة الدائرة = πr²."),
];

const PHYSICS_FILL_BLANK: [FillBlankSample; 3] = [
    blank("وحدة قياس الشدة الكهربائية هي _____", "أمبير", "الأمبير هو وحدة الشدة."),
    blank("F = m × _____", "a", "F = ma هو قانون نيوتن الثاني."),
    blank("سرعة الضوء في الفراغ تقارب _____ × 10⁸ m/s", "3", "c ≈ 3×10⁸ m/s."),
];

const BIOLOGY_FILL_BLANK: [FillBlankSample; 3] = [
    blank("الصيغة الكيميائية للماء هي _____", "H2O", "الماء يتكون من ذرتي هيدروجين وذرة أكسجين."),
    blank("عدد الكروموسومات في الخلية البشرية هو _____", "46", "23 زوجاً من الكروموسومات."),
    blank(
        "الحمض النووي الريبي منقوص الأكسجين يرمز له بـ _____",
        "DNA",
        "DNA = Deoxyribonucleic Acid.",
    ),
];

const GENERIC_FILL_BLANK: [FillBlankSample; 1] = [FillBlankSample {
    text: "أكمل الفراغ: _____",
    answer: "الإجابة",
    explanation: None,
}];

/// Single-answer questions for a family, mathematics when it has none
#[must_use]
pub fn mcq_single(family: Option<SubjectFamily>) -> &'static [McqSingleSample] {
    match family {
        Some(SubjectFamily::Physics) => &PHYSICS_SINGLE,
        Some(SubjectFamily::Biology) => &BIOLOGY_SINGLE,
        Some(SubjectFamily::Arabic) => &ARABIC_SINGLE,
        Some(SubjectFamily::French) => &FRENCH_SINGLE,
        Some(SubjectFamily::English) => &ENGLISH_SINGLE,
        Some(SubjectFamily::Philosophy) => &PHILOSOPHY_SINGLE,
        Some(SubjectFamily::HistoryGeo) => &HISTORY_SINGLE,
        Some(SubjectFamily::Islamic) => &ISLAMIC_SINGLE,
        _ => &MATH_SINGLE,
    }
}

/// Multiple-answer questions for a family
#[must_use]
pub fn mcq_multiple(family: Option<SubjectFamily>) -> &'static [McqMultipleSample] {
    match family {
        Some(SubjectFamily::Mathematics) => &MATH_MULTIPLE,
        Some(SubjectFamily::Physics) => &PHYSICS_MULTIPLE,
        Some(SubjectFamily::Biology) => &BIOLOGY_MULTIPLE,
        _ => &GENERIC_MULTIPLE,
    }
}

/// True/false statements for a family
#[must_use]
pub fn true_false(family: Option<SubjectFamily>) -> &'static [TrueFalseSample] {
    match family {
        Some(SubjectFamily::Mathematics) => &MATH_TRUE_FALSE,
        Some(SubjectFamily::Physics) => &PHYSICS_TRUE_FALSE,
        Some(SubjectFamily::Biology) => &BIOLOGY_TRUE_FALSE,
        Some(SubjectFamily::Arabic) => &ARABIC_TRUE_FALSE,
        _ => &GENERIC_TRUE_FALSE,
    }
}

/// Fill-in-the-blank questions for a family
#[must_use]
pub fn fill_blank(family: Option<SubjectFamily>) -> &'static [FillBlankSample] {
    match family {
        Some(SubjectFamily::Mathematics) => &MATH_FILL_BLANK,
        Some(SubjectFamily::Physics) => &PHYSICS_FILL_BLANK,
        Some(SubjectFamily::Biology) => &BIOLOGY_FILL_BLANK,
        _ => &GENERIC_FILL_BLANK,
    }
}

/// Quiz titles for a family, indexed by quiz position
#[must_use]
pub const fn quiz_titles(family: Option<SubjectFamily>) -> Option<&'static [&'static str; 4]> {
    match family {
        Some(SubjectFamily::Mathematics) => Some(&[
            "اختبار في الدوال",
            "اختبار في الاحتمالات",
            "اختبار في المتتاليات",
            "اختبار شامل في الرياضيات",
        ]),
        Some(SubjectFamily::Physics) => Some(&[
            "اختبار في الميكانيك",
            "اختبار في الكهرباء",
            "اختبار في البصريات",
            "اختبار شامل في الفيزياء",
        ]),
        Some(SubjectFamily::Biology) => Some(&[
            "اختبار في الوراثة",
            "اختبار في المناعة",
            "اختبار في التكاثر",
            "اختبار شامل في العلوم",
        ]),
        Some(SubjectFamily::Arabic) => Some(&[
            "اختبار في النحو",
            "اختبار في البلاغة",
            "اختبار في الأدب",
            "اختبار شامل في اللغة العربية",
        ]),
        Some(SubjectFamily::French) => Some(&[
            "Test de grammaire",
            "Test de vocabulaire",
            "Test de compréhension",
            "Test complet",
        ]),
        Some(SubjectFamily::English) => Some(&[
            "Grammar Test",
            "Vocabulary Test",
            "Reading Comprehension",
            "Full English Test",
        ]),
        Some(SubjectFamily::Philosophy) => Some(&[
            "اختبار في المنطق",
            "اختبار في الأخلاق",
            "اختبار في الميتافيزيقا",
            "اختبار شامل في الفلسفة",
        ]),
        Some(SubjectFamily::HistoryGeo) => Some(&[
            "اختبار في التاريخ المعاصر",
            "اختبار في الجغرافيا",
            "اختبار شامل",
            "اختبار في الخرائط",
        ]),
        Some(SubjectFamily::Islamic) => Some(&[
            "اختبار في العقيدة",
            "اختبار في الفقه",
            "اختبار في السيرة",
            "اختبار شامل",
        ]),
        _ => None,
    }
}

/// Extra quiz tags per difficulty
#[must_use]
pub const fn difficulty_tags(difficulty: crate::models::Difficulty) -> &'static [&'static str; 3] {
    match difficulty {
        crate::models::Difficulty::Easy => &["سهل", "مراجعة", "أساسيات"],
        crate::models::Difficulty::Medium => &["متوسط", "تطبيق", "فهم"],
        crate::models::Difficulty::Hard => &["صعب", "تحدي", "متقدم"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionPayload;

    const ALL_FAMILIES: [Option<SubjectFamily>; 15] = [
        Some(SubjectFamily::Mathematics),
        Some(SubjectFamily::Physics),
        Some(SubjectFamily::Biology),
        Some(SubjectFamily::Arabic),
        Some(SubjectFamily::French),
        Some(SubjectFamily::English),
        Some(SubjectFamily::Philosophy),
        Some(SubjectFamily::HistoryGeo),
        Some(SubjectFamily::Islamic),
        Some(SubjectFamily::Engineering),
        Some(SubjectFamily::Economics),
        Some(SubjectFamily::Law),
        Some(SubjectFamily::Accounting),
        Some(SubjectFamily::ThirdLanguage),
        None,
    ];

    #[test]
    fn test_family_from_stream_prefixed_slugs() {
        assert_eq!(
            SubjectFamily::from_slug("sciences-exp-mathematics"),
            Some(SubjectFamily::Mathematics)
        );
        assert_eq!(
            SubjectFamily::from_slug("mathematics-mathematics"),
            Some(SubjectFamily::Mathematics)
        );
        assert_eq!(
            SubjectFamily::from_slug("literature-philosophy-main"),
            Some(SubjectFamily::Philosophy)
        );
        assert_eq!(
            SubjectFamily::from_slug("management-economics-main"),
            Some(SubjectFamily::Economics)
        );
        assert_eq!(
            SubjectFamily::from_slug("languages-third-language"),
            Some(SubjectFamily::ThirdLanguage)
        );
        assert_eq!(SubjectFamily::from_slug("robotics"), None);
    }

    #[test]
    fn test_every_pool_entry_is_a_valid_payload() {
        for family in ALL_FAMILIES {
            for sample in mcq_single(family) {
                let payload = QuestionPayload::McqSingle {
                    options: sample.options.iter().map(|o| (*o).to_owned()).collect(),
                    answer: sample.correct,
                };
                assert!(payload.validate().is_ok(), "{}", sample.text);
            }
            for sample in mcq_multiple(family) {
                let payload = QuestionPayload::McqMultiple {
                    options: sample.options.iter().map(|o| (*o).to_owned()).collect(),
                    answers: sample.correct.to_vec(),
                };
                assert!(payload.validate().is_ok(), "{}", sample.text);
            }
            for sample in fill_blank(family) {
                assert!(!sample.answer.trim().is_empty());
            }
            assert!(!true_false(family).is_empty());
        }
    }
}
