// ABOUTME: Academic taxonomy seeders: phases, years, BAC streams, stream subjects and coefficients
// ABOUTME: Both steps upsert by natural key so repeated runs update rows in place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::pools::SubjectFamily;
use super::taxonomy::{Leveled, NodeSink, Taxonomy};
use super::{SeedContext, SeedOutcome, SeedStep, Seeder};
use crate::database::{Database, Table};
use crate::errors::{AppError, AppResult};
use crate::models::{NewSubject, SubjectStream, BAC_LEVEL_NUMBER, SECONDARY_PHASE_SLUG};

/// Phase slug, name and number of years
const PHASES: [(&str, &str, i64); 3] = [
    ("primary", "الطور الابتدائي", 5),
    ("middle", "الطور المتوسط", 4),
    (SECONDARY_PHASE_SLUG, "الطور الثانوي", 3),
];

const ORDINALS: [&str; 5] = ["الأولى", "الثانية", "الثالثة", "الرابعة", "الخامسة"];

/// A BAC stream and the subjects examined in it
struct StreamSpec {
    slug: &'static str,
    name_ar: &'static str,
    description_ar: &'static str,
    subject_prefix: &'static str,
    /// Family, slug suffix and default coefficient
    subjects: &'static [(SubjectFamily, &'static str, i64)],
}

impl StreamSpec {
    fn subject_slug(&self, family: SubjectFamily) -> Option<String> {
        self.subjects
            .iter()
            .find(|(f, _, _)| *f == family)
            .map(|(_, suffix, _)| format!("{}-{suffix}", self.subject_prefix))
    }
}

const STREAMS: [StreamSpec; 6] = [
    StreamSpec {
        slug: "sciences-exp",
        name_ar: "علوم تجريبية",
        description_ar: "شعبة العلوم التجريبية",
        subject_prefix: "sciences-exp",
        subjects: &[
            (SubjectFamily::Mathematics, "mathematics", 5),
            (SubjectFamily::Physics, "physics", 6),
            (SubjectFamily::Biology, "biology", 6),
            (SubjectFamily::Arabic, "arabic", 2),
            (SubjectFamily::French, "french", 2),
            (SubjectFamily::English, "english", 2),
            (SubjectFamily::Philosophy, "philosophy", 2),
            (SubjectFamily::HistoryGeo, "history-geo", 2),
            (SubjectFamily::Islamic, "islamic", 2),
        ],
    },
    StreamSpec {
        slug: "mathematics",
        name_ar: "رياضيات",
        description_ar: "شعبة الرياضيات",
        subject_prefix: "mathematics",
        subjects: &[
            (SubjectFamily::Mathematics, "mathematics", 7),
            (SubjectFamily::Physics, "physics", 6),
            (SubjectFamily::Biology, "biology", 3),
            (SubjectFamily::Arabic, "arabic", 2),
            (SubjectFamily::French, "french", 2),
            (SubjectFamily::English, "english", 2),
            (SubjectFamily::Philosophy, "philosophy", 2),
            (SubjectFamily::HistoryGeo, "history-geo", 2),
            (SubjectFamily::Islamic, "islamic", 2),
        ],
    },
    StreamSpec {
        slug: "tech-math",
        name_ar: "تقني رياضي",
        description_ar: "شعبة التقني الرياضي",
        subject_prefix: "tech-math",
        subjects: &[
            (SubjectFamily::Mathematics, "mathematics", 5),
            (SubjectFamily::Physics, "physics", 5),
            (SubjectFamily::Engineering, "engineering", 5),
            (SubjectFamily::Arabic, "arabic", 2),
            (SubjectFamily::French, "french", 2),
            (SubjectFamily::English, "english", 2),
            (SubjectFamily::Philosophy, "philosophy", 2),
            (SubjectFamily::HistoryGeo, "history-geo", 2),
            (SubjectFamily::Islamic, "islamic", 2),
        ],
    },
    StreamSpec {
        slug: "management-economics",
        name_ar: "تسيير واقتصاد",
        description_ar: "شعبة التسيير والاقتصاد",
        subject_prefix: "management",
        subjects: &[
            (SubjectFamily::Mathematics, "mathematics", 3),
            (SubjectFamily::Economics, "economics-main", 5),
            (SubjectFamily::Law, "law", 3),
            (SubjectFamily::Accounting, "accounting", 4),
            (SubjectFamily::Arabic, "arabic", 2),
            (SubjectFamily::French, "french", 2),
            (SubjectFamily::English, "english", 2),
            (SubjectFamily::Philosophy, "philosophy", 2),
            (SubjectFamily::HistoryGeo, "history-geo", 2),
            (SubjectFamily::Islamic, "islamic", 2),
        ],
    },
    StreamSpec {
        slug: "literature-philosophy",
        name_ar: "آداب وفلسفة",
        description_ar: "شعبة الآداب والفلسفة",
        subject_prefix: "literature",
        subjects: &[
            (SubjectFamily::Arabic, "arabic", 5),
            (SubjectFamily::Philosophy, "philosophy-main", 7),
            (SubjectFamily::French, "french", 3),
            (SubjectFamily::HistoryGeo, "history-geo", 4),
            (SubjectFamily::English, "english", 2),
            (SubjectFamily::Islamic, "islamic", 2),
            (SubjectFamily::Mathematics, "mathematics", 2),
        ],
    },
    StreamSpec {
        slug: "foreign-languages",
        name_ar: "لغات أجنبية",
        description_ar: "شعبة اللغات الأجنبية",
        subject_prefix: "languages",
        subjects: &[
            (SubjectFamily::French, "french", 5),
            (SubjectFamily::English, "english", 5),
            (SubjectFamily::ThirdLanguage, "third-language", 4),
            (SubjectFamily::Arabic, "arabic", 3),
            (SubjectFamily::Philosophy, "philosophy", 2),
            (SubjectFamily::HistoryGeo, "history-geo", 3),
            (SubjectFamily::Islamic, "islamic", 2),
        ],
    },
];

/// Stream coefficient overrides, columns follow [`STREAMS`]
///
/// Entries without a family have no matching subject in the taxonomy.
const COEFFICIENT_OVERRIDES: [(&str, Option<SubjectFamily>, [Option<i64>; 6]); 15] = [
    ("arabic", Some(SubjectFamily::Arabic), [Some(3), Some(3), Some(2), Some(3), Some(5), Some(3)]),
    ("french", Some(SubjectFamily::French), [Some(2), Some(2), Some(2), Some(2), Some(3), Some(4)]),
    (
        "english",
        Some(SubjectFamily::English),
        [Some(2), Some(2), Some(2), Some(2), Some(2), Some(4)],
    ),
    ("islamic", Some(SubjectFamily::Islamic), [Some(2); 6]),
    (
        "history_geo",
        Some(SubjectFamily::HistoryGeo),
        [Some(2), Some(2), Some(2), Some(3), Some(4), Some(3)],
    ),
    (
        "philosophy",
        Some(SubjectFamily::Philosophy),
        [Some(2), Some(2), Some(2), Some(2), Some(6), Some(3)],
    ),
    (
        "maths",
        Some(SubjectFamily::Mathematics),
        [Some(5), Some(7), Some(5), Some(3), Some(2), Some(2)],
    ),
    (
        "physics",
        Some(SubjectFamily::Physics),
        [Some(5), Some(6), Some(5), Some(2), Some(2), Some(2)],
    ),
    ("biology", Some(SubjectFamily::Biology), [Some(6), Some(4), None, None, None, None]),
    ("electrical_eng", Some(SubjectFamily::Engineering), [None, None, Some(5), None, None, None]),
    ("mechanical_eng", None, [None, None, Some(5), None, None, None]),
    ("process_eng", None, [None, None, Some(5), None, None, None]),
    ("economy", Some(SubjectFamily::Economics), [None, None, None, Some(6), None, None]),
    ("accounting", Some(SubjectFamily::Accounting), [None, None, None, Some(5), None, None]),
    ("law", Some(SubjectFamily::Law), [None, None, None, Some(3), None, None]),
];

/// One row of the academic tree
#[derive(Debug, Clone)]
enum AcademicNode {
    Phase {
        slug: &'static str,
        name_ar: &'static str,
    },
    Year {
        name_ar: String,
        level_number: i64,
    },
    Stream {
        slug: &'static str,
        name_ar: &'static str,
        description_ar: &'static str,
    },
    Subject {
        family: SubjectFamily,
        slug: String,
        coefficient: i64,
    },
}

impl Leveled for AcademicNode {
    fn rank(&self) -> u8 {
        match self {
            Self::Phase { .. } => 0,
            Self::Year { .. } => 1,
            Self::Stream { .. } => 2,
            Self::Subject { .. } => 3,
        }
    }

    fn title(&self) -> &str {
        match self {
            Self::Phase { slug, .. } | Self::Stream { slug, .. } => slug,
            Self::Year { name_ar, .. } => name_ar,
            Self::Subject { slug, .. } => slug,
        }
    }
}

fn phase_suffix(slug: &str) -> &'static str {
    match slug {
        "primary" => "ابتدائي",
        "middle" => "متوسط",
        _ => "ثانوي",
    }
}

/// Full academic tree: every phase and year, streams on the BAC year only
fn academic_tree() -> AppResult<Taxonomy<AcademicNode>> {
    let mut tree = Taxonomy::new();
    for (slug, name_ar, years) in PHASES {
        let phase = tree.root(AcademicNode::Phase { slug, name_ar });
        for level_number in 1..=years {
            let ordinal = ORDINALS
                .get((level_number - 1) as usize)
                .ok_or_else(|| AppError::internal(format!("no ordinal for year {level_number}")))?;
            let year = tree.child(
                phase,
                AcademicNode::Year {
                    name_ar: format!("السنة {ordinal} {}", phase_suffix(slug)),
                    level_number,
                },
            )?;

            if slug != SECONDARY_PHASE_SLUG || level_number != BAC_LEVEL_NUMBER {
                continue;
            }
            for spec in &STREAMS {
                let stream = tree.child(
                    year,
                    AcademicNode::Stream {
                        slug: spec.slug,
                        name_ar: spec.name_ar,
                        description_ar: spec.description_ar,
                    },
                )?;
                for (family, suffix, coefficient) in spec.subjects {
                    tree.child(
                        stream,
                        AcademicNode::Subject {
                            family: *family,
                            slug: format!("{}-{suffix}", spec.subject_prefix),
                            coefficient: *coefficient,
                        },
                    )?;
                }
            }
        }
    }
    Ok(tree)
}

/// Upserts academic rows, remembering the year of each stream for its subjects
struct AcademicSink<'a> {
    db: &'a Database,
    stream_years: HashMap<i64, i64>,
}

#[async_trait]
impl NodeSink<AcademicNode> for AcademicSink<'_> {
    async fn create(
        &mut self,
        node: &AcademicNode,
        parent_id: Option<i64>,
        sort_order: i64,
    ) -> AppResult<Option<i64>> {
        let id = match (node, parent_id) {
            (AcademicNode::Phase { slug, name_ar }, None) => {
                self.db.upsert_phase(name_ar, slug, sort_order).await?
            }
            (
                AcademicNode::Year {
                    name_ar,
                    level_number,
                },
                Some(phase_id),
            ) => {
                self.db
                    .upsert_year(phase_id, name_ar, *level_number, sort_order)
                    .await?
            }
            (
                AcademicNode::Stream {
                    slug,
                    name_ar,
                    description_ar,
                },
                Some(year_id),
            ) => {
                let id = self
                    .db
                    .upsert_stream(year_id, name_ar, slug, Some(description_ar), sort_order)
                    .await?;
                self.stream_years.insert(id, year_id);
                id
            }
            (
                AcademicNode::Subject {
                    family,
                    slug,
                    coefficient,
                },
                Some(stream_id),
            ) => {
                let Some(year_id) = self.stream_years.get(&stream_id).copied() else {
                    return Ok(None);
                };
                let subject = NewSubject {
                    academic_stream_id: Some(stream_id),
                    academic_year_id: year_id,
                    name_ar: family.name_ar().to_owned(),
                    slug: slug.clone(),
                    description_ar: Some(family.description_ar()),
                    coefficient: *coefficient,
                    icon: Some(family.icon().to_owned()),
                    color: Some(family.color().to_owned()),
                    sort_order,
                };
                self.db.upsert_subject(&subject).await?
            }
            (node, parent) => {
                return Err(AppError::internal(format!(
                    "academic node '{}' placed under parent {parent:?}",
                    node.title()
                )))
            }
        };
        debug!(node = node.title(), id, "Upserted academic row");
        Ok(Some(id))
    }
}

/// Phases, years, BAC streams and their subjects
pub struct AcademicStructureSeeder;

#[async_trait]
impl Seeder for AcademicStructureSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::AcademicStructure
    }

    fn requires(&self) -> &'static [Table] {
        &[]
    }

    fn provides(&self) -> &'static [Table] {
        &[
            Table::AcademicPhases,
            Table::AcademicYears,
            Table::AcademicStreams,
            Table::Subjects,
        ]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let tree = academic_tree()?;
        let mut sink = AcademicSink {
            db: ctx.db,
            stream_years: HashMap::new(),
        };
        let report = tree.build(&mut sink).await?;
        info!(
            rows = report.created_count(),
            skipped = report.skipped_count(),
            "Academic structure seeded"
        );
        Ok(SeedOutcome::completed(report.created_count() as u64))
    }
}

/// Per-stream coefficient overrides
pub struct SubjectCoefficientsSeeder;

#[async_trait]
impl Seeder for SubjectCoefficientsSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::SubjectCoefficients
    }

    fn requires(&self) -> &'static [Table] {
        &[Table::Subjects, Table::AcademicStreams]
    }

    fn provides(&self) -> &'static [Table] {
        &[Table::SubjectStreams]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        let mut rows = 0;

        for (key, family, coefficients) in COEFFICIENT_OVERRIDES {
            let Some(family) = family else {
                warn!(subject = key, "No subject in the taxonomy for coefficient entry");
                continue;
            };

            for (spec, coefficient) in STREAMS.iter().zip(coefficients) {
                let Some(coefficient) = coefficient else {
                    continue;
                };
                let Some(stream) = db.get_stream_by_slug(spec.slug).await? else {
                    warn!(stream = spec.slug, "Stream not found, skipping its coefficients");
                    continue;
                };
                let subject = match spec.subject_slug(family) {
                    Some(slug) => db.get_subject_by_slug(&slug).await?,
                    None => None,
                };
                let Some(subject) = subject else {
                    debug!(subject = key, stream = spec.slug, "Subject not taught in stream");
                    continue;
                };

                db.upsert_subject_stream(&SubjectStream {
                    subject_id: subject.id,
                    academic_stream_id: stream.id,
                    coefficient,
                    category: family.category(),
                    is_active: true,
                })
                .await?;
                rows += 1;
            }
        }

        info!(rows, "Subject coefficients seeded");
        Ok(SeedOutcome::completed(rows))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_places_streams_on_the_bac_year_only() {
        let tree = academic_tree().expect("academic tree is well formed");
        let streams = tree
            .nodes()
            .iter()
            .filter(|n| matches!(n.payload, AcademicNode::Stream { .. }))
            .count();
        let years = tree
            .nodes()
            .iter()
            .filter(|n| matches!(n.payload, AcademicNode::Year { .. }))
            .count();
        assert_eq!(streams, 6);
        assert_eq!(years, 12);
    }

    #[test]
    fn test_subject_slugs_resolve_to_their_family() {
        for spec in &STREAMS {
            for (family, _, coefficient) in spec.subjects {
                let slug = spec.subject_slug(*family).expect("family listed in stream");
                assert_eq!(SubjectFamily::from_slug(&slug), Some(*family), "{slug}");
                assert!(*coefficient > 0);
            }
        }
    }
}
