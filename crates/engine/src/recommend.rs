//! Greedy, priority-tiered course selection.
//!
//! The selection is intentionally greedy and non-backtracking: tiers are
//! walked in fixed priority order, each tier exposes only its first few
//! candidates, and a course is accepted iff it still fits under the
//! credit ceiling. An early pick that blocks a later, better-fitting
//! course is never reconsidered. This mirrors the published advising
//! policy and is part of the engine's contract.

use std::collections::HashSet;

use advisor_core::{Course, logical_prefix};
use serde::Serialize;
use tracing::debug;

use crate::progress::{CompletedCourse, GraduationProgress, ProgressThresholds};

const MAJOR_TIER_CAP: usize = 3;
const LIBERAL_TIER_CAP: usize = 2;
const ELECTIVE_TIER_CAP: usize = 2;

pub const DEFAULT_MAX_CREDITS: u8 = 21;
pub const DEFAULT_POOL_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub course: Course,
    pub reason: &'static str,
    pub priority: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOutcome {
    pub progress: GraduationProgress,
    pub recommendations: Vec<Recommendation>,
    pub recommended_credits: u16,
}

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    pub max_credits: u8,
    pub pool_limit: usize,
    pub thresholds: ProgressThresholds,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self {
            max_credits: DEFAULT_MAX_CREDITS,
            pool_limit: DEFAULT_POOL_LIMIT,
            thresholds: ProgressThresholds::default(),
        }
    }
}

impl RecommendationEngine {
    pub fn recommend(
        &self,
        major_code: &str,
        completed: &[CompletedCourse],
        available: &[Course],
    ) -> RecommendationOutcome {
        let progress = GraduationProgress::assess(major_code, completed, self.thresholds);
        let pool = self.build_pool(major_code, available);

        let taken: HashSet<&str> = completed
            .iter()
            .map(|c| logical_prefix(&c.course_code))
            .collect();
        let completed_codes: HashSet<&str> =
            completed.iter().map(|c| c.course_code.as_str()).collect();

        let eligible: Vec<&Course> = pool
            .iter()
            .filter(|c| !taken.contains(logical_prefix(&c.course_code)))
            .filter(|c| prerequisites_met(c, &completed_codes))
            .copied()
            .collect();

        let major_tier: Vec<&Course> = eligible
            .iter()
            .filter(|c| c.department_code == major_code)
            .take(MAJOR_TIER_CAP)
            .copied()
            .collect();
        let liberal_tier: Vec<&Course> = if progress.remaining_liberal() > 0 {
            eligible
                .iter()
                .filter(|c| c.course_type.is_liberal())
                .take(LIBERAL_TIER_CAP)
                .copied()
                .collect()
        } else {
            Vec::new()
        };
        let elective_tier: Vec<&Course> = eligible
            .iter()
            .filter(|c| c.department_code == major_code)
            .take(ELECTIVE_TIER_CAP)
            .copied()
            .collect();

        let tiers: [(&[&Course], &'static str, u8); 3] = [
            (&major_tier, "전공 필수 과목", 1),
            (&liberal_tier, "교양 요건 충족", 2),
            (&elective_tier, "전공 심화 과목", 3),
        ];

        let max_credits = u16::from(self.max_credits);
        let mut recommendations: Vec<Recommendation> = Vec::new();
        let mut selected_prefixes: HashSet<String> = HashSet::new();
        let mut current_credits = 0u16;

        'tiers: for (candidates, reason, priority) in tiers {
            if current_credits >= max_credits {
                break;
            }
            for course in candidates {
                let credits = u16::from(course.credits);
                if current_credits + credits > max_credits {
                    continue;
                }
                let prefix = logical_prefix(&course.course_code).to_string();
                if !selected_prefixes.insert(prefix) {
                    continue;
                }
                recommendations.push(Recommendation {
                    course: (*course).clone(),
                    reason,
                    priority,
                });
                current_credits += credits;
                if current_credits >= max_credits {
                    break 'tiers;
                }
            }
        }

        debug!(
            selected = recommendations.len(),
            credits = current_credits,
            "recommendation pass complete"
        );
        RecommendationOutcome {
            progress,
            recommendations,
            recommended_credits: current_credits,
        }
    }

    /// Pool: the student's own department plus fixed liberal-arts types,
    /// capped at `pool_limit` rows, then deduplicated so only the first
    /// course per 5-character prefix survives.
    fn build_pool<'a>(&self, major_code: &str, available: &'a [Course]) -> Vec<&'a Course> {
        let mut seen = HashSet::new();
        available
            .iter()
            .filter(|c| c.department_code == major_code || c.course_type.is_liberal())
            .take(self.pool_limit)
            .filter(|c| seen.insert(logical_prefix(&c.course_code).to_string()))
            .collect()
    }
}

fn prerequisites_met(course: &Course, completed_codes: &HashSet<&str>) -> bool {
    course
        .prerequisites
        .iter()
        .all(|code| completed_codes.contains(code.as_str()))
}
