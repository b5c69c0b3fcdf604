use crate::config::{WorkpackageConfig, pick};
use crate::error::GenerateError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Windows up to this many minutes only get single, short tasks.
pub const SIMPLE_WINDOW_MINUTES: i64 = 480;
pub const MAX_REQUIREMENTS: usize = 5;

const LONG_TASK_MIN: i64 = 120;
const LONG_TASK_CAP: i64 = 1500;
const SHORT_TASK_MIN: i64 = 30;
const SHIFT_MINUTES: i64 = 240;

/// What a requirement asks for: a scope of work or a technician skill, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Demand {
    #[serde(rename = "scopeValue")]
    Scope(String),
    #[serde(rename = "skillValue")]
    Skill(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeRequirement {
    pub total_minutes: i64,
    pub quantity: i64,
    #[serde(flatten)]
    pub demand: Demand,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effort {
    pub total_minutes: i64,
    pub quantity: i64,
}

impl Effort {
    pub fn draw<R: Rng>(rng: &mut R, window_minutes: i64) -> Effort {
        if window_minutes > SIMPLE_WINDOW_MINUTES {
            let total_minutes = rng.gen_range(LONG_TASK_MIN..=window_minutes.min(LONG_TASK_CAP));
            if total_minutes <= SIMPLE_WINDOW_MINUTES {
                return Effort { total_minutes, quantity: 1 };
            }
            let max_quantity = window_minutes / SHIFT_MINUTES;
            Effort {
                total_minutes,
                quantity: rng.gen_range(max_quantity / 2..=max_quantity),
            }
        } else {
            // a window shorter than the usual minimum task caps the task at the window
            let available = window_minutes.max(1);
            Effort {
                total_minutes: rng.gen_range(SHORT_TASK_MIN.min(available)..=available),
                quantity: 1,
            }
        }
    }
}

/// Outcome of one generation round. Collisions are dropped, not redrawn, so
/// `requirements` can be shorter than `requested`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementBatch {
    pub requested: usize,
    pub requirements: Vec<ScopeRequirement>,
}

impl RequirementBatch {
    pub fn dropped(&self) -> usize {
        self.requested - self.requirements.len()
    }
}

fn draw_requirement<R: Rng>(
    rng: &mut R,
    window_minutes: i64,
    config: &WorkpackageConfig,
) -> Result<ScopeRequirement, GenerateError> {
    let use_scope = rng.gen_bool(0.5);
    let effort = Effort::draw(rng, window_minutes);
    let demand = if use_scope {
        Demand::Scope(pick(rng, &config.scope_values, "scope values")?.to_string())
    } else {
        Demand::Skill(pick(rng, &config.skill_values, "skill values")?.to_string())
    };
    Ok(ScopeRequirement {
        total_minutes: effort.total_minutes,
        quantity: effort.quantity,
        demand,
        index: 0,
    })
}

pub fn generate_requirements<R: Rng>(
    rng: &mut R,
    window_minutes: i64,
    config: &WorkpackageConfig,
) -> Result<RequirementBatch, GenerateError> {
    let requested = rng.gen_range(1..=MAX_REQUIREMENTS);
    let mut requirements: Vec<ScopeRequirement> = Vec::with_capacity(requested);

    for _ in 0..requested {
        let candidate = draw_requirement(rng, window_minutes, config)?;
        if requirements.iter().any(|r| r.demand == candidate.demand) {
            tracing::trace!(demand = ?candidate.demand, "duplicate requirement dropped");
            continue;
        }
        requirements.push(candidate);
    }

    for (i, requirement) in requirements.iter_mut().enumerate() {
        requirement.index = i + 1;
    }
    Ok(RequirementBatch {
        requested,
        requirements,
    })
}
