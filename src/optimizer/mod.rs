//! Heuristic rewrite-and-score engine.
//!
//! No model is called: the rewrite is a deterministic two-stage
//! transformation (level boilerplate, then goal rules in fixed order) and the
//! scores are a level-based heuristic with bounded random offsets. The random
//! source is injectable so tests can pin exact values with a seeded rng;
//! production uses a fresh thread rng per call.

mod types;

pub use types::{Goal, Level, OptimizationRequest, OptimizationResult, Scores};

use rand::Rng;

use crate::error::ValidationError;

/// Simulate an optimization pass over the request with a fresh random source.
pub fn optimize(request: &OptimizationRequest) -> Result<OptimizationResult, ValidationError> {
    optimize_with_rng(request, &mut rand::rng())
}

/// Simulate an optimization pass with a caller-supplied random source.
///
/// Stage one keys prefix, suffix and the seed notes off the level. Stage two
/// walks the goal set in rule order (Clarity, Conciseness, Structure, Depth)
/// appending one note per goal; Structure is the only goal that rewrites the
/// body itself, wrapping it in Context/Instructions sections.
pub fn optimize_with_rng<R: Rng + ?Sized>(
    request: &OptimizationRequest,
    rng: &mut R,
) -> Result<OptimizationResult, ValidationError> {
    if request.prompt.is_empty() {
        return Err(ValidationError::EmptyPrompt);
    }

    let level = request.level;
    let mut explanation: Vec<String> = level.notes().iter().map(ToString::to_string).collect();

    let mut body = request.prompt.clone();
    for goal in &request.goals {
        if *goal == Goal::Structure {
            body = format!("# Context\n{body}\n\n# Instructions\n- Follow the guidelines below...");
        }
        explanation.push(goal.note().to_string());
    }

    let prompt = format!("{}\n{}{}", level.prefix(), body, level.suffix());
    let scores = score(level, rng);

    Ok(OptimizationResult {
        prompt,
        explanation,
        scores,
    })
}

/// Per-axis offset ranges added to the level baseline, inclusive.
pub const CLARITY_OFFSET: (i16, i16) = (5, 15);
pub const CONCISENESS_OFFSET: (i16, i16) = (-5, 10);
pub const STRUCTURE_OFFSET: (i16, i16) = (0, 15);
pub const DEPTH_OFFSET: (i16, i16) = (-5, 15);

fn score<R: Rng + ?Sized>(level: Level, rng: &mut R) -> Scores {
    let base = i16::from(level.base_score());
    let clarity = clamp_score(base + rng.random_range(CLARITY_OFFSET.0..=CLARITY_OFFSET.1));
    let conciseness =
        clamp_score(base + rng.random_range(CONCISENESS_OFFSET.0..=CONCISENESS_OFFSET.1));
    let structure = clamp_score(base + rng.random_range(STRUCTURE_OFFSET.0..=STRUCTURE_OFFSET.1));
    let depth = clamp_score(base + rng.random_range(DEPTH_OFFSET.0..=DEPTH_OFFSET.1));
    Scores::derive(clarity, conciseness, structure, depth)
}

fn clamp_score(value: i16) -> u8 {
    u8::try_from(value.clamp(0, 100)).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn request(level: Level, goals: &[Goal]) -> OptimizationRequest {
        OptimizationRequest::new("Write a poem")
            .with_level(level)
            .with_goals(goals.iter().copied())
    }

    #[test]
    fn empty_prompt_rejected_regardless_of_goals_and_level() {
        for level in [Level::Light, Level::Moderate, Level::Aggressive] {
            let req = OptimizationRequest::new("").with_level(level).with_goals([
                Goal::Clarity,
                Goal::Structure,
            ]);
            assert_eq!(optimize(&req), Err(ValidationError::EmptyPrompt));
        }
    }

    #[test]
    fn structure_goal_wraps_body_inside_moderate_boilerplate() {
        let result = optimize(&request(Level::Moderate, &[Goal::Structure])).unwrap();
        assert!(result.prompt.contains(
            "# Context\nWrite a poem\n\n# Instructions\n- Follow the guidelines below..."
        ));
        assert!(result.prompt.starts_with("[Optimized] \n# Context"));
        assert!(
            result
                .prompt
                .ends_with("\n\nEnsure the output strictly follows these guidelines.")
        );
        assert!(
            result
                .explanation
                .contains(&"Applied markdown formatting for better structure.".to_string())
        );
    }

    #[test]
    fn light_level_has_no_suffix() {
        let result = optimize(&request(Level::Light, &[])).unwrap();
        assert_eq!(result.prompt, "[Refined] \nWrite a poem");
        assert_eq!(
            result.explanation,
            vec!["Corrected minor grammatical inconsistencies.".to_string()]
        );
    }

    #[test]
    fn goal_notes_follow_rule_order_not_selection_order() {
        let result = optimize(&request(
            Level::Light,
            &[Goal::Depth, Goal::Clarity, Goal::Conciseness],
        ))
        .unwrap();
        assert_eq!(
            result.explanation[1..],
            [
                "Removed ambiguous terms to improve clarity.".to_string(),
                "Reduced word count by removing redundancy.".to_string(),
                "Expanded context requirements for deeper analysis.".to_string(),
            ]
        );
    }

    #[test]
    fn rewrite_is_deterministic_for_fixed_inputs() {
        let req = request(Level::Aggressive, &[Goal::Structure, Goal::Depth]);
        let first = optimize(&req).unwrap();
        let second = optimize(&req).unwrap();
        assert_eq!(first.prompt, second.prompt);
        assert_eq!(first.explanation, second.explanation);
    }

    #[test]
    fn sub_scores_stay_within_their_offset_bands() {
        for level in [Level::Light, Level::Moderate, Level::Aggressive] {
            let base = i16::from(level.base_score());
            for _ in 0..50 {
                let scores = optimize(&request(level, &[])).unwrap().scores;
                assert_in_band(scores.clarity, base, CLARITY_OFFSET);
                assert_in_band(scores.conciseness, base, CONCISENESS_OFFSET);
                assert_in_band(scores.structure, base, STRUCTURE_OFFSET);
                assert_in_band(scores.depth, base, DEPTH_OFFSET);
                assert!(scores.overall >= scores.min_sub_score());
                assert!(scores.overall <= scores.max_sub_score());
            }
        }
    }

    fn assert_in_band(value: u8, base: i16, (lo, hi): (i16, i16)) {
        let value = i16::from(value);
        assert!(value >= (base + lo).clamp(0, 100), "{value} below {base}+{lo}");
        assert!(value <= (base + hi).clamp(0, 100), "{value} above {base}+{hi}");
    }

    #[test]
    fn aggressive_scores_respect_raised_floor() {
        for _ in 0..50 {
            let scores = optimize(&request(Level::Aggressive, &[])).unwrap().scores;
            assert!(scores.clarity >= 90);
            assert!(scores.conciseness >= 80);
            assert!(scores.structure >= 85);
            assert!(scores.depth >= 80);
        }
    }

    #[test]
    fn seeded_rng_makes_scores_reproducible() {
        let req = request(Level::Moderate, &[Goal::Clarity]);
        let first = optimize_with_rng(&req, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = optimize_with_rng(&req, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn overall_matches_truncated_mean_of_subscores() {
        let scores = optimize(&request(Level::Moderate, &[])).unwrap().scores;
        let sum = u16::from(scores.clarity)
            + u16::from(scores.conciseness)
            + u16::from(scores.structure)
            + u16::from(scores.depth);
        assert_eq!(u16::from(scores.overall), sum / 4);
    }
}
