use tracing::trace;

use super::sensor::{encode, Features};
use super::Controller;
use crate::game::{ArenaError, ArenaView, Decision, Direction, Phase, Turn};

/// The boundary to whatever maps sensor features to action scores.
///
/// Output index 0 means keep straight, 1 turn right, anything higher turn
/// left. Closures `FnMut(&Features) -> Vec<f32>` qualify.
pub trait DecisionFunction {
    fn activate(&mut self, features: &Features) -> Vec<f32>;
}

impl<F> DecisionFunction for F
where
    F: FnMut(&Features) -> Vec<f32>,
{
    fn activate(&mut self, features: &Features) -> Vec<f32> {
        self(features)
    }
}

/// Index of the largest output. On ties the lowest index wins: the scan
/// runs from the last index down and every equal value replaces the best.
pub fn argmax_lowest(outputs: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &value) in outputs.iter().enumerate().rev() {
        match best {
            Some((_, best_value)) if value < best_value => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Controller that senses the board and defers the choice to a
/// [`DecisionFunction`].
///
/// Before the first move there is no heading to sense relative to, so the
/// first decision is always `Up` with `changed = true`.
pub struct LearnedController<D> {
    decision: D,
}

impl<D: DecisionFunction> LearnedController<D> {
    pub fn new(decision: D) -> Self {
        Self { decision }
    }

    pub fn decision_function(&self) -> &D {
        &self.decision
    }
}

impl<D: DecisionFunction> Controller for LearnedController<D> {
    fn kind(&self) -> &'static str {
        "learned"
    }

    fn decide(&mut self, view: &ArenaView<'_>) -> Result<Decision, ArenaError> {
        if view.phase() == Phase::Over {
            return Err(ArenaError::InvalidState(
                "decision requested after the episode ended".into(),
            ));
        }

        let Some(heading) = view.direction() else {
            return Ok(Decision::new(Direction::Up, true));
        };

        let features = encode(view)?;
        let outputs = self.decision.activate(&features);
        let index = argmax_lowest(&outputs).ok_or_else(|| {
            ArenaError::InvalidState("decision function returned no outputs".into())
        })?;
        trace!(?features, ?outputs, index, "learned decision");

        let turn = Turn::from_index(index);
        Ok(Decision::new(heading.turned(turn), turn != Turn::Straight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Arena, GameConfig, StepResult};

    #[test]
    fn test_argmax_picks_largest() {
        assert_eq!(argmax_lowest(&[0.1, 0.6, 0.2]), Some(1));
        assert_eq!(argmax_lowest(&[0.9, 0.6, 0.2]), Some(0));
        assert_eq!(argmax_lowest(&[-3.0, -2.0, -1.0]), Some(2));
        assert_eq!(argmax_lowest(&[]), None);
    }

    #[test]
    fn test_argmax_ties_go_to_lowest_index() {
        assert_eq!(argmax_lowest(&[0.5, 0.5, 0.5]), Some(0));
        assert_eq!(argmax_lowest(&[0.1, 0.7, 0.7]), Some(1));
        assert_eq!(argmax_lowest(&[0.0, 0.0]), Some(0));
    }

    #[test]
    fn test_first_decision_defaults_to_up() {
        let arena = Arena::new(GameConfig::small().with_seed(1), 0).unwrap();
        let mut controller = LearnedController::new(|_: &Features| vec![0.0, 1.0, 0.0]);
        let decision = controller.decide(&arena.view()).unwrap();
        assert_eq!(decision, Decision::new(Direction::Up, true));
    }

    #[test]
    fn test_outputs_map_to_relative_turns() {
        let mut arena = Arena::new(GameConfig::large().with_seed(1), 0).unwrap();
        let mut straight = LearnedController::new(|_: &Features| vec![1.0, 0.0, 0.0]);
        let first = straight.decide(&arena.view()).unwrap();
        arena.advance(first).unwrap();

        let view = arena.view();
        assert_eq!(
            straight.decide(&view).unwrap(),
            Decision::new(Direction::Up, false)
        );

        let mut right = LearnedController::new(|_: &Features| vec![0.0, 1.0, 0.0]);
        assert_eq!(
            right.decide(&view).unwrap(),
            Decision::new(Direction::Right, true)
        );

        let mut left = LearnedController::new(|_: &Features| vec![0.0, 0.0, 1.0]);
        assert_eq!(
            left.decide(&view).unwrap(),
            Decision::new(Direction::Left, true)
        );
    }

    #[test]
    fn test_features_reach_decision_function() {
        let mut arena = Arena::new(GameConfig::small().with_seed(9), 0).unwrap();
        let mut seen = Vec::new();
        {
            let mut controller = LearnedController::new(|f: &Features| {
                seen.push(*f);
                vec![1.0]
            });
            let first = controller.decide(&arena.view()).unwrap();
            arena.advance(first).unwrap();
            controller.decide(&arena.view()).unwrap();
        }
        assert_eq!(seen.len(), 1);
        assert!(seen[0][3] >= -1.0 && seen[0][3] <= 1.0);
    }

    #[test]
    fn test_empty_outputs_are_invalid_state() {
        let mut arena = Arena::new(GameConfig::small().with_seed(9), 0).unwrap();
        let mut controller = LearnedController::new(|_: &Features| Vec::new());
        let first = controller.decide(&arena.view()).unwrap();
        arena.advance(first).unwrap();
        assert!(matches!(
            controller.decide(&arena.view()),
            Err(ArenaError::InvalidState(_))
        ));
    }

    #[test]
    fn test_deciding_after_game_over_is_invalid_state() {
        let mut arena = Arena::new(GameConfig::small().with_seed(9), 0).unwrap();
        let mut controller = LearnedController::new(|_: &Features| vec![1.0, 0.0, 0.0]);
        loop {
            let decision = controller.decide(&arena.view()).unwrap();
            if let StepResult::Ended(_) = arena.advance(decision).unwrap() {
                break;
            }
        }
        assert!(matches!(
            controller.decide(&arena.view()),
            Err(ArenaError::InvalidState(_))
        ));
    }

    #[test]
    fn test_learned_decisions_are_always_legal() {
        let mut arena = Arena::new(GameConfig::large().with_seed(17).with_obstacles(20), 0).unwrap();
        let mut flip = 0usize;
        let mut controller = LearnedController::new(move |_: &Features| {
            flip += 1;
            let mut out = vec![0.0; 3];
            out[flip % 3] = 1.0;
            out
        });
        for _ in 0..2_000 {
            let decision = controller.decide(&arena.view()).unwrap();
            if arena.advance(decision).unwrap().terminated() {
                break;
            }
        }
        assert!(arena.is_over());
    }
}
