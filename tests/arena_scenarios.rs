use snake_arena::game::{
    Arena, ArenaError, Cell, DeathCause, Decision, Direction, GameConfig, Phase, StepResult,
};

/// 7 x 7 cells with walls leaves a 5 x 5 playing field
fn five_by_five() -> GameConfig {
    GameConfig::new(7, 7).with_seed(1)
}

#[test]
fn first_up_moves_one_cell() {
    let mut arena = Arena::new(five_by_five(), 0).unwrap();
    let start = arena.head();
    assert_eq!(arena.snake().len(), 1);
    assert_eq!(arena.phase(), Phase::NotStarted);

    let decision = Decision::new(Direction::Up, true);
    assert!(decision.changed);
    let result = arena.advance(decision).unwrap();

    assert!(matches!(result, StepResult::Moved(_)));
    assert_eq!(arena.direction(), Some(Direction::Up));
    assert_eq!(arena.head(), Cell::new(start.x, start.y - arena.square_size()));
    assert_eq!(arena.phase(), Phase::Running);
    assert_eq!(arena.moves(), 1);
    assert!(arena.is_consistent());
}

#[test]
fn too_small_board_is_rejected() {
    assert!(matches!(
        Arena::new(GameConfig::new(4, 7), 0),
        Err(ArenaError::Config(_))
    ));
    let mut config = GameConfig::default();
    config.width = 410;
    assert!(matches!(Arena::new(config, 0), Err(ArenaError::Config(_))));
}

#[test]
fn moving_into_an_obstacle_ends_the_episode() {
    // Every interior cell except the two start cells becomes an obstacle
    let config = GameConfig::small().with_seed(5).with_obstacles(62);
    let mut arena = Arena::new(config, 0).unwrap();
    assert_eq!(arena.obstacles().len(), 62);
    let left = arena.geometry().step(arena.head(), Direction::Left);
    assert!(arena.obstacles().contains(&left));

    let result = arena.advance(Decision::new(Direction::Left, true)).unwrap();
    let StepResult::Ended(summary) = result else {
        panic!("expected the episode to end, got {result:?}");
    };
    assert_eq!(summary.cause, DeathCause::Obstacle);
    assert_eq!(summary.score, 0);
    assert_eq!(arena.score(), 0);
    assert_eq!(arena.phase(), Phase::Over);
    assert_eq!(arena.death_cause().map(|c| c.as_str()), Some("obstacle"));

    // Nothing moves once the episode is over
    let head = arena.head();
    assert_eq!(
        arena.advance(Decision::new(Direction::Up, true)).unwrap(),
        StepResult::Idle
    );
    assert_eq!(arena.head(), head);
}

#[test]
fn stalling_ends_right_after_the_limit() {
    let mut config = GameConfig::large().with_seed(3);
    config.stall_limit = 40;
    let mut arena = Arena::new(config, 0).unwrap();

    // Circle through a 2 x 2 block; keep trying seeds until the food is
    // placed outside it
    let path: Vec<Direction> = (0..42)
        .map(|i| [Direction::Up, Direction::Right, Direction::Down, Direction::Left][i % 4])
        .collect();
    let mut seed = 3;
    loop {
        let mut probe = arena.head();
        let food = arena.food().unwrap();
        let clear = path.iter().all(|&dir| {
            probe = arena.geometry().step(probe, dir);
            probe != food
        });
        if clear {
            break;
        }
        seed += 1;
        let mut config = GameConfig::large().with_seed(seed);
        config.stall_limit = 40;
        arena = Arena::new(config, 0).unwrap();
    }

    for (i, &dir) in path.iter().take(41).enumerate() {
        let result = arena.advance(Decision::new(dir, true)).unwrap();
        assert!(!result.terminated(), "ended early at move {i}");
    }
    assert_eq!(arena.moves_since_last_score(), 41);

    let result = arena.advance(Decision::new(path[41], true)).unwrap();
    let StepResult::Ended(summary) = result else {
        panic!("expected a stall, got {result:?}");
    };
    assert_eq!(summary.cause, DeathCause::Stalled);
    assert_eq!(summary.moves, 41);
}

#[test]
fn reversal_is_rejected_without_side_effects() {
    let mut arena = Arena::new(five_by_five(), 0).unwrap();
    arena.advance(Decision::new(Direction::Left, true)).unwrap();
    let head = arena.head();

    let err = arena
        .advance(Decision::new(Direction::Right, true))
        .unwrap_err();
    assert_eq!(
        err,
        ArenaError::InvalidMove {
            requested: Some(Direction::Right),
            previous: Some(Direction::Left),
        }
    );
    assert_eq!(arena.head(), head);
    assert_eq!(arena.direction(), Some(Direction::Left));
    assert_eq!(arena.moves(), 1);
}

#[test]
fn restart_carries_the_high_score() {
    let mut arena = Arena::new(GameConfig::small().with_seed(2), 4).unwrap();
    arena.advance(Decision::new(Direction::Left, true)).unwrap();
    arena.restart();
    assert_eq!(arena.high_score(), 4);
    assert_eq!(arena.phase(), Phase::NotStarted);
    assert_eq!(arena.direction(), None);
    assert_eq!(arena.snake().len(), 1);
    assert!(arena.is_consistent());
}

#[test]
fn running_into_the_bottom_wall_ends_the_episode() {
    let mut arena = Arena::new(five_by_five(), 0).unwrap();
    let y_bottom = arena.bounds().y_bottom;
    let mut moves = 0;
    let summary = loop {
        let food = arena.food();
        match arena.advance(Decision::new(Direction::Down, true)).unwrap() {
            StepResult::Ended(summary) => break summary,
            StepResult::Moved(info) => {
                moves += 1;
                assert_eq!(info.ate_food, food == Some(arena.head()));
            }
            StepResult::Idle => panic!("arena went idle"),
        }
    };
    assert_eq!(summary.cause, DeathCause::Wall);
    assert_eq!(arena.head().y, y_bottom - arena.square_size());
    assert_eq!(arena.final_position().y, y_bottom);
    assert!(moves >= 1);
    assert!(arena.is_consistent());
}
