//! Bout engine integration tests
//!
//! End-to-end scenarios through the public engine API with scripted dice,
//! so every roll and every number below is predictable.

use prizefight::bout::{
    BoutSummary, DecisionBasis, MatchEngine, MatchEvent, MatchMode, MatchPhase, TickOutcome,
    Verdict,
};
use prizefight::combat::{ActionType, Fighter, FighterAttributes};
use prizefight::core::{BoutError, Corner, DecisionRule, MatchConfig, ScriptedDice, SeededDice};

fn even_fighters() -> (Fighter, Fighter) {
    let attributes = FighterAttributes::new(7, 7, 100);
    (
        Fighter::new(Corner::Red, attributes),
        Fighter::new(Corner::Green, attributes),
    )
}

/// Constant rolls of 0.5: Red wins every initiative tie, never goes heavy,
/// lands while fresh and the defender never evades (0.5 >= 0.35).
#[test]
fn test_even_fighters_go_the_distance() {
    let (red, green) = even_fighters();
    let config = MatchConfig::new(3, 1, MatchMode::Automatic);
    let mut engine = MatchEngine::new(config, red, green, ScriptedDice::constant(0.5));
    engine.start_match(config).unwrap();

    let mut damages = Vec::new();
    loop {
        match engine.phase() {
            MatchPhase::RoundInProgress { .. } => match engine.tick() {
                TickOutcome::Resolved(outcome) => {
                    assert_eq!(outcome.attacker, Corner::Red);
                    assert_eq!(outcome.action, ActionType::Light);
                    assert!(!outcome.evaded);
                    damages.push(outcome.damage);
                }
                TickOutcome::Skipped(reason) => panic!("unexpected skip: {reason:?}"),
            },
            MatchPhase::RoundEnded => engine.start_next_round().unwrap(),
            MatchPhase::MatchFinished => break,
            MatchPhase::Idle => unreachable!(),
        }
    }

    // Endurance is fully restored between rounds, so every hit is identical
    assert_eq!(damages, vec![Some(30), Some(30), Some(30)]);
    assert_eq!(engine.total_exchanges(), 3);
    assert_eq!(engine.state().current_round, 3);
    assert_eq!(
        engine.verdict(),
        Some(Verdict::Decision {
            winner: Corner::Red,
            basis: DecisionBasis::Score
        })
    );

    let red = engine.fighter(Corner::Red);
    let green = engine.fighter(Corner::Green);
    assert_eq!(red.score, 3);
    assert_eq!(green.score, 0);
    assert_eq!(green.health, 10);
    assert!(!green.knocked_out);

    let events = engine.drain_events();
    let recoveries: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::RoundEnded { recovered, .. } => Some(*recovered),
            _ => None,
        })
        .collect();
    assert_eq!(recoveries, vec![26, 26, 26]);
    assert!(events.last().unwrap().is_match_finished());
}

#[test]
fn test_first_exchange_knockout_skips_round_end() {
    let (red, mut green) = even_fighters();
    green.health = 30;
    let config = MatchConfig::new(1, 1, MatchMode::Automatic);
    let mut engine = MatchEngine::new(config, red, green, ScriptedDice::constant(0.5));
    engine.start_match(config).unwrap();

    let outcome = match engine.tick() {
        TickOutcome::Resolved(outcome) => outcome,
        other => panic!("expected an exchange, got {other:?}"),
    };
    assert!(outcome.knockout);
    assert_eq!(engine.phase(), MatchPhase::MatchFinished);
    assert_eq!(
        engine.verdict(),
        Some(Verdict::Knockout {
            winner: Corner::Red
        })
    );
    assert_eq!(engine.total_exchanges(), 1);

    let events = engine.drain_events();
    assert!(!events
        .iter()
        .any(|e| matches!(e, MatchEvent::RoundEnded { .. })));
    assert!(events.last().unwrap().is_match_finished());

    // No corner rest happened, so the attacker keeps the drained endurance
    assert_eq!(engine.fighter(Corner::Red).endurance, 94);

    // Finished is terminal for exchanges
    assert!(matches!(engine.tick(), TickOutcome::Skipped(_)));
}

#[test]
fn test_manual_spam_inside_cooldown_is_rejected() {
    let (red, green) = even_fighters();
    let config = MatchConfig::new(2, 10, MatchMode::Manual);
    let mut engine = MatchEngine::new(config, red, green, ScriptedDice::constant(0.1));
    engine.start_match(config).unwrap();

    engine
        .manual_attack(Corner::Red, ActionType::Heavy, 10_000)
        .unwrap();
    let red_before = engine.fighter(Corner::Red).clone();
    let green_before = engine.fighter(Corner::Green).clone();
    let exchanges_before = engine.state().exchange_in_round;

    let err = engine
        .manual_attack(Corner::Red, ActionType::Light, 10_300)
        .unwrap_err();
    assert!(matches!(
        err,
        BoutError::CooldownRejected {
            fighter: Corner::Red,
            remaining_ms: 150
        }
    ));

    assert_eq!(engine.fighter(Corner::Red), &red_before);
    assert_eq!(engine.fighter(Corner::Green), &green_before);
    assert_eq!(engine.state().exchange_in_round, exchanges_before);

    // Once the gap has passed the same fighter may go again
    engine
        .manual_attack(Corner::Red, ActionType::Light, 10_450)
        .unwrap();
    assert_eq!(engine.state().exchange_in_round, exchanges_before + 1);
}

#[test]
fn test_pause_resume_without_ticks_changes_nothing() {
    let config = MatchConfig::new(4, 8, MatchMode::Automatic);
    // Every attempt misses, so the round stays live
    let mut engine = MatchEngine::with_stock_fighters(config, ScriptedDice::constant(0.99));
    engine.start_match(config).unwrap();
    for _ in 0..3 {
        engine.tick();
    }

    let before = engine.snapshot();
    engine.pause().unwrap();
    engine.resume().unwrap();
    let after = engine.snapshot();

    assert_eq!(after, before);
}

#[test]
fn test_same_seed_same_match() {
    let config = MatchConfig::new(6, 12, MatchMode::Automatic);
    let first = MatchEngine::with_stock_fighters(config, SeededDice::new(1234))
        .run_to_completion()
        .unwrap();
    let second = MatchEngine::with_stock_fighters(config, SeededDice::new(1234))
        .run_to_completion()
        .unwrap();
    assert_eq!(first, second);
}

/// One manual heavy that lands (0.3 < 0.40) and is rolled with (0.3 < 0.35):
/// Red leads 3-0 on points while Green keeps far more health.
fn heavy_against_big_green(rule: DecisionRule) -> BoutSummary {
    let (red, mut green) = even_fighters();
    green.max_health = 200;
    green.health = 200;
    let config = MatchConfig {
        decision_rule: rule,
        ..MatchConfig::new(1, 1, MatchMode::Manual)
    };
    let mut engine = MatchEngine::new(config, red, green, ScriptedDice::constant(0.3));
    engine.start_match(config).unwrap();
    let outcome = engine
        .manual_attack(Corner::Red, ActionType::Heavy, 0)
        .unwrap();
    assert!(outcome.hit && outcome.evaded && !outcome.knockout);
    assert_eq!(engine.phase(), MatchPhase::MatchFinished);
    engine.summary().unwrap()
}

#[test]
fn test_health_only_rule_ignores_score() {
    let summary = heavy_against_big_green(DecisionRule::HealthOnly);
    assert_eq!(summary.red.score, 3);
    assert_eq!(summary.green.score, 0);
    assert!(summary.green.health > summary.red.health);
    assert_eq!(
        summary.verdict,
        Verdict::Decision {
            winner: Corner::Green,
            basis: DecisionBasis::Health
        }
    );
}

#[test]
fn test_score_rule_ignores_health_lead() {
    let summary = heavy_against_big_green(DecisionRule::ScoreThenHealth);
    assert!(summary.green.health > summary.red.health);
    assert_eq!(
        summary.verdict,
        Verdict::Decision {
            winner: Corner::Red,
            basis: DecisionBasis::Score
        }
    );
}

#[test]
fn test_full_reset_returns_to_idle_with_new_attributes() {
    let config = MatchConfig::new(1, 30, MatchMode::Automatic);
    let mut engine = MatchEngine::with_stock_fighters(config, SeededDice::new(77));
    engine.run_to_completion().unwrap();

    engine.reset_match(true);
    assert_eq!(engine.phase(), MatchPhase::Idle);
    assert_eq!(engine.verdict(), None);
    assert_eq!(engine.state().current_round, 1);
    assert_eq!(engine.state().exchange_in_round, 0);

    for corner in Corner::BOTH {
        let fighter = engine.fighter(corner);
        assert!((6..=11).contains(&fighter.attributes.power));
        assert!((6..=11).contains(&fighter.attributes.accuracy));
        assert!((90..=119).contains(&fighter.attributes.endurance));
        assert_eq!(fighter.health, fighter.max_health);
        assert_eq!(fighter.endurance, fighter.attributes.endurance);
        assert_eq!(fighter.score, 0);
        assert!(!fighter.knocked_out);
    }
}
