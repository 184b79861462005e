use std::sync::Arc;

use ledgerlens::application::ports::ClassScores;
use ledgerlens::application::services::{
    ContentGate, ContentGateError, DEFAULT_GATE_THRESHOLD, decide,
};
use ledgerlens::infrastructure::recognition::MockImageClassifier;

use crate::helpers::fixtures::png_bytes;

#[test]
fn given_more_likely_than_not_below_threshold_when_deciding_then_accepts() {
    let decision = decide(
        ClassScores {
            target: 0.6,
            not_target: 0.4,
        },
        DEFAULT_GATE_THRESHOLD,
    );

    assert!(decision.is_target_class);
    assert_eq!(decision.confidence, 0.6);
}

#[test]
fn given_score_above_threshold_when_deciding_then_accepts() {
    let decision = decide(ClassScores::from_target_probability(0.9), 0.85);

    assert!(decision.is_target_class);
}

#[test]
fn given_less_likely_than_not_when_deciding_then_rejects() {
    let decision = decide(
        ClassScores {
            target: 0.3,
            not_target: 0.7,
        },
        DEFAULT_GATE_THRESHOLD,
    );

    assert!(!decision.is_target_class);
}

#[test]
fn given_tied_scores_below_threshold_when_deciding_then_rejects() {
    let decision = decide(
        ClassScores {
            target: 0.5,
            not_target: 0.5,
        },
        DEFAULT_GATE_THRESHOLD,
    );

    assert!(!decision.is_target_class);
}

#[test]
fn given_negative_class_logit_when_building_scores_then_they_sum_to_one() {
    let scores = ClassScores::from_not_target_logit(0.0);

    assert!((scores.target - 0.5).abs() < 1e-6);
    assert!((scores.target + scores.not_target - 1.0).abs() < 1e-6);
    assert!(ClassScores::from_not_target_logit(-4.0).target > 0.9);
}

#[tokio::test]
async fn given_png_when_classifying_then_returns_classifier_decision() {
    let gate = ContentGate::new(
        Arc::new(MockImageClassifier::new(0.6, 0.4)),
        DEFAULT_GATE_THRESHOLD,
    );

    let decision = gate.classify(&png_bytes()).await.unwrap();

    assert!(decision.is_target_class);
    assert_eq!(decision.scores.not_target, 0.4);
}

#[tokio::test]
async fn given_undecodable_bytes_when_classifying_then_returns_unsupported_media() {
    let gate = ContentGate::new(
        Arc::new(MockImageClassifier::new(0.99, 0.01)),
        DEFAULT_GATE_THRESHOLD,
    );

    let result = gate.classify(b"definitely not an image").await;

    assert!(matches!(result, Err(ContentGateError::UnsupportedMedia(_))));
}
