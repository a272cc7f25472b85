//! Integration test: backward elimination end-to-end

use polars::prelude::*;
use stepdown::prelude::*;

fn regression_df() -> DataFrame {
    // y = 2*x1 - x2 exactly; noise carries no signal
    df!(
        "x1" => &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        "x2" => &[1.0, 0.0, 2.0, 1.0, 3.0, 2.0, 4.0, 3.0, 5.0, 4.0],
        "noise" => &[5.0, 3.0, 4.0, 5.0, 2.0, 4.0, 3.0, 5.0, 2.0, 3.0],
        "y" => &[-1.0, 2.0, 2.0, 5.0, 5.0, 8.0, 8.0, 11.0, 11.0, 14.0]
    )
    .unwrap()
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_noise_column_is_dropped_first() {
    let config = EliminationConfig::new(
        "y",
        TargetKind::Continuous,
        columns(&["x1", "x2", "noise"]),
    );
    let mut controller = EliminationLoopController::new(config).unwrap();
    let mut trainer = LeastSquaresTrainer::new(regression_df(), "y");

    let trace = controller.run(&mut trainer).unwrap();

    let sizes: Vec<usize> = trace.levels().iter().map(|e| e.size()).collect();
    assert_eq!(sizes, vec![3, 2, 1], "one level per surviving set size");
    assert_eq!(
        trace.levels()[1].features,
        columns(&["x1", "x2"]),
        "excluding the noise column should hurt least"
    );
    assert!(
        trace.levels()[1].error < 1e-6,
        "the informative columns reproduce the target exactly"
    );
}

#[test]
fn test_trace_sizes_strictly_decrease() {
    let df = df!(
        "f1" => &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        "f2" => &[2.0, 1.0, 4.0, 3.0, 6.0, 5.0, 8.0, 7.0],
        "f3" => &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0],
        "f4" => &[0.5, 1.5, 0.5, 1.5, 0.5, 1.5, 0.5, 1.5],
        "f5" => &[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0],
        "y"  => &[4.1, 3.9, 8.2, 7.8, 12.1, 11.9, 16.2, 15.8]
    )
    .unwrap();

    let feature_columns = columns(&["f1", "f2", "f3", "f4", "f5"]);
    let config = EliminationConfig::new("y", TargetKind::Continuous, feature_columns.clone());
    let mut controller = EliminationLoopController::new(config).unwrap();
    let mut trainer = LeastSquaresTrainer::new(df, "y");

    let trace = controller.run(&mut trainer).unwrap();

    let sizes: Vec<usize> = trace.levels().iter().map(|e| e.size()).collect();
    assert_eq!(sizes, vec![5, 4, 3, 2, 1]);
    assert_eq!(trace.levels()[0].features, feature_columns);
}

#[test]
fn test_reference_level_matches_full_set_evaluation() {
    let mut trainer = LeastSquaresTrainer::new(regression_df(), "y");
    let full_set = columns(&["x1", "x2", "noise"]);

    let pairs = trainer.train_predict(&full_set).unwrap();
    let (predictions, targets): (Vec<_>, Vec<_>) =
        pairs.into_iter().map(|p| (p.predicted, p.actual)).unzip();
    let expected = ErrorEvaluator::continuous()
        .evaluate(&predictions, &targets)
        .unwrap();

    let config = EliminationConfig::new("y", TargetKind::Continuous, full_set.clone());
    let mut controller = EliminationLoopController::new(config).unwrap();
    let trace = controller.run(&mut trainer).unwrap();

    assert_eq!(trace.levels()[0].features, full_set);
    assert!((trace.levels()[0].error - expected).abs() < 1e-12);
}

#[test]
fn test_cancellation_aborts_the_whole_run() {
    // Flips the shared token during the first call; the controller must
    // notice before issuing the second retrain request.
    struct CancelingTrainer {
        inner: LeastSquaresTrainer,
        token: CancelToken,
        calls: usize,
    }

    impl Trainer for CancelingTrainer {
        fn train_predict(&mut self, features: &[String]) -> stepdown::Result<Vec<PredictionPair>> {
            self.calls += 1;
            if self.calls == 1 {
                self.token.cancel();
            }
            self.inner.train_predict(features)
        }
    }

    let token = CancelToken::new();
    let config = EliminationConfig::new(
        "y",
        TargetKind::Continuous,
        columns(&["x1", "x2", "noise"]),
    );
    let mut controller = EliminationLoopController::new(config)
        .unwrap()
        .with_cancel(token.clone());
    let mut trainer = CancelingTrainer {
        inner: LeastSquaresTrainer::new(regression_df(), "y"),
        token,
        calls: 0,
    };

    let result = controller.run(&mut trainer);
    assert!(matches!(result, Err(StepdownError::Canceled)));
    assert_eq!(trainer.calls, 1, "no retrain after cancellation");
    assert_eq!(
        controller.trace().len(),
        1,
        "only the fully completed reference level remains"
    );
}

#[test]
fn test_missing_values_abort_the_run() {
    let df = df!(
        "x1" => &[Some(1.0), Some(2.0), Some(3.0), None],
        "x2" => &[1.0, 2.0, 3.0, 4.0],
        "y" => &[1.0, 2.0, 3.0, 4.0]
    )
    .unwrap();

    let config = EliminationConfig::new("y", TargetKind::Continuous, columns(&["x1", "x2"]));
    let mut controller = EliminationLoopController::new(config).unwrap();
    let mut trainer = LeastSquaresTrainer::new(df, "y");

    let result = controller.run(&mut trainer);
    assert!(matches!(result, Err(StepdownError::MissingValue { row: 3 })));
}

#[test]
fn test_categorical_elimination_uses_mismatch_fraction() {
    // Scripted pairs per subset: excluding f1 predicts perfectly, keeping
    // it does not, so f1 is the one to go.
    struct LabelTrainer;

    impl Trainer for LabelTrainer {
        fn train_predict(&mut self, features: &[String]) -> stepdown::Result<Vec<PredictionPair>> {
            let wrong = match features.len() {
                2 => 1, // reference: one of three rows wrong
                1 if features[0] == "f2" => 0,
                _ => 2,
            };
            Ok((0..3)
                .map(|row| {
                    let predicted = if row < wrong { "b" } else { "a" };
                    PredictionPair::new(predicted, "a")
                })
                .collect())
        }
    }

    let config = EliminationConfig::new("label", TargetKind::Categorical, columns(&["f1", "f2"]));
    let mut controller = EliminationLoopController::new(config).unwrap();
    let trace = controller.run(&mut LabelTrainer).unwrap();

    assert_eq!(trace.len(), 2);
    assert!((trace.levels()[0].error - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(trace.levels()[1].features, columns(&["f2"]));
    assert_eq!(trace.levels()[1].error, 0.0);
}

#[test]
fn test_invalid_configuration_is_rejected_before_training() {
    let config = EliminationConfig::new("y", TargetKind::Continuous, Vec::new());
    assert!(matches!(
        EliminationLoopController::new(config),
        Err(StepdownError::InvalidConfiguration(_))
    ));

    let config = EliminationConfig::new("y", TargetKind::Continuous, columns(&["a", "b"]))
        .with_min_features(5);
    assert!(matches!(
        EliminationLoopController::new(config),
        Err(StepdownError::InvalidConfiguration(_))
    ));
}
