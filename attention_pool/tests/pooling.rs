use approx::assert_relative_eq;
use attention_pool::{AttentionConfig, AttentionError, AttentionPooling, AttentionScorer, SequenceBatch};
use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn scenario_pooling() -> Result<AttentionPooling, AttentionError> {
    let scorer = AttentionScorer::from_weights(
        AttentionConfig::new(3),
        DVector::from_vec(vec![-1.0 / 3.0, 2.0 / 3.0, 0.0]),
    )?;
    Ok(scorer.into())
}

#[test]
fn pooled_vector_is_weighted_sum_of_live_positions() -> Result<(), AttentionError> {
    let pooling = scenario_pooling()?;
    let batch = SequenceBatch::from_nested(vec![vec![
        vec![1.0, 2.0, 3.0],
        vec![0.0, 0.0, 0.0],
        vec![4.0, 5.0, 6.0],
    ]])?;

    let (scores, pooled) = pooling.pool_with_scores(&batch)?;
    assert_eq!(pooled.shape(), (1, 3));

    let (lo, hi) = (scores[(0, 0)], scores[(0, 2)]);
    for (k, (a, b)) in [(1.0, 4.0), (2.0, 5.0), (3.0, 6.0)].into_iter().enumerate() {
        assert_relative_eq!(pooled[(0, k)], lo * a + hi * b, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn pooling_shape_follows_batch_and_input_size() -> Result<(), AttentionError> {
    let mut rng = StdRng::seed_from_u64(5);
    let scorer = AttentionScorer::with_rng(AttentionConfig::new(10), &mut rng)?;
    let pooling = AttentionPooling::new(scorer);
    let data: Vec<f64> = (0..4 * 5 * 10).map(|_| rng.random_range(-1.0..1.0)).collect();
    let batch = SequenceBatch::from_flat((4, 5, 10), &data)?;

    assert_eq!(pooling.pool(&batch)?.shape(), (4, 10));
    Ok(())
}

#[test]
fn pooling_propagates_shape_mismatch() -> Result<(), AttentionError> {
    let pooling = scenario_pooling()?;
    let batch = SequenceBatch::from_flat((1, 2, 5), &[1.0; 10])?;
    assert_eq!(
        pooling.pool(&batch),
        Err(AttentionError::ShapeMismatch {
            expected: 3,
            actual: 5
        })
    );
    Ok(())
}

#[test]
fn updated_weights_change_scores() -> Result<(), AttentionError> {
    let mut pooling = scenario_pooling()?;
    let batch = SequenceBatch::from_nested(vec![vec![vec![1.0, 0.0], vec![0.0, 1.0]]])?;
    assert!(pooling.scorer().score(&batch).is_err());

    *pooling.scorer_mut() = AttentionScorer::from_weights(AttentionConfig::new(2), DVector::zeros(2))?;
    let scores = pooling.scorer().score(&batch)?;
    assert_relative_eq!(scores[(0, 0)], 0.5);

    pooling.scorer_mut().set_weights(DVector::from_vec(vec![0.0, 10.0]))?;
    let scores = pooling.scorer().score(&batch)?;
    assert!(scores[(0, 1)] > scores[(0, 0)]);
    Ok(())
}

#[test]
fn single_row_batch_keeps_batch_dimension() -> Result<(), AttentionError> {
    let pooling = scenario_pooling()?;
    let batch = SequenceBatch::from_nested(vec![vec![vec![1.0, 2.0, 3.0]]])?;
    let scores = pooling.scorer().score(&batch)?;
    assert_eq!(scores.shape(), (1, 1));
    assert_relative_eq!(scores[(0, 0)], 1.0);
    Ok(())
}
