use attention_pool::{AttentionConfig, AttentionPooling, AttentionScorer, SequenceBatch};
use nalgebra::DVector;
use rand::Rng;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    // Fixed weights: dot([1,2,3], w) = 1, dot([4,5,6], w) = 2
    let scorer = AttentionScorer::from_weights(
        AttentionConfig::new(3),
        DVector::from_vec(vec![-1.0 / 3.0, 2.0 / 3.0, 0.0]),
    )?;
    let pooling = AttentionPooling::new(scorer);

    // Middle position is padding
    let batch = SequenceBatch::from_nested(vec![vec![
        vec![1.0, 2.0, 3.0],
        vec![0.0, 0.0, 0.0],
        vec![4.0, 5.0, 6.0],
    ]])?;
    let (scores, pooled) = pooling.pool_with_scores(&batch)?;
    println!("scores: {scores}");
    println!("pooled: {pooled}");

    // Random batch of 4 sequences, 5 positions, 10 features
    let mut rng = rand::rng();
    let scorer = AttentionScorer::new(AttentionConfig::new(10))?;
    let data: Vec<f64> = (0..4 * 5 * 10).map(|_| rng.random_range(-1.0..1.0)).collect();
    let batch = SequenceBatch::from_flat((4, 5, 10), &data)?;
    let scores = scorer.par_score(&batch)?;
    info!(shape = ?scores.shape(), "random batch scored");
    for (b, row) in scores.row_iter().enumerate() {
        println!("row {b}: sum = {:.6}", row.sum());
    }

    Ok(())
}
