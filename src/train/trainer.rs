use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::error::Result;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::math::scalar::Scalar;
use crate::network::network::NeuralNetwork;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Trains `network` for `config.epochs` epochs and returns the mean training
/// loss of the **last completed epoch**.
///
/// Every epoch is one full-batch `{forward; backward}` cycle over the whole
/// dataset; `config.batch_size` does not change that. The configured
/// learning rate replaces the network's own for the run.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_network<T: Scalar>(
    network: &mut NeuralNetwork<T>,
    inputs: &Matrix<T>,
    targets: &Matrix<T>,
    config: &TrainConfig<T>,
) -> Result<f64> {
    network.set_learning_rate(config.learning_rate);

    let mut last_loss = 0.0;
    for epoch in 1..=config.epochs {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break;
            }
        }

        let t_start = Instant::now();

        let output = network.forward(inputs)?;
        network.backward(targets)?;

        // Loss of the pass that produced this epoch's update.
        let train_loss = MseLoss::loss(&output, targets)?.to_f64();
        last_loss = train_loss;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if config.verbose {
            println!("epoch {epoch}/{}: loss = {train_loss:.6}", config.epochs);
        }

        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                train_loss,
                elapsed_ms,
            };
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(last_loss)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    use super::*;
    use crate::activation::activation::Activation;
    use crate::math::matrix::Init;

    fn identity_problem() -> (NeuralNetwork<f64>, Matrix<f64>, Matrix<f64>) {
        let net =
            NeuralNetwork::new(vec![1, 1], vec![Activation::Linear], 0.1, Init::Zero).unwrap();
        let x = Matrix::from_rows(vec![vec![1.0]]).unwrap();
        let y = Matrix::from_rows(vec![vec![1.0]]).unwrap();
        (net, x, y)
    }

    #[test]
    fn training_drives_loss_toward_zero() {
        let (mut net, x, y) = identity_problem();
        let config = TrainConfig::new(100, 1, 0.1);
        let final_loss = train_network(&mut net, &x, &y, &config).unwrap();
        assert!(final_loss < 1e-3, "loss was {final_loss}");
    }

    #[test]
    fn trainer_overrides_network_learning_rate() {
        let (mut net, x, y) = identity_problem();
        let config = TrainConfig::new(1, 1, 0.25);
        train_network(&mut net, &x, &y, &config).unwrap();
        assert_eq!(net.learning_rate(), 0.25);
    }

    #[test]
    fn progress_channel_gets_one_stats_per_epoch() {
        let (mut net, x, y) = identity_problem();
        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(5, 1, 0.1);
        config.progress_tx = Some(tx);
        train_network(&mut net, &x, &y, &config).unwrap();
        drop(config);
        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].epoch, 1);
        assert_eq!(stats[4].epoch, 5);
        assert_eq!(stats[4].total_epochs, 5);
    }

    #[test]
    fn stop_flag_halts_before_the_first_epoch() {
        let (mut net, x, y) = identity_problem();
        let flag = Arc::new(AtomicBool::new(true));
        let mut config = TrainConfig::new(100, 1, 0.1);
        config.stop_flag = Some(flag);
        train_network(&mut net, &x, &y, &config).unwrap();
        // No epoch ran, so the zero-initialized weights are untouched.
        let out = net.forward(&x).unwrap();
        assert_eq!(out, Matrix::zeros(1, 1).unwrap());
    }

    #[test]
    fn dropped_receiver_ends_training_early() {
        let (mut net, x, y) = identity_problem();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut config = TrainConfig::new(1000, 1, 0.1);
        config.progress_tx = Some(tx);
        // First send fails, so only one epoch runs; mainly asserting this
        // returns instead of spinning through all 1000 epochs.
        let loss = train_network(&mut net, &x, &y, &config).unwrap();
        assert!(loss > 0.0);
    }
}
