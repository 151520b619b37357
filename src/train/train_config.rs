use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use crate::math::scalar::Scalar;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a training run.
///
/// # Fields
/// - `epochs`        — number of full-batch `{forward; backward}` cycles
/// - `batch_size`    — accepted for API compatibility; the trainer always
///                     performs full-batch updates and never slices the
///                     dataset
/// - `learning_rate` — overrides the network's learning rate for the run
/// - `verbose`       — print one loss line per epoch
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     completed epoch. If the receiver is dropped the loop
///                     terminates early (clean shutdown).
/// - `stop_flag`     — optional atomic flag; when set to `true` from another
///                     thread the loop terminates before the next epoch
pub struct TrainConfig<T: Scalar> {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: T,
    pub verbose: bool,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl<T: Scalar> TrainConfig<T> {
    /// Creates a minimal `TrainConfig` with no progress channel, no stop
    /// flag and verbosity off.
    pub fn new(epochs: usize, batch_size: usize, learning_rate: T) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate,
            verbose: false,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
