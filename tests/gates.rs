//! End-to-end training scenarios: small logic gates learned from scratch,
//! plus a persistence round-trip on a trained model.

use magnetite_nn::{Activation, Init, Matrix, NeuralNetwork, TrainConfig};

fn gate_inputs() -> Matrix<f64> {
    Matrix::from_rows(vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ])
    .unwrap()
}

fn assert_within(outputs: &Matrix<f64>, expected: &[f64], tolerance: f64) {
    for (row, &want) in expected.iter().enumerate() {
        let got = outputs.get(row, 0).unwrap();
        assert!(
            (got - want).abs() < tolerance,
            "row {row}: got {got}, expected {want} +/- {tolerance}"
        );
    }
}

#[test]
fn or_gate_converges() {
    let inputs = gate_inputs();
    let targets =
        Matrix::from_rows(vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]]).unwrap();
    let mut network =
        NeuralNetwork::<f64>::new(vec![2, 1], vec![Activation::Sigmoid], 0.1, Init::Random)
            .unwrap();

    let config = TrainConfig::new(10_000, 1, 0.1);
    network.train(&inputs, &targets, &config).unwrap();

    let outputs = network.act(&inputs).unwrap();
    assert_within(&outputs, &[0.0, 1.0, 1.0, 1.0], 0.1);
    assert_eq!(network.evaluate(&inputs, &targets, true).unwrap(), 1.0);
}

#[test]
fn and_gate_converges() {
    let inputs = gate_inputs();
    let targets =
        Matrix::from_rows(vec![vec![0.0], vec![0.0], vec![0.0], vec![1.0]]).unwrap();
    let mut network =
        NeuralNetwork::<f64>::new(vec![2, 1], vec![Activation::Sigmoid], 0.1, Init::Random)
            .unwrap();

    let config = TrainConfig::new(10_000, 1, 0.1);
    network.train(&inputs, &targets, &config).unwrap();

    let outputs = network.act(&inputs).unwrap();
    assert_within(&outputs, &[0.0, 0.0, 0.0, 1.0], 0.1);
}

#[test]
fn saved_model_reproduces_outputs_bit_for_bit() {
    let inputs = gate_inputs();
    let targets =
        Matrix::from_rows(vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]]).unwrap();
    let mut trained =
        NeuralNetwork::<f64>::new(vec![2, 1], vec![Activation::Sigmoid], 0.1, Init::Random)
            .unwrap();
    let config = TrainConfig::new(500, 1, 0.1);
    trained.train(&inputs, &targets, &config).unwrap();

    let path = std::env::temp_dir()
        .join(format!("magnetite-nn-{}-gate.bin", std::process::id()))
        .to_str()
        .unwrap()
        .to_string();
    trained.save(&path).unwrap();

    let mut restored =
        NeuralNetwork::<f64>::new(vec![2, 1], vec![Activation::Sigmoid], 0.1, Init::Random)
            .unwrap();
    restored.load(&path).unwrap();

    // Exact elementwise equality: identical parameters, identical arithmetic.
    let original_out = trained.act(&inputs).unwrap();
    let restored_out = restored.act(&inputs).unwrap();
    assert_eq!(original_out, restored_out);

    let _ = std::fs::remove_file(&path);
}
