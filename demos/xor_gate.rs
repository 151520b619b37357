use magnetite_nn::{Activation, Init, Matrix, NeuralNetwork, TrainConfig};

fn main() -> magnetite_nn::Result<()> {
    let inputs = Matrix::from_rows(vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ])?;
    let targets = Matrix::from_rows(vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]])?;

    // XOR needs a hidden layer; a single transition cannot separate it.
    let mut network = NeuralNetwork::<f64>::new(
        vec![2, 4, 1],
        vec![Activation::Sigmoid, Activation::Sigmoid],
        0.88,
        Init::Random,
    )?;

    let config = TrainConfig::new(10_000, 4, 0.88);
    let loss = network.train(&inputs, &targets, &config)?;
    println!("final loss = {loss:.6}");

    let outputs = network.act(&inputs)?;
    println!("{outputs}");
    Ok(())
}
