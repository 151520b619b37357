use magnetite_nn::{Activation, Init, Matrix, NeuralNetwork, TrainConfig};

fn main() -> magnetite_nn::Result<()> {
    let inputs = Matrix::from_rows(vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ])?;
    let targets = Matrix::from_rows(vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]])?;

    let mut network =
        NeuralNetwork::<f64>::new(vec![2, 1], vec![Activation::Sigmoid], 0.1, Init::Random)?;

    let config = TrainConfig::new(10_000, 4, 0.1);
    let loss = network.train(&inputs, &targets, &config)?;
    println!("final loss = {loss:.6}");

    let outputs = network.act(&inputs)?;
    println!("{outputs}");
    let accuracy = network.evaluate(&inputs, &targets, true)?;
    println!("binary accuracy = {accuracy}");
    Ok(())
}
