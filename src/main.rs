// For seeding the model and the samplers
use rand::{rngs::SmallRng, SeedableRng};

use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rbm_mnist::mnist::{binarize, load_mnist, render, BINARIZE_THRESHOLD};
use rbm_mnist::{Rbm, TrainConfig, DEFAULT_GIBBS_STEPS};

/// Train an RBM on binarized MNIST and print samples drawn from it.
#[derive(Parser)]
#[command(name = "rbm-mnist", version, about)]
struct Cli {
    /// Headerless MNIST csv: label followed by 784 pixel values per row
    #[arg(long, default_value = "mnist_train.csv")]
    train_file: String,

    /// Number of training examples to load
    #[arg(long, default_value_t = 60000)]
    n_examples: usize,

    /// Number of hidden units
    #[arg(long, default_value_t = 2)]
    hidden: usize,

    #[command(flatten)]
    train: TrainConfig,

    /// Number of images to generate
    #[arg(long, default_value_t = 1)]
    samples: usize,

    /// Gibbs iterations per generated image
    #[arg(long, default_value_t = DEFAULT_GIBBS_STEPS)]
    gibbs_steps: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut rng = SmallRng::seed_from_u64(cli.seed);

    // Load the dataset and binarize it
    let now = Instant::now();
    let (images, _labels) = load_mnist(&cli.train_file, cli.n_examples)?;
    let images = binarize(&images, BINARIZE_THRESHOLD);
    let (n_images, n_rows, n_cols) = images.dim();
    info!(
        n_images,
        n_rows,
        n_cols,
        file = %cli.train_file,
        elapsed_ms = now.elapsed().as_millis() as u64,
        "Loaded dataset"
    );
    anyhow::ensure!(n_images > 0, "no training images found in {}", cli.train_file);

    let mut rbm = Rbm::new(cli.hidden, n_rows * n_cols, &mut rng)?;

    // Train the model
    let now = Instant::now();
    let report = rbm.train(&images, &cli.train, &mut rng)?;
    info!(
        epochs = report.reconstruction_errors.len(),
        final_error = report.reconstruction_errors.last().copied().unwrap_or_default(),
        elapsed_ms = now.elapsed().as_millis() as u64,
        "Training complete"
    );

    // Sample from the trained model and show each image
    let now = Instant::now();
    let samples = rbm.sample_many(cli.samples, cli.gibbs_steps, &mut rng)?;
    info!(
        samples = cli.samples,
        gibbs_steps = cli.gibbs_steps,
        elapsed_ms = now.elapsed().as_millis() as u64,
        "Sampling complete"
    );
    for sample in samples.rows() {
        let image = sample.into_shape((n_rows, n_cols))?;
        println!("{}\n", render(&image));
    }

    Ok(())
}
