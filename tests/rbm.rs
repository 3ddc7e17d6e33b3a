use ndarray::{Array2, Array3};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use rbm_mnist::{Rbm, TrainConfig};

// Mean activation of the visible units over `draws` independent samples
fn mean_visible(rbm: &Rbm, draws: usize, rng: &mut SmallRng) -> f64 {
    let total: usize = (0..draws)
        .map(|_| {
            rbm.sample(rng)
                .unwrap()
                .iter()
                .map(|&x| x as usize)
                .sum::<usize>()
        })
        .sum();
    total as f64 / (draws * rbm.n_visible()) as f64
}

#[test]
fn trains_on_random_binary_data() {
    let mut rng = SmallRng::seed_from_u64(1234);
    let data = Array2::from_shape_simple_fn((100, 4), || rng.gen_range(0..=1_u8));

    let mut rbm = Rbm::new(2, 4, &mut rng).unwrap();
    let report = rbm.train(&data, &TrainConfig::default(), &mut rng).unwrap();

    assert_eq!(report.reconstruction_errors.len(), 10);
    assert_eq!(rbm.weights().dim(), (4, 2));
    assert_eq!(rbm.visible_bias().len(), 4);
    assert_eq!(rbm.hidden_bias().len(), 2);
    assert!(rbm.weights().iter().all(|w| w.is_finite()));
    assert!(rbm.visible_bias().iter().all(|b| b.is_finite()));
    assert!(rbm.hidden_bias().iter().all(|b| b.is_finite()));
}

#[test]
fn training_on_all_ones_favors_ones() {
    let mut rng = SmallRng::seed_from_u64(5);
    let untrained = Rbm::new(2, 4, &mut SmallRng::seed_from_u64(99)).unwrap();
    let mut trained = untrained.clone();

    let data = Array2::<u8>::ones((1000, 4));
    trained
        .train(&data, &TrainConfig::default(), &mut rng)
        .unwrap();

    let before = mean_visible(&untrained, 200, &mut rng);
    let after = mean_visible(&trained, 200, &mut rng);
    assert!(after > before, "trained {} vs untrained {}", after, before);
    assert!(after > 0.75, "trained mean activation {}", after);
}

#[test]
fn samples_are_binary_images() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut images = Array3::<u8>::zeros((200, 28, 28));
    // A vertical bar down the middle of every image
    images.slice_mut(ndarray::s![.., .., 12..16]).fill(1);

    let mut rbm = Rbm::new(8, 28 * 28, &mut rng).unwrap();
    let config = TrainConfig {
        epochs: 2,
        ..Default::default()
    };
    rbm.train(&images, &config, &mut rng).unwrap();

    let sample = rbm.sample(&mut rng).unwrap();
    assert_eq!(sample.len(), 28 * 28);
    assert!(sample.iter().all(|&x| x == 0 || x == 1));
    assert!(sample.into_shape((28, 28)).is_ok());

    let batch = rbm.sample_many(3, 20, &mut rng).unwrap();
    assert_eq!(batch.dim(), (3, 28 * 28));
}
