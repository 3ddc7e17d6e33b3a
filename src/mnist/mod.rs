// This module contains all the MNIST-specific code in the project

mod load_mnist;
pub use load_mnist::{load_mnist, IMAGE_COLS, IMAGE_ROWS};

mod binarize;
pub use binarize::{binarize, BINARIZE_THRESHOLD};

mod render;
pub use render::render;
