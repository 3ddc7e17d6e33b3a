use ndarray::{Array, ArrayBase, Data, Dimension};

// Pixels at or above this intensity become 1
pub const BINARIZE_THRESHOLD: u8 = 128;

pub fn binarize<S, D>(images: &ArrayBase<S, D>, threshold: u8) -> Array<u8, D>
where
    S: Data<Elem = u8>,
    D: Dimension,
{
    images.mapv(|pixel| (pixel >= threshold) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_threshold_is_inclusive() {
        let images = arr2(&[[0, 127, 128], [200, 255, 1]]);
        let binary = binarize(&images, BINARIZE_THRESHOLD);
        assert_eq!(binary, arr2(&[[0, 0, 1], [1, 1, 0]]));
    }
}
