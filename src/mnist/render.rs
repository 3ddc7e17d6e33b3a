use ndarray::{ArrayBase, Data, Ix2};

// Draw a binary image as text, one line per row
pub fn render<S>(image: &ArrayBase<S, Ix2>) -> String
where
    S: Data<Elem = u8>,
{
    image
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&pixel| if pixel > 0 { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_render() {
        let image = arr2(&[[1, 0, 1], [0, 1, 0]]);
        assert_eq!(render(&image), "#.#\n.#.");
    }
}
