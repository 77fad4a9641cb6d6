//! Source images to damage.

use ndarray::Array3;

/// Deterministic RGB test card: horizontal red ramp, vertical green ramp and a
/// 32 pixel blue checkerboard. No pixel is ever black, so damaged pixels stand
/// out against it.
pub fn synthetic(height: usize, width: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(row, col, channel)| match channel {
        0 => 1 + (col * 254 / width.max(1)) as u8,
        1 => 1 + (row * 254 / height.max(1)) as u8,
        _ => {
            if (row / 32 + col / 32) % 2 == 0 {
                220
            } else {
                40
            }
        }
    })
}

/// Load an image from disk as RGB8.
#[cfg(feature = "image")]
pub fn open(path: impl AsRef<std::path::Path>) -> crate::error::Result<Array3<u8>> {
    let path = path.as_ref();
    let buffer = image::open(path)?.to_rgb8();
    tracing::debug!(
        "loaded {} ({}x{})",
        path.display(),
        buffer.width(),
        buffer.height()
    );
    crate::prelude::array_from_buffer(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(512, 512)]
    #[case(1, 1)]
    #[case(3, 700)]
    fn test_synthetic_has_no_black_samples(#[case] height: usize, #[case] width: usize) {
        let image = synthetic(height, width);
        assert_eq!(image.dim(), (height, width, 3));
        assert!(image.iter().all(|value| *value > 0));
    }

    #[test]
    fn test_synthetic_is_deterministic() {
        assert_eq!(synthetic(64, 48), synthetic(64, 48));
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_open_reads_back_written_png() {
        use image::Rgb;

        let dir = std::env::temp_dir().join(format!("region-damage-sample-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("card.png");
        let card = synthetic(40, 30);
        crate::prelude::buffer_from_array::<Rgb<u8>>(&card)
            .unwrap()
            .save(&path)
            .unwrap();

        assert_eq!(open(&path).unwrap(), card);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_open_missing_file_fails() {
        let result = open(std::env::temp_dir().join("region-damage-does-not-exist.png"));
        assert!(matches!(result, Err(crate::Error::Image(_))));
    }
}
