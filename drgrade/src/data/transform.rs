use image::{DynamicImage, imageops, imageops::FilterType};
use ndarray::Array3;
use rand::Rng;
use serde::{Deserialize, Serialize};

const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Decode-time preprocessing applied to every fundus image.
///
/// Images are resized to `width x height`, scaled to `[0, 1]` and normalized
/// per channel. With `horizontal_flip > 0` each image is mirrored with that
/// probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTransform {
    pub width: u32,
    pub height: u32,
    pub mean: [f32; 3],
    pub std: [f32; 3],
    #[serde(default)]
    pub horizontal_flip: f32,
}

impl ImageTransform {
    pub fn new(
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            width,
            height,
            mean: IMAGENET_MEAN,
            std: IMAGENET_STD,
            horizontal_flip: 0.0,
        }
    }

    pub fn augmented() -> Self {
        Self {
            horizontal_flip: 0.5,
            ..Self::default()
        }
    }

    pub fn horizontal_flip(
        self,
        probability: f32,
    ) -> Self {
        Self {
            horizontal_flip: probability.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Returns a `3 x height x width` tensor.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        image: &DynamicImage,
        rng: &mut R,
    ) -> Array3<f32> {
        let resized = image.resize_exact(self.width, self.height, FilterType::Triangle).to_rgb8();
        let pixels = if self.horizontal_flip > 0.0 && rng.random::<f32>() < self.horizontal_flip {
            imageops::flip_horizontal(&resized)
        } else {
            resized
        };

        let mut tensor = Array3::<f32>::zeros((3, self.height as usize, self.width as usize));
        for (x, y, pixel) in pixels.enumerate_pixels() {
            for channel in 0..3 {
                let value = pixel.0[channel] as f32 / 255.0;
                tensor[[channel, y as usize, x as usize]] = (value - self.mean[channel]) / self.std[channel];
            }
        }
        tensor
    }
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::new(224, 224)
    }
}
