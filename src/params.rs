//! Fixed generation parameters sent with every request.

use serde::{Deserialize, Serialize};

/// Classifier-free guidance weight.
pub const CFG_SCALE: u32 = 7;
/// Output height in pixels.
pub const HEIGHT: u32 = 1024;
/// Output width in pixels.
pub const WIDTH: u32 = 1024;
/// Diffusion step count.
pub const STEPS: u32 = 30;
/// Images per request.
pub const SAMPLES: u32 = 4;

/// Generation parameters. Only the [`Default`] values are ever sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Guidance weight.
    pub cfg_scale: u32,
    /// Height in pixels.
    pub height: u32,
    /// Width in pixels.
    pub width: u32,
    /// Step count.
    pub steps: u32,
    /// Number of images.
    pub samples: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { cfg_scale: CFG_SCALE, height: HEIGHT, width: WIDTH, steps: STEPS, samples: SAMPLES }
    }
}

/// Whether a prompt is empty or whitespace-only.
#[must_use]
pub fn is_blank_prompt(prompt: &str) -> bool {
    prompt.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_fixed_constants() {
        let params = GenerationParams::default();
        assert_eq!(params.cfg_scale, 7);
        assert_eq!(params.height, 1024);
        assert_eq!(params.width, 1024);
        assert_eq!(params.steps, 30);
        assert_eq!(params.samples, 4);
    }

    #[test]
    fn blank_prompts() {
        assert!(is_blank_prompt(""));
        assert!(is_blank_prompt("   "));
        assert!(is_blank_prompt("\t\n"));
        assert!(!is_blank_prompt("a cat"));
        assert!(!is_blank_prompt("  a cat  "));
    }
}
