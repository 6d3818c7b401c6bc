//! Engine name resolution and endpoint construction.

/// Default Stability API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.stability.ai";

/// Default engine identifier.
pub const DEFAULT_ENGINE: &str = "stable-diffusion-xl-1024-v1-0";

/// Short name aliases for Stability engines.
const ALIASES: &[(&str, &str)] = &[
    ("sdxl", "stable-diffusion-xl-1024-v1-0"),
    ("sd-1.6", "stable-diffusion-v1-6"),
];

/// Resolve an engine name (alias or exact) to the full engine identifier.
#[must_use]
pub fn resolve_engine(name: &str) -> String {
    for &(alias, full) in ALIASES {
        if name == alias {
            return full.to_string();
        }
    }
    name.to_string()
}

/// Build the text-to-image URL for an engine.
#[must_use]
pub fn text_to_image_url(base_url: &str, engine: &str) -> String {
    format!("{}/v1/generation/{engine}/text-to-image", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_sdxl() {
        assert_eq!(resolve_engine("sdxl"), "stable-diffusion-xl-1024-v1-0");
    }

    #[test]
    fn resolve_sd16() {
        assert_eq!(resolve_engine("sd-1.6"), "stable-diffusion-v1-6");
    }

    #[test]
    fn resolve_exact_name_passthrough() {
        assert_eq!(resolve_engine(DEFAULT_ENGINE), DEFAULT_ENGINE);
        assert_eq!(resolve_engine("some-future-engine"), "some-future-engine");
    }

    #[test]
    fn default_url() {
        assert_eq!(
            text_to_image_url(DEFAULT_BASE_URL, DEFAULT_ENGINE),
            "https://api.stability.ai/v1/generation/stable-diffusion-xl-1024-v1-0/text-to-image"
        );
    }

    #[test]
    fn url_trims_trailing_slash() {
        assert_eq!(
            text_to_image_url("http://localhost:8080/", "sdxl"),
            "http://localhost:8080/v1/generation/sdxl/text-to-image"
        );
    }
}
