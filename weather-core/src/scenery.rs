//! Backdrop image URL for the weather card, generated from a text prompt.

use reqwest::Url;

use crate::model::LocationOption;

const IMAGE_BASE: &str = "https://image.pollinations.ai/prompt/";

pub fn prompt(option: &LocationOption) -> String {
    format!(
        "cinematic night shot of {} city skyline, futuristic, cyberpunk, neon purple and pink \
         lights, dark atmosphere, 8k, highly detailed",
        option.display_name
    )
}

/// URL of a generated backdrop for `option`. The prompt becomes one
/// percent-encoded path segment.
pub fn image_url(option: &LocationOption) -> Option<Url> {
    let mut url = Url::parse(IMAGE_BASE).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(&prompt(option));
    url.query_pairs_mut()
        .append_pair("width", "800")
        .append_pair("height", "600")
        .append_pair("nologo", "true");
    Some(url)
}
