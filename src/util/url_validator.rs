use thiserror::Error;
use url::Url;

/// Reasons a card link cannot be handed to the system browser.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Article has no link")]
    Missing,
    #[error("Invalid link: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported link scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    #[error("Link has no host")]
    MissingHost,
}

/// Validates an article link before it is passed to `open::that`.
///
/// Only absolute `http`/`https` URLs with a host are accepted, so a stored
/// link can never launch a local file or a custom protocol handler.
///
/// ```
/// use dailynews::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://n.news.naver.com/article/001/0001").is_ok());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// assert!(validate_url_for_open("").is_err());
/// ```
pub fn validate_url_for_open(link: &str) -> Result<Url, LinkError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(LinkError::Missing);
    }

    let url = Url::parse(link)?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(LinkError::UnsupportedScheme(scheme.to_owned())),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(LinkError::MissingHost);
    }
    Ok(url)
}

/// Whether an image reference can be shown as-is.
///
/// Anything that is not an absolute http(s) URL is replaced with the
/// placeholder by the card renderer.
pub fn is_displayable_image(reference: &str) -> bool {
    validate_url_for_open(reference).is_ok()
}
