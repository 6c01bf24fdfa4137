use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::models::ImageQuality;
use reqwest::Url;

/// URL construction for list, detail and image requests
#[derive(Debug, Clone)]
pub struct Endpoints {
    list: Url,
    image_extension: String,
}

impl Endpoints {
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let list = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if list.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self {
            list,
            image_extension: config.image_extension.clone(),
        })
    }

    /// `scheme://host/path`
    pub fn list_url(&self) -> &Url {
        &self.list
    }

    /// `scheme://host/path/{id}`, with the id percent-encoded as one segment
    pub fn detail_url(&self, id: &str) -> CatalogResult<Url> {
        append_segment(&self.list, id)
    }

    /// `{image_base}/{quality}.{extension}`
    pub fn image_url(&self, image_base: &str, quality: ImageQuality) -> CatalogResult<Url> {
        let base = Url::parse(image_base)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", image_base, e)))?;
        let file = format!("{}.{}", quality.as_str(), self.image_extension);
        append_segment(&base, &file)
    }
}

fn append_segment(base: &Url, segment: &str) -> CatalogResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| CatalogError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new(&CatalogConfig::default()).unwrap()
    }

    #[test]
    fn list_url_matches_config() {
        assert_eq!(
            endpoints().list_url().as_str(),
            "https://api.tcgdex.net/v2/en/cards"
        );
    }

    #[test]
    fn detail_url_appends_id() {
        let url = endpoints().detail_url("swsh3-136").unwrap();
        assert_eq!(url.as_str(), "https://api.tcgdex.net/v2/en/cards/swsh3-136");
    }

    #[test]
    fn detail_url_tolerates_trailing_slash() {
        let config = CatalogConfig::with_base_url("https://example.com/cards/");
        let url = Endpoints::new(&config).unwrap().detail_url("1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/cards/1");
    }

    #[test]
    fn detail_url_encodes_id_as_single_segment() {
        let url = endpoints().detail_url("a/b c").unwrap();
        assert_eq!(url.as_str(), "https://api.tcgdex.net/v2/en/cards/a%2Fb%20c");
    }

    #[test]
    fn image_url_appends_quality_and_extension() {
        let base = "https://assets.tcgdex.net/en/swsh/swsh3/136";
        assert_eq!(
            endpoints().image_url(base, ImageQuality::High).unwrap().as_str(),
            "https://assets.tcgdex.net/en/swsh/swsh3/136/high.png"
        );
        assert_eq!(
            endpoints().image_url(base, ImageQuality::Low).unwrap().as_str(),
            "https://assets.tcgdex.net/en/swsh/swsh3/136/low.png"
        );
    }

    #[test]
    fn malformed_urls_are_invalid_url() {
        let config = CatalogConfig::with_base_url("not a url");
        assert!(matches!(
            Endpoints::new(&config),
            Err(CatalogError::InvalidUrl(_))
        ));

        let config = CatalogConfig::with_base_url("mailto:someone@example.com");
        assert!(matches!(
            Endpoints::new(&config),
            Err(CatalogError::InvalidUrl(_))
        ));

        assert!(matches!(
            endpoints().image_url("::nope", ImageQuality::Low),
            Err(CatalogError::InvalidUrl(_))
        ));
    }
}
