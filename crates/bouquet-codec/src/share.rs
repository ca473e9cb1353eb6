//! Share links: `{base}/view?d={payload}`.

use tracing::debug;
use url::Url;

use crate::decoder::Decoder;
use crate::encoder::encode;
use crate::error::ShareError;
use crate::ids::IdGenerator;
use crate::model::Bouquet;

/// Query parameter carrying the payload.
pub const PAYLOAD_PARAM: &str = "d";

/// Viewer route appended to the base URL.
pub const VIEW_PATH: &str = "view";

/// Builds a link that opens `bouquet` in the viewer under `base_url`.
///
/// The payload alphabet needs no escaping, so it is appended verbatim.
pub fn share_link(base_url: &str, bouquet: &Bouquet) -> Result<String, ShareError> {
    let base = Url::parse(base_url)?;
    if base.cannot_be_a_base() {
        return Err(ShareError::CannotBeABase);
    }
    if base.query().is_some() || base.fragment().is_some() {
        return Err(ShareError::BaseHasQuery);
    }
    let base = base.as_str();
    let base = base.strip_suffix('/').unwrap_or(base);
    Ok(format!(
        "{base}/{VIEW_PATH}?{PAYLOAD_PARAM}={}",
        encode(bouquet)
    ))
}

/// Extracts the payload from a share link: the first non-empty `d` value.
pub fn payload_from_link(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let payload = url
        .query_pairs()
        .find(|(key, _)| key == PAYLOAD_PARAM)
        .map(|(_, value)| value.into_owned())?;
    (!payload.is_empty()).then_some(payload)
}

/// Decodes the bouquet carried by a share link. A link without a payload is
/// as broken as one with a corrupted payload.
pub fn decode_link(link: &str) -> Option<Bouquet> {
    Decoder::new().decode_link(link)
}

impl<G: IdGenerator> Decoder<G> {
    pub fn decode_link(&mut self, link: &str) -> Option<Bouquet> {
        let Some(payload) = payload_from_link(link) else {
            debug!("share link has no payload");
            return None;
        };
        self.decode(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::PlacedFlower;
    use crate::schema::{FlowerType, GreeneryType};

    fn bouquet() -> Bouquet {
        let mut ids = SequentialIds::new("s");
        Bouquet::new(
            vec![PlacedFlower::new(FlowerType::Sunflower, 250.0, 125.0, 1, &mut ids)],
            None,
            GreeneryType::Monstera,
            &mut ids,
        )
    }

    #[test]
    fn link_shape() {
        let b = bouquet();
        let payload = encode(&b);
        assert_eq!(
            share_link("https://example.com/digital-bouquet/", &b).unwrap(),
            format!("https://example.com/digital-bouquet/view?d={payload}")
        );
        assert_eq!(
            share_link("https://example.com", &b).unwrap(),
            format!("https://example.com/view?d={payload}")
        );
    }

    #[test]
    fn bad_bases_are_rejected() {
        let b = bouquet();
        assert!(matches!(
            share_link("not a url", &b),
            Err(ShareError::InvalidBase(_))
        ));
        assert!(matches!(
            share_link("mailto:someone@example.com", &b),
            Err(ShareError::CannotBeABase)
        ));
        assert!(matches!(
            share_link("https://example.com/?ref=1", &b),
            Err(ShareError::BaseHasQuery)
        ));
    }

    #[test]
    fn payload_extraction() {
        assert_eq!(
            payload_from_link("https://example.com/view?x=1&d=abc&d=zzz").as_deref(),
            Some("abc")
        );
        assert_eq!(payload_from_link("https://example.com/view?d="), None);
        assert_eq!(payload_from_link("https://example.com/view"), None);
        assert_eq!(payload_from_link("::not a link::"), None);
    }

    #[test]
    fn link_round_trip() {
        let b = bouquet();
        let link = share_link("https://example.com/app", &b).unwrap();
        let back = decode_link(&link).unwrap();
        assert_eq!(back.flowers[0].flower_type, FlowerType::Sunflower);
        assert_eq!(back.greenery, GreeneryType::Monstera);
    }
}
