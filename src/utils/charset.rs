//! Response body decoding.
//!
//! Playlists are served with all sorts of encodings and often without a
//! charset parameter. The encoding is taken from, in order: a byte order mark,
//! the `Content-Type` charset, a UTF-8 validity check, and finally statistical
//! detection over the body bytes (`chardetng`, hinted by the host's TLD).

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use url::{Host, Url};

/// Where the encoding used for a body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetSource {
    Bom,
    Header,
    Utf8,
    Detected,
}

#[derive(Debug)]
pub struct DecodedBody {
    pub text: String,
    pub encoding: &'static Encoding,
    pub source: CharsetSource,
    /// Some byte sequences were invalid and replaced with U+FFFD
    pub had_errors: bool,
}

/// Decode `bytes` into text, inferring the encoding from the response.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>, url: &str) -> DecodedBody {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(encoding, &bytes[bom_len..], CharsetSource::Bom);
    }

    if let Some(encoding) = content_type.and_then(charset_from_content_type) {
        return decode_with(encoding, bytes, CharsetSource::Header);
    }

    if std::str::from_utf8(bytes).is_ok() {
        return decode_with(UTF_8, bytes, CharsetSource::Utf8);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let tld = top_level_domain(url);
    let encoding = detector.guess(tld.as_deref().map(str::as_bytes), false);
    decode_with(encoding, bytes, CharsetSource::Detected)
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8], source: CharsetSource) -> DecodedBody {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    DecodedBody {
        text: text.into_owned(),
        encoding,
        source,
        had_errors,
    }
}

/// Encoding named by the `charset` parameter of a Content-Type value, if known
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| {
            Encoding::for_label(value.trim().trim_matches(['"', '\'']).as_bytes())
        })
}

fn top_level_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    match parsed.host()? {
        Host::Domain(domain) => domain
            .trim_end_matches('.')
            .rsplit('.')
            .next()
            .filter(|tld| !tld.is_empty())
            .map(|tld| tld.to_ascii_lowercase()),
        Host::Ipv4(_) | Host::Ipv6(_) => None,
    }
}
