//! Normalization of gettext `Language:` values into BCP 47 identifiers.

use lazy_static::lazy_static;
use regex::Regex;
use unic_langid::LanguageIdentifier;

use crate::error::Error;

lazy_static! {
    // ll, ll_CC, ll@variant, ll_CC@variant
    static ref GETTEXT_LOCALE_REGEX: Regex =
        Regex::new(r"^([A-Za-z]+)(?:_([A-Za-z0-9]+))?(?:@([A-Za-z]+))?$").unwrap();
}

/// Maps a gettext locale modifier to the ISO 15924 script it stands for.
fn script_for_variant(variant: &str) -> Option<&'static str> {
    let script = match variant.to_ascii_lowercase().as_str() {
        "latin" => "Latn",
        "cyrillic" => "Cyrl",
        "adlam" => "Adlm",
        "javanese" => "Java",
        "arabic" => "Arab",
        "devanagari" => "Deva",
        "mongolian" => "Mong",
        "bangla" => "Beng",
        "gurmukhi" => "Guru",
        "olchiki" => "Olck",
        "tifinagh" => "Tfng",
        "vai" => "Vaii",
        "simplified" => "Hans",
        "traditional" => "Hant",
        _ => return None,
    };
    Some(script)
}

/// Turns a raw `Language:` value into a language identifier.
///
/// `az_AZ@latin` becomes `az-Latn-AZ`; other values are parsed as BCP 47
/// after replacing underscores with hyphens.
///
/// ```rust
/// use pocatalog::locale::normalize_language_tag;
///
/// assert_eq!(normalize_language_tag("sr_RS@cyrillic")?.to_string(), "sr-Cyrl-RS");
/// assert_eq!(normalize_language_tag("pt_BR")?.to_string(), "pt-BR");
/// # Ok::<(), pocatalog::Error>(())
/// ```
pub fn normalize_language_tag(raw: &str) -> Result<LanguageIdentifier, Error> {
    let raw = raw.trim();
    let unrecognized = || Error::UnrecognizedTag(raw.to_string());
    if raw.is_empty() {
        return Err(unrecognized());
    }

    let candidate = match GETTEXT_LOCALE_REGEX.captures(raw) {
        Some(caps) => {
            let mut parts = vec![caps[1].to_string()];
            if let Some(variant) = caps.get(3) {
                parts.push(
                    script_for_variant(variant.as_str())
                        .ok_or_else(unrecognized)?
                        .to_string(),
                );
            }
            if let Some(country) = caps.get(2) {
                parts.push(country.as_str().to_string());
            }
            parts.join("-")
        }
        None => raw.replace('_', "-"),
    };

    candidate
        .parse::<LanguageIdentifier>()
        .map_err(|_| unrecognized())
}
