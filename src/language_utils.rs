use anyhow::{Result, anyhow};
use isolang::Language;

use crate::speech::VoiceCatalog;

/// Language utilities
///
/// The session works with catalog language names ("spanish", "german", ...),
/// while users often type ISO 639-1 or ISO 639-2 codes. These helpers bridge
/// the two.

/// Map ISO 639-2/B codes to their ISO 639-2/T equivalent
fn bibliographic_to_terminologic(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"),
        "ger" => Some("deu"),
        "dut" => Some("nld"),
        "gre" => Some("ell"),
        "chi" => Some("zho"),
        "cze" => Some("ces"),
        "ice" => Some("isl"),
        "alb" => Some("sqi"),
        "arm" => Some("hye"),
        "baq" => Some("eus"),
        "bur" => Some("mya"),
        "per" => Some("fas"),
        "geo" => Some("kat"),
        "may" => Some("msa"),
        "mac" => Some("mkd"),
        "rum" => Some("ron"),
        "slo" => Some("slk"),
        "wel" => Some("cym"),
        _ => None,
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }

        if let Some(part2t) = bibliographic_to_terminologic(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the English language name for an ISO code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Resolve user input to a catalog language name
///
/// Accepts a catalog name in any case ("Spanish") or an ISO 639 code
/// ("es", "spa"). Returns the lowercase catalog name.
pub fn resolve_language(input: &str, catalog: &VoiceCatalog) -> Result<String> {
    let name = input.trim().to_lowercase();
    if name.is_empty() {
        return Err(anyhow!("Language cannot be empty"));
    }

    if catalog.contains(&name) {
        return Ok(name);
    }

    if let Ok(part2t) = normalize_to_part2t(&name) {
        if let Some(language) = catalog.language_for_iso(&part2t) {
            return Ok(language.to_string());
        }
    }

    Err(anyhow!(
        "Unsupported language '{}'. Supported languages: {}",
        input.trim(),
        catalog.language_names().join(", ")
    ))
}
