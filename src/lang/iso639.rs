// SPDX-License-Identifier: PMPL-1.0-or-later

//! ISO 639-1 registry lookups for language codes.
//!
//! Resolution never consults this table; it only feeds display text
//! (CLI output, the toggle control's fallback label) and a debug note when
//! a page resolves to a code nobody has registered.
//!
//! Reference: <https://www.loc.gov/standards/iso639-2/php/code_list.php>

/// Whether `code` is a registered ISO 639-1 two-letter code.
///
/// Expects an already-normalized code; uppercase input is rejected.
///
/// # Examples
/// ```
/// assert!(page_i18n::lang::is_valid_iso639_1("vi"));
/// assert!(!page_i18n::lang::is_valid_iso639_1("qq"));
/// ```
pub fn is_valid_iso639_1(code: &str) -> bool {
    matches!(
        code,
        "aa" | "ab" | "af" | "ak" | "am" | "an" | "ar" | "as" | "av" | "ay" | "az"
            | "ba" | "be" | "bg" | "bh" | "bi" | "bm" | "bn" | "bo" | "br" | "bs"
            | "ca" | "ce" | "ch" | "co" | "cr" | "cs" | "cu" | "cv" | "cy"
            | "da" | "de" | "dv" | "dz"
            | "ee" | "el" | "en" | "eo" | "es" | "et" | "eu"
            | "fa" | "ff" | "fi" | "fj" | "fo" | "fr" | "fy"
            | "ga" | "gd" | "gl" | "gn" | "gu" | "gv"
            | "ha" | "he" | "hi" | "ho" | "hr" | "ht" | "hu" | "hy" | "hz"
            | "ia" | "id" | "ie" | "ig" | "ii" | "ik" | "io" | "is" | "it" | "iu"
            | "ja" | "jv"
            | "ka" | "kg" | "ki" | "kj" | "kk" | "kl" | "km" | "kn" | "ko" | "kr" | "ks" | "ku" | "kv" | "kw" | "ky"
            | "la" | "lb" | "lg" | "li" | "ln" | "lo" | "lt" | "lu" | "lv"
            | "mg" | "mh" | "mi" | "mk" | "ml" | "mn" | "mr" | "ms" | "mt" | "my"
            | "na" | "nb" | "nd" | "ne" | "ng" | "nl" | "nn" | "no" | "nr" | "nv" | "ny"
            | "oc" | "oj" | "om" | "or" | "os"
            | "pa" | "pi" | "pl" | "ps" | "pt"
            | "qu"
            | "rm" | "rn" | "ro" | "ru" | "rw"
            | "sa" | "sc" | "sd" | "se" | "sg" | "si" | "sk" | "sl" | "sm" | "sn" | "so" | "sq" | "sr" | "ss" | "st" | "su" | "sv" | "sw"
            | "ta" | "te" | "tg" | "th" | "ti" | "tk" | "tl" | "tn" | "to" | "tr" | "ts" | "tt" | "tw" | "ty"
            | "ug" | "uk" | "ur" | "uz"
            | "ve" | "vi" | "vo"
            | "wa" | "wo"
            | "xh"
            | "yi" | "yo"
            | "za" | "zh" | "zu"
    )
}

/// English name of a language, for CLI output.
pub fn language_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "en" => "English",
        "vi" => "Vietnamese",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "ja" => "Japanese",
        "pt" => "Portuguese",
        "zh" => "Chinese",
        "ko" => "Korean",
        "it" => "Italian",
        "ru" => "Russian",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "nl" => "Dutch",
        "sv" => "Swedish",
        "pl" => "Polish",
        "tr" => "Turkish",
        "th" => "Thai",
        "uk" => "Ukrainian",
        "cs" => "Czech",
        "el" => "Greek",
        "he" => "Hebrew",
        "da" => "Danish",
        "fi" => "Finnish",
        "no" | "nb" => "Norwegian",
        "hu" => "Hungarian",
        "ro" => "Romanian",
        "id" => "Indonesian",
        "ms" => "Malay",
        _ => return None,
    };
    Some(name)
}

/// Name of a language written in that language.
///
/// Used for the toggle control's `aria-label` when no phrase is configured.
pub fn native_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "en" => "English",
        "vi" => "Tiếng Việt",
        "es" => "Español",
        "fr" => "Français",
        "de" => "Deutsch",
        "ja" => "日本語",
        "pt" => "Português",
        "zh" => "中文",
        "ko" => "한국어",
        "it" => "Italiano",
        "ru" => "Русский",
        "th" => "ไทย",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_codes_accepted() {
        for code in ["en", "vi", "de", "zh", "ja"] {
            assert!(is_valid_iso639_1(code), "{code} should be registered");
        }
    }

    #[test]
    fn unregistered_codes_rejected() {
        assert!(!is_valid_iso639_1("qq"));
        assert!(!is_valid_iso639_1(""));
        assert!(!is_valid_iso639_1("vie"));
        assert!(!is_valid_iso639_1("VI"));
    }

    #[test]
    fn names_resolve() {
        assert_eq!(language_name("vi"), Some("Vietnamese"));
        assert_eq!(native_name("vi"), Some("Tiếng Việt"));
        assert_eq!(language_name("qq"), None);
        assert_eq!(native_name("sw"), None);
    }
}
