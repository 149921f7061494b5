//! General purpose string utilities
//!
//! Wide strings are UTF-16 code unit sequences, the representation used by
//! the Windows API. The "narrow" locale encoding is derived from the usual
//! POSIX locale environment variables.

use std::env;

/// UTF-16 encoded wide string
pub type WideString = Vec<u16>;

/// Narrow encodings understood by [`widen`] and [`narrow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleEncoding {
    /// UTF-8 codeset
    Utf8,
    /// ISO-8859-1, used for the `C`/`POSIX` locale and unknown codesets
    Latin1,
}

/// Converts a UTF-8 string into a wide string
pub fn utf8_to_wide(utf8: &str) -> WideString {
    utf8.encode_utf16().collect()
}

/// Converts a wide string into UTF-8
///
/// Unpaired surrogates are replaced with U+FFFD.
pub fn wide_to_utf8(ws: &[u16]) -> String {
    String::from_utf16_lossy(ws)
}

/// Converts bytes in the local encoding into a string
pub fn widen(s: &[u8]) -> String {
    widen_with(s, locale_encoding())
}

/// Converts a string into bytes in the local encoding
///
/// Characters that the local encoding cannot represent become `?`.
pub fn narrow(ws: &str) -> Vec<u8> {
    narrow_with(ws, locale_encoding())
}

/// [`widen`] with an explicit encoding
pub fn widen_with(s: &[u8], encoding: LocaleEncoding) -> String {
    match encoding {
        LocaleEncoding::Utf8 => String::from_utf8_lossy(s).into_owned(),
        LocaleEncoding::Latin1 => s.iter().map(|&b| char::from(b)).collect(),
    }
}

/// [`narrow`] with an explicit encoding
pub fn narrow_with(ws: &str, encoding: LocaleEncoding) -> Vec<u8> {
    match encoding {
        LocaleEncoding::Utf8 => ws.as_bytes().to_vec(),
        LocaleEncoding::Latin1 => ws
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect(),
    }
}

/// Determine the narrow encoding of the current locale
pub fn locale_encoding() -> LocaleEncoding {
    first_set(&["LC_ALL", "LC_CTYPE", "LANG"])
        .map_or(LocaleEncoding::Latin1, |locale| encoding_of(&locale))
}

/// Map a locale name such as `de_DE.UTF-8` to its encoding
pub fn encoding_of(locale: &str) -> LocaleEncoding {
    let codeset = locale
        .split_once('.')
        .map(|(_, rest)| rest.split('@').next().unwrap_or(rest));

    match codeset {
        Some(cs) if cs.eq_ignore_ascii_case("utf-8") || cs.eq_ignore_ascii_case("utf8") => {
            LocaleEncoding::Utf8
        }
        _ => LocaleEncoding::Latin1,
    }
}

/// Returns the user's preferred language at the moment of calling
///
/// Expect values such as `en_US`, `de_DE.UTF-8` or `ja`. Only the first two
/// letters can be relied on to be a language abbreviation.
pub fn language() -> String {
    first_set(&["LC_ALL", "LC_MESSAGES", "LANG"])
        .filter(|lang| lang != "C" && lang != "POSIX" && !lang.starts_with("C."))
        .unwrap_or_else(|| "en_US".to_string())
}

fn first_set(vars: &[&str]) -> Option<String> {
    vars.iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
}
