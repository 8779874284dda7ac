//! File name normalization.
//!
//! The base name (everything before the first `.`) is transliterated from
//! Ukrainian Cyrillic to Latin and every character that is not a letter, digit
//! or underscore is replaced with `_`. The remainder after the first `.` is
//! kept verbatim.

use std::collections::HashMap;
use std::sync::LazyLock;

const CYRILLIC: [char; 33] = [
    'а', 'б', 'в', 'г', 'ґ', 'д', 'е', 'є', 'ж', 'з', 'и', 'і', 'ї', 'й', 'к', 'л', 'м', 'н', 'о',
    'п', 'р', 'с', 'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ь', 'ю', 'я',
];

const LATIN: [&str; 33] = [
    "a", "b", "v", "g", "g", "d", "e", "je", "zh", "z", "y", "i", "ji", "j", "k", "l", "m", "n",
    "o", "p", "r", "s", "t", "u", "f", "h", "ts", "ch", "sh", "sch", "", "ju", "ja",
];

static TRANSLITERATION: LazyLock<HashMap<char, String>> = LazyLock::new(|| {
    let mut table = HashMap::with_capacity(CYRILLIC.len() * 2);
    for (source, target) in CYRILLIC.iter().zip(LATIN) {
        table.insert(*source, target.to_string());
        for upper in source.to_uppercase() {
            table.insert(upper, target.to_uppercase());
        }
    }
    table
});

/// Transliterates and sanitizes a file name.
///
/// # Examples
///
/// ```
/// use clean_folder::normalize::normalize;
///
/// assert_eq!(normalize("звіт 1.JPG"), "zvit_1.JPG");
/// assert_eq!(normalize("Щоденник (копія).tar.gz"), "SCHodennyk__kopija_.tar.gz");
/// assert_eq!(normalize("README"), "README");
/// ```
pub fn normalize(name: &str) -> String {
    let (base, remainder) = match name.split_once('.') {
        Some((base, remainder)) => (base, Some(remainder)),
        None => (name, None),
    };

    let mut normalized = String::with_capacity(base.len());
    for c in base.chars() {
        match TRANSLITERATION.get(&c) {
            Some(latin) => normalized.push_str(latin),
            None if c.is_alphanumeric() || c == '_' => normalized.push(c),
            None => normalized.push('_'),
        }
    }

    if let Some(remainder) = remainder {
        normalized.push('.');
        normalized.push_str(remainder);
    }
    normalized
}
