/// Derives a layout key from a human-readable field name.
///
/// The name is lower-cased and split on every non-alphanumeric character;
/// the resulting words are joined in camel case. `"Birth Place"` becomes
/// `"birthPlace"`. Returns an empty string when the name has no
/// alphanumeric characters.
pub fn derive_field_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());

    let words = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase);

    for (i, word) in words.enumerate() {
        if i == 0 {
            key.push_str(&word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.push_str(chars.as_str());
        }
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_words_camel_case() {
        assert_eq!(derive_field_key("Birth Place"), "birthPlace");
    }

    #[test]
    fn test_punctuation_and_digits() {
        assert_eq!(derive_field_key("  Civil-Status 2 "), "civilStatus2");
        assert_eq!(derive_field_key("O.R. Number"), "oRNumber");
    }

    #[test]
    fn test_all_caps_is_lowered_first() {
        assert_eq!(derive_field_key("CTC NO"), "ctcNo");
    }

    #[test]
    fn test_single_word() {
        assert_eq!(derive_field_key("Purpose"), "purpose");
    }

    #[test]
    fn test_no_alphanumerics_yields_empty() {
        assert_eq!(derive_field_key("!!!"), "");
        assert_eq!(derive_field_key(""), "");
    }

    #[test]
    fn test_non_ascii_letters_are_kept() {
        assert_eq!(derive_field_key("Niño Name"), "niñoName");
    }
}
