//! Text masking for secrets shown on screen

/// Characters of an API key left visible at the start.
pub const MASK_PREFIX_LEN: usize = 3;
/// Characters of an API key left visible at the end.
pub const MASK_SUFFIX_LEN: usize = 4;
/// Replacement for every hidden character.
pub const MASK_CHAR: char = '•';

/// Mask `text`, keeping `prefix` leading and `suffix` trailing characters.
///
/// The result has the same number of chars as the input. When the text has
/// no interior characters left after reserving prefix and suffix, every
/// character is masked so short secrets are never shown in full.
pub fn mask_middle(text: &str, prefix: usize, suffix: usize, mask: char) -> String {
    let len = text.chars().count();
    if len <= prefix + suffix {
        return std::iter::repeat(mask).take(len).collect();
    }

    text.chars()
        .enumerate()
        .map(|(i, c)| if i < prefix || i >= len - suffix { c } else { mask })
        .collect()
}

/// Mask an API key for display (e.g. `sk-abcdef0123` -> `sk-••••••0123`).
pub fn mask_api_key(key: &str) -> String {
    mask_middle(key, MASK_PREFIX_LEN, MASK_SUFFIX_LEN, MASK_CHAR)
}
