//! Keyboard event normalization
//!
//! Single-character keys become their ASCII code as a decimal string (with
//! the control mask applied when ctrl is held). Named keys such as
//! `ArrowLeft` pass through unchanged.

/// Convert a key-down event into the token the key bindings are keyed by
pub fn normalize_key(key: &str, ctrl: bool) -> String {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let mut ascii = c as u32;
        if ascii < 128 {
            if ctrl {
                ascii &= 0x1f;
            }
            return ascii.to_string();
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys_pass_through() {
        assert_eq!(normalize_key("ArrowLeft", false), "ArrowLeft");
        assert_eq!(normalize_key("ArrowDown", true), "ArrowDown");
        assert_eq!(normalize_key("Escape", false), "Escape");
    }

    #[test]
    fn test_single_characters_become_codes() {
        assert_eq!(normalize_key(" ", false), "32");
        assert_eq!(normalize_key("s", false), "115");
        assert_eq!(normalize_key("r", false), "114");
    }

    #[test]
    fn test_ctrl_masks_the_code() {
        assert_eq!(normalize_key("s", true), "19");
        assert_eq!(normalize_key("r", true), "18");
    }

    #[test]
    fn test_non_ascii_character_passes_through() {
        assert_eq!(normalize_key("é", false), "é");
    }
}
