//! Key normalization.
//!
//! Platforms disagree on how they name keys ("Control" vs "Ctrl", "Esc" vs
//! "Escape", "Spacebar" vs " "). Everything here maps those names onto a
//! canonical token, and from the token onto the label the shortcut dataset
//! uses, so that a captured combination can be compared with an expected one
//! by signature.

pub const CTRL: &str = "CTRL";
pub const SHIFT: &str = "SHIFT";
pub const ALT: &str = "ALT";
pub const WIN: &str = "WIN";

/// Separator used when joining tokens into a signature.
pub const SIGNATURE_DELIMITER: char = '+';

/// Modifiers in the order they appear in an emitted combination.
const MODIFIER_ORDER: [&str; 4] = [CTRL, SHIFT, ALT, WIN];

/// Maps a raw key name onto its canonical token.
///
/// Input is trimmed and compared case-insensitively. Unknown keys are upper
/// cased and used as their own token. Empty input yields an empty token.
#[must_use]
pub fn normalize_key_token(raw: &str) -> String {
    // A lone space is a key name, trimming would erase it.
    if raw == " " {
        return "SPACE".to_owned();
    }
    let key = raw.trim().to_uppercase();
    match key.as_str() {
        "" => String::new(),
        "CONTROL" | "CTRL" => CTRL.to_owned(),
        "SHIFT" => SHIFT.to_owned(),
        "ALT" | "ALTGRAPH" => ALT.to_owned(),
        "META" | "OS" | "WIN" | "WINDOWS" => WIN.to_owned(),
        "ESCAPE" | "ESC" => "ESC".to_owned(),
        "SPACE" | "SPACEBAR" => "SPACE".to_owned(),
        "ARROWUP" | "UP" => "UP".to_owned(),
        "ARROWDOWN" | "DOWN" => "DOWN".to_owned(),
        "ARROWLEFT" | "LEFT" => "LEFT".to_owned(),
        "ARROWRIGHT" | "RIGHT" => "RIGHT".to_owned(),
        _ => key,
    }
}

#[must_use]
pub fn is_modifier_token(key: &str) -> bool {
    MODIFIER_ORDER.contains(&normalize_key_token(key).as_str())
}

/// Human facing label for a key, as used by the shortcut dataset.
///
/// Function keys and single alphanumerics pass through as their token.
/// Anything unrecognized falls back to the input as given.
#[must_use]
pub fn display_key_token(key: &str) -> String {
    let token = normalize_key_token(key);
    let label = match token.as_str() {
        CTRL => "Ctrl",
        SHIFT => "Shift",
        ALT => "Alt",
        WIN => "Win",
        "ESC" => "Escape",
        "SPACE" => "Space",
        "UP" => "Up",
        "DOWN" => "Down",
        "LEFT" => "Left",
        "RIGHT" => "Right",
        "PAGEUP" => "PageUp",
        "PAGEDOWN" => "PageDown",
        "BACKSPACE" => "Backspace",
        "DELETE" => "Delete",
        "TAB" => "Tab",
        "ENTER" => "Enter",
        "HOME" => "Home",
        "END" => "End",
        "INSERT" => "Insert",
        _ if is_function_key(&token) || is_single_alphanumeric(&token) => return token,
        _ => return key.to_owned(),
    };
    label.to_owned()
}

/// Order independent signature of a set of keys.
///
/// Each key is normalized, empty tokens are dropped, and the rest are sorted
/// and joined with `+`. An empty signature means "no combination".
#[must_use]
pub fn normalize_combo_signature<I, S>(keys: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens: Vec<String> = keys
        .into_iter()
        .map(|key| normalize_key_token(key.as_ref()))
        .filter(|token| !token.is_empty())
        .collect();
    tokens.sort();
    tokens.join(SIGNATURE_DELIMITER.to_string().as_str())
}

/// Puts modifiers first, in the order Ctrl, Shift, Alt, Win. Other keys keep
/// their relative order.
#[must_use]
pub fn order_combination(labels: &[String]) -> Vec<String> {
    let rank = |label: &String| {
        let token = normalize_key_token(label);
        MODIFIER_ORDER
            .iter()
            .position(|modifier| *modifier == token)
            .unwrap_or(MODIFIER_ORDER.len())
    };
    let mut ordered = labels.to_vec();
    // Stable, so non-modifiers stay in press order.
    ordered.sort_by_key(rank);
    ordered
}

/// Splits a written shortcut like `"Ctrl+Shift+A"` into display labels.
///
/// A `+` directly after a separator (or alone) is the plus key itself, so
/// `"Ctrl++"` and `"Ctrl + +"` both mean Ctrl and Plus.
#[must_use]
pub fn parse_combo(text: &str) -> Vec<String> {
    let mut labels = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch == SIGNATURE_DELIMITER && !current.trim().is_empty() {
            labels.push(display_key_token(current.trim()));
            current.clear();
        } else if ch == SIGNATURE_DELIMITER {
            current.clear();
            current.push(ch);
        } else {
            current.push(ch);
        }
    }
    if !current.trim().is_empty() {
        labels.push(display_key_token(current.trim()));
    }
    labels
}

fn is_function_key(token: &str) -> bool {
    match token.strip_prefix('F') {
        Some(digits) => (1..=2).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

fn is_single_alphanumeric(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_aliases_share_a_token() {
        assert_eq!(normalize_key_token("Control"), "CTRL");
        assert_eq!(normalize_key_token("ctrl"), "CTRL");
        assert_eq!(normalize_key_token("AltGraph"), "ALT");
        assert_eq!(normalize_key_token("Meta"), "WIN");
        assert_eq!(normalize_key_token("OS"), "WIN");
        assert_eq!(normalize_key_token("Windows"), "WIN");
        assert_eq!(normalize_key_token(" shift "), "SHIFT");
    }

    #[test]
    fn named_keys_normalize() {
        assert_eq!(normalize_key_token("Esc"), "ESC");
        assert_eq!(normalize_key_token("Escape"), "ESC");
        assert_eq!(normalize_key_token(" "), "SPACE");
        assert_eq!(normalize_key_token("Spacebar"), "SPACE");
        assert_eq!(normalize_key_token("ArrowLeft"), "LEFT");
        assert_eq!(normalize_key_token("down"), "DOWN");
        assert_eq!(normalize_key_token("PageUp"), "PAGEUP");
        assert_eq!(normalize_key_token("f5"), "F5");
        assert_eq!(normalize_key_token("a"), "A");
    }

    #[test]
    fn empty_input_gives_empty_token() {
        assert_eq!(normalize_key_token(""), "");
        assert_eq!(normalize_key_token("   "), "");
    }

    #[test]
    fn only_four_modifiers() {
        for key in ["Control", "Shift", "Alt", "Meta", "Ctrl", "Win"] {
            assert!(is_modifier_token(key), "{key}");
        }
        for key in ["A", "Escape", "F4", "Tab", ""] {
            assert!(!is_modifier_token(key), "{key}");
        }
    }

    #[test]
    fn display_labels() {
        assert_eq!(display_key_token("Control"), "Ctrl");
        assert_eq!(display_key_token("Esc"), "Escape");
        assert_eq!(display_key_token(" "), "Space");
        assert_eq!(display_key_token("ArrowUp"), "Up");
        assert_eq!(display_key_token("pagedown"), "PageDown");
        assert_eq!(display_key_token("f12"), "F12");
        assert_eq!(display_key_token("c"), "C");
        assert_eq!(display_key_token("7"), "7");
        assert_eq!(display_key_token("CapsLock"), "CapsLock");
        assert_eq!(display_key_token("/"), "/");
        assert_eq!(display_key_token("F123"), "F123");
    }

    #[test]
    fn signature_ignores_order() {
        assert_eq!(
            normalize_combo_signature(["Ctrl", "Shift", "A"]),
            normalize_combo_signature(["A", "Shift", "Ctrl"]),
        );
        assert_eq!(normalize_combo_signature(["Ctrl", "Shift", "A"]), "A+CTRL+SHIFT");
    }

    #[test]
    fn signature_merges_label_variants() {
        assert_eq!(
            normalize_combo_signature(["Control", "c"]),
            normalize_combo_signature(["Ctrl", "C"]),
        );
        assert_eq!(
            normalize_combo_signature(["Esc"]),
            normalize_combo_signature(["Escape"]),
        );
    }

    #[test]
    fn empty_signature() {
        assert_eq!(normalize_combo_signature(Vec::<String>::new()), "");
        assert_eq!(normalize_combo_signature(["", "  "]), "");
    }

    #[test]
    fn modifiers_come_first() {
        let held = vec!["C".to_owned(), "Shift".to_owned(), "Ctrl".to_owned()];
        assert_eq!(order_combination(&held), vec!["Ctrl", "Shift", "C"]);
    }

    #[test]
    fn parse_written_combos() {
        assert_eq!(parse_combo("Ctrl+Shift+a"), vec!["Ctrl", "Shift", "A"]);
        assert_eq!(parse_combo("alt + f4"), vec!["Alt", "F4"]);
        assert_eq!(parse_combo("Ctrl++"), vec!["Ctrl", "+"]);
        assert_eq!(parse_combo("Ctrl + +"), vec!["Ctrl", "+"]);
        assert_eq!(parse_combo("Escape"), vec!["Escape"]);
        assert!(parse_combo("").is_empty());
    }
}
