use super::{Action, Binding, KeyCombo, Keymap};
use crate::error::ComboError;
use crossterm::event::{KeyCode, KeyModifiers};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

const MAX_KEYMAP_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const MAX_BINDINGS: usize = 64;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeymapFile {
    description: Option<String>,
    bindings: Option<HashMap<String, String>>,
}

/// Load the keymap: built-in defaults, overridden by `keymap.toml`.
///
/// Problems never abort startup. They are returned as warnings and the
/// defaults stay in effect.
pub fn load_keymap(keymap_file: Option<&PathBuf>) -> (Keymap, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = keymap_file.cloned().or_else(user_keymap_path);
    let defaults = Keymap::default();

    let Some(path) = config_path else {
        return (defaults, warnings);
    };
    if !path.exists() {
        if keymap_file.is_some() {
            warnings.push(format!("Keymap file not found: {}", path.display()));
        }
        return (defaults, warnings);
    }

    let content = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_KEYMAP_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_KEYMAP_FILE_BYTES
            ));
            return (defaults, warnings);
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                return (defaults, warnings);
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            return (defaults, warnings);
        }
    };

    let file = match toml::from_str::<KeymapFile>(&content) {
        Ok(file) => file,
        Err(err) => {
            warnings.push(format!("Failed to parse {}: {}", path.display(), err));
            return (defaults, warnings);
        }
    };

    match parse_bindings(file.bindings.as_ref()) {
        Ok(overrides) => {
            tracing::info!(
                path = %path.display(),
                bindings = overrides.len(),
                "merged user keymap"
            );
            let mut keymap = defaults.merged(overrides);
            keymap.description = file.description;
            (keymap, warnings)
        }
        Err(errors) => {
            warnings.extend(errors);
            (defaults, warnings)
        }
    }
}

fn user_keymap_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridedit")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("keymap.toml");
    Some(path)
}

fn parse_bindings(raw: Option<&HashMap<String, String>>) -> Result<Vec<Binding>, Vec<String>> {
    let mut errors: Vec<String> = Vec::new();
    let mut bindings: Vec<Binding> = Vec::new();
    let Some(raw) = raw else {
        return Ok(bindings);
    };
    if raw.len() > MAX_BINDINGS {
        return Err(vec![format!(
            "Too many bindings: {} (max {})",
            raw.len(),
            MAX_BINDINGS
        )]);
    }

    for (combo_str, action_str) in raw {
        match (parse_key_combo(combo_str), Action::from_name(action_str)) {
            (Ok(combo), Some(action)) => {
                if bindings.iter().any(|binding| binding.combo == combo) {
                    errors.push(format!("Duplicate key '{}' in bindings", combo.display()));
                    continue;
                }
                bindings.push(Binding { combo, action });
            }
            (Ok(_), None) => errors.push(format!("Invalid action '{}' in bindings", action_str)),
            (Err(err), _) => errors.push(format!("Invalid key '{}' in bindings: {}", combo_str, err)),
        }
    }

    if errors.is_empty() {
        Ok(bindings)
    } else {
        Err(errors)
    }
}

pub(crate) fn parse_key_combo(input: &str) -> Result<KeyCombo, ComboError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ComboError::Empty);
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCombo::new(KeyCode::Char(ch), KeyModifiers::empty()));
    }

    let (mods, key_part) = if !trimmed.contains('-') {
        (KeyModifiers::empty(), trimmed)
    } else if let Some(mod_str) = trimmed.strip_suffix('-') {
        let mod_str = mod_str.trim_end_matches('-');
        if mod_str.is_empty() {
            return Err(ComboError::MissingModifier);
        }
        (parse_modifiers(mod_str)?, "-")
    } else {
        let mut split = trimmed.rsplitn(2, '-');
        let key_part = split.next().ok_or(ComboError::Empty)?;
        let mod_str = split.next().unwrap_or_default();
        (parse_modifiers(mod_str)?, key_part)
    };

    let code = parse_key_code(key_part)?;
    Ok(KeyCombo::new(code, mods))
}

fn parse_modifiers(input: &str) -> Result<KeyModifiers, ComboError> {
    let mut modifiers = KeyModifiers::empty();
    for part in input.split('-') {
        let raw = part.trim();
        if raw.is_empty() {
            return Err(ComboError::EmptyModifier);
        }
        let flag = match raw.to_ascii_lowercase().as_str() {
            "c" | "ctrl" | "control" => KeyModifiers::CONTROL,
            "m" | "alt" | "meta" => KeyModifiers::ALT,
            "s" | "shift" => KeyModifiers::SHIFT,
            _ => return Err(ComboError::UnknownModifier(part.to_string())),
        };
        if modifiers.contains(flag) {
            return Err(ComboError::DuplicateModifier(raw.to_string()));
        }
        modifiers.insert(flag);
    }
    Ok(modifiers)
}

fn parse_key_code(input: &str) -> Result<KeyCode, ComboError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ComboError::Empty);
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCode::Char(ch));
    }
    let norm = trimmed.to_ascii_lowercase();
    if let Some(n) = norm.strip_prefix('f').and_then(|n| n.parse::<u8>().ok())
        && (1..=12).contains(&n)
    {
        return Ok(KeyCode::F(n));
    }
    match norm.as_str() {
        "esc" | "escape" => Ok(KeyCode::Esc),
        "tab" => Ok(KeyCode::Tab),
        "delete" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" => Ok(KeyCode::PageUp),
        "pagedown" => Ok(KeyCode::PageDown),
        "space" | "spc" => Ok(KeyCode::Char(' ')),
        "dash" | "minus" => Ok(KeyCode::Char('-')),
        "plus" => Ok(KeyCode::Char('+')),
        "comma" => Ok(KeyCode::Char(',')),
        "period" | "dot" => Ok(KeyCode::Char('.')),
        "slash" => Ok(KeyCode::Char('/')),
        "semicolon" => Ok(KeyCode::Char(';')),
        // Arrows and Enter belong to the grid.
        _ => Err(ComboError::UnknownKey(input.to_string())),
    }
}

fn parse_single_char(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let ch = chars.next()?;
    if chars.next().is_none() {
        Some(ch)
    } else {
        None
    }
}
