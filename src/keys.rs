// Dataentry Terminal Keys
// Maps crossterm key codes to entry control ids

use crossterm::event::KeyCode;

/// Map a terminal key to a control id
///
/// Names match the built-in bindings of the entry context.
pub fn control_id(code: KeyCode) -> Option<String> {
    let id = match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::F(n) => format!("f{}", n),
        _ => return None,
    };
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_ids() {
        assert_eq!(control_id(KeyCode::Char('7')).as_deref(), Some("7"));
        assert_eq!(control_id(KeyCode::Backspace).as_deref(), Some("backspace"));
        assert_eq!(control_id(KeyCode::Esc).as_deref(), Some("escape"));
        assert_eq!(control_id(KeyCode::F(2)).as_deref(), Some("f2"));
        assert_eq!(control_id(KeyCode::PageDown), None);
        assert_eq!(control_id(KeyCode::Tab), None);
    }
}
