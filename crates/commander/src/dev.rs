//! Tuning overrides typed at the prompt: `set <@tag|army> <attribute> <value>`.

use charisma::{Attribute, Session};

pub fn apply_setting(session: &mut Session, tag: &str, attr: &str, value: &str) -> String {
    let attr = match attr.parse::<Attribute>() {
        Ok(attr) => attr,
        Err(err) => return err.to_string(),
    };
    let Some(value) = value.parse::<f64>().ok().filter(|v| v.is_finite()) else {
        return format!("Invalid value '{value}'.");
    };
    let side = session.commander();
    match session.override_attribute(tag, side, attr, value) {
        Some(who) => format!("{attr} of {who} set to {:.1}", value.clamp(0.0, 100.0)),
        None => format!("No {tag} answers the roll call."),
    }
}
