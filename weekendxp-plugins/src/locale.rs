use std::{collections::HashMap, fmt::Display};

/// Host-provided message templates, looked up by numeric id.
///
/// Templates use `{}` placeholders, filled in order.
pub trait Locale {
    fn template(&self, id: u32) -> Option<&str>;
}

/// Locale with no entries; every lookup falls back to the plugin's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocale;

impl Locale for NoLocale {
    fn template(&self, _id: u32) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    templates: HashMap<u32, String>,
}

impl LocaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u32, template: impl Into<String>) {
        self.templates.insert(id, template.into());
    }
}

impl Locale for LocaleTable {
    fn template(&self, id: u32) -> Option<&str> {
        self.templates.get(&id).map(String::as_str)
    }
}

/// Resolves message `id` (falling back to `default`) and fills its
/// placeholders. Extra placeholders are left as-is, extra args are dropped.
pub fn format_message(locale: &dyn Locale, id: u32, default: &str, args: &[&dyn Display]) -> String {
    let template = locale.template(id).unwrap_or(default);

    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default() {
        let msg = format_message(&NoLocale, 1, "rate set to {}.", &[&2.5]);
        assert_eq!(msg, "rate set to 2.5.");
    }

    #[test]
    fn host_template_wins() {
        let mut locale = LocaleTable::new();
        locale.insert(1, "Taux: {} (max {})");
        let msg = format_message(&locale, 1, "unused {}", &[&1.5, &2]);
        assert_eq!(msg, "Taux: 1.5 (max 2)");
    }

    #[test]
    fn missing_args_leave_placeholders() {
        let msg = format_message(&NoLocale, 1, "{} and {}", &[&"one"]);
        assert_eq!(msg, "one and {}");
    }
}
