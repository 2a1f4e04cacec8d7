use std::borrow::Cow;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{ ([a-zA-Z_]*) \}\}")
        .expect("placeholder pattern is a valid regex");
}

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Template file '{}' is missing", .0.display())]
    Missing(PathBuf),
}

/// Named values exposed to a template, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateValues {
    values: IndexMap<String, String>,
}

impl TemplateValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}


pub fn load_template<P: AsRef<Path>>(path: P) -> Result<String, Err> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Err::Missing(path.to_path_buf()),
        _ => Err::Io(e),
    })
}

/// Substitutes the values into `template`, line by line.
///
/// A line is rewritten only if it contains `{{ key }}` for some exposed key.
/// The first placeholder on such a line selects the value, and every
/// placeholder on the line is replaced with it. Lines whose first placeholder
/// is not exposed are copied unchanged. Line endings are preserved.
pub fn render(template: &str, values: &TemplateValues) -> String {
    let needles = values.keys()
        .map(|key| format!("{{{{ {} }}}}", key))
        .collect::<Vec<_>>();

    let mut out = String::with_capacity(template.len());
    for line in template.split_inclusive('\n') {
        out.push_str(&render_line(line, values, &needles));
    }
    out
}

fn render_line<'a>(line: &'a str, values: &TemplateValues, needles: &[String]) -> Cow<'a, str> {
    if !needles.iter().any(|needle| line.contains(needle.as_str())) {
        return Cow::Borrowed(line);
    }
    let value = PLACEHOLDER.captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|name| values.get(name.as_str()));
    match value {
        Some(value) => PLACEHOLDER.replace_all(line, NoExpand(value)),
        None => Cow::Borrowed(line),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> TemplateValues {
        let mut values = TemplateValues::new();
        values.insert("mode", "TRIANGLES");
        values.insert("indices", "0, 1, 2");
        values.insert("indices_end", "2");
        values
    }

    #[test]
    fn substitutes_known_placeholders() {
        let template = "<mode>{{ mode }}</mode>\n<indices>{{ indices }}</indices>\n";
        assert_eq!(
            render(template, &values()),
            "<mode>TRIANGLES</mode>\n<indices>0, 1, 2</indices>\n"
        );
    }

    #[test]
    fn similar_names_do_not_collide() {
        let template = "end={{ indices_end }}\n";
        assert_eq!(render(template, &values()), "end=2\n");
    }

    #[test]
    fn repeated_placeholder() {
        let template = "{{ mode }} and {{ mode }}";
        assert_eq!(render(template, &values()), "TRIANGLES and TRIANGLES");
    }

    #[test]
    fn first_placeholder_wins() {
        let template = "{{ indices_end }} {{ mode }}\n";
        assert_eq!(render(template, &values()), "2 2\n");
    }

    #[test]
    fn unexposed_first_placeholder_keeps_line() {
        let template = "{{ unknown }} {{ mode }}\n";
        assert_eq!(render(template, &values()), template);
    }

    #[test]
    fn untouched_lines() {
        let template = "<?xml version=\"1.0\"?>\r\n{{ vertices }}\r\n{{mode}}\n";
        assert_eq!(render(template, &values()), template);
    }

    #[test]
    fn values_are_inserted_literally() {
        let mut values = TemplateValues::new();
        values.insert("mode", "$1 ${name}");
        assert_eq!(render("{{ mode }}", &values), "$1 ${name}");
    }

    #[test]
    fn missing_template() {
        let err = load_template("no/such/template").unwrap_err();
        assert!(matches!(err, Err::Missing(_)));
    }
}
