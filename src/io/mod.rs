/// Reads obj files into attribute tables and a re-indexed face stream.
pub mod obj;

/// Fills `{{ name }}` placeholders of a text template.
pub mod template;
