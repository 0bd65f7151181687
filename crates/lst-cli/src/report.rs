//! Violation rendering for console output.

use std::fmt::Write as _;

use lst_schema::Violation;

/// Render every violation with its full context: keyword, schema
/// location, evaluation path, instance location, offending value, and
/// message key.
pub fn render_violations(violations: &[Violation]) -> String {
    let mut out = String::new();
    for v in violations {
        let _ = writeln!(out, "{}", v.message);
        let _ = writeln!(out, "  keyword:           {}", v.keyword);
        let _ = writeln!(out, "  schema location:   {}", v.schema_location);
        let _ = writeln!(out, "  evaluation path:   {}", v.evaluation_path);
        let _ = writeln!(out, "  instance location: {}", v.instance_location);
        let _ = writeln!(out, "  instance value:    {}", v.instance);
        let _ = writeln!(out, "  message key:       {}", v.message_key);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rendering_includes_every_violation_attribute() {
        let violations = vec![Violation {
            keyword: "maxUtf8ByteLength".into(),
            schema_location: "/properties/item_name/maxUtf8ByteLength".into(),
            evaluation_path: "/properties/item_name/maxUtf8ByteLength".into(),
            instance_location: "/item_name".into(),
            instance: json!("café"),
            message_key: "maxUtf8ByteLength".into(),
            message: "maxUtf8ByteLength: string is 5 UTF-8 bytes, maximum is 4".into(),
        }];
        let rendered = render_violations(&violations);
        assert!(rendered.contains("maxUtf8ByteLength"));
        assert!(rendered.contains("/properties/item_name/maxUtf8ByteLength"));
        assert!(rendered.contains("/item_name"));
        assert!(rendered.contains("\"café\""));
        assert!(rendered.contains("message key"));
    }
}
