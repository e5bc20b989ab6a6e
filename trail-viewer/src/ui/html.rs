/// Escape text for insertion into `innerHTML`.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escaped text with newlines turned into `<br>`.
pub fn multiline_html(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn newlines_become_line_breaks() {
        assert_eq!(
            multiline_html("Enter VR\nTrigger to Record"),
            "Enter VR<br>Trigger to Record"
        );
    }

    #[test]
    fn host_page_starts_with_desktop_instructions() {
        let page = include_str!("../../index.html");
        assert!(page.contains(&multiline_html(crate::ui::hud::DESKTOP_INSTRUCTIONS)));
    }
}
