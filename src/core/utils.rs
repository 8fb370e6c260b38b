/// Escapes special characters for Telegram MarkdownV2.
///
/// Every character Telegram reserves in MarkdownV2 gets a leading backslash,
/// so arbitrary text renders literally.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        match c {
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{' | '}'
            | '.' | '!' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::escape_markdown_v2;

    #[test]
    fn test_escape_markdown_v2() {
        assert_eq!(escape_markdown_v2("✅ Bot is running correctly."), "✅ Bot is running correctly\\.");
        assert_eq!(escape_markdown_v2("-100123"), "\\-100123");
        assert_eq!(escape_markdown_v2("a_b*c"), "a\\_b\\*c");
        assert_eq!(escape_markdown_v2("back\\slash"), "back\\\\slash");
        assert_eq!(escape_markdown_v2("plain text 123"), "plain text 123");
    }
}
