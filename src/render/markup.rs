//! ANSI-aware conversion of error text into display markup.
//!
//! Error messages and stacks often carry terminal colour codes. They are rendered into markup
//! regions of the error display, so the text is escaped and SGR sequences become `<span>`s.

/// Converts raw error text into safe display markup.
pub trait MarkupConverter: Send + Sync {
    fn to_markup(&self, text: &str) -> String;
}

/// Default converter handling reset, bold and the 16 standard foreground colours.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiMarkup;

const COLORS: [&str; 8] = [
    "#000", "#A00", "#0A0", "#A50", "#00A", "#A0A", "#0AA", "#AAA",
];
const BRIGHT_COLORS: [&str; 8] = [
    "#555", "#F55", "#5F5", "#FF5", "#55F", "#F5F", "#5FF", "#FFF",
];

impl AnsiMarkup {
    pub fn new() -> Self {
        Self
    }

    fn push_escaped(out: &mut String, ch: char) {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }

    fn style_for(code: u32) -> Option<String> {
        match code {
            1 => Some("font-weight:bold".to_string()),
            30..=37 => Some(format!("color:{}", COLORS[(code - 30) as usize])),
            90..=97 => Some(format!("color:{}", BRIGHT_COLORS[(code - 90) as usize])),
            _ => None,
        }
    }
}

impl MarkupConverter for AnsiMarkup {
    fn to_markup(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut open_spans = 0usize;
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '\u{1b}' {
                Self::push_escaped(&mut out, ch);
                continue;
            }
            if chars.peek() != Some(&'[') {
                continue;
            }
            chars.next();

            // Parameters up to the final byte of the control sequence
            let mut params = String::new();
            let mut final_byte = None;
            for c in chars.by_ref() {
                if ('\u{40}'..='\u{7e}').contains(&c) {
                    final_byte = Some(c);
                    break;
                }
                params.push(c);
            }
            if final_byte != Some('m') {
                continue;
            }

            let codes = if params.is_empty() {
                vec![0]
            } else {
                params
                    .split(';')
                    .filter_map(|p| p.parse::<u32>().ok())
                    .collect()
            };
            for code in codes {
                if matches!(code, 0 | 22 | 39) {
                    for _ in 0..open_spans {
                        out.push_str("</span>");
                    }
                    open_spans = 0;
                } else if let Some(style) = Self::style_for(code) {
                    out.push_str(&format!("<span style=\"{style}\">"));
                    open_spans += 1;
                }
            }
        }

        for _ in 0..open_spans {
            out.push_str("</span>");
        }
        out
    }
}
