use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec!["".to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            let mut remaining = word;
            while !remaining.is_empty() {
                let mut chunk = String::new();
                let mut chunk_width = 0;
                let mut chunk_byte_len = 0;

                for c in remaining.chars() {
                    let char_width = UnicodeWidthChar::width_cjk(c).unwrap_or(1);
                    if chunk_width + char_width > width {
                        break;
                    }
                    chunk.push(c);
                    chunk_width += char_width;
                    chunk_byte_len += c.len_utf8();
                }

                if !current_line.is_empty() {
                    lines.push(current_line.trim().to_string());
                    current_line.clear();
                    current_width = 0;
                }

                lines.push(chunk);
                remaining = &remaining[chunk_byte_len..];
            }
            continue;
        }

        if current_width + word_width + 1 > width && !current_line.is_empty() {
            lines.push(current_line.trim().to_string());
            current_line.clear();
            current_width = 0;
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }

        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line.trim().to_string());
    }

    lines
}

pub fn is_math_function(word: &str) -> bool {
    matches!(
        word.to_lowercase().as_str(),
        "sqrt" | "sin" | "cos" | "tan" | "asin" | "acos" | "atan" |
        "sinh" | "cosh" | "tanh" | "log" | "ln" | "exp" |
        "abs" | "ceil" | "floor" | "round" |
        "pi" | "e"
    )
}

pub fn highlight_functions(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let function_style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);

    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default().fg(Color::LightGreen);

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_function = false;
    let mut in_number = false;

    for c in expr.chars() {
        if c.is_alphabetic() {
            if in_number {
                spans.push(Span::styled(current.clone(), number_style));
                current.clear();
                in_number = false;
            }

            current.push(c);
            in_function = true;
        } else if c.is_numeric() || c == '.' {
            if in_function {
                if is_math_function(&current) {
                    spans.push(Span::styled(current.clone(), function_style));
                } else {
                    spans.push(Span::styled(current.clone(), base_style));
                }
                current.clear();
                in_function = false;
            }

            current.push(c);
            in_number = true;
        } else {
            if in_function {
                if is_math_function(&current) {
                    spans.push(Span::styled(current.clone(), function_style));
                } else {
                    spans.push(Span::styled(current.clone(), base_style));
                }
                current.clear();
                in_function = false;
            } else if in_number {
                spans.push(Span::styled(current.clone(), number_style));
                current.clear();
                in_number = false;
            }

            match c {
                '+' | '-' | '*' | '/' | '^' | '%' => {
                    spans.push(Span::styled(c.to_string(), operator_style));
                }
                ' ' => {
                    spans.push(Span::raw(" "));
                }
                _ => {
                    spans.push(Span::styled(c.to_string(), base_style));
                }
            }
        }
    }

    if in_function {
        if is_math_function(&current) {
            spans.push(Span::styled(current, function_style));
        } else {
            spans.push(Span::styled(current, base_style));
        }
    } else if in_number {
        spans.push(Span::styled(current, number_style));
    }

    spans
}

/// Splits an optional trailing colour word off a `graph` command's
/// arguments. A last word naming no known colour stays part of the
/// expression.
pub fn split_colour(args: &str) -> (&str, Color) {
    if let Some((expr, last)) = args.rsplit_once(' ') {
        if let Some(colour) = parse_colour(last.trim()) {
            return (expr.trim(), colour);
        }
    }
    (args, Color::Blue)
}

pub fn parse_colour(name: &str) -> Option<Color> {
    match name {
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "blue" => Some(Color::Blue),
        "black" => Some(Color::Black),
        "yellow" => Some(Color::Yellow),
        "cyan" => Some(Color::Cyan),
        "magenta" => Some(Color::Magenta),
        "orange" => Some(Color::Rgb(255, 165, 0)),
        "purple" => Some(Color::Rgb(120, 0, 120)),
        _ => None,
    }
}
