use crate::eval_engine::{evaluate, format_result};
use anyhow::Result;
use std::io::{stdin, stdout, Write};
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

pub fn run_line() -> Result<()> {
    println!("PlotCalc Console Calculator");
    println!("Operators: +, -, *, /, %, ^   Functions: sin, cos, sqrt, log, ...");
    println!("Constants: pi, e");
    println!("Navigation: Left/Right, Backspace/Delete, Home/End, Up/Down for history");
    println!("Type 'quit' to exit, 'clear' to reset history\n");

    let mut stdout = stdout().into_raw_mode()?;
    let mut history: Vec<String> = Vec::new();
    let mut history_index = 0;

    loop {
        write!(stdout, "{}Expression: ", ClearLine)?;
        stdout.flush()?;

        let mut expression = String::new();
        let mut cursor_pos = 0;
        let (_, initial_y) = stdout.cursor_pos()?;

        let stdin = stdin();
        let mut keys = stdin.keys();

        loop {
            write!(
                stdout,
                "{}{}Expression: {}",
                Goto(1, initial_y),
                ClearLine,
                expression
            )?;

            let byte_pos = char_index_to_byte_index(&expression, cursor_pos);
            write!(stdout, "{}", Goto((13 + byte_pos) as u16, initial_y))?;
            stdout.flush()?;

            let Some(key) = keys.next() else {
                // stdin closed
                return Ok(());
            };
            match key? {
                Key::Char('\n') => break,
                Key::Char(c) => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    expression.insert(byte_idx, c);
                    cursor_pos += 1;
                }
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    if let Some(c) = expression[byte_idx..].chars().next() {
                        let end = byte_idx + c.len_utf8();
                        expression.drain(byte_idx..end);
                    }
                }
                Key::Delete if cursor_pos < expression.chars().count() => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    if let Some(c) = expression[byte_idx..].chars().next() {
                        let end = byte_idx + c.len_utf8();
                        expression.drain(byte_idx..end);
                    }
                }
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < expression.chars().count() => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = expression.chars().count(),
                Key::Up => {
                    if history_index > 0 {
                        history_index -= 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    }
                }
                Key::Down => {
                    if history_index < history.len().saturating_sub(1) {
                        history_index += 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    } else {
                        history_index = history.len();
                        expression.clear();
                        cursor_pos = 0;
                    }
                }
                Key::Ctrl('c') => {
                    println!("\r\nGoodbye!");
                    return Ok(());
                }
                _ => {}
            }
        }

        let input = expression.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                println!("\r\nGoodbye!");
                return Ok(());
            }
            "clear" | "reset" => {
                history.clear();
                history_index = 0;
                println!("\r\nHistory cleared\n");
                continue;
            }
            _ => {}
        }

        history.push(input.to_string());
        history_index = history.len();

        match evaluate(input, None) {
            Ok(result) => {
                print!("\r\n  {} = {}\r\n", input, format_result(result.value));
                for warning in &result.warnings {
                    print!("  Warning: {}\r\n", warning);
                }
                print!("\r\n");
            }
            Err(e) => {
                print!("\r\n  {} = Error: {}\r\n\r\n", input, e);
            }
        }
    }
}
