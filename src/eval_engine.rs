use thiserror::Error;

/// Recognized unary functions. Longest names first so a prefix never
/// shadows a longer name (`sin` must not match inside `sinh`).
const FUNCTIONS: [&str; 17] = [
    "floor", "round",
    "sqrt", "asin", "acos", "atan", "sinh", "cosh", "tanh", "ceil",
    "sin", "cos", "tan", "log", "abs", "exp",
    "ln",
];

/// Named constants, substituted as literal text before scanning.
const CONSTANTS: [(&str, &str); 2] = [
    ("pi", "3.1415926536"),
    ("e", "2.7182818285"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Empty expression")]
    EmptyExpression,
    #[error("Invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("Malformed number")]
    MalformedNumber,
    #[error("Mismatched parentheses")]
    MismatchedParentheses,
    #[error("Invalid expression")]
    InvalidExpression,
}

/// Recovered arithmetic faults. Evaluation continues with a 0 sentinel
/// instead of aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticWarning {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Modulo by zero")]
    ModuloByZero,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    pub warnings: Vec<ArithmeticWarning>,
}

/// A numeric value bound to a single-letter variable name, used by the
/// graphing path to substitute `x` before scanning.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub name: char,
    pub value: f64,
}

/// Strips spaces, substitutes the bound variable (if any) and the named
/// constants. Substitution only touches standalone occurrences: a name
/// whose neighbour is alphanumeric is part of an identifier and is left
/// alone, so `e` inside `exp` or `ceil` survives.
pub fn normalize(expr: &str, binding: Option<Binding>) -> String {
    let mut text: String = expr.chars().filter(|c| *c != ' ').collect();

    if let Some(binding) = binding {
        let literal = format!("({:.6})", binding.value);
        text = replace_standalone(&text, &binding.name.to_string(), &literal);
    }

    for (name, literal) in CONSTANTS {
        text = replace_standalone(&text, name, literal);
    }

    text
}

fn replace_standalone(text: &str, name: &str, replacement: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let name_chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(text.len());

    let mut i = 0;
    while i < chars.len() {
        let end = i + name_chars.len();
        if end <= chars.len() && chars[i..end] == name_chars[..] {
            let before_ok = i == 0 || !chars[i - 1].is_ascii_alphanumeric();
            let after_ok = end == chars.len() || !chars[end].is_ascii_alphanumeric();
            if before_ok && after_ok {
                out.push_str(replacement);
                i = end;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

fn function_at(chars: &[char], i: usize) -> Option<&'static str> {
    FUNCTIONS.iter().copied().find(|name| {
        name.len() <= chars.len() - i
            && name
                .chars()
                .zip(&chars[i..])
                .all(|(n, c)| c.eq_ignore_ascii_case(&n))
    })
}

fn precedence(op: char) -> u8 {
    match op {
        '+' | '-' => 1,
        '*' | '/' | '%' => 2,
        '^' => 3,
        _ => 0,
    }
}

fn is_right_associative(op: char) -> bool {
    op == '^'
}

/// A `-` is unary at the start of the expression or right after an open
/// parenthesis or a binary operator. `%` is deliberately not in the list.
fn is_unary_minus(chars: &[char], i: usize) -> bool {
    i == 0 || matches!(chars[i - 1], '(' | '+' | '-' | '*' | '/' | '^')
}

fn apply_op(a: f64, b: f64, op: char, warnings: &mut Vec<ArithmeticWarning>) -> f64 {
    match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        '/' => {
            if b == 0.0 {
                warnings.push(ArithmeticWarning::DivisionByZero);
                0.0
            } else {
                a / b
            }
        }
        '%' => {
            // Modulo truncates both operands to integers first.
            if b as i64 == 0 {
                warnings.push(ArithmeticWarning::ModuloByZero);
                0.0
            } else {
                (a as i64 % b as i64) as f64
            }
        }
        '^' => a.powf(b),
        _ => 0.0,
    }
}

fn apply_function(name: &str, value: f64) -> f64 {
    match name {
        "sqrt" => value.sqrt(),
        "sin" => value.sin(),
        "cos" => value.cos(),
        "tan" => value.tan(),
        "asin" => value.asin(),
        "acos" => value.acos(),
        "atan" => value.atan(),
        "sinh" => value.sinh(),
        "cosh" => value.cosh(),
        "tanh" => value.tanh(),
        "log" => value.log10(),
        "ln" => value.ln(),
        "exp" => value.exp(),
        "abs" => value.abs(),
        "ceil" => value.ceil(),
        "floor" => value.floor(),
        "round" => value.round(),
        _ => value,
    }
}

fn reduce(
    values: &mut Vec<f64>,
    op: char,
    warnings: &mut Vec<ArithmeticWarning>,
) -> Result<(), EvalError> {
    let b = values.pop().ok_or(EvalError::InvalidExpression)?;
    let a = values.pop().ok_or(EvalError::InvalidExpression)?;
    values.push(apply_op(a, b, op, warnings));
    Ok(())
}

/// Evaluates an infix expression in one left-to-right pass over three
/// stacks: operands, pending operators and pending function names.
/// Malformed input comes back as an `EvalError`; division and modulo by
/// zero are recovered in place and reported through `warnings`.
pub fn evaluate(expr: &str, binding: Option<Binding>) -> Result<Evaluation, EvalError> {
    let text = normalize(expr, binding);
    if text.is_empty() {
        return Err(EvalError::EmptyExpression);
    }

    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();

    let mut values: Vec<f64> = Vec::new();
    let mut ops: Vec<char> = Vec::new();
    let mut functions: Vec<&'static str> = Vec::new();
    let mut warnings: Vec<ArithmeticWarning> = Vec::new();

    let mut i = 0;
    while i < n {
        if let Some(name) = function_at(&chars, i) {
            functions.push(name);
            i += name.len();
            continue;
        }

        match chars[i] {
            '(' => {
                ops.push('(');
                i += 1;
            }
            ')' => {
                while let Some(&op) = ops.last() {
                    if op == '(' {
                        break;
                    }
                    ops.pop();
                    reduce(&mut values, op, &mut warnings)?;
                }
                if ops.last() == Some(&'(') {
                    ops.pop();
                }
                // A closing parenthesis completes the argument of the most
                // recently seen function.
                if let Some(func) = functions.pop() {
                    let arg = values.pop().ok_or(EvalError::InvalidExpression)?;
                    values.push(apply_function(func, arg));
                }
                i += 1;
            }
            '0'..='9' | '.' => {
                // Integer and fractional digits are accumulated separately
                // and joined once, instead of rescaling per digit.
                let mut num = 0.0;
                let mut decimal = 0.0;
                let mut has_decimal = false;
                let mut decimal_places = 0;

                while i < n && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    if chars[i] == '.' {
                        if has_decimal {
                            return Err(EvalError::MalformedNumber);
                        }
                        has_decimal = true;
                    } else {
                        let digit = (chars[i] as u8 - b'0') as f64;
                        if has_decimal {
                            decimal = decimal * 10.0 + digit;
                            decimal_places += 1;
                        } else {
                            num = num * 10.0 + digit;
                        }
                    }
                    i += 1;
                }

                if has_decimal && decimal_places > 0 {
                    num += decimal / 10f64.powi(decimal_places);
                }
                values.push(num);
            }
            '-' if is_unary_minus(&chars, i) => {
                // Unary minus becomes 0 - operand.
                values.push(0.0);
                ops.push('-');
                i += 1;
            }
            c @ ('+' | '-' | '*' | '/' | '%' | '^') => {
                while let Some(&top) = ops.last() {
                    if top == '('
                        || precedence(top) < precedence(c)
                        || (precedence(top) == precedence(c) && is_right_associative(c))
                    {
                        break;
                    }
                    ops.pop();
                    reduce(&mut values, top, &mut warnings)?;
                }
                ops.push(c);
                i += 1;
            }
            c => return Err(EvalError::InvalidCharacter(c)),
        }
    }

    while let Some(op) = ops.pop() {
        if op == '(' {
            return Err(EvalError::MismatchedParentheses);
        }
        reduce(&mut values, op, &mut warnings)?;
    }

    if !functions.is_empty() || values.len() != 1 {
        return Err(EvalError::InvalidExpression);
    }

    Ok(Evaluation {
        value: values[0],
        warnings,
    })
}

/// Integral results of reasonable magnitude print without a decimal
/// point; everything else gets six fractional digits.
pub fn format_result(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1_000_000.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.6}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn eval(expr: &str) -> f64 {
        evaluate(expr, None).unwrap().value
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn precedence_follows_standard_arithmetic() {
        assert_eq!(eval("2+3*4"), 14.0);
        assert_eq!(eval("(2+3)*4"), 20.0);
        assert_eq!(eval("10-4/2"), 8.0);
    }

    #[test]
    fn exponent_is_right_associative() {
        assert_eq!(eval("2^3^2"), 512.0);
        assert_eq!(eval("(2^3)^2"), 64.0);
    }

    #[test]
    fn unary_minus_composes() {
        assert_eq!(eval("-3+5"), 2.0);
        assert_eq!(eval("3*-2"), -6.0);
        assert_eq!(eval("-sqrt(4)"), -2.0);
        assert_eq!(eval("2^-1"), 0.5);
        assert_eq!(eval("(-3)*(-3)"), 9.0);
    }

    #[test]
    fn division_by_zero_recovers_with_sentinel() {
        let result = evaluate("5/0", None).unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(result.warnings, vec![ArithmeticWarning::DivisionByZero]);
    }

    #[test]
    fn modulo_truncates_operands() {
        assert_eq!(eval("10%3"), 1.0);
        assert_eq!(eval("7.9%3.2"), 1.0);
    }

    #[test]
    fn modulo_by_zero_recovers_with_sentinel() {
        let result = evaluate("5%0", None).unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(result.warnings, vec![ArithmeticWarning::ModuloByZero]);
    }

    #[test]
    fn warned_evaluation_still_runs_to_completion() {
        let result = evaluate("1+5/0", None).unwrap();
        assert_eq!(result.value, 1.0);
        assert_eq!(result.warnings, vec![ArithmeticWarning::DivisionByZero]);
    }

    #[test]
    fn mismatched_parentheses_are_rejected() {
        assert_eq!(evaluate("(2+3", None), Err(EvalError::MismatchedParentheses));
        assert_eq!(evaluate("((1)", None), Err(EvalError::MismatchedParentheses));
    }

    #[test]
    fn malformed_expressions_are_rejected() {
        assert_eq!(evaluate("(2)(3)", None), Err(EvalError::InvalidExpression));
        assert_eq!(evaluate("*3", None), Err(EvalError::InvalidExpression));
        assert_eq!(evaluate("2+", None), Err(EvalError::InvalidExpression));
        assert_eq!(evaluate("sqrt4", None), Err(EvalError::InvalidExpression));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(evaluate("", None), Err(EvalError::EmptyExpression));
        assert_eq!(evaluate("   ", None), Err(EvalError::EmptyExpression));
    }

    #[test]
    fn unknown_characters_are_named() {
        assert_eq!(evaluate("2&3", None), Err(EvalError::InvalidCharacter('&')));
    }

    #[test]
    fn double_decimal_point_is_rejected() {
        assert_eq!(evaluate("1.2.3", None), Err(EvalError::MalformedNumber));
    }

    #[test]
    fn decimal_literals_parse() {
        assert_eq!(eval("3.25+1"), 4.25);
        assert_eq!(eval(".5*2"), 1.0);
    }

    #[test]
    fn functions_apply_to_their_group() {
        assert_eq!(eval("sin(0)"), 0.0);
        assert_close(eval("log(100)"), 2.0);
        assert_eq!(eval("sqrt(9)"), 3.0);
        assert_eq!(eval("abs(-5)"), 5.0);
        assert_eq!(eval("floor(2.7)"), 2.0);
        assert_eq!(eval("ceil(2.1)"), 3.0);
        assert_eq!(eval("round(2.5)"), 3.0);
        assert_eq!(eval("exp(0)"), 1.0);
        assert_close(eval("2*sqrt(16)+1"), 9.0);
    }

    #[test]
    fn function_names_match_longest_first() {
        // sinh must not be scanned as sin followed by a stray h
        assert_eq!(eval("sinh(0)"), 0.0);
        assert_eq!(eval("cosh(0)"), 1.0);
        assert_eq!(eval("tanh(0)"), 0.0);
    }

    #[test]
    fn function_names_match_case_insensitively() {
        assert_eq!(eval("SQRT(4)"), 2.0);
        assert_eq!(eval("Sin(0)"), 0.0);
    }

    #[test]
    fn nested_function_calls() {
        assert_close(eval("sqrt(sqrt(16))"), 2.0);
    }

    #[test]
    fn constants_substitute_to_their_stored_literals() {
        assert_close(eval("2*pi"), 6.2831853072);
        assert_close(eval("e"), 2.7182818285);
        assert_close(eval("ln(e)"), 1.0);
    }

    #[test]
    fn constant_substitution_leaves_identifiers_alone() {
        // exp and ceil both contain the letter e
        assert_close(eval("exp(1)"), 2.7182818285);
        assert_eq!(eval("ceil(0.5)"), 1.0);
    }

    #[test]
    fn variable_binding_substitutes_standalone_x_only() {
        let binding = Binding { name: 'x', value: 3.0 };
        assert_eq!(evaluate("x^2", Some(binding)).unwrap().value, 9.0);
        // x inside exp must survive the substitution
        let at_zero = Binding { name: 'x', value: 0.0 };
        assert_eq!(evaluate("exp(x)", Some(at_zero)).unwrap().value, 1.0);
    }

    #[test]
    fn negative_binding_is_parenthesized() {
        let binding = Binding { name: 'x', value: -2.0 };
        assert_eq!(evaluate("x^2", Some(binding)).unwrap().value, 4.0);
    }

    #[test]
    fn non_finite_results_are_values_not_errors() {
        let nan = evaluate("(0-1)^0.5", None).unwrap();
        assert!(nan.value.is_nan());
        assert!(nan.warnings.is_empty());

        let inf = evaluate("10^10000", None).unwrap();
        assert!(inf.value.is_infinite());
    }

    #[test]
    fn spaces_are_stripped_before_scanning() {
        assert_eq!(eval(" 2 + 3 * 4 "), 14.0);
    }

    #[test]
    fn normalize_substitutes_in_order() {
        assert_eq!(normalize("2*pi", None), "2*3.1415926536");
        let binding = Binding { name: 'x', value: 1.5 };
        assert_eq!(normalize("x+1", Some(binding)), "(1.500000)+1");
    }

    #[test]
    fn format_integral_results_without_decimal_point() {
        assert_eq!(format_result(2.0), "2");
        assert_eq!(format_result(-3.0), "-3");
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(evaluate("4/2", None).unwrap().value), "2");
    }

    #[test]
    fn format_fractional_and_large_results_with_six_digits() {
        assert_eq!(format_result(0.5), "0.500000");
        assert_eq!(format_result(1000000.0), "1000000.000000");
        assert_eq!(format_result(-2.25), "-2.250000");
    }
}
