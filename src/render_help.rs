use crate::tui_mode::app::App;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_help(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" PlotCalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        ))
    };

    let help_text = vec![
        Line::from(Span::styled(
            "PlotCalc - Terminal Calculator and Function Grapher",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Operators:"),
        Line::from("  + : Addition        (e.g., 5 + 3 = 8)"),
        Line::from("  - : Subtraction     (e.g., 10 - 4 = 6)"),
        Line::from("  * : Multiplication  (e.g., 6 * 7 = 42)"),
        Line::from("  / : Division        (e.g., 15 / 3 = 5)"),
        Line::from("  % : Modulo          (e.g., 10 % 3 = 1)"),
        Line::from("  ^ : Exponentiation  (e.g., 2 ^ 3 = 8, right-associative)"),
        Line::from(""),
        section("Functions:"),
        Line::from("  sqrt(x)  : Square root"),
        Line::from("  sin(x)   : Sine (x in radians)"),
        Line::from("  cos(x)   : Cosine (x in radians)"),
        Line::from("  tan(x)   : Tangent (x in radians)"),
        Line::from("  asin(x)  : Arc sine"),
        Line::from("  acos(x)  : Arc cosine"),
        Line::from("  atan(x)  : Arc tangent"),
        Line::from("  sinh(x)  : Hyperbolic sine"),
        Line::from("  cosh(x)  : Hyperbolic cosine"),
        Line::from("  tanh(x)  : Hyperbolic tangent"),
        Line::from("  log(x)   : Base-10 logarithm"),
        Line::from("  ln(x)    : Natural logarithm"),
        Line::from("  exp(x)   : Exponential function"),
        Line::from("  abs(x)   : Absolute value"),
        Line::from("  ceil(x)  : Round up to nearest integer"),
        Line::from("  floor(x) : Round down to nearest integer"),
        Line::from("  round(x) : Round to nearest integer"),
        Line::from(""),
        section("Constants:"),
        Line::from("  pi : 3.1415926536"),
        Line::from("  e  : 2.7182818285"),
        Line::from(""),
        section("Graphing:"),
        Line::from("  graph <expr>          : Plot y = f(x) over [-10, 10]"),
        Line::from("  graph <expr> <colour> : Plot with a line colour"),
        Line::from("  Colours: red green blue black yellow cyan magenta orange purple"),
        Line::from("  Enter or Esc closes the graph view"),
        Line::from(""),
        section("Commands:"),
        Line::from("  clear : Clear calculation history"),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  help : Show this help screen"),
        Line::from("  quit : Exit the calculator"),
        Line::from(""),
        section("Navigation:"),
        Line::from("  Left/Right : Move cursor"),
        Line::from("  Ctrl+Left/Right : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  Up/Down : Navigate calculation history"),
        Line::from("  PgUp/PgDn : Page through history"),
        Line::from("  Mouse wheel : Scroll through history"),
        Line::from(""),
        section("Examples:"),
        Line::from("  2 + 3 * 4"),
        Line::from("  2^3^2"),
        Line::from("  -sqrt(4) + ln(e)"),
        Line::from("  graph sin(x) red"),
        Line::from("  graph 1/x"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
