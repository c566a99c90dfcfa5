mod eval_engine;
mod grapher;

#[cfg(all(feature = "line", not(feature = "tui")))]
mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

#[cfg(feature = "tui")]
fn main() -> anyhow::Result<()> {
    tui_mode::run_tui()
}

#[cfg(all(feature = "line", not(feature = "tui")))]
fn main() -> anyhow::Result<()> {
    line_mode::run_line()
}

// Without a front-end feature the binary still works as a one-shot
// evaluator: plotcalc "2+3*4"
#[cfg(not(any(feature = "tui", feature = "line")))]
fn main() {
    let expr: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    match eval_engine::evaluate(&expr, None) {
        Ok(result) => {
            for warning in &result.warnings {
                eprintln!("Warning: {}", warning);
            }
            println!("{}", eval_engine::format_result(result.value));
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}
