use escape::config::{CliAction, Config};
use escape::display::{create_display, GameDisplay, HeadlessDisplay};
use escape::input::LineInput;
use escape::Interpreter;
use log::{debug, info};
use std::env;

fn print_usage(program: &str) {
    println!("escape - Escape the Complex, a small text adventure");
    println!();
    println!(
        "Usage: {} [ROOMS_FILE] [--config FILE] [--display auto|terminal|headless] [--seed N]",
        program
    );
    println!("Examples:");
    println!("  {} data/rooms.json", program);
    println!("  {} data/rooms.json --seed 7 --headless < walkthrough.txt", program);
    println!();
    println!("Settings are read from ./escape.toml when present; arguments override it.");
    println!("Set RUST_LOG=debug for tracing and DISPLAY_LOG=1 to log display operations.");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "escape".to_string());

    let config = match Config::from_args(args) {
        Ok(CliAction::Play(config)) => config,
        Ok(CliAction::Help) => {
            print_usage(&program);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run '{} --help' for usage.", program);
            std::process::exit(2);
        }
    };

    let mut display: Box<dyn GameDisplay> = match create_display(config.display) {
        Ok(display) => display,
        Err(e) => {
            debug!("Falling back to headless display: {}", e);
            Box::new(HeadlessDisplay::echoing())
        }
    };

    display.print_line("Loading Escape the Complex...")?;

    // A failed load is reported once and ends the program; there is no retry
    let mut interpreter = match Interpreter::load(&config, display.as_mut()) {
        Ok(interpreter) => interpreter,
        Err(_) => std::process::exit(1),
    };

    interpreter.start(display.as_mut())?;

    let mut input = LineInput::stdin();
    while !interpreter.is_finished() {
        match input.read_line()? {
            Some(line) => interpreter.execute(&line, display.as_mut())?,
            None => {
                debug!("End of input");
                break;
            }
        }
    }

    info!(
        "Session over in '{}' ({} items carried)",
        interpreter.location(),
        interpreter.session.inventory.len()
    );
    Ok(())
}
