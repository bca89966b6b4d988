//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::parse_amount;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::{Edit, Session};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use wealthscope_dataset::Preset;
use wealthscope_domain::DisplayMode;

/// Run the interactive REPL.
///
/// History is kept in memory for the lifetime of the session only.
pub fn run_repl(session: &mut Session, formatter: &Formatter, history_size: usize) -> Result<()> {
    println!("{}", formatter.info("Wealthscope REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    print_state(session, formatter)?;

    loop {
        match editor.readline("wealthscope> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Show) => {
                        print_state(session, formatter)?;
                    }
                    Ok(ReplCommand::Edit(edit)) => match session.apply(edit) {
                        Ok(()) => print_state(session, formatter)?,
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    Ok(())
}

/// REPL command type.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Show,
    Edit(Edit),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "show" | "ls" => Ok(ReplCommand::Show),
        "add" => parse_add_command(&parts[1..]),
        "edit" => parse_edit_command(&parts[1..]),
        "delete" | "del" | "rm" => parse_delete_command(&parts[1..]),
        "clear" => Ok(ReplCommand::Edit(Edit::Clear)),
        "preset" => parse_preset_command(&parts[1..]),
        "mode" => parse_mode_command(&parts[1..]),
        "toggle" => Ok(ReplCommand::Edit(Edit::ToggleMode)),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

fn parse_add_command(args: &[&str]) -> Result<ReplCommand> {
    match args {
        [value] => Ok(ReplCommand::Edit(Edit::Add(parse_value(value)?))),
        _ => Err(CliError::InvalidInput("Usage: add <value>".to_string())),
    }
}

fn parse_edit_command(args: &[&str]) -> Result<ReplCommand> {
    match args {
        [old, new] => Ok(ReplCommand::Edit(Edit::Replace {
            old: parse_value(old)?,
            new: parse_value(new)?,
        })),
        _ => Err(CliError::InvalidInput("Usage: edit <old> <new>".to_string())),
    }
}

fn parse_delete_command(args: &[&str]) -> Result<ReplCommand> {
    match args {
        [value] => Ok(ReplCommand::Edit(Edit::Delete(parse_value(value)?))),
        _ => Err(CliError::InvalidInput("Usage: delete <value>".to_string())),
    }
}

fn parse_preset_command(args: &[&str]) -> Result<ReplCommand> {
    match args {
        [name] => {
            let preset = Preset::parse(name).ok_or_else(|| {
                CliError::InvalidInput(format!("Unknown preset: {}. Expected reference or percentiles.", name))
            })?;
            Ok(ReplCommand::Edit(Edit::Preset(preset)))
        }
        _ => Err(CliError::InvalidInput("Usage: preset <reference|percentiles>".to_string())),
    }
}

fn parse_mode_command(args: &[&str]) -> Result<ReplCommand> {
    match args {
        [] => Ok(ReplCommand::Edit(Edit::ToggleMode)),
        [name] => {
            let mode = DisplayMode::parse(name).ok_or_else(|| {
                CliError::InvalidInput(format!("Unknown mode: {}. Expected percentage or absolute.", name))
            })?;
            Ok(ReplCommand::Edit(Edit::Mode(mode)))
        }
        _ => Err(CliError::InvalidInput("Usage: mode [percentage|absolute]".to_string())),
    }
}

fn parse_value(s: &str) -> Result<f64> {
    parse_amount(s).map_err(CliError::InvalidInput)
}

fn print_state(session: &Session, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_thresholds(session.thresholds()));
    println!("{}", formatter.format_breakdown(&session.breakdown(), session.mode())?);
    println!();
    Ok(())
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  add <value>                    - Add a threshold (e.g. 10000, 10k, 1.5m)");
    println!("  edit <old> <new>               - Replace a threshold");
    println!("  delete <value>                 - Remove a threshold");
    println!("  clear                          - Remove all thresholds");
    println!("  preset <reference|percentiles> - Load a threshold preset");
    println!("  mode [percentage|absolute]     - Set or toggle the display mode");
    println!("  toggle                         - Toggle the display mode");
    println!("  show                           - Print the current breakdown");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
