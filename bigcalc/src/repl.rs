//! REPL (Read-Eval-Print Loop) implementation for bigcalc
//!
//! This module drives the interpreter one line at a time. Features:
//! - Interactive evaluation with variables persisting across lines
//! - Slash commands (`/help`, `/exit`)
//! - Error recovery: a failing line prints its message and the loop continues
//! - History support and line editing with rustyline
//! - A non-interactive mode that feeds a whole script through the same session

use bigcalc_interpreter::{BigInt, CalcError, Interpreter, Outcome};
use miette::Diagnostic;
use rustyline::{DefaultEditor, error::ReadlineError};
use std::io::{self, Write};
use thiserror::Error;

const HELP_MESSAGE: &str = r#"bigcalc evaluates integer expressions of any size.

Operators: "+", "-", "*", "/", "(" and ")"
  2 + 2 * 3            # precedence: * and / before + and -
  (2 + 2) * 3          # parentheses group
  7 / 2                # division truncates toward zero
  5 --- 2              # runs of signs fold: odd minus count subtracts

Variables (Latin letters only, case-sensitive):
  a = 12345678901234567890
  a * a

Commands:
  /help                Show this help message
  /exit                Exit bigcalc"#;

/// Errors that can occur in the REPL
#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Calc(#[from] CalcError),

    #[error("Unknown command")]
    #[diagnostic(
        code(bigcalc::repl::unknown_command),
        help("'{command}' is not a command. Type /help for available commands")
    )]
    UnknownCommand { command: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("Readline error: {source}")]
    Readline {
        #[from]
        source: ReadlineError,
    },
}

/// REPL configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Prompt string for input
    pub prompt: String,

    /// Print the full diagnostic for each error to stderr
    pub verbose_errors: bool,

    /// Enable history persistence
    pub persist_history: bool,

    /// History file path
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            verbose_errors: false,
            persist_history: true,
            history_file: Some(".bigcalc_history".to_string()),
        }
    }
}

/// Result of evaluating a line in the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplResult {
    /// Successfully evaluated expression
    Value { value: BigInt },

    /// Variable binding, which prints nothing
    Assignment,

    /// Executed a REPL command
    Command { message: String },

    /// Empty line
    Empty,

    /// Exit request
    Exit,
}

/// REPL session that maintains state across evaluations
#[derive(Debug, Default)]
pub struct ReplSession {
    interpreter: Interpreter,
    config: ReplConfig,
}

impl ReplSession {
    /// Create a new REPL session with custom configuration
    pub fn with_config(config: ReplConfig) -> Self {
        Self {
            interpreter: Interpreter::new(),
            config,
        }
    }

    /// Start the interactive loop
    pub fn run(&mut self) -> Result<(), ReplError> {
        let mut editor = DefaultEditor::new()?;
        self.load_history(&mut editor);

        loop {
            match editor.readline(&self.config.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line.as_str())?;
                    }
                    if !self.process_line(&line, &mut io::stdout())? {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(ReplError::Readline { source: err }),
            }
        }

        self.print_goodbye(&mut io::stdout())?;
        self.save_history(&mut editor)?;
        Ok(())
    }

    /// Feed every line of `source` through the session, without prompt or
    /// history. Returns `false` if the script asked to exit.
    pub fn run_script(&mut self, source: &str, out: &mut impl Write) -> Result<bool, ReplError> {
        for line in source.lines() {
            if !self.process_line(line, out)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Evaluate a line and write what it produced.
    /// Returns `false` once the session should end.
    pub fn process_line(&mut self, line: &str, out: &mut impl Write) -> Result<bool, ReplError> {
        match self.evaluate_line(line) {
            Ok(ReplResult::Exit) => return Ok(false),
            Ok(result) => self.display_result(result, out)?,
            Err(error) => self.display_error(error, line, out)?,
        }
        Ok(true)
    }

    /// Evaluate a line of input
    pub fn evaluate_line(&mut self, line: &str) -> Result<ReplResult, ReplError> {
        let trimmed = line.trim();

        if trimmed.starts_with('/') {
            return self.execute_command(trimmed);
        }

        let result = match self.interpreter.execute(trimmed)? {
            Outcome::Empty => ReplResult::Empty,
            Outcome::Value(value) => ReplResult::Value { value },
            Outcome::Assigned { .. } => ReplResult::Assignment,
        };
        Ok(result)
    }

    /// Execute a REPL command
    fn execute_command(&self, command: &str) -> Result<ReplResult, ReplError> {
        match command {
            "/help" => Ok(ReplResult::Command {
                message: HELP_MESSAGE.to_string(),
            }),
            "/exit" => Ok(ReplResult::Exit),
            unknown => Err(ReplError::UnknownCommand {
                command: unknown.to_string(),
            }),
        }
    }

    /// Display the result of evaluation
    fn display_result(&self, result: ReplResult, out: &mut impl Write) -> io::Result<()> {
        match result {
            ReplResult::Value { value } => writeln!(out, "{value}"),
            ReplResult::Command { message } => writeln!(out, "{message}"),
            ReplResult::Assignment | ReplResult::Empty | ReplResult::Exit => Ok(()),
        }
    }

    /// Display an error: the short message goes to the regular output so the
    /// session transcript stays readable, the full report to stderr on demand.
    fn display_error(&self, error: ReplError, line: &str, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{error}")?;

        if self.config.verbose_errors {
            let report = miette::Report::new(error).with_source_code(line.trim().to_string());
            eprintln!("{report:?}");
        }
        Ok(())
    }

    pub fn print_goodbye(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Bye!")
    }

    fn load_history(&self, editor: &mut DefaultEditor) {
        if self.config.persist_history {
            if let Some(ref history_file) = self.config.history_file {
                // A missing file just means this is the first session.
                if let Err(error) = editor.load_history(history_file) {
                    tracing::debug!(%error, history_file = %history_file, "no history loaded");
                }
            }
        }
    }

    fn save_history(&self, editor: &mut DefaultEditor) -> Result<(), ReplError> {
        if self.config.persist_history {
            if let Some(ref history_file) = self.config.history_file {
                editor.save_history(history_file)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_repl() -> ReplSession {
        let config = ReplConfig {
            persist_history: false, // Don't save history in tests
            history_file: None,
            ..Default::default()
        };
        ReplSession::with_config(config)
    }

    fn transcript(repl: &mut ReplSession, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            if !repl.process_line(line, &mut out).unwrap() {
                break;
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_simple_expression_evaluation() {
        let mut repl = create_test_repl();

        let result = repl.evaluate_line("2 + 2").unwrap();
        assert_eq!(
            result,
            ReplResult::Value {
                value: BigInt::from(4)
            }
        );
    }

    #[test]
    fn test_empty_line_handling() {
        let mut repl = create_test_repl();

        let result = repl.evaluate_line("").unwrap();
        assert!(matches!(result, ReplResult::Empty));

        let result = repl.evaluate_line("   ").unwrap();
        assert!(matches!(result, ReplResult::Empty));
    }

    #[test]
    fn test_help_command() {
        let mut repl = create_test_repl();

        let result = repl.evaluate_line("/help").unwrap();
        if let ReplResult::Command { message } = result {
            assert!(message.contains("\"+\", \"-\", \"*\", \"/\", \"(\" and \")\""));
            assert!(message.contains("/exit"));
        } else {
            panic!("Expected command result");
        }
    }

    #[test]
    fn test_exit_command() {
        let mut repl = create_test_repl();

        let result = repl.evaluate_line("/exit").unwrap();
        assert!(matches!(result, ReplResult::Exit));

        let result = repl.evaluate_line("  /exit  ").unwrap();
        assert!(matches!(result, ReplResult::Exit));
    }

    #[test]
    fn test_unknown_command() {
        let mut repl = create_test_repl();

        for command in ["/unknown", "/quit", "/help me", "/"] {
            let result = repl.evaluate_line(command);
            if let Err(error @ ReplError::UnknownCommand { .. }) = result {
                assert_eq!(error.to_string(), "Unknown command");
            } else {
                panic!("Expected unknown command error for {command}");
            }
        }
    }

    #[test]
    fn test_assignment_is_silent() {
        let mut repl = create_test_repl();

        let output = transcript(&mut repl, &["a = 5", "a + a"]);
        assert_eq!(output, "10\n");
    }

    #[test]
    fn test_errors_print_message_and_continue() {
        let mut repl = create_test_repl();

        let output = transcript(
            &mut repl,
            &["a**b", "b", "a1", "2 + c3", "/go", "5/0", "n = 9", "n"],
        );
        assert_eq!(
            output,
            "Invalid expression\nUnknown variable\nInvalid identifier\nInvalid assignment\n\
             Unknown command\nDivision by zero\n9\n"
        );
    }

    #[test]
    fn test_exit_stops_the_script() {
        let mut repl = create_test_repl();
        let mut out = Vec::new();

        let keep_going = repl
            .run_script("1 + 1\n\n/exit\n3 + 3\n", &mut out)
            .unwrap();
        assert!(!keep_going);
        assert_eq!(String::from_utf8(out).unwrap(), "2\n");
    }

    #[test]
    fn test_script_without_exit_continues() {
        let mut repl = create_test_repl();
        let mut out = Vec::new();

        let keep_going = repl.run_script("x = 3\nx * x\n", &mut out).unwrap();
        assert!(keep_going);
        assert_eq!(String::from_utf8(out).unwrap(), "9\n");
    }

    #[test]
    fn test_goodbye_message() {
        let repl = create_test_repl();
        let mut out = Vec::new();

        repl.print_goodbye(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Bye!\n");
    }

    #[test]
    fn test_repl_config_defaults() {
        let config = ReplConfig::default();
        assert_eq!(config.prompt, "> ");
        assert!(!config.verbose_errors);
        assert!(config.persist_history);
        assert_eq!(config.history_file, Some(".bigcalc_history".to_string()));
    }
}
