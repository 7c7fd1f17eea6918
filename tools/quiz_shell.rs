/// Quiz Shell — interactive terminal front end for the quiz engine.
///
/// Usage: quiz_shell [--config <path.ron>] [--sessions <dir>] [--seed <n>]
///
/// Commands:
///   text <words...>   — set the source text
///   load <file>       — set the source text from a file
///   generate          — build a quiz from the current text
///   show              — print the active question
///   answer <n|text>   — answer by option number (1-4) or option text
///   reset             — clear text, quiz, and score
///   seed <n>          — rebuild the engine with a new seed
///   status            — print session phase, progress, and score
///   help              — list commands
///   quit              — exit

use std::io::{self, BufRead, Write};
use std::process;

use textbook_quiz::core::engine::QuizEngine;
use textbook_quiz::core::session::{QuizSession, SessionPhase};
use textbook_quiz::schema::session_id::SessionId;

const SHELL_SESSION: SessionId = SessionId(1);

struct ShellOptions {
    config_path: Option<String>,
    sessions_dir: Option<String>,
    seed: Option<u64>,
}

fn main() {
    pretty_env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut options = ShellOptions {
        config_path: None,
        sessions_dir: None,
        seed: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                options.config_path = Some(args[i].clone());
            }
            "--sessions" if i + 1 < args.len() => {
                i += 1;
                options.sessions_dir = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                options.seed = Some(args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --seed must be an unsigned integer");
                    process::exit(1);
                }));
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut engine = build_engine(&options).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    println!("Seed: {}", engine.seed());
    println!("Quiz size: {}", engine.config().quiz_size);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("quiz> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "text" => {
                if rest.is_empty() {
                    println!("Usage: text <words...>");
                    continue;
                }
                match engine.set_text(SHELL_SESSION, rest) {
                    Ok(()) => println!("Text set ({} chars).", rest.chars().count()),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "load" => {
                if rest.is_empty() {
                    println!("Usage: load <file>");
                    continue;
                }
                let text = match std::fs::read_to_string(rest) {
                    Ok(t) => t,
                    Err(e) => {
                        println!("Error reading '{}': {}", rest, e);
                        continue;
                    }
                };
                match engine.set_text(SHELL_SESSION, &text) {
                    Ok(()) => println!("Loaded '{}' ({} chars).", rest, text.chars().count()),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "generate" | "gen" => match engine.generate(SHELL_SESSION) {
                Ok(session) => match session.phase() {
                    SessionPhase::Active => {
                        println!("Generated {} questions.\n", session.questions().len());
                        print_question(&session);
                    }
                    SessionPhase::Empty => println!("Enter some text first."),
                    _ => println!("No keywords found; try a longer text."),
                },
                Err(e) => println!("ERROR: {}", e),
            },
            "show" => match engine.session(SHELL_SESSION) {
                Ok(session) => print_question(&session),
                Err(e) => println!("ERROR: {}", e),
            },
            "answer" | "a" => {
                if rest.is_empty() {
                    println!("Usage: answer <n|text>");
                    continue;
                }
                let session = match engine.session(SHELL_SESSION) {
                    Ok(s) => s,
                    Err(e) => {
                        println!("ERROR: {}", e);
                        continue;
                    }
                };
                let option = resolve_option(&session, rest);
                let expected = session
                    .current_question()
                    .map(|q| q.correct_answer.clone());

                match engine.submit_answer(SHELL_SESSION, &option) {
                    Ok(after) => {
                        if after.score() > session.score() {
                            println!("Correct!");
                        } else if let Some(expected) = expected {
                            println!("Incorrect. The answer was: {}", expected);
                        }
                        println!();
                        print_question(&after);
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "reset" => match engine.reset(SHELL_SESSION) {
                Ok(_) => println!("Session reset."),
                Err(e) => println!("ERROR: {}", e),
            },
            "seed" => {
                let seed: u64 = match rest.parse() {
                    Ok(s) => s,
                    Err(_) => {
                        println!("Usage: seed <n>");
                        continue;
                    }
                };
                options.seed = Some(seed);
                match build_engine(&options) {
                    Ok(rebuilt) => {
                        engine = rebuilt;
                        println!("Seed set to {}.", seed);
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "status" => match engine.session(SHELL_SESSION) {
                Ok(session) => print_status(&engine, &session),
                Err(e) => println!("ERROR: {}", e),
            },
            _ => {
                println!("Unknown command: '{}'. Type 'help' for commands.", cmd);
            }
        }
    }
}

fn build_engine(options: &ShellOptions) -> Result<QuizEngine, textbook_quiz::core::engine::EngineError> {
    let mut builder = QuizEngine::builder();
    if let Some(ref path) = options.config_path {
        builder = builder.config_path(path);
    }
    if let Some(ref dir) = options.sessions_dir {
        builder = builder.sessions_dir(dir);
    }
    if let Some(seed) = options.seed {
        builder = builder.seed(seed);
    }
    builder.build()
}

/// A bare number picks the option at that 1-based position; anything else
/// is submitted verbatim.
fn resolve_option(session: &QuizSession, input: &str) -> String {
    let options = session.current_question().map(|q| q.options.as_slice());
    match (input.parse::<usize>(), options) {
        (Ok(n), Some(options)) if (1..=options.len()).contains(&n) => options[n - 1].clone(),
        _ => input.to_string(),
    }
}

fn print_question(session: &QuizSession) {
    match (session.current_question(), session.progress()) {
        (Some(question), Some(progress)) => {
            println!("Question {} of {}", progress.number, progress.total);
            println!("{}", question.prompt);
            for (i, option) in question.options.iter().enumerate() {
                println!("  {}) {}", i + 1, option);
            }
        }
        _ if session.is_completed() => {
            println!("Quiz completed!");
            println!(
                "Your score: {} out of {}",
                session.score(),
                session.questions().len()
            );
        }
        _ => println!("No active quiz. Use 'generate' after setting text."),
    }
}

fn print_status(engine: &QuizEngine, session: &QuizSession) {
    println!("Phase: {}", session.phase().name());
    println!("Seed: {}", engine.seed());
    println!("Text: {} chars", session.source_text().chars().count());
    println!(
        "Progress: {}/{}",
        session.current_index(),
        session.questions().len()
    );
    println!("Score: {}", session.score());
}

fn print_usage() {
    eprintln!("Usage: quiz_shell [--config <path.ron>] [--sessions <dir>] [--seed <n>]");
    eprintln!();
    eprintln!("  --config    RON file overriding the default quiz settings");
    eprintln!("  --sessions  directory to persist the session between runs");
    eprintln!("  --seed      RNG seed (random if omitted)");
}

fn print_help() {
    println!("Commands:");
    println!("  text <words...>   — set the source text");
    println!("  load <file>       — set the source text from a file");
    println!("  generate          — build a quiz from the current text");
    println!("  show              — print the active question");
    println!("  answer <n|text>   — answer by option number or option text");
    println!("  reset             — clear text, quiz, and score");
    println!("  seed <n>          — rebuild the engine with a new seed");
    println!("  status            — print phase, progress, and score");
    println!("  help              — show this help");
    println!("  quit              — exit");
}
