/// Keyword Report — shows what the quiz engine would ask about a text.
///
/// Usage: keyword_report --input <file.txt> [--config <path.ron>]
use std::env;
use std::path::Path;
use std::process;

use textbook_quiz::core::config::QuizConfig;
use textbook_quiz::core::context::{find_context, find_related_terms};
use textbook_quiz::core::extract::KeywordExtractor;

const USAGE: &str = "Usage: keyword_report --input <file.txt> [--config <path.ron>]";

fn main() {
    pretty_env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input = None;
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" if i + 1 < args.len() => {
                i += 1;
                input = Some(args[i].clone());
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input.unwrap_or_else(|| {
        eprintln!("Error: --input is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    });

    let config = match config_path {
        Some(ref path) => QuizConfig::load_from_ron(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => QuizConfig::default(),
    };

    let text = std::fs::read_to_string(&input_path).unwrap_or_else(|e| {
        eprintln!("Error reading input file '{}': {}", input_path, e);
        process::exit(1);
    });

    let extractor = KeywordExtractor::new(&config);
    let keywords = extractor.extract(&text);

    println!(
        "{} keywords from '{}' (cap {}, min length {})",
        keywords.len(),
        input_path,
        config.max_keywords,
        config.min_keyword_len + 1
    );

    for (n, keyword) in keywords.iter().enumerate() {
        let sentence = find_context(keyword.as_str(), &text);
        let related =
            find_related_terms(&extractor, keyword.as_str(), &text, config.max_related_terms);

        println!();
        println!("{:>2}. {}", n + 1, keyword);
        if sentence.is_empty() {
            println!("    context: (none)");
        } else {
            println!("    context: {}", sentence);
        }
        if related.is_empty() {
            println!("    related: (none)");
        } else {
            println!("    related: {}", related.join(", "));
        }
    }
}
