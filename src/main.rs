use anyhow::{Context, Result};
use cats::{
    Autocorrector, Config, DiffFunction, Distance, Metric, about, accuracy, choose, text, wpm,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{Level, info};

// Coarse clocks can report zero for a line read from a pipe.
const MIN_ELAPSED_SECS: f64 = 1e-3;

#[derive(Parser)]
#[command(name = "cats")]
#[command(about = "Typing test with a limit-bounded autocorrect", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Word list, one word per line
    #[arg(long, global = true)]
    words: Option<PathBuf>,

    /// Paragraphs for the typing test, one per line
    #[arg(long, global = true)]
    paragraphs: Option<PathBuf>,

    /// Largest distance accepted as a correction
    #[arg(long, global = true, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// Distance metric
    #[arg(long, global = true, value_enum)]
    metric: Option<MetricChoice>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure typing speed and accuracy, optionally on paragraphs about TOPICS
    Type { topics: Vec<String> },

    /// Autocorrect each word against the word list
    Correct {
        #[arg(required = true)]
        typed: Vec<String>,
    },

    /// Print the distance between two words
    Distance { start: String, goal: String },

    /// Autocorrect lines typed at a prompt
    Repl,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MetricChoice {
    /// Differing positions plus the length difference
    Substitution,
    /// Insert, remove and substitute
    Edit,
}

impl From<MetricChoice> for Metric {
    fn from(choice: MetricChoice) -> Self {
        match choice {
            MetricChoice::Substitution => Metric::Substitution,
            MetricChoice::Edit => Metric::Edit,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(words) = &cli.words {
        config.words_path = words.clone();
    }
    if let Some(paragraphs) = &cli.paragraphs {
        config.paragraphs_path = paragraphs.clone();
    }
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if let Some(metric) = cli.metric {
        config.metric = metric.into();
    }
    Ok(config)
}

fn load_corrector(config: &Config, limit: Distance) -> Result<Autocorrector> {
    Autocorrector::from_word_list_file(&config.words_path, config.metric, limit)
        .context("Failed to load word list")
}

fn read_line<'a, R: BufRead>(input: &mut R, buf: &'a mut String) -> io::Result<Option<&'a str>> {
    buf.clear();
    if input.read_line(buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n'])))
}

fn run_typing_test<R: BufRead, W: Write>(
    paragraphs: &[String],
    topics: &[String],
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let select: Box<dyn Fn(&str) -> bool> = if topics.is_empty() {
        Box::new(|_: &str| true)
    } else {
        Box::new(about(topics)?)
    };

    let mut line = String::new();
    let mut k = 0;
    loop {
        let Some(reference) = choose(paragraphs, &select, k) else {
            writeln!(out, "No more paragraphs about {:?} are available.", topics)?;
            return Ok(());
        };
        writeln!(out, "Type the following paragraph and then press enter/return.")?;
        writeln!(out, "If you only type part of it, you will be scored only on that part.\n")?;
        writeln!(out, "{}\n", reference)?;
        out.flush()?;

        let start = Instant::now();
        let typed = match read_line(input, &mut line)? {
            Some(typed) if !typed.is_empty() => typed,
            _ => {
                writeln!(out, "Goodbye.")?;
                return Ok(());
            }
        };
        let elapsed = start.elapsed().as_secs_f64().max(MIN_ELAPSED_SECS);

        writeln!(out, "\nNice work!")?;
        writeln!(out, "Words per minute: {:.2}", wpm(typed, elapsed)?)?;
        writeln!(out, "Accuracy:         {:.2}", accuracy(typed, reference))?;
        writeln!(out, "\nPress enter/return for the next paragraph or type q to quit.")?;
        out.flush()?;

        match read_line(input, &mut line)? {
            Some(answer) if answer.trim() != "q" => k += 1,
            _ => return Ok(()),
        }
    }
}

fn run_repl<R: BufRead, W: Write>(
    corrector: &Autocorrector,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(
        out,
        "Autocorrect REPL - {} words, {:?} metric, limit {}\n:type text, :q to quit",
        corrector.vocabulary().len(),
        corrector.metric(),
        corrector.limit()
    )?;
    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(typed) = read_line(input, &mut line)? else {
            break; // EOF
        };
        if typed.trim() == ":q" {
            break;
        }

        for token in typed.split_whitespace() {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric());
            if word.is_empty() {
                continue;
            }
            let corrected = corrector.correct(word);
            if corrected != word {
                writeln!(out, "  {}  ->  {}", word, corrected)?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let limit = config.limit()?;
    info!("Using {:?} metric with limit {}", config.metric, limit);

    match cli.command {
        Commands::Type { topics } => {
            let paragraphs = text::lines_from_file(&config.paragraphs_path)
                .context("Failed to load paragraphs")?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_typing_test(&paragraphs, &topics, &mut stdin.lock(), &mut stdout.lock())?;
        }
        Commands::Correct { typed } => {
            let corrector = load_corrector(&config, limit)?;
            let corrected = corrector.correct_words(&typed);
            for (typed, corrected) in typed.iter().zip(&corrected) {
                println!("{} -> {}", typed, corrected);
            }
        }
        Commands::Distance { start, goal } => {
            println!("{}", config.metric.diff(&start, &goal, limit));
        }
        Commands::Repl => {
            let corrector = load_corrector(&config, limit)?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_repl(&corrector, &mut stdin.lock(), &mut stdout.lock())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_test(paragraphs: &[&str], topics: &[&str], typed: &str) -> String {
        let paragraphs: Vec<String> = paragraphs.iter().map(|s| s.to_string()).collect();
        let topics: Vec<String> = topics.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        run_typing_test(&paragraphs, &topics, &mut Cursor::new(typed), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_typing_test_scores_and_quits() {
        let out = run_test(&["Cute Dog.", "Nice pup."], &[], "Cute Dog.\nq\n");
        assert!(out.contains("Cute Dog."));
        assert!(out.contains("Accuracy:         100.00"));
        assert!(!out.contains("Nice pup."));
    }

    #[test]
    fn test_typing_test_runs_out_of_paragraphs() {
        let out = run_test(
            &["Cute Dog!", "That is a cat.", "Nice pup."],
            &["dog", "pup"],
            "Cute\n\nNice cat.\n\n",
        );
        assert!(out.contains("Accuracy:         50.00"));
        assert!(!out.contains("That is a cat."));
        assert!(out.contains("No more paragraphs about"));
    }

    #[test]
    fn test_typing_test_blank_line_says_goodbye() {
        let out = run_test(&["Cute Dog."], &[], "\n");
        assert!(out.contains("Goodbye."));
        assert!(!out.contains("Nice work!"));
    }

    #[test]
    fn test_typing_test_rejects_uppercase_topic() {
        let paragraphs = vec!["Cute Dog.".to_string()];
        let topics = vec!["Dog".to_string()];
        let mut out = Vec::new();
        let result = run_typing_test(&paragraphs, &topics, &mut Cursor::new(""), &mut out);
        assert!(result.is_err());
    }

    #[test]
    fn test_repl_prints_corrections() {
        let vocabulary = ["hello", "world"].iter().map(|s| s.to_string()).collect();
        let corrector = Autocorrector::new(vocabulary, Metric::Edit, 2);
        let mut out = Vec::new();
        run_repl(&corrector, &mut Cursor::new("hwllo, world!\n:q\nwrld\n"), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("2 words, Edit metric, limit 2"));
        assert!(out.contains("  hwllo  ->  hello"));
        assert!(!out.contains("world  ->"));
        // input after :q is never read
        assert!(!out.contains("wrld"));
    }
}
