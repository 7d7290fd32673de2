//! Interactive pinyin-to-hanzi drill
//!
//! Usage:
//!   pinyin-drill exercise.md
//!   pinyin-drill exercise.md --policy full-match --hints
//!   pinyin-drill exercise.md --json

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pinyin_drill::{strip_tones, Drill, MatchPolicy, PinyinConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Incremental,
    FullMatch,
}

impl From<PolicyArg> for MatchPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Incremental => MatchPolicy::Incremental,
            PolicyArg::FullMatch => MatchPolicy::FullMatch,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pinyin-drill")]
#[command(about = "Type numbered pinyin to fill the blanks of an exercise")]
struct Args {
    /// Exercise markdown file
    file: PathBuf,

    /// Matching policy (defaults to the configured one)
    #[arg(short, long, value_enum)]
    policy: Option<PolicyArg>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the parsed exercise as JSON and exit
    #[arg(long)]
    json: bool,

    /// Show the toneless expected syllables for each blank
    #[arg(long)]
    hints: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pinyin_drill=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PinyinConfig::load_toml(path)?,
        None => PinyinConfig::default(),
    };
    let policy = args
        .policy
        .map(MatchPolicy::from)
        .unwrap_or(config.default_policy);

    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read exercise {}", args.file.display()))?;

    let mut drill = Drill::new(config);
    drill.load(&source);

    if args.json {
        let json = serde_json::json!({
            "document": drill.document(),
            "has_mismatch": drill.has_mismatch(),
            "diagnostics": drill.diagnostics(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    run_interactive(&mut drill, policy, args.hints)
}

fn run_interactive(drill: &mut Drill, policy: MatchPolicy, hints: bool) -> anyhow::Result<()> {
    let doc = drill.document().clone();
    if !doc.title.is_empty() {
        println!("═══ {} ═══", doc.title);
    }
    if !doc.description.is_empty() {
        println!("{}\n", doc.description);
    }
    if !doc.instructions.is_empty() {
        println!("{}\n", doc.instructions);
    }
    if drill.has_mismatch() {
        println!(
            "⚠ The sentence has {} placeholder(s) but {} blank(s) were parsed.\n",
            doc.placeholder_count(),
            doc.blanks.len()
        );
    }
    if doc.blanks.is_empty() {
        println!("No blanks to fill.");
        return Ok(());
    }

    println!("Policy: {}. Commands: :n next, :p previous, :q quit.", policy);

    let mut current = 0usize;
    print_prompt(drill, policy, current, hints)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        match line.trim() {
            ":q" => break,
            ":n" => current = (current + 1).min(doc.blanks.len() - 1),
            ":p" => current = current.saturating_sub(1),
            _ => {
                if let Some(state) = drill.input(policy, current, &line) {
                    println!(
                        "  → {} {}",
                        state.display(),
                        if state.matched() { "✓" } else { "" }
                    );
                    if state.matched() && current + 1 < doc.blanks.len() {
                        current += 1;
                    }
                }
            }
        }

        println!("  {}", drill.render_sentence(policy));
        if drill.is_complete(policy) {
            println!("All blanks filled.");
            break;
        }
        print_prompt(drill, policy, current, hints)?;
    }

    Ok(())
}

fn print_prompt(drill: &Drill, policy: MatchPolicy, index: usize, hints: bool) -> io::Result<()> {
    let doc = drill.document();
    let Some(blank) = doc.blanks.get(index) else {
        return Ok(());
    };
    let status = match drill.state(policy, index) {
        Some(state) if state.matched() => " (done)",
        _ => "",
    };
    if hints {
        let toneless: Vec<String> = blank
            .expected_syllables
            .iter()
            .map(|s| strip_tones(s))
            .collect();
        print!("[{}{}] hint: {} > ", blank.id, status, toneless.join(" "));
    } else {
        print!("[{}{}] > ", blank.id, status);
    }
    io::stdout().flush()
}
