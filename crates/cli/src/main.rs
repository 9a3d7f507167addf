// ABOUTME: CLI binary for the wordglass word analyzer.
// ABOUTME: Fetches a URL or reads an HTML file and prints palindrome and anagram findings.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use wordglass_analysis::{Client, WordReport};

#[derive(Parser, Debug)]
#[command(name = "wordglass")]
#[command(about = "Find palindromes and anagrams in the text of a webpage")]
struct Args {
    /// URL of the page to analyze
    #[arg(value_name = "URL")]
    target: Option<String>,

    /// HTML file to analyze instead of fetching (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// URL context for HTML file analysis (required with --html)
    #[arg(long = "url")]
    context_url: Option<String>,

    /// Output as JSON instead of the two text sections
    #[arg(long = "json")]
    json_output: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// Allow fetching from private/local networks
    #[arg(long = "allow-private-networks")]
    allow_private_networks: bool,
}

/// Format output based on whether JSON output is requested.
fn format_output(report: &WordReport, json_output: bool) -> String {
    if json_output {
        serde_json::to_string_pretty(report).unwrap()
    } else {
        report.format_text()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Validate args
    if args.html.is_some() && args.context_url.is_none() {
        eprintln!("error: --url is required when using --html");
        return ExitCode::from(1);
    }

    if args.html.is_none() && args.target.is_none() {
        eprintln!("error: a URL is required, or use --html with --url");
        return ExitCode::from(1);
    }

    if args.html.is_some() && args.target.is_some() {
        eprintln!("error: cannot use both --html and a positional URL");
        return ExitCode::from(1);
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .allow_private_networks(args.allow_private_networks)
        .build();

    let report = if let Some(html_path) = &args.html {
        // HTML file mode
        let url = args.context_url.as_ref().unwrap();
        match fs::read_to_string(html_path) {
            Ok(html_content) => match client.analyze_html(&html_content, url).await {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("error analyzing HTML: {}", e);
                    return ExitCode::from(1);
                }
            },
            Err(e) => {
                eprintln!("error reading file {:?}: {}", html_path, e);
                return ExitCode::from(1);
            }
        }
    } else {
        // URL fetch mode
        let url = args.target.as_ref().unwrap();
        match client.analyze(url).await {
            Ok(report) => report,
            Err(e) => {
                eprintln!("error analyzing {}: {}", url, e);
                return ExitCode::from(1);
            }
        }
    };

    let output_str = format_output(&report, args.json_output);

    if let Some(output_path) = &args.output {
        // Write to file
        if let Err(e) = fs::write(output_path, &output_str) {
            eprintln!("error writing to {:?}: {}", output_path, e);
            return ExitCode::from(1);
        }
    } else {
        // Print to stdout
        println!("{}", output_str);
    }

    ExitCode::SUCCESS
}
