//! Display functions for command results

use super::formatters::{create_progress_bar, format_duration, key_rows, mapping_rows};
use crate::commands::{
    CaesarResult, FrequencyResult, HillclimbResult, NgramSummary, SubstitutionResult,
    WordListResult,
};
use colored::Colorize;
use serde::Serialize;

fn header(title: &str, subject: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        title.bright_cyan().bold(),
        subject.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());
}

fn truncation_warning(truncated: bool) {
    if truncated {
        println!(
            "{}",
            "⚠ Search stopped early; results may be incomplete".yellow()
        );
    }
}

/// Print any result as pretty JSON on stdout
///
/// # Errors
/// Fails only if the value cannot be serialized.
pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print transposal or letter-bank solutions, one per line
pub fn print_word_list_result(result: &WordListResult) {
    header(&format!("{}:", result.kind.to_string().to_uppercase()), &result.input);

    if result.solutions.is_empty() {
        println!("\n{}", "No solutions found".red());
    } else {
        println!();
        for solution in &result.solutions {
            println!("  {solution}");
        }
    }

    println!(
        "\n{} solutions in {}",
        result.solutions.len().to_string().green().bold(),
        format_duration(result.duration)
    );
    truncation_warning(result.truncated);
}

/// Print substitution solutions with their letter mappings
pub fn print_substitution_result(result: &SubstitutionResult) {
    header("SUBSTITUTION:", &result.ciphertext);

    if result.solutions.is_empty() {
        println!("\n{}", "No consistent decryption found".red());
    }

    for (i, solution) in result.solutions.iter().enumerate() {
        let (cipher, plain) = mapping_rows(&solution.mapping);
        println!("\n{} {}", format!("#{}", i + 1).bright_black(), solution.plaintext.green().bold());
        if let Some(fitness) = solution.fitness {
            println!("   fitness: {fitness:.4}");
        }
        println!("   {}", cipher.bright_black());
        println!("   {plain}");
    }

    println!(
        "\n{} solutions in {}",
        result.solutions.len().to_string().green().bold(),
        format_duration(result.duration)
    );
    truncation_warning(result.truncated);
}

/// Print the hill climber's archive, best first
pub fn print_hillclimb_result(result: &HillclimbResult) {
    header("HILL CLIMB:", &result.ciphertext);
    println!(
        "   {} generations in {}",
        result.generations,
        format_duration(result.duration)
    );

    for solution in &result.solutions {
        let (alphabet, key) = key_rows(&solution.key);
        println!("\n   fitness: {}", format!("{:.8}", solution.fitness).bright_yellow());
        println!("   {}", alphabet.bright_black());
        println!("   {key}");
        println!("   {}", solution.plaintext.green());
    }
}

/// Print a single-letter frequency table with bars
pub fn print_frequency_result(result: &FrequencyResult) {
    println!("\n{}", "Frequency Table".bright_cyan().bold());
    println!("{}", "─".repeat(40).cyan());
    println!("Total letters: {}", result.total_letters);

    let top = result.letters.first().map_or(0.0, |f| f.percent);
    for row in &result.letters {
        println!(
            "{}: {:4} ({:6.2}%) {}",
            row.letter.to_string().bright_yellow(),
            row.count,
            row.percent,
            create_progress_bar(row.percent, top, 20).green()
        );
    }
}

/// Print all 25 Caesar shifts
pub fn print_caesar_result(result: &CaesarResult) {
    header("CAESAR:", &result.text);
    for shift in &result.shifts {
        println!("{shift}");
    }
}

/// Report a generated n-gram table (the table itself went to its own writer)
pub fn print_ngram_summary(summary: &NgramSummary) {
    eprintln!(
        "{} {} distinct {}-grams in {}",
        "✓".green(),
        summary.distinct,
        summary.ngram_size,
        format_duration(summary.duration)
    );
}
