//! stoicaf - Stoic AF journaling CLI
//!
//! Write daily entries and review streaks, pillar balance, and mood.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use stoicaf_core::analytics::DashboardStats;
use stoicaf_core::db::EntryFilter;
use stoicaf_core::format::{format_entry_date, format_relative_time_opt, mood_label};
use stoicaf_core::types::{parse_entry_date, NewEntry, Pillar};
use stoicaf_core::{Config, Journal};

#[derive(Parser, Debug)]
#[command(name = "stoicaf")]
#[command(about = "Stoic AF - daily journaling with pillars, moods, and streaks")]
#[command(version)]
struct Args {
    /// User the command acts for
    #[arg(long, global = true, default_value = "default")]
    user: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a journal entry
    Add {
        /// Entry text
        text: Option<String>,

        /// Pillar tag (money, ego, relationships, discipline)
        #[arg(long)]
        pillar: Option<String>,

        /// Mood self-rating, 1-5
        #[arg(long)]
        mood: Option<u8>,

        /// Day reached in the pillar's guided track
        #[arg(long)]
        track_day: Option<u32>,

        /// Entry day (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recent entries
    List {
        /// Only entries tagged with this pillar
        #[arg(long)]
        pillar: Option<String>,

        /// Number of entries to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Delete an entry by id
    Delete {
        /// Entry id (from `stoicaf list`)
        id: String,
    },

    /// Show streaks, pillar balance, and the mood window
    Stats {
        /// Emit JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = stoicaf_core::logging::init(&config.logging).ok();

    let journal = Journal::open(&Config::database_path()).context("failed to open journal")?;
    journal.migrate().context("failed to run migrations")?;

    match args.command {
        Command::Add {
            text,
            pillar,
            mood,
            track_day,
            date,
        } => add_entry(&journal, &args.user, text, pillar, mood, track_day, date),
        Command::List { pillar, limit } => list_entries(&journal, &args.user, pillar, limit),
        Command::Delete { id } => {
            journal
                .delete_entry(&args.user, &id)
                .with_context(|| format!("failed to delete entry {}", id))?;
            println!("Deleted entry {}", id);
            Ok(())
        }
        Command::Stats { json } => {
            let stats = journal
                .dashboard_stats(&args.user, &config.analytics)
                .context("failed to compute stats")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats, &config);
            }
            Ok(())
        }
    }
}

fn parse_pillar(s: &str) -> Result<Pillar> {
    s.parse()
        .map_err(|e: String| anyhow::anyhow!("{} (expected money, ego, relationships, or discipline)", e))
}

fn add_entry(
    journal: &Journal,
    user: &str,
    text: Option<String>,
    pillar: Option<String>,
    mood: Option<u8>,
    track_day: Option<u32>,
    date: Option<String>,
) -> Result<()> {
    let entry_date = match date {
        Some(s) => parse_entry_date(&s)?,
        None => Local::now().date_naive(),
    };

    let entry = journal
        .insert_entry(NewEntry {
            pillar: pillar.as_deref().map(parse_pillar).transpose()?,
            mood,
            day_in_track: track_day,
            content: text,
            ..NewEntry::for_day(user, entry_date)
        })
        .context("failed to save entry")?;

    tracing::info!(entry_id = %entry.id, "Entry saved via CLI");
    println!(
        "Saved entry for {} ({})",
        format_entry_date(entry.entry_date),
        entry.id
    );
    Ok(())
}

fn list_entries(
    journal: &Journal,
    user: &str,
    pillar: Option<String>,
    limit: usize,
) -> Result<()> {
    let filter = EntryFilter {
        pillar: pillar.as_deref().map(parse_pillar).transpose()?,
        limit: Some(limit),
        ..Default::default()
    };
    let entries = journal
        .list_entries(user, &filter)
        .context("failed to list entries")?;

    if entries.is_empty() {
        println!("No entries yet. Write one with `stoicaf add`.");
        return Ok(());
    }

    for entry in entries {
        let pillar = entry
            .pillar
            .map(|p| p.display_name())
            .unwrap_or("untagged");
        let excerpt = entry.content.as_deref().unwrap_or("").trim();
        let excerpt = if excerpt.chars().count() > 48 {
            let cut: String = excerpt.chars().take(48).collect();
            format!("{}…", cut)
        } else {
            excerpt.to_string()
        };
        println!(
            "{}  {:<13} {:>6}  {}  {}",
            format_entry_date(entry.entry_date),
            pillar,
            mood_label(entry.mood),
            entry.id,
            excerpt
        );
    }
    Ok(())
}

fn print_stats(stats: &DashboardStats, config: &Config) {
    println!();
    println!("╭{}╮", "─".repeat(44));
    println!("│{:^44}│", "STOIC AF");
    println!("╰{}╯", "─".repeat(44));
    println!();

    if stats.entry_count == 0 {
        println!("  No entries yet. Write one with `stoicaf add`.");
        println!();
        return;
    }

    println!(
        "  Entries: {:<8} Last entry: {}",
        stats.entry_count,
        format_relative_time_opt(stats.last_entry_at)
    );
    println!(
        "  Streak:  {:<8} Longest:    {} days",
        format!("{} days", stats.current_streak),
        stats.longest_streak
    );
    println!();

    println!(
        "PILLARS (last {} entries)",
        config.analytics.distribution_window
    );
    for (pillar, share) in &stats.distribution {
        let bar = "█".repeat((share.percentage / 5) as usize);
        println!(
            "  {:<14} {:<20} {:>3}  {:>3}%",
            pillar.display_name(),
            bar,
            share.count,
            share.percentage
        );
    }
    println!();

    println!("NEXT PROMPT DAY");
    let next: Vec<String> = stats
        .next_track_days
        .iter()
        .map(|(pillar, day)| format!("{} day {}", pillar.display_name(), day))
        .collect();
    println!("  {}", next.join(" · "));
    println!();

    println!("MOOD (last {} days)", config.analytics.mood_window_days);
    match stats.average_mood() {
        Some(avg) => println!("  {}  avg {:.1}", stats.mood_sparkline(), avg),
        None => println!("  {}  no moods recorded", stats.mood_sparkline()),
    }
    println!();
}
