//! Score a day of classified meetings.

use std::fs::File;
use std::path::PathBuf;

use clap::Args;
use cogload_core::{Config, DayLoad, LoadPipeline};

#[derive(Args)]
pub struct ScoreArgs {
    /// JSON file with the day's meetings (reads stdin if omitted)
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
    /// Show the per-meeting load breakdown
    #[arg(long)]
    explain: bool,
    /// Score meetings in the given order even if start times go backwards
    #[arg(long)]
    allow_unordered: bool,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let day = score_input(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&day)?);
    } else {
        print_table(&day, args.explain);
    }
    Ok(())
}

fn score_input(args: &ScoreArgs) -> cogload_core::Result<DayLoad> {
    let config = Config::load_or_default();
    let weights = config.weight_table()?;
    let pipeline = LoadPipeline::new(&weights)
        .with_order_validation(config.scoring.validate_order && !args.allow_unordered);

    match &args.input {
        Some(path) => pipeline.score_reader(File::open(path)?),
        None => pipeline.score_reader(std::io::stdin().lock()),
    }
}

fn print_table(day: &DayLoad, explain: bool) {
    if day.events.is_empty() {
        println!("No meetings.");
    } else {
        println!(
            "{:<6} {:<28} {:>6} {:>6} {:>6} {:>8} {:>8}",
            "START", "MEETING", "MENTAL", "SWITCH", "TOTAL", "RECOVERY", "CAPACITY"
        );
        println!("{}", "─".repeat(74));
    }

    for event in &day.events {
        let title: String = event.meeting.title.chars().take(28).collect();
        println!(
            "{:<6} {:<28} {:>6.3} {:>6.3} {:>6.3} {:>7.1}m {:>8.1}",
            event.meeting.start.format("%H:%M"),
            title,
            event.mental_load,
            event.context_switch_cost,
            event.total_load,
            event.recovery_minutes,
            event.capacity_remaining,
        );

        if explain {
            let x = &event.explanation;
            for term in x.contributions() {
                println!(
                    "       {:<12} {:.2} × {:.2} = {:.3}",
                    term.name, term.weight, term.score, term.contribution
                );
            }
            println!(
                "       type ×{:.2}, {} ×{:.1}, tags: {}",
                x.meeting_type_scalar,
                event.time_of_day.as_str(),
                x.time_of_day_multiplier,
                x.topic_tags.iter().collect::<Vec<_>>().join(", ")
            );
        }
    }

    let summary = &day.summary;
    println!();
    println!("Average load:       {:.3}", summary.total_load);
    println!("Capacity remaining: {:.1}", summary.capacity_remaining);
    println!("Recovery needed:    {:.0}m", day.total_recovery_minutes());
    if let Some(heaviest) = day.heaviest() {
        println!(
            "Heaviest meeting:   {} ({:.3})",
            heaviest.meeting.title, heaviest.total_load
        );
    }
    if summary.high_risk {
        println!("\n  Warning: high burnout risk today.");
    }
}
