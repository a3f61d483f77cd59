#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use semainier::{
    availability::parse_slot_list, io, time_options, Scheduler, SlotId, TieBreak, Weekday,
};
use std::io::BufRead;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planning hebdomadaire par demi-heures
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration
    #[arg(long)]
    config: String,

    /// CSV des membres (`name,busy_slots`)
    #[arg(long, global = true)]
    members: Option<String>,

    /// registration | name | seed:<n>
    #[arg(long, global = true, default_value_t = TieBreak::Registration)]
    tie_break: TieBreak,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lister les créneaux et les restrictions
    Slots,

    /// Bornes possibles pour une réunion
    Times,

    /// Générer le planning et l'afficher
    Plan {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Session interactive (commandes lues sur l'entrée standard)
    Shell,
}

/// Une ligne de la session interactive
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    cmd: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Ajouter un membre ; `--busy` liste ses créneaux occupés
    AddMember {
        name: String,
        #[arg(long, default_value = "")]
        busy: String,
    },
    /// Relancer le remplissage automatique
    Run,
    /// Déplacer un membre d'un créneau à un autre
    Move { name: String, from: String, to: String },
    /// Ajouter un membre à un créneau
    Add { name: String, slot: String },
    /// Retirer un membre d'un créneau
    Remove { name: String, slot: String },
    /// Retirer un membre de l'équipe
    RemoveMember { name: String },
    /// Afficher la vue courante
    Show,
    /// Exporter la vue en JSON
    Export { path: String },
    Quit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let config = io::load_config_json(&cli.config)?;
    let mut scheduler = Scheduler::new(config)?;
    if let Some(path) = &cli.members {
        let people = io::import_members_csv(path, scheduler.catalog(), scheduler.restrictions())
            .with_context(|| format!("importing members from {path}"))?;
        scheduler.add_people(people)?;
    }

    let code = match cli.cmd {
        Commands::Slots => {
            for slot in scheduler.catalog().iter() {
                let flag = if scheduler.restrictions().contains(&slot.id) {
                    " (restricted)"
                } else {
                    ""
                };
                println!("{} | {}{}", slot.id, slot.display, flag);
            }
            0
        }
        Commands::Times => {
            let cfg = scheduler.config();
            for (value, label) in time_options(cfg.shift_start_hour, cfg.shift_end_hour) {
                println!("{value} | {label}");
            }
            0
        }
        Commands::Plan { out_json, out_csv } => {
            scheduler.generate(cli.tie_break);
            print_view(&scheduler);
            if let Some(path) = out_json {
                io::export_view_json(path, &scheduler.view())?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, scheduler.catalog(), scheduler.assignments())?;
            }
            let missing = scheduler.under_filled();
            if missing.is_empty() {
                0
            } else {
                eprintln!("{} slot(s) under-filled", missing.len());
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Shell => {
            run_shell(&mut scheduler, cli.tie_break)?;
            0
        }
    };

    std::process::exit(code);
}

fn run_shell(scheduler: &mut Scheduler, tie_break: TieBreak) -> Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let tokens = match split_line(&line) {
            Ok(tokens) if tokens.is_empty() => continue,
            Ok(tokens) => tokens,
            Err(err) => {
                eprintln!("error: {err}");
                continue;
            }
        };
        let parsed = match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => parsed,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        let outcome: Result<()> = match parsed.cmd {
            ShellCommand::AddMember { name, busy } => scheduler
                .add_member(name, parse_slot_list(&busy))
                .map(|m| println!("added {} ({} free slots)", m.name, m.availability.len()))
                .map_err(Into::into),
            ShellCommand::Run => {
                scheduler.generate(tie_break);
                print_view(scheduler);
                Ok(())
            }
            ShellCommand::Move { name, from, to } => scheduler
                .move_member(&name, &slot_arg(&from), &slot_arg(&to))
                .map(|()| print_view(scheduler))
                .map_err(Into::into),
            ShellCommand::Add { name, slot } => scheduler
                .add_person(&name, &slot_arg(&slot))
                .map(|()| print_view(scheduler))
                .map_err(Into::into),
            ShellCommand::Remove { name, slot } => {
                scheduler.remove_person(&name, &slot_arg(&slot));
                print_view(scheduler);
                Ok(())
            }
            ShellCommand::RemoveMember { name } => {
                if !scheduler.remove_member(&name) {
                    println!("no member named {name}");
                }
                print_view(scheduler);
                Ok(())
            }
            ShellCommand::Show => {
                print_view(scheduler);
                Ok(())
            }
            ShellCommand::Export { path } => io::export_view_json(path, &scheduler.view()),
            ShellCommand::Quit => break,
        };
        if let Err(err) = outcome {
            eprintln!("error: {err}");
        }
    }
    Ok(())
}

/// Découpe une ligne sur les blancs ; `"..."` regroupe un argument (noms avec espaces).
fn split_line(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if quoted {
        bail!("unterminated quote");
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn slot_arg(raw: &str) -> SlotId {
    SlotId::new(raw.trim().to_lowercase())
}

fn print_view(scheduler: &Scheduler) {
    let view = scheduler.view();
    let catalog = scheduler.catalog();

    if !view.has_any_assignment {
        println!("(no assignments)");
    }

    print!("{:>9}", "");
    for day in Weekday::ALL {
        print!(" | {:<16}", day);
    }
    println!();
    for time_id in catalog.time_ids() {
        print!("{:>9}", catalog.display_for_time(time_id).unwrap_or(time_id));
        for day in Weekday::ALL {
            let id = SlotId::from_parts(day, time_id);
            let cell = if scheduler.restrictions().contains(&id) {
                "xx".to_string()
            } else {
                let roster = view.roster(day, time_id);
                if roster.is_empty() {
                    "-".to_string()
                } else {
                    roster.join("+")
                }
            };
            print!(" | {:<16}", cell);
        }
        println!();
    }

    println!();
    for (name, hours) in &view.hours {
        match view.suggestion_label(name, catalog) {
            Some(label) => println!("{name}: {hours}h (usually {label})"),
            None => println!("{name}: {hours}h"),
        }
    }
}
