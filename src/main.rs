use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use budget_wrapped::message::Console;
use budget_wrapped::ynab::{BudgetClient, visible_groups};
use budget_wrapped::{Config, ExpenseReportBuilder, Report, format_amount};
use clap::{Args, Parser, Subcommand};
use log::info;

#[derive(Parser)]
#[command(name = "wrapped", version)]
#[command(about = "Compare budget expenses between two calendar years", long_about = None)]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two years of exported expense reports
    Compare(CompareArgs),
    /// List budgets available on the budgeting service
    Budgets,
    /// Show the visible category groups of a budget
    Categories {
        /// Budget id (asked for interactively when omitted)
        #[arg(long)]
        budget: Option<String>,
    },
}

#[derive(Args)]
struct CompareArgs {
    /// Starting year (YYYY)
    #[arg(long)]
    initial_year: Option<String>,
    /// Comparison year (YYYY)
    #[arg(long)]
    compared_year: Option<String>,
    /// Directory holding `<year>-expense-report.csv` files
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// File the report is saved to
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Save the report without asking
    #[arg(long, conflicts_with = "print")]
    save: bool,
    /// Print the report to standard output without asking
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?
        .with_env();

    match cli.command {
        Commands::Compare(args) => run_compare(&config, args),
        Commands::Budgets => run_budgets(&config),
        Commands::Categories { budget } => run_categories(&config, budget),
    }
}

fn run_compare(config: &Config, args: CompareArgs) -> Result<()> {
    let mut console = Console::stdio();

    let initial_year = match args.initial_year {
        Some(year) => year,
        None => console.prompt("Enter starting year (YYYY)")?,
    };
    let compared_year = match args.compared_year {
        Some(year) => year,
        None => console.prompt("Enter comparison year (YYYY)")?,
    };

    let data_dir = args.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let load = |year: &str| {
        ExpenseReportBuilder::new()
            .directory(&data_dir)
            .year(year)
            .parse()
            .with_context(|| format!("Failed to load the {} expense report", year))
    };
    let initial = load(&initial_year)?;
    let compared = load(&compared_year)?;

    let report = Report::build(
        &initial,
        &compared,
        &initial_year,
        &compared_year,
        &config.categories,
    )?;

    let save = if args.save {
        true
    } else if args.print {
        false
    } else {
        console.confirmation("Report Generated, Save (y) or Print to Standard Output (n)", false)?
    };

    if save {
        let output = args.output.unwrap_or_else(|| config.output_file.clone());
        fs::write(&output, report.to_string())
            .with_context(|| format!("Failed to write report to {}", output.display()))?;
        info!("report saved to {}", output.display());
    } else {
        println!("{}", report);
    }

    Ok(())
}

fn run_budgets(config: &Config) -> Result<()> {
    let client = BudgetClient::new(config)?;
    let budgets = client.budgets()?;

    for (i, budget) in budgets.iter().enumerate() {
        match budget.last_modified_on {
            Some(modified) => println!("{}, {} (last modified {})", i, budget.name, modified.date_naive()),
            None => println!("{}, {}", i, budget.name),
        }
    }
    Ok(())
}

fn run_categories(config: &Config, budget: Option<String>) -> Result<()> {
    let client = BudgetClient::new(config)?;

    let budget_id = match budget {
        Some(id) => id,
        None => {
            let budgets = client.budgets()?;
            if budgets.is_empty() {
                bail!("No budgets found for this account");
            }

            let mut console = Console::stdio();
            console.info(&format!(
                "We found {} budgets to analyze!\nWhich would you like to choose? \
                 (Enter the number next to the name to select.)",
                budgets.len()
            ))?;
            for (i, b) in budgets.iter().enumerate() {
                println!("  {}, {}", i, b.name);
            }

            let choices: Vec<String> = (0..budgets.len()).map(|i| i.to_string()).collect();
            let selected: usize = console.choice("Budget", &choices, None)?.parse()?;
            budgets[selected].id.clone()
        }
    };

    let detail = client.budget(&budget_id)?;
    info!("budget {} at server knowledge {}", detail.name, detail.server_knowledge);

    println!("{}", detail.name);
    for group in visible_groups(client.category_groups(&budget_id)?) {
        println!("\n--- {} ---", group.name);
        for category in group.categories.iter().filter(|c| !c.hidden && !c.deleted) {
            println!(
                "  {:<32} ${}",
                category.name,
                format_amount(category.activity.to_decimal())
            );
        }
    }
    Ok(())
}
