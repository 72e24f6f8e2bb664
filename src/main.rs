//! Bond Analytics CLI
//!
//! Command-line interface for cashflow schedules, pricing and yield analytics

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use bond_analytics::portfolio::load_quotes;
use bond_analytics::{AnalyticsResult, Bond, Date, PortfolioRunner, SolverConfig};

#[derive(Parser)]
#[command(name = "bond_analytics", version, about = "Fixed-coupon bond cashflows and yield analytics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the coupon and principal schedule
    Schedule(Terms),
    /// Price and risk at a given yield
    Price {
        #[command(flatten)]
        terms: Terms,
        /// Annual yield as a decimal
        #[arg(long = "yield")]
        yld: f64,
    },
    /// Solve yield-to-maturity from a clean price, then report risk at that yield
    Ytm {
        #[command(flatten)]
        terms: Terms,
        /// Clean market price
        #[arg(long)]
        price: f64,
    },
    /// Run analytics for every bond in a CSV file
    Batch {
        #[arg(long)]
        file: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct Terms {
    #[arg(long, default_value_t = 1000.0)]
    face: f64,
    /// Annual coupon rate as a decimal
    #[arg(long)]
    coupon: f64,
    #[arg(long)]
    years: u32,
    #[arg(long, default_value_t = 2)]
    frequency: u32,
    /// Settlement date, YYYY-MM-DD
    #[arg(long)]
    settle: Date,
}

impl Terms {
    fn bond(&self) -> Result<Bond> {
        Bond::try_new(self.face, self.coupon, self.years, self.frequency).context("Invalid bond terms")
    }
}

fn print_analytics(a: &AnalyticsResult) {
    println!("  Price:             {:.6}", a.price);
    println!("  Macaulay Duration: {:.6}", a.macaulay_duration);
    println!("  Modified Duration: {:.6}", a.modified_duration);
    println!("  Convexity:         {:.6}", a.convexity);
    println!("  DV01:              {:.6}", a.dv01);
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let solver = SolverConfig::from_env();

    match cli.command {
        Command::Schedule(terms) => {
            let bond = terms.bond()?;
            println!("{:>4} {:>12} {:>8} {:>14} {:>10}", "#", "Date", "Time", "Amount", "Type");
            println!("{}", "-".repeat(52));
            for (i, cf) in bond.generate_cashflows(terms.settle).iter().enumerate() {
                println!(
                    "{:>4} {:>12} {:>8.4} {:>14.2} {:>10}",
                    i + 1,
                    cf.date.to_string(),
                    cf.time,
                    cf.amount,
                    format!("{:?}", cf.kind)
                );
            }
        }
        Command::Price { terms, yld } => {
            let bond = terms.bond()?;
            let cashflows = bond.generate_cashflows(terms.settle);
            println!("Analytics at yield {:.6}:", yld);
            print_analytics(&bond.calculate_analytics(yld, &cashflows));
        }
        Command::Ytm { terms, price } => {
            let bond = terms.bond()?;
            let cashflows = bond.generate_cashflows(terms.settle);
            let result = bond.calculate_ytm_with(&solver, price, &cashflows);

            println!("Accrued Interest:    {:.6}", result.accrued);
            let Some(ytm) = result.ytm.value() else {
                bail!("Yield search did not converge for price {}", price);
            };
            println!("Yield to Maturity:   {:.8}", ytm);
            print_analytics(&bond.calculate_analytics(ytm, &cashflows));
        }
        Command::Batch { file, json } => {
            let quotes = load_quotes(&file)
                .with_context(|| format!("Failed to load bonds from {}", file.display()))?;
            let reports = PortfolioRunner::new(solver).run_batch(&quotes);
            let summary = PortfolioRunner::summary(&reports);

            if json {
                let output = serde_json::json!({ "positions": reports, "summary": summary });
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }

            println!(
                "{:<12} {:>12} {:>10} {:>10} {:>10} {:>10}",
                "Bond", "Price", "YTM", "ModDur", "Convex", "DV01"
            );
            println!("{}", "-".repeat(70));
            for r in &reports {
                match (r.report.ytm, r.report.analytics) {
                    (Some(ytm), Some(a)) => println!(
                        "{:<12} {:>12.4} {:>10.6} {:>10.4} {:>10.4} {:>10.4}",
                        r.bond_id, r.report.clean_price, ytm, a.modified_duration, a.convexity, a.dv01
                    ),
                    _ => println!("{:<12} {:>12.4} {:>10}", r.bond_id, r.report.clean_price, "NaN"),
                }
            }

            println!("\nSummary:");
            println!("  Positions:         {} ({} converged)", summary.positions, summary.converged);
            println!("  Market Value:      {:.2}", summary.market_value);
            println!("  Modified Duration: {:.4}", summary.modified_duration);
            println!("  Total DV01:        {:.4}", summary.total_dv01);
        }
    }

    Ok(())
}
