use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;
use vest_core::{
    EsppNetCalculator, EsppSale, MaturationPolicy, RsuNetCalculator, RsuSale, TaxAssessment,
    TaxYearConfig, parse_local_date,
};
use vest_data::{BracketTableLoader, seeds};

/// Net-proceeds calculator for equity compensation (RSU / ESPP) under the
/// Israeli tax rules.
///
/// Prices are in the source currency and converted with --rate; fees and
/// the income baseline are in local currency. Dates are D/M/YY or
/// D/M/YYYY.
#[derive(Parser, Debug)]
#[command(name = "vest")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Tax year to calculate under (2023 and 2024 are seeded)
    #[arg(long, default_value_t = 2024)]
    year: i32,

    /// Replace the seeded bracket table with one loaded from a CSV file
    /// (columns: tax_year, upper_bound, rate; empty upper_bound for the
    /// top bracket)
    #[arg(long)]
    brackets: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Net proceeds of an RSU sale
    Rsu(RsuArgs),
    /// Net proceeds of an ESPP sale
    Espp(EsppArgs),
    /// Holding-period status of a grant
    Maturity(MaturityArgs),
}

#[derive(Args, Debug)]
struct RsuArgs {
    #[arg(long)]
    shares: Decimal,

    /// Price per share on the vest day, source currency
    #[arg(long)]
    vest_price: Decimal,

    /// Exchange rate to local currency
    #[arg(long)]
    rate: Decimal,

    /// Broker/transfer fees, local currency
    #[arg(long, default_value = "0")]
    fees: Decimal,

    /// Annual income already earned this year, local currency
    #[arg(long)]
    baseline: Decimal,

    /// Sale price per share; omit for a hold/projection view
    #[arg(long)]
    sell_price: Option<Decimal>,

    /// Grant date (D/M/YY or D/M/YYYY); omitting it assumes unmatured
    #[arg(long)]
    grant_date: Option<String>,

    /// Sell date; omitting it assumes unmatured
    #[arg(long)]
    sell_date: Option<String>,
}

#[derive(Args, Debug)]
struct EsppArgs {
    #[arg(long)]
    shares: Decimal,

    /// Fair market price per share at purchase, source currency
    #[arg(long)]
    market_price: Decimal,

    /// Discounted price per share actually paid
    #[arg(long)]
    purchase_price: Decimal,

    /// Total amount contributed, source currency
    #[arg(long)]
    contribution: Decimal,

    #[arg(long)]
    rate: Decimal,

    #[arg(long, default_value = "0")]
    fees: Decimal,

    #[arg(long)]
    baseline: Decimal,

    #[arg(long)]
    sell_price: Option<Decimal>,

    #[arg(long)]
    grant_date: Option<String>,

    #[arg(long)]
    sell_date: Option<String>,
}

#[derive(Args, Debug)]
struct MaturityArgs {
    /// Grant date (D/M/YY or D/M/YYYY)
    #[arg(long)]
    grant_date: String,

    /// Prospective sell date to test against
    #[arg(long)]
    sell_date: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.year, cli.brackets.as_deref())?;

    match &cli.command {
        Command::Rsu(args) => {
            let sale = RsuSale {
                shares: args.shares,
                vest_price: args.vest_price,
                exchange_rate: args.rate,
                fees: args.fees,
                baseline_annual_income: args.baseline,
                sell_price: args.sell_price,
                grant_date: args.grant_date.clone(),
                sell_date: args.sell_date.clone(),
            };
            print_assessment(&RsuNetCalculator::new(&config).calculate(&sale));
        }
        Command::Espp(args) => {
            let sale = EsppSale {
                shares: args.shares,
                market_price: args.market_price,
                purchase_price: args.purchase_price,
                contribution: args.contribution,
                exchange_rate: args.rate,
                fees: args.fees,
                baseline_annual_income: args.baseline,
                sell_price: args.sell_price,
                grant_date: args.grant_date.clone(),
                sell_date: args.sell_date.clone(),
            };
            print_assessment(&EsppNetCalculator::new(&config).calculate(&sale));
        }
        Command::Maturity(args) => print_maturity(&config, args)?,
    }

    Ok(())
}

fn load_config(
    year: i32,
    brackets_csv: Option<&std::path::Path>,
) -> Result<TaxYearConfig> {
    let mut config = match year {
        2023 => seeds::tax_year_2023(),
        2024 => seeds::tax_year_2024(),
        other => {
            if brackets_csv.is_none() {
                bail!("no seeded configuration for tax year {other}; supply --brackets");
            }
            // Rates/thresholds fall back to the latest seeded year; only
            // the bracket table comes from the file.
            TaxYearConfig {
                tax_year: other,
                ..seeds::tax_year_2024()
            }
        }
    };

    if let Some(path) = brackets_csv {
        let file =
            File::open(path).with_context(|| format!("failed to open: {}", path.display()))?;
        let records = BracketTableLoader::parse(file)
            .with_context(|| format!("failed to parse CSV: {}", path.display()))?;
        config.brackets = BracketTableLoader::brackets_for_year(&records, year)
            .with_context(|| format!("no brackets for {year} in {}", path.display()))?;
    }

    config
        .validate()
        .with_context(|| format!("invalid configuration for tax year {year}"))?;

    Ok(config)
}

fn print_assessment(assessment: &TaxAssessment) {
    let track = if assessment.is_matured() {
        "matured (capital-gains track)"
    } else {
        "unmatured (ordinary-income track)"
    };
    let breakdown = assessment.breakdown();

    println!("Track               {track}");
    print_amount("Ordinary income", breakdown.ordinary_income);
    print_amount("Income tax", breakdown.income_tax);
    print_amount("National insurance", breakdown.national_insurance);
    print_amount("Health tax", breakdown.health_tax);
    print_amount("Capital gains tax", breakdown.capital_gains_tax);
    print_amount("Surtax", breakdown.surtax);
    print_amount("Total tax", breakdown.total_tax);
    print_amount("Net", breakdown.net);
}

fn print_amount(
    label: &str,
    amount: Decimal,
) {
    println!("{label:<20}{:>14.2}", amount);
}

fn print_maturity(
    config: &TaxYearConfig,
    args: &MaturityArgs,
) -> Result<()> {
    let policy = MaturationPolicy::new(config);

    let grant = parse_local_date(&args.grant_date)
        .with_context(|| format!("unparseable grant date: {}", args.grant_date))?;
    let maturation = policy
        .maturation_date(grant)
        .context("maturation date out of range")?;

    if policy.is_matured(&args.grant_date, &args.sell_date) {
        println!("Matured: yes (since {})", maturation.format("%-d/%-m/%Y"));
    } else {
        let remaining = policy
            .days_until_matured(&args.grant_date, &args.sell_date)
            .with_context(|| format!("unparseable sell date: {}", args.sell_date))?;
        println!(
            "Matured: no ({} on {}, {} days remaining)",
            maturation.format("%-d/%-m/%Y"),
            args.sell_date,
            remaining
        );
    }

    Ok(())
}
