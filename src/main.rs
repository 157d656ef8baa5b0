use checkout_sample::application::main_screen::MainScreen;
use checkout_sample::application::scan_card::{self, ScannedCard};
use checkout_sample::application::settings_screens;
use checkout_sample::application::success_screen;
use checkout_sample::application::ScreenEvent;
use checkout_sample::config::MerchantConfig;
use checkout_sample::domain::locale::Locale;
use checkout_sample::domain::money::MAX_AMOUNT;
use checkout_sample::domain::ports::PreferenceStoreBox;
use checkout_sample::domain::settings::Settings;
use checkout_sample::error::CheckoutError;
use checkout_sample::infrastructure::in_memory::InMemoryPreferenceStore;
use checkout_sample::interfaces::csv::edit_reader::EditReader;
use checkout_sample::interfaces::json_launcher::JsonLauncher;
use checkout_sample::interfaces::keys;
use checkout_sample::logging::init_cli_logger;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Locale used to render and read amounts (en-US, ru-RU, de-DE)
    #[arg(long, global = true, default_value = "en-US")]
    locale: Locale,

    /// Path to persistent preferences (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    prefs_path: Option<PathBuf>,

    /// JSON file overriding the demo merchant configuration
    #[arg(long, global = true)]
    merchant: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Type keystrokes into the amount field; `<` is backspace
    Type { keys: String },
    /// Replay an `action,text,position` CSV edit script into the amount field
    Replay { input: PathBuf },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Print the tokenize request for an amount
    Pay { amount: String },
    /// Print the scan result handed to the SDK for a scanned card
    Scan {
        card_number: String,
        /// Expiry as MM/YY
        expiry: Option<String>,
    },
    /// Validate a 3-D Secure url and print the confirmation request
    #[command(name = "confirm-3ds")]
    Confirm3ds { url: String },
}

#[derive(Subcommand)]
enum SettingsCommand {
    Show,
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let store = open_store(cli.prefs_path)?;
    let merchant = match cli.merchant {
        Some(path) => MerchantConfig::from_json_file(path).into_diagnostic()?,
        None => MerchantConfig::default(),
    };

    match cli.command {
        Command::Type { keys } => {
            let mut screen = MainScreen::open(store, merchant, cli.locale).into_diagnostic()?;
            println!("{}", screen.field());
            for key in keys::parse_keys(&keys) {
                keys::press(screen.field_mut(), key);
                println!("{}", screen.field());
            }
            println!("amount: {}", screen.amount());
            screen.close().into_diagnostic()?;
        }
        Command::Replay { input } => {
            let mut screen = MainScreen::open(store, merchant, cli.locale).into_diagnostic()?;
            println!("{}", screen.field());
            let file = File::open(input).into_diagnostic()?;
            for edit in EditReader::new(file).edits() {
                match edit.and_then(|edit| edit.apply(screen.field_mut())) {
                    Ok(()) => println!("{}", screen.field()),
                    Err(e) => eprintln!("Error applying edit: {}", e),
                }
            }
            println!("amount: {}", screen.amount());
            screen.close().into_diagnostic()?;
        }
        Command::Settings { command } => match command {
            SettingsCommand::Show => {
                for (key, value) in Settings::new(store.as_ref()).snapshot().into_diagnostic()? {
                    println!("{key}={value}");
                }
            }
            SettingsCommand::Set { key, value } => {
                let stored = settings_screens::apply(store.as_ref(), &key, &value).into_diagnostic()?;
                println!("{key}={stored}");
            }
        },
        Command::Pay { amount } => {
            let value = Decimal::from_str(amount.trim())
                .map_err(|_| CheckoutError::ValidationError(format!("Invalid amount: {amount}")))
                .into_diagnostic()?;
            if value <= Decimal::ZERO || value > MAX_AMOUNT {
                return Err(CheckoutError::ValidationError(format!(
                    "Amount must be in (0, {MAX_AMOUNT}], got {amount}"
                )))
                .into_diagnostic();
            }

            let mut screen = MainScreen::open(store, merchant, cli.locale).into_diagnostic()?;
            let typed = value.to_string().replace('.', &cli.locale.decimal_separator.to_string());
            screen.field_mut().set_text(&typed);

            let mut launcher = JsonLauncher::new(io::stdout().lock());
            if !screen.on_pay_clicked(&mut launcher).into_diagnostic()? {
                return Err(CheckoutError::ValidationError(
                    "Amount must be positive".to_string(),
                ))
                .into_diagnostic();
            }
        }
        Command::Scan {
            card_number,
            expiry,
        } => {
            let result = scan_card::scan_result(Some(ScannedCard {
                card_number,
                expiration_date: expiry,
            }));
            let intent = scan_card::into_result_intent(result);
            println!(
                "{}",
                serde_json::to_string_pretty(&intent).into_diagnostic()?
            );
        }
        Command::Confirm3ds { url } => {
            let mut launcher = JsonLauncher::new(io::stdout().lock());
            if let Some(ScreenEvent::Toast(message)) =
                success_screen::confirm_3ds(&url, &mut launcher).into_diagnostic()?
            {
                return Err(CheckoutError::ValidationError(message)).into_diagnostic();
            }
        }
    }

    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(prefs_path: Option<PathBuf>) -> Result<PreferenceStoreBox> {
    use checkout_sample::infrastructure::rocksdb::RocksDBPreferenceStore;

    let store: PreferenceStoreBox = match prefs_path {
        Some(path) => Box::new(RocksDBPreferenceStore::open(path).into_diagnostic()?),
        None => Box::new(InMemoryPreferenceStore::new()),
    };
    Ok(store)
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(prefs_path: Option<PathBuf>) -> Result<PreferenceStoreBox> {
    if let Some(path) = prefs_path {
        eprintln!(
            "WARNING: Persistent storage requested via --prefs-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
        tracing::warn!(path = %path.display(), "preferences kept in memory");
    }
    Ok(Box::new(InMemoryPreferenceStore::new()))
}
