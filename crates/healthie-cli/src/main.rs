use anyhow::Result;
use clap::{Parser, Subcommand};
use healthie_cli::{commands, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "healthie")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Automate Healthie EHR workflows through a headless browser",
    long_about = "Drives the Healthie web application with a headless Chrome instance: \
                  log in once, look up patients, and book appointments. Credentials are \
                  read from HEALTHIE_EMAIL and HEALTHIE_PASSWORD."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    /// Run Chrome with a visible window instead of headless
    #[arg(long, global = true)]
    headful: bool,

    /// Persistent Chrome profile directory (default: throwaway profile)
    #[arg(long, global = true, value_name = "DIR")]
    profile: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify that a Healthie session can be established
    Login,

    /// Find a patient by name and date of birth
    FindPatient {
        /// The patient's full name
        #[arg(long)]
        name: String,

        /// The patient's date of birth
        #[arg(long)]
        dob: String,
    },

    /// Book an appointment for a patient
    BookAppointment {
        /// Healthie patient id
        #[arg(long)]
        patient_id: String,

        /// Appointment date
        #[arg(long)]
        date: String,

        /// Appointment time
        #[arg(long)]
        time: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Login => commands::login::execute(cli.headful, cli.profile),
        Commands::FindPatient { name, dob } => {
            commands::patient::execute(&name, &dob, cli.headful, cli.profile, cli.format)
        }
        Commands::BookAppointment {
            patient_id,
            date,
            time,
        } => commands::appointment::execute(
            &patient_id,
            &date,
            &time,
            cli.headful,
            cli.profile,
            cli.format,
        ),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("healthie=debug,healthie_core=debug,healthie_browser=debug")
    } else {
        EnvFilter::new("healthie_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
