use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{builder::PossibleValuesParser, Args, Parser, Subcommand};
use client_core::{EncodeClient, EncodeForm, FormEvent, FormSession, SubmitError};
use shared::domain::{
    OutputToggle, ReflectorId, RotorId, DEFAULT_REFLECTOR, REFLECTOR_CATALOG, ROTOR_CATALOG,
    ROTOR_SLOTS,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Validate a rotor/plugboard configuration and submit it for encoding")]
struct Cli {
    /// Settings file; missing files are skipped.
    #[arg(long, global = true, default_value = "encoder.toml")]
    config: PathBuf,
    /// Overrides the configured encode service base URL.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct FormArgs {
    /// Rotor for the next slot, left to right. Unset slots keep their default.
    #[arg(long = "rotor", value_parser = PossibleValuesParser::new(ROTOR_CATALOG.iter().copied()))]
    rotors: Vec<String>,
    /// Starting position for the next slot, left to right.
    #[arg(long = "position")]
    positions: Vec<String>,
    #[arg(
        long,
        default_value = DEFAULT_REFLECTOR,
        value_parser = PossibleValuesParser::new(REFLECTOR_CATALOG.iter().copied())
    )]
    reflector: String,
    /// Whitespace-separated letter pairs, e.g. "ab cd ef".
    #[arg(long, default_value = "")]
    plugboard: String,
    #[arg(long)]
    punc: bool,
    #[arg(long)]
    case: bool,
    #[arg(long)]
    space: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report validation errors without submitting.
    Validate(FormArgs),
    /// Submit the form and print the returned ciphertext.
    Encode {
        #[command(flatten)]
        form: FormArgs,
        plaintext: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate(args) => {
            let form = fill_form(args, None)?;
            let banners = form.banners();
            for message in [banners.plugboard, banners.rotor].into_iter().flatten() {
                eprintln!("{message}");
            }
            if banners.plugboard.is_some() || banners.rotor.is_some() {
                bail!("form has validation errors");
            }
            println!("form is valid");
        }
        Command::Encode { form, plaintext } => {
            let mut settings = load_settings(&cli.config);
            if let Some(server_url) = cli.server_url {
                settings.server_url = server_url;
            }

            let client = EncodeClient::new(&settings.server_url, settings.request_timeout())
                .context("failed to set up encode client")?;
            info!(endpoint = %client.endpoint(), "using encode service");

            let session = FormSession::new(fill_form(form, Some(plaintext))?, client);
            match session.submit().await {
                Ok(ciphertext) => println!("{ciphertext}"),
                Err(SubmitError::Blocked(blocked)) => {
                    let banners = session.banners().await;
                    for message in [banners.plugboard, banners.rotor].into_iter().flatten() {
                        eprintln!("{message}");
                    }
                    bail!(blocked);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}

/// Replays the arguments as the input events a user would produce on the form.
fn fill_form(args: FormArgs, plaintext: Option<String>) -> Result<EncodeForm> {
    if args.rotors.len() > ROTOR_SLOTS || args.positions.len() > ROTOR_SLOTS {
        bail!("at most {ROTOR_SLOTS} rotors and positions can be given");
    }

    let mut form = EncodeForm::new();
    let mut events = Vec::new();
    for (index, rotor) in args.rotors.into_iter().enumerate() {
        events.push(FormEvent::RotorChanged {
            slot: index + 1,
            rotor: RotorId::new(rotor),
        });
    }
    for (index, value) in args.positions.into_iter().enumerate() {
        events.push(FormEvent::PositionChanged {
            slot: index + 1,
            value,
        });
    }
    events.push(FormEvent::ReflectorChanged(ReflectorId::new(args.reflector)));
    events.push(FormEvent::PlugboardInput(args.plugboard));
    for (toggle, checked) in OutputToggle::ALL.into_iter().zip([args.punc, args.case, args.space]) {
        events.push(FormEvent::ToggleChanged { toggle, checked });
    }
    if let Some(plaintext) = plaintext {
        events.push(FormEvent::PlaintextInput(plaintext));
    }

    for event in events {
        form.handle(event)?;
    }
    Ok(form)
}
