mod cli;
mod db;
mod error;
mod export;
mod fmt;
mod importer;
mod models;
mod normalize;
mod reports;
mod session;
mod settings;
mod store;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, RecordsCommands, ReportCommands, UsersCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Login { email, password } => cli::login::login(email, password),
        Commands::Logout => cli::login::logout(),
        Commands::Records { command } => match command {
            RecordsCommands::Add {
                fio,
                ipn,
                organization,
                date_opened,
                date_first_deposit,
                card_status,
                contract,
                passport,
                questionnaire,
                comment,
            } => cli::records::add(cli::records::RecordArgs {
                fio,
                ipn,
                organization,
                date_opened,
                date_first_deposit,
                card_status,
                contract,
                passport,
                questionnaire,
                comment,
            }),
            RecordsCommands::List { organization } => cli::records::list(organization),
            RecordsCommands::Edit {
                id,
                fio,
                ipn,
                organization,
                date_opened,
                date_first_deposit,
                card_status,
                contract,
                passport,
                questionnaire,
                comment,
            } => cli::records::edit(
                id,
                cli::records::RecordArgs {
                    fio,
                    ipn,
                    organization,
                    date_opened,
                    date_first_deposit,
                    card_status,
                    contract,
                    passport,
                    questionnaire,
                    comment,
                },
            ),
            RecordsCommands::Delete { id, yes } => cli::records::delete(id, yes),
        },
        Commands::Import { file } => cli::import::run(&file),
        Commands::Template { output } => cli::export::template(output),
        Commands::Export { output } => cli::export::run(output),
        Commands::Report { command } => match command {
            ReportCommands::Opened { year } => cli::report::opened(year),
            ReportCommands::Activated => cli::report::activated(),
            ReportCommands::Status => cli::report::status(),
        },
        Commands::Users { command } => match command {
            UsersCommands::Add { email, role, password } => {
                cli::users::add(&email, role.as_deref(), password)
            }
            UsersCommands::List => cli::users::list(),
        },
        Commands::Status => cli::status::run(),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "zvit", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
