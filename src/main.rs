mod catalog;
mod cli;
mod db;
mod error;
mod field_map;
mod fmt;
mod models;
mod reconciler;
mod settings;
mod store;
mod validator;

use clap::{CommandFactory, Parser};

use cli::{CatalogCommands, Cli, Commands, ExportCommands, RowsCommands, SegmentCommands, SessionCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Session { command } => match command {
            SessionCommands::Login { user, rola, komorka } => cli::session::login(&user, &rola, komorka),
            SessionCommands::Logout => cli::session::logout(),
        },
        Commands::Catalog { command } => match command {
            CatalogCommands::List { kind } => cli::catalog::list(&kind),
            CatalogCommands::Load { file, kind } => cli::catalog::load(&file, &kind),
        },
        Commands::Rows { command } => match command {
            RowsCommands::Add {
                czesc,
                dzial,
                rozdzial,
                paragraf,
                zrodlo,
                grupa,
                zadanie,
                program,
                plan_wi,
                uzasadnienie,
            } => cli::rows::add(cli::rows::AddArgs {
                czesc,
                dzial,
                rozdzial,
                paragraf,
                zrodlo,
                grupa,
                zadanie,
                program,
                plan_wi,
                uzasadnienie,
            }),
            RowsCommands::List => cli::rows::list(),
            RowsCommands::Show { id } => cli::rows::show(id),
            RowsCommands::Set { id, field, value } => cli::rows::set(id, &field, &value),
        },
        Commands::Segment { command } => match command {
            SegmentCommands::Set { id, field, value } => cli::segment::set(id, &field, &value),
        },
        Commands::History { id, field, segment } => cli::history::run(id, &field, segment),
        Commands::Export { command } => match command {
            ExportCommands::Rows { output } => cli::export::rows(&output),
            ExportCommands::Segments { output } => cli::export::segments(&output),
        },
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
        Commands::Backup { output } => cli::backup::run(output),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "skarbnik", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
