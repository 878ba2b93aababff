//! Terminal front end for the nurse roster.
//!
//! Every invocation loads the full list first, then performs one action through the
//! same view model a graphical front end would use.

use clap::{Args, Parser, Subcommand, ValueEnum};
use nurse_roster::client::{
    DEFAULT_BASE_URL, ExportFormat, Notice, NurseApi, NurseForm, RosterView, write_export,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "nursectl", about = "List, add, edit, delete and export nurse records")]
struct Cli {
    /// Collection URL of the roster API.
    #[arg(long, env = "NURSECTL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every record.
    List,
    /// Add a record.
    Add(FormArgs),
    /// Edit a record; unspecified fields keep their loaded values.
    Edit {
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a record.
    Delete { id: Option<String> },
    /// Write the loaded records to a file.
    Export {
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        /// Output file or directory. Defaults to `nurses.<format>` in the current directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct FormArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    license_number: Option<String>,
    #[arg(long)]
    dob: Option<String>,
    #[arg(long)]
    age: Option<String>,
}

impl FormArgs {
    fn apply(self, form: &mut NurseForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(license_number) = self.license_number {
            form.license_number = license_number;
        }
        if let Some(dob) = self.dob {
            form.dob = dob;
        }
        if let Some(age) = self.age {
            form.age = age;
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

fn print_rows(view: &RosterView) {
    println!(
        "{:<36}  {:<20}  {:<16}  {:<12}  {:<4}",
        "ID", "Name", "License Number", "DOB", "Age"
    );
    for row in view.rows() {
        println!(
            "{:<36}  {:<20}  {:<16}  {:<12}  {:<4}",
            row.id,
            row.name.as_deref().unwrap_or_default(),
            row.license_number.as_deref().unwrap_or_default(),
            row.dob.as_deref().unwrap_or_default(),
            row.age.as_deref().unwrap_or_default(),
        );
    }
}

fn report(notice: Notice) -> ExitCode {
    if notice.is_failure() {
        eprintln!("{notice}");
        ExitCode::FAILURE
    } else {
        println!("{notice}");
        ExitCode::SUCCESS
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let api = match NurseApi::new(&cli.base_url) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut view = RosterView::new(api);
    let loaded = view.refresh().await;

    match cli.command {
        Command::List => {
            if !loaded {
                eprintln!("Error fetching nurses.");
                return ExitCode::FAILURE;
            }
            print_rows(&view);
            ExitCode::SUCCESS
        }
        Command::Add(form) => {
            view.open_add_dialog();
            form.apply(view.form_mut());
            report(view.submit_add().await)
        }
        Command::Edit { id, form } => {
            view.open_edit_dialog(&id);
            form.apply(view.form_mut());
            report(view.submit_edit().await)
        }
        Command::Delete { id } => report(view.delete(id.as_deref()).await),
        Command::Export { format, out } => {
            let format = ExportFormat::from(format);
            let target = out.unwrap_or_else(|| PathBuf::from(format.file_name()));
            match write_export(view.rows(), format, &target) {
                Ok(path) => {
                    println!("Exported {} record(s) to {}", view.rows().len(), path.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Export failed: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
