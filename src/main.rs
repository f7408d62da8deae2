use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use doi_upload::page::{lock, Page, ResultNode, ResultsContainer, SubmitEvent, UploadForm};
use doi_upload::{
    HttpTransport, SubmissionHandler, SubmissionOutcome, UploadError, UploaderConfig,
};
use env_logger::Env;
use log::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Upload a data file and show the per-record results")]
struct Args {
    /// Spreadsheet to upload (csv, tsv, xlsx or xls)
    #[arg(long)]
    file: PathBuf,

    /// Form field name the file is sent under
    #[arg(long, default_value = "file")]
    file_field: String,

    /// Extra text field, as name=value (repeatable)
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Overrides UPLOAD_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Also write the results container as an HTML fragment
    #[arg(long)]
    html: Option<PathBuf>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<bool, UploadError> {
    // .env was already loaded in main
    let mut config = UploaderConfig::from_env()?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let mut form = UploadForm::new(config.form_id.as_str());
    for (name, value) in args.fields {
        form = form.with_text(name, value);
    }
    form = form.with_file(args.file_field, Some(args.file));

    let mut page = Page::new();
    page.insert_form(form);
    page.insert_results(ResultsContainer::new(config.results_id.as_str()));

    let transport = HttpTransport::new(&config)?;
    info!("Uploading to {}", transport.url());
    let handler = SubmissionHandler::attach(&page, &config, transport)?;

    // --- Submit once, as the page would on a button press ---
    let outcome = handler.on_submit(&mut SubmitEvent::new()).await;

    let results = handler.results();
    let html = {
        let results = lock(&results);
        for node in results.nodes() {
            match node {
                ResultNode::Row(row) => println!("[{}] {}", row.classification, row.text),
                ResultNode::Error(message) => println!("{}", message),
            }
        }
        match args.html {
            Some(path) => Some((path, results.render_html()?)),
            None => None,
        }
    };

    if let Some((path, html)) = html {
        tokio::fs::write(&path, html).await.map_err(|e| {
            UploadError::OutputError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        info!("Results written to {}", path.display());
    }

    Ok(matches!(outcome, SubmissionOutcome::Rendered { .. }))
}
