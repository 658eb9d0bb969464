use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, info};

use sous::cookbook::{find_files, Cookbook};
use sous::export::{export_items, TodoistClient};
use sous::import::{Downloader, RecipeSource, ScrapedRecipe, SimpleAmountParser};
use sous::select::{pick_ingredients, PromptSelector};
use sous::shopping_list::{CategoryConfig, Format, ShoppingList};
use sous::text::kebab_case;
use sous::{Settings, SousError};

const JSON_FILE_EXTENSION: &str = "json";

#[derive(Parser)]
#[command(name = "sous", version)]
#[command(about = "A kitchen assistant")]
struct Cli {
    /// Settings file to use instead of ./sous.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a .sous file from the recipe at the given source URL
    Import {
        /// URL of the recipe to import, or a saved recipe JSON file
        source: String,
        /// Path to the output file (including the .sous extension)
        destination: PathBuf,
        /// Also save the intermediate JSON next to the output file
        #[arg(short = 'c', long)]
        cache_intermediate_json: bool,
    },
    /// Dump JSON files for all the recipes in the given file of URLs
    Dump {
        url_file: PathBuf,
        output_directory: PathBuf,
    },
    /// Convert recipe JSON files to .sous files in bulk
    Archive {
        dump_directory: PathBuf,
        output_directory: PathBuf,
    },
    /// Build a shopping list from a collection of recipes
    Shop(ShopArgs),
    /// Show how each line of a .sous file is read
    Summarize { file: PathBuf },
}

#[derive(clap::Args)]
struct ShopArgs {
    /// Path to a directory containing .sous files
    #[arg(short = 'c', long = "cookbook")]
    cookbooks: Vec<PathBuf>,
    /// Path to a .sous file
    #[arg(short = 'r', long = "recipe")]
    recipes: Vec<PathBuf>,
    /// Format of items in the shopping list: expanded or compact
    #[arg(long)]
    format: Option<String>,
    /// Leave out the item with this id
    #[arg(long = "exclude")]
    exclusions: Vec<String>,
    /// TOML file grouping items into categories
    #[arg(long)]
    categories: Option<PathBuf>,
    /// Pick recipes and ingredients interactively
    #[arg(short = 'i', long)]
    interactive: bool,
    /// Export the shopping list to Todoist
    #[arg(long)]
    export: bool,
    /// Identifier for a Todoist project
    #[arg(long)]
    project_id: Option<String>,
    /// Path to a file containing a Todoist API token
    #[arg(long)]
    token_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, SousError> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    debug!("{:?}", settings);

    match cli.command {
        Command::Import {
            source,
            destination,
            cache_intermediate_json,
        } => {
            let downloader = Downloader::new(&settings.download)?;
            let recipe = downloader.fetch(&source)?;
            if cache_intermediate_json {
                recipe.save(destination.with_extension(JSON_FILE_EXTENSION))?;
            }
            let sous = recipe.write_sous(&destination, &SimpleAmountParser)?;
            println!("{}", sous);
        }
        Command::Dump {
            url_file,
            output_directory,
        } => dump(&settings, &url_file, &output_directory)?,
        Command::Archive {
            dump_directory,
            output_directory,
        } => archive(&dump_directory, &output_directory)?,
        Command::Shop(args) => return shop(&settings, args),
        Command::Summarize { file } => {
            let document = sous::Document::load(&file)?;
            println!("{}", document.summarize());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn dump(settings: &Settings, url_file: &Path, output_directory: &Path) -> Result<(), SousError> {
    let downloader = Downloader::new(&settings.download)?;
    let urls = std::fs::read_to_string(url_file).map_err(|e| SousError::io(url_file, e))?;

    for url in urls.lines().map(str::trim).filter(|url| !url.is_empty()) {
        let recipe = downloader.fetch(url)?;
        let path = output_directory
            .join(kebab_case(&recipe.title))
            .with_extension(JSON_FILE_EXTENSION);
        recipe.save(&path)?;
        info!("Saved {} to {}", url, path.display());

        std::thread::sleep(downloader.delay());
    }

    Ok(())
}

fn archive(dump_directory: &Path, output_directory: &Path) -> Result<(), SousError> {
    for json_file in find_files(dump_directory, JSON_FILE_EXTENSION)? {
        let Some(stem) = json_file.file_stem() else {
            continue;
        };
        let sous_file = output_directory.join(format!("{}.sous", stem.to_string_lossy()));
        ScrapedRecipe::load(&json_file)?.write_sous(&sous_file, &SimpleAmountParser)?;
        info!("Archived {} as {}", json_file.display(), sous_file.display());
    }

    Ok(())
}

fn shop(settings: &Settings, args: ShopArgs) -> Result<ExitCode, SousError> {
    if args.cookbooks.is_empty() && args.recipes.is_empty() {
        println!("Please provide either the --cookbook flag or the --recipe flag.");
        return Ok(ExitCode::FAILURE);
    }

    let format: Format = args.format.as_deref().unwrap_or(settings.format.as_str()).parse()?;
    let categories = match args.categories.as_ref().or(settings.categories.as_ref()) {
        Some(path) => Some(CategoryConfig::load(path)?),
        None => None,
    };

    let cookbook = Cookbook::collate(&args.cookbooks, &args.recipes)?;
    let ingredients = if args.interactive {
        let stdin = io::stdin();
        let mut selector = PromptSelector::new(stdin.lock(), io::stdout());
        pick_ingredients(&cookbook, &mut selector)?
    } else {
        cookbook.ingredients().cloned().collect()
    };

    let mut builder = ShoppingList::builder().ingredients(ingredients).format(format);
    for id in &args.exclusions {
        builder = builder.exclude(id);
    }
    if let Some(categories) = categories {
        builder = builder.categories(categories);
    }
    let shopping_list = builder.build()?;

    if shopping_list.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    if args.export {
        let project_id = match args.project_id.or_else(|| settings.todoist.project_id.clone()) {
            Some(project_id) => project_id,
            None => prompt("Please enter a Todoist Project ID")?,
        };
        let token = match args.token_file.or_else(|| settings.todoist.token_file.clone()) {
            Some(path) => std::fs::read_to_string(&path)
                .map_err(|e| SousError::io(&path, e))?
                .trim()
                .to_string(),
            None => prompt("Please enter a Todoist API token")?,
        };

        let client = TodoistClient::with_base_url(token, settings.todoist.base_url.clone());
        let report = export_items(&client, &shopping_list.render_as(format), &project_id);
        if !report.is_complete() {
            eprintln!("{} item(s) could not be exported", report.failures.len());
        }
    } else {
        println!("\n{}\n", shopping_list);
    }

    println!("Happy shopping! 🛍️");
    Ok(ExitCode::SUCCESS)
}

fn prompt(question: &str) -> Result<String, SousError> {
    let io_error = |e| SousError::io("<terminal>", e);

    print!("{}: ", question);
    io::stdout().flush().map_err(io_error)?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).map_err(io_error)?;
    Ok(answer.trim().to_string())
}
