use crate::catalog_page::*;
use crate::course_csv::*;
use crate::course_list::*;
use crate::database::*;
use crate::error::*;
use crate::scrape_source::*;
use crate::table_source::*;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const DEFAULT_SCRAPE: &str = "fall2023_scrape.csv";
const DEFAULT_TABLE: &str = "fall2023_table.csv";
const DEFAULT_OUT: &str = "fall2023_results.csv";

/// Merge a course catalog scrape and a registrar table into one clean CSV.
#[derive(Debug, Parser)]
#[command(name = "catalog-cleaner", version)]
pub struct Args {
    /// Comma separated export of the catalog web pages
    #[arg(long, env = "CATALOG_SCRAPE", default_value = DEFAULT_SCRAPE)]
    pub scrape: PathBuf,

    /// Tab separated registrar course table
    #[arg(long, env = "CATALOG_TABLE", default_value = DEFAULT_TABLE)]
    pub table: PathBuf,

    /// Where the merged CSV goes
    #[arg(short, long, env = "CATALOG_OUT", default_value = DEFAULT_OUT)]
    pub out: PathBuf,

    /// Also save the merged course list as JSON
    #[arg(long, env = "CATALOG_CACHE")]
    pub cache: Option<PathBuf>,

    /// Report every skipped row
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download one catalog page and save it as plain text
    Fetch {
        url: String,

        #[arg(short, long, default_value = "catalog_page.txt")]
        out: PathBuf,
    },
}

/// Read both sources into one list, write the CSV, optionally the JSON cache.
pub fn run(args: &Args) -> Result<CourseList> {
    let mut courses = CourseList::new();

    info!("Reading scrape export {}...", args.scrape.display());
    if let Some(file) = open_source(&args.scrape)? {
        read_scrape(file, &mut courses, args.verbose)?;
    }

    info!("Reading registrar table {}...", args.table.display());
    if let Some(file) = open_source(&args.table)? {
        read_table(file, &mut courses, args.verbose)?;
    }

    write_file(&args.out, &courses)?;

    if let Some(cache) = &args.cache {
        save_course_database(cache, &courses)?;
    }

    info!("Finished with {} courses!", courses.len());

    Ok(courses)
}

pub fn fetch(url: &str, out: &Path) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .thread_name("fetch-tokio")
        .build()?;

    runtime.block_on(save_catalog_text(url, out))
}

// A source that is not there is skipped, the other one still runs
fn open_source(path: &Path) -> Result<Option<BufReader<File>>> {
    if !path.exists() {
        warn!("{} not found, skipping", path.display());
        return Ok(None);
    }

    Ok(Some(BufReader::new(File::open(path)?)))
}
